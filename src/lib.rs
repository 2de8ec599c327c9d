//! # assetchain-gen: Windows launchers from an assetchains command list
//!
//! Reads a shell script of `komodod` launch lines (one per line) and writes a
//! `.cmd` batch file per asset chain, named after the chain's `-ac_name`.
//!
//! ## Example
//!
//! An input line
//!
//! ```text
//! ./komodod -ac_name=MYCOIN -ac_supply=100000000 -pubkey=$pubkey &
//! ```
//!
//! produces `mycoin.cmd` containing
//!
//! ```text
//! start ..\KomodoOceanGUI.exe -ac_name=MYCOIN -ac_supply=100000000
//! ```
//!
//! Lines without `-ac_name=` are skipped. Rewrite rules, the input path and
//! the output directory can be changed through `assetchain-gen.yaml`.

pub mod config;
pub mod error;
pub mod extraction;
pub mod fs_utils;
pub mod rewrite;
pub mod transformer;

// Re-export key types
pub use config::GenConfig;
pub use error::GenError;
pub use extraction::NameExtractor;
pub use rewrite::{Rule, RuleSet};
pub use transformer::{process, BatchEntry, FailedWrite, LineTransformer, ProcessReport};
