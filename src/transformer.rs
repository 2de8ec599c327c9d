//! Line transformer: turns an `assetchains` command list into `.cmd` launchers.
//!
//! Each input line carrying `-ac_name=<NAME>` becomes one output file named
//! after the lowercased chain name. Lines without the marker are skipped.
//! When two lines name the same chain, the later one overwrites the earlier
//! file.

use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::config::GenConfig;
use crate::error::GenError;
use crate::extraction::NameExtractor;
use crate::fs_utils;
use crate::rewrite::RuleSet;

/// A batch file derived from one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// Chain name as captured from the line
    pub identifier: String,
    /// Output file name, relative to the output directory
    pub file_name: String,
    /// Rewritten, trimmed line, byte for byte
    pub content: Vec<u8>,
}

/// Bytes stripped from both ends of a rewritten line: space, tab, LF, CR, NUL, VT
fn is_line_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\0' | b'\x0B')
}

/// Trim blank bytes from both ends. Non-ASCII whitespace such as NBSP is kept.
fn trim_line(line: &[u8]) -> &[u8] {
    let start = line.iter().position(|&b| !is_line_blank(b)).unwrap_or(line.len());
    let end = line.iter().rposition(|&b| !is_line_blank(b)).map_or(start, |i| i + 1);
    &line[start..end]
}

/// A write that failed while `keep_going` was enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedWrite {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of one processing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub lines_read: usize,
    pub lines_matched: usize,
    /// Files written (or planned, in a dry run), in input order.
    /// A file overwritten by a later line appears once per write.
    pub written: Vec<PathBuf>,
    /// Writes that replaced a file produced earlier in the same run
    pub overwritten: usize,
    pub failed: Vec<FailedWrite>,
    pub dry_run: bool,
}

impl ProcessReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Line transformer
pub struct LineTransformer {
    extractor: NameExtractor,
    rules: RuleSet,
    extension: String,
    output_dir: PathBuf,
    dry_run: bool,
    keep_going: bool,
}

impl LineTransformer {
    /// Build a transformer from a validated configuration.
    pub fn from_config(config: &GenConfig) -> Result<Self, GenError> {
        config.validate()?;

        Ok(Self {
            extractor: NameExtractor::new(&config.marker)?,
            rules: config.rules.clone(),
            extension: config.extension.clone(),
            output_dir: config.output_dir.clone(),
            dry_run: false,
            keep_going: false,
        })
    }

    /// Compute entries without writing any file.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Log and record write failures instead of aborting the run.
    pub fn keep_going(mut self, enabled: bool) -> Self {
        self.keep_going = enabled;
        self
    }

    /// Transform a single line.
    ///
    /// Returns `None` when the line carries no chain name.
    pub fn transform_line(&self, line: &[u8]) -> Option<BatchEntry> {
        let identifier = self.extractor.extract(line)?;
        let content = trim_line(&self.rules.apply(line)).to_vec();

        Some(BatchEntry {
            identifier: identifier.to_string(),
            file_name: format!("{}.{}", identifier.to_ascii_lowercase(), self.extension),
            content,
        })
    }

    /// Process every line of `input`, writing one file per matching line.
    ///
    /// # Errors
    ///
    /// * `GenError::InputOpen` if `input` cannot be opened
    /// * `GenError::InputRead` if reading fails part way through
    /// * `GenError::OutputWrite` on the first failed write, unless `keep_going` is set
    pub fn process<P: AsRef<Path>>(&self, input: P) -> Result<ProcessReport, GenError> {
        let input = input.as_ref();
        let file = File::open(input).map_err(|source| GenError::InputOpen {
            path: input.to_path_buf(),
            source,
        })?;

        tracing::debug!("Reading {}", input.display());
        self.process_reader(BufReader::new(file), input)
    }

    /// Process lines from any buffered reader. `label` names the input in errors.
    pub fn process_reader<R: BufRead>(
        &self,
        mut reader: R,
        label: &Path,
    ) -> Result<ProcessReport, GenError> {
        let mut report = ProcessReport {
            dry_run: self.dry_run,
            ..ProcessReport::default()
        };
        let mut seen: HashSet<String> = HashSet::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| GenError::InputRead {
                    path: label.to_path_buf(),
                    source: e,
                })?;
            if read == 0 {
                break;
            }

            report.lines_read += 1;

            let Some(entry) = self.transform_line(&buf) else {
                tracing::debug!("Line {}: no chain name, skipped", report.lines_read);
                continue;
            };
            report.lines_matched += 1;

            if !seen.insert(entry.file_name.clone()) {
                report.overwritten += 1;
                tracing::debug!("Line {}: {} replaces an earlier entry", report.lines_read, entry.file_name);
            }

            let path = self.output_dir.join(&entry.file_name);

            if self.dry_run {
                tracing::info!(
                    "Would write {}: {}",
                    path.display(),
                    String::from_utf8_lossy(&entry.content)
                );
                report.written.push(path);
                continue;
            }

            match fs_utils::write_file(&path, &entry.content) {
                Ok(()) => {
                    tracing::info!("Wrote {}", path.display());
                    report.written.push(path);
                }
                Err(source) if self.keep_going => {
                    tracing::error!("Failed to write {}: {}", path.display(), source);
                    report.failed.push(FailedWrite {
                        path,
                        reason: source.to_string(),
                    });
                }
                Err(source) => return Err(GenError::OutputWrite { path, source }),
            }
        }

        tracing::info!(
            "Processed {} lines: {} matched, {} files written, {} failed",
            report.lines_read,
            report.lines_matched,
            report.written.len(),
            report.failed.len()
        );

        Ok(report)
    }
}

impl Default for LineTransformer {
    fn default() -> Self {
        let config = GenConfig::default();
        Self {
            extractor: NameExtractor::default(),
            rules: config.rules,
            extension: config.extension,
            output_dir: config.output_dir,
            dry_run: false,
            keep_going: false,
        }
    }
}

/// Process `input` with the default settings, writing into the working directory.
pub fn process<P: AsRef<Path>>(input: P) -> Result<ProcessReport, GenError> {
    LineTransformer::default().process(input)
}
