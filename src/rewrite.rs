//! Literal rewrite rules applied to matched launch lines.
//!
//! Rules run in declaration order and each one rewrites every occurrence of
//! its literal. Nothing here is a regex: `$1` and `&` mean exactly those bytes.
//! Lines are rewritten as raw bytes, so text outside the literals passes
//! through untouched whatever its encoding.

use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// Launcher that replaces the `./komodod ` invocation in generated batch files
pub const DEFAULT_LAUNCHER: &str = "start ..\\KomodoOceanGUI.exe ";

/// A single rewrite step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rule {
    /// Replace every occurrence of `from` with `to`
    Replace { from: String, to: String },

    /// Delete every occurrence of `literal`
    Remove { literal: String },
}

impl Rule {
    pub fn replace(from: impl Into<String>, to: impl Into<String>) -> Self {
        Rule::Replace {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn remove(literal: impl Into<String>) -> Self {
        Rule::Remove {
            literal: literal.into(),
        }
    }

    /// Apply this rule to `line`.
    pub fn apply(&self, line: &[u8]) -> Vec<u8> {
        match self {
            Rule::Replace { from, to } => replace_all(line, from.as_bytes(), to.as_bytes()),
            Rule::Remove { literal } => replace_all(line, literal.as_bytes(), b""),
        }
    }

    /// The literal this rule searches for
    pub fn pattern(&self) -> &str {
        match self {
            Rule::Replace { from, .. } => from,
            Rule::Remove { literal } => literal,
        }
    }
}

/// Replace every non-overlapping occurrence of `from`, scanning left to right.
fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    if from.is_empty() {
        return haystack.to_vec();
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = rest.windows(from.len()).position(|window| window == from) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(to);
        rest = &rest[pos + from.len()..];
    }
    out.extend_from_slice(rest);
    out
}

/// Ordered list of rewrite rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Run every rule over `line`, in order.
    pub fn apply(&self, line: &[u8]) -> Vec<u8> {
        self.rules
            .iter()
            .fold(line.to_vec(), |acc, rule| rule.apply(&acc))
    }

    /// Reject rules whose search literal is empty.
    pub fn validate(&self) -> Result<(), GenError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.pattern().is_empty() {
                return Err(GenError::InvalidRule(format!(
                    "rule #{} has an empty search literal",
                    index + 1
                )));
            }
        }
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    /// Rewrites a Linux `assetchains` launch line into a Windows GUI launch command.
    fn default() -> Self {
        Self::new(vec![
            Rule::replace("./komodod ", DEFAULT_LAUNCHER),
            Rule::remove("&"),
            Rule::remove("$1"),
            Rule::remove("-pubkey=$pubkey "),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_rewrite_launch_line() {
        let rules = RuleSet::default();
        let line = b"./komodod -ac_name=MYCOIN -ac_supply=100000000 -pubkey=$pubkey &\n";

        assert_eq!(
            rules.apply(line),
            b"start ..\\KomodoOceanGUI.exe -ac_name=MYCOIN -ac_supply=100000000 \n"
        );
    }

    #[test]
    fn test_rules_replace_every_occurrence() {
        let rules = RuleSet::default();
        let line = b"./komodod -ac_name=A $1 $1 & & -addnode=1.2.3.4";

        assert_eq!(
            rules.apply(line),
            b"start ..\\KomodoOceanGUI.exe -ac_name=A     -addnode=1.2.3.4"
        );
    }

    #[test]
    fn test_rules_run_in_order() {
        let rules = RuleSet::new(vec![Rule::replace("a", "b"), Rule::replace("b", "c")]);
        assert_eq!(rules.apply(b"ab"), b"cc");

        let reversed = RuleSet::new(vec![Rule::replace("b", "c"), Rule::replace("a", "b")]);
        assert_eq!(reversed.apply(b"ab"), b"bc");
    }

    #[test]
    fn test_non_utf8_bytes_pass_through() {
        let rules = RuleSet::default();
        let line = b"./komodod -ac_name=LAT -ac_comment=caf\xe9 &";

        assert_eq!(
            rules.apply(line),
            b"start ..\\KomodoOceanGUI.exe -ac_name=LAT -ac_comment=caf\xe9 "
        );
    }

    #[test]
    fn test_replace_all_is_non_overlapping() {
        assert_eq!(replace_all(b"aaa", b"aa", b"b"), b"ba");
        assert_eq!(replace_all(b"$1$1", b"$1", b""), b"");
        assert_eq!(replace_all(b"abc", b"", b"x"), b"abc");
    }

    #[test]
    fn test_pubkey_without_trailing_space_is_kept() {
        let rules = RuleSet::default();

        assert_eq!(rules.apply(b"-pubkey=$pubkey"), b"-pubkey=$pubkey");
    }

    #[test]
    fn test_empty_rule_set_is_identity() {
        let rules = RuleSet::new(Vec::new());

        assert!(rules.is_empty());
        assert_eq!(rules.apply(b"./komodod &"), b"./komodod &");
    }

    #[test]
    fn test_validate_rejects_empty_literal() {
        let rules = RuleSet::new(vec![Rule::remove("&"), Rule::replace("", "x")]);

        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("rule #2"));
        assert!(RuleSet::default().validate().is_ok());
    }

    #[test]
    fn test_rules_deserialize_from_yaml() {
        let yaml = r#"
- kind: replace
  from: "./komodod "
  to: "start komodod.exe "
- kind: remove
  literal: "&"
"#;
        let rules: RuleSet = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules()[0], Rule::replace("./komodod ", "start komodod.exe "));
        assert_eq!(rules.rules()[1], Rule::remove("&"));
    }
}
