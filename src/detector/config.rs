//! Match configuration
//!
//! A [`MatchConfig`] is the active rule set for one run. It is built once
//! from the CLI flags and shared read-only by every concurrent scan unit;
//! `--only`, `--except`, and `--pattern` produce a new config rather than
//! mutating the built-in library.

use super::rules::{
    builtin_multi_name_rules, builtin_name_rules, builtin_regex_rules, builtin_token_rules,
    MultiNameRule, NameRule, RegexRule, TokenRule,
};
use crate::domain::{ArgusError, Confidence, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Active rule set plus detection thresholds for one run
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub regex_rules: Vec<RegexRule>,
    pub name_rules: Vec<NameRule>,
    pub multi_name_rules: Vec<MultiNameRule>,
    pub token_rules: Vec<TokenRule>,
    /// Minimum matched values required to emit a value-based finding
    pub min_count: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            regex_rules: builtin_regex_rules(),
            name_rules: builtin_name_rules(),
            multi_name_rules: builtin_multi_name_rules(),
            token_rules: builtin_token_rules(),
            min_count: 1,
        }
    }
}

impl MatchConfig {
    /// Build the run configuration from CLI rule-selection flags
    ///
    /// A non-empty `pattern` replaces the entire rule set with a single
    /// high-confidence regex rule named `pattern`. Otherwise `only` retains
    /// the named rules and `except` drops them; both accept the `last_name`
    /// alias for `surname` and reject unknown names.
    pub fn build(only: &str, except: &str, pattern: &str, min_count: usize) -> Result<Self> {
        if !pattern.is_empty() {
            let regex = Regex::new(pattern)
                .map_err(|e| ArgusError::Usage(format!("Invalid pattern: {e}")))?;
            return Ok(Self {
                regex_rules: vec![RegexRule {
                    name: "pattern",
                    display_name: "pattern",
                    regex,
                    confidence: Some(Confidence::High),
                }],
                name_rules: Vec::new(),
                multi_name_rules: Vec::new(),
                token_rules: Vec::new(),
                min_count,
            });
        }

        let mut config = Self {
            min_count,
            ..Self::default()
        };

        let only = parse_rule_names(only, &config)?;
        let except = parse_rule_names(except, &config)?;

        let keep = |name: &str| {
            (only.is_empty() || only.contains(name)) && !except.contains(name)
        };

        config.regex_rules.retain(|r| keep(r.name));
        config.name_rules.retain(|r| keep(r.name));
        config.multi_name_rules.retain(|r| keep(r.name));
        config.token_rules.retain(|r| keep(r.name));

        Ok(config)
    }

    /// All known rule names, sorted alphabetically
    fn valid_rule_names(&self) -> BTreeSet<&'static str> {
        let mut names = BTreeSet::new();
        names.extend(self.regex_rules.iter().map(|r| r.name));
        names.extend(self.name_rules.iter().map(|r| r.name));
        names.extend(self.multi_name_rules.iter().map(|r| r.name));
        names.extend(self.token_rules.iter().map(|r| r.name));
        names
    }
}

fn parse_rule_names(list: &str, config: &MatchConfig) -> Result<BTreeSet<String>> {
    let valid = config.valid_rule_names();
    let mut names = BTreeSet::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let name = if name == "last_name" { "surname" } else { name };
        if !valid.contains(name) {
            let valid_list = valid.iter().copied().collect::<Vec<_>>().join(", ");
            return Err(ArgusError::Usage(format!(
                "Invalid rule: {name}. Valid rules are {valid_list}"
            )));
        }
        names.insert(name.to_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.min_count, 1);
        assert!(!config.regex_rules.is_empty());
        assert!(!config.token_rules.is_empty());
    }

    #[test]
    fn test_only_retains_named_rules() {
        let config = MatchConfig::build("email", "", "", 1).unwrap();
        assert_eq!(config.regex_rules.len(), 1);
        assert_eq!(config.regex_rules[0].name, "email");
        assert!(config.name_rules.is_empty());
        assert!(config.token_rules.is_empty());
    }

    #[test]
    fn test_except_drops_named_rules() {
        let config = MatchConfig::build("", "email,surname", "", 1).unwrap();
        assert!(!config.regex_rules.iter().any(|r| r.name == "email"));
        assert!(!config.token_rules.iter().any(|r| r.name == "surname"));
        assert!(config.regex_rules.iter().any(|r| r.name == "ip"));
    }

    #[test]
    fn test_last_name_alias() {
        let config = MatchConfig::build("last_name", "", "", 1).unwrap();
        assert_eq!(config.token_rules.len(), 1);
        assert_eq!(config.token_rules[0].name, "surname");
        assert_eq!(config.name_rules.len(), 1);
    }

    #[test]
    fn test_unknown_rule_lists_valid_names() {
        let err = MatchConfig::build("email,phone2", "", "", 1).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid rule: phone2"));
        // valid names are listed alphabetically
        assert!(message.contains("credit_card"));
        let credit = message.find("credit_card").unwrap();
        let ssn = message.find("ssn").unwrap();
        assert!(credit < ssn);
    }

    #[test]
    fn test_pattern_replaces_rule_set() {
        let config = MatchConfig::build("", "", r"\d{4}", 1).unwrap();
        assert_eq!(config.regex_rules.len(), 1);
        assert_eq!(config.regex_rules[0].name, "pattern");
        assert_eq!(config.regex_rules[0].confidence, Some(Confidence::High));
        assert!(config.name_rules.is_empty());
        assert!(config.multi_name_rules.is_empty());
        assert!(config.token_rules.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_usage_error() {
        let err = MatchConfig::build("", "", "[unclosed", 1).unwrap_err();
        assert!(matches!(err, ArgusError::Usage(_)));
    }
}
