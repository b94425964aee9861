//! Tracker blocklist
//!
//! Models the WebKit content-rule-list JSON format. The rules themselves
//! are compiled by the webview; this side owns loading, validation, and
//! the bundled default list.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Bundled default blocklist, applied when tracker blocking is enabled.
const BUNDLED_JSON: &str = include_str!("../assets/tracker-blocklist.json");

/// A content-rule-list trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTrigger {
    /// Regex matched against the resource URL
    #[serde(rename = "url-filter")]
    pub url_filter: String,
    #[serde(rename = "url-filter-is-case-sensitive", skip_serializing_if = "Option::is_none")]
    pub url_filter_is_case_sensitive: Option<bool>,
    /// e.g. "script", "image", "raw"
    #[serde(rename = "resource-type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<Vec<String>>,
    /// "first-party" / "third-party"
    #[serde(rename = "load-type", skip_serializing_if = "Option::is_none")]
    pub load_type: Option<Vec<String>>,
    #[serde(rename = "if-domain", skip_serializing_if = "Option::is_none")]
    pub if_domain: Option<Vec<String>>,
    #[serde(rename = "unless-domain", skip_serializing_if = "Option::is_none")]
    pub unless_domain: Option<Vec<String>>,
}

/// A content-rule-list action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockAction {
    /// "block", "block-cookies", "css-display-none", "ignore-previous-rules"
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

/// One blocking rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRule {
    pub trigger: BlockTrigger,
    pub action: BlockAction,
}

const KNOWN_ACTIONS: &[&str] = &[
    "block",
    "block-cookies",
    "css-display-none",
    "ignore-previous-rules",
];

/// An ordered list of blocking rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blocklist {
    pub rules: Vec<BlockRule>,
}

impl Blocklist {
    /// The blocklist shipped with the application
    pub fn bundled() -> CoreResult<Self> {
        let list = Self::from_json(BUNDLED_JSON)?;
        list.validate()?;
        Ok(list)
    }

    /// Parse a rule list from its JSON wire form
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the JSON form handed to the webview for compilation
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check every rule: known action type, url-filter that compiles as a
    /// regex, and a selector on css-display-none actions.
    pub fn validate(&self) -> CoreResult<()> {
        for (index, rule) in self.rules.iter().enumerate() {
            let invalid = |reason: String| CoreError::InvalidRule { index, reason };

            if !KNOWN_ACTIONS.contains(&rule.action.action_type.as_str()) {
                return Err(invalid(format!(
                    "unknown action type '{}'",
                    rule.action.action_type
                )));
            }
            if rule.trigger.url_filter.is_empty() {
                return Err(invalid("empty url-filter".to_string()));
            }
            if let Err(e) = regex::Regex::new(&rule.trigger.url_filter) {
                return Err(invalid(format!("url-filter is not a valid regex: {}", e)));
            }
            if rule.action.action_type == "css-display-none" && rule.action.selector.is_none() {
                return Err(invalid("css-display-none without selector".to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_rule(filter: &str) -> BlockRule {
        BlockRule {
            trigger: BlockTrigger {
                url_filter: filter.to_string(),
                url_filter_is_case_sensitive: None,
                resource_type: None,
                load_type: None,
                if_domain: None,
                unless_domain: None,
            },
            action: BlockAction {
                action_type: "block".to_string(),
                selector: None,
            },
        }
    }

    #[test]
    fn test_bundled_list_parses_and_validates() {
        let list = Blocklist::bundled().unwrap();
        assert!(!list.is_empty());
    }

    #[test]
    fn test_wire_field_names_are_hyphenated() {
        let list = Blocklist {
            rules: vec![BlockRule {
                trigger: BlockTrigger {
                    url_filter: "^https://tracker\\.example\\.org/".to_string(),
                    url_filter_is_case_sensitive: None,
                    resource_type: Some(vec!["script".to_string()]),
                    load_type: Some(vec!["third-party".to_string()]),
                    if_domain: None,
                    unless_domain: None,
                },
                action: BlockAction {
                    action_type: "block".to_string(),
                    selector: None,
                },
            }],
        };
        let json = list.to_json().unwrap();
        assert!(json.contains("\"url-filter\""));
        assert!(json.contains("\"resource-type\""));
        assert!(json.contains("\"load-type\""));
        assert!(json.contains("\"type\":\"block\""));
        assert_eq!(Blocklist::from_json(&json).unwrap(), list);
    }

    #[test]
    fn test_validation_rejects_unknown_action() {
        let mut rule = block_rule("^https://a\\.example/");
        rule.action.action_type = "explode".to_string();
        let err = Blocklist { rules: vec![rule] }.validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidRule { index: 0, .. }));
    }

    #[test]
    fn test_validation_rejects_bad_regex() {
        let rule = block_rule("(unclosed");
        assert!(Blocklist { rules: vec![rule] }.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_selectorless_css_rule() {
        let mut rule = block_rule("^https://a\\.example/");
        rule.action.action_type = "css-display-none".to_string();
        assert!(Blocklist { rules: vec![rule] }.validate().is_err());
    }
}
