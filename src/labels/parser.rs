//! Regex-driven label parsing.

use crate::error::{HorosError, Result};
use crate::labels::{Action, Label};
use once_cell::sync::Lazy;
use regex::Regex;

/// Default label pattern: an optional `TYPE_` prefix and a single action letter.
pub const DEFAULT_LABEL_PATTERN: &str = r"^(?:(?P<type>.+)_)?(?P<action>[BILOU])$";

static DEFAULT_LABEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_LABEL_PATTERN).expect("default label pattern is valid"));

/// Splits raw label strings into an action and an optional type.
///
/// The pattern must define a named group `action`; a `type` group is used
/// when present. Patterns are anchored at the start of the label but not at
/// its end, so `^` is implied and `$` must be written when wanted.
#[derive(Debug, Clone)]
pub struct LabelParser {
    regex: Regex,
}

impl Default for LabelParser {
    fn default() -> Self {
        Self {
            regex: DEFAULT_LABEL_REGEX.clone(),
        }
    }
}

impl LabelParser {
    /// Creates a parser from a custom pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| HorosError::InvalidLabel(format!("invalid label regex: {}", e)))?;
        if !regex.capture_names().flatten().any(|name| name == "action") {
            return Err(HorosError::InvalidLabel(
                "invalid label regex: missing group \"action\"".to_string(),
            ));
        }
        Ok(Self { regex })
    }

    /// Parses one label.
    pub fn parse(&self, label: &str) -> Result<Label> {
        // a match only counts when it starts at the first character
        let caps = self
            .regex
            .captures(label)
            .filter(|c| c.get(0).map_or(false, |m| m.start() == 0))
            .ok_or_else(|| HorosError::InvalidLabel(format!("invalid label {:?}", label)))?;

        let action = caps
            .name("action")
            .ok_or_else(|| HorosError::InvalidLabel(format!("no action in {:?}", label)))?
            .as_str()
            .parse::<Action>()?;
        let kind = caps
            .name("type")
            .map(|m| m.as_str().to_string())
            .filter(|t| !t.is_empty());

        Ok(Label { action, kind })
    }

    /// Parses a sequence of labels.
    pub fn parse_all<'a, I>(&self, labels: I) -> Result<Vec<Label>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels.into_iter().map(|l| self.parse(l)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        let parser = LabelParser::default();

        let label = parser.parse("PER_B").unwrap();
        assert_eq!(label.action, Action::B);
        assert_eq!(label.kind.as_deref(), Some("PER"));

        let outside = parser.parse("O").unwrap();
        assert_eq!(outside.action, Action::O);
        assert_eq!(outside.kind, None);

        // greedy type keeps inner underscores
        let nested = parser.parse("EDU_SPAN_L").unwrap();
        assert_eq!(nested.kind.as_deref(), Some("EDU_SPAN"));
    }

    #[test]
    fn test_rejects_unknown_labels() {
        let parser = LabelParser::default();
        assert!(parser.parse("PER_X").is_err());
        assert!(parser.parse("").is_err());
    }

    #[test]
    fn test_custom_pattern() {
        let parser = LabelParser::new(r"^(?P<action>[BIO])(?:-(?P<type>.+))?$").unwrap();
        let label = parser.parse("B-LOC").unwrap();
        assert_eq!(label.action, Action::B);
        assert_eq!(label.kind.as_deref(), Some("LOC"));
    }

    #[test]
    fn test_custom_pattern_is_anchored_at_start() {
        let parser = LabelParser::new(r"(?P<type>[A-Z]+)_(?P<action>[BILOU])").unwrap();

        assert_eq!(parser.parse("PER_B").unwrap().action, Action::B);
        // trailing text is allowed, leading text is not
        assert_eq!(parser.parse("PER_Lx").unwrap().action, Action::L);
        assert!(parser.parse("x-PER_B").is_err());
        assert!(parser.parse("per_B").is_err());
    }

    #[test]
    fn test_pattern_without_action_group() {
        let err = LabelParser::new(r"(?P<type>.*)_(?P<act>[BILOU])").unwrap_err();
        assert!(err.to_string().contains("action"));
        assert!(LabelParser::new(r"(unclosed").is_err());
    }
}
