//! Ignorable SQL features and the token stripping rules behind them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A category of cosmetic DDL detail that can be left out of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlFeature {
    /// `COMMENT '...'` on columns, indexes and tables.
    Comment,
    /// `USING BTREE` / `USING HASH` on indexes.
    IndexStorageType,
    /// The `AUTO_INCREMENT = n` counter of a table.
    AutoIncrementId,
    /// `ROW_FORMAT = ...` of a table.
    RowFormat,
}

/// The token sequence a stripping rule is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Clause tokens of a column definition.
    ColumnSpecs,
    /// Clause tokens of an index definition.
    IndexSpecs,
    /// Table option tokens.
    TableOptions,
}

impl SqlFeature {
    /// All features, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Comment,
        Self::IndexStorageType,
        Self::AutoIncrementId,
        Self::RowFormat,
    ];

    /// Returns the feature name as accepted on input.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::IndexStorageType => "index_storage_type",
            Self::AutoIncrementId => "auto_increment_id",
            Self::RowFormat => "row_format",
        }
    }

    /// Returns the accepted feature names, comma separated.
    #[must_use]
    pub fn possible_values() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parses a comma separated feature list such as `comment,row_format`.
    ///
    /// Surrounding whitespace and empty entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFeature`] for the first unrecognized name.
    pub fn parse_list(list: &str) -> Result<BTreeSet<Self>> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse::<Self>)
            .collect()
    }

    /// Returns the stripping rule this feature applies to `target`, if any.
    #[must_use]
    pub const fn rule(&self, target: Target) -> Option<StripRule> {
        match (self, target) {
            (Self::Comment, _) => Some(StripRule::new("COMMENT")),
            (Self::IndexStorageType, Target::IndexSpecs) => Some(StripRule::new("USING")),
            (Self::AutoIncrementId, Target::TableOptions) => Some(StripRule::new("AUTO_INCREMENT")),
            (Self::RowFormat, Target::TableOptions) => Some(StripRule::new("ROW_FORMAT")),
            (
                Self::IndexStorageType | Self::AutoIncrementId | Self::RowFormat,
                Target::ColumnSpecs | Target::IndexSpecs | Target::TableOptions,
            ) => None,
        }
    }
}

impl fmt::Display for SqlFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlFeature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str() == name)
            .ok_or_else(|| Error::UnknownFeature(name.to_string()))
    }
}

/// Removes a marker token and its argument from a token sequence.
///
/// The window starts at the first token equal to the marker (ASCII case
/// insensitive) and covers the marker, an optional `=` and one value token:
/// `COMMENT 'x'`, `COMMENT = 'x'`, `ROW_FORMAT = DYNAMIC`, `USING BTREE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripRule {
    marker: &'static str,
}

impl StripRule {
    const fn new(marker: &'static str) -> Self {
        Self { marker }
    }

    /// Returns the marker token.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        self.marker
    }

    /// Strips the first marker window from `tokens`, in place.
    pub fn apply(&self, tokens: &mut Vec<String>) {
        let Some(start) = tokens
            .iter()
            .position(|t| t.eq_ignore_ascii_case(self.marker))
        else {
            return;
        };

        let mut end = start + 1;
        if tokens.get(end).is_some_and(|t| t == "=") {
            end += 1;
        }
        end = (end + 1).min(tokens.len());
        tokens.drain(start..end);
    }
}

/// Applies every rule that `features` define for `target` to a copy of
/// `tokens`.
#[must_use]
pub fn strip(tokens: &[String], features: &BTreeSet<SqlFeature>, target: Target) -> Vec<String> {
    let mut stripped = tokens.to_vec();
    for rule in features.iter().filter_map(|f| f.rule(target)) {
        rule.apply(&mut stripped);
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn features(items: &[SqlFeature]) -> BTreeSet<SqlFeature> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_parse_feature_names() {
        assert_eq!("comment".parse::<SqlFeature>().unwrap(), SqlFeature::Comment);
        assert_eq!(
            " row_format ".parse::<SqlFeature>().unwrap(),
            SqlFeature::RowFormat
        );
        assert!(matches!(
            "COMMENT".parse::<SqlFeature>(),
            Err(Error::UnknownFeature(name)) if name == "COMMENT"
        ));
    }

    #[test]
    fn test_parse_list() {
        let set = SqlFeature::parse_list("row_format, comment,,").unwrap();
        assert_eq!(set, features(&[SqlFeature::Comment, SqlFeature::RowFormat]));
        assert!(SqlFeature::parse_list("").unwrap().is_empty());
        assert!(SqlFeature::parse_list("comment,engine").is_err());
    }

    #[test]
    fn test_unknown_feature_message_lists_values() {
        let err = "engine".parse::<SqlFeature>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown SQL feature 'engine', possible values are: comment, index_storage_type, auto_increment_id, row_format"
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SqlFeature::IndexStorageType).unwrap();
        assert_eq!(json, "\"index_storage_type\"");
    }

    #[test]
    fn test_rule_targets() {
        assert!(SqlFeature::Comment.rule(Target::ColumnSpecs).is_some());
        assert!(SqlFeature::Comment.rule(Target::TableOptions).is_some());
        assert!(SqlFeature::IndexStorageType.rule(Target::ColumnSpecs).is_none());
        assert_eq!(
            SqlFeature::IndexStorageType
                .rule(Target::IndexSpecs)
                .map(|r| r.marker()),
            Some("USING")
        );
        assert!(SqlFeature::AutoIncrementId.rule(Target::ColumnSpecs).is_none());
        assert!(SqlFeature::RowFormat.rule(Target::IndexSpecs).is_none());
    }

    #[test]
    fn test_strip_column_comment() {
        let specs = tokens(&["NOT", "NULL", "COMMENT", "'id'", "DEFAULT", "'0'"]);
        assert_eq!(
            strip(&specs, &features(&[SqlFeature::Comment]), Target::ColumnSpecs),
            tokens(&["NOT", "NULL", "DEFAULT", "'0'"])
        );
    }

    #[test]
    fn test_strip_option_windows() {
        let options = tokens(&[
            "ENGINE",
            "=",
            "InnoDB",
            "AUTO_INCREMENT",
            "=",
            "804",
            "DEFAULT",
            "CHARSET",
            "=",
            "utf8mb4",
            "COMMENT",
            "=",
            "'log'",
            "ROW_FORMAT",
            "=",
            "DYNAMIC",
        ]);
        let all = features(&SqlFeature::ALL);
        assert_eq!(
            strip(&options, &all, Target::TableOptions),
            tokens(&["ENGINE", "=", "InnoDB", "DEFAULT", "CHARSET", "=", "utf8mb4"])
        );
    }

    #[test]
    fn test_strip_only_first_occurrence() {
        let specs = tokens(&["(`a`)", "USING", "BTREE", "USING", "HASH"]);
        assert_eq!(
            strip(&specs, &features(&[SqlFeature::IndexStorageType]), Target::IndexSpecs),
            tokens(&["(`a`)", "USING", "HASH"])
        );
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let specs = tokens(&["comment", "'x'", "NOT", "NULL"]);
        assert_eq!(
            strip(&specs, &features(&[SqlFeature::Comment]), Target::ColumnSpecs),
            tokens(&["NOT", "NULL"])
        );
    }

    #[test]
    fn test_trailing_marker_without_value() {
        let mut specs = tokens(&["NOT", "NULL", "COMMENT"]);
        StripRule::new("COMMENT").apply(&mut specs);
        assert_eq!(specs, tokens(&["NOT", "NULL"]));
    }

    #[test]
    fn test_absent_marker_leaves_tokens() {
        let specs = tokens(&["(`a`)"]);
        assert_eq!(strip(&specs, &features(&SqlFeature::ALL), Target::IndexSpecs), specs);
    }
}
