//! Structural differences between two schema snapshots.
//!
//! [`diff`] reports tables that exist on one side only, then compares the
//! tables both sides share column by column, index by index and option by
//! option. Ignored [`SqlFeature`]s are stripped from the compared token
//! sequences first; reported text is always the original `raw_sql`.

mod feature;
mod snippet;

use std::collections::BTreeSet;

use chrono::{Local, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use feature::{SqlFeature, StripRule, Target, strip};
pub use snippet::{NamedSnippet, diff_snippets};

use crate::error::{Error, Result};
use crate::schema::{SchemaDescription, TableDescription};

/// Name and DDL of a table that exists on one side only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDdl {
    /// Table name.
    pub name: String,
    /// The full `CREATE TABLE` statement.
    pub sql: String,
}

impl From<&TableDescription> for TableDdl {
    fn from(table: &TableDescription) -> Self {
        Self {
            name: table.name.clone(),
            sql: table.raw_sql.clone(),
        }
    }
}

/// A table present in only one of the two snapshots.
///
/// At least one side is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableMissingDiffRepr")]
pub struct TableMissingDiff {
    left: Option<TableDdl>,
    right: Option<TableDdl>,
}

#[derive(Deserialize)]
struct TableMissingDiffRepr {
    left: Option<TableDdl>,
    right: Option<TableDdl>,
}

impl TryFrom<TableMissingDiffRepr> for TableMissingDiff {
    type Error = Error;

    fn try_from(repr: TableMissingDiffRepr) -> Result<Self> {
        Self::new(repr.left, repr.right)
    }
}

impl TableMissingDiff {
    /// Creates a missing-table entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRequiredField`] if both sides are `None`.
    pub fn new(left: Option<TableDdl>, right: Option<TableDdl>) -> Result<Self> {
        if left.is_none() && right.is_none() {
            return Err(Error::MissingRequiredField("TableMissingDiff"));
        }
        Ok(Self { left, right })
    }

    /// A table that only the left snapshot has.
    #[must_use]
    pub const fn left_only(table: TableDdl) -> Self {
        Self {
            left: Some(table),
            right: None,
        }
    }

    /// A table that only the right snapshot has.
    #[must_use]
    pub const fn right_only(table: TableDdl) -> Self {
        Self {
            left: None,
            right: Some(table),
        }
    }

    /// The left side, if the table exists there.
    #[must_use]
    pub const fn left(&self) -> Option<&TableDdl> {
        self.left.as_ref()
    }

    /// The right side, if the table exists there.
    #[must_use]
    pub const fn right(&self) -> Option<&TableDdl> {
        self.right.as_ref()
    }

    /// Name of the table.
    #[must_use]
    pub fn name(&self) -> &str {
        match (&self.left, &self.right) {
            (Some(ddl), _) | (None, Some(ddl)) => &ddl.name,
            (None, None) => "",
        }
    }
}

/// A pair of differing texts.
///
/// At least one side is always present; a missing side means the snippet
/// only exists on the other one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StringDiffRepr")]
pub struct StringDiff {
    left: Option<String>,
    right: Option<String>,
}

#[derive(Deserialize)]
struct StringDiffRepr {
    left: Option<String>,
    right: Option<String>,
}

impl TryFrom<StringDiffRepr> for StringDiff {
    type Error = Error;

    fn try_from(repr: StringDiffRepr) -> Result<Self> {
        Self::new(repr.left, repr.right)
    }
}

impl StringDiff {
    /// Creates a string diff.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRequiredField`] if both sides are `None`.
    pub fn new(left: Option<String>, right: Option<String>) -> Result<Self> {
        if left.is_none() && right.is_none() {
            return Err(Error::MissingRequiredField("StringDiff"));
        }
        Ok(Self { left, right })
    }

    /// A snippet only the left side has.
    #[must_use]
    pub fn left_only(left: impl Into<String>) -> Self {
        Self {
            left: Some(left.into()),
            right: None,
        }
    }

    /// A snippet only the right side has.
    #[must_use]
    pub fn right_only(right: impl Into<String>) -> Self {
        Self {
            left: None,
            right: Some(right.into()),
        }
    }

    /// A snippet both sides have, in different forms.
    #[must_use]
    pub fn changed(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: Some(left.into()),
            right: Some(right.into()),
        }
    }

    /// The left text.
    #[must_use]
    pub fn left(&self) -> Option<&str> {
        self.left.as_deref()
    }

    /// The right text.
    #[must_use]
    pub fn right(&self) -> Option<&str> {
        self.right.as_deref()
    }
}

/// Differences inside a table that both snapshots have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDetailDiff {
    /// Table name.
    pub name: String,
    /// Column differences.
    pub columns: Vec<StringDiff>,
    /// Index differences.
    pub indexes: Vec<StringDiff>,
    /// Table option difference, as space-joined option tokens.
    pub option: Option<StringDiff>,
}

impl TableDetailDiff {
    /// Creates a detail diff, or `None` if nothing differs.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        columns: Vec<StringDiff>,
        indexes: Vec<StringDiff>,
        option: Option<StringDiff>,
    ) -> Option<Self> {
        if columns.is_empty() && indexes.is_empty() && option.is_none() {
            return None;
        }
        Some(Self {
            name: name.into(),
            columns,
            indexes,
            option,
        })
    }
}

/// The result of comparing two schema snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDiff {
    /// Tables that exist on one side only.
    pub tables: Vec<TableMissingDiff>,
    /// Tables that exist on both sides but differ.
    pub inside_tables: Vec<TableDetailDiff>,
    /// When the comparison was made (local time).
    pub timestamp: NaiveDateTime,
}

impl SchemaDiff {
    /// Returns true if the two snapshots had no differences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.inside_tables.is_empty()
    }

    /// Serializes the diff to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Reads a diff from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the text is not a valid diff,
    /// including entries with neither side present.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Compares two snapshots, stamping the result with the current local time.
#[must_use]
pub fn diff(
    left: &SchemaDescription,
    right: &SchemaDescription,
    ignores: &BTreeSet<SqlFeature>,
) -> SchemaDiff {
    diff_at(left, right, ignores, Local::now().naive_local())
}

/// Compares two snapshots with an explicit result timestamp.
///
/// Tables are matched by name; when a snapshot lists a name twice, the first
/// table is used.
#[must_use]
pub fn diff_at(
    left: &SchemaDescription,
    right: &SchemaDescription,
    ignores: &BTreeSet<SqlFeature>,
    timestamp: NaiveDateTime,
) -> SchemaDiff {
    let left_tables = index_tables(&left.tables);
    let right_tables = index_tables(&right.tables);

    let mut tables = Vec::new();

    // Tables to report as missing on the right
    for (name, table) in &left_tables {
        if !right_tables.contains_key(name) {
            tables.push(TableMissingDiff::left_only((*table).into()));
        }
    }

    // Tables to report as missing on the left
    for (name, table) in &right_tables {
        if !left_tables.contains_key(name) {
            tables.push(TableMissingDiff::right_only((*table).into()));
        }
    }

    let inside_tables: Vec<TableDetailDiff> = left_tables
        .iter()
        .filter_map(|(name, table)| {
            let other = right_tables.get(name)?;
            diff_table(table, other, ignores)
        })
        .collect();

    debug!(
        missing = tables.len(),
        changed = inside_tables.len(),
        "Compared {} left and {} right tables",
        left_tables.len(),
        right_tables.len()
    );

    SchemaDiff {
        tables,
        inside_tables,
        timestamp,
    }
}

/// Compares two definitions of the same table.
fn diff_table(
    left: &TableDescription,
    right: &TableDescription,
    ignores: &BTreeSet<SqlFeature>,
) -> Option<TableDetailDiff> {
    let columns = diff_snippets(&left.columns, &right.columns, ignores);
    let indexes = diff_snippets(&left.indexes, &right.indexes, ignores);

    let left_options = strip(&left.options, ignores, Target::TableOptions);
    let right_options = strip(&right.options, ignores, Target::TableOptions);
    let option = (left_options != right_options)
        .then(|| StringDiff::changed(left.options.join(" "), right.options.join(" ")));

    debug!(
        table = %left.name,
        columns = columns.len(),
        indexes = indexes.len(),
        options_differ = option.is_some(),
        "Compared table"
    );

    TableDetailDiff::new(left.name.as_str(), columns, indexes, option)
}

/// Keys tables by name, keeping the first table for a repeated name.
fn index_tables(tables: &[TableDescription]) -> IndexMap<&str, &TableDescription> {
    let mut by_name = IndexMap::with_capacity(tables.len());
    for table in tables {
        by_name.entry(table.name.as_str()).or_insert(table);
    }
    by_name
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn schema(statements: &[&str]) -> SchemaDescription {
        let tables = statements
            .iter()
            .map(|sql| TableDescription::parse(sql).unwrap())
            .collect();
        SchemaDescription::with_timestamp(tables, timestamp())
    }

    #[test]
    fn test_both_sides_absent_is_rejected() {
        assert!(matches!(
            StringDiff::new(None, None),
            Err(Error::MissingRequiredField("StringDiff"))
        ));
        assert!(matches!(
            TableMissingDiff::new(None, None),
            Err(Error::MissingRequiredField("TableMissingDiff"))
        ));
        assert!(StringDiff::new(Some("a".to_string()), None).is_ok());
    }

    #[test]
    fn test_detail_diff_needs_content() {
        assert!(TableDetailDiff::new("t", vec![], vec![], None).is_none());
        let detail = TableDetailDiff::new("t", vec![], vec![], Some(StringDiff::changed("a", "b")));
        assert_eq!(detail.unwrap().name, "t");
    }

    #[test]
    fn test_missing_table_name() {
        let ddl = TableDdl {
            name: "a".to_string(),
            sql: "CREATE TABLE a (id int)".to_string(),
        };
        assert_eq!(TableMissingDiff::right_only(ddl).name(), "a");
    }

    #[test]
    fn test_duplicate_table_uses_first_definition() {
        let left = schema(&["CREATE TABLE a (id INT)", "CREATE TABLE a (id BIGINT)"]);
        let right = schema(&["CREATE TABLE a (id INT)"]);
        assert!(diff_at(&left, &right, &BTreeSet::new(), timestamp()).is_empty());
    }

    #[test]
    fn test_option_diff_reports_original_tokens() {
        let left = schema(&["CREATE TABLE a (id INT) ENGINE=InnoDB AUTO_INCREMENT=5"]);
        let right = schema(&["CREATE TABLE a (id INT) ENGINE=MyISAM AUTO_INCREMENT=9"]);
        let ignores: BTreeSet<_> = [SqlFeature::AutoIncrementId].into_iter().collect();

        let result = diff_at(&left, &right, &ignores, timestamp());
        let option = result.inside_tables[0].option.as_ref().unwrap();
        assert_eq!(option.left(), Some("ENGINE = InnoDB AUTO_INCREMENT = 5"));
        assert_eq!(option.right(), Some("ENGINE = MyISAM AUTO_INCREMENT = 9"));
    }

    #[test]
    fn test_json_shape() {
        let left = schema(&["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)"]);
        let right = schema(&["CREATE TABLE b (id INT, name TEXT)"]);
        let result = diff_at(&left, &right, &BTreeSet::new(), timestamp());

        let value: serde_json::Value = serde_json::from_str(&result.to_json(false).unwrap()).unwrap();
        assert_eq!(value["tables"][0]["left"]["name"], "a");
        assert!(value["tables"][0]["right"].is_null());
        assert_eq!(value["insideTables"][0]["columns"][0]["right"], "name TEXT");
        assert!(value["insideTables"][0]["option"].is_null());
        assert_eq!(value["timestamp"], "2024-05-01T12:00:00");
    }

    #[test]
    fn test_from_json_rejects_empty_sides() {
        let json = r#"{"tables":[{"left":null,"right":null}],"insideTables":[],"timestamp":"2024-05-01T12:00:00"}"#;
        assert!(matches!(SchemaDiff::from_json(json), Err(Error::Serialization(_))));

        let json = r#"{"tables":[],"insideTables":[{"name":"t","columns":[{"left":null,"right":null}],"indexes":[],"option":null}],"timestamp":"2024-05-01T12:00:00"}"#;
        assert!(SchemaDiff::from_json(json).is_err());
    }
}
