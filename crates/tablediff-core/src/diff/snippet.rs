//! Name-keyed comparison of column and index definitions.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::feature::{SqlFeature, Target, strip};
use super::StringDiff;
use crate::schema::{ColumnDescription, IndexDescription};

/// A definition that is compared by name against its counterpart.
pub trait NamedSnippet: Clone + PartialEq {
    /// The key the definition is matched on.
    fn name(&self) -> &str;

    /// The definition as written, used when reporting a difference.
    fn raw_sql(&self) -> &str;

    /// Returns a copy with ignored features stripped and `raw_sql` blanked,
    /// so that equality only looks at structure.
    #[must_use]
    fn normalized(&self, ignores: &BTreeSet<SqlFeature>) -> Self;
}

impl NamedSnippet for ColumnDescription {
    fn name(&self) -> &str {
        &self.name
    }

    fn raw_sql(&self) -> &str {
        &self.raw_sql
    }

    fn normalized(&self, ignores: &BTreeSet<SqlFeature>) -> Self {
        Self {
            name: self.name.clone(),
            data_type: self.data_type.clone(),
            specs: strip(&self.specs, ignores, Target::ColumnSpecs),
            raw_sql: String::new(),
        }
    }
}

impl NamedSnippet for IndexDescription {
    fn name(&self) -> &str {
        &self.name
    }

    fn raw_sql(&self) -> &str {
        &self.raw_sql
    }

    fn normalized(&self, ignores: &BTreeSet<SqlFeature>) -> Self {
        Self {
            name: self.name.clone(),
            index_type: self.index_type.clone(),
            specs: strip(&self.specs, ignores, Target::IndexSpecs),
            raw_sql: String::new(),
        }
    }
}

/// Snippets keyed by name, in first-seen order, each with its normalized form.
///
/// A repeated name keeps its first position and takes the later definition.
fn keyed<'a, T: NamedSnippet>(
    snippets: &'a [T],
    ignores: &BTreeSet<SqlFeature>,
) -> IndexMap<&'a str, (T, &'a T)> {
    snippets
        .iter()
        .map(|snippet| (snippet.name(), (snippet.normalized(ignores), snippet)))
        .collect()
}

/// Compares two sides' definitions by name.
///
/// Entries are reported in a fixed order: definitions missing from the right
/// (left order), definitions missing from the left (right order), then
/// definitions whose normalized forms differ (left order).
pub fn diff_snippets<T: NamedSnippet>(
    left: &[T],
    right: &[T],
    ignores: &BTreeSet<SqlFeature>,
) -> Vec<StringDiff> {
    let left = keyed(left, ignores);
    let right = keyed(right, ignores);

    let missing_right = left
        .iter()
        .filter(|(name, _)| !right.contains_key(*name))
        .map(|(_, (_, original))| StringDiff::left_only(original.raw_sql()));

    let missing_left = right
        .iter()
        .filter(|(name, _)| !left.contains_key(*name))
        .map(|(_, (_, original))| StringDiff::right_only(original.raw_sql()));

    let changed = left.iter().filter_map(|(name, (normalized, original))| {
        let (other_normalized, other_original) = right.get(*name)?;
        (normalized != other_normalized)
            .then(|| StringDiff::changed(original.raw_sql(), other_original.raw_sql()))
    });

    missing_right.chain(missing_left).chain(changed).collect()
}
