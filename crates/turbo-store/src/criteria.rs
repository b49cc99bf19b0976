//! Search criteria.

use serde_json::Value;

/// A field equality filter.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualsFilter {
    /// Serialized field name (e.g., `"rule_id"`).
    pub field: String,
    /// Value the field must equal.
    pub value: Value,
}

/// Describes which entities a search should return.
///
/// An empty criteria matches every entity. Ids, filters and the limit
/// combine conjunctively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    ids: Vec<String>,
    filters: Vec<EqualsFilter>,
    limit: Option<usize>,
}

impl Criteria {
    /// Create criteria matching every entity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create criteria selecting the given ids.
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add a field equality filter.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(EqualsFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Limit the number of returned entities.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Selected ids (empty = any id).
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Field filters.
    pub fn filters(&self) -> &[EqualsFilter] {
        &self.filters
    }

    /// Result limit.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Check whether an id passes the id selection.
    pub fn accepts_id(&self, id: &str) -> bool {
        self.ids.is_empty() || self.ids.iter().any(|i| i == id)
    }
}
