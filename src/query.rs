use serde::{Deserialize, Serialize};

/// Query string parameters for one request.
///
/// Keys are unique: setting an existing key replaces its value in place, so
/// insertion order is kept for everything else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    /// Adds or replaces a parameter in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl From<()> for Query {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Query
where
    K: Into<String>,
    V: ToString,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs
            .into_iter()
            .fold(Self::default(), |query, (key, value)| query.param(key, value))
    }
}

impl From<Vec<(String, String)>> for Query {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::default(), |query, (key, value)| query.param(key, value))
    }
}

impl From<Query> for Vec<(String, String)> {
    fn from(query: Query) -> Self {
        query.pairs
    }
}

/// Look-back window accepted by the updated-mods endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdatePeriod {
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1w")]
    Week,
    #[serde(rename = "1m")]
    Month,
}

impl UpdatePeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "1d",
            Self::Week => "1w",
            Self::Month => "1m",
        }
    }
}

impl From<UpdatePeriod> for Query {
    fn from(period: UpdatePeriod) -> Self {
        Query::new().param("period", period.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Query, UpdatePeriod};

    #[test]
    fn from_array_keeps_order() {
        let query: Query = [("key", "abc"), ("expires", "123")].into();
        assert_eq!(
            query.pairs(),
            &[
                ("key".to_owned(), "abc".to_owned()),
                ("expires".to_owned(), "123".to_owned())
            ]
        );
    }

    #[test]
    fn duplicate_keys_replace_in_place() {
        let query = Query::new()
            .param("category", "main")
            .param("page", 1)
            .param("category", "optional");
        assert_eq!(query.len(), 2);
        assert_eq!(query.get("category"), Some("optional"));
        assert_eq!(query.pairs()[0].0, "category");
    }

    #[test]
    fn unit_is_empty() {
        let query: Query = ().into();
        assert!(query.is_empty());
    }

    #[test]
    fn update_period_becomes_period_param() {
        let query: Query = UpdatePeriod::Week.into();
        assert_eq!(query.get("period"), Some("1w"));
    }
}
