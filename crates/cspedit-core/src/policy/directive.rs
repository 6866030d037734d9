//! Ordered directive set.

use indexmap::IndexMap;

/// Directive name to source-expression tokens, in insertion order.
///
/// Names are unique. Inserting an existing name replaces its values but
/// keeps the position it was first inserted at, so display order and
/// serialization order never move under an edit.
#[derive(Debug, Clone, Default)]
pub struct DirectiveSet {
    entries: IndexMap<String, Vec<String>>,
}

impl DirectiveSet {
    /// Create an empty directive set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite a directive.
    ///
    /// Returns the previous values when `name` was already present.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) -> Option<Vec<String>> {
        self.entries.insert(name.into(), values)
    }

    /// Values of the directive called `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Directive at a 0-based position in insertion order.
    pub fn get_index(&self, index: usize) -> Option<(&str, &[String])> {
        self.entries
            .get_index(index)
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Replace the values of the directive at a 0-based position.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn set_values(&mut self, index: usize, values: Vec<String>) -> bool {
        match self.entries.get_index_mut(index) {
            Some((_, current)) => {
                *current = values;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate `(name, values)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// IndexMap equality ignores order; ours must not.
impl PartialEq for DirectiveSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for DirectiveSet {}

impl<N: Into<String>> FromIterator<(N, Vec<String>)> for DirectiveSet {
    fn from_iter<I: IntoIterator<Item = (N, Vec<String>)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, values) in iter {
            set.insert(name, values);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn insert_preserves_first_position() {
        let mut set = DirectiveSet::new();
        set.insert("a", values(&["1"]));
        set.insert("b", values(&["2"]));
        let previous = set.insert("a", values(&["3"]));

        assert_eq!(previous, Some(values(&["1"])));
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(set.get("a"), Some(&values(&["3"])[..]));
    }

    #[test]
    fn set_values_by_index() {
        let mut set: DirectiveSet = [("a", values(&["1"])), ("b", values(&["2"]))]
            .into_iter()
            .collect();

        assert!(set.set_values(1, vec![]));
        assert_eq!(set.get_index(1), Some(("b", &[][..])));
        assert!(!set.set_values(2, values(&["x"])));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab: DirectiveSet = [("a", vec![]), ("b", vec![])].into_iter().collect();
        let ba: DirectiveSet = [("b", vec![]), ("a", vec![])].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }
}
