//! Function call parameters and their presentation grouping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parameter name for the text an edit replaces.
pub const OLD_STR: &str = "old_str";

/// Parameter name for the replacement text of an edit.
pub const NEW_STR: &str = "new_str";

/// A single named parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Trimmed parameter content.
    pub content: String,
}

/// How a parameter set is laid out for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterView<'a> {
    /// `old_str`/`new_str` shown side by side.
    Paired {
        /// Text being replaced.
        old: &'a str,
        /// Replacement text.
        new: &'a str,
    },
    /// Any other parameter.
    Single {
        /// Parameter name.
        name: &'a str,
        /// Parameter content.
        content: &'a str,
    },
}

/// Parameters of a function call, keyed by name.
///
/// Re-inserting a name overwrites its content but keeps the position of the
/// first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: IndexMap<String, String>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter; the last write for a name wins.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(name.into(), content.into());
    }

    /// Look up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, content)` in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Owned copies of the parameters, in order.
    #[must_use]
    pub fn to_parameters(&self) -> Vec<Parameter> {
        self.iter()
            .map(|(name, content)| Parameter {
                name: name.to_string(),
                content: content.to_string(),
            })
            .collect()
    }

    /// The `(old_str, new_str)` pair when both are present.
    #[must_use]
    pub fn edit_pair(&self) -> Option<(&str, &str)> {
        Some((self.get(OLD_STR)?, self.get(NEW_STR)?))
    }

    /// Group parameters for display.
    ///
    /// With both `old_str` and `new_str` present, the pair comes first and
    /// neither appears again. Otherwise every parameter (including a lone
    /// `old_str` or `new_str`) is shown on its own, in order.
    #[must_use]
    pub fn views(&self) -> Vec<ParameterView<'_>> {
        let mut views = Vec::with_capacity(self.len());
        let paired = self.edit_pair();

        if let Some((old, new)) = paired {
            views.push(ParameterView::Paired { old, new });
        }

        for (name, content) in self.iter() {
            if paired.is_some() && (name == OLD_STR || name == NEW_STR) {
                continue;
            }
            views.push(ParameterView::Single { name, content });
        }

        views
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, content) in iter {
            set.insert(name, content);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_keeps_first_position() {
        let mut set = ParameterSet::new();
        set.insert("path", "/a");
        set.insert("command", "view");
        set.insert("path", "/b");

        let names: Vec<_> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["path", "command"]);
        assert_eq!(set.get("path"), Some("/b"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_views_pair_edit_parameters_first() {
        let set: ParameterSet = [
            ("command", "str_replace"),
            ("new_str", "B"),
            ("path", "/f.py"),
            ("old_str", "A"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            set.views(),
            vec![
                ParameterView::Paired { old: "A", new: "B" },
                ParameterView::Single { name: "command", content: "str_replace" },
                ParameterView::Single { name: "path", content: "/f.py" },
            ]
        );
    }

    #[test]
    fn test_views_lone_old_str_is_single() {
        let set: ParameterSet = [("old_str", "A")].into_iter().collect();
        assert!(set.edit_pair().is_none());
        assert_eq!(
            set.views(),
            vec![ParameterView::Single { name: "old_str", content: "A" }]
        );
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let set: ParameterSet = [("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }
}
