use serde::{Deserialize, Serialize};

use crate::literal::StringLiteral;
use crate::operators::Match;

/// One label constraint, e.g. `job="api"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelMatcher {
    pub label_name: String,
    pub operator: Match,
    pub value: StringLiteral,
}

impl LabelMatcher {
    pub fn new(label_name: impl Into<String>, operator: Match, value: StringLiteral) -> Self {
        Self {
            label_name: label_name.into(),
            operator,
            value,
        }
    }
}

/// The `{...}` block of a selector. Matchers keep the order they were
/// declared in; duplicates are not folded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelMatchers {
    pub matchers: Vec<LabelMatcher>,
}

impl LabelMatchers {
    pub fn new(matchers: Vec<LabelMatcher>) -> Self {
        Self { matchers }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabelMatcher> {
        self.matchers.iter()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// First matcher constraining the given label, if any.
    pub fn find(&self, label_name: &str) -> Option<&LabelMatcher> {
        self.matchers.iter().find(|m| m.label_name == label_name)
    }
}

impl FromIterator<LabelMatcher> for LabelMatchers {
    fn from_iter<I: IntoIterator<Item = LabelMatcher>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for LabelMatchers {
    type Item = LabelMatcher;
    type IntoIter = std::vec::IntoIter<LabelMatcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.matchers.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelMatchers {
    type Item = &'a LabelMatcher;
    type IntoIter = std::slice::Iter<'a, LabelMatcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.matchers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::Quote;

    fn matcher(name: &str, op: Match, value: &str) -> LabelMatcher {
        LabelMatcher::new(name, op, StringLiteral::new(Quote::Double, value))
    }

    #[test]
    fn preserves_declaration_order() {
        let matchers = LabelMatchers::new(vec![
            matcher("job", Match::Equal, "api"),
            matcher("env", Match::NotEqual, "dev"),
        ]);

        let read_back: Vec<_> = matchers
            .iter()
            .map(|m| (m.label_name.as_str(), m.operator, m.value.value.as_str()))
            .collect();
        assert_eq!(
            read_back,
            vec![("job", Match::Equal, "api"), ("env", Match::NotEqual, "dev")]
        );
    }

    #[test]
    fn order_is_part_of_equality() {
        let a: LabelMatchers = [
            matcher("job", Match::Equal, "api"),
            matcher("env", Match::NotEqual, "dev"),
        ]
        .into_iter()
        .collect();
        let b: LabelMatchers = [
            matcher("env", Match::NotEqual, "dev"),
            matcher("job", Match::Equal, "api"),
        ]
        .into_iter()
        .collect();
        assert_ne!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn duplicates_are_kept() {
        let matchers = LabelMatchers::new(vec![
            matcher("job", Match::Regexp, "api.*"),
            matcher("job", Match::NotEqual, "api-canary"),
        ]);
        assert_eq!(matchers.len(), 2);
        assert_eq!(matchers.find("job").unwrap().operator, Match::Regexp);
        assert!(matchers.find("env").is_none());
    }
}
