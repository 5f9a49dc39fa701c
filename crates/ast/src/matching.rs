use serde::{Deserialize, Serialize};

/// Describes the cardinality relationship of two vectors in a binary operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VectorMatchCardinality {
    #[default]
    OneToOne,
    /// `group_left`
    ManyToOne,
    /// `group_right`
    OneToMany,
}

/// How elements from two vectors in a binary operation are paired.
///
/// The default value is the implicit matching of a binary expression
/// written without `on`, `ignoring`, `group_left` or `group_right`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VectorMatching {
    pub match_cardinality: VectorMatchCardinality,
    /// Labels defining equality of a pair of elements.
    pub matching_labels: Vec<String>,
    /// `on(...)` when true, `ignoring(...)` when false.
    pub on: bool,
    /// Extra labels copied from the lower-cardinality side.
    pub include: Vec<String>,
    /// For comparison operators, return 0/1 instead of filtering.
    pub return_bool: bool,
}

impl VectorMatching {
    pub fn new(
        match_cardinality: VectorMatchCardinality,
        matching_labels: Vec<String>,
        on: bool,
        include: Vec<String>,
        return_bool: bool,
    ) -> Self {
        Self {
            match_cardinality,
            matching_labels,
            on,
            include,
            return_bool,
        }
    }

    /// Default matching carrying only the `bool` modifier.
    pub fn with_return_bool(return_bool: bool) -> Self {
        Self {
            return_bool,
            ..Self::default()
        }
    }
}
