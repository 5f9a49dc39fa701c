//! Operator vocabularies shared by the label matchers, binary, aggregate
//! and unary expressions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AstError, AstResult};

fn unknown(vocabulary: &'static str, token: &str) -> AstError {
    tracing::debug!(vocabulary, token, "unknown operator");
    AstError::UnknownOperator {
        vocabulary,
        token: token.to_string(),
    }
}

/// How a label matcher compares its value against a series' label value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Match {
    /// The equality matcher.
    Equal, // =
    /// The inequality matcher.
    NotEqual, // !=
    /// The regular-expression matcher.
    Regexp, // =~
    /// The negated regular-expression matcher.
    NotRegexp, // !~
}

impl Match {
    pub const ALL: &'static [Match] = &[
        Match::Equal,
        Match::NotEqual,
        Match::Regexp,
        Match::NotRegexp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Match::Equal => "=",
            Match::NotEqual => "!=",
            Match::Regexp => "=~",
            Match::NotRegexp => "!~",
        }
    }

    pub fn is_regex(self) -> bool {
        matches!(self, Match::Regexp | Match::NotRegexp)
    }

    pub fn is_negated(self) -> bool {
        matches!(self, Match::NotEqual | Match::NotRegexp)
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Match {
    type Err = AstError;

    fn from_str(s: &str) -> AstResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| unknown("match", s))
    }
}

/// Binary operators, in the order PromQL declares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binary {
    // Arithmetic
    Pow,
    Mul,
    Div,
    Mod,
    Atan2,
    Add,
    Sub,

    // Comparison
    Eql,
    Gte,
    Gtr,
    Lte,
    Lss,
    Neq,

    // Set
    And,
    Unless,
    Or,
}

impl Binary {
    pub const ALL: &'static [Binary] = &[
        Binary::Pow,
        Binary::Mul,
        Binary::Div,
        Binary::Mod,
        Binary::Atan2,
        Binary::Add,
        Binary::Sub,
        Binary::Eql,
        Binary::Gte,
        Binary::Gtr,
        Binary::Lte,
        Binary::Lss,
        Binary::Neq,
        Binary::And,
        Binary::Unless,
        Binary::Or,
    ];

    /// The operator's symbol or keyword as written in a query.
    pub fn as_str(self) -> &'static str {
        match self {
            Binary::Pow => "^",
            Binary::Mul => "*",
            Binary::Div => "/",
            Binary::Mod => "%",
            Binary::Atan2 => "atan2",
            Binary::Add => "+",
            Binary::Sub => "-",
            Binary::Eql => "==",
            Binary::Gte => ">=",
            Binary::Gtr => ">",
            Binary::Lte => "<=",
            Binary::Lss => "<",
            Binary::Neq => "!=",
            Binary::And => "and",
            Binary::Unless => "unless",
            Binary::Or => "or",
        }
    }

    /// Comparison operators are the only ones accepting the `bool` modifier.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Binary::Eql | Binary::Gte | Binary::Gtr | Binary::Lte | Binary::Lss | Binary::Neq
        )
    }

    /// Set operators always match many-to-many.
    pub fn is_set_operator(self) -> bool {
        matches!(self, Binary::And | Binary::Unless | Binary::Or)
    }

    /// Binding strength, higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Binary::Or => 1,
            Binary::And | Binary::Unless => 2,
            Binary::Eql | Binary::Gte | Binary::Gtr | Binary::Lte | Binary::Lss | Binary::Neq => 3,
            Binary::Add | Binary::Sub => 4,
            Binary::Mul | Binary::Div | Binary::Mod | Binary::Atan2 => 5,
            Binary::Pow => 6,
        }
    }

    pub fn is_right_associative(self) -> bool {
        self == Binary::Pow
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Binary {
    type Err = AstError;

    /// Keywords (`and`, `or`, `unless`, `atan2`) are matched case-insensitively.
    fn from_str(s: &str) -> AstResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| unknown("binary", s))
    }
}

/// Aggregation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregate {
    Avg,
    Bottomk,
    Count,
    CountValues,
    Group,
    Max,
    Min,
    Quantile,
    Stddev,
    Stdvar,
    Sum,
    Topk,
}

impl Aggregate {
    pub const ALL: &'static [Aggregate] = &[
        Aggregate::Avg,
        Aggregate::Bottomk,
        Aggregate::Count,
        Aggregate::CountValues,
        Aggregate::Group,
        Aggregate::Max,
        Aggregate::Min,
        Aggregate::Quantile,
        Aggregate::Stddev,
        Aggregate::Stdvar,
        Aggregate::Sum,
        Aggregate::Topk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Aggregate::Avg => "avg",
            Aggregate::Bottomk => "bottomk",
            Aggregate::Count => "count",
            Aggregate::CountValues => "count_values",
            Aggregate::Group => "group",
            Aggregate::Max => "max",
            Aggregate::Min => "min",
            Aggregate::Quantile => "quantile",
            Aggregate::Stddev => "stddev",
            Aggregate::Stdvar => "stdvar",
            Aggregate::Sum => "sum",
            Aggregate::Topk => "topk",
        }
    }

    /// Whether the aggregation is written with a leading parameter,
    /// e.g. `topk(5, ...)`.
    pub fn takes_parameter(self) -> bool {
        matches!(
            self,
            Aggregate::CountValues | Aggregate::Quantile | Aggregate::Topk | Aggregate::Bottomk
        )
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregate {
    type Err = AstError;

    fn from_str(s: &str) -> AstResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| unknown("aggregate", s))
    }
}

/// Sign applied to a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unary {
    /// Aka plus (`+`).
    Add,
    /// Aka minus (`-`).
    Sub,
}

impl Unary {
    pub const ALL: &'static [Unary] = &[Unary::Add, Unary::Sub];

    pub fn as_str(self) -> &'static str {
        match self {
            Unary::Add => "+",
            Unary::Sub => "-",
        }
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unary {
    type Err = AstError;

    fn from_str(s: &str) -> AstResult<Self> {
        match s {
            "+" => Ok(Unary::Add),
            "-" => Ok(Unary::Sub),
            _ => Err(unknown("unary", s)),
        }
    }
}
