//! Grammar positions with restricted operands.
//!
//! PromQL has three places where only some expressions may appear: the
//! operand of `offset`, the left-hand side of a binary operator and the
//! body of a subquery. Each is modelled twice:
//!
//! - a sealed marker trait ([`Offsettable`], [`BinaryOperand`],
//!   [`SubqueryBody`]) implemented by exactly the node types allowed there,
//!   used as the bound on the constructors that fill the position;
//! - a closed enum ([`OffsettableExpr`], [`BinaryOperandExpr`],
//!   [`SubqueryBodyExpr`]) stored in the tree, so consumers can match on
//!   every admissible variant and nothing else.
//!
//! Every allowed node fits:
//!
//! ```
//! use promql_ast::{
//!     Binary, BinaryExpr, Duration, FunctionCall, FunctionIdentifier, MatrixSelector,
//!     MetricIdentifier, NumberLiteral, OffsetExpr, SubqueryExpr, VectorMatching,
//!     VectorSelector,
//! };
//!
//! let up = VectorSelector::new(MetricIdentifier::new("up"));
//! let five_minutes = Duration::from_millis(300_000);
//!
//! let offset = OffsetExpr::new(up.clone(), five_minutes);
//! let range = MatrixSelector::new(up.clone(), five_minutes);
//! let _ = OffsetExpr::new(range.clone(), five_minutes);
//!
//! let sub = SubqueryExpr::new(offset.clone(), five_minutes, None);
//! let _ = OffsetExpr::new(sub.clone(), five_minutes);
//!
//! let _ = BinaryExpr::new(NumberLiteral::new(2i64), up.clone(), Binary::Mul, VectorMatching::default());
//! let _ = BinaryExpr::new(range, up.clone(), Binary::Add, VectorMatching::default());
//! let _ = BinaryExpr::new(sub, up.clone(), Binary::Add, VectorMatching::default());
//!
//! let call = FunctionCall::new(FunctionIdentifier::Time, vec![]);
//! let binary = BinaryExpr::new(call, up, Binary::Gtr, VectorMatching::with_return_bool(true));
//! let _ = SubqueryExpr::new(binary, five_minutes, Some(Duration::from_millis(60_000)));
//! ```
//!
//! A number literal cannot be offset:
//!
//! ```compile_fail
//! use promql_ast::{Duration, NumberLiteral, OffsetExpr};
//!
//! let _ = OffsetExpr::new(NumberLiteral::new(1i64), Duration::from_millis(60_000));
//! ```
//!
//! Nor can an expression that is already offset:
//!
//! ```compile_fail
//! use promql_ast::{Duration, MetricIdentifier, OffsetExpr, VectorSelector};
//!
//! let d = Duration::from_millis(60_000);
//! let inner = OffsetExpr::new(VectorSelector::new(MetricIdentifier::new("x")), d);
//! let _ = OffsetExpr::new(inner, d);
//! ```
//!
//! An untyped `Expr` cannot be offset either; it has to be converted first:
//!
//! ```compile_fail
//! use promql_ast::{Duration, Expr, MetricIdentifier, OffsetExpr, VectorSelector};
//!
//! let expr = Expr::from(VectorSelector::new(MetricIdentifier::new("up")));
//! let _ = OffsetExpr::new(expr, Duration::from_millis(60_000));
//! ```
//!
//! A binary expression is not a left-hand operand:
//!
//! ```compile_fail
//! use promql_ast::{Binary, BinaryExpr, MetricIdentifier, VectorMatching, VectorSelector};
//!
//! let a = VectorSelector::new(MetricIdentifier::new("a"));
//! let inner = BinaryExpr::new(a.clone(), a.clone(), Binary::Add, VectorMatching::default());
//! let _ = BinaryExpr::new(inner, a, Binary::Add, VectorMatching::default());
//! ```
//!
//! Neither is a string literal:
//!
//! ```compile_fail
//! use promql_ast::{Binary, BinaryExpr, MetricIdentifier, Quote, StringLiteral, VectorMatching, VectorSelector};
//!
//! let a = VectorSelector::new(MetricIdentifier::new("a"));
//! let _ = BinaryExpr::new(StringLiteral::new(Quote::Double, "x"), a, Binary::Add, VectorMatching::default());
//! ```
//!
//! A range selector is not a subquery body:
//!
//! ```compile_fail
//! use promql_ast::{Duration, MatrixSelector, MetricIdentifier, SubqueryExpr, VectorSelector};
//!
//! let d = Duration::from_millis(60_000);
//! let range = MatrixSelector::new(VectorSelector::new(MetricIdentifier::new("up")), d);
//! let _ = SubqueryExpr::new(range, d, None);
//! ```
//!
//! Nor is a number literal:
//!
//! ```compile_fail
//! use promql_ast::{Duration, NumberLiteral, SubqueryExpr};
//!
//! let d = Duration::from_millis(60_000);
//! let _ = SubqueryExpr::new(NumberLiteral::new(1i64), d, None);
//! ```
//!
//! Nor is a nested subquery:
//!
//! ```compile_fail
//! use promql_ast::{Duration, MetricIdentifier, SubqueryExpr, VectorSelector};
//!
//! let d = Duration::from_millis(60_000);
//! let inner = SubqueryExpr::new(VectorSelector::new(MetricIdentifier::new("up")), d, None);
//! let _ = SubqueryExpr::new(inner, d, None);
//! ```
//!
//! The markers are sealed:
//!
//! ```compile_fail
//! struct Custom;
//!
//! impl promql_ast::position::Offsettable for Custom {}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::{
    AggregateExpr, BinaryExpr, Expr, ExprKind, FunctionCall, OffsetExpr, ParenExpression,
    SubqueryExpr, UnaryExpr,
};
use crate::error::{AstError, AstResult};
use crate::literal::NumberLiteral;
use crate::selector::{MatrixSelector, VectorSelector};

mod sealed {
    pub trait Sealed<P> {}
}

/// May be the operand of an `offset <duration>` clause.
pub trait Offsettable: Into<OffsettableExpr> + sealed::Sealed<OffsettableExpr> {}

/// May be the left-hand side of a binary operation.
pub trait BinaryOperand: Into<BinaryOperandExpr> + sealed::Sealed<BinaryOperandExpr> {}

/// May be the inner expression of a subquery.
pub trait SubqueryBody: Into<SubqueryBodyExpr> + sealed::Sealed<SubqueryBodyExpr> {}

/// A restricted grammar position, reported when a conversion is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    OffsetTarget,
    BinaryLhs,
    SubqueryBody,
}

impl Position {
    /// Whether an expression of this kind is allowed here.
    pub fn admits(self, kind: ExprKind) -> bool {
        match self {
            Position::OffsetTarget => kind.is_offsettable(),
            Position::BinaryLhs => kind.is_binary_operand(),
            Position::SubqueryBody => kind.is_subquery_body(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::OffsetTarget => f.write_str("an offset target"),
            Position::BinaryLhs => f.write_str("the left-hand side of a binary operation"),
            Position::SubqueryBody => f.write_str("a subquery body"),
        }
    }
}

fn reject(expr: Expr, position: Position) -> AstError {
    let kind = expr.kind();
    tracing::debug!(%kind, %position, "expression rejected");
    AstError::InvalidPosition {
        kind,
        position,
        expr: Box::new(expr),
    }
}

/// Operand of [`OffsetExpr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffsettableExpr {
    VectorSelector(VectorSelector),
    MatrixSelector(MatrixSelector),
    Subquery(SubqueryExpr),
}

/// Left-hand side of [`BinaryExpr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperandExpr {
    NumberLiteral(NumberLiteral),
    VectorSelector(VectorSelector),
    MatrixSelector(MatrixSelector),
    Offset(OffsetExpr),
    Subquery(SubqueryExpr),
    Unary(UnaryExpr),
    Paren(ParenExpression),
    FunctionCall(FunctionCall),
    Aggregate(AggregateExpr),
}

/// Inner expression of [`SubqueryExpr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubqueryBodyExpr {
    VectorSelector(VectorSelector),
    Offset(OffsetExpr),
    Unary(UnaryExpr),
    Paren(ParenExpression),
    FunctionCall(FunctionCall),
    Aggregate(AggregateExpr),
    Binary(BinaryExpr),
}

// Variant names match the corresponding `Expr` variants.
macro_rules! restricted_position {
    ($position:ident, $marker:ident, $slot:expr, [$($variant:ident($node:ty)),+ $(,)?]) => {
        $(
            impl From<$node> for $position {
                fn from(node: $node) -> Self {
                    $position::$variant(node)
                }
            }

            impl sealed::Sealed<$position> for $node {}
            impl $marker for $node {}
        )+

        impl sealed::Sealed<$position> for $position {}
        impl $marker for $position {}

        impl $position {
            pub fn kind(&self) -> ExprKind {
                match self {
                    $($position::$variant(_) => ExprKind::$variant,)+
                }
            }
        }

        impl From<$position> for Expr {
            fn from(node: $position) -> Self {
                match node {
                    $($position::$variant(inner) => Expr::$variant(inner),)+
                }
            }
        }

        impl TryFrom<Expr> for $position {
            type Error = AstError;

            fn try_from(expr: Expr) -> AstResult<Self> {
                match expr {
                    $(Expr::$variant(inner) => Ok($position::$variant(inner)),)+
                    other => Err(reject(other, $slot)),
                }
            }
        }
    };
}

restricted_position!(OffsettableExpr, Offsettable, Position::OffsetTarget, [
    VectorSelector(VectorSelector),
    MatrixSelector(MatrixSelector),
    Subquery(SubqueryExpr),
]);

restricted_position!(BinaryOperandExpr, BinaryOperand, Position::BinaryLhs, [
    NumberLiteral(NumberLiteral),
    VectorSelector(VectorSelector),
    MatrixSelector(MatrixSelector),
    Offset(OffsetExpr),
    Subquery(SubqueryExpr),
    Unary(UnaryExpr),
    Paren(ParenExpression),
    FunctionCall(FunctionCall),
    Aggregate(AggregateExpr),
]);

restricted_position!(SubqueryBodyExpr, SubqueryBody, Position::SubqueryBody, [
    VectorSelector(VectorSelector),
    Offset(OffsetExpr),
    Unary(UnaryExpr),
    Paren(ParenExpression),
    FunctionCall(FunctionCall),
    Aggregate(AggregateExpr),
    Binary(BinaryExpr),
]);
