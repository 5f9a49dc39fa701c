//! Typed abstract syntax tree for PromQL.
//!
//! Nodes are immutable values built bottom-up by a parser and read by
//! evaluators, printers and analyzers. Grammar restrictions on where an
//! expression may appear are carried by the types (see [`position`]), so a
//! tree that breaks them cannot be constructed.
//!
//! ```
//! use promql_ast::{
//!     Duration, Expr, FunctionCall, FunctionIdentifier, LabelMatcher, LabelMatchers, Match,
//!     MatrixSelector, MetricIdentifier, OffsetExpr, Quote, StringLiteral, VectorSelector,
//! };
//!
//! // rate(http_requests_total{job="api"}[5m] offset 1m)
//! let selector = VectorSelector::with_label_matchers(
//!     MetricIdentifier::new("http_requests_total"),
//!     LabelMatchers::new(vec![LabelMatcher::new(
//!         "job",
//!         Match::Equal,
//!         StringLiteral::new(Quote::Double, "api"),
//!     )]),
//! );
//! let range = MatrixSelector::new(selector, Duration::from_millis(5 * 60_000));
//! let offset = OffsetExpr::new(range, Duration::from_millis(60_000));
//! let expr: Expr = FunctionCall::new(FunctionIdentifier::Rate, vec![offset.into()]).into();
//!
//! assert_eq!(expr.kind().to_string(), "function_call");
//! ```

pub mod ast;
pub mod error;
pub mod functions;
pub mod label;
pub mod literal;
pub mod matching;
pub mod operators;
pub mod position;
pub mod selector;

pub use ast::{
    AggregateExpr, BinaryExpr, Expr, ExprKind, FunctionCall, OffsetExpr, ParenExpression,
    SubqueryExpr, UnaryExpr,
};
pub use error::{AstError, AstResult};
pub use functions::FunctionIdentifier;
pub use label::{LabelMatcher, LabelMatchers};
pub use literal::{Duration, MetricIdentifier, NumberLiteral, Quote, StringLiteral};
pub use matching::{VectorMatchCardinality, VectorMatching};
pub use operators::{Aggregate, Binary, Match, Unary};
pub use position::{
    BinaryOperand, BinaryOperandExpr, Offsettable, OffsettableExpr, Position, SubqueryBody,
    SubqueryBodyExpr,
};
pub use selector::{MatrixSelector, VectorSelector};
