use std::fmt;

use serde::{Deserialize, Serialize};

use crate::functions::FunctionIdentifier;
use crate::literal::{Duration, NumberLiteral, StringLiteral};
use crate::matching::VectorMatching;
use crate::operators::{Aggregate, Binary, Unary};
use crate::position::{
    BinaryOperand, BinaryOperandExpr, Offsettable, OffsettableExpr, SubqueryBody,
    SubqueryBodyExpr,
};
use crate::selector::{MatrixSelector, VectorSelector};

/// PromQL Abstract Syntax Tree.
///
/// Root of every node denoting a computable value. Positions with grammar
/// restrictions hold one of the narrower types in [`crate::position`]
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    // Literals
    NumberLiteral(NumberLiteral),
    StringLiteral(StringLiteral),

    // Selectors
    VectorSelector(VectorSelector),
    MatrixSelector(MatrixSelector),

    // Modifiers
    Offset(OffsetExpr),
    Subquery(SubqueryExpr),

    // Operations
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Paren(ParenExpression),
    FunctionCall(FunctionCall),
    Aggregate(AggregateExpr),
}

impl Expr {
    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::NumberLiteral(_) => ExprKind::NumberLiteral,
            Expr::StringLiteral(_) => ExprKind::StringLiteral,
            Expr::VectorSelector(_) => ExprKind::VectorSelector,
            Expr::MatrixSelector(_) => ExprKind::MatrixSelector,
            Expr::Offset(_) => ExprKind::Offset,
            Expr::Subquery(_) => ExprKind::Subquery,
            Expr::Unary(_) => ExprKind::Unary,
            Expr::Binary(_) => ExprKind::Binary,
            Expr::Paren(_) => ExprKind::Paren,
            Expr::FunctionCall(_) => ExprKind::FunctionCall,
            Expr::Aggregate(_) => ExprKind::Aggregate,
        }
    }
}

/// Fieldless tag naming each [`Expr`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExprKind {
    NumberLiteral,
    StringLiteral,
    VectorSelector,
    MatrixSelector,
    Offset,
    Subquery,
    Unary,
    Binary,
    Paren,
    FunctionCall,
    Aggregate,
}

impl ExprKind {
    pub const ALL: &'static [ExprKind] = &[
        ExprKind::NumberLiteral,
        ExprKind::StringLiteral,
        ExprKind::VectorSelector,
        ExprKind::MatrixSelector,
        ExprKind::Offset,
        ExprKind::Subquery,
        ExprKind::Unary,
        ExprKind::Binary,
        ExprKind::Paren,
        ExprKind::FunctionCall,
        ExprKind::Aggregate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExprKind::NumberLiteral => "number_literal",
            ExprKind::StringLiteral => "string_literal",
            ExprKind::VectorSelector => "vector_selector",
            ExprKind::MatrixSelector => "matrix_selector",
            ExprKind::Offset => "offset",
            ExprKind::Subquery => "subquery",
            ExprKind::Unary => "unary",
            ExprKind::Binary => "binary",
            ExprKind::Paren => "paren",
            ExprKind::FunctionCall => "function_call",
            ExprKind::Aggregate => "aggregate",
        }
    }

    /// May be the operand of `offset <duration>`.
    pub fn is_offsettable(self) -> bool {
        matches!(
            self,
            ExprKind::VectorSelector | ExprKind::MatrixSelector | ExprKind::Subquery
        )
    }

    /// May be the left-hand side of a binary operation.
    pub fn is_binary_operand(self) -> bool {
        !matches!(self, ExprKind::StringLiteral | ExprKind::Binary)
    }

    /// May be the inner expression of a subquery.
    pub fn is_subquery_body(self) -> bool {
        matches!(
            self,
            ExprKind::VectorSelector
                | ExprKind::Offset
                | ExprKind::Unary
                | ExprKind::Binary
                | ExprKind::Paren
                | ExprKind::FunctionCall
                | ExprKind::Aggregate
        )
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An aggregation over a vector, e.g. `sum by (job) (rate(x[5m]))`.
///
/// An empty `grouping_labels` list is kept as written for both values of
/// `without`; the two states come from different surface syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateExpr {
    pub operator: Aggregate,
    /// The vector expression being aggregated.
    pub expr: Box<Expr>,
    /// Parameter of `topk`, `bottomk`, `quantile` and `count_values`.
    pub param: Option<Box<Expr>>,
    pub grouping_labels: Vec<String>,
    /// Drop the grouping labels rather than keep them.
    pub without: bool,
}

impl AggregateExpr {
    pub fn new(
        operator: Aggregate,
        expr: impl Into<Expr>,
        param: Option<Expr>,
        grouping_labels: Vec<String>,
        without: bool,
    ) -> Self {
        Self {
            operator,
            expr: Box::new(expr.into()),
            param: param.map(Box::new),
            grouping_labels,
            without,
        }
    }
}

/// A binary operation. The left-hand side is restricted to
/// [`BinaryOperand`] nodes, the right-hand side accepts any expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left_hand_side: Box<BinaryOperandExpr>,
    pub right_hand_side: Box<Expr>,
    pub operator: Binary,
    /// Applies when both operands evaluate to vectors.
    pub vector_matching: VectorMatching,
}

impl BinaryExpr {
    pub fn new(
        left_hand_side: impl BinaryOperand,
        right_hand_side: impl Into<Expr>,
        operator: Binary,
        vector_matching: VectorMatching,
    ) -> Self {
        Self {
            left_hand_side: Box::new(left_hand_side.into()),
            right_hand_side: Box::new(right_hand_side.into()),
            operator,
            vector_matching,
        }
    }
}

/// A call to one of the built-in functions. Argument count and types are
/// not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionCall {
    pub identifier: FunctionIdentifier,
    pub args: Vec<Expr>,
}

impl FunctionCall {
    pub fn new(identifier: FunctionIdentifier, args: Vec<Expr>) -> Self {
        Self { identifier, args }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParenExpression {
    pub expr: Box<Expr>,
}

impl ParenExpression {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: Box::new(expr.into()),
        }
    }
}

/// `<expr> offset <duration>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffsetExpr {
    pub expr: Box<OffsettableExpr>,
    pub duration: Duration,
}

impl OffsetExpr {
    pub fn new(expr: impl Offsettable, duration: Duration) -> Self {
        Self {
            expr: Box::new(expr.into()),
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub operator: Unary,
    pub expr: Box<Expr>,
}

impl UnaryExpr {
    pub fn new(operator: Unary, expr: impl Into<Expr>) -> Self {
        Self {
            operator,
            expr: Box::new(expr.into()),
        }
    }
}

/// `<expr>[<range>:<step>]`, the step being optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubqueryExpr {
    pub expr: Box<SubqueryBodyExpr>,
    pub range: Duration,
    pub step: Option<Duration>,
}

impl SubqueryExpr {
    pub fn new(expr: impl SubqueryBody, range: Duration, step: Option<Duration>) -> Self {
        Self {
            expr: Box::new(expr.into()),
            range,
            step,
        }
    }
}

impl From<NumberLiteral> for Expr {
    fn from(node: NumberLiteral) -> Self {
        Expr::NumberLiteral(node)
    }
}

impl From<StringLiteral> for Expr {
    fn from(node: StringLiteral) -> Self {
        Expr::StringLiteral(node)
    }
}

impl From<VectorSelector> for Expr {
    fn from(node: VectorSelector) -> Self {
        Expr::VectorSelector(node)
    }
}

impl From<MatrixSelector> for Expr {
    fn from(node: MatrixSelector) -> Self {
        Expr::MatrixSelector(node)
    }
}

impl From<OffsetExpr> for Expr {
    fn from(node: OffsetExpr) -> Self {
        Expr::Offset(node)
    }
}

impl From<SubqueryExpr> for Expr {
    fn from(node: SubqueryExpr) -> Self {
        Expr::Subquery(node)
    }
}

impl From<UnaryExpr> for Expr {
    fn from(node: UnaryExpr) -> Self {
        Expr::Unary(node)
    }
}

impl From<BinaryExpr> for Expr {
    fn from(node: BinaryExpr) -> Self {
        Expr::Binary(node)
    }
}

impl From<ParenExpression> for Expr {
    fn from(node: ParenExpression) -> Self {
        Expr::Paren(node)
    }
}

impl From<FunctionCall> for Expr {
    fn from(node: FunctionCall) -> Self {
        Expr::FunctionCall(node)
    }
}

impl From<AggregateExpr> for Expr {
    fn from(node: AggregateExpr) -> Self {
        Expr::Aggregate(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{LabelMatcher, LabelMatchers};
    use crate::literal::{MetricIdentifier, Quote};
    use crate::matching::VectorMatchCardinality;
    use crate::operators::Match;

    fn metric(name: &str) -> VectorSelector {
        VectorSelector::new(MetricIdentifier::new(name))
    }

    fn minutes(n: i64) -> Duration {
        Duration::from_millis(n * 60_000)
    }

    /// rate(http_requests_total{job="api"}[5m] offset 1m)
    fn rate_query() -> Expr {
        let selector = VectorSelector::with_label_matchers(
            MetricIdentifier::new("http_requests_total"),
            LabelMatchers::new(vec![LabelMatcher::new(
                "job",
                Match::Equal,
                StringLiteral::new(Quote::Double, "api"),
            )]),
        );
        let range = MatrixSelector::new(selector, minutes(5));
        FunctionCall::new(
            FunctionIdentifier::Rate,
            vec![OffsetExpr::new(range, minutes(1)).into()],
        )
        .into()
    }

    #[test]
    fn rate_query_reads_back_its_inputs() {
        let Expr::FunctionCall(call) = rate_query() else {
            panic!("expected FunctionCall");
        };
        assert_eq!(call.identifier, FunctionIdentifier::Rate);
        assert_eq!(call.args.len(), 1);

        let Expr::Offset(offset) = &call.args[0] else {
            panic!("expected Offset, got {:?}", call.args[0]);
        };
        assert_eq!(offset.duration, minutes(1));

        let OffsettableExpr::MatrixSelector(range) = offset.expr.as_ref() else {
            panic!("expected MatrixSelector");
        };
        assert_eq!(range.duration, minutes(5));
        assert_eq!(
            range.vector.metric_identifier().unwrap().value,
            "http_requests_total"
        );

        let matchers = range.vector.label_matchers().unwrap();
        assert_eq!(matchers.len(), 1);
        let job = &matchers.matchers[0];
        assert_eq!(job.label_name, "job");
        assert_eq!(job.operator, Match::Equal);
        assert_eq!(job.value.quote.as_char(), '"');
        assert_eq!(job.value.value, "api");
    }

    #[test]
    fn structural_equality() {
        assert_eq!(rate_query(), rate_query());

        let Expr::FunctionCall(mut call) = rate_query() else {
            panic!("expected FunctionCall");
        };
        call.identifier = FunctionIdentifier::Irate;
        assert_ne!(Expr::FunctionCall(call), rate_query());
    }

    #[test]
    fn binary_with_group_left() {
        // a + on(job) group_left(env) b
        let matching = VectorMatching::new(
            VectorMatchCardinality::ManyToOne,
            vec!["job".into()],
            true,
            vec!["env".into()],
            false,
        );
        let expr = BinaryExpr::new(metric("a"), metric("b"), Binary::Add, matching.clone());

        assert_eq!(
            *expr.left_hand_side,
            BinaryOperandExpr::VectorSelector(metric("a"))
        );
        assert_eq!(*expr.right_hand_side, Expr::VectorSelector(metric("b")));
        assert_eq!(expr.operator, Binary::Add);
        assert_eq!(expr.vector_matching, matching);
        assert_eq!(expr.vector_matching.matching_labels, vec!["job"]);
        assert_eq!(expr.vector_matching.include, vec!["env"]);
        assert!(expr.vector_matching.on);
    }

    #[test]
    fn binary_rhs_accepts_any_expr() {
        // 1 + (a - b), right side is itself a binary expression
        let inner = BinaryExpr::new(
            metric("a"),
            metric("b"),
            Binary::Sub,
            VectorMatching::default(),
        );
        let outer = BinaryExpr::new(
            NumberLiteral::new(1i64),
            inner.clone(),
            Binary::Add,
            VectorMatching::default(),
        );
        assert_eq!(outer.right_hand_side.kind(), ExprKind::Binary);

        let chained = BinaryExpr::new(
            ParenExpression::new(inner),
            StringLiteral::new(Quote::Single, "x"),
            Binary::Eql,
            VectorMatching::with_return_bool(true),
        );
        assert_eq!(chained.left_hand_side.kind(), ExprKind::Paren);
    }

    #[test]
    fn aggregate_grouping_states_are_distinct() {
        let by_nothing = AggregateExpr::new(Aggregate::Sum, metric("x"), None, vec![], false);
        let without_nothing = AggregateExpr::new(Aggregate::Sum, metric("x"), None, vec![], true);
        assert_ne!(by_nothing, without_nothing);

        let topk = AggregateExpr::new(
            Aggregate::Topk,
            metric("x"),
            Some(NumberLiteral::new(5i64).into()),
            vec!["job".into(), "env".into()],
            false,
        );
        assert_eq!(topk.grouping_labels, vec!["job", "env"]);
        assert_eq!(
            topk.param.as_deref(),
            Some(&Expr::NumberLiteral(NumberLiteral::new(5i64)))
        );
    }

    #[test]
    fn subquery_with_and_without_step() {
        let call = FunctionCall::new(FunctionIdentifier::Rate, vec![]);
        let stepped = SubqueryExpr::new(call.clone(), minutes(30), Some(minutes(1)));
        let default_step = SubqueryExpr::new(call, minutes(30), None);
        assert_ne!(stepped, default_step);
        assert_eq!(stepped.expr.kind(), ExprKind::FunctionCall);
        assert!(default_step.step.is_none());

        // max_over_time(rate(x[5m])[30m:1m] offset 1h)
        let offset = OffsetExpr::new(stepped, minutes(60));
        assert_eq!(offset.expr.kind(), ExprKind::Subquery);
    }

    #[test]
    fn unary_wraps_any_expr() {
        let neg = UnaryExpr::new(Unary::Sub, NumberLiteral::new(3i64));
        assert_eq!(neg.operator, Unary::Sub);
        assert_eq!(neg.expr.kind(), ExprKind::NumberLiteral);
        assert_ne!(neg, UnaryExpr::new(Unary::Add, NumberLiteral::new(3i64)));
    }

    #[test]
    fn kind_table_matches_position_types() {
        let offsettable: Vec<_> = ExprKind::ALL.iter().filter(|k| k.is_offsettable()).collect();
        let binary: Vec<_> = ExprKind::ALL.iter().filter(|k| k.is_binary_operand()).collect();
        let subquery: Vec<_> = ExprKind::ALL.iter().filter(|k| k.is_subquery_body()).collect();
        assert_eq!(offsettable.len(), 3);
        assert_eq!(binary.len(), 9);
        assert_eq!(subquery.len(), 7);
        assert!(!ExprKind::NumberLiteral.is_offsettable());
        assert!(!ExprKind::NumberLiteral.is_subquery_body());
        assert!(ExprKind::NumberLiteral.is_binary_operand());
        assert_eq!(ExprKind::FunctionCall.to_string(), "function_call");
    }

    #[test]
    fn nodes_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Expr>();
        assert_send_sync::<OffsettableExpr>();
        assert_send_sync::<BinaryOperandExpr>();
        assert_send_sync::<SubqueryBodyExpr>();

        let shared = std::sync::Arc::new(rate_query());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let expr = std::sync::Arc::clone(&shared);
                std::thread::spawn(move || expr.kind())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), ExprKind::FunctionCall);
        }
    }

    #[test]
    fn serde_preserves_structure() {
        let expr = rate_query();
        let json = serde_json::to_value(&expr).unwrap();
        let back: Expr = serde_json::from_value(json).unwrap();
        assert_eq!(back, expr);
    }
}
