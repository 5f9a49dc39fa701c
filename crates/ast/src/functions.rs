//! Built-in PromQL functions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AstError, AstResult};

/// Functions available in PromQL.
///
/// This is a closed set: calls to anything else are rejected before a
/// `FunctionCall` node can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionIdentifier {
    AbsentOverTime,
    Absent,
    Abs,
    Acos,
    Acosh,
    Asin,
    Asinh,
    Atan,
    Atanh,
    AvgOverTime,
    Ceil,
    Changes,
    Clamp,
    ClampMax,
    ClampMin,
    Cos,
    Cosh,
    CountOverTime,
    DaysInMonth,
    DayOfMonth,
    DayOfWeek,
    Deg,
    Delta,
    Deriv,
    Exp,
    Floor,
    HistogramQuantile,
    HoltWinters,
    Hour,
    Idelta,
    Increase,
    Irate,
    LabelReplace,
    LabelJoin,
    LastOverTime,
    Ln,
    Log10,
    Log2,
    MaxOverTime,
    MinOverTime,
    Minute,
    Month,
    Pi,
    PredictLinear,
    PresentOverTime,
    QuantileOverTime,
    Rad,
    Rate,
    Resets,
    Round,
    Scalar,
    Sgn,
    Sin,
    Sinh,
    Sort,
    SortDesc,
    Sqrt,
    StddevOverTime,
    StdvarOverTime,
    SumOverTime,
    Tan,
    Tanh,
    Timestamp,
    Time,
    Vector,
    Year,
}

impl FunctionIdentifier {
    pub const ALL: &'static [FunctionIdentifier] = &[
        FunctionIdentifier::AbsentOverTime,
        FunctionIdentifier::Absent,
        FunctionIdentifier::Abs,
        FunctionIdentifier::Acos,
        FunctionIdentifier::Acosh,
        FunctionIdentifier::Asin,
        FunctionIdentifier::Asinh,
        FunctionIdentifier::Atan,
        FunctionIdentifier::Atanh,
        FunctionIdentifier::AvgOverTime,
        FunctionIdentifier::Ceil,
        FunctionIdentifier::Changes,
        FunctionIdentifier::Clamp,
        FunctionIdentifier::ClampMax,
        FunctionIdentifier::ClampMin,
        FunctionIdentifier::Cos,
        FunctionIdentifier::Cosh,
        FunctionIdentifier::CountOverTime,
        FunctionIdentifier::DaysInMonth,
        FunctionIdentifier::DayOfMonth,
        FunctionIdentifier::DayOfWeek,
        FunctionIdentifier::Deg,
        FunctionIdentifier::Delta,
        FunctionIdentifier::Deriv,
        FunctionIdentifier::Exp,
        FunctionIdentifier::Floor,
        FunctionIdentifier::HistogramQuantile,
        FunctionIdentifier::HoltWinters,
        FunctionIdentifier::Hour,
        FunctionIdentifier::Idelta,
        FunctionIdentifier::Increase,
        FunctionIdentifier::Irate,
        FunctionIdentifier::LabelReplace,
        FunctionIdentifier::LabelJoin,
        FunctionIdentifier::LastOverTime,
        FunctionIdentifier::Ln,
        FunctionIdentifier::Log10,
        FunctionIdentifier::Log2,
        FunctionIdentifier::MaxOverTime,
        FunctionIdentifier::MinOverTime,
        FunctionIdentifier::Minute,
        FunctionIdentifier::Month,
        FunctionIdentifier::Pi,
        FunctionIdentifier::PredictLinear,
        FunctionIdentifier::PresentOverTime,
        FunctionIdentifier::QuantileOverTime,
        FunctionIdentifier::Rad,
        FunctionIdentifier::Rate,
        FunctionIdentifier::Resets,
        FunctionIdentifier::Round,
        FunctionIdentifier::Scalar,
        FunctionIdentifier::Sgn,
        FunctionIdentifier::Sin,
        FunctionIdentifier::Sinh,
        FunctionIdentifier::Sort,
        FunctionIdentifier::SortDesc,
        FunctionIdentifier::Sqrt,
        FunctionIdentifier::StddevOverTime,
        FunctionIdentifier::StdvarOverTime,
        FunctionIdentifier::SumOverTime,
        FunctionIdentifier::Tan,
        FunctionIdentifier::Tanh,
        FunctionIdentifier::Timestamp,
        FunctionIdentifier::Time,
        FunctionIdentifier::Vector,
        FunctionIdentifier::Year,
    ];

    /// The name used to call the function in a query.
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionIdentifier::AbsentOverTime => "absent_over_time",
            FunctionIdentifier::Absent => "absent",
            FunctionIdentifier::Abs => "abs",
            FunctionIdentifier::Acos => "acos",
            FunctionIdentifier::Acosh => "acosh",
            FunctionIdentifier::Asin => "asin",
            FunctionIdentifier::Asinh => "asinh",
            FunctionIdentifier::Atan => "atan",
            FunctionIdentifier::Atanh => "atanh",
            FunctionIdentifier::AvgOverTime => "avg_over_time",
            FunctionIdentifier::Ceil => "ceil",
            FunctionIdentifier::Changes => "changes",
            FunctionIdentifier::Clamp => "clamp",
            FunctionIdentifier::ClampMax => "clamp_max",
            FunctionIdentifier::ClampMin => "clamp_min",
            FunctionIdentifier::Cos => "cos",
            FunctionIdentifier::Cosh => "cosh",
            FunctionIdentifier::CountOverTime => "count_over_time",
            FunctionIdentifier::DaysInMonth => "days_in_month",
            FunctionIdentifier::DayOfMonth => "day_of_month",
            FunctionIdentifier::DayOfWeek => "day_of_week",
            FunctionIdentifier::Deg => "deg",
            FunctionIdentifier::Delta => "delta",
            FunctionIdentifier::Deriv => "deriv",
            FunctionIdentifier::Exp => "exp",
            FunctionIdentifier::Floor => "floor",
            FunctionIdentifier::HistogramQuantile => "histogram_quantile",
            FunctionIdentifier::HoltWinters => "holt_winters",
            FunctionIdentifier::Hour => "hour",
            FunctionIdentifier::Idelta => "idelta",
            FunctionIdentifier::Increase => "increase",
            FunctionIdentifier::Irate => "irate",
            FunctionIdentifier::LabelReplace => "label_replace",
            FunctionIdentifier::LabelJoin => "label_join",
            FunctionIdentifier::LastOverTime => "last_over_time",
            FunctionIdentifier::Ln => "ln",
            FunctionIdentifier::Log10 => "log10",
            FunctionIdentifier::Log2 => "log2",
            FunctionIdentifier::MaxOverTime => "max_over_time",
            FunctionIdentifier::MinOverTime => "min_over_time",
            FunctionIdentifier::Minute => "minute",
            FunctionIdentifier::Month => "month",
            FunctionIdentifier::Pi => "pi",
            FunctionIdentifier::PredictLinear => "predict_linear",
            FunctionIdentifier::PresentOverTime => "present_over_time",
            FunctionIdentifier::QuantileOverTime => "quantile_over_time",
            FunctionIdentifier::Rad => "rad",
            FunctionIdentifier::Rate => "rate",
            FunctionIdentifier::Resets => "resets",
            FunctionIdentifier::Round => "round",
            FunctionIdentifier::Scalar => "scalar",
            FunctionIdentifier::Sgn => "sgn",
            FunctionIdentifier::Sin => "sin",
            FunctionIdentifier::Sinh => "sinh",
            FunctionIdentifier::Sort => "sort",
            FunctionIdentifier::SortDesc => "sort_desc",
            FunctionIdentifier::Sqrt => "sqrt",
            FunctionIdentifier::StddevOverTime => "stddev_over_time",
            FunctionIdentifier::StdvarOverTime => "stdvar_over_time",
            FunctionIdentifier::SumOverTime => "sum_over_time",
            FunctionIdentifier::Tan => "tan",
            FunctionIdentifier::Tanh => "tanh",
            FunctionIdentifier::Timestamp => "timestamp",
            FunctionIdentifier::Time => "time",
            FunctionIdentifier::Vector => "vector",
            FunctionIdentifier::Year => "year",
        }
    }
}

impl fmt::Display for FunctionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionIdentifier {
    type Err = AstError;

    /// Function names are case-sensitive.
    fn from_str(name: &str) -> AstResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|func| func.as_str() == name)
            .ok_or_else(|| {
                tracing::debug!(name, "unknown function");
                AstError::UnknownFunction(name.to_string())
            })
    }
}
