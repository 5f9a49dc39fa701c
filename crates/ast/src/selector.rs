//! Instant and range vector selectors.

use serde::{Deserialize, Serialize};

use crate::error::{AstError, AstResult};
use crate::label::LabelMatchers;
use crate::literal::{Duration, MetricIdentifier};

/// Selects a set of series by metric name, label matchers, or both.
///
/// A selector always carries at least one of the two parts: the
/// constructors cannot produce an empty one and deserialization goes
/// through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SelectorParts", into = "SelectorParts")]
pub struct VectorSelector {
    metric_identifier: Option<MetricIdentifier>,
    label_matchers: Option<LabelMatchers>,
}

impl VectorSelector {
    /// `metric`
    pub fn new(metric_identifier: MetricIdentifier) -> Self {
        Self {
            metric_identifier: Some(metric_identifier),
            label_matchers: None,
        }
    }

    /// `{label="value", ...}`
    pub fn from_label_matchers(label_matchers: LabelMatchers) -> Self {
        Self {
            metric_identifier: None,
            label_matchers: Some(label_matchers),
        }
    }

    /// `metric{label="value", ...}`
    pub fn with_label_matchers(
        metric_identifier: MetricIdentifier,
        label_matchers: LabelMatchers,
    ) -> Self {
        Self {
            metric_identifier: Some(metric_identifier),
            label_matchers: Some(label_matchers),
        }
    }

    /// Assemble a selector from optional parts, rejecting the case where
    /// both are absent.
    pub fn try_from_parts(
        metric_identifier: Option<MetricIdentifier>,
        label_matchers: Option<LabelMatchers>,
    ) -> AstResult<Self> {
        if metric_identifier.is_none() && label_matchers.is_none() {
            tracing::debug!("vector selector without metric or label matchers");
            return Err(AstError::EmptySelector);
        }
        Ok(Self {
            metric_identifier,
            label_matchers,
        })
    }

    pub fn metric_identifier(&self) -> Option<&MetricIdentifier> {
        self.metric_identifier.as_ref()
    }

    pub fn label_matchers(&self) -> Option<&LabelMatchers> {
        self.label_matchers.as_ref()
    }

    pub fn into_parts(self) -> (Option<MetricIdentifier>, Option<LabelMatchers>) {
        (self.metric_identifier, self.label_matchers)
    }
}

#[derive(Serialize, Deserialize)]
struct SelectorParts {
    metric_identifier: Option<MetricIdentifier>,
    label_matchers: Option<LabelMatchers>,
}

impl TryFrom<SelectorParts> for VectorSelector {
    type Error = AstError;

    fn try_from(parts: SelectorParts) -> AstResult<Self> {
        Self::try_from_parts(parts.metric_identifier, parts.label_matchers)
    }
}

impl From<VectorSelector> for SelectorParts {
    fn from(selector: VectorSelector) -> Self {
        Self {
            metric_identifier: selector.metric_identifier,
            label_matchers: selector.label_matchers,
        }
    }
}

/// A vector selector with a lookback range, e.g. `metric[5m]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatrixSelector {
    pub vector: VectorSelector,
    pub duration: Duration,
}

impl MatrixSelector {
    pub fn new(vector: VectorSelector, duration: Duration) -> Self {
        Self { vector, duration }
    }
}
