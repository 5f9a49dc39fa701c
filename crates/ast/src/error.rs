use crate::ast::{Expr, ExprKind};
use crate::position::Position;

/// Errors raised when assembling AST nodes from untyped parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    #[error("vector selector needs a metric name, label matchers, or both")]
    EmptySelector,

    #[error("{kind} expression cannot be used as {position}")]
    InvalidPosition {
        kind: ExprKind,
        position: Position,
        /// The rejected expression, handed back to the caller.
        expr: Box<Expr>,
    },

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("unknown {vocabulary} operator: {token}")]
    UnknownOperator {
        vocabulary: &'static str,
        token: String,
    },

    #[error("invalid string quote character '{0}'")]
    InvalidQuote(char),
}

impl AstError {
    /// Recover the expression carried by an `InvalidPosition` error.
    pub fn into_rejected(self) -> Option<Expr> {
        match self {
            AstError::InvalidPosition { expr, .. } => Some(*expr),
            _ => None,
        }
    }
}

/// Convenience alias for fallible AST construction.
pub type AstResult<T> = Result<T, AstError>;
