use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while constructing domain values.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ModelError {
    #[error("Unsupported {kind} type '{tag}'")]
    #[diagnostic(
        code(psp::model::unsupported_type),
        help("check the type tag against the pattern catalogue")
    )]
    UnsupportedType { kind: String, tag: String },

    #[error("Scope '{scope}' takes {expected} anchor event(s), found {found}")]
    #[diagnostic(code(psp::model::scope_arity))]
    ScopeArity {
        scope: String,
        expected: usize,
        found: usize,
    },

    #[error("Probability {0} is outside [0, 1]")]
    #[diagnostic(code(psp::model::probability))]
    InvalidProbability(f64),

    #[error("Chain patterns need at least one chain event")]
    #[diagnostic(code(psp::model::empty_chain))]
    EmptyChain,

    #[error("Bounded existence frequency must be at least 1")]
    #[diagnostic(code(psp::model::frequency))]
    InvalidFrequency,

    #[error("Pattern '{pattern}' expects {expected}")]
    #[diagnostic(code(psp::model::pattern_shape))]
    PatternShape { pattern: String, expected: String },
}

impl ModelError {
    pub fn unsupported(kind: impl Into<String>, tag: impl Into<String>) -> Self {
        ModelError::UnsupportedType {
            kind: kind.into(),
            tag: tag.into(),
        }
    }

    /// Whether this error signals an unknown type tag rather than a malformed value.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, ModelError::UnsupportedType { .. })
    }
}
