use miette::Diagnostic;
use thiserror::Error;

/// Failures of the mapping pipeline itself.
///
/// A bound that a target logic cannot express is not one of these: it is
/// reported on the returned [`crate::Mapping`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MappingError {
    #[error("{logic} has no symbol for '{symbol}'")]
    #[diagnostic(
        code(psp::mapping::missing_symbol),
        help("the reduction used an operator the target symbol table leaves undefined")
    )]
    MissingSymbol { logic: String, symbol: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Postprocess(#[from] PostprocessError),

    #[error("Unsupported target logic '{0}'")]
    #[diagnostic(
        code(psp::mapping::unsupported_target),
        help("run `psp targets` to list the available target logics")
    )]
    UnsupportedTarget(String),
}

impl MappingError {
    /// Whether this error signals an unknown target tag.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, MappingError::UnsupportedTarget(_))
    }
}

/// A token sequence did not have the shape a postprocessor recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum PostprocessError {
    #[error("{postprocessor}: unrecognized operand at token {position}: {found}")]
    #[diagnostic(code(psp::postprocess::operand))]
    UnrecognizedOperand {
        postprocessor: &'static str,
        position: usize,
        found: String,
    },

    #[error("{postprocessor}: unbalanced brackets at token {position}")]
    #[diagnostic(code(psp::postprocess::brackets))]
    UnbalancedBrackets {
        postprocessor: &'static str,
        position: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_symbol() {
        let err = MappingError::MissingSymbol {
            logic: "LTL".into(),
            symbol: "infinity".into(),
        };
        assert_eq!(err.to_string(), "LTL has no symbol for 'infinity'");
    }

    #[test]
    fn postprocess_error_is_transparent() {
        let err: MappingError = PostprocessError::UnbalancedBrackets {
            postprocessor: "WeakUntilSubstituter",
            position: 3,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "WeakUntilSubstituter: unbalanced brackets at token 3"
        );
        assert!(!err.is_unsupported_type());
        assert!(MappingError::UnsupportedTarget("CTL".into()).is_unsupported_type());
    }
}
