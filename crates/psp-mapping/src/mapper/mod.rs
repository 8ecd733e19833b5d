//! Per-logic mappers.
//!
//! A mapper turns a (scope, pattern) pair into a token stream, runs its fixed
//! postprocessor list over it and linearizes the result. Mappers hold no
//! per-call state: whether a bound was inexpressible is part of the returned
//! [`Mapping`], so one instance can serve concurrent translations.

mod ltl;
mod mtl;
mod prism;
mod seg;
mod tbv;

pub use ltl::LtlMapper;
pub use mtl::MtlMapper;
pub use prism::PrismMapper;
pub use seg::SegMapper;
pub use tbv::TbvMapper;

use psp_model::{Pattern, PatternKind, Scope, ScopeKind};
use tracing::{debug, warn};

use crate::element::{error_messages, linearize, Element};
use crate::errors::MappingError;
use crate::postprocess::{self, Postprocessor};
use crate::reduction::{reduce, Timing};
use crate::render::Renderer;
use crate::symbols::{LanguageDefinitions, TimeLanguageDefinitions};

/// Result of one translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub formula: String,
    /// Why part of the property could not be expressed; the formula is then a
    /// best-effort rendering without it.
    pub error: Option<String>,
    pub supported: bool,
}

impl Mapping {
    fn unsupported() -> Self {
        Self {
            formula: String::new(),
            error: None,
            supported: false,
        }
    }

    pub fn has_mapping_error_occurred(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }
}

pub trait Mapper: Send + Sync {
    /// Display name used in messages, e.g. `Prism`.
    fn name(&self) -> &'static str;

    fn postprocessors(&self) -> &[Box<dyn Postprocessor>];

    fn is_scope_supported(&self, _scope: ScopeKind) -> bool {
        true
    }

    fn is_pattern_supported(&self, pattern: PatternKind) -> bool;

    fn is_combination_supported(&self, scope: ScopeKind, pattern: PatternKind) -> bool {
        self.is_scope_supported(scope) && self.is_pattern_supported(pattern)
    }

    /// Raw tokens of the translation; empty for unsupported combinations.
    fn map_to_elements(&self, scope: &Scope, pattern: &Pattern)
        -> Result<Vec<Element>, MappingError>;

    fn get_mapping(&self, scope: &Scope, pattern: &Pattern) -> Result<Mapping, MappingError> {
        if !self.is_combination_supported(scope.kind(), pattern.kind()) {
            debug!(
                logic = self.name(),
                scope = %scope.kind(),
                pattern = %pattern.kind(),
                "combination not supported"
            );
            return Ok(Mapping::unsupported());
        }
        let elements = self.map_to_elements(scope, pattern)?;
        let elements = postprocess::run_all(self.postprocessors(), elements)?;
        let messages = error_messages(&elements);
        let error = if messages.is_empty() {
            None
        } else {
            let joined = messages.join("; ");
            warn!(logic = self.name(), error = %joined, "bound not expressible");
            Some(joined)
        };
        debug!(
            logic = self.name(),
            scope = %scope.kind(),
            pattern = %pattern.kind(),
            "translated"
        );
        Ok(Mapping {
            formula: linearize(&elements),
            error,
            supported: true,
        })
    }

    fn not_supported_message(&self) -> String {
        format!(
            "Mapping not supported for {} Property Specification.",
            self.name()
        )
    }
}

/// Reduce and render one cell with the given vocabulary.
pub(crate) fn render_cell(
    defs: &LanguageDefinitions,
    time: TimeLanguageDefinitions,
    timing: Timing,
    scope: &Scope,
    pattern: &Pattern,
) -> Result<Vec<Element>, MappingError> {
    let formula = reduce(scope, pattern, timing);
    Renderer::new(defs, time).render(&formula)
}

/// Marker for a probability bound on a logic without probabilistic operators.
pub(crate) fn probability_error(logic: &str, pattern: &Pattern) -> Option<Element> {
    pattern
        .probability()
        .map(|_| Element::Error(format!("{logic} cannot express probability bounds")))
}
