use psp_model::{Pattern, PatternKind, Scope};

use super::Mapper;
use crate::element::Element;
use crate::errors::MappingError;
use crate::postprocess::Postprocessor;

/// Structured English: `scope, pattern.`
#[derive(Default)]
pub struct SegMapper {
    postprocessors: Vec<Box<dyn Postprocessor>>,
}

impl SegMapper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Mapper for SegMapper {
    fn name(&self) -> &'static str {
        "SEL"
    }

    fn postprocessors(&self) -> &[Box<dyn Postprocessor>] {
        &self.postprocessors
    }

    fn is_pattern_supported(&self, _pattern: PatternKind) -> bool {
        true
    }

    fn map_to_elements(
        &self,
        scope: &Scope,
        pattern: &Pattern,
    ) -> Result<Vec<Element>, MappingError> {
        Ok(vec![
            Element::Text(scope.specification_as_sel()),
            Element::Text(", ".into()),
            Element::Text(pattern.specification_as_sel()),
            Element::Text(".".into()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use psp_model::{Event, Occurrence};

    use super::*;

    #[test]
    fn composes_scope_and_pattern() {
        let m = SegMapper::new()
            .get_mapping(
                &Scope::Globally,
                &Pattern::Universality(Occurrence::new(Event::new("pEvent(p)", ""))),
            )
            .unwrap();
        assert_eq!(
            m.formula,
            "Globally, it is always the case that {pEvent(p)} [holds]."
        );
        assert!(m.is_supported());
        assert!(!m.has_mapping_error_occurred());
    }
}
