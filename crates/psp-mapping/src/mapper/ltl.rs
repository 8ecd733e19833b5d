use psp_model::{Pattern, PatternKind, Scope};

use super::{probability_error, render_cell, Mapper};
use crate::element::Element;
use crate::errors::MappingError;
use crate::postprocess::{MultipleWhiteSpaceReplacer, Postprocessor};
use crate::reduction::Timing;
use crate::symbols::{LanguageDefinitions, Notation, TimeLanguageDefinitions};

/// Untimed linear temporal logic.
pub struct LtlMapper {
    defs: LanguageDefinitions,
    postprocessors: Vec<Box<dyn Postprocessor>>,
}

impl LtlMapper {
    pub fn new(notation: Notation) -> Self {
        Self {
            defs: LanguageDefinitions::ltl(notation),
            postprocessors: vec![Box::new(MultipleWhiteSpaceReplacer)],
        }
    }
}

impl Mapper for LtlMapper {
    fn name(&self) -> &'static str {
        "LTL"
    }

    fn postprocessors(&self) -> &[Box<dyn Postprocessor>] {
        &self.postprocessors
    }

    fn is_pattern_supported(&self, pattern: PatternKind) -> bool {
        !matches!(
            pattern,
            PatternKind::BoundedExistence
                | PatternKind::TransientState
                | PatternKind::SteadyState
                | PatternKind::MinimumDuration
                | PatternKind::MaximumDuration
        )
    }

    fn map_to_elements(
        &self,
        scope: &Scope,
        pattern: &Pattern,
    ) -> Result<Vec<Element>, MappingError> {
        if !self.is_combination_supported(scope.kind(), pattern.kind()) {
            return Ok(Vec::new());
        }
        let mut elements = render_cell(
            &self.defs,
            TimeLanguageDefinitions::UNTIMED,
            Timing::Untimed,
            scope,
            pattern,
        )?;
        if pattern.is_timed() {
            elements.push(Element::Error(format!(
                "{} cannot express time bounds",
                self.name()
            )));
        }
        elements.extend(probability_error(self.name(), pattern));
        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use psp_model::{Event, Occurrence, Order, ProbabilityBound, ProbabilityComparison, TimeBound};

    use super::*;

    fn p() -> Event {
        Event::new("p", "")
    }

    #[test]
    fn globally_universality() {
        let m = LtlMapper::new(Notation::Unicode)
            .get_mapping(&Scope::Globally, &Pattern::Universality(Occurrence::new(p())))
            .unwrap();
        assert_eq!(m.formula, "☐ (p)");
        assert!(!m.has_mapping_error_occurred());
    }

    #[test]
    fn ascii_notation() {
        let pattern = Pattern::Response(Order::new(p(), Event::new("s", "")));
        let m = LtlMapper::new(Notation::Ascii)
            .get_mapping(&Scope::Globally, &pattern)
            .unwrap();
        assert_eq!(m.formula, "[] (p -> (<> (s)))");
    }

    #[test]
    fn time_bound_is_dropped_and_reported() {
        let pattern = Pattern::Existence(Occurrence::new(p()).with_time_bound(TimeBound::upper(5)));
        let m = LtlMapper::new(Notation::Unicode)
            .get_mapping(&Scope::Globally, &pattern)
            .unwrap();
        assert_eq!(m.formula, "◇ (p)");
        assert_eq!(m.error.as_deref(), Some("LTL cannot express time bounds"));
    }

    #[test]
    fn probability_is_reported() {
        let bound = ProbabilityBound::new(ProbabilityComparison::Greater, 0.5).unwrap();
        let pattern = Pattern::Absence(Occurrence::new(p()).with_probability(bound));
        let m = LtlMapper::new(Notation::Unicode)
            .get_mapping(&Scope::Globally, &pattern)
            .unwrap();
        assert_eq!(m.error.as_deref(), Some("LTL cannot express probability bounds"));
    }

    #[test]
    fn capability_limits_are_not_errors() {
        let mapper = LtlMapper::new(Notation::Unicode);
        let occ = Occurrence::new(p()).with_time_bound(TimeBound::upper(3));
        for pattern in [
            Pattern::bounded_existence(Occurrence::new(p()), 2).unwrap(),
            Pattern::TransientState(occ.clone()),
            Pattern::SteadyState(occ.clone()),
            Pattern::MinimumDuration(occ.clone()),
            Pattern::MaximumDuration(occ),
        ] {
            let m = mapper.get_mapping(&Scope::Globally, &pattern).unwrap();
            assert_eq!(m.formula, "", "{}", pattern.kind());
            assert!(!m.has_mapping_error_occurred(), "{}", pattern.kind());
            assert!(!m.is_supported());
            assert!(mapper
                .map_to_elements(&Scope::Globally, &pattern)
                .unwrap()
                .is_empty());
        }
    }
}
