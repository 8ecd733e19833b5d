use psp_model::{Pattern, PatternKind, Scope};

use super::{probability_error, render_cell, Mapper};
use crate::element::Element;
use crate::errors::MappingError;
use crate::postprocess::{MultipleWhiteSpaceReplacer, Postprocessor, WeakUntilSubstituter};
use crate::reduction::Timing;
use crate::symbols::{LanguageDefinitions, TimeLanguageDefinitions};

/// Behavioral-verification syntax: MTL with ASCII letters, no `[0,∞)` and no
/// native weak-until.
pub struct TbvMapper {
    defs: LanguageDefinitions,
    postprocessors: Vec<Box<dyn Postprocessor>>,
}

impl TbvMapper {
    pub fn new() -> Result<Self, MappingError> {
        let defs = LanguageDefinitions::tbv();
        let postprocessors: Vec<Box<dyn Postprocessor>> = vec![
            Box::new(WeakUntilSubstituter::new(&defs)?),
            Box::new(MultipleWhiteSpaceReplacer),
        ];
        Ok(Self {
            defs,
            postprocessors,
        })
    }
}

impl Mapper for TbvMapper {
    fn name(&self) -> &'static str {
        "TBV"
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
        let mut elements = render_cell(
            &self.defs,
            TimeLanguageDefinitions::TBV,
            Timing::Nested,
            scope,
            pattern,
        )?;
        elements.extend(probability_error(self.name(), pattern));
        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use psp_model::{Event, Occurrence, Order, TimeBound};

    use super::*;

    fn map(scope: &Scope, pattern: &Pattern) -> String {
        TbvMapper::new()
            .unwrap()
            .get_mapping(scope, pattern)
            .unwrap()
            .formula
    }

    #[test]
    fn unbounded_intervals_are_elided() {
        let pattern = Pattern::Universality(Occurrence::new(Event::new("p", "")));
        assert_eq!(map(&Scope::Globally, &pattern), "G (p)");
    }

    #[test]
    fn weak_until_is_substituted() {
        let pattern = Pattern::Precedence(Order::new(Event::new("p", ""), Event::new("s", "")));
        assert_eq!(map(&Scope::Globally, &pattern), "(!p U s) || G !p");
    }

    #[test]
    fn bounded_weak_until_keeps_its_interval() {
        let pattern = Pattern::Precedence(
            Order::new(Event::new("p", ""), Event::new("s", ""))
                .with_time_bound(TimeBound::upper(4)),
        );
        assert_eq!(map(&Scope::Globally, &pattern), "(!p U[0,4] s) || G[0,4] !p");
    }
}
