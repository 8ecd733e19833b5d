use psp_model::{Pattern, PatternKind, Scope, ScopeKind};

use super::{render_cell, Mapper};
use crate::element::Element;
use crate::errors::MappingError;
use crate::postprocess::{MultipleWhiteSpaceReplacer, Postprocessor, WeakUntilSubstituter};
use crate::reduction::Timing;
use crate::symbols::{LanguageDefinitions, TimeLanguageDefinitions};

/// PRISM path and steady-state properties, `P⋈p [ φ ]` and `S⋈p [ φ ]`.
///
/// Only the principal operator carries a bound; timed response chains fold
/// their link bounds into one end-to-end window. The quantitative flavour asks
/// for the probability (`P=?`) instead of checking a threshold.
pub struct PrismMapper {
    quantitative: bool,
    defs: LanguageDefinitions,
    postprocessors: Vec<Box<dyn Postprocessor>>,
}

impl PrismMapper {
    pub fn new() -> Result<Self, MappingError> {
        Self::build(false)
    }

    pub fn quantitative() -> Result<Self, MappingError> {
        Self::build(true)
    }

    fn build(quantitative: bool) -> Result<Self, MappingError> {
        let defs = LanguageDefinitions::prism();
        let postprocessors: Vec<Box<dyn Postprocessor>> = vec![
            Box::new(WeakUntilSubstituter::new(&defs)?),
            Box::new(MultipleWhiteSpaceReplacer),
        ];
        Ok(Self {
            quantitative,
            defs,
            postprocessors,
        })
    }

    fn query(&self, operator: char, pattern: &Pattern) -> String {
        match pattern.probability() {
            _ if self.quantitative => format!("{operator}=?"),
            Some(b) => format!("{operator}{}{}", b.comparison().symbol(), b.probability()),
            None => format!("{operator}>=1"),
        }
    }

    /// Long-run share of time in which `P` holds.
    fn steady_state(&self, pattern: &Pattern) -> Vec<Element> {
        let mut body = Vec::with_capacity(2);
        if let Some(o) = pattern.as_occurrence() {
            body.push(Element::Event(o.p.name.clone()));
        }
        if pattern.time_bound().is_some() {
            body.push(Element::Error(format!(
                "{} cannot express a time bound on {}",
                self.name(),
                PatternKind::SteadyState
            )));
        }
        body
    }
}

impl Mapper for PrismMapper {
    fn name(&self) -> &'static str {
        if self.quantitative {
            "Quantitative Prism"
        } else {
            "Prism"
        }
    }

    fn postprocessors(&self) -> &[Box<dyn Postprocessor>] {
        &self.postprocessors
    }

    fn is_pattern_supported(&self, pattern: PatternKind) -> bool {
        pattern != PatternKind::BoundedExistence
    }

    fn is_combination_supported(&self, scope: ScopeKind, pattern: PatternKind) -> bool {
        self.is_pattern_supported(pattern)
            && (pattern != PatternKind::SteadyState || scope == ScopeKind::Globally)
    }

    fn map_to_elements(
        &self,
        scope: &Scope,
        pattern: &Pattern,
    ) -> Result<Vec<Element>, MappingError> {
        if !self.is_combination_supported(scope.kind(), pattern.kind()) {
            return Ok(Vec::new());
        }
        let (operator, body) = if pattern.kind() == PatternKind::SteadyState {
            ('S', self.steady_state(pattern))
        } else {
            let body = render_cell(
                &self.defs,
                TimeLanguageDefinitions::PRISM,
                Timing::Collapsed,
                scope,
                pattern,
            )?;
            ('P', body)
        };
        let mut elements = Vec::with_capacity(body.len() + 6);
        elements.push(Element::Text(self.query(operator, pattern)));
        elements.push(Element::Space);
        elements.push(Element::Text("[".into()));
        elements.push(Element::Space);
        elements.extend(body);
        elements.push(Element::Space);
        elements.push(Element::Text("]".into()));
        Ok(elements)
    }
}
