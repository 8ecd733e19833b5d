use psp_model::{Pattern, PatternKind, Scope};

use super::{probability_error, render_cell, Mapper};
use crate::element::Element;
use crate::errors::MappingError;
use crate::postprocess::{MultipleWhiteSpaceReplacer, Postprocessor};
use crate::reduction::Timing;
use crate::symbols::{LanguageDefinitions, Notation, TimeLanguageDefinitions};

/// Metric temporal logic with bracketed intervals on every temporal operator
/// that carries a bound.
pub struct MtlMapper {
    defs: LanguageDefinitions,
    postprocessors: Vec<Box<dyn Postprocessor>>,
}

impl MtlMapper {
    pub fn new(notation: Notation) -> Self {
        Self {
            defs: LanguageDefinitions::mtl(notation),
            postprocessors: vec![Box::new(MultipleWhiteSpaceReplacer)],
        }
    }
}

impl Mapper for MtlMapper {
    fn name(&self) -> &'static str {
        "MTL"
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
            TimeLanguageDefinitions::MTL,
            Timing::Nested,
            scope,
            pattern,
        )?;
        elements.extend(probability_error(self.name(), pattern));
        Ok(elements)
    }
}
