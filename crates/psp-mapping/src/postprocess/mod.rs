//! Token-level rewrites applied after rendering.
//!
//! Each mapper owns a fixed list of postprocessors and runs them in order on
//! the rendered token stream before linearization.

mod weak_until;
mod whitespace;

pub use weak_until::WeakUntilSubstituter;
pub use whitespace::MultipleWhiteSpaceReplacer;

use crate::element::Element;
use crate::errors::PostprocessError;

pub trait Postprocessor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, elements: Vec<Element>) -> Result<Vec<Element>, PostprocessError>;
}

/// Run `postprocessors` over `elements` in order.
pub fn run_all(
    postprocessors: &[Box<dyn Postprocessor>],
    elements: Vec<Element>,
) -> Result<Vec<Element>, PostprocessError> {
    postprocessors
        .iter()
        .try_fold(elements, |acc, pp| pp.process(acc))
}
