use crate::element::Element;
use crate::errors::PostprocessError;

use super::Postprocessor;

/// Collapses runs of whitespace, both across `Space` tokens and inside text.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultipleWhiteSpaceReplacer;

impl Postprocessor for MultipleWhiteSpaceReplacer {
    fn name(&self) -> &'static str {
        "MultipleWhiteSpaceReplacer"
    }

    fn process(&self, elements: Vec<Element>) -> Result<Vec<Element>, PostprocessError> {
        let mut out = Vec::with_capacity(elements.len());
        // Whether the printed output so far ends in whitespace.
        let mut in_space = false;
        for e in elements {
            match e {
                Element::Space => {
                    if !in_space {
                        out.push(Element::Space);
                        in_space = true;
                    }
                }
                Element::Text(text) => {
                    let collapsed = collapse(&text, in_space);
                    if collapsed.is_empty() {
                        continue;
                    }
                    in_space = collapsed.ends_with(' ');
                    out.push(Element::Text(collapsed));
                }
                // Prints nothing, so it does not break a whitespace run.
                Element::Error(_) => out.push(e),
                other => {
                    if !other.content().is_empty() {
                        in_space = false;
                    }
                    out.push(other);
                }
            }
        }
        Ok(out)
    }
}

/// Replace every whitespace run in `text` by one space, dropping a leading
/// run when the output already ends in whitespace.
fn collapse(text: &str, mut in_space: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
