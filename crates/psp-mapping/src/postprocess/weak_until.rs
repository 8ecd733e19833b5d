//! Rewrites `A W[I] B` into `(A U[I] B) ∨ ☐[I] A` for back-ends without a
//! native weak-until.
//!
//! Only operand shapes produced by the renderer are recognized: an event, a
//! negated event or a bracketed group before the operator; the same after it,
//! optionally led by one unary temporal operator and one boolean operator.

use tracing::trace;

use crate::element::{Element, OperatorKind};
use crate::errors::{MappingError, PostprocessError};
use crate::symbols::{LanguageDefinitions, Symbol};

use super::Postprocessor;

const NAME: &str = "WeakUntilSubstituter";

#[derive(Debug, Clone)]
pub struct WeakUntilSubstituter {
    until: &'static str,
    or: &'static str,
    always: &'static str,
}

impl WeakUntilSubstituter {
    pub fn new(defs: &LanguageDefinitions) -> Result<Self, MappingError> {
        Ok(Self {
            until: defs.get(Symbol::Until)?,
            or: defs.get(Symbol::Or)?,
            always: defs.get(Symbol::Always)?,
        })
    }

    fn rewrite(&self, elements: &mut Vec<Element>, w: usize) -> Result<(), PostprocessError> {
        let before = before_operand(elements, w)?;

        let mut i = w + 1;
        let annotation = match elements.get(i) {
            Some(e) if e.is_annotation() => {
                i += 1;
                Some(e.clone())
            }
            _ => None,
        };
        i = skip_spaces(elements, i);
        let after = after_operand(elements, i)?;

        let lhs = elements[before.clone()].to_vec();
        let rhs = elements[after.clone()].to_vec();
        let mut replacement = Vec::with_capacity(2 * lhs.len() + rhs.len() + 12);
        replacement.push(Element::BracketOpen);
        replacement.extend(lhs.iter().cloned());
        replacement.push(Element::Space);
        replacement.push(Element::operator(OperatorKind::Until, self.until));
        replacement.extend(annotation.clone());
        replacement.push(Element::Space);
        replacement.extend(rhs);
        replacement.push(Element::BracketClose);
        replacement.push(Element::Space);
        replacement.push(Element::operator(OperatorKind::Or, self.or));
        replacement.push(Element::Space);
        replacement.push(Element::operator(OperatorKind::Always, self.always));
        replacement.extend(annotation);
        replacement.push(Element::Space);
        replacement.extend(lhs);

        elements.splice(before.start..after.end, replacement);
        Ok(())
    }
}

impl Postprocessor for WeakUntilSubstituter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn process(&self, mut elements: Vec<Element>) -> Result<Vec<Element>, PostprocessError> {
        let mut round = 0usize;
        while let Some(w) = deepest_weak_until(&elements)? {
            round += 1;
            trace!(round, position = w, "substituting weak until");
            self.rewrite(&mut elements, w)?;
        }
        Ok(elements)
    }
}

/// Index of the weak-until at the greatest bracket depth, earliest on ties.
fn deepest_weak_until(elements: &[Element]) -> Result<Option<usize>, PostprocessError> {
    let mut depth = 0usize;
    let mut best: Option<(usize, usize)> = None;
    for (i, e) in elements.iter().enumerate() {
        match e {
            Element::BracketOpen => depth += 1,
            Element::BracketClose => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| unbalanced(i))?;
            }
            _ if e.is_operator(OperatorKind::WeakUntil) => {
                if best.map_or(true, |(_, d)| depth > d) {
                    best = Some((i, depth));
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(unbalanced(elements.len()));
    }
    Ok(best.map(|(i, _)| i))
}

fn before_operand(
    elements: &[Element],
    w: usize,
) -> Result<std::ops::Range<usize>, PostprocessError> {
    let end = elements[..w]
        .iter()
        .rposition(|e| *e != Element::Space)
        .ok_or_else(|| unrecognized(w, "start of formula"))?;
    let start = match &elements[end] {
        Element::BracketClose => matching_open(elements, end)?,
        Element::Event(_) if end > 0 && elements[end - 1].is_operator(OperatorKind::Not) => end - 1,
        Element::Event(_) => end,
        other => return Err(unrecognized(end, other.content())),
    };
    Ok(start..end + 1)
}

fn after_operand(
    elements: &[Element],
    start: usize,
) -> Result<std::ops::Range<usize>, PostprocessError> {
    let mut i = start;
    if elements
        .get(i)
        .and_then(Element::operator_kind)
        .is_some_and(OperatorKind::is_unary_temporal)
    {
        i += 1;
        if elements.get(i).is_some_and(Element::is_annotation) {
            i += 1;
        }
        i = skip_spaces(elements, i);
    }
    if elements
        .get(i)
        .and_then(Element::operator_kind)
        .is_some_and(OperatorKind::is_boolean)
    {
        i = skip_spaces(elements, i + 1);
    }
    let end = match elements.get(i) {
        Some(Element::Event(_)) => i,
        Some(Element::BracketOpen) => matching_close(elements, i)?,
        Some(other) => return Err(unrecognized(i, other.content())),
        None => return Err(unrecognized(i, "end of formula")),
    };
    Ok(start..end + 1)
}

fn skip_spaces(elements: &[Element], mut i: usize) -> usize {
    while elements.get(i) == Some(&Element::Space) {
        i += 1;
    }
    i
}

fn matching_open(elements: &[Element], close: usize) -> Result<usize, PostprocessError> {
    let mut depth = 0usize;
    for i in (0..=close).rev() {
        match elements[i] {
            Element::BracketClose => depth += 1,
            Element::BracketOpen => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(unbalanced(close))
}

fn matching_close(elements: &[Element], open: usize) -> Result<usize, PostprocessError> {
    let mut depth = 0usize;
    for (i, e) in elements.iter().enumerate().skip(open) {
        match e {
            Element::BracketOpen => depth += 1,
            Element::BracketClose => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(unbalanced(open))
}

fn unbalanced(position: usize) -> PostprocessError {
    PostprocessError::UnbalancedBrackets {
        postprocessor: NAME,
        position,
    }
}

fn unrecognized(position: usize, found: &str) -> PostprocessError {
    PostprocessError::UnrecognizedOperand {
        postprocessor: NAME,
        position,
        found: found.to_string(),
    }
}
