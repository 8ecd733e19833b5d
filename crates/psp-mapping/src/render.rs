//! Linearization of a [`Formula`] into target tokens.
//!
//! Operands of binary operators stay bare only when they are literals (or a
//! same-operator conjunction/disjunction); everything else is bracketed, which
//! is the shape the weak-until substituter relies on.

use crate::duration::TimeInterval;
use crate::element::{Element, OperatorKind};
use crate::errors::MappingError;
use crate::formula::{Bound, Formula};
use crate::symbols::{IntervalStyle, LanguageDefinitions, Symbol, TimeLanguageDefinitions};
use psp_model::Duration;

pub struct Renderer<'a> {
    defs: &'a LanguageDefinitions,
    time: TimeLanguageDefinitions,
}

impl<'a> Renderer<'a> {
    pub fn new(defs: &'a LanguageDefinitions, time: TimeLanguageDefinitions) -> Self {
        Self { defs, time }
    }

    pub fn render(&self, formula: &Formula) -> Result<Vec<Element>, MappingError> {
        let mut out = Vec::new();
        self.emit(formula, &mut out)?;
        Ok(out)
    }

    fn emit(&self, formula: &Formula, out: &mut Vec<Element>) -> Result<(), MappingError> {
        match formula {
            Formula::Atom(name) => out.push(Element::Event(name.clone())),
            Formula::Not(inner) => {
                self.operator(OperatorKind::Not, out)?;
                if inner.is_atom() {
                    self.emit(inner, out)?;
                } else {
                    self.group(inner, out)?;
                }
            }
            Formula::Next { body, bound } => self.unary(OperatorKind::Next, body, bound, out)?,
            Formula::Always { body, bound } => {
                self.unary(OperatorKind::Always, body, bound, out)?
            }
            Formula::Eventually { body, bound } => {
                self.unary(OperatorKind::Eventually, body, bound, out)?
            }
            Formula::And(l, r) => self.binary(OperatorKind::And, l, r, &None, out)?,
            Formula::Or(l, r) => self.binary(OperatorKind::Or, l, r, &None, out)?,
            Formula::Implies(l, r) => self.binary(OperatorKind::Implication, l, r, &None, out)?,
            Formula::Until { lhs, rhs, bound } => {
                self.binary(OperatorKind::Until, lhs, rhs, bound, out)?
            }
            Formula::WeakUntil { lhs, rhs, bound } => {
                self.binary(OperatorKind::WeakUntil, lhs, rhs, bound, out)?
            }
        }
        Ok(())
    }

    fn operator(&self, kind: OperatorKind, out: &mut Vec<Element>) -> Result<(), MappingError> {
        out.push(Element::operator(kind, self.defs.get(kind.symbol())?));
        Ok(())
    }

    fn group(&self, formula: &Formula, out: &mut Vec<Element>) -> Result<(), MappingError> {
        out.push(Element::BracketOpen);
        self.emit(formula, out)?;
        out.push(Element::BracketClose);
        Ok(())
    }

    fn unary(
        &self,
        kind: OperatorKind,
        body: &Formula,
        bound: &Option<Bound>,
        out: &mut Vec<Element>,
    ) -> Result<(), MappingError> {
        self.operator(kind, out)?;
        self.annotation(bound, out)?;
        out.push(Element::Space);
        self.group(body, out)
    }

    fn binary(
        &self,
        kind: OperatorKind,
        lhs: &Formula,
        rhs: &Formula,
        bound: &Option<Bound>,
        out: &mut Vec<Element>,
    ) -> Result<(), MappingError> {
        self.operand(kind, lhs, out)?;
        out.push(Element::Space);
        self.operator(kind, out)?;
        self.annotation(bound, out)?;
        out.push(Element::Space);
        self.operand(kind, rhs, out)
    }

    fn operand(
        &self,
        parent: OperatorKind,
        formula: &Formula,
        out: &mut Vec<Element>,
    ) -> Result<(), MappingError> {
        let bare = formula.is_literal()
            || matches!(
                (parent, formula),
                (OperatorKind::And, Formula::And(..)) | (OperatorKind::Or, Formula::Or(..))
            );
        if bare {
            self.emit(formula, out)
        } else {
            self.group(formula, out)
        }
    }

    fn annotation(
        &self,
        bound: &Option<Bound>,
        out: &mut Vec<Element>,
    ) -> Result<(), MappingError> {
        let interval = match bound {
            None => return Ok(()),
            Some(Bound::Inexpressible(msg)) => {
                out.push(Element::Error(msg.clone()));
                return Ok(());
            }
            Some(Bound::Interval(iv)) => iv,
        };
        if interval.is_unbounded() && self.time.elide_unbounded {
            return Ok(());
        }
        match self.time.style {
            IntervalStyle::Unsupported => out.push(Element::Error(format!(
                "{} cannot express the time interval {interval}",
                self.defs.logic()
            ))),
            IntervalStyle::Bracketed => {
                let upper = match interval.upper {
                    Duration::Finite(n) => n.to_string(),
                    Duration::Infinite => self.defs.get(Symbol::Infinity)?.to_string(),
                };
                let close = if interval.upper_closed { ']' } else { ')' };
                out.push(Element::TimeBound(format!(
                    "[{},{upper}{close}",
                    interval.lower
                )));
            }
            IntervalStyle::Relational => out.push(self.relational(interval)),
        }
        Ok(())
    }

    fn relational(&self, iv: &TimeInterval) -> Element {
        match (iv.lower, iv.upper, iv.upper_closed) {
            (0, Duration::Finite(u), true) => Element::TimeBound(format!("<={u}")),
            (0, Duration::Finite(u), false) => Element::TimeBound(format!("<{u}")),
            (l, Duration::Infinite, _) => Element::TimeBound(format!(">={l}")),
            (l, Duration::Finite(u), true) => Element::TimeBound(format!("[{l},{u}]")),
            (_, Duration::Finite(_), false) => Element::Error(format!(
                "{} cannot express the half-open time interval {iv}",
                self.defs.logic()
            )),
        }
    }
}
