//! Target-independent formula tree produced by the reduction driver.

use psp_model::Event;

use crate::duration::TimeInterval;

/// Interval annotation of a temporal operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Interval(TimeInterval),
    /// The pattern's bound cannot be turned into an interval; carries the reason.
    Inexpressible(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    Atom(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Next {
        body: Box<Formula>,
        bound: Option<Bound>,
    },
    Always {
        body: Box<Formula>,
        bound: Option<Bound>,
    },
    Eventually {
        body: Box<Formula>,
        bound: Option<Bound>,
    },
    Until {
        lhs: Box<Formula>,
        rhs: Box<Formula>,
        bound: Option<Bound>,
    },
    WeakUntil {
        lhs: Box<Formula>,
        rhs: Box<Formula>,
        bound: Option<Bound>,
    },
}

impl Formula {
    pub fn atom(name: impl Into<String>) -> Self {
        Formula::Atom(name.into())
    }

    pub fn event(event: &Event) -> Self {
        Formula::Atom(event.name.clone())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }

    pub fn and(lhs: Formula, rhs: Formula) -> Self {
        Formula::And(Box::new(lhs), Box::new(rhs))
    }

    /// Left-nested conjunction of `first` and every item of `rest`.
    pub fn conj(first: Formula, rest: impl IntoIterator<Item = Formula>) -> Self {
        rest.into_iter().fold(first, Formula::and)
    }

    pub fn or(lhs: Formula, rhs: Formula) -> Self {
        Formula::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(lhs: Formula, rhs: Formula) -> Self {
        Formula::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn next(body: Formula) -> Self {
        Formula::Next {
            body: Box::new(body),
            bound: None,
        }
    }

    pub fn always(body: Formula) -> Self {
        Formula::Always {
            body: Box::new(body),
            bound: None,
        }
    }

    pub fn eventually(body: Formula) -> Self {
        Formula::Eventually {
            body: Box::new(body),
            bound: None,
        }
    }

    pub fn until(lhs: Formula, rhs: Formula) -> Self {
        Formula::Until {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            bound: None,
        }
    }

    pub fn weak_until(lhs: Formula, rhs: Formula) -> Self {
        Formula::WeakUntil {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            bound: None,
        }
    }

    /// Attach `bound` to the top-level temporal operator. Boolean nodes are
    /// returned unchanged.
    pub fn within(mut self, bound: Option<Bound>) -> Self {
        match &mut self {
            Formula::Next { bound: b, .. }
            | Formula::Always { bound: b, .. }
            | Formula::Eventually { bound: b, .. }
            | Formula::Until { bound: b, .. }
            | Formula::WeakUntil { bound: b, .. } => *b = bound,
            Formula::Atom(_)
            | Formula::Not(_)
            | Formula::And(..)
            | Formula::Or(..)
            | Formula::Implies(..) => {}
        }
        self
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Formula::Atom(_))
    }

    /// An atom or a negated atom.
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(inner) => inner.is_atom(),
            _ => false,
        }
    }

    pub fn weak_until_count(&self) -> usize {
        match self {
            Formula::Atom(_) => 0,
            Formula::Not(body)
            | Formula::Next { body, .. }
            | Formula::Always { body, .. }
            | Formula::Eventually { body, .. } => body.weak_until_count(),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
                l.weak_until_count() + r.weak_until_count()
            }
            Formula::Until { lhs, rhs, .. } => lhs.weak_until_count() + rhs.weak_until_count(),
            Formula::WeakUntil { lhs, rhs, .. } => {
                1 + lhs.weak_until_count() + rhs.weak_until_count()
            }
        }
    }

    /// Bounds that could not be expressed, in left-to-right order.
    pub fn inexpressible_bounds(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_inexpressible(&mut out);
        out
    }

    fn collect_inexpressible<'a>(&'a self, out: &mut Vec<&'a str>) {
        let (children, bound): (Vec<&Formula>, Option<&Bound>) = match self {
            Formula::Atom(_) => (vec![], None),
            Formula::Not(body) => (vec![&**body], None),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
                (vec![&**l, &**r], None)
            }
            Formula::Next { body, bound }
            | Formula::Always { body, bound }
            | Formula::Eventually { body, bound } => (vec![&**body], bound.as_ref()),
            Formula::Until { lhs, rhs, bound } | Formula::WeakUntil { lhs, rhs, bound } => {
                (vec![&**lhs, &**rhs], bound.as_ref())
            }
        };
        if let Some(Bound::Inexpressible(msg)) = bound {
            out.push(msg);
        }
        for child in children {
            child.collect_inexpressible(out);
        }
    }

    /// Rewrite every `a W[I] b` into `(a U[I] b) ∨ ☐[I] a`.
    pub fn expand_weak_until(self) -> Formula {
        match self {
            Formula::Atom(_) => self,
            Formula::Not(body) => Formula::not(body.expand_weak_until()),
            Formula::And(l, r) => Formula::and(l.expand_weak_until(), r.expand_weak_until()),
            Formula::Or(l, r) => Formula::or(l.expand_weak_until(), r.expand_weak_until()),
            Formula::Implies(l, r) => {
                Formula::implies(l.expand_weak_until(), r.expand_weak_until())
            }
            Formula::Next { body, bound } => Formula::next(body.expand_weak_until()).within(bound),
            Formula::Always { body, bound } => {
                Formula::always(body.expand_weak_until()).within(bound)
            }
            Formula::Eventually { body, bound } => {
                Formula::eventually(body.expand_weak_until()).within(bound)
            }
            Formula::Until { lhs, rhs, bound } => {
                Formula::until(lhs.expand_weak_until(), rhs.expand_weak_until()).within(bound)
            }
            Formula::WeakUntil { lhs, rhs, bound } => {
                let lhs = lhs.expand_weak_until();
                let rhs = rhs.expand_weak_until();
                Formula::or(
                    Formula::until(lhs.clone(), rhs).within(bound.clone()),
                    Formula::always(lhs).within(bound),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(name: &str) -> Formula {
        Formula::atom(name)
    }

    #[test]
    fn within_sets_top_level_bound_only() {
        let iv = Some(Bound::Interval(TimeInterval::closed(0, 5)));
        let f = Formula::always(Formula::eventually(a("p"))).within(iv.clone());
        match &f {
            Formula::Always { body, bound } => {
                assert_eq!(bound, &iv);
                assert!(matches!(**body, Formula::Eventually { bound: None, .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(Formula::and(a("p"), a("q")).within(iv), Formula::and(a("p"), a("q")));
    }

    #[test]
    fn literals() {
        assert!(a("p").is_literal());
        assert!(Formula::not(a("p")).is_literal());
        assert!(!Formula::not(Formula::not(a("p"))).is_literal());
        assert!(!Formula::and(a("p"), a("q")).is_literal());
    }

    #[test]
    fn conj_nests_left() {
        assert_eq!(
            Formula::conj(a("a"), [a("b"), a("c")]),
            Formula::and(Formula::and(a("a"), a("b")), a("c"))
        );
        assert_eq!(Formula::conj(a("a"), []), a("a"));
    }

    #[test]
    fn expand_weak_until_copies_bound() {
        let iv = Some(Bound::Interval(TimeInterval::closed(1, 2)));
        let f = Formula::weak_until(a("p"), a("q")).within(iv.clone());
        assert_eq!(
            f.expand_weak_until(),
            Formula::or(
                Formula::until(a("p"), a("q")).within(iv.clone()),
                Formula::always(a("p")).within(iv)
            )
        );
    }

    #[test]
    fn expand_weak_until_is_idempotent_and_total() {
        let f = Formula::always(Formula::implies(
            a("q"),
            Formula::weak_until(a("p"), Formula::weak_until(a("s"), a("r"))),
        ));
        assert_eq!(f.weak_until_count(), 2);
        let once = f.expand_weak_until();
        assert_eq!(once.weak_until_count(), 0);
        assert_eq!(once.clone().expand_weak_until(), once);
    }

    #[test]
    fn inexpressible_bounds_in_order() {
        let f = Formula::and(
            Formula::eventually(a("p")).within(Some(Bound::Inexpressible("first".into()))),
            Formula::always(a("q")).within(Some(Bound::Inexpressible("second".into()))),
        );
        assert_eq!(f.inexpressible_bounds(), vec!["first", "second"]);
    }
}
