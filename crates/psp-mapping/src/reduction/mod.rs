//! Pattern and scope composition.
//!
//! [`reduce`] dispatches first on the pattern, then (inside each builder) on
//! the scope, and returns the formula of that cell. Timed targets differ only
//! in which operators receive an interval, selected by [`Timing`].

mod chain;
mod occurrence;
mod order;

use psp_model::{ChainEvent, ChainEvents, Event, Order, Pattern, PatternKind, Scope, TimeBound};

use crate::duration::{self, ChainWindow, DurationError, TimeInterval};
use crate::formula::{Bound, Formula};

/// Where interval annotations go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// No annotations at all.
    Untimed,
    /// The principal operator and every chain link; missing bounds become `[0,∞)`.
    Nested,
    /// The principal operator only; a timed chain gets one end-to-end window on
    /// the wait that closes it.
    Collapsed,
}

/// Interval shape derived from a pattern's time bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Time,
    Trigger,
    Elapsed,
    MinTime,
    Gap,
    MaxGap,
}

impl Shape {
    fn apply(self, bound: &TimeBound) -> Result<TimeInterval, DurationError> {
        match self {
            Shape::Time => duration::time(bound),
            Shape::Trigger => duration::trigger(bound),
            Shape::Elapsed => duration::elapsed(bound),
            Shape::MinTime => duration::umintime(bound),
            Shape::Gap => duration::gap(bound),
            Shape::MaxGap => duration::maxgap(bound),
        }
    }

    /// Patterns whose meaning depends on the bound cannot go without one.
    fn required(self) -> bool {
        matches!(self, Shape::Trigger | Shape::MinTime | Shape::Gap)
    }
}

/// Which end-to-end window a collapsed chain uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Window {
    /// Causes `S, T1..Tn` lead to the single effect `P`.
    CausesToEffect,
    /// The single cause `P` leads to effects `S, T1..Tn`.
    CauseToEffects,
}

pub(crate) struct Reducer<'a> {
    pub(crate) timing: Timing,
    pub(crate) scope: &'a Scope,
    kind: PatternKind,
}

impl Reducer<'_> {
    /// Annotation of the pattern's principal operator.
    pub(crate) fn principal(&self, bound: Option<&TimeBound>, shape: Shape) -> Option<Bound> {
        if self.timing == Timing::Untimed {
            return None;
        }
        match bound {
            Some(tb) => Some(interval(shape.apply(tb))),
            None if shape.required() => Some(Bound::Inexpressible(format!(
                "{} needs a time bound in a timed logic",
                self.kind
            ))),
            None if self.timing == Timing::Nested => Some(Bound::Interval(TimeInterval::UNBOUNDED)),
            None => None,
        }
    }

    /// Annotation of one chain link, relative to the previous link.
    pub(crate) fn link(&self, link: &ChainEvent) -> Option<Bound> {
        if self.timing != Timing::Nested {
            return None;
        }
        Some(match &link.time_bound {
            Some(tb) => interval(duration::time(tb)),
            None => Bound::Interval(TimeInterval::UNBOUNDED),
        })
    }

    /// End-to-end window of a timed chain under collapsed timing, placed on
    /// the wait that closes the chain. `None` when the chain keeps its own
    /// link annotations or has none.
    pub(crate) fn chain_window(
        &self,
        order: &Order,
        links: &ChainEvents,
        window: Window,
    ) -> Option<Bound> {
        if self.timing != Timing::Collapsed || !links.is_timed() {
            return None;
        }
        let outer = order.time_bound.as_ref();
        let result = match window {
            Window::CausesToEffect => duration::gap_np(outer, links, links.len()),
            Window::CauseToEffects => duration::gap_pn(outer, links, links.len()),
        };
        Some(match result {
            Ok(ChainWindow::Window(iv)) => Bound::Interval(iv),
            Ok(ChainWindow::Incomplete) => {
                Bound::Inexpressible(DurationError::IncompleteChain.to_string())
            }
            Err(e) => Bound::Inexpressible(e.to_string()),
        })
    }

    /// Principal annotation of a precedence chain. There is no single window
    /// for a precedence, so collapsed timing cannot keep link bounds.
    pub(crate) fn precedence_chain_principal(
        &self,
        order: &Order,
        links: &ChainEvents,
    ) -> Option<Bound> {
        if self.timing == Timing::Collapsed && links.is_timed() {
            return Some(Bound::Inexpressible(format!(
                "{}: chain event time bounds cannot be collapsed into one window",
                self.kind
            )));
        }
        self.principal(order.time_bound.as_ref(), Shape::Time)
    }

    pub(crate) fn annotates_links(&self) -> bool {
        self.timing == Timing::Nested
    }
}

fn interval(result: Result<TimeInterval, DurationError>) -> Bound {
    match result {
        Ok(iv) => Bound::Interval(iv),
        Err(e) => Bound::Inexpressible(e.to_string()),
    }
}

/// Build the formula of the (`pattern`, `scope`) cell.
pub fn reduce(scope: &Scope, pattern: &Pattern, timing: Timing) -> Formula {
    let cx = Reducer {
        timing,
        scope,
        kind: pattern.kind(),
    };
    match pattern {
        Pattern::Universality(o) => occurrence::universality(&cx, o),
        Pattern::Absence(o) => occurrence::absence(&cx, o),
        Pattern::Existence(o) => occurrence::existence(&cx, o),
        Pattern::BoundedExistence {
            occurrence: o,
            frequency,
        } => occurrence::bounded_existence(&cx, o, *frequency),
        Pattern::TransientState(o) => occurrence::transient_state(&cx, o),
        Pattern::SteadyState(o) => occurrence::steady_state(&cx, o),
        Pattern::MinimumDuration(o) => occurrence::minimum_duration(&cx, o),
        Pattern::MaximumDuration(o) => occurrence::maximum_duration(&cx, o),
        Pattern::Recurrence(o) => occurrence::recurrence(&cx, o),
        Pattern::Precedence(o) => order::precedence(&cx, o),
        Pattern::Until(o) => order::until(&cx, o),
        Pattern::Response(o) => order::response(&cx, o),
        Pattern::ResponseInvariance(o) => order::response_invariance(&cx, o),
        Pattern::PrecedenceChain1N(c) => chain::precedence_chain_1n(&cx, c),
        Pattern::PrecedenceChainN1(c) => chain::precedence_chain_n1(&cx, c),
        Pattern::ResponseChain1N(c) => chain::response_chain_1n(&cx, c),
        Pattern::ResponseChainN1(c) => chain::response_chain_n1(&cx, c),
    }
}

// ---------------------------------------------------------------------------
// Shared building blocks
// ---------------------------------------------------------------------------

pub(crate) fn ev(event: &Event) -> Formula {
    Formula::event(event)
}

pub(crate) fn not_ev(event: &Event) -> Formula {
    Formula::not(Formula::event(event))
}

/// `base ∧ ¬Z` when a constraint guard is present.
pub(crate) fn guarded(base: Formula, z: Option<&Formula>) -> Formula {
    match z {
        Some(z) => Formula::and(base, z.clone()),
        None => base,
    }
}

/// `guard U[I] target`, or `◇[I] target` when nothing guards the wait.
pub(crate) fn wait(guard: Option<Formula>, bound: Option<Bound>, target: Formula) -> Formula {
    match guard {
        Some(g) => Formula::until(g, target).within(bound),
        None => Formula::eventually(target).within(bound),
    }
}

/// `Q ∧ ¬R ∧ ◇R`.
pub(crate) fn between(q: &Event, r: &Event) -> Formula {
    Formula::conj(ev(q), [not_ev(r), Formula::eventually(ev(r))])
}

/// `Q ∧ ¬R`.
pub(crate) fn open(q: &Event, r: &Event) -> Formula {
    Formula::and(ev(q), not_ev(r))
}

/// Universality-style scoping of a state formula `body`.
pub(crate) fn universal(scope: &Scope, body: Formula, bound: Option<Bound>) -> Formula {
    match scope {
        Scope::Globally => Formula::always(body).within(bound),
        Scope::BeforeR { r } => Formula::implies(
            Formula::eventually(ev(r)),
            Formula::until(body, ev(r)).within(bound),
        ),
        Scope::AfterQ { q } => Formula::always(Formula::implies(
            ev(q),
            Formula::always(body).within(bound),
        )),
        Scope::BetweenQandR { q, r } => Formula::always(Formula::implies(
            between(q, r),
            Formula::until(body, ev(r)).within(bound),
        )),
        Scope::AfterQUntilR { q, r } => Formula::always(Formula::implies(
            open(q, r),
            Formula::weak_until(body, ev(r)).within(bound),
        )),
    }
}

/// Response-style scoping: `global` must hold at every position, `bounded(R)`
/// at every position until the closing anchor.
pub(crate) fn responsive(
    scope: &Scope,
    global: impl FnOnce() -> Formula,
    bounded: impl FnOnce(&Event) -> Formula,
) -> Formula {
    match scope {
        Scope::Globally => Formula::always(global()),
        Scope::BeforeR { r } => Formula::implies(
            Formula::eventually(ev(r)),
            Formula::until(bounded(r), ev(r)),
        ),
        Scope::AfterQ { q } => {
            Formula::always(Formula::implies(ev(q), Formula::always(global())))
        }
        Scope::BetweenQandR { q, r } => Formula::always(Formula::implies(
            between(q, r),
            Formula::until(bounded(r), ev(r)),
        )),
        Scope::AfterQUntilR { q, r } => Formula::always(Formula::implies(
            open(q, r),
            Formula::weak_until(bounded(r), ev(r)),
        )),
    }
}

/// `☐¬Q ∨ ◇(Q ∧ body)`.
pub(crate) fn after_first(q: &Event, body: Formula) -> Formula {
    Formula::or(
        Formula::always(not_ev(q)),
        Formula::eventually(Formula::and(ev(q), body)),
    )
}

#[cfg(test)]
mod tests {
    use psp_model::Occurrence;

    use super::*;

    static GLOBALLY: Scope = Scope::Globally;

    fn cx(timing: Timing, kind: PatternKind) -> Reducer<'static> {
        Reducer {
            timing,
            scope: &GLOBALLY,
            kind,
        }
    }

    // ---------------------------------------------------------------
    // Principal annotations
    // ---------------------------------------------------------------

    #[test]
    fn untimed_never_annotates() {
        let c = cx(Timing::Untimed, PatternKind::TransientState);
        assert_eq!(c.principal(Some(&TimeBound::upper(3)), Shape::Trigger), None);
        assert_eq!(c.principal(None, Shape::Trigger), None);
    }

    #[test]
    fn nested_defaults_to_unbounded() {
        let c = cx(Timing::Nested, PatternKind::Universality);
        assert_eq!(
            c.principal(None, Shape::Time),
            Some(Bound::Interval(TimeInterval::UNBOUNDED))
        );
        let c = cx(Timing::Collapsed, PatternKind::Universality);
        assert_eq!(c.principal(None, Shape::Time), None);
    }

    #[test]
    fn required_shapes_flag_missing_bound() {
        let c = cx(Timing::Collapsed, PatternKind::MinimumDuration);
        assert_eq!(
            c.principal(None, Shape::MinTime),
            Some(Bound::Inexpressible(
                "MinimumDuration needs a time bound in a timed logic".into()
            ))
        );
    }

    #[test]
    fn helper_failures_become_inexpressible() {
        let c = cx(Timing::Nested, PatternKind::Recurrence);
        assert!(matches!(
            c.principal(Some(&TimeBound::interval(5, 2)), Shape::MaxGap),
            Some(Bound::Inexpressible(_))
        ));
    }

    // ---------------------------------------------------------------
    // Chains
    // ---------------------------------------------------------------

    fn links(bounds: Vec<Option<TimeBound>>) -> ChainEvents {
        ChainEvents::new(
            bounds
                .into_iter()
                .map(|tb| ChainEvent {
                    event: Event::new("t", ""),
                    constraint: None,
                    time_bound: tb,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn collapsed_chain_uses_window() {
        let c = cx(Timing::Collapsed, PatternKind::ResponseChain1N);
        let order = Order::new(Event::new("p", ""), Event::new("s", ""))
            .with_time_bound(TimeBound::upper(2));
        let l = links(vec![Some(TimeBound::upper(3))]);
        assert_eq!(
            c.chain_window(&order, &l, Window::CauseToEffects),
            Some(Bound::Interval(TimeInterval::closed(0, 5)))
        );
        let l = links(vec![Some(TimeBound::upper(3)), None]);
        assert_eq!(
            c.chain_window(&order, &l, Window::CauseToEffects),
            Some(Bound::Inexpressible(
                DurationError::IncompleteChain.to_string()
            ))
        );
    }

    #[test]
    fn untimed_or_nested_chain_has_no_window() {
        let order = Order::new(Event::new("p", ""), Event::new("s", ""))
            .with_time_bound(TimeBound::upper(2));
        let c = cx(Timing::Collapsed, PatternKind::ResponseChainN1);
        assert_eq!(
            c.chain_window(&order, &links(vec![None]), Window::CausesToEffect),
            None
        );
        let c = cx(Timing::Nested, PatternKind::ResponseChainN1);
        assert_eq!(
            c.chain_window(
                &order,
                &links(vec![Some(TimeBound::upper(3))]),
                Window::CausesToEffect
            ),
            None
        );
    }

    #[test]
    fn reduce_dispatches_on_pattern() {
        let f = reduce(
            &Scope::Globally,
            &Pattern::Universality(Occurrence::new(Event::new("p", ""))),
            Timing::Untimed,
        );
        assert_eq!(f, Formula::always(Formula::atom("p")));
    }
}
