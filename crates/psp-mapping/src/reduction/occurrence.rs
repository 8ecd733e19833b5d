//! Occurrence patterns over a single event `P`.

use psp_model::{Event, Occurrence, Scope};

use super::{after_first, between, ev, not_ev, open, responsive, universal, Reducer, Shape};
use crate::formula::{Bound, Formula};

pub(super) fn universality(cx: &Reducer, o: &Occurrence) -> Formula {
    let i = cx.principal(o.time_bound.as_ref(), Shape::Time);
    universal(cx.scope, ev(&o.p), i)
}

pub(super) fn absence(cx: &Reducer, o: &Occurrence) -> Formula {
    let i = cx.principal(o.time_bound.as_ref(), Shape::Time);
    universal(cx.scope, not_ev(&o.p), i)
}

pub(super) fn existence(cx: &Reducer, o: &Occurrence) -> Formula {
    let i = cx.principal(o.time_bound.as_ref(), Shape::Time);
    let p = &o.p;
    match cx.scope {
        Scope::Globally => Formula::eventually(ev(p)).within(i),
        Scope::BeforeR { r } => Formula::weak_until(not_ev(r), p_not_r(p, r)).within(i),
        Scope::AfterQ { q } => after_first(q, Formula::eventually(ev(p)).within(i)),
        Scope::BetweenQandR { q, r } => Formula::always(Formula::implies(
            open(q, r),
            Formula::weak_until(not_ev(r), p_not_r(p, r)).within(i),
        )),
        Scope::AfterQUntilR { q, r } => Formula::always(Formula::implies(
            open(q, r),
            Formula::until(not_ev(r), p_not_r(p, r)).within(i),
        )),
    }
}

/// `P` holds at most `frequency` times.
pub(super) fn bounded_existence(cx: &Reducer, o: &Occurrence, frequency: u32) -> Formula {
    let i = cx.principal(o.time_bound.as_ref(), Shape::Time);
    let p = &o.p;
    match cx.scope {
        Scope::Globally => at_most(p, frequency).within(i),
        Scope::BeforeR { r } => Formula::implies(
            Formula::eventually(ev(r)),
            at_most_before(p, r, frequency, false).within(i),
        ),
        Scope::AfterQ { q } => Formula::implies(
            Formula::eventually(ev(q)),
            Formula::until(
                not_ev(q),
                Formula::and(ev(q), at_most(p, frequency).within(i)),
            ),
        ),
        Scope::BetweenQandR { q, r } => Formula::always(Formula::implies(
            Formula::and(ev(q), Formula::eventually(ev(r))),
            at_most_before(p, r, frequency, false).within(i),
        )),
        Scope::AfterQUntilR { q, r } => Formula::always(Formula::implies(
            ev(q),
            at_most_before(p, r, frequency, true).within(i),
        )),
    }
}

/// `b(0) = ☐¬P`, `b(k) = ¬P W (P W b(k-1))`.
fn at_most(p: &Event, k: u32) -> Formula {
    (0..k).fold(Formula::always(not_ev(p)), |inner, _| {
        Formula::weak_until(not_ev(p), Formula::weak_until(ev(p), inner))
    })
}

/// `b(0) = ¬P U R`, `b(k) = (¬P ∧ ¬R) U (R ∨ ((P ∧ ¬R) U (R ∨ b(k-1))))`.
fn at_most_before(p: &Event, r: &Event, k: u32, weak: bool) -> Formula {
    let step = |lhs: Formula, rhs: Formula| {
        if weak {
            Formula::weak_until(lhs, rhs)
        } else {
            Formula::until(lhs, rhs)
        }
    };
    (0..k).fold(step(not_ev(p), ev(r)), |inner, _| {
        step(
            Formula::and(not_ev(p), not_ev(r)),
            Formula::or(
                ev(r),
                step(p_not_r(p, r), Formula::or(ev(r), inner)),
            ),
        )
    })
}

/// `P` holds exactly `d = tU - tL` units after the scope opens.
pub(super) fn transient_state(cx: &Reducer, o: &Occurrence) -> Formula {
    let j = cx.principal(o.time_bound.as_ref(), Shape::Trigger);
    let p = &o.p;
    match cx.scope {
        Scope::Globally => Formula::eventually(ev(p)).within(j),
        Scope::BeforeR { r } => Formula::implies(
            Formula::eventually(ev(r)),
            Formula::until(not_ev(r), p_not_r(p, r)).within(j),
        ),
        Scope::AfterQ { q } => after_first(q, Formula::eventually(ev(p)).within(j)),
        Scope::BetweenQandR { q, r } => Formula::always(Formula::implies(
            between(q, r),
            Formula::until(not_ev(r), p_not_r(p, r)).within(j),
        )),
        Scope::AfterQUntilR { q, r } => Formula::always(Formula::implies(
            open(q, r),
            Formula::until(not_ev(r), p_not_r(p, r)).within(j),
        )),
    }
}

pub(super) fn steady_state(cx: &Reducer, o: &Occurrence) -> Formula {
    let j = cx.principal(o.time_bound.as_ref(), Shape::Elapsed);
    let p = &o.p;
    let settle = |r: &Event, weak: bool, j: Option<Bound>| {
        let hold = if weak {
            Formula::weak_until(ev(p), ev(r))
        } else {
            Formula::until(ev(p), ev(r))
        };
        Formula::until(not_ev(r), hold.within(j))
    };
    match cx.scope {
        Scope::Globally => Formula::eventually(Formula::always(ev(p)).within(j)),
        Scope::BeforeR { r } => {
            Formula::implies(Formula::eventually(ev(r)), settle(r, false, j))
        }
        Scope::AfterQ { q } => Formula::always(Formula::implies(
            ev(q),
            Formula::eventually(Formula::always(ev(p)).within(j)),
        )),
        Scope::BetweenQandR { q, r } => {
            Formula::always(Formula::implies(between(q, r), settle(r, false, j)))
        }
        Scope::AfterQUntilR { q, r } => {
            Formula::always(Formula::implies(open(q, r), settle(r, true, j)))
        }
    }
}

/// Once `P` becomes true it stays true for at least `tL` units.
pub(super) fn minimum_duration(cx: &Reducer, o: &Occurrence) -> Formula {
    let j = cx.principal(o.time_bound.as_ref(), Shape::MinTime);
    let core = Formula::implies(
        rising(&o.p),
        Formula::next(Formula::always(ev(&o.p)).within(j)),
    );
    universal(cx.scope, core, None)
}

/// Once `P` becomes true it turns false again within less than `d` units.
pub(super) fn maximum_duration(cx: &Reducer, o: &Occurrence) -> Formula {
    let j = cx.principal(o.time_bound.as_ref(), Shape::Gap);
    let core = Formula::implies(
        rising(&o.p),
        Formula::next(Formula::eventually(not_ev(&o.p)).within(j)),
    );
    universal(cx.scope, core, None)
}

/// `P` recurs with gaps of at most `d` units.
pub(super) fn recurrence(cx: &Reducer, o: &Occurrence) -> Formula {
    let j = cx.principal(o.time_bound.as_ref(), Shape::MaxGap);
    let p = &o.p;
    responsive(
        cx.scope,
        || Formula::eventually(ev(p)).within(j.clone()),
        |r| Formula::eventually(Formula::or(ev(p), ev(r))).within(j.clone()),
    )
}

/// `P ∧ ¬R`.
fn p_not_r(p: &Event, r: &Event) -> Formula {
    Formula::and(ev(p), not_ev(r))
}

/// `¬P ∧ ○P`.
fn rising(p: &Event) -> Formula {
    Formula::and(not_ev(p), Formula::next(ev(p)))
}

#[cfg(test)]
mod tests {
    use psp_model::{Pattern, TimeBound};

    use super::*;
    use crate::element::linearize;
    use crate::reduction::{reduce, Timing};
    use crate::render::Renderer;
    use crate::symbols::{LanguageDefinitions, Notation, TimeLanguageDefinitions};

    fn ev(name: &str) -> Event {
        Event::new(name, "")
    }

    fn ltl(scope: &Scope, pattern: &Pattern) -> String {
        let defs = LanguageDefinitions::ltl(Notation::Unicode);
        let f = reduce(scope, pattern, Timing::Untimed);
        linearize(
            &Renderer::new(&defs, TimeLanguageDefinitions::UNTIMED)
                .render(&f)
                .unwrap(),
        )
    }

    fn mtl(scope: &Scope, pattern: &Pattern) -> String {
        let defs = LanguageDefinitions::mtl(Notation::Unicode);
        let f = reduce(scope, pattern, Timing::Nested);
        linearize(&Renderer::new(&defs, TimeLanguageDefinitions::MTL).render(&f).unwrap())
    }

    fn before() -> Scope {
        Scope::BeforeR { r: ev("r") }
    }

    fn between_scope() -> Scope {
        Scope::BetweenQandR {
            q: ev("q"),
            r: ev("r"),
        }
    }

    fn p() -> Occurrence {
        Occurrence::new(ev("p"))
    }

    // ---------------------------------------------------------------
    // Untimed cells
    // ---------------------------------------------------------------

    #[test]
    fn universality_cells() {
        let pat = Pattern::Universality(p());
        assert_eq!(ltl(&Scope::Globally, &pat), "☐ (p)");
        assert_eq!(ltl(&before(), &pat), "(◇ (r)) → (p U r)");
        assert_eq!(
            ltl(&Scope::AfterQ { q: ev("q") }, &pat),
            "☐ (q → (☐ (p)))"
        );
        assert_eq!(
            ltl(&between_scope(), &pat),
            "☐ ((q ∧ ¬r ∧ (◇ (r))) → (p U r))"
        );
        assert_eq!(
            ltl(&Scope::AfterQUntilR { q: ev("q"), r: ev("r") }, &pat),
            "☐ ((q ∧ ¬r) → (p W r))"
        );
    }

    #[test]
    fn absence_negates_p() {
        assert_eq!(ltl(&Scope::Globally, &Pattern::Absence(p())), "☐ (¬p)");
        assert_eq!(ltl(&before(), &Pattern::Absence(p())), "(◇ (r)) → (¬p U r)");
    }

    #[test]
    fn existence_cells() {
        let pat = Pattern::Existence(p());
        assert_eq!(ltl(&Scope::Globally, &pat), "◇ (p)");
        assert_eq!(ltl(&before(), &pat), "¬r W (p ∧ ¬r)");
        assert_eq!(
            ltl(&Scope::AfterQ { q: ev("q") }, &pat),
            "(☐ (¬q)) ∨ (◇ (q ∧ (◇ (p))))"
        );
        assert_eq!(
            ltl(&Scope::AfterQUntilR { q: ev("q"), r: ev("r") }, &pat),
            "☐ ((q ∧ ¬r) → (¬r U (p ∧ ¬r)))"
        );
    }

    #[test]
    fn bounded_existence_unrolls_frequency() {
        let f = reduce(
            &Scope::Globally,
            &Pattern::bounded_existence(p(), 2).unwrap(),
            Timing::Untimed,
        );
        assert_eq!(f.weak_until_count(), 4);
        let defs = LanguageDefinitions::ltl(Notation::Unicode);
        let text = linearize(
            &Renderer::new(&defs, TimeLanguageDefinitions::UNTIMED)
                .render(&reduce(
                    &Scope::Globally,
                    &Pattern::bounded_existence(p(), 1).unwrap(),
                    Timing::Untimed,
                ))
                .unwrap(),
        );
        assert_eq!(text, "¬p W (p W (☐ (¬p)))");
    }

    #[test]
    fn bounded_existence_before_r() {
        let text = ltl(&before(), &Pattern::bounded_existence(p(), 1).unwrap());
        assert_eq!(
            text,
            "(◇ (r)) → ((¬p ∧ ¬r) U (r ∨ ((p ∧ ¬r) U (r ∨ (¬p U r)))))"
        );
    }

    #[test]
    fn recurrence_and_steady_state_untimed() {
        assert_eq!(ltl(&Scope::Globally, &Pattern::Recurrence(p())), "☐ (◇ (p))");
        assert_eq!(
            ltl(&before(), &Pattern::Recurrence(p())),
            "(◇ (r)) → ((◇ (p ∨ r)) U r)"
        );
        assert_eq!(
            ltl(&Scope::Globally, &Pattern::SteadyState(p())),
            "◇ (☐ (p))"
        );
    }

    // ---------------------------------------------------------------
    // Timed cells
    // ---------------------------------------------------------------

    #[test]
    fn universality_mtl_prints_unbounded_principal() {
        assert_eq!(
            mtl(&Scope::Globally, &Pattern::Universality(Occurrence::new(ev("pEvent(p)")))),
            "☐[0,∞) (pEvent(p))"
        );
        assert_eq!(
            mtl(&before(), &Pattern::Universality(p())),
            "(◇ (r)) → (p U[0,∞) r)"
        );
    }

    #[test]
    fn transient_state_uses_trigger() {
        let pat = Pattern::TransientState(p().with_time_bound(TimeBound::interval(2, 6)));
        assert_eq!(mtl(&Scope::Globally, &pat), "◇[4,4] (p)");
    }

    #[test]
    fn minimum_and_maximum_duration() {
        let min = Pattern::MinimumDuration(p().with_time_bound(TimeBound::lower(3)));
        assert_eq!(
            mtl(&Scope::Globally, &min),
            "☐ ((¬p ∧ (○ (p))) → (○ (☐[0,3] (p))))"
        );
        let max = Pattern::MaximumDuration(p().with_time_bound(TimeBound::upper(5)));
        assert_eq!(
            mtl(&Scope::Globally, &max),
            "☐ ((¬p ∧ (○ (p))) → (○ (◇[0,5) (¬p))))"
        );
    }

    #[test]
    fn recurrence_and_steady_state_timed() {
        let rec = Pattern::Recurrence(p().with_time_bound(TimeBound::upper(10)));
        assert_eq!(mtl(&Scope::Globally, &rec), "☐ (◇[0,10] (p))");
        let steady = Pattern::SteadyState(p().with_time_bound(TimeBound::interval(1, 4)));
        assert_eq!(mtl(&Scope::Globally, &steady), "◇ (☐[3,∞) (p))");
    }
}
