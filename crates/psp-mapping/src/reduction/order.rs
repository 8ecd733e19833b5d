//! Order patterns relating `P` and `S`. An optional constraint `Z` must not
//! hold while the pattern waits for its next event.

use psp_model::{Order, Scope};

use super::{
    after_first, between, ev, guarded, not_ev, open, responsive, wait, Reducer, Shape,
};
use crate::formula::{Bound, Formula};

/// `¬Z`, if the order carries a constraint.
pub(super) fn constraint(o: &Order) -> Option<Formula> {
    o.constraint.as_ref().map(|c| not_ev(&c.event))
}

/// Shared shape of precedence and until: `lhs` holds while waiting for `S`
/// (or for the closing anchor).
fn waiting(scope: &Scope, lhs: Formula, o: &Order, i: Option<Bound>, weak_global: bool) -> Formula {
    let global = |lhs: Formula, i: Option<Bound>| {
        if weak_global {
            Formula::weak_until(lhs, ev(&o.s)).within(i)
        } else {
            Formula::until(lhs, ev(&o.s)).within(i)
        }
    };
    match scope {
        Scope::Globally => global(lhs, i),
        Scope::BeforeR { r } => Formula::implies(
            Formula::eventually(ev(r)),
            Formula::until(lhs, Formula::or(ev(&o.s), ev(r))).within(i),
        ),
        Scope::AfterQ { q } => after_first(q, global(lhs, i)),
        Scope::BetweenQandR { q, r } => Formula::always(Formula::implies(
            between(q, r),
            Formula::until(lhs, Formula::or(ev(&o.s), ev(r))).within(i),
        )),
        Scope::AfterQUntilR { q, r } => Formula::always(Formula::implies(
            open(q, r),
            Formula::weak_until(lhs, Formula::or(ev(&o.s), ev(r))).within(i),
        )),
    }
}

/// `S` precedes `P`.
pub(super) fn precedence(cx: &Reducer, o: &Order) -> Formula {
    let i = cx.principal(o.time_bound.as_ref(), Shape::Time);
    let z = constraint(o);
    waiting(cx.scope, guarded(not_ev(&o.p), z.as_ref()), o, i, true)
}

/// `P` holds without interruption until `S`.
pub(super) fn until(cx: &Reducer, o: &Order) -> Formula {
    let i = cx.principal(o.time_bound.as_ref(), Shape::Time);
    let z = constraint(o);
    waiting(cx.scope, guarded(ev(&o.p), z.as_ref()), o, i, false)
}

/// `S` responds to `P`.
pub(super) fn response(cx: &Reducer, o: &Order) -> Formula {
    let i = cx.principal(o.time_bound.as_ref(), Shape::Time);
    let z = constraint(o);
    responsive(
        cx.scope,
        || Formula::implies(ev(&o.p), wait(z.clone(), i.clone(), ev(&o.s))),
        |r| {
            Formula::implies(
                ev(&o.p),
                wait(
                    Some(guarded(not_ev(r), z.as_ref())),
                    i.clone(),
                    Formula::and(ev(&o.s), not_ev(r)),
                ),
            )
        },
    )
}

/// After `P`, `S` holds continually.
pub(super) fn response_invariance(cx: &Reducer, o: &Order) -> Formula {
    let i = cx.principal(o.time_bound.as_ref(), Shape::Time);
    let s = guarded(ev(&o.s), constraint(o).as_ref());
    responsive(
        cx.scope,
        || Formula::implies(ev(&o.p), Formula::always(s.clone()).within(i.clone())),
        |r| {
            Formula::implies(
                ev(&o.p),
                Formula::until(s.clone(), ev(r)).within(i.clone()),
            )
        },
    )
}
