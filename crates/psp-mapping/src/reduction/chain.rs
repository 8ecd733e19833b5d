//! Chain patterns: `S` is followed by the links `T1..Tn`.
//!
//! A chain renders as nested waits `○(g U[Ii] (Ti ∧ g ∧ ○(...)))`, where the
//! guard `g` keeps the chain inside its scope (or ahead of `P` for precedence
//! chains). The last link closes onto an optional tail formula.

use psp_model::{ChainEvent, ChainOrder, Event, Scope};

use super::order::constraint;
use super::{after_first, ev, guarded, not_ev, open, responsive, wait, Reducer, Shape, Window};
use crate::formula::{Bound, Formula};

struct Links<'a> {
    cx: &'a Reducer<'a>,
    guard: Option<Formula>,
    annotate: bool,
    /// Overrides the annotation of the last link.
    closing: Option<Bound>,
}

impl Links<'_> {
    /// The chain starting at `link`, closing onto `tail` after the last link.
    fn build(&self, link: &ChainEvent, rest: &[ChainEvent], tail: Option<Formula>) -> Formula {
        let continuation = match rest.split_first() {
            Some((next, more)) => Some(Formula::next(self.build(next, more, tail))),
            None => tail,
        };
        let target = match continuation {
            Some(c) => Formula::conj(ev(&link.event), self.guard.clone().into_iter().chain([c])),
            None => ev(&link.event),
        };
        let link_guard = link.constraint.as_ref().map(|c| not_ev(&c.event));
        let wait_guard = match (self.guard.clone(), link_guard) {
            (Some(g), Some(z)) => Some(Formula::and(g, z)),
            (g, z) => g.or(z),
        };
        let bound = match (&self.closing, rest.is_empty()) {
            (Some(window), true) => Some(window.clone()),
            _ if self.annotate => self.cx.link(link),
            _ => None,
        };
        wait(wait_guard, bound, target)
    }

    fn closing(mut self, window: Option<Bound>) -> Self {
        self.closing = window;
        self
    }

    /// `○(chain)` over every link of `chain`.
    fn after(&self, chain: &ChainOrder, tail: Option<Formula>) -> Formula {
        let links = &chain.links;
        let head = links.iter().next();
        match head {
            Some(first) => {
                let rest: Vec<ChainEvent> = links.iter().skip(1).cloned().collect();
                Formula::next(self.build(first, &rest, tail))
            }
            // Chains are never empty; an empty one degenerates to its tail.
            None => tail.unwrap_or_else(|| ev(&chain.order.s)),
        }
    }
}

fn links<'a>(cx: &'a Reducer<'a>, guard: Option<Formula>, annotate: bool) -> Links<'a> {
    Links {
        cx,
        guard,
        annotate,
        closing: None,
    }
}

/// `P` precedes the chain `S, T1..Tn`.
pub(super) fn precedence_chain_1n(cx: &Reducer, c: &ChainOrder) -> Formula {
    let o = &c.order;
    let i = cx.precedence_chain_principal(o, &c.links);
    let z = constraint(o);
    let annotate = cx.annotates_links();
    let free = || {
        Formula::and(
            ev(&o.s),
            links(cx, None, annotate).after(c, None),
        )
    };
    let bounded = |r: &Event| {
        Formula::conj(
            ev(&o.s),
            [not_ev(r), links(cx, Some(not_ev(r)), annotate).after(c, None)],
        )
    };
    let global = || {
        Formula::implies(
            Formula::eventually(free()),
            Formula::until(guarded(not_ev(&o.s), z.as_ref()), ev(&o.p)).within(i.clone()),
        )
    };
    match cx.scope {
        Scope::Globally => global(),
        Scope::BeforeR { r } => Formula::implies(
            Formula::eventually(ev(r)),
            Formula::until(
                guarded(Formula::not(bounded(r)), z.as_ref()),
                Formula::or(ev(r), ev(&o.p)),
            )
            .within(i.clone()),
        ),
        Scope::AfterQ { q } => after_first(q, global()),
        Scope::BetweenQandR { q, r } => Formula::always(Formula::implies(
            Formula::and(ev(q), Formula::eventually(ev(r))),
            Formula::until(
                guarded(Formula::not(bounded(r)), z.as_ref()),
                Formula::or(ev(r), ev(&o.p)),
            )
            .within(i.clone()),
        )),
        Scope::AfterQUntilR { q, r } => Formula::always(Formula::implies(
            open(q, r),
            Formula::weak_until(
                guarded(Formula::not(bounded(r)), z.as_ref()),
                Formula::or(ev(r), ev(&o.p)),
            )
            .within(i.clone()),
        )),
    }
}

/// The chain `S, T1..Tn` precedes `P`.
pub(super) fn precedence_chain_n1(cx: &Reducer, c: &ChainOrder) -> Formula {
    let o = &c.order;
    let i = cx.precedence_chain_principal(o, &c.links);
    let not_p = guarded(not_ev(&o.p), constraint(o).as_ref());
    let chain = Formula::conj(
        ev(&o.s),
        [
            not_ev(&o.p),
            links(cx, Some(not_ev(&o.p)), cx.annotates_links()).after(c, None),
        ],
    );
    let global = || {
        Formula::implies(
            Formula::eventually(ev(&o.p)),
            Formula::until(not_p.clone(), chain.clone()).within(i.clone()),
        )
    };
    let closed = |r: &Event, weak: bool| {
        let rhs = Formula::or(ev(r), chain.clone());
        if weak {
            Formula::weak_until(not_p.clone(), rhs).within(i.clone())
        } else {
            Formula::until(not_p.clone(), rhs).within(i.clone())
        }
    };
    match cx.scope {
        Scope::Globally => global(),
        Scope::BeforeR { r } => Formula::implies(Formula::eventually(ev(r)), closed(r, false)),
        Scope::AfterQ { q } => after_first(q, global()),
        Scope::BetweenQandR { q, r } => Formula::always(Formula::implies(
            Formula::and(ev(q), Formula::eventually(ev(r))),
            closed(r, false),
        )),
        Scope::AfterQUntilR { q, r } => {
            Formula::always(Formula::implies(open(q, r), closed(r, true)))
        }
    }
}

/// `P` is answered by the chain `S, T1..Tn`.
pub(super) fn response_chain_1n(cx: &Reducer, c: &ChainOrder) -> Formula {
    let o = &c.order;
    let i = cx.principal(o.time_bound.as_ref(), Shape::Time);
    let window = cx.chain_window(o, &c.links, Window::CauseToEffects);
    let z = constraint(o);
    let annotate = cx.annotates_links();
    let effects = |guard: Option<Formula>| links(cx, guard, annotate).closing(window.clone());
    responsive(
        cx.scope,
        || {
            let target = Formula::and(ev(&o.s), effects(None).after(c, None));
            Formula::implies(ev(&o.p), wait(z.clone(), i.clone(), target))
        },
        |r| {
            let target = Formula::conj(
                ev(&o.s),
                [
                    not_ev(r),
                    effects(Some(not_ev(r))).after(c, None),
                ],
            );
            Formula::implies(
                ev(&o.p),
                wait(Some(guarded(not_ev(r), z.as_ref())), i.clone(), target),
            )
        },
    )
}

/// The chain `S, T1..Tn` is answered by `P`.
pub(super) fn response_chain_n1(cx: &Reducer, c: &ChainOrder) -> Formula {
    let o = &c.order;
    let i = cx
        .chain_window(o, &c.links, Window::CausesToEffect)
        .or_else(|| cx.principal(o.time_bound.as_ref(), Shape::Time));
    let z = constraint(o);
    let annotate = cx.annotates_links();
    let cell = |guard: Option<Formula>| {
        let trigger = Formula::and(
            ev(&o.s),
            links(cx, guard.clone(), false).after(c, None),
        );
        let tail_guard = match &guard {
            Some(g) => Some(guarded(g.clone(), z.as_ref())),
            None => z.clone(),
        };
        let tail = wait(tail_guard, i.clone(), ev(&o.p));
        Formula::implies(trigger, links(cx, guard, annotate).after(c, Some(tail)))
    };
    responsive(cx.scope, || cell(None), |r| cell(Some(not_ev(r))))
}
