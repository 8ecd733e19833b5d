//! Proptest strategies for generating well-formed events, scopes and patterns.

use proptest::prelude::*;

use crate::chain::{ChainEvent, ChainEvents};
use crate::event::{Event, EventConstraint};
use crate::pattern::{ChainOrder, Occurrence, Order, Pattern, PatternKind};
use crate::probability::{ProbabilityBound, ProbabilityComparison};
use crate::scope::{Scope, ScopeKind};
use crate::time::TimeBound;

/// Event names are short lowercase identifiers, optionally wrapped in a
/// predicate call such as `pEvent(p)`.
pub fn arb_event() -> impl Strategy<Value = Event> {
    ("[a-z][a-z0-9_]{0,6}", any::<bool>()).prop_map(|(name, wrapped)| {
        let name = if wrapped {
            format!("pEvent({name})")
        } else {
            name
        };
        Event::new(name.clone(), format!("{name} holds"))
    })
}

pub fn arb_scope() -> impl Strategy<Value = Scope> {
    (
        prop::sample::select(ScopeKind::ALL.to_vec()),
        proptest::collection::vec(arb_event(), 2..=2),
    )
        .prop_map(|(kind, mut events)| {
            events.truncate(kind.arity());
            // Arity is matched above, so construction cannot fail.
            Scope::from_events(kind, events).unwrap_or(Scope::Globally)
        })
}

pub fn arb_time_bound() -> impl Strategy<Value = TimeBound> {
    prop_oneof![
        (0..50u64).prop_map(TimeBound::upper),
        (0..50u64).prop_map(TimeBound::lower),
        (0..20u64, 0..30u64).prop_map(|(l, w)| TimeBound::interval(l, l + w)),
        Just(TimeBound::upper_unbounded()),
    ]
}

pub fn arb_probability() -> impl Strategy<Value = ProbabilityBound> {
    (
        prop_oneof![
            Just(ProbabilityComparison::Lower),
            Just(ProbabilityComparison::LowerEqual),
            Just(ProbabilityComparison::Greater),
            Just(ProbabilityComparison::GreaterEqual),
        ],
        0..=100u32,
    )
        .prop_map(|(cmp, pct)| {
            ProbabilityBound::new(cmp, f64::from(pct) / 100.0)
                .unwrap_or_else(|_| unreachable!("percentages stay within [0, 1]"))
        })
}

/// Occurrence patterns without any time or probability bound.
pub fn arb_unbounded_occurrence_pattern() -> impl Strategy<Value = Pattern> {
    (
        prop::sample::select(
            PatternKind::ALL
                .iter()
                .copied()
                .filter(|k| k.family() == crate::pattern::PatternFamily::Occurrence)
                .collect::<Vec<_>>(),
        ),
        arb_event(),
        1..5u32,
    )
        .prop_map(|(kind, p, frequency)| occurrence_pattern(kind, Occurrence::new(p), frequency))
}

/// Occurrence patterns with optional time and probability bounds.
pub fn arb_occurrence_pattern() -> impl Strategy<Value = Pattern> {
    (
        arb_unbounded_occurrence_pattern(),
        proptest::option::of(arb_time_bound()),
        proptest::option::of(arb_probability()),
    )
        .prop_map(|(pattern, tb, prob)| {
            let frequency = match &pattern {
                Pattern::BoundedExistence { frequency, .. } => *frequency,
                _ => 1,
            };
            let kind = pattern.kind();
            let mut occ = match pattern.as_occurrence() {
                Some(o) => o.clone(),
                None => return pattern,
            };
            occ.time_bound = tb;
            occ.probability = prob;
            occurrence_pattern(kind, occ, frequency)
        })
}

fn arb_chain_event() -> impl Strategy<Value = ChainEvent> {
    (
        arb_event(),
        proptest::option::of(arb_event()),
        proptest::option::of(arb_time_bound()),
    )
        .prop_map(|(event, z, tb)| ChainEvent {
            event,
            constraint: z.map(EventConstraint::new),
            time_bound: tb,
        })
}

pub fn arb_order() -> impl Strategy<Value = Order> {
    (
        arb_event(),
        arb_event(),
        proptest::option::of(arb_event()),
        proptest::option::of(arb_time_bound()),
    )
        .prop_map(|(p, s, z, tb)| Order {
            p,
            s,
            constraint: z.map(EventConstraint::new),
            time_bound: tb,
            probability: None,
        })
}

/// Order and chain patterns, chains of one to three links.
pub fn arb_order_pattern() -> impl Strategy<Value = Pattern> {
    (
        prop::sample::select(
            PatternKind::ALL
                .iter()
                .copied()
                .filter(|k| k.family() != crate::pattern::PatternFamily::Occurrence)
                .collect::<Vec<_>>(),
        ),
        arb_order(),
        proptest::collection::vec(arb_chain_event(), 1..=3),
    )
        .prop_map(|(kind, order, links)| {
            let built = match ChainEvents::new(links) {
                Ok(links) if kind.family() == crate::pattern::PatternFamily::Chain => {
                    Pattern::chain(kind, ChainOrder::new(order.clone(), links))
                }
                _ => Pattern::order(kind, order.clone()),
            };
            built.unwrap_or(Pattern::Response(order))
        })
}

pub fn arb_pattern() -> impl Strategy<Value = Pattern> {
    prop_oneof![arb_occurrence_pattern(), arb_order_pattern()]
}

fn occurrence_pattern(kind: PatternKind, occ: Occurrence, frequency: u32) -> Pattern {
    if kind == PatternKind::BoundedExistence {
        return Pattern::BoundedExistence {
            occurrence: occ,
            frequency: frequency.max(1),
        };
    }
    Pattern::occurrence(kind, occ.clone()).unwrap_or(Pattern::Universality(occ))
}
