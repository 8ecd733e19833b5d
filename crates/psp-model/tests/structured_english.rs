use psp_model::*;

fn p() -> Event {
    Event::new("pEvent(p)", "p holds")
}

#[test]
fn globally_universality() {
    let sel = format!(
        "{}, {}.",
        Scope::Globally.specification_as_sel(),
        Pattern::Universality(Occurrence::new(p())).specification_as_sel()
    );
    assert_eq!(sel, "Globally, it is always the case that {pEvent(p)} [holds].");
}

#[test]
fn globally_bounded_existence() {
    let pattern = Pattern::bounded_existence(Occurrence::new(p()), 1).unwrap();
    assert_eq!(
        format!(
            "{}, {}.",
            Scope::Globally.specification_as_sel(),
            pattern.specification_as_sel()
        ),
        "Globally, {pEvent(p)} [holds] at most 1 times."
    );
}

#[test]
fn between_precedence_with_interval() {
    let scope = Scope::from_events(
        ScopeKind::BetweenQandR,
        vec![Event::new("q", ""), Event::new("r", "")],
    )
    .unwrap();
    let pattern = Pattern::Precedence(
        Order::new(p(), Event::new("s", "")).with_time_bound(TimeBound::interval(1, 3)),
    );
    assert_eq!(
        format!(
            "{}, {}.",
            scope.specification_as_sel(),
            pattern.specification_as_sel()
        ),
        "Between {q} and {r}, if {pEvent(p)} [holds] then it must have been the case that {s} [has occurred] before {pEvent(p)} [holds] between 1 and 3 time units."
    );
}
