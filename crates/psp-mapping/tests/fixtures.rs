//! Literal translations pinned per target logic.

use psp_mapping::{
    duration, MapperRegistry, RegistryOptions, TargetLogic, TranslationOutcome,
};
use psp_model::{Event, Occurrence, Order, Pattern, Scope, TimeBound};

fn registry() -> MapperRegistry {
    MapperRegistry::new(RegistryOptions::default()).unwrap()
}

fn p() -> Event {
    Event::new("pEvent(p)", "p holds")
}

fn mapped(outcome: TranslationOutcome) -> (String, String, Option<String>) {
    match outcome {
        TranslationOutcome::Mapped {
            seg,
            mapping,
            mapping_error,
        } => (seg, mapping, mapping_error),
        other => panic!("expected a mapping, got {other:?}"),
    }
}

// ---------------------------------------------------------------
// Globally / Universality
// ---------------------------------------------------------------

const SEG: &str = "Globally, it is always the case that {pEvent(p)} [holds].";

#[test]
fn universality_seg() {
    let (seg, mapping, error) = mapped(
        registry()
            .translate(TargetLogic::Sel, &Scope::Globally, &Pattern::Universality(Occurrence::new(p())))
            .unwrap(),
    );
    assert_eq!(seg, SEG);
    assert_eq!(mapping, SEG);
    assert_eq!(error, None);
}

#[test]
fn universality_ltl() {
    let (seg, mapping, error) = mapped(
        registry()
            .translate(TargetLogic::Ltl, &Scope::Globally, &Pattern::Universality(Occurrence::new(p())))
            .unwrap(),
    );
    assert_eq!(seg, SEG);
    assert_eq!(mapping, "☐ (pEvent(p))");
    assert_eq!(error, None);
}

#[test]
fn universality_mtl_inserts_the_unbounded_interval() {
    let (seg, mapping, error) = mapped(
        registry()
            .translate(TargetLogic::Mtl, &Scope::Globally, &Pattern::Universality(Occurrence::new(p())))
            .unwrap(),
    );
    assert_eq!(seg, SEG);
    assert_eq!(mapping, "☐[0,∞) (pEvent(p))");
    assert_eq!(error, None);
}

// ---------------------------------------------------------------
// Capability limits versus mapping errors
// ---------------------------------------------------------------

#[test]
fn prism_bounded_existence_is_unsupported() {
    let pattern = Pattern::bounded_existence(Occurrence::new(p()), 1).unwrap();
    let outcome = registry()
        .translate(TargetLogic::Prism, &Scope::Globally, &pattern)
        .unwrap();
    assert_eq!(
        outcome,
        TranslationOutcome::Unsupported {
            seg: "Globally, {pEvent(p)} [holds] at most 1 times.".into(),
            error: "Mapping not supported for Prism Property Specification.".into(),
        }
    );
}

#[test]
fn ltl_capability_limits_have_no_error() {
    let registry = registry();
    let mapper = registry.mapper(TargetLogic::Ltl).unwrap();
    let occ = Occurrence::new(p());
    let cases = [
        ("BoundedExistence", Pattern::bounded_existence(occ.clone(), 3).unwrap()),
        ("TransientState", Pattern::TransientState(occ.clone())),
        ("SteadyState", Pattern::SteadyState(occ.clone())),
        ("MinimumDuration", Pattern::MinimumDuration(occ.clone())),
        ("MaximumDuration", Pattern::MaximumDuration(occ)),
    ];
    for (name, pattern) in cases {
        let m = mapper.get_mapping(&Scope::Globally, &pattern).unwrap();
        assert_eq!(m.formula, "", "{name}");
        assert!(!m.has_mapping_error_occurred(), "{name}");
    }
}

#[test]
fn reversed_interval_flags_gap_and_maxgap() {
    let reversed = TimeBound::interval(9, 3);
    assert!(duration::gap(&reversed).is_err());
    assert!(duration::maxgap(&reversed).is_err());

    let registry = registry();
    for pattern in [
        Pattern::MaximumDuration(Occurrence::new(p()).with_time_bound(reversed.clone())),
        Pattern::Recurrence(Occurrence::new(p()).with_time_bound(reversed.clone())),
    ] {
        let (_, _, error) = mapped(
            registry
                .translate(TargetLogic::Mtl, &Scope::Globally, &pattern)
                .unwrap(),
        );
        assert!(error.is_some(), "{}", pattern.kind());
    }
}

#[test]
fn unbounded_upper_limit_prints_the_infinity_symbol() {
    let defs = psp_mapping::LanguageDefinitions::mtl(psp_mapping::Notation::Ascii);
    assert_eq!(
        duration::t_u(&TimeBound::upper_unbounded(), &defs).unwrap(),
        "inf"
    );
    assert_eq!(
        duration::t_u(&TimeBound::lower(3), &defs).unwrap(),
        "inf"
    );
}

// ---------------------------------------------------------------
// Scoped order patterns
// ---------------------------------------------------------------

#[test]
fn between_response_in_every_logic() {
    let scope = Scope::BetweenQandR {
        q: Event::new("q", ""),
        r: Event::new("r", ""),
    };
    let pattern = Pattern::Response(
        Order::new(Event::new("p", ""), Event::new("s", "")).with_time_bound(TimeBound::upper(5)),
    );
    let registry = registry();
    let expect = [
        (TargetLogic::Mtl, "☐ ((q ∧ ¬r ∧ (◇ (r))) → ((p → (¬r U[0,5] (s ∧ ¬r))) U r))"),
        (TargetLogic::Tbv, "G ((q && !r && (F (r))) -> ((p -> (!r U[0,5] (s && !r))) U r))"),
        (TargetLogic::Prism, "P>=1 [ G ((q & !r & (F (r))) => ((p => (!r U<=5 (s & !r))) U r)) ]"),
    ];
    for (target, formula) in expect {
        let (_, mapping, error) = mapped(registry.translate(target, &scope, &pattern).unwrap());
        assert_eq!(mapping, formula, "{target}");
        assert_eq!(error, None, "{target}");
    }
    let (_, mapping, error) =
        mapped(registry.translate(TargetLogic::Ltl, &scope, &pattern).unwrap());
    assert_eq!(mapping, "☐ ((q ∧ ¬r ∧ (◇ (r))) → ((p → (¬r U (s ∧ ¬r))) U r))");
    assert_eq!(error.as_deref(), Some("LTL cannot express time bounds"));
}

#[test]
fn after_until_precedence_substitutes_weak_until() {
    let scope = Scope::AfterQUntilR {
        q: Event::new("q", ""),
        r: Event::new("r", ""),
    };
    let pattern = Pattern::Precedence(Order::new(Event::new("p", ""), Event::new("s", "")));
    let (_, mapping, _) = mapped(
        registry()
            .translate(TargetLogic::Tbv, &scope, &pattern)
            .unwrap(),
    );
    assert_eq!(
        mapping,
        "G ((q && !r) -> ((!p U (s || r)) || G !p))"
    );
}
