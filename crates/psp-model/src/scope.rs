use std::fmt;
use std::str::FromStr;

use crate::errors::ModelError;
use crate::event::Event;

/// Fieldless mirror of [`Scope`], used for capability queries and wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum ScopeKind {
    Globally,
    BeforeR,
    AfterQ,
    BetweenQandR,
    AfterQUntilR,
}

impl ScopeKind {
    pub const ALL: [ScopeKind; 5] = [
        ScopeKind::Globally,
        ScopeKind::BeforeR,
        ScopeKind::AfterQ,
        ScopeKind::BetweenQandR,
        ScopeKind::AfterQUntilR,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ScopeKind::Globally => "Globally",
            ScopeKind::BeforeR => "BeforeR",
            ScopeKind::AfterQ => "AfterQ",
            ScopeKind::BetweenQandR => "BetweenQandR",
            ScopeKind::AfterQUntilR => "AfterQUntilR",
        }
    }

    /// Number of anchor events the scope takes.
    pub fn arity(self) -> usize {
        match self {
            ScopeKind::Globally => 0,
            ScopeKind::BeforeR | ScopeKind::AfterQ => 1,
            ScopeKind::BetweenQandR | ScopeKind::AfterQUntilR => 2,
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ScopeKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScopeKind::ALL
            .into_iter()
            .find(|k| k.tag() == s)
            .ok_or_else(|| ModelError::unsupported("scope", s))
    }
}

/// Temporal window within which a pattern must hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Scope {
    Globally,
    BeforeR { r: Event },
    AfterQ { q: Event },
    BetweenQandR { q: Event, r: Event },
    AfterQUntilR { q: Event, r: Event },
}

impl Scope {
    /// Build a scope from its kind and anchor events, `Q` before `R`.
    pub fn from_events(kind: ScopeKind, events: Vec<Event>) -> Result<Self, ModelError> {
        if events.len() != kind.arity() {
            return Err(ModelError::ScopeArity {
                scope: kind.tag().to_string(),
                expected: kind.arity(),
                found: events.len(),
            });
        }
        let mut it = events.into_iter();
        let mut next = || it.next().ok_or(ModelError::ScopeArity {
            scope: kind.tag().to_string(),
            expected: kind.arity(),
            found: 0,
        });
        Ok(match kind {
            ScopeKind::Globally => Scope::Globally,
            ScopeKind::BeforeR => Scope::BeforeR { r: next()? },
            ScopeKind::AfterQ => Scope::AfterQ { q: next()? },
            ScopeKind::BetweenQandR => Scope::BetweenQandR {
                q: next()?,
                r: next()?,
            },
            ScopeKind::AfterQUntilR => Scope::AfterQUntilR {
                q: next()?,
                r: next()?,
            },
        })
    }

    pub fn kind(&self) -> ScopeKind {
        match self {
            Scope::Globally => ScopeKind::Globally,
            Scope::BeforeR { .. } => ScopeKind::BeforeR,
            Scope::AfterQ { .. } => ScopeKind::AfterQ,
            Scope::BetweenQandR { .. } => ScopeKind::BetweenQandR,
            Scope::AfterQUntilR { .. } => ScopeKind::AfterQUntilR,
        }
    }

    /// Opening anchor, if the scope has one.
    pub fn q(&self) -> Option<&Event> {
        match self {
            Scope::AfterQ { q } | Scope::BetweenQandR { q, .. } | Scope::AfterQUntilR { q, .. } => {
                Some(q)
            }
            Scope::Globally | Scope::BeforeR { .. } => None,
        }
    }

    /// Closing anchor, if the scope has one.
    pub fn r(&self) -> Option<&Event> {
        match self {
            Scope::BeforeR { r } | Scope::BetweenQandR { r, .. } | Scope::AfterQUntilR { r, .. } => {
                Some(r)
            }
            Scope::Globally | Scope::AfterQ { .. } => None,
        }
    }

    pub fn specification_as_sel(&self) -> String {
        match self {
            Scope::Globally => "Globally".to_string(),
            Scope::BeforeR { r } => format!("Before {}", r.sel()),
            Scope::AfterQ { q } => format!("After {}", q.sel()),
            Scope::BetweenQandR { q, r } => format!("Between {} and {}", q.sel(), r.sel()),
            Scope::AfterQUntilR { q, r } => format!("After {} until {}", q.sel(), r.sel()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(name: &str) -> Event {
        Event::new(name, "")
    }

    // ---------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------

    #[test]
    fn from_events_checks_arity() {
        let err = Scope::from_events(ScopeKind::BetweenQandR, vec![ev("q")]).unwrap_err();
        assert_eq!(
            err,
            ModelError::ScopeArity {
                scope: "BetweenQandR".into(),
                expected: 2,
                found: 1
            }
        );
        assert!(Scope::from_events(ScopeKind::Globally, vec![ev("x")]).is_err());
    }

    #[test]
    fn from_events_orders_q_before_r() {
        let s = Scope::from_events(ScopeKind::AfterQUntilR, vec![ev("q"), ev("r")]).unwrap();
        assert_eq!(s.q().map(|e| e.name.as_str()), Some("q"));
        assert_eq!(s.r().map(|e| e.name.as_str()), Some("r"));
        assert_eq!(s.kind(), ScopeKind::AfterQUntilR);
    }

    #[test]
    fn kind_tags_round_trip() {
        for kind in ScopeKind::ALL {
            assert_eq!(kind.tag().parse::<ScopeKind>().unwrap(), kind);
        }
        let err = "Sometimes".parse::<ScopeKind>().unwrap_err();
        assert!(err.is_unsupported_type());
    }

    // ---------------------------------------------------------------
    // Structured English
    // ---------------------------------------------------------------

    #[test]
    fn sel_phrases() {
        assert_eq!(Scope::Globally.specification_as_sel(), "Globally");
        assert_eq!(
            Scope::BeforeR { r: ev("r") }.specification_as_sel(),
            "Before {r}"
        );
        assert_eq!(
            Scope::AfterQ { q: ev("q") }.specification_as_sel(),
            "After {q}"
        );
        assert_eq!(
            Scope::BetweenQandR { q: ev("q"), r: ev("r") }.specification_as_sel(),
            "Between {q} and {r}"
        );
        assert_eq!(
            Scope::AfterQUntilR { q: ev("q"), r: ev("r") }.specification_as_sel(),
            "After {q} until {r}"
        );
    }
}
