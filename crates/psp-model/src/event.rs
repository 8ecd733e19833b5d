/// An atomic proposition referenced by scopes and patterns.
///
/// `name` is what formulas and the structured English print; `specification`
/// is the human description the proposition was elicited from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Event {
    pub name: String,
    pub specification: String,
}

impl Event {
    pub fn new(name: impl Into<String>, specification: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specification: specification.into(),
        }
    }

    /// The `{name}` placeholder used in structured English.
    pub fn sel(&self) -> String {
        format!("{{{}}}", self.name)
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Guard event that must not hold while a pattern waits for its next event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct EventConstraint {
    pub event: Event,
}

impl EventConstraint {
    pub fn new(event: Event) -> Self {
        Self { event }
    }

    pub fn sel(&self) -> String {
        format!("without {} [holding] in between", self.event.sel())
    }
}
