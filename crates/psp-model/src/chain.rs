use crate::errors::ModelError;
use crate::event::{Event, EventConstraint};
use crate::time::TimeBound;

/// One link of an event chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ChainEvent {
    pub event: Event,
    pub constraint: Option<EventConstraint>,
    /// Bound relative to the previous link of the chain.
    pub time_bound: Option<TimeBound>,
}

impl ChainEvent {
    pub fn new(event: Event) -> Self {
        Self {
            event,
            constraint: None,
            time_bound: None,
        }
    }

    pub fn with_constraint(mut self, constraint: EventConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn with_time_bound(mut self, bound: TimeBound) -> Self {
        self.time_bound = Some(bound);
        self
    }

    /// Optional bound and constraint phrases, each prefixed by a space.
    pub(crate) fn decorations_sel(&self) -> String {
        let mut out = String::new();
        if let Some(tb) = &self.time_bound {
            out.push(' ');
            out.push_str(&tb.sel());
        }
        if let Some(c) = &self.constraint {
            out.push(' ');
            out.push_str(&c.sel());
        }
        out
    }
}

/// Ordered, non-empty sequence of chain links.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ChainEvents(Vec<ChainEvent>);

impl ChainEvents {
    pub fn new(links: Vec<ChainEvent>) -> Result<Self, ModelError> {
        if links.is_empty() {
            return Err(ModelError::EmptyChain);
        }
        Ok(Self(links))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChainEvent> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChainEvent> {
        self.0.iter()
    }

    pub fn last(&self) -> &ChainEvent {
        // Non-empty by construction.
        &self.0[self.0.len() - 1]
    }

    /// Whether any link carries a time bound.
    pub fn is_timed(&self) -> bool {
        self.0.iter().any(|l| l.time_bound.is_some())
    }
}

impl<'a> IntoIterator for &'a ChainEvents {
    type Item = &'a ChainEvent;
    type IntoIter = std::slice::Iter<'a, ChainEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chain_is_rejected() {
        assert_eq!(ChainEvents::new(vec![]), Err(ModelError::EmptyChain));
    }

    #[test]
    fn order_is_preserved() {
        let chain = ChainEvents::new(vec![
            ChainEvent::new(Event::new("t1", "")),
            ChainEvent::new(Event::new("t2", "")).with_time_bound(TimeBound::upper(4)),
        ])
        .unwrap();
        let names: Vec<_> = chain.iter().map(|l| l.event.name.as_str()).collect();
        assert_eq!(names, ["t1", "t2"]);
        assert_eq!(chain.last().event.name, "t2");
        assert!(chain.is_timed());
    }

    #[test]
    fn decorations_sel_lists_bound_then_constraint() {
        let link = ChainEvent::new(Event::new("t", ""))
            .with_time_bound(TimeBound::upper(3))
            .with_constraint(EventConstraint::new(Event::new("z", "")));
        assert_eq!(
            link.decorations_sel(),
            " within 3 time units without {z} [holding] in between"
        );
    }
}
