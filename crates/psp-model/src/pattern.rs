use std::fmt;
use std::str::FromStr;

use crate::chain::{ChainEvent, ChainEvents};
use crate::errors::ModelError;
use crate::event::{Event, EventConstraint};
use crate::probability::ProbabilityBound;
use crate::time::{Duration, TimeBound};

/// Fieldless mirror of [`Pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum PatternKind {
    Universality,
    Absence,
    Existence,
    BoundedExistence,
    TransientState,
    SteadyState,
    MinimumDuration,
    MaximumDuration,
    Recurrence,
    Precedence,
    PrecedenceChain1N,
    PrecedenceChainN1,
    Until,
    Response,
    ResponseChain1N,
    ResponseChainN1,
    ResponseInvariance,
}

/// Payload family a [`PatternKind`] is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFamily {
    Occurrence,
    Order,
    Chain,
}

impl PatternKind {
    pub const ALL: [PatternKind; 17] = [
        PatternKind::Universality,
        PatternKind::Absence,
        PatternKind::Existence,
        PatternKind::BoundedExistence,
        PatternKind::TransientState,
        PatternKind::SteadyState,
        PatternKind::MinimumDuration,
        PatternKind::MaximumDuration,
        PatternKind::Recurrence,
        PatternKind::Precedence,
        PatternKind::PrecedenceChain1N,
        PatternKind::PrecedenceChainN1,
        PatternKind::Until,
        PatternKind::Response,
        PatternKind::ResponseChain1N,
        PatternKind::ResponseChainN1,
        PatternKind::ResponseInvariance,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            PatternKind::Universality => "Universality",
            PatternKind::Absence => "Absence",
            PatternKind::Existence => "Existence",
            PatternKind::BoundedExistence => "BoundedExistence",
            PatternKind::TransientState => "TransientState",
            PatternKind::SteadyState => "SteadyState",
            PatternKind::MinimumDuration => "MinimumDuration",
            PatternKind::MaximumDuration => "MaximumDuration",
            PatternKind::Recurrence => "Recurrence",
            PatternKind::Precedence => "Precedence",
            PatternKind::PrecedenceChain1N => "PrecedenceChain1N",
            PatternKind::PrecedenceChainN1 => "PrecedenceChainN1",
            PatternKind::Until => "Until",
            PatternKind::Response => "Response",
            PatternKind::ResponseChain1N => "ResponseChain1N",
            PatternKind::ResponseChainN1 => "ResponseChainN1",
            PatternKind::ResponseInvariance => "ResponseInvariance",
        }
    }

    pub fn family(self) -> PatternFamily {
        match self {
            PatternKind::Universality
            | PatternKind::Absence
            | PatternKind::Existence
            | PatternKind::BoundedExistence
            | PatternKind::TransientState
            | PatternKind::SteadyState
            | PatternKind::MinimumDuration
            | PatternKind::MaximumDuration
            | PatternKind::Recurrence => PatternFamily::Occurrence,
            PatternKind::Precedence
            | PatternKind::Until
            | PatternKind::Response
            | PatternKind::ResponseInvariance => PatternFamily::Order,
            PatternKind::PrecedenceChain1N
            | PatternKind::PrecedenceChainN1
            | PatternKind::ResponseChain1N
            | PatternKind::ResponseChainN1 => PatternFamily::Chain,
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PatternKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternKind::ALL
            .into_iter()
            .find(|k| k.tag() == s)
            .ok_or_else(|| ModelError::unsupported("pattern", s))
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Unary pattern payload over a single event `P`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Occurrence {
    pub p: Event,
    pub time_bound: Option<TimeBound>,
    pub probability: Option<ProbabilityBound>,
}

impl Occurrence {
    pub fn new(p: Event) -> Self {
        Self {
            p,
            time_bound: None,
            probability: None,
        }
    }

    pub fn with_time_bound(mut self, bound: TimeBound) -> Self {
        self.time_bound = Some(bound);
        self
    }

    pub fn with_probability(mut self, bound: ProbabilityBound) -> Self {
        self.probability = Some(bound);
        self
    }
}

/// Binary pattern payload relating `P` and `S`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Order {
    pub p: Event,
    pub s: Event,
    pub constraint: Option<EventConstraint>,
    pub time_bound: Option<TimeBound>,
    pub probability: Option<ProbabilityBound>,
}

impl Order {
    pub fn new(p: Event, s: Event) -> Self {
        Self {
            p,
            s,
            constraint: None,
            time_bound: None,
            probability: None,
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

    pub fn with_probability(mut self, bound: ProbabilityBound) -> Self {
        self.probability = Some(bound);
        self
    }
}

/// Order payload extended with the chain links following `S`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ChainOrder {
    pub order: Order,
    pub links: ChainEvents,
}

impl ChainOrder {
    pub fn new(order: Order, links: ChainEvents) -> Self {
        Self { order, links }
    }
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Pattern {
    Universality(Occurrence),
    Absence(Occurrence),
    Existence(Occurrence),
    BoundedExistence {
        occurrence: Occurrence,
        frequency: u32,
    },
    TransientState(Occurrence),
    SteadyState(Occurrence),
    MinimumDuration(Occurrence),
    MaximumDuration(Occurrence),
    Recurrence(Occurrence),
    Precedence(Order),
    PrecedenceChain1N(ChainOrder),
    PrecedenceChainN1(ChainOrder),
    Until(Order),
    Response(Order),
    ResponseChain1N(ChainOrder),
    ResponseChainN1(ChainOrder),
    ResponseInvariance(Order),
}

impl Pattern {
    pub fn bounded_existence(occurrence: Occurrence, frequency: u32) -> Result<Self, ModelError> {
        if frequency == 0 {
            return Err(ModelError::InvalidFrequency);
        }
        Ok(Pattern::BoundedExistence {
            occurrence,
            frequency,
        })
    }

    /// Build any occurrence pattern except `BoundedExistence`, which needs a frequency.
    pub fn occurrence(kind: PatternKind, occurrence: Occurrence) -> Result<Self, ModelError> {
        Ok(match kind {
            PatternKind::Universality => Pattern::Universality(occurrence),
            PatternKind::Absence => Pattern::Absence(occurrence),
            PatternKind::Existence => Pattern::Existence(occurrence),
            PatternKind::TransientState => Pattern::TransientState(occurrence),
            PatternKind::SteadyState => Pattern::SteadyState(occurrence),
            PatternKind::MinimumDuration => Pattern::MinimumDuration(occurrence),
            PatternKind::MaximumDuration => Pattern::MaximumDuration(occurrence),
            PatternKind::Recurrence => Pattern::Recurrence(occurrence),
            other => return Err(shape_error(other, "an occurrence payload")),
        })
    }

    pub fn order(kind: PatternKind, order: Order) -> Result<Self, ModelError> {
        Ok(match kind {
            PatternKind::Precedence => Pattern::Precedence(order),
            PatternKind::Until => Pattern::Until(order),
            PatternKind::Response => Pattern::Response(order),
            PatternKind::ResponseInvariance => Pattern::ResponseInvariance(order),
            other => return Err(shape_error(other, "an order payload")),
        })
    }

    pub fn chain(kind: PatternKind, chain: ChainOrder) -> Result<Self, ModelError> {
        Ok(match kind {
            PatternKind::PrecedenceChain1N => Pattern::PrecedenceChain1N(chain),
            PatternKind::PrecedenceChainN1 => Pattern::PrecedenceChainN1(chain),
            PatternKind::ResponseChain1N => Pattern::ResponseChain1N(chain),
            PatternKind::ResponseChainN1 => Pattern::ResponseChainN1(chain),
            other => return Err(shape_error(other, "a chain payload")),
        })
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::Universality(_) => PatternKind::Universality,
            Pattern::Absence(_) => PatternKind::Absence,
            Pattern::Existence(_) => PatternKind::Existence,
            Pattern::BoundedExistence { .. } => PatternKind::BoundedExistence,
            Pattern::TransientState(_) => PatternKind::TransientState,
            Pattern::SteadyState(_) => PatternKind::SteadyState,
            Pattern::MinimumDuration(_) => PatternKind::MinimumDuration,
            Pattern::MaximumDuration(_) => PatternKind::MaximumDuration,
            Pattern::Recurrence(_) => PatternKind::Recurrence,
            Pattern::Precedence(_) => PatternKind::Precedence,
            Pattern::PrecedenceChain1N(_) => PatternKind::PrecedenceChain1N,
            Pattern::PrecedenceChainN1(_) => PatternKind::PrecedenceChainN1,
            Pattern::Until(_) => PatternKind::Until,
            Pattern::Response(_) => PatternKind::Response,
            Pattern::ResponseChain1N(_) => PatternKind::ResponseChain1N,
            Pattern::ResponseChainN1(_) => PatternKind::ResponseChainN1,
            Pattern::ResponseInvariance(_) => PatternKind::ResponseInvariance,
        }
    }

    /// The occurrence payload, for unary patterns.
    pub fn as_occurrence(&self) -> Option<&Occurrence> {
        match self {
            Pattern::Universality(o)
            | Pattern::Absence(o)
            | Pattern::Existence(o)
            | Pattern::BoundedExistence { occurrence: o, .. }
            | Pattern::TransientState(o)
            | Pattern::SteadyState(o)
            | Pattern::MinimumDuration(o)
            | Pattern::MaximumDuration(o)
            | Pattern::Recurrence(o) => Some(o),
            _ => None,
        }
    }

    /// The order payload, for binary and chain patterns.
    pub fn as_order(&self) -> Option<&Order> {
        match self {
            Pattern::Precedence(o)
            | Pattern::Until(o)
            | Pattern::Response(o)
            | Pattern::ResponseInvariance(o) => Some(o),
            Pattern::PrecedenceChain1N(c)
            | Pattern::PrecedenceChainN1(c)
            | Pattern::ResponseChain1N(c)
            | Pattern::ResponseChainN1(c) => Some(&c.order),
            _ => None,
        }
    }

    pub fn links(&self) -> Option<&ChainEvents> {
        match self {
            Pattern::PrecedenceChain1N(c)
            | Pattern::PrecedenceChainN1(c)
            | Pattern::ResponseChain1N(c)
            | Pattern::ResponseChainN1(c) => Some(&c.links),
            _ => None,
        }
    }

    pub fn time_bound(&self) -> Option<&TimeBound> {
        match (self.as_occurrence(), self.as_order()) {
            (Some(o), _) => o.time_bound.as_ref(),
            (_, Some(o)) => o.time_bound.as_ref(),
            _ => None,
        }
    }

    pub fn probability(&self) -> Option<&ProbabilityBound> {
        match (self.as_occurrence(), self.as_order()) {
            (Some(o), _) => o.probability.as_ref(),
            (_, Some(o)) => o.probability.as_ref(),
            _ => None,
        }
    }

    /// Whether the pattern or any of its chain links carries a time bound.
    pub fn is_timed(&self) -> bool {
        self.time_bound().is_some() || self.links().is_some_and(ChainEvents::is_timed)
    }

    pub fn specification_as_sel(&self) -> String {
        match self {
            Pattern::Universality(o) => occurrence_sel(
                format!("it is always the case that {} [holds]", o.p.sel()),
                o,
            ),
            Pattern::Absence(o) => occurrence_sel(
                format!("it is never the case that {} [holds]", o.p.sel()),
                o,
            ),
            Pattern::Existence(o) => {
                occurrence_sel(format!("{} [holds] eventually", o.p.sel()), o)
            }
            Pattern::BoundedExistence {
                occurrence: o,
                frequency,
            } => occurrence_sel(
                format!("{} [holds] at most {frequency} times", o.p.sel()),
                o,
            ),
            Pattern::TransientState(o) => {
                let after = o
                    .time_bound
                    .as_ref()
                    .map_or_else(|| "some time".to_string(), TimeBound::magnitude_sel);
                with_probability(format!("{} [holds] after {after}", o.p.sel()), o.probability)
            }
            Pattern::SteadyState(o) => {
                occurrence_sel(format!("{} [holds] in the long run", o.p.sel()), o)
            }
            Pattern::MinimumDuration(o) => with_probability(
                format!(
                    "once {} [becomes satisfied] it remains so for at least {}",
                    o.p.sel(),
                    magnitude_or_some_time(o)
                ),
                o.probability,
            ),
            Pattern::MaximumDuration(o) => with_probability(
                format!(
                    "once {} [becomes satisfied] it remains so for less than {}",
                    o.p.sel(),
                    magnitude_or_some_time(o)
                ),
                o.probability,
            ),
            Pattern::Recurrence(o) => {
                let mut text = format!("{} [holds] repeatedly", o.p.sel());
                if let Some(tb) = &o.time_bound {
                    if let Duration::Finite(u) = tb.upper_limit() {
                        text.push_str(&format!(" every {u} {}", tb.unit()));
                    }
                }
                with_probability(text, o.probability)
            }
            Pattern::Precedence(o) => order_sel(
                format!(
                    "if {} [holds] then it must have been the case that {} [has occurred] before {} [holds]",
                    o.p.sel(),
                    o.s.sel(),
                    o.p.sel()
                ),
                o,
            ),
            Pattern::PrecedenceChain1N(c) => {
                let o = &c.order;
                order_sel(
                    format!(
                        "if {} [has occurred]{} then it must have been the case that {} [has occurred] before {} [holds]",
                        o.s.sel(),
                        links_sel(&c.links, " and afterwards ", " [holds]"),
                        o.p.sel(),
                        o.s.sel()
                    ),
                    o,
                )
            }
            Pattern::PrecedenceChainN1(c) => {
                let o = &c.order;
                order_sel(
                    format!(
                        "if {} [holds] then it must have been the case that {} [has occurred]{} before {} [holds]",
                        o.p.sel(),
                        o.s.sel(),
                        links_sel(&c.links, " and afterwards ", " [has occurred]"),
                        o.p.sel()
                    ),
                    o,
                )
            }
            Pattern::Until(o) => order_sel(
                format!(
                    "{} [holds] without interruption until {} [holds]",
                    o.p.sel(),
                    o.s.sel()
                ),
                o,
            ),
            Pattern::Response(o) => order_sel(
                format!(
                    "if {} [has occurred] then in response {} [eventually holds]",
                    o.p.sel(),
                    o.s.sel()
                ),
                o,
            ),
            Pattern::ResponseChain1N(c) => {
                let o = &c.order;
                order_sel(
                    format!(
                        "if {} [has occurred] then in response {} [eventually holds]{}",
                        o.p.sel(),
                        o.s.sel(),
                        links_sel(&c.links, " followed by ", "")
                    ),
                    o,
                )
            }
            Pattern::ResponseChainN1(c) => {
                let o = &c.order;
                order_sel(
                    format!(
                        "if {}{} [have occurred] then in response {} [eventually holds]",
                        o.s.sel(),
                        links_sel(&c.links, " followed by ", ""),
                        o.p.sel()
                    ),
                    o,
                )
            }
            Pattern::ResponseInvariance(o) => order_sel(
                format!(
                    "if {} [has occurred] then in response {} [holds] continually",
                    o.p.sel(),
                    o.s.sel()
                ),
                o,
            ),
        }
    }
}

fn shape_error(kind: PatternKind, expected: &str) -> ModelError {
    ModelError::PatternShape {
        pattern: kind.tag().to_string(),
        expected: expected.to_string(),
    }
}

fn with_probability(mut text: String, probability: Option<ProbabilityBound>) -> String {
    if let Some(p) = probability {
        text.push(' ');
        text.push_str(&p.sel());
    }
    text
}

fn occurrence_sel(mut text: String, o: &Occurrence) -> String {
    if let Some(tb) = &o.time_bound {
        text.push(' ');
        text.push_str(&tb.sel());
    }
    with_probability(text, o.probability)
}

fn order_sel(mut text: String, o: &Order) -> String {
    if let Some(tb) = &o.time_bound {
        text.push(' ');
        text.push_str(&tb.sel());
    }
    if let Some(c) = &o.constraint {
        text.push(' ');
        text.push_str(&c.sel());
    }
    with_probability(text, o.probability)
}

fn magnitude_or_some_time(o: &Occurrence) -> String {
    o.time_bound
        .as_ref()
        .map_or_else(|| "some time".to_string(), TimeBound::magnitude_sel)
}

fn links_sel(links: &ChainEvents, joiner: &str, verb: &str) -> String {
    links
        .iter()
        .map(|l: &ChainEvent| format!("{joiner}{}{verb}{}", l.event.sel(), l.decorations_sel()))
        .collect()
}
