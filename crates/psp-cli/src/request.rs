//! Wire documents of a translation request and the factories that turn their
//! type tags into domain values.

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use psp_mapping::{MappingError, TargetLogic};
use psp_model::{
    ChainEvent, ChainEvents, ChainOrder, Event, EventConstraint, ModelError, Occurrence, Order,
    Pattern, PatternFamily, PatternKind, ProbabilityBound, ProbabilityComparison, Scope,
    ScopeKind, TimeBound, DEFAULT_TIME_UNIT,
};

#[derive(Debug, Error, Diagnostic)]
pub(crate) enum RequestError {
    #[error("Malformed request: {0}")]
    #[diagnostic(code(psp::request::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to read request '{path}': {source}")]
    #[diagnostic(code(psp::request::io))]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{kind} '{tag}' needs the field '{field}'")]
    #[diagnostic(code(psp::request::missing_field))]
    MissingField {
        kind: &'static str,
        tag: String,
        field: &'static str,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Mapping(#[from] MappingError),
}

impl RequestError {
    /// Whether the request named an unknown scope, pattern, bound or logic.
    pub(crate) fn is_unsupported_type(&self) -> bool {
        match self {
            RequestError::Model(e) => e.is_unsupported_type(),
            RequestError::Mapping(e) => e.is_unsupported_type(),
            _ => false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranslateRequest {
    pub(crate) scope: ScopeDoc,
    pub(crate) pattern: PatternDoc,
    pub(crate) target_logic: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EventDoc {
    name: String,
    #[serde(default)]
    specification: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScopeDoc {
    #[serde(rename = "type")]
    kind: String,
    q_event: Option<EventDoc>,
    r_event: Option<EventDoc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimeBoundDoc {
    #[serde(rename = "type")]
    kind: String,
    lower_limit: Option<u64>,
    /// Absent means unbounded.
    upper_limit: Option<u64>,
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProbabilityDoc {
    #[serde(rename = "type")]
    kind: String,
    probability: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChainEventDoc {
    event: EventDoc,
    constraint_event: Option<EventDoc>,
    time_bound: Option<TimeBoundDoc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PatternDoc {
    #[serde(rename = "type")]
    kind: String,
    p_event: Option<EventDoc>,
    s_event: Option<EventDoc>,
    constraint_event: Option<EventDoc>,
    time_bound: Option<TimeBoundDoc>,
    probability_bound: Option<ProbabilityDoc>,
    frequency: Option<u32>,
    #[serde(default)]
    chain_events: Vec<ChainEventDoc>,
}

impl From<EventDoc> for Event {
    fn from(doc: EventDoc) -> Self {
        Event::new(doc.name, doc.specification)
    }
}

impl TranslateRequest {
    pub(crate) fn parse(text: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub(crate) fn target(&self) -> Result<TargetLogic, RequestError> {
        Ok(self.target_logic.parse::<TargetLogic>()?)
    }
}

impl ScopeDoc {
    pub(crate) fn build(self) -> Result<Scope, RequestError> {
        let kind: ScopeKind = self.kind.parse()?;
        let events = [self.q_event, self.r_event]
            .into_iter()
            .flatten()
            .map(Event::from)
            .collect();
        Ok(Scope::from_events(kind, events)?)
    }
}

impl TimeBoundDoc {
    fn build(self) -> Result<TimeBound, RequestError> {
        let missing = |field| RequestError::MissingField {
            kind: "time bound",
            tag: self.kind.clone(),
            field,
        };
        let bound = match self.kind.as_str() {
            "Upper" => match self.upper_limit {
                Some(limit) => TimeBound::upper(limit),
                None => TimeBound::upper_unbounded(),
            },
            "Lower" => TimeBound::lower(self.lower_limit.ok_or_else(|| missing("lower_limit"))?),
            "Interval" => {
                let lower = self.lower_limit.ok_or_else(|| missing("lower_limit"))?;
                match self.upper_limit {
                    Some(upper) => TimeBound::interval(lower, upper),
                    None => TimeBound::interval_unbounded(lower),
                }
            }
            other => return Err(ModelError::unsupported("time bound", other).into()),
        };
        Ok(bound.with_unit(self.unit.unwrap_or_else(|| DEFAULT_TIME_UNIT.to_string())))
    }
}

impl ProbabilityDoc {
    fn build(self) -> Result<ProbabilityBound, RequestError> {
        let comparison = match self.kind.as_str() {
            "Lower" => ProbabilityComparison::Lower,
            "LowerEqual" => ProbabilityComparison::LowerEqual,
            "Greater" => ProbabilityComparison::Greater,
            "GreaterEqual" => ProbabilityComparison::GreaterEqual,
            other => return Err(ModelError::unsupported("probability bound", other).into()),
        };
        Ok(ProbabilityBound::new(comparison, self.probability)?)
    }
}

impl ChainEventDoc {
    fn build(self) -> Result<ChainEvent, RequestError> {
        let mut link = ChainEvent::new(self.event.into());
        if let Some(z) = self.constraint_event {
            link = link.with_constraint(EventConstraint::new(z.into()));
        }
        if let Some(tb) = self.time_bound {
            link = link.with_time_bound(tb.build()?);
        }
        Ok(link)
    }
}

impl PatternDoc {
    pub(crate) fn build(self) -> Result<Pattern, RequestError> {
        let kind: PatternKind = self.kind.parse()?;
        let missing = |field| RequestError::MissingField {
            kind: "pattern",
            tag: kind.tag().to_string(),
            field,
        };
        let p: Event = self.p_event.ok_or_else(|| missing("p_event"))?.into();
        let time_bound = self.time_bound.map(TimeBoundDoc::build).transpose()?;
        let probability = self.probability_bound.map(ProbabilityDoc::build).transpose()?;

        if kind.family() == PatternFamily::Occurrence {
            let occurrence = Occurrence {
                p,
                time_bound,
                probability,
            };
            return Ok(if kind == PatternKind::BoundedExistence {
                let frequency = self.frequency.ok_or_else(|| missing("frequency"))?;
                Pattern::bounded_existence(occurrence, frequency)?
            } else {
                Pattern::occurrence(kind, occurrence)?
            });
        }

        let order = Order {
            p,
            s: self.s_event.ok_or_else(|| missing("s_event"))?.into(),
            constraint: self
                .constraint_event
                .map(|z| EventConstraint::new(z.into())),
            time_bound,
            probability,
        };
        if kind.family() == PatternFamily::Order {
            return Ok(Pattern::order(kind, order)?);
        }
        let links = self
            .chain_events
            .into_iter()
            .map(ChainEventDoc::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pattern::chain(
            kind,
            ChainOrder::new(order, ChainEvents::new(links)?),
        )?)
    }
}
