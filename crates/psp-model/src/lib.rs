//! Domain model of the property specification pattern catalogue.
//!
//! A property is a [`Scope`] combined with a [`Pattern`], optionally decorated
//! with time bounds, probability bounds and event constraints. Both halves
//! render themselves as structured English independently of any target logic.

pub mod chain;
pub mod errors;
pub mod event;
pub mod pattern;
pub mod probability;
#[cfg(any(test, feature = "proptest"))]
pub mod proptest_generators;
pub mod scope;
pub mod time;

pub use chain::{ChainEvent, ChainEvents};
pub use errors::ModelError;
pub use event::{Event, EventConstraint};
pub use pattern::{ChainOrder, Occurrence, Order, Pattern, PatternFamily, PatternKind};
pub use probability::{ProbabilityBound, ProbabilityComparison};
pub use scope::{Scope, ScopeKind};
pub use time::{Duration, TimeBound, DEFAULT_TIME_UNIT};
