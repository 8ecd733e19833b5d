//! Interval arithmetic for timed targets.
//!
//! Every helper returns the interval it derives or the reason the bound is not
//! expressible; callers turn the latter into an inexpressible-bound marker.

use std::fmt;

use psp_model::{ChainEvents, Duration, TimeBound};
use thiserror::Error;

use crate::errors::MappingError;
use crate::symbols::{LanguageDefinitions, Symbol};

/// Interval annotation attached to a temporal operator.
///
/// The lower limit is always closed; an infinite upper limit is always open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub lower: u64,
    pub upper: Duration,
    pub upper_closed: bool,
}

impl TimeInterval {
    /// `[0,∞)`.
    pub const UNBOUNDED: TimeInterval = TimeInterval {
        lower: 0,
        upper: Duration::Infinite,
        upper_closed: false,
    };

    pub fn closed(lower: u64, upper: u64) -> Self {
        Self {
            lower,
            upper: Duration::Finite(upper),
            upper_closed: true,
        }
    }

    pub fn right_open(lower: u64, upper: Duration) -> Self {
        Self {
            lower,
            upper,
            upper_closed: false,
        }
    }

    pub fn from_lower(lower: u64) -> Self {
        Self::right_open(lower, Duration::Infinite)
    }

    fn up_to(lower: u64, upper: Duration) -> Self {
        match upper {
            Duration::Finite(u) => Self::closed(lower, u),
            Duration::Infinite => Self::from_lower(lower),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower == 0 && self.upper.is_infinite()
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.upper_closed { ']' } else { ')' };
        write!(f, "[{},{}{close}", self.lower, self.upper)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("{helper} needs a finite upper time limit")]
    UnboundedUpper { helper: &'static str },

    #[error("{helper}: lower time limit {lower} exceeds upper time limit {upper}")]
    NegativeSpan {
        helper: &'static str,
        lower: u64,
        upper: u64,
    },

    #[error("{helper} needs a lower time limit")]
    NoLowerLimit { helper: &'static str },

    #[error("chain window is incomplete: a chain event has no time bound")]
    IncompleteChain,
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub fn t_l(bound: &TimeBound) -> u64 {
    bound.lower_limit()
}

/// Upper limit as printed by `defs`; unbounded prints the infinity symbol.
pub fn t_u(bound: &TimeBound, defs: &LanguageDefinitions) -> Result<String, MappingError> {
    match bound.upper_limit() {
        Duration::Finite(n) => Ok(n.to_string()),
        Duration::Infinite => defs.get(Symbol::Infinity).map(str::to_string),
    }
}

fn span(bound: &TimeBound, helper: &'static str) -> Result<u64, DurationError> {
    let lower = bound.lower_limit();
    let upper = bound
        .upper_limit()
        .finite()
        .ok_or(DurationError::UnboundedUpper { helper })?;
    upper
        .checked_sub(lower)
        .ok_or(DurationError::NegativeSpan {
            helper,
            lower,
            upper,
        })
}

// ---------------------------------------------------------------------------
// Interval shapes
// ---------------------------------------------------------------------------

/// The bound as written: upper-only, lower-only or both.
pub fn time(bound: &TimeBound) -> Result<TimeInterval, DurationError> {
    match bound {
        TimeBound::Upper { .. } => Ok(utb(bound)),
        TimeBound::Lower { .. } => Ok(lmintime(bound)),
        TimeBound::Interval { lower, upper, .. } => match upper {
            Duration::Finite(u) if lower > u => Err(DurationError::NegativeSpan {
                helper: "time",
                lower: *lower,
                upper: *u,
            }),
            _ => Ok(TimeInterval::up_to(*lower, *upper)),
        },
    }
}

/// `[tL,∞)`.
pub fn lmintime(bound: &TimeBound) -> TimeInterval {
    TimeInterval::from_lower(t_l(bound))
}

/// `[0,tL]`.
pub fn umintime(bound: &TimeBound) -> Result<TimeInterval, DurationError> {
    if !bound.has_lower_limit() {
        return Err(DurationError::NoLowerLimit { helper: "umintime" });
    }
    Ok(TimeInterval::closed(0, t_l(bound)))
}

/// `[0,tU]`.
pub fn utb(bound: &TimeBound) -> TimeInterval {
    TimeInterval::up_to(0, bound.upper_limit())
}

/// `[d,d]` with `d = tU - tL`.
pub fn trigger(bound: &TimeBound) -> Result<TimeInterval, DurationError> {
    let d = span(bound, "trigger")?;
    Ok(TimeInterval::closed(d, d))
}

/// `[0,d)`.
pub fn gap(bound: &TimeBound) -> Result<TimeInterval, DurationError> {
    let d = span(bound, "gap")?;
    Ok(TimeInterval::right_open(0, Duration::Finite(d)))
}

/// `[0,d]`.
pub fn maxgap(bound: &TimeBound) -> Result<TimeInterval, DurationError> {
    let d = span(bound, "maxgap")?;
    Ok(TimeInterval::closed(0, d))
}

/// `[d,∞)`.
pub fn elapsed(bound: &TimeBound) -> Result<TimeInterval, DurationError> {
    let d = span(bound, "elapsed")?;
    Ok(TimeInterval::from_lower(d))
}

// ---------------------------------------------------------------------------
// Chain sums
// ---------------------------------------------------------------------------

/// Sum over a prefix of chain-link bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainSum {
    Total(Duration),
    /// Some link in the prefix carries no time bound.
    Incomplete,
}

/// End-to-end window over a chain prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainWindow {
    Window(TimeInterval),
    Incomplete,
}

/// Saturating sum of the upper limits of the first `k` links.
pub fn sum_tis(links: &ChainEvents, k: usize) -> ChainSum {
    let mut total = Duration::Finite(0);
    for link in links.iter().take(k) {
        match &link.time_bound {
            Some(tb) => total = total.saturating_add(tb.upper_limit()),
            None => return ChainSum::Incomplete,
        }
    }
    ChainSum::Total(total)
}

/// Window from the head of a cause chain to the single effect: the first `k`
/// link bounds followed by the effect bound `outer`.
pub fn gap_np(
    outer: Option<&TimeBound>,
    links: &ChainEvents,
    k: usize,
) -> Result<ChainWindow, DurationError> {
    window(outer, links, k)
}

/// Window from the single cause to link `k` of the effect chain: the cause
/// bound `outer` followed by the first `k` link bounds.
pub fn gap_pn(
    outer: Option<&TimeBound>,
    links: &ChainEvents,
    k: usize,
) -> Result<ChainWindow, DurationError> {
    window(outer, links, k)
}

fn window(
    outer: Option<&TimeBound>,
    links: &ChainEvents,
    k: usize,
) -> Result<ChainWindow, DurationError> {
    let upper_sum = match sum_tis(links, k) {
        ChainSum::Total(d) => d,
        ChainSum::Incomplete => return Ok(ChainWindow::Incomplete),
    };
    let mut lower: u64 = 0;
    for link in links.iter().take(k) {
        if let Some(tb) = &link.time_bound {
            lower = lower.saturating_add(time(tb)?.lower);
        }
    }
    let (outer_lower, outer_upper) = match outer {
        Some(tb) => {
            let iv = time(tb)?;
            (iv.lower, iv.upper)
        }
        None => (0, Duration::Infinite),
    };
    Ok(ChainWindow::Window(TimeInterval::up_to(
        lower.saturating_add(outer_lower),
        upper_sum.saturating_add(outer_upper),
    )))
}

#[cfg(test)]
mod tests {
    use psp_model::{ChainEvent, Event};

    use super::*;
    use crate::symbols::Notation;

    fn links(bounds: Vec<Option<TimeBound>>) -> ChainEvents {
        ChainEvents::new(
            bounds
                .into_iter()
                .enumerate()
                .map(|(i, tb)| ChainEvent {
                    event: Event::new(format!("t{i}"), ""),
                    constraint: None,
                    time_bound: tb,
                })
                .collect(),
        )
        .unwrap()
    }

    // ---------------------------------------------------------------
    // Limits
    // ---------------------------------------------------------------

    #[test]
    fn t_u_prints_infinity_symbol() {
        let mtl = LanguageDefinitions::mtl(Notation::Unicode);
        assert_eq!(t_u(&TimeBound::lower(3), &mtl).unwrap(), "∞");
        assert_eq!(t_u(&TimeBound::upper_unbounded(), &mtl).unwrap(), "∞");
        assert_eq!(t_u(&TimeBound::upper(9), &mtl).unwrap(), "9");
        let tbv = LanguageDefinitions::tbv();
        assert_eq!(t_u(&TimeBound::interval_unbounded(1), &tbv).unwrap(), "inf");
    }

    #[test]
    fn t_u_without_infinity_symbol_fails() {
        let ltl = LanguageDefinitions::ltl(Notation::Unicode);
        assert!(matches!(
            t_u(&TimeBound::lower(3), &ltl),
            Err(MappingError::MissingSymbol { .. })
        ));
    }

    // ---------------------------------------------------------------
    // Shapes
    // ---------------------------------------------------------------

    #[test]
    fn time_dispatches_on_variant() {
        assert_eq!(time(&TimeBound::upper(5)).unwrap().to_string(), "[0,5]");
        assert_eq!(
            time(&TimeBound::lower(2)).unwrap().to_string(),
            "[2,infinity)"
        );
        assert_eq!(time(&TimeBound::interval(1, 4)).unwrap().to_string(), "[1,4]");
        assert!(time(&TimeBound::interval(5, 4)).is_err());
    }

    #[test]
    fn minimum_and_upper_shapes() {
        assert_eq!(
            umintime(&TimeBound::lower(3)).unwrap(),
            TimeInterval::closed(0, 3)
        );
        assert_eq!(
            umintime(&TimeBound::upper(3)),
            Err(DurationError::NoLowerLimit { helper: "umintime" })
        );
        assert_eq!(utb(&TimeBound::interval(2, 7)), TimeInterval::closed(0, 7));
        assert_eq!(lmintime(&TimeBound::interval(2, 7)), TimeInterval::from_lower(2));
    }

    #[test]
    fn span_helpers() {
        let b = TimeBound::interval(2, 7);
        assert_eq!(trigger(&b).unwrap(), TimeInterval::closed(5, 5));
        assert_eq!(gap(&b).unwrap().to_string(), "[0,5)");
        assert_eq!(maxgap(&b).unwrap(), TimeInterval::closed(0, 5));
        assert_eq!(elapsed(&b).unwrap(), TimeInterval::from_lower(5));
        assert_eq!(maxgap(&TimeBound::upper(4)).unwrap(), TimeInterval::closed(0, 4));
    }

    #[test]
    fn span_helpers_flag_negative_spans() {
        let b = TimeBound::interval(9, 4);
        assert_eq!(
            gap(&b),
            Err(DurationError::NegativeSpan {
                helper: "gap",
                lower: 9,
                upper: 4
            })
        );
        assert!(maxgap(&b).is_err());
        assert!(trigger(&b).is_err());
        assert!(elapsed(&b).is_err());
    }

    #[test]
    fn span_helpers_flag_unbounded_upper() {
        let b = TimeBound::lower(3);
        assert_eq!(
            gap(&b),
            Err(DurationError::UnboundedUpper { helper: "gap" })
        );
        assert!(maxgap(&TimeBound::upper_unbounded()).is_err());
    }

    // ---------------------------------------------------------------
    // Chain sums
    // ---------------------------------------------------------------

    #[test]
    fn sum_tis_saturates() {
        let l = links(vec![Some(TimeBound::upper(u64::MAX)), Some(TimeBound::upper(1))]);
        assert_eq!(sum_tis(&l, 2), ChainSum::Total(Duration::Infinite));
        assert_eq!(sum_tis(&l, 1), ChainSum::Total(Duration::Finite(u64::MAX)));
        assert_eq!(sum_tis(&l, 0), ChainSum::Total(Duration::Finite(0)));
    }

    #[test]
    fn sum_tis_is_incomplete_when_a_link_is_unbounded() {
        let l = links(vec![Some(TimeBound::upper(3)), None]);
        assert_eq!(sum_tis(&l, 1), ChainSum::Total(Duration::Finite(3)));
        assert_eq!(sum_tis(&l, 2), ChainSum::Incomplete);
        assert_ne!(sum_tis(&l, 2), ChainSum::Total(Duration::Finite(0)));
        assert_ne!(sum_tis(&l, 2), ChainSum::Total(Duration::Infinite));
    }

    #[test]
    fn windows_combine_outer_and_links() {
        let l = links(vec![Some(TimeBound::interval(1, 3)), Some(TimeBound::upper(4))]);
        let outer = TimeBound::interval(2, 5);
        assert_eq!(
            gap_pn(Some(&outer), &l, 2).unwrap(),
            ChainWindow::Window(TimeInterval::closed(3, 12))
        );
        assert_eq!(
            gap_np(None, &l, 2).unwrap(),
            ChainWindow::Window(TimeInterval::from_lower(1))
        );
    }

    #[test]
    fn windows_are_incomplete_on_unbounded_prefix() {
        let l = links(vec![None, Some(TimeBound::upper(4))]);
        let outer = TimeBound::upper(2);
        assert_eq!(gap_np(Some(&outer), &l, 2).unwrap(), ChainWindow::Incomplete);
        assert_eq!(gap_pn(Some(&outer), &l, 1).unwrap(), ChainWindow::Incomplete);
    }
}
