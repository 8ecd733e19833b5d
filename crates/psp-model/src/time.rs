/// Unit used when a bound does not name one.
pub const DEFAULT_TIME_UNIT: &str = "time units";

/// A time limit that is either a finite count of units or unbounded.
///
/// Unboundedness is a variant, not a large sentinel number, so sums over
/// limits saturate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Duration {
    Finite(u64),
    Infinite,
}

impl Duration {
    pub fn is_infinite(self) -> bool {
        matches!(self, Duration::Infinite)
    }

    pub fn finite(self) -> Option<u64> {
        match self {
            Duration::Finite(n) => Some(n),
            Duration::Infinite => None,
        }
    }

    /// Addition that clamps to `Infinite` on overflow or when either side is unbounded.
    pub fn saturating_add(self, other: Duration) -> Duration {
        match (self, other) {
            (Duration::Finite(a), Duration::Finite(b)) => {
                a.checked_add(b).map_or(Duration::Infinite, Duration::Finite)
            }
            _ => Duration::Infinite,
        }
    }
}

impl From<u64> for Duration {
    fn from(value: u64) -> Self {
        Duration::Finite(value)
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Duration::Finite(n) => write!(f, "{n}"),
            Duration::Infinite => write!(f, "infinity"),
        }
    }
}

/// Time bound decorating a pattern or a chain link.
///
/// Constructors accept any limits; an interval whose lower limit exceeds its
/// upper limit is reported by the mapper that tries to use it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum TimeBound {
    Upper { limit: Duration, unit: String },
    Lower { limit: u64, unit: String },
    Interval {
        lower: u64,
        upper: Duration,
        unit: String,
    },
}

impl TimeBound {
    pub fn upper(limit: u64) -> Self {
        TimeBound::Upper {
            limit: Duration::Finite(limit),
            unit: DEFAULT_TIME_UNIT.into(),
        }
    }

    pub fn upper_unbounded() -> Self {
        TimeBound::Upper {
            limit: Duration::Infinite,
            unit: DEFAULT_TIME_UNIT.into(),
        }
    }

    pub fn lower(limit: u64) -> Self {
        TimeBound::Lower {
            limit,
            unit: DEFAULT_TIME_UNIT.into(),
        }
    }

    pub fn interval(lower: u64, upper: u64) -> Self {
        TimeBound::Interval {
            lower,
            upper: Duration::Finite(upper),
            unit: DEFAULT_TIME_UNIT.into(),
        }
    }

    pub fn interval_unbounded(lower: u64) -> Self {
        TimeBound::Interval {
            lower,
            upper: Duration::Infinite,
            unit: DEFAULT_TIME_UNIT.into(),
        }
    }

    pub fn with_unit(self, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        match self {
            TimeBound::Upper { limit, .. } => TimeBound::Upper { limit, unit },
            TimeBound::Lower { limit, .. } => TimeBound::Lower { limit, unit },
            TimeBound::Interval { lower, upper, .. } => TimeBound::Interval { lower, upper, unit },
        }
    }

    /// Lower limit; an upper-only bound starts at 0.
    pub fn lower_limit(&self) -> u64 {
        match self {
            TimeBound::Upper { .. } => 0,
            TimeBound::Lower { limit, .. } => *limit,
            TimeBound::Interval { lower, .. } => *lower,
        }
    }

    /// Upper limit; a lower-only bound is unbounded above.
    pub fn upper_limit(&self) -> Duration {
        match self {
            TimeBound::Upper { limit, .. } => *limit,
            TimeBound::Lower { .. } => Duration::Infinite,
            TimeBound::Interval { upper, .. } => *upper,
        }
    }

    /// Whether the bound names an explicit lower limit.
    pub fn has_lower_limit(&self) -> bool {
        !matches!(self, TimeBound::Upper { .. })
    }

    pub fn unit(&self) -> &str {
        match self {
            TimeBound::Upper { unit, .. }
            | TimeBound::Lower { unit, .. }
            | TimeBound::Interval { unit, .. } => unit,
        }
    }

    /// Structured English phrase, e.g. `within 5 time units`.
    pub fn sel(&self) -> String {
        match self {
            TimeBound::Upper {
                limit: Duration::Finite(c),
                unit,
            } => format!("within {c} {unit}"),
            TimeBound::Upper {
                limit: Duration::Infinite,
                ..
            } => "without a time limit".to_string(),
            TimeBound::Lower { limit, unit } => format!("after {limit} {unit}"),
            TimeBound::Interval {
                lower,
                upper: Duration::Finite(u),
                unit,
            } => format!("between {lower} and {u} {unit}"),
            TimeBound::Interval {
                lower,
                upper: Duration::Infinite,
                unit,
            } => format!("after {lower} {unit}"),
        }
    }

    /// The bound's magnitude without a preposition, e.g. `5 time units`.
    pub fn magnitude_sel(&self) -> String {
        match self {
            TimeBound::Upper {
                limit: Duration::Finite(c),
                unit,
            } => format!("{c} {unit}"),
            TimeBound::Upper {
                limit: Duration::Infinite,
                unit,
            } => format!("an unbounded number of {unit}"),
            TimeBound::Lower { limit, unit } => format!("{limit} {unit}"),
            TimeBound::Interval {
                lower,
                upper: Duration::Finite(u),
                unit,
            } => format!("between {lower} and {u} {unit}"),
            TimeBound::Interval {
                lower,
                upper: Duration::Infinite,
                unit,
            } => format!("{lower} {unit}"),
        }
    }
}
