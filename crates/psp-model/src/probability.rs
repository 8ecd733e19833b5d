use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum ProbabilityComparison {
    Lower,
    LowerEqual,
    Greater,
    GreaterEqual,
}

impl ProbabilityComparison {
    /// Relational operator as printed by probabilistic back-ends.
    pub fn symbol(self) -> &'static str {
        match self {
            ProbabilityComparison::Lower => "<",
            ProbabilityComparison::LowerEqual => "<=",
            ProbabilityComparison::Greater => ">",
            ProbabilityComparison::GreaterEqual => ">=",
        }
    }

    fn sel(self) -> &'static str {
        match self {
            ProbabilityComparison::Lower => "lower than",
            ProbabilityComparison::LowerEqual => "lower than or equal to",
            ProbabilityComparison::Greater => "greater than",
            ProbabilityComparison::GreaterEqual => "greater than or equal to",
        }
    }
}

/// Comparison against a probability threshold, e.g. `>= 0.95`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ProbabilityBound {
    comparison: ProbabilityComparison,
    probability: f64,
}

impl ProbabilityBound {
    pub fn new(comparison: ProbabilityComparison, probability: f64) -> Result<Self, ModelError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ModelError::InvalidProbability(probability));
        }
        Ok(Self {
            comparison,
            probability,
        })
    }

    pub fn comparison(&self) -> ProbabilityComparison {
        self.comparison
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn sel(&self) -> String {
        format!(
            "with a probability {} {}",
            self.comparison.sel(),
            self.probability
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            ProbabilityBound::new(ProbabilityComparison::Greater, 1.2),
            Err(ModelError::InvalidProbability(1.2))
        );
        assert!(ProbabilityBound::new(ProbabilityComparison::Greater, -0.1).is_err());
        assert!(ProbabilityBound::new(ProbabilityComparison::Greater, f64::NAN).is_err());
    }

    #[test]
    fn accepts_closed_unit_interval() {
        assert!(ProbabilityBound::new(ProbabilityComparison::Lower, 0.0).is_ok());
        assert!(ProbabilityBound::new(ProbabilityComparison::Lower, 1.0).is_ok());
    }

    #[test]
    fn sel_and_symbols() {
        let b = ProbabilityBound::new(ProbabilityComparison::GreaterEqual, 0.9).unwrap();
        assert_eq!(b.sel(), "with a probability greater than or equal to 0.9");
        assert_eq!(b.comparison().symbol(), ">=");
        let b = ProbabilityBound::new(ProbabilityComparison::Lower, 0.25).unwrap();
        assert_eq!(b.sel(), "with a probability lower than 0.25");
    }
}
