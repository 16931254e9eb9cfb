use crate::errors::{GosertError, Result};

/// Tolerance applied when an expected number is compared with an actual number
pub const DEFAULT_NUMERIC_TOLERANCE: f64 = 0.05;

/// Tunables for one matcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Inclusive bound on `|actual - expected|` for number literals.
    /// `{{BeNumerically(...)}}` carries its own bounds and ignores this.
    pub numeric_tolerance: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            numeric_tolerance: DEFAULT_NUMERIC_TOLERANCE,
        }
    }
}

impl MatchConfig {
    pub fn with_numeric_tolerance(mut self, tolerance: f64) -> Self {
        self.numeric_tolerance = tolerance;
        self
    }

    /// # Errors
    ///
    /// `InvalidConfig` for a negative or non-finite tolerance.
    pub fn validate(&self) -> Result<()> {
        if !self.numeric_tolerance.is_finite() || self.numeric_tolerance < 0.0 {
            return Err(GosertError::InvalidConfig {
                reason: format!(
                    "numeric tolerance must be a finite non-negative number, was {}",
                    self.numeric_tolerance
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tolerance() {
        assert_eq!(MatchConfig::default().numeric_tolerance, 0.05);
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            let err = MatchConfig::default()
                .with_numeric_tolerance(bad)
                .validate()
                .unwrap_err();
            assert!(matches!(err, GosertError::InvalidConfig { .. }));
        }
    }

    #[test]
    fn test_zero_tolerance_is_valid() {
        assert!(MatchConfig::default()
            .with_numeric_tolerance(0.0)
            .validate()
            .is_ok());
    }
}
