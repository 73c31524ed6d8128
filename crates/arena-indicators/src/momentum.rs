//! Momentum indicators.

/// Relative Strength Index (RSI).
///
/// Evaluates the FIRST `period` deltas of the series (the oldest window of
/// the bounded history), not a trailing window. When the average loss over
/// that window is zero it is substituted with 1 rather than treating the
/// ratio as undefined, which biases the output toward 100. Strategy
/// thresholds are calibrated against both behaviors.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Neutral output used when there is not enough data.
    pub const NEUTRAL: f64 = 50.0;

    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// RSI over the series, always in `[0, 100]`.
    ///
    /// Returns the neutral value 50 when fewer than `period + 1` samples
    /// exist.
    pub fn value(&self, series: &[f64]) -> f64 {
        if series.len() < self.period + 1 {
            return Self::NEUTRAL;
        }

        let mut gains = 0.0;
        let mut losses = 0.0;
        for i in 1..=self.period {
            let change = series[i] - series[i - 1];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let avg_gain = gains / self.period as f64;
        let avg_loss = losses / self.period as f64;
        let rs = avg_gain / if avg_loss == 0.0 { 1.0 } else { avg_loss };
        100.0 - 100.0 / (1.0 + rs)
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_below_minimum_samples() {
        let rsi = Rsi::new(14);
        assert_eq!(rsi.value(&[1.0; 14]), Rsi::NEUTRAL);
        assert_eq!(rsi.value(&[]), Rsi::NEUTRAL);
    }

    #[test]
    fn test_all_declining_trends_to_zero() {
        let rsi = Rsi::new(14);
        let series: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let value = rsi.value(&series);
        assert!(value >= 0.0);
        assert!(value < 1e-9);
    }

    #[test]
    fn test_all_rising_approaches_hundred() {
        let rsi = Rsi::new(14);
        let series: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let value = rsi.value(&series);
        // avg_loss = 0 is substituted with 1, so the output is below 100
        // but biased strongly toward it.
        assert!(value > 50.0);
        assert!(value <= 100.0);
    }

    #[test]
    fn test_output_stays_in_range() {
        let rsi = Rsi::new(5);
        let series = vec![10.0, 50.0, 5.0, 80.0, 2.0, 90.0, 1.0];
        let value = rsi.value(&series);
        assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn test_uses_leading_window() {
        let rsi = Rsi::new(3);
        // First 3 deltas are all losses; the later rally must not matter.
        let series = vec![10.0, 9.0, 8.0, 7.0, 50.0, 100.0];
        assert!(rsi.value(&series) < 1e-9);
    }
}
