//! Moving average indicators.

/// Exponential Moving Average (EMA).
///
/// Seeds with the arithmetic mean of the first `period` elements, then
/// applies the standard recurrence `ema = price * k + ema * (1 - k)` with
/// `k = 2 / (period + 1)` over the remainder, left to right.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }

    /// Latest EMA over the series, or `None` when fewer than `period`
    /// samples exist.
    pub fn value(&self, series: &[f64]) -> Option<f64> {
        if series.len() < self.period {
            return None;
        }

        let mut ema = series[..self.period].iter().sum::<f64>() / self.period as f64;
        let one_minus_mult = 1.0 - self.multiplier;
        for &price in &series[self.period..] {
            ema = price * self.multiplier + ema * one_minus_mult;
        }
        Some(ema)
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data() {
        let ema = Ema::new(5);
        assert!(ema.value(&[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_seed_is_sma() {
        let ema = Ema::new(3);
        let value = ema.value(&[1.0, 2.0, 3.0]).unwrap();
        assert!((value - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_recurrence() {
        // k = 2/(3+1) = 0.5; seed = 2.0; then 4*0.5 + 2*0.5 = 3.0
        let ema = Ema::new(3);
        let value = ema.value(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((value - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_constant_series_converges_to_constant() {
        let ema = Ema::new(12);
        let series = vec![42.5; 80];
        let value = ema.value(&series).unwrap();
        assert!((value - 42.5).abs() < 1e-9);
    }
}
