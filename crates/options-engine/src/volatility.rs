//! Historical volatility from daily closing prices

use crate::error::EngineError;
use crate::Result;

pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Minimum closes needed to form one log-return
pub const MIN_CLOSES: usize = 2;

/// Log-returns `ln(close_i / close_{i-1})` of consecutive closes
pub fn log_returns(daily_closes: &[f64]) -> Result<Vec<f64>> {
    if let Some(bad) = daily_closes.iter().find(|c| !(c.is_finite() && **c > 0.0)) {
        return Err(EngineError::invalid_input(format!(
            "closing prices must be positive and finite, got {}",
            bad
        )));
    }

    Ok(daily_closes
        .windows(2)
        .map(|pair| (pair[1] / pair[0]).ln())
        .collect())
}

/// Sample standard deviation (n - 1 denominator); 0 for fewer than two values
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    variance.sqrt()
}

/// Annualized volatility of a daily close series
///
/// Returns 0 for a zero-variance series; callers must not hand that to the
/// pricing model, which rejects non-positive volatility.
pub fn annualized_volatility(daily_closes: &[f64], trading_days_per_year: u32) -> Result<f64> {
    if daily_closes.len() < MIN_CLOSES {
        return Err(EngineError::InsufficientData {
            required: MIN_CLOSES,
            actual: daily_closes.len(),
        });
    }

    let returns = log_returns(daily_closes)?;
    let sigma_daily = sample_std_dev(&returns);

    Ok(sigma_daily * f64::from(trading_days_per_year).sqrt())
}
