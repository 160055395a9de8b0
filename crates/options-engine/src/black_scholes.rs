use std::f64::consts::SQRT_2;

use crate::error::EngineError;
use crate::types::OptionType;
use crate::Result;

/// Inputs for Black-Scholes pricing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BSInputs {
    /// Spot price of the underlying
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to expiry (in years)
    pub time: f64,
    /// Annualized volatility (as decimal, e.g., 0.2 = 20%)
    pub vol: f64,
    /// Risk-free rate
    pub rate: f64,
    pub option_type: OptionType,
}

impl BSInputs {
    /// Reject inputs outside the model's domain instead of producing NaN/Inf
    pub fn validate(&self) -> Result<()> {
        check_positive("spot", self.spot)?;
        check_positive("strike", self.strike)?;
        check_positive("time to expiry", self.time)?;
        check_positive("volatility", self.vol)?;
        if !self.rate.is_finite() {
            return Err(EngineError::invalid_input(format!(
                "risk-free rate must be finite, got {}",
                self.rate
            )));
        }
        Ok(())
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid_input(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

/// Standard normal CDF via the error function
pub fn norm_cdf(x: f64) -> f64 {
    (1.0 + libm::erf(x / SQRT_2)) / 2.0
}

pub fn d1_d2(input: &BSInputs) -> (f64, f64) {
    let s = input.spot;
    let k = input.strike;
    let t = input.time;
    let v = input.vol;
    let r = input.rate;

    let vol_sqrt_t = v * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * v * v) * t) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    (d1, d2)
}

pub fn black_scholes_price(input: BSInputs) -> Result<f64> {
    input.validate()?;

    let (d1, d2) = d1_d2(&input);
    let s = input.spot;
    let k = input.strike;
    let t = input.time;
    let r = input.rate;

    let price = match input.option_type {
        OptionType::Call => s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2),
        OptionType::Put => k * (-r * t).exp() * norm_cdf(-d2) - s * norm_cdf(-d1),
    };

    // Both formulas are non-negative analytically; clamp away rounding noise.
    Ok(price.max(0.0))
}

/// European option value for one contract
pub fn price(
    spot: f64,
    strike: f64,
    time_to_expiry_years: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> Result<f64> {
    black_scholes_price(BSInputs {
        spot,
        strike,
        time: time_to_expiry_years,
        vol: volatility,
        rate: risk_free_rate,
        option_type,
    })
}
