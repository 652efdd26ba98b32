//! Internal rate of return solving and annualization.
//!
//! The estimator models a DCA run as `n` equal daily outflows followed by
//! one terminal inflow, and solves for the per-period rate that zeroes the
//! net present value of that sequence. Solving runs in `f64` (the rate is
//! a root of a high-degree polynomial; exact decimal arithmetic buys
//! nothing here) and the result is surfaced as a `Decimal` percentage.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::constants::TRADING_DAYS_PER_YEAR;
use crate::errors::{Error, Result};

/// Maximum Newton-Raphson iterations before falling back to bisection.
const MAX_NEWTON_ITERATIONS: u32 = 100;

/// Maximum bisection iterations.
const MAX_BISECTION_ITERATIONS: u32 = 200;

/// Convergence tolerance on the rate.
const RATE_TOLERANCE: f64 = 1e-9;

/// Rates are searched above this bound; at -100% per period the NPV
/// function blows up.
const MIN_RATE: f64 = -0.999_999;

/// Net present value of a cash-flow sequence at the given per-period rate.
/// Flow `i` is discounted by `(1 + rate)^i`.
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(i, cf)| cf / (1.0 + rate).powi(i as i32))
        .sum()
}

fn npv_derivative(rate: f64, cash_flows: &[f64]) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, cf)| -(i as f64) * cf / (1.0 + rate).powi(i as i32 + 1))
        .sum()
}

/// Solve for the per-period internal rate of return of a cash-flow
/// sequence: the rate `r` with `npv(r, cash_flows) == 0`.
///
/// Newton-Raphson from a small positive guess, with a bisection fallback
/// over an expanding bracket when Newton diverges. Returns
/// [`Error::IrrNoConvergence`] when no sign change can be bracketed or the
/// iteration budget runs out.
pub fn irr(cash_flows: &[f64]) -> Result<f64> {
    if cash_flows.len() < 2 {
        return Err(Error::Validation(
            "IRR requires at least two cash flows".to_string(),
        ));
    }

    if let Some(rate) = newton_raphson(cash_flows) {
        return Ok(rate);
    }

    bisect(cash_flows)
}

fn newton_raphson(cash_flows: &[f64]) -> Option<f64> {
    let mut rate = 0.001;
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let value = npv(rate, cash_flows);
        let slope = npv_derivative(rate, cash_flows);
        if slope == 0.0 || !slope.is_finite() {
            return None;
        }
        let next = rate - value / slope;
        if !next.is_finite() || next <= MIN_RATE {
            return None;
        }
        if (next - rate).abs() < RATE_TOLERANCE {
            return Some(next);
        }
        rate = next;
    }
    None
}

fn bisect(cash_flows: &[f64]) -> Result<f64> {
    // Expand the upper bound until the NPV changes sign across the bracket.
    let mut lo = MIN_RATE;
    let mut hi = 1.0;
    let npv_lo = npv(lo, cash_flows);
    let mut expansions = 0;
    while npv_lo.signum() == npv(hi, cash_flows).signum() {
        hi *= 2.0;
        expansions += 1;
        if expansions > 60 {
            return Err(Error::IrrNoConvergence {
                iterations: MAX_NEWTON_ITERATIONS + expansions,
            });
        }
    }

    for _ in 0..MAX_BISECTION_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let value = npv(mid, cash_flows);
        if value == 0.0 || (hi - lo) / 2.0 < RATE_TOLERANCE {
            return Ok(mid);
        }
        if value.signum() == npv(lo, cash_flows).signum() {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Err(Error::IrrNoConvergence {
        iterations: MAX_NEWTON_ITERATIONS + MAX_BISECTION_ITERATIONS,
    })
}

/// Annualized IRR, in percent, of a DCA run: `n_days` outflows of
/// `daily_amount` followed by one inflow of `terminal_value`.
///
/// The per-period rate is compounded over the 252-trading-day year:
/// `(1 + r)^252 - 1`.
pub fn annualized_irr_pct(
    daily_amount: Decimal,
    n_days: usize,
    terminal_value: Decimal,
) -> Result<Decimal> {
    let outflow = daily_amount
        .to_f64()
        .ok_or_else(|| Error::Validation("daily amount is not representable as f64".to_string()))?;
    let inflow = terminal_value.to_f64().ok_or_else(|| {
        Error::Validation("terminal value is not representable as f64".to_string())
    })?;

    let mut cash_flows = vec![-outflow; n_days];
    cash_flows.push(inflow);

    let rate = irr(&cash_flows)?;
    let annual = (1.0 + rate).powi(TRADING_DAYS_PER_YEAR as i32) - 1.0;

    Decimal::from_f64_retain(annual * 100.0)
        .ok_or_else(|| Error::Validation("annualized IRR is not representable".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Terminal inflow that makes the NPV of `n` outflows of `d` zero at
    /// rate `r0`: sum of each outflow compounded forward to period `n`.
    fn terminal_for_rate(d: f64, n: usize, r0: f64) -> f64 {
        (0..n).map(|i| d * (1.0 + r0).powi((n - i) as i32)).sum()
    }

    #[test]
    fn test_zero_rate_when_terminal_equals_invested() {
        let mut flows = vec![-10.0; 252];
        flows.push(2520.0);
        let rate = irr(&flows).unwrap();
        assert!(rate.abs() < 1e-8, "rate = {}", rate);
    }

    #[test]
    fn test_irr_round_trip_recovers_known_rate() {
        for &r0 in &[0.0005, 0.001, 0.01, -0.0002] {
            let n = 252;
            let terminal = terminal_for_rate(10.0, n, r0);
            let mut flows = vec![-10.0; n];
            flows.push(terminal);
            let rate = irr(&flows).unwrap();
            assert!(
                (rate - r0).abs() < 1e-6,
                "expected {} got {}",
                r0,
                rate
            );
        }
    }

    #[test]
    fn test_npv_discounts_later_flows() {
        let flows = [-100.0, 50.0, 60.0];
        let value = npv(0.1, &flows);
        let expected = -100.0 + 50.0 / 1.1 + 60.0 / 1.1_f64.powi(2);
        assert!((value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_flows_is_an_error() {
        assert!(matches!(irr(&[-10.0]), Err(Error::Validation(_))));
    }

    #[test]
    fn test_all_negative_flows_do_not_converge() {
        let flows = vec![-10.0; 20];
        assert!(matches!(
            irr(&flows),
            Err(Error::IrrNoConvergence { .. })
        ));
    }

    #[test]
    fn test_annualized_flat_run_is_zero() {
        let pct = annualized_irr_pct(dec!(10), 252, dec!(2520)).unwrap();
        assert!(pct.abs() < dec!(0.000001), "pct = {}", pct);
    }

    #[test]
    fn test_annualized_positive_run() {
        // 0.1% per trading day compounds to roughly 28.6% a year.
        let terminal = terminal_for_rate(10.0, 252, 0.001);
        let pct = annualized_irr_pct(
            dec!(10),
            252,
            Decimal::from_f64_retain(terminal).unwrap(),
        )
        .unwrap();
        assert!(pct > dec!(28) && pct < dec!(29), "pct = {}", pct);
    }
}
