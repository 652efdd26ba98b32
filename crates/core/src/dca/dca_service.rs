//! DCA estimation service.
//!
//! One request runs a single sequential pipeline: roll the start date back
//! to a trading day, fetch closing prices, run the pure arithmetic, and,
//! when the window has already ended, fetch the most recent close and
//! value the position today. Nothing is cached or retried; the service is
//! stateless between invocations.

use chrono::{Days, NaiveDate};
use log::debug;
use rust_decimal::Decimal;

use dcafolio_market_data::MarketDataProvider;

use crate::calendar::{today_market_date, MarketCalendar};
use crate::constants::DECIMAL_PRECISION;
use crate::dca::{CurrentValuation, DcaEstimate, DcaRequest, InvestmentPlan};
use crate::errors::{Error, Result};
use crate::irr::annualized_irr_pct;

/// Size of the trailing window fetched to find the most recent close.
const RECENT_WINDOW_DAYS: u64 = 10;

/// Dollar-cost-average portfolio estimator.
///
/// Generic over the price source and the trading-day oracle so tests can
/// substitute in-memory fakes.
pub struct DcaEstimator<P, C> {
    provider: P,
    calendar: C,
}

/// Pure metrics over an ordered series of closes.
struct WindowMetrics {
    average_price: Decimal,
    latest_close: Decimal,
    contribution_days: usize,
    invested: Decimal,
    return_pct: Decimal,
    profit: Decimal,
    portfolio_value: Decimal,
    shares: Decimal,
}

impl<P, C> DcaEstimator<P, C>
where
    P: MarketDataProvider,
    C: MarketCalendar,
{
    pub fn new(provider: P, calendar: C) -> Self {
        Self { provider, calendar }
    }

    /// Estimate the outcome of the requested DCA run, using the exchange's
    /// current calendar date as "today".
    pub async fn estimate(&self, request: &DcaRequest) -> Result<DcaEstimate> {
        self.estimate_as_of(request, today_market_date()).await
    }

    /// Estimate the outcome of the requested DCA run as of a given date.
    ///
    /// The present-day valuation block is computed only when the request's
    /// end date is at or before `today`.
    pub async fn estimate_as_of(
        &self,
        request: &DcaRequest,
        today: NaiveDate,
    ) -> Result<DcaEstimate> {
        validate(request)?;

        let start = self.calendar.previous_trading_day(request.start);
        let start_adjusted = start != request.start;
        if start_adjusted {
            debug!(
                "Start date {} adjusted to previous trading day {}",
                request.start, start
            );
        }

        let daily_amount = request.plan.daily_amount();
        let quotes = self
            .provider
            .get_historical_quotes(&request.symbol, start, request.end)
            .await?;
        let closes: Vec<Decimal> = quotes.iter().map(|q| q.close).collect();
        let metrics = compute_window_metrics(daily_amount, &closes)?;

        let current = if request.end <= today {
            Some(
                self.value_today(&request.symbol, today, daily_amount, &metrics)
                    .await?,
            )
        } else {
            None
        };

        Ok(DcaEstimate {
            symbol: request.symbol.clone(),
            start,
            start_adjusted,
            end: request.end,
            daily_amount,
            contribution_days: metrics.contribution_days,
            average_price: metrics.average_price,
            latest_close: metrics.latest_close,
            invested: metrics.invested,
            return_pct: metrics.return_pct,
            profit: metrics.profit,
            portfolio_value: metrics.portfolio_value,
            shares: metrics.shares,
            current,
        })
    }

    /// Value the accumulated shares at the most recent trading-day close.
    ///
    /// The original estimator was ambiguous about which sample of the
    /// trailing window counted as "today's price"; this implementation
    /// always uses the most recent trading day.
    async fn value_today(
        &self,
        symbol: &str,
        today: NaiveDate,
        daily_amount: Decimal,
        metrics: &WindowMetrics,
    ) -> Result<CurrentValuation> {
        let window_start = today
            .checked_sub_days(Days::new(RECENT_WINDOW_DAYS))
            .ok_or_else(|| Error::Validation("date out of range".to_string()))?;
        let recent = self
            .provider
            .get_historical_quotes(symbol, window_start, today)
            .await?;
        let price = recent
            .last()
            .map(|q| q.close)
            .ok_or(Error::MarketData(
                dcafolio_market_data::MarketDataError::NoDataForRange,
            ))?;

        let value = metrics.shares * price;
        let net_growth_pct = (value / metrics.invested - Decimal::ONE) * Decimal::ONE_HUNDRED;
        let net_growth = metrics.invested * net_growth_pct / Decimal::ONE_HUNDRED;
        let annualized_irr_pct =
            annualized_irr_pct(daily_amount, metrics.contribution_days, value)?;

        Ok(CurrentValuation {
            price,
            value,
            net_growth_pct,
            net_growth,
            annualized_irr_pct,
        })
    }
}

fn validate(request: &DcaRequest) -> Result<()> {
    if request.plan.amount() <= Decimal::ZERO {
        return Err(Error::Validation(
            "investment amount must be positive".to_string(),
        ));
    }
    if request.start > request.end {
        return Err(Error::Validation(
            "start date must not be after end date".to_string(),
        ));
    }
    Ok(())
}

/// The core DCA arithmetic over ordered closes `c_1..c_n`:
///
/// - `average = mean(c_1..c_n)`
/// - `invested = daily_amount * n`
/// - `return_pct = (latest / average - 1) * 100`
/// - `profit = invested * return_pct / 100`
/// - `portfolio_value = invested + profit`
/// - `shares = portfolio_value / latest`, rounded to six decimal places
fn compute_window_metrics(daily_amount: Decimal, closes: &[Decimal]) -> Result<WindowMetrics> {
    let latest_close = *closes
        .last()
        .ok_or_else(|| Error::Validation("price series is empty".to_string()))?;
    let contribution_days = closes.len();
    let count = Decimal::from(contribution_days as u64);

    let sum: Decimal = closes.iter().sum();
    let average_price = sum / count;
    if average_price <= Decimal::ZERO {
        return Err(Error::Validation(
            "average price must be positive".to_string(),
        ));
    }

    let invested = daily_amount * count;
    let return_pct = (latest_close / average_price - Decimal::ONE) * Decimal::ONE_HUNDRED;
    let profit = invested * return_pct / Decimal::ONE_HUNDRED;
    let portfolio_value = invested + profit;
    let shares = (portfolio_value / latest_close).round_dp(DECIMAL_PRECISION);

    Ok(WindowMetrics {
        average_price,
        latest_close,
        contribution_days,
        invested,
        return_pct,
        profit,
        portfolio_value,
        shares,
    })
}
