//! Pure classification of market conditions from indicator values.
//!
//! Every function maps indicator values and configuration to one of the
//! closed classification enums. Divisors that can legitimately be zero are
//! floored at the configured minimum, so classification degrades instead of
//! failing on pathological data.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::Config;
use crate::services::indicators;
use crate::types::{Liquidity, MarketState, RiskLevel, Series, TrendStrength, Volatility};

/// (short − long) / long × 100, or zero when the long SMA is zero.
pub fn sma_diff_percent(short_sma: Decimal, long_sma: Decimal) -> Decimal {
    if long_sma.is_zero() {
        return Decimal::ZERO;
    }
    (short_sma - long_sma) / long_sma * dec!(100)
}

/// Classify volatility from ATR relative to price.
pub fn volatility(atr: Decimal, price: Decimal, config: &Config) -> Volatility {
    let atr_pct = atr / price.max(config.min_safe_value) * dec!(100);
    if atr_pct < config.volatility.low_pct {
        Volatility::Low
    } else if atr_pct < config.volatility.medium_pct {
        Volatility::Medium
    } else {
        Volatility::High
    }
}

/// Classify trend strength from the SMA spread, confirmed by RSI extremity.
pub fn trend_strength(
    short_sma: Decimal,
    long_sma: Decimal,
    rsi: Decimal,
    config: &Config,
) -> TrendStrength {
    if long_sma.is_zero() {
        return TrendStrength::Weak;
    }

    let diff = sma_diff_percent(short_sma, long_sma).abs();
    let rsi_extreme = rsi < config.rsi.oversold || rsi > config.rsi.overbought;

    if diff > config.sma_diff.strong_pct && rsi_extreme {
        TrendStrength::Strong
    } else if diff > config.sma_diff.moderate_pct {
        TrendStrength::Moderate
    } else {
        TrendStrength::Weak
    }
}

/// Classify liquidity from the last bar's volume against the windowed and
/// global averages.
pub fn liquidity(series: &Series, config: &Config) -> Liquidity {
    if series.len() < 2 {
        return Liquidity::Low;
    }

    let window_avg = indicators::window_avg_volume(series, config.volume.window_lookback);
    let global_avg = indicators::global_avg_volume(series);
    let current = series.bars()[series.len() - 1].volume;

    let local_ratio = current / window_avg.max(config.min_safe_value);
    let global_ratio = current / global_avg.max(config.min_safe_value);

    if local_ratio > config.liquidity.local_high && global_ratio > config.liquidity.global_high {
        Liquidity::High
    } else if local_ratio < config.liquidity.local_low
        || global_ratio < config.liquidity.global_low
    {
        Liquidity::Low
    } else {
        Liquidity::Normal
    }
}

/// Classify the market regime from range compression, proximity to the
/// threshold bands, and the SMA spread.
#[allow(clippy::too_many_arguments)]
pub fn market_state(
    price: Decimal,
    short_sma: Decimal,
    long_sma: Decimal,
    threshold_upper: Decimal,
    threshold_lower: Decimal,
    volatility: Volatility,
    liquidity: Liquidity,
    series: &Series,
    config: &Config,
) -> MarketState {
    let bars = series.bars();
    let lookback = config.market_state.lookback_bars.min(bars.len());
    let window = &bars[bars.len() - lookback..];

    let mut high = window[0].high;
    let mut low = window[0].low;
    for bar in &window[1..] {
        high = high.max(bar.high);
        low = low.min(bar.low);
    }

    let range = high - low;
    let compressed = range < price * config.market_state.compression_pct;

    let eps = price * config.market_state.breakout_eps_pct;
    let near_breakout = price > threshold_upper - eps || price < threshold_lower + eps;

    if near_breakout && liquidity == Liquidity::High {
        return MarketState::BreakoutAttempt;
    }
    if compressed && volatility == Volatility::Low {
        return MarketState::Consolidation;
    }
    if sma_diff_percent(short_sma, long_sma).abs() > config.sma_diff.trending_pct {
        return MarketState::Trending;
    }
    MarketState::Range
}

/// Classify aggregate risk from the adverse sub-conditions.
pub fn risk_level(
    volatility: Volatility,
    trend_strength: TrendStrength,
    liquidity: Liquidity,
) -> RiskLevel {
    let mut risk = 0;
    if volatility == Volatility::High {
        risk += 3;
    }
    if trend_strength == TrendStrength::Weak {
        risk += 3;
    }
    if liquidity == Liquidity::Low {
        risk += 3;
    }

    if risk <= 3 {
        RiskLevel::Low
    } else if risk <= 6 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Compute the confidence score from the configured base and per-condition
/// deltas.
///
/// Capped at 100; no floor is enforced, so heavily conflicting conditions
/// can push it negative.
#[allow(clippy::too_many_arguments)]
pub fn confidence_score(
    rsi: Decimal,
    short_sma: Decimal,
    long_sma: Decimal,
    trend_strength: TrendStrength,
    volatility: Volatility,
    liquidity: Liquidity,
    market_state: MarketState,
    config: &Config,
) -> i32 {
    let weights = &config.confidence;
    let mut score = weights.base;

    let sma_diff = sma_diff_percent(short_sma, long_sma);
    let rsi_extreme = rsi < config.rsi.oversold || rsi > config.rsi.overbought;

    if rsi_extreme {
        score += weights.rsi_extreme;
    } else {
        score += weights.rsi_mid_penalty;
    }

    match trend_strength {
        TrendStrength::Strong => score += weights.trend_strong,
        TrendStrength::Weak => score += weights.trend_weak,
        TrendStrength::Moderate => {}
    }

    if volatility == Volatility::Low {
        score += weights.volatility_low_bonus;
    }

    match liquidity {
        Liquidity::High => score += weights.liquidity_high_bonus,
        Liquidity::Low => score += weights.liquidity_low_penalty,
        Liquidity::Normal => {}
    }

    let mid = dec!(50);
    if sma_diff > Decimal::ZERO && rsi > mid {
        score += weights.sma_rsi_agreement_bonus;
    }
    if sma_diff < Decimal::ZERO && rsi < mid {
        score += weights.sma_rsi_agreement_bonus;
    }

    // SMA strongly trending one way while RSI is extreme the other way.
    let signal_pct = config.sma_diff.signal_pct;
    if sma_diff > signal_pct && rsi < config.rsi.oversold {
        score += weights.sma_rsi_conflict_penalty;
    }
    if sma_diff < -signal_pct && rsi > config.rsi.overbought {
        score += weights.sma_rsi_conflict_penalty;
    }

    if market_state.is_ranging() {
        score -= weights.ranging_penalty;
    }

    score.min(100)
}
