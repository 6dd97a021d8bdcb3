//! Per-symbol analysis orchestration.
//!
//! Ties the pipeline together: build the series, gate on the minimum bar
//! count, evaluate the indicators at the last and second-to-last bar,
//! classify conditions, score both bars, and resolve the final action.

use std::collections::HashMap;

use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::config::Config;
use crate::services::{classify, indicators, resolve, score};
use crate::types::{Analysis, Candle, IndicatorSnapshot, Series};

/// Evaluate a single symbol on demand. Side-effect-free: the structured
/// summary line is only logged by bulk sweeps.
pub fn evaluate(symbol: &str, candles: &[Candle], config: &Config) -> Analysis {
    analyze_symbol(symbol, candles, config, false)
}

/// Evaluate every symbol of a bulk sweep independently, logging the
/// structured per-symbol summary. Returns analyses keyed by normalized
/// symbol.
pub fn evaluate_all(
    candles_by_symbol: &HashMap<String, Vec<Candle>>,
    config: &Config,
) -> HashMap<String, Analysis> {
    info!("Running analysis sweep over {} symbols", candles_by_symbol.len());
    candles_by_symbol
        .iter()
        .map(|(symbol, candles)| {
            let analysis = analyze_symbol(symbol, candles, config, true);
            (analysis.symbol.clone(), analysis)
        })
        .collect()
}

/// Uppercase the pair name and append the quote asset if absent.
fn normalize_symbol(base_asset: &str, quote_asset: &str) -> String {
    let upper = base_asset.to_uppercase();
    let quote = quote_asset.to_uppercase();
    if upper.ends_with(&quote) {
        upper
    } else {
        format!("{}{}", upper, quote)
    }
}

fn analyze_symbol(
    base_asset: &str,
    candles: &[Candle],
    config: &Config,
    should_log: bool,
) -> Analysis {
    debug!("Analyzing {} candles for {}", candles.len(), base_asset);
    let symbol = normalize_symbol(base_asset, &config.quote_asset);

    let series = Series::from_candles(candles, config.max_bars);
    let required = config.required_bars();
    if series.len() < required {
        debug!(
            "Insufficient data for {}: {} of {} required bars",
            symbol,
            series.len(),
            required
        );
        return Analysis::insufficient_data(symbol);
    }

    evaluate_signals(&series, symbol, config, should_log)
}

fn evaluate_signals(
    series: &Series,
    symbol: String,
    config: &Config,
    should_log: bool,
) -> Analysis {
    debug!("Evaluating signals for {}, bar count: {}", symbol, series.len());
    let bars = series.bars();
    let end = series.len() - 1;
    let prev = end.saturating_sub(1);

    let price = bars[end].close;
    let short_sma = indicators::sma(series, config.sma.short_period, end);
    let long_sma = indicators::sma(series, config.sma.long_period, end);
    let rsi = indicators::rsi(series, config.rsi.period, end);
    let atr = indicators::atr(series, config.atr.period, end);

    let recent_avg_volume = indicators::median_volume(series, config.volume.window_lookback);
    let current_volume = bars[end].volume;

    let volatility = classify::volatility(atr, price, config);
    let trend_strength = classify::trend_strength(short_sma, long_sma, rsi, config);
    let liquidity = classify::liquidity(series, config);

    let multiplier = score::atr_multiplier(trend_strength, config);
    let (threshold_upper, threshold_lower) = score::thresholds(long_sma, atr, multiplier);

    // Previous-bar view for the bar-over-bar hysteresis, thresholds
    // included: the prior bar gets its own SMA/ATR and its own
    // trend-derived multiplier.
    let prev_price = bars[prev].close;
    let prev_short_sma = indicators::sma(series, config.sma.short_period, prev);
    let prev_long_sma = indicators::sma(series, config.sma.long_period, prev);
    let prev_rsi = indicators::rsi(series, config.rsi.period, prev);
    let prev_atr = indicators::atr(series, config.atr.period, prev);
    let prev_trend = classify::trend_strength(prev_short_sma, prev_long_sma, prev_rsi, config);
    let prev_multiplier = score::atr_multiplier(prev_trend, config);
    let (prev_upper, prev_lower) = score::thresholds(prev_long_sma, prev_atr, prev_multiplier);

    let market_state = classify::market_state(
        price,
        short_sma,
        long_sma,
        threshold_upper,
        threshold_lower,
        volatility,
        liquidity,
        series,
        config,
    );
    let risk_level = classify::risk_level(volatility, trend_strength, liquidity);
    let confidence_score = classify::confidence_score(
        rsi,
        short_sma,
        long_sma,
        trend_strength,
        volatility,
        liquidity,
        market_state,
        config,
    );

    let score_now = score::composite_score(
        price,
        short_sma,
        long_sma,
        rsi,
        threshold_upper,
        threshold_lower,
        liquidity,
        config,
    );
    let score_prev = score::composite_score(
        prev_price,
        prev_short_sma,
        prev_long_sma,
        prev_rsi,
        prev_upper,
        prev_lower,
        liquidity,
        config,
    );

    let action = resolve::resolve_action(
        score_now,
        score_prev,
        current_volume,
        recent_avg_volume,
        market_state,
        trend_strength,
        liquidity,
        config,
    );

    let sma_diff = classify::sma_diff_percent(short_sma, long_sma);
    let atr_percent = atr / price.max(config.min_safe_value) * dec!(100);
    let volume_ok = resolve::volume_ok(current_volume, recent_avg_volume, config);

    let indicators = IndicatorSnapshot {
        price,
        sma_short: short_sma,
        sma_long: long_sma,
        sma_diff,
        rsi,
        atr,
        atr_percent,
        upper_threshold: threshold_upper,
        lower_threshold: threshold_lower,
        current_volume,
        average_volume: recent_avg_volume,
        volume_ok,
    };

    if should_log {
        info!(
            "Symbol: {}, Action: {}, Market: {}, Volatility: {}, Trend: {}, Liquidity: {}, Risk: {}, Confidence: {}%",
            symbol,
            action.label(),
            market_state.label(),
            volatility.label(),
            trend_strength.label(),
            liquidity.label(),
            risk_level.label(),
            confidence_score
        );
        info!(
            "Symbol: {}, Price: {}, SMA{}: {}, SMA{}: {}, SMA Diff%: {}, RSI: {}, ATR: {}, ATR%: {}, Thresholds: {}/{}, Vol: {}/{}, Volume Ok: {}",
            symbol,
            price,
            config.sma.short_period,
            short_sma,
            config.sma.long_period,
            long_sma,
            sma_diff,
            rsi,
            atr,
            atr_percent,
            threshold_upper,
            threshold_lower,
            current_volume,
            recent_avg_volume,
            volume_ok
        );
    }

    Analysis {
        symbol,
        action,
        market_state: Some(market_state),
        volatility: Some(volatility),
        trend_strength: Some(trend_strength),
        liquidity: Some(liquidity),
        risk_level: Some(risk_level),
        confidence_score: Some(confidence_score),
        indicators: Some(indicators),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_appends_quote_asset() {
        assert_eq!(normalize_symbol("btc", "USDT"), "BTCUSDT");
        assert_eq!(normalize_symbol("ethusdt", "USDT"), "ETHUSDT");
        assert_eq!(normalize_symbol("SOL", "usdt"), "SOLUSDT");
    }
}
