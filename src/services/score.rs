//! Adaptive threshold bands and the composite directional score.

use rust_decimal::Decimal;

use crate::config::Config;
use crate::services::classify;
use crate::types::{Liquidity, TrendStrength};

/// ATR band multiplier for the given trend strength.
pub fn atr_multiplier(trend_strength: TrendStrength, config: &Config) -> Decimal {
    if trend_strength == TrendStrength::Strong {
        config.atr.strong_multiplier
    } else {
        config.atr.weak_multiplier
    }
}

/// Upper and lower price bands around `base`, scaled by ATR.
pub fn thresholds(base: Decimal, atr: Decimal, multiplier: Decimal) -> (Decimal, Decimal) {
    let offset = atr * multiplier;
    (base + offset, base - offset)
}

/// Composite directional score for one bar.
///
/// Combines the SMA spread, RSI extremes, threshold-band breakouts, and
/// liquidity into a small signed integer. A breakout against the trend, or
/// without volume behind it, is penalized rather than rewarded. The same
/// formula is evaluated at the current and previous bar for the bar-over-bar
/// comparison.
#[allow(clippy::too_many_arguments)]
pub fn composite_score(
    price: Decimal,
    short_sma: Decimal,
    long_sma: Decimal,
    rsi: Decimal,
    threshold_upper: Decimal,
    threshold_lower: Decimal,
    liquidity: Liquidity,
    config: &Config,
) -> i32 {
    let mut score = 0;

    let sma_diff = classify::sma_diff_percent(short_sma, long_sma);
    let signal_pct = config.sma_diff.signal_pct;

    if sma_diff > signal_pct {
        score += 2;
    } else if sma_diff < -signal_pct {
        score -= 2;
    }

    if rsi < config.rsi.oversold {
        score += 2;
    }
    if rsi > config.rsi.overbought {
        score -= 2;
    }

    let liquid = liquidity.is_high_or_normal();

    if price > threshold_upper {
        if liquid && sma_diff > Decimal::ZERO {
            score += 2;
        } else {
            score -= 1;
        }
    }

    if price < threshold_lower {
        if liquid && sma_diff < Decimal::ZERO {
            score -= 2;
        } else {
            score += 1;
        }
    }

    if liquidity == Liquidity::Low {
        score -= 2;
    }

    score
}
