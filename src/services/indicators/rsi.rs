//! Relative Strength Index (RSI).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Series;

/// RSI over the close-price deltas of the `period` bars ending at `index`,
/// scaled 0–100.
///
/// Gains and losses are averaged over the window without exponential
/// smoothing. A window with no deltas, or with neither gains nor losses
/// (flat prices), yields the neutral value 50. A window with no losses
/// yields 100, no gains 0.
pub fn rsi(series: &Series, period: usize, index: usize) -> Decimal {
    let start = index.saturating_sub(period);
    if index == start {
        return dec!(50);
    }

    let bars = series.bars();
    let mut gains = Decimal::ZERO;
    let mut losses = Decimal::ZERO;
    for i in start + 1..=index {
        let change = bars[i].close - bars[i - 1].close;
        if change > Decimal::ZERO {
            gains += change;
        } else {
            losses -= change;
        }
    }

    if gains.is_zero() && losses.is_zero() {
        return dec!(50);
    }
    if losses.is_zero() {
        return dec!(100);
    }

    let count = Decimal::from((index - start) as u64);
    let avg_gain = gains / count;
    let avg_loss = losses / count;
    let rs = avg_gain / avg_loss;
    dec!(100) - (dec!(100) / (dec!(1) + rs))
}
