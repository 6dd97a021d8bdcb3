//! Average True Range (ATR).

use rust_decimal::Decimal;

use crate::types::{Bar, Series};

/// True range of a bar given the previous bar's close.
///
/// TR = max(high − low, |high − prevClose|, |low − prevClose|). The very
/// first bar has no previous close and uses its own high − low span.
fn true_range(bar: &Bar, prev_close: Option<Decimal>) -> Decimal {
    let hl = bar.high - bar.low;
    match prev_close {
        Some(prev) => {
            let hc = (bar.high - prev).abs();
            let lc = (bar.low - prev).abs();
            hl.max(hc).max(lc)
        }
        None => hl,
    }
}

/// Average of the `period` true-range values ending at `index` (inclusive).
///
/// If fewer bars exist up to `index`, the average covers what is available.
pub fn atr(series: &Series, period: usize, index: usize) -> Decimal {
    let bars = series.bars();
    let start = (index + 1).saturating_sub(period);
    let count = index + 1 - start;
    if count == 0 {
        return Decimal::ZERO;
    }

    let mut sum = Decimal::ZERO;
    for i in start..=index {
        let prev_close = if i > 0 { Some(bars[i - 1].close) } else { None };
        sum += true_range(&bars[i], prev_close);
    }
    sum / Decimal::from(count as u64)
}
