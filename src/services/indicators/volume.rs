//! Volume aggregates over a bar series.

use rust_decimal::Decimal;

use crate::types::Series;

/// Median volume of the last `lookback` bars.
///
/// The median, not the mean, so a single-bar volume spike inside the window
/// does not distort the volume gate.
pub fn median_volume(series: &Series, lookback: usize) -> Decimal {
    let bars = series.bars();
    let take = lookback.min(bars.len());
    if take == 0 {
        return Decimal::ZERO;
    }

    let mut volumes: Vec<Decimal> = bars[bars.len() - take..]
        .iter()
        .map(|bar| bar.volume)
        .collect();
    volumes.sort();

    if take % 2 == 1 {
        volumes[take / 2]
    } else {
        (volumes[take / 2 - 1] + volumes[take / 2]) / Decimal::from(2u64)
    }
}

/// Arithmetic mean volume of the last `lookback` bars.
pub fn window_avg_volume(series: &Series, lookback: usize) -> Decimal {
    let bars = series.bars();
    let take = lookback.min(bars.len());
    if take == 0 {
        return Decimal::ZERO;
    }
    let sum: Decimal = bars[bars.len() - take..].iter().map(|bar| bar.volume).sum();
    sum / Decimal::from(take as u64)
}

/// Arithmetic mean volume over the whole series.
pub fn global_avg_volume(series: &Series) -> Decimal {
    if series.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = series.bars().iter().map(|bar| bar.volume).sum();
    sum / Decimal::from(series.len() as u64)
}
