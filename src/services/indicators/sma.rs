//! Simple moving average of closing price.

use rust_decimal::Decimal;

use crate::types::Series;

/// Arithmetic mean of the close price over the `period` bars ending at
/// `index` (inclusive).
///
/// If fewer than `period` bars exist up to `index`, the mean covers the
/// bars that are available. An empty window yields zero.
pub fn sma(series: &Series, period: usize, index: usize) -> Decimal {
    let start = (index + 1).saturating_sub(period);
    let window = &series.bars()[start..=index];
    if window.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = window.iter().map(|bar| bar.close).sum();
    sum / Decimal::from(window.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Candle;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn series_with_closes(closes: &[Decimal]) -> Series {
        let candles: Vec<Candle> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let open_time = Utc.timestamp_opt(1_700_000_000 + i as i64 * 60, 0).unwrap();
                Candle {
                    symbol: "BTC".to_string(),
                    open_price: close,
                    high_price: close,
                    low_price: close,
                    close_price: close,
                    volume: dec!(1000),
                    amount: close * dec!(1000),
                    trades: 1,
                    open_time,
                    close_time: open_time + chrono::Duration::seconds(59),
                }
            })
            .collect();
        Series::from_candles(&candles, 1000)
    }

    #[test]
    fn test_sma_of_constant_series_is_the_constant() {
        let series = series_with_closes(&[dec!(100); 10]);
        assert_eq!(sma(&series, 5, 9), dec!(100));
    }

    #[test]
    fn test_sma_window_ends_at_index() {
        let series = series_with_closes(&[
            dec!(10),
            dec!(20),
            dec!(30),
            dec!(40),
            dec!(50),
        ]);
        assert_eq!(sma(&series, 3, 4), dec!(40));
        assert_eq!(sma(&series, 3, 2), dec!(20));
    }

    #[test]
    fn test_sma_degrades_over_short_history() {
        let series = series_with_closes(&[dec!(10), dec!(20)]);
        assert_eq!(sma(&series, 5, 1), dec!(15));
    }
}
