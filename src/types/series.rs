use chrono::{DateTime, Utc};

use crate::types::{Bar, Candle};

/// Strictly time-ordered, deduplicated, length-bounded bar sequence for one
/// symbol.
///
/// Bars are held in a flat buffer so the indicator engine can address the
/// current and previous bar by index in O(1).
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Build a series from an unordered, possibly duplicate-prone candle
    /// list.
    ///
    /// Candles are sorted ascending by open time; any candle whose close
    /// time is not strictly after the last accepted bar's close time is
    /// dropped as stale. The result keeps at most the newest `max_bars`
    /// bars. Deterministic for a given candle multiset.
    pub fn from_candles(candles: &[Candle], max_bars: usize) -> Self {
        let mut sorted: Vec<&Candle> = candles.iter().collect();
        sorted.sort_by_key(|c| c.open_time);

        let mut bars: Vec<Bar> = Vec::with_capacity(sorted.len());
        let mut last_close: Option<DateTime<Utc>> = None;

        for candle in sorted {
            if let Some(last) = last_close {
                if candle.close_time <= last {
                    continue;
                }
            }
            last_close = Some(candle.close_time);
            bars.push(Bar::from(candle));
        }

        if bars.len() > max_bars {
            bars.drain(..bars.len() - max_bars);
        }

        Self { bars }
    }

    /// Number of bars in the series.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series holds no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The full bar buffer, oldest first.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// The most recent bar, if any.
    pub fn last_bar(&self) -> Option<&Bar> {
        self.bars.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn candle(minute: i64, close: Decimal, volume: Decimal) -> Candle {
        let open_time = Utc.timestamp_opt(1_700_000_000 + minute * 60, 0).unwrap();
        Candle {
            symbol: "BTC".to_string(),
            open_price: close,
            high_price: close + dec!(1),
            low_price: close - dec!(1),
            close_price: close,
            volume,
            amount: close * volume,
            trades: 10,
            open_time,
            close_time: open_time + chrono::Duration::seconds(59),
        }
    }

    fn to_candles(series: &Series) -> Vec<Candle> {
        series
            .bars()
            .iter()
            .map(|bar| Candle {
                symbol: "BTC".to_string(),
                open_price: bar.open,
                high_price: bar.high,
                low_price: bar.low,
                close_price: bar.close,
                volume: bar.volume,
                amount: bar.close * bar.volume,
                trades: 10,
                open_time: bar.open_time,
                close_time: bar.close_time,
            })
            .collect()
    }

    #[test]
    fn test_sorts_unordered_candles() {
        let candles = vec![
            candle(2, dec!(102), dec!(10)),
            candle(0, dec!(100), dec!(10)),
            candle(1, dec!(101), dec!(10)),
        ];
        let series = Series::from_candles(&candles, 100);
        assert_eq!(series.len(), 3);
        let closes: Vec<Decimal> = series.bars().iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![dec!(100), dec!(101), dec!(102)]);
    }

    #[test]
    fn test_drops_duplicate_close_times() {
        let mut candles = vec![
            candle(0, dec!(100), dec!(10)),
            candle(1, dec!(101), dec!(10)),
        ];
        candles.push(candle(1, dec!(999), dec!(10)));
        let series = Series::from_candles(&candles, 100);
        assert_eq!(series.len(), 2);
        assert_eq!(series.last_bar().unwrap().close, dec!(101));
    }

    #[test]
    fn test_drops_out_of_order_close_times() {
        // Second candle opens later but closes before the first one.
        let mut stale = candle(1, dec!(50), dec!(10));
        stale.close_time = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let candles = vec![candle(0, dec!(100), dec!(10)), stale];
        let series = Series::from_candles(&candles, 100);
        assert_eq!(series.len(), 1);
        assert_eq!(series.last_bar().unwrap().close, dec!(100));
    }

    #[test]
    fn test_bounded_to_max_bars_keeping_newest() {
        let candles: Vec<Candle> = (0..10)
            .map(|i| candle(i, dec!(100) + Decimal::from(i), dec!(10)))
            .collect();
        let series = Series::from_candles(&candles, 4);
        assert_eq!(series.len(), 4);
        assert_eq!(series.bars()[0].close, dec!(106));
        assert_eq!(series.last_bar().unwrap().close, dec!(109));
    }

    #[test]
    fn test_builder_is_idempotent() {
        let candles: Vec<Candle> = (0..8)
            .map(|i| candle(i, dec!(100) + Decimal::from(i), dec!(10)))
            .collect();
        let series = Series::from_candles(&candles, 5);
        let rebuilt = Series::from_candles(&to_candles(&series), 5);
        assert_eq!(series, rebuilt);
    }

    #[test]
    fn test_reverse_arrival_order_yields_identical_bars() {
        let candles: Vec<Candle> = (0..12)
            .map(|i| candle(i, dec!(200) - Decimal::from(i), dec!(5) + Decimal::from(i)))
            .collect();
        let mut reversed = candles.clone();
        reversed.reverse();

        let forward = Series::from_candles(&candles, 100);
        let backward = Series::from_candles(&reversed, 100);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        let series = Series::from_candles(&[], 100);
        assert!(series.is_empty());
        assert!(series.last_bar().is_none());
    }
}
