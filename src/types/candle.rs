use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One OHLCV observation for a symbol over a fixed time span.
///
/// Candles are owned by the external candle source; the engine treats them
/// as immutable value objects and never writes them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    pub symbol: String,
    pub open_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub close_price: Decimal,
    pub volume: Decimal,
    /// Total traded amount in quote units.
    pub amount: Decimal,
    /// Number of trades inside the candle.
    pub trades: u64,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
}

/// Normalized form of a candle used inside a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl From<&Candle> for Bar {
    fn from(candle: &Candle) -> Self {
        Self {
            open_time: candle.open_time,
            close_time: candle.close_time,
            open: candle.open_price,
            high: candle.high_price,
            low: candle.low_price,
            close: candle.close_price,
            volume: candle.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bar_from_candle_carries_ohlcv() {
        let candle = Candle {
            symbol: "BTCUSDT".to_string(),
            open_price: dec!(100),
            high_price: dec!(105),
            low_price: dec!(99),
            close_price: dec!(104),
            volume: dec!(1500),
            amount: dec!(153000),
            trades: 42,
            open_time: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            close_time: Utc.timestamp_opt(1_700_000_060, 0).unwrap(),
        };

        let bar = Bar::from(&candle);
        assert_eq!(bar.open, dec!(100));
        assert_eq!(bar.high, dec!(105));
        assert_eq!(bar.low, dec!(99));
        assert_eq!(bar.close, dec!(104));
        assert_eq!(bar.volume, dec!(1500));
        assert_eq!(bar.open_time, candle.open_time);
        assert_eq!(bar.close_time, candle.close_time);
    }
}
