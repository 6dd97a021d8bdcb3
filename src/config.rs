use std::env;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{EngineError, Result};

/// Simple-moving-average periods.
#[derive(Debug, Clone)]
pub struct SmaConfig {
    /// Short SMA period in bars.
    pub short_period: usize,
    /// Long SMA period in bars.
    pub long_period: usize,
}

/// RSI period and band levels.
#[derive(Debug, Clone)]
pub struct RsiConfig {
    /// RSI lookback period in bars.
    pub period: usize,
    /// RSI level above which the market counts as overbought.
    pub overbought: Decimal,
    /// RSI level below which the market counts as oversold.
    pub oversold: Decimal,
}

/// ATR period and threshold-band multipliers.
#[derive(Debug, Clone)]
pub struct AtrConfig {
    /// ATR lookback period in bars.
    pub period: usize,
    /// Band multiplier applied when the trend is strong.
    pub strong_multiplier: Decimal,
    /// Band multiplier applied otherwise.
    pub weak_multiplier: Decimal,
}

/// Volume gate tuning.
#[derive(Debug, Clone)]
pub struct VolumeConfig {
    /// Number of most recent bars used for the rolling volume window.
    pub window_lookback: usize,
    /// Minimum current volume relative to the recent average for a
    /// volume-confirmed action.
    pub min_relative_to_avg: Decimal,
}

/// Market-state detection tuning.
#[derive(Debug, Clone)]
pub struct MarketStateConfig {
    /// Number of bars inspected for the high/low range.
    pub lookback_bars: usize,
    /// Range below this fraction of price counts as compressed.
    pub compression_pct: Decimal,
    /// Distance from a threshold band, as a fraction of price, that counts
    /// as a breakout attempt.
    pub breakout_eps_pct: Decimal,
}

/// SMA-difference percentage thresholds.
#[derive(Debug, Clone)]
pub struct SmaDiffConfig {
    /// |SMA diff %| above this marks a trending market.
    pub trending_pct: Decimal,
    /// |SMA diff %| above this marks a moderate trend.
    pub moderate_pct: Decimal,
    /// |SMA diff %| above this (with extreme RSI) marks a strong trend.
    pub strong_pct: Decimal,
    /// SMA diff % beyond which the composite score registers a signal.
    pub signal_pct: Decimal,
}

/// Composite-score decision thresholds.
#[derive(Debug, Clone)]
pub struct ScoreThresholds {
    /// Current score needed for a strong action.
    pub strong: i32,
    /// Previous score needed alongside `strong`.
    pub strong_prev: i32,
    /// Current score needed for a plain buy/sell.
    pub buy: i32,
    /// Previous score needed alongside `buy`.
    pub buy_prev: i32,
    /// Score needed to act on a breakout attempt.
    pub breakout: i32,
    /// |score| below this holds in a weak ranging market.
    pub neutral: i32,
}

/// Volume-ratio boundaries for the liquidity classification.
#[derive(Debug, Clone)]
pub struct LiquidityConfig {
    /// Local ratio above this (with `global_high`) marks high liquidity.
    pub local_high: Decimal,
    /// Global ratio above this (with `local_high`) marks high liquidity.
    pub global_high: Decimal,
    /// Local ratio below this marks low liquidity.
    pub local_low: Decimal,
    /// Global ratio below this marks low liquidity.
    pub global_low: Decimal,
}

/// ATR-percentage boundaries for the volatility classification.
#[derive(Debug, Clone)]
pub struct VolatilityConfig {
    /// ATR% below this is low volatility.
    pub low_pct: Decimal,
    /// ATR% below this is medium volatility; anything above is high.
    pub medium_pct: Decimal,
}

/// Confidence-score base and per-condition deltas.
///
/// Penalty fields carry their sign: a penalty is a negative delta that is
/// added, except `ranging_penalty` which is a positive amount subtracted.
#[derive(Debug, Clone)]
pub struct ConfidenceConfig {
    /// Starting confidence before any adjustment.
    pub base: i32,
    /// Added when RSI is outside the oversold/overbought band.
    pub rsi_extreme: i32,
    /// Added (negative) when RSI sits in the mid band instead.
    pub rsi_mid_penalty: i32,
    /// Added for a strong trend.
    pub trend_strong: i32,
    /// Added (negative) for a weak trend.
    pub trend_weak: i32,
    /// Added when volatility is low.
    pub volatility_low_bonus: i32,
    /// Added when liquidity is high.
    pub liquidity_high_bonus: i32,
    /// Added (negative) when liquidity is low.
    pub liquidity_low_penalty: i32,
    /// Added when SMA direction and RSI side agree.
    pub sma_rsi_agreement_bonus: i32,
    /// Added (negative) when SMA trends one way while RSI is extreme the
    /// other way.
    pub sma_rsi_conflict_penalty: i32,
    /// Subtracted when the market is consolidating or ranging.
    pub ranging_penalty: i32,
}

/// Engine configuration.
///
/// Loaded once at process start and read-only afterwards. Every threshold
/// and weight used by the signal pipeline is a named field here so that
/// behavior can be regression-tested against fixed configurations.
#[derive(Debug, Clone)]
pub struct Config {
    /// Quote asset appended to bare base-asset names (e.g. "USDT").
    pub quote_asset: String,
    /// Maximum number of bars retained in a series (oldest evicted first).
    pub max_bars: usize,
    /// Floor applied to any divisor that could legitimately be zero.
    pub min_safe_value: Decimal,
    /// SMA periods.
    pub sma: SmaConfig,
    /// RSI tuning.
    pub rsi: RsiConfig,
    /// ATR tuning.
    pub atr: AtrConfig,
    /// Volume gate tuning.
    pub volume: VolumeConfig,
    /// Market-state detection tuning.
    pub market_state: MarketStateConfig,
    /// SMA-difference thresholds.
    pub sma_diff: SmaDiffConfig,
    /// Composite-score thresholds.
    pub score_thresholds: ScoreThresholds,
    /// Liquidity ratio boundaries.
    pub liquidity: LiquidityConfig,
    /// Volatility boundaries.
    pub volatility: VolatilityConfig,
    /// Confidence weights.
    pub confidence: ConfidenceConfig,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// built-in defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let d = Config::default();

        Self {
            quote_asset: env::var("QUOTE_ASSET").unwrap_or(d.quote_asset),
            max_bars: env::var("SERIES_MAX_BARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.max_bars),
            min_safe_value: env::var("MIN_SAFE_VALUE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.min_safe_value),
            sma: SmaConfig {
                short_period: env::var("SMA_SHORT_PERIOD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.sma.short_period),
                long_period: env::var("SMA_LONG_PERIOD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.sma.long_period),
            },
            rsi: RsiConfig {
                period: env::var("RSI_PERIOD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.rsi.period),
                overbought: env::var("RSI_OVERBOUGHT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.rsi.overbought),
                oversold: env::var("RSI_OVERSOLD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.rsi.oversold),
            },
            atr: AtrConfig {
                period: env::var("ATR_PERIOD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.atr.period),
                strong_multiplier: env::var("ATR_STRONG_MULTIPLIER")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.atr.strong_multiplier),
                weak_multiplier: env::var("ATR_WEAK_MULTIPLIER")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.atr.weak_multiplier),
            },
            volume: VolumeConfig {
                window_lookback: env::var("VOLUME_WINDOW_LOOKBACK")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.volume.window_lookback),
                min_relative_to_avg: env::var("VOLUME_MIN_RELATIVE_TO_AVG")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.volume.min_relative_to_avg),
            },
            market_state: MarketStateConfig {
                lookback_bars: env::var("MARKET_LOOKBACK_BARS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.market_state.lookback_bars),
                compression_pct: env::var("MARKET_COMPRESSION_PCT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.market_state.compression_pct),
                breakout_eps_pct: env::var("MARKET_BREAKOUT_EPS_PCT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.market_state.breakout_eps_pct),
            },
            sma_diff: SmaDiffConfig {
                trending_pct: env::var("SMA_DIFF_TRENDING_PCT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.sma_diff.trending_pct),
                moderate_pct: env::var("SMA_DIFF_MODERATE_PCT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.sma_diff.moderate_pct),
                strong_pct: env::var("SMA_DIFF_STRONG_PCT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.sma_diff.strong_pct),
                signal_pct: env::var("SMA_DIFF_SIGNAL_PCT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.sma_diff.signal_pct),
            },
            score_thresholds: ScoreThresholds {
                strong: env::var("SCORE_STRONG")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.score_thresholds.strong),
                strong_prev: env::var("SCORE_STRONG_PREV")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.score_thresholds.strong_prev),
                buy: env::var("SCORE_BUY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.score_thresholds.buy),
                buy_prev: env::var("SCORE_BUY_PREV")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.score_thresholds.buy_prev),
                breakout: env::var("SCORE_BREAKOUT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.score_thresholds.breakout),
                neutral: env::var("SCORE_NEUTRAL")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.score_thresholds.neutral),
            },
            liquidity: LiquidityConfig {
                local_high: env::var("LIQUIDITY_LOCAL_HIGH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.liquidity.local_high),
                global_high: env::var("LIQUIDITY_GLOBAL_HIGH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.liquidity.global_high),
                local_low: env::var("LIQUIDITY_LOCAL_LOW")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.liquidity.local_low),
                global_low: env::var("LIQUIDITY_GLOBAL_LOW")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.liquidity.global_low),
            },
            volatility: VolatilityConfig {
                low_pct: env::var("VOLATILITY_LOW_PCT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.volatility.low_pct),
                medium_pct: env::var("VOLATILITY_MEDIUM_PCT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.volatility.medium_pct),
            },
            confidence: ConfidenceConfig {
                base: env::var("CONFIDENCE_BASE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.base),
                rsi_extreme: env::var("CONFIDENCE_RSI_EXTREME")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.rsi_extreme),
                rsi_mid_penalty: env::var("CONFIDENCE_RSI_MID_PENALTY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.rsi_mid_penalty),
                trend_strong: env::var("CONFIDENCE_TREND_STRONG")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.trend_strong),
                trend_weak: env::var("CONFIDENCE_TREND_WEAK")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.trend_weak),
                volatility_low_bonus: env::var("CONFIDENCE_VOLATILITY_LOW_BONUS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.volatility_low_bonus),
                liquidity_high_bonus: env::var("CONFIDENCE_LIQUIDITY_HIGH_BONUS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.liquidity_high_bonus),
                liquidity_low_penalty: env::var("CONFIDENCE_LIQUIDITY_LOW_PENALTY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.liquidity_low_penalty),
                sma_rsi_agreement_bonus: env::var("CONFIDENCE_SMA_RSI_AGREEMENT_BONUS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.sma_rsi_agreement_bonus),
                sma_rsi_conflict_penalty: env::var("CONFIDENCE_SMA_RSI_CONFLICT_PENALTY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.sma_rsi_conflict_penalty),
                ranging_penalty: env::var("CONFIDENCE_RANGING_PENALTY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(d.confidence.ranging_penalty),
            },
        }
    }

    /// Minimum number of bars a series must hold before signals can be
    /// evaluated.
    pub fn required_bars(&self) -> usize {
        self.sma
            .long_period
            .max(self.rsi.period)
            .max(self.atr.period)
            .max(self.volume.window_lookback)
    }

    /// Fail fast on a configuration the engine cannot evaluate with.
    pub fn validate(&self) -> Result<()> {
        if self.sma.short_period == 0 {
            return Err(EngineError::InvalidConfig(
                "SMA short period must be positive".into(),
            ));
        }
        if self.sma.long_period == 0 {
            return Err(EngineError::InvalidConfig(
                "SMA long period must be positive".into(),
            ));
        }
        if self.sma.short_period >= self.sma.long_period {
            return Err(EngineError::InvalidConfig(format!(
                "SMA short period {} must be less than long period {}",
                self.sma.short_period, self.sma.long_period
            )));
        }
        if self.rsi.period == 0 {
            return Err(EngineError::InvalidConfig(
                "RSI period must be positive".into(),
            ));
        }
        if self.rsi.oversold >= self.rsi.overbought {
            return Err(EngineError::InvalidConfig(format!(
                "RSI oversold {} must be below overbought {}",
                self.rsi.oversold, self.rsi.overbought
            )));
        }
        if self.atr.period == 0 {
            return Err(EngineError::InvalidConfig(
                "ATR period must be positive".into(),
            ));
        }
        if self.atr.strong_multiplier <= Decimal::ZERO
            || self.atr.weak_multiplier <= Decimal::ZERO
        {
            return Err(EngineError::InvalidConfig(
                "ATR multipliers must be positive".into(),
            ));
        }
        if self.volume.window_lookback == 0 {
            return Err(EngineError::InvalidConfig(
                "Volume window lookback must be positive".into(),
            ));
        }
        if self.market_state.lookback_bars == 0 {
            return Err(EngineError::InvalidConfig(
                "Market-state lookback must be positive".into(),
            ));
        }
        if self.min_safe_value <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig(
                "Minimum safe value must be positive".into(),
            ));
        }
        if self.max_bars < self.required_bars() {
            return Err(EngineError::InvalidConfig(format!(
                "Series bound {} is below the {} bars required for evaluation",
                self.max_bars,
                self.required_bars()
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_asset: "USDT".to_string(),
            max_bars: 500,
            min_safe_value: dec!(0.00000001),
            sma: SmaConfig {
                short_period: 7,
                long_period: 25,
            },
            rsi: RsiConfig {
                period: 14,
                overbought: dec!(70),
                oversold: dec!(30),
            },
            atr: AtrConfig {
                period: 14,
                strong_multiplier: dec!(2.0),
                weak_multiplier: dec!(1.5),
            },
            volume: VolumeConfig {
                window_lookback: 20,
                min_relative_to_avg: dec!(0.5),
            },
            market_state: MarketStateConfig {
                lookback_bars: 20,
                compression_pct: dec!(0.02),
                breakout_eps_pct: dec!(0.005),
            },
            sma_diff: SmaDiffConfig {
                trending_pct: dec!(1.0),
                moderate_pct: dec!(0.5),
                strong_pct: dec!(2.0),
                signal_pct: dec!(0.5),
            },
            score_thresholds: ScoreThresholds {
                strong: 5,
                strong_prev: 3,
                buy: 2,
                buy_prev: 1,
                breakout: 2,
                neutral: 2,
            },
            liquidity: LiquidityConfig {
                local_high: dec!(1.5),
                global_high: dec!(1.2),
                local_low: dec!(0.5),
                global_low: dec!(0.3),
            },
            volatility: VolatilityConfig {
                low_pct: dec!(1.0),
                medium_pct: dec!(3.0),
            },
            confidence: ConfidenceConfig {
                base: 50,
                rsi_extreme: 15,
                rsi_mid_penalty: -5,
                trend_strong: 15,
                trend_weak: -10,
                volatility_low_bonus: 5,
                liquidity_high_bonus: 10,
                liquidity_low_penalty: -15,
                sma_rsi_agreement_bonus: 10,
                sma_rsi_conflict_penalty: -20,
                ranging_penalty: 3,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_required_bars_takes_longest_lookback() {
        let config = Config::default();
        assert_eq!(config.required_bars(), 25);

        let mut config = Config::default();
        config.volume.window_lookback = 40;
        assert_eq!(config.required_bars(), 40);
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut config = Config::default();
        config.rsi.period = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_period_must_be_below_long() {
        let mut config = Config::default();
        config.sma.short_period = 25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_rsi_bands_rejected() {
        let mut config = Config::default();
        config.rsi.oversold = dec!(80);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_series_bound_must_cover_required_bars() {
        let mut config = Config::default();
        config.max_bars = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_floor_rejected() {
        let mut config = Config::default();
        config.min_safe_value = Decimal::ZERO;
        assert!(config.validate().is_err());
    }
}
