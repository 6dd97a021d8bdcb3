use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Final trading recommendation for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    /// Sentinel: the series is too short to evaluate. Not an error.
    InsufficientData,
}

impl Action {
    /// Get display label for this action.
    pub fn label(&self) -> &'static str {
        match self {
            Action::StrongBuy => "Strong Buy",
            Action::Buy => "Buy",
            Action::Hold => "Hold",
            Action::Sell => "Sell",
            Action::StrongSell => "Strong Sell",
            Action::InsufficientData => "Insufficient Data",
        }
    }
}

/// Market regime derived from range compression and the threshold bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketState {
    Trending,
    Range,
    Consolidation,
    BreakoutAttempt,
}

impl MarketState {
    pub fn label(&self) -> &'static str {
        match self {
            MarketState::Trending => "Trending",
            MarketState::Range => "Range",
            MarketState::Consolidation => "Consolidation",
            MarketState::BreakoutAttempt => "Breakout Attempt",
        }
    }

    /// Whether the market is moving sideways.
    pub fn is_ranging(&self) -> bool {
        matches!(self, MarketState::Consolidation | MarketState::Range)
    }
}

/// Volatility classification from ATR relative to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

impl Volatility {
    pub fn label(&self) -> &'static str {
        match self {
            Volatility::Low => "Low",
            Volatility::Medium => "Medium",
            Volatility::High => "High",
        }
    }
}

/// Trend strength from the SMA spread and RSI extremity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
}

impl TrendStrength {
    pub fn label(&self) -> &'static str {
        match self {
            TrendStrength::Weak => "Weak",
            TrendStrength::Moderate => "Moderate",
            TrendStrength::Strong => "Strong",
        }
    }
}

/// Volume-ratio-derived liquidity classification.
///
/// This reflects traded volume against its recent and global averages, not
/// order-book depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Liquidity {
    Low,
    Normal,
    High,
}

impl Liquidity {
    pub fn label(&self) -> &'static str {
        match self {
            Liquidity::Low => "Low",
            Liquidity::Normal => "Normal",
            Liquidity::High => "High",
        }
    }

    /// Whether liquidity is good enough to confirm a signal.
    pub fn is_high_or_normal(&self) -> bool {
        matches!(self, Liquidity::High | Liquidity::Normal)
    }
}

/// Aggregate risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Indicator values backing an analysis, produced once per evaluated symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    /// Close price of the most recent bar.
    pub price: Decimal,
    /// Short SMA at the most recent bar.
    pub sma_short: Decimal,
    /// Long SMA at the most recent bar.
    pub sma_long: Decimal,
    /// (short − long) / long × 100.
    pub sma_diff: Decimal,
    /// RSI at the most recent bar, 0–100.
    pub rsi: Decimal,
    /// ATR at the most recent bar, in price units.
    pub atr: Decimal,
    /// ATR as a percentage of price.
    pub atr_percent: Decimal,
    /// Upper adaptive threshold band.
    pub upper_threshold: Decimal,
    /// Lower adaptive threshold band.
    pub lower_threshold: Decimal,
    /// Volume of the most recent bar.
    pub current_volume: Decimal,
    /// Median volume over the rolling window.
    pub average_volume: Decimal,
    /// Whether current volume clears the configured fraction of the average.
    pub volume_ok: bool,
}

/// Externally visible analysis result for one symbol.
///
/// Immutable once constructed. The classification fields are absent when the
/// action is [`Action::InsufficientData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub symbol: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_state: Option<MarketState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<Volatility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_strength: Option<TrendStrength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<Liquidity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    /// Confidence 0–100; may go negative when conditions stack badly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<IndicatorSnapshot>,
}

impl Analysis {
    /// Sentinel analysis for a series too short to evaluate.
    pub fn insufficient_data(symbol: String) -> Self {
        Self {
            symbol,
            action: Action::InsufficientData,
            market_state: None,
            volatility: None,
            trend_strength: None,
            liquidity: None,
            risk_level: None,
            confidence_score: None,
            indicators: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serializes_snake_case() {
        let json = serde_json::to_string(&Action::StrongBuy).unwrap();
        assert_eq!(json, "\"strong_buy\"");
        let json = serde_json::to_string(&Action::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient_data\"");
    }

    #[test]
    fn test_liquidity_is_high_or_normal() {
        assert!(Liquidity::High.is_high_or_normal());
        assert!(Liquidity::Normal.is_high_or_normal());
        assert!(!Liquidity::Low.is_high_or_normal());
    }

    #[test]
    fn test_market_state_is_ranging() {
        assert!(MarketState::Range.is_ranging());
        assert!(MarketState::Consolidation.is_ranging());
        assert!(!MarketState::Trending.is_ranging());
        assert!(!MarketState::BreakoutAttempt.is_ranging());
    }

    #[test]
    fn test_insufficient_data_has_no_classifications() {
        let analysis = Analysis::insufficient_data("BTCUSDT".to_string());
        assert_eq!(analysis.action, Action::InsufficientData);
        assert!(analysis.indicators.is_none());
        assert!(analysis.market_state.is_none());
        assert!(analysis.confidence_score.is_none());

        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json.get("indicators").is_none());
        assert!(json.get("marketState").is_none());
    }
}
