//! Tiered resolution of the composite score into a final action.

use rust_decimal::Decimal;

use crate::config::Config;
use crate::types::{Action, Liquidity, MarketState, TrendStrength};

/// Whether the current volume clears the configured fraction of the recent
/// average. The average is floored so a dead market cannot pass the gate by
/// dividing into zero.
pub fn volume_ok(current_volume: Decimal, recent_avg_volume: Decimal, config: &Config) -> bool {
    let safe_avg = recent_avg_volume.max(config.min_safe_value);
    current_volume >= safe_avg * config.volume.min_relative_to_avg
}

/// Resolve the final action from the bar-over-bar scores and the market
/// classifications. First matching rule wins.
#[allow(clippy::too_many_arguments)]
pub fn resolve_action(
    score_now: i32,
    score_prev: i32,
    current_volume: Decimal,
    recent_avg_volume: Decimal,
    market_state: MarketState,
    trend_strength: TrendStrength,
    liquidity: Liquidity,
    config: &Config,
) -> Action {
    let thresholds = &config.score_thresholds;
    let volume_ok = volume_ok(current_volume, recent_avg_volume, config);
    let liquidity_ok = liquidity.is_high_or_normal();
    let liquidity_low = liquidity == Liquidity::Low;

    // A weak, sideways market with a near-neutral score or thin volume is
    // not worth acting in.
    if market_state.is_ranging()
        && trend_strength == TrendStrength::Weak
        && (score_now.abs() < thresholds.neutral || liquidity_low)
    {
        return Action::Hold;
    }

    // Breakout attempts only count when volume and liquidity back them.
    if market_state == MarketState::BreakoutAttempt {
        if score_now >= thresholds.breakout && volume_ok && liquidity_ok {
            return Action::Buy;
        }
        if score_now <= -thresholds.breakout && volume_ok && liquidity_ok {
            return Action::Sell;
        }
        return Action::Hold;
    }

    // Strong actions need both bars to agree and the volume gate open.
    if score_now >= thresholds.strong
        && score_prev >= thresholds.strong_prev
        && volume_ok
        && liquidity_ok
    {
        return Action::StrongBuy;
    }
    if score_now <= -thresholds.strong
        && score_prev <= -thresholds.strong_prev
        && volume_ok
        && liquidity_ok
    {
        return Action::StrongSell;
    }

    if score_now >= thresholds.buy {
        if score_prev >= thresholds.buy_prev {
            if liquidity_low && !volume_ok {
                return Action::Hold;
            }
            return Action::Buy;
        }
        if volume_ok && liquidity_ok {
            return Action::Buy;
        }
    }
    if score_now <= -thresholds.buy {
        if score_prev <= -thresholds.buy_prev {
            if liquidity_low && !volume_ok {
                return Action::Hold;
            }
            return Action::Sell;
        }
        if volume_ok && liquidity_ok {
            return Action::Sell;
        }
    }

    Action::Hold
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const VOLUME: Decimal = dec!(1000);
    const AVG: Decimal = dec!(1000);

    #[test]
    fn test_weak_ranging_market_holds() {
        let config = Config::default();
        let action = resolve_action(
            1,
            1,
            VOLUME,
            AVG,
            MarketState::Range,
            TrendStrength::Weak,
            Liquidity::Normal,
            &config,
        );
        assert_eq!(action, Action::Hold);
    }

    #[test]
    fn test_weak_consolidation_with_low_liquidity_holds_any_score() {
        let config = Config::default();
        let action = resolve_action(
            6,
            6,
            VOLUME,
            AVG,
            MarketState::Consolidation,
            TrendStrength::Weak,
            Liquidity::Low,
            &config,
        );
        assert_eq!(action, Action::Hold);
    }

    #[test]
    fn test_breakout_buy_needs_volume_and_liquidity() {
        let config = Config::default();
        let action = resolve_action(
            3,
            0,
            VOLUME,
            AVG,
            MarketState::BreakoutAttempt,
            TrendStrength::Moderate,
            Liquidity::High,
            &config,
        );
        assert_eq!(action, Action::Buy);

        let starved = resolve_action(
            3,
            0,
            dec!(10),
            AVG,
            MarketState::BreakoutAttempt,
            TrendStrength::Moderate,
            Liquidity::High,
            &config,
        );
        assert_eq!(starved, Action::Hold);
    }

    #[test]
    fn test_breakout_sell_side_is_symmetric() {
        let config = Config::default();
        let action = resolve_action(
            -3,
            0,
            VOLUME,
            AVG,
            MarketState::BreakoutAttempt,
            TrendStrength::Moderate,
            Liquidity::High,
            &config,
        );
        assert_eq!(action, Action::Sell);
    }

    #[test]
    fn test_strong_buy_needs_both_bars() {
        let config = Config::default();
        let action = resolve_action(
            6,
            4,
            VOLUME,
            AVG,
            MarketState::Trending,
            TrendStrength::Strong,
            Liquidity::High,
            &config,
        );
        assert_eq!(action, Action::StrongBuy);

        let faded = resolve_action(
            6,
            0,
            VOLUME,
            AVG,
            MarketState::Trending,
            TrendStrength::Strong,
            Liquidity::High,
            &config,
        );
        assert_eq!(faded, Action::Buy);
    }

    #[test]
    fn test_failed_volume_gate_forecloses_strong_actions() {
        let config = Config::default();
        let starved = dec!(1);
        let buy_side = resolve_action(
            6,
            6,
            starved,
            AVG,
            MarketState::Trending,
            TrendStrength::Strong,
            Liquidity::Normal,
            &config,
        );
        assert_ne!(buy_side, Action::StrongBuy);

        let sell_side = resolve_action(
            -6,
            -6,
            starved,
            AVG,
            MarketState::Trending,
            TrendStrength::Strong,
            Liquidity::Normal,
            &config,
        );
        assert_ne!(sell_side, Action::StrongSell);
    }

    #[test]
    fn test_buy_without_prev_confirmation_needs_volume() {
        let config = Config::default();
        let action = resolve_action(
            3,
            0,
            dec!(10),
            AVG,
            MarketState::Trending,
            TrendStrength::Moderate,
            Liquidity::Normal,
            &config,
        );
        assert_eq!(action, Action::Hold);
    }

    #[test]
    fn test_confirmed_buy_with_thin_everything_holds() {
        let config = Config::default();
        let action = resolve_action(
            3,
            2,
            dec!(10),
            AVG,
            MarketState::Trending,
            TrendStrength::Moderate,
            Liquidity::Low,
            &config,
        );
        assert_eq!(action, Action::Hold);
    }

    #[test]
    fn test_sell_side_mirror() {
        let config = Config::default();
        let action = resolve_action(
            -3,
            -2,
            VOLUME,
            AVG,
            MarketState::Trending,
            TrendStrength::Moderate,
            Liquidity::Normal,
            &config,
        );
        assert_eq!(action, Action::Sell);
    }

    #[test]
    fn test_neutral_score_holds() {
        let config = Config::default();
        let action = resolve_action(
            0,
            0,
            VOLUME,
            AVG,
            MarketState::Trending,
            TrendStrength::Moderate,
            Liquidity::Normal,
            &config,
        );
        assert_eq!(action, Action::Hold);
    }

    #[test]
    fn test_volume_gate_survives_zero_average() {
        let config = Config::default();
        assert!(volume_ok(dec!(100), Decimal::ZERO, &config));
        assert!(!volume_ok(Decimal::ZERO, dec!(1000), &config));
    }
}
