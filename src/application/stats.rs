use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::domain::values::charges::round2;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Average outcome per setup type, over closed trades.
#[derive(Debug, Clone, Serialize)]
pub struct SetupPerformance {
    pub setup: String,
    pub trades: usize,
    pub avg_net_pnl: f64,
}

/// Aggregate journal statistics for one owner. Ratios fall back to 0.0
/// when their denominator is empty (no closed trades, no losing trades).
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeStats {
    pub total_trades: usize,
    pub open_trades: usize,
    pub closed_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub total_net_pnl: f64,
    pub best_trade: Option<f64>,
    pub worst_trade: Option<f64>,
    pub average_trade: Option<f64>,
    pub by_setup: Vec<SetupPerformance>,
}

/// One closed trade on the equity curve.
#[derive(Debug, Clone, Serialize)]
pub struct EquityPoint {
    pub trade_id: String,
    pub closed_at: DateTime<Utc>,
    pub net_pnl: f64,
    pub cumulative_net_pnl: f64,
}

pub struct StatsUseCase {
    repo: Arc<dyn TradeRepository>,
}

impl StatsUseCase {
    pub fn new(repo: Arc<dyn TradeRepository>) -> Self {
        Self { repo }
    }

    pub fn stats(&self, owner_id: &str) -> Result<TradeStats, DomainError> {
        let trades = self.repo.list(&TradeFilter::for_owner(owner_id))?;
        Ok(compute_stats(&trades))
    }

    /// Cumulative net P&L over closed trades, in close order. Ordering is
    /// deterministic (closed_at, then id) so downstream charting is
    /// reproducible.
    pub fn equity_curve(&self, owner_id: &str) -> Result<Vec<EquityPoint>, DomainError> {
        let trades = self.repo.list(&TradeFilter::for_owner(owner_id))?;
        let mut closed: Vec<&Trade> = trades
            .iter()
            .filter(|t| t.closed_at.is_some() && t.net_pnl.is_some())
            .collect();
        closed.sort_by(|a, b| (a.closed_at, &a.id).cmp(&(b.closed_at, &b.id)));

        let mut cumulative = 0.0;
        let points = closed
            .into_iter()
            .map(|t| {
                let net = t.net_pnl.unwrap_or(0.0);
                cumulative = round2(cumulative + net);
                EquityPoint {
                    trade_id: t.id.clone(),
                    closed_at: t.closed_at.unwrap_or(t.opened_at),
                    net_pnl: net,
                    cumulative_net_pnl: cumulative,
                }
            })
            .collect();
        Ok(points)
    }
}

fn compute_stats(trades: &[Trade]) -> TradeStats {
    let mut stats = TradeStats {
        total_trades: trades.len(),
        ..TradeStats::default()
    };

    let mut total_wins = 0.0_f64;
    let mut total_losses = 0.0_f64;
    let mut sum_net = 0.0_f64;
    let mut by_setup: BTreeMap<String, (usize, f64)> = BTreeMap::new();

    for trade in trades {
        let Some(net) = trade.net_pnl.filter(|_| trade.is_closed()) else {
            stats.open_trades += 1;
            continue;
        };
        stats.closed_trades += 1;
        sum_net += net;

        if net > 0.0 {
            stats.wins += 1;
            total_wins += net;
        } else if net < 0.0 {
            stats.losses += 1;
            total_losses += net.abs();
        }

        stats.best_trade = Some(stats.best_trade.map_or(net, |b: f64| b.max(net)));
        stats.worst_trade = Some(stats.worst_trade.map_or(net, |w: f64| w.min(net)));

        if let Some(setup) = trade.setup_type {
            let entry = by_setup.entry(setup.to_string()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += net;
        }
    }

    stats.total_net_pnl = round2(sum_net);
    if stats.closed_trades > 0 {
        stats.win_rate = stats.wins as f64 / stats.closed_trades as f64;
        stats.average_trade = Some(round2(sum_net / stats.closed_trades as f64));
    }
    if total_losses > 0.0 {
        stats.profit_factor = round2(total_wins / total_losses);
    }
    stats.by_setup = by_setup
        .into_iter()
        .map(|(setup, (trades, sum))| SetupPerformance {
            setup,
            trades,
            avg_net_pnl: round2(sum / trades as f64),
        })
        .collect();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::charges::ChargeSchedule;
    use crate::domain::values::direction::Direction;

    fn closed_trade(symbol: &str, entry: f64, exit: f64, quantity: i64) -> Trade {
        let mut t = Trade::new(
            "owner".to_string(),
            symbol.to_string(),
            Direction::Long,
            quantity,
            entry,
            entry / 2.0,
            None,
        );
        t.close(exit, &ChargeSchedule::default());
        t
    }

    #[test]
    fn test_empty_journal_yields_zeroed_stats() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.profit_factor, 0.0);
        assert!(stats.best_trade.is_none());
        assert!(stats.average_trade.is_none());
    }

    #[test]
    fn test_open_trades_do_not_enter_ratios() {
        let open = Trade::new(
            "owner".to_string(),
            "ABC".to_string(),
            Direction::Long,
            10,
            100.0,
            90.0,
            None,
        );
        let stats = compute_stats(&[open]);
        assert_eq!(stats.total_trades, 1);
        assert_eq!(stats.open_trades, 1);
        assert_eq!(stats.closed_trades, 0);
        assert_eq!(stats.win_rate, 0.0);
    }

    #[test]
    fn test_win_rate_counts_only_closed() {
        let trades = vec![
            closed_trade("A", 100.0, 120.0, 10), // win
            closed_trade("B", 100.0, 80.0, 10),  // loss
            closed_trade("C", 100.0, 130.0, 10), // win
        ];
        let stats = compute_stats(&trades);
        assert_eq!(stats.closed_trades, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert!((stats.win_rate - 2.0 / 3.0).abs() < 1e-12);
        assert!(stats.profit_factor > 0.0);
    }

    #[test]
    fn test_best_worst_average() {
        let trades = vec![
            closed_trade("A", 100.0, 110.0, 10),
            closed_trade("B", 100.0, 90.0, 10),
        ];
        let stats = compute_stats(&trades);
        let best = stats.best_trade.unwrap();
        let worst = stats.worst_trade.unwrap();
        assert!(best > 0.0 && worst < 0.0);
        assert_eq!(
            stats.average_trade.unwrap(),
            round2((best + worst) / 2.0)
        );
    }
}
