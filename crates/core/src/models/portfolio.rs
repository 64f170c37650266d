use serde::{Deserialize, Serialize};

use super::holding::{Holding, HoldingMetrics};

/// Aggregate profit/loss across every holding in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Number of holdings
    pub holding_count: usize,

    /// Sum of quantity × current price
    pub total_value: f64,

    /// Sum of quantity × purchase price
    pub total_cost: f64,

    /// total_value − total_cost
    pub profit_loss: f64,

    /// profit_loss / total_cost × 100, `None` for an empty portfolio
    pub profit_loss_percent: Option<f64>,
}

impl PortfolioSummary {
    pub fn from_holdings(holdings: &[Holding]) -> Self {
        let (total_value, total_cost) = holdings.iter().fold((0.0, 0.0), |(value, cost), h| {
            let m = h.metrics();
            (value + m.total_value, cost + m.total_cost)
        });
        let totals = HoldingMetrics::from_totals(total_value, total_cost);

        Self {
            holding_count: holdings.len(),
            total_value: totals.total_value,
            total_cost: totals.total_cost,
            profit_loss: totals.profit_loss,
            profit_loss_percent: totals.profit_loss_percent,
        }
    }
}
