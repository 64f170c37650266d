use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// One tracked position in the user's portfolio.
///
/// `id` and `date_added` are assigned by the portfolio store when the
/// holding is created and never change afterwards. Prices are caller-supplied
/// snapshots; the store never refreshes them on its own.
///
/// Serialized in camelCase so the persisted slot reads
/// `{id, symbol, name, quantity, purchasePrice, currentPrice, dateAdded}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Unique identifier. Older snapshots without one get a fresh id on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Uppercase ticker (e.g., "INFY", "TCS")
    pub symbol: String,

    /// Display name (e.g., "Infosys")
    pub name: String,

    /// Units held (always positive)
    pub quantity: f64,

    /// Cost per unit at purchase
    pub purchase_price: f64,

    /// Latest known price per unit
    pub current_price: f64,

    /// When the holding was added. Snapshots without one load as the Unix epoch.
    #[serde(default)]
    pub date_added: DateTime<Utc>,
}

/// Caller-provided fields of a new holding (everything but `id`/`date_added`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingInput {
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
}

/// Partial update of a holding's mutable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
}

/// Profit/loss figures derived from a holding. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingMetrics {
    /// quantity × current price
    pub total_value: f64,

    /// quantity × purchase price
    pub total_cost: f64,

    /// total_value − total_cost
    pub profit_loss: f64,

    /// profit_loss / total_cost × 100, `None` when the cost basis is zero
    pub profit_loss_percent: Option<f64>,
}

impl Holding {
    /// Build a holding from validated input, stamping a new id and the current time.
    pub fn from_input(input: HoldingInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: input.symbol,
            name: input.name,
            quantity: input.quantity,
            purchase_price: input.purchase_price,
            current_price: input.current_price,
            date_added: Utc::now(),
        }
    }

    #[must_use]
    pub fn metrics(&self) -> HoldingMetrics {
        HoldingMetrics::compute(self.quantity, self.purchase_price, self.current_price)
    }

    /// Merge the present fields of `update` into this holding.
    /// Returns `true` if any field was supplied.
    pub fn apply(&mut self, update: &HoldingUpdate) -> bool {
        if let Some(symbol) = &update.symbol {
            self.symbol = symbol.clone();
        }
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = update.purchase_price {
            self.purchase_price = price;
        }
        if let Some(price) = update.current_price {
            self.current_price = price;
        }
        !update.is_empty()
    }
}

impl HoldingInput {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        purchase_price: f64,
        current_price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            quantity,
            purchase_price,
            current_price,
        }
    }

    /// Input-boundary validation for the add-stock form.
    ///
    /// Trims and uppercases the symbol, trims the name, and rejects empty
    /// text or non-positive / non-finite numbers. The store itself trusts
    /// its caller and does not call this.
    pub fn validate(self) -> Result<Self, CoreError> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::Validation("Symbol is required".into()));
        }
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::Validation("Company name is required".into()));
        }
        check_positive(self.quantity, "Quantity")?;
        check_positive(self.purchase_price, "Purchase price")?;
        check_positive(self.current_price, "Current price")?;

        Ok(Self {
            symbol,
            name,
            ..self
        })
    }
}

impl HoldingUpdate {
    /// `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbol.is_none()
            && self.name.is_none()
            && self.quantity.is_none()
            && self.purchase_price.is_none()
            && self.current_price.is_none()
    }

    /// Update only the current price snapshot.
    pub fn current_price(price: f64) -> Self {
        Self {
            current_price: Some(price),
            ..Self::default()
        }
    }
}

impl HoldingMetrics {
    pub fn compute(quantity: f64, purchase_price: f64, current_price: f64) -> Self {
        Self::from_totals(quantity * current_price, quantity * purchase_price)
    }

    pub(crate) fn from_totals(total_value: f64, total_cost: f64) -> Self {
        let profit_loss = total_value - total_cost;
        let profit_loss_percent = if total_cost == 0.0 {
            None
        } else {
            Some(profit_loss / total_cost * 100.0)
        };
        Self {
            total_value,
            total_cost,
            profit_loss,
            profit_loss_percent,
        }
    }

    /// Break-even counts as profit, matching how the dashboard colors it.
    #[must_use]
    pub fn is_profit(&self) -> bool {
        self.profit_loss >= 0.0
    }
}

fn check_positive(value: f64, field: &str) -> Result<(), CoreError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("{field} must be positive")))
    }
}
