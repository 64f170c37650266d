use async_trait::async_trait;

use crate::errors::PredictionError;
use crate::models::history::StockHistory;
use crate::models::news::NewsItem;
use crate::models::prediction::PredictionResult;

/// Source of predictions and price history for a ticker.
///
/// Implementations are stateless per call: no retries, no caching, no
/// de-duplication of concurrent requests for the same symbol.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PredictionProvider: Send + Sync {
    /// Prediction for `symbol` on `exchange`, tagged with the queried symbol.
    async fn fetch_prediction(
        &self,
        symbol: &str,
        exchange: &str,
    ) -> Result<PredictionResult, PredictionError>;

    /// Daily bars plus indicator series for `symbol`.
    async fn fetch_historical(
        &self,
        symbol: &str,
        exchange: &str,
    ) -> Result<StockHistory, PredictionError>;
}

/// Source of headlines with sentiment scores.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait NewsProvider: Send + Sync {
    /// Human-readable name (for logs).
    fn name(&self) -> &str;

    async fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsItem>, PredictionError>;
}
