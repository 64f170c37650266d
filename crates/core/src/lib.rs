pub mod errors;
pub mod models;
pub mod notifications;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use errors::CoreError;
use models::{
    history::StockHistory,
    holding::{Holding, HoldingInput},
    news::NewsItem,
    prediction::PredictionResult,
    settings::Settings,
};
use notifications::{NotificationSink, Severity};
use providers::{
    fallback_news::FallbackNewsProvider, prediction_client::PredictionClient,
    traits::PredictionProvider,
};
use services::{news_service::NewsService, portfolio_store::PortfolioStore};
use storage::traits::PersistenceAdapter;

/// Main entry point for the stock dashboard core library.
///
/// Owns the portfolio store for the session and the clients for the
/// prediction service. Construct it once and hand it to the UI layer.
#[must_use]
pub struct StockDashboard {
    settings: Settings,
    portfolio: PortfolioStore,
    predictions: Box<dyn PredictionProvider>,
    news: NewsService,
    notifier: Arc<dyn NotificationSink>,
    last_result: Option<PredictionResult>,
}

impl std::fmt::Debug for StockDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockDashboard")
            .field("settings", &self.settings)
            .field("holdings", &self.portfolio.len())
            .field("last_symbol", &self.last_result.as_ref().map(|r| &r.stock_symbol))
            .finish()
    }
}

impl StockDashboard {
    /// Wire up the live prediction service (with offline news fallback)
    /// and hydrate the portfolio from `storage`.
    pub fn new(
        settings: Settings,
        storage: Arc<dyn PersistenceAdapter>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let predictions = Box::new(PredictionClient::from_settings(&settings));
        let news = NewsService::with_fallback(
            Box::new(PredictionClient::from_settings(&settings)),
            Box::new(FallbackNewsProvider::new()),
        );
        Self::with_providers(settings, storage, notifier, predictions, news)
    }

    /// Like `new`, with caller-supplied providers.
    pub fn with_providers(
        settings: Settings,
        storage: Arc<dyn PersistenceAdapter>,
        notifier: Arc<dyn NotificationSink>,
        predictions: Box<dyn PredictionProvider>,
        news: NewsService,
    ) -> Self {
        let portfolio = PortfolioStore::initialize_with_policy(
            storage,
            Arc::clone(&notifier),
            settings.persistence_policy(),
        );
        Self {
            settings,
            portfolio,
            predictions,
            news,
            notifier,
            last_result: None,
        }
    }

    /// Open the dashboard with the portfolio slot on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(settings: Settings, notifier: Arc<dyn NotificationSink>) -> Result<Self, CoreError> {
        let slot = storage::file::FileStorage::from_settings(&settings)?;
        Ok(Self::new(settings, Arc::new(slot), notifier))
    }

    // ── Search ──────────────────────────────────────────────────────

    /// Look up a prediction for `symbol`, announcing the outcome.
    ///
    /// `exchange` defaults to the configured exchange. On success the result
    /// is also kept as `last_result()`; on failure the previous result stays.
    pub async fn search(
        &mut self,
        symbol: &str,
        exchange: Option<&str>,
    ) -> Result<PredictionResult, CoreError> {
        let symbol = normalize_symbol(symbol)?;
        let exchange = self.normalize_exchange(exchange);

        match self.predictions.fetch_prediction(&symbol, &exchange).await {
            Ok(result) => {
                self.notifier.notify(
                    "Analysis Complete",
                    &format!("Stock prediction for {symbol} ({exchange}) completed successfully."),
                    Severity::Success,
                );
                self.last_result = Some(result.clone());
                Ok(result)
            }
            Err(e) => {
                self.notifier.notify("Error", &e.to_string(), Severity::Error);
                Err(e.into())
            }
        }
    }

    /// Price history and indicators. Errors are returned, not announced.
    pub async fn history(
        &self,
        symbol: &str,
        exchange: Option<&str>,
    ) -> Result<StockHistory, CoreError> {
        let symbol = normalize_symbol(symbol)?;
        let exchange = self.normalize_exchange(exchange);
        Ok(self.predictions.fetch_historical(&symbol, &exchange).await?)
    }

    /// Headlines for `symbol`, from the first news provider that answers.
    pub async fn news(&self, symbol: &str) -> Result<Vec<NewsItem>, CoreError> {
        let symbol = normalize_symbol(symbol)?;
        Ok(self.news.get_news(&symbol).await?)
    }

    /// The most recent successful search, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.last_result.as_ref()
    }

    // ── Portfolio ───────────────────────────────────────────────────

    /// Validate form input and add it to the portfolio.
    pub fn add_holding(&mut self, input: HoldingInput) -> Result<Holding, CoreError> {
        let input = input.validate()?;
        Ok(self.portfolio.add(input))
    }

    #[must_use]
    pub fn portfolio(&self) -> &PortfolioStore {
        &self.portfolio
    }

    pub fn portfolio_mut(&mut self) -> &mut PortfolioStore {
        &mut self.portfolio
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Trimmed, uppercased exchange; blank or absent means the configured default.
    fn normalize_exchange(&self, exchange: Option<&str>) -> String {
        exchange
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(self.settings.default_exchange.as_str())
            .to_uppercase()
    }
}

fn normalize_symbol(symbol: &str) -> Result<String, CoreError> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(CoreError::Validation("Symbol is required".into()));
    }
    Ok(symbol)
}
