use crate::errors::PredictionError;
use crate::models::news::NewsItem;
use crate::providers::traits::NewsProvider;

/// Looks up headlines, falling through a list of providers in order.
///
/// Typically the live prediction service first and `FallbackNewsProvider`
/// last, so the dashboard always has something to show.
pub struct NewsService {
    providers: Vec<Box<dyn NewsProvider>>,
}

impl NewsService {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Primary provider with a single fallback.
    pub fn with_fallback(primary: Box<dyn NewsProvider>, fallback: Box<dyn NewsProvider>) -> Self {
        let mut service = Self::new();
        service.register(primary);
        service.register(fallback);
        service
    }

    /// Add a provider at the lowest priority.
    pub fn register(&mut self, provider: Box<dyn NewsProvider>) {
        self.providers.push(provider);
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Headlines from the first provider that succeeds.
    /// Returns the last provider's error if all of them fail.
    pub async fn get_news(&self, symbol: &str) -> Result<Vec<NewsItem>, PredictionError> {
        let mut last_err = PredictionError::RequestSetupFailed("No news provider configured".into());

        for provider in &self.providers {
            match provider.fetch_news(symbol).await {
                Ok(items) => return Ok(items),
                Err(e) => {
                    log::warn!("{} failed to fetch news for {symbol}: {e}", provider.name());
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }
}

impl Default for NewsService {
    fn default() -> Self {
        Self::new()
    }
}
