use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::{PredictionError, DEFAULT_REJECTION_MESSAGE};
use crate::models::history::{HistoricalResponse, StockHistory};
use crate::models::news::NewsItem;
use crate::models::prediction::{PredictionResponse, PredictionResult};
use crate::models::settings::Settings;
use super::traits::{NewsProvider, PredictionProvider};

/// HTTP client for the external prediction service.
///
/// Endpoints (relative to the base URL):
/// - `POST /api/predict` with `{stock, exchange}`
/// - `GET /api/historical/{symbol}?exchange=`
/// - `GET /api/news?symbol=&num_articles=`
///
/// Every failure is normalized into a `PredictionError`: a non-2xx answer
/// becomes `ServerRejected` with the body's `detail`, a request that got no
/// answer becomes `NoResponse`, and a request that could not be built
/// becomes `RequestSetupFailed`.
pub struct PredictionClient {
    client: Client,
    base_url: String,
    news_article_count: u32,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    stock: &'a str,
    exchange: &'a str,
}

/// Error body sent with non-2xx responses. FastAPI puts a string here for
/// handled errors and a list of problems for request validation failures.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl PredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let settings = Settings {
            api_base_url: base_url.into(),
            ..Settings::default()
        };
        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_builder(Client::builder(), settings)
    }

    /// Finish `builder` with the configured timeout. If the builder cannot be
    /// completed the failure is logged and a default client is used instead.
    pub fn with_builder(builder: ClientBuilder, settings: &Settings) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        let client = builder.build().unwrap_or_else(|e| {
            log::warn!("Failed to configure HTTP client, using defaults without timeout: {e}");
            Client::new()
        });
        Self {
            client,
            base_url: settings.api_base_url.clone(),
            news_article_count: settings.news_article_count,
        }
    }

    /// Use a preconfigured reqwest client (custom proxy, TLS, or timeout setup).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            news_article_count: Settings::default().news_article_count,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, PredictionError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            PredictionError::RequestSetupFailed(format!("Invalid service URL '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                PredictionError::RequestSetupFailed(format!(
                    "Service URL '{}' cannot have a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Read the body and map it to `T`, or to the normalized error.
    async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, PredictionError> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            log::debug!("Prediction service answered {status}");
            return Err(PredictionError::ServerRejected(rejection_message(&body)));
        }

        serde_json::from_str(&body).map_err(|e| PredictionError::InvalidResponse(e.to_string()))
    }
}

/// Pull the user-facing message out of an error body.
fn rejection_message(body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);

    match detail {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
        Some(serde_json::Value::Null) | None => DEFAULT_REJECTION_MESSAGE.to_string(),
        Some(serde_json::Value::String(_)) => DEFAULT_REJECTION_MESSAGE.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PredictionProvider for PredictionClient {
    async fn fetch_prediction(
        &self,
        symbol: &str,
        exchange: &str,
    ) -> Result<PredictionResult, PredictionError> {
        let url = self.endpoint(&["api", "predict"])?;
        log::debug!("Requesting prediction for {symbol} ({exchange})");

        let resp = self
            .client
            .post(url)
            .json(&PredictRequest {
                stock: symbol,
                exchange,
            })
            .send()
            .await?;

        let payload: PredictionResponse = Self::read_json(resp).await?;

        Ok(PredictionResult {
            stock_symbol: symbol.to_string(),
            exchange: exchange.to_string(),
            prediction: payload.prediction,
        })
    }

    async fn fetch_historical(
        &self,
        symbol: &str,
        exchange: &str,
    ) -> Result<StockHistory, PredictionError> {
        let mut url = self.endpoint(&["api", "historical", symbol])?;
        url.query_pairs_mut().append_pair("exchange", exchange);

        let resp = self.client.get(url).send().await?;
        let payload: HistoricalResponse = Self::read_json(resp).await?;

        let historical_data = payload.historical_data.ok_or_else(|| {
            PredictionError::InvalidResponse("No historical data received from the server".into())
        })?;

        Ok(StockHistory {
            symbol: symbol.to_string(),
            exchange: exchange.to_string(),
            historical_data,
            technical_indicators: payload.technical_indicators,
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl NewsProvider for PredictionClient {
    fn name(&self) -> &str {
        "Prediction service"
    }

    async fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsItem>, PredictionError> {
        let mut url = self.endpoint(&["api", "news"])?;
        url.query_pairs_mut()
            .append_pair("symbol", symbol)
            .append_pair("num_articles", &self.news_article_count.to_string());

        let resp = self.client.get(url).send().await?;
        Self::read_json(resp).await
    }
}
