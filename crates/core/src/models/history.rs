use serde::{Deserialize, Serialize};

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBar {
    /// Trading day as sent by the service (e.g., "2025-01-15")
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBand {
    #[serde(rename = "BB_upper")]
    pub upper: f64,
    #[serde(rename = "BB_middle")]
    pub middle: f64,
    #[serde(rename = "BB_lower")]
    pub lower: f64,
}

/// Indicator series computed by the service, aligned with the historical bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalIndicators {
    pub sma20: Vec<IndicatorValue>,
    pub bollinger_bands: Vec<BollingerBand>,
}

/// Price history and indicators for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockHistory {
    pub symbol: String,
    pub exchange: String,
    pub historical_data: Vec<HistoricalBar>,
    pub technical_indicators: TechnicalIndicators,
}

impl StockHistory {
    /// Closing price of the most recent bar.
    #[must_use]
    pub fn latest_close(&self) -> Option<f64> {
        self.historical_data.last().map(|bar| bar.close)
    }
}

/// Wire shape of `GET /api/historical/{symbol}`.
#[derive(Debug, Deserialize)]
pub(crate) struct HistoricalResponse {
    pub historical_data: Option<Vec<HistoricalBar>>,
    #[serde(default)]
    pub technical_indicators: TechnicalIndicators,
}
