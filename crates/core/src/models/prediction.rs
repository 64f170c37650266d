use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Recommended action from the prediction service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TradeAction {
    Buy,
    Sell,
    /// No recommendation (empty or unrecognized action text)
    #[default]
    None,
}

impl TradeAction {
    /// Case-insensitive parse; anything other than BUY/SELL is `None`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BUY" => TradeAction::Buy,
            "SELL" => TradeAction::Sell,
            _ => TradeAction::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::None => "",
        }
    }
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TradeAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TradeAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(TradeAction::parse).unwrap_or_default())
    }
}

/// Bucketed model confidence used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// 80 and above is High, 60 and above is Medium, everything else Low.
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 80.0 {
            ConfidenceLevel::High
        } else if confidence >= 60.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "High"),
            ConfidenceLevel::Medium => write!(f, "Medium"),
            ConfidenceLevel::Low => write!(f, "Low"),
        }
    }
}

/// Train/test accuracy reported for the price model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelAccuracy {
    #[serde(deserialize_with = "null_as_default")]
    pub train: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub test: f64,
}

fn default_sentiment() -> String {
    "Neutral".to_string()
}

/// The `prediction` object of a prediction response.
///
/// Every field is optional on the wire; missing or `null` values take the
/// defaults below so the rest of the code never has to probe the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prediction {
    pub action: TradeAction,

    /// Free-text timing advice (e.g., "Buy within the next 3 days")
    #[serde(deserialize_with = "null_as_default")]
    pub timing: String,

    /// Model confidence in percent (0–100)
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f64,

    /// Expected return in percent
    #[serde(deserialize_with = "null_as_default")]
    pub predicted_return: f64,

    #[serde(deserialize_with = "null_as_default")]
    pub current_price: f64,

    pub predicted_price: Option<f64>,

    #[serde(deserialize_with = "null_as_default")]
    pub volatility: f64,

    #[serde(deserialize_with = "sentiment_or_neutral")]
    pub market_sentiment: String,

    #[serde(deserialize_with = "null_as_default")]
    pub model_accuracy: ModelAccuracy,
}

impl Default for Prediction {
    fn default() -> Self {
        Self {
            action: TradeAction::None,
            timing: String::new(),
            confidence: 0.0,
            predicted_return: 0.0,
            current_price: 0.0,
            predicted_price: None,
            volatility: 0.0,
            market_sentiment: default_sentiment(),
            model_accuracy: ModelAccuracy::default(),
        }
    }
}

impl Prediction {
    #[must_use]
    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence)
    }
}

/// A normalized prediction together with the symbol and exchange that were queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub stock_symbol: String,
    pub exchange: String,
    pub prediction: Prediction,
}

/// Wire shape of `POST /api/predict`. Only `prediction` is required.
#[derive(Debug, Deserialize)]
pub(crate) struct PredictionResponse {
    pub prediction: Prediction,
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn sentiment_or_neutral<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(default_sentiment))
}
