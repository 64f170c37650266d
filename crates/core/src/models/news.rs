use serde::{Deserialize, Serialize};

use super::prediction::null_as_default;

/// A headline with the service's sentiment score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// 0.0 (very negative) to 1.0 (very positive)
    pub sentiment: f64,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>, sentiment: f64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            sentiment,
        }
    }

    #[must_use]
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_score(self.sentiment)
    }
}

/// Display bucket for a sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Above 0.6 is Positive, below 0.4 is Negative, the band in between Neutral.
    pub fn from_score(sentiment: f64) -> Self {
        if sentiment > 0.6 {
            SentimentLabel::Positive
        } else if sentiment < 0.4 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
            SentimentLabel::Negative => write!(f, "Negative"),
        }
    }
}
