pub mod traits;

pub mod fallback_news;
pub mod prediction_client;
