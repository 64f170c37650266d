use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::errors::PredictionError;
use crate::models::news::NewsItem;
use super::traits::NewsProvider;

/// Fewest and most headlines returned per call.
pub const MIN_ITEMS: usize = 3;
pub const MAX_ITEMS: usize = 5;

/// Offline stand-in for the news endpoint.
///
/// Produces placeholder headlines about the ticker from a fixed template set,
/// shuffled and truncated with an RNG seeded per call: the same seed always
/// yields the same list for the same symbol.
pub struct FallbackNewsProvider {
    seed: u64,
}

impl FallbackNewsProvider {
    /// Seed drawn from the thread RNG.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The full, unshuffled template set for `symbol`.
    pub fn templates(symbol: &str) -> Vec<NewsItem> {
        vec![
            NewsItem::new(
                format!("{symbol} Reports Strong Q2 Results"),
                format!("{symbol} announced quarterly results exceeding analyst expectations with revenue growth of 12% year-over-year."),
                0.75,
            ),
            NewsItem::new(
                format!("New Leadership at {symbol}"),
                format!("{symbol} appointed a new CTO to lead their digital transformation initiatives, focusing on AI and cloud technologies."),
                0.65,
            ),
            NewsItem::new(
                format!("{symbol} Expands Operations"),
                format!("{symbol} announced plans to expand operations into international markets, targeting 20% growth in the coming fiscal year."),
                0.70,
            ),
            NewsItem::new(
                format!("Analyst Downgrades {symbol}"),
                format!("Leading financial analysts have downgraded {symbol} citing concerns about market competition and margin pressures."),
                0.25,
            ),
            NewsItem::new(
                format!("{symbol} Faces Regulatory Scrutiny"),
                format!("Regulatory authorities are investigating {symbol} for potential compliance issues in their recent financial reports."),
                0.30,
            ),
            NewsItem::new(
                format!("{symbol} Announces Stock Buyback"),
                format!("The board of {symbol} has approved a $2 billion stock buyback program to be implemented over the next 12 months."),
                0.60,
            ),
        ]
    }

    /// Deterministic pick for `symbol`.
    pub fn headlines(&self, symbol: &str) -> Vec<NewsItem> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut items = Self::templates(symbol);
        items.shuffle(&mut rng);
        items.truncate(rng.gen_range(MIN_ITEMS..=MAX_ITEMS));
        items
    }
}

impl Default for FallbackNewsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl NewsProvider for FallbackNewsProvider {
    fn name(&self) -> &str {
        "Fallback headlines"
    }

    async fn fetch_news(&self, symbol: &str) -> Result<Vec<NewsItem>, PredictionError> {
        Ok(self.headlines(symbol))
    }
}
