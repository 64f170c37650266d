use crate::errors::PersistenceError;
use crate::models::holding::Holding;

/// Default storage key for the portfolio slot.
pub const DEFAULT_KEY: &str = "portfolio";

/// Serialize holdings as the JSON array stored in the slot.
pub fn encode(holdings: &[Holding]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(holdings)?)
}

/// Parse the slot text back into holdings.
///
/// Blank text counts as an empty slot. Missing `id`/`dateAdded` fields are
/// tolerated (see `Holding`); anything else that does not fit is `Malformed`.
pub fn decode(text: &str) -> Result<Vec<Holding>, PersistenceError> {
    if text.trim().is_empty() {
        return Err(PersistenceError::NotFound);
    }
    Ok(serde_json::from_str(text)?)
}
