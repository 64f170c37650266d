use crate::errors::PersistenceError;
use crate::models::holding::Holding;

/// Durable slot that holds the whole holdings collection.
///
/// Implementations overwrite the slot on every `save`; there is no partial
/// update. `load` reports `NotFound` for an empty slot and `Malformed` when
/// the stored text is not a holdings array.
pub trait PersistenceAdapter: Send + Sync {
    fn save(&self, holdings: &[Holding]) -> Result<(), PersistenceError>;

    fn load(&self) -> Result<Vec<Holding>, PersistenceError>;
}

/// When the portfolio store writes to its adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistencePolicy {
    /// Write after every mutation, including removal of the last holding.
    #[default]
    Always,
    /// Never write an empty collection; the previous snapshot stays on disk.
    SkipEmpty,
}

impl PersistencePolicy {
    pub fn should_persist(&self, holdings: &[Holding]) -> bool {
        match self {
            PersistencePolicy::Always => true,
            PersistencePolicy::SkipEmpty => !holdings.is_empty(),
        }
    }
}
