use std::sync::Arc;
use uuid::Uuid;

use crate::errors::PersistenceError;
use crate::models::holding::{Holding, HoldingInput, HoldingUpdate};
use crate::models::portfolio::PortfolioSummary;
use crate::notifications::{NotificationSink, Severity};
use crate::storage::traits::{PersistenceAdapter, PersistencePolicy};

/// Authoritative in-memory list of holdings, mirrored to a persistence slot.
///
/// Every mutation commits in memory first and then writes the full
/// collection to the adapter. Write failures are logged and swallowed: the
/// in-memory list stays as it is and the next successful write catches the
/// slot up. Mutations take `&mut self` and write synchronously, so writes
/// land in the same order as the mutations that caused them.
///
/// The store performs no input validation; see `HoldingInput::validate`.
pub struct PortfolioStore {
    holdings: Vec<Holding>,
    storage: Arc<dyn PersistenceAdapter>,
    notifier: Arc<dyn NotificationSink>,
    policy: PersistencePolicy,
}

impl std::fmt::Debug for PortfolioStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioStore")
            .field("holdings", &self.holdings.len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl PortfolioStore {
    /// Hydrate a store from its adapter, starting empty if nothing usable is stored.
    pub fn initialize(
        storage: Arc<dyn PersistenceAdapter>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::initialize_with_policy(storage, notifier, PersistencePolicy::default())
    }

    pub fn initialize_with_policy(
        storage: Arc<dyn PersistenceAdapter>,
        notifier: Arc<dyn NotificationSink>,
        policy: PersistencePolicy,
    ) -> Self {
        let holdings = match storage.load() {
            Ok(holdings) => {
                log::debug!("Loaded {} holding(s) from storage", holdings.len());
                holdings
            }
            Err(PersistenceError::NotFound) => {
                log::debug!("No saved portfolio, starting empty");
                Vec::new()
            }
            Err(e) => {
                log::warn!("Failed to load saved portfolio, starting empty: {e}");
                Vec::new()
            }
        };

        Self {
            holdings,
            storage,
            notifier,
            policy,
        }
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Append a new holding with a fresh id and the current timestamp.
    pub fn add(&mut self, input: HoldingInput) -> Holding {
        let holding = Holding::from_input(input);
        self.holdings.push(holding.clone());
        self.persist();

        self.notifier.notify(
            "Stock Added",
            &format!("{} has been added to your portfolio.", holding.symbol),
            Severity::Success,
        );
        holding
    }

    /// Remove a holding by id. An unknown id is a no-op: it usually means the
    /// caller's view was stale, not that something went wrong.
    pub fn remove(&mut self, id: Uuid) {
        let Some(idx) = self.holdings.iter().position(|h| h.id == id) else {
            log::debug!("Ignoring removal of unknown holding {id}");
            return;
        };

        let removed = self.holdings.remove(idx);
        self.persist();

        self.notifier.notify(
            "Stock Removed",
            &format!("{} has been removed from your portfolio.", removed.symbol),
            Severity::Success,
        );
    }

    /// Merge `update` into the holding with this id. Unknown ids are ignored.
    /// Position in the list is kept; no notification is sent.
    pub fn update(&mut self, id: Uuid, update: HoldingUpdate) {
        let Some(holding) = self.holdings.iter_mut().find(|h| h.id == id) else {
            log::debug!("Ignoring update of unknown holding {id}");
            return;
        };

        holding.apply(&update);
        self.persist();
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// All holdings in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Holding] {
        &self.holdings
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_holdings(&self.holdings)
    }

    #[must_use]
    pub fn policy(&self) -> PersistencePolicy {
        self.policy
    }

    /// Best-effort write of the whole collection.
    fn persist(&self) {
        if !self.policy.should_persist(&self.holdings) {
            log::debug!("Skipping write of empty portfolio");
            return;
        }
        if let Err(e) = self.storage.save(&self.holdings) {
            log::error!("Failed to save portfolio ({} holding(s)): {e}", self.holdings.len());
        }
    }
}
