use crate::core::{FetchError, RateProvider, RateTable};
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Freshness of the table held by a [`RateStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum RateStatus {
    /// No refresh has finished yet.
    Loading,
    /// The last refresh succeeded.
    Fresh { fetched_at: DateTime<Utc> },
    /// A refresh failed after the table was fetched; conversions use the older table.
    Stale {
        fetched_at: DateTime<Utc>,
        error: String,
    },
    /// No refresh has ever succeeded.
    Unavailable { error: String },
}

struct State {
    table: Arc<RateTable>,
    last_error: Option<String>,
}

/// Holds the current rate table for one base currency.
///
/// The lock is only taken to swap or clone the `Arc`, never across the network
/// request, so readers are not held up by a refresh in flight.
pub struct RateStore {
    provider: Arc<dyn RateProvider>,
    base_currency: String,
    state: RwLock<State>,
}

impl RateStore {
    pub fn new(provider: Arc<dyn RateProvider>, base_currency: &str) -> Self {
        Self {
            provider,
            base_currency: base_currency.to_string(),
            state: RwLock::new(State {
                table: Arc::new(RateTable::empty(base_currency)),
                last_error: None,
            }),
        }
    }

    /// Fetches a new table and replaces the current one.
    ///
    /// On failure the previous table stays in place and the error is
    /// remembered for [`RateStore::status`].
    pub async fn refresh(&self) -> Result<Arc<RateTable>, FetchError> {
        debug!(base = %self.base_currency, "Refreshing rates");
        let result = self
            .provider
            .fetch_rates(&self.base_currency)
            .await
            .and_then(|rates| RateTable::new(&self.base_currency, rates, Some(Utc::now())));

        let mut state = self.write_state();
        match result {
            Ok(table) => {
                let table = Arc::new(table);
                debug!(count = table.rates().len(), "Replaced rate table");
                state.table = Arc::clone(&table);
                state.last_error = None;
                Ok(table)
            }
            Err(e) => {
                warn!(error = %e, "Rate refresh failed, keeping previous table");
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn current_snapshot(&self) -> Arc<RateTable> {
        Arc::clone(&self.read_state().table)
    }

    pub fn status(&self) -> RateStatus {
        let state = self.read_state();
        match (state.table.fetched_at(), &state.last_error) {
            (Some(fetched_at), None) => RateStatus::Fresh { fetched_at },
            (Some(fetched_at), Some(error)) => RateStatus::Stale {
                fetched_at,
                error: error.clone(),
            },
            (None, Some(error)) => RateStatus::Unavailable {
                error: error.clone(),
            },
            (None, None) => RateStatus::Loading,
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
