use serde::Deserialize;
use std::collections::BTreeSet;
use sync_framework::{AsyncOutcome, Epoch, EpochTracker, SettlementPolicy, Signal, Slice};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WishlistStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Wishlist branch. `items` is a set, so an id can never be held twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistState {
    pub items: BTreeSet<String>,
    pub status: WishlistStatus,
    pub error: Option<String>,
    epochs: EpochTracker,
}

impl WishlistState {
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains(id)
    }
}

/// One entry of the wishlist response: a bare id or a populated property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WishlistEntry {
    Id(String),
    Object {
        #[serde(default)]
        id: Option<String>,
        #[serde(default, rename = "_id")]
        mongo_id: Option<String>,
    },
}

impl WishlistEntry {
    /// The property id; `id` wins over `_id`. `None` for an object carrying neither.
    pub fn into_id(self) -> Option<String> {
        match self {
            WishlistEntry::Id(id) => Some(id),
            WishlistEntry::Object { id, mongo_id } => id.or(mongo_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WishlistEvent {
    FetchPending { epoch: Epoch },
    FetchSucceeded { epoch: Epoch, ids: Vec<String> },
    FetchFailed { epoch: Epoch, message: String },
    MutationPending,
    Added(String),
    Removed(String),
    MutationFailed(String),
}

impl WishlistEvent {
    pub fn from_fetch(signal: Signal<Vec<String>>) -> Option<Self> {
        let epoch = signal.epoch;
        Some(match signal.outcome {
            AsyncOutcome::Pending => WishlistEvent::FetchPending { epoch },
            AsyncOutcome::Succeeded(ids) => WishlistEvent::FetchSucceeded { epoch, ids },
            AsyncOutcome::Failed(message) => WishlistEvent::FetchFailed { epoch, message },
        })
    }

    pub fn from_add(signal: Signal<String>) -> Option<Self> {
        Some(Self::mutation(signal.outcome, WishlistEvent::Added))
    }

    pub fn from_remove(signal: Signal<String>) -> Option<Self> {
        Some(Self::mutation(signal.outcome, WishlistEvent::Removed))
    }

    fn mutation(outcome: AsyncOutcome<String>, on_success: fn(String) -> Self) -> Self {
        match outcome {
            AsyncOutcome::Pending => WishlistEvent::MutationPending,
            AsyncOutcome::Succeeded(id) => on_success(id),
            AsyncOutcome::Failed(message) => WishlistEvent::MutationFailed(message),
        }
    }
}

pub struct WishlistSlice {
    policy: SettlementPolicy,
}

impl WishlistSlice {
    pub fn new(policy: SettlementPolicy) -> Self {
        Self { policy }
    }
}

impl Slice for WishlistSlice {
    type State = WishlistState;
    type Event = WishlistEvent;

    fn name(&self) -> &'static str {
        "wishlist"
    }

    fn initial_state(&self) -> WishlistState {
        WishlistState::default()
    }

    fn reduce(&self, state: &mut WishlistState, event: WishlistEvent) {
        match event {
            WishlistEvent::FetchPending { epoch } => {
                state.epochs.issue(epoch);
                state.status = WishlistStatus::Loading;
                state.error = None;
            }
            WishlistEvent::FetchSucceeded { epoch, ids } => {
                if !state.epochs.admits(self.policy, epoch) {
                    debug!(slice = "wishlist", %epoch, "Stale settlement discarded");
                    return;
                }
                state.items = ids.into_iter().collect();
                state.status = WishlistStatus::Succeeded;
            }
            WishlistEvent::FetchFailed { epoch, message } => {
                if !state.epochs.admits(self.policy, epoch) {
                    debug!(slice = "wishlist", %epoch, "Stale settlement discarded");
                    return;
                }
                state.status = WishlistStatus::Failed;
                state.error = Some(message);
            }
            WishlistEvent::MutationPending => {
                state.status = WishlistStatus::Loading;
                state.error = None;
            }
            WishlistEvent::Added(id) => {
                state.items.insert(id);
                state.status = WishlistStatus::Succeeded;
            }
            WishlistEvent::Removed(id) => {
                state.items.remove(&id);
                state.status = WishlistStatus::Succeeded;
            }
            WishlistEvent::MutationFailed(message) => {
                state.status = WishlistStatus::Failed;
                state.error = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(state: &WishlistState) -> Vec<&str> {
        state.items.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_fetch_deduplicates() {
        let slice = WishlistSlice::new(SettlementPolicy::default());
        let mut state = slice.initial_state();
        slice.reduce(&mut state, WishlistEvent::FetchPending { epoch: Epoch(1) });
        assert_eq!(state.status, WishlistStatus::Loading);

        slice.reduce(
            &mut state,
            WishlistEvent::FetchSucceeded {
                epoch: Epoch(1),
                ids: vec!["P2".into(), "P1".into(), "P2".into()],
            },
        );
        assert_eq!(ids(&state), vec!["P1", "P2"]);
        assert_eq!(state.status, WishlistStatus::Succeeded);
    }

    #[test]
    fn test_add_twice_holds_id_once() {
        let slice = WishlistSlice::new(SettlementPolicy::default());
        let mut state = slice.initial_state();
        slice.reduce(&mut state, WishlistEvent::Added("P1".into()));
        slice.reduce(&mut state, WishlistEvent::Added("P1".into()));
        assert_eq!(ids(&state), vec!["P1"]);
    }

    #[test]
    fn test_pending_and_failure_never_touch_items() {
        let slice = WishlistSlice::new(SettlementPolicy::default());
        let mut state = slice.initial_state();
        slice.reduce(&mut state, WishlistEvent::Added("P1".into()));

        slice.reduce(&mut state, WishlistEvent::MutationPending);
        assert_eq!(ids(&state), vec!["P1"]);
        slice.reduce(&mut state, WishlistEvent::MutationFailed("offline".into()));
        assert_eq!(ids(&state), vec!["P1"]);
        assert_eq!(state.status, WishlistStatus::Failed);

        slice.reduce(&mut state, WishlistEvent::Removed("P404".into()));
        assert_eq!(ids(&state), vec!["P1"]);
    }

    #[test]
    fn test_fetch_failure_keeps_items() {
        let slice = WishlistSlice::new(SettlementPolicy::default());
        let mut state = slice.initial_state();
        slice.reduce(&mut state, WishlistEvent::Added("P1".into()));
        slice.reduce(&mut state, WishlistEvent::FetchPending { epoch: Epoch(1) });
        slice.reduce(
            &mut state,
            WishlistEvent::FetchFailed {
                epoch: Epoch(1),
                message: "Failed to fetch wishlist".into(),
            },
        );
        assert_eq!(ids(&state), vec!["P1"]);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch wishlist"));
    }

    #[test]
    fn test_entries_decode_from_ids_or_objects() {
        let entries: Vec<WishlistEntry> =
            serde_json::from_value(json!(["P1", { "_id": "P2", "title": "Loft" }, { "id": "P3" }]))
                .unwrap();
        let ids: Vec<String> = entries.into_iter().filter_map(WishlistEntry::into_id).collect();
        assert_eq!(ids, vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_entry_with_both_id_keys_prefers_id() {
        let entries: Vec<WishlistEntry> = serde_json::from_value(json!([
            { "_id": "mongo-P4", "id": "P4", "title": "Barn" },
            { "title": "no key at all" }
        ]))
        .unwrap();
        let ids: Vec<String> = entries.into_iter().filter_map(WishlistEntry::into_id).collect();
        assert_eq!(ids, vec!["P4"]);
    }
}
