//! # Entity Collections
//!
//! The generic `{items, loading, error}` slice shared by every server-owned list resource,
//! plus the [`Resource`] description used by clients to reach it over HTTP.

use crate::outcome::{AsyncOutcome, Epoch, EpochTracker, SettlementPolicy, Signal};
use crate::slice::Slice;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::marker::PhantomData;
use tracing::debug;

/// A server-owned record, keyed by an `id` that is unique within its collection.
pub trait Record: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone + Eq + Debug + Display + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;
}

/// State of one entity collection.
///
/// `loading` is true between a fetch going pending and its settlement. `error` holds the
/// message of the last failed settlement and is cleared when the next fetch goes pending.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T: Record> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    epochs: EpochTracker,
}

impl<T: Record> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            epochs: EpochTracker::default(),
        }
    }
}

impl<T: Record> CollectionState<T> {
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn latest_epoch(&self) -> Epoch {
        self.epochs.latest()
    }
}

/// Transitions of an entity collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionEvent<T: Record> {
    FetchPending { epoch: Epoch },
    FetchSucceeded { epoch: Epoch, items: Vec<T> },
    FetchFailed { epoch: Epoch, message: String },
    Created(T),
    Updated(T),
    Deleted(T::Id),
    MutationFailed(String),
}

impl<T: Record> CollectionEvent<T> {
    /// Map a fetch-all signal; every step of a fetch is observed.
    pub fn from_fetch(signal: Signal<Vec<T>>) -> Option<Self> {
        let epoch = signal.epoch;
        Some(match signal.outcome {
            AsyncOutcome::Pending => CollectionEvent::FetchPending { epoch },
            AsyncOutcome::Succeeded(items) => CollectionEvent::FetchSucceeded { epoch, items },
            AsyncOutcome::Failed(message) => CollectionEvent::FetchFailed { epoch, message },
        })
    }

    pub fn from_create(signal: Signal<T>) -> Option<Self> {
        Self::settled(signal.outcome, CollectionEvent::Created)
    }

    /// Also used for entity-specific actions, which settle like an update.
    pub fn from_update(signal: Signal<T>) -> Option<Self> {
        Self::settled(signal.outcome, CollectionEvent::Updated)
    }

    pub fn from_delete(signal: Signal<T::Id>) -> Option<Self> {
        Self::settled(signal.outcome, CollectionEvent::Deleted)
    }

    fn settled<V>(outcome: AsyncOutcome<V>, on_success: impl FnOnce(V) -> Self) -> Option<Self> {
        match outcome {
            AsyncOutcome::Pending => None,
            AsyncOutcome::Succeeded(value) => Some(on_success(value)),
            AsyncOutcome::Failed(message) => Some(CollectionEvent::MutationFailed(message)),
        }
    }
}

/// The [`Slice`] implementation shared by every entity collection module.
pub struct CollectionSlice<T: Record> {
    name: &'static str,
    policy: SettlementPolicy,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> CollectionSlice<T> {
    pub fn new(name: &'static str, policy: SettlementPolicy) -> Self {
        Self {
            name,
            policy,
            _record: PhantomData,
        }
    }

    pub fn policy(&self) -> SettlementPolicy {
        self.policy
    }
}

impl<T: Record> Slice for CollectionSlice<T> {
    type State = CollectionState<T>;
    type Event = CollectionEvent<T>;

    fn name(&self) -> &'static str {
        self.name
    }

    fn initial_state(&self) -> CollectionState<T> {
        CollectionState::default()
    }

    fn reduce(&self, state: &mut CollectionState<T>, event: CollectionEvent<T>) {
        match event {
            CollectionEvent::FetchPending { epoch } => {
                state.epochs.issue(epoch);
                state.loading = true;
                state.error = None;
            }
            CollectionEvent::FetchSucceeded { epoch, items } => {
                if !state.epochs.admits(self.policy, epoch) {
                    debug!(slice = self.name, %epoch, "Stale settlement discarded");
                    return;
                }
                state.loading = false;
                state.items = items;
            }
            CollectionEvent::FetchFailed { epoch, message } => {
                if !state.epochs.admits(self.policy, epoch) {
                    debug!(slice = self.name, %epoch, "Stale settlement discarded");
                    return;
                }
                state.loading = false;
                state.error = Some(message);
            }
            CollectionEvent::Created(record) => {
                match state.items.iter_mut().find(|item| item.id() == record.id()) {
                    Some(existing) => *existing = record,
                    None => state.items.push(record),
                }
            }
            CollectionEvent::Updated(record) => {
                match state.items.iter_mut().find(|item| item.id() == record.id()) {
                    Some(existing) => *existing = record,
                    None => debug!(slice = self.name, id = %record.id(), "Update for unknown id ignored"),
                }
            }
            CollectionEvent::Deleted(id) => {
                if let Some(position) = state.items.iter().position(|item| item.id() == &id) {
                    state.items.remove(position);
                }
            }
            CollectionEvent::MutationFailed(message) => {
                state.error = Some(message);
            }
        }
    }
}

/// How one REST collection is addressed and how its responses are unwrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    /// Collection path, e.g. `/api/bookings`.
    pub path: &'static str,
    /// Query appended to the list path only, e.g. `role=employee`.
    pub list_query: Option<&'static str>,
    pub singular: &'static str,
    pub plural: &'static str,
    /// Keys tried in order when a list response is an envelope.
    pub list_keys: &'static [&'static str],
    /// Keys tried in order when a single-record response is an envelope.
    pub record_keys: &'static [&'static str],
}

impl Resource {
    pub fn list_path(&self) -> String {
        match self.list_query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.to_string(),
        }
    }

    pub fn item_path(&self, id: &impl Display) -> String {
        format!("{}/{}", self.path, id)
    }

    pub fn action_path(&self, id: &impl Display, action: &impl RecordAction) -> String {
        format!("{}/{}", self.item_path(id), action.segment())
    }

    /// `"fetch bookings"` / `"Failed to fetch bookings"`.
    pub fn fetch_descriptor(&self) -> crate::RequestDescriptor {
        crate::RequestDescriptor::new(
            format!("fetch {}", self.plural),
            format!("Failed to fetch {}", self.plural),
        )
    }

    /// `"update booking"` / `"Failed to update booking"`.
    pub fn descriptor(&self, verb: &str) -> crate::RequestDescriptor {
        crate::RequestDescriptor::new(
            format!("{verb} {}", self.singular),
            format!("Failed to {verb} {}", self.singular),
        )
    }
}

/// An entity-specific operation on one record (verify, refund...).
///
/// Actions are sent to `{item_path}/{segment}` and settle like an update: the server
/// returns the changed record, which replaces the one with the same id.
pub trait RecordAction: Debug + Send + Sync {
    fn method(&self) -> Method;
    fn segment(&self) -> &'static str;
    /// Verb used in the operation name and its fallback message.
    fn verb(&self) -> &'static str;
}

/// Action type for collections without entity-specific operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAction {}

impl RecordAction for NoAction {
    fn method(&self) -> Method {
        match *self {}
    }

    fn segment(&self) -> &'static str {
        match *self {}
    }

    fn verb(&self) -> &'static str {
        match *self {}
    }
}
