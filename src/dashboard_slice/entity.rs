use crate::model::{Booking, Property, PublicProperty, User};
use chrono::{DateTime, Utc};
use std::fmt;
use sync_framework::{Epoch, EpochTracker, SettlementPolicy, Slice};
use tracing::debug;

/// The composite view model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub users: Vec<User>,
    pub properties: Vec<Property>,
    pub public_properties: Vec<PublicProperty>,
    pub bookings: Vec<Booking>,
}

impl DashboardData {
    fn apply(&mut self, section: SectionData) {
        match section {
            SectionData::Users(users) => self.users = users,
            SectionData::Properties(properties) => self.properties = properties,
            SectionData::PublicProperties(public) => self.public_properties = public,
            SectionData::Bookings(bookings) => self.bookings = bookings,
        }
    }
}

/// Dashboard branch. `data` stays `None` until the first successful aggregate fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub data: Option<DashboardData>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_fetched: Option<DateTime<Utc>>,
    epochs: EpochTracker,
}

/// One field of [`DashboardData`], refreshable on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardSection {
    Users,
    Properties,
    PublicProperties,
    Bookings,
}

impl DashboardSection {
    pub const ALL: [DashboardSection; 4] = [
        DashboardSection::Users,
        DashboardSection::Properties,
        DashboardSection::PublicProperties,
        DashboardSection::Bookings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            DashboardSection::Users => "/api/users",
            DashboardSection::Properties => "/api/properties",
            DashboardSection::PublicProperties => "/api/publicProperties",
            DashboardSection::Bookings => "/api/bookings",
        }
    }

    pub fn list_keys(self) -> &'static [&'static str] {
        match self {
            DashboardSection::Users => &["data", "users"],
            DashboardSection::Properties => &["data", "properties"],
            DashboardSection::PublicProperties => &["data", "publicProperties", "properties"],
            DashboardSection::Bookings => &["data", "bookings"],
        }
    }
}

impl fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DashboardSection::Users => "users",
            DashboardSection::Properties => "properties",
            DashboardSection::PublicProperties => "public properties",
            DashboardSection::Bookings => "bookings",
        };
        f.write_str(label)
    }
}

/// Freshly fetched contents of one section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionData {
    Users(Vec<User>),
    Properties(Vec<Property>),
    PublicProperties(Vec<PublicProperty>),
    Bookings(Vec<Booking>),
}

impl SectionData {
    pub fn section(&self) -> DashboardSection {
        match self {
            SectionData::Users(_) => DashboardSection::Users,
            SectionData::Properties(_) => DashboardSection::Properties,
            SectionData::PublicProperties(_) => DashboardSection::PublicProperties,
            SectionData::Bookings(_) => DashboardSection::Bookings,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    FetchPending {
        epoch: Epoch,
    },
    FetchSucceeded {
        epoch: Epoch,
        data: DashboardData,
        at: DateTime<Utc>,
    },
    FetchFailed {
        epoch: Epoch,
        message: String,
    },
    SectionRefreshed {
        section: SectionData,
        at: DateTime<Utc>,
    },
}

pub struct DashboardSlice {
    policy: SettlementPolicy,
}

impl DashboardSlice {
    pub fn new(policy: SettlementPolicy) -> Self {
        Self { policy }
    }
}

impl Slice for DashboardSlice {
    type State = DashboardState;
    type Event = DashboardEvent;

    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn initial_state(&self) -> DashboardState {
        DashboardState::default()
    }

    fn reduce(&self, state: &mut DashboardState, event: DashboardEvent) {
        match event {
            DashboardEvent::FetchPending { epoch } => {
                state.epochs.issue(epoch);
                state.loading = true;
                state.error = None;
            }
            DashboardEvent::FetchSucceeded { epoch, data, at } => {
                if !state.epochs.admits(self.policy, epoch) {
                    debug!(slice = "dashboard", %epoch, "Stale settlement discarded");
                    return;
                }
                state.loading = false;
                state.data = Some(data);
                state.last_fetched = Some(at);
            }
            DashboardEvent::FetchFailed { epoch, message } => {
                if !state.epochs.admits(self.policy, epoch) {
                    debug!(slice = "dashboard", %epoch, "Stale settlement discarded");
                    return;
                }
                state.loading = false;
                state.error = Some(message);
            }
            DashboardEvent::SectionRefreshed { section, at } => match state.data.as_mut() {
                Some(data) => {
                    data.apply(section);
                    state.last_fetched = Some(at);
                }
                None => {
                    debug!(slice = "dashboard", section = %section.section(), "No aggregate yet, refresh ignored");
                }
            },
        }
    }
}
