//! # Outcomes, Signals & Epochs
//!
//! Every triggered remote operation resolves to exactly one [`AsyncOutcome`]. The owning
//! slice observes the lifecycle as [`Signal`]s tagged with an [`Epoch`], which lets a
//! slice decide (per [`SettlementPolicy`]) whether a late settlement may still land.

use std::fmt;
use std::str::FromStr;

/// The tri-state result of one triggered operation.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncOutcome<T> {
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> AsyncOutcome<T> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, AsyncOutcome::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AsyncOutcome::Failed(_))
    }

    /// The success value, discarding the other states.
    pub fn succeeded(self) -> Option<T> {
        match self {
            AsyncOutcome::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if this outcome failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            AsyncOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AsyncOutcome<U> {
        match self {
            AsyncOutcome::Pending => AsyncOutcome::Pending,
            AsyncOutcome::Succeeded(value) => AsyncOutcome::Succeeded(f(value)),
            AsyncOutcome::Failed(message) => AsyncOutcome::Failed(message),
        }
    }
}

/// Monotonically increasing request number, allocated per slice client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(pub u64);

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One lifecycle step of a triggered operation, as seen by the owning slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal<T> {
    pub epoch: Epoch,
    pub outcome: AsyncOutcome<T>,
}

impl<T> Signal<T> {
    pub fn new(epoch: Epoch, outcome: AsyncOutcome<T>) -> Self {
        Self { epoch, outcome }
    }
}

/// How a slice treats a settlement that arrives after a newer request was issued.
///
/// `LastSettledWins` applies every settlement in arrival order: a slow, older fetch can
/// overwrite the result of a faster, newer one. `LatestIssuedWins` drops settlements whose
/// epoch is older than the newest pending request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettlementPolicy {
    #[default]
    LastSettledWins,
    LatestIssuedWins,
}

impl SettlementPolicy {
    pub fn admits(self, settled: Epoch, latest_issued: Epoch) -> bool {
        match self {
            SettlementPolicy::LastSettledWins => true,
            SettlementPolicy::LatestIssuedWins => settled >= latest_issued,
        }
    }
}

impl FromStr for SettlementPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-settled" | "last-settled-wins" => Ok(SettlementPolicy::LastSettledWins),
            "latest-issued" | "latest-issued-wins" => Ok(SettlementPolicy::LatestIssuedWins),
            other => Err(format!("unknown settlement policy: {other}")),
        }
    }
}

/// Remembers the newest epoch a slice has seen go pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpochTracker {
    latest: Epoch,
}

impl EpochTracker {
    pub fn issue(&mut self, epoch: Epoch) {
        if epoch > self.latest {
            self.latest = epoch;
        }
    }

    pub fn latest(&self) -> Epoch {
        self.latest
    }

    pub fn admits(&self, policy: SettlementPolicy, settled: Epoch) -> bool {
        policy.admits(settled, self.latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_settled_admits_stale_epochs() {
        let mut tracker = EpochTracker::default();
        tracker.issue(Epoch(1));
        tracker.issue(Epoch(2));
        assert!(tracker.admits(SettlementPolicy::LastSettledWins, Epoch(1)));
    }

    #[test]
    fn test_latest_issued_discards_stale_epochs() {
        let mut tracker = EpochTracker::default();
        tracker.issue(Epoch(2));
        tracker.issue(Epoch(1)); // never moves backwards
        assert_eq!(tracker.latest(), Epoch(2));
        assert!(!tracker.admits(SettlementPolicy::LatestIssuedWins, Epoch(1)));
        assert!(tracker.admits(SettlementPolicy::LatestIssuedWins, Epoch(2)));
    }

    #[test]
    fn test_policy_parses_from_config_strings() {
        assert_eq!(
            "latest-issued".parse::<SettlementPolicy>(),
            Ok(SettlementPolicy::LatestIssuedWins)
        );
        assert_eq!(
            " Last-Settled ".parse::<SettlementPolicy>(),
            Ok(SettlementPolicy::LastSettledWins)
        );
        assert!("first-wins".parse::<SettlementPolicy>().is_err());
    }

    #[test]
    fn test_outcome_accessors() {
        let ok: AsyncOutcome<u32> = AsyncOutcome::Succeeded(3);
        let failed: AsyncOutcome<u32> = AsyncOutcome::Failed("boom".into());
        assert!(ok.is_succeeded());
        assert_eq!(failed.failure(), Some("boom"));
        assert_eq!(ok.map(|n| n * 2).succeeded(), Some(6));
        assert_eq!(failed.succeeded(), None);
    }
}
