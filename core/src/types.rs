//! Core domain types for help-request coordination.
//!
//! All enumerations here are closed: the wire and database representation is
//! the lowercase variant name, and anything else is rejected at the boundary
//! before reaching the state machine.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum title length accepted at the boundary.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum description length accepted at the boundary.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Default expiry horizon for new requests, in hours.
pub const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// Minimum accepted expiry horizon, in hours.
pub const MIN_EXPIRY_HOURS: i64 = 1;

/// Maximum accepted expiry horizon, in hours.
pub const MAX_EXPIRY_HOURS: i64 = 72;

/// Unique identifier for a help request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a new random request ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an account (requester or volunteer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random account ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of help being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelpCategory {
    /// Medical assistance.
    Medical,
    /// Emergency transport.
    Transport,
    /// Shelter and safety.
    Shelter,
    /// Food and supplies.
    Supplies,
    /// Anything else.
    Other,
}

impl HelpCategory {
    /// Wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Medical => "medical",
            Self::Transport => "transport",
            Self::Shelter => "shelter",
            Self::Supplies => "supplies",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for HelpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HelpCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medical" => Ok(Self::Medical),
            "transport" => Ok(Self::Transport),
            "shelter" => Ok(Self::Shelter),
            "supplies" => Ok(Self::Supplies),
            "other" => Ok(Self::Other),
            _ => Err(CoreError::Validation {
                reason: format!("unknown help category: {s}"),
            }),
        }
    }
}

/// How urgent a request is. Data, not ordering: the feed never sorts by
/// urgency server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Needs attention immediately.
    High,
    /// Needs attention soon.
    Medium,
    /// Can wait.
    Low,
}

impl Urgency {
    /// Wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(CoreError::Validation {
                reason: format!("unknown urgency level: {s}"),
            }),
        }
    }
}

/// Lifecycle state of a help request.
///
/// Transitions are forward-only: `Open → Accepted → Completed`, or
/// `Open → Expired` via the sweep. `Completed` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Created, unassigned, awaiting a volunteer.
    Open,
    /// Claimed by exactly one volunteer, work in progress.
    Accepted,
    /// Resolved. Terminal.
    Completed,
    /// Deadline passed while still unassigned. Terminal.
    Expired,
}

impl RequestStatus {
    /// Wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Expired => "expired",
        }
    }

    /// Whether the state admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Expired)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            "expired" => Ok(Self::Expired),
            _ => Err(CoreError::Validation {
                reason: format!("unknown request status: {s}"),
            }),
        }
    }
}

/// Role of an account, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A requester.
    User,
    /// A volunteer, allowed to accept open requests.
    Volunteer,
}

impl Role {
    /// Wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Volunteer => "volunteer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "volunteer" => Ok(Self::Volunteer),
            _ => Err(CoreError::Validation {
                reason: format!("unknown role: {s}"),
            }),
        }
    }
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, within [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, within [-180, 180].
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair. Range is checked by [`Self::validate`].
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Reject out-of-range positions before they reach the distance
    /// calculator, whose behavior outside these ranges is undefined.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if latitude is outside [-90, 90] or
    /// longitude is outside [-180, 180].
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoreError::Validation {
                reason: format!("latitude out of range: {}", self.latitude),
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoreError::Validation {
                reason: format!("longitude out of range: {}", self.longitude),
            });
        }
        Ok(())
    }
}

/// The central entity: a request for help.
///
/// Owned exclusively by the request store; mutated only through the
/// lifecycle engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelpRequest {
    /// Unique identifier.
    pub id: RequestId,
    /// The account that created the request.
    pub requester_id: AccountId,
    /// Short summary, 1..=200 characters.
    pub title: String,
    /// Full description, 1..=2000 characters.
    pub description: String,
    /// Kind of help needed.
    pub category: HelpCategory,
    /// Urgency level.
    pub urgency: Urgency,
    /// Free-text location label ("Corner of 5th and Main").
    pub location_name: String,
    /// Position of the request.
    pub coordinates: Coordinates,
    /// Current lifecycle state.
    pub status: RequestStatus,
    /// The accepting volunteer. Non-null iff accepted (or completed after
    /// acceptance).
    pub volunteer_id: Option<AccountId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Deadline; open requests past it are swept to `Expired`.
    pub expires_at: DateTime<Utc>,
    /// Set exactly when the request transitions to `Completed`.
    pub completed_at: Option<DateTime<Utc>>,
}

/// A participant account. Read-only to the lifecycle engine and feed
/// assembler; the identity service owns the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Name shown in feeds.
    pub display_name: String,
    /// Requester or volunteer, fixed at creation.
    pub role: Role,
    /// Last reported position; `None` until reported.
    pub coordinates: Option<Coordinates>,
}

/// Validated-at-the-boundary input for creating a help request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHelpRequest {
    /// Short summary.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Kind of help needed.
    pub category: HelpCategory,
    /// Urgency level.
    pub urgency: Urgency,
    /// Free-text location label.
    pub location_name: String,
    /// Position of the request.
    pub coordinates: Coordinates,
    /// Expiry horizon in hours, 1..=72. Defaults to 24 when absent.
    pub expires_in_hours: Option<i64>,
}

/// Filter for listing requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFilter {
    /// Only requests in this state.
    pub status: Option<RequestStatus>,
    /// Only requests created by this account ("my requests" views).
    pub requester_id: Option<AccountId>,
}

impl RequestFilter {
    /// Filter by status only.
    #[must_use]
    pub const fn with_status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            requester_id: None,
        }
    }

    /// Filter by requester only.
    #[must_use]
    pub const fn with_requester(requester_id: AccountId) -> Self {
        Self {
            status: None,
            requester_id: Some(requester_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Open).unwrap(),
            "\"open\""
        );
        assert_eq!(
            serde_json::from_str::<RequestStatus>("\"expired\"").unwrap(),
            RequestStatus::Expired
        );
        assert!(serde_json::from_str::<RequestStatus>("\"OPEN\"").is_err());
    }

    #[test]
    fn category_and_urgency_round_trip_as_str() {
        for category in [
            HelpCategory::Medical,
            HelpCategory::Transport,
            HelpCategory::Shelter,
            HelpCategory::Supplies,
            HelpCategory::Other,
        ] {
            assert_eq!(category.as_str().parse::<HelpCategory>().unwrap(), category);
        }
        for urgency in [Urgency::High, Urgency::Medium, Urgency::Low] {
            assert_eq!(urgency.as_str().parse::<Urgency>().unwrap(), urgency);
        }
    }

    #[test]
    fn unknown_wire_values_are_rejected() {
        assert!("critical".parse::<Urgency>().is_err());
        assert!("pending".parse::<RequestStatus>().is_err());
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn terminal_states() {
        assert!(!RequestStatus::Open.is_terminal());
        assert!(!RequestStatus::Accepted.is_terminal());
        assert!(RequestStatus::Completed.is_terminal());
        assert!(RequestStatus::Expired.is_terminal());
    }

    #[test]
    fn coordinate_ranges() {
        assert!(Coordinates::new(45.0, 120.0).validate().is_ok());
        assert!(Coordinates::new(90.0, -180.0).validate().is_ok());
        assert!(Coordinates::new(90.1, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, 180.5).validate().is_err());
    }
}
