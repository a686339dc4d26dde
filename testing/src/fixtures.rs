//! Fixture builders for accounts and request input.

use helphive_core::types::{
    Account, AccountId, Coordinates, HelpCategory, NewHelpRequest, Role, Urgency,
};

/// A requester account with no reported position.
#[must_use]
pub fn requester(display_name: &str) -> Account {
    Account {
        id: AccountId::new(),
        display_name: display_name.to_string(),
        role: Role::User,
        coordinates: None,
    }
}

/// A volunteer account with no reported position.
#[must_use]
pub fn volunteer(display_name: &str) -> Account {
    Account {
        id: AccountId::new(),
        display_name: display_name.to_string(),
        role: Role::Volunteer,
        coordinates: None,
    }
}

/// The same account with a reported position.
#[must_use]
pub fn located(account: Account, latitude: f64, longitude: f64) -> Account {
    Account {
        coordinates: Some(Coordinates::new(latitude, longitude)),
        ..account
    }
}

/// Minimal valid creation input at the given position, default 24h horizon.
#[must_use]
pub fn new_request(title: &str, latitude: f64, longitude: f64) -> NewHelpRequest {
    NewHelpRequest {
        title: title.to_string(),
        description: format!("{title} (details)"),
        category: HelpCategory::Supplies,
        urgency: Urgency::Medium,
        location_name: "Test location".to_string(),
        coordinates: Coordinates::new(latitude, longitude),
        expires_in_hours: None,
    }
}
