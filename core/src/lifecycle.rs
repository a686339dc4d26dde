//! The request lifecycle state machine.
//!
//! Governs every transition a help request can make: creation, acceptance by
//! a volunteer, completion, deletion by the creator, and the lazy expiry
//! sweep. Caller identity is an explicit parameter of every operation.
//!
//! # Concurrency
//!
//! Accept and complete re-check their precondition *at transition time*
//! through the store's conditional updates, never against a cached read.
//! Two concurrent accepts of the same open request therefore resolve to
//! exactly one winner; the loser observes the new state and fails with
//! `InvalidState`.

use crate::environment::Clock;
use crate::error::{CoreError, Result};
use crate::store::{AccountStore, RequestStore};
use crate::types::{
    AccountId, HelpRequest, NewHelpRequest, RequestFilter, RequestId, RequestStatus, Role,
    DEFAULT_EXPIRY_HOURS, MAX_DESCRIPTION_LEN, MAX_EXPIRY_HOURS, MAX_TITLE_LEN, MIN_EXPIRY_HOURS,
};
use chrono::Duration;
use std::sync::Arc;

/// The state machine and authorization rules for help requests.
///
/// Holds the stores and the clock; owns no request state itself.
#[derive(Clone)]
pub struct LifecycleEngine {
    requests: Arc<dyn RequestStore>,
    accounts: Arc<dyn AccountStore>,
    clock: Arc<dyn Clock>,
}

impl LifecycleEngine {
    /// Create a new engine over the given stores and clock.
    #[must_use]
    pub fn new(
        requests: Arc<dyn RequestStore>,
        accounts: Arc<dyn AccountStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            requests,
            accounts,
            clock,
        }
    }

    /// Create a new help request. Always starts `Open` with no volunteer.
    ///
    /// `expires_at` is `now + horizon`, where the horizon defaults to 24
    /// hours and must lie in 1..=72.
    ///
    /// # Errors
    ///
    /// - `Validation` if the input fails boundary validation
    /// - `Store` if persistence fails
    pub async fn create(
        &self,
        requester_id: AccountId,
        input: NewHelpRequest,
    ) -> Result<HelpRequest> {
        let input = validate_new_request(input)?;
        let hours = input.expires_in_hours.unwrap_or(DEFAULT_EXPIRY_HOURS);

        let created_at = self.clock.now();
        let request = HelpRequest {
            id: RequestId::new(),
            requester_id,
            title: input.title,
            description: input.description,
            category: input.category,
            urgency: input.urgency,
            location_name: input.location_name,
            coordinates: input.coordinates,
            status: RequestStatus::Open,
            volunteer_id: None,
            created_at,
            expires_at: created_at + Duration::hours(hours),
            completed_at: None,
        };

        self.requests.insert(&request).await?;
        tracing::info!(
            id = %request.id,
            requester = %requester_id,
            category = %request.category,
            urgency = %request.urgency,
            "help request created"
        );
        Ok(request)
    }

    /// Fetch a single request.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such request
    /// - `Store` if the query fails
    pub async fn get(&self, id: RequestId) -> Result<HelpRequest> {
        self.requests.get(id).await?.ok_or(CoreError::NotFound)
    }

    /// List requests matching the filter, newest first. Sweeps overdue
    /// requests first so the result never contains a stale `Open` entry.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the sweep or the query fails.
    pub async fn list(&self, filter: &RequestFilter) -> Result<Vec<HelpRequest>> {
        self.expire_overdue().await?;
        self.requests.list(filter).await
    }

    /// List requests assigned to the given volunteer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the query fails.
    pub async fn list_by_volunteer(&self, volunteer_id: AccountId) -> Result<Vec<HelpRequest>> {
        self.requests.list_by_volunteer(volunteer_id).await
    }

    /// Accept an open request on behalf of a volunteer: `Open → Accepted`,
    /// assigning `volunteer_id` to the caller.
    ///
    /// The caller's role is resolved from the identity store, and the
    /// open-state precondition is re-checked atomically at transition time.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such request
    /// - `InvalidState` if the request is not `Open` (including losing a
    ///   race against another volunteer)
    /// - `Forbidden` if the caller does not hold the volunteer role
    /// - `Store` if a store operation fails
    pub async fn accept(&self, id: RequestId, caller: AccountId) -> Result<HelpRequest> {
        let existing = self.get(id).await?;
        if existing.status != RequestStatus::Open {
            return Err(CoreError::InvalidState {
                current: existing.status,
            });
        }

        let is_volunteer = self
            .accounts
            .get(caller)
            .await?
            .is_some_and(|account| account.role == Role::Volunteer);
        if !is_volunteer {
            return Err(CoreError::forbidden("only volunteers can accept requests"));
        }

        match self.requests.accept_if_open(id, caller).await? {
            Some(updated) => {
                tracing::info!(id = %id, volunteer = %caller, "help request accepted");
                Ok(updated)
            }
            // Lost the race between the read above and the claim.
            None => match self.requests.get(id).await? {
                Some(current) => Err(CoreError::InvalidState {
                    current: current.status,
                }),
                None => Err(CoreError::NotFound),
            },
        }
    }

    /// Complete an accepted request: `Accepted → Completed`, stamping
    /// `completed_at`.
    ///
    /// Allowed for the original requester and the assigned volunteer only.
    /// Authorization is checked before state, so a third party is refused
    /// with `Forbidden` regardless of the request's state.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such request
    /// - `Forbidden` if the caller is neither requester nor assigned
    ///   volunteer
    /// - `InvalidState` if the request is not `Accepted`
    /// - `Store` if a store operation fails
    pub async fn complete(&self, id: RequestId, caller: AccountId) -> Result<HelpRequest> {
        let existing = self.get(id).await?;

        let authorized =
            existing.requester_id == caller || existing.volunteer_id == Some(caller);
        if !authorized {
            return Err(CoreError::forbidden(
                "only the requester or the assigned volunteer can complete this request",
            ));
        }
        if existing.status != RequestStatus::Accepted {
            return Err(CoreError::InvalidState {
                current: existing.status,
            });
        }

        match self
            .requests
            .complete_if_accepted(id, self.clock.now())
            .await?
        {
            Some(updated) => {
                tracing::info!(id = %id, caller = %caller, "help request completed");
                Ok(updated)
            }
            None => match self.requests.get(id).await? {
                Some(current) => Err(CoreError::InvalidState {
                    current: current.status,
                }),
                None => Err(CoreError::NotFound),
            },
        }
    }

    /// Remove a request entirely. Allowed for its creator only, at any
    /// status.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such request
    /// - `Forbidden` if the caller is not the creator
    /// - `Store` if a store operation fails
    pub async fn delete(&self, id: RequestId, caller: AccountId) -> Result<()> {
        let existing = self.get(id).await?;
        if existing.requester_id != caller {
            return Err(CoreError::forbidden(
                "only the creator can delete this request",
            ));
        }

        if self.requests.delete(id).await? {
            tracing::info!(id = %id, "help request deleted");
            Ok(())
        } else {
            // Removed concurrently between the read and the delete.
            Err(CoreError::NotFound)
        }
    }

    /// Transition every overdue `Open` request to `Expired`. Idempotent;
    /// runs inline before list-reads rather than on a timer.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the update fails.
    pub async fn expire_overdue(&self) -> Result<u64> {
        let expired = self.requests.expire_overdue(self.clock.now()).await?;
        if expired > 0 {
            tracing::info!(count = expired, "swept overdue requests to expired");
        }
        Ok(expired)
    }
}

/// Boundary validation for request creation. Trims free-text fields and
/// enforces length, coordinate-range and expiry-horizon bounds.
fn validate_new_request(input: NewHelpRequest) -> Result<NewHelpRequest> {
    let title = input.title.trim().to_string();
    if title.is_empty() || title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::validation(format!(
            "title must be 1..={MAX_TITLE_LEN} characters"
        )));
    }

    let description = input.description.trim().to_string();
    if description.is_empty() || description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::validation(format!(
            "description must be 1..={MAX_DESCRIPTION_LEN} characters"
        )));
    }

    let location_name = input.location_name.trim().to_string();
    if location_name.is_empty() {
        return Err(CoreError::validation("location name must not be empty"));
    }

    input.coordinates.validate()?;

    if let Some(hours) = input.expires_in_hours {
        if !(MIN_EXPIRY_HOURS..=MAX_EXPIRY_HOURS).contains(&hours) {
            return Err(CoreError::validation(format!(
                "expiry horizon must be {MIN_EXPIRY_HOURS}..={MAX_EXPIRY_HOURS} hours, got {hours}"
            )));
        }
    }

    Ok(NewHelpRequest {
        title,
        description,
        location_name,
        ..input
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, HelpCategory, Urgency};

    fn valid_input() -> NewHelpRequest {
        NewHelpRequest {
            title: "Need a ride to the clinic".to_string(),
            description: "Appointment at 3pm, can't drive".to_string(),
            category: HelpCategory::Transport,
            urgency: Urgency::Medium,
            location_name: "Maple St 12".to_string(),
            coordinates: Coordinates::new(52.52, 13.405),
            expires_in_hours: None,
        }
    }

    #[test]
    fn validation_trims_free_text() {
        let validated = validate_new_request(NewHelpRequest {
            title: "  padded  ".to_string(),
            location_name: " somewhere ".to_string(),
            ..valid_input()
        })
        .unwrap();
        assert_eq!(validated.title, "padded");
        assert_eq!(validated.location_name, "somewhere");
    }

    #[test]
    fn validation_rejects_blank_title() {
        let result = validate_new_request(NewHelpRequest {
            title: "   ".to_string(),
            ..valid_input()
        });
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }

    #[test]
    fn validation_rejects_oversized_fields() {
        let result = validate_new_request(NewHelpRequest {
            title: "x".repeat(MAX_TITLE_LEN + 1),
            ..valid_input()
        });
        assert!(matches!(result, Err(CoreError::Validation { .. })));

        let result = validate_new_request(NewHelpRequest {
            description: "x".repeat(MAX_DESCRIPTION_LEN + 1),
            ..valid_input()
        });
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }

    #[test]
    fn validation_bounds_the_expiry_horizon() {
        for hours in [0, 73, -5] {
            let result = validate_new_request(NewHelpRequest {
                expires_in_hours: Some(hours),
                ..valid_input()
            });
            assert!(matches!(result, Err(CoreError::Validation { .. })), "{hours}");
        }
        for hours in [1, 24, 72] {
            assert!(
                validate_new_request(NewHelpRequest {
                    expires_in_hours: Some(hours),
                    ..valid_input()
                })
                .is_ok(),
                "{hours}"
            );
        }
    }

    #[test]
    fn validation_rejects_out_of_range_coordinates() {
        let result = validate_new_request(NewHelpRequest {
            coordinates: Coordinates::new(91.0, 0.0),
            ..valid_input()
        });
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }
}
