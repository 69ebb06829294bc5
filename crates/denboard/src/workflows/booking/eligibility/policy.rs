use serde::{Deserialize, Serialize};

use super::super::domain::BookingStatus;

/// Why a pet was blocked or routed to a meet & greet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityReason {
    BlockedBreed { breed: String },
    RestrictedBreed { breed: String },
    LargeDog { threshold_lbs: f64 },
}

impl EligibilityReason {
    /// Customer-facing wording, using the breed exactly as it was entered.
    pub fn message(&self) -> String {
        match self {
            EligibilityReason::BlockedBreed { breed } => {
                let breed = if breed.is_empty() {
                    "this breed"
                } else {
                    breed.as_str()
                };
                format!("We're sorry, but we are unable to board {breed} at this time.")
            }
            EligibilityReason::RestrictedBreed { breed } => {
                format!("{breed} requires a meet & greet before first stay")
            }
            EligibilityReason::LargeDog { threshold_lbs } => {
                format!("Dogs over {threshold_lbs} lbs require a meet & greet before first stay")
            }
        }
    }
}

/// Per-pet classification. Blocking supersedes the meet & greet requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum PetEligibility {
    Clear,
    MeetGreetRequired(EligibilityReason),
    Blocked(EligibilityReason),
}

impl PetEligibility {
    pub fn is_blocked(&self) -> bool {
        matches!(self, PetEligibility::Blocked(_))
    }

    pub fn meet_greet_required(&self) -> bool {
        matches!(self, PetEligibility::MeetGreetRequired(_))
    }

    pub fn reason(&self) -> Option<&EligibilityReason> {
        match self {
            PetEligibility::Clear => None,
            PetEligibility::MeetGreetRequired(reason) | PetEligibility::Blocked(reason) => {
                Some(reason)
            }
        }
    }

    pub fn message(&self) -> Option<String> {
        self.reason().map(EligibilityReason::message)
    }

    pub fn view(&self) -> ClassificationView {
        ClassificationView {
            is_blocked: self.is_blocked(),
            meet_greet_required: self.meet_greet_required(),
            message: self.message(),
        }
    }
}

/// Flat wire shape consumed by inline form validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationView {
    pub is_blocked: bool,
    pub meet_greet_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Booking-level gate computed from every pet plus the client's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDecision {
    pub has_blocked_pet: bool,
    pub requires_meet_greet: bool,
}

impl BookingDecision {
    pub fn can_proceed(&self) -> bool {
        !self.has_blocked_pet
    }

    /// Status the backend records for an accepted booking.
    pub fn booking_status(&self) -> BookingStatus {
        if self.requires_meet_greet {
            BookingStatus::PendingMeetGreet
        } else {
            BookingStatus::Pending
        }
    }

    pub fn summary(&self) -> String {
        match (self.has_blocked_pet, self.requires_meet_greet) {
            (true, _) => "booking blocked: at least one pet cannot be boarded".to_string(),
            (false, true) => "meet & greet required before confirmation".to_string(),
            (false, false) => "eligible for booking".to_string(),
        }
    }
}

/// Banner shown on review when a meet & greet will be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetGreetNotice {
    NewClient,
    PetProfile,
}

impl MeetGreetNotice {
    pub fn for_booking(decision: &BookingDecision, client_is_new: bool) -> Option<Self> {
        if !decision.requires_meet_greet {
            return None;
        }
        if client_is_new {
            Some(MeetGreetNotice::NewClient)
        } else {
            Some(MeetGreetNotice::PetProfile)
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MeetGreetNotice::NewClient => {
                "As a new client, we require a meet & greet before your first stay. We'll reach out to schedule."
            }
            MeetGreetNotice::PetProfile => {
                "Based on your pet's breed or size, a meet & greet is required. We'll reach out to schedule."
            }
        }
    }
}

/// Fold per-pet results with the new-client policy. Order does not matter.
pub(crate) fn decide_booking<'a, I>(results: I, client_is_new: bool) -> BookingDecision
where
    I: IntoIterator<Item = &'a PetEligibility>,
{
    results.into_iter().fold(
        BookingDecision {
            has_blocked_pet: false,
            requires_meet_greet: client_is_new,
        },
        |decision, result| BookingDecision {
            has_blocked_pet: decision.has_blocked_pet || result.is_blocked(),
            requires_meet_greet: decision.requires_meet_greet || result.meet_greet_required(),
        },
    )
}
