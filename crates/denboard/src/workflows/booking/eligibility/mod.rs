//! Breed, weight, and client-history gate applied before a booking is accepted.

mod config;
mod policy;
mod rules;

pub use config::{RuleTableError, RuleTableKind, RuleTables};
pub use policy::{
    BookingDecision, ClassificationView, EligibilityReason, MeetGreetNotice, PetEligibility,
};
pub use rules::normalize_breed;

use std::sync::Arc;

use super::domain::PetDescriptor;
use policy::decide_booking;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless classifier over an immutable set of rule tables.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    rules: Arc<RuleTables>,
}

impl EligibilityEngine {
    pub fn new(rules: Arc<RuleTables>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTables {
        &self.rules
    }

    pub fn classify(&self, breed: &str, weight_lbs: f64) -> PetEligibility {
        let result = rules::classify_pet(breed, weight_lbs, &self.rules);
        debug!(
            breed,
            weight_lbs,
            blocked = result.is_blocked(),
            meet_greet = result.meet_greet_required(),
            "classified pet"
        );
        result
    }

    pub fn classify_pet(&self, pet: &PetDescriptor) -> PetEligibility {
        self.classify(&pet.breed, pet.weight)
    }

    pub fn evaluate_booking(&self, pets: &[PetDescriptor], client_is_new: bool) -> BookingDecision {
        let results: Vec<PetEligibility> = pets.iter().map(|pet| self.classify_pet(pet)).collect();
        decide_booking(&results, client_is_new)
    }

    /// Booking gate plus the per-pet results, in input order, for display.
    pub fn assess(&self, pets: &[PetDescriptor], client_is_new: bool) -> EligibilityReport {
        let pets: Vec<PetEligibility> = pets.iter().map(|pet| self.classify_pet(pet)).collect();
        let decision = decide_booking(&pets, client_is_new);
        let notice = MeetGreetNotice::for_booking(&decision, client_is_new);

        EligibilityReport {
            decision,
            pets,
            notice,
        }
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(Arc::new(RuleTables::default()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub decision: BookingDecision,
    pub pets: Vec<PetEligibility>,
    pub notice: Option<MeetGreetNotice>,
}

impl EligibilityReport {
    /// Messages of blocked pets, used when a submission is refused.
    pub fn blocked_messages(&self) -> Vec<String> {
        self.pets
            .iter()
            .filter(|result| result.is_blocked())
            .filter_map(PetEligibility::message)
            .collect()
    }
}
