//! Booking intake for the boarding wizard: eligibility gate, validation, and storage seams.

pub mod domain;
pub mod eligibility;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BookingId, BookingRequest, BookingStatus, ClientContact, ClientId, ClientStatus, NewPet, Pet,
    PetApproval, PetDescriptor, PetId, ServiceKind, Sociability, Species,
};
pub use eligibility::{
    normalize_breed, BookingDecision, ClassificationView, EligibilityEngine, EligibilityReason,
    EligibilityReport, MeetGreetNotice, PetEligibility, RuleTableError, RuleTables,
};
pub use intake::{BookedPet, IntakeGuard, IntakeViolation};
pub use repository::{
    BookingRecord, BookingRepository, BookingStatusView, PetRegistry, RepositoryError,
};
pub use router::booking_router;
pub use service::{AssessedPet, BookingAssessment, BookingIntakeService, BookingServiceError};
