use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{BookingId, BookingRequest, Pet};
use super::eligibility::{
    BookingDecision, ClassificationView, EligibilityEngine, EligibilityReport,
};
use super::intake::{BookedPet, IntakeGuard, IntakeViolation};
use super::repository::{BookingRecord, BookingRepository, PetRegistry, RepositoryError};

/// Service composing intake validation, the eligibility engine, and storage.
pub struct BookingIntakeService<R, P> {
    guard: IntakeGuard,
    engine: EligibilityEngine,
    bookings: Arc<R>,
    pets: Arc<P>,
}

static BOOKING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_booking_id() -> BookingId {
    let id = BOOKING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    BookingId(format!("bk-{id:06}"))
}

impl<R, P> BookingIntakeService<R, P>
where
    R: BookingRepository + 'static,
    P: PetRegistry + 'static,
{
    pub fn new(bookings: Arc<R>, pets: Arc<P>, engine: EligibilityEngine) -> Self {
        Self {
            guard: IntakeGuard,
            engine,
            bookings,
            pets,
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Classify every pet in the request without storing anything.
    pub fn assess(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingAssessment, BookingServiceError> {
        let registered = self.registered_pets(request)?;
        let pool = self.guard.pet_pool(request, &registered)?;
        Ok(self.assess_pool(pool, request.client_is_new()))
    }

    /// Validate, gate on eligibility, and store the booking.
    pub fn submit(&self, request: BookingRequest) -> Result<BookingRecord, BookingServiceError> {
        let registered = self.registered_pets(&request)?;
        let pool = self.guard.validate(&request, &registered)?;
        let assessment = self.assess_pool(pool, request.client_is_new());

        if !assessment.decision.can_proceed() {
            let messages = assessment.report.blocked_messages();
            warn!(
                client = %request.client.email,
                blocked = messages.len(),
                "booking refused for blocked pet"
            );
            return Err(BookingServiceError::BlockedPet { messages });
        }

        let record = BookingRecord {
            id: next_booking_id(),
            service: request.service,
            check_in: request.check_in,
            check_out: request.check_out,
            client: request.client,
            client_id: request.client_id,
            pets: assessment.pets.into_iter().map(|entry| entry.pet).collect(),
            status: assessment.decision.booking_status(),
            requires_meet_greet: assessment.decision.requires_meet_greet,
            notice: assessment.report.notice,
            created_at: Utc::now(),
        };

        let stored = self.bookings.insert(record)?;
        info!(
            booking_id = %stored.id.0,
            status = stored.status.label(),
            pets = stored.pets.len(),
            "booking accepted"
        );
        Ok(stored)
    }

    pub fn get(&self, booking_id: &BookingId) -> Result<BookingRecord, BookingServiceError> {
        let record = self
            .bookings
            .fetch(booking_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn registered_pets(&self, request: &BookingRequest) -> Result<Vec<Pet>, RepositoryError> {
        let mut found = Vec::with_capacity(request.registered_pet_ids.len());
        for id in &request.registered_pet_ids {
            if let Some(pet) = self.pets.fetch(id)? {
                found.push(pet);
            }
        }
        Ok(found)
    }

    fn assess_pool(&self, pool: Vec<BookedPet>, client_is_new: bool) -> BookingAssessment {
        let descriptors: Vec<_> = pool.iter().map(|pet| pet.descriptor.clone()).collect();
        let report = self.engine.assess(&descriptors, client_is_new);

        let pets = pool
            .into_iter()
            .zip(report.pets.iter())
            .map(|(pet, result)| AssessedPet {
                pet,
                classification: result.view(),
            })
            .collect();

        BookingAssessment {
            decision: report.decision,
            notice: report.notice.map(|notice| notice.message().to_string()),
            pets,
            report,
        }
    }
}

/// Eligibility of a full booking request, pet by pet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAssessment {
    #[serde(flatten)]
    pub decision: BookingDecision,
    pub pets: Vec<AssessedPet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip)]
    pub report: EligibilityReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessedPet {
    #[serde(flatten)]
    pub pet: BookedPet,
    pub classification: ClassificationView,
}

/// Error raised by the booking intake service.
#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error("booking includes a pet we cannot board: {}", .messages.join(" "))]
    BlockedPet { messages: Vec<String> },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
