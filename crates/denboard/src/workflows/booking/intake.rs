use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{BookingRequest, NewPet, Pet, PetDescriptor, PetId, ServiceKind};

/// Reasons a booking form is rejected before eligibility is considered.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("a booking needs at least one pet")]
    NoPets,
    #[error("client {field} is required")]
    MissingContact { field: &'static str },
    #[error("{service:?} stay from {check_in} to {check_out} is not a valid window")]
    InvalidStayWindow {
        service: ServiceKind,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    #[error("registered pet {0:?} is not on file for this client")]
    UnknownRegisteredPet(PetId),
}

/// A pet taking part in a booking, from either the form or the client's file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedPet {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_id: Option<PetId>,
    pub descriptor: PetDescriptor,
}

impl From<&NewPet> for BookedPet {
    fn from(pet: &NewPet) -> Self {
        Self {
            name: pet.name.clone(),
            registered_id: None,
            descriptor: pet.descriptor(),
        }
    }
}

impl From<&Pet> for BookedPet {
    fn from(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            registered_id: Some(pet.id.clone()),
            descriptor: pet.descriptor(),
        }
    }
}

/// Structural checks on a booking request.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Validate the whole form and return every pet that must be classified.
    pub fn validate(
        &self,
        request: &BookingRequest,
        registered: &[Pet],
    ) -> Result<Vec<BookedPet>, IntakeViolation> {
        if request.client.name.trim().is_empty() {
            return Err(IntakeViolation::MissingContact { field: "name" });
        }
        if request.client.email.trim().is_empty() {
            return Err(IntakeViolation::MissingContact { field: "email" });
        }

        // Daycare is a single visit, so it checks out the day it checks in.
        let window_ok = match request.service {
            ServiceKind::Boarding => request.check_out > request.check_in,
            ServiceKind::Daycare => request.check_out == request.check_in,
        };
        if !window_ok {
            return Err(IntakeViolation::InvalidStayWindow {
                service: request.service,
                check_in: request.check_in,
                check_out: request.check_out,
            });
        }

        let pool = self.pet_pool(request, registered)?;
        if pool.is_empty() {
            return Err(IntakeViolation::NoPets);
        }
        Ok(pool)
    }

    /// New pets followed by the selected registered pets, in selection order.
    pub fn pet_pool(
        &self,
        request: &BookingRequest,
        registered: &[Pet],
    ) -> Result<Vec<BookedPet>, IntakeViolation> {
        let mut pool: Vec<BookedPet> = request.pets.iter().map(BookedPet::from).collect();

        for id in &request.registered_pet_ids {
            let pet = registered
                .iter()
                .find(|pet| &pet.id == id)
                .filter(|pet| {
                    request
                        .client_id
                        .as_ref()
                        .map(|client| client == &pet.client_id)
                        .unwrap_or(true)
                })
                .ok_or_else(|| IntakeViolation::UnknownRegisteredPet(id.clone()))?;
            pool.push(BookedPet::from(pet));
        }

        Ok(pool)
    }
}
