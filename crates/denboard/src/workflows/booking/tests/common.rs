use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::booking::domain::{
    BookingId, BookingRequest, BookingStatus, ClientContact, ClientId, ClientStatus, NewPet, Pet,
    PetApproval, PetDescriptor, PetId, ServiceKind, Sociability, Species,
};
use crate::workflows::booking::eligibility::{EligibilityEngine, RuleTables};
use crate::workflows::booking::repository::{
    BookingRecord, BookingRepository, PetRegistry, RepositoryError,
};
use crate::workflows::booking::{booking_router, BookingIntakeService};

/// Small rule set used by the documented scenarios.
pub(super) fn scenario_rules() -> RuleTables {
    RuleTables::new(
        ["rottweiler", "cane corso"],
        ["pit bull", "german shepherd"],
        41.0,
    )
    .expect("scenario rules are valid")
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(Arc::new(scenario_rules()))
}

pub(super) fn pet(breed: &str, weight: f64) -> PetDescriptor {
    PetDescriptor::new(breed, weight)
}

pub(super) fn new_pet(name: &str, breed: &str, weight: f64) -> NewPet {
    NewPet {
        name: name.to_string(),
        species: Species::Dog,
        breed: breed.to_string(),
        weight,
        age_years: 4,
        is_puppy: false,
        needs_medication: false,
        medication_notes: String::new(),
        gets_along_dogs: Sociability::Yes,
        gets_along_cats: Sociability::Unknown,
        special_needs: String::new(),
    }
}

pub(super) fn registered_pet(id: &str, breed: Option<&str>, weight: Option<f64>) -> Pet {
    Pet {
        id: PetId(id.to_string()),
        client_id: ClientId("client-7".to_string()),
        name: format!("Pet {id}"),
        species: Species::Dog,
        breed: breed.map(str::to_string),
        weight,
        age_years: Some(6),
        is_puppy: false,
        needs_medication: true,
        medication_notes: Some("Apoquel with breakfast".to_string()),
        gets_along_dogs: Sociability::Sometimes,
        gets_along_cats: Sociability::No,
        special_needs: None,
        status: PetApproval::Approved,
    }
}

pub(super) fn booking_request() -> BookingRequest {
    BookingRequest {
        service: ServiceKind::Boarding,
        check_in: NaiveDate::from_ymd_opt(2026, 11, 20).expect("valid date"),
        check_out: NaiveDate::from_ymd_opt(2026, 11, 23).expect("valid date"),
        client: ClientContact {
            name: "Dana Whitfield".to_string(),
            email: "dana@example.com".to_string(),
            phone: "(321) 555-0142".to_string(),
        },
        client_id: Some(ClientId("client-7".to_string())),
        client_status: ClientStatus::Approved,
        pets: vec![new_pet("Biscuit", "Labrador", 20.0)],
        registered_pet_ids: Vec::new(),
    }
}

pub(super) fn build_service() -> (
    BookingIntakeService<MemoryBookings, MemoryPets>,
    Arc<MemoryBookings>,
    Arc<MemoryPets>,
) {
    let bookings = Arc::new(MemoryBookings::default());
    let pets = Arc::new(MemoryPets::default());
    let service = BookingIntakeService::new(bookings.clone(), pets.clone(), engine());
    (service, bookings, pets)
}

pub(super) fn router_with_service(
    service: BookingIntakeService<MemoryBookings, MemoryPets>,
) -> axum::Router {
    booking_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryBookings {
    pub(super) records: Arc<Mutex<HashMap<BookingId, BookingRecord>>>,
}

impl BookingRepository for MemoryBookings {
    fn insert(&self, record: BookingRecord) -> Result<BookingRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &BookingId) -> Result<Option<BookingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_by_status(&self, status: BookingStatus) -> Result<Vec<BookingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == status)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryPets {
    pets: Arc<Mutex<HashMap<PetId, Pet>>>,
}

impl MemoryPets {
    pub(super) fn register(&self, pet: Pet) {
        self.pets
            .lock()
            .expect("registry mutex poisoned")
            .insert(pet.id.clone(), pet);
    }
}

impl PetRegistry for MemoryPets {
    fn fetch(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError> {
        let guard = self.pets.lock().expect("registry mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct ConflictBookings;

impl BookingRepository for ConflictBookings {
    fn insert(&self, _record: BookingRecord) -> Result<BookingRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &BookingId) -> Result<Option<BookingRecord>, RepositoryError> {
        Ok(None)
    }

    fn list_by_status(&self, _status: BookingStatus) -> Result<Vec<BookingRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableBookings;

impl BookingRepository for UnavailableBookings {
    fn insert(&self, _record: BookingRecord) -> Result<BookingRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &BookingId) -> Result<Option<BookingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_by_status(&self, _status: BookingStatus) -> Result<Vec<BookingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
