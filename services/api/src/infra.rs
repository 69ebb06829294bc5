use denboard::config::RulesConfig;
use denboard::error::AppError;
use denboard::workflows::booking::{
    BookingId, BookingRecord, BookingRepository, BookingStatus, EligibilityEngine, Pet, PetId,
    PetRegistry, RepositoryError, RuleTables,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) rules: Arc<RuleTables>,
}

/// Load the rule tables once and wrap them in a shareable engine.
pub(crate) fn load_engine(rules: &RulesConfig) -> Result<EligibilityEngine, AppError> {
    let tables = rules.load_tables()?;
    Ok(EligibilityEngine::new(Arc::new(tables)))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryBookingRepository {
    records: Arc<Mutex<HashMap<BookingId, BookingRecord>>>,
}

impl BookingRepository for InMemoryBookingRepository {
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
        let mut matching: Vec<BookingRecord> = guard
            .values()
            .filter(|record| record.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|record| record.created_at);
        Ok(matching)
    }
}

/// Registered pets the standalone service was seeded with at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPetRegistry {
    pets: Arc<Mutex<HashMap<PetId, Pet>>>,
}

impl InMemoryPetRegistry {
    pub(crate) fn with_roster(roster: Vec<Pet>) -> Self {
        let pets = roster.into_iter().map(|pet| (pet.id.clone(), pet)).collect();
        Self {
            pets: Arc::new(Mutex::new(pets)),
        }
    }
}

impl PetRegistry for InMemoryPetRegistry {
    fn fetch(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError> {
        let guard = self.pets.lock().expect("registry mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}
