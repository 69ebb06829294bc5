use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    BookingId, BookingStatus, ClientContact, ClientId, Pet, PetId, ServiceKind,
};
use super::eligibility::MeetGreetNotice;
use super::intake::BookedPet;

/// Stored booking, including the eligibility gate it was accepted under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: BookingId,
    pub service: ServiceKind,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub client: ClientContact,
    pub client_id: Option<ClientId>,
    pub pets: Vec<BookedPet>,
    pub status: BookingStatus,
    pub requires_meet_greet: bool,
    pub notice: Option<MeetGreetNotice>,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn status_view(&self) -> BookingStatusView {
        BookingStatusView {
            booking_id: self.id.clone(),
            status: self.status.label(),
            requires_meet_greet: self.requires_meet_greet,
            pet_count: self.pets.len(),
            notice: self.notice.map(|notice| notice.message().to_string()),
        }
    }
}

/// Storage abstraction for accepted bookings.
pub trait BookingRepository: Send + Sync {
    fn insert(&self, record: BookingRecord) -> Result<BookingRecord, RepositoryError>;
    fn fetch(&self, id: &BookingId) -> Result<Option<BookingRecord>, RepositoryError>;
    fn list_by_status(&self, status: BookingStatus) -> Result<Vec<BookingRecord>, RepositoryError>;
}

/// Read access to pets already on file.
pub trait PetRegistry: Send + Sync {
    fn fetch(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public projection of a booking for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusView {
    pub booking_id: BookingId,
    pub status: &'static str,
    pub requires_meet_greet: bool,
    pub pet_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}
