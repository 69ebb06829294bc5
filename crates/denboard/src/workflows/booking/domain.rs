use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two pet attributes the eligibility engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetDescriptor {
    #[serde(default)]
    pub breed: String,
    /// Pounds; `0` means not provided.
    #[serde(default)]
    pub weight: f64,
}

impl PetDescriptor {
    pub fn new(breed: impl Into<String>, weight: f64) -> Self {
        Self {
            breed: breed.into(),
            weight,
        }
    }
}

/// Identifier wrapper for registered pets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PetId(pub String);

/// Identifier wrapper for client accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

/// Identifier wrapper for submitted bookings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    #[default]
    Dog,
    Cat,
    Bird,
    Other,
}

/// Owner's answer to "gets along with other dogs/cats?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sociability {
    Yes,
    Sometimes,
    No,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetApproval {
    #[default]
    Pending,
    Approved,
    Blocked,
}

/// A pet already on file for a client account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub client_id: ClientId,
    pub name: String,
    #[serde(default)]
    pub species: Species,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub age_years: Option<u8>,
    #[serde(default)]
    pub is_puppy: bool,
    #[serde(default)]
    pub needs_medication: bool,
    #[serde(default)]
    pub medication_notes: Option<String>,
    #[serde(default)]
    pub gets_along_dogs: Sociability,
    #[serde(default)]
    pub gets_along_cats: Sociability,
    #[serde(default)]
    pub special_needs: Option<String>,
    #[serde(default)]
    pub status: PetApproval,
}

impl Pet {
    pub fn descriptor(&self) -> PetDescriptor {
        PetDescriptor {
            breed: self.breed.clone().unwrap_or_default(),
            weight: self.weight.unwrap_or(0.0),
        }
    }
}

/// A pet entered on the booking form for the first time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPet {
    pub name: String,
    #[serde(default)]
    pub species: Species,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub age_years: u8,
    #[serde(default)]
    pub is_puppy: bool,
    #[serde(default)]
    pub needs_medication: bool,
    #[serde(default)]
    pub medication_notes: String,
    #[serde(default)]
    pub gets_along_dogs: Sociability,
    #[serde(default)]
    pub gets_along_cats: Sociability,
    #[serde(default)]
    pub special_needs: String,
}

impl NewPet {
    pub fn descriptor(&self) -> PetDescriptor {
        PetDescriptor::new(self.breed.clone(), self.weight)
    }
}

/// Account standing as tracked by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    New,
    Pending,
    Approved,
    Active,
    Blocked,
}

impl ClientStatus {
    /// Only clients without an approved stay count as new.
    pub fn is_new(self) -> bool {
        matches!(self, ClientStatus::New)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Boarding,
    Daycare,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Booking form payload as submitted by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service: ServiceKind,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub client: ClientContact,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    /// Reported by the caller, so it is only trusted alongside a client id.
    #[serde(default)]
    pub client_status: ClientStatus,
    #[serde(default)]
    pub pets: Vec<NewPet>,
    #[serde(default)]
    pub registered_pet_ids: Vec<PetId>,
}

impl BookingRequest {
    /// Guests have no approved stay on file, whatever status they claim.
    pub fn client_is_new(&self) -> bool {
        self.client_id.is_none() || self.client_status.is_new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    #[serde(rename = "pending_meetgreet")]
    PendingMeetGreet,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::PendingMeetGreet => "pending_meetgreet",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}
