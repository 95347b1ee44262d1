//! Stored records and request payloads.
//!
//! Field names serialize in camelCase so the data file and JSON output line up
//! with what the web frontend sends.

use chrono::{DateTime, Utc};
use petadopt_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};

/// Shelter name used when a listing does not give one.
pub const DEFAULT_SHELTER: &str = "Happy Paws Shelter";

/// Fresh record id (UUID v4).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_shelter() -> String {
    DEFAULT_SHELTER.to_string()
}

/// An animal listed for adoption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: String,
    pub name: String,
    pub breed: String,
    pub age: String,
    pub gender: String,
    pub size: String,
    pub location: String,
    #[serde(default)]
    pub image: String,
    /// Species, e.g. "dog" or "cat"
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub vaccinated: bool,
    #[serde(default)]
    pub neutered: bool,
    pub price: u32,
    pub phone: String,
    pub email: String,
    #[serde(default = "default_shelter")]
    pub shelter: String,
    /// User who uploaded the listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Payload for a new listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimal {
    pub name: String,
    pub breed: String,
    pub age: String,
    pub gender: String,
    pub size: String,
    pub location: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub vaccinated: bool,
    #[serde(default)]
    pub neutered: bool,
    pub price: u32,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub shelter: Option<String>,
}

impl NewAnimal {
    /// Check required fields and contact formats.
    pub fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("name", &self.name)
            .required("breed", &self.breed)
            .required("age", &self.age)
            .required("gender", &self.gender)
            .required("size", &self.size)
            .required("location", &self.location)
            .required("image", &self.image)
            .required("type", &self.kind)
            .required("description", &self.description)
            .phone("phone", &self.phone)
            .email("email", &self.email)
            .validate()
    }

    /// Build the stored record.
    pub fn into_animal(self, owner: Option<String>) -> Animal {
        let shelter = self
            .shelter
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(default_shelter);

        Animal {
            id: new_id(),
            name: self.name.trim().to_string(),
            breed: self.breed.trim().to_string(),
            age: self.age,
            gender: self.gender,
            size: self.size,
            location: self.location.trim().to_string(),
            image: self.image,
            kind: self.kind.trim().to_string(),
            description: self.description,
            vaccinated: self.vaccinated,
            neutered: self.neutered,
            price: self.price,
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            shelter,
            owner,
        }
    }
}

/// How the adopter pays the adoption fee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Online,
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "online" => Ok(PaymentMethod::Online),
            other => Err(format!("unknown payment method '{}'", other)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Online => write!(f, "online"),
        }
    }
}

/// A submitted adoption request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adoption {
    pub id: String,
    pub animal_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub breed: String,
    pub vaccinated: bool,
    pub price: u32,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub submitted_at: DateTime<Utc>,
}

/// Shop kit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KitCategory {
    Food,
    Toy,
    Accessory,
    Health,
}

impl std::str::FromStr for KitCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(KitCategory::Food),
            "toy" => Ok(KitCategory::Toy),
            "accessory" => Ok(KitCategory::Accessory),
            "health" => Ok(KitCategory::Health),
            other => Err(format!(
                "unknown category '{}' (expected Food, Toy, Accessory or Health)",
                other
            )),
        }
    }
}

impl std::fmt::Display for KitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KitCategory::Food => "Food",
            KitCategory::Toy => "Toy",
            KitCategory::Accessory => "Accessory",
            KitCategory::Health => "Health",
        };
        f.write_str(name)
    }
}

/// A shop kit (food, toys, accessories).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kit {
    pub id: String,
    pub name: String,
    pub price: u32,
    pub description: String,
    pub image: String,
    pub category: KitCategory,
}

/// Payload for a new kit, also the shape of seed files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewKit {
    pub name: String,
    pub price: u32,
    pub description: String,
    pub image: String,
    pub category: KitCategory,
}

impl NewKit {
    pub fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("name", &self.name)
            .required("description", &self.description)
            .required("image", &self.image)
            .validate()
    }

    pub fn into_kit(self) -> Kit {
        Kit {
            id: new_id(),
            name: self.name.trim().to_string(),
            price: self.price,
            description: self.description,
            image: self.image,
            category: self.category,
        }
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Code waiting to be confirmed by the account owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingVerification {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Stored trimmed and lowercased
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<PendingVerification>,
}

impl User {
    /// Projection safe to hand back to clients.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            email_verified: self.email_verified,
        }
    }
}

/// User without password hash or pending code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub email_verified: bool,
}

/// Canonical form used for storing and looking up emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
