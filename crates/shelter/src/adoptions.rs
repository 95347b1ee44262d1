//! Adoption requests

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::models::{new_id, Adoption, Animal, PaymentMethod};
use crate::store::AdoptionRepository;
use petadopt_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Adoption form contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequest {
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
}

impl AdoptionRequest {
    /// Form pre-filled from the chosen listing.
    pub fn for_animal(
        animal: &Animal,
        phone: impl Into<String>,
        email: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            animal_name: animal.name.clone(),
            kind: animal.kind.clone(),
            breed: animal.breed.clone(),
            vaccinated: animal.vaccinated,
            price: animal.price,
            phone: phone.into(),
            email: email.into(),
            payment_method,
        }
    }

    pub fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("animalName", &self.animal_name)
            .required("type", &self.kind)
            .required("breed", &self.breed)
            .phone("phone", &self.phone)
            .email("email", &self.email)
            .validate()
    }
}

/// Stores adoption requests.
pub struct AdoptionService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: AdoptionRepository> AdoptionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn submit(&self, request: AdoptionRequest) -> Result<Adoption> {
        let validation = request.validate();
        if !validation.is_valid() {
            return Err(validation.into());
        }

        let adoption = Adoption {
            id: new_id(),
            animal_name: request.animal_name,
            kind: request.kind,
            breed: request.breed,
            vaccinated: request.vaccinated,
            price: request.price,
            phone: request.phone.trim().to_string(),
            email: request.email.trim().to_string(),
            payment_method: request.payment_method,
            submitted_at: self.clock.now(),
        };

        let adoption = self.store.insert_adoption(adoption)?;
        info!(
            adoption = %adoption.id,
            animal = %adoption.animal_name,
            payment = %adoption.payment_method,
            "Adoption request submitted"
        );
        Ok(adoption)
    }

    pub fn list(&self) -> Result<Vec<Adoption>> {
        Ok(self.store.adoptions()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::error::ShelterError;
    use crate::models::fixtures::animal;
    use crate::store::JsonStore;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_request_prefilled_from_animal() {
        let rex = animal("Rex", "dog", "Pune");
        let request = AdoptionRequest::for_animal(&rex, "9876543210", "a@b.co", PaymentMethod::default());
        assert_eq!(request.animal_name, "Rex");
        assert_eq!(request.kind, "dog");
        assert_eq!(request.breed, "Labrador");
        assert!(request.vaccinated);
        assert_eq!(request.price, 1500);
        assert_eq!(request.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_submit_stamps_time() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let service = AdoptionService::with_clock(
            Arc::new(JsonStore::in_memory()),
            Arc::new(ManualClock::at(at)),
        );

        let request = AdoptionRequest::for_animal(
            &animal("Rex", "dog", "Pune"),
            " 9876543210 ",
            "adopter@example.com",
            PaymentMethod::Online,
        );
        let adoption = service.submit(request).unwrap();
        assert_eq!(adoption.submitted_at, at);
        assert_eq!(adoption.phone, "9876543210");
        assert_eq!(service.list().unwrap(), vec![adoption]);
    }

    #[test]
    fn test_submit_requires_contact() {
        let service = AdoptionService::new(Arc::new(JsonStore::in_memory()));
        let request = AdoptionRequest::for_animal(&animal("Rex", "dog", "Pune"), "", "", PaymentMethod::Cash);

        match service.submit(request) {
            Err(ShelterError::Validation(result)) => assert_eq!(result.errors().len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(service.list().unwrap().is_empty());
    }
}
