//! Animal listing service

use crate::error::{Result, ShelterError};
use crate::listing::{filter_animals, ListingQuery};
use crate::models::{Animal, NewAnimal};
use crate::store::AnimalRepository;
use petadopt_search::MatchConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Listing CRUD over an [`AnimalRepository`].
pub struct AnimalService<S> {
    store: Arc<S>,
}

impl<S: AnimalRepository> AnimalService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All listings, or only those whose type equals `kind` exactly.
    pub fn list(&self, kind: Option<&str>) -> Result<Vec<Animal>> {
        let mut animals = self.store.animals()?;
        if let Some(kind) = kind {
            animals.retain(|a| a.kind == kind);
        }
        Ok(animals)
    }

    /// Listings passing the browse-page filters.
    pub fn search(&self, query: &ListingQuery, config: &MatchConfig) -> Result<Vec<Animal>> {
        let animals = self.store.animals()?;
        Ok(filter_animals(&animals, query, config)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn get(&self, id: &str) -> Result<Animal> {
        self.store
            .find_animal(id)?
            .ok_or_else(|| ShelterError::not_found("Animal", id))
    }

    /// Add a listing without an owner.
    pub fn create(&self, payload: NewAnimal) -> Result<Animal> {
        self.insert(payload, None)
    }

    /// Add a listing owned by `owner`, with the uploaded file as its image.
    pub fn upload(
        &self,
        mut payload: NewAnimal,
        owner: &str,
        image_file: Option<&str>,
    ) -> Result<Animal> {
        payload.image = image_file
            .map(|name| format!("/uploads/{}", name))
            .unwrap_or_default();
        self.insert(payload, Some(owner.to_string()))
    }

    /// Listings uploaded by `owner`.
    pub fn list_for_owner(&self, owner: &str) -> Result<Vec<Animal>> {
        let mut animals = self.store.animals()?;
        animals.retain(|a| a.owner.as_deref() == Some(owner));
        Ok(animals)
    }

    /// Remove a listing; only its owner may do so.
    pub fn delete(&self, id: &str, requester: &str) -> Result<()> {
        let animal = self.get(id)?;
        if animal.owner.as_deref() != Some(requester) {
            warn!(animal = id, requester, "Rejected delete by non-owner");
            return Err(ShelterError::Forbidden("delete this animal".to_string()));
        }

        self.store.delete_animal(id)?;
        info!(animal = id, "Listing removed");
        Ok(())
    }

    fn insert(&self, payload: NewAnimal, owner: Option<String>) -> Result<Animal> {
        let validation = payload.validate();
        if !validation.is_valid() {
            return Err(validation.into());
        }

        let animal = self.store.insert_animal(payload.into_animal(owner))?;
        info!(animal = %animal.id, name = %animal.name, kind = %animal.kind, "Listing added");
        Ok(animal)
    }
}
