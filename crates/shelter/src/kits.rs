//! Shop kit catalog

use crate::error::Result;
use crate::models::{Kit, NewKit};
use crate::store::KitRepository;
use std::sync::Arc;
use tracing::info;

/// Kit catalog over a [`KitRepository`].
pub struct KitService<S> {
    store: Arc<S>,
}

impl<S: KitRepository> KitService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Kit>> {
        Ok(self.store.kits()?)
    }

    pub fn create(&self, payload: NewKit) -> Result<Kit> {
        let mut created = self.import(vec![payload])?;
        Ok(created.remove(0))
    }

    /// Add a batch of kits. Nothing is stored unless every entry is valid.
    pub fn import(&self, payloads: Vec<NewKit>) -> Result<Vec<Kit>> {
        let mut combined = petadopt_core::validation::ValidationResult::new();
        for (index, payload) in payloads.iter().enumerate() {
            for mut error in payload.validate().errors().iter().cloned() {
                if payloads.len() > 1 {
                    error.field = format!("[{}].{}", index, error.field);
                }
                combined.add_error(error);
            }
        }
        if !combined.is_valid() {
            return Err(combined.into());
        }

        let kits: Vec<Kit> = payloads.into_iter().map(NewKit::into_kit).collect();
        self.store.insert_kits(kits.clone())?;
        info!(count = kits.len(), "Kits added");
        Ok(kits)
    }

    /// Remove every kit, returning how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let removed = self.store.clear_kits()?;
        info!(removed, "Kit catalog cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShelterError;
    use crate::models::fixtures::new_kit;
    use crate::store::JsonStore;

    fn service() -> KitService<JsonStore> {
        KitService::new(Arc::new(JsonStore::in_memory()))
    }

    #[test]
    fn test_create_trims_name() {
        let service = service();
        let kit = service.create(new_kit("  Kitten Bundle ", 799)).unwrap();
        assert_eq!(kit.name, "Kitten Bundle");
        assert_eq!(service.list().unwrap(), vec![kit]);
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let service = service();
        let mut bad = new_kit("Broken", 10);
        bad.image = String::new();

        let err = service.import(vec![new_kit("Good", 10), bad]).unwrap_err();
        match err {
            ShelterError::Validation(result) => {
                assert_eq!(result.errors()[0].field, "[1].image");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_import_then_clear() {
        let service = service();
        let kits = service
            .import(vec![new_kit("A", 100), new_kit("B", 200)])
            .unwrap();
        assert_eq!(kits.len(), 2);
        assert_eq!(service.clear().unwrap(), 2);
        assert!(service.list().unwrap().is_empty());
    }
}
