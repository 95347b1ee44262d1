//! Repository interface and the JSON file store
//!
//! Services only see the repository traits. [`JsonStore`] keeps every
//! collection in one document and rewrites the file after each mutation,
//! through a temp file and rename.

use crate::models::{Adoption, Animal, Kit, User};
use petadopt_core::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Animal listings.
pub trait AnimalRepository: Send + Sync {
    fn insert_animal(&self, animal: Animal) -> Result<Animal>;
    fn animals(&self) -> Result<Vec<Animal>>;
    fn find_animal(&self, id: &str) -> Result<Option<Animal>>;
    /// Returns `false` when nothing was removed.
    fn delete_animal(&self, id: &str) -> Result<bool>;
}

/// Adoption requests.
pub trait AdoptionRepository: Send + Sync {
    fn insert_adoption(&self, adoption: Adoption) -> Result<Adoption>;
    fn adoptions(&self) -> Result<Vec<Adoption>>;
}

/// Shop kits.
pub trait KitRepository: Send + Sync {
    fn insert_kits(&self, kits: Vec<Kit>) -> Result<usize>;
    fn kits(&self) -> Result<Vec<Kit>>;
    /// Returns the number of kits removed.
    fn clear_kits(&self) -> Result<usize>;
}

/// Accounts. Emails are stored normalized, so lookups compare exactly.
pub trait UserRepository: Send + Sync {
    /// Insert unless the email is taken; `None` means it was.
    fn insert_user_if_absent(&self, user: User) -> Result<Option<User>>;
    fn find_user(&self, id: &str) -> Result<Option<User>>;
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn update_user(&self, user: User) -> Result<()>;
    fn delete_user_by_email(&self, email: &str) -> Result<bool>;
}

/// On-disk document layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataDocument {
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default)]
    pub adoptions: Vec<Adoption>,
    #[serde(default)]
    pub kits: Vec<Kit>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// All collections in a single JSON file.
#[derive(Debug)]
pub struct JsonStore {
    path: Option<PathBuf>,
    data: RwLock<DataDocument>,
}

impl JsonStore {
    /// Open the store backed by `path`; a missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(Error::from)
                .context(format!("Reading {}", path.display()))?;
            if content.trim().is_empty() {
                DataDocument::default()
            } else {
                serde_json::from_str(&content)
                    .map_err(Error::from)
                    .context(format!("Parsing {}", path.display()))?
            }
        } else {
            debug!(path = %path.display(), "Data file missing, starting empty");
            DataDocument::default()
        };

        debug!(
            path = %path.display(),
            animals = data.animals.len(),
            kits = data.kits.len(),
            users = data.users.len(),
            "Opened data file"
        );

        Ok(Self {
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    /// Store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: RwLock::new(DataDocument::default()),
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, DataDocument>> {
        self.data
            .read()
            .map_err(|_| Error::storage("Data store lock poisoned"))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, DataDocument>> {
        self.data
            .write()
            .map_err(|_| Error::storage("Data store lock poisoned"))
    }

    fn read<T>(&self, f: impl FnOnce(&DataDocument) -> T) -> Result<T> {
        let guard = self.read_guard()?;
        Ok(f(&guard))
    }

    /// Apply `f` to a copy of the document and swap it in once persisted.
    ///
    /// The lock is held throughout, so a check inside `f` and the mutation
    /// it guards are atomic. A failed `f` or persist leaves the store as it was.
    fn try_write<T>(&self, f: impl FnOnce(&mut DataDocument) -> Result<T>) -> Result<T> {
        let mut guard = self.write_guard()?;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(out)
    }

    fn write<T>(&self, f: impl FnOnce(&mut DataDocument) -> T) -> Result<T> {
        self.try_write(|data| Ok(f(data)))
    }

    fn persist(&self, data: &DataDocument) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(Error::from)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        let temp_file = path.with_extension("tmp");
        std::fs::write(&temp_file, json)
            .and_then(|()| std::fs::rename(&temp_file, path))
            .map_err(Error::from)
            .context(format!("Writing {}", path.display()))
    }
}

impl AnimalRepository for JsonStore {
    fn insert_animal(&self, animal: Animal) -> Result<Animal> {
        self.write(|data| {
            data.animals.push(animal.clone());
            animal
        })
    }

    fn animals(&self) -> Result<Vec<Animal>> {
        self.read(|data| data.animals.clone())
    }

    fn find_animal(&self, id: &str) -> Result<Option<Animal>> {
        self.read(|data| data.animals.iter().find(|a| a.id == id).cloned())
    }

    fn delete_animal(&self, id: &str) -> Result<bool> {
        self.write(|data| {
            let before = data.animals.len();
            data.animals.retain(|a| a.id != id);
            data.animals.len() != before
        })
    }
}

impl AdoptionRepository for JsonStore {
    fn insert_adoption(&self, adoption: Adoption) -> Result<Adoption> {
        self.write(|data| {
            data.adoptions.push(adoption.clone());
            adoption
        })
    }

    fn adoptions(&self) -> Result<Vec<Adoption>> {
        self.read(|data| data.adoptions.clone())
    }
}

impl KitRepository for JsonStore {
    fn insert_kits(&self, kits: Vec<Kit>) -> Result<usize> {
        self.write(|data| {
            let count = kits.len();
            data.kits.extend(kits);
            count
        })
    }

    fn kits(&self) -> Result<Vec<Kit>> {
        self.read(|data| data.kits.clone())
    }

    fn clear_kits(&self) -> Result<usize> {
        self.write(|data| std::mem::take(&mut data.kits).len())
    }
}

impl UserRepository for JsonStore {
    fn insert_user_if_absent(&self, user: User) -> Result<Option<User>> {
        self.write(|data| {
            if data.users.iter().any(|u| u.email == user.email) {
                return None;
            }
            data.users.push(user.clone());
            Some(user)
        })
    }

    fn find_user(&self, id: &str) -> Result<Option<User>> {
        self.read(|data| data.users.iter().find(|u| u.id == id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.read(|data| data.users.iter().find(|u| u.email == email).cloned())
    }

    fn update_user(&self, user: User) -> Result<()> {
        self.try_write(|data| {
            let slot = data
                .users
                .iter_mut()
                .find(|u| u.id == user.id)
                .ok_or_else(|| Error::not_found("User", &user.id))?;
            *slot = user;
            Ok(())
        })
    }

    fn delete_user_by_email(&self, email: &str) -> Result<bool> {
        self.write(|data| {
            let before = data.users.len();
            data.users.retain(|u| u.email != email);
            data.users.len() != before
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{animal, new_kit};
    use chrono::Utc;
    use petadopt_core::ErrorCode;

    fn user(email: &str) -> User {
        User {
            id: crate::models::new_id(),
            name: "Asha".to_string(),
            email: email.to_string(),
            password_hash: "x".to_string(),
            role: Default::default(),
            created_at: Utc::now(),
            email_verified: false,
            verification: None,
        }
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("data.json")).unwrap();
        assert!(store.animals().unwrap().is_empty());
        assert!(!dir.path().join("data.json").exists());
    }

    #[test]
    fn test_mutations_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let store = JsonStore::open(&path).unwrap();
        let rex = store.insert_animal(animal("Rex", "dog", "Pune")).unwrap();
        store.insert_kits(vec![new_kit("Puppy Pack", 499).into_kit()]).unwrap();
        drop(store);

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(reopened.find_animal(&rex.id).unwrap(), Some(rex));
        assert_eq!(reopened.kits().unwrap().len(), 1);
        assert!(!path.with_extension("tmp").exists());

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  \"animals\""));
    }

    #[test]
    fn test_partial_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"{"users": []}"#).unwrap();

        let store = JsonStore::open(&path).unwrap();
        assert!(store.kits().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonStore::open(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::CorruptData);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn test_delete_animal() {
        let store = JsonStore::in_memory();
        let rex = store.insert_animal(animal("Rex", "dog", "Pune")).unwrap();
        assert!(store.delete_animal(&rex.id).unwrap());
        assert!(!store.delete_animal(&rex.id).unwrap());
    }

    #[test]
    fn test_user_lookup_and_update() {
        let store = JsonStore::in_memory();
        let mut asha = store
            .insert_user_if_absent(user("asha@example.com"))
            .unwrap()
            .unwrap();
        assert!(store
            .insert_user_if_absent(user("asha@example.com"))
            .unwrap()
            .is_none());

        assert!(store.find_user_by_email("asha@example.com").unwrap().is_some());
        assert!(store.find_user_by_email("ASHA@example.com").unwrap().is_none());

        asha.email_verified = true;
        store.update_user(asha.clone()).unwrap();
        assert!(store.find_user(&asha.id).unwrap().unwrap().email_verified);

        assert!(store.delete_user_by_email("asha@example.com").unwrap());
        let err = store.update_user(asha).unwrap_err();
        assert_eq!(err.code, ErrorCode::RecordNotFound);
    }

    #[test]
    fn test_clear_kits_counts() {
        let store = JsonStore::in_memory();
        store
            .insert_kits(vec![new_kit("A", 1).into_kit(), new_kit("B", 2).into_kit()])
            .unwrap();
        assert_eq!(store.clear_kits().unwrap(), 2);
        assert_eq!(store.clear_kits().unwrap(), 0);
    }

    /// A directory path where the data file should be makes every write fail.
    fn unwritable_store(dir: &tempfile::TempDir) -> JsonStore {
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        JsonStore::open(blocker.join("data.json")).unwrap()
    }

    #[test]
    fn test_failed_persist_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = unwritable_store(&dir);

        assert!(store.insert_animal(animal("Rex", "dog", "Pune")).is_err());
        assert!(store.animals().unwrap().is_empty());

        assert!(store.insert_user_if_absent(user("asha@example.com")).is_err());
        assert!(store.find_user_by_email("asha@example.com").unwrap().is_none());
    }

    #[test]
    fn test_failed_update_keeps_previous_user() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("sub");
        let store = JsonStore::open(parent.join("data.json")).unwrap();
        let mut asha = store
            .insert_user_if_absent(user("asha@example.com"))
            .unwrap()
            .unwrap();

        // A file where the parent directory was breaks the next write.
        std::fs::remove_dir_all(&parent).unwrap();
        std::fs::write(&parent, "").unwrap();

        asha.email_verified = true;
        assert!(store.update_user(asha.clone()).is_err());
        assert!(!store.find_user(&asha.id).unwrap().unwrap().email_verified);
    }

    #[test]
    fn test_concurrent_inserts_keep_email_unique() {
        let store = std::sync::Arc::new(JsonStore::in_memory());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .insert_user_if_absent(user("asha@example.com"))
                        .unwrap()
                        .is_some()
                })
            })
            .collect();

        let inserted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(inserted, 1);
    }
}
