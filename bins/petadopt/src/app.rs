//! Shared state for one command invocation

use crate::OutputFormat;
use anyhow::Result;
use petadopt_core::config::Config;
use petadopt_shelter::{
    AdoptionService, AnimalService, ApiResponse, AuthService, AuthSettings, JsonStore,
    KitService, LogNotifier,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Loaded configuration plus the opened data file.
pub struct App {
    pub config: Config,
    pub format: OutputFormat,
    store: Arc<JsonStore>,
}

impl App {
    /// Open the data file; `data` overrides the configured path.
    pub fn open(config: Config, data: Option<PathBuf>, format: OutputFormat) -> Result<Self> {
        let path = data.unwrap_or_else(|| PathBuf::from(&config.schema.storage.data_file));
        let store = JsonStore::open(path)?;
        Ok(Self {
            config,
            format,
            store: Arc::new(store),
        })
    }

    pub fn animals(&self) -> AnimalService<JsonStore> {
        AnimalService::new(self.store.clone())
    }

    pub fn adoptions(&self) -> AdoptionService<JsonStore> {
        AdoptionService::new(self.store.clone())
    }

    pub fn kits(&self) -> KitService<JsonStore> {
        KitService::new(self.store.clone())
    }

    pub fn auth(&self) -> AuthService<JsonStore, LogNotifier> {
        AuthService::new(
            self.store.clone(),
            LogNotifier,
            AuthSettings::from(&self.config.schema.auth),
        )
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Base URL for resolving stored image paths.
    pub fn media_base(&self) -> &str {
        &self.config.schema.media.base_url
    }
}

/// Print a response envelope as pretty JSON on stdout.
pub fn print_json<T: Serialize>(response: &ApiResponse<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
