//! Persisted wand settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use strum::IntoEnumIterator;
use tracing::{debug, info};
use wand_core::{MaterialCatalog, WandConfig, WandType};

use crate::document::{parse_document, read_file, wand_config};
use crate::error::{Result, SettingsError};
use crate::migration::migrate;
use crate::writer::render_settings;

/// One config per wand type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WandSettings {
    wands: BTreeMap<WandType, WandConfig>,
}

impl WandSettings {
    /// Every wand type with its first-run configuration.
    pub fn defaults() -> Self {
        WandType::iter()
            .map(|wand| (wand, wand.default_config()))
            .collect()
    }

    pub fn get(&self, wand: WandType) -> Option<&WandConfig> {
        self.wands.get(&wand)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WandType, &WandConfig)> {
        self.wands.iter().map(|(wand, config)| (*wand, config))
    }

    pub fn len(&self) -> usize {
        self.wands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wands.is_empty()
    }

    /// Validates every wand, stopping at the first failure.
    pub fn validate(&self, catalog: &dyn MaterialCatalog) -> Result<()> {
        for (wand, config) in self.iter() {
            config
                .validate(wand, catalog)
                .map_err(|source| SettingsError::Invalid { wand, source })?;
        }
        Ok(())
    }
}

impl FromIterator<(WandType, WandConfig)> for WandSettings {
    fn from_iter<I: IntoIterator<Item = (WandType, WandConfig)>>(iter: I) -> Self {
        Self {
            wands: iter.into_iter().collect(),
        }
    }
}

/// Owner of the settings file and of the mapping currently in effect.
///
/// The active mapping only changes through [`SettingsStore::reload`], and only
/// when the whole new document is valid.
#[derive(Debug)]
pub struct SettingsStore {
    file: PathBuf,
    active: Option<WandSettings>,
}

impl SettingsStore {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            active: None,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Mapping from the last successful reload.
    pub fn settings(&self) -> Option<&WandSettings> {
        self.active.as_ref()
    }

    /// Reads, upgrades and validates the document without touching the
    /// active mapping or the file.
    pub fn load(&self, catalog: &dyn MaterialCatalog) -> Result<WandSettings> {
        let mut document = match read_file(&self.file)? {
            Some(content) => parse_document(&self.file, &content)?,
            None => {
                info!(
                    target: "wand::settings",
                    file = %self.file.display(),
                    "settings file not found, using defaults"
                );
                Default::default()
            }
        };
        migrate(&mut document);

        let settings = WandType::iter()
            .map(|wand| {
                let user: Option<Value> = document.remove(wand.config_key());
                wand_config(&self.file, wand, user).map(|config| (wand, config))
            })
            .collect::<Result<WandSettings>>()?;

        for key in document.keys() {
            debug!(target: "wand::settings", ?key, "ignoring unknown top-level key");
        }

        settings.validate(catalog)?;
        Ok(settings)
    }

    /// Loads the document and, if every wand validates, writes the normalized
    /// document back and makes it the active mapping.
    ///
    /// On any failure the previous mapping stays active.
    pub fn reload(&mut self, catalog: &dyn MaterialCatalog) -> Result<&WandSettings> {
        let settings = self.load(catalog)?;
        self.write(&settings)?;
        info!(
            target: "wand::settings",
            file = %self.file.display(),
            wands = settings.len(),
            "settings loaded"
        );
        Ok(self.active.insert(settings))
    }

    /// Writes the active mapping, or the defaults before the first reload.
    pub fn save(&self) -> Result<()> {
        match &self.active {
            Some(settings) => self.write(settings),
            None => self.write(&WandSettings::defaults()),
        }
    }

    fn write(&self, settings: &WandSettings) -> Result<()> {
        let text = render_settings(settings).map_err(|e| SettingsError::Parse {
            file: self.file.clone(),
            detail: e.to_string(),
        })?;
        let io_error = |source| SettingsError::Io {
            file: self.file.clone(),
            source,
        };
        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let temp_path = self.file.with_extension("yml.tmp");
        std::fs::write(&temp_path, text).map_err(io_error)?;
        // Atomic rename
        std::fs::rename(&temp_path, &self.file).map_err(io_error)
    }
}
