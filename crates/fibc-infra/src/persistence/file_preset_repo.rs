//! File-based preset repository implementation

use fibc_domain::model::BagPreset;
use fibc_domain::repository::PresetRepository;
use fibc_types::{ConfigError, Error, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use tracing::debug;

/// File-based implementation of PresetRepository
///
/// Stores user presets in `presets.json` inside the store directory.
pub struct FilePresetRepository {
    store_path: PathBuf,
    presets: RefCell<BTreeMap<String, BagPreset>>,
}

impl FilePresetRepository {
    /// Create or load a preset repository
    ///
    /// An unreadable store is an error; it is never replaced by an empty one.
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("presets.json");

        let presets: BTreeMap<String, BagPreset> = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).map_err(|e| {
                ConfigError::ParseError(format!("preset store {}: {}", store_path.display(), e))
            })?
        } else {
            BTreeMap::new()
        };

        debug!(path = %store_path.display(), count = presets.len(), "opened preset store");
        Ok(Self {
            store_path,
            presets: RefCell::new(presets),
        })
    }

    /// Save store to disk
    fn persist(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &*self.presets.borrow())?;
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.presets.borrow().len()
    }
}

impl PresetRepository for FilePresetRepository {
    fn save(&self, preset: &BagPreset) -> std::result::Result<(), Error> {
        self.presets
            .borrow_mut()
            .insert(preset.name.clone(), preset.clone());
        self.persist()
    }

    fn find_by_name(&self, name: &str) -> std::result::Result<Option<BagPreset>, Error> {
        Ok(self.presets.borrow().get(name).cloned())
    }

    fn find_all(&self) -> std::result::Result<Vec<BagPreset>, Error> {
        Ok(self.presets.borrow().values().cloned().collect())
    }

    fn remove(&self, name: &str) -> std::result::Result<bool, Error> {
        let removed = self.presets.borrow_mut().remove(name).is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }
}
