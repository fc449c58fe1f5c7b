use crate::types::{Entry, PipelineError, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const ENTRIES_FILE: &str = "entries.json";
pub const TRANSLATED_FILE: &str = "translated.json";

/// On-disk JSON snapshots of stage outputs, enabling stage-skipping on rerun.
/// Snapshots are pretty-printed with non-ASCII characters preserved literally.
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn save_entries(&self, entries: &[Entry]) -> Result<()> {
        self.save(ENTRIES_FILE, entries)
    }

    pub fn load_entries(&self) -> Result<Vec<Entry>> {
        self.load(ENTRIES_FILE, "--skip-fetch")
    }

    pub fn save_translated(&self, entries: &[Entry]) -> Result<()> {
        self.save(TRANSLATED_FILE, entries)
    }

    pub fn load_translated(&self) -> Result<Vec<Entry>> {
        self.load(TRANSLATED_FILE, "--skip-translate")
    }

    fn save(&self, name: &str, entries: &[Entry]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&path, json)?;
        info!("Saved checkpoint: {} ({} entries)", path.display(), entries.len());
        Ok(())
    }

    // A missing checkpoint is a configuration error: the skip flag depends on
    // a prior run having written the file.
    fn load(&self, name: &str, flag: &str) -> Result<Vec<Entry>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Err(PipelineError::Config(format!(
                "checkpoint {} not found; {} requires a prior run that wrote it",
                path.display(),
                flag
            )));
        }

        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
