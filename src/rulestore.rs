use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Ruleset;

const CANONICAL_FILE: &str = "rules.yaml";
const AUTOSAVE_FILE: &str = "rules_autosave.yaml";

/// Persists the ruleset under one directory: a canonical `rules.yaml`, a
/// timestamped backup per full save (never overwritten), and a single
/// `rules_autosave.yaml` rewritten after every categorization step.
pub struct RuleStore {
    dir: PathBuf,
}

impl RuleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn canonical_path(&self) -> PathBuf {
        self.dir.join(CANONICAL_FILE)
    }

    pub fn autosave_path(&self) -> PathBuf {
        self.dir.join(AUTOSAVE_FILE)
    }

    /// Load the canonical ruleset. A missing file is a normal first run and
    /// yields an empty ruleset; malformed YAML is an error.
    pub fn load(&self) -> Result<Ruleset> {
        let path = self.canonical_path();
        if !path.exists() {
            return Ok(Ruleset::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Full save: canonical file plus a `rules_YYYYmmdd_HHMMSS.yaml` copy so
    /// no historical ruleset version is ever lost.
    pub fn save_with_backup(&self, ruleset: &Ruleset) -> Result<()> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        self.write(&self.canonical_path(), ruleset)?;
        self.write(&self.dir.join(format!("rules_{stamp}.yaml")), ruleset)?;
        Ok(())
    }

    /// Lightweight autosave, overwritten each time. No backup history.
    pub fn autosave(&self, ruleset: &Ruleset) -> Result<()> {
        self.write(&self.autosave_path(), ruleset)
    }

    fn write(&self, path: &Path, ruleset: &Ruleset) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let yaml = serde_yaml::to_string(ruleset)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}
