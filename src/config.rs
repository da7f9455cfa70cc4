use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::snapshot::DEFAULT_SNAPSHOT_FILE;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RegistrarConfig {
    /// Snapshot file, relative to the working directory
    pub data_file: Option<String>,
    /// Save on exit (default: true)
    pub autosave: Option<bool>,
    /// Load the snapshot when the menu starts (default: true)
    pub load_on_start: Option<bool>,
}

impl RegistrarConfig {
    /// CLI override first, then the config file, then `data.json`
    pub fn data_path(&self, cli_override: Option<&Path>) -> PathBuf {
        match (cli_override, &self.data_file) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(file)) => PathBuf::from(file),
            (None, None) => PathBuf::from(DEFAULT_SNAPSHOT_FILE),
        }
    }

    pub fn autosave(&self) -> bool {
        self.autosave.unwrap_or(true)
    }

    pub fn load_on_start(&self) -> bool {
        self.load_on_start.unwrap_or(true)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("registrar.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<RegistrarConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: RegistrarConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &RegistrarConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Keep the snapshot file out of version control
pub fn ensure_gitignore(project_root: &Path, data_file: &str) -> anyhow::Result<()> {
    let gitignore_path = project_root.join(".gitignore");
    let entry = data_file.trim_start_matches("./");

    let mut content = String::new();
    if gitignore_path.exists() {
        content = std::fs::read_to_string(&gitignore_path)?;
        if content.lines().any(|line| line.trim() == entry) {
            return Ok(());
        }
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
    }
    content.push_str(entry);
    content.push('\n');
    std::fs::write(&gitignore_path, content)?;
    Ok(())
}
