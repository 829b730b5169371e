//! On-disk storage for saved answer sets ("diagnostics") and advisor settings.
//!
//! Everything lives as JSON under one data directory, `~/.investal/` unless
//! `INVESTAL_HOME` points elsewhere.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Answers, CoreError};

const EXTENSION: &str = "answers.json";

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> CoreError + '_ {
    move |source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Diagnostic names become file names, so keep them to a safe alphabet.
fn validate_name(name: &str) -> Result<(), CoreError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidName {
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the data directory: `$INVESTAL_HOME`, else `~/.investal/`.
    pub fn default_location() -> Self {
        if let Some(home) = std::env::var_os("INVESTAL_HOME") {
            return Self::at(home);
        }
        Self::at(
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".investal"),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn answers_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{EXTENSION}"))
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    fn ensure_root(&self) -> Result<(), CoreError> {
        fs::create_dir_all(&self.root).map_err(io_err(&self.root))
    }

    /// List all saved diagnostic names, sorted.
    pub fn list_diagnostics(&self) -> Result<Vec<String>, CoreError> {
        if !self.root.exists() {
            return Ok(vec![]);
        }
        let suffix = format!(".{EXTENSION}");
        let mut names: Vec<String> = fs::read_dir(&self.root)
            .map_err(io_err(&self.root))?
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let name = entry.file_name().to_string_lossy().to_string();
                name.strip_suffix(&suffix)
                    .filter(|n| !n.starts_with('.'))
                    .map(|n| n.to_string())
            })
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn read_answers(&self, name: &str) -> Result<Answers, CoreError> {
        validate_name(name)?;
        let path = self.answers_path(name);
        if !path.exists() {
            return Err(CoreError::DiagnosticNotFound {
                name: name.to_string(),
            });
        }
        let raw = fs::read_to_string(&path).map_err(io_err(&path))?;
        Answers::from_json(&raw)
    }

    /// Save an answer set, replacing any previous one with the same name.
    ///
    /// Writes to a uniquely named temp file and renames it into place, so
    /// readers never see a half-written file and concurrent saves never share
    /// a temp path.
    pub fn write_answers(&self, name: &str, answers: &Answers) -> Result<(), CoreError> {
        validate_name(name)?;
        self.ensure_root()?;
        let json = serde_json::to_string_pretty(answers)?;
        let path = self.answers_path(name);
        let mut tmp = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(&self.root)
            .map_err(io_err(&self.root))?;
        tmp.write_all(json.as_bytes()).map_err(io_err(tmp.path()))?;
        tmp.persist(&path).map_err(|e| CoreError::Io {
            path: path.clone(),
            source: e.error,
        })?;
        tracing::debug!(name, path = %path.display(), "saved answers");
        Ok(())
    }

    /// Delete a saved answer set. Deleting a missing one is not an error.
    pub fn delete_answers(&self, name: &str) -> Result<(), CoreError> {
        validate_name(name)?;
        let path = self.answers_path(name);
        if path.exists() {
            fs::remove_file(&path).map_err(io_err(&path))
        } else {
            Ok(())
        }
    }

    /// Read advisor settings. A missing or unreadable file yields defaults.
    pub fn read_settings(&self) -> AdvisorSettings {
        let path = self.settings_path();
        if !path.exists() {
            return AdvisorSettings::default();
        }
        match fs::read_to_string(&path)
            .map_err(io_err(&path))
            .and_then(|s| serde_json::from_str(&s).map_err(CoreError::from))
        {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable settings file");
                AdvisorSettings::default()
            }
        }
    }

    pub fn write_settings(&self, settings: &AdvisorSettings) -> Result<(), CoreError> {
        self.ensure_root()?;
        let json = serde_json::to_string_pretty(settings)?;
        let path = self.settings_path();
        fs::write(&path, json).map_err(io_err(&path))
    }
}

// --- Advisor settings ---

/// Which LLM backs the action-plan advisor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvisorSettings {
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            provider: "google".to_string(),
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
        }
    }
}

impl AdvisorSettings {
    /// Apply `INVESTAL_PROVIDER`, `INVESTAL_MODEL` and `INVESTAL_API_KEY`
    /// (falling back to `API_KEY`) on top of the stored values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(provider) = non_empty("INVESTAL_PROVIDER") {
            self.provider = provider;
        }
        if let Some(model) = non_empty("INVESTAL_MODEL") {
            self.model = model;
        }
        if let Some(key) = non_empty("INVESTAL_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.api_key = key;
        }
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.provider.is_empty()
            && !self.model.is_empty()
            && (self.provider == "ollama" || !self.api_key.is_empty())
    }
}
