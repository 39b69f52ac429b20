//! Runtime settings
//!
//! Every accessor re-reads its sources so edits to the `.env` file take effect
//! without a restart. Lookup order per key: `.env` file, process environment,
//! secrets captured at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use yesand::ImageModel;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const OPENAI_TEXT_MODEL: &str = "OPENAI_TEXT_MODEL";
pub const OPENAI_SYNTHESIS_MODEL: &str = "OPENAI_SYNTHESIS_MODEL";
pub const OPENAI_IMAGE_MODEL: &str = "OPENAI_IMAGE_MODEL";
pub const OPENAI_IMAGE_SIZE: &str = "OPENAI_IMAGE_SIZE";
pub const OPENAI_IMAGE_QUALITY: &str = "OPENAI_IMAGE_QUALITY";
pub const PERSONAS_DIR: &str = "PERSONAS_DIR";
pub const ENV_FILE: &str = "YESAND_ENV_FILE";

/// Keys copied out of the deployment secret store at startup
pub const SECRET_KEYS: [&str; 8] = [
    OPENAI_API_KEY,
    OPENAI_BASE_URL,
    OPENAI_TEXT_MODEL,
    OPENAI_SYNTHESIS_MODEL,
    OPENAI_IMAGE_MODEL,
    OPENAI_IMAGE_SIZE,
    OPENAI_IMAGE_QUALITY,
    PERSONAS_DIR,
];

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TURN_MODEL: &str = "gpt-4o";
pub const DEFAULT_STREAM_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_SYNTHESIS_MODEL: &str = "gpt-4o";
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
pub const DEFAULT_IMAGE_QUALITY: &str = "standard";
const DEFAULT_ENV_FILE: &str = ".env";

/// Hot-reloadable settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    env_file: Option<PathBuf>,
    read_process_env: bool,
    secrets: HashMap<String, String>,
}

impl Settings {
    /// Settings backed by `.env` (or `YESAND_ENV_FILE`), the process
    /// environment and the given startup secrets
    pub fn new(secrets: HashMap<String, String>) -> Self {
        let env_file = std::env::var(ENV_FILE)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENV_FILE.to_string());

        Self {
            env_file: Some(PathBuf::from(env_file)),
            read_process_env: true,
            secrets,
        }
    }

    /// Fixed settings that ignore the environment
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            env_file: None,
            read_process_env: false,
            secrets: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Current value for `key`; blank values count as unset
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.read_env_file().remove(key) {
            return Some(value);
        }

        if self.read_process_env {
            if let Some(value) = std::env::var(key).ok().filter(|v| !v.trim().is_empty()) {
                return Some(value);
            }
        }

        self.secrets
            .get(key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub fn api_key(&self) -> Option<String> {
        self.get(OPENAI_API_KEY)
    }

    pub fn base_url(&self) -> String {
        self.get_or(OPENAI_BASE_URL, DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Model for improv turns; streaming and batch have different defaults
    pub fn turn_model(&self, streaming: bool) -> String {
        let default = if streaming {
            DEFAULT_STREAM_MODEL
        } else {
            DEFAULT_TURN_MODEL
        };
        self.get_or(OPENAI_TEXT_MODEL, default)
    }

    pub fn synthesis_model(&self) -> String {
        self.get(OPENAI_SYNTHESIS_MODEL)
            .or_else(|| self.get(OPENAI_TEXT_MODEL))
            .unwrap_or_else(|| DEFAULT_SYNTHESIS_MODEL.to_string())
    }

    pub fn image_model(&self) -> ImageModel {
        self.get(OPENAI_IMAGE_MODEL)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn image_size(&self) -> String {
        self.get_or(OPENAI_IMAGE_SIZE, DEFAULT_IMAGE_SIZE)
    }

    pub fn image_quality(&self) -> String {
        self.get_or(OPENAI_IMAGE_QUALITY, DEFAULT_IMAGE_QUALITY)
    }

    pub fn personas_dir(&self) -> Option<PathBuf> {
        self.get(PERSONAS_DIR).map(PathBuf::from)
    }

    fn read_env_file(&self) -> HashMap<String, String> {
        let Some(path) = &self.env_file else {
            return HashMap::new();
        };
        if !path.exists() {
            return HashMap::new();
        }

        match dotenvy::from_path_iter(path) {
            Ok(iter) => iter
                .filter_map(Result::ok)
                .filter(|(_, v)| !v.trim().is_empty())
                .collect(),
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                HashMap::new()
            }
        }
    }
}
