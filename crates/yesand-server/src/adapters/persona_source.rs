//! Persona definition sources
//!
//! - `DirPersonaSource`: one YAML file per persona in a directory
//! - `EmbeddedPersonaSource`: the personas bundled with the binary

use std::fs;
use std::path::{Path, PathBuf};

use yesand::{DomainError, PersonaDefinition, PersonaSource};

/// Personas bundled with the server, keyed by file name
const EMBEDDED: [(&str, &str); 3] = [
    ("brutalist.yaml", include_str!("../../personas/brutalist.yaml")),
    ("magical_realist.yaml", include_str!("../../personas/magical_realist.yaml")),
    ("romantic.yaml", include_str!("../../personas/romantic.yaml")),
];

/// Reads `*.yaml` / `*.yml` files from a directory
pub struct DirPersonaSource {
    dir: PathBuf,
}

impl DirPersonaSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl PersonaSource for DirPersonaSource {
    fn definitions(&self) -> Result<Vec<PersonaDefinition>, DomainError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            DomainError::Configuration(format!("Cannot read personas dir {:?}: {}", self.dir, e))
        })?;

        let mut definitions = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| DomainError::Configuration(e.to_string()))?
                .path();

            let is_yaml = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if !is_yaml || !path.is_file() {
                continue;
            }

            let text = fs::read_to_string(&path).map_err(|e| {
                DomainError::Configuration(format!("Cannot read {:?}: {}", path, e))
            })?;
            let source_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            definitions.push(PersonaDefinition::new(source_name, text));
        }

        Ok(definitions)
    }

    fn describe(&self) -> String {
        format!("{}", self.dir.display())
    }
}

/// Personas compiled into the binary
#[derive(Default)]
pub struct EmbeddedPersonaSource;

impl PersonaSource for EmbeddedPersonaSource {
    fn definitions(&self) -> Result<Vec<PersonaDefinition>, DomainError> {
        Ok(EMBEDDED
            .iter()
            .map(|(name, text)| PersonaDefinition::new(*name, *text))
            .collect())
    }

    fn describe(&self) -> String {
        "embedded".to_string()
    }
}
