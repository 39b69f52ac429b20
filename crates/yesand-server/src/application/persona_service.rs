//! Persona Application Service
//!
//! Loads persona definitions once, validates all of them, and serves
//! lookups from the cached catalog.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use yesand::{DomainError, Persona, PersonaDefinition, PersonaSource};

/// Validated personas in load order, indexed by id
#[derive(Debug, Default)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
    index: HashMap<String, usize>,
}

impl PersonaCatalog {
    /// Parse every definition, ordered by source name.
    ///
    /// Any invalid definition fails the whole load. A later definition with a
    /// repeated id replaces the earlier one.
    pub fn from_definitions(mut definitions: Vec<PersonaDefinition>) -> Result<Self, DomainError> {
        definitions.sort_by(|a, b| a.source_name.cmp(&b.source_name));

        let mut catalog = Self::default();
        for definition in &definitions {
            let persona = Persona::from_yaml(&definition.source_name, &definition.text)?;
            match catalog.index.get(&persona.id) {
                Some(&pos) => {
                    tracing::warn!(
                        "Persona id '{}' redefined by {}",
                        persona.id,
                        definition.source_name
                    );
                    catalog.personas[pos] = persona;
                }
                None => {
                    catalog.index.insert(persona.id.clone(), catalog.personas.len());
                    catalog.personas.push(persona);
                }
            }
        }

        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Persona> {
        self.index.get(id).map(|&pos| &self.personas[pos])
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

/// Lazily loaded, process-wide persona registry
pub struct PersonaStore {
    source: Arc<dyn PersonaSource>,
    cache: RwLock<Option<Arc<PersonaCatalog>>>,
}

impl PersonaStore {
    pub fn new(source: Arc<dyn PersonaSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
        }
    }

    /// Load the catalog on first use; later calls return the cached one
    pub fn load(&self) -> Result<Arc<PersonaCatalog>, DomainError> {
        if let Some(catalog) = self.cache.read().clone() {
            return Ok(catalog);
        }

        let catalog = Arc::new(PersonaCatalog::from_definitions(
            self.source.definitions()?,
        )?);

        let mut slot = self.cache.write();
        let catalog = Arc::clone(slot.get_or_insert(catalog));

        tracing::info!(
            "Loaded {} personas from {}",
            catalog.len(),
            self.source.describe()
        );

        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Result<Option<Persona>, DomainError> {
        Ok(self.load()?.get(id).cloned())
    }

    /// All personas in load order
    pub fn list(&self) -> Result<Vec<Persona>, DomainError> {
        Ok(self.load()?.personas().to_vec())
    }

    /// Drop the cache so the next access reloads from the source
    pub fn reset(&self) {
        *self.cache.write() = None;
    }
}
