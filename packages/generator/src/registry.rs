//! Registry of customizers, keyed by name.
//!
//! Registration happens while the process starts up. The first lookup seals
//! the registry; registering afterwards is an error rather than a race with
//! in-flight generations.

use crate::customizer::Customizer;
use crate::error::RegistryError;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Default)]
pub struct CustomizerRegistry {
    customizers: RwLock<BTreeMap<String, Arc<dyn Customizer>>>,
    sealed: AtomicBool,
}

impl CustomizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a customizer available under `name`.
    pub fn register(
        &self,
        name: &str,
        customizer: Arc<dyn Customizer>,
    ) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut customizers = self.customizers.write();

        // Checked under the write lock so a concurrent first lookup cannot
        // slip in between.
        if self.sealed.load(Ordering::Acquire) {
            return Err(RegistryError::Sealed {
                name: name.to_string(),
            });
        }
        if customizers.contains_key(name) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
            });
        }

        debug!(customizer = name, "Registering customizer");
        customizers.insert(name.to_string(), customizer);
        Ok(())
    }

    /// Looks up a customizer by name, sealing the registry.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Customizer>, RegistryError> {
        let customizers = self.customizers.read();
        self.sealed.store(true, Ordering::Release);

        customizers
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownCustomizer {
                name: name.to_string(),
            })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.customizers.read().keys().cloned().collect()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }
}
