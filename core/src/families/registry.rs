use super::types::{CatalogError, Family};
use super::{kinematics, slopes, unit_circle};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Lookup of catalogs by name, in registration order
#[derive(Debug, Default)]
pub struct FamilyRegistry {
    families: Vec<Family>,
}

impl FamilyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalogs shipped with the solver
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for family in [kinematics::family(), slopes::family(), unit_circle::family()] {
            if let Err(e) = registry.register(family) {
                warn!("Skipping built-in family: {}", e);
            }
        }
        info!("Registered {} built-in families", registry.families.len());
        registry
    }

    /// Add a family, rejecting duplicate names and malformed relations
    pub fn register(&mut self, family: Family) -> Result<(), CatalogError> {
        if self.get(&family.name).is_some() {
            return Err(CatalogError::DuplicateFamily(family.name));
        }
        family.validate()?;
        self.families.push(family);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Family> {
        self.families.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.families.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Shared registry of built-in catalogs, built on first use
pub fn builtin_registry() -> &'static FamilyRegistry {
    static REGISTRY: OnceLock<FamilyRegistry> = OnceLock::new();
    REGISTRY.get_or_init(FamilyRegistry::builtin)
}
