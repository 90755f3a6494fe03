//! Block registry.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::info;

use super::types::{BlockError, BlockTypeDefinition};

#[allow(clippy::expect_used)]
static BLOCK_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+/[a-z0-9-]+$").expect("valid regex"));

/// Registered block types, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    blocks: BTreeMap<String, Arc<BlockTypeDefinition>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block type.
    ///
    /// Fails when the name is not `namespace/slug` or is already taken.
    pub fn register(&mut self, definition: BlockTypeDefinition) -> Result<(), BlockError> {
        if !BLOCK_NAME_RE.is_match(&definition.name) {
            return Err(BlockError::InvalidName(definition.name));
        }
        if self.blocks.contains_key(&definition.name) {
            return Err(BlockError::AlreadyRegistered(definition.name));
        }

        info!(block = %definition.name, version = %definition.version, "registered block type");
        self.blocks
            .insert(definition.name.clone(), Arc::new(definition));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<BlockTypeDefinition>> {
        self.blocks.get(name).cloned()
    }

    /// All registered block types, sorted by name.
    pub fn list(&self) -> Vec<Arc<BlockTypeDefinition>> {
        self.blocks.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::block::dynamic_content;

    fn named(name: &str) -> BlockTypeDefinition {
        let mut definition = dynamic_content::definition(crate::render::DEFAULT_NO_RESULTS_TEXT);
        definition.name = name.to_string();
        definition
    }

    #[test]
    fn register_and_get() {
        let mut registry = BlockRegistry::new();
        assert!(registry.register(named("dcsb/dynamic-content")).is_ok());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("dcsb/dynamic-content").is_some());
        assert!(registry.get("dcsb/other").is_none());
    }

    #[test]
    fn rejects_invalid_names() {
        let mut registry = BlockRegistry::new();
        for name in ["dynamic-content", "DCSB/Block", "a/b/c", "/slug", "ns/", "ns/sl ug"] {
            assert_eq!(
                registry.register(named(name)),
                Err(BlockError::InvalidName(name.to_string()))
            );
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn rejects_duplicates() {
        let mut registry = BlockRegistry::new();
        registry.register(named("dcsb/dynamic-content")).unwrap();
        assert_eq!(
            registry.register(named("dcsb/dynamic-content")),
            Err(BlockError::AlreadyRegistered("dcsb/dynamic-content".into()))
        );
    }

    #[test]
    fn list_is_sorted() {
        let mut registry = BlockRegistry::new();
        registry.register(named("zeta/block")).unwrap();
        registry.register(named("alpha/block")).unwrap();
        let names: Vec<String> = registry.list().iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["alpha/block", "zeta/block"]);
    }
}
