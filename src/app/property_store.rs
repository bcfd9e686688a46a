//! Persistence of the list properties and the list configuration.
//!
//! Both live in eframe storage as JSON strings. A missing or unreadable entry
//! yields the defaults; fields absent from stored JSON keep their default values.

use catlist::{ListConfig, ListProperties};
use serde::de::DeserializeOwned;
use serde::Serialize;

const PROPERTIES_KEY: &str = "list_properties";
const CONFIG_KEY: &str = "list_config";

/// Typed access to the persisted list settings.
pub struct PropertyStore;

impl PropertyStore {
    /// Restores the properties saved by the previous session.
    pub fn load_properties(storage: Option<&dyn eframe::Storage>) -> ListProperties {
        read_json(storage, PROPERTIES_KEY).unwrap_or_default()
    }

    pub fn load_config(storage: Option<&dyn eframe::Storage>) -> ListConfig {
        read_json(storage, CONFIG_KEY).unwrap_or_default()
    }

    /// Writes both entries and flushes the storage once.
    pub fn save(storage: &mut dyn eframe::Storage, properties: &ListProperties, config: &ListConfig) {
        write_json(storage, PROPERTIES_KEY, properties);
        write_json(storage, CONFIG_KEY, config);
        storage.flush();
    }
}

fn read_json<T: DeserializeOwned>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T> {
    let json = storage?.get_string(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("ignoring stored {}: {}", key, e);
            None
        }
    }
}

fn write_json<T: Serialize>(storage: &mut dyn eframe::Storage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => storage.set_string(key, json),
        Err(e) => tracing::error!("failed to store {}: {}", key, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        entries: HashMap<String, String>,
        flushes: usize,
    }

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.entries.insert(key.to_string(), value);
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    #[test]
    fn test_properties_and_config_survive_a_session() {
        let mut storage = MemoryStorage::default();
        let properties = ListProperties {
            search_expression: "\"red wine\" dry*".to_string(),
            show_search_field: false,
            reverse_order: true,
        };
        let config = ListConfig { row_limit: 500, ..ListConfig::default() };

        PropertyStore::save(&mut storage, &properties, &config);
        assert_eq!(storage.flushes, 1);

        assert_eq!(PropertyStore::load_properties(Some(&storage)), properties);
        assert_eq!(PropertyStore::load_config(Some(&storage)).row_limit, 500);
    }

    #[test]
    fn test_without_storage_defaults_apply() {
        assert_eq!(PropertyStore::load_properties(None), ListProperties::default());
        assert_eq!(PropertyStore::load_config(None).line_height, ListConfig::default().line_height);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut storage = MemoryStorage::default();
        storage.entries.insert(CONFIG_KEY.to_string(), r#"{"row_limit": 50}"#.to_string());

        let config = PropertyStore::load_config(Some(&storage));
        assert_eq!(config.row_limit, 50);
        assert_eq!(config.line_height, ListConfig::default().line_height);
    }

    #[test]
    fn test_corrupt_entry_falls_back() {
        let mut storage = MemoryStorage::default();
        storage.entries.insert(PROPERTIES_KEY.to_string(), "{ broken".to_string());

        let loaded = PropertyStore::load_properties(Some(&storage));
        assert!(loaded.show_search_field);
        assert!(loaded.search_expression.is_empty());
    }
}
