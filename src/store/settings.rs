use serde::{Deserialize, Serialize};

use super::{KeyValueStore, load_json, save_json};

use crate::error::Result;

pub const SETTINGS_KEY: &str = "lbs_settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    pub font_size: u32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self { font_size: 14 }
    }
}

/// Stored user preferences. Fields missing from stored data take their
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserSettings {
    pub theme: String,
    pub language: String,
    pub layout: String,
    pub sidebar_collapsed: bool,
    pub editor: EditorSettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: "light".into(),
            language: "zh-CN".into(),
            layout: "default".into(),
            sidebar_collapsed: false,
            editor: EditorSettings::default(),
        }
    }
}

#[derive(Debug)]
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored settings over the defaults.
    pub fn get(&self) -> Result<UserSettings> {
        Ok(load_json(&self.store, SETTINGS_KEY)?.unwrap_or_default())
    }

    /// Applies `patch` to the current settings and stores the result.
    pub fn save<F>(&mut self, patch: F) -> Result<UserSettings>
    where
        F: FnOnce(&mut UserSettings),
    {
        let mut settings = self.get()?;
        patch(&mut settings);
        save_json(&mut self.store, SETTINGS_KEY, &settings)?;
        Ok(settings)
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.store.remove(SETTINGS_KEY)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    use crate::store::MemoryStore;

    #[test]
    fn test_defaults_when_nothing_stored() {
        let settings = SettingsStore::new(MemoryStore::new());
        let got = settings.get().unwrap();
        assert_eq!(UserSettings::default(), got);
        assert_eq!(14, got.editor.font_size);
        assert_eq!("zh-CN", got.language);
    }

    #[test]
    fn test_partial_data_merges_over_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(SETTINGS_KEY, r#"{"theme":"dark","editor":{}}"#.into())
            .unwrap();
        let got = SettingsStore::new(store).get().unwrap();
        assert_eq!("dark", got.theme);
        assert_eq!("default", got.layout);
        assert_eq!(14, got.editor.font_size);
    }

    #[test]
    fn test_save_and_clear() {
        let mut settings = SettingsStore::new(MemoryStore::new());
        let saved = settings
            .save(|s| {
                s.sidebar_collapsed = true;
                s.editor.font_size = 16;
            })
            .unwrap();
        assert!(saved.sidebar_collapsed);
        assert_eq!(saved, settings.get().unwrap());

        settings.clear_all().unwrap();
        assert_eq!(UserSettings::default(), settings.get().unwrap());
    }

    #[test]
    fn test_corrupt_settings_are_an_error() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, "nope".into()).unwrap();
        assert!(SettingsStore::new(store).get().is_err());
    }
}
