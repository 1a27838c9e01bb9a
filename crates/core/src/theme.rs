//! Light/dark theme preference

use crate::config::StorageKeys;
use crate::error::CoreResult;
use crate::storage::KeyValueStorage;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Saved preference, if any
    pub fn load(storage: &dyn KeyValueStorage) -> Option<Self> {
        storage
            .get(StorageKeys::THEME)
            .as_deref()
            .and_then(Self::parse)
    }

    pub fn save(self, storage: &dyn KeyValueStorage) -> CoreResult<()> {
        storage.set(StorageKeys::THEME, self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_theme_persists_and_toggles() {
        let storage = MemoryStorage::new();
        assert_eq!(Theme::load(&storage), None);

        Theme::Light.toggle().save(&storage).unwrap();
        assert_eq!(storage.get("theme").as_deref(), Some("dark"));
        assert_eq!(Theme::load(&storage), Some(Theme::Dark));

        storage.set("theme", "sepia").unwrap();
        assert_eq!(Theme::load(&storage), None);
    }
}
