//! Player settings and profile
//!
//! Persisted in the preference store alongside the wallet, one key per
//! field so older saves keep loading as fields are added.

use serde::{Deserialize, Serialize};

use crate::persistence::{PreferenceStore, keys};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Music and sound effects enabled
    pub sound_on: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { sound_on: true }
    }
}

impl Settings {
    /// Load settings, falling back to defaults for missing keys
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();
        let sound_on = if store.contains(keys::SOUND_ON) {
            store.get_bool(keys::SOUND_ON)
        } else {
            defaults.sound_on
        };
        Self { sound_on }
    }

    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &mut S) {
        store.set_bool(keys::SOUND_ON, self.sound_on);
        log::info!("Settings saved");
    }
}

/// Name and avatar shown on the scoreboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    /// Avatar asset name, e.g. "Avatar1"
    pub avatar: String,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
            avatar: "Avatar1".to_string(),
        }
    }
}

impl PlayerProfile {
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();
        let name = store
            .get_string(keys::PLAYER_NAME)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or(defaults.name);
        let avatar = store
            .get_string(keys::SELECTED_AVATAR)
            .filter(|a| !a.is_empty())
            .unwrap_or(defaults.avatar);
        Self { name, avatar }
    }

    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &mut S) {
        store.set_string(keys::PLAYER_NAME, &self.name);
        store.set_string(keys::SELECTED_AVATAR, &self.avatar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_sound_defaults_on() {
        let store = MemoryStore::new();
        assert!(Settings::load(&store).sound_on);
    }

    #[test]
    fn test_settings_round_trip() {
        let mut store = MemoryStore::new();
        Settings { sound_on: false }.save(&mut store);
        assert!(!Settings::load(&store).sound_on);
    }

    #[test]
    fn test_profile_defaults() {
        let store = MemoryStore::new();
        assert_eq!(PlayerProfile::load(&store), PlayerProfile::default());
    }

    #[test]
    fn test_profile_round_trip() {
        let mut store = MemoryStore::new();
        let profile = PlayerProfile {
            name: "Kira".to_string(),
            avatar: "Avatar4".to_string(),
        };
        profile.save(&mut store);
        assert_eq!(PlayerProfile::load(&store), profile);
    }

    #[test]
    fn test_blank_name_falls_back() {
        let mut store = MemoryStore::new();
        store.set_string(keys::PLAYER_NAME, "   ");
        assert_eq!(PlayerProfile::load(&store).name, "Player");
    }
}
