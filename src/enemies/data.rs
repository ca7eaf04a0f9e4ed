//! Darkling archetype loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::components::DarklingStats;

/// Errors that can occur when loading an archetype file.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Darkling archetype loaded from a RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct DarklingDefinition {
    pub name: String,
    pub max_hp: u32,
    pub damage: u32,
    pub move_speed: f32,
    pub chase_distance: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    #[serde(default)]
    pub elite: bool,
}

impl DarklingDefinition {
    /// Convert to the stats component attached at spawn.
    pub fn to_stats(&self) -> DarklingStats {
        DarklingStats {
            max_hp: self.max_hp,
            damage: self.damage,
            move_speed: self.move_speed,
            chase_distance: self.chase_distance,
            attack_range: self.attack_range,
            attack_cooldown: self.attack_cooldown,
        }
    }
}

/// Resource holding all loaded darkling archetypes.
#[derive(Resource, Default)]
pub struct DarklingRegistry {
    pub definitions: HashMap<String, DarklingDefinition>,
}

impl DarklingRegistry {
    pub fn get(&self, archetype: &str) -> Option<&DarklingDefinition> {
        self.definitions.get(archetype)
    }
}

/// Read and parse one archetype file.
fn load_definition(path: &Path) -> Result<DarklingDefinition, DataLoadError> {
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Load all darkling archetypes from assets/data/darklings/.
///
/// A missing directory or a broken file is not fatal: spawns fall back
/// to the built-in default stats.
pub fn load_darkling_definitions(mut registry: ResMut<DarklingRegistry>) {
    let dir = Path::new("assets/data/darklings");

    if !dir.exists() {
        warn!("darkling archetype directory not found: {:?}, using defaults", dir);
        return;
    }

    let Ok(entries) = fs::read_dir(dir) else {
        warn!("failed to read darkling archetype directory, using defaults");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }
        let archetype = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_definition(&path) {
            Ok(definition) => {
                info!("loaded darkling archetype: {} ({})", definition.name, archetype);
                registry.definitions.insert(archetype, definition);
            }
            Err(e) => {
                warn!("skipping darkling archetype: {}", e);
            }
        }
    }

    info!("loaded {} darkling archetypes", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_parses_from_ron() {
        let definition: DarklingDefinition = ron::from_str(
            r#"(
                name: "Darkling",
                max_hp: 200,
                damage: 10,
                move_speed: 100.0,
                chase_distance: 60.0,
                attack_range: 60.0,
                attack_cooldown: 1.5,
            )"#,
        )
        .expect("valid archetype");
        assert_eq!(definition.max_hp, 200);
        assert!(!definition.elite);
        assert_eq!(definition.to_stats().damage, 10);
    }

    #[test]
    fn broken_file_reports_parse_error() {
        let dir = std::env::temp_dir().join(format!("nocturne-data-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.ron");
        fs::write(&path, "(name: ").unwrap();

        let err = load_definition(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { .. }));
        let _ = fs::remove_dir_all(&dir);
    }
}
