// seeker_sim/src/simulation/config/catalog.rs

//! The `PrefabCatalog` resource: every target definition found under the
//! catalog directory, keyed by its dotted path.

use bevy::prelude::*;
use figment::{
    providers::{Format, Toml},
    value::Value,
    Figment,
};
use std::{collections::HashMap, path::Path};
use walkdir::WalkDir;

use super::structs::ScenarioConfig;

/// Raw prefab data. The key mirrors the path below the catalog root, so
/// `targets/red_cube.toml` becomes `targets.red_cube`.
#[derive(Resource, Default, Debug)]
pub struct PrefabCatalog(pub HashMap<String, Value>);

impl PrefabCatalog {
    /// Parses every `.toml` file below `root`. Files that fail to parse are
    /// logged and skipped.
    pub fn load(root: &Path) -> Self {
        let mut catalog = Self::default();
        if !root.exists() {
            warn!("[CATALOG] Directory {:?} not found, no prefabs loaded.", root);
            return catalog;
        }

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "toml"))
        {
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let key = relative
                .with_extension("")
                .to_string_lossy()
                .replace(std::path::MAIN_SEPARATOR, ".");

            match Figment::new().merge(Toml::file(path)).extract::<Value>() {
                Ok(data) => {
                    debug!("[CATALOG] Loaded '{}'", key);
                    catalog.0.insert(key, data);
                }
                Err(e) => error!("[CATALOG] Failed to load {:?}: {}", path, e),
            }
        }
        catalog
    }
}

/// Startup system: fills the catalog from the scenario's catalog directory.
pub fn load_catalog_from_disk(mut catalog: ResMut<PrefabCatalog>, config: Res<ScenarioConfig>) {
    let root = &config.simulation.catalog_dir;
    info!("[CATALOG] Loading prefabs from {:?}", root);
    *catalog = PrefabCatalog::load(root);
    info!("[CATALOG] {} prefab(s) available", catalog.0.len());
}
