// seeker_sim/src/simulation/config/resolver.rs

use super::catalog::PrefabCatalog;
use super::structs::{TargetConfig, TargetPrefab, TargetSpec};
use super::ConfigError;

/// Combines a scenario target entry with its catalog prefab. Fields given
/// in the scenario win over the prefab's.
pub fn resolve_target(spec: &TargetSpec, catalog: &PrefabCatalog) -> Result<TargetConfig, ConfigError> {
    let prefab = match &spec.from {
        Some(key) => {
            let value = catalog
                .0
                .get(key)
                .ok_or_else(|| ConfigError::UnknownPrefab(key.clone()))?;
            let prefab: TargetPrefab = value.deserialize().map_err(|source| ConfigError::InvalidPrefab {
                key: key.clone(),
                source: Box::new(source),
            })?;
            Some(prefab)
        }
        None => None,
    };

    let name = spec
        .name
        .clone()
        .or_else(|| prefab.as_ref().map(|p| p.name.clone()))
        .ok_or(ConfigError::UnnamedTarget(spec.position))?;
    let radius = spec
        .radius
        .or_else(|| prefab.as_ref().map(|p| p.radius))
        .unwrap_or(0.5);
    if radius <= 0.0 {
        return Err(ConfigError::Invalid(format!("target '{name}' has non-positive radius {radius}")));
    }

    Ok(TargetConfig {
        name,
        radius,
        position: spec.position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::{
        providers::{Format, Toml},
        value::Value,
        Figment,
    };

    fn catalog() -> PrefabCatalog {
        let cube: Value = Figment::new()
            .merge(Toml::string("name = \"Red Cube\"\nradius = 0.4"))
            .extract()
            .unwrap();
        let broken: Value = Figment::new()
            .merge(Toml::string("colour = \"red\""))
            .extract()
            .unwrap();
        PrefabCatalog(
            [
                ("targets.red_cube".to_string(), cube),
                ("targets.broken".to_string(), broken),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn spec(from: Option<&str>) -> TargetSpec {
        TargetSpec {
            from: from.map(str::to_string),
            name: None,
            radius: None,
            position: [3.0, 4.0],
        }
    }

    #[test]
    fn prefab_fields_fill_the_gaps() {
        let target = resolve_target(&spec(Some("targets.red_cube")), &catalog()).unwrap();
        assert_eq!(target.name, "Red Cube");
        assert_eq!(target.radius, 0.4);
        assert_eq!(target.position, [3.0, 4.0]);
    }

    #[test]
    fn scenario_fields_override_the_prefab() {
        let mut s = spec(Some("targets.red_cube"));
        s.radius = Some(0.7);
        s.name = Some("Big Red Cube".into());
        let target = resolve_target(&s, &catalog()).unwrap();
        assert_eq!(target.name, "Big Red Cube");
        assert_eq!(target.radius, 0.7);
    }

    #[test]
    fn bad_references_are_errors() {
        assert!(matches!(
            resolve_target(&spec(Some("targets.unicorn")), &catalog()),
            Err(ConfigError::UnknownPrefab(_))
        ));
        assert!(matches!(
            resolve_target(&spec(Some("targets.broken")), &catalog()),
            Err(ConfigError::InvalidPrefab { .. })
        ));
        assert!(matches!(
            resolve_target(&spec(None), &catalog()),
            Err(ConfigError::UnnamedTarget(_))
        ));
    }
}
