use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Reads a YAML config file. A missing file yields the default value;
/// a present but invalid one is an error, never a silent fallback.
pub fn load_yaml_config<T>(path: &Path) -> Result<T, String>
where
    T: DeserializeOwned + Validate + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;

    let config: T = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))?;

    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;

    Ok(config)
}

pub fn save_yaml_config<T>(path: &Path, config: &T) -> Result<(), String>
where
    T: Serialize + Validate,
{
    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;

    let content = serde_yaml_ng::to_string(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(path, content)
        .map_err(|e| format!("Failed to write config {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EngineSettings;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_missing_file_yields_default() {
        let path = temp_path("engine_config_does_not_exist.yaml");
        let loaded: EngineSettings = load_yaml_config(&path).unwrap();
        assert_eq!(loaded, EngineSettings::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = temp_path("engine_config_round_trip.yaml");
        let settings = EngineSettings {
            field_width: 30,
            powerup_spawn_probability: 0.5,
            ..EngineSettings::default()
        };
        save_yaml_config(&path, &settings).unwrap();
        let loaded: EngineSettings = load_yaml_config(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let path = temp_path("engine_config_invalid.yaml");
        std::fs::write(&path, "field_width: not_a_number\n").unwrap();
        let result: Result<EngineSettings, String> = load_yaml_config(&path);
        assert!(result.is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_rejects_invalid_settings() {
        let path = temp_path("engine_config_reject.yaml");
        let settings = EngineSettings {
            field_width: 2,
            ..EngineSettings::default()
        };
        assert!(save_yaml_config(&path, &settings).is_err());
    }
}
