//! `sortreel.toml` config loading.

use serde::{Deserialize, Serialize};

use std::path::Path;

use crate::{Algorithm, SortError, SortResult, Speed, ValueRange};

pub const MAX_SIZE: usize = 512;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Algorithm selected at startup.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Number of generated values.
    #[serde(default = "default_size")]
    pub size: usize,

    #[serde(default)]
    pub speed: Speed,

    /// Fixed seed for value generation; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_min_value")]
    pub min_value: u32,

    #[serde(default = "default_max_value")]
    pub max_value: u32,

    #[serde(default)]
    pub no_color: bool,
}

fn default_size() -> usize {
    40
}

fn default_min_value() -> u32 {
    ValueRange::default().min
}

fn default_max_value() -> u32 {
    ValueRange::default().max
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            size: default_size(),
            speed: Speed::default(),
            seed: None,
            min_value: default_min_value(),
            max_value: default_max_value(),
            no_color: false,
        }
    }
}

impl Config {
    pub fn load_optional(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => match toml::from_str::<Config>(&s) {
                Ok(cfg) => cfg,
                Err(err) => {
                    tracing::warn!("failed to parse config {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                tracing::warn!("failed to read config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> SortResult<()> {
        if self.size > MAX_SIZE {
            return Err(SortError::Config(format!(
                "size {} exceeds the maximum of {MAX_SIZE}",
                self.size
            )));
        }
        self.value_range()?;
        Ok(())
    }

    pub fn value_range(&self) -> SortResult<ValueRange> {
        ValueRange::new(self.min_value, self.max_value).map_err(|e| SortError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("algorithm = \"merge\"\nspeed = 90\n").expect("toml");
        assert_eq!(cfg.algorithm, Algorithm::Merge);
        assert_eq!(cfg.speed.get(), 90);
        assert_eq!(cfg.size, 40);
        assert_eq!(cfg.min_value, 10);
        assert_eq!(cfg.max_value, 500);
        assert!(cfg.seed.is_none());
        cfg.validate().expect("valid");
    }

    #[test]
    fn out_of_range_speed_fails_to_parse() {
        assert!(toml::from_str::<Config>("speed = 0").is_err());
        assert!(toml::from_str::<Config>("algorithm = \"bogo\"").is_err());
    }

    #[test]
    fn validate_rejects_bad_bounds() {
        let cfg = Config {
            size: MAX_SIZE + 1,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(SortError::Config(_))));

        let cfg = Config {
            min_value: 50,
            max_value: 10,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(SortError::Config(_))));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join(format!("sortreel-missing-{}.toml", uuid::Uuid::new_v4()));
        let cfg = Config::load_optional(&path);
        assert_eq!(cfg.algorithm, Algorithm::Quick);
        assert_eq!(cfg.speed, Speed::default());
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("sortreel-bad-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "size = \"many\"").expect("write");
        let cfg = Config::load_optional(&path);
        assert_eq!(cfg.size, 40);
        let _ = std::fs::remove_file(&path);
    }
}
