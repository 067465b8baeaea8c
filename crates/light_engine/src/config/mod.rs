//! Configuration system
//!
//! Context-level lighting settings, fixed at scene init and never changed per
//! frame. Files are TOML or RON, picked by extension.

pub use serde::{Serialize, Deserialize};

use crate::lighting::MAX_HARDWARE_LIGHTS;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values parsed but out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Fog parameters carried by the light context
///
/// The light core stores these for the renderer; it never reads them itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    /// Fog color (RGB)
    pub color: [u8; 3],
    /// Distance at which fog starts
    pub near: i16,
    /// Far clip distance
    pub far: i16,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            color: [0, 0, 0],
            near: 996,
            far: 12800,
        }
    }
}

/// Screen dimensions used to map projected lights onto depth-buffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { width: 320, height: 240 }
    }
}

/// Scene-level lighting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient color seeded into every light set
    pub ambient_color: [u8; 3],
    /// Hardware light slots per draw call (K)
    pub hardware_slots: usize,
    /// Registry capacity (C)
    pub registry_capacity: usize,
    /// Fog settings
    pub fog: FogConfig,
    /// Screen used by the glow visibility pass
    pub viewport: ViewportConfig,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: [80, 80, 80],
            hardware_slots: MAX_HARDWARE_LIGHTS,
            registry_capacity: 32,
            fog: FogConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

impl LightingConfig {
    /// Check ranges the light core relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hardware_slots == 0 || self.hardware_slots > MAX_HARDWARE_LIGHTS {
            return Err(ConfigError::Invalid(format!(
                "hardware_slots must be in 1..={}, got {}",
                MAX_HARDWARE_LIGHTS, self.hardware_slots
            )));
        }
        if self.registry_capacity == 0 {
            return Err(ConfigError::Invalid("registry_capacity must be at least 1".to_string()));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if self.fog.near > self.fog.far {
            return Err(ConfigError::Invalid(format!(
                "fog near ({}) is beyond far ({})",
                self.fog.near, self.fog.far
            )));
        }
        Ok(())
    }
}

impl Config for LightingConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scene_init() {
        let config = LightingConfig::default();

        assert_eq!(config.ambient_color, [80, 80, 80]);
        assert_eq!(config.fog, FogConfig { color: [0, 0, 0], near: 996, far: 12800 });
        assert_eq!(config.hardware_slots, 7);
        assert_eq!(config.registry_capacity, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: LightingConfig = toml::from_str(
            "ambient_color = [10, 20, 30]\nhardware_slots = 3\n\n[fog]\nnear = 500\n",
        )
        .unwrap();

        assert_eq!(config.ambient_color, [10, 20, 30]);
        assert_eq!(config.hardware_slots, 3);
        assert_eq!(config.fog.near, 500);
        assert_eq!(config.fog.far, 12800);
        assert_eq!(config.registry_capacity, 32);
    }

    #[test]
    fn test_ron_config() {
        let config: LightingConfig =
            ron::from_str("(registry_capacity: 8, viewport: (width: 640, height: 480))").unwrap();

        assert_eq!(config.registry_capacity, 8);
        assert_eq!(config.viewport, ViewportConfig { width: 640, height: 480 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let too_many_slots = LightingConfig { hardware_slots: 8, ..Default::default() };
        assert!(matches!(too_many_slots.validate(), Err(ConfigError::Invalid(_))));

        let no_registry = LightingConfig { registry_capacity: 0, ..Default::default() };
        assert!(matches!(no_registry.validate(), Err(ConfigError::Invalid(_))));

        let inverted_fog = LightingConfig {
            fog: FogConfig { near: 2000, far: 1000, ..Default::default() },
            ..Default::default()
        };
        assert!(matches!(inverted_fog.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_file_roundtrip_and_unknown_extension() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("light_engine_config_{}.toml", std::process::id()));
        let path = path.to_str().unwrap().to_string();

        let config = LightingConfig { ambient_color: [1, 2, 3], ..Default::default() };
        config.save_to_file(&path).unwrap();
        let loaded = LightingConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
        assert!(matches!(
            LightingConfig::default().save_to_file("lights.json"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
