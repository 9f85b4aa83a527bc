//! Generator configuration and its validation.
//!
//! ```
//! use floorplan_logic::config::GeneratorConfig;
//!
//! let config = GeneratorConfig {
//!     min_rooms: 4,
//!     max_rooms: 4,
//!     ..GeneratorConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Constructor-time parameters, immutable for the generator's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Side length of the square bounding region.
    pub floor_plan_size: f64,
    /// Inclusive bounds for the number of rooms drawn per attempt.
    pub min_rooms: u32,
    pub max_rooms: u32,
    /// Width of a doorway gap. Walls must be strictly longer to carry one.
    pub door_size: f64,
    /// Upper bound for the per-room random weight (lower bound is 1).
    pub room_size_ratio: f64,
    /// Maximum partition attempts before giving up on connectivity.
    pub max_iteration: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            floor_plan_size: 10.0,
            min_rooms: 3,
            max_rooms: 5,
            door_size: 1.5,
            room_size_ratio: 4.0,
            max_iteration: 5,
        }
    }
}

/// A violated configuration constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("floor_plan_size must be a positive finite number, got {0}")]
    FloorPlanSize(f64),
    #[error("min_rooms must be at least 1")]
    NoRooms,
    #[error("min_rooms ({min}) exceeds max_rooms ({max})")]
    RoomRange { min: u32, max: u32 },
    #[error("door_size must be a positive finite number, got {0}")]
    DoorSize(f64),
    #[error("room_size_ratio must be finite and greater than 1, got {0}")]
    RoomSizeRatio(f64),
    #[error("max_iteration must be at least 1")]
    NoIterations,
}

impl GeneratorConfig {
    /// Check every constraint, reporting the first one violated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.floor_plan_size.is_finite() && self.floor_plan_size > 0.0) {
            return Err(ConfigError::FloorPlanSize(self.floor_plan_size));
        }
        if self.min_rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.min_rooms > self.max_rooms {
            return Err(ConfigError::RoomRange {
                min: self.min_rooms,
                max: self.max_rooms,
            });
        }
        if !(self.door_size.is_finite() && self.door_size > 0.0) {
            return Err(ConfigError::DoorSize(self.door_size));
        }
        if !(self.room_size_ratio.is_finite() && self.room_size_ratio > 1.0) {
            return Err(ConfigError::RoomSizeRatio(self.room_size_ratio));
        }
        if self.max_iteration == 0 {
            return Err(ConfigError::NoIterations);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GeneratorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let config = GeneratorConfig {
            floor_plan_size: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::FloorPlanSize(0.0)));

        let config = GeneratorConfig {
            floor_plan_size: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::FloorPlanSize(_))));
    }

    #[test]
    fn test_rejects_inverted_room_range() {
        let config = GeneratorConfig {
            min_rooms: 6,
            max_rooms: 4,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RoomRange { min: 6, max: 4 })
        );
    }

    #[test]
    fn test_rejects_zero_rooms() {
        let config = GeneratorConfig {
            min_rooms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoRooms));
    }

    #[test]
    fn test_rejects_bad_door_and_ratio() {
        let config = GeneratorConfig {
            door_size: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DoorSize(-1.0)));

        let config = GeneratorConfig {
            room_size_ratio: 1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RoomSizeRatio(1.0)));
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = GeneratorConfig {
            max_iteration: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoIterations));
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let msg = ConfigError::RoomRange { min: 6, max: 4 }.to_string();
        assert!(msg.contains("min_rooms"));
        assert!(msg.contains("max_rooms"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"min_rooms": 4, "max_rooms": 4}"#).unwrap();
        assert_eq!(config.min_rooms, 4);
        assert_eq!(config.floor_plan_size, 10.0);
        assert_eq!(config.max_iteration, 5);
    }
}
