//! Validated gameplay configuration.
//!
//! Raw integer values are checked once at the boundary; the validated
//! struct carries `NonZeroU32` fields so the simulation interior can never
//! observe a zero timer duration or speed.

use std::num::NonZeroU32;

use thiserror::Error;

const fn non_zero(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(value) => value,
        None => unreachable!(),
    }
}

const DEFAULT_HIVE_REARM_PERIOD: NonZeroU32 = non_zero(100);
const DEFAULT_HIVE_DETECTION_DISTANCE: NonZeroU32 = non_zero(350);
const DEFAULT_BEE_SPEED: NonZeroU32 = non_zero(2);
const DEFAULT_BEE_LIFESPAN: NonZeroU32 = non_zero(300);
const DEFAULT_PIGEON_SPEED: NonZeroU32 = non_zero(1);
const DEFAULT_PIGEON_LIFESPAN: NonZeroU32 = non_zero(3000);
const DEFAULT_HIVE_SPAWNER_MAX_SPAWNS: u32 = 3;

/// Error raised when a raw configuration value fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A duration, distance, or speed that must be positive was zero.
    #[error("configuration field `{field}` must be non-zero")]
    ZeroValue {
        /// Name of the offending field.
        field: &'static str,
    },
}

fn validated(value: u32, field: &'static str) -> Result<NonZeroU32, ConfigError> {
    NonZeroU32::new(value).ok_or(ConfigError::ZeroValue { field })
}

/// Detection-and-fire parameters of a hive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HiveConfig {
    /// Steps between re-arms of the firing mechanism.
    pub rearm_period: NonZeroU32,
    /// Maximum linear distance at which an enemy can be targeted.
    pub detection_distance: NonZeroU32,
}

impl HiveConfig {
    /// Validates raw hive parameters.
    pub fn new(rearm_period: u32, detection_distance: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            rearm_period: validated(rearm_period, "hive.rearm_period")?,
            detection_distance: validated(detection_distance, "hive.detection_distance")?,
        })
    }
}

impl Default for HiveConfig {
    fn default() -> Self {
        Self {
            rearm_period: DEFAULT_HIVE_REARM_PERIOD,
            detection_distance: DEFAULT_HIVE_DETECTION_DISTANCE,
        }
    }
}

/// Movement and lifespan parameters of a guard bee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeeConfig {
    /// Unit moves available per step.
    pub speed: NonZeroU32,
    /// Steps before the bee expires.
    pub lifespan: NonZeroU32,
}

impl BeeConfig {
    /// Validates raw guard-bee parameters.
    pub fn new(speed: u32, lifespan: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            speed: validated(speed, "bee.speed")?,
            lifespan: validated(lifespan, "bee.lifespan")?,
        })
    }
}

impl Default for BeeConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_BEE_SPEED,
            lifespan: DEFAULT_BEE_LIFESPAN,
        }
    }
}

/// Movement and lifespan parameters of a pigeon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PigeonConfig {
    /// Units moved per step.
    pub speed: NonZeroU32,
    /// Steps before the pigeon expires.
    pub lifespan: NonZeroU32,
}

impl PigeonConfig {
    /// Validates raw pigeon parameters.
    pub fn new(speed: u32, lifespan: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            speed: validated(speed, "pigeon.speed")?,
            lifespan: validated(lifespan, "pigeon.lifespan")?,
        })
    }
}

impl Default for PigeonConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_PIGEON_SPEED,
            lifespan: DEFAULT_PIGEON_LIFESPAN,
        }
    }
}

/// Complete gameplay configuration for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Hive parameters.
    pub hive: HiveConfig,
    /// Guard-bee parameters.
    pub bee: BeeConfig,
    /// Pigeon parameters.
    pub pigeon: PigeonConfig,
    /// Number of hives a hive spawner may construct over its lifetime.
    pub hive_spawner_max_spawns: u32,
}

impl SimulationConfig {
    /// Builds a configuration from raw integer values, rejecting zeroes
    /// where a positive value is required.
    pub fn from_raw(raw: RawSimulationConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            hive: HiveConfig::new(raw.hive_rearm_period, raw.hive_detection_distance)?,
            bee: BeeConfig::new(raw.bee_speed, raw.bee_lifespan)?,
            pigeon: PigeonConfig::new(raw.pigeon_speed, raw.pigeon_lifespan)?,
            hive_spawner_max_spawns: raw.hive_spawner_max_spawns,
        })
    }
}

/// Unvalidated configuration values as supplied by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSimulationConfig {
    /// Steps between hive re-arms.
    pub hive_rearm_period: u32,
    /// Maximum hive targeting distance.
    pub hive_detection_distance: u32,
    /// Guard-bee unit moves per step.
    pub bee_speed: u32,
    /// Guard-bee lifespan in steps.
    pub bee_lifespan: u32,
    /// Pigeon units moved per step.
    pub pigeon_speed: u32,
    /// Pigeon lifespan in steps.
    pub pigeon_lifespan: u32,
    /// Hive-spawner lifetime construction cap.
    pub hive_spawner_max_spawns: u32,
}

impl Default for RawSimulationConfig {
    fn default() -> Self {
        Self {
            hive_rearm_period: DEFAULT_HIVE_REARM_PERIOD.get(),
            hive_detection_distance: DEFAULT_HIVE_DETECTION_DISTANCE.get(),
            bee_speed: DEFAULT_BEE_SPEED.get(),
            bee_lifespan: DEFAULT_BEE_LIFESPAN.get(),
            pigeon_speed: DEFAULT_PIGEON_SPEED.get(),
            pigeon_lifespan: DEFAULT_PIGEON_LIFESPAN.get(),
            hive_spawner_max_spawns: DEFAULT_HIVE_SPAWNER_MAX_SPAWNS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RawSimulationConfig, SimulationConfig};

    #[test]
    fn defaults_carry_the_stock_balance_constants() {
        let config = SimulationConfig::default();
        assert_eq!(config.hive.rearm_period.get(), 100);
        assert_eq!(config.hive.detection_distance.get(), 350);
        assert_eq!(config.bee.speed.get(), 2);
        assert_eq!(config.bee.lifespan.get(), 300);
        assert_eq!(config.pigeon.speed.get(), 1);
        assert_eq!(config.pigeon.lifespan.get(), 3000);
        assert_eq!(config.hive_spawner_max_spawns, 3);
    }

    #[test]
    fn raw_defaults_round_trip_through_validation() {
        let config = SimulationConfig::from_raw(RawSimulationConfig::default())
            .expect("defaults are valid");
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn zero_values_are_rejected_with_the_field_name() {
        let raw = RawSimulationConfig {
            bee_speed: 0,
            ..RawSimulationConfig::default()
        };
        assert_eq!(
            SimulationConfig::from_raw(raw),
            Err(ConfigError::ZeroValue { field: "bee.speed" })
        );
    }

    #[test]
    fn a_zero_spawn_cap_is_allowed() {
        let raw = RawSimulationConfig {
            hive_spawner_max_spawns: 0,
            ..RawSimulationConfig::default()
        };
        assert!(SimulationConfig::from_raw(raw).is_ok());
    }
}
