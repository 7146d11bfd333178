use thiserror::Error;

use crate::cell::CellId;

/// Tuning parameters for one engine session.
///
/// Plain data owned by the caller; two engines built from the same config and
/// the same save slot contents behave identically.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Edge length of one lattice cell, in degrees of latitude/longitude.
    pub tile_size_deg: f64,
    /// Probability in `[0, 1]` that an untouched cell spawns a token.
    pub spawn_rate: f64,
    /// Chebyshev radius of the materialized window around the player.
    pub view_radius: u32,
    /// Chebyshev radius within which cells accept pickup/craft actions.
    pub interact_radius: u32,
    /// Inventory value at which the win notification fires.
    pub win_threshold: u32,
    /// Player location after a fresh start or reset.
    pub start_cell: CellId,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tile_size_deg: 0.0005,
            spawn_rate: 0.1,
            view_radius: 8,
            interact_radius: 2,
            win_threshold: 64,
            start_cell: CellId::new(0, 0),
        }
    }
}

/// Rejection reasons for a malformed [`EngineConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("spawn rate {0} is outside [0, 1]")]
    SpawnRateOutOfRange(f64),
    #[error("tile size {0} must be a positive finite number of degrees")]
    InvalidTileSize(f64),
    #[error("view radius must be at least 1")]
    ZeroViewRadius,
    #[error("interact radius {interact} exceeds view radius {view}")]
    InteractExceedsView { interact: u32, view: u32 },
    #[error("win threshold {0} is below the smallest craftable value (2)")]
    ThresholdTooLow(u32),
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spawn_rate.is_finite() || !(0.0..=1.0).contains(&self.spawn_rate) {
            return Err(ConfigError::SpawnRateOutOfRange(self.spawn_rate));
        }
        if !self.tile_size_deg.is_finite() || self.tile_size_deg <= 0.0 {
            return Err(ConfigError::InvalidTileSize(self.tile_size_deg));
        }
        if self.view_radius == 0 {
            return Err(ConfigError::ZeroViewRadius);
        }
        if self.interact_radius > self.view_radius {
            return Err(ConfigError::InteractExceedsView {
                interact: self.interact_radius,
                view: self.view_radius,
            });
        }
        if self.win_threshold < 2 {
            return Err(ConfigError::ThresholdTooLow(self.win_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut config = EngineConfig {
            spawn_rate: 1.5,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpawnRateOutOfRange(1.5))
        );

        config.spawn_rate = 0.1;
        config.interact_radius = 9;
        config.view_radius = 8;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InteractExceedsView {
                interact: 9,
                view: 8
            })
        );

        config.interact_radius = 2;
        config.win_threshold = 1;
        assert_eq!(config.validate(), Err(ConfigError::ThresholdTooLow(1)));
    }
}
