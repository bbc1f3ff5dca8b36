//! Game balance knobs
//!
//! Everything that shapes a round (speeds, starting inventory, scoring, route
//! layout) lives here so a host can override it from JSON. Defaults reproduce
//! the stock game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning value `{field}` out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants, overridable per round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    /// Player movement per tick while a direction is held
    pub player_speed: f32,
    /// World scroll per tick
    pub world_speed: f32,

    // === Packages ===
    /// Horizontal package speed (signed by facing at throw time)
    pub package_speed: f32,
    /// Initial vertical package velocity (negative is up)
    pub package_lift: f32,
    /// Added to vertical package velocity every tick
    pub package_gravity: f32,

    // === Round ===
    pub starting_lives: u8,
    pub starting_packages: u32,
    /// Ticks of protection after losing a life (2 seconds at 60 Hz)
    pub invulnerability_ticks: u32,
    /// Points for landing a package in a mailbox
    pub delivery_points: u64,
    /// End-of-route bonus per delivered house
    pub delivery_bonus: u64,

    // === Route layout ===
    pub house_count: u32,
    pub first_house_x: f32,
    pub house_spacing: f32,
    /// Probability that a house wants a paper
    pub delivery_chance: f64,
    /// Mailbox x relative to its house
    pub mailbox_offset: f32,
    pub obstacle_count: u32,
    pub first_obstacle_x: f32,
    pub obstacle_spacing: f32,
    /// Obstacles get uniform [0, jitter) extra x
    pub obstacle_jitter: f32,
    /// Probability that an obstacle is a car rather than a dog
    pub car_chance: f64,
    /// Finish line distance past the last house
    pub finish_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 4.0,
            world_speed: 2.0,

            package_speed: 8.0,
            package_lift: -2.0,
            package_gravity: 0.3,

            starting_lives: 3,
            starting_packages: 10,
            invulnerability_ticks: 120,
            delivery_points: 100,
            delivery_bonus: 50,

            house_count: 20,
            first_house_x: 200.0,
            house_spacing: 150.0,
            delivery_chance: 0.7,
            mailbox_offset: 70.0,
            obstacle_count: 15,
            first_obstacle_x: 300.0,
            obstacle_spacing: 200.0,
            obstacle_jitter: 100.0,
            car_chance: 0.5,
            finish_margin: 150.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse a tuning document, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation can't make sense of
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::OutOfRange { field, reason })
            }
        }

        check(self.player_speed >= 0.0, "player_speed", "must not be negative")?;
        // A negative scroll would break offset monotonicity
        check(self.world_speed >= 0.0, "world_speed", "must not be negative")?;
        check(self.package_speed > 0.0, "package_speed", "must be positive")?;
        check(self.starting_lives > 0, "starting_lives", "must be at least 1")?;
        check(
            (0.0..=1.0).contains(&self.delivery_chance),
            "delivery_chance",
            "must be within 0..=1",
        )?;
        check(
            (0.0..=1.0).contains(&self.car_chance),
            "car_chance",
            "must be within 0..=1",
        )?;
        check(self.house_spacing >= 0.0, "house_spacing", "must not be negative")?;
        check(self.obstacle_jitter >= 0.0, "obstacle_jitter", "must not be negative")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_game() {
        let t = Tuning::default();
        assert_eq!(t.world_speed, 2.0);
        assert_eq!(t.package_speed, 8.0);
        assert_eq!(t.starting_lives, 3);
        assert_eq!(t.starting_packages, 10);
        assert_eq!(t.invulnerability_ticks, 120);
        assert_eq!(t.house_count, 20);
        assert_eq!(t.obstacle_count, 15);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "starting_packages": 25 }"#).unwrap();
        assert_eq!(t.starting_packages, 25);
        assert_eq!(t.house_count, 20);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = Tuning::from_json(r#"{ "delivery_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "delivery_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_json_falls_back() {
        let t = Tuning::from_json_or_default("{ not json");
        assert_eq!(t, Tuning::default());
    }

    #[test]
    fn test_json_roundtrip_preserves_overrides() {
        let mut t = Tuning::default();
        t.world_speed = 3.5;
        let back = Tuning::from_json(&t.to_json()).unwrap();
        assert_eq!(back, t);
    }
}
