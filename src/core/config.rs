//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

use crate::core::error::{HavenError, Result};

/// Configuration for the simulation systems
///
/// These values have been tuned to produce good emergent pacing.
/// Changing them will affect gameplay feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === WORLD GENERATION ===
    /// Map width in tiles
    pub world_width: u32,

    /// Map height in tiles
    pub world_height: u32,

    /// Master seed for worldgen, spawning, and all agent decisions
    ///
    /// Same seed + dimensions produces an identical world and an
    /// identical simulation run.
    pub seed: u64,

    /// Controls the size of the main biomes. Larger = bigger biomes.
    pub primary_noise_scale: f32,

    /// Controls frequency of special features. Smaller = more frequent.
    pub feature_noise_scale: f32,

    /// Resource nodes requested per kind at spawn time
    pub nodes_per_kind: u32,

    /// Loot containers requested per kind at spawn time
    pub containers_per_kind: u32,

    // === CLOCK ===
    /// Simulation ticks per in-game hour (24 hours per day)
    ///
    /// At 600 ticks/hour and 10 ticks/sec host cadence, one real minute
    /// equals one game hour.
    pub ticks_per_hour: u64,

    // === AGENT FSM ===
    /// Per-tick chance an idle agent starts wandering
    pub wander_chance: f64,

    /// Movement step in tiles per tick
    ///
    /// An agent snaps to its destination once the remaining distance
    /// drops below one step, so this is also the arrival threshold.
    pub move_speed: f32,

    /// Base resource yield per harvesting tick, before the skill bonus
    pub harvest_base: f32,

    /// Per-skill-point multiplier on harvest yield
    ///
    /// Yield = harvest_base * (1.0 + skill * harvest_skill_bonus).
    pub harvest_skill_bonus: f32,

    /// Distance within which two agents can interact socially
    pub interact_range: f32,

    /// Ticks an interaction occupies both participants
    pub interact_duration: u32,

    // === NEEDS ===
    /// Hunger added per tick (0-100 scale)
    ///
    /// At 0.02/tick and 600 ticks/hour, an agent goes from fed to
    /// starving in a little over 8 game hours.
    pub hunger_rate: f32,

    /// Baseline mood lost per tick
    pub mood_decay: f32,

    /// Extra mood lost per tick while hunger exceeds `hunger_threshold`
    pub hunger_mood_penalty: f32,

    /// Mood regained per tick while hunger sits below half the threshold
    pub mood_recovery: f32,

    /// Hunger level above which mood suffers
    pub hunger_threshold: f32,

    /// Energy drained per tick while Moving or Harvesting
    pub energy_drain: f32,

    /// Energy regained per tick while Idle or Interacting
    pub energy_regen: f32,

    // === DAY BOUNDARY ===
    /// Food consumed per agent at each day boundary
    pub per_capita_food: f32,

    /// Hunger relieved per agent when the day's rations were fully met
    pub fed_hunger_relief: f32,

    /// Mood penalty applied when the pantry runs dry at a day boundary
    pub starvation_mood_penalty: f32,

    /// Colony stability lost per tick, clamped to the 0-100 scale
    pub stability_decay: f32,

    // === COLONY PLANNER ===
    /// The planner runs every this many ticks (amortized cost)
    pub planner_interval: u64,

    /// Research points accrued per planner pass while a completed
    /// research structure exists
    pub research_rate: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // World
            world_width: 64,
            world_height: 64,
            seed: 12345,
            primary_noise_scale: 25.0,
            feature_noise_scale: 10.0,
            nodes_per_kind: 8,
            containers_per_kind: 4,

            // Clock
            ticks_per_hour: 600,

            // FSM
            wander_chance: 0.005,
            move_speed: 0.05,
            harvest_base: 0.5,
            harvest_skill_bonus: 0.1,
            interact_range: 2.0,
            interact_duration: 10,

            // Needs (hunger fastest, mood slowest)
            hunger_rate: 0.02,
            mood_decay: 0.002,
            hunger_mood_penalty: 0.05,
            mood_recovery: 0.01,
            hunger_threshold: 70.0,
            energy_drain: 0.05,
            energy_regen: 0.08,

            // Day boundary
            per_capita_food: 2.0,
            fed_hunger_relief: 40.0,
            starvation_mood_penalty: 10.0,
            stability_decay: 0.1,

            // Planner
            planner_interval: 50,
            research_rate: 5.0,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys fall back to defaults
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_hour == 0 {
            return Err(HavenError::Config("ticks_per_hour must be positive".into()));
        }
        if self.planner_interval == 0 {
            return Err(HavenError::Config("planner_interval must be positive".into()));
        }
        if self.move_speed <= 0.0 {
            return Err(HavenError::Config("move_speed must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.wander_chance) {
            return Err(HavenError::Config(format!(
                "wander_chance ({}) must be a probability in [0, 1]",
                self.wander_chance
            )));
        }
        if self.hunger_threshold > 100.0 {
            return Err(HavenError::Config(format!(
                "hunger_threshold ({}) exceeds the 0-100 need scale",
                self.hunger_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let config = SimulationConfig {
            ticks_per_hour: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wander_chance_bounds() {
        let config = SimulationConfig {
            wander_chance: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SimulationConfig = toml::from_str("seed = 42\nworld_width = 10").unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.world_width, 10);
        assert_eq!(config.ticks_per_hour, SimulationConfig::default().ticks_per_hour);
    }
}
