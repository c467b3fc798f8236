//! Hunger, mood, and energy tracking
//!
//! All three needs live in [0,100]. Hunger climbs toward 100 (worse),
//! mood and energy fall toward 0 (worse).

use serde::{Deserialize, Serialize};

use crate::agent::AgentState;
use crate::core::config::SimulationConfig;

pub const NEED_MIN: f32 = 0.0;
pub const NEED_MAX: f32 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    pub hunger: f32,
    pub mood: f32,
    pub energy: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            hunger: 20.0,
            mood: 75.0,
            energy: 100.0,
        }
    }
}

impl Needs {
    fn clamp_all(&mut self) {
        self.hunger = self.hunger.clamp(NEED_MIN, NEED_MAX);
        self.mood = self.mood.clamp(NEED_MIN, NEED_MAX);
        self.energy = self.energy.clamp(NEED_MIN, NEED_MAX);
    }

    /// Per-tick drift, applied in every state.
    ///
    /// Energy drains while working (Moving/Harvesting) and recovers while
    /// resting (Idle/Interacting). A hungry agent loses extra mood; a
    /// well-fed one slowly recovers it.
    pub fn drift(&mut self, state: &AgentState, config: &SimulationConfig) {
        self.hunger += config.hunger_rate;
        self.mood -= config.mood_decay;
        if self.hunger > config.hunger_threshold {
            self.mood -= config.hunger_mood_penalty;
        } else if self.hunger < config.hunger_threshold * 0.5 {
            self.mood += config.mood_recovery;
        }
        match state {
            AgentState::Moving { .. } | AgentState::Harvesting { .. } => {
                self.energy -= config.energy_drain;
            }
            AgentState::Idle | AgentState::Interacting { .. } => {
                self.energy += config.energy_regen;
            }
        }
        self.clamp_all();
    }

    /// Day-boundary effect when the colony fed everyone
    pub fn eat(&mut self, relief: f32) {
        self.hunger -= relief;
        self.clamp_all();
    }

    /// Day-boundary effect when the food ran out
    pub fn starve(&mut self, mood_penalty: f32) {
        self.mood -= mood_penalty;
        self.clamp_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_stays_in_bounds() {
        let config = SimulationConfig::default();
        let mut needs = Needs {
            hunger: 99.9,
            mood: 0.01,
            energy: 0.0,
        };
        for _ in 0..1000 {
            needs.drift(&AgentState::Harvesting { node: crate::core::types::NodeId(0) }, &config);
        }
        assert_eq!(needs.hunger, NEED_MAX);
        assert_eq!(needs.mood, NEED_MIN);
        assert_eq!(needs.energy, NEED_MIN);
    }

    #[test]
    fn test_idle_regenerates_energy() {
        let config = SimulationConfig::default();
        let mut needs = Needs {
            energy: 50.0,
            ..Needs::default()
        };
        needs.drift(&AgentState::Idle, &config);
        assert!(needs.energy > 50.0);
    }

    #[test]
    fn test_hungry_agents_lose_extra_mood() {
        let config = SimulationConfig::default();
        let mut hungry = Needs {
            hunger: config.hunger_threshold + 10.0,
            ..Needs::default()
        };
        let mut fed = Needs {
            hunger: 10.0,
            ..Needs::default()
        };
        let start = hungry.mood;
        hungry.drift(&AgentState::Idle, &config);
        fed.drift(&AgentState::Idle, &config);
        assert!(hungry.mood < start - config.mood_decay);
        assert!(fed.mood >= hungry.mood);
    }

    #[test]
    fn test_eat_and_starve_clamp() {
        let mut needs = Needs {
            hunger: 10.0,
            mood: 5.0,
            energy: 50.0,
        };
        needs.eat(40.0);
        assert_eq!(needs.hunger, 0.0);
        needs.starve(10.0);
        assert_eq!(needs.mood, 0.0);
    }
}
