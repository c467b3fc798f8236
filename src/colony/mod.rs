//! Colony-level state: stockpiles, cultural values, the static catalog,
//! and the low-frequency planner

pub mod catalog;
pub mod planner;

use serde::{Deserialize, Serialize};

use crate::world::ResourceKind;

pub use planner::{run_planner, PlannerOutcome, ResearchProgress};

/// Shared stockpiles, all non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonyResources {
    pub food: f32,
    pub wood: f32,
    pub scrap: f32,
    pub stability: f32,
    pub research_points: f32,
}

impl Default for ColonyResources {
    fn default() -> Self {
        Self {
            food: 50.0,
            wood: 20.0,
            scrap: 10.0,
            stability: 75.0,
            research_points: 0.0,
        }
    }
}

impl ColonyResources {
    /// Bank one harvest tick into the matching stockpile
    pub fn deposit(&mut self, kind: ResourceKind, amount: f32) {
        match kind {
            ResourceKind::BerryBush => self.food += amount,
            ResourceKind::FallenTree => self.wood += amount,
            ResourceKind::ScrapPile | ResourceKind::ElectronicsScrap => self.scrap += amount,
        }
    }

    /// Per-tick social erosion; stability never leaves the 0-100 scale
    pub fn decay_stability(&mut self, amount: f32) {
        self.stability = (self.stability - amount).clamp(0.0, 100.0);
    }

    /// Day-boundary consumption; returns true when demand was fully met
    pub fn consume_food(&mut self, demand: f32) -> bool {
        let fed = self.food >= demand;
        self.food = (self.food - demand).max(0.0);
        fed
    }

    pub fn amount(&self, stockpile: Stockpile) -> f32 {
        match stockpile {
            Stockpile::Food => self.food,
            Stockpile::Wood => self.wood,
            Stockpile::Scrap => self.scrap,
        }
    }

    /// True when the full cost list is simultaneously affordable
    pub fn can_afford(&self, cost: &[(Stockpile, f32)]) -> bool {
        cost.iter().all(|&(stockpile, amount)| self.amount(stockpile) >= amount)
    }
}

/// The stockpiles a structure cost can draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stockpile {
    Food,
    Wood,
    Scrap,
}

/// Three founding traits, set at genesis and read-only thereafter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalValues {
    pub collectivism: f32,
    pub pragmatism: f32,
    pub spirituality: f32,
}

impl Default for CulturalValues {
    fn default() -> Self {
        Self {
            collectivism: 0.5,
            pragmatism: 0.5,
            spirituality: 0.5,
        }
    }
}
