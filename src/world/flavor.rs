//! Genesis flavor catalog
//!
//! Names and descriptions produced once at world creation. Pure cosmetics
//! for the mechanical layer, but agents and the event log reference them,
//! so they live in world state rather than a side channel.

use serde::{Deserialize, Serialize};

/// How a named creature behaves toward settlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Temperament {
    Docile,
    Skittish,
    Aggressive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeFlavor {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureFlavor {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureFlavor {
    pub name: String,
    pub description: String,
    pub temperament: Temperament,
}

/// Everything the genesis provider invented for this world
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlavorCatalog {
    pub world_name: String,
    pub opening_narrative: String,
    pub biomes: Vec<BiomeFlavor>,
    pub structures: Vec<StructureFlavor>,
    pub creatures: Vec<CreatureFlavor>,
}
