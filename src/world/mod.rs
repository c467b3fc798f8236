//! World state: tile grid, resource nodes, loot containers, structures
//!
//! The tile grid and the genesis flavor catalog are immutable after
//! generation and shared between snapshots behind `Arc`; only the entity
//! lists are re-allocated when a tick touches them.

pub mod flavor;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::types::{ContainerId, NodeId, StructureId, Vec2};
use crate::worldgen::tiles::TileId;

pub use flavor::{BiomeFlavor, CreatureFlavor, FlavorCatalog, StructureFlavor, Temperament};

/// The immutable tile grid produced by worldgen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    rows: Vec<Vec<TileId>>,
}

impl TileMap {
    pub fn new(rows: Vec<Vec<TileId>>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn width(&self) -> u32 {
        self.rows.first().map(|r| r.len() as u32).unwrap_or(0)
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<TileId> {
        self.rows.get(y as usize)?.get(x as usize).copied()
    }

    /// Iterate all cells as (x, y, tile)
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, TileId)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &tile)| (x as u32, y as u32, tile))
        })
    }
}

/// What a resource node yields when harvested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    FallenTree,
    ScrapPile,
    BerryBush,
    ElectronicsScrap,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::FallenTree,
        ResourceKind::ScrapPile,
        ResourceKind::BerryBush,
        ResourceKind::ElectronicsScrap,
    ];
}

/// Loot container variants scattered by worldgen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LootKind {
    RuinedCar,
    DebrisPile,
    MilitaryCrate,
}

impl LootKind {
    pub const ALL: [LootKind; 3] = [LootKind::RuinedCar, LootKind::DebrisPile, LootKind::MilitaryCrate];
}

/// A harvestable node; removed from the world once depleted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: NodeId,
    pub kind: ResourceKind,
    pub position: Vec2,
    pub remaining: f32,
}

/// A lootable container; emptied, not removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootContainer {
    pub id: ContainerId,
    pub kind: LootKind,
    pub position: Vec2,
    pub emptied: bool,
}

/// A structure placed in the world, possibly still under construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedStructure {
    pub id: StructureId,
    pub blueprint_id: String,
    pub position: Vec2,
    pub build_progress: f32,
    pub complete: bool,
}

/// Full world state for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldData {
    pub tile_map: Arc<TileMap>,
    pub resource_nodes: Vec<ResourceNode>,
    pub loot_containers: Vec<LootContainer>,
    pub placed_structures: Vec<PlacedStructure>,
    pub flavor: Arc<FlavorCatalog>,
    next_structure_id: u32,
}

impl WorldData {
    pub fn new(tile_map: TileMap, flavor: FlavorCatalog) -> Self {
        Self {
            tile_map: Arc::new(tile_map),
            resource_nodes: Vec::new(),
            loot_containers: Vec::new(),
            placed_structures: Vec::new(),
            flavor: Arc::new(flavor),
            next_structure_id: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.tile_map.width()
    }

    pub fn height(&self) -> u32 {
        self.tile_map.height()
    }

    pub fn node(&self, id: NodeId) -> Option<&ResourceNode> {
        self.resource_nodes.iter().find(|n| n.id == id)
    }

    /// Remove a node (after depletion); silently ignores unknown ids
    pub fn remove_node(&mut self, id: NodeId) {
        self.resource_nodes.retain(|n| n.id != id);
    }

    /// Place a structure, optionally already complete
    ///
    /// The planner only records build intents; actual placement is driven
    /// by the host (or by genesis for starting structures).
    pub fn place_structure(&mut self, blueprint_id: &str, position: Vec2, complete: bool) -> StructureId {
        let id = StructureId(self.next_structure_id);
        self.next_structure_id += 1;
        self.placed_structures.push(PlacedStructure {
            id,
            blueprint_id: blueprint_id.to_string(),
            position,
            build_progress: if complete { 1.0 } else { 0.0 },
            complete,
        });
        id
    }

    /// True if any completed structure uses the given blueprint
    pub fn has_completed(&self, blueprint_id: &str) -> bool {
        self.placed_structures
            .iter()
            .any(|s| s.complete && s.blueprint_id == blueprint_id)
    }
}
