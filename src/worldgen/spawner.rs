//! Entity spawner
//!
//! Places resource nodes and loot containers on the generated tile map.
//! Each entity kind has an allow-list of tiles it may stand on; candidate
//! cells are shuffled and drawn without replacement so no two spawned
//! entities share a cell.

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::core::config::SimulationConfig;
use crate::core::types::{ContainerId, NodeId, Vec2};
use crate::world::{LootContainer, LootKind, ResourceKind, ResourceNode, TileMap, WorldData};
use crate::worldgen::tiles::{
    CLAY_SOIL_TILES, DARK_WASTELAND_TILES, DEBRIS_TILES, LUSH_GRASS_TILES,
    MIXED_DRY_DIRT_TILES, SPARSE_GRASS_TILES, TileId,
};

/// Spawned node amounts are drawn uniformly from this half-open range.
const MIN_NODE_AMOUNT: f32 = 50.0;
const MAX_NODE_AMOUNT: f32 = 100.0;

fn node_allowed_tiles(kind: ResourceKind) -> Vec<TileId> {
    match kind {
        ResourceKind::FallenTree => [LUSH_GRASS_TILES, SPARSE_GRASS_TILES].concat(),
        ResourceKind::ScrapPile => [
            DARK_WASTELAND_TILES,
            CLAY_SOIL_TILES,
            MIXED_DRY_DIRT_TILES,
            DEBRIS_TILES,
        ]
        .concat(),
        ResourceKind::BerryBush => LUSH_GRASS_TILES.to_vec(),
        ResourceKind::ElectronicsScrap => DEBRIS_TILES.to_vec(),
    }
}

fn container_allowed_tiles(kind: LootKind) -> Vec<TileId> {
    match kind {
        // Cars rust away in the wastes and among the debris fields.
        LootKind::RuinedCar => [DARK_WASTELAND_TILES, DEBRIS_TILES].concat(),
        LootKind::DebrisPile => {
            let mut tiles = [DARK_WASTELAND_TILES, DEBRIS_TILES].concat();
            // Rubble also collects on the roughest clay and dry-dirt variants.
            tiles.extend([15, 47]);
            tiles
        }
        LootKind::MilitaryCrate => {
            let mut tiles = DARK_WASTELAND_TILES.to_vec();
            tiles.push(55);
            tiles
        }
    }
}

/// Cells matching at least one allow-list, minus already occupied ones
fn eligible_cells<F>(map: &TileMap, occupied: &AHashSet<(u32, u32)>, any_allows: F) -> Vec<(u32, u32, TileId)>
where
    F: Fn(TileId) -> bool,
{
    map.cells()
        .filter(|(x, y, tile)| any_allows(*tile) && !occupied.contains(&(*x, *y)))
        .collect()
}

/// Populate `world` with resource nodes and loot containers.
///
/// Collects all cells eligible for at least one kind, shuffles them, then
/// walks the permutation; each cell picks uniformly among the kinds still
/// under their target count that allow its tile. A kind with fewer eligible
/// free cells than its target spawns only what fits. A single occupancy set
/// covers both passes, so nodes and containers never share a cell.
pub fn spawn_entities(world: &mut WorldData, config: &SimulationConfig, rng: &mut ChaCha8Rng) {
    let mut occupied: AHashSet<(u32, u32)> = AHashSet::new();

    let node_rules: Vec<(ResourceKind, Vec<TileId>)> = ResourceKind::ALL
        .into_iter()
        .map(|k| (k, node_allowed_tiles(k)))
        .collect();
    let mut node_counts = [0usize; ResourceKind::ALL.len()];
    let mut cells = eligible_cells(&world.tile_map, &occupied, |tile| {
        node_rules.iter().any(|(_, allowed)| allowed.contains(&tile))
    });
    cells.shuffle(rng);
    let target = config.nodes_per_kind as usize;
    let mut next_node_id = 0u32;
    for (x, y, tile) in cells {
        if node_counts.iter().all(|&c| c >= target) {
            break;
        }
        let options: Vec<usize> = node_rules
            .iter()
            .enumerate()
            .filter(|(i, (_, allowed))| node_counts[*i] < target && allowed.contains(&tile))
            .map(|(i, _)| i)
            .collect();
        let Some(&pick) = options.choose(rng) else { continue };
        node_counts[pick] += 1;
        occupied.insert((x, y));
        world.resource_nodes.push(ResourceNode {
            id: NodeId(next_node_id),
            kind: node_rules[pick].0,
            position: Vec2::new(x as f32, y as f32),
            remaining: rng.gen_range(MIN_NODE_AMOUNT..MAX_NODE_AMOUNT),
        });
        next_node_id += 1;
    }
    if node_counts.iter().any(|&c| c < target) {
        debug!(?node_counts, target, "spawner short on eligible node tiles");
    }

    let container_rules: Vec<(LootKind, Vec<TileId>)> = LootKind::ALL
        .into_iter()
        .map(|k| (k, container_allowed_tiles(k)))
        .collect();
    let mut container_counts = [0usize; LootKind::ALL.len()];
    let mut cells = eligible_cells(&world.tile_map, &occupied, |tile| {
        container_rules.iter().any(|(_, allowed)| allowed.contains(&tile))
    });
    cells.shuffle(rng);
    let target = config.containers_per_kind as usize;
    let mut next_container_id = 0u32;
    for (x, y, tile) in cells {
        if container_counts.iter().all(|&c| c >= target) {
            break;
        }
        let options: Vec<usize> = container_rules
            .iter()
            .enumerate()
            .filter(|(i, (_, allowed))| container_counts[*i] < target && allowed.contains(&tile))
            .map(|(i, _)| i)
            .collect();
        let Some(&pick) = options.choose(rng) else { continue };
        container_counts[pick] += 1;
        occupied.insert((x, y));
        world.loot_containers.push(LootContainer {
            id: ContainerId(next_container_id),
            kind: container_rules[pick].0,
            position: Vec2::new(x as f32, y as f32),
            emptied: false,
        });
        next_container_id += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::FlavorCatalog;
    use crate::worldgen::terrain::generate_tile_map;
    use rand::SeedableRng;

    fn spawned_world(seed: u64) -> WorldData {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let map = generate_tile_map(64, 64, &config, &mut rng);
        let mut world = WorldData::new(map, FlavorCatalog::default());
        spawn_entities(&mut world, &config, &mut rng);
        world
    }

    #[test]
    fn test_no_shared_cells() {
        let world = spawned_world(7);
        let mut seen = AHashSet::new();
        for node in &world.resource_nodes {
            assert!(seen.insert((node.position.x as u32, node.position.y as u32)));
        }
        for c in &world.loot_containers {
            assert!(seen.insert((c.position.x as u32, c.position.y as u32)));
        }
    }

    #[test]
    fn test_nodes_on_allowed_tiles() {
        let world = spawned_world(11);
        for node in &world.resource_nodes {
            let tile = world
                .tile_map
                .get(node.position.x as u32, node.position.y as u32)
                .unwrap();
            assert!(node_allowed_tiles(node.kind).contains(&tile));
        }
    }

    #[test]
    fn test_containers_on_allowed_tiles() {
        let world = spawned_world(19);
        assert!(!world.loot_containers.is_empty());
        for container in &world.loot_containers {
            let tile = world
                .tile_map
                .get(container.position.x as u32, container.position.y as u32)
                .unwrap();
            assert!(container_allowed_tiles(container.kind).contains(&tile));
        }
    }

    #[test]
    fn test_allow_lists_cover_the_expected_ground() {
        // Scrap piles turn up on every barren band, not just wasteland.
        let scrap = node_allowed_tiles(ResourceKind::ScrapPile);
        for &tile in CLAY_SOIL_TILES.iter().chain(MIXED_DRY_DIRT_TILES) {
            assert!(scrap.contains(&tile));
        }
        // Electronics only survive in debris fields.
        let electronics = node_allowed_tiles(ResourceKind::ElectronicsScrap);
        assert_eq!(electronics, DEBRIS_TILES.to_vec());
        // Military crates sit in the wasteland plus the heavy-debris variant.
        let military = container_allowed_tiles(LootKind::MilitaryCrate);
        for &tile in DARK_WASTELAND_TILES {
            assert!(military.contains(&tile));
        }
        assert!(military.contains(&55));
        assert!(!military.contains(&CLAY_SOIL_TILES[0]));
        // Debris piles extend onto the roughest clay and dry-dirt tiles.
        let debris = container_allowed_tiles(LootKind::DebrisPile);
        assert!(debris.contains(&15) && debris.contains(&47));
        for &tile in DARK_WASTELAND_TILES {
            assert!(debris.contains(&tile));
        }
    }

    #[test]
    fn test_amounts_in_range() {
        let world = spawned_world(13);
        assert!(!world.resource_nodes.is_empty());
        for node in &world.resource_nodes {
            assert!(node.remaining >= MIN_NODE_AMOUNT && node.remaining < MAX_NODE_AMOUNT);
        }
    }

    #[test]
    fn test_respects_target_counts() {
        let config = SimulationConfig::default();
        let world = spawned_world(17);
        for kind in ResourceKind::ALL {
            let count = world.resource_nodes.iter().filter(|n| n.kind == kind).count();
            assert!(count <= config.nodes_per_kind as usize);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = spawned_world(99);
        let b = spawned_world(99);
        assert_eq!(a.resource_nodes, b.resource_nodes);
        assert_eq!(a.loot_containers, b.loot_containers);
    }
}
