//! Tile grid generation
//!
//! Two independent noise fields are sampled per cell. The primary field is
//! quantile-thresholded into contiguous biome bands; the feature field
//! overlays debris, wildflowers, and rare hazard tiles biased toward
//! specific bands.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::world::TileMap;
use crate::worldgen::noise::NoiseField;
use crate::worldgen::tiles::{
    BiomeBand, TileId, CLAY_SOIL_TILES, DARK_WASTELAND_TILES, DEBRIS_TILES, GLOWING_MOSS_TILE,
    HAZARD_RADIATION_TILE, LUSH_GRASS_TILES, MIXED_DRY_DIRT_TILES, SPARSE_GRASS_TILES,
    WILDFLOWER_TILE,
};

/// Feature noise above this overlays a common feature tile (~15% of cells)
const FEATURE_CUTOFF: f32 = 0.85;
/// Feature noise above this overlays a rare tile (~4% of cells)
const RARE_CUTOFF: f32 = 0.96;

/// Generate the tile grid
///
/// Deterministic for a given rng state and dimensions. Degenerate
/// dimensions yield an empty grid rather than an error.
pub fn generate_tile_map(
    width: u32,
    height: u32,
    config: &SimulationConfig,
    rng: &mut ChaCha8Rng,
) -> TileMap {
    if width == 0 || height == 0 {
        return TileMap::empty();
    }

    let primary = NoiseField::new(rng);
    let feature = NoiseField::new(rng);

    let mut rows: Vec<Vec<TileId>> = Vec::with_capacity(height as usize);
    for y in 0..height {
        let mut row: Vec<TileId> = Vec::with_capacity(width as usize);
        for x in 0..width {
            let p = primary.sample01(
                x as f32 / config.primary_noise_scale,
                y as f32 / config.primary_noise_scale,
            );
            let f = feature.sample01(
                x as f32 / config.feature_noise_scale,
                y as f32 / config.feature_noise_scale,
            );

            let mut tile = base_tile(BiomeBand::from_primary(p), rng);

            // Features bias toward specific bands: debris collects on the
            // low bands, wildflowers on lush grass.
            if f > FEATURE_CUTOFF {
                if p < 0.5 && rng.gen::<f32>() > 0.4 {
                    tile = pick(DEBRIS_TILES, rng);
                } else if p >= 0.75 && rng.gen::<f32>() > 0.7 {
                    tile = WILDFLOWER_TILE;
                }
            }

            if f > RARE_CUTOFF {
                tile = if rng.gen::<bool>() {
                    HAZARD_RADIATION_TILE
                } else {
                    GLOWING_MOSS_TILE
                };
            }

            row.push(tile);
        }
        rows.push(row);
    }

    TileMap::new(rows)
}

fn base_tile(band: BiomeBand, rng: &mut ChaCha8Rng) -> TileId {
    match band {
        BiomeBand::Wasteland => pick(DARK_WASTELAND_TILES, rng),
        // The soil band mixes clay and dry dirt variants evenly
        BiomeBand::Soil => {
            if rng.gen::<bool>() {
                pick(CLAY_SOIL_TILES, rng)
            } else {
                pick(MIXED_DRY_DIRT_TILES, rng)
            }
        }
        BiomeBand::SparseGrass => pick(SPARSE_GRASS_TILES, rng),
        BiomeBand::LushGrass => pick(LUSH_GRASS_TILES, rng),
    }
}

fn pick(tiles: &[TileId], rng: &mut ChaCha8Rng) -> TileId {
    *tiles.choose(rng).expect("tile band is never empty")
}
