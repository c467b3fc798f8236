//! Tile palette and biome bands
//!
//! Tile ids index an 8x8 terrain atlas. Each biome band holds several
//! visually-equivalent variants; the generator picks one uniformly per cell.

/// A tile id into the terrain atlas
pub type TileId = u8;

/// Row 1: dark soil / wasteland
pub const DARK_WASTELAND_TILES: &[TileId] = &[0, 1, 2, 3, 4, 5, 6, 7];
/// Row 2: clay soil
pub const CLAY_SOIL_TILES: &[TileId] = &[8, 9, 10, 11, 12, 13, 14, 15];
/// Row 3: sparse grass
pub const SPARSE_GRASS_TILES: &[TileId] = &[16, 17, 18, 19, 20, 21, 22, 23];
/// Rows 4-5: lush grass
pub const LUSH_GRASS_TILES: &[TileId] = &[
    24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39,
];
/// Row 6: dry dirt mix
pub const MIXED_DRY_DIRT_TILES: &[TileId] = &[40, 41, 42, 43, 44, 45, 46, 47];
/// Row 7: ground with debris (branches, roots, dead brush)
pub const DEBRIS_TILES: &[TileId] = &[49, 50, 51, 52, 53, 55];
/// Lush grass variant with wildflowers
pub const WILDFLOWER_TILE: TileId = 25;
/// Rare bioluminescent ground cover
pub const GLOWING_MOSS_TILE: TileId = 48;
/// Rare radiation hazard
pub const HAZARD_RADIATION_TILE: TileId = 56;

/// Highest id the atlas defines
pub const MAX_TILE_ID: TileId = 56;

/// Coarse terrain category determined by the primary noise band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiomeBand {
    Wasteland,
    Soil,
    SparseGrass,
    LushGrass,
}

impl BiomeBand {
    /// Quantile-threshold a normalized primary noise value into a band
    pub fn from_primary(value: f32) -> Self {
        if value < 0.25 {
            BiomeBand::Wasteland
        } else if value < 0.50 {
            BiomeBand::Soil
        } else if value < 0.75 {
            BiomeBand::SparseGrass
        } else {
            BiomeBand::LushGrass
        }
    }
}

/// True if the id names a tile the atlas actually defines
pub fn is_valid_tile(id: TileId) -> bool {
    id <= MAX_TILE_ID && id != 54
}
