//! Procedural world generation: noise fields, tile selection, entity spawning

pub mod noise;
pub mod spawner;
pub mod terrain;
pub mod tiles;

pub use spawner::spawn_entities;
pub use terrain::generate_tile_map;
