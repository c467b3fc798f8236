//! Havenfall - Deterministic Colony Simulation Engine

pub mod agent;
pub mod colony;
pub mod core;
pub mod genesis;
pub mod sim;
pub mod text;
pub mod world;
pub mod worldgen;
