//! Procedural generation for the hike scene: seeded hash noise, heightmaps,
//! rock fields and the fixed biome catalog.

pub mod biome;
pub mod heightmap;
pub mod rng;
pub mod rocks;

pub use biome::*;
pub use heightmap::*;
pub use rng::*;
pub use rocks::*;
