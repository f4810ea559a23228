//! Biome catalog: the fixed, ordered cycle of landscapes the hike walks through.

use engine_core::Rgb;

use crate::heightmap::{HeightMap, TerrainParams};
use crate::rocks::RockField;

/// Silhouette drawn beside landmark signposts while a biome is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchitectureStyle {
    /// Felt dome tent with a door.
    Yurt,
    /// Three stacked tiers.
    Pagoda,
    /// Crenellated wall with a tower.
    Fort,
    /// Slender tower with a domed cap.
    Minaret,
    /// Block with a pointed arch cut out.
    Iwan,
}

/// Three-stop vertical sky gradient (stops at 0, 0.6 and 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyGradient {
    pub top: Rgb,
    pub middle: Rgb,
    pub bottom: Rgb,
}

impl SkyGradient {
    pub const fn new(top: u32, middle: u32, bottom: u32) -> Self {
        Self { top: Rgb::from_hex(top), middle: Rgb::from_hex(middle), bottom: Rgb::from_hex(bottom) }
    }

    pub fn lerp(self, other: SkyGradient, t: f64) -> SkyGradient {
        SkyGradient {
            top: self.top.lerp(other.top, t),
            middle: self.middle.lerp(other.middle, t),
            bottom: self.bottom.lerp(other.bottom, t),
        }
    }

    pub fn stops(&self) -> [(f64, Rgb); 3] {
        [(0.0, self.top), (0.6, self.middle), (1.0, self.bottom)]
    }
}

/// Sun color early in the day and near sunset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunColors {
    pub high: Rgb,
    pub low: Rgb,
}

impl SunColors {
    pub const fn new(high: u32, low: u32) -> Self {
        Self { high: Rgb::from_hex(high), low: Rgb::from_hex(low) }
    }

    pub fn lerp(self, other: SunColors, t: f64) -> SunColors {
        SunColors { high: self.high.lerp(other.high, t), low: self.low.lerp(other.low, t) }
    }
}

/// Every color a biome contributes to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiomePalette {
    pub ground: Rgb,
    pub rock: Rgb,
    pub sky_day: SkyGradient,
    pub sky_dusk: SkyGradient,
    pub sun: SunColors,
}

impl BiomePalette {
    /// Channel-wise blend of every palette entry.
    pub fn lerp(&self, other: &BiomePalette, t: f64) -> BiomePalette {
        BiomePalette {
            ground: self.ground.lerp(other.ground, t),
            rock: self.rock.lerp(other.rock, t),
            sky_day: self.sky_day.lerp(other.sky_day, t),
            sky_dusk: self.sky_dusk.lerp(other.sky_dusk, t),
            sun: self.sun.lerp(other.sun, t),
        }
    }
}

/// Static biome descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biome {
    pub name: &'static str,
    /// Base ground height as a fraction of world height.
    pub base_height_fraction: f64,
    pub roughness: f64,
    pub seed: u32,
    pub rock_density: f64,
    pub architecture: ArchitectureStyle,
    pub palette: BiomePalette,
}

impl Biome {
    pub fn terrain_params(&self, world_width: f64, world_height: f64) -> TerrainParams {
        TerrainParams {
            width: world_width,
            base_height: world_height * self.base_height_fraction,
            roughness: self.roughness,
            seed: self.seed as f64,
        }
    }

    pub fn generate_terrain(&self, world_width: f64, world_height: f64) -> HeightMap {
        HeightMap::generate(&self.terrain_params(world_width, world_height))
    }

    pub fn generate_rocks(&self, world_width: f64) -> RockField {
        RockField::generate(world_width, self.seed as f64, self.rock_density)
    }
}

/// The biome cycle, in walking order.
pub const BIOMES: [Biome; 6] = [
    Biome {
        name: "Mongolia",
        base_height_fraction: 0.84,
        roughness: 0.85,
        seed: 101,
        rock_density: 0.8,
        architecture: ArchitectureStyle::Yurt,
        palette: BiomePalette {
            ground: Rgb::from_hex(0x2c3a2a),
            rock: Rgb::from_hex(0x1a1a1a),
            sky_day: SkyGradient::new(0x86d3ff, 0xbdebff, 0xe9d8b3),
            sky_dusk: SkyGradient::new(0x5b6da8, 0x7a82b9, 0xe0b693),
            sun: SunColors::new(0xffefa3, 0xffb56a),
        },
    },
    Biome {
        name: "China (Xinjiang)",
        base_height_fraction: 0.83,
        roughness: 0.75,
        seed: 111,
        rock_density: 1.0,
        architecture: ArchitectureStyle::Pagoda,
        palette: BiomePalette {
            ground: Rgb::from_hex(0x4a3a22),
            rock: Rgb::from_hex(0x231a10),
            sky_day: SkyGradient::new(0x7fd6ff, 0xc7f0ff, 0xf1d7a8),
            sky_dusk: SkyGradient::new(0xb06457, 0xd38a73, 0xf1c2a0),
            sun: SunColors::new(0xfff0b0, 0xff8f66),
        },
    },
    Biome {
        name: "Kazakhstan",
        base_height_fraction: 0.845,
        roughness: 0.95,
        seed: 121,
        rock_density: 0.9,
        architecture: ArchitectureStyle::Fort,
        palette: BiomePalette {
            ground: Rgb::from_hex(0x2a3b2e),
            rock: Rgb::from_hex(0x131417),
            sky_day: SkyGradient::new(0x84ccff, 0xb9e8ff, 0xeadfc0),
            sky_dusk: SkyGradient::new(0x516aa3, 0x6e7db6, 0xdab89e),
            sun: SunColors::new(0xffefa3, 0xffaf70),
        },
    },
    Biome {
        name: "Uzbekistan",
        base_height_fraction: 0.835,
        roughness: 0.8,
        seed: 131,
        rock_density: 1.1,
        architecture: ArchitectureStyle::Minaret,
        palette: BiomePalette {
            ground: Rgb::from_hex(0x3b2f23),
            rock: Rgb::from_hex(0x1a1510),
            sky_day: SkyGradient::new(0x7fd1ff, 0xbfeaff, 0xf0d7b0),
            sky_dusk: SkyGradient::new(0x7e5b8f, 0xa07aa6, 0xe4b9a2),
            sun: SunColors::new(0xffe87c, 0xff8c69),
        },
    },
    Biome {
        name: "Turkmenistan",
        base_height_fraction: 0.84,
        roughness: 0.7,
        seed: 141,
        rock_density: 0.95,
        architecture: ArchitectureStyle::Fort,
        palette: BiomePalette {
            ground: Rgb::from_hex(0x5a3b1c),
            rock: Rgb::from_hex(0x2b1d0f),
            sky_day: SkyGradient::new(0x8bd3ff, 0xcdeeff, 0xf3d6a6),
            sky_dusk: SkyGradient::new(0xb4655c, 0xd08a73, 0xf2c7a8),
            sun: SunColors::new(0xfff0a6, 0xff8a5b),
        },
    },
    Biome {
        name: "Iran (Persia)",
        base_height_fraction: 0.83,
        roughness: 1.05,
        seed: 151,
        rock_density: 1.2,
        architecture: ArchitectureStyle::Iwan,
        palette: BiomePalette {
            ground: Rgb::from_hex(0x2f2b3d),
            rock: Rgb::from_hex(0x0f0f12),
            sky_day: SkyGradient::new(0x7ec6e6, 0xa5d8e8, 0xd7dce0),
            sky_dusk: SkyGradient::new(0x4b3c7a, 0x6c4e9a, 0xc79ab2),
            sun: SunColors::new(0xffe87c, 0xff6b4a),
        },
    },
];

/// Biome at a cycle position; indices wrap around the catalog.
pub fn biome_at(index: usize) -> &'static Biome {
    &BIOMES[index % BIOMES.len()]
}

/// Which biome the walker is in after `steps`, cycling every `steps_per_biome`.
///
/// Equivalent to `floor(distance / distance_per_biome) mod count` with
/// `distance = steps × meters_per_step` and `distance_per_biome =
/// steps_per_biome × meters_per_step`, computed in integers so boundary
/// crossings never depend on float rounding.
pub fn biome_index_for_steps(steps: u32, steps_per_biome: u32) -> usize {
    (steps / steps_per_biome.max(1)) as usize % BIOMES.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biome_index_cycles_every_boundary() {
        assert_eq!(biome_index_for_steps(0, 1000), 0);
        assert_eq!(biome_index_for_steps(999, 1000), 0);
        assert_eq!(biome_index_for_steps(1000, 1000), 1);
        assert_eq!(biome_index_for_steps(5999, 1000), 5);
        assert_eq!(biome_index_for_steps(6000, 1000), 0);
        assert_eq!(biome_index_for_steps(10_000, 1000), 4);
    }

    #[test]
    fn zero_steps_per_biome_does_not_divide_by_zero() {
        assert_eq!(biome_index_for_steps(3, 0), 3);
    }

    #[test]
    fn biome_at_wraps() {
        assert_eq!(biome_at(6).name, BIOMES[0].name);
        assert_eq!(biome_at(7).seed, 111);
    }

    #[test]
    fn every_biome_generates_blendable_terrain() {
        let reference = BIOMES[0].generate_terrain(8000.0, 1000.0);
        for biome in &BIOMES {
            let hm = biome.generate_terrain(8000.0, 1000.0);
            assert_eq!(hm.len(), reference.len(), "{} must match segment count", biome.name);
        }
    }

    #[test]
    fn biome_seeds_are_distinct() {
        for (i, a) in BIOMES.iter().enumerate() {
            for b in &BIOMES[i + 1..] {
                assert_ne!(a.seed, b.seed);
            }
        }
    }

    #[test]
    fn palette_lerp_endpoints() {
        let a = &BIOMES[0].palette;
        let b = &BIOMES[5].palette;
        assert_eq!(a.lerp(b, 0.0), *a);
        assert_eq!(a.lerp(b, 1.0), *b);
    }

    #[test]
    fn sky_stops_are_ordered() {
        let stops = BIOMES[2].palette.sky_day.stops();
        assert_eq!(stops[0].0, 0.0);
        assert_eq!(stops[1].0, 0.6);
        assert_eq!(stops[2].0, 1.0);
    }
}
