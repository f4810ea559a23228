//! Biome transition state machine: which biome is current and how far the
//! terrain, rocks and palette have morphed toward it.

use std::borrow::Cow;

use engine_core::ease_out_cubic;
use procgen::{biome_at, biome_index_for_steps, Biome, BiomePalette, HeightMap, RockField};

/// Transition progress. Stable when `active` is false (progress is then 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeTransition {
    pub active: bool,
    pub progress: f64,
}

impl Default for BiomeTransition {
    fn default() -> Self {
        Self { active: false, progress: 1.0 }
    }
}

impl BiomeTransition {
    pub fn start(&mut self) {
        self.active = true;
        self.progress = 0.0;
    }

    /// Advance by `increment`. Returns true on the tick the transition completes.
    pub fn advance(&mut self, increment: f64) -> bool {
        if !self.active {
            return false;
        }
        self.progress = (self.progress + increment.max(0.0)).min(1.0);
        if self.progress >= 1.0 {
            self.active = false;
            self.progress = 1.0;
            return true;
        }
        false
    }

    /// Eased blend factor used for every interpolation; 1 when stable.
    pub fn blend_t(&self) -> f64 {
        if self.active {
            ease_out_cubic(self.progress)
        } else {
            1.0
        }
    }
}

/// Terrain, rocks and palette for the biome being left and the one being entered.
#[derive(Debug, Clone)]
pub struct BiomeState {
    current: usize,
    from: usize,
    to: usize,
    terrain_from: HeightMap,
    terrain_to: HeightMap,
    rocks_from: RockField,
    rocks_to: RockField,
    transition: BiomeTransition,
    world_width: f64,
    world_height: f64,
}

impl BiomeState {
    /// Start stable in the first biome.
    pub fn new(world_width: f64, world_height: f64) -> Self {
        let first = biome_at(0);
        let terrain = first.generate_terrain(world_width, world_height);
        let rocks = first.generate_rocks(world_width);
        Self {
            current: 0,
            from: 0,
            to: 0,
            terrain_from: terrain.clone(),
            terrain_to: terrain,
            rocks_from: rocks.clone(),
            rocks_to: rocks,
            transition: BiomeTransition::default(),
            world_width,
            world_height,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &'static Biome {
        biome_at(self.current)
    }

    pub fn from_biome(&self) -> &'static Biome {
        biome_at(self.from)
    }

    pub fn to_biome(&self) -> &'static Biome {
        biome_at(self.to)
    }

    pub fn transition(&self) -> BiomeTransition {
        self.transition
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.active
    }

    pub fn blend_t(&self) -> f64 {
        self.transition.blend_t()
    }

    pub fn terrain_from(&self) -> &HeightMap {
        &self.terrain_from
    }

    pub fn terrain_to(&self) -> &HeightMap {
        &self.terrain_to
    }

    pub fn rocks_from(&self) -> &RockField {
        &self.rocks_from
    }

    pub fn rocks_to(&self) -> &RockField {
        &self.rocks_to
    }

    /// Enter a new biome if the step count has crossed into one.
    /// Returns the entered biome.
    pub fn sync_to_steps(&mut self, steps: u32, steps_per_biome: u32) -> Option<&'static Biome> {
        let target = biome_index_for_steps(steps, steps_per_biome);
        if target == self.current {
            return None;
        }
        Some(self.retarget(target))
    }

    /// Begin morphing toward `target`. Any in-flight blend is frozen into the
    /// new "from" terrain first, so skipped biomes never show.
    pub fn retarget(&mut self, target: usize) -> &'static Biome {
        let snapshot = self.blended_heightmap().into_owned();
        let biome = biome_at(target);

        self.terrain_from = snapshot;
        self.terrain_to = biome.generate_terrain(self.world_width, self.world_height);
        self.rocks_from = std::mem::take(&mut self.rocks_to);
        if self.rocks_from.is_empty() {
            self.rocks_from = biome_at(self.current).generate_rocks(self.world_width);
        }
        self.rocks_to = biome.generate_rocks(self.world_width);

        self.from = self.current;
        self.to = target;
        self.current = target;
        self.transition.start();

        log::debug!(
            "Biome transition {} -> {} ({} rocks)",
            biome_at(self.from).name,
            biome.name,
            self.rocks_to.len()
        );
        biome
    }

    /// One tick of transition progress. Returns true when it completes, at
    /// which point the "to" terrain and rocks become the new baseline.
    pub fn advance(&mut self, increment: f64) -> bool {
        if !self.transition.advance(increment) {
            return false;
        }
        self.terrain_from = self.terrain_to.clone();
        self.rocks_from = self.rocks_to.clone();
        self.from = self.to;
        log::debug!("Biome transition into {} complete", self.current().name);
        true
    }

    /// Ground height at `x`. Exactly the "to" terrain once stable.
    pub fn ground_y(&self, x: f64) -> f64 {
        if !self.transition.active {
            return self.terrain_to.sample_y(x, self.world_width);
        }
        HeightMap::sample_blended(&self.terrain_from, &self.terrain_to, x, self.world_width, self.blend_t())
    }

    pub fn blended_heightmap(&self) -> Cow<'_, HeightMap> {
        if self.transition.active {
            Cow::Owned(self.terrain_from.blend(&self.terrain_to, self.blend_t()))
        } else {
            Cow::Borrowed(&self.terrain_to)
        }
    }

    pub fn palette(&self) -> BiomePalette {
        self.from_biome().palette.lerp(&self.to_biome().palette, self.blend_t())
    }

    /// Rock layers to draw with their alpha: the outgoing field fades out
    /// while the incoming one fades in.
    pub fn rock_layers(&self) -> Vec<(&RockField, f64)> {
        if self.transition.active {
            let t = self.blend_t();
            vec![(&self.rocks_from, 1.0 - t), (&self.rocks_to, t)]
        } else {
            vec![(&self.rocks_to, 1.0)]
        }
    }
}
