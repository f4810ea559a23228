//! Dust puffs kicked up on each step.

use glam::DVec2;
use rand::Rng;

/// A particle is already one tick old on the tick it appears.
pub const SPAWN_AGE: f64 = 1.0;

pub struct DustParticle {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Ticks lived so far, counting the spawn tick.
    pub age: f64,
    pub max_age: f64,
    pub size: f64,
}

impl DustParticle {
    /// Fades linearly to zero over the particle's life.
    pub fn alpha(&self) -> f64 {
        ((1.0 - self.age / self.max_age) * 0.5).clamp(0.0, 0.5)
    }
}

#[derive(Default)]
pub struct DustPuffs {
    pub particles: Vec<DustParticle>,
}

impl DustPuffs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `count` particles at `at` with a small upward-biased velocity.
    pub fn spawn(&mut self, at: DVec2, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            self.particles.push(DustParticle {
                position: at,
                velocity: DVec2::new((rng.gen::<f64>() - 0.5) * 1.5, -rng.gen::<f64>() * 1.5 - 0.5),
                age: SPAWN_AGE,
                max_age: 20.0 + rng.gen::<f64>() * 15.0,
                size: 1.5 + rng.gen::<f64>() * 1.5,
            });
        }
    }

    /// Integrate one tick and drop particles that have lived out their age.
    pub fn update(&mut self, gravity: f64) {
        for p in &mut self.particles {
            p.position += p.velocity;
            p.velocity.y += gravity;
            p.age += 1.0;
        }
        self.particles.retain(|p| p.age < p.max_age);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn spawned_particles_have_bounded_parameters() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut dust = DustPuffs::new();
        dust.spawn(DVec2::new(10.0, 20.0), 200, &mut rng);
        assert_eq!(dust.len(), 200);
        for p in &dust.particles {
            assert_eq!(p.position, DVec2::new(10.0, 20.0));
            assert!(p.velocity.x >= -0.75 && p.velocity.x < 0.75);
            assert!(p.velocity.y > -2.0 && p.velocity.y <= -0.5);
            assert!((20.0..35.0).contains(&p.max_age));
            assert!((1.5..3.0).contains(&p.size));
            assert_eq!(p.alpha(), (1.0 - 1.0 / p.max_age) * 0.5);
            assert!(p.alpha() < 0.5);
        }
    }

    #[test]
    fn particles_are_born_one_tick_old() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut dust = DustPuffs::new();
        dust.spawn(DVec2::ZERO, 4, &mut rng);
        assert!(dust.particles.iter().all(|p| p.age == 1.0));
        dust.update(0.0);
        assert!(dust.particles.iter().all(|p| p.age == 2.0));
    }

    #[test]
    fn shortest_lived_particle_lasts_nineteen_updates() {
        let mut dust = DustPuffs::new();
        dust.particles.push(DustParticle {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            age: SPAWN_AGE,
            max_age: 20.0,
            size: 1.0,
        });
        for _ in 0..18 {
            dust.update(0.0);
        }
        assert_eq!(dust.len(), 1);
        dust.update(0.0);
        assert!(dust.is_empty());
    }

    #[test]
    fn gravity_pulls_particles_down() {
        let mut dust = DustPuffs::new();
        dust.particles.push(DustParticle {
            position: DVec2::ZERO,
            velocity: DVec2::new(1.0, -1.0),
            age: 0.0,
            max_age: 30.0,
            size: 2.0,
        });
        dust.update(0.08);
        dust.update(0.08);
        let p = &dust.particles[0];
        assert_eq!(p.position.x, 2.0);
        assert!((p.position.y - (-1.0 + -0.92)).abs() < 1e-12);
        assert_eq!(p.age, 2.0);
    }

    #[test]
    fn particles_retire_at_max_age() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut dust = DustPuffs::new();
        dust.spawn(DVec2::ZERO, 5, &mut rng);
        for _ in 0..35 {
            dust.update(0.08);
        }
        assert!(dust.is_empty());
    }

    #[test]
    fn survivors_keep_their_order() {
        let mut dust = DustPuffs::new();
        for (i, max_age) in [5.0, 1.0, 5.0].into_iter().enumerate() {
            dust.particles.push(DustParticle {
                position: DVec2::new(i as f64, 0.0),
                velocity: DVec2::ZERO,
                age: 0.0,
                max_age,
                size: 1.0,
            });
        }
        dust.update(0.0);
        assert_eq!(dust.len(), 2);
        assert_eq!(dust.particles[0].position.x, 0.0);
        assert_eq!(dust.particles[1].position.x, 2.0);
    }
}
