use rand::Rng;
use serde::Serialize;

use crate::core::playfield::BlockColor;

/// Particle-space units per playfield cell.
///
/// Particle positions are measured from the top-left corner of the field,
/// so cell `(x, y)` spans `[x * CELL_SIZE, (x + 1) * CELL_SIZE)` horizontally.
pub const PARTICLE_CELL_SIZE: f32 = 30.0;

const GRAVITY: f32 = 0.2;
const FADE_PER_STEP: f32 = 0.02;
const BURST_PROBABILITY: f64 = 0.5;
const PARTICLES_PER_BLOCK: usize = 5;

/// A short-lived visual fragment thrown off by a line clear.
///
/// Particles have no effect on gameplay; they are simulated by the core only
/// so that every renderer animates them the same way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life, starting at 1.0.
    pub life: f32,
    pub color: BlockColor,
    pub size: u8,
}

impl Particle {
    /// Advances one simulation step.
    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;
        self.life -= FADE_PER_STEP;
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Emits particles for every cell of the cleared `rows`.
    ///
    /// Each cell has an even chance of throwing off a burst of particles with
    /// random outward/upward velocity, color, and size.
    pub fn burst<R>(&mut self, rng: &mut R, rows: &[usize], width: usize)
    where
        R: Rng + ?Sized,
    {
        for &y in rows {
            for x in 0..width {
                if !rng.random_bool(BURST_PROBABILITY) {
                    continue;
                }
                let (cx, cy) = cell_center(x, y);
                for _ in 0..PARTICLES_PER_BLOCK {
                    self.particles.push(Particle {
                        x: cx,
                        y: cy,
                        vx: rng.random_range(-5.0..=5.0),
                        vy: rng.random_range(-8.0..=-2.0),
                        life: 1.0,
                        color: rng.random(),
                        size: rng.random_range(3..=8),
                    });
                }
            }
        }
    }

    /// Steps every particle and drops the ones that have faded out.
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.step();
        }
        self.particles.retain(Particle::is_alive);
    }
}

#[expect(clippy::cast_precision_loss)]
fn cell_center(x: usize, y: usize) -> (f32, f32) {
    (
        (x as f32 + 0.5) * PARTICLE_CELL_SIZE,
        (y as f32 + 0.5) * PARTICLE_CELL_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn particle() -> Particle {
        Particle {
            x: 10.0,
            y: 20.0,
            vx: 1.0,
            vy: -4.0,
            life: 1.0,
            color: BlockColor::Cyan,
            size: 4,
        }
    }

    #[test]
    fn test_step_applies_velocity_then_gravity() {
        let mut p = particle();
        p.step();
        assert!((p.x - 11.0).abs() < 1e-6);
        assert!((p.y - 16.0).abs() < 1e-6);
        assert!((p.vy - -3.8).abs() < 1e-6);
        assert!((p.life - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_particles_expire_after_fifty_steps() {
        let mut system = ParticleSystem::new();
        system.particles.push(particle());
        for _ in 0..49 {
            system.step();
        }
        assert_eq!(system.particles().len(), 1);
        // float rounding may leave a sliver of life after the 50th step
        for _ in 0..2 {
            system.step();
        }
        assert!(system.particles().is_empty());
    }

    #[test]
    fn test_burst_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut system = ParticleSystem::new();
        system.burst(&mut rng, &[18, 19], 10);

        let particles = system.particles();
        assert_eq!(particles.len() % PARTICLES_PER_BLOCK, 0);
        assert!(particles.len() <= 2 * 10 * PARTICLES_PER_BLOCK);
        for p in particles {
            assert!((-5.0..=5.0).contains(&p.vx));
            assert!((-8.0..=-2.0).contains(&p.vy));
            assert!((3..=8).contains(&p.size));
            assert!((p.life - 1.0).abs() < f32::EPSILON);
            assert!(p.y >= 18.0 * PARTICLE_CELL_SIZE && p.y < 20.0 * PARTICLE_CELL_SIZE);
            assert!(p.x >= 0.0 && p.x < 10.0 * PARTICLE_CELL_SIZE);
        }
    }

    #[test]
    fn test_burst_roughly_half_the_cells() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut system = ParticleSystem::new();
        let rows: Vec<_> = (0..20).collect();
        system.burst(&mut rng, &rows, 10);

        let bursts = system.particles().len() / PARTICLES_PER_BLOCK;
        assert!((60..=140).contains(&bursts), "got {bursts} bursts of 200");
    }
}
