use eframe::egui::{Color32, Pos2, Vec2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_BURST: usize = 15;
pub const PARTICLE_LIFE: u32 = 60;
const PARTICLE_COLOR: Color32 = Color32::from_rgb(255, 215, 90);
const MAX_SPEED: f32 = 2.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub position: Pos2,
    pub velocity: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub color: Color32,
    pub size: f32,
}

impl Particle {
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    next_id: u64,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            next_id: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn spawn(&mut self, at: Pos2, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let velocity = vec2(
                self.rng.gen_range(-MAX_SPEED..=MAX_SPEED),
                self.rng.gen_range(-MAX_SPEED..=MAX_SPEED),
            );
            let size = self.rng.gen_range(2.0..5.0);
            self.particles.push(Particle {
                id: self.next_id,
                position: at,
                velocity,
                life: PARTICLE_LIFE,
                max_life: PARTICLE_LIFE,
                color: PARTICLE_COLOR,
                size,
            });
            self.next_id += 1;
        }
    }

    pub fn tick(&mut self) {
        for particle in &mut self.particles {
            particle.position += particle.velocity;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|particle| particle.life > 0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn particles_expire_after_their_life() {
        let mut system = ParticleSystem::new(11);
        system.spawn(pos2(10.0, 10.0), DEFAULT_BURST);
        assert_eq!(system.particles().len(), DEFAULT_BURST);

        for _ in 0..PARTICLE_LIFE {
            system.tick();
        }
        assert!(system.is_empty());
    }

    #[test]
    fn half_life_particles_are_partially_transparent() {
        let mut system = ParticleSystem::new(11);
        system.spawn(pos2(10.0, 10.0), 8);

        for _ in 0..30 {
            system.tick();
        }

        assert_eq!(system.particles().len(), 8);
        for particle in system.particles() {
            assert!(particle.life > 0 && particle.life < particle.max_life);
            let opacity = particle.opacity();
            assert!(opacity > 0.0 && opacity < 1.0);
        }
    }

    #[test]
    fn tick_moves_particles_by_their_velocity() {
        let mut system = ParticleSystem::new(5);
        system.spawn(pos2(100.0, 100.0), 1);
        let velocity = system.particles()[0].velocity;

        system.tick();

        assert_eq!(system.particles()[0].position, pos2(100.0, 100.0) + velocity);
    }

    #[test]
    fn ids_keep_increasing_across_bursts() {
        let mut system = ParticleSystem::new(5);
        system.spawn(pos2(0.0, 0.0), 2);
        system.spawn(pos2(0.0, 0.0), 2);
        let ids = system.particles().iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
