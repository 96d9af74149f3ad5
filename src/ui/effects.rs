//! Cosmetic per-frame effects for the bench.
//!
//! Effects only read what the bench exposes (satisfied steps and
//! completion). They never feed back into it.

use crate::experiments::solubility::{Behavior, Material};
use crate::simulation::SimulationFacade;
use rand::Rng;

/// Particles dropped per material.
pub const PARTICLES_PER_MATERIAL: usize = 20;
/// Scale lost per frame while dissolving.
pub const DISSOLVE_RATE: f64 = 0.02;
/// Downward drift per frame while dissolving.
pub const SINK_RATE: f64 = 0.01;

/// Emissive intensity of a live wire at `elapsed` seconds.
pub fn wire_glow(elapsed: f64) -> f64 {
    0.3 + (elapsed * 10.0).sin() * 0.2
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub material: Material,
    /// Horizontal offset from the beaker centre, -0.75..0.75
    pub x: f64,
    /// Height above the beaker floor
    pub y: f64,
    pub scale: f64,
    pub dissolving: bool,
}

impl Particle {
    pub fn visible(&self) -> bool {
        self.scale > 0.0
    }

    fn tick(&mut self) {
        if self.dissolving && self.visible() {
            self.scale = (self.scale - DISSOLVE_RATE).max(0.0);
            self.y -= SINK_RATE;
        }
    }
}

/// Animation state mirrored from a bench.
#[derive(Debug, Clone, Default)]
pub struct BenchEffects {
    particles: Vec<Particle>,
    /// How many satisfied steps have already been turned into effects
    seen: usize,
    /// Seconds since the circuit closed, None while it is open
    glow_started: Option<f64>,
}

impl BenchEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up anything the bench satisfied since the last call. A bench
    /// with fewer satisfied steps than we have seen has been reset.
    pub fn sync<R: Rng>(&mut self, bench: &SimulationFacade, elapsed: f64, rng: &mut R) {
        let satisfied = bench.satisfied();
        if satisfied.len() < self.seen {
            *self = Self::new();
        }
        for id in &satisfied[self.seen..] {
            if let Some(material) = Material::from_id(id) {
                self.drop_material(material, rng);
            }
        }
        self.seen = satisfied.len();

        match (bench.is_complete(), self.glow_started) {
            (true, None) => self.glow_started = Some(elapsed),
            (false, Some(_)) => self.glow_started = None,
            _ => {}
        }
    }

    fn drop_material<R: Rng>(&mut self, material: Material, rng: &mut R) {
        let dissolving = material.behavior() == Behavior::Dissolves;
        self.particles
            .extend((0..PARTICLES_PER_MATERIAL).map(|_| Particle {
                material,
                x: (rng.gen::<f64>() - 0.5) * 1.5,
                y: 0.5 + rng.gen::<f64>() * 0.5,
                scale: 1.0,
                dissolving,
            }));
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        for particle in &mut self.particles {
            particle.tick();
        }
        self.particles.retain(Particle::visible);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Wire intensity, or None while the circuit is open.
    pub fn glow(&self, elapsed: f64) -> Option<f64> {
        self.glow_started.map(|start| wire_glow(elapsed - start))
    }
}
