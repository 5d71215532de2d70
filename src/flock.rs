/*
 * Flock Module
 *
 * Owns the boid population and the quadtree over it, and advances the
 * simulation one tick at a time:
 *
 * 1. For every boid, query the quadtree with a square of side 2 * vision and
 *    keep only neighbors whose true distance is below the vision radius.
 * 2. Fold cohesion, alignment, separation and edge avoidance into a single
 *    steering vector and turn the boid a fixed angle towards it.
 * 3. Let a pressed pointer capture boids inside its annulus.
 * 4. Integrate every boid, then rebuild the quadtree every `rebuild_interval`
 *    ticks. Between rebuilds boids stay filed under the leaves they were
 *    inserted into, but the leaf test checks their current positions.
 *
 * Velocities are updated in place, so a boid late in the list sees the new
 * headings of boids earlier in the list within the same tick.
 */

use log::{info, trace};
use nannou::prelude::*;
use rand::Rng;

use crate::boid::{limit, sign, with_magnitude, Boid};
use crate::bound::Bound;
use crate::error::ParamsError;
use crate::params::SimulationParams;
use crate::quadtree::QuadTree;

// Pointer snapshot read once at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
    pub pressed: bool,
}

// Steering terms for one boid, already weighted
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steering {
    pub cohesion: Vec2,
    pub alignment: Vec2,
    pub separation: Vec2,
    pub edge: Vec2,
    pub neighbors: usize,
}

impl Steering {
    // With no neighbors only edge avoidance applies
    pub fn combined(&self) -> Vec2 {
        if self.neighbors == 0 {
            self.edge
        } else {
            self.cohesion + self.alignment + self.separation + self.edge
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockStats {
    pub boids: usize,
    pub ticks: u64,
    pub rebuilds: u64,
    pub average_neighbors: f32,
    pub leaves: usize,
    pub depth: usize,
}

pub struct Flock {
    boids: Vec<Boid>,
    index: QuadTree<usize>,
    width: f32,
    height: f32,
    ticks: u64,
    rebuilds: u64,
    // Reused query buffer
    neighbor_buffer: Vec<usize>,
}

fn check_viewport(width: f32, height: f32) -> Result<(), ParamsError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::EmptyViewport { width, height })
    }
}

impl Flock {
    // Spawn `params.num_boids` boids at random positions and headings
    pub fn new<R: Rng + ?Sized>(
        params: &SimulationParams,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Result<Self, ParamsError> {
        params.validate()?;
        check_viewport(width, height)?;

        let boids = (0..params.num_boids)
            .map(|_| Boid::random(width, height, params.cruise_speed, rng))
            .collect();
        info!(
            "spawned {} boids in a {:.0}x{:.0} viewport",
            params.num_boids, width, height
        );
        Self::from_boids(params, width, height, boids)
    }

    // Build a flock around an existing population
    pub fn from_boids(
        params: &SimulationParams,
        width: f32,
        height: f32,
        mut boids: Vec<Boid>,
    ) -> Result<Self, ParamsError> {
        params.validate()?;
        check_viewport(width, height)?;

        for boid in &mut boids {
            boid.clamp_to(width, height);
        }

        let mut flock = Self {
            neighbor_buffer: Vec::with_capacity(64),
            index: QuadTree::new(params.quadtree_capacity, Bound::new(0.0, 0.0, width, height)),
            boids,
            width,
            height,
            ticks: 0,
            rebuilds: 0,
        };
        flock.rebuild_index(params.quadtree_capacity);
        Ok(flock)
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn index(&self) -> &QuadTree<usize> {
        &self.index
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn viewport(&self) -> Bound {
        Bound::new(0.0, 0.0, self.width, self.height)
    }

    // Discard the quadtree and reinsert every boid at its current position
    pub fn rebuild_index(&mut self, capacity: usize) {
        let mut index = QuadTree::new(capacity, self.viewport());
        for (i, boid) in self.boids.iter().enumerate() {
            index.insert(boid.position, i);
        }
        self.index = index;
        self.rebuilds += 1;
        trace!(
            "quadtree rebuilt: {} boids, {} leaves, depth {}",
            self.index.len(),
            self.index.leaf_count(),
            self.index.depth()
        );
    }

    // Replace the population with a fresh random one
    pub fn respawn<R: Rng + ?Sized>(&mut self, params: &SimulationParams, rng: &mut R) {
        let (width, height) = (self.width, self.height);
        self.boids = (0..params.num_boids)
            .map(|_| Boid::random(width, height, params.cruise_speed, rng))
            .collect();
        info!("respawned {} boids", self.boids.len());
        self.rebuild_index(params.quadtree_capacity);
    }

    // Adopt a new viewport: clamp every boid into it and rebuild the index over the new bound
    pub fn resize(&mut self, width: f32, height: f32, params: &SimulationParams) -> Result<(), ParamsError> {
        check_viewport(width, height)?;
        self.width = width;
        self.height = height;
        for boid in &mut self.boids {
            boid.clamp_to(width, height);
        }
        self.rebuild_index(params.quadtree_capacity);
        Ok(())
    }

    // Advance the simulation by one tick
    pub fn tick(&mut self, params: &SimulationParams, pointer: PointerState) {
        self.update_velocities(params, pointer);

        let (width, height) = (self.width, self.height);
        for boid in &mut self.boids {
            boid.integrate(width, height, params);
        }

        self.ticks += 1;
        if self.ticks % params.rebuild_interval.max(1) == 0 {
            self.rebuild_index(params.quadtree_capacity);
        }
    }

    fn update_velocities(&mut self, params: &SimulationParams, pointer: PointerState) {
        let (inner, outer) = params.pointer_annulus();
        let mut neighbors = std::mem::take(&mut self.neighbor_buffer);

        for i in 0..self.boids.len() {
            neighbors.clear();
            let range = Bound::centered(self.boids[i].position, params.vision_radius);
            let boids = &self.boids;
            self.index
                .query_located_into(&range, &|&j: &usize| boids[j].position, &mut neighbors);

            let steering = self.steering_for(i, &neighbors, params);
            let boid = &mut self.boids[i];
            boid.neighbor_count = steering.neighbors;
            boid.turn_towards(steering.combined(), params.turn_rate);

            if pointer.pressed {
                let offset = pointer.position - boid.position;
                let distance = offset.length();
                if distance < outer && distance > inner {
                    let speed = boid.speed();
                    boid.velocity =
                        limit(with_magnitude(offset, speed) * params.pointer_boost, params.max_speed);
                }
            }
        }

        self.neighbor_buffer = neighbors;
    }

    // Weighted steering terms for boid `i` given the candidates returned by the
    // square range query. Candidates at or beyond the vision radius and the boid
    // itself are skipped.
    pub fn steering_for(&self, i: usize, candidates: &[usize], params: &SimulationParams) -> Steering {
        let Some(boid) = self.boids.get(i) else {
            return Steering::default();
        };
        let pos = boid.position;

        let mut center = Vec2::ZERO;
        let mut heading = Vec2::ZERO;
        let mut repulsion = Vec2::ZERO;
        let mut count = 0usize;

        for &j in candidates {
            if j == i {
                continue;
            }
            let Some(other) = self.boids.get(j) else {
                continue;
            };
            let d = pos.distance(other.position).max(params.min_separation_distance);
            if d < params.vision_radius {
                center += other.position;
                heading += other.velocity;
                repulsion += (pos - other.position) / d.powf(params.separation_exponent);
                count += 1;
            }
        }

        let edge = self.edge_force(pos, params) * params.edge_weight;
        if count == 0 {
            return Steering {
                edge,
                ..Steering::default()
            };
        }

        Steering {
            cohesion: (center / count as f32 - pos) * params.cohesion_weight,
            alignment: heading * params.alignment_weight,
            separation: repulsion * params.separation_weight,
            edge,
            neighbors: count,
        }
    }

    // Unweighted push back towards the centre, growing exponentially as a
    // boid closes in on either edge of an axis
    pub fn edge_force(&self, position: Vec2, params: &SimulationParams) -> Vec2 {
        let axis = |p: f32, extent: f32| {
            let gap = p.min((extent - p).abs());
            -params.edge_strength * (-gap).exp() * sign(p - extent / 2.0)
        };
        vec2(axis(position.x, self.width), axis(position.y, self.height))
    }

    // Indices of the boids boid `i` actually flocks with, through the same
    // two-stage filter as the tick
    pub fn neighbors_of(&self, i: usize, params: &SimulationParams) -> Vec<usize> {
        let Some(boid) = self.boids.get(i) else {
            return Vec::new();
        };
        let range = Bound::centered(boid.position, params.vision_radius);
        let mut candidates = Vec::new();
        self.index
            .query_located_into(&range, &|&j: &usize| self.boids[j].position, &mut candidates);
        candidates
            .into_iter()
            .filter(|&j| j != i)
            .filter(|&j| {
                let d = boid
                    .position
                    .distance(self.boids[j].position)
                    .max(params.min_separation_distance);
                d < params.vision_radius
            })
            .collect()
    }

    pub fn average_neighbors(&self) -> f32 {
        if self.boids.is_empty() {
            return 0.0;
        }
        let total: usize = self.boids.iter().map(|boid| boid.neighbor_count).sum();
        total as f32 / self.boids.len() as f32
    }

    pub fn stats(&self) -> FlockStats {
        FlockStats {
            boids: self.boids.len(),
            ticks: self.ticks,
            rebuilds: self.rebuilds,
            average_neighbors: self.average_neighbors(),
            leaves: self.index.leaf_count(),
            depth: self.index.depth(),
        }
    }
}
