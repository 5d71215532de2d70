/*
 * Boid Module
 *
 * This module defines the Boid struct and its per-tick motion.
 * A boid never accelerates freely: each tick it turns by a fixed angle towards
 * its steering vector, moves by its velocity, stays inside the viewport, and
 * has its speed pulled back to the cruise speed.
 */

use std::f32::consts::TAU;

use nannou::prelude::*;
use rand::Rng;

use crate::params::SimulationParams;
use crate::renderer::to_screen;
use crate::BOID_SIZE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    // Neighbors seen on the last tick, used only for colouring
    pub neighbor_count: usize,
}

// Sign that maps zero to zero (f32::signum maps +0.0 to 1.0)
#[inline]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    vec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

// Rescale to `magnitude`. A zero vector has no direction and stays zero.
#[inline]
pub fn with_magnitude(v: Vec2, magnitude: f32) -> Vec2 {
    let length = v.length();
    if length > 0.0 {
        v * (magnitude / length)
    } else {
        v
    }
}

#[inline]
pub fn limit(v: Vec2, max: f32) -> Vec2 {
    if v.length_squared() > max * max {
        with_magnitude(v, max)
    } else {
        v
    }
}

impl Boid {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            neighbor_count: 0,
        }
    }

    // Random position inside the viewport with a random heading at cruise speed
    pub fn random<R: Rng + ?Sized>(width: f32, height: f32, speed: f32, rng: &mut R) -> Self {
        let x = rng.gen_range(0.0..=width);
        let y = rng.gen_range(0.0..=height);
        let angle = rng.gen_range(0.0..TAU);
        Self::new(vec2(x, y), vec2(angle.cos(), angle.sin()) * speed)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    // Turn a fixed angle towards `steering`. Collinear or zero steering leaves the heading alone.
    pub fn turn_towards(&mut self, steering: Vec2, turn_rate: f32) {
        let direction = sign(cross(self.velocity, steering));
        if direction != 0.0 {
            self.velocity = rotate(self.velocity, turn_rate * direction);
        }
    }

    // Hard clamp into [0, width] x [0, height]
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        self.position.x = self.position.x.clamp(0.0, width);
        self.position.y = self.position.y.clamp(0.0, height);
    }

    // Move one tick, clamp to the viewport and renormalize speed:
    // too fast is damped, too slow is raised straight to cruise speed.
    pub fn integrate(&mut self, width: f32, height: f32, params: &SimulationParams) {
        self.position += self.velocity;
        self.clamp_to(width, height);

        if self.speed() > params.cruise_speed {
            self.velocity *= params.speed_damping;
        }
        if self.speed() < params.cruise_speed {
            self.velocity = if self.velocity.length_squared() > 0.0 {
                with_magnitude(self.velocity, params.cruise_speed)
            } else {
                vec2(params.cruise_speed, 0.0)
            };
        }
    }

    // Draw the boid as a triangle pointing along its velocity, over a faint
    // vision halo that brightens with local density
    pub fn draw(&self, draw: &Draw, viewport: Vec2, vision_radius: f32) {
        let screen_pos = to_screen(self.position, viewport);
        // Canvas y points down, nannou y points up
        let angle = (-self.velocity.y).atan2(self.velocity.x);

        let heading = with_magnitude(self.velocity, 1.0);
        let red = heading.x.abs();
        let green = (self.position.x / viewport.x).clamp(0.0, 1.0) * 0.78;
        let blue = heading.y.abs();
        let density = self.neighbor_count as f32 / 255.0;

        draw.ellipse()
            .xy(screen_pos)
            .radius(vision_radius / 2.0)
            .color(rgba(
                (red + density).min(1.0),
                (green + density).min(1.0),
                (blue - 0.08 + density).clamp(0.0, 1.0),
                0.04,
            ));

        let points = [
            pt2(BOID_SIZE, 0.0),
            pt2(-BOID_SIZE, BOID_SIZE),
            pt2(-BOID_SIZE, -BOID_SIZE),
        ];
        draw.polygon()
            .color(rgb(red, green, blue))
            .points(points)
            .xy(screen_pos)
            .rotate(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-5;

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.0), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }

    #[test]
    fn rotate_quarter_turn() {
        let v = rotate(vec2(1.0, 0.0), PI / 2.0);
        assert!(v.x.abs() < EPS);
        assert!((v.y - 1.0).abs() < EPS);
    }

    #[test]
    fn turns_towards_steering_by_fixed_angle() {
        let mut boid = Boid::new(vec2(10.0, 10.0), vec2(1.0, 0.0));
        boid.turn_towards(vec2(0.0, 500.0), 0.03);
        assert!((boid.velocity.y - 0.03f32.sin()).abs() < EPS);
        assert!((boid.speed() - 1.0).abs() < EPS);

        let mut boid = Boid::new(vec2(10.0, 10.0), vec2(1.0, 0.0));
        boid.turn_towards(vec2(0.0, -0.001), 0.03);
        assert!((boid.velocity.y + 0.03f32.sin()).abs() < EPS);
    }

    #[test]
    fn zero_or_collinear_steering_keeps_heading() {
        let mut boid = Boid::new(vec2(10.0, 10.0), vec2(0.0, 1.0));
        boid.turn_towards(Vec2::ZERO, 0.03);
        assert_eq!(boid.velocity, vec2(0.0, 1.0));
        boid.turn_towards(vec2(0.0, 7.0), 0.03);
        assert_eq!(boid.velocity, vec2(0.0, 1.0));
    }

    #[test]
    fn integrate_clamps_to_the_viewport() {
        let params = SimulationParams::default();
        let mut boid = Boid::new(vec2(799.5, 0.5), vec2(1.0, -1.0) / 2f32.sqrt());
        boid.integrate(800.0, 400.0, &params);
        assert_eq!(boid.position, vec2(800.0, 0.0));
    }

    #[test]
    fn integrate_damps_fast_boids() {
        let params = SimulationParams::default();
        let mut boid = Boid::new(vec2(100.0, 100.0), vec2(10.0, 0.0));
        boid.integrate(800.0, 400.0, &params);
        assert_eq!(boid.position, vec2(110.0, 100.0));
        assert!((boid.speed() - 8.0).abs() < EPS);
    }

    #[test]
    fn integrate_raises_slow_boids_to_cruise_speed() {
        let params = SimulationParams::default();
        let mut boid = Boid::new(vec2(100.0, 100.0), vec2(0.0, 0.25));
        boid.integrate(800.0, 400.0, &params);
        assert!((boid.speed() - 1.0).abs() < EPS);
        assert!(boid.velocity.y > 0.0);

        // Slightly fast: damped below cruise speed, then raised back to it
        let mut boid = Boid::new(vec2(100.0, 100.0), vec2(1.1, 0.0));
        boid.integrate(800.0, 400.0, &params);
        assert!((boid.speed() - 1.0).abs() < EPS);
    }

    #[test]
    fn stalled_boid_gets_moving_again() {
        let params = SimulationParams::default();
        let mut boid = Boid::new(vec2(100.0, 100.0), Vec2::ZERO);
        boid.integrate(800.0, 400.0, &params);
        assert!((boid.speed() - 1.0).abs() < EPS);
    }

    #[test]
    fn random_boids_spawn_inside_at_cruise_speed() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let boid = Boid::random(800.0, 400.0, 1.0, &mut rng);
            assert!((0.0..=800.0).contains(&boid.position.x));
            assert!((0.0..=400.0).contains(&boid.position.y));
            assert!((boid.speed() - 1.0).abs() < EPS);
            assert_eq!(boid.neighbor_count, 0);
        }
    }

    #[test]
    fn limit_caps_long_vectors_only() {
        assert_eq!(limit(vec2(3.0, 4.0), 10.0), vec2(3.0, 4.0));
        let capped = limit(vec2(30.0, 40.0), 10.0);
        assert!((capped.length() - 10.0).abs() < EPS);
    }
}
