/*
 * Bound Module
 *
 * Axis-aligned rectangle used by the quadtree for node regions and range
 * queries. Coordinates follow the simulation canvas: origin at the top-left,
 * x grows to the right and y grows downward. All edges are inclusive.
 */

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bound {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    // Square of side 2 * half_extent centred on a point
    pub fn centered(center: Vec2, half_extent: f32) -> Self {
        Self {
            x: center.x - half_extent,
            y: center.y - half_extent,
            w: half_extent * 2.0,
            h: half_extent * 2.0,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        vec2(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    // True when the two rectangles overlap or touch
    #[inline]
    pub fn intersects(&self, other: &Bound) -> bool {
        other.right() >= self.x
            && other.x <= self.right()
            && other.bottom() >= self.y
            && other.y <= self.bottom()
    }

    // Split into four equal quadrants, ordered top-left, top-right, bottom-left, bottom-right
    pub fn quadrants(&self) -> [Bound; 4] {
        let hw = self.w / 2.0;
        let hh = self.h / 2.0;
        [
            Bound::new(self.x, self.y, hw, hh),
            Bound::new(self.x + hw, self.y, hw, hh),
            Bound::new(self.x, self.y + hh, hw, hh),
            Bound::new(self.x + hw, self.y + hh, hw, hh),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_every_edge() {
        let b = Bound::new(10.0, 20.0, 100.0, 50.0);
        assert!(b.contains(vec2(10.0, 20.0)));
        assert!(b.contains(vec2(110.0, 70.0)));
        assert!(b.contains(vec2(60.0, 45.0)));
        assert!(!b.contains(vec2(9.99, 30.0)));
        assert!(!b.contains(vec2(50.0, 70.01)));
    }

    #[test]
    fn touching_rectangles_intersect() {
        let a = Bound::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Bound::new(10.0, 10.0, 5.0, 5.0)));
        assert!(a.intersects(&Bound::new(-5.0, -5.0, 30.0, 30.0)));
        assert!(!a.intersects(&Bound::new(10.5, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Bound::new(0.0, -6.0, 5.0, 5.0)));
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let b = Bound::new(0.0, 0.0, 800.0, 400.0);
        let [tl, tr, bl, br] = b.quadrants();
        assert_eq!(tl, Bound::new(0.0, 0.0, 400.0, 200.0));
        assert_eq!(tr, Bound::new(400.0, 0.0, 400.0, 200.0));
        assert_eq!(bl, Bound::new(0.0, 200.0, 400.0, 200.0));
        assert_eq!(br, Bound::new(400.0, 200.0, 400.0, 200.0));
        assert_eq!(b.midpoint(), vec2(400.0, 200.0));
    }

    #[test]
    fn centered_square_spans_twice_the_half_extent() {
        let b = Bound::centered(vec2(50.0, 40.0), 25.0);
        assert_eq!(b, Bound::new(25.0, 15.0, 50.0, 50.0));
    }
}
