//! Axis-aligned bounding boxes

use bevy::prelude::*;

/// Rectangle anchored at its top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Grow on every side by `margin`
    pub fn expanded(&self, margin: f32) -> Aabb {
        Aabb::new(self.min - Vec2::splat(margin), self.size + Vec2::splat(margin * 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
        let c = Aabb::new(Vec2::new(9.5, 9.5), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_expanded() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 50.0)).expanded(5.0);
        assert_eq!(a.min, Vec2::new(-5.0, -5.0));
        assert_eq!(a.max(), Vec2::new(105.0, 55.0));
    }
}
