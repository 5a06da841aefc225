//! Platform collision resolution strategies
//!
//! Both strategies receive a body already known to overlap the platform and
//! push it out along a single axis.

use crate::body::Body;
use crate::world::Platform;

/// Which side of the platform the body ended up against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Resting on top; the body becomes grounded
    Landed,
    Ceiling,
    Wall,
    /// Overlap left unresolved
    None,
}

/// Pluggable platform resolution
pub trait CollisionPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, body: &mut Body, platform: &Platform) -> Contact;
}

/// Picks the axis from the sign of the velocity and the body's position
/// relative to the platform's top-left corner. First matching case wins:
/// falling from above, rising from below, moving right into the left edge,
/// moving left into the right edge.
///
/// Positional correction is discrete, so a body whose per-step travel exceeds
/// a platform's thickness can pass through it.
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityAxisPolicy;

impl CollisionPolicy for VelocityAxisPolicy {
    fn name(&self) -> &'static str {
        "velocity-axis"
    }

    fn resolve(&self, body: &mut Body, platform: &Platform) -> Contact {
        let p = platform.rect;
        if body.vel.y > 0.0 && body.pos.y < p.min.y {
            body.pos.y = p.min.y - body.size.y;
            body.vel.y = 0.0;
            Contact::Landed
        } else if body.vel.y < 0.0 && body.pos.y > p.min.y {
            body.pos.y = p.max().y;
            body.vel.y = 0.0;
            Contact::Ceiling
        } else if body.vel.x > 0.0 && body.pos.x < p.min.x {
            body.pos.x = p.min.x - body.size.x;
            body.vel.x = 0.0;
            Contact::Wall
        } else if body.vel.x < 0.0 && body.pos.x > p.min.x {
            body.pos.x = p.max().x;
            body.vel.x = 0.0;
            Contact::Wall
        } else {
            Contact::None
        }
    }
}

/// Pushes the body out along the axis of smallest penetration, independent
/// of velocity. Resolves every overlap, including a body at rest inside a
/// platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumTranslationPolicy;

impl CollisionPolicy for MinimumTranslationPolicy {
    fn name(&self) -> &'static str {
        "minimum-translation"
    }

    fn resolve(&self, body: &mut Body, platform: &Platform) -> Contact {
        let p = platform.rect;
        let b = body.aabb();
        let diff = b.center() - p.center();
        let overlap_x = (b.size.x + p.size.x) / 2.0 - diff.x.abs();
        let overlap_y = (b.size.y + p.size.y) / 2.0 - diff.y.abs();

        if overlap_x <= 0.0 || overlap_y <= 0.0 {
            return Contact::None;
        }

        if overlap_y < overlap_x {
            if diff.y < 0.0 {
                // Body center above platform center
                body.pos.y = p.min.y - body.size.y;
                if body.vel.y >= 0.0 {
                    body.vel.y = 0.0;
                    return Contact::Landed;
                }
                Contact::None
            } else {
                body.pos.y = p.max().y;
                if body.vel.y < 0.0 {
                    body.vel.y = 0.0;
                }
                Contact::Ceiling
            }
        } else {
            if diff.x < 0.0 {
                body.pos.x = p.min.x - body.size.x;
                if body.vel.x > 0.0 {
                    body.vel.x = 0.0;
                }
            } else {
                body.pos.x = p.max().x;
                if body.vel.x < 0.0 {
                    body.vel.x = 0.0;
                }
            }
            Contact::Wall
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Faction, Body};
    use crate::constants::AVATAR_SIZE;
    use bevy::prelude::*;

    fn floor() -> Platform {
        Platform::new(Vec2::new(0.0, 600.0), Vec2::new(400.0, 20.0))
    }

    fn avatar_at(x: f32, y: f32, vel: Vec2) -> Body {
        let mut body = Body::new(Faction::Player, Vec2::new(x, y), AVATAR_SIZE);
        body.vel = vel;
        body
    }

    #[test]
    fn test_velocity_axis_lands_falling_body() {
        let mut body = avatar_at(100.0, 555.0, Vec2::new(0.0, 3.0));
        assert_eq!(VelocityAxisPolicy.resolve(&mut body, &floor()), Contact::Landed);
        assert_eq!(body.pos.y, 600.0 - AVATAR_SIZE.y);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_velocity_axis_bumps_underside() {
        let mut body = avatar_at(100.0, 615.0, Vec2::new(0.0, -4.0));
        assert_eq!(VelocityAxisPolicy.resolve(&mut body, &floor()), Contact::Ceiling);
        assert_eq!(body.pos.y, 620.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_velocity_axis_stops_at_side() {
        let wall = Platform::new(Vec2::new(200.0, 400.0), Vec2::new(20.0, 200.0));
        let mut body = avatar_at(170.0, 450.0, Vec2::new(5.0, 0.0));
        assert_eq!(VelocityAxisPolicy.resolve(&mut body, &wall), Contact::Wall);
        assert_eq!(body.pos.x, 200.0 - AVATAR_SIZE.x);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_velocity_axis_ignores_resting_overlap() {
        let mut body = avatar_at(100.0, 560.0, Vec2::ZERO);
        assert_eq!(VelocityAxisPolicy.resolve(&mut body, &floor()), Contact::None);
        assert_eq!(body.pos, Vec2::new(100.0, 560.0));
    }

    #[test]
    fn test_minimum_translation_resolves_resting_overlap() {
        let mut body = avatar_at(100.0, 560.0, Vec2::ZERO);
        assert_eq!(
            MinimumTranslationPolicy.resolve(&mut body, &floor()),
            Contact::Landed
        );
        assert_eq!(body.pos.y, 600.0 - AVATAR_SIZE.y);
    }

    #[test]
    fn test_minimum_translation_prefers_shallow_axis() {
        // Clipping the platform's left edge by 2px while mostly beside it
        let wall = Platform::new(Vec2::new(200.0, 400.0), Vec2::new(20.0, 200.0));
        let mut body = avatar_at(170.0, 450.0, Vec2::new(0.0, 3.0));
        assert_eq!(MinimumTranslationPolicy.resolve(&mut body, &wall), Contact::Wall);
        assert_eq!(body.pos.x, 200.0 - AVATAR_SIZE.x);
        assert_eq!(body.vel.y, 3.0);
    }
}
