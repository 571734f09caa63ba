//! Particle agent with steering behaviors
//!
//! Each particle independently decides how to move. Every behavior returns a
//! steering force in the classic form `clamp(desired - velocity, max_force)`,
//! so no single tick can produce an unrealistic velocity change.
//!
//! Neighbor searches are deliberately color-blind: cohesion, separation and
//! alignment consider every nearby particle regardless of color. Only the win
//! check cares about color, which is what makes the sorting hard.

use glam::Vec2;
use rand::Rng;

use super::vec::{Vec2Ext, random_unit};
use crate::consts::*;

/// Color group identity, an index into [`crate::consts::COLORS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTag(pub u8);

impl ColorTag {
    /// CSS color string for rendering
    pub fn css(self) -> &'static str {
        COLORS[self.0 as usize % COLORS.len()]
    }
}

/// An autonomous agent
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub color: ColorTag,
    pub radius: f32,
    pub max_speed: f32,
    pub max_force: f32,
}

impl Particle {
    /// Create a particle at the given position, already in motion with a
    /// random heading and a bounded random speed
    pub fn new<R: Rng>(position: Vec2, color: ColorTag, rng: &mut R) -> Self {
        let speed = rng.random_range(0.0..PARTICLE_INITIAL_VELOCITY_MULTIPLIER);
        Self {
            position,
            velocity: random_unit(rng) * speed,
            acceleration: Vec2::ZERO,
            color,
            radius: PARTICLE_RADIUS,
            max_speed: PARTICLE_MAX_SPEED,
            max_force: PARTICLE_MAX_FORCE,
        }
    }

    /// Steering force toward a desired velocity, clamped to `max_force`
    #[inline]
    fn steer_toward(&self, desired: Vec2) -> Vec2 {
        (desired - self.velocity).limit(self.max_force)
    }

    /// Seek: full-speed steering toward a target point
    fn seek(&self, target: Vec2) -> Vec2 {
        let desired = (target - self.position).with_length(self.max_speed);
        self.steer_toward(desired)
    }

    /// Flee from the target (the pointer). No effect beyond `flee_radius`;
    /// inside it the desired speed scales linearly from 0 at the rim to
    /// `max_speed` at the target itself.
    pub fn flee(&self, target: Vec2, flee_radius: f32) -> Vec2 {
        let away = self.position - target;
        let distance = away.length();

        if distance > flee_radius {
            return Vec2::ZERO;
        }

        let strength = (flee_radius - distance) / flee_radius;
        let desired = away.with_length(self.max_speed * strength);
        self.steer_toward(desired)
    }

    /// Cohesion: seek the mean position of all neighbors within
    /// `cohesion_radius`. Zero force when there are no neighbors.
    pub fn cohesion(&self, particles: &[Particle], cohesion_radius: f32) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0u32;

        for other in particles {
            let d = self.position.distance(other.position);
            // d > 0 excludes self
            if d > 0.0 && d < cohesion_radius {
                sum += other.position;
                count += 1;
            }
        }

        if count > 0 {
            self.seek(sum / count as f32)
        } else {
            Vec2::ZERO
        }
    }

    /// Separation: push away from each neighbor within `separation_radius`,
    /// weighted by inverse distance so closer neighbors push harder.
    pub fn separation(&self, particles: &[Particle], separation_radius: f32) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0u32;

        for other in particles {
            let d = self.position.distance(other.position);
            if d > 0.0 && d < separation_radius {
                let diff = (self.position - other.position).normalize_or_zero();
                sum += diff / d;
                count += 1;
            }
        }

        if count > 0 {
            let desired = (sum / count as f32).with_length(self.max_speed);
            self.steer_toward(desired)
        } else {
            Vec2::ZERO
        }
    }

    /// Alignment: match the mean velocity of neighbors within `align_radius`.
    /// Disabled by weight in the reference tuning but fully functional.
    pub fn align(&self, particles: &[Particle], align_radius: f32) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0u32;

        for other in particles {
            let d = self.position.distance(other.position);
            if d > 0.0 && d < align_radius {
                sum += other.velocity;
                count += 1;
            }
        }

        if count > 0 {
            let desired = (sum / count as f32).with_length(self.max_speed);
            self.steer_toward(desired)
        } else {
            Vec2::ZERO
        }
    }

    /// Accumulate a force for the next integration step
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Advance physics by one tick. Order matters: friction is applied
    /// before the speed clamp, and acceleration resets only after the
    /// position update.
    pub fn integrate(&mut self, friction: f32) {
        self.velocity += self.acceleration;
        self.velocity *= friction;
        self.velocity = self.velocity.limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
    }

    /// Bounce off canvas edges, keeping the particle at least `radius`
    /// inside. The bounce is inelastic: the reflected velocity component is
    /// scaled by `edge_damping`.
    pub fn handle_boundaries(&mut self, width: f32, height: f32, edge_damping: f32) {
        let margin = self.radius;

        if self.position.x > width - margin {
            self.position.x = width - margin;
            self.velocity.x *= -edge_damping;
        }
        if self.position.x < margin {
            self.position.x = margin;
            self.velocity.x *= -edge_damping;
        }
        if self.position.y > height - margin {
            self.position.y = height - margin;
            self.velocity.y *= -edge_damping;
        }
        if self.position.y < margin {
            self.position.y = margin;
            self.velocity.y *= -edge_damping;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle_at(x: f32, y: f32, color: u8) -> Particle {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut p = Particle::new(Vec2::new(x, y), ColorTag(color), &mut rng);
        p.velocity = Vec2::ZERO;
        p
    }

    #[test]
    fn test_flee_zero_beyond_radius() {
        let p = particle_at(0.0, 0.0, 0);
        let force = p.flee(Vec2::new(200.0, 0.0), 150.0);
        assert_eq!(force, Vec2::ZERO);
    }

    #[test]
    fn test_flee_points_away_from_target() {
        let p = particle_at(100.0, 0.0, 0);
        let force = p.flee(Vec2::new(50.0, 0.0), 150.0);
        assert!(force.x > 0.0, "flee force should push away from the target");
        assert!(force.y.abs() < 1e-6);
    }

    #[test]
    fn test_flee_falloff_is_monotonic() {
        // Force magnitude strictly decreases as distance grows toward the
        // radius, and is exactly zero at the rim. Raise max_force so the
        // clamp does not flatten the curve.
        let target = Vec2::ZERO;
        let mut last_mag = f32::INFINITY;
        for d in [10.0, 40.0, 80.0, 120.0, 149.0] {
            let mut p = particle_at(d, 0.0, 0);
            p.max_force = 100.0;
            let mag = p.flee(target, 150.0).length();
            assert!(
                mag < last_mag,
                "flee at distance {d} should be weaker than closer in"
            );
            assert!(mag > 0.0);
            last_mag = mag;
        }
        let at_rim = particle_at(150.1, 0.0, 0);
        assert_eq!(at_rim.flee(target, 150.0), Vec2::ZERO);
    }

    #[test]
    fn test_cohesion_steers_toward_neighbors() {
        let p = particle_at(0.0, 0.0, 0);
        let flock = vec![
            p.clone(),
            particle_at(40.0, 0.0, 0),
            particle_at(60.0, 0.0, 0),
        ];
        let force = flock[0].cohesion(&flock, 80.0);
        assert!(force.x > 0.0, "should steer toward the neighbor centroid");
    }

    #[test]
    fn test_cohesion_ignores_color() {
        // Cross-color attraction is intentional: only the win check is
        // color-aware
        let p = particle_at(0.0, 0.0, 0);
        let same = vec![p.clone(), particle_at(40.0, 0.0, 0)];
        let other = vec![p.clone(), particle_at(40.0, 0.0, 1)];
        let f_same = same[0].cohesion(&same, 80.0);
        let f_other = other[0].cohesion(&other, 80.0);
        assert_eq!(f_same, f_other);
    }

    #[test]
    fn test_cohesion_no_neighbors_is_zero() {
        let p = particle_at(0.0, 0.0, 0);
        let flock = vec![p.clone(), particle_at(500.0, 500.0, 0)];
        assert_eq!(flock[0].cohesion(&flock, 80.0), Vec2::ZERO);
        // A lone particle never attracts itself
        let alone = vec![p];
        assert_eq!(alone[0].cohesion(&alone, 80.0), Vec2::ZERO);
    }

    #[test]
    fn test_separation_pushes_apart() {
        let flock = vec![particle_at(0.0, 0.0, 0), particle_at(10.0, 0.0, 1)];
        let force = flock[0].separation(&flock, 50.0);
        assert!(force.x < 0.0, "should push away from the close neighbor");
    }

    #[test]
    fn test_separation_closer_neighbor_dominates() {
        // Inverse-distance weighting: a neighbor at 5 units outweighs one at
        // 40 units on the opposite side
        let flock = vec![
            particle_at(0.0, 0.0, 0),
            particle_at(5.0, 0.0, 0),
            particle_at(-40.0, 0.0, 0),
        ];
        let force = flock[0].separation(&flock, 50.0);
        assert!(force.x < 0.0, "net push should flee the closer neighbor");
    }

    #[test]
    fn test_align_matches_neighbor_velocity() {
        let mut mover = particle_at(30.0, 0.0, 0);
        mover.velocity = Vec2::new(0.0, 3.0);
        let flock = vec![particle_at(0.0, 0.0, 0), mover];
        let force = flock[0].align(&flock, 50.0);
        assert!(force.y > 0.0, "should steer toward the neighbor's heading");
    }

    #[test]
    fn test_align_no_neighbors_is_zero() {
        let flock = vec![particle_at(0.0, 0.0, 0), particle_at(300.0, 0.0, 0)];
        assert_eq!(flock[0].align(&flock, 50.0), Vec2::ZERO);
    }

    #[test]
    fn test_integrate_order() {
        let mut p = particle_at(0.0, 0.0, 0);
        p.apply_force(Vec2::new(1.0, 0.0));
        p.integrate(0.88);
        // velocity = (0 + 1) * 0.88, clamped (no-op), position moves by it
        assert!((p.velocity.x - 0.88).abs() < 1e-5);
        assert!((p.position.x - 0.88).abs() < 1e-5);
        assert_eq!(p.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_speed_never_exceeds_max() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut p = particle_at(100.0, 100.0, 0);
        for _ in 0..500 {
            let kick = random_unit(&mut rng) * rng.random_range(0.0..50.0);
            p.apply_force(kick);
            p.integrate(PHYSICS_FRICTION);
            assert!(p.velocity.length() <= p.max_speed + 1e-4);
        }
    }

    #[test]
    fn test_boundaries_contain_position() {
        let mut p = particle_at(-5.0, 1000.0, 0);
        p.velocity = Vec2::new(-2.0, 3.0);
        p.handle_boundaries(800.0, 600.0, EDGE_BOUNCE_DAMPING);
        assert_eq!(p.position.x, p.radius);
        assert_eq!(p.position.y, 600.0 - p.radius);
        // Velocity components reversed and damped
        assert!((p.velocity.x - 2.0 * EDGE_BOUNCE_DAMPING).abs() < 1e-5);
        assert!((p.velocity.y + 3.0 * EDGE_BOUNCE_DAMPING).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_every_behavior_respects_max_force(
            px in 0.0f32..800.0,
            py in 0.0f32..600.0,
            ox in 0.0f32..800.0,
            oy in 0.0f32..600.0,
            tx in 0.0f32..800.0,
            ty in 0.0f32..600.0,
            vx in -7.5f32..7.5,
            vy in -7.5f32..7.5,
        ) {
            let mut p = particle_at(px, py, 0);
            p.velocity = Vec2::new(vx, vy);
            let flock = vec![p.clone(), particle_at(ox, oy, 1)];
            let target = Vec2::new(tx, ty);

            let max = flock[0].max_force + 1e-4;
            prop_assert!(flock[0].flee(target, FLEE_RADIUS).length() <= max);
            prop_assert!(flock[0].cohesion(&flock, COHESION_RADIUS).length() <= max);
            prop_assert!(flock[0].separation(&flock, SEPARATION_RADIUS).length() <= max);
            prop_assert!(flock[0].align(&flock, ALIGN_RADIUS).length() <= max);
        }

        #[test]
        fn prop_boundaries_contain_any_position(
            px in -10_000.0f32..10_000.0,
            py in -10_000.0f32..10_000.0,
        ) {
            let mut p = particle_at(px, py, 0);
            p.handle_boundaries(800.0, 600.0, EDGE_BOUNCE_DAMPING);
            prop_assert!(p.position.x >= p.radius && p.position.x <= 800.0 - p.radius);
            prop_assert!(p.position.y >= p.radius && p.position.y <= 600.0 - p.radius);
        }
    }
}
