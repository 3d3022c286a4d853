//! Car-vs-car contact and head-hit detection
//!
//! Cars are treated as circles of radius `half_size` for contact. Overlap is
//! corrected symmetrically, then an equal-mass restitution impulse is applied
//! along the contact normal only.

use glam::Vec2;

use super::state::Car;
use crate::tuning::Tuning;

/// Floor for centre distance before normalizing
const MIN_SEPARATION: f32 = 1e-6;

/// Result of a pair contact check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the cars overlap past the allowed margin
    pub hit: bool,
    /// Unit normal from the first car toward the second
    pub normal: Vec2,
    /// How far inside the allowed distance the cars are
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check whether two circles overlap by more than `allowed_overlap`
pub fn circle_contact(
    a_pos: Vec2,
    a_radius: f32,
    b_pos: Vec2,
    b_radius: f32,
    allowed_overlap: f32,
) -> CollisionResult {
    let delta = b_pos - a_pos;
    let dist = delta.length().max(MIN_SEPARATION);
    let target = a_radius + b_radius - allowed_overlap;

    if dist >= target {
        return CollisionResult::miss();
    }

    // Coincident centres: separate sideways
    let normal = if dist > MIN_SEPARATION {
        delta / dist
    } else {
        Vec2::X
    };
    CollisionResult {
        hit: true,
        normal,
        penetration: target - dist,
    }
}

/// Push overlapping cars apart and bounce them off each other.
///
/// Returns the contact (if any) and the impulse magnitude applied (0 when the
/// cars were already separating).
pub fn resolve_car_pair(cars: &mut [Car; 2], tuning: &Tuning) -> Option<(CollisionResult, f32)> {
    let [a, b] = cars;
    let contact = circle_contact(
        a.pos,
        a.half_size(),
        b.pos,
        b.half_size(),
        tuning.allowed_overlap,
    );
    if !contact.hit {
        return None;
    }

    let n = contact.normal;
    let correction = n * (contact.penetration * 0.5);
    a.pos -= correction;
    b.pos += correction;

    // Relative velocity along the normal; negative means closing
    let closing = (b.vel - a.vel).dot(n);
    let mut impulse = 0.0;
    if closing < 0.0 {
        // Unit masses: 1/m_a + 1/m_b = 2
        impulse = -(1.0 + tuning.restitution) * closing / 2.0;
        a.vel -= n * impulse;
        b.vel += n * impulse;
    }

    Some((contact, impulse))
}

/// Does `attacker`'s head circle touch `defender`'s body? Touching exactly is a miss.
pub fn head_hit(attacker: &Car, defender: &Car, tuning: &Tuning) -> bool {
    let reach = attacker.head_radius(tuning) + defender.half_size() * tuning.body_hit_fraction;
    attacker.head_center(tuning).distance(defender.pos) < reach
}

/// First scoring contact as `(attacker, defender)`, car 0 checked first
pub fn find_head_hit(cars: &[Car; 2], tuning: &Tuning) -> Option<(usize, usize)> {
    [(0, 1), (1, 0)]
        .into_iter()
        .find(|&(attacker, defender)| head_hit(&cars[attacker], &cars[defender], tuning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CarProfile;
    use proptest::prelude::*;

    fn car_at(x: f32, y: f32) -> Car {
        let mut car = Car::new("car", CarProfile::red());
        car.pos = Vec2::new(x, y);
        car
    }

    fn pair(a: Vec2, b: Vec2) -> [Car; 2] {
        [car_at(a.x, a.y), car_at(b.x, b.y)]
    }

    #[test]
    fn test_circle_contact_respects_allowed_overlap() {
        // radii 28 + 28 - 6 = 50
        assert!(!circle_contact(Vec2::ZERO, 28.0, Vec2::new(52.0, 0.0), 28.0, 6.0).hit);
        assert!(!circle_contact(Vec2::ZERO, 28.0, Vec2::new(50.0, 0.0), 28.0, 6.0).hit);
        let c = circle_contact(Vec2::ZERO, 28.0, Vec2::new(45.0, 0.0), 28.0, 6.0);
        assert!(c.hit);
        assert!((c.penetration - 5.0).abs() < 1e-5);
        assert!((c.normal - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_stacked_cars_separate_to_exact_distance() {
        let tuning = Tuning::default();
        // A at rest directly above B, well inside the margin
        let mut cars = pair(Vec2::new(300.0, 200.0), Vec2::new(300.0, 230.0));
        let target = cars[0].half_size() + cars[1].half_size() - tuning.allowed_overlap;

        let (_, impulse) = resolve_car_pair(&mut cars, &tuning).unwrap();
        assert_eq!(impulse, 0.0);
        let dist = cars[0].pos.distance(cars[1].pos);
        assert!((dist - target).abs() < 1e-4, "dist {dist} target {target}");
        // Symmetric: midpoint unchanged
        assert!(((cars[0].pos.y + cars[1].pos.y) / 2.0 - 215.0).abs() < 1e-4);
    }

    #[test]
    fn test_closing_cars_exchange_momentum() {
        let tuning = Tuning::default();
        let mut cars = pair(Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0));
        cars[0].vel = Vec2::new(5.0, 1.0);
        cars[1].vel = Vec2::new(-5.0, -1.0);

        let (_, impulse) = resolve_car_pair(&mut cars, &tuning).unwrap();
        assert!(impulse > 0.0);
        // e = 0.8: normal speeds reverse and shrink
        assert!((cars[0].vel.x - (-4.0)).abs() < 1e-4);
        assert!((cars[1].vel.x - 4.0).abs() < 1e-4);
        // Tangential components untouched
        assert_eq!(cars[0].vel.y, 1.0);
        assert_eq!(cars[1].vel.y, -1.0);
        // Momentum conserved
        assert!((cars[0].vel + cars[1].vel).length() < 1e-4);
    }

    #[test]
    fn test_separating_cars_get_no_impulse() {
        let tuning = Tuning::default();
        let mut cars = pair(Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0));
        cars[0].vel = Vec2::new(-2.0, 0.0);
        cars[1].vel = Vec2::new(2.0, 0.0);

        let (_, impulse) = resolve_car_pair(&mut cars, &tuning).unwrap();
        assert_eq!(impulse, 0.0);
        assert_eq!(cars[0].vel, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn test_coincident_cars_still_separate() {
        let tuning = Tuning::default();
        let mut cars = pair(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0));
        resolve_car_pair(&mut cars, &tuning).unwrap();
        let dist = cars[0].pos.distance(cars[1].pos);
        assert!(dist.is_finite());
        assert!(dist > 49.0);
    }

    #[test]
    fn test_head_hit_boundary_is_strict() {
        // Fractions of 28 chosen to be exact in f32: offset 14, head 7, body 21
        let tuning = Tuning {
            head_offset_fraction: 0.5,
            head_radius_fraction: 0.25,
            body_hit_fraction: 0.75,
            ..Tuning::default()
        };
        let attacker = car_at(0.0, 0.0);
        let head = attacker.head_center(&tuning);
        let reach = attacker.head_radius(&tuning) + attacker.half_size() * tuning.body_hit_fraction;

        // Defender directly above the head
        let touching = car_at(head.x, head.y - reach);
        assert!(!head_hit(&attacker, &touching, &tuning));

        let inside = car_at(head.x, head.y - reach + 0.01);
        assert!(head_hit(&attacker, &inside, &tuning));
    }

    #[test]
    fn test_car_landing_on_head_credits_the_car_underneath() {
        let tuning = Tuning::default();
        // Car 1 sits on car 0's roof
        let cars = pair(Vec2::new(500.0, 400.0), Vec2::new(500.0, 350.0));
        assert_eq!(find_head_hit(&cars, &tuning), Some((0, 1)));

        let swapped = pair(Vec2::new(500.0, 350.0), Vec2::new(500.0, 400.0));
        assert_eq!(find_head_hit(&swapped, &tuning), Some((1, 0)));
    }

    #[test]
    fn test_side_by_side_is_not_a_head_hit() {
        let tuning = Tuning::default();
        let cars = pair(Vec2::new(500.0, 400.0), Vec2::new(550.0, 400.0));
        assert_eq!(find_head_hit(&cars, &tuning), None);
    }

    proptest! {
        #[test]
        fn no_persistent_penetration(
            ax in 0.0f32..200.0, ay in 0.0f32..200.0,
            bx in 0.0f32..200.0, by in 0.0f32..200.0,
            avx in -10.0f32..10.0, bvx in -10.0f32..10.0,
        ) {
            let tuning = Tuning::default();
            let mut cars = pair(Vec2::new(ax, ay), Vec2::new(bx, by));
            cars[0].vel.x = avx;
            cars[1].vel.x = bvx;
            let target = cars[0].half_size() + cars[1].half_size() - tuning.allowed_overlap;

            resolve_car_pair(&mut cars, &tuning);
            prop_assert!(cars[0].pos.distance(cars[1].pos) >= target - 1e-3);
        }
    }
}
