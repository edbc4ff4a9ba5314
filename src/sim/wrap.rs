//! Screen wraparound for free-flying bodies

use glam::Vec2;

use super::body::Body;

/// Re-enter a body that has fully left the play area on the opposite side
///
/// Only the axis the body is leaving is handled; a horizontal wrap suppresses
/// the vertical check for this call. The body lands flush with the opposite
/// edge (its trailing extent just inside), keeping velocity and orientation.
/// Returns true if the body was moved.
pub fn wrap_if_off_screen<K>(body: &mut Body<K>, area: Vec2) -> bool {
    let Some(velocity) = body.velocity else {
        return false;
    };

    let bounds = body.aabb_bounds();
    let center = body.center();

    let target = if bounds.right() <= 0.0 && velocity.x < 0.0 {
        Some(Vec2::new(area.x - (bounds.right() - center.x), center.y))
    } else if bounds.left() >= area.x && velocity.x > 0.0 {
        Some(Vec2::new(center.x - bounds.left(), center.y))
    } else if bounds.bottom() <= 0.0 && velocity.y < 0.0 {
        Some(Vec2::new(center.x, area.y - (bounds.bottom() - center.y)))
    } else if bounds.top() >= area.y && velocity.y > 0.0 {
        Some(Vec2::new(center.x, center.y - bounds.top()))
    } else {
        None
    };

    match target {
        Some(new_center) => {
            body.move_to(new_center);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EPSILON;

    fn square(center: Vec2, half: f32, velocity: Vec2) -> Body<()> {
        Body::polygon(
            (),
            center,
            vec![
                center + Vec2::new(-half, -half),
                center + Vec2::new(half, -half),
                center + Vec2::new(half, half),
                center + Vec2::new(-half, half),
            ],
        )
        .with_velocity(velocity)
    }

    #[test]
    fn test_wrap_left_to_right() {
        let area = Vec2::new(200.0, 100.0);
        let mut body = square(Vec2::new(-10.0, 50.0), 5.0, Vec2::new(-1.0, 0.0));
        let before = body.points();
        let old_center = body.center();

        assert!(wrap_if_off_screen(&mut body, area));
        assert!((body.center().x - (200.0 - 5.0)).abs() < EPSILON);
        assert!((body.center().y - 50.0).abs() < EPSILON);

        let delta = body.center() - old_center;
        for (a, b) in body.points().iter().zip(before.iter()) {
            assert!((*a - (*b + delta)).length() < EPSILON);
        }
        assert_eq!(body.velocity, Some(Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn test_partially_visible_body_stays() {
        let area = Vec2::new(200.0, 100.0);
        let mut body = square(Vec2::new(2.0, 50.0), 5.0, Vec2::new(-1.0, 0.0));
        assert!(!wrap_if_off_screen(&mut body, area));
        assert_eq!(body.center(), Vec2::new(2.0, 50.0));
    }

    #[test]
    fn test_no_wrap_when_moving_back_in() {
        let area = Vec2::new(200.0, 100.0);
        let mut body = square(Vec2::new(-10.0, 50.0), 5.0, Vec2::new(1.0, 0.0));
        assert!(!wrap_if_off_screen(&mut body, area));
    }

    #[test]
    fn test_wrap_bottom_to_top() {
        let area = Vec2::new(200.0, 100.0);
        let mut body = square(Vec2::new(50.0, 110.0), 5.0, Vec2::new(0.0, 2.0));
        assert!(wrap_if_off_screen(&mut body, area));
        assert!((body.center().y - 5.0).abs() < EPSILON);
        assert!((body.center().x - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_corner_exit_only_wraps_one_axis() {
        let area = Vec2::new(200.0, 100.0);
        // Off both the left and the top edge at once
        let mut body = square(Vec2::new(-10.0, -10.0), 5.0, Vec2::new(-1.0, -1.0));
        assert!(wrap_if_off_screen(&mut body, area));
        assert!((body.center().x - 195.0).abs() < EPSILON);
        assert!((body.center().y - -10.0).abs() < EPSILON);

        // The vertical exit is picked up on the next call
        assert!(wrap_if_off_screen(&mut body, area));
        assert!((body.center().y - 95.0).abs() < EPSILON);
    }

    #[test]
    fn test_static_body_never_wraps() {
        let area = Vec2::new(200.0, 100.0);
        let mut body: Body<()> = Body::aabb((), Vec2::new(-50.0, 50.0), Vec2::new(4.0, 4.0));
        assert!(!wrap_if_off_screen(&mut body, area));
    }
}
