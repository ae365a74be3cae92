//! End-to-end turtle behaviour on the default 650x400 surface

use approx::assert_abs_diff_eq;
use turtle_core::{
    Canvas, ClampAlgorithm, DrawingSurface, EPSILON, MovementPolicy, Point, TurtleCommand,
    TurtleConfig, TurtleError, Vector,
};

type Turtle = turtle_core::Turtle<Canvas>;

fn default_turtle() -> Turtle {
    TurtleConfig::default().build_turtle()
}

#[test]
fn test_clamped_forward_past_right_edge() {
    let mut turtle = default_turtle().with_policy(MovementPolicy::Clamped);
    turtle.forward(400.0).unwrap();
    assert_eq!(turtle.position(), Point::new(325.0, 0.0));
    assert_eq!(turtle.heading(), Vector::UNIT);
}

#[test]
fn test_strict_forward_emits_one_segment() {
    let mut turtle = default_turtle();
    turtle.pen_down();
    turtle.forward(100.0).unwrap();

    assert_eq!(turtle.position(), Point::new(100.0, 0.0));
    assert_eq!(turtle.heading(), Vector::UNIT);
    let segments = turtle.surface().segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].from, Point::new(0.0, 0.0));
    assert_eq!(segments[0].to, Point::new(100.0, 0.0));
}

#[test]
fn test_turn_left_quarter_from_unit_heading() {
    let mut turtle = default_turtle();
    turtle.turn_left(90.0).unwrap();
    assert_abs_diff_eq!(turtle.heading().dx, 0.0, epsilon = EPSILON);
    assert_abs_diff_eq!(turtle.heading().dy, 1.0, epsilon = EPSILON);
}

#[test]
fn test_negative_forward_leaves_state_unchanged() {
    let mut turtle = default_turtle();
    turtle.pen_down();
    let result = turtle.forward(-5.0);

    assert!(matches!(result, Err(TurtleError::InvalidArgument { .. })));
    assert_eq!(turtle.position(), Point::ORIGIN);
    assert_eq!(turtle.heading(), Vector::UNIT);
    assert!(turtle.is_pen_down());
}

#[test]
fn test_strict_moves_either_fail_cleanly_or_travel_exactly() {
    let headings = [0.0, 17.0, 45.0, 90.0, 133.0, 180.0, 241.0, 300.0, 359.0];
    let distances = [0.0, 1.0, 50.0, 199.0, 200.0, 250.0, 325.0, 400.0, 1000.0];

    for &angle in &headings {
        for &distance in &distances {
            let mut turtle = default_turtle();
            turtle.turn_left(angle).unwrap();
            let before = (turtle.position(), turtle.heading(), turtle.is_pen_down());

            match turtle.forward(distance) {
                Err(TurtleError::OutOfBounds { .. }) => {
                    assert_eq!(
                        (turtle.position(), turtle.heading(), turtle.is_pen_down()),
                        before
                    );
                }
                Err(e) => panic!("unexpected error for {} at {}: {}", distance, angle, e),
                Ok(()) => {
                    let moved = turtle.position() - before.0;
                    assert_eq!(turtle.heading(), before.1);
                    assert_abs_diff_eq!(moved.magnitude(), distance, epsilon = 1e-9);
                    assert!(moved.is_collinear(before.1, 1e-9));
                    assert!(turtle.is_visible());
                }
            }
        }
    }
}

#[test]
fn test_clamped_moves_always_stay_visible() {
    for step in 0..72 {
        let mut turtle = default_turtle().with_policy(MovementPolicy::Clamped);
        turtle.turn_left(step as f64 * 5.0).unwrap();
        turtle.forward(10_000.0).unwrap();
        assert!(
            turtle.is_visible(),
            "heading {} left the surface at {}",
            step * 5,
            turtle.position()
        );
        assert!(
            turtle.forward(10.0).is_ok(),
            "turtle on the edge must accept a further clamped move"
        );
        assert!(turtle.is_visible());
    }
}

#[test]
fn test_clamped_displacement_visible_for_single_axis_overflow() {
    let turtle = default_turtle().with_clamp(ClampAlgorithm::FirstAxis);
    let bounds = turtle.surface().visibility_bounds();

    for direction in [
        Vector::new(1.0, 0.0),
        Vector::new(-1.0, 0.0),
        Vector::new(0.0, 1.0),
        Vector::new(0.0, -1.0),
        Vector::new(0.9, 0.1).normalized().unwrap(),
    ] {
        let displacement = turtle.clamped_displacement(600.0, direction);
        assert!(bounds.contains(turtle.position() + displacement));
    }
}

#[test]
fn test_round_trip_without_clamping() {
    let mut turtle = default_turtle().with_policy(MovementPolicy::Clamped);
    turtle.turn_right(60.0).unwrap();
    turtle.forward(150.0).unwrap();
    turtle.backward(150.0).unwrap();
    assert!(turtle.position().distance(Point::ORIGIN) < 1e-9);
}

#[test]
fn test_full_rotation_and_turn_pairs() {
    assert!(Vector::UNIT.rotated(360.0).approx_eq(Vector::UNIT, EPSILON));

    for angle in [0.0, 1.0, 45.0, 90.0, 180.0, 270.0, 359.0, 720.0, 1234.5] {
        let mut turtle = default_turtle();
        turtle.turn_left(angle).unwrap();
        turtle.turn_right(angle).unwrap();
        assert!(
            turtle.heading().approx_eq(Vector::UNIT, 1e-9),
            "angle {} gave {}",
            angle,
            turtle.heading()
        );
    }
}

#[test]
fn test_segment_and_redraw_accounting() {
    let mut turtle = default_turtle();

    turtle.forward(10.0).unwrap();
    turtle.backward(10.0).unwrap();
    assert_eq!(turtle.surface().segments().len(), 0);
    assert_eq!(turtle.surface().redraw_count(), 2);

    turtle.pen_down();
    turtle.forward(10.0).unwrap();
    turtle.forward(10.0).unwrap();
    turtle.go_to(Point::new(0.0, 50.0)).unwrap();
    assert_eq!(turtle.surface().segments().len(), 3);
    assert_eq!(turtle.surface().redraw_count(), 2);
}

#[test]
fn test_session_runs_a_script() {
    let mut session = TurtleConfig::default().build_session();
    let script = ["pendown", "fd 100", "lt 90", "fd 100", "goto 0 0"];
    for line in script {
        let command: TurtleCommand = line.parse().unwrap();
        session.queue(command);
    }
    assert!(session.process_pending().is_empty());

    assert_eq!(session.segments().len(), 3);
    assert!(session.position().distance(Point::ORIGIN) < 1e-9);
    assert_abs_diff_eq!(
        session.canvas().ink_length(),
        200.0 + 100.0 * 2f64.sqrt(),
        epsilon = 1e-9
    );
}
