use glam::{DQuat, DVec3};

/// Displacements shorter than this are treated as no movement.
pub const DISPLACEMENT_EPSILON: f64 = 1e-12;

/// Cross products shorter than this have no usable rotation axis.
pub const AXIS_EPSILON: f64 = 1e-9;

/// Numeric edge case hit while tracking a frame.
///
/// All of these are recovered locally; the frame still produces a valid
/// forward vector and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// Old and new positions coincide. Forward and orientation were held.
    DegenerateDisplacement,
    /// Previous and new forward are parallel or anti-parallel, so the cross
    /// product has no direction. Forward was updated, rotation skipped.
    DegenerateRotationAxis,
    /// The dot product drifted outside `[-1, 1]` and was clamped before
    /// `acos`. The rotation was still applied.
    OutOfDomainDotProduct,
}

/// Result of one tracker update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationStep {
    /// Unit direction of travel after this frame.
    pub forward: DVec3,
    /// Accumulated orientation after this frame (unit quaternion).
    pub orientation: DQuat,
    /// Edge case recovered during this frame, if any.
    pub degeneracy: Option<Degeneracy>,
}

/// Keeps a body's forward axis aligned with its direction of travel by
/// composing per-frame turn rotations onto a running orientation.
///
/// Only local information is used: the previous forward vector and the last
/// displacement. Roll accumulated over earlier frames is preserved because
/// each delta is pre-multiplied onto the existing orientation instead of
/// recomputing an absolute orientation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationTracker;

impl OrientationTracker {
    /// Create a tracker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Advance one frame.
    ///
    /// The rotation axis is `previous_forward × new_forward`, so turning from
    /// `+Z` towards `+X` rotates about `+Y`.
    #[must_use]
    pub fn update(
        &self,
        previous_forward: DVec3,
        new_position: DVec3,
        old_position: DVec3,
        current_orientation: DQuat,
    ) -> OrientationStep {
        let displacement = new_position - old_position;
        let new_forward = if displacement.length() <= DISPLACEMENT_EPSILON {
            None
        } else {
            displacement.try_normalize()
        };
        let Some(new_forward) = new_forward else {
            return OrientationStep {
                forward: previous_forward,
                orientation: current_orientation,
                degeneracy: Some(Degeneracy::DegenerateDisplacement),
            };
        };

        let axis = previous_forward.cross(new_forward);
        if axis.length() < AXIS_EPSILON {
            return OrientationStep {
                forward: new_forward,
                orientation: current_orientation,
                degeneracy: Some(Degeneracy::DegenerateRotationAxis),
            };
        }
        let axis = axis.normalize();

        let dot = previous_forward.dot(new_forward);
        let clamped = dot.clamp(-1.0, 1.0);
        let angle = clamped.acos();

        let delta = DQuat::from_axis_angle(axis, angle);
        let orientation = (delta * current_orientation).normalize();

        OrientationStep {
            forward: new_forward,
            orientation,
            degeneracy: (clamped != dot)
                .then_some(Degeneracy::OutOfDomainDotProduct),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    const EPS: f64 = 1e-12;

    fn tracker() -> OrientationTracker {
        OrientationTracker::new()
    }

    #[test]
    fn zero_motion_is_exactly_idempotent() {
        let forward = DVec3::new(0.6, 0.0, 0.8);
        let orientation = DQuat::from_rotation_y(0.3);
        let p = DVec3::new(1.0, 2.0, 3.0);

        let step = tracker().update(forward, p, p, orientation);

        assert_eq!(step.forward, forward);
        assert_eq!(step.orientation, orientation);
        assert_eq!(step.degeneracy, Some(Degeneracy::DegenerateDisplacement));
    }

    #[test]
    fn straight_line_motion_injects_no_rotation() {
        let orientation = DQuat::from_rotation_x(0.25);
        let step = tracker().update(
            DVec3::Z,
            DVec3::new(0.0, 0.0, 5.0),
            DVec3::new(0.0, 0.0, 4.0),
            orientation,
        );

        assert_eq!(step.orientation, orientation);
        assert!(step.forward.abs_diff_eq(DVec3::Z, EPS));
        assert_eq!(step.degeneracy, Some(Degeneracy::DegenerateRotationAxis));
    }

    #[test]
    fn reversal_updates_forward_but_skips_rotation() {
        let step = tracker().update(
            DVec3::Z,
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::ZERO,
            DQuat::IDENTITY,
        );

        assert!(step.forward.abs_diff_eq(DVec3::NEG_Z, EPS));
        assert_eq!(step.orientation, DQuat::IDENTITY);
        assert_eq!(step.degeneracy, Some(Degeneracy::DegenerateRotationAxis));
    }

    #[test]
    fn quarter_turn_rotates_about_positive_y() {
        let step = tracker().update(
            DVec3::Z,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::ZERO,
            DQuat::IDENTITY,
        );

        let (axis, angle) = step.orientation.to_axis_angle();
        assert!((angle - FRAC_PI_2).abs() < 1e-9, "angle {angle}");
        assert!(axis.abs_diff_eq(DVec3::Y, 1e-9), "axis {axis}");
        assert!((step.orientation * DVec3::Z).abs_diff_eq(DVec3::X, 1e-9));
        assert_eq!(step.degeneracy, None);
    }

    #[test]
    fn delta_is_premultiplied() {
        // The turn is applied after the existing roll, in world space:
        // delta * current, not current * delta.
        let rolled = DQuat::from_rotation_z(0.4);
        let step = tracker().update(
            DVec3::Z,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::ZERO,
            rolled,
        );

        let expected = DQuat::from_rotation_y(FRAC_PI_2) * rolled;
        assert!(step.orientation.abs_diff_eq(expected, 1e-9));
    }

    #[test]
    fn overlong_dot_is_clamped_before_acos() {
        // A slightly non-unit previous forward pushes the dot past 1 while
        // the cross product is still long enough to give an axis.
        let previous = DVec3::new(0.0, 0.0, 1.01);
        let new = DVec3::new(0.01_f64.sin(), 0.0, 0.01_f64.cos());
        assert!(previous.dot(new) > 1.0);
        assert!(previous.cross(new).length() >= AXIS_EPSILON);

        let step = tracker().update(previous, new, DVec3::ZERO, DQuat::IDENTITY);

        assert_eq!(step.degeneracy, Some(Degeneracy::OutOfDomainDotProduct));
        assert!(step.orientation.abs_diff_eq(DQuat::IDENTITY, EPS));
        assert!(step.orientation.is_finite());
        assert!(step.forward.abs_diff_eq(new, EPS));
    }

    #[test]
    fn forward_and_orientation_stay_unit_length() {
        let mut forward = DVec3::Z;
        let mut orientation = DQuat::IDENTITY;
        let mut old = DVec3::ZERO;
        for i in 1..500 {
            let t = f64::from(i) * 0.05;
            let new = DVec3::new(t.sin() * 3.0, (t * 0.7).sin(), t.cos() * 2.0);
            let step = tracker().update(forward, new, old, orientation);
            forward = step.forward;
            orientation = step.orientation;
            old = new;

            assert!((forward.length() - 1.0).abs() < 1e-9);
            assert!((orientation.length() - 1.0).abs() < 1e-9);
        }
    }
}
