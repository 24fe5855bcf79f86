//! Apply-functions for the built-in geometry payloads.
//!
//! Each takes the payload and the transform resolved for it and returns the
//! payload re-expressed in the transform's target frame. The output header is
//! the transform's header (target frame, transform stamp).

use nalgebra as na;

use super::msg::{
    Point, PointStamped, Pose, PoseStamped, Quaternion, Transform, TransformStamped, Vector3,
    Vector3Stamped,
};

fn rotation(q: &Quaternion) -> na::UnitQuaternion<f64> {
    na::UnitQuaternion::new_normalize(na::Quaternion::new(q.w, q.x, q.y, q.z))
}

fn translation(v: &Vector3) -> na::Vector3<f64> {
    na::Vector3::new(v.x, v.y, v.z)
}

fn to_vector3(v: na::Vector3<f64>) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

fn to_point(v: na::Vector3<f64>) -> Point {
    Point::new(v.x, v.y, v.z)
}

// Payload orientations are composed without renormalizing them.
fn compose(tf: &Quaternion, q: &Quaternion) -> Quaternion {
    let product = rotation(tf).into_inner() * na::Quaternion::new(q.w, q.x, q.y, q.z);
    Quaternion::new(product.i, product.j, product.k, product.w)
}

fn apply(tf: &Transform, v: na::Vector3<f64>) -> na::Vector3<f64> {
    rotation(&tf.rotation) * v + translation(&tf.translation)
}

fn apply_point(tf: &Transform, p: &Point) -> Point {
    to_point(apply(tf, na::Vector3::new(p.x, p.y, p.z)))
}

pub fn do_transform_point(point: &PointStamped, transform: &TransformStamped) -> PointStamped {
    PointStamped {
        header: transform.header.clone(),
        point: apply_point(&transform.transform, &point.point),
    }
}

/// Vectors are directions: only the rotation applies.
pub fn do_transform_vector3(vector: &Vector3Stamped, transform: &TransformStamped) -> Vector3Stamped {
    let v = &vector.vector;
    let rotated = rotation(&transform.transform.rotation) * na::Vector3::new(v.x, v.y, v.z);
    Vector3Stamped {
        header: transform.header.clone(),
        vector: to_vector3(rotated),
    }
}

pub fn do_transform_pose(pose: &PoseStamped, transform: &TransformStamped) -> PoseStamped {
    let tf = &transform.transform;
    PoseStamped {
        header: transform.header.clone(),
        pose: Pose {
            position: apply_point(tf, &pose.pose.position),
            orientation: compose(&tf.rotation, &pose.pose.orientation),
        },
    }
}

/// Re-parents `input` into the transform's target frame, keeping its child frame.
pub fn do_transform_transform(
    input: &TransformStamped,
    transform: &TransformStamped,
) -> TransformStamped {
    let tf = &transform.transform;
    TransformStamped {
        header: transform.header.clone(),
        child_frame_id: input.child_frame_id.clone(),
        transform: Transform {
            translation: to_vector3(apply(tf, translation(&input.transform.translation))),
            rotation: compose(&tf.rotation, &input.transform.rotation),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tf::msg::Header;
    use crate::tf::time::Time;
    use std::f64::consts::FRAC_1_SQRT_2;

    const EPS: f64 = 1e-9;

    fn tf(translation: Vector3, rotation: Quaternion) -> TransformStamped {
        TransformStamped {
            header: Header::new("map", Time::new(10, 0)),
            child_frame_id: "base_link".into(),
            transform: Transform {
                translation,
                rotation,
            },
        }
    }

    // 90 degrees about +z
    fn yaw_90() -> Quaternion {
        Quaternion::new(0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2)
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn point_is_rotated_then_translated() {
        let input = PointStamped {
            header: Header::new("base_link", Time::new(3, 0)),
            point: Point::new(1.0, 0.0, 0.0),
        };
        let out = do_transform_point(&input, &tf(Vector3::new(1.0, 2.0, 3.0), yaw_90()));

        assert_eq!(out.header.frame_id, "map");
        assert_eq!(out.header.stamp, Time::new(10, 0));
        assert_close(out.point.x, 1.0);
        assert_close(out.point.y, 3.0);
        assert_close(out.point.z, 3.0);
    }

    #[test]
    fn vector_ignores_translation() {
        let input = Vector3Stamped {
            header: Header::new("base_link", Time::ZERO),
            vector: Vector3::new(1.0, 0.0, 0.0),
        };
        let out = do_transform_vector3(&input, &tf(Vector3::new(5.0, 5.0, 5.0), yaw_90()));

        assert_close(out.vector.x, 0.0);
        assert_close(out.vector.y, 1.0);
        assert_close(out.vector.z, 0.0);
    }

    #[test]
    fn pose_orientation_is_composed() {
        let input = PoseStamped {
            header: Header::new("base_link", Time::ZERO),
            pose: Pose {
                position: Point::new(0.0, 1.0, 0.0),
                orientation: yaw_90(),
            },
        };
        let out = do_transform_pose(&input, &tf(Vector3::new(0.0, 0.0, 0.0), yaw_90()));

        assert_close(out.pose.position.x, -1.0);
        assert_close(out.pose.position.y, 0.0);
        // two quarter turns about z
        assert_close(out.pose.orientation.z.abs(), 1.0);
        assert_close(out.pose.orientation.w, 0.0);
    }

    #[test]
    fn transform_is_reparented_and_keeps_child() {
        let input = TransformStamped {
            header: Header::new("odom", Time::ZERO),
            child_frame_id: "laser".into(),
            transform: Transform {
                translation: Vector3::new(1.0, 0.0, 0.0),
                rotation: Quaternion::IDENTITY,
            },
        };
        let out = do_transform_transform(&input, &tf(Vector3::new(0.0, 0.0, 1.0), yaw_90()));

        assert_eq!(out.header.frame_id, "map");
        assert_eq!(out.child_frame_id, "laser");
        assert_close(out.transform.translation.x, 0.0);
        assert_close(out.transform.translation.y, 1.0);
        assert_close(out.transform.translation.z, 1.0);
        assert_close(out.transform.rotation.z, FRAC_1_SQRT_2);
    }

    #[test]
    fn identity_transform_leaves_values_unchanged() {
        let identity = TransformStamped {
            header: Header::new("base_link", Time::new(3, 0)),
            child_frame_id: "base_link".into(),
            transform: Transform::IDENTITY,
        };
        let input = PoseStamped {
            header: Header::new("base_link", Time::new(3, 0)),
            pose: Pose {
                position: Point::new(0.5, -2.0, 7.25),
                orientation: Quaternion::new(0.0, 0.0, 1.0, 0.0),
            },
        };

        assert_eq!(do_transform_pose(&input, &identity), input);
    }
}
