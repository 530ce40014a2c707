//! Vertex data in normalized device coordinates.

use glam::Vec3;

pub const TRIANGLE: [Vec3; 3] = [
    Vec3::new(0.0, 0.5, 0.0),
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
];

pub const LEFT_TRIANGLE: [Vec3; 3] = [
    Vec3::new(-0.5, 0.5, 0.0),
    Vec3::new(-1.0, -0.5, 0.0),
    Vec3::new(0.0, -0.5, 0.0),
];

pub const RIGHT_TRIANGLE: [Vec3; 3] = [
    Vec3::new(0.0, -0.5, 0.0),
    Vec3::new(0.5, 0.5, 0.0),
    Vec3::new(1.0, -0.5, 0.0),
];

pub const RECTANGLE: [Vec3; 4] = [
    Vec3::new(0.5, 0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(-0.5, 0.5, 0.0),
    Vec3::new(-0.5, -0.5, 0.0),
];

/// Two triangles sharing the rectangle's diagonal.
pub const RECTANGLE_INDICES: [u32; 6] = [
    0, 1, 2, //
    3, 1, 2,
];
