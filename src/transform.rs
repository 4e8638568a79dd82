//! Model/view/projection matrix math for the fixed demo scene.
//!
//! The scene transform is composed exactly once at startup: a model matrix
//! (scale, 90 degree rotation about Y, translation), a fixed camera
//! translated back along Z and a perspective projection derived from the
//! initial surface size. The combined matrix is uploaded to a uniform
//! buffer and never rewritten, so resizing the window does not change the
//! projection.

use cgmath::{Deg, Matrix4, Rad, Vector3, perspective};

/// wgpu clip space has z in [0, 1] while cgmath produces OpenGL-style
/// [-1, 1], so every projection is post-multiplied by this correction.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Perspective projection parameters, fixed at startup from the initial
/// surface size.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fovy: impl Into<Rad<f32>>, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Model matrix: translation * rotation * scale, in that order.
pub fn model_matrix(scale: f32, rotation_y: Deg<f32>, translation: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(translation)
        * Matrix4::from_angle_y(rotation_y)
        * Matrix4::from_scale(scale)
}

/// View matrix for a camera fixed at `position`, looking down -Z.
pub fn view_matrix(position: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(position)
}

/// The combined transform for the demo scene: the model scaled by 1,
/// rotated 90 degrees about Y and lowered by 10 units, seen from a camera
/// 50 units back, projected with a 1 radian vertical field of view.
pub fn demo_mvp(aspect_width: u32, aspect_height: u32) -> Matrix4<f32> {
    let model = model_matrix(1.0, Deg(90.0), Vector3::new(0.0, -10.0, 0.0));
    let view = view_matrix(Vector3::new(0.0, 0.0, -50.0));
    let projection = Projection::new(aspect_width, aspect_height, Rad(1.0), 0.1, 100.0);
    projection.calc_matrix() * view * model
}

/// The single uniform block handed to the vertex shader. Written once at
/// startup, read-only afterwards.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub mvp: [[f32; 4]; 4],
}

impl Uniforms {
    pub fn new(mvp: Matrix4<f32>) -> Self {
        Self { mvp: mvp.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_matrix_eq(actual: Matrix4<f32>, expected: [[f32; 4]; 4]) {
        let actual: [[f32; 4]; 4] = actual.into();
        for (c, col) in expected.iter().enumerate() {
            for (r, want) in col.iter().enumerate() {
                let got = actual[c][r];
                assert!(
                    (got - want).abs() < EPS,
                    "mismatch at column {c} row {r}: got {got}, want {want}"
                );
            }
        }
    }

    #[test]
    fn demo_mvp_matches_golden_values() {
        // scale = 1, rotation = 90 deg about Y, translation = (0, -10, 0),
        // camera at (0, 0, -50), near = 0.1, far = 100, fovy = 1 rad,
        // aspect = 600 / 300 = 2.0. Columns in cgmath order.
        let expected = [
            [0.0, 0.0, 1.001_001, 1.0],
            [0.0, 1.830_487_7, 0.0, 0.0],
            [0.915_243_9, 0.0, 0.0, 0.0],
            [0.0, -18.304_877, 49.949_95, 50.0],
        ];
        assert_matrix_eq(demo_mvp(600, 300), expected);
    }

    #[test]
    fn projection_depth_range_is_zero_to_one() {
        let projection = Projection::new(600, 300, Rad(1.0), 0.1, 100.0);
        let m = projection.calc_matrix();

        // A point on the near plane lands at z/w = 0, on the far plane at 1.
        let near = m * cgmath::Vector4::new(0.0, 0.0, -0.1, 1.0);
        let far = m * cgmath::Vector4::new(0.0, 0.0, -100.0, 1.0);
        assert!((near.z / near.w).abs() < EPS);
        assert!((far.z / far.w - 1.0).abs() < EPS);
    }

    #[test]
    fn model_matrix_rotates_about_y() {
        let m = model_matrix(1.0, Deg(90.0), Vector3::new(0.0, 0.0, 0.0));
        // +X maps to -Z under a 90 degree yaw.
        let p = m * cgmath::Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(p.x.abs() < EPS);
        assert!((p.z + 1.0).abs() < EPS);
    }
}
