//! Per-frame transform composition.
//!
//! Turns elapsed time and camera state into the uniform block consumed by
//! `shaders/cube.wgsl`. Nothing here touches the GPU; [`super::Renderer`]
//! uploads the result.

use glam::{Mat4, Vec4};

use super::camera::Camera;

/// Spin rate of the cube around the world Y axis.
pub const DEGREES_PER_SECOND: f32 = 50.0;

/// Uniform data sent to shaders. Field order matches `FrameUniforms` in WGSL.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub cube_color: [f32; 4],
}

impl FrameUniforms {
    pub fn new() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            cube_color: [1.0; 4],
        }
    }

    /// Build the uniforms for one frame.
    ///
    /// # Arguments
    ///
    /// * `camera` - Source of the view and projection matrices
    /// * `elapsed` - Seconds since startup; drives the spin and the tint
    /// * `aspect` - Viewport width divided by height
    pub fn compose(camera: &Camera, elapsed: f64, aspect: f32) -> Self {
        Self {
            model: model_matrix(elapsed).to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix(aspect).to_cols_array_2d(),
            cube_color: cube_color(elapsed).to_array(),
        }
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotation about +Y at a constant angular velocity, independent of the camera.
pub fn model_matrix(elapsed: f64) -> Mat4 {
    Mat4::from_rotation_y((elapsed as f32 * DEGREES_PER_SECOND).to_radians())
}

/// Time-varying tint: red and green oscillate in [0, 1] out of phase.
pub fn cube_color(elapsed: f64) -> Vec4 {
    let red = (elapsed.sin() / 2.0 + 0.5) as f32;
    let green = ((elapsed + 10.0).sin() / 2.0 + 0.5) as f32;
    Vec4::new(red, green, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_model_identity_at_start() {
        assert_eq!(model_matrix(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn test_model_half_turn() {
        // 3.6s * 50 deg/s = 180 deg
        let model = model_matrix(3.6);
        let expected = Mat4::from_rotation_y(std::f32::consts::PI);
        assert!(model.abs_diff_eq(expected, 1e-5));

        let p = model.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_color_at_start() {
        let color = cube_color(0.0);
        assert!((color.x - 0.5).abs() < 1e-6);
        assert!((color.y - 0.228).abs() < 1e-3);
        assert_eq!(color.z, 0.0);
        assert_eq!(color.w, 1.0);
    }

    #[test]
    fn test_color_stays_in_range() {
        for i in 0..200 {
            let c = cube_color(i as f64 * 0.37);
            assert!((0.0..=1.0).contains(&c.x));
            assert!((0.0..=1.0).contains(&c.y));
        }
    }

    #[test]
    fn test_compose_uses_camera() {
        let mut camera = Camera::new();
        camera.rotate_around_y_axis(0.4);

        let uniforms = FrameUniforms::compose(&camera, 0.0, 4.0 / 3.0);

        assert_eq!(uniforms.model, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(uniforms.view, camera.view_matrix().to_cols_array_2d());
        assert_eq!(
            uniforms.projection,
            camera.projection_matrix(4.0 / 3.0).to_cols_array_2d()
        );
        assert_eq!(uniforms.cube_color[3], 1.0);
    }

    #[test]
    fn test_uniform_layout() {
        // 3 mat4x4<f32> + vec4<f32>
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 208);
    }
}
