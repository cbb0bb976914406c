use glam::{Mat4, Vec3};

/// Pitch is kept this far (radians) away from straight up/down so the view
/// direction never becomes parallel to the world up vector.
const PITCH_MARGIN: f32 = 0.1;

/// Construction-time camera state. [`Camera::reset`] restores exactly this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDefaults {
    /// Distance from target
    pub distance: f32,
    /// Horizontal rotation (radians)
    pub yaw: f32,
    /// Vertical rotation (radians)
    pub pitch: f32,
    /// Look-at target point
    pub target: Vec3,
    /// Field of view in degrees
    pub fov: f32,
    /// Closest the eye may get to the target
    pub min_distance: f32,
    /// Farthest the eye may get from the target
    pub max_distance: f32,
}

impl Default for CameraDefaults {
    fn default() -> Self {
        Self {
            distance: 5.0,
            yaw: 0.0,
            pitch: 0.0,
            target: Vec3::ZERO,
            fov: 45.0,
            min_distance: 1.0,
            max_distance: 50.0,
        }
    }
}

/// Orbit camera looking at `target` from a point on a sphere around it.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Distance from target, kept within `[min_distance, max_distance]`
    pub distance: f32,
    /// Horizontal rotation (radians), unbounded
    pub yaw: f32,
    /// Vertical rotation (radians), clamped
    pub pitch: f32,
    /// Look-at target point
    pub target: Vec3,
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    defaults: CameraDefaults,
}

impl Camera {
    pub fn new() -> Self {
        Self::with_defaults(CameraDefaults::default())
    }

    pub fn with_defaults(defaults: CameraDefaults) -> Self {
        let mut camera = Self {
            distance: defaults.distance,
            yaw: defaults.yaw,
            pitch: defaults.pitch,
            target: defaults.target,
            fov: defaults.fov,
            near: 0.1,
            far: 100.0,
            defaults,
        };
        camera.clamp();
        camera
    }

    /// Orbit horizontally. Positive deltas turn counter-clockwise seen from above.
    pub fn rotate_around_y_axis(&mut self, delta: f32) {
        self.yaw += delta;
    }

    /// Orbit vertically. The result is clamped short of the poles.
    pub fn rotate_around_x_axis(&mut self, delta: f32) {
        self.pitch += delta;
        self.clamp();
    }

    pub fn zoom_in(&mut self, amount: f32) {
        self.distance -= amount;
        self.clamp();
    }

    pub fn zoom_out(&mut self, amount: f32) {
        self.distance += amount;
        self.clamp();
    }

    /// Slide the whole orbit (target and eye together) along the view direction.
    pub fn move_forward(&mut self, amount: f32) {
        self.target += self.forward() * amount;
    }

    pub fn move_backward(&mut self, amount: f32) {
        self.target -= self.forward() * amount;
    }

    pub fn reset(&mut self) {
        *self = Self::with_defaults(self.defaults);
    }

    /// Calculate camera position from orbital parameters
    pub fn position(&self) -> Vec3 {
        self.target + self.orbit_offset()
    }

    /// Unit vector from the eye toward the target.
    pub fn forward(&self) -> Vec3 {
        -self.orbit_offset().normalize()
    }

    /// Build view matrix (camera transform)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Vertical field of view in degrees, as consumed by the projection.
    pub fn zoom(&self) -> f32 {
        self.fov
    }

    /// Build perspective projection matrix
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom().to_radians(), aspect, self.near, self.far)
    }

    fn orbit_offset(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        Vec3::new(x, y, z)
    }

    fn clamp(&mut self) {
        let max_pitch = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);
        self.distance = self
            .distance
            .clamp(self.defaults.min_distance, self.defaults.max_distance);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a:?} != {b:?}");
    }

    #[test]
    fn test_camera_default() {
        let camera = Camera::new();
        assert_eq!(camera.distance, 5.0);
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.zoom(), 45.0);
    }

    #[test]
    fn test_camera_position() {
        let camera = Camera::new();
        let pos = camera.position();
        // At yaw=0, pitch=0, camera should be on +Z axis
        assert!(pos.x.abs() < 0.001);
        assert!(pos.y.abs() < 0.001);
        assert!((pos.z - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_default_view_matrix() {
        let camera = Camera::new();
        let expected = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        assert_mat_eq(camera.view_matrix(), expected);
    }

    #[test]
    fn test_view_matrix_at_yaw_45_pitch_30() {
        let mut camera = Camera::new();
        camera.rotate_around_y_axis(45f32.to_radians());
        camera.rotate_around_x_axis(30f32.to_radians());

        // cos30 * sin45, sin30, cos30 * cos45, scaled by distance 5
        let c = 3f32.sqrt() / 2.0 * std::f32::consts::FRAC_1_SQRT_2;
        let eye = Vec3::new(5.0 * c, 2.5, 5.0 * c);
        assert!(camera.position().abs_diff_eq(eye, 1e-5));

        // Hand-built look-at: rows of the rotation are the camera basis
        let f = (-eye).normalize();
        let s = f.cross(Vec3::Y).normalize();
        let u = s.cross(f);
        let expected = Mat4::from_cols(
            glam::Vec4::new(s.x, u.x, -f.x, 0.0),
            glam::Vec4::new(s.y, u.y, -f.y, 0.0),
            glam::Vec4::new(s.z, u.z, -f.z, 0.0),
            glam::Vec4::new(-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0),
        );
        assert_mat_eq(camera.view_matrix(), expected);
    }

    #[test]
    fn test_pitch_stays_inside_poles() {
        let mut camera = Camera::new();
        for _ in 0..1000 {
            camera.rotate_around_x_axis(0.05);
            camera.rotate_around_y_axis(0.3);
        }
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        assert!(camera.forward().cross(Vec3::Y).length() > 1e-3);
        assert!(!camera.view_matrix().is_nan());

        for _ in 0..2000 {
            camera.rotate_around_x_axis(-0.05);
        }
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
        assert!(camera.forward().cross(Vec3::Y).length() > 1e-3);
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut camera = Camera::new();
        camera.rotate_around_y_axis(10.0);
        assert_eq!(camera.yaw, 10.0);
    }

    #[test]
    fn test_zoom_limits() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.zoom_in(1.0);
            assert!(camera.distance >= 1.0);
        }
        assert_eq!(camera.distance, 1.0);

        for _ in 0..100 {
            camera.zoom_out(1.0);
        }
        assert_eq!(camera.distance, 50.0);

        // Negative amounts still respect the floor
        camera.zoom_out(-1000.0);
        assert_eq!(camera.distance, 1.0);
    }

    #[test]
    fn test_move_forward_keeps_orbit() {
        let mut camera = Camera::new();
        camera.move_forward(2.0);
        assert!(camera.target.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-5));
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-5));
        assert_eq!(camera.distance, 5.0);

        camera.move_backward(2.0);
        assert!(camera.target.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn test_move_follows_orientation() {
        let mut camera = Camera::new();
        camera.rotate_around_y_axis(std::f32::consts::FRAC_PI_2);
        camera.move_forward(1.0);
        // Eye sits on +X, so forward points toward -X
        assert!(camera.target.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_reset_restores_view() {
        let mut camera = Camera::new();
        let initial = camera.view_matrix();

        camera.rotate_around_y_axis(1.3);
        camera.rotate_around_x_axis(-0.7);
        camera.zoom_out(12.0);
        camera.move_forward(3.0);
        camera.reset();

        assert_eq!(camera.view_matrix(), initial);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_custom_defaults_are_clamped() {
        let camera = Camera::with_defaults(CameraDefaults {
            distance: 0.0,
            pitch: 3.0,
            ..Default::default()
        });
        assert_eq!(camera.distance, 1.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_projection_matrix() {
        let camera = Camera::new();
        let proj = camera.projection_matrix(1024.0 / 768.0);
        let expected = Mat4::perspective_rh(45f32.to_radians(), 1024.0 / 768.0, 0.1, 100.0);
        assert_mat_eq(proj, expected);
        assert!(proj.determinant().abs() > 0.0001);
    }
}
