//! Perspective camera on a rig, viewport sizing and orbit controls.

use glam::{DVec3, Mat4, Vec3};

use crate::config::{CameraConfig, OrbitConfig};

/// Viewport in CSS pixels plus the device pixel ratio reported by the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            return 1.0;
        }
        (self.width / self.height) as f32
    }

    /// Device pixel ratio, capped so high-density screens don't quadruple
    /// the fill cost. Ratios below 1 (zoomed out) are kept.
    pub fn pixel_ratio(&self, max_pixel_ratio: f64) -> f64 {
        self.device_pixel_ratio.min(max_pixel_ratio)
    }

    /// Backing store size in device pixels.
    pub fn drawing_buffer_size(&self, max_pixel_ratio: f64) -> (u32, u32) {
        let ratio = self.pixel_ratio(max_pixel_ratio);
        (
            (self.width * ratio).floor().max(1.0) as u32,
            (self.height * ratio).floor().max(1.0) as u32,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Rig-local position.
    pub position: Vec3,
    /// Rig-local point the camera looks at.
    pub target: Vec3,
    pub rig_position: Vec3,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov_y_degrees: config.fov_y_degrees,
            aspect,
            near: config.near,
            far: config.far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            rig_position: Vec3::from_array(config.rig_position),
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn world_position(&self) -> Vec3 {
        self.rig_position + self.position
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            self.world_position(),
            self.rig_position + self.target,
            Vec3::Y,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Orbit around the camera target with damped rotation.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitControls {
    pub enabled: bool,
    config: OrbitConfig,
    theta_delta: f64,
    phi_delta: f64,
}

impl OrbitControls {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            enabled: config.enabled,
            config,
            theta_delta: 0.0,
            phi_delta: 0.0,
        }
    }

    /// Queue a rotation from a pointer drag of `(dx, dy)` CSS pixels.
    pub fn rotate_by_pointer(&mut self, dx: f64, dy: f64) {
        if !self.enabled {
            return;
        }
        self.theta_delta -= dx * self.config.rotate_speed;
        self.phi_delta -= dy * self.config.rotate_speed;
    }

    /// Apply pending rotation to the camera. Returns whether it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        if !self.enabled {
            return false;
        }
        let target = camera.target.as_dvec3();
        let offset = camera.position.as_dvec3() - target;

        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > f64::EPSILON {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, std::f64::consts::FRAC_PI_2)
        };

        let (d_theta, d_phi) = if self.config.enable_damping {
            (
                self.theta_delta * self.config.damping_factor,
                self.phi_delta * self.config.damping_factor,
            )
        } else {
            (self.theta_delta, self.phi_delta)
        };
        theta += d_theta;
        phi += d_phi;

        phi = phi.clamp(1e-6, self.config.max_polar_angle.min(std::f64::consts::PI - 1e-6));
        radius = radius.clamp(self.config.min_distance, self.config.max_distance);

        let next = target
            + DVec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );

        if self.config.enable_damping {
            self.theta_delta *= 1.0 - self.config.damping_factor;
            self.phi_delta *= 1.0 - self.config.damping_factor;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
        }

        let next = next.as_vec3();
        let moved = next.distance_squared(camera.position) > 1e-12;
        camera.position = next;
        moved
    }
}
