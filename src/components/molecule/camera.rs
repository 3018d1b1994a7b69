//! Perspective orbit camera with damping and auto-rotation, plus the ray
//! maths used for picking and dragging.

use std::f32::consts::PI;

use glam::Vec3;

use super::topology::CameraConfig;

const MIN_POLAR: f32 = 0.05;
const MAX_POLAR: f32 = PI - 0.05;
/// Radians per pixel of pointer movement.
const ROTATE_SPEED: f32 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
	pub origin: Vec3,
	pub dir: Vec3,
}

impl Ray {
	/// Distance along the ray to the nearest hit on a sphere, if any.
	pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
		let oc = self.origin - center;
		let b = oc.dot(self.dir);
		let c = oc.length_squared() - radius * radius;
		let disc = b * b - c;
		if disc < 0.0 {
			return None;
		}
		let sqrt = disc.sqrt();
		let near = -b - sqrt;
		if near >= 0.0 {
			return Some(near);
		}
		let far = -b + sqrt;
		(far >= 0.0).then_some(far)
	}

	pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
		let denom = plane.normal.dot(self.dir);
		if denom.abs() < 1e-6 {
			return None;
		}
		let t = (plane.point - self.origin).dot(plane.normal) / denom;
		(t >= 0.0).then(|| self.origin + self.dir * t)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
	pub point: Vec3,
	pub normal: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Distance in front of the camera.
	pub depth: f32,
	/// Screen pixels per world unit at this depth.
	pub scale: f64,
}

#[derive(Clone, Debug)]
pub struct Camera {
	pub target: Vec3,
	radius: f32,
	theta: f32,
	phi: f32,
	delta_theta: f32,
	delta_phi: f32,
	pending_zoom: f32,
	pub auto_rotate: bool,
	/// Cleared while a node is being dragged so pointer input does not orbit.
	pub enabled: bool,
	config: CameraConfig,
}

impl Camera {
	pub fn new(config: &CameraConfig) -> Self {
		let eye = Vec3::from(config.eye);
		let radius = eye.length().max(1.0);
		Self {
			target: Vec3::ZERO,
			radius,
			theta: eye.x.atan2(eye.z),
			phi: (eye.y / radius).clamp(-1.0, 1.0).acos(),
			delta_theta: 0.0,
			delta_phi: 0.0,
			pending_zoom: 1.0,
			auto_rotate: true,
			enabled: true,
			config: config.clone(),
		}
	}

	pub fn eye(&self) -> Vec3 {
		let sin_phi = self.phi.sin();
		self.target
			+ Vec3::new(
				self.radius * sin_phi * self.theta.sin(),
				self.radius * self.phi.cos(),
				self.radius * sin_phi * self.theta.cos(),
			)
	}

	pub fn config(&self) -> &CameraConfig {
		&self.config
	}

	fn basis(&self) -> (Vec3, Vec3, Vec3) {
		let forward = (self.target - self.eye()).normalize();
		let right = forward.cross(Vec3::Y).normalize();
		let up = right.cross(forward);
		(forward, right, up)
	}

	fn focal(&self) -> f32 {
		1.0 / (self.config.fov_deg.to_radians() * 0.5).tan()
	}

	/// Queue an orbit from a pointer delta in pixels; applied by [`Self::update`].
	pub fn rotate(&mut self, dx: f64, dy: f64) {
		if !self.enabled {
			return;
		}
		self.delta_theta -= dx as f32 * ROTATE_SPEED;
		self.delta_phi -= dy as f32 * ROTATE_SPEED;
	}

	pub fn zoom(&mut self, factor: f32) {
		if !self.enabled {
			return;
		}
		self.pending_zoom *= factor;
	}

	/// Advance damping and auto-rotation by one frame.
	pub fn update(&mut self) {
		if self.auto_rotate && self.enabled {
			self.delta_theta -= 2.0 * PI / 60.0 / 60.0 * self.config.auto_rotate_speed;
		}
		let damping = self.config.damping;
		self.theta += self.delta_theta * damping;
		self.phi = (self.phi + self.delta_phi * damping).clamp(MIN_POLAR, MAX_POLAR);
		self.delta_theta *= 1.0 - damping;
		self.delta_phi *= 1.0 - damping;

		self.radius = (self.radius * self.pending_zoom)
			.clamp(self.config.min_distance, self.config.max_distance);
		self.pending_zoom = 1.0;
	}

	pub fn project(&self, point: Vec3, width: f64, height: f64) -> Option<Projected> {
		let (forward, right, up) = self.basis();
		let rel = point - self.eye();
		let depth = rel.dot(forward);
		if depth <= 1.0 {
			return None;
		}
		let aspect = (width / height) as f32;
		let f = self.focal();
		let ndc_x = rel.dot(right) * f / (aspect * depth);
		let ndc_y = rel.dot(up) * f / depth;
		Some(Projected {
			x: (ndc_x as f64 + 1.0) * 0.5 * width,
			y: (1.0 - ndc_y as f64) * 0.5 * height,
			depth,
			scale: f as f64 * height / (2.0 * depth as f64),
		})
	}

	/// Ray from the eye through a canvas pixel.
	pub fn ray(&self, sx: f64, sy: f64, width: f64, height: f64) -> Ray {
		let (forward, right, up) = self.basis();
		let aspect = (width / height) as f32;
		let f = self.focal();
		let ndc_x = (sx / width * 2.0 - 1.0) as f32;
		let ndc_y = (1.0 - sy / height * 2.0) as f32;
		let dir = forward + right * (ndc_x * aspect / f) + up * (ndc_y / f);
		Ray {
			origin: self.eye(),
			dir: dir.normalize(),
		}
	}

	/// Plane through `point` facing the camera.
	pub fn facing_plane(&self, point: Vec3) -> Plane {
		Plane {
			point,
			normal: (self.eye() - point).normalize(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::molecule::topology::Topology;

	fn camera() -> Camera {
		Camera::new(&Topology::research().camera)
	}

	#[test]
	fn starts_at_configured_eye() {
		let cam = camera();
		assert!(cam.eye().distance(Vec3::new(0.0, 300.0, 600.0)) < 0.1);
	}

	#[test]
	fn origin_projects_to_centre() {
		let cam = camera();
		let p = cam.project(Vec3::ZERO, 800.0, 600.0).unwrap();
		assert!((p.x - 400.0).abs() < 1e-3);
		assert!((p.y - 300.0).abs() < 1e-3);
	}

	#[test]
	fn ray_through_projection_hits_point() {
		let cam = camera();
		let point = Vec3::new(120.0, 30.0, -80.0);
		let p = cam.project(point, 800.0, 600.0).unwrap();
		let ray = cam.ray(p.x, p.y, 800.0, 600.0);
		assert!(ray.intersect_sphere(point, 1.0).is_some());
		assert!(ray.intersect_sphere(point + Vec3::new(0.0, 200.0, 0.0), 1.0).is_none());
	}

	#[test]
	fn facing_plane_intersection_lies_on_plane() {
		let cam = camera();
		let plane = cam.facing_plane(Vec3::new(50.0, 0.0, 0.0));
		let ray = cam.ray(410.0, 290.0, 800.0, 600.0);
		let hit = ray.intersect_plane(&plane).unwrap();
		assert!((hit - plane.point).dot(plane.normal).abs() < 1e-2);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut cam = camera();
		cam.zoom(0.01);
		cam.update();
		assert!((cam.eye().distance(cam.target) - 200.0).abs() < 0.05);
		cam.zoom(100.0);
		cam.update();
		assert!((cam.eye().distance(cam.target) - 1500.0).abs() < 0.05);
	}

	#[test]
	fn auto_rotate_moves_eye_only_when_enabled() {
		let mut cam = camera();
		let before = cam.eye();
		cam.enabled = false;
		cam.update();
		assert_eq!(before, cam.eye());
		cam.enabled = true;
		for _ in 0..10 {
			cam.update();
		}
		assert!(before.distance(cam.eye()) > 1e-3);
	}
}
