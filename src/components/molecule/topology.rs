//! Per-view layout parameters. One scene implementation serves both the
//! single-university molecule and the multi-university consortium by
//! swapping the [`Topology`] it is built with.

use super::types::NodeKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
	/// One university's projects, teams, students and faculty.
	University,
	/// Partner universities orbiting the lead institution.
	Consortium,
}

/// An orbiting ring of nodes.
#[derive(Clone, Debug)]
pub struct TierSpec {
	pub kind: NodeKind,
	pub radius: f32,
	/// Radians added to the orbit angle each frame.
	pub rate: f32,
	/// Amplitude of the vertical bob around the parent's height.
	pub bob: f32,
	/// Harmonic of the bob (`sin(angle * harmonic)`).
	pub bob_harmonic: f32,
	/// Amplitude of the one-off vertical jitter given at build time.
	pub jitter: f32,
	pub render_radius: f32,
	pub color: &'static str,
	pub base_emissive: f32,
	/// Whether a faint ring is drawn along the orbit.
	pub ring: bool,
}

/// Nodes placed once on an outer shell and never animated (faculty).
#[derive(Clone, Debug)]
pub struct FreeShell {
	pub kind: NodeKind,
	pub radius: f32,
	pub jitter: f32,
	pub render_radius: f32,
	pub color: &'static str,
	pub base_emissive: f32,
}

#[derive(Clone, Debug)]
pub struct BondShape {
	pub curve_base: f32,
	pub curve_gain: f32,
	pub min_thickness: f32,
	pub max_thickness: f32,
	pub particle_speed: f32,
	pub particle_radius: f32,
	pub opacity: f32,
}

#[derive(Clone, Debug)]
pub struct CameraConfig {
	pub eye: [f32; 3],
	pub fov_deg: f32,
	pub min_distance: f32,
	pub max_distance: f32,
	pub damping: f32,
	pub auto_rotate_speed: f32,
	pub fog_near: f32,
	pub fog_far: f32,
}

#[derive(Clone, Debug)]
pub struct NucleusSpec {
	pub render_radius: f32,
	pub color: &'static str,
	/// Resting glow; the pulse oscillates ±0.2 around it.
	pub base_emissive: f32,
}

#[derive(Clone, Debug)]
pub struct Topology {
	pub mode: ViewMode,
	pub nucleus: NucleusSpec,
	/// Innermost tier first; each tier orbits nodes of the previous one.
	pub tiers: Vec<TierSpec>,
	pub free: Option<FreeShell>,
	pub bond: BondShape,
	pub camera: CameraConfig,
	pub selected_emissive: f32,
}

impl Topology {
	pub fn research() -> Self {
		Self {
			mode: ViewMode::University,
			nucleus: NucleusSpec {
				render_radius: 40.0,
				color: "#00f0ff",
				base_emissive: 0.5,
			},
			tiers: vec![
				TierSpec {
					kind: NodeKind::Project,
					radius: 200.0,
					rate: 0.001,
					bob: 0.0,
					bob_harmonic: 1.0,
					jitter: 50.0,
					render_radius: 25.0,
					color: "#8b5cf6",
					base_emissive: 0.3,
					ring: true,
				},
				TierSpec {
					kind: NodeKind::Team,
					radius: 60.0,
					rate: 0.003,
					bob: 10.0,
					bob_harmonic: 1.0,
					jitter: 0.0,
					render_radius: 12.0,
					color: "#ec4899",
					base_emissive: 0.2,
					ring: false,
				},
				TierSpec {
					kind: NodeKind::Student,
					radius: 20.0,
					rate: 0.005,
					bob: 5.0,
					bob_harmonic: 2.0,
					jitter: 0.0,
					render_radius: 5.0,
					color: "#10b981",
					base_emissive: 0.4,
					ring: false,
				},
			],
			free: Some(FreeShell {
				kind: NodeKind::Faculty,
				radius: 350.0,
				jitter: 100.0,
				render_radius: 10.0,
				color: "#fbbf24",
				base_emissive: 0.3,
			}),
			bond: BondShape {
				curve_base: 50.0,
				curve_gain: 100.0,
				min_thickness: 0.5,
				max_thickness: 3.0,
				particle_speed: 0.005,
				particle_radius: 2.0,
				opacity: 0.4,
			},
			camera: CameraConfig {
				eye: [0.0, 300.0, 600.0],
				fov_deg: 60.0,
				min_distance: 200.0,
				max_distance: 1500.0,
				damping: 0.05,
				auto_rotate_speed: 0.5,
				fog_near: 500.0,
				fog_far: 2000.0,
			},
			selected_emissive: 0.8,
		}
	}

	pub fn consortium() -> Self {
		Self {
			mode: ViewMode::Consortium,
			nucleus: NucleusSpec {
				render_radius: 60.0,
				color: "#ffd700",
				base_emissive: 0.6,
			},
			tiers: vec![TierSpec {
				kind: NodeKind::University,
				radius: 400.0,
				rate: 0.0005,
				bob: 0.0,
				bob_harmonic: 1.0,
				jitter: 80.0,
				render_radius: 35.0,
				color: "#00f0ff",
				base_emissive: 0.4,
				ring: true,
			}],
			free: None,
			bond: BondShape {
				curve_base: 60.0,
				curve_gain: 120.0,
				min_thickness: 1.0,
				max_thickness: 5.0,
				particle_speed: 0.003,
				particle_radius: 3.0,
				opacity: 0.5,
			},
			camera: CameraConfig {
				eye: [0.0, 500.0, 1000.0],
				fov_deg: 60.0,
				min_distance: 300.0,
				max_distance: 2000.0,
				damping: 0.05,
				auto_rotate_speed: 0.3,
				fog_near: 500.0,
				fog_far: 3000.0,
			},
			selected_emissive: 0.9,
		}
	}

	pub fn tier(&self, kind: NodeKind) -> Option<(usize, &TierSpec)> {
		self.tiers.iter().enumerate().find(|(_, t)| t.kind == kind)
	}

	pub fn base_emissive(&self, kind: NodeKind) -> f32 {
		if kind == NodeKind::Nucleus {
			return self.nucleus.base_emissive;
		}
		if let Some((_, tier)) = self.tier(kind) {
			return tier.base_emissive;
		}
		match &self.free {
			Some(shell) if shell.kind == kind => shell.base_emissive,
			_ => 0.3,
		}
	}
}
