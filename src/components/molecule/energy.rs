//! Energy-loss mappings for bonds: colour band, sag, thickness and particle flow.

use super::topology::BondShape;

pub const HEALTHY_LIMIT: f32 = 0.15;
pub const MODERATE_LIMIT: f32 = 0.35;
pub const HIGH_RISK_LIMIT: f32 = 0.60;

pub const MIN_PARTICLES: usize = 3;
pub const MAX_PARTICLES: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnergyBand {
	Healthy,
	Moderate,
	HighRisk,
	Critical,
}

impl EnergyBand {
	/// Lower bounds are inclusive, so 0.15 is already `Moderate`.
	pub fn of(energy_loss: f32) -> Self {
		if energy_loss < HEALTHY_LIMIT {
			Self::Healthy
		} else if energy_loss < MODERATE_LIMIT {
			Self::Moderate
		} else if energy_loss < HIGH_RISK_LIMIT {
			Self::HighRisk
		} else {
			Self::Critical
		}
	}

	/// Banding on a rounded percentage, as shown in the detail panel.
	pub fn of_percent(percent: u32) -> Self {
		Self::of(percent as f32 / 100.0)
	}

	pub fn color(self) -> &'static str {
		match self {
			Self::Healthy => "#10b981",
			Self::Moderate => "#fbbf24",
			Self::HighRisk => "#f59e0b",
			Self::Critical => "#ef4444",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Healthy => "healthy",
			Self::Moderate => "moderate",
			Self::HighRisk => "high risk",
			Self::Critical => "critical",
		}
	}
}

/// Clamps into `[0, 1]`. Returns the clamped value and whether it changed.
pub fn clamp_energy_loss(raw: f32) -> (f32, bool) {
	if raw.is_nan() {
		return (1.0, true);
	}
	let clamped = raw.clamp(0.0, 1.0);
	(clamped, clamped != raw)
}

pub fn bond_strength(energy_loss: f32) -> f32 {
	1.0 - energy_loss
}

/// Vertical displacement of a bond's control point above the chord midpoint.
pub fn curvature(energy_loss: f32, shape: &BondShape) -> f32 {
	shape.curve_base + energy_loss * shape.curve_gain
}

pub fn thickness(energy_loss: f32, shape: &BondShape) -> f32 {
	shape.min_thickness + bond_strength(energy_loss) * (shape.max_thickness - shape.min_thickness)
}

pub fn particle_count(energy_loss: f32) -> usize {
	let scaled = (MAX_PARTICLES as f32 * bond_strength(energy_loss)).floor() as usize;
	scaled.max(MIN_PARTICLES)
}

pub fn particle_speed(energy_loss: f32, shape: &BondShape) -> f32 {
	shape.particle_speed * (1.0 - energy_loss * 0.5)
}

pub fn percent(fraction: f32) -> u32 {
	(fraction * 100.0).round().max(0.0) as u32
}

/// Block bar with one glyph per 20% of strength, never empty.
pub fn strength_bar(strength_percent: u32) -> String {
	"█".repeat((strength_percent / 20).max(1) as usize)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::molecule::topology::Topology;

	#[test]
	fn bands_follow_thresholds() {
		assert_eq!(EnergyBand::of(0.10), EnergyBand::Healthy);
		assert_eq!(EnergyBand::of(0.20), EnergyBand::Moderate);
		assert_eq!(EnergyBand::of(0.45), EnergyBand::HighRisk);
		assert_eq!(EnergyBand::of(0.80), EnergyBand::Critical);
		assert_eq!(EnergyBand::of(1.0), EnergyBand::Critical);
	}

	#[test]
	fn boundaries_fall_into_upper_band() {
		assert_eq!(EnergyBand::of(0.15), EnergyBand::Moderate);
		assert_eq!(EnergyBand::of(0.35), EnergyBand::HighRisk);
		assert_eq!(EnergyBand::of(0.60), EnergyBand::Critical);
		assert_eq!(EnergyBand::of(0.0), EnergyBand::Healthy);
	}

	#[test]
	fn strength_complements_loss() {
		for step in 0..=100 {
			let loss = step as f32 / 100.0;
			assert!((bond_strength(loss) + loss - 1.0).abs() < 1e-6);
		}
	}

	#[test]
	fn particle_count_has_floor_of_three() {
		assert_eq!(particle_count(0.0), 10);
		assert_eq!(particle_count(0.15), 8);
		assert_eq!(particle_count(0.70), 3);
		assert_eq!(particle_count(1.0), 3);
	}

	#[test]
	fn thickness_and_sag_are_linear() {
		let shape = Topology::research().bond;
		assert!((thickness(0.0, &shape) - 3.0).abs() < 1e-6);
		assert!((thickness(1.0, &shape) - 0.5).abs() < 1e-6);
		assert!((curvature(0.0, &shape) - 50.0).abs() < 1e-6);
		assert!((curvature(0.5, &shape) - 100.0).abs() < 1e-6);

		let shape = Topology::consortium().bond;
		assert!((thickness(0.0, &shape) - 5.0).abs() < 1e-6);
		assert!((curvature(1.0, &shape) - 180.0).abs() < 1e-6);
	}

	#[test]
	fn slower_flow_for_lossier_bonds() {
		let shape = Topology::research().bond;
		assert!(particle_speed(0.1, &shape) > particle_speed(0.9, &shape));
		assert!((particle_speed(0.0, &shape) - 0.005).abs() < 1e-9);
	}

	#[test]
	fn clamps_out_of_range_loss() {
		assert_eq!(clamp_energy_loss(0.4), (0.4, false));
		assert_eq!(clamp_energy_loss(-0.2), (0.0, true));
		assert_eq!(clamp_energy_loss(1.7), (1.0, true));
		assert_eq!(clamp_energy_loss(f32::NAN), (1.0, true));
	}

	#[test]
	fn strength_bar_is_never_empty() {
		assert_eq!(strength_bar(10), "█");
		assert_eq!(strength_bar(85), "████");
		assert_eq!(strength_bar(100), "█████");
	}
}
