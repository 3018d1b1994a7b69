//! The molecule's scene graph: nodes, bonds and the particles flowing along
//! them, plus the per-frame orbit update.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec3;
use log::debug;

use super::camera::Ray;
use super::energy::{self, EnergyBand};
use super::topology::Topology;
use super::types::{NodeKind, Payload};

pub type NodeIdx = usize;

/// Nodes smaller than this are still easy to hit with a pointer.
pub const MIN_HIT_RADIUS: f32 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
	/// `None` orbits the coordinate origin.
	pub parent: Option<NodeIdx>,
	pub angle: f32,
	pub radius: f32,
	/// Index into [`Topology::tiers`].
	pub tier: usize,
}

#[derive(Clone, Debug)]
pub struct SceneNode {
	pub payload: Payload,
	pub position: Vec3,
	pub orbit: Option<Orbit>,
	pub render_radius: f32,
	pub color: &'static str,
	pub emissive: f32,
}

impl SceneNode {
	pub fn id(&self) -> &str {
		self.payload.id()
	}

	pub fn kind(&self) -> NodeKind {
		self.payload.kind()
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraticBezier {
	pub start: Vec3,
	pub control: Vec3,
	pub end: Vec3,
}

impl QuadraticBezier {
	/// Curve whose control point sits `offset` away from the chord midpoint.
	pub fn bent(start: Vec3, end: Vec3, offset: Vec3) -> Self {
		Self {
			start,
			control: start.lerp(end, 0.5) + offset,
			end,
		}
	}

	pub fn point(&self, t: f32) -> Vec3 {
		let u = 1.0 - t;
		self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
	}

}

#[derive(Clone, Debug)]
pub struct Bond {
	pub from: NodeIdx,
	pub to: NodeIdx,
	pub energy_loss: f32,
	pub label: String,
	pub band: EnergyBand,
	/// Curve as laid out at build time or after the last drag.
	pub curve: QuadraticBezier,
	/// Control point offset from the live chord midpoint.
	pub sag: Vec3,
	pub thickness: f32,
}

impl Bond {
	pub fn strength(&self) -> f32 {
		energy::bond_strength(self.energy_loss)
	}

	pub fn touches(&self, node: NodeIdx) -> bool {
		self.from == node || self.to == node
	}

	pub fn other(&self, node: NodeIdx) -> NodeIdx {
		if self.from == node { self.to } else { self.from }
	}
}

#[derive(Clone, Debug)]
pub struct Particle {
	pub bond: usize,
	pub progress: f32,
	pub speed: f32,
	pub position: Vec3,
	pub scale: f32,
}

impl Particle {
	/// Advance by one step, wrapping back to the bond's start.
	pub fn advance(&mut self) {
		self.progress += self.speed;
		if self.progress >= 1.0 {
			self.progress = 0.0;
		}
	}
}

/// Everything one structure-building pass produces. A rebuild replaces the
/// whole value, so nothing from a previous dataset survives it.
#[derive(Clone, Debug)]
pub struct SceneGraph {
	pub topology: Topology,
	pub nodes: Vec<SceneNode>,
	pub bonds: Vec<Bond>,
	pub particles: Vec<Particle>,
	pub nucleus: Option<NodeIdx>,
	index: HashMap<String, NodeIdx>,
}

impl SceneGraph {
	pub fn empty(topology: Topology) -> Self {
		Self {
			topology,
			nodes: Vec::new(),
			bonds: Vec::new(),
			particles: Vec::new(),
			nucleus: None,
			index: HashMap::new(),
		}
	}

	pub fn lookup(&self, id: &str) -> Option<NodeIdx> {
		self.index.get(id).copied()
	}

	pub fn node(&self, idx: NodeIdx) -> Option<&SceneNode> {
		self.nodes.get(idx)
	}

	pub(super) fn push_node(&mut self, node: SceneNode) -> NodeIdx {
		let idx = self.nodes.len();
		self.index.insert(node.id().to_string(), idx);
		if node.kind() == NodeKind::Nucleus {
			self.nucleus = Some(idx);
		}
		self.nodes.push(node);
		idx
	}

	pub(super) fn push_bond(&mut self, from: NodeIdx, to: NodeIdx, energy_loss: f32, label: String) {
		let shape = &self.topology.bond;
		let sag = Vec3::Y * energy::curvature(energy_loss, shape);
		let curve = QuadraticBezier::bent(self.nodes[from].position, self.nodes[to].position, sag);
		let bond_idx = self.bonds.len();
		let count = energy::particle_count(energy_loss);
		let speed = energy::particle_speed(energy_loss, shape);
		for i in 0..count {
			let progress = i as f32 / count as f32;
			self.particles.push(Particle {
				bond: bond_idx,
				progress,
				speed,
				position: curve.point(progress),
				scale: 1.0,
			});
		}
		self.bonds.push(Bond {
			from,
			to,
			energy_loss,
			label,
			band: EnergyBand::of(energy_loss),
			curve,
			sag,
			thickness: energy::thickness(energy_loss, shape),
		});
	}

	pub fn incident_bonds(&self, node: NodeIdx) -> impl Iterator<Item = &Bond> {
		self.bonds.iter().filter(move |b| b.touches(node))
	}

	/// Bond curve evaluated against the endpoints' current positions, so it
	/// keeps its vertical sag while the endpoints orbit.
	pub fn live_curve(&self, bond: &Bond) -> QuadraticBezier {
		QuadraticBezier::bent(
			self.nodes[bond.from].position,
			self.nodes[bond.to].position,
			bond.sag,
		)
	}

	/// Nearest node whose body the ray passes through.
	pub fn pick(&self, ray: &Ray) -> Option<NodeIdx> {
		self.nodes
			.iter()
			.enumerate()
			.filter_map(|(idx, node)| {
				ray.intersect_sphere(node.position, node.render_radius.max(MIN_HIT_RADIUS))
					.map(|t| (idx, t))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(idx, _)| idx)
	}

	/// Regenerate curve and thickness of every bond touching `node`.
	/// Returns how many bonds were rebuilt.
	pub fn refresh_bonds_of(&mut self, node: NodeIdx) -> usize {
		let shape = self.topology.bond.clone();
		let mut rebuilt = 0;
		for bond in self.bonds.iter_mut().filter(|b| b.touches(node)) {
			bond.sag = Vec3::Y * energy::curvature(bond.energy_loss, &shape);
			bond.curve = QuadraticBezier::bent(
				self.nodes[bond.from].position,
				self.nodes[bond.to].position,
				bond.sag,
			);
			bond.thickness = energy::thickness(bond.energy_loss, &shape);
			rebuilt += 1;
		}
		debug!("rebuilt {rebuilt} bonds around {}", self.nodes[node].id());
		rebuilt
	}

	/// Move a node and re-seat its orbit so it keeps circling from the
	/// dropped location instead of snapping back.
	pub fn move_node(&mut self, node: NodeIdx, position: Vec3) {
		let center = self.orbit_center(node);
		let Some(target) = self.nodes.get_mut(node) else {
			return;
		};
		target.position = position;
		if let (Some(orbit), Some(center)) = (target.orbit.as_mut(), center) {
			let rel = position - center;
			orbit.radius = (rel.x * rel.x + rel.z * rel.z).sqrt();
			orbit.angle = rel.z.atan2(rel.x);
		}
	}

	fn orbit_center(&self, node: NodeIdx) -> Option<Vec3> {
		let orbit = self.nodes.get(node)?.orbit?;
		Some(match orbit.parent {
			Some(parent) => self.nodes[parent].position,
			None => Vec3::ZERO,
		})
	}

	/// One animation frame: particles, then orbits, then the nucleus pulse.
	/// `held` is skipped by the orbit update while it is being dragged.
	pub fn tick(&mut self, now_ms: f64, held: Option<NodeIdx>, selected: Option<NodeIdx>) {
		let wave = (now_ms * 0.005) as f32;
		for i in 0..self.particles.len() {
			self.particles[i].advance();
			let curve = self.live_curve(&self.bonds[self.particles[i].bond]);
			let particle = &mut self.particles[i];
			particle.position = curve.point(particle.progress);
			particle.scale = 1.0 + (wave + particle.progress * TAU).sin() * 0.3;
		}

		// Parents precede their children, so each child reads a parent
		// position already advanced this frame.
		for idx in 0..self.nodes.len() {
			if Some(idx) == held {
				continue;
			}
			let Some(orbit) = self.nodes[idx].orbit else {
				continue;
			};
			let center = match orbit.parent {
				Some(parent) => self.nodes[parent].position,
				None => Vec3::ZERO,
			};
			let tier = &self.topology.tiers[orbit.tier];
			let angle = orbit.angle + tier.rate;
			let node = &mut self.nodes[idx];
			node.position.x = center.x + angle.cos() * orbit.radius;
			node.position.z = center.z + angle.sin() * orbit.radius;
			if tier.bob > 0.0 {
				node.position.y = center.y + (angle * tier.bob_harmonic).sin() * tier.bob;
			}
			if let Some(o) = node.orbit.as_mut() {
				o.angle = angle;
			}
		}

		if let Some(nucleus) = self.nucleus {
			if Some(nucleus) != selected {
				let base = self.topology.nucleus.base_emissive;
				self.nodes[nucleus].emissive = base + ((now_ms * 0.001).sin() as f32) * 0.2;
			}
		}
	}
}
