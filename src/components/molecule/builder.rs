//! Structure builder: turns a dataset into a freshly laid out [`SceneGraph`].
//!
//! Placement is deterministic and angle-indexed. The nucleus sits at the
//! origin, tier-one nodes sit on a ring around it, deeper tiers sit on
//! smaller rings around their own parent, and free nodes (faculty) sit on an
//! outer shell without orbiting anything.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec3;
use log::{debug, warn};

use super::energy;
use super::samples;
use super::scene::{NodeIdx, Orbit, SceneGraph, SceneNode};
use super::topology::{FreeShell, TierSpec, Topology, ViewMode};
use super::types::{Consortium, Dataset, NodeKind, Payload, ResearchNetwork};

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f32 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	x as f32 / 233280.0
}

/// Angle of sibling `index` out of `count` evenly spaced around a ring.
pub fn ring_angle(index: usize, count: usize) -> f32 {
	if count == 0 {
		return 0.0;
	}
	TAU * index as f32 / count as f32
}

fn ring_position(center: Vec3, tier: &TierSpec, angle: f32, seed: usize) -> Vec3 {
	let bob = (angle * tier.bob_harmonic).sin() * tier.bob;
	let jitter = (rand_simple(seed) - 0.5) * tier.jitter;
	Vec3::new(
		center.x + angle.cos() * tier.radius,
		center.y + bob + jitter,
		center.z + angle.sin() * tier.radius,
	)
}

/// Groups `items` by parent key, remembering each item's rank among its
/// siblings and the sibling count.
fn sibling_ranks<'a, T>(items: &'a [T], parent: impl Fn(&'a T) -> &'a str) -> Vec<(usize, usize)> {
	let mut counts: HashMap<&str, usize> = HashMap::new();
	let ranks: Vec<usize> = items
		.iter()
		.map(|item| {
			let seen = counts.entry(parent(item)).or_default();
			*seen += 1;
			*seen - 1
		})
		.collect();
	items
		.iter()
		.zip(ranks)
		.map(|(item, rank)| (rank, counts[parent(item)]))
		.collect()
}

impl SceneGraph {
	/// Build a scene from scratch. Entities naming a missing parent and
	/// relations naming a missing node are skipped, never fatal.
	pub fn build(dataset: &Dataset, topology: &Topology) -> Self {
		let mut scene = SceneGraph::empty(topology.clone());
		match dataset {
			Dataset::Research(data) => scene.populate_research(data),
			Dataset::Consortium(data) => scene.populate_consortium(data),
		}
		scene.populate_bonds(dataset);
		debug!(
			"built scene: {} nodes, {} bonds, {} particles",
			scene.nodes.len(),
			scene.bonds.len(),
			scene.particles.len()
		);
		scene
	}

	/// Like [`Self::build`], but a dataset without a nucleus (or with nothing
	/// to orbit it) is swapped for the demonstration data of the same view.
	pub fn build_or_demo(dataset: &Dataset, topology: &Topology) -> Self {
		if !dataset.is_empty() {
			return Self::build(dataset, topology);
		}
		warn!("dataset has no nucleus, using demo data");
		let demo = match topology.mode {
			ViewMode::University => Dataset::Research(samples::demo_network()),
			ViewMode::Consortium => Dataset::Consortium(samples::demo_consortium()),
		};
		Self::build(&demo, topology)
	}

	fn add_nucleus(&mut self, payload: Payload) -> NodeIdx {
		let spec = &self.topology.nucleus;
		let node = SceneNode {
			payload,
			position: Vec3::ZERO,
			orbit: None,
			render_radius: spec.render_radius,
			color: spec.color,
			emissive: spec.base_emissive,
		};
		self.push_node(node)
	}

	fn add_orbiting(
		&mut self,
		payload: Payload,
		parent: Option<NodeIdx>,
		rank: usize,
		siblings: usize,
		seed: usize,
	) -> Option<NodeIdx> {
		let (tier_idx, tier) = self.topology.tier(payload.kind())?;
		let center = parent.map(|p| self.nodes[p].position).unwrap_or(Vec3::ZERO);
		let angle = ring_angle(rank, siblings);
		let position = ring_position(center, tier, angle, seed);
		let node = SceneNode {
			color: match &payload {
				Payload::Student(s) => s.status.color(),
				_ => tier.color,
			},
			render_radius: tier.render_radius,
			emissive: tier.base_emissive,
			orbit: Some(Orbit {
				parent,
				angle,
				radius: tier.radius,
				tier: tier_idx,
			}),
			position,
			payload,
		};
		Some(self.push_node(node))
	}

	fn add_free(&mut self, shell: &FreeShell, payload: Payload, index: usize, count: usize) {
		let angle = ring_angle(index, count);
		let jitter = (rand_simple(index + 7919) - 0.5) * shell.jitter;
		let node = SceneNode {
			payload,
			position: Vec3::new(angle.cos() * shell.radius, jitter, angle.sin() * shell.radius),
			orbit: None,
			render_radius: shell.render_radius,
			color: shell.color,
			emissive: shell.base_emissive,
		};
		self.push_node(node);
	}

	fn populate_research(&mut self, data: &ResearchNetwork) {
		let nucleus = data
			.nucleus()
			.map(|p| self.add_nucleus(Payload::NucleusProject(p.clone())));
		let nucleus_id = nucleus.map(|idx| self.nodes[idx].id().to_string());

		let orbiting: Vec<_> = data
			.projects
			.iter()
			.filter(|p| Some(&p.id) != nucleus_id.as_ref())
			.collect();
		for (i, project) in orbiting.iter().enumerate() {
			self.add_orbiting(
				Payload::Project((*project).clone()),
				nucleus,
				i,
				orbiting.len(),
				i,
			);
		}

		let team_ranks = sibling_ranks(&data.teams, |t| t.project_id.as_str());
		for (team, (rank, siblings)) in data.teams.iter().zip(team_ranks) {
			let Some(parent) = self.lookup(&team.project_id) else {
				warn!("parent project {} not found for team {}", team.project_id, team.id);
				continue;
			};
			self.add_orbiting(Payload::Team(team.clone()), Some(parent), rank, siblings, 0);
		}

		if let Some(shell) = self.topology.free.clone() {
			for (i, person) in data.faculty.iter().enumerate() {
				self.add_free(&shell, Payload::Faculty(person.clone()), i, data.faculty.len());
			}
		}

		let student_ranks = sibling_ranks(&data.students, |s| s.team_id.as_str());
		for (student, (rank, siblings)) in data.students.iter().zip(student_ranks) {
			let Some(parent) = self.lookup(&student.team_id) else {
				warn!("parent team {} not found for student {}", student.team_id, student.id);
				continue;
			};
			self.add_orbiting(Payload::Student(student.clone()), Some(parent), rank, siblings, 0);
		}
	}

	fn populate_consortium(&mut self, data: &Consortium) {
		let lead = data.nucleus();
		let nucleus = lead.map(|u| self.add_nucleus(Payload::NucleusUniversity(u.clone())));

		// Only the first flagged university leads; any other flagged one
		// orbits like a partner.
		let orbiting: Vec<_> = data
			.universities
			.iter()
			.filter(|u| !lead.is_some_and(|l| std::ptr::eq(*u, l)))
			.collect();
		for extra in orbiting.iter().filter(|u| u.is_nucleus) {
			warn!("{} is also flagged as nucleus, placing it in orbit", extra.id);
		}
		for (i, university) in orbiting.iter().enumerate() {
			self.add_orbiting(
				Payload::University((*university).clone()),
				nucleus,
				i,
				orbiting.len(),
				i,
			);
		}
	}

	fn populate_bonds(&mut self, dataset: &Dataset) {
		for relation in dataset.relations() {
			let (Some(from), Some(to)) = (self.lookup(&relation.from), self.lookup(&relation.to))
			else {
				debug!("dropping bond {} -> {}: unknown endpoint", relation.from, relation.to);
				continue;
			};
			let (energy_loss, clamped) = energy::clamp_energy_loss(relation.energy_loss);
			if clamped {
				warn!(
					"energy loss {} on {} -> {} outside [0, 1], clamped to {}",
					relation.energy_loss, relation.from, relation.to, energy_loss
				);
			}
			let label = relation.kind.clone().unwrap_or_else(|| "interface".to_string());
			self.push_bond(from, to, energy_loss, label);
		}
	}
}
