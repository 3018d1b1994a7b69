//! Who may drag what, and the detail summaries written into the side panel.

use super::energy::{self, EnergyBand};
use super::scene::{NodeIdx, SceneGraph};
use super::topology::ViewMode;
use super::types::{Dataset, Payload};

/// Longest bond list shown for a selected node.
pub const BOND_LIST_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
	/// May rearrange any network.
	Researcher,
	#[default]
	Member,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewer {
	pub role: Role,
	/// University whose dashboard the viewer came from.
	pub university: Option<String>,
}

impl Viewer {
	pub fn researcher() -> Self {
		Self {
			role: Role::Researcher,
			university: None,
		}
	}

	pub fn member(university: Option<String>) -> Self {
		Self {
			role: Role::Member,
			university,
		}
	}

	/// Members only edit their own university's molecule and never the
	/// consortium. Every node of a university view belongs to that university.
	pub fn can_drag(&self, mode: ViewMode) -> bool {
		match (self.role, mode) {
			(Role::Researcher, _) => true,
			(Role::Member, ViewMode::Consortium) => false,
			(Role::Member, ViewMode::University) => self.university.is_some(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailLine {
	pub text: String,
	pub color: Option<&'static str>,
}

impl DetailLine {
	fn plain(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			color: None,
		}
	}

	fn colored(text: impl Into<String>, color: &'static str) -> Self {
		Self {
			text: text.into(),
			color: Some(color),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct BondSummary {
	pub other_name: String,
	pub energy_pct: u32,
	pub strength_pct: u32,
	pub band: EnergyBand,
	pub label: String,
	pub bar: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetail {
	pub title: String,
	pub kind_label: &'static str,
	pub lines: Vec<DetailLine>,
	/// "Bonds" or "Collaborations".
	pub bond_heading: &'static str,
	pub bond_count: usize,
	pub bonds: Vec<BondSummary>,
	/// Bonds left out of the list.
	pub more: usize,
	/// Set when the preceding press tried to drag without permission.
	pub denied: Option<ViewMode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailView {
	Prompt(ViewMode),
	Loaded {
		headline: &'static str,
		counts: Vec<(usize, &'static str)>,
		note: Option<String>,
	},
	Node(NodeDetail),
	Denied(ViewMode),
	Failed(String),
}

impl DetailView {
	/// Summary shown once a dataset has been turned into a scene.
	pub fn loaded(dataset: &Dataset) -> Self {
		match dataset {
			Dataset::Research(net) => Self::Loaded {
				headline: "Network loaded",
				counts: vec![
					(net.projects.len(), "projects"),
					(net.teams.len(), "teams"),
					(net.students.len(), "students"),
					(net.faculty.len(), "faculty"),
					(net.interfaces.len(), "interfaces"),
				],
				note: None,
			},
			Dataset::Consortium(c) => Self::Loaded {
				headline: "Multi-University Network loaded",
				counts: vec![
					(c.universities.len(), "universities"),
					(c.collaborations.len(), "collaborations"),
				],
				note: c.nucleus().map(|u| format!("{} at center", u.name)),
			},
		}
	}

	pub fn prompt_text(mode: ViewMode) -> &'static str {
		match mode {
			ViewMode::University => "Click a node to see details.",
			ViewMode::Consortium => "Click a university to see details.",
		}
	}

	pub fn denied_text(mode: ViewMode) -> (&'static str, &'static str, &'static str) {
		match mode {
			ViewMode::University => (
				"Permission Denied",
				"You can only edit your own university's network.",
				"Click to view details only.",
			),
			ViewMode::Consortium => (
				"Researcher Access Only",
				"Only researchers can edit the multi-university network.",
				"Use your individual university dashboard to edit your own network.",
			),
		}
	}
}

fn kind_lines(payload: &Payload) -> Vec<DetailLine> {
	match payload {
		Payload::NucleusProject(_) => {
			vec![DetailLine::colored("⚛️ Central Project (Nucleus)", "#00f0ff")]
		}
		Payload::NucleusUniversity(u) => {
			let mut lines = Vec::new();
			if let Some(location) = &u.location {
				lines.push(DetailLine::plain(location.clone()));
			}
			lines.push(DetailLine::colored("☀️ Lead Institution", "#ffd700"));
			lines.push(DetailLine::plain(format!(
				"All universities orbit around {}, representing the coordinated multi-university collaboration.",
				u.name
			)));
			lines
		}
		Payload::Project(p) => p
			.kind
			.iter()
			.map(|k| DetailLine::plain(format!("Project type: {k}")))
			.collect(),
		Payload::Team(t) => {
			let mut lines = Vec::new();
			if let Some(lifecycle) = &t.lifecycle {
				lines.push(DetailLine::plain(format!("Lifecycle: {lifecycle}")));
			}
			if let Some(discipline) = &t.discipline {
				lines.push(DetailLine::plain(format!("Discipline: {discipline}")));
			}
			lines
		}
		Payload::Faculty(f) => f.role.iter().map(|r| DetailLine::plain(r.clone())).collect(),
		Payload::Student(s) => {
			let mut lines = vec![DetailLine::colored(
				format!("Status: {}", s.status.label()),
				s.status.color(),
			)];
			if let Some(year) = s.year {
				lines.push(DetailLine::plain(format!("Year: {year}")));
			}
			lines
		}
		Payload::University(u) => u
			.location
			.iter()
			.chain(u.role.iter())
			.map(|text| DetailLine::plain(text.clone()))
			.collect(),
	}
}

/// Detail for a node: its payload plus every incident bond, in both
/// directions, truncated to [`BOND_LIST_LIMIT`].
pub fn describe(scene: &SceneGraph, idx: NodeIdx) -> Option<NodeDetail> {
	let node = scene.node(idx)?;
	let incident: Vec<_> = scene.incident_bonds(idx).collect();
	let bonds = incident
		.iter()
		.take(BOND_LIST_LIMIT)
		.map(|bond| {
			let other = bond.other(idx);
			let energy_pct = energy::percent(bond.energy_loss);
			let strength_pct = energy::percent(bond.strength());
			BondSummary {
				other_name: scene
					.node(other)
					.map(|n| n.payload.name().to_string())
					.unwrap_or_default(),
				energy_pct,
				strength_pct,
				band: EnergyBand::of_percent(energy_pct),
				label: bond.label.clone(),
				bar: energy::strength_bar(strength_pct),
			}
		})
		.collect();

	Some(NodeDetail {
		title: node.payload.name().to_string(),
		kind_label: node.kind().label(),
		lines: kind_lines(&node.payload),
		bond_heading: match scene.topology.mode {
			ViewMode::University => "Bonds",
			ViewMode::Consortium => "Collaborations",
		},
		bond_count: incident.len(),
		bonds,
		more: incident.len().saturating_sub(BOND_LIST_LIMIT),
		denied: None,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::molecule::samples;
	use crate::components::molecule::topology::Topology;
	use crate::components::molecule::types::{Dataset, Relation, ResearchNetwork, TeamRecord};

	#[test]
	fn loaded_summary_counts_entities() {
		let DetailView::Loaded { counts, note, .. } =
			DetailView::loaded(&Dataset::Research(samples::comprehensive_sample()))
		else {
			panic!("expected a loaded summary");
		};
		assert_eq!(counts[0], (4, "projects"));
		assert_eq!(counts[2], (26, "students"));
		assert!(note.is_none());

		let DetailView::Loaded { headline, counts, note } =
			DetailView::loaded(&Dataset::Consortium(samples::demo_consortium()))
		else {
			panic!("expected a loaded summary");
		};
		assert_eq!(headline, "Multi-University Network loaded");
		assert_eq!(counts, vec![(8, "universities"), (10, "collaborations")]);
		assert_eq!(note.as_deref(), Some("Cal Poly Pomona at center"));
	}

	#[test]
	fn researcher_may_always_drag() {
		let viewer = Viewer::researcher();
		assert!(viewer.can_drag(ViewMode::University));
		assert!(viewer.can_drag(ViewMode::Consortium));
	}

	#[test]
	fn member_never_drags_consortium() {
		assert!(!Viewer::member(Some("cpp".into())).can_drag(ViewMode::Consortium));
		assert!(!Viewer::member(None).can_drag(ViewMode::Consortium));
	}

	#[test]
	fn member_drags_only_with_own_university() {
		assert!(Viewer::member(Some("cpp".into())).can_drag(ViewMode::University));
		assert!(!Viewer::member(None).can_drag(ViewMode::University));
	}

	fn hub_with(spokes: usize) -> SceneGraph {
		let mut data = samples::demo_network();
		for i in 0..spokes {
			let id = format!("H{i}");
			data.teams.push(TeamRecord {
				id: id.clone(),
				name: format!("Hub team {i}"),
				project_id: "Research1".into(),
				..Default::default()
			});
			data.interfaces.push(Relation {
				from: if i % 2 == 0 { "Research1".into() } else { id.clone() },
				to: if i % 2 == 0 { id } else { "Research1".into() },
				energy_loss: 0.2,
				kind: None,
			});
		}
		SceneGraph::build(&Dataset::Research(data), &Topology::research())
	}

	#[test]
	fn long_bond_lists_are_truncated() {
		// Research1 already has one bond in the demo network.
		let scene = hub_with(11);
		let idx = scene.lookup("Research1").unwrap();
		let detail = describe(&scene, idx).unwrap();
		assert_eq!(detail.bond_count, 12);
		assert_eq!(detail.bonds.len(), 10);
		assert_eq!(detail.more, 2);
		assert_eq!(detail.bonds[1].label, "interface");
	}

	#[test]
	fn summaries_name_the_other_endpoint() {
		let scene = SceneGraph::build(
			&Dataset::Research(samples::demo_network()),
			&Topology::research(),
		);
		let idx = scene.lookup("T1").unwrap();
		let detail = describe(&scene, idx).unwrap();
		assert_eq!(detail.title, "Software Team");
		assert_eq!(detail.more, 0);
		let names: Vec<_> = detail.bonds.iter().map(|b| b.other_name.as_str()).collect();
		assert_eq!(names, vec!["CubeSat Mission 1", "Power Systems"]);
		assert_eq!(detail.bonds[0].energy_pct, 20);
		assert_eq!(detail.bonds[0].strength_pct, 80);
		assert_eq!(detail.bonds[0].band, EnergyBand::Moderate);
		assert_eq!(detail.bonds[0].bar, "████");
	}

	#[test]
	fn student_detail_shows_status_and_year() {
		let scene = SceneGraph::build(
			&Dataset::Research(samples::comprehensive_sample()),
			&Topology::research(),
		);
		let detail = describe(&scene, scene.lookup("s25").unwrap()).unwrap();
		assert_eq!(detail.kind_label, "student");
		assert_eq!(detail.lines[0].text, "Status: outgoing");
		assert_eq!(detail.lines[1].text, "Year: 4");
	}

	#[test]
	fn unnamed_nodes_fall_back_to_id() {
		let mut data = ResearchNetwork::default();
		data.projects.push(crate::components::molecule::types::ProjectRecord {
			id: "PROVES".into(),
			..Default::default()
		});
		let scene = SceneGraph::build(&Dataset::Research(data), &Topology::research());
		let detail = describe(&scene, 0).unwrap();
		assert_eq!(detail.title, "PROVES");
		assert_eq!(detail.kind_label, "nucleus");
	}
}
