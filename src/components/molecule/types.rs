use serde::{Deserialize, Serialize};

/// Well-known id treated as the nucleus when no project carries the flag.
pub const NUCLEUS_FALLBACK_ID: &str = "PROVES";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
	pub id: String,
	pub name: String,
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	#[serde(default)]
	pub is_nucleus: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
	pub id: String,
	pub name: String,
	pub project_id: String,
	#[serde(default)]
	pub discipline: Option<String>,
	#[serde(default)]
	pub lifecycle: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FacultyRecord {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub role: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
	Incoming,
	Outgoing,
	/// Anything unrecognised reads as established.
	#[default]
	#[serde(other)]
	Established,
}

impl StudentStatus {
	pub fn color(self) -> &'static str {
		match self {
			Self::Incoming => "#f59e0b",
			Self::Established => "#10b981",
			Self::Outgoing => "#ef4444",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Incoming => "incoming",
			Self::Established => "established",
			Self::Outgoing => "outgoing",
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
	pub id: String,
	pub name: String,
	pub team_id: String,
	#[serde(default)]
	pub status: StudentStatus,
	#[serde(default)]
	pub year: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UniversityRecord {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub location: Option<String>,
	#[serde(default)]
	pub role: Option<String>,
	#[serde(rename = "isNucleus", alias = "is_nucleus", default)]
	pub is_nucleus: bool,
}

/// A directed bond between two entities, shared by `interfaces` and
/// `collaborations`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Relation {
	pub from: String,
	pub to: String,
	pub energy_loss: f32,
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchNetwork {
	#[serde(default)]
	pub projects: Vec<ProjectRecord>,
	#[serde(default)]
	pub teams: Vec<TeamRecord>,
	#[serde(default)]
	pub faculty: Vec<FacultyRecord>,
	#[serde(default)]
	pub students: Vec<StudentRecord>,
	#[serde(default)]
	pub interfaces: Vec<Relation>,
}

impl ResearchNetwork {
	pub fn nucleus(&self) -> Option<&ProjectRecord> {
		self.projects
			.iter()
			.find(|p| p.is_nucleus || p.id == NUCLEUS_FALLBACK_ID)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Consortium {
	#[serde(default)]
	pub universities: Vec<UniversityRecord>,
	#[serde(default)]
	pub collaborations: Vec<Relation>,
}

impl Consortium {
	pub fn nucleus(&self) -> Option<&UniversityRecord> {
		self.universities.iter().find(|u| u.is_nucleus)
	}
}

/// Input to a structure-building pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Dataset {
	Research(ResearchNetwork),
	Consortium(Consortium),
}

impl Dataset {
	pub fn relations(&self) -> &[Relation] {
		match self {
			Self::Research(data) => &data.interfaces,
			Self::Consortium(data) => &data.collaborations,
		}
	}

	/// True when the dataset has nothing to orbit, which callers treat as a
	/// signal to fall back to demonstration data.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Research(data) => data.projects.is_empty() || data.nucleus().is_none(),
			Self::Consortium(data) => data.universities.is_empty() || data.nucleus().is_none(),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Nucleus,
	Project,
	Team,
	Faculty,
	Student,
	University,
}

impl NodeKind {
	pub fn label(self) -> &'static str {
		match self {
			Self::Nucleus => "nucleus",
			Self::Project => "project",
			Self::Team => "team",
			Self::Faculty => "faculty",
			Self::Student => "student",
			Self::University => "university",
		}
	}
}

/// Display record carried by a node, one variant per kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
	NucleusProject(ProjectRecord),
	NucleusUniversity(UniversityRecord),
	Project(ProjectRecord),
	Team(TeamRecord),
	Faculty(FacultyRecord),
	Student(StudentRecord),
	University(UniversityRecord),
}

impl Payload {
	pub fn kind(&self) -> NodeKind {
		match self {
			Self::NucleusProject(_) | Self::NucleusUniversity(_) => NodeKind::Nucleus,
			Self::Project(_) => NodeKind::Project,
			Self::Team(_) => NodeKind::Team,
			Self::Faculty(_) => NodeKind::Faculty,
			Self::Student(_) => NodeKind::Student,
			Self::University(_) => NodeKind::University,
		}
	}

	pub fn id(&self) -> &str {
		match self {
			Self::NucleusProject(p) | Self::Project(p) => &p.id,
			Self::NucleusUniversity(u) | Self::University(u) => &u.id,
			Self::Team(t) => &t.id,
			Self::Faculty(f) => &f.id,
			Self::Student(s) => &s.id,
		}
	}

	pub fn name(&self) -> &str {
		let name = match self {
			Self::NucleusProject(p) | Self::Project(p) => &p.name,
			Self::NucleusUniversity(u) | Self::University(u) => &u.name,
			Self::Team(t) => &t.name,
			Self::Faculty(f) => &f.name,
			Self::Student(s) => &s.name,
		};
		if name.is_empty() { self.id() } else { name }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_partial_network_json() {
		let json = r#"{
			"projects": [{ "id": "PROVES", "name": "PROVES", "type": "collaborative" }],
			"students": [{ "id": "s1", "name": "Alice", "team_id": "t1", "status": "incoming" }],
			"interfaces": [{ "from": "a", "to": "b", "energy_loss": 0.2 }]
		}"#;
		let data: ResearchNetwork = serde_json::from_str(json).unwrap();
		assert!(data.teams.is_empty());
		assert_eq!(data.students[0].status, StudentStatus::Incoming);
		assert_eq!(data.interfaces[0].kind, None);
		assert_eq!(data.nucleus().map(|p| p.id.as_str()), Some("PROVES"));
	}

	#[test]
	fn unknown_student_status_reads_as_established() {
		let json = r#"{ "id": "s", "name": "S", "team_id": "t", "status": "alumni" }"#;
		let student: StudentRecord = serde_json::from_str(json).unwrap();
		assert_eq!(student.status, StudentStatus::Established);
	}

	#[test]
	fn known_student_statuses_decode() {
		let statuses: Vec<StudentStatus> =
			serde_json::from_str(r#"["incoming", "outgoing", "established"]"#).unwrap();
		assert_eq!(
			statuses,
			vec![
				StudentStatus::Incoming,
				StudentStatus::Outgoing,
				StudentStatus::Established
			]
		);
		let json = r#"{ "id": "s", "name": "S", "team_id": "t" }"#;
		let student: StudentRecord = serde_json::from_str(json).unwrap();
		assert_eq!(student.status, StudentStatus::Established);
	}

	#[test]
	fn consortium_nucleus_uses_camel_case_flag() {
		let json = r#"{ "universities": [
			{ "id": "A", "name": "A" },
			{ "id": "B", "name": "B", "isNucleus": true }
		] }"#;
		let data: Consortium = serde_json::from_str(json).unwrap();
		assert_eq!(data.nucleus().map(|u| u.id.as_str()), Some("B"));
	}

	#[test]
	fn empty_when_no_nucleus() {
		let data = ResearchNetwork {
			projects: vec![ProjectRecord {
				id: "X".into(),
				name: "X".into(),
				..Default::default()
			}],
			..Default::default()
		};
		assert!(Dataset::Research(data).is_empty());
		assert!(Dataset::Consortium(Consortium::default()).is_empty());
	}
}
