//! Embedded datasets used when the backend is unreachable or empty, and for
//! the consortium view which has no backend feed.

use super::types::{
	Consortium, FacultyRecord, ProjectRecord, Relation, ResearchNetwork, StudentRecord,
	StudentStatus, TeamRecord, UniversityRecord,
};

fn project(id: &str, name: &str, kind: &str, is_nucleus: bool) -> ProjectRecord {
	ProjectRecord {
		id: id.into(),
		name: name.into(),
		kind: Some(kind.into()),
		is_nucleus,
	}
}

fn team(id: &str, name: &str, project_id: &str) -> TeamRecord {
	TeamRecord {
		id: id.into(),
		name: name.into(),
		project_id: project_id.into(),
		discipline: None,
		lifecycle: None,
	}
}

fn team_with(id: &str, name: &str, project_id: &str, discipline: &str, lifecycle: &str) -> TeamRecord {
	TeamRecord {
		discipline: Some(discipline.into()),
		lifecycle: Some(lifecycle.into()),
		..team(id, name, project_id)
	}
}

fn faculty(id: &str, name: &str, role: &str) -> FacultyRecord {
	FacultyRecord {
		id: id.into(),
		name: name.into(),
		role: Some(role.into()),
	}
}

fn student(id: &str, name: &str, team_id: &str, status: StudentStatus, year: u32) -> StudentRecord {
	StudentRecord {
		id: id.into(),
		name: name.into(),
		team_id: team_id.into(),
		status,
		year: Some(year),
	}
}

fn bond(from: &str, to: &str, energy_loss: f32, kind: &str) -> Relation {
	Relation {
		from: from.into(),
		to: to.into(),
		energy_loss,
		kind: Some(kind.into()),
	}
}

fn university(id: &str, name: &str, location: &str, role: &str, is_nucleus: bool) -> UniversityRecord {
	UniversityRecord {
		id: id.into(),
		name: name.into(),
		location: Some(location.into()),
		role: Some(role.into()),
		is_nucleus,
	}
}

/// Small molecule: 4 projects (one nucleus), 4 teams, 2 faculty, 10 bonds.
pub fn demo_network() -> ResearchNetwork {
	ResearchNetwork {
		projects: vec![
			project("PROVES", "PROVES", "collaborative", true),
			project("CubeSat1", "CubeSat Mission 1", "cubesat", false),
			project("CubeSat2", "CubeSat Mission 2", "cubesat", false),
			project("Research1", "Propulsion Research", "research", false),
		],
		teams: vec![
			team("T1", "Software Team", "CubeSat1"),
			team("T2", "Power Systems", "CubeSat1"),
			team("T3", "Structures Team", "CubeSat2"),
			team("T4", "Comms Team", "PROVES"),
		],
		faculty: vec![faculty("F1", "Dr. Smith", "PI"), faculty("F2", "Dr. Lee", "Co-PI")],
		students: Vec::new(),
		interfaces: vec![
			bond("PROVES", "CubeSat1", 0.15, "project-project"),
			bond("PROVES", "CubeSat2", 0.25, "project-project"),
			bond("CubeSat1", "Research1", 0.40, "project-project"),
			bond("F1", "PROVES", 0.05, "faculty-project"),
			bond("F2", "CubeSat1", 0.10, "faculty-project"),
			bond("T1", "CubeSat1", 0.20, "team-project"),
			bond("T2", "CubeSat1", 0.30, "team-project"),
			bond("T3", "CubeSat2", 0.15, "team-project"),
			bond("T4", "PROVES", 0.10, "team-project"),
			bond("T1", "T2", 0.25, "team-team"),
		],
	}
}

/// Full molecule with students: 4 projects, 8 teams, 26 students, 3 faculty.
pub fn comprehensive_sample() -> ResearchNetwork {
	use StudentStatus::{Established as E, Incoming as I, Outgoing as O};

	ResearchNetwork {
		projects: vec![
			project("PROVES", "PROVES", "collaborative", true),
			project("JPL_CubeSat", "JPL CubeSat Mission", "contract", false),
			project("Multi_Uni", "Multi-University Research", "collaborative", false),
			project("Contract_Pursuit", "Contract Proposal", "proposal", false),
		],
		teams: vec![
			team_with("proves_core", "PROVES Core Team", "PROVES", "Multidisciplinary", "established"),
			team_with("power_sys", "Power Systems", "JPL_CubeSat", "Electrical", "established"),
			team_with("flight_sw", "Flight Software", "JPL_CubeSat", "Software", "established"),
			team_with("comms", "Communications", "JPL_CubeSat", "Electrical", "incoming"),
			team_with("mission_ops", "Mission Operations", "Multi_Uni", "Mission Ops", "established"),
			team_with("mechanical", "Mechanical Systems", "Multi_Uni", "Mechanical", "established"),
			team_with("proposal_eng", "Proposal Engineering", "Contract_Pursuit", "Engineering", "incoming"),
			team_with("legacy_sw", "Software Legacy", "Contract_Pursuit", "Software", "outgoing"),
		],
		students: vec![
			student("s1", "Alice Chen", "proves_core", E, 3),
			student("s2", "Bob Martinez", "proves_core", E, 3),
			student("s3", "Carol Kim", "proves_core", E, 4),
			student("s4", "David Lopez", "power_sys", E, 3),
			student("s5", "Emma Wilson", "power_sys", E, 4),
			student("s6", "Frank Zhang", "power_sys", I, 2),
			student("s7", "Grace Lee", "power_sys", E, 3),
			student("s8", "Henry Patel", "flight_sw", E, 4),
			student("s9", "Iris Johnson", "flight_sw", E, 3),
			student("s10", "Jack Brown", "flight_sw", I, 2),
			student("s11", "Kelly Davis", "flight_sw", E, 3),
			student("s12", "Leo Garcia", "flight_sw", E, 4),
			student("s13", "Maya Singh", "comms", I, 2),
			student("s14", "Noah Taylor", "comms", I, 2),
			student("s15", "Olivia White", "comms", I, 1),
			student("s16", "Peter Anderson", "mission_ops", E, 3),
			student("s17", "Quinn Thomas", "mission_ops", E, 4),
			student("s18", "Rachel Moore", "mission_ops", I, 2),
			student("s19", "Sam Jackson", "mission_ops", E, 3),
			student("s20", "Tina Martin", "mechanical", E, 4),
			student("s21", "Uma Patel", "mechanical", E, 3),
			student("s22", "Victor Lee", "mechanical", I, 2),
			student("s23", "Wendy Clark", "proposal_eng", I, 1),
			student("s24", "Xavier Rodriguez", "proposal_eng", I, 2),
			student("s25", "Yuki Tanaka", "legacy_sw", O, 4),
			student("s26", "Zoe Williams", "legacy_sw", O, 4),
		],
		faculty: vec![
			faculty("f1", "Dr. Sarah Chen", "Principal Investigator"),
			faculty("f2", "Dr. James Rodriguez", "Technical Lead"),
			faculty("f3", "Dr. Maria Garcia", "Program Director"),
		],
		interfaces: vec![
			bond("PROVES", "JPL_CubeSat", 0.10, "knowledge_transfer"),
			bond("PROVES", "Multi_Uni", 0.12, "knowledge_transfer"),
			bond("PROVES", "Contract_Pursuit", 0.15, "knowledge_transfer"),
			bond("PROVES", "proves_core", 0.08, "project_team"),
			bond("JPL_CubeSat", "power_sys", 0.12, "project_team"),
			bond("JPL_CubeSat", "flight_sw", 0.10, "project_team"),
			bond("JPL_CubeSat", "comms", 0.25, "project_team"),
			bond("Multi_Uni", "mission_ops", 0.15, "project_team"),
			bond("Multi_Uni", "mechanical", 0.18, "project_team"),
			bond("Contract_Pursuit", "proposal_eng", 0.40, "project_team"),
			bond("Contract_Pursuit", "legacy_sw", 0.65, "project_team"),
			bond("proves_core", "s1", 0.05, "team_student"),
			bond("proves_core", "s2", 0.08, "team_student"),
			bond("proves_core", "s3", 0.10, "team_student"),
			bond("power_sys", "s4", 0.12, "team_student"),
			bond("power_sys", "s5", 0.10, "team_student"),
			bond("power_sys", "s6", 0.30, "team_student"),
			bond("power_sys", "s7", 0.15, "team_student"),
			bond("flight_sw", "s8", 0.08, "team_student"),
			bond("flight_sw", "s9", 0.12, "team_student"),
			bond("flight_sw", "s10", 0.35, "team_student"),
			bond("flight_sw", "s11", 0.14, "team_student"),
			bond("flight_sw", "s12", 0.10, "team_student"),
			bond("comms", "s13", 0.40, "team_student"),
			bond("comms", "s14", 0.38, "team_student"),
			bond("comms", "s15", 0.50, "team_student"),
			bond("mission_ops", "s16", 0.15, "team_student"),
			bond("mission_ops", "s17", 0.12, "team_student"),
			bond("mission_ops", "s18", 0.28, "team_student"),
			bond("mission_ops", "s19", 0.18, "team_student"),
			bond("mechanical", "s20", 0.14, "team_student"),
			bond("mechanical", "s21", 0.16, "team_student"),
			bond("mechanical", "s22", 0.32, "team_student"),
			bond("proposal_eng", "s23", 0.55, "team_student"),
			bond("proposal_eng", "s24", 0.45, "team_student"),
			bond("legacy_sw", "s25", 0.70, "team_student"),
			bond("legacy_sw", "s26", 0.68, "team_student"),
			bond("f1", "proves_core", 0.10, "mentoring"),
			bond("f1", "JPL_CubeSat", 0.12, "mentoring"),
			bond("f2", "flight_sw", 0.15, "mentoring"),
			bond("f2", "power_sys", 0.18, "mentoring"),
			bond("f3", "mission_ops", 0.20, "mentoring"),
			bond("f3", "mechanical", 0.22, "mentoring"),
			bond("power_sys", "flight_sw", 0.20, "team_team"),
			bond("flight_sw", "comms", 0.30, "team_team"),
			bond("legacy_sw", "flight_sw", 0.50, "team_team"),
			bond("s8", "s9", 0.08, "student_student"),
			bond("s4", "s8", 0.25, "student_student"),
			bond("s25", "s12", 0.60, "student_student"),
		],
	}
}

/// Lead institution plus seven partners and ten collaborations.
pub fn demo_consortium() -> Consortium {
	const PROVES: &str = "PROVES collaboration";
	const CROSS: &str = "cross-university";

	Consortium {
		universities: vec![
			university("CalPolyPomona", "Cal Poly Pomona", "Pomona, CA", "Lead Institution", true),
			university("TexasState", "Texas State University", "San Marcos, TX", "Partner", false),
			university("Columbia", "Columbia University", "New York, NY", "Partner", false),
			university("UniversityD", "University D", "TBD", "Partner", false),
			university("UniversityE", "University E", "TBD", "Partner", false),
			university("UniversityF", "University F", "TBD", "Partner", false),
			university("UniversityG", "University G", "TBD", "Partner", false),
			university("UniversityH", "University H", "TBD", "Partner", false),
		],
		collaborations: vec![
			bond("CalPolyPomona", "TexasState", 0.12, PROVES),
			bond("CalPolyPomona", "Columbia", 0.15, PROVES),
			bond("CalPolyPomona", "UniversityD", 0.25, PROVES),
			bond("CalPolyPomona", "UniversityE", 0.20, PROVES),
			bond("CalPolyPomona", "UniversityF", 0.30, PROVES),
			bond("CalPolyPomona", "UniversityG", 0.28, PROVES),
			bond("CalPolyPomona", "UniversityH", 0.35, PROVES),
			bond("TexasState", "Columbia", 0.40, CROSS),
			bond("Columbia", "UniversityD", 0.45, CROSS),
			bond("UniversityE", "UniversityF", 0.50, CROSS),
		],
	}
}
