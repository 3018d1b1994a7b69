//! Comparative analytics: the metric catalogue, filter options, queries and
//! the summaries shown beside a chart.

use serde::{Deserialize, Serialize};

use crate::components::molecule::samples;

/// Something that can be measured, e.g. `status_distribution`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metric {
	/// Wire identifier.
	pub value: String,
	/// Human label.
	pub label: String,
	/// Hint shown under the metric select.
	#[serde(default)]
	pub description: String,
}

/// A grouping axis and the metrics it can split.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
	/// Wire identifier.
	pub value: String,
	/// Human label.
	pub label: String,
	/// Metric identifiers this dimension applies to.
	#[serde(rename = "applicableTo", default)]
	pub applicable_to: Vec<String>,
}

/// Response of `/analytics/dimensions`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
	/// Selectable metrics.
	#[serde(default)]
	pub metrics: Vec<Metric>,
	/// Selectable group-by dimensions.
	#[serde(default)]
	pub dimensions: Vec<Dimension>,
}

fn metric(value: &str, label: &str, description: &str) -> Metric {
	Metric {
		value: value.into(),
		label: label.into(),
		description: description.into(),
	}
}

fn dimension(value: &str, label: &str, applicable_to: &[&str]) -> Dimension {
	Dimension {
		value: value.into(),
		label: label.into(),
		applicable_to: applicable_to.iter().map(|m| m.to_string()).collect(),
	}
}

impl Catalog {
	/// Offline catalogue used when the backend cannot describe itself.
	pub fn demo() -> Self {
		const STATUS: &str = "status_distribution";
		const CROSS: &str = "students_by_status_and_expertise";
		const TERMS: &str = "avg_terms_remaining";
		Self {
			metrics: vec![
				metric(STATUS, "Student Status Distribution", "Incoming, established and outgoing students"),
				metric(CROSS, "Students by Status and Expertise", "Cross-tabulation of status against expertise area"),
				metric(TERMS, "Average Terms Remaining", "Mean terms left before students graduate"),
			],
			dimensions: vec![
				dimension("university", "University", &[STATUS, TERMS]),
				dimension("project", "Project", &[STATUS, TERMS]),
				dimension("team", "Team", &[STATUS, TERMS]),
				dimension("expertise", "Expertise Area", &[STATUS, TERMS]),
			],
		}
	}

	/// Metric with the given identifier.
	pub fn metric(&self, value: &str) -> Option<&Metric> {
		self.metrics.iter().find(|m| m.value == value)
	}

	/// Dimensions the metric can be grouped by, in catalogue order.
	pub fn group_by_options(&self, metric: &str) -> Vec<&Dimension> {
		self.dimensions
			.iter()
			.filter(|d| d.applicable_to.iter().any(|m| m == metric))
			.collect()
	}

	fn dimension(&self, value: &str) -> Option<&Dimension> {
		self.dimensions.iter().find(|d| d.value == value)
	}
}

/// How a metric is drawn by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
	/// Horizontal bars, one per group.
	Bar,
	/// Shares of a whole.
	Doughnut,
}

/// Proportions read best as shares; everything else as bars.
pub fn suggested_chart(metric: &str) -> ChartKind {
	match metric {
		"status_distribution" | "students_by_status_and_expertise" => ChartKind::Doughnut,
		_ => ChartKind::Bar,
	}
}

/// One entry of `/universities`, `/projects` or `/teams`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
	/// Identifier sent back in the query filters.
	pub id: String,
	/// Shown in the select.
	pub name: String,
}

impl FilterOption {
	fn new(id: &str, name: &str) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
		}
	}
}

/// Everything the three filter selects offer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOptions {
	/// Consortium members.
	pub universities: Vec<FilterOption>,
	/// Projects across all universities.
	pub projects: Vec<FilterOption>,
	/// Teams across all projects.
	pub teams: Vec<FilterOption>,
}

impl FilterOptions {
	/// Options drawn from the embedded demonstration data.
	pub fn demo() -> Self {
		let consortium = samples::demo_consortium();
		let network = samples::comprehensive_sample();
		Self {
			universities: consortium
				.universities
				.iter()
				.map(|u| FilterOption::new(&u.id, &u.name))
				.collect(),
			projects: network
				.projects
				.iter()
				.map(|p| FilterOption::new(&p.id, &p.name))
				.collect(),
			teams: network
				.teams
				.iter()
				.map(|t| FilterOption::new(&t.id, &t.name))
				.collect(),
		}
	}
}

/// Name for `id`, or the id itself when the list does not know it.
fn name_of<'a>(options: &'a [FilterOption], id: &'a str) -> &'a str {
	options
		.iter()
		.find(|o| o.id == id)
		.map_or(id, |o| o.name.as_str())
}

/// Active filters of a query. Unset filters are left off the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
	/// Restrict to one university.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub university_id: Option<String>,
	/// Restrict to one project.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub project_id: Option<String>,
	/// Restrict to one team.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub team_id: Option<String>,
}

fn chosen(value: &str) -> Option<String> {
	let value = value.trim();
	(!value.is_empty()).then(|| value.to_string())
}

impl Filters {
	/// From raw select values, where an empty value means "all".
	pub fn from_selects(university: &str, project: &str, team: &str) -> Self {
		Self {
			university_id: chosen(university),
			project_id: chosen(project),
			team_id: chosen(team),
		}
	}
}

/// Body of `POST /analytics/data`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Query {
	/// Metric identifier.
	pub metric: String,
	/// Dimension identifier; absent for a single total.
	#[serde(rename = "groupBy", skip_serializing_if = "Option::is_none")]
	pub group_by: Option<String>,
	/// Restrictions applied before aggregation.
	pub filters: Filters,
}

impl Query {
	/// `None` until a metric has been chosen.
	pub fn from_selects(metric: &str, group_by: &str, filters: Filters) -> Option<Self> {
		Some(Self {
			metric: chosen(metric)?,
			group_by: chosen(group_by),
			filters,
		})
	}
}

/// One aggregated value. Cross-tabulations name their cell by status and
/// expertise instead of a label.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DataPoint {
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub value: f64,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub expertise: Option<String>,
}

impl DataPoint {
	/// Label to show for this point.
	pub fn display_label(&self) -> String {
		match (&self.label, &self.status, &self.expertise) {
			(Some(label), _, _) => label.clone(),
			(None, Some(status), Some(expertise)) => {
				format!("{} / {expertise}", status.to_uppercase())
			}
			(None, Some(one), None) | (None, None, Some(one)) => one.clone(),
			(None, None, None) => "Total".into(),
		}
	}
}

/// Response of `POST /analytics/data`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Outcome {
	/// Echo of the requested metric.
	#[serde(default)]
	pub metric: String,
	/// Aggregated values, one per group.
	#[serde(default)]
	pub data: Vec<DataPoint>,
}

/// Chart heading: the metric label, `by <dimension>` when grouped, and a
/// subtitle naming the university and project filters.
pub fn chart_heading(catalog: &Catalog, options: &FilterOptions, query: &Query) -> (String, String) {
	let mut title = catalog
		.metric(&query.metric)
		.map_or_else(|| "Analytics".to_string(), |m| m.label.clone());
	if let Some(dim) = query.group_by.as_deref().and_then(|g| catalog.dimension(g)) {
		title.push_str(" by ");
		title.push_str(&dim.label);
	}

	let mut parts = Vec::new();
	if let Some(id) = &query.filters.university_id {
		parts.push(format!("University: {}", name_of(&options.universities, id)));
	}
	if let Some(id) = &query.filters.project_id {
		parts.push(format!("Project: {}", name_of(&options.projects, id)));
	}
	(title, parts.join(" • "))
}

/// Summary figures for a result set.
#[derive(Clone, Debug, PartialEq)]
pub struct Insights {
	pub total: f64,
	pub highest: (String, f64),
	/// Only when there is more than one point.
	pub lowest: Option<(String, f64)>,
	pub average: f64,
}

impl Insights {
	/// `None` for an empty result.
	pub fn of(data: &[DataPoint]) -> Option<Self> {
		let first = data.first()?;
		let total: f64 = data.iter().map(|d| d.value).sum();
		let mut highest = first;
		let mut lowest = first;
		for point in &data[1..] {
			if point.value > highest.value {
				highest = point;
			}
			if point.value <= lowest.value {
				lowest = point;
			}
		}
		Some(Self {
			total,
			highest: (highest.display_label(), highest.value),
			lowest: (data.len() > 1).then(|| (lowest.display_label(), lowest.value)),
			average: total / data.len() as f64,
		})
	}

	/// Rendered lines, totals to two decimals.
	pub fn lines(&self) -> Vec<(&'static str, String)> {
		let mut lines = vec![
			("Total", format!("{:.2}", self.total)),
			("Highest", format!("{} ({})", self.highest.0, self.highest.1)),
		];
		if let Some((label, value)) = &self.lowest {
			lines.push(("Lowest", format!("{label} ({value})")));
		}
		lines.push(("Average", format!("{:.2}", self.average)));
		lines
	}
}

/// Bar width in percent of the largest value.
pub fn bar_share(value: f64, max: f64) -> f64 {
	if max <= 0.0 || !value.is_finite() {
		return 0.0;
	}
	(value / max * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn point(label: &str, value: f64) -> DataPoint {
		DataPoint {
			label: Some(label.into()),
			value,
			..DataPoint::default()
		}
	}

	#[test]
	fn group_by_options_follow_the_metric() {
		let catalog = Catalog::demo();
		let status: Vec<_> = catalog
			.group_by_options("status_distribution")
			.iter()
			.map(|d| d.value.as_str())
			.collect();
		assert_eq!(status, ["university", "project", "team", "expertise"]);
		assert!(catalog.group_by_options("students_by_status_and_expertise").is_empty());
		assert!(catalog.group_by_options("unknown").is_empty());
	}

	#[test]
	fn catalog_decodes_applicable_to() {
		let body = r#"{
			"metrics": [{"value": "m", "label": "M"}],
			"dimensions": [{"value": "d", "label": "D", "applicableTo": ["m"]}]
		}"#;
		let catalog: Catalog = serde_json::from_str(body).unwrap();
		assert_eq!(catalog.metric("m").unwrap().description, "");
		assert_eq!(catalog.group_by_options("m").len(), 1);
	}

	#[test]
	fn shares_are_doughnuts_and_averages_are_bars() {
		assert_eq!(suggested_chart("status_distribution"), ChartKind::Doughnut);
		assert_eq!(suggested_chart("students_by_status_and_expertise"), ChartKind::Doughnut);
		assert_eq!(suggested_chart("avg_terms_remaining"), ChartKind::Bar);
	}

	#[test]
	fn query_needs_a_metric_and_drops_empty_filters() {
		assert!(Query::from_selects(" ", "university", Filters::default()).is_none());

		let query = Query::from_selects(
			"status_distribution",
			"",
			Filters::from_selects("cpp", "", ""),
		)
		.unwrap();
		let json = serde_json::to_value(&query).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"metric": "status_distribution",
				"filters": {"university_id": "cpp"}
			})
		);
	}

	#[test]
	fn heading_names_dimension_and_filters() {
		let catalog = Catalog::demo();
		let options = FilterOptions {
			universities: vec![FilterOption::new("cpp", "Cal Poly Pomona")],
			..FilterOptions::default()
		};
		let query = Query::from_selects(
			"avg_terms_remaining",
			"team",
			Filters::from_selects("cpp", "ghost", "T1"),
		)
		.unwrap();
		let (title, subtitle) = chart_heading(&catalog, &options, &query);
		assert_eq!(title, "Average Terms Remaining by Team");
		assert_eq!(subtitle, "University: Cal Poly Pomona • Project: ghost");

		let bare = Query::from_selects("mystery", "", Filters::default()).unwrap();
		assert_eq!(chart_heading(&catalog, &options, &bare), ("Analytics".into(), String::new()));
	}

	#[test]
	fn insights_summarise_the_result() {
		let data = [point("A", 4.0), point("B", 1.0), point("C", 7.0)];
		let insights = Insights::of(&data).unwrap();
		assert_eq!(insights.highest, ("C".into(), 7.0));
		assert_eq!(insights.lowest, Some(("B".into(), 1.0)));
		assert_eq!(
			insights.lines(),
			vec![
				("Total", "12.00".to_string()),
				("Highest", "C (7)".to_string()),
				("Lowest", "B (1)".to_string()),
				("Average", "4.00".to_string()),
			]
		);
	}

	#[test]
	fn single_point_has_no_lowest_and_empty_has_nothing() {
		let insights = Insights::of(&[point("Only", 2.5)]).unwrap();
		assert!(insights.lowest.is_none());
		assert_eq!(insights.lines().len(), 3);
		assert!(Insights::of(&[]).is_none());
	}

	#[test]
	fn cross_tab_cells_are_labelled_by_status_and_expertise() {
		let cell: DataPoint =
			serde_json::from_str(r#"{"status": "incoming", "expertise": "Software", "value": 3}"#)
				.unwrap();
		assert_eq!(cell.display_label(), "INCOMING / Software");
		assert_eq!(DataPoint::default().display_label(), "Total");
	}

	#[test]
	fn demo_filter_options_come_from_the_samples() {
		let options = FilterOptions::demo();
		assert_eq!(options.universities.len(), samples::demo_consortium().universities.len());
		assert_eq!(options.projects.len(), 4);
		assert!(options.teams.iter().any(|t| t.id == "flight_sw"));
	}

	#[test]
	fn bars_scale_to_the_largest_value() {
		assert_eq!(bar_share(5.0, 10.0), 50.0);
		assert_eq!(bar_share(5.0, 0.0), 0.0);
		assert_eq!(bar_share(-1.0, 10.0), 0.0);
	}
}
