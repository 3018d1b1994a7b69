//! Backend calls: the research network for the single-university view and
//! the analytics catalogue, filter options and queries.

use gloo_net::http::{Request, Response};
use log::{info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::analytics::{Catalog, FilterOption, FilterOptions, Outcome, Query};
use crate::components::molecule::{ResearchNetwork, samples};
use crate::config::ApiConfig;
use crate::error::{FramesError, Result};

/// Reject datasets the builder could not centre on a nucleus.
fn accept(network: ResearchNetwork) -> Result<ResearchNetwork> {
	if network.projects.is_empty() || network.nucleus().is_none() {
		return Err(FramesError::EmptyDataset);
	}
	Ok(network)
}

/// Decode a `network-data` response body.
pub fn parse_network(body: &str) -> Result<ResearchNetwork> {
	accept(serde_json::from_str(body)?)
}

/// Body of a successful response; anything else becomes `Status`.
async fn body_of(resp: Response) -> Result<String> {
	if !resp.ok() {
		return Err(FramesError::Status(resp.status()));
	}
	Ok(resp.text().await?)
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
	let resp = Request::get(url).send().await?;
	Ok(serde_json::from_str(&body_of(resp).await?)?)
}

pub async fn fetch_network(api: &ApiConfig, university: Option<&str>) -> Result<ResearchNetwork> {
	let url = api.network_data_url(university);
	info!("loading network data from {url}");
	let resp = Request::get(&url).send().await?;
	parse_network(&body_of(resp).await?)
}

/// Fetch the network, falling back to the demonstration molecule on any
/// failure.
pub async fn load_network(api: &ApiConfig, university: Option<&str>) -> ResearchNetwork {
	match fetch_network(api, university).await {
		Ok(network) => {
			info!(
				"loaded {} projects and {} interfaces",
				network.projects.len(),
				network.interfaces.len()
			);
			network
		}
		Err(err) => {
			warn!("{err}, using demo data");
			samples::demo_network()
		}
	}
}

/// A catalogue without metrics offers nothing to choose from.
fn usable_catalog(catalog: Catalog) -> Result<Catalog> {
	if catalog.metrics.is_empty() {
		return Err(FramesError::Decode("catalogue lists no metrics".into()));
	}
	Ok(catalog)
}

/// Metrics and dimensions from `/analytics/dimensions`, or the embedded
/// catalogue when the backend cannot be reached.
pub async fn load_catalog(api: &ApiConfig) -> Catalog {
	let fetched = get_json(&api.endpoint("analytics/dimensions"))
		.await
		.and_then(usable_catalog);
	match fetched {
		Ok(catalog) => {
			info!(
				"loaded {} metrics and {} dimensions",
				catalog.metrics.len(),
				catalog.dimensions.len()
			);
			catalog
		}
		Err(err) => {
			warn!("{err}, using demo analytics catalogue");
			Catalog::demo()
		}
	}
}

/// Combine the three option lists; any failure loses the whole set.
fn combine_options(
	universities: Result<Vec<FilterOption>>,
	projects: Result<Vec<FilterOption>>,
	teams: Result<Vec<FilterOption>>,
) -> Result<FilterOptions> {
	Ok(FilterOptions {
		universities: universities?,
		projects: projects?,
		teams: teams?,
	})
}

/// Options for the university, project and team filters, falling back to
/// the demonstration data when any list fails.
pub async fn load_filter_options(api: &ApiConfig) -> FilterOptions {
	let universities = get_json(&api.endpoint("universities")).await;
	let projects = get_json(&api.endpoint("projects")).await;
	let teams = get_json(&api.endpoint("teams")).await;
	match combine_options(universities, projects, teams) {
		Ok(options) => options,
		Err(err) => {
			warn!("{err}, using demo filter options");
			FilterOptions::demo()
		}
	}
}

#[derive(Deserialize)]
struct ServerError {
	error: String,
}

/// The `error` field of a failed query, when the server sent one.
fn server_message(body: &str) -> Option<String> {
	serde_json::from_str::<ServerError>(body).ok().map(|e| e.error)
}

/// Run one analytics query. Not retried and never replaced by demo data.
pub async fn query_analytics(api: &ApiConfig, query: &Query) -> Result<Outcome> {
	info!("querying {} grouped by {:?}", query.metric, query.group_by);
	let resp = Request::post(&api.endpoint("analytics/data"))
		.json(query)?
		.send()
		.await?;
	if !resp.ok() {
		let status = resp.status();
		let body = resp.text().await.unwrap_or_default();
		return Err(match server_message(&body) {
			Some(message) => FramesError::Rejected(message),
			None => FramesError::Status(status),
		});
	}
	let outcome: Outcome = serde_json::from_str(&resp.text().await?)?;
	info!("{} points for {}", outcome.data.len(), outcome.metric);
	Ok(outcome)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_a_minimal_network() {
		let body = r#"{
			"projects": [{"id": "PROVES", "name": "PROVES"}],
			"teams": [{"id": "T1", "name": "Avionics", "project_id": "PROVES"}],
			"interfaces": [{"from": "PROVES", "to": "T1", "energy_loss": 0.25}]
		}"#;
		let network = parse_network(body).unwrap();
		assert_eq!(network.teams.len(), 1);
		assert_eq!(network.interfaces[0].energy_loss, 0.25);
	}

	#[test]
	fn empty_projects_are_rejected() {
		let err = parse_network(r#"{"projects": []}"#).unwrap_err();
		assert!(matches!(err, FramesError::EmptyDataset));
	}

	#[test]
	fn malformed_body_is_a_decode_error() {
		let err = parse_network("<html>").unwrap_err();
		assert!(matches!(err, FramesError::Decode(_)));
	}

	#[test]
	fn catalogue_without_metrics_is_unusable() {
		assert!(usable_catalog(Catalog::default()).is_err());
		assert_eq!(usable_catalog(Catalog::demo()).unwrap(), Catalog::demo());
	}

	#[test]
	fn filter_options_decode_from_id_name_arrays() {
		let body = r#"[{"id": "cpp", "name": "Cal Poly Pomona", "location": "Pomona, CA"}]"#;
		let universities: Vec<FilterOption> = serde_json::from_str(body).unwrap();
		let options = combine_options(Ok(universities), Ok(Vec::new()), Ok(Vec::new())).unwrap();
		assert_eq!(options.universities[0].name, "Cal Poly Pomona");
	}

	#[test]
	fn one_failed_option_list_fails_the_set() {
		let err = combine_options(Ok(Vec::new()), Err(FramesError::Status(500)), Ok(Vec::new()))
			.unwrap_err();
		assert!(matches!(err, FramesError::Status(500)));
	}

	#[test]
	fn server_error_messages_are_surfaced() {
		assert_eq!(
			server_message(r#"{"error": "Unknown metric"}"#).as_deref(),
			Some("Unknown metric")
		);
		assert!(server_message("Internal Server Error").is_none());
	}
}
