//! Runtime configuration taken from the page URL.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::molecule::{Role, Viewer};

/// Who is looking, parsed from `?researcher=true&university=<id>`.
pub fn viewer_from_query(researcher: Option<&str>, university: Option<&str>) -> Viewer {
	let university = university
		.map(str::trim)
		.filter(|id| !id.is_empty())
		.map(str::to_string);
	match researcher {
		Some(flag) if flag.eq_ignore_ascii_case("true") => Viewer {
			role: Role::Researcher,
			university,
		},
		_ => Viewer::member(university),
	}
}

/// Reactive viewer for the current route.
pub fn use_viewer() -> Memo<Viewer> {
	let query = use_query_map();
	Memo::new(move |_| {
		query.with(|q| viewer_from_query(q.get_str("researcher"), q.get_str("university")))
	})
}

/// Where the backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	/// Prefix of every endpoint, without a trailing slash.
	pub base_url: String,
}

impl ApiConfig {
	/// `<origin>/api`.
	pub fn new(origin: &str) -> Self {
		Self {
			base_url: format!("{}/api", origin.trim_end_matches('/')),
		}
	}

	/// Points at `<origin>/api` of the page being served.
	pub fn from_window() -> Self {
		let origin = web_sys::window()
			.and_then(|w| w.location().origin().ok())
			.unwrap_or_default();
		Self::new(&origin)
	}

	/// `<base>/<path>` for a fixed endpoint such as `analytics/dimensions`.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}

	/// Research network of one university; an empty id asks for all.
	pub fn network_data_url(&self, university: Option<&str>) -> String {
		format!(
			"{}/network-data?university={}",
			self.base_url,
			String::from(js_sys::encode_uri_component(university.unwrap_or_default()))
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn researcher_flag_is_case_insensitive() {
		assert_eq!(viewer_from_query(Some("TRUE"), None).role, Role::Researcher);
		assert_eq!(viewer_from_query(Some("yes"), None).role, Role::Member);
		assert_eq!(viewer_from_query(None, None), Viewer::default());
	}

	#[test]
	fn blank_university_is_ignored() {
		assert_eq!(viewer_from_query(None, Some("  ")).university, None);
		assert_eq!(
			viewer_from_query(None, Some("cpp")).university.as_deref(),
			Some("cpp")
		);
	}

	#[test]
	fn api_base_follows_origin() {
		let api = ApiConfig::new("https://frames.example/");
		assert_eq!(api.base_url, "https://frames.example/api");
	}

	#[test]
	fn endpoints_hang_off_the_base() {
		let api = ApiConfig::new("http://localhost:5000");
		assert_eq!(api.endpoint("/teams"), "http://localhost:5000/api/teams");
		assert_eq!(
			api.endpoint("analytics/dimensions"),
			"http://localhost:5000/api/analytics/dimensions"
		);
	}
}
