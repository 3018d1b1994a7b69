//! Errors raised while talking to the backend or preparing the canvas.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Every failure the views can run into.
#[derive(Debug, Error)]
pub enum FramesError {
	/// Transport failure before any response arrived.
	#[error("network request failed: {0}")]
	Fetch(String),

	/// Non-success HTTP status.
	#[error("server answered with status {0}")]
	Status(u16),

	/// Body was not the expected JSON shape.
	#[error("could not decode response: {0}")]
	Decode(String),

	/// The server refused a query and said why.
	#[error("{0}")]
	Rejected(String),

	/// No nucleus, or nothing to orbit it.
	#[error("dataset has no nucleus or no orbiting entities")]
	EmptyDataset,

	/// A browser capability the view needs is missing. Fatal to the view.
	#[error("canvas unavailable: {0}")]
	Canvas(String),
}

impl FramesError {
	/// Wrap a browser exception raised while setting up the canvas.
	pub fn canvas(err: JsValue) -> Self {
		Self::Canvas(err.as_string().unwrap_or_else(|| format!("{err:?}")))
	}
}

impl From<gloo_net::Error> for FramesError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => Self::Decode(e.to_string()),
			other => Self::Fetch(other.to_string()),
		}
	}
}

impl From<serde_json::Error> for FramesError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}

/// Result alias over [`FramesError`].
pub type Result<T> = std::result::Result<T, FramesError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_failure() {
		assert_eq!(
			FramesError::Status(503).to_string(),
			"server answered with status 503"
		);
		assert_eq!(
			FramesError::Canvas("no 2d context".into()).to_string(),
			"canvas unavailable: no 2d context"
		);
		assert_eq!(FramesError::Rejected("Unknown metric".into()).to_string(), "Unknown metric");
	}

	#[test]
	fn decode_errors_keep_the_message() {
		let err: FramesError = serde_json::from_str::<u32>("nope").unwrap_err().into();
		assert!(matches!(err, FramesError::Decode(_)));
		assert!(err.to_string().starts_with("could not decode response"));
	}
}
