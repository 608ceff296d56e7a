//! Error type shared by the catalog, the resolution client and the search session.

use thiserror::Error;

/// Everything that can go wrong between loading the catalog and rendering a result.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExplorerError {
	/// The embedded element mapping could not be parsed.
	#[error("failed to load element catalog: {0}")]
	CatalogLoad(String),

	/// The request never produced a response (network, CORS, client setup).
	#[error("could not reach the recipe service: {0}")]
	Request(String),

	/// The service answered with a non-success status.
	#[error("recipe service returned {status}: {message}")]
	Status { status: u16, message: String },

	/// The response body was not JSON.
	#[error("recipe service sent an unreadable response: {0}")]
	Decode(String),
}

impl ExplorerError {
	/// Short hint shown under the message in the failure view.
	pub fn hint(&self) -> &'static str {
		match self {
			Self::CatalogLoad(_) => "Built-in elements are being used instead.",
			Self::Request(_) => "Check that the recipe service is running, then retry.",
			Self::Status { status, .. } if *status < 500 => {
				"The service rejected this search. Adjust the selection and retry."
			}
			Self::Status { .. } => "The service failed while searching. Retry in a moment.",
			Self::Decode(_) => "The service may be a different version. Retry or go back.",
		}
	}
}

impl From<reqwest::Error> for ExplorerError {
	fn from(err: reqwest::Error) -> Self {
		match err.status() {
			Some(status) => Self::Status {
				status: status.as_u16(),
				message: err.to_string(),
			},
			None if err.is_decode() => Self::Decode(err.to_string()),
			None => Self::Request(err.to_string()),
		}
	}
}

impl From<serde_json::Error> for ExplorerError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}
