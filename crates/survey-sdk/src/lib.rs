//! Survey SDK - client library for the estate survey API.

pub mod client;

pub use client::{ClientError, SurveyClient};
pub use survey_core::{DronePlanResponse, EstateStats, RestPoint};
