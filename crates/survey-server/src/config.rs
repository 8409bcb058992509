//! Server configuration from environment.

use std::env;

use survey_core::SurveyRules;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    pub max_tree_height: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SURVEY_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            database_path: env::var("SURVEY_DATABASE_PATH")
                .unwrap_or_else(|_| "data/survey.db".to_string()),
            database_max_connections: env::var("SURVEY_DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            max_tree_height: env::var("SURVEY_MAX_TREE_HEIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Validation rules derived from this configuration.
    pub fn rules(&self) -> SurveyRules {
        SurveyRules {
            max_tree_height: self.max_tree_height,
            ..SurveyRules::default()
        }
    }
}
