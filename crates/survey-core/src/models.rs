//! Core data models for the survey service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flight_plan::{FlightPlanResult, GridSpec, TreePlacement};

/// A rectangular estate laid out on a unit planting grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estate {
    pub id: String,
    /// Number of grid columns along the X axis
    pub length: u32,
    /// Number of grid rows along the Y axis
    pub width: u32,
    pub created_at: DateTime<Utc>,
}

impl Estate {
    /// Grid dimensions used by the flight-plan engine.
    pub fn grid(&self) -> GridSpec {
        GridSpec::new(self.length, self.width)
    }

    /// Whether `(x, y)` lies on this estate's grid.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (1..=self.length).contains(&x) && (1..=self.width).contains(&y)
    }
}

/// A tree planted on one grid cell of an estate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub id: String,
    pub estate_id: String,
    pub x: u32,
    pub y: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
}

impl Tree {
    pub fn placement(&self) -> TreePlacement {
        TreePlacement::new(self.x, self.y, self.height)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEstateRequest {
    pub length: i64,
    pub width: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTreeRequest {
    pub x: i64,
    pub y: i64,
    pub height: i64,
}

/// Response for any endpoint that creates a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub id: String,
}

/// Query string for the drone-plan endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DronePlanQuery {
    /// Flight-distance budget. Absent or non-positive disables the rest point.
    #[serde(default)]
    pub max_distance: Option<i64>,
}

/// Cell where the drone has to land to rest before the budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestPoint {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DronePlanResponse {
    pub distance: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<RestPoint>,
}

impl From<FlightPlanResult> for DronePlanResponse {
    fn from(result: FlightPlanResult) -> Self {
        Self {
            distance: result.total_distance,
            rest: result.return_point.map(|cell| RestPoint { x: cell.x, y: cell.y }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn estate(length: u32, width: u32) -> Estate {
        Estate {
            id: "estate-1".to_string(),
            length,
            width,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_estate_contains_bounds() {
        let estate = estate(5, 4);
        assert!(estate.contains(1, 1));
        assert!(estate.contains(5, 4));
        assert!(!estate.contains(0, 1));
        assert!(!estate.contains(6, 1));
        assert!(!estate.contains(1, 5));
    }

    #[test]
    fn test_drone_plan_response_omits_missing_rest() {
        let response = DronePlanResponse { distance: 12, rest: None };
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({ "distance": 12 }));

        let response = DronePlanResponse {
            distance: 204,
            rest: Some(RestPoint { x: 2, y: 2 }),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "distance": 204, "rest": { "x": 2, "y": 2 } })
        );
    }

    #[test]
    fn test_drone_plan_query_defaults_to_no_budget() {
        let query: DronePlanQuery = serde_json::from_value(json!({})).unwrap();
        assert!(query.max_distance.is_none());
    }
}
