pub mod flight_plan;
pub mod models;
pub mod rules;
pub mod stats;

pub use flight_plan::{
    compute_flight_plan, compute_flight_plan_traced, CellVisit, FlightPlanResult, FlightPlanner,
    GridCell, GridSpec, SerpentineCells, TreePlacement, HOP_COST,
};
pub use models::{
    CreateEstateRequest, CreateResponse, CreateTreeRequest, DronePlanQuery, DronePlanResponse,
    Estate, ErrorResponse, RestPoint, Tree,
};
pub use rules::{SurveyRules, ValidationError};
pub use stats::EstateStats;
