//! Survey CLI - command line tools for the estate survey system.
//!
//! - plan_flight: run the flight-plan engine offline
//! - seed_estate: populate a running server with a random estate

pub mod planting;

pub use planting::{parse_tree_arg, random_trees};
