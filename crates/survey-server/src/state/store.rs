//! Application state backed by SQLite with a DashMap estate cache.

use anyhow::{Context, Result};
use chrono::Utc;
use dashmap::DashMap;
use survey_core::{
    compute_flight_plan, Estate, EstateStats, FlightPlanResult, SurveyRules, Tree, TreePlacement,
};
use uuid::Uuid;

use crate::config::Config;
use crate::persistence::{estates, trees, trees::InsertTreeOutcome, Database};

/// Result of planting a tree on an estate.
#[derive(Debug, Clone)]
pub enum PlantTreeOutcome {
    Planted(Tree),
    /// The cell already holds a tree
    Occupied,
}

/// Application state shared across request handlers.
pub struct AppState {
    db: Database,
    config: Config,
    rules: SurveyRules,
    estates: DashMap<String, Estate>,
}

impl AppState {
    pub fn with_database(db: Database, config: Config) -> Self {
        let rules = config.rules();
        Self {
            db,
            config,
            rules,
            estates: DashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &SurveyRules {
        &self.rules
    }

    /// Warm the estate cache from the database.
    pub async fn load_from_database(&self) -> Result<()> {
        let loaded = estates::load_all_estates(self.db.pool()).await?;
        let count = loaded.len();
        for estate in loaded {
            self.estates.insert(estate.id.clone(), estate);
        }
        tracing::info!("Loaded {} estates from database", count);
        Ok(())
    }

    /// Persist a new estate and cache it.
    pub async fn create_estate(&self, length: u32, width: u32) -> Result<Estate> {
        let estate = Estate {
            id: Uuid::new_v4().to_string(),
            length,
            width,
            created_at: Utc::now(),
        };

        estates::insert_estate(self.db.pool(), &estate).await?;
        self.estates.insert(estate.id.clone(), estate.clone());

        Ok(estate)
    }

    /// Look up an estate, falling back to the database on a cache miss.
    pub async fn get_estate(&self, id: &str) -> Result<Option<Estate>> {
        if let Some(estate) = self.estates.get(id) {
            return Ok(Some(estate.value().clone()));
        }

        let estate = estates::get_estate(self.db.pool(), id).await?;
        if let Some(estate) = &estate {
            self.estates.insert(estate.id.clone(), estate.clone());
        }
        Ok(estate)
    }

    /// Plant a tree on an already validated cell.
    pub async fn plant_tree(
        &self,
        estate: &Estate,
        x: u32,
        y: u32,
        height: u32,
    ) -> Result<PlantTreeOutcome> {
        let tree = Tree {
            id: Uuid::new_v4().to_string(),
            estate_id: estate.id.clone(),
            x,
            y,
            height,
            created_at: Utc::now(),
        };

        match trees::insert_tree(self.db.pool(), &tree).await? {
            InsertTreeOutcome::Created => Ok(PlantTreeOutcome::Planted(tree)),
            InsertTreeOutcome::Duplicate => Ok(PlantTreeOutcome::Occupied),
        }
    }

    pub async fn list_trees(&self, estate_id: &str) -> Result<Vec<Tree>> {
        trees::list_trees(self.db.pool(), estate_id).await
    }

    pub async fn estate_stats(&self, estate_id: &str) -> Result<EstateStats> {
        let heights = trees::list_tree_heights(self.db.pool(), estate_id).await?;
        Ok(EstateStats::from_heights(&heights))
    }

    /// Compute the drone flight plan for an estate.
    ///
    /// The sweep is proportional to grid area, so it runs on the blocking pool.
    pub async fn drone_plan(
        &self,
        estate: &Estate,
        max_distance: Option<i64>,
    ) -> Result<FlightPlanResult> {
        let placements: Vec<TreePlacement> = self
            .list_trees(&estate.id)
            .await?
            .iter()
            .map(Tree::placement)
            .collect();
        let grid = estate.grid();

        tokio::task::spawn_blocking(move || compute_flight_plan(grid, &placements, max_distance))
            .await
            .context("flight plan computation panicked")
    }
}
