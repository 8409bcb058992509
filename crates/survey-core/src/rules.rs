//! Validation rules for estates and tree plantings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Estate;

/// Reasons an estate or tree is rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("estate dimensions must be between 1 and {max}, got {length}x{width}")]
    EstateDimensions { length: i64, width: i64, max: u32 },
    #[error("tree coordinate ({x}, {y}) is outside the {length}x{width} estate")]
    OutOfBounds {
        x: i64,
        y: i64,
        length: u32,
        width: u32,
    },
    #[error("tree coordinate ({x}, {y}) must be positive")]
    NonPositiveCoordinate { x: i64, y: i64 },
    #[error("tree height must be between 1 and {max}, got {height}")]
    TreeHeight { height: i64, max: u32 },
}

/// Limits applied when estates and trees are created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyRules {
    /// Tallest tree that may be recorded
    pub max_tree_height: u32,
    /// Largest length or width an estate may have
    pub max_estate_dimension: u32,
}

impl Default for SurveyRules {
    fn default() -> Self {
        Self {
            max_tree_height: 30,
            max_estate_dimension: 50_000,
        }
    }
}

impl SurveyRules {
    /// Check estate dimensions, returning them as grid sizes.
    pub fn validate_estate(&self, length: i64, width: i64) -> Result<(u32, u32), ValidationError> {
        let max = self.max_estate_dimension;
        let in_range = |v: i64| u32::try_from(v).ok().filter(|v| (1..=max).contains(v));
        match (in_range(length), in_range(width)) {
            (Some(length), Some(width)) => Ok((length, width)),
            _ => Err(ValidationError::EstateDimensions { length, width, max }),
        }
    }

    /// Checks that need no estate: positive coordinates and a height within
    /// limits. Returns the height as a grid value.
    pub fn validate_tree_fields(&self, x: i64, y: i64, height: i64) -> Result<u32, ValidationError> {
        let max = self.max_tree_height;
        let height = u32::try_from(height)
            .ok()
            .filter(|h| (1..=max).contains(h))
            .ok_or(ValidationError::TreeHeight { height, max })?;
        if x <= 0 || y <= 0 {
            return Err(ValidationError::NonPositiveCoordinate { x, y });
        }
        Ok(height)
    }

    /// Check a tree against the estate it is planted in, returning
    /// `(x, y, height)` as grid values.
    pub fn validate_tree(
        &self,
        estate: &Estate,
        x: i64,
        y: i64,
        height: i64,
    ) -> Result<(u32, u32, u32), ValidationError> {
        let height = self.validate_tree_fields(x, y, height)?;

        let out_of_bounds = ValidationError::OutOfBounds {
            x,
            y,
            length: estate.length,
            width: estate.width,
        };
        let (Ok(cx), Ok(cy)) = (u32::try_from(x), u32::try_from(y)) else {
            return Err(out_of_bounds);
        };
        if !estate.contains(cx, cy) {
            return Err(out_of_bounds);
        }

        Ok((cx, cy, height))
    }
}
