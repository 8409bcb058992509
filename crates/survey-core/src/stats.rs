//! Aggregate tree-height statistics for an estate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstateStats {
    pub count: u64,
    pub max: u32,
    pub min: u32,
    pub median: u32,
}

impl EstateStats {
    /// Summarise tree heights. An estate with no trees reports all zeros.
    ///
    /// The median interpolates between the two middle values for an even
    /// count and is truncated to a whole unit.
    pub fn from_heights(heights: &[u32]) -> Self {
        if heights.is_empty() {
            return Self::default();
        }

        let mut sorted = heights.to_vec();
        sorted.sort_unstable();

        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 1 {
            sorted[mid]
        } else {
            ((u64::from(sorted[mid - 1]) + u64::from(sorted[mid])) / 2) as u32
        };

        Self {
            count: sorted.len() as u64,
            max: sorted[sorted.len() - 1],
            min: sorted[0],
            median,
        }
    }
}
