//! Tree placement helpers shared by the CLI binaries.

use anyhow::{bail, Context, Result};
use rand::Rng;
use std::collections::HashSet;
use survey_core::{GridSpec, TreePlacement};

/// Parse an `x,y,height` triple.
pub fn parse_tree_arg(arg: &str) -> Result<TreePlacement> {
    let parts: Vec<&str> = arg.split(',').map(str::trim).collect();
    let [x, y, height] = parts.as_slice() else {
        bail!("expected x,y,height but got '{}'", arg);
    };

    Ok(TreePlacement::new(
        x.parse().with_context(|| format!("invalid x in '{}'", arg))?,
        y.parse().with_context(|| format!("invalid y in '{}'", arg))?,
        height
            .parse()
            .with_context(|| format!("invalid height in '{}'", arg))?,
    ))
}

/// Scatter up to `count` trees on distinct cells of `grid`.
pub fn random_trees<R: Rng>(
    rng: &mut R,
    grid: GridSpec,
    count: usize,
    max_height: u32,
) -> Vec<TreePlacement> {
    let count = count.min(usize::try_from(grid.cell_count()).unwrap_or(usize::MAX));
    let mut occupied = HashSet::with_capacity(count);
    let mut trees = Vec::with_capacity(count);

    while trees.len() < count {
        let x = rng.random_range(1..=grid.length);
        let y = rng.random_range(1..=grid.width);
        if occupied.insert((x, y)) {
            trees.push(TreePlacement::new(x, y, rng.random_range(1..=max_height.max(1))));
        }
    }

    trees
}
