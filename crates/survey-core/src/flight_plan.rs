//! Drone flight-plan distance engine.
//!
//! The drone sweeps an estate row by row in serpentine order, climbing or
//! descending so it always hovers one unit above whatever occupies the cell
//! below it. The engine totals the distance flown and, when a budget is
//! supplied, reports the last cell from which the drone could still make it
//! back down before the budget runs out.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Horizontal cost of flying from one cell to the next.
pub const HOP_COST: u64 = 10;
/// Offset charged before the first cell is visited.
const TAKEOFF_COST: u64 = 1;
/// Offset charged after the last cell is visited.
const LANDING_COST: u64 = 1;
/// Altitude kept above the canopy (or bare ground).
const CLEARANCE: u64 = 1;

/// Dimensions of an estate grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSpec {
    /// Columns along the X axis
    pub length: u32,
    /// Rows along the Y axis
    pub width: u32,
}

impl GridSpec {
    pub fn new(length: u32, width: u32) -> Self {
        Self { length, width }
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.length) * u64::from(self.width)
    }

    /// The `(length, width)` corner. It is charged no hop cost, whichever
    /// direction the last row is swept in.
    pub fn final_cell(&self) -> GridCell {
        GridCell::new(self.length, self.width)
    }

    /// Cells in serpentine order.
    pub fn cells(&self) -> SerpentineCells {
        SerpentineCells::new(*self)
    }

    /// Zero-based position of `cell` in serpentine order, or `None` if the
    /// cell is off the grid.
    pub fn traversal_index(&self, cell: GridCell) -> Option<u64> {
        if !(1..=self.length).contains(&cell.x) || !(1..=self.width).contains(&cell.y) {
            return None;
        }
        let row_start = u64::from(cell.y - 1) * u64::from(self.length);
        let offset = if cell.y % 2 == 1 {
            cell.x - 1
        } else {
            self.length - cell.x
        };
        Some(row_start + u64::from(offset))
    }
}

/// One-based grid coordinate. `(0, 0)` is the launch origin outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

impl GridCell {
    pub const ORIGIN: GridCell = GridCell { x: 0, y: 0 };

    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A tree standing on one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreePlacement {
    pub x: u32,
    pub y: u32,
    pub height: u32,
}

impl TreePlacement {
    pub fn new(x: u32, y: u32, height: u32) -> Self {
        Self { x, y, height }
    }
}

/// Iterator over a grid in boustrophedon order: odd rows west to east,
/// even rows east to west.
#[derive(Debug, Clone)]
pub struct SerpentineCells {
    grid: GridSpec,
    next: Option<GridCell>,
}

impl SerpentineCells {
    fn new(grid: GridSpec) -> Self {
        let next = (grid.length > 0 && grid.width > 0).then_some(GridCell::new(1, 1));
        Self { grid, next }
    }

    fn successor(&self, cell: GridCell) -> Option<GridCell> {
        let ascending = cell.y % 2 == 1;
        if ascending && cell.x < self.grid.length {
            Some(GridCell::new(cell.x + 1, cell.y))
        } else if !ascending && cell.x > 1 {
            Some(GridCell::new(cell.x - 1, cell.y))
        } else if cell.y < self.grid.width {
            Some(GridCell::new(cell.x, cell.y + 1))
        } else {
            None
        }
    }
}

impl Iterator for SerpentineCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(current)
    }
}

/// Tree heights keyed by coordinate.
#[derive(Debug, Default)]
struct TreeIndex {
    heights: HashMap<(u32, u32), u32>,
}

impl TreeIndex {
    fn build(trees: &[TreePlacement]) -> Self {
        let heights = trees.iter().map(|t| ((t.x, t.y), t.height)).collect();
        Self { heights }
    }

    fn height_at(&self, cell: GridCell) -> u32 {
        self.heights.get(&(cell.x, cell.y)).copied().unwrap_or(0)
    }
}

/// Running accumulator for one sweep.
#[derive(Debug)]
struct TraversalState {
    cumulative_distance: u64,
    current_altitude: u64,
    candidate_return_point: GridCell,
    return_point_locked: bool,
}

impl TraversalState {
    fn new() -> Self {
        Self {
            cumulative_distance: TAKEOFF_COST,
            current_altitude: CLEARANCE,
            candidate_return_point: GridCell::ORIGIN,
            return_point_locked: false,
        }
    }
}

/// What the drone did over one cell, reported to tracing observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellVisit {
    pub cell: GridCell,
    /// Height of the tree on this cell, 0 when the cell is empty
    pub tree_height: u32,
    /// Altitude held over this cell
    pub altitude: u64,
    /// Distance flown once the drone has settled over this cell
    pub distance: u64,
}

/// Outcome of a flight-plan computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightPlanResult {
    pub total_distance: u64,
    /// Present only when a positive budget was requested
    pub return_point: Option<GridCell>,
}

/// Single-pass planner over one estate.
#[derive(Debug)]
pub struct FlightPlanner {
    grid: GridSpec,
    index: TreeIndex,
    budget: Option<u64>,
}

impl FlightPlanner {
    /// A budget that is absent or not positive disables return-point tracking.
    pub fn new(grid: GridSpec, trees: &[TreePlacement], budget: Option<i64>) -> Self {
        Self {
            grid,
            index: TreeIndex::build(trees),
            budget: positive_budget(budget),
        }
    }

    /// Walk the whole grid. Unlike [`compute_flight_plan`] this never
    /// short-circuits on an empty estate.
    pub fn plan(&self) -> FlightPlanResult {
        self.plan_traced(|_| {})
    }

    /// Like [`FlightPlanner::plan`], reporting every visited cell to `observe`.
    pub fn plan_traced<F>(&self, mut observe: F) -> FlightPlanResult
    where
        F: FnMut(&CellVisit),
    {
        let mut state = TraversalState::new();
        let final_cell = self.grid.final_cell();

        for cell in self.grid.cells() {
            let visit = self.visit(cell, &mut state);
            observe(&visit);
            if cell != final_cell {
                state.cumulative_distance += HOP_COST;
            }
        }

        state.cumulative_distance += LANDING_COST;

        FlightPlanResult {
            total_distance: state.cumulative_distance,
            return_point: self.budget.map(|_| state.candidate_return_point),
        }
    }

    fn visit(&self, cell: GridCell, state: &mut TraversalState) -> CellVisit {
        let tree_height = self.index.height_at(cell);
        let target_altitude = u64::from(tree_height) + CLEARANCE;

        state.cumulative_distance += state.current_altitude.abs_diff(target_altitude);
        state.current_altitude = target_altitude;

        if let Some(budget) = self.budget {
            if !state.return_point_locked {
                // Enough left to descend straight back down from here.
                if state.cumulative_distance + state.current_altitude <= budget {
                    state.candidate_return_point = cell;
                } else {
                    state.return_point_locked = true;
                }
            }
        }

        CellVisit {
            cell,
            tree_height,
            altitude: state.current_altitude,
            distance: state.cumulative_distance,
        }
    }
}

/// Compute the survey flight distance for an estate.
///
/// An estate without trees has nothing to survey: the distance is 0 and,
/// when a positive budget is given, the origin is reported as the return
/// point.
pub fn compute_flight_plan(
    grid: GridSpec,
    trees: &[TreePlacement],
    budget: Option<i64>,
) -> FlightPlanResult {
    compute_flight_plan_traced(grid, trees, budget, |_| {})
}

/// [`compute_flight_plan`] reporting every visited cell to `observe`.
/// An estate without trees is not walked, so `observe` is never called.
pub fn compute_flight_plan_traced<F>(
    grid: GridSpec,
    trees: &[TreePlacement],
    budget: Option<i64>,
    observe: F,
) -> FlightPlanResult
where
    F: FnMut(&CellVisit),
{
    if trees.is_empty() {
        return FlightPlanResult {
            total_distance: 0,
            return_point: positive_budget(budget).map(|_| GridCell::ORIGIN),
        };
    }

    FlightPlanner::new(grid, trees, budget).plan_traced(observe)
}

fn positive_budget(budget: Option<i64>) -> Option<u64> {
    budget.and_then(|b| u64::try_from(b).ok()).filter(|b| *b > 0)
}
