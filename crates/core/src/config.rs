use crate::TilePoint;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Configuration that defines a [HexGrid](crate::HexGrid). The grid is always
/// a large hexagon of tiles centered on the origin; this config sets its size
/// and lists the tiles that differ from the default (walls, opaque tiles,
/// expensive terrain, etc.).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// Distance from the center of the grid to the edge (in tiles). 0 means
    /// the grid is exactly 1 tile.
    #[validate(range(min = 0, max = 10000))]
    pub radius: u16,

    /// Movement cost of every tile that doesn't list its own cost in `cells`.
    /// This is charged on top of the fixed cost of each step, see
    /// [STEP_COST](crate::STEP_COST).
    #[validate(range(min = 0.0))]
    pub default_cost: f64,

    /// Tiles with non-default properties. Any tile not listed here is open,
    /// transparent, and costs `default_cost`. If a position is listed more
    /// than once, the last entry wins.
    #[validate(custom = "validate_cells")]
    pub cells: Vec<CellConfig>,
}

/// Properties for a single tile within a [GridConfig]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellConfig {
    /// Position of the tile. Must be within the grid radius.
    pub position: TilePoint,

    /// Can this tile be entered? Blocked tiles are skipped by pathfinding and
    /// flood searches.
    #[serde(default)]
    pub blocked: bool,

    /// Does this tile block line of sight? Opaque tiles are still visible
    /// themselves, but they hide whatever is behind them.
    #[serde(default)]
    pub opaque: bool,

    /// Movement cost for entering this tile. If missing, the grid's default
    /// is used.
    #[serde(default)]
    pub cost: Option<f64>,
}

impl CellConfig {
    /// A tile that blocks both movement and sight
    pub fn wall(position: TilePoint) -> Self {
        Self {
            position,
            blocked: true,
            opaque: true,
            cost: None,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            radius: 10,
            default_cost: 0.0,
            cells: Vec::new(),
        }
    }
}

/// Make sure every explicit cell cost is a real, non-negative number. A
/// negative cost would break the optimality guarantee of the pathfinder.
fn validate_cells(cells: &[CellConfig]) -> Result<(), ValidationError> {
    for cell in cells {
        if let Some(cost) = cell.cost {
            // Written this way so NaN fails too
            if !(cost >= 0.0 && cost.is_finite()) {
                let mut error = ValidationError::new("cost");
                error.message = Some(Cow::Borrowed(
                    "cell cost must be a finite non-negative number",
                ));
                error.add_param(Cow::Borrowed("position"), &cell.position);
                error.add_param(Cow::Borrowed("cost"), &cost);
                return Err(error);
            }
        }
    }
    Ok(())
}
