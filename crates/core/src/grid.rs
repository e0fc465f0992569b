use crate::{
    timed, unwrap_or_bail, util, CellConfig, GridConfig, HasHexPosition,
    TilePoint, TilePointMap, TilePointSet,
};
use anyhow::{bail, Context};
use fnv::FnvBuildHasher;
use log::info;
use serde::{Deserialize, Serialize};
use std::cmp;
use validator::Validate;

/// The surface that every search algorithm runs against. A grid decides which
/// tiles exist, which can be entered, which block sight, and how much it costs
/// to enter each one. Implement this to run searches over your own map type;
/// [HexGrid] is a ready-made implementation.
pub trait Grid {
    /// Is this tile part of the grid? Searches never step onto, or report,
    /// an invalid tile.
    fn is_valid(&self, point: TilePoint) -> bool;

    /// Can this tile be entered?
    fn is_blocked(&self, point: TilePoint) -> bool;

    /// Does this tile block line of sight?
    fn is_opaque(&self, point: TilePoint) -> bool;

    /// Extra cost to enter this tile. Tiles without an explicit cost should
    /// return 0.
    fn cost_at(&self, point: TilePoint) -> f64;

    /// Every tile adjacent to `point` that is part of this grid
    fn neighbors(&self, point: TilePoint) -> anyhow::Result<TilePointSet> {
        let mut neighbors = TilePointSet::default();
        for neighbor in point.adjacents() {
            let neighbor = neighbor?;
            if self.is_valid(neighbor) {
                neighbors.insert(neighbor);
            }
        }
        Ok(neighbors)
    }
}

/// A single tile in a [HexGrid]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    position: TilePoint,
    blocked: bool,
    opaque: bool,
    cost: f64,
}

impl Cell {
    fn new(position: TilePoint, cost: f64) -> Self {
        Self {
            position,
            blocked: false,
            opaque: false,
            cost,
        }
    }

    /// Can this tile be entered?
    pub fn blocked(&self) -> bool {
        self.blocked
    }

    /// Does this tile block line of sight?
    pub fn opaque(&self) -> bool {
        self.opaque
    }

    /// Cost to enter this tile, on top of the fixed step cost
    pub fn cost(&self) -> f64 {
        self.cost
    }

    fn apply(&mut self, config: &CellConfig) {
        self.blocked = config.blocked;
        self.opaque = config.opaque;
        if let Some(cost) = config.cost {
            self.cost = cost;
        }
    }
}

impl HasHexPosition for Cell {
    fn position(&self) -> TilePoint {
        self.position
    }
}

/// A hexagon-shaped grid of tiles, centered on the origin. Every tile within
/// `radius` steps of the origin exists; everything else is off the grid.
///
/// ## Serialization
/// Cells are serialized as a list rather than a map, since tile points can't
/// be used as keys in most formats. Deserialized grids go through the same
/// checks as [HexGrid::new], so a grid loaded from disk can't hold negative
/// costs or cells outside its radius.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "UncheckedHexGrid")]
pub struct HexGrid {
    radius: u16,
    #[serde(with = "crate::util::serde_tile_point_map_to_vec")]
    cells: TilePointMap<Cell>,
}

/// A grid as it appears in serialized form, before any validation
#[derive(Deserialize)]
struct UncheckedHexGrid {
    radius: u16,
    #[serde(with = "crate::util::serde_tile_point_map_to_vec")]
    cells: TilePointMap<Cell>,
}

impl TryFrom<UncheckedHexGrid> for HexGrid {
    type Error = anyhow::Error;

    fn try_from(grid: UncheckedHexGrid) -> Result<Self, Self::Error> {
        let cells = grid
            .cells
            .values()
            .map(|cell| CellConfig {
                position: cell.position,
                blocked: cell.blocked,
                opaque: cell.opaque,
                cost: Some(cell.cost),
            })
            .collect();
        Self::new(GridConfig {
            radius: grid.radius,
            default_cost: 0.0,
            cells,
        })
    }
}

impl HexGrid {
    /// Build a new grid from the given config. Returns an error if the config
    /// is invalid, or if it describes a cell that falls outside the grid.
    pub fn new(config: GridConfig) -> anyhow::Result<Self> {
        info!("Building grid with config {:#?}", config);
        config.validate().context("invalid config")?;

        let mut grid = timed!(
            "Grid initialization",
            Self::init(config.radius, config.default_cost)
        );
        for cell_config in &config.cells {
            let position = cell_config.position;
            let cell = unwrap_or_bail!(
                grid.cells.get_mut(&position),
                "cell {} is outside the grid of radius {}",
                position,
                config.radius
            );
            cell.apply(cell_config);
        }

        info!("Initialized grid with {} cells", grid.cells.len());
        Ok(grid)
    }

    /// Build an open grid of the given radius: nothing is blocked or opaque,
    /// and every tile costs 0 to enter.
    pub fn with_radius(radius: u16) -> Self {
        Self::init(radius, 0.0)
    }

    fn init(radius: u16, default_cost: f64) -> Self {
        let mut cells = TilePointMap::with_capacity_and_hasher(
            util::area_len(radius.into()),
            FnvBuildHasher::default(),
        );

        let r = i32::from(radius);
        for x in -r..=r {
            // If we just do [-r,r] for y as well, then we end up with a
            // diamond pattern instead of a super hexagon
            // https://www.redblobgames.com/grids/hexagons/#range
            let y_min = cmp::max(-r, -x - r);
            let y_max = cmp::min(r, -x + r);
            for y in y_min..=y_max {
                let position = TilePoint::new_xy(x, y);
                cells.insert(position, Cell::new(position, default_cost));
            }
        }

        Self { radius, cells }
    }

    /// Distance from the center of the grid to its edge
    pub fn radius(&self) -> u16 {
        self.radius
    }

    /// All the cells in this grid, keyed by position
    pub fn cells(&self) -> &TilePointMap<Cell> {
        &self.cells
    }

    /// Get the cell at a position, if it's on the grid
    pub fn get(&self, point: TilePoint) -> Option<&Cell> {
        self.cells.get(&point)
    }

    /// Number of cells in the grid
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Positions of every blocked cell
    pub fn blocked_points(&self) -> TilePointSet {
        self.points_where(Cell::blocked)
    }

    /// Positions of every opaque cell
    pub fn opaque_points(&self) -> TilePointSet {
        self.points_where(Cell::opaque)
    }

    fn points_where(&self, predicate: impl Fn(&Cell) -> bool) -> TilePointSet {
        self.cells
            .values()
            .filter(|cell| predicate(cell))
            .map(Cell::position)
            .collect()
    }

    /// Mark a cell as blocked or open. Fails if the point is off the grid.
    pub fn set_blocked(
        &mut self,
        point: TilePoint,
        blocked: bool,
    ) -> anyhow::Result<()> {
        self.cell_mut(point)?.blocked = blocked;
        Ok(())
    }

    /// Mark a cell as opaque or transparent. Fails if the point is off the
    /// grid.
    pub fn set_opaque(
        &mut self,
        point: TilePoint,
        opaque: bool,
    ) -> anyhow::Result<()> {
        self.cell_mut(point)?.opaque = opaque;
        Ok(())
    }

    /// Change the cost of entering a cell. Fails if the point is off the grid
    /// or the cost is negative.
    pub fn set_cost(
        &mut self,
        point: TilePoint,
        cost: f64,
    ) -> anyhow::Result<()> {
        if !(cost >= 0.0 && cost.is_finite()) {
            bail!("invalid cost {} for cell {}", cost, point);
        }
        self.cell_mut(point)?.cost = cost;
        Ok(())
    }

    fn cell_mut(&mut self, point: TilePoint) -> anyhow::Result<&mut Cell> {
        Ok(unwrap_or_bail!(
            self.cells.get_mut(&point),
            "cell {} is outside the grid of radius {}",
            point,
            self.radius
        ))
    }
}

impl Grid for HexGrid {
    fn is_valid(&self, point: TilePoint) -> bool {
        self.cells.contains_key(&point)
    }

    fn is_blocked(&self, point: TilePoint) -> bool {
        self.get(point).map_or(false, Cell::blocked)
    }

    fn is_opaque(&self, point: TilePoint) -> bool {
        self.get(point).map_or(false, Cell::opaque)
    }

    fn cost_at(&self, point: TilePoint) -> f64 {
        self.get(point).map_or(0.0, Cell::cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filled_ring;

    #[test]
    fn test_init_shape() {
        for radius in 0..6 {
            let grid = HexGrid::with_radius(radius);
            assert_eq!(grid.len(), util::area_len(radius.into()));
            let expected =
                filled_ring(TilePoint::ORIGIN, radius.into()).unwrap();
            let actual: TilePointSet = grid.cells().keys().copied().collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_new_applies_cells() {
        let wall = TilePoint::new_xy(1, -1);
        let swamp = TilePoint::new_xy(-1, 0);
        let grid = HexGrid::new(GridConfig {
            radius: 2,
            default_cost: 1.5,
            cells: vec![
                CellConfig::wall(wall),
                CellConfig {
                    position: swamp,
                    blocked: false,
                    opaque: false,
                    cost: Some(8.0),
                },
            ],
        })
        .unwrap();

        assert!(grid.is_blocked(wall));
        assert!(grid.is_opaque(wall));
        assert!(!grid.is_blocked(swamp));
        assert_eq!(grid.cost_at(swamp), 8.0);
        assert_eq!(grid.cost_at(TilePoint::ORIGIN), 1.5);
        assert_eq!(
            grid.blocked_points(),
            vec![wall].into_iter().collect::<TilePointSet>()
        );
        assert_eq!(grid.opaque_points(), grid.blocked_points());
    }

    #[test]
    fn test_new_cell_out_of_bounds() {
        let result = HexGrid::new(GridConfig {
            radius: 1,
            default_cost: 0.0,
            cells: vec![CellConfig::wall(TilePoint::new_xy(2, -1))],
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_off_grid() {
        let mut grid = HexGrid::with_radius(1);
        let outside = TilePoint::new_xy(0, 2);
        assert!(!grid.is_valid(outside));
        assert!(!grid.is_blocked(outside));
        assert!(!grid.is_opaque(outside));
        assert_eq!(grid.cost_at(outside), 0.0);
        assert!(grid.set_blocked(outside, true).is_err());
        assert!(grid.set_cost(TilePoint::ORIGIN, -1.0).is_err());
        grid.set_cost(TilePoint::ORIGIN, 3.0).unwrap();
        assert_eq!(grid.cost_at(TilePoint::ORIGIN), 3.0);
    }

    #[test]
    fn test_serialize_as_list() {
        let mut grid = HexGrid::with_radius(1);
        grid.set_opaque(TilePoint::new_xy(-1, 1), true).unwrap();

        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["radius"], 1);
        assert_eq!(json["cells"].as_array().map(Vec::len), Some(7));

        let loaded: HexGrid = serde_json::from_value(json).unwrap();
        assert_eq!(loaded.cells(), grid.cells());
        assert!(loaded.is_opaque(TilePoint::new_xy(-1, 1)));
    }

    #[test]
    fn test_deserialize_validates() {
        let grid = HexGrid::with_radius(1);
        let json = serde_json::to_value(&grid).unwrap();

        let mut negative_cost = json.clone();
        negative_cost["cells"][0]["cost"] = serde_json::json!(-1.0);
        assert!(serde_json::from_value::<HexGrid>(negative_cost).is_err());

        let mut too_big = json.clone();
        too_big["radius"] = serde_json::json!(10001);
        assert!(serde_json::from_value::<HexGrid>(too_big).is_err());

        // A cell that the radius doesn't reach
        let mut outside = json;
        outside["radius"] = serde_json::json!(0);
        assert!(serde_json::from_value::<HexGrid>(outside).is_err());
    }

    #[test]
    fn test_neighbors_on_edge() {
        let grid = HexGrid::with_radius(1);
        assert_eq!(grid.neighbors(TilePoint::ORIGIN).unwrap().len(), 6);
        // A corner of a radius-1 grid touches the center and two other edge
        // tiles
        let corner = TilePoint::new_xy(1, -1);
        let neighbors = grid.neighbors(corner).unwrap();
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.contains(&TilePoint::ORIGIN));
    }
}
