//! hexgrid is a geometry and pathfinding engine for hexagon tile grids. It
//! covers the coordinate math (distances, neighbors, rotation, interpolation),
//! multi-tile shapes (lines, rings, filled areas), and searches over a grid of
//! tiles (flood fill, field of view, and A* pathfinding).
//!
//! ```
//! use hexgrid::{find_path, GridConfig, HexGrid, TilePoint};
//!
//! let grid = HexGrid::new(GridConfig::default()).unwrap();
//! let path = find_path(TilePoint::ORIGIN, TilePoint::new_xy(3, -3), &grid)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(path.len(), 4);
//! ```
//!
//! See [hex] for details on the coordinate system, and [GridConfig] for how
//! grids can be customized. Any map type can be searched by implementing
//! [Grid] for it.

mod config;
mod error;
mod grid;
pub mod hex;
pub mod search;
mod util;

pub use crate::{
    config::{CellConfig, GridConfig},
    error::HexError,
    grid::{Cell, Grid, HexGrid},
    hex::{
        filled_ring, line, ring, AxialPoint, DiagonalDirection,
        FractionalPoint, HasHexPosition, HexCoordinate, HexCoordinateValue,
        HexDirection, HexVector, TileDirection, TilePoint, TilePointIndexSet,
        TilePointMap, TilePointSet,
    },
    search::{field_of_view, find_path, path_cost, reachable, STEP_COST},
    util::area_len,
};
