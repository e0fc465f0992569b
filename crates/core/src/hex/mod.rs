//! This module holds basic types and data structures related to hexagon grids.
//!
//! ## Coordinate System
//!
//! Tiles are addressed with the [cube coordinate system defined by Amit
//! Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube).
//!
//! The description in the link above is much better than anything I can write
//! here, but here's a TL;DR just for the hell of it:
//!
//! Each coordinate has three components (`x`, `y`, and `z`). **For any tile
//! coordinate, all three components are integers and `x + y + z = 0`.** Even
//! though hexagon tiles are laid out in two dimensions, using three components
//! makes the math around hexagonal grids much simpler: distance, rotation and
//! interpolation all become plain per-component operations.
//!
//! The plane constraint is enforced by construction. [TilePoint::new] rejects
//! any triple that isn't on the plane, and every operation that produces a new
//! point goes back through it. [AxialPoint] is the same position with the
//! redundant component dropped, for consumers that store `(q, r)` pairs.
//!
//! ## Directions
//!
//! There are two fixed tables of six offsets, see [HexDirection]:
//!
//! - [TileDirection]: the six neighbors that share a side with a tile
//! - [DiagonalDirection]: the six tiles reached by going straight through one
//!   of a tile's vertices
//!
//! Integer indexes into either table wrap cyclically, so `-1` means `5`.
//!
//! ## Shapes
//!
//! [line], [ring] and [filled_ring] build multi-tile shapes out of the two
//! pieces above.

mod data_structure;
mod direction;
mod shape;
mod unit;

pub use self::{data_structure::*, direction::*, shape::*, unit::*};
