//! Searches over a [Grid](crate::Grid): flood fills, field of view, and
//! pathfinding. Every search owns all of its working state, and only reads
//! from the grid, so independent searches can't interfere with each other.

mod fov;
mod path;
mod reach;

pub use self::{fov::*, path::*, reach::*};
