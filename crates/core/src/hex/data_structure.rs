use crate::TilePoint;
use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};

/// A set of tile points
pub type TilePointSet = HashSet<TilePoint, FnvBuildHasher>;
/// A map of tile points to some `T`
pub type TilePointMap<T> = HashMap<TilePoint, T, FnvBuildHasher>;
/// An ORDERED set of tile points. This has some extra memory overhead, so we
/// should only use it when the order actually means something, e.g. the walk
/// order of a ring or the start-to-end order of a line.
pub type TilePointIndexSet = IndexSet<TilePoint, FnvBuildHasher>;
