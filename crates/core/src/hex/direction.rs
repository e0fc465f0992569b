//! Fixed direction tables, and the neighbor lookups built on top of them.

use crate::{HexVector, TilePoint, TilePointSet};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// A class of directions in a hex world. Each implementation is a fixed,
/// ordered table of six offsets. Indexes into the table wrap around in both
/// directions, so the table acts like an infinite repeating sequence: index `6`
/// is the same as index `0`, and index `-1` is the same as index `5`.
pub trait HexDirection: 'static + Copy + Eq + Sized {
    /// All directions in this class, in table order. This is the order that
    /// integer direction indexes refer to.
    const CLOCKWISE: &'static [Self];

    /// Convert this direction into a vector in the world coordinate system
    fn to_vector(self) -> HexVector<i32>;

    /// Look up a direction by index. Any index is accepted, and is mapped into
    /// the table via a cyclic modulo.
    fn at(index: isize) -> Self {
        let len = Self::CLOCKWISE.len() as isize;
        // rem_euclid is a true modulus, so negative indexes wrap properly
        Self::CLOCKWISE[index.rem_euclid(len) as usize]
    }

    /// Get the index of the given direction within the table ordering
    fn clockwise_index(self) -> usize {
        // Every variant is in CLOCKWISE, so this can't fall through
        Self::CLOCKWISE
            .iter()
            .position(|dir| self == *dir)
            .unwrap_or_default()
    }

    /// Step `steps` positions through the table from this direction. Negative
    /// values step backwards.
    fn rotate(self, steps: isize) -> Self {
        Self::at(self.clockwise_index() as isize + steps)
    }

    /// Get the direction that is directly opposite this one
    fn opposite(self) -> Self {
        self.rotate(Self::CLOCKWISE.len() as isize / 2)
    }
}

/// The 6 directions in which hexes can line up side-to-side. For any given
/// tile, a tile direction points to a neighboring tile's center point.
#[derive(
    Copy, Clone, Debug, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TileDirection {
    /// `(1, 0, -1)`
    XPosZNeg,
    /// `(1, -1, 0)`
    XPosYNeg,
    /// `(0, -1, 1)`
    YNegZPos,
    /// `(-1, 0, 1)`
    XNegZPos,
    /// `(-1, 1, 0)`
    XNegYPos,
    /// `(0, 1, -1)`
    YPosZNeg,
}

impl TileDirection {
    /// Table of unit vectors, one per direction
    pub const VECTORS: [HexVector<i32>; 6] = [
        HexVector::new(1, 0, -1),
        HexVector::new(1, -1, 0),
        HexVector::new(0, -1, 1),
        HexVector::new(-1, 0, 1),
        HexVector::new(-1, 1, 0),
        HexVector::new(0, 1, -1),
    ];
}

impl HexDirection for TileDirection {
    const CLOCKWISE: &'static [Self] = &[
        Self::XPosZNeg,
        Self::XPosYNeg,
        Self::YNegZPos,
        Self::XNegZPos,
        Self::XNegYPos,
        Self::YPosZNeg,
    ];

    fn to_vector(self) -> HexVector<i32> {
        Self::VECTORS[self as usize]
    }
}

/// The 6 diagonal directions. A diagonal points from a tile's center, through
/// one of its vertices, to the center of the tile beyond that vertex. Each
/// diagonal neighbor is two steps away but shares no side with the origin.
#[derive(
    Copy, Clone, Debug, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalDirection {
    /// `(2, -1, -1)`
    XPos,
    /// `(1, 1, -2)`
    ZNeg,
    /// `(-1, 2, -1)`
    YPos,
    /// `(-2, 1, 1)`
    XNeg,
    /// `(-1, -1, 2)`
    ZPos,
    /// `(1, -2, 1)`
    YNeg,
}

impl DiagonalDirection {
    /// Table of diagonal vectors, one per direction
    pub const VECTORS: [HexVector<i32>; 6] = [
        HexVector::new(2, -1, -1),
        HexVector::new(1, 1, -2),
        HexVector::new(-1, 2, -1),
        HexVector::new(-2, 1, 1),
        HexVector::new(-1, -1, 2),
        HexVector::new(1, -2, 1),
    ];
}

impl HexDirection for DiagonalDirection {
    const CLOCKWISE: &'static [Self] = &[
        Self::XPos,
        Self::ZNeg,
        Self::YPos,
        Self::XNeg,
        Self::ZPos,
        Self::YNeg,
    ];

    fn to_vector(self) -> HexVector<i32> {
        Self::VECTORS[self as usize]
    }
}

impl TilePoint {
    /// The unit vector for the direction at `index`, as a point. Any index is
    /// accepted; see [HexDirection::at].
    pub fn direction(index: isize) -> TilePoint {
        vector_to_point(TileDirection::at(index).to_vector())
    }

    /// The diagonal vector at `index`, as a point. Any index is accepted; see
    /// [HexDirection::at].
    pub fn diagonal_direction(index: isize) -> TilePoint {
        vector_to_point(DiagonalDirection::at(index).to_vector())
    }

    /// Get the location of a particular tile adjacent to this one
    pub fn adjacent(
        self,
        direction: TileDirection,
    ) -> anyhow::Result<TilePoint> {
        self.translate(direction.to_vector())
    }

    /// Get the location of the tile adjacent to this one, in the direction at
    /// `index`
    pub fn neighbor(self, index: isize) -> anyhow::Result<TilePoint> {
        self.adjacent(TileDirection::at(index))
    }

    /// Get the location of the diagonal neighbor in the direction at `index`
    pub fn diagonal_neighbor(
        self,
        index: isize,
    ) -> anyhow::Result<TilePoint> {
        self.translate(DiagonalDirection::at(index).to_vector())
    }

    /// Get an iterator of all the tile points directly adjacent to this one.
    /// The iterator will always contain exactly 6 values, in table order.
    pub fn adjacents(self) -> impl Iterator<Item = anyhow::Result<TilePoint>> {
        TileDirection::iter().map(move |dir| self.adjacent(dir))
    }

    /// The set of all 6 tiles adjacent to this one
    pub fn neighbors(self) -> anyhow::Result<TilePointSet> {
        self.adjacents().collect()
    }

    /// The set of all 6 diagonal neighbors of this tile
    pub fn diagonal_neighbors(self) -> anyhow::Result<TilePointSet> {
        DiagonalDirection::iter()
            .map(|dir| self.translate(dir.to_vector()))
            .collect()
    }
}

/// Every entry in the direction tables is zero-sum, so they convert straight
/// into points
fn vector_to_point(vector: HexVector<i32>) -> TilePoint {
    TilePoint::new_xy(vector.x, vector.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HexCoordinateValue;

    #[test]
    fn test_tables_are_zero_sum() {
        for vector in TileDirection::VECTORS
            .iter()
            .chain(DiagonalDirection::VECTORS.iter())
        {
            assert_eq!(vector.x + vector.y + vector.z, 0, "{}", vector);
        }
    }

    #[test]
    fn test_direction_table() {
        assert_eq!(TilePoint::direction(0), TilePoint::new_xy(1, 0));
        assert_eq!(TilePoint::direction(4), TilePoint::new_xy(-1, 1));
        assert_eq!(TilePoint::diagonal_direction(1), TilePoint::new_xy(1, 1));
        assert_eq!(TilePoint::diagonal_direction(5), TilePoint::new_xy(1, -2));

        // The enum order and the table order have to agree
        for (i, dir) in TileDirection::iter().enumerate() {
            assert_eq!(dir.clockwise_index(), i);
            assert_eq!(TileDirection::at(i as isize), dir);
        }
        for (i, dir) in DiagonalDirection::iter().enumerate() {
            assert_eq!(dir.clockwise_index(), i);
        }
    }

    #[test]
    fn test_direction_cyclic() {
        for i in -1000..1000 {
            let dir = TilePoint::direction(i);
            assert_eq!(dir, TilePoint::direction(i + 6));
            assert_eq!(dir, TilePoint::direction(i - 6));
            let diag = TilePoint::diagonal_direction(i);
            assert_eq!(diag, TilePoint::diagonal_direction(i + 6));
            assert_eq!(diag, TilePoint::diagonal_direction(i - 6));
        }
        assert_eq!(TilePoint::direction(-1), TilePoint::direction(5));
        assert_eq!(TilePoint::direction(isize::MIN), TilePoint::direction(4));
        assert_eq!(TilePoint::direction(isize::MAX), TilePoint::direction(1));
    }

    #[test]
    fn test_rotate_and_opposite() {
        assert_eq!(
            TileDirection::XPosZNeg.opposite(),
            TileDirection::XNegZPos
        );
        assert_eq!(DiagonalDirection::ZNeg.opposite(), DiagonalDirection::ZPos);
        assert_eq!(
            TileDirection::XPosZNeg.rotate(-1),
            TileDirection::YPosZNeg
        );
        for dir in TileDirection::iter() {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().to_vector(), -dir.to_vector());
            assert_eq!(dir.rotate(6), dir);
        }
    }

    #[test]
    fn test_neighbors() {
        let origin = TilePoint::new_xy(2, -5);
        let neighbors = origin.neighbors().unwrap();
        assert_eq!(neighbors.len(), 6);
        for i in 0..6 {
            let neighbor = origin.neighbor(i).unwrap();
            assert!(neighbors.contains(&neighbor));
            assert_eq!(origin.distance_to(neighbor), 1);
        }

        let diagonals = origin.diagonal_neighbors().unwrap();
        assert_eq!(diagonals.len(), 6);
        for diagonal in &diagonals {
            assert_eq!(origin.distance_to(*diagonal), 2);
            assert!(!neighbors.contains(diagonal));
        }
        assert_eq!(
            origin.diagonal_neighbor(3).unwrap(),
            TilePoint::new_xy(0, -4)
        );
        assert_eq!(origin.neighbor(-1).unwrap().z(), origin.z() - 1);
    }
}
