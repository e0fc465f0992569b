//! Shapes made up of multiple tiles: lines, rings, and filled rings
//! (hexagonal areas).

use crate::{
    util, FractionalPoint, HexError, HexVector, TilePoint, TilePointIndexSet,
    TilePointSet,
};
use fnv::FnvBuildHasher;

/// Offset applied to both ends of a line before interpolating between them.
/// Without it, some samples would land exactly on the edge between two tiles,
/// and rounding would pick a side arbitrarily. The components sum to zero so
/// the nudged points stay on the plane.
pub const LINE_NUDGE: HexVector<f64> = HexVector::new(1e-6, 1e-6, -2e-6);

/// Upper bound on how many tiles a shape reserves room for up front. Larger
/// shapes still work, they just grow as tiles are added.
const MAX_PREALLOCATE: usize = 1 << 16;

/// Room to reserve for a ring of the given radius
fn ring_capacity(radius: usize) -> usize {
    radius.saturating_mul(6).clamp(1, MAX_PREALLOCATE)
}

/// Room to reserve for a filled ring of the given radius
fn area_capacity(radius: usize) -> usize {
    radius
        .checked_add(1)
        .and_then(|next| radius.checked_mul(next))
        .and_then(|product| product.checked_mul(3))
        .map_or(MAX_PREALLOCATE, |tiles| tiles.saturating_add(1))
        .min(MAX_PREALLOCATE)
}

/// Get all the tiles on a straight line between two tiles (inclusive on both
/// ends). The output is in order, starting with `from` and ending with `to`.
/// For two tiles that are `n` steps apart, the line will contain `n + 1` tiles.
/// https://www.redblobgames.com/grids/hexagons/#line-drawing
pub fn line(
    from: TilePoint,
    to: TilePoint,
) -> anyhow::Result<TilePointIndexSet> {
    let distance = from.distance_to(to);
    let mut line = TilePointIndexSet::with_capacity_and_hasher(
        distance + 1,
        FnvBuildHasher::default(),
    );
    if distance == 0 {
        line.insert(from);
        return Ok(line);
    }

    let start = FractionalPoint::from(from).translate(LINE_NUDGE)?;
    let end = FractionalPoint::from(to).translate(LINE_NUDGE)?;
    for i in 0..=distance {
        let t = i as f64 / distance as f64;
        line.insert(start.lerp(end, t)?.round()?);
    }
    Ok(line)
}

/// Get all the tiles that are exactly `radius` steps from `origin`. The output
/// is ordered: it starts at the tile `radius` steps from the origin in
/// direction 4, then walks the six sides of the ring, one side per direction
/// in table order. A ring of radius 0 is just the origin, and any other ring
/// holds `6 * radius` tiles.
///
/// Returns an error if the radius is negative.
/// https://www.redblobgames.com/grids/hexagons/#rings
pub fn ring(
    origin: TilePoint,
    radius: i32,
) -> anyhow::Result<TilePointIndexSet> {
    let len = HexError::check_range("radius", radius)?;
    let mut ring = TilePointIndexSet::with_capacity_and_hasher(
        ring_capacity(len),
        FnvBuildHasher::default(),
    );
    if len == 0 {
        ring.insert(origin);
        return Ok(ring);
    }

    let start = TilePoint::direction(4).scale(radius)?;
    let mut tile = origin.checked_add(start)?;
    for side in 0..6 {
        for _ in 0..len {
            ring.insert(tile);
            tile = tile.neighbor(side)?;
        }
    }

    debug_assert_eq!(ring.len(), 6 * len, "expected 6r tiles in ring");
    Ok(ring)
}

/// Get all the tiles that are within `radius` steps of `origin`, including the
/// origin itself. This is the union of every ring from `0` to `radius`, and
/// always contains `3r²+3r+1` tiles.
///
/// Returns an error if the radius is negative.
pub fn filled_ring(
    origin: TilePoint,
    radius: i32,
) -> anyhow::Result<TilePointSet> {
    let len = HexError::check_range("radius", radius)?;
    let mut area = TilePointSet::with_capacity_and_hasher(
        area_capacity(len),
        FnvBuildHasher::default(),
    );
    area.insert(origin);
    for step in 1..=radius {
        area.extend(ring(origin, step)?);
    }

    debug_assert_eq!(area.len(), util::area_len(len), "expected 3r²+3r+1");
    Ok(area)
}
