use crate::{ring, timed, Grid, HexError, TilePoint, TilePointSet};
use derive_more::Display;
use log::{debug, trace};

/// Number of degrees in a full sweep around the origin
const FULL_CIRCLE: f64 = 360.0;

/// Two angles closer than this (in degrees) are treated as equal. Outer ring
/// slices can only ever line up with inner ring boundaries up to rounding
/// error, so exact float comparisons would leave hairline gaps in shadows.
const ANGLE_EPSILON: f64 = 1e-9;

/// An angular arc around the viewer, in degrees. Angles are measured along the
/// ring walk (see [crate::ring]): 0° is the first tile of each ring, and the
/// angle grows in walk order. A normalized arc always has
/// `0 <= min <= max <= 360`.
#[derive(Copy, Clone, Debug, PartialEq, Display)]
#[display(fmt = "[{}°, {}°]", min, max)]
pub struct Arc {
    pub min: f64,
    pub max: f64,
}

impl Arc {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The angular slice owned by the tile at `index` (0-based) in the ring
    /// walk of radius `step`. Every ring is split evenly between its tiles,
    /// and each slice is centered on its tile, so the first slice starts
    /// below 0°.
    fn slice(step: usize, index: usize) -> Self {
        // Slice i spans half-widths 2i-1 through 2i+1. Both neighbors compute
        // their shared edge from the same integer, so the edges match exactly.
        let edge = |half_widths: isize| {
            half_widths as f64 * (FULL_CIRCLE / 2.0) / (6 * step) as f64
        };
        let index = index as isize;
        Self::new(edge(2 * index - 1), edge(2 * index + 1))
    }

    fn center(self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Split this arc at the 0° line, and map everything into `[0, 360]`.
    /// Slices never extend past 360°, only below 0°, so this yields one arc
    /// or two.
    fn normalize(self) -> impl Iterator<Item = Arc> {
        let (first, second) = if self.min < 0.0 {
            (
                Self::new(normalize_angle(self.min), FULL_CIRCLE),
                Some(Self::new(0.0, self.max)),
            )
        } else {
            (self, None)
        };
        std::iter::once(first).chain(second)
    }

    /// Do these arcs share any angle? Arcs that only touch at their ends count
    /// as overlapping, so they get merged.
    fn overlaps(self, other: Arc) -> bool {
        self.min <= other.max + ANGLE_EPSILON
            && other.min <= self.max + ANGLE_EPSILON
    }

    /// Smallest arc that covers both of these
    fn union(self, other: Arc) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Does this arc fully cover the other one? Inclusive on both ends.
    fn covers(self, other: Arc) -> bool {
        other.min >= self.min - ANGLE_EPSILON
            && other.max <= self.max + ANGLE_EPSILON
    }

    /// Is the given angle in this arc? Includes the lower bound but excludes
    /// the upper one.
    fn contains(self, angle: f64) -> bool {
        angle >= self.min - ANGLE_EPSILON && angle < self.max - ANGLE_EPSILON
    }
}

/// Map any angle into `[0, 360)`
fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(FULL_CIRCLE)
}

/// The set of arcs hidden from the viewer. The arcs are kept pairwise
/// disjoint: every new shadow absorbs all the shadows it overlaps.
#[derive(Clone, Debug, Default)]
struct Shadows {
    arcs: Vec<Arc>,
}

impl Shadows {
    /// Is a tile with the given slice hidden? With `partial` set, the tile is
    /// only hidden if one shadow covers its whole slice. Otherwise, it's hidden
    /// as soon as its center is in shadow.
    fn is_shaded(&self, slice: Arc, partial: bool) -> bool {
        if partial {
            // A slice that wraps around 0° has to be covered on both sides
            slice
                .normalize()
                .all(|piece| self.arcs.iter().any(|arc| arc.covers(piece)))
        } else {
            let center = normalize_angle(slice.center());
            self.arcs.iter().any(|arc| arc.contains(center))
        }
    }

    /// Add the shadow cast by a tile with the given slice
    fn cast(&mut self, slice: Arc) {
        for mut shadow in slice.normalize() {
            while let Some(i) =
                self.arcs.iter().position(|arc| arc.overlaps(shadow))
            {
                shadow = shadow.union(self.arcs.swap_remove(i));
            }
            self.arcs.push(shadow);
        }
    }
}

/// Find every tile within `radius` steps of `origin` that the origin can see.
/// Opaque tiles hide the tiles behind them, as seen from the origin, but are
/// visible themselves (as long as nothing closer hides them). The origin is
/// always visible. Only tiles that the grid considers valid are included.
///
/// The sweep goes out one ring at a time. Each ring is divided into equal
/// angular slices, one per tile, and every opaque tile casts its slice as a
/// shadow onto all the rings beyond it. By default, a tile is hidden when the
/// center of its slice is in shadow. If `include_partially_visible` is set, a
/// tile is only hidden when its entire slice is in shadow, so tiles that are
/// partially visible are included.
/// https://www.redblobgames.com/grids/hexagons/#field-of-view
///
/// Returns an error if `radius` is negative.
pub fn field_of_view(
    origin: TilePoint,
    radius: i32,
    grid: &impl Grid,
    include_partially_visible: bool,
) -> anyhow::Result<TilePointSet> {
    let radius = HexError::check_range("radius", radius)?;
    timed!(
        "Field of view",
        sweep(origin, radius, grid, include_partially_visible)
    )
}

fn sweep(
    origin: TilePoint,
    radius: usize,
    grid: &impl Grid,
    partial: bool,
) -> anyhow::Result<TilePointSet> {
    let mut visible = TilePointSet::default();
    visible.insert(origin);
    let mut shadows = Shadows::default();

    for step in 1..=radius {
        // check_range capped the radius at i32::MAX, so this can't overflow
        let ring = ring(origin, step as i32)?;
        for (index, &tile) in ring.iter().enumerate() {
            let slice = Arc::slice(step, index);
            if !shadows.is_shaded(slice, partial) && grid.is_valid(tile) {
                visible.insert(tile);
            }

            if grid.is_opaque(tile) {
                trace!("{} casts shadow {}", tile, slice);
                shadows.cast(slice);
            }
        }
    }

    debug!(
        "{} tiles visible from {} within radius {} ({} shadow arcs)",
        visible.len(),
        origin,
        radius,
        shadows.arcs.len()
    );
    Ok(visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filled_ring, CellConfig, GridConfig, HexGrid};
    use assert_approx_eq::assert_approx_eq;

    fn grid_with_walls(radius: u16, walls: &[TilePoint]) -> HexGrid {
        HexGrid::new(GridConfig {
            radius,
            default_cost: 0.0,
            cells: walls.iter().copied().map(CellConfig::wall).collect(),
        })
        .unwrap()
    }

    #[test]
    fn test_slice() {
        let first = Arc::slice(1, 0);
        assert_approx_eq!(first.min, -30.0);
        assert_approx_eq!(first.max, 30.0);
        let slice = Arc::slice(2, 3);
        assert_approx_eq!(slice.center(), 90.0);
        assert_approx_eq!(slice.max - slice.min, 30.0);
    }

    #[test]
    fn test_slices_share_edges() {
        for step in 1..40 {
            let len = 6 * step;
            for index in 0..len {
                let next = (index + 1) % len;
                let slice = Arc::slice(step, index);
                let next_slice = Arc::slice(step, next);
                if next == 0 {
                    // The last slice meets the first one across 0°
                    assert_approx_eq!(slice.max, next_slice.min + FULL_CIRCLE);
                } else {
                    assert_eq!(slice.max, next_slice.min, "step {}", step);
                }
            }
        }
    }

    #[test]
    fn test_normalize() {
        let pieces: Vec<_> = Arc::new(-30.0, 30.0).normalize().collect();
        assert_eq!(
            pieces,
            vec![Arc::new(330.0, 360.0), Arc::new(0.0, 30.0)]
        );
        let pieces: Vec<_> = Arc::new(30.0, 90.0).normalize().collect();
        assert_eq!(pieces, vec![Arc::new(30.0, 90.0)]);
        assert_approx_eq!(normalize_angle(-15.0), 345.0);
        assert_approx_eq!(normalize_angle(720.0), 0.0);
    }

    #[test]
    fn test_cast_merges() {
        let mut shadows = Shadows::default();
        shadows.cast(Arc::new(10.0, 20.0));
        shadows.cast(Arc::new(40.0, 50.0));
        assert_eq!(shadows.arcs.len(), 2);

        // Bridges the gap, so everything collapses into one arc
        shadows.cast(Arc::new(15.0, 45.0));
        assert_eq!(shadows.arcs, vec![Arc::new(10.0, 50.0)]);

        // Touching arcs merge too
        shadows.cast(Arc::new(50.0, 60.0));
        assert_eq!(shadows.arcs, vec![Arc::new(10.0, 60.0)]);

        // Wrapping slices land on both ends of the circle
        shadows.cast(Arc::new(-5.0, 5.0));
        assert_eq!(shadows.arcs.len(), 3);
        for (i, a) in shadows.arcs.iter().enumerate() {
            for b in &shadows.arcs[i + 1..] {
                assert!(!a.overlaps(*b), "{} overlaps {}", a, b);
            }
        }
    }

    #[test]
    fn test_is_shaded() {
        let mut shadows = Shadows::default();
        shadows.cast(Arc::new(30.0, 90.0));

        // Center mode is half-open
        assert!(shadows.is_shaded(Arc::new(15.0, 45.0), false));
        assert!(!shadows.is_shaded(Arc::new(75.0, 105.0), false));
        // Partial mode needs the whole slice, inclusive on both ends
        assert!(!shadows.is_shaded(Arc::new(15.0, 45.0), true));
        assert!(shadows.is_shaded(Arc::new(30.0, 90.0), true));

        // A wrapped slice is only hidden once both halves are covered
        let wrapped = Arc::new(-10.0, 10.0);
        shadows.cast(Arc::new(0.0, 20.0));
        assert!(shadows.is_shaded(wrapped, false));
        assert!(!shadows.is_shaded(wrapped, true));
        shadows.cast(Arc::new(340.0, 360.0));
        assert!(shadows.is_shaded(wrapped, true));
    }

    #[test]
    fn test_radius_zero() {
        let grid = HexGrid::with_radius(3);
        let origin = TilePoint::new_xy(1, -1);
        assert_eq!(
            field_of_view(origin, 0, &grid, false).unwrap(),
            vec![origin].into_iter().collect::<TilePointSet>()
        );
    }

    #[test]
    fn test_negative_radius() {
        let grid = HexGrid::with_radius(3);
        let err =
            field_of_view(TilePoint::ORIGIN, -1, &grid, false).unwrap_err();
        assert!(matches!(
            err.downcast::<HexError>().unwrap(),
            HexError::NegativeRange { name: "radius", .. }
        ));
    }

    #[test]
    fn test_open_grid() {
        let grid = HexGrid::with_radius(10);
        let visible =
            field_of_view(TilePoint::ORIGIN, 2, &grid, false).unwrap();
        assert_eq!(visible.len(), 19);
        assert_eq!(visible, filled_ring(TilePoint::ORIGIN, 2).unwrap());

        for radius in 0..6 {
            for &partial in &[false, true] {
                assert_eq!(
                    field_of_view(TilePoint::ORIGIN, radius, &grid, partial)
                        .unwrap(),
                    filled_ring(TilePoint::ORIGIN, radius).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_clipped_by_grid() {
        let grid = HexGrid::with_radius(1);
        let visible =
            field_of_view(TilePoint::ORIGIN, 3, &grid, false).unwrap();
        assert_eq!(visible.len(), 7);
        assert!(visible.iter().all(|&tile| grid.is_valid(tile)));
    }

    #[test]
    fn test_single_wall() {
        // (0, 1, -1) is the second tile in the first ring, so it owns the
        // slice [30°, 90°]
        let wall = TilePoint::new_xy(0, 1);
        let behind = TilePoint::new_xy(0, 2);
        let edge = TilePoint::new_xy(-1, 2);
        let grid = grid_with_walls(5, &[wall]);

        let visible =
            field_of_view(TilePoint::ORIGIN, 3, &grid, false).unwrap();
        assert!(visible.contains(&wall));
        assert!(!visible.contains(&behind));
        // Center of this slice is exactly on the start of the shadow
        assert!(!visible.contains(&edge));
        assert!(visible.contains(&TilePoint::new_xy(1, 1)));
        assert!(!visible.contains(&TilePoint::new_xy(0, 3)));

        // In partial mode, the edge tile is only half hidden
        let visible = field_of_view(TilePoint::ORIGIN, 3, &grid, true).unwrap();
        assert!(visible.contains(&wall));
        assert!(!visible.contains(&behind));
        assert!(visible.contains(&edge));
    }

    #[test]
    fn test_wall_on_first_slice() {
        // The first tile of the ring owns a slice that wraps around 0°
        let wall = TilePoint::direction(4);
        let behind = TilePoint::direction(4).scale(2).unwrap();
        let grid = grid_with_walls(5, &[wall]);
        for &partial in &[false, true] {
            let visible =
                field_of_view(TilePoint::ORIGIN, 2, &grid, partial).unwrap();
            assert!(visible.contains(&wall));
            assert!(!visible.contains(&behind));
        }
    }

    #[test]
    fn test_full_ring_wall() {
        for &wall_radius in &[1, 7, 9, 11] {
            let walls: Vec<_> = ring(TilePoint::ORIGIN, wall_radius)
                .unwrap()
                .into_iter()
                .collect();
            let grid = grid_with_walls(30, &walls);
            let inside = filled_ring(TilePoint::ORIGIN, wall_radius).unwrap();
            for &partial in &[false, true] {
                let visible = field_of_view(
                    TilePoint::ORIGIN,
                    wall_radius + 8,
                    &grid,
                    partial,
                )
                .unwrap();
                assert_eq!(
                    visible, inside,
                    "wall radius {} (partial: {})",
                    wall_radius, partial
                );
            }
        }
    }

    #[test]
    fn test_surrounded() {
        let walls: Vec<_> =
            TilePoint::ORIGIN.neighbors().unwrap().into_iter().collect();
        let grid = grid_with_walls(5, &walls);
        let visible =
            field_of_view(TilePoint::ORIGIN, 4, &grid, false).unwrap();
        assert_eq!(visible, filled_ring(TilePoint::ORIGIN, 1).unwrap());
    }
}
