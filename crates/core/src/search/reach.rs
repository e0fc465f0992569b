use crate::{timed, Grid, HexError, TilePoint, TilePointSet};
use log::debug;

/// Find every tile that can be reached from `origin` in at most `steps` moves,
/// where a move goes to an adjacent tile that the grid considers valid and
/// not blocked. The origin is always included, even if it is blocked itself.
///
/// The search expands one ring of moves at a time (a breadth-first flood), so
/// a tile is only reached once, at the lowest step count possible.
/// https://www.redblobgames.com/grids/hexagons/#range-obstacles
///
/// Returns an error if `steps` is negative.
pub fn reachable(
    origin: TilePoint,
    steps: i32,
    grid: &impl Grid,
) -> anyhow::Result<TilePointSet> {
    let steps = HexError::check_range("steps", steps)?;
    timed!("Flood search", flood(origin, steps, grid))
}

fn flood(
    origin: TilePoint,
    steps: usize,
    grid: &impl Grid,
) -> anyhow::Result<TilePointSet> {
    let mut visited = TilePointSet::default();
    visited.insert(origin);

    // fringes[k] holds the tiles first reached after exactly k moves
    let mut fringes: Vec<Vec<TilePoint>> = Vec::with_capacity(steps + 1);
    fringes.push(vec![origin]);

    for step in 1..=steps {
        let mut fringe = Vec::new();
        for &tile in &fringes[step - 1] {
            for neighbor in grid.neighbors(tile)? {
                if !grid.is_blocked(neighbor) && visited.insert(neighbor) {
                    fringe.push(neighbor);
                }
            }
        }

        if fringe.is_empty() {
            debug!("Flood from {} ran dry after {} steps", origin, step - 1);
            break;
        }
        fringes.push(fringe);
    }

    debug!(
        "Flood from {} reached {} tiles in up to {} steps",
        origin,
        visited.len(),
        steps
    );
    Ok(visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filled_ring, CellConfig, GridConfig, HexGrid};

    #[test]
    fn test_open_grid_matches_filled_ring() {
        let grid = HexGrid::with_radius(10);
        for steps in 0..5 {
            assert_eq!(
                reachable(TilePoint::ORIGIN, steps, &grid).unwrap(),
                filled_ring(TilePoint::ORIGIN, steps).unwrap()
            );
        }
    }

    #[test]
    fn test_zero_steps() {
        let grid = HexGrid::with_radius(2);
        let origin = TilePoint::new_xy(1, 0);
        assert_eq!(
            reachable(origin, 0, &grid).unwrap(),
            vec![origin].into_iter().collect::<TilePointSet>()
        );
    }

    #[test]
    fn test_negative_steps() {
        let grid = HexGrid::with_radius(2);
        let err = reachable(TilePoint::ORIGIN, -2, &grid).unwrap_err();
        assert_eq!(
            err.downcast::<HexError>().unwrap(),
            HexError::NegativeRange {
                name: "steps",
                value: -2
            }
        );
    }

    #[test]
    fn test_clipped_by_grid() {
        // Every tile on a radius-2 grid is within 4 steps of any other
        let grid = HexGrid::with_radius(2);
        let corner = TilePoint::new_xy(2, -2);
        let reached = reachable(corner, 10, &grid).unwrap();
        assert_eq!(reached.len(), grid.len());
    }

    #[test]
    fn test_walls() {
        // Surround the origin with walls on every side but one
        let open = TilePoint::direction(2);
        let cells = TilePoint::ORIGIN
            .neighbors()
            .unwrap()
            .into_iter()
            .filter(|&neighbor| neighbor != open)
            .map(CellConfig::wall)
            .collect();
        let grid = HexGrid::new(GridConfig {
            radius: 5,
            default_cost: 0.0,
            cells,
        })
        .unwrap();

        let reached = reachable(TilePoint::ORIGIN, 1, &grid).unwrap();
        assert_eq!(
            reached,
            vec![TilePoint::ORIGIN, open]
                .into_iter()
                .collect::<TilePointSet>()
        );

        // Walls are never included, no matter how far we go
        let reached = reachable(TilePoint::ORIGIN, 4, &grid).unwrap();
        for wall in grid.blocked_points() {
            assert!(!reached.contains(&wall));
        }
        // Going the long way around reaches the tile behind a wall
        // (5 steps instead of 2)
        let behind = TilePoint::direction(0).scale(2).unwrap();
        assert!(!reached.contains(&behind));
        assert!(reachable(TilePoint::ORIGIN, 5, &grid)
            .unwrap()
            .contains(&behind));
    }
}
