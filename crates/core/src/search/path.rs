use crate::{timed, Grid, TilePoint, TilePointMap};
use log::{debug, trace};
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

/// Fixed cost of every single step, charged on top of the cost of the tile
/// being entered. Since this is the cheapest any step can be, the hex
/// distance between two tiles never overestimates the cost of traveling
/// between them.
pub const STEP_COST: f64 = 10.0;

/// Index of a node in the search arena
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct NodeId(usize);

/// One step of a candidate path. Nodes point back to the node they were
/// reached from, so the full path can be rebuilt from any node.
#[derive(Copy, Clone, Debug)]
struct SearchNode {
    point: TilePoint,
    parent: Option<NodeId>,
    /// Total cost of getting here from the start
    cost: f64,
    /// Estimated cost from here to the goal
    heuristic: f64,
}

impl SearchNode {
    fn score(&self) -> f64 {
        self.cost + self.heuristic
    }
}

/// An entry in the frontier. Ordered by score, and then by node ID so that
/// ties go to whichever node was discovered first.
#[derive(Copy, Clone, Debug)]
struct FrontierEntry {
    score: f64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// All the state for a single search. Nodes are owned by the arena and refer
/// to each other by index.
struct Search<'a, G: Grid> {
    grid: &'a G,
    goal: TilePoint,
    nodes: Vec<SearchNode>,
    // Reversed so the heap pops the lowest score first
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
    explored: TilePointMap<f64>,
}

impl<'a, G: Grid> Search<'a, G> {
    fn new(start: TilePoint, goal: TilePoint, grid: &'a G) -> Self {
        let mut search = Self {
            grid,
            goal,
            nodes: Vec::new(),
            frontier: BinaryHeap::new(),
            explored: TilePointMap::default(),
        };
        search.explored.insert(start, 0.0);
        search.push(SearchNode {
            point: start,
            parent: None,
            cost: 0.0,
            heuristic: 0.0,
        });
        search
    }

    fn push(&mut self, node: SearchNode) {
        let id = NodeId(self.nodes.len());
        self.frontier.push(Reverse(FrontierEntry {
            score: node.score(),
            node: id,
        }));
        self.nodes.push(node);
    }

    fn run(mut self) -> anyhow::Result<Option<Vec<TilePoint>>> {
        let mut expanded = 0;
        while let Some(Reverse(entry)) = self.frontier.pop() {
            let node = self.nodes[entry.node.0];

            // A cheaper route to this tile was found after this entry was
            // queued, so the entry is stale
            if self
                .explored
                .get(&node.point)
                .map_or(false, |&best| best < node.cost)
            {
                continue;
            }

            if node.point == self.goal {
                debug!(
                    "Found path to {} with cost {} after expanding {} nodes",
                    self.goal, node.cost, expanded
                );
                return Ok(Some(self.reconstruct(entry.node)));
            }

            expanded += 1;
            trace!("Expanding {} (score {})", node.point, entry.score);
            self.expand(entry.node, node)?;
        }

        debug!(
            "No path to {} after expanding {} nodes",
            self.goal, expanded
        );
        Ok(None)
    }

    fn expand(&mut self, id: NodeId, node: SearchNode) -> anyhow::Result<()> {
        for neighbor in self.grid.neighbors(node.point)? {
            if self.grid.is_blocked(neighbor) {
                continue;
            }

            let new_cost = node.cost + self.grid.cost_at(neighbor) + STEP_COST;
            match self.explored.get(&neighbor) {
                Some(&best) if best <= new_cost => continue,
                _ => {}
            }

            self.explored.insert(neighbor, new_cost);
            self.push(SearchNode {
                point: neighbor,
                parent: Some(id),
                cost: new_cost,
                heuristic: neighbor.distance_to(self.goal) as f64,
            });
        }
        Ok(())
    }

    /// Walk back up the parent chain from the given node, then flip it so the
    /// path starts at the root
    fn reconstruct(&self, id: NodeId) -> Vec<TilePoint> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            path.push(node.point);
            current = node.parent;
        }
        path.reverse();
        path
    }
}

/// Find the cheapest path from `start` to `goal`, using A* search. Entering a
/// tile costs [STEP_COST] plus the grid's cost for that tile. Paths only
/// cross tiles that the grid considers valid and not blocked (the start tile
/// itself is exempt).
///
/// Returns the full path, including both `start` and `goal`, or `None` if
/// the goal can't be reached. If `start == goal`, the path is just that one
/// tile. Errors are only returned if the grid produces an invalid point.
/// https://www.redblobgames.com/pathfinding/a-star/introduction.html
pub fn find_path(
    start: TilePoint,
    goal: TilePoint,
    grid: &impl Grid,
) -> anyhow::Result<Option<Vec<TilePoint>>> {
    timed!("Path search", Search::new(start, goal, grid).run())
}

/// Total cost of moving along the given path, using the same cost model as
/// [find_path]. The first tile is free, since that's where the path starts.
pub fn path_cost(path: &[TilePoint], grid: &impl Grid) -> f64 {
    path.iter()
        .skip(1)
        .map(|&point| grid.cost_at(point) + STEP_COST)
        .sum()
}
