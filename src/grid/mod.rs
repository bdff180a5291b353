//! Random spanning trees over rectangular grids.
//!
//! Cells are addressed as `(row, col)` with row 0 at the bottom, so "up"
//! means increasing row and matches increasing y once a maze is laid out.
use crate::errors::{MeanderError, Result};
use rand::{Rng, RngCore};
use std::collections::VecDeque;
use tracing::trace;

/// `(row, col)`
pub type Cell = (usize, usize);

/// Absolute compass direction out of a cell. The discriminants are the
/// indices into a cell's link array and count counter-clockwise, so turning
/// right from a heading of `d` is `d + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down = 0,
    Right = 1,
    Up = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Direction {
        Direction::ALL[i % 4]
    }

    /// `quarters` steps further round the compass (wraps).
    pub fn turned(self, quarters: usize) -> Direction {
        Direction::from_index(self.index() + quarters)
    }

    pub fn opposite(self) -> Direction {
        self.turned(2)
    }

    /// The neighbouring cell in this direction, if it's inside a
    /// `rows` x `cols` grid.
    pub fn step(self, (row, col): Cell, rows: usize, cols: usize) -> Option<Cell> {
        let next = match self {
            Direction::Down => (row.checked_sub(1)?, col),
            Direction::Right => (row, col + 1),
            Direction::Up => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
        };
        if next.0 < rows && next.1 < cols {
            Some(next)
        } else {
            None
        }
    }
}

/// Union-find over cell indices, for Kruskal and for cycle checks.
struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        DisjointSets {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Merge the sets holding `a` and `b`. False if they were already one set.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Which neighbours each cell of a grid is joined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    rows: usize,
    cols: usize,
    links: Vec<[bool; 4]>,
}

fn check_dims(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        Err(MeanderError::EmptyGrid { rows, cols })
    } else {
        Ok(())
    }
}

/// All grid edges, each once, as (lower/left cell, direction towards the other).
fn grid_edges(rows: usize, cols: usize) -> Vec<(Cell, Direction)> {
    let mut edges = Vec::with_capacity(2 * rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                edges.push(((row, col), Direction::Right));
            }
            if row + 1 < rows {
                edges.push(((row, col), Direction::Up));
            }
        }
    }
    edges
}

impl Connectivity {
    /// A grid with no links at all.
    pub fn empty(rows: usize, cols: usize) -> Result<Connectivity> {
        check_dims(rows, cols)?;
        Ok(Connectivity {
            rows,
            cols,
            links: vec![[false; 4]; rows * cols],
        })
    }

    /// Uniformly weighted random spanning tree: every grid edge gets an
    /// independent uniform weight and Kruskal keeps the minimum tree.
    pub fn random_tree(rows: usize, cols: usize, rng: &mut dyn RngCore) -> Result<Connectivity> {
        let mut tree = Connectivity::empty(rows, cols)?;
        let mut weighted: Vec<(f64, Cell, Direction)> = grid_edges(rows, cols)
            .into_iter()
            .map(|(cell, dir)| (rng.gen::<f64>(), cell, dir))
            .collect();
        weighted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut sets = DisjointSets::new(rows * cols);
        let mut kept = 0;
        for (_, cell, dir) in weighted {
            if kept + 1 == rows * cols {
                break;
            }
            if let Some(other) = dir.step(cell, rows, cols) {
                if sets.union(tree.index(cell), tree.index(other)) {
                    tree.link(cell, dir, other);
                    kept += 1;
                }
            }
        }
        trace!("Spanning tree over {}x{} grid with {} edges", rows, cols, kept);
        Ok(tree)
    }

    /// Build from explicit cell pairs. Every pair must be two adjacent cells
    /// inside the grid and the result must not contain a cycle.
    pub fn from_edges(rows: usize, cols: usize, edges: &[(Cell, Cell)]) -> Result<Connectivity> {
        let mut out = Connectivity::empty(rows, cols)?;
        for &(a, b) in edges {
            let dir = Direction::ALL
                .into_iter()
                .find(|d| d.step(a, rows, cols) == Some(b))
                .ok_or_else(|| {
                    MeanderError::InvalidConnectivity(format!(
                        "{:?} and {:?} are not neighbouring cells of a {}x{} grid",
                        a, b, rows, cols
                    ))
                })?;
            out.link(a, dir, b);
        }
        out.validate()?;
        Ok(out)
    }

    /// Build from per-cell `[down, right, up, left]` flags in row-major order
    /// (row 0 first).
    pub fn from_links(rows: usize, cols: usize, links: Vec<[bool; 4]>) -> Result<Connectivity> {
        check_dims(rows, cols)?;
        if links.len() != rows * cols {
            return Err(MeanderError::InvalidConnectivity(format!(
                "expected {} cells, got {}",
                rows * cols,
                links.len()
            )));
        }
        let out = Connectivity { rows, cols, links };
        out.validate()?;
        Ok(out)
    }

    /// In-grid, symmetric, and acyclic.
    fn validate(&self) -> Result<()> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                for dir in Direction::ALL {
                    if !self.connected((row, col), dir) {
                        continue;
                    }
                    let other = dir.step((row, col), self.rows, self.cols).ok_or_else(|| {
                        MeanderError::InvalidConnectivity(format!(
                            "cell {:?} links {:?} out of the grid",
                            (row, col),
                            dir
                        ))
                    })?;
                    if !self.connected(other, dir.opposite()) {
                        return Err(MeanderError::InvalidConnectivity(format!(
                            "cell {:?} links {:?} but {:?} doesn't link back",
                            (row, col),
                            dir,
                            other
                        )));
                    }
                }
            }
        }
        let mut sets = DisjointSets::new(self.rows * self.cols);
        for (a, b) in self.edges() {
            if !sets.union(self.index(a), self.index(b)) {
                return Err(MeanderError::InvalidConnectivity(format!(
                    "edge {:?}-{:?} closes a loop",
                    a, b
                )));
            }
        }
        Ok(())
    }

    fn index(&self, (row, col): Cell) -> usize {
        row * self.cols + col
    }

    fn link(&mut self, a: Cell, dir: Direction, b: Cell) {
        let (ia, ib) = (self.index(a), self.index(b));
        self.links[ia][dir.index()] = true;
        self.links[ib][dir.opposite().index()] = true;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `[down, right, up, left]` for a cell. Panics outside the grid.
    pub fn links(&self, cell: Cell) -> [bool; 4] {
        assert!(
            cell.0 < self.rows && cell.1 < self.cols,
            "cell {:?} outside {}x{} grid",
            cell,
            self.rows,
            self.cols
        );
        self.links[self.index(cell)]
    }

    pub fn connected(&self, cell: Cell, dir: Direction) -> bool {
        self.links(cell)[dir.index()]
    }

    /// Neighbour reached through a link, if there is one.
    pub fn follow(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        if self.connected(cell, dir) {
            dir.step(cell, self.rows, self.cols)
        } else {
            None
        }
    }

    /// Every link once, as (cell, cell to its right or above).
    pub fn edges(&self) -> Vec<(Cell, Cell)> {
        grid_edges(self.rows, self.cols)
            .into_iter()
            .filter(|(cell, dir)| self.connected(*cell, *dir))
            .filter_map(|(cell, dir)| dir.step(cell, self.rows, self.cols).map(|o| (cell, o)))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Steps along the links from `(0, 0)` to every cell; `None` where a cell
    /// can't be reached.
    pub fn tree_distances(&self) -> Vec<Vec<Option<usize>>> {
        let mut dists = vec![vec![None; self.cols]; self.rows];
        let mut queue = VecDeque::from([((0, 0), 0)]);
        dists[0][0] = Some(0);
        while let Some((cell, d)) = queue.pop_front() {
            for dir in Direction::ALL {
                if let Some((r, c)) = self.follow(cell, dir) {
                    if dists[r][c].is_none() {
                        dists[r][c] = Some(d + 1);
                        queue.push_back(((r, c), d + 1));
                    }
                }
            }
        }
        dists
    }

    /// Connected and acyclic over every cell.
    pub fn is_spanning_tree(&self) -> bool {
        self.edge_count() + 1 == self.rows * self.cols
            && self.tree_distances().iter().flatten().all(Option::is_some)
    }
}

/// Edges of a random spanning tree of a `rows` x `cols` grid.
pub fn grid_tree_edges(rows: usize, cols: usize, rng: &mut dyn RngCore) -> Result<Vec<(Cell, Cell)>> {
    Ok(Connectivity::random_tree(rows, cols, rng)?.edges())
}
