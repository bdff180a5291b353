//! # Maze
//!
//! Turns a spanning tree over a grid into one continuous outline that snakes
//! around every branch of the tree, like the walls of a corridor maze or a
//! network of pipes.
//!
//! The walk visits each cell through the link it was entered by and asks the
//! [`MazeStyle`] for pieces drawn in a unit cell entered from the bottom. The
//! pieces are turned to match the real entry side, moved to the cell's place
//! in the grid, and spliced between the outlines of the branches leaving the
//! cell so the whole thing reads counter-clockwise as a single path.
//!
//! ```rust
//! use meander::maze::{maze, styles::Straight};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(3);
//! let style = Straight::new(0.4).unwrap();
//! let outline = maze(12, 20, 5.0, (0.0, 0.0), &style, &mut rng).unwrap();
//! let bounds = outline.bounding_box(0, &mut rng).unwrap();
//! assert!(bounds.width() < 100.0 && bounds.height() < 60.0);
//! ```
use crate::errors::{MeanderError, Result};
use crate::geom::matrix::{cell_rotation, scale_matrix, translate_matrix, TransformCoords};
use crate::grid::{Cell, Connectivity, Direction};
use crate::shapes::Shape;
use geo_types::Coord;
use rand::RngCore;
use std::fmt::Debug;
use tracing::{debug, trace};

pub mod config;
pub mod styles;

pub use config::{MazeConfig, StyleConfig};

/// Part of an outline inside one unit cell, in drawing order.
pub type Fragment = Vec<Coord<f64>>;

/// A copy of `fragment` turned `quarters` times counter-clockwise about the
/// middle of the unit cell.
pub fn rotated_fragment(fragment: &[Coord<f64>], quarters: usize) -> Fragment {
    let mut out = fragment.to_vec();
    out.transform(&cell_rotation(quarters));
    out
}

/// A right turn: in at the bottom, out to the right.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TurnPieces {
    pub inner: Fragment,
    pub outer: Fragment,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StraightPieces {
    pub right: Fragment,
    pub left: Fragment,
}

/// In at the bottom, out to the right and to the left.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeePieces {
    pub right: Fragment,
    pub top: Fragment,
    pub left: Fragment,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrossPieces {
    pub lower_right: Fragment,
    pub upper_right: Fragment,
    pub upper_left: Fragment,
    pub lower_left: Fragment,
}

/// How one cell of a maze is drawn.
///
/// Every piece lives in the unit cell `[0, 1] x [0, 1]`, is entered through
/// the bottom edge and runs counter-clockwise. The walk rotates them for other
/// entry sides. Styles may be random and return something new every call.
pub trait MazeStyle: Debug {
    /// Dead end.
    fn tip(&self, rng: &mut dyn RngCore) -> Fragment;

    /// Right turn. Left turns reuse it rotated.
    fn turn(&self, rng: &mut dyn RngCore) -> TurnPieces;

    fn straight(&self, rng: &mut dyn RngCore) -> StraightPieces;

    /// Branching right and left. The other two T shapes reuse it rotated.
    fn tee(&self, rng: &mut dyn RngCore) -> TeePieces;

    /// Branching every way.
    fn cross(&self, rng: &mut dyn RngCore) -> CrossPieces;

    /// Shape made from the finished outline.
    fn output(&self, points: Vec<Coord<f64>>) -> Shape {
        Shape::polygon(points)
    }
}

/// What a cell looks like from the side it was entered, given whether it
/// links to its right, straight ahead, and to its left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPattern {
    Tip,
    RightTurn,
    LeftTurn,
    Straight,
    /// Right and left.
    TeeRightLeft,
    /// Right and straight on.
    TeeRightStraight,
    /// Straight on and left.
    TeeStraightLeft,
    Cross,
}

impl CellPattern {
    pub fn classify(right: bool, straight: bool, left: bool) -> CellPattern {
        match (right, straight, left) {
            (false, false, false) => CellPattern::Tip,
            (true, false, false) => CellPattern::RightTurn,
            (false, false, true) => CellPattern::LeftTurn,
            (false, true, false) => CellPattern::Straight,
            (true, false, true) => CellPattern::TeeRightLeft,
            (true, true, false) => CellPattern::TeeRightStraight,
            (false, true, true) => CellPattern::TeeStraightLeft,
            (true, true, true) => CellPattern::Cross,
        }
    }
}

/// One unit of pending work for the walk.
enum Task {
    Emit(Fragment),
    /// Draw everything reachable from `cell` without going back through `from`.
    Visit { cell: Cell, from: Direction },
}

struct Walk<'a> {
    connectivity: &'a Connectivity,
    style: &'a dyn MazeStyle,
    visited: Vec<bool>,
    path: Vec<Coord<f64>>,
}

impl<'a> Walk<'a> {
    fn new(connectivity: &'a Connectivity, style: &'a dyn MazeStyle) -> Self {
        Walk {
            connectivity,
            style,
            visited: vec![false; connectivity.rows() * connectivity.cols()],
            path: vec![],
        }
    }

    fn mark(&mut self, (row, col): Cell) {
        let i = row * self.connectivity.cols() + col;
        assert!(
            !self.visited[i],
            "maze walk came back to cell {:?}; the connectivity has a loop",
            (row, col)
        );
        self.visited[i] = true;
    }

    /// Visit task for the cell across `dir`.
    fn neighbour(&self, cell: Cell, dir: Direction) -> Task {
        let next = dir
            .step(cell, self.connectivity.rows(), self.connectivity.cols())
            .unwrap_or_else(|| panic!("cell {:?} links {:?} out of the grid", cell, dir));
        Task::Visit {
            cell: next,
            from: dir.opposite(),
        }
    }

    /// Run tasks depth first, in order, until there are none left.
    fn run(&mut self, tasks: Vec<Task>, rng: &mut dyn RngCore) {
        let mut stack: Vec<Task> = tasks.into_iter().rev().collect();
        while let Some(task) = stack.pop() {
            match task {
                Task::Emit(fragment) => self.path.extend(fragment),
                Task::Visit { cell, from } => {
                    let expanded = self.expand(cell, from, rng);
                    stack.extend(expanded.into_iter().rev());
                }
            }
        }
    }

    /// Style pieces for `cell` turned `quarters` from the bottom entry and
    /// moved into place.
    fn placed<const N: usize>(&self, cell: Cell, quarters: usize, pieces: [Fragment; N]) -> [Task; N] {
        let to_cell = translate_matrix(cell.1 as f64, cell.0 as f64) * cell_rotation(quarters);
        pieces.map(|mut f| {
            f.transform(&to_cell);
            Task::Emit(f)
        })
    }

    fn expand(&mut self, cell: Cell, from: Direction, rng: &mut dyn RngCore) -> Vec<Task> {
        self.mark(cell);
        let right = from.turned(1);
        let ahead = from.turned(2);
        let left = from.turned(3);
        let links = self.connectivity.links(cell);
        let pattern = CellPattern::classify(
            links[right.index()],
            links[ahead.index()],
            links[left.index()],
        );
        trace!("Cell {:?} entered from {:?} is {:?}", cell, from, pattern);
        let d = from.index();
        match pattern {
            CellPattern::Tip => {
                let [tip] = self.placed(cell, d, [self.style.tip(rng)]);
                vec![tip]
            }
            CellPattern::RightTurn => {
                let p = self.style.turn(rng);
                let [inner, outer] = self.placed(cell, d, [p.inner, p.outer]);
                vec![inner, self.neighbour(cell, right), outer]
            }
            CellPattern::LeftTurn => {
                let p = self.style.turn(rng);
                let [inner, outer] = self.placed(cell, d + 3, [p.inner, p.outer]);
                vec![outer, self.neighbour(cell, left), inner]
            }
            CellPattern::Straight => {
                let p = self.style.straight(rng);
                let [r, l] = self.placed(cell, d, [p.right, p.left]);
                vec![r, self.neighbour(cell, ahead), l]
            }
            CellPattern::TeeRightLeft => {
                let p = self.style.tee(rng);
                let [r, top, l] = self.placed(cell, d, [p.right, p.top, p.left]);
                vec![r, self.neighbour(cell, right), top, self.neighbour(cell, left), l]
            }
            CellPattern::TeeRightStraight => {
                let p = self.style.tee(rng);
                let [r, top, l] = self.placed(cell, d + 1, [p.right, p.top, p.left]);
                vec![l, self.neighbour(cell, right), r, self.neighbour(cell, ahead), top]
            }
            CellPattern::TeeStraightLeft => {
                let p = self.style.tee(rng);
                let [r, top, l] = self.placed(cell, d + 3, [p.right, p.top, p.left]);
                vec![top, self.neighbour(cell, ahead), l, self.neighbour(cell, left), r]
            }
            CellPattern::Cross => {
                let p = self.style.cross(rng);
                let [lr, ur, ul, ll] =
                    self.placed(cell, d, [p.lower_right, p.upper_right, p.upper_left, p.lower_left]);
                vec![
                    lr,
                    self.neighbour(cell, right),
                    ur,
                    self.neighbour(cell, ahead),
                    ul,
                    self.neighbour(cell, left),
                    ll,
                ]
            }
        }
    }
}

/// Outline (in grid units, one unit per cell) of everything reachable from
/// `cell` when it's entered through `from`. The link back through `from` is
/// not followed.
///
/// Panics if the walk finds a loop or a link out of the grid.
pub fn assemble_from(
    connectivity: &Connectivity,
    cell: Cell,
    from: Direction,
    style: &dyn MazeStyle,
    rng: &mut dyn RngCore,
) -> Vec<Coord<f64>> {
    let mut walk = Walk::new(connectivity, style);
    walk.run(vec![Task::Visit { cell, from }], rng);
    walk.path
}

/// Outline (in grid units) of the whole tree, starting from the corner cell
/// `(0, 0)`.
pub fn assemble(
    connectivity: &Connectivity,
    style: &dyn MazeStyle,
    rng: &mut dyn RngCore,
) -> Result<Vec<Coord<f64>>> {
    let start = (0, 0);
    let right = connectivity.connected(start, Direction::Right);
    let up = connectivity.connected(start, Direction::Up);
    let mut walk = Walk::new(connectivity, style);
    walk.mark(start);
    let tasks = match (right, up) {
        (true, false) => {
            let [tip] = walk.placed(start, 1, [style.tip(rng)]);
            vec![tip, walk.neighbour(start, Direction::Right)]
        }
        (false, true) => {
            let [tip] = walk.placed(start, 2, [style.tip(rng)]);
            vec![tip, walk.neighbour(start, Direction::Up)]
        }
        (true, true) => {
            let p = style.turn(rng);
            let [inner, outer] = walk.placed(start, 1, [p.inner, p.outer]);
            vec![
                outer,
                walk.neighbour(start, Direction::Right),
                inner,
                walk.neighbour(start, Direction::Up),
            ]
        }
        (false, false) => return Err(MeanderError::IsolatedStart),
    };
    walk.run(tasks, rng);
    Ok(walk.path)
}

pub(crate) fn check_spacing(spacing: f64) -> Result<()> {
    if spacing > 0.0 && spacing.is_finite() {
        Ok(())
    } else {
        Err(MeanderError::InvalidSpacing(spacing))
    }
}

/// Maze outline points for a given connectivity, scaled to `spacing` per
/// cell with the grid's lower left corner at `start`.
pub fn maze_path(
    connectivity: &Connectivity,
    spacing: f64,
    start: impl Into<Coord<f64>>,
    style: &dyn MazeStyle,
    rng: &mut dyn RngCore,
) -> Result<Vec<Coord<f64>>> {
    check_spacing(spacing)?;
    let start = start.into();
    let mut path = assemble(connectivity, style, rng)?;
    path.transform(&(translate_matrix(start.x, start.y) * scale_matrix(spacing, spacing)));
    debug!(
        "Maze over {}x{} grid: {} outline points",
        connectivity.rows(),
        connectivity.cols(),
        path.len()
    );
    Ok(path)
}

/// [`maze`] over a connectivity you supply.
pub fn maze_from(
    connectivity: &Connectivity,
    spacing: f64,
    start: impl Into<Coord<f64>>,
    style: &dyn MazeStyle,
    rng: &mut dyn RngCore,
) -> Result<Shape> {
    Ok(style.output(maze_path(connectivity, spacing, start, style, rng)?))
}

/// A maze spanning a random tree over a `rows` x `cols` grid of cells
/// `spacing` wide, with the grid's lower left corner at `start`.
pub fn maze(
    rows: usize,
    cols: usize,
    spacing: f64,
    start: impl Into<Coord<f64>>,
    style: &dyn MazeStyle,
    rng: &mut dyn RngCore,
) -> Result<Shape> {
    check_spacing(spacing)?;
    let connectivity = Connectivity::random_tree(rows, cols, rng)?;
    maze_from(&connectivity, spacing, start, style, rng)
}
