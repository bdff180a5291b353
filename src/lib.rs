//! Procedural vector art: mazes, meandering strands and the lazy numbers
//! that drive them.
//!
//! Everything here is built out of [`param::Param`]s and [`point::Point`]s,
//! small graphs of values that are only worked out when a frame is asked
//! for. A random value can hold still or wander a little every frame, and
//! shapes built from them animate without any extra bookkeeping. On top of
//! that sit a grid spanning tree, a maze builder with pluggable styles, and
//! a few generators that turn the lot into [`shapes::Shape`]s and finally
//! plain [`geo_types`] geometry.
//!
//! *Frames must be asked for in order, starting at 0, one at a time. Ask
//! for frame 5 of something that has only seen frame 2 and it will panic.*

/// Errors shared by the whole crate.
pub mod errors;

/// Point helpers on plain `geo_types` coordinates, affine matrices and
/// stroke outlines.
pub mod geom;

/// Lazily evaluated, frame stepped numbers.
pub mod param;

/// Lazily evaluated, frame stepped 2D points.
pub mod point;

/// Random spanning trees on a grid of cells.
pub mod grid;

/// The shape model and its bounding box helpers.
pub mod shapes;

/// Mazes traced around a grid spanning tree, in several styles.
pub mod maze;

/// Filling outlines with mazes.
pub mod fill;

/// Strands that wander and wriggle.
pub mod filaments;

/// Make your life easy! Just import prelude::* and get going.
pub mod prelude {
    pub use crate::errors::{MeanderError, Result};
    pub use crate::fill::fill_maze;
    pub use crate::filaments::{filament, tentacle, tree, Backbone};
    pub use crate::geom::PointDistance;
    pub use crate::grid::{Connectivity, Direction};
    pub use crate::maze::styles::{Jagged, Pipes, Round, Straight};
    pub use crate::maze::{maze, MazeConfig, MazeStyle, StyleConfig};
    pub use crate::param::{Param, Pick};
    pub use crate::point::Point;
    pub use crate::shapes::Shape;
}
