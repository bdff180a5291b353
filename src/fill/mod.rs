//! Filling an outline with a maze.
//!
//! The maze is laid over the outline's bounding box (plus [`FILL_MARGIN`] on
//! every side, so the walls run cleanly off the edges) and handed back in a
//! [`Group`] clipped to the outline.
use crate::errors::Result;
use crate::maze::{check_spacing, maze, MazeStyle};
use crate::shapes::{add_margin, rotated_bounding_box, Group, Shape};
use geo_types::{coord, Rect};
use rand::RngCore;
use tracing::debug;

/// Extra room around the outline's bounds.
pub const FILL_MARGIN: f64 = 20.0;

/// Rows and columns of `spacing` sized cells needed to cover `bounds`.
fn grid_over(bounds: Rect<f64>, spacing: f64) -> (usize, usize) {
    (
        (bounds.height() / spacing).ceil() as usize,
        (bounds.width() / spacing).ceil() as usize,
    )
}

/// A maze of `spacing` sized cells covering `outline`, clipped to it. With a
/// `rotation` (degrees) the maze grid is turned by that much.
///
/// The outline is measured at frame 0, so fill before stepping it anywhere
/// else.
pub fn fill_maze(
    outline: &[Shape],
    spacing: f64,
    style: &dyn MazeStyle,
    rotation: Option<f64>,
    rng: &mut dyn RngCore,
) -> Result<Shape> {
    check_spacing(spacing)?;
    let angle = rotation.unwrap_or(0.0);
    let bounds = add_margin(rotated_bounding_box(outline, angle, 0, rng)?, FILL_MARGIN);
    let (rows, cols) = grid_over(bounds, spacing);
    debug!(
        "Filling {} shapes with a {}x{} maze turned {} degrees",
        outline.len(),
        rows,
        cols,
        angle
    );
    let mut fill = maze(rows, cols, spacing, bounds.min(), style, rng)?;
    if rotation.is_some() {
        fill.rotate(angle, coord! {x: 0.0, y: 0.0});
    }
    Ok(Shape::Group(Group::new(vec![fill]).with_clip(outline.to_vec())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MeanderError;
    use crate::maze::styles::{Pipes, Straight};
    use crate::shapes::rectangle;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(99)
    }

    fn contains(outer: Rect<f64>, inner: Rect<f64>) -> bool {
        outer.min().x <= inner.min().x
            && outer.min().y <= inner.min().y
            && outer.max().x >= inner.max().x
            && outer.max().y >= inner.max().y
    }

    fn members(shape: &Shape) -> &Group {
        match shape {
            Shape::Group(g) => g,
            other => panic!("expected a group, got {:?}", other),
        }
    }

    #[test]
    fn test_grid_size() {
        let bounds = add_margin(
            Rect::new(coord! {x: 0.0, y: 0.0}, coord! {x: 100.0, y: 50.0}),
            FILL_MARGIN,
        );
        assert_eq!(grid_over(bounds, 10.0), (9, 14));
        assert_eq!(grid_over(bounds, 7.0), (13, 20));
    }

    #[test]
    fn test_fill_covers_outline() {
        let mut rng = rng();
        let outline = vec![rectangle(coord! {x: 0.0, y: 0.0}, 100.0, 50.0)];
        let style = Straight::new(0.5).unwrap();
        let filled = fill_maze(&outline, 10.0, &style, None, &mut rng).unwrap();
        let group = members(&filled);
        assert_eq!(group.members.len(), 1);
        assert_eq!(group.clip.len(), 1);

        let clip = filled.bounding_box(0, &mut rng).unwrap();
        assert_eq!(clip, Rect::new(coord! {x: 0.0, y: 0.0}, coord! {x: 100.0, y: 50.0}));

        let inside = group.members[0].bounding_box(0, &mut rng).unwrap();
        let limit = Rect::new(coord! {x: -20.0, y: -20.0}, coord! {x: 120.0, y: 70.0});
        assert!(contains(limit, inside));
        assert!(contains(inside, clip));
    }

    #[test]
    fn test_rotated_fill_lines_up() {
        let mut rng = rng();
        let outline = vec![rectangle(coord! {x: 10.0, y: 30.0}, 60.0, 40.0)];
        let style = Pipes::new(0.6).unwrap();
        let filled = fill_maze(&outline, 8.0, &style, Some(30.0), &mut rng).unwrap();
        let group = members(&filled);
        let maze_box = rotated_bounding_box(&group.members, 30.0, 0, &mut rng).unwrap();
        let outline_box = rotated_bounding_box(&outline, 30.0, 0, &mut rng).unwrap();
        assert!(contains(maze_box, outline_box));
        // the grid can overshoot by up to a cell on the far sides
        assert!(contains(add_margin(outline_box, FILL_MARGIN + 8.0), maze_box));
    }

    #[test]
    fn test_bad_fill() {
        let mut rng = rng();
        let style = Straight::new(0.5).unwrap();
        let outline = vec![rectangle(coord! {x: 0.0, y: 0.0}, 10.0, 10.0)];
        assert_eq!(
            fill_maze(&outline, 0.0, &style, None, &mut rng).unwrap_err(),
            MeanderError::InvalidSpacing(0.0)
        );
        assert_eq!(
            fill_maze(&[], 5.0, &style, None, &mut rng).unwrap_err(),
            MeanderError::EmptyBounds
        );
    }
}
