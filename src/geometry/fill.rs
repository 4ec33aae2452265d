// src/geometry/fill.rs
//
// The glyph silhouette, used as a clip region while stroking.

use super::{GlyphOutline, OutlineCommand, Placement};
use tiny_skia::{Path, PathBuilder, Rect};

#[derive(Debug, Clone)]
pub struct FillShape {
    path: Path,
}

impl FillShape {
    /// Builds the placed outline as a path. `None` when the outline
    /// encloses nothing tiny-skia can represent.
    pub fn from_outline(outline: &GlyphOutline, placement: Placement) -> Option<Self> {
        let mut builder = PathBuilder::new();
        for command in &outline.commands {
            match *command {
                OutlineCommand::MoveTo(x, y) => {
                    let p = placement.map(x, y);
                    builder.move_to(p.x, p.y);
                }
                OutlineCommand::LineTo(x, y) => {
                    let p = placement.map(x, y);
                    builder.line_to(p.x, p.y);
                }
                OutlineCommand::QuadTo(cx, cy, x, y) => {
                    let c = placement.map(cx, cy);
                    let p = placement.map(x, y);
                    builder.quad_to(c.x, c.y, p.x, p.y);
                }
                OutlineCommand::CurveTo(c1x, c1y, c2x, c2y, x, y) => {
                    let c1 = placement.map(c1x, c1y);
                    let c2 = placement.map(c2x, c2y);
                    let p = placement.map(x, y);
                    builder.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
                }
                OutlineCommand::Close => builder.close(),
            }
        }
        builder.finish().map(|path| Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bounds(&self) -> Rect {
        self.path.bounds()
    }
}

impl PartialEq for FillShape {
    fn eq(&self, other: &Self) -> bool {
        self.path.verbs() == other.path.verbs() && self.path.points() == other.path.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement() -> Placement {
        Placement {
            scale: 0.1,
            offset_x: 5.0,
            baseline_y: 50.0,
        }
    }

    #[test]
    fn test_bounds_are_in_canvas_space() {
        let outline = GlyphOutline {
            commands: vec![
                OutlineCommand::MoveTo(0.0, 0.0),
                OutlineCommand::LineTo(100.0, 0.0),
                OutlineCommand::QuadTo(100.0, 200.0, 0.0, 200.0),
                OutlineCommand::Close,
            ],
        };
        let shape = FillShape::from_outline(&outline, placement()).unwrap();
        let bounds = shape.bounds();
        assert_eq!(bounds.left(), 5.0);
        assert_eq!(bounds.right(), 15.0);
        assert_eq!(bounds.top(), 30.0);
        assert_eq!(bounds.bottom(), 50.0);
    }

    #[test]
    fn test_empty_outline_has_no_shape() {
        assert!(FillShape::from_outline(&GlyphOutline::default(), placement()).is_none());
    }

    #[test]
    fn test_same_outline_gives_equal_shapes() {
        let outline = GlyphOutline {
            commands: vec![
                OutlineCommand::MoveTo(0.0, 0.0),
                OutlineCommand::LineTo(10.0, 0.0),
                OutlineCommand::LineTo(10.0, 10.0),
                OutlineCommand::Close,
            ],
        };
        let a = FillShape::from_outline(&outline, placement());
        let b = FillShape::from_outline(&outline, placement());
        assert_eq!(a, b);
    }
}
