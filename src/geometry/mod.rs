// src/geometry/mod.rs
//
// Glyph geometry extraction.
// Turns a glyph's outline commands into a fill shape (for clipping)
// and an ordered list of flattened polylines (for progressive stroking).

pub mod fill;
pub mod flatten;
pub mod normalize;
pub mod outline;

pub use fill::FillShape;
pub use flatten::flatten_outline;
pub use normalize::{normalize_subpaths, polyline_length, signed_area};
pub use outline::{GlyphOutline, OutlineCommand};

use nannou::geom::{pt2, Point2};

pub type Polyline = Vec<Point2>;

/// Maps font units onto the canvas: uniform scale, horizontal pen
/// position, and a baseline with the y axis flipped to point down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f32,
    pub offset_x: f32,
    pub baseline_y: f32,
}

impl Placement {
    pub fn map(&self, x: f32, y: f32) -> Point2 {
        pt2(self.offset_x + x * self.scale, self.baseline_y - y * self.scale)
    }
}

#[derive(Debug, Clone)]
pub struct GlyphGeometry {
    pub fill_shape: Option<FillShape>,
    pub segments: Vec<Polyline>,
    pub path_length: f32,
}

impl GlyphGeometry {
    pub fn empty() -> Self {
        Self {
            fill_shape: None,
            segments: Vec::new(),
            path_length: 0.0,
        }
    }

    /// Drawable when there is a silhouette to clip to and a skeleton to walk.
    pub fn is_drawable(&self) -> bool {
        self.fill_shape.is_some() && !self.segments.is_empty() && self.path_length > 0.0
    }
}

pub fn extract_glyph(
    outline: &GlyphOutline,
    placement: Placement,
    outer_only: bool,
) -> GlyphGeometry {
    if outline.is_empty() {
        return GlyphGeometry::empty();
    }

    let fill_shape = FillShape::from_outline(outline, placement);
    let subpaths = flatten_outline(outline, placement);
    let segments = normalize_subpaths(subpaths, outer_only);
    let path_length = segments.iter().map(|segment| polyline_length(segment)).sum();

    GlyphGeometry {
        fill_shape,
        segments,
        path_length,
    }
}
