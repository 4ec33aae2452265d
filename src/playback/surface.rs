// src/playback/surface.rs
//
// The raster target playback draws into. Hosts can provide their own;
// PixmapSurface is the CPU implementation backed by tiny-skia.

use crate::geometry::FillShape;
use log::debug;
use nannou::geom::Point2;
use serde::Deserialize;
use tiny_skia::{FillRule, LineCap, LineJoin, Mask, Paint, PathBuilder, Pixmap, Stroke, Transform};

pub const DEFAULT_INK: &str = "#0f1117";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl InkColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Some(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
                a: channel(6..8)?,
            }),
            _ => None,
        }
    }
}

impl Default for InkColor {
    fn default() -> Self {
        Self::rgb(0x0f, 0x11, 0x17)
    }
}

impl From<&str> for InkColor {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|| {
            debug!("Unreadable ink colour {:?}, using {}", value, DEFAULT_INK);
            Self::default()
        })
    }
}

impl From<String> for InkColor {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

pub trait RasterSurface {
    /// Resizes and clears. Pixel size follows the draw model.
    fn resize(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
    fn clear(&mut self);
    /// Restricts subsequent strokes to the inside of `shape`.
    fn begin_clip(&mut self, shape: &FillShape);
    fn end_clip(&mut self);
    fn stroke_line(&mut self, from: Point2, to: Point2, width: f32, color: InkColor);
}

pub struct PixmapSurface {
    pixmap: Option<Pixmap>,
    // allocated on the first clip at the current size, then refilled per unit
    mask: Option<Mask>,
    clipping: bool,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixmap: Pixmap::new(width.max(1), height.max(1)),
            mask: None,
            clipping: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::width)
    }

    pub fn height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::height)
    }

    /// Straight-alpha RGBA8, row major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let Some(pixmap) = &self.pixmap else {
            return Vec::new();
        };
        pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Number of pixels with any ink on them.
    pub fn inked_pixels(&self) -> usize {
        self.pixmap
            .as_ref()
            .map_or(0, |p| p.pixels().iter().filter(|px| px.alpha() > 0).count())
    }
}

impl Default for PixmapSurface {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl RasterSurface for PixmapSurface {
    fn resize(&mut self, width: u32, height: u32) {
        if self.size() != (width, height) {
            self.pixmap = Pixmap::new(width.max(1), height.max(1));
            self.mask = None;
        }
        self.clipping = false;
        self.clear();
    }

    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn clear(&mut self) {
        if let Some(pixmap) = &mut self.pixmap {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    fn begin_clip(&mut self, shape: &FillShape) {
        let (width, height) = self.size();
        if self.mask.is_none() {
            self.mask = Mask::new(width.max(1), height.max(1));
        }
        let Some(mask) = &mut self.mask else {
            return;
        };
        mask.clear();
        mask.fill_path(shape.path(), FillRule::Winding, true, Transform::identity());
        self.clipping = true;
    }

    fn end_clip(&mut self) {
        self.clipping = false;
    }

    fn stroke_line(&mut self, from: Point2, to: Point2, width: f32, color: InkColor) {
        let Some(pixmap) = &mut self.pixmap else {
            return;
        };
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        let Some(path) = builder.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        let clip = self.mask.as_ref().filter(|_| self.clipping);
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), clip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::geom::pt2;

    mod colour_tests {
        use super::*;

        #[test]
        fn test_parse_forms() {
            assert_eq!(InkColor::parse("#fff"), Some(InkColor::rgb(255, 255, 255)));
            assert_eq!(InkColor::parse("#0f1117"), Some(InkColor::default()));
            assert_eq!(
                InkColor::parse("#10203040"),
                Some(InkColor { r: 16, g: 32, b: 48, a: 64 })
            );
        }

        #[test]
        fn test_invalid_falls_back() {
            assert_eq!(InkColor::parse("red"), None);
            assert_eq!(InkColor::parse("#12345"), None);
            assert_eq!(InkColor::from("#zzzzzz"), InkColor::default());
            assert_eq!(InkColor::from("#é12"), InkColor::default());
        }
    }

    mod pixmap_tests {
        use super::*;
        use crate::geometry::{GlyphOutline, OutlineCommand, Placement};

        // x spans min..max, rows 40-max..40-min once the y axis is flipped
        fn square_shape(min: f32, max: f32) -> FillShape {
            let mut outline = GlyphOutline::default();
            outline.push(OutlineCommand::MoveTo(min, min));
            outline.push(OutlineCommand::LineTo(max, min));
            outline.push(OutlineCommand::LineTo(max, max));
            outline.push(OutlineCommand::LineTo(min, max));
            outline.push(OutlineCommand::Close);
            let placement = Placement {
                scale: 1.0,
                offset_x: 0.0,
                baseline_y: 40.0,
            };
            FillShape::from_outline(&outline, placement).expect("square")
        }

        #[test]
        fn test_stroke_inks_pixels() {
            let mut surface = PixmapSurface::new(40, 40);
            surface.stroke_line(pt2(5.0, 20.0), pt2(35.0, 20.0), 4.0, InkColor::default());
            assert_eq!(surface.pixel(20, 20), Some([0x0f, 0x11, 0x17, 255]));
            assert_eq!(surface.pixel(20, 5).map(|p| p[3]), Some(0));
        }

        #[test]
        fn test_clip_limits_strokes() {
            let mut surface = PixmapSurface::new(40, 40);
            surface.begin_clip(&square_shape(10.0, 20.0));
            surface.stroke_line(pt2(0.0, 25.0), pt2(40.0, 25.0), 4.0, InkColor::default());
            surface.end_clip();
            assert_eq!(surface.pixel(15, 25).map(|p| p[3]), Some(255));
            assert_eq!(surface.pixel(5, 25).map(|p| p[3]), Some(0));
            assert_eq!(surface.pixel(30, 25).map(|p| p[3]), Some(0));

            surface.stroke_line(pt2(0.0, 5.0), pt2(40.0, 5.0), 4.0, InkColor::default());
            assert_eq!(surface.pixel(30, 5).map(|p| p[3]), Some(255));
        }

        #[test]
        fn test_reused_mask_drops_previous_shape() {
            let mut surface = PixmapSurface::new(40, 40);
            surface.begin_clip(&square_shape(10.0, 20.0));
            surface.end_clip();
            surface.begin_clip(&square_shape(25.0, 35.0));
            surface.stroke_line(pt2(0.0, 25.0), pt2(40.0, 25.0), 4.0, InkColor::default());
            surface.stroke_line(pt2(0.0, 10.0), pt2(40.0, 10.0), 4.0, InkColor::default());
            surface.end_clip();
            assert_eq!(surface.pixel(15, 25).map(|p| p[3]), Some(0));
            assert_eq!(surface.pixel(15, 10).map(|p| p[3]), Some(0));
            assert_eq!(surface.pixel(30, 10).map(|p| p[3]), Some(255));
        }

        #[test]
        fn test_mask_follows_resize() {
            let mut surface = PixmapSurface::new(40, 40);
            surface.begin_clip(&square_shape(10.0, 20.0));
            surface.resize(60, 20);
            // resizing also ends the clip
            surface.stroke_line(pt2(0.0, 1.0), pt2(60.0, 1.0), 2.0, InkColor::default());
            assert_eq!(surface.pixel(50, 1).map(|p| p[3]), Some(255));

            surface.clear();
            surface.begin_clip(&square_shape(30.0, 38.0));
            let mask_size = surface.mask.as_ref().map(|mask| (mask.width(), mask.height()));
            assert_eq!(mask_size, Some((60, 20)));
            surface.stroke_line(pt2(0.0, 6.0), pt2(60.0, 6.0), 4.0, InkColor::default());
            assert_eq!(surface.pixel(34, 6).map(|p| p[3]), Some(255));
            assert_eq!(surface.pixel(50, 6).map(|p| p[3]), Some(0));
        }

        #[test]
        fn test_resize_clears() {
            let mut surface = PixmapSurface::new(10, 10);
            surface.stroke_line(pt2(0.0, 5.0), pt2(10.0, 5.0), 3.0, InkColor::default());
            surface.resize(12, 8);
            assert_eq!(surface.size(), (12, 8));
            assert_eq!(surface.inked_pixels(), 0);
            assert_eq!(surface.to_rgba8().len(), 12 * 8 * 4);
        }
    }
}
