// src/playback/brush.rs
//
// Pen physics for one stroke unit. Walks the unit's polylines up to a
// target length and lays down short round-capped lines whose width
// follows the pressure taper, with seeded tremor in width and position.

use super::ink::{ease_ink_progress, stroke_taper};
use super::surface::{InkColor, RasterSurface};
use crate::geometry::{polyline_length, Polyline};
use crate::pacing::{clamp, seeded_random};
use crate::timeline::StrokeUnit;
use nannou::geom::pt2;

const MIN_WIDTH: f32 = 0.4;
const MIN_SEGMENT: f32 = 0.0001;
const JITTER: f64 = 0.36;
const WOBBLE: f64 = 0.18;

pub fn draw_tapered_stroke<R: RasterSurface + ?Sized>(
    surface: &mut R,
    segments: &[Polyline],
    target_length: f32,
    base_width: f32,
    seed: f64,
    color: InkColor,
) {
    if target_length <= 0.0 {
        return;
    }
    let total_length: f32 = segments.iter().map(|segment| polyline_length(segment)).sum();
    if total_length <= 0.0 {
        return;
    }

    let wobble_amplitude = base_width as f64 * WOBBLE;
    let mut distance = 0.0_f32;
    let mut remaining = target_length;

    'segments: for (point_index, segment) in segments.iter().enumerate() {
        let point_index = point_index as f64;
        for (i, pair) in segment.windows(2).enumerate() {
            if remaining <= 0.0 {
                break 'segments;
            }
            let (p0, p1) = (pair[0], pair[1]);
            let delta = p1 - p0;
            let length = delta.length();
            if length <= MIN_SEGMENT {
                continue;
            }

            let drawn = length.min(remaining);
            let t = drawn / length;
            let i = (i + 1) as f64;

            let global_t = clamp(((distance + drawn * 0.5) / total_length) as f64, 0.0, 1.0);
            let taper = stroke_taper(global_t);
            let jitter = 1.0 + (seeded_random(seed + point_index * 17.0 + i * 3.0) - 0.5) * JITTER;
            let width = ((base_width as f64 * taper * jitter) as f32).max(MIN_WIDTH);

            let wobble = ((seeded_random(seed + point_index * 7.0 + i * 11.0) - 0.5)
                * wobble_amplitude
                * taper) as f32;
            let normal = pt2(-delta.y, delta.x) / length;
            let end = p0 + delta * t + normal * wobble;

            surface.stroke_line(p0, end, width, color);

            distance += drawn;
            remaining -= drawn;
        }
    }
}

/// Inks `unit` at `progress` (`0..=1` of its pen-down window), clipped
/// to the glyph silhouette.
pub fn ink_unit<R: RasterSurface + ?Sized>(
    surface: &mut R,
    unit: &StrokeUnit,
    progress: f64,
    color: InkColor,
) {
    if progress <= 0.0 {
        return;
    }
    let drawn_length = unit.path_length * ease_ink_progress(progress, unit.seed) as f32;
    surface.begin_clip(&unit.fill_shape);
    draw_tapered_stroke(
        surface,
        &unit.segments,
        drawn_length,
        unit.brush_width,
        unit.seed,
        color,
    );
    surface.end_clip();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FillShape;
    use nannou::geom::Point2;

    #[derive(Default)]
    struct RecordingSurface {
        lines: Vec<(Point2, Point2, f32)>,
        clips: usize,
        clipped: bool,
    }

    impl RasterSurface for RecordingSurface {
        fn resize(&mut self, _width: u32, _height: u32) {}
        fn size(&self) -> (u32, u32) {
            (0, 0)
        }
        fn clear(&mut self) {
            self.lines.clear();
        }
        fn begin_clip(&mut self, _shape: &FillShape) {
            self.clips += 1;
            self.clipped = true;
        }
        fn end_clip(&mut self) {
            self.clipped = false;
        }
        fn stroke_line(&mut self, from: Point2, to: Point2, width: f32, _color: InkColor) {
            self.lines.push((from, to, width));
        }
    }

    fn zigzag() -> Vec<Polyline> {
        vec![
            (0..=10).map(|i| pt2(i as f32 * 10.0, 0.0)).collect(),
            vec![pt2(0.0, 20.0), pt2(0.0, 60.0)],
        ]
    }

    #[test]
    fn test_full_length_walks_every_segment() {
        let mut surface = RecordingSurface::default();
        draw_tapered_stroke(&mut surface, &zigzag(), 140.0, 6.0, 3.0, InkColor::default());
        assert_eq!(surface.lines.len(), 11);
    }

    #[test]
    fn test_partial_length_stops_early() {
        let mut surface = RecordingSurface::default();
        draw_tapered_stroke(&mut surface, &zigzag(), 25.0, 6.0, 3.0, InkColor::default());
        assert_eq!(surface.lines.len(), 3);
        let (from, to, _) = surface.lines[2];
        assert_eq!(from, pt2(20.0, 0.0));
        // half of the third step, plus a wobble across the line
        assert!((to.x - 25.0).abs() < 1e-4);
        assert!(to.y.abs() <= 6.0 * 0.18 * 0.5 + 1e-4);
    }

    #[test]
    fn test_widths_are_tapered_and_floored() {
        let mut surface = RecordingSurface::default();
        draw_tapered_stroke(&mut surface, &zigzag(), 140.0, 6.0, 11.0, InkColor::default());
        let widths: Vec<f32> = surface.lines.iter().map(|l| l.2).collect();
        assert!(widths.iter().all(|w| *w >= MIN_WIDTH));
        assert!(widths.iter().all(|w| *w <= 6.0 * 1.18 + 1e-4));
        let middle = widths[5];
        assert!(widths[0] < middle);
    }

    #[test]
    fn test_same_seed_same_stroke() {
        let mut a = RecordingSurface::default();
        let mut b = RecordingSurface::default();
        draw_tapered_stroke(&mut a, &zigzag(), 90.0, 4.0, 8.0, InkColor::default());
        draw_tapered_stroke(&mut b, &zigzag(), 90.0, 4.0, 8.0, InkColor::default());
        assert_eq!(a.lines, b.lines);
    }

    #[test]
    fn test_nothing_drawn_without_length() {
        let mut surface = RecordingSurface::default();
        draw_tapered_stroke(&mut surface, &zigzag(), 0.0, 4.0, 8.0, InkColor::default());
        draw_tapered_stroke(&mut surface, &[], 10.0, 4.0, 8.0, InkColor::default());
        assert!(surface.lines.is_empty());
    }

    #[test]
    fn test_ink_unit_clips() {
        use crate::fonts::test_font::BoxFont;
        use crate::timeline::{build_draw_model, TimelineParams};

        let model = build_draw_model(&BoxFont::new(), "a", &TimelineParams::default());
        let mut surface = RecordingSurface::default();
        ink_unit(&mut surface, &model.units[0], 0.0, InkColor::default());
        assert_eq!(surface.clips, 0);
        ink_unit(&mut surface, &model.units[0], 1.0, InkColor::default());
        assert_eq!(surface.clips, 1);
        assert!(!surface.clipped);
        assert!(!surface.lines.is_empty());
    }
}
