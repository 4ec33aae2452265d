// src/geometry/flatten.rs
//
// Fixed-subdivision curve flattening. Every quadratic becomes 14 line
// pieces and every cubic 18, so the same outline always yields the
// same points.

use super::{GlyphOutline, OutlineCommand, Placement, Polyline};
use nannou::geom::{pt2, Point2};

pub const QUADRATIC_STEPS: usize = 14;
pub const CUBIC_STEPS: usize = 18;

// points closer than this to the previous one are dropped
const MIN_POINT_DISTANCE: f32 = 0.001;

pub fn sample_quadratic(p0: Point2, p1: Point2, p2: Point2, t: f32) -> Point2 {
    let mt = 1.0 - t;
    pt2(
        mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
    )
}

pub fn sample_cubic(p0: Point2, p1: Point2, p2: Point2, p3: Point2, t: f32) -> Point2 {
    let mt = 1.0 - t;
    pt2(
        mt * mt * mt * p0.x + 3.0 * mt * mt * t * p1.x + 3.0 * mt * t * t * p2.x + t * t * t * p3.x,
        mt * mt * mt * p0.y + 3.0 * mt * mt * t * p1.y + 3.0 * mt * t * t * p2.y + t * t * t * p3.y,
    )
}

struct SubpathCollector {
    subpaths: Vec<Polyline>,
    active: bool,
}

impl SubpathCollector {
    fn push(&mut self, point: Point2) {
        if self.active {
            if let Some(current) = self.subpaths.last_mut() {
                let far_enough = current
                    .last()
                    .map_or(true, |prev| prev.distance(point) > MIN_POINT_DISTANCE);
                if far_enough {
                    current.push(point);
                }
                return;
            }
        }
        self.subpaths.push(vec![point]);
        self.active = true;
    }

    fn end(&mut self) {
        self.active = false;
    }
}

/// Flattens an outline into canvas-space polylines, one per contour.
/// Contours that collapse to a single point are dropped.
pub fn flatten_outline(outline: &GlyphOutline, placement: Placement) -> Vec<Polyline> {
    let mut collector = SubpathCollector {
        subpaths: Vec::new(),
        active: false,
    };
    let mut current = (0.0, 0.0);
    let mut start = (0.0, 0.0);

    for command in &outline.commands {
        match *command {
            OutlineCommand::MoveTo(x, y) => {
                current = (x, y);
                start = (x, y);
                collector.end();
                collector.push(placement.map(x, y));
            }
            OutlineCommand::LineTo(x, y) => {
                current = (x, y);
                collector.push(placement.map(x, y));
            }
            OutlineCommand::QuadTo(cx, cy, x, y) => {
                let p0 = placement.map(current.0, current.1);
                let p1 = placement.map(cx, cy);
                let p2 = placement.map(x, y);
                for step in 1..=QUADRATIC_STEPS {
                    let t = step as f32 / QUADRATIC_STEPS as f32;
                    collector.push(sample_quadratic(p0, p1, p2, t));
                }
                current = (x, y);
            }
            OutlineCommand::CurveTo(c1x, c1y, c2x, c2y, x, y) => {
                let p0 = placement.map(current.0, current.1);
                let p1 = placement.map(c1x, c1y);
                let p2 = placement.map(c2x, c2y);
                let p3 = placement.map(x, y);
                for step in 1..=CUBIC_STEPS {
                    let t = step as f32 / CUBIC_STEPS as f32;
                    collector.push(sample_cubic(p0, p1, p2, p3, t));
                }
                current = (x, y);
            }
            OutlineCommand::Close => {
                collector.push(placement.map(start.0, start.1));
                collector.end();
                current = start;
            }
        }
    }

    collector
        .subpaths
        .into_iter()
        .filter(|subpath| subpath.len() > 1)
        .collect()
}
