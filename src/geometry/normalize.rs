// src/geometry/normalize.rs
//
// Gives every contour a stable start and direction regardless of how
// the font wound it, then orders contours the way a hand would draw
// them: left to right, then top to bottom.

use super::Polyline;
use nannou::geom::Point2;
use std::cmp::Ordering;

const CLOSING_POINT_EPSILON: f32 = 0.001;
// contours smaller than this (in px²) are kept even in outer-only mode
const MIN_SIGNIFICANT_AREA: f32 = 1.0;

pub fn polyline_length(points: &[Point2]) -> f32 {
    points.windows(2).map(|pair| pair[0].distance(pair[1])).sum()
}

/// Shoelace area of the implicitly closed polygon.
pub fn signed_area(points: &[Point2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for (i, p0) in points.iter().enumerate() {
        let p1 = points[(i + 1) % points.len()];
        area += p0.x * p1.y - p1.x * p0.y;
    }
    area * 0.5
}

fn drop_closing_point(mut points: Polyline) -> Polyline {
    if points.len() > 1 {
        let first = points[0];
        if let Some(last) = points.last() {
            if first.distance(*last) < CLOSING_POINT_EPSILON {
                points.pop();
            }
        }
    }
    points
}

fn rotate_to_leftmost(mut points: Polyline) -> Polyline {
    if points.len() < 3 {
        return points;
    }
    let mut min_index = 0;
    for (i, point) in points.iter().enumerate().skip(1) {
        if point.x < points[min_index].x {
            min_index = i;
        }
    }
    points.rotate_left(min_index);
    points
}

// After rotation both neighbours of the start lie to its right. Walk
// towards whichever one heads further right; ties keep font order.
fn orient_left_to_right(mut points: Polyline) -> Polyline {
    if points.len() < 3 {
        return points;
    }
    let start = points[0].x;
    let forward = points[1].x - start;
    let backward = points[points.len() - 1].x - start;
    if backward > forward {
        points[1..].reverse();
    }
    points
}

fn min_coordinates(points: &[Point2]) -> (f32, f32) {
    points.iter().fold((f32::INFINITY, f32::INFINITY), |(x, y), point| {
        (x.min(point.x), y.min(point.y))
    })
}

fn keep_outer_winding(subpaths: Vec<Polyline>) -> Vec<Polyline> {
    let mut primary_sign = 0.0;
    let mut primary_magnitude = 0.0;
    for subpath in &subpaths {
        let area = signed_area(subpath);
        if area.abs() > primary_magnitude {
            primary_magnitude = area.abs();
            primary_sign = area.signum();
        }
    }
    if primary_sign == 0.0 {
        return subpaths;
    }

    subpaths
        .into_iter()
        .filter(|subpath| {
            let area = signed_area(subpath);
            area.abs() < MIN_SIGNIFICANT_AREA || area.signum() == primary_sign
        })
        .collect()
}

/// Turns raw flattened contours into drawable stroke segments.
///
/// Each contour loses a closing point that duplicates its start, is
/// rotated to begin at its leftmost point and oriented to head right.
/// With `outer_only`, contours wound against the largest contour (the
/// counters of letters like "o") are removed first.
pub fn normalize_subpaths(subpaths: Vec<Polyline>, outer_only: bool) -> Vec<Polyline> {
    let deduped: Vec<Polyline> = subpaths
        .into_iter()
        .map(drop_closing_point)
        .filter(|subpath| subpath.len() > 1)
        .collect();

    let kept = if outer_only {
        keep_outer_winding(deduped)
    } else {
        deduped
    };

    let mut segments: Vec<(Polyline, (f32, f32))> = kept
        .into_iter()
        .map(|subpath| orient_left_to_right(rotate_to_leftmost(subpath)))
        .map(|subpath| {
            let min = min_coordinates(&subpath);
            (subpath, min)
        })
        .collect();

    segments.sort_by(|(_, a), (_, b)| match a.0.total_cmp(&b.0) {
        Ordering::Equal => a.1.total_cmp(&b.1),
        other => other,
    });

    segments.into_iter().map(|(subpath, _)| subpath).collect()
}
