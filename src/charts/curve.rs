//! Curve Smoothing
//! Cubic Bezier interpolation of line points with a tension factor.

use crate::charts::scale::ChartArea;

/// Line segments sampled per Bezier span.
const SAMPLES_PER_SPAN: usize = 16;

/// Control points around one data point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoints {
    pub previous: (f64, f64),
    pub next: (f64, f64),
}

/// Compute the control points of `current`, weighted by the distance to its
/// neighbours. Endpoints reuse the point itself as the missing neighbour.
pub fn spline_control_points(
    previous: (f64, f64),
    current: (f64, f64),
    next: (f64, f64),
    tension: f64,
) -> ControlPoints {
    let d01 = distance(previous, current);
    let d12 = distance(current, next);

    let mut s01 = d01 / (d01 + d12);
    let mut s12 = d12 / (d01 + d12);
    if s01.is_nan() {
        s01 = 0.0;
    }
    if s12.is_nan() {
        s12 = 0.0;
    }

    let fa = tension * s01;
    let fb = tension * s12;

    ControlPoints {
        previous: (
            current.0 - fa * (next.0 - previous.0),
            current.1 - fa * (next.1 - previous.1),
        ),
        next: (
            current.0 + fb * (next.0 - previous.0),
            current.1 + fb * (next.1 - previous.1),
        ),
    }
}

/// Smooth a pixel polyline.
///
/// With zero tension (or fewer than three points) the points are returned as
/// they are. Control points are capped to `area` so the curve does not
/// overshoot the chart.
pub fn smooth_path(points: &[(f64, f64)], tension: f64, area: &ChartArea) -> Vec<(f64, f64)> {
    if tension == 0.0 || points.len() < 3 {
        return points.to_vec();
    }

    let controls: Vec<ControlPoints> = (0..points.len())
        .map(|i| {
            let previous = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(points.len() - 1)];
            let cp = spline_control_points(previous, points[i], next, tension);
            ControlPoints {
                previous: cap(cp.previous, area),
                next: cap(cp.next, area),
            }
        })
        .collect();

    let mut out = Vec::with_capacity((points.len() - 1) * SAMPLES_PER_SPAN + 1);
    out.push(points[0]);
    for i in 0..points.len() - 1 {
        let p0 = points[i];
        let p1 = controls[i].next;
        let p2 = controls[i + 1].previous;
        let p3 = points[i + 1];
        for step in 1..=SAMPLES_PER_SPAN {
            let t = step as f64 / SAMPLES_PER_SPAN as f64;
            out.push(cubic_bezier(p0, p1, p2, p3, t));
        }
    }
    out
}

fn cubic_bezier(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

fn cap(point: (f64, f64), area: &ChartArea) -> (f64, f64) {
    (
        point.0.clamp(area.left, area.right),
        point.1.clamp(area.top, area.bottom),
    )
}
