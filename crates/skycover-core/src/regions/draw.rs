//! Rasterization of the handful of shapes the segmentation needs.
//!
//! Pixels are addressed by their integer (col, row) position; a pixel belongs
//! to a shape when that lattice point does.

use ndarray::{Array2, Array3};

use crate::config::PixelRect;
use crate::consts::DEGENERATE_POLYGON_AREA;

use super::palette::Rgb;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Disk { cx: f64, cy: f64, radius: f64 },
    /// Closed polygon given as (x, y) vertices in drawing order.
    Polygon(Vec<(f64, f64)>),
    /// Line segment with round caps.
    Segment {
        from: (f64, f64),
        to: (f64, f64),
        thickness: f64,
    },
    Rect(PixelRect),
}

impl Shape {
    /// Whether the shape covers no pixels by construction.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Disk { radius, .. } => *radius < 0.0,
            Self::Polygon(vertices) => {
                vertices.len() < 3 || polygon_area(vertices).abs() < DEGENERATE_POLYGON_AREA
            }
            Self::Segment { .. } | Self::Rect(_) => false,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Disk { cx, cy, radius } => {
                let dx = x - cx;
                let dy = y - cy;
                dx * dx + dy * dy <= radius * radius
            }
            Self::Polygon(vertices) => polygon_contains(vertices, x, y),
            Self::Segment {
                from,
                to,
                thickness,
            } => segment_distance((x, y), *from, *to) <= thickness / 2.0,
            Self::Rect(rect) => {
                let (x0, x1) = (rect.x0.min(rect.x1) as f64, rect.x0.max(rect.x1) as f64);
                let (y0, y1) = (rect.y0.min(rect.y1) as f64, rect.y0.max(rect.y1) as f64);
                x >= x0 && x <= x1 && y >= y0 && y <= y1
            }
        }
    }

    /// Whether (x, y) lies on the shape's border stroke of the given width.
    pub fn on_border(&self, x: f64, y: f64, thickness: f64) -> bool {
        let half = thickness / 2.0;
        match self {
            Self::Disk { cx, cy, radius } => {
                let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                (dist - radius).abs() <= half
            }
            Self::Polygon(vertices) => {
                let n = vertices.len();
                (0..n).any(|i| segment_distance((x, y), vertices[i], vertices[(i + 1) % n]) <= half)
            }
            Self::Segment { .. } => self.contains(x, y),
            Self::Rect(rect) => {
                let corners = [
                    (rect.x0 as f64, rect.y0 as f64),
                    (rect.x1 as f64, rect.y0 as f64),
                    (rect.x1 as f64, rect.y1 as f64),
                    (rect.x0 as f64, rect.y1 as f64),
                ];
                (0..4).any(|i| segment_distance((x, y), corners[i], corners[(i + 1) % 4]) <= half)
            }
        }
    }

    /// Inclusive (row_min, row_max, col_min, col_max) window that can hold
    /// any covered pixel, including a border of `margin`. `None` when the
    /// shape misses the raster.
    fn pixel_window(&self, height: usize, width: usize, margin: f64) -> Option<(usize, usize, usize, usize)> {
        let (x0, y0, x1, y1) = match self {
            Self::Disk { cx, cy, radius } => {
                let r = radius + margin;
                (cx - r, cy - r, cx + r, cy + r)
            }
            Self::Polygon(vertices) => {
                let xs = vertices.iter().map(|v| v.0);
                let ys = vertices.iter().map(|v| v.1);
                (
                    xs.clone().fold(f64::INFINITY, f64::min) - margin,
                    ys.clone().fold(f64::INFINITY, f64::min) - margin,
                    xs.fold(f64::NEG_INFINITY, f64::max) + margin,
                    ys.fold(f64::NEG_INFINITY, f64::max) + margin,
                )
            }
            Self::Segment {
                from,
                to,
                thickness,
            } => {
                let r = thickness / 2.0 + margin;
                (
                    from.0.min(to.0) - r,
                    from.1.min(to.1) - r,
                    from.0.max(to.0) + r,
                    from.1.max(to.1) + r,
                )
            }
            Self::Rect(rect) => (
                rect.x0.min(rect.x1) as f64 - margin,
                rect.y0.min(rect.y1) as f64 - margin,
                rect.x0.max(rect.x1) as f64 + margin,
                rect.y0.max(rect.y1) as f64 + margin,
            ),
        };
        clamp_window(x0, y0, x1, y1, height, width)
    }
}

fn clamp_window(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    height: usize,
    width: usize,
) -> Option<(usize, usize, usize, usize)> {
    if height == 0 || width == 0 || !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return None;
    }
    let col_min = x0.floor().max(0.0);
    let row_min = y0.floor().max(0.0);
    let col_max = x1.ceil().min((width - 1) as f64);
    let row_max = y1.ceil().min((height - 1) as f64);
    if col_min > col_max || row_min > row_max {
        return None;
    }
    Some((row_min as usize, row_max as usize, col_min as usize, col_max as usize))
}

/// Signed shoelace area.
pub fn polygon_area(vertices: &[(f64, f64)]) -> f64 {
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let (x0, y0) = vertices[i];
            let (x1, y1) = vertices[(i + 1) % n];
            x0 * y1 - x1 * y0
        })
        .sum();
    twice / 2.0
}

/// Even-odd rule, so convex fans and reflex wedges fill the same way.
fn polygon_contains(vertices: &[(f64, f64)], x: f64, y: f64) -> bool {
    let n = vertices.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > y) != (yj > y) {
            let x_cross = xi + (y - yi) * (xj - xi) / (yj - yi);
            if x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (qx, qy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - qx).powi(2) + (p.1 - qy).powi(2)).sqrt()
}

/// Visit every (row, col) of a `height x width` raster the predicate accepts.
fn for_each_covered<P, F>(height: usize, width: usize, shape: &Shape, margin: f64, predicate: P, mut visit: F)
where
    P: Fn(f64, f64) -> bool,
    F: FnMut(usize, usize),
{
    if shape.is_degenerate() {
        return;
    }
    let Some((r0, r1, c0, c1)) = shape.pixel_window(height, width, margin) else {
        return;
    };
    for row in r0..=r1 {
        for col in c0..=c1 {
            if predicate(col as f64, row as f64) {
                visit(row, col);
            }
        }
    }
}

pub fn fill_color(raster: &mut Array3<u8>, shape: &Shape, color: Rgb) {
    let (h, w, _) = raster.dim();
    for_each_covered(h, w, shape, 0.0, |x, y| shape.contains(x, y), |row, col| {
        for (ch, &v) in color.iter().enumerate() {
            raster[[row, col, ch]] = v;
        }
    });
}

pub fn fill_label(raster: &mut Array2<u8>, shape: &Shape, label: u8) {
    let (h, w) = raster.dim();
    for_each_covered(h, w, shape, 0.0, |x, y| shape.contains(x, y), |row, col| {
        raster[[row, col]] = label;
    });
}

pub fn stroke_color(raster: &mut Array3<u8>, shape: &Shape, thickness: f64, color: Rgb) {
    let (h, w, _) = raster.dim();
    let margin = thickness / 2.0;
    for_each_covered(h, w, shape, margin, |x, y| shape.on_border(x, y, thickness), |row, col| {
        for (ch, &v) in color.iter().enumerate() {
            raster[[row, col, ch]] = v;
        }
    });
}
