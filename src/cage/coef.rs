//! Green coordinates of a point with respect to a cage.
//!
//! For a cage of `N` points the coefficient vector holds `N` vertex coefficients followed
//! by `N` edge coefficients. A point inside the cage is deformed by weighting the
//! destination vertices with the former and the scaled destination edge normals with the
//! latter.

use std::f64::consts::PI;

use rayon::prelude::*;

use crate::cage::config::CageConfig;
use crate::foundation::core::{Point, Roi, Vec2};
use crate::foundation::error::{LayerModeError, LayerModeResult};

const COLLINEAR_EPSILON: f64 = 1e-9;

fn is_collinear(v1: Point, v2: Point, p: Point) -> bool {
    (p - v1).cross(v2 - v1).abs() < COLLINEAR_EPSILON
}

/// Coefficients of `p` with respect to the source polygon of `cage`.
///
/// Degenerate configurations never yield NaN: edge terms that do not evaluate to a
/// finite number become 0, and vertex terms are skipped when `p` is collinear with the
/// edge (this covers `p` lying on an edge or a vertex).
pub fn cage_coefficients(cage: &CageConfig, p: Point) -> Vec<f64> {
    let n = cage.len();
    let mut coef = vec![0.0; 2 * n];
    write_coefficients(cage, p, &mut coef);
    coef
}

fn write_coefficients(cage: &CageConfig, p: Point, coef: &mut [f64]) {
    let n = cage.len();
    for j in 0..n {
        let next = (j + 1) % n;
        let v1 = cage.src_position(j);
        let v2 = cage.src_position(next);

        let a = v2 - v1;
        let b = v1 - p;
        let q = a.dot(a);
        let s = b.dot(b);
        let r = 2.0 * a.dot(b);
        let ba = b.x * a.y - b.y * a.x;
        let srt = (4.0 * s * q - r * r).sqrt();
        let l0 = s.ln();
        let l1 = (s + q + r).ln();
        let a0 = r.atan2(srt) / srt;
        let a1 = (2.0 * q + r).atan2(srt) / srt;
        let a10 = a1 - a0;
        let l10 = l1 - l0;

        let edge =
            a.hypot() / (4.0 * PI) * ((4.0 * s - r * r / q) * a10 + r / (2.0 * q) * l10 + l1 - 2.0);
        coef[n + j] = if edge.is_finite() { edge } else { 0.0 };

        if !is_collinear(v1, v2, p) {
            let to_v1 = ba / (2.0 * PI) * (l10 / (2.0 * q) - a10 * (2.0 + r / q));
            let to_v2 = ba / (2.0 * PI) * (l10 / (2.0 * q) - a10 * (r / q));
            if to_v1.is_finite() && to_v2.is_finite() {
                coef[j] += to_v1;
                coef[next] -= to_v2;
            }
        }
    }
}

/// Coefficients of every pixel of `roi`, row-major, `2N` values per pixel.
///
/// Pixels outside the cage keep all-zero coefficients.
pub fn coefficient_buffer(cage: &CageConfig, roi: Roi) -> Vec<f64> {
    let stride = 2 * cage.len();
    let row_len = roi.width as usize * stride;
    let mut out = vec![0.0; roi.pixel_count() * stride];
    if row_len == 0 {
        return out;
    }

    out.par_chunks_mut(row_len).enumerate().for_each(|(row, values)| {
        let y = f64::from(roi.y) + row as f64;
        for (col, pixel) in values.chunks_exact_mut(stride).enumerate() {
            let p = Point::new(f64::from(roi.x) + col as f64, y);
            if cage.point_inside(p) {
                write_coefficients(cage, p, pixel);
            }
        }
    });
    out
}

/// Map coefficients computed on the source cage onto the destination cage.
pub fn deform_point(cage: &CageConfig, coefs: &[f64]) -> LayerModeResult<Point> {
    let n = cage.len();
    if coefs.len() != 2 * n {
        return Err(LayerModeError::geometry(format!(
            "expected {} cage coefficients, got {}",
            2 * n,
            coefs.len()
        )));
    }

    let mut pos = Vec2::ZERO;
    for (j, (vertex, edge)) in coefs[..n].iter().zip(&coefs[n..]).enumerate() {
        let point = &cage.points()[j];
        pos += cage.dest_position(j).to_vec2() * *vertex;
        pos += point.edge_normal * (edge * point.edge_scaling_factor);
    }
    Ok(pos.to_point())
}

#[cfg(test)]
#[path = "../../tests/unit/cage/coef.rs"]
mod tests;
