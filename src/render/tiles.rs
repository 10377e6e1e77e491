//! Tiled driver: splits a region of interest into row bands and composites each band
//! independently, serially or on a `rayon` pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{CHANNELS, Roi};
use crate::foundation::error::{LayerModeError, LayerModeResult};
use crate::kernels::check_inputs;
use crate::ops::layer_mode_op::LayerModeOp;

/// Threading and banding controls for [`composite_image`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TileThreading {
    /// Process bands on a thread pool when `true`.
    #[serde(default)]
    pub parallel: bool,
    /// Rows per band; `0` is treated as `1`.
    #[serde(default = "default_rows_per_tile")]
    pub rows_per_tile: u32,
    /// Optional explicit worker thread count.
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_rows_per_tile() -> u32 {
    64
}

impl Default for TileThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            rows_per_tile: default_rows_per_tile(),
            threads: None,
        }
    }
}

impl TileThreading {
    /// Parallel banding with the default band height.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    /// Reject a zero thread count.
    pub fn validate(&self) -> LayerModeResult<()> {
        if self.threads == Some(0) {
            return Err(LayerModeError::validation(
                "tile threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Composite `source` onto `backdrop` into `output` over `roi`, band by band.
///
/// Spans are row-major and cover `roi` exactly. Results do not depend on banding or
/// threading.
#[tracing::instrument(skip(op, backdrop, source, mask, output), fields(mode = %op.mode()))]
pub fn composite_image(
    op: &LayerModeOp,
    backdrop: &[f32],
    source: &[f32],
    mask: Option<&[f32]>,
    output: &mut [f32],
    roi: Roi,
    threading: &TileThreading,
) -> LayerModeResult<()> {
    threading.validate()?;
    check_inputs(backdrop, source, mask, roi)?;
    let expected = roi.pixel_count() * CHANNELS;
    if output.len() != expected {
        return Err(LayerModeError::buffer(format!(
            "output span holds {} floats, expected {expected}",
            output.len()
        )));
    }
    if roi.is_empty() {
        return Ok(());
    }

    let rows = threading.rows_per_tile.max(1);
    let band_pixels = roi.width as usize * rows as usize;
    let band_len = band_pixels * CHANNELS;

    let run_band = |index: usize, out: &mut [f32]| -> LayerModeResult<()> {
        let start = index * band_len;
        let end = start + out.len();
        let pixels = out.len() / CHANNELS;
        let band = Roi::new(
            roi.x,
            roi.y + (index as u32 * rows) as i32,
            roi.width,
            (pixels / roi.width as usize) as u32,
        );
        let band_mask = mask.map(|m| &m[index * band_pixels..index * band_pixels + pixels]);
        op.process(&backdrop[start..end], &source[start..end], band_mask, out, band)
    };

    if !threading.parallel {
        return output
            .chunks_mut(band_len)
            .enumerate()
            .try_for_each(|(index, out)| run_band(index, out));
    }

    let pool = build_thread_pool(threading.threads)?;
    tracing::debug!(bands = expected.div_ceil(band_len), "compositing bands in parallel");
    pool.install(|| {
        output
            .par_chunks_mut(band_len)
            .enumerate()
            .try_for_each(|(index, out)| run_band(index, out))
    })
}

fn build_thread_pool(threads: Option<usize>) -> LayerModeResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| {
            LayerModeError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/render/tiles.rs"]
mod tests;
