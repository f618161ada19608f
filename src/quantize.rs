/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::images::PixelBuffer;
use crate::numerics::unit_fraction;
use crate::yuv_error::{check_channels, check_same_shape};
use crate::YuvError;
use num_traits::AsPrimitive;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
/// Quantization error handling when reducing float samples to 8 bit
pub enum DitherMode {
    /// Round half away from zero, `0.5` of the range maps to `128`
    #[default]
    None,
    /// 4x4 Bayer threshold matrix, position dependent, row parallel
    Ordered,
    /// Floyd-Steinberg error diffusion, rows left to right, top to bottom
    ErrorDiffusion,
}

const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

#[inline(always)]
fn bayer_threshold(x: usize, y: usize) -> f32 {
    (BAYER_4X4[y & 3][x & 3] as f32 + 0.5) / 16.
}

fn check_value_range(
    value_max: &[f32],
    value_min: &[f32],
    channels: usize,
) -> Result<(), YuvError> {
    check_channels(channels, value_max.len())?;
    check_channels(channels, value_min.len())?;
    for (channel, (&max, &min)) in value_max.iter().zip(value_min.iter()).enumerate() {
        if !max.is_finite() || !min.is_finite() || max <= min || !(max - min).is_finite() {
            return Err(YuvError::InvalidRange { channel, min, max });
        }
    }
    Ok(())
}

fn quantize_row_plain(src: &[f32], dst: &mut [u8], value_min: &[f32], ranges: &[f32]) {
    let channels = ranges.len();
    for (src, dst) in src.chunks_exact(channels).zip(dst.chunks_exact_mut(channels)) {
        for c in 0..channels {
            let f = unit_fraction(src[c], value_min[c], ranges[c]);
            dst[c] = (f * 255.).round().as_();
        }
    }
}

fn quantize_row_ordered(src: &[f32], dst: &mut [u8], y: usize, value_min: &[f32], ranges: &[f32]) {
    let channels = ranges.len();
    for (x, (src, dst)) in src
        .chunks_exact(channels)
        .zip(dst.chunks_exact_mut(channels))
        .enumerate()
    {
        let threshold = bayer_threshold(x, y);
        for c in 0..channels {
            let f = unit_fraction(src[c], value_min[c], ranges[c]);
            dst[c] = (f * 255. + threshold).floor().min(255.).as_();
        }
    }
}

fn quantize_error_diffusion(
    src: &PixelBuffer<f32>,
    dst: &mut PixelBuffer<u8>,
    value_min: &[f32],
    ranges: &[f32],
) {
    let channels = src.channels();
    let width = src.width() as usize;
    let height = src.height() as usize;
    let row_len = width * channels;

    let mut current = vec![0f32; row_len];
    let mut next = vec![0f32; row_len];

    for y in 0..height {
        std::mem::swap(&mut current, &mut next);
        next.fill(0.);
        let has_next_row = y + 1 < height;
        let src_row = src.row(y);
        let dst_row = dst.row_mut(y);
        for x in 0..width {
            for c in 0..channels {
                let idx = x * channels + c;
                let f = unit_fraction(src_row[idx], value_min[c], ranges[c]);
                let v = f * 255. + current[idx];
                let q = v.round().clamp(0., 255.);
                dst_row[idx] = q.as_();
                let error = v - q;
                if x + 1 < width {
                    current[idx + channels] += error * (7. / 16.);
                }
                if has_next_row {
                    if x > 0 {
                        next[idx - channels] += error * (3. / 16.);
                    }
                    next[idx] += error * (5. / 16.);
                    if x + 1 < width {
                        next[idx + channels] += error * (1. / 16.);
                    }
                }
            }
        }
    }
}

/// Quantizes float samples into caller provided 8-bit storage.
///
/// Every sample `v` of channel `c` becomes `clamp((v - value_min[c]) / (value_max[c] - value_min[c]), 0, 1)`
/// scaled to `[0, 255]` according to `dither`. NaN samples become `0`.
pub fn float_to_uint8_into(
    src: &PixelBuffer<f32>,
    dst: &mut PixelBuffer<u8>,
    value_max: &[f32],
    value_min: &[f32],
    dither: DitherMode,
) -> Result<(), YuvError> {
    src.check_constraints()?;
    dst.check_constraints()?;
    check_channels(src.channels(), dst.channels())?;
    check_same_shape(src.width(), src.height(), dst.width(), dst.height())?;
    check_value_range(value_max, value_min, src.channels())?;

    let ranges: Vec<f32> = value_max
        .iter()
        .zip(value_min.iter())
        .map(|(&max, &min)| max - min)
        .collect();

    if dither == DitherMode::ErrorDiffusion {
        quantize_error_diffusion(src, dst, value_min, &ranges);
        return Ok(());
    }

    let row_len = src.row_len();
    let height = src.height() as usize;
    let src_stride = src.stride();
    let dst_stride = dst.stride();

    let iter;
    #[cfg(not(feature = "rayon"))]
    {
        iter = src
            .as_slice()
            .chunks_exact(src_stride)
            .zip(dst.as_mut_slice().chunks_exact_mut(dst_stride))
            .take(height)
            .enumerate();
    }
    #[cfg(feature = "rayon")]
    {
        iter = src
            .as_slice()
            .par_chunks_exact(src_stride)
            .zip(dst.as_mut_slice().par_chunks_exact_mut(dst_stride))
            .take(height)
            .enumerate();
    }
    iter.for_each(|(y, (src, dst))| {
        let src = &src[..row_len];
        let dst = &mut dst[..row_len];
        match dither {
            DitherMode::Ordered => quantize_row_ordered(src, dst, y, value_min, &ranges),
            _ => quantize_row_plain(src, dst, value_min, &ranges),
        }
    });
    Ok(())
}

/// Quantizes float samples into a new tightly packed 8-bit buffer, see [float_to_uint8_into]
pub fn float_to_uint8(
    src: &PixelBuffer<f32>,
    value_max: &[f32],
    value_min: &[f32],
    dither: DitherMode,
) -> Result<PixelBuffer<u8>, YuvError> {
    src.check_constraints()?;
    check_value_range(value_max, value_min, src.channels())?;
    let mut dst = PixelBuffer::<u8>::alloc(src.width(), src.height(), src.channels())?;
    float_to_uint8_into(src, &mut dst, value_max, value_min, dither)?;
    Ok(dst)
}

/// Expands 8-bit samples to float: `v / 255 * (value_max[c] - value_min[c]) + value_min[c]`
pub fn uint8_to_float(
    src: &PixelBuffer<u8>,
    value_max: &[f32],
    value_min: &[f32],
) -> Result<PixelBuffer<f32>, YuvError> {
    src.check_constraints()?;
    check_value_range(value_max, value_min, src.channels())?;
    let channels = src.channels();
    let mut dst = PixelBuffer::<f32>::alloc(src.width(), src.height(), channels)?;
    for (src, dst) in src.rows().zip(dst.rows_mut()) {
        for (src, dst) in src.chunks_exact(channels).zip(dst.chunks_exact_mut(channels)) {
            for c in 0..channels {
                let v: f32 = src[c].as_();
                dst[c] = v / 255. * (value_max[c] - value_min[c]) + value_min[c];
            }
        }
    }
    Ok(dst)
}
