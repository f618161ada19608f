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
use crate::images::{PixelBuffer, PixelSample, PlaneSet};
use crate::yuv_error::{check_channel_order, check_channels, check_same_shape, MismatchedSize};
use crate::YuvError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

fn check_planes_against<T: PixelSample>(
    interleaved: &PixelBuffer<T>,
    planes: &PlaneSet<T>,
) -> Result<(), YuvError> {
    interleaved.check_constraints()?;
    if planes.len() != interleaved.channels() {
        return Err(YuvError::PlaneCountMismatch(MismatchedSize {
            expected: interleaved.channels(),
            received: planes.len(),
        }));
    }
    for plane in planes.planes().iter() {
        check_channels(1, plane.channels())?;
        check_same_shape(
            interleaved.width(),
            interleaved.height(),
            plane.width(),
            plane.height(),
        )?;
        plane.check_constraints()?;
    }
    Ok(())
}

/// Splits interleaved samples into one plane per channel.
///
/// For every pixel `(x, y)` and channel `c` writes `src[y][x * C + c]` into `dst[c][y][x]`.
/// Every plane must match source width and height, strides are respected independently.
/// Nothing is written when shapes disagree.
pub fn split_interleaved_to_planar<T: PixelSample>(
    src: &PixelBuffer<T>,
    dst: &mut PlaneSet<T>,
) -> Result<(), YuvError> {
    check_planes_against(src, dst)?;

    let channels = src.channels();
    let width = src.width() as usize;
    let height = src.height() as usize;
    let src_stride = src.stride();

    for (c, plane) in dst.planes_mut().iter_mut().enumerate() {
        let plane_stride = plane.stride();
        let iter;
        #[cfg(not(feature = "rayon"))]
        {
            iter = src
                .as_slice()
                .chunks_exact(src_stride)
                .zip(plane.as_mut_slice().chunks_exact_mut(plane_stride))
                .take(height);
        }
        #[cfg(feature = "rayon")]
        {
            iter = src
                .as_slice()
                .par_chunks_exact(src_stride)
                .zip(plane.as_mut_slice().par_chunks_exact_mut(plane_stride))
                .take(height);
        }
        iter.for_each(|(src, dst)| {
            let src = &src[..width * channels];
            let dst = &mut dst[..width];
            for (dst, src) in dst.iter_mut().zip(src.chunks_exact(channels)) {
                *dst = src[c];
            }
        });
    }
    Ok(())
}

/// Merges planes into interleaved samples.
///
/// Output slot `slot` of every pixel takes plane `channel_order[slot]`:
/// `dst[y][x * C + slot] = src[channel_order[slot]][y][x]`.
/// `channel_order` must be a permutation of `0..C`.
pub fn merge_planar_to_interleaved<T: PixelSample>(
    src: &PlaneSet<T>,
    dst: &mut PixelBuffer<T>,
    channel_order: &[usize],
) -> Result<(), YuvError> {
    check_planes_against(dst, src)?;
    check_channel_order(channel_order, dst.channels())?;

    let channels = dst.channels();
    let width = dst.width() as usize;
    let height = dst.height() as usize;
    let dst_stride = dst.stride();

    let iter;
    #[cfg(not(feature = "rayon"))]
    {
        iter = dst
            .as_mut_slice()
            .chunks_exact_mut(dst_stride)
            .take(height)
            .enumerate();
    }
    #[cfg(feature = "rayon")]
    {
        iter = dst
            .as_mut_slice()
            .par_chunks_exact_mut(dst_stride)
            .take(height)
            .enumerate();
    }
    iter.for_each(|(y, dst)| {
        let dst = &mut dst[..width * channels];
        for (slot, &plane_index) in channel_order.iter().enumerate() {
            let src_row = src.plane(plane_index).row(y);
            for (dst, &v) in dst.chunks_exact_mut(channels).zip(src_row.iter()) {
                dst[slot] = v;
            }
        }
    });
    Ok(())
}

/// Allocates tightly packed planes and splits `src` into them
pub fn planar_from_interleaved<T: PixelSample>(
    src: &PixelBuffer<T>,
) -> Result<PlaneSet<T>, YuvError> {
    let mut planes = PlaneSet::alloc(src.channels(), src.width(), src.height())?;
    split_interleaved_to_planar(src, &mut planes)?;
    Ok(planes)
}

/// Allocates a tightly packed interleaved buffer and merges `src` into it
pub fn interleaved_from_planar<T: PixelSample>(
    src: &PlaneSet<T>,
    channel_order: &[usize],
) -> Result<PixelBuffer<T>, YuvError> {
    src.check_constraints()?;
    check_channel_order(channel_order, src.len())?;
    let mut dst = PixelBuffer::alloc(src.width(), src.height(), src.len())?;
    merge_planar_to_interleaved(src, &mut dst, channel_order)?;
    Ok(dst)
}
