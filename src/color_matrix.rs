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
use crate::built_coefficients::{
    JPEG_BT601_POST_BIAS, JPEG_BT601_PRE_BIAS, JPEG_BT601_RGB_TO_YCBCR,
};
use crate::images::PlaneSet;
use crate::yuv_error::{check_channels, check_same_shape, MismatchedSize};
use crate::yuv_support::{get_forward_transform, get_inverse_transform, get_yuv_range};
use crate::{YuvError, YuvRange, YuvStandardMatrix};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::ParallelSliceMut;

#[derive(Debug, Clone, PartialEq)]
/// Affine transform between planar channel sets.
///
/// For every pixel, with `s[i] = src[i] + pre_bias[i]`, produces
/// `dst[j] = post_bias[j] + sum_i(s[i] * coefficient(i, j))`.
///
/// Coefficients are column-major: column `i` (entries `i * dst_channels..(i + 1) * dst_channels`)
/// holds the contribution of source channel `i` to every destination channel.
pub struct ColorMatrix {
    src_channels: usize,
    dst_channels: usize,
    coefficients: Vec<f32>,
    pre_bias: Vec<f32>,
    post_bias: Vec<f32>,
}

impl ColorMatrix {
    pub fn new(
        src_channels: usize,
        dst_channels: usize,
        coefficients: &[f32],
        pre_bias: &[f32],
        post_bias: &[f32],
    ) -> Result<ColorMatrix, YuvError> {
        if src_channels == 0 || dst_channels == 0 {
            return Err(YuvError::ZeroBaseSize);
        }
        let expected = src_channels
            .checked_mul(dst_channels)
            .ok_or(YuvError::PointerOverflow)?;
        if coefficients.len() != expected {
            return Err(YuvError::MatrixShapeMismatch(MismatchedSize {
                expected,
                received: coefficients.len(),
            }));
        }
        if pre_bias.len() != src_channels {
            return Err(YuvError::MatrixShapeMismatch(MismatchedSize {
                expected: src_channels,
                received: pre_bias.len(),
            }));
        }
        if post_bias.len() != dst_channels {
            return Err(YuvError::MatrixShapeMismatch(MismatchedSize {
                expected: dst_channels,
                received: post_bias.len(),
            }));
        }
        Ok(ColorMatrix {
            src_channels,
            dst_channels,
            coefficients: coefficients.to_vec(),
            pre_bias: pre_bias.to_vec(),
            post_bias: post_bias.to_vec(),
        })
    }

    /// `n x n` identity with zero biases
    pub fn identity(n: usize) -> Result<ColorMatrix, YuvError> {
        let size = n.checked_mul(n).ok_or(YuvError::PointerOverflow)?;
        let mut coefficients = vec![0f32; size];
        for i in 0..n {
            coefficients[i * n + i] = 1.;
        }
        ColorMatrix::new(n, n, &coefficients, &vec![0.; n], &vec![0.; n])
    }

    /// Full-range JPEG RGB to Y'CbCr with the published three decimal table,
    /// chroma centered at `0.5`.
    pub fn jpeg_bt601() -> ColorMatrix {
        ColorMatrix {
            src_channels: 3,
            dst_channels: 3,
            coefficients: JPEG_BT601_RGB_TO_YCBCR.to_vec(),
            pre_bias: JPEG_BT601_PRE_BIAS.to_vec(),
            post_bias: JPEG_BT601_POST_BIAS.to_vec(),
        }
    }

    /// RGB in `[0, 1]` to normalized Y'CbCr planes (Y', Cb, Cr order).
    ///
    /// Luma lands on `[bias_y, bias_y + range_y] / 255`, chroma is centered at `0.5`.
    pub fn rgb_to_ycbcr(
        matrix: YuvStandardMatrix,
        range: YuvRange,
    ) -> Result<ColorMatrix, YuvError> {
        let chroma_range = get_yuv_range(8, range);
        let kr_kb = matrix.get_kr_kb();
        let ts = get_forward_transform(
            255,
            chroma_range.range_y,
            chroma_range.range_uv,
            kr_kb.kr,
            kr_kb.kb,
        )?;
        let coefficients = [
            ts.yr, ts.cb_r, ts.cr_r, // R
            ts.yg, ts.cb_g, ts.cr_g, // G
            ts.yb, ts.cb_b, ts.cr_b, // B
        ];
        let bias_y = chroma_range.bias_y as f32 / 255.;
        ColorMatrix::new(3, 3, &coefficients, &[0., 0., 0.], &[bias_y, 0.5, 0.5])
    }

    /// Normalized Y'CbCr planes (Y', Cb, Cr order) back to RGB, inverse of [ColorMatrix::rgb_to_ycbcr]
    pub fn ycbcr_to_rgb(
        matrix: YuvStandardMatrix,
        range: YuvRange,
    ) -> Result<ColorMatrix, YuvError> {
        let chroma_range = get_yuv_range(8, range);
        let kr_kb = matrix.get_kr_kb();
        let ts = get_inverse_transform(
            255,
            chroma_range.range_y,
            chroma_range.range_uv,
            kr_kb.kr,
            kr_kb.kb,
        )?;
        let coefficients = [
            ts.y_coef, ts.y_coef, ts.y_coef, // Y'
            0., -ts.g_coeff_2, ts.cb_coef, // Cb
            ts.cr_coef, -ts.g_coeff_1, 0., // Cr
        ];
        let bias_y = chroma_range.bias_y as f32 / 255.;
        ColorMatrix::new(
            3,
            3,
            &coefficients,
            &[-bias_y, -0.5, -0.5],
            &[0., 0., 0.],
        )
    }

    /// Composes `next` after `self` into one transform.
    ///
    /// Biases fold into the composite: pre bias is kept, and
    /// `post[k] = next.post[k] + sum_j((self.post[j] + next.pre[j]) * next.c(j, k))`.
    pub fn then(&self, next: &ColorMatrix) -> Result<ColorMatrix, YuvError> {
        if self.dst_channels != next.src_channels {
            return Err(YuvError::MatrixShapeMismatch(MismatchedSize {
                expected: self.dst_channels,
                received: next.src_channels,
            }));
        }
        let mut coefficients = vec![0f32; self.src_channels * next.dst_channels];
        for i in 0..self.src_channels {
            for k in 0..next.dst_channels {
                let mut acc = 0f32;
                for j in 0..self.dst_channels {
                    acc += self.coefficient(i, j) * next.coefficient(j, k);
                }
                coefficients[i * next.dst_channels + k] = acc;
            }
        }
        let mut post_bias = next.post_bias.clone();
        for (k, post) in post_bias.iter_mut().enumerate() {
            for j in 0..self.dst_channels {
                *post += (self.post_bias[j] + next.pre_bias[j]) * next.coefficient(j, k);
            }
        }
        ColorMatrix::new(
            self.src_channels,
            next.dst_channels,
            &coefficients,
            &self.pre_bias,
            &post_bias,
        )
    }

    #[inline]
    pub fn src_channels(&self) -> usize {
        self.src_channels
    }

    #[inline]
    pub fn dst_channels(&self) -> usize {
        self.dst_channels
    }

    /// Contribution of source channel `i` to destination channel `j`
    #[inline]
    pub fn coefficient(&self, i: usize, j: usize) -> f32 {
        self.coefficients[i * self.dst_channels + j]
    }

    #[inline]
    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    #[inline]
    pub fn pre_bias(&self) -> &[f32] {
        &self.pre_bias
    }

    #[inline]
    pub fn post_bias(&self) -> &[f32] {
        &self.post_bias
    }

    /// Transforms a single pixel, same evaluation order as the planar path
    pub fn apply_pixel(&self, src: &[f32], dst: &mut [f32]) {
        for (j, dst) in dst.iter_mut().enumerate().take(self.dst_channels) {
            let mut acc = 0f32;
            for (i, &v) in src.iter().enumerate().take(self.src_channels) {
                acc += (v + self.pre_bias[i]) * self.coefficient(i, j);
            }
            *dst = acc + self.post_bias[j];
        }
    }
}

/// Applies `matrix` to `srcs`, writing into caller provided planes.
///
/// All planes must share width and height, strides may differ.
/// No rounding or clamping happens here.
pub fn apply_matrix_into(
    srcs: &PlaneSet<f32>,
    dsts: &mut PlaneSet<f32>,
    matrix: &ColorMatrix,
) -> Result<(), YuvError> {
    if srcs.len() != matrix.src_channels() {
        return Err(YuvError::PlaneCountMismatch(MismatchedSize {
            expected: matrix.src_channels(),
            received: srcs.len(),
        }));
    }
    if dsts.len() != matrix.dst_channels() {
        return Err(YuvError::PlaneCountMismatch(MismatchedSize {
            expected: matrix.dst_channels(),
            received: dsts.len(),
        }));
    }
    srcs.check_constraints()?;
    dsts.check_constraints()?;
    let (width, height) = (srcs.width(), srcs.height());
    for plane in dsts.planes().iter() {
        check_channels(1, plane.channels())?;
        check_same_shape(width, height, plane.width(), plane.height())?;
    }

    let width = width as usize;
    let height = height as usize;

    for (j, dst_plane) in dsts.planes_mut().iter_mut().enumerate() {
        let dst_stride = dst_plane.stride();
        let post_bias = matrix.post_bias[j];
        let iter;
        #[cfg(not(feature = "rayon"))]
        {
            iter = dst_plane
                .as_mut_slice()
                .chunks_exact_mut(dst_stride)
                .take(height)
                .enumerate();
        }
        #[cfg(feature = "rayon")]
        {
            iter = dst_plane
                .as_mut_slice()
                .par_chunks_exact_mut(dst_stride)
                .take(height)
                .enumerate();
        }
        iter.for_each(|(y, dst)| {
            let dst = &mut dst[..width];
            dst.fill(0.);
            for (i, src_plane) in srcs.planes().iter().enumerate() {
                let pre_bias = matrix.pre_bias[i];
                let coeff = matrix.coefficient(i, j);
                for (dst, &src) in dst.iter_mut().zip(src_plane.row(y).iter()) {
                    *dst += (src + pre_bias) * coeff;
                }
            }
            for dst in dst.iter_mut() {
                *dst += post_bias;
            }
        });
    }
    Ok(())
}

/// Applies `matrix` to `srcs` into newly allocated tightly packed planes
pub fn apply_matrix(srcs: &PlaneSet<f32>, matrix: &ColorMatrix) -> Result<PlaneSet<f32>, YuvError> {
    srcs.check_constraints()?;
    let mut dsts = PlaneSet::alloc(matrix.dst_channels(), srcs.width(), srcs.height())?;
    apply_matrix_into(srcs, &mut dsts, matrix)?;
    Ok(dsts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::PixelBuffer;
    use approx::assert_relative_eq;
    use rand::Rng;

    fn random_planes(count: usize, width: u32, height: u32) -> PlaneSet<f32> {
        let mut rng = rand::rng();
        let planes = (0..count)
            .map(|i| {
                let stride = width as usize + i * 3;
                let mut plane =
                    PixelBuffer::<f32>::alloc_with_stride(width, height, 1, stride).unwrap();
                for row in plane.rows_mut() {
                    for v in row.iter_mut() {
                        *v = rng.random_range(0f32..1f32);
                    }
                }
                plane
            })
            .collect();
        PlaneSet::from_planes(planes).unwrap()
    }

    fn single_pixel(values: &[f32]) -> PlaneSet<f32> {
        let planes = values
            .iter()
            .map(|&v| PixelBuffer::from_vec(vec![v], 1, 1, 1, 1).unwrap())
            .collect();
        PlaneSet::from_planes(planes).unwrap()
    }

    #[test]
    fn test_identity_keeps_values() {
        let src = random_planes(3, 17, 9);
        let dst = apply_matrix(&src, &ColorMatrix::identity(3).unwrap()).unwrap();
        for (a, b) in src.planes().iter().zip(dst.planes().iter()) {
            for (ra, rb) in a.rows().zip(b.rows()) {
                for (x, y) in ra.iter().zip(rb.iter()) {
                    assert_relative_eq!(x, y, epsilon = f32::EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_pure_red_jpeg_matrix() {
        let src = single_pixel(&[1.0, 0.0, 0.0]);
        let dst = apply_matrix(&src, &ColorMatrix::jpeg_bt601()).unwrap();
        // Column 0 of the table, chroma shifted by 0.5.
        assert_eq!(dst.plane(0).as_slice()[0], 0.299f32);
        assert_eq!(dst.plane(1).as_slice()[0], -0.169f32 + 0.5f32);
        assert_eq!(dst.plane(2).as_slice()[0], 0.5f32 + 0.5f32);
    }

    #[test]
    fn test_pre_bias_is_applied_before_multiply() {
        let matrix = ColorMatrix::new(2, 1, &[2., 3.], &[1., -1.], &[10.]).unwrap();
        let dst = apply_matrix(&single_pixel(&[0.5, 2.0]), &matrix).unwrap();
        // 10 + (0.5 + 1) * 2 + (2 - 1) * 3
        assert_eq!(dst.plane(0).as_slice()[0], 16.);
    }

    #[test]
    fn test_sequential_equals_composed() {
        let src = random_planes(3, 13, 7);
        let m1 = ColorMatrix::rgb_to_ycbcr(YuvStandardMatrix::Bt709, YuvRange::Limited).unwrap();
        let m2 = ColorMatrix::new(
            3,
            3,
            &[0.9, 0.1, -0.2, 0.05, 1.1, 0.3, -0.4, 0.2, 0.7],
            &[0.1, -0.2, 0.05],
            &[0.01, 0.02, -0.03],
        )
        .unwrap();
        let step = apply_matrix(&apply_matrix(&src, &m1).unwrap(), &m2).unwrap();
        let composed = apply_matrix(&src, &m1.then(&m2).unwrap()).unwrap();
        for (a, b) in step.planes().iter().zip(composed.planes().iter()) {
            for (ra, rb) in a.rows().zip(b.rows()) {
                for (x, y) in ra.iter().zip(rb.iter()) {
                    assert_relative_eq!(x, y, epsilon = 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_forward_then_inverse_is_identity() {
        for range in [YuvRange::Full, YuvRange::Limited] {
            let forward = ColorMatrix::rgb_to_ycbcr(YuvStandardMatrix::Bt601, range).unwrap();
            let inverse = ColorMatrix::ycbcr_to_rgb(YuvStandardMatrix::Bt601, range).unwrap();
            let round_trip = forward.then(&inverse).unwrap();
            let identity = ColorMatrix::identity(3).unwrap();
            for (a, b) in round_trip
                .coefficients()
                .iter()
                .zip(identity.coefficients().iter())
            {
                assert_relative_eq!(a, b, epsilon = 1e-5);
            }
            for v in round_trip.post_bias() {
                assert_relative_eq!(*v, 0., epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_apply_pixel_matches_planar() {
        let matrix = ColorMatrix::rgb_to_ycbcr(YuvStandardMatrix::Bt2020, YuvRange::Full).unwrap();
        let values = [0.25f32, 0.5, 0.75];
        let planar = apply_matrix(&single_pixel(&values), &matrix).unwrap();
        let mut dst = [0f32; 3];
        matrix.apply_pixel(&values, &mut dst);
        for (j, v) in dst.iter().enumerate() {
            assert_eq!(planar.plane(j).as_slice()[0].to_bits(), v.to_bits());
        }
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(matches!(
            ColorMatrix::new(3, 3, &[1.; 8], &[0.; 3], &[0.; 3]),
            Err(YuvError::MatrixShapeMismatch(_))
        ));
        assert_eq!(
            ColorMatrix::identity(usize::MAX),
            Err(YuvError::PointerOverflow)
        );
        assert_eq!(ColorMatrix::identity(0), Err(YuvError::ZeroBaseSize));
        let src = random_planes(2, 4, 4);
        assert_eq!(
            apply_matrix(&src, &ColorMatrix::identity(3).unwrap()),
            Err(YuvError::PlaneCountMismatch(MismatchedSize {
                expected: 3,
                received: 2
            }))
        );
        let src = random_planes(3, 4, 4);
        let mut dst = PlaneSet::<f32>::alloc(3, 4, 5).unwrap();
        assert!(matches!(
            apply_matrix_into(&src, &mut dst, &ColorMatrix::identity(3).unwrap()),
            Err(YuvError::ShapeMismatch(_))
        ));
    }
}
