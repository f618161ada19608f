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
use crate::built_coefficients::get_built_inverse_transform;
use crate::images::PixelBuffer;
use crate::numerics::qrshr;
use crate::yuv_error::{check_channels, check_same_shape};
use crate::yuv_support::{
    get_inverse_transform, CbCrInverseTransform, YuvPacked444Format, YuvSourceChannels,
};
use crate::{YuvError, YuvStandardMatrix};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

const PRECISION: i32 = 13;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// 8-bit YCbCr quantization profile.
///
/// `*_bias` is the code of zero luma or zero chroma, `*_range_max` the code of full
/// luma or full positive chroma. `*_min` and `*_max` clamp incoming codes before conversion.
pub struct YCbCrPixelRange {
    pub yp_bias: u8,
    pub cbcr_bias: u8,
    pub yp_range_max: u8,
    pub cbcr_range_max: u8,
    pub yp_max: u8,
    pub yp_min: u8,
    pub cbcr_max: u8,
    pub cbcr_min: u8,
}

impl YCbCrPixelRange {
    /// Full range 8-bit, clamped to full range
    pub const FULL_RANGE_8: YCbCrPixelRange = YCbCrPixelRange {
        yp_bias: 0,
        cbcr_bias: 128,
        yp_range_max: 255,
        cbcr_range_max: 255,
        yp_max: 255,
        yp_min: 1,
        cbcr_max: 255,
        cbcr_min: 0,
    };

    /// Video range 8-bit, clamped to video range
    pub const VIDEO_RANGE_8: YCbCrPixelRange = YCbCrPixelRange {
        yp_bias: 16,
        cbcr_bias: 128,
        yp_range_max: 235,
        cbcr_range_max: 240,
        yp_max: 235,
        yp_min: 16,
        cbcr_max: 240,
        cbcr_min: 16,
    };

    pub fn validate(&self) -> Result<(), YuvError> {
        if self.yp_range_max <= self.yp_bias
            || self.cbcr_range_max <= self.cbcr_bias
            || self.yp_min > self.yp_max
            || self.cbcr_min > self.cbcr_max
        {
            return Err(YuvError::InvalidPixelRange);
        }
        Ok(())
    }

    /// Width of the luma code range
    #[inline]
    pub const fn range_y(&self) -> u32 {
        self.yp_range_max.saturating_sub(self.yp_bias) as u32
    }

    /// Width of the chroma code range, both sides of the bias
    #[inline]
    pub const fn range_uv(&self) -> u32 {
        2 * self.cbcr_range_max.saturating_sub(self.cbcr_bias) as u32
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
/// Precomputed YCbCr to RGB conversion, immutable and reusable across frames
pub struct YCbCrToRgbaDescriptor {
    transform: CbCrInverseTransform<i32>,
    bias_y: i32,
    bias_uv: i32,
    y_min: i32,
    y_max: i32,
    uv_min: i32,
    uv_max: i32,
    matrix: YuvStandardMatrix,
    src_format: YuvPacked444Format,
    dst_format: YuvSourceChannels,
}

impl YCbCrToRgbaDescriptor {
    #[inline]
    pub fn transform(&self) -> CbCrInverseTransform<i32> {
        self.transform
    }

    #[inline]
    pub fn matrix(&self) -> YuvStandardMatrix {
        self.matrix
    }

    #[inline]
    pub fn src_format(&self) -> YuvPacked444Format {
        self.src_format
    }

    #[inline]
    pub fn dst_format(&self) -> YuvSourceChannels {
        self.dst_format
    }

    /// Converts one YCbCr triple to `[r, g, b]`
    #[inline]
    pub fn convert_pixel(&self, y: u8, cb: u8, cr: u8) -> [u8; 3] {
        let ts = &self.transform;
        let y = (y as i32).clamp(self.y_min, self.y_max) - self.bias_y;
        let cb = (cb as i32).clamp(self.uv_min, self.uv_max) - self.bias_uv;
        let cr = (cr as i32).clamp(self.uv_min, self.uv_max) - self.bias_uv;
        let y_value = y * ts.y_coef;
        let r = qrshr::<PRECISION, 8>(y_value + ts.cr_coef * cr);
        let b = qrshr::<PRECISION, 8>(y_value + ts.cb_coef * cb);
        let g = qrshr::<PRECISION, 8>(y_value - ts.g_coeff_1 * cr - ts.g_coeff_2 * cb);
        [r as u8, g as u8, b as u8]
    }
}

/// Precomputes conversion of 8-bit `src_format` YCbCr into 8-bit `dst_format` RGB
/// for the `matrix` standard quantized with `range`.
///
/// Only four channel destinations have descriptors.
pub fn build_descriptor(
    matrix: YuvStandardMatrix,
    range: &YCbCrPixelRange,
    src_format: YuvPacked444Format,
    dst_format: YuvSourceChannels,
) -> Result<YCbCrToRgbaDescriptor, YuvError> {
    if !dst_format.has_alpha() {
        return Err(YuvError::UnsupportedFormat(
            "YCbCr to RGB needs a four channel destination",
        ));
    }
    range.validate()?;

    let range_y = range.range_y();
    let range_uv = range.range_uv();
    let transform = match get_built_inverse_transform(PRECISION as u32, range_y, range_uv, matrix)
    {
        Some(transform) => transform,
        None => {
            let kr_kb = matrix.get_kr_kb();
            get_inverse_transform(255, range_y, range_uv, kr_kb.kr, kr_kb.kb)?
                .to_integers(PRECISION as u32)
        }
    };

    check_fixed_point_headroom(&transform)?;

    Ok(YCbCrToRgbaDescriptor {
        transform,
        bias_y: range.yp_bias as i32,
        bias_uv: range.cbcr_bias as i32,
        y_min: range.yp_min as i32,
        y_max: range.yp_max as i32,
        uv_min: range.cbcr_min as i32,
        uv_max: range.cbcr_max as i32,
        matrix,
        src_format,
        dst_format,
    })
}

/// Every accumulation in [YCbCrToRgbaDescriptor::convert_pixel] must fit `i32`,
/// with biased samples bounded by `255` in magnitude.
fn check_fixed_point_headroom(ts: &CbCrInverseTransform<i32>) -> Result<(), YuvError> {
    let y = ts.y_coef.unsigned_abs() as i64;
    let chroma = (ts.cr_coef.unsigned_abs() as i64)
        .max(ts.cb_coef.unsigned_abs() as i64)
        .max(ts.g_coeff_1.unsigned_abs() as i64 + ts.g_coeff_2.unsigned_abs() as i64);
    let worst = 255 * (y + chroma) + (1i64 << (PRECISION - 1));
    if worst > i32::MAX as i64 {
        return Err(YuvError::UnsupportedFormat(
            "kr and kb produce coefficients too large for 13-bit fixed point",
        ));
    }
    Ok(())
}

fn check_permute_map(permute_map: &[u8; 4]) -> Result<(), YuvError> {
    let mut seen = [false; 4];
    for &idx in permute_map.iter() {
        let idx = idx as usize;
        if idx >= 4 || seen[idx] {
            return Err(YuvError::InvalidChannelOrder);
        }
        seen[idx] = true;
    }
    Ok(())
}

fn convert_row(
    src: &[u8],
    dst: &mut [u8],
    descriptor: &YCbCrToRgbaDescriptor,
    permute_map: &[u8; 4],
    alpha: u8,
) {
    let packed = descriptor.src_format;
    let cn = descriptor.dst_format;
    for (src, dst) in src
        .chunks_exact(packed.get_channels_count())
        .zip(dst.chunks_exact_mut(4))
    {
        let [r, g, b] = descriptor.convert_pixel(
            src[packed.get_y_ps()],
            src[packed.get_u_ps()],
            src[packed.get_v_ps()],
        );
        let mut px = [0u8; 4];
        px[cn.get_r_channel_offset()] = r;
        px[cn.get_g_channel_offset()] = g;
        px[cn.get_b_channel_offset()] = b;
        px[cn.get_a_channel_offset()] = alpha;
        for (dst, &slot) in dst.iter_mut().zip(permute_map.iter()) {
            *dst = px[slot as usize];
        }
    }
}

/// Converts interleaved 8-bit YCbCr into caller provided interleaved 8-bit four channel storage.
///
/// Pixels are produced in the descriptor's destination order, then output slot `i`
/// receives channel `permute_map[i]` of that order, e.g. `[1, 2, 3, 0]` turns ARGB into RGBA.
/// `alpha` fills the alpha channel, source alpha is ignored.
pub fn convert_ycbcr_to_rgba_into(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBuffer<u8>,
    descriptor: &YCbCrToRgbaDescriptor,
    permute_map: [u8; 4],
    alpha: u8,
) -> Result<(), YuvError> {
    src.check_constraints()?;
    dst.check_constraints()?;
    check_channels(descriptor.src_format.get_channels_count(), src.channels())?;
    check_channels(4, dst.channels())?;
    check_same_shape(src.width(), src.height(), dst.width(), dst.height())?;
    check_permute_map(&permute_map)?;

    let width = src.width() as usize;
    let height = src.height() as usize;
    let src_row_len = src.row_len();
    let src_stride = src.stride();
    let dst_stride = dst.stride();

    let iter;
    #[cfg(not(feature = "rayon"))]
    {
        iter = src
            .as_slice()
            .chunks_exact(src_stride)
            .zip(dst.as_mut_slice().chunks_exact_mut(dst_stride))
            .take(height);
    }
    #[cfg(feature = "rayon")]
    {
        iter = src
            .as_slice()
            .par_chunks_exact(src_stride)
            .zip(dst.as_mut_slice().par_chunks_exact_mut(dst_stride))
            .take(height);
    }
    iter.for_each(|(src, dst)| {
        let src = &src[..src_row_len];
        let dst = &mut dst[..width * 4];
        convert_row(src, dst, descriptor, &permute_map, alpha);
    });
    Ok(())
}

/// Converts interleaved 8-bit YCbCr into a new tightly packed four channel buffer,
/// see [convert_ycbcr_to_rgba_into]
pub fn convert_ycbcr_to_rgba(
    src: &PixelBuffer<u8>,
    descriptor: &YCbCrToRgbaDescriptor,
    permute_map: [u8; 4],
    alpha: u8,
) -> Result<PixelBuffer<u8>, YuvError> {
    src.check_constraints()?;
    let mut dst = PixelBuffer::<u8>::alloc(src.width(), src.height(), 4)?;
    convert_ycbcr_to_rgba_into(src, &mut dst, descriptor, permute_map, alpha)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn full_range_descriptor() -> YCbCrToRgbaDescriptor {
        build_descriptor(
            YuvStandardMatrix::Bt601,
            &YCbCrPixelRange::FULL_RANGE_8,
            YuvPacked444Format::CrYpCb,
            YuvSourceChannels::Argb,
        )
        .unwrap()
    }

    #[test]
    fn test_known_formats_build() {
        for matrix in [
            YuvStandardMatrix::Bt601,
            YuvStandardMatrix::Bt709,
            YuvStandardMatrix::Bt2020,
            YuvStandardMatrix::Smpte240,
        ] {
            for src in [
                YuvPacked444Format::CrYpCb,
                YuvPacked444Format::CbYpCrA,
                YuvPacked444Format::AYpCbCr,
            ] {
                for dst in [
                    YuvSourceChannels::Argb,
                    YuvSourceChannels::Rgba,
                    YuvSourceChannels::Bgra,
                ] {
                    assert!(build_descriptor(matrix, &YCbCrPixelRange::VIDEO_RANGE_8, src, dst)
                        .is_ok());
                }
            }
        }
    }

    #[test]
    fn test_unsupported_formats() {
        let err = build_descriptor(
            YuvStandardMatrix::Bt601,
            &YCbCrPixelRange::FULL_RANGE_8,
            YuvPacked444Format::CrYpCb,
            YuvSourceChannels::Rgb,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        for matrix in [
            YuvStandardMatrix::Custom(0.5, 0.5),
            // green weight close to zero blows up the green coefficients
            YuvStandardMatrix::Custom(0.6, 0.39999),
            YuvStandardMatrix::Custom(f32::NAN, 0.1),
        ] {
            let err = build_descriptor(
                matrix,
                &YCbCrPixelRange::FULL_RANGE_8,
                YuvPacked444Format::CrYpCb,
                YuvSourceChannels::Argb,
            )
            .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedFormat, "{:?}", matrix);
        }
    }

    #[test]
    fn test_custom_matrix_extremes_stay_in_range() {
        let descriptor = build_descriptor(
            YuvStandardMatrix::Custom(0.3, 0.1),
            &YCbCrPixelRange::FULL_RANGE_8,
            YuvPacked444Format::CrYpCb,
            YuvSourceChannels::Argb,
        )
        .unwrap();
        for y in [0u8, 255] {
            for cb in [0u8, 255] {
                for cr in [0u8, 255] {
                    descriptor.convert_pixel(y, cb, cr);
                }
            }
        }
        assert_eq!(descriptor.convert_pixel(255, 128, 128), [255, 255, 255]);
    }

    #[test]
    fn test_invalid_pixel_range() {
        let mut range = YCbCrPixelRange::VIDEO_RANGE_8;
        range.yp_range_max = range.yp_bias;
        let err = build_descriptor(
            YuvStandardMatrix::Bt709,
            &range,
            YuvPacked444Format::CrYpCb,
            YuvSourceChannels::Argb,
        )
        .unwrap_err();
        assert_eq!(err, YuvError::InvalidPixelRange);
    }

    #[test]
    fn test_unvalidated_range_widths_saturate() {
        let mut range = YCbCrPixelRange::FULL_RANGE_8;
        range.cbcr_range_max = 100;
        range.yp_bias = 255;
        range.yp_range_max = 200;
        assert_eq!(range.range_uv(), 0);
        assert_eq!(range.range_y(), 0);
        assert_eq!(range.validate(), Err(YuvError::InvalidPixelRange));
        assert_eq!(YCbCrPixelRange::FULL_RANGE_8.range_uv(), 254);
        assert_eq!(YCbCrPixelRange::VIDEO_RANGE_8.range_y(), 219);
    }

    #[test]
    fn test_gray_axis_full_range() {
        let descriptor = full_range_descriptor();
        assert_eq!(descriptor.convert_pixel(255, 128, 128), [255, 255, 255]);
        assert_eq!(descriptor.convert_pixel(128, 128, 128), [128, 128, 128]);
        // Luma is clamped to yp_min = 1 before conversion.
        assert_eq!(descriptor.convert_pixel(0, 128, 128), [1, 1, 1]);
    }

    #[test]
    fn test_video_range_extremes() {
        let descriptor = build_descriptor(
            YuvStandardMatrix::Bt709,
            &YCbCrPixelRange::VIDEO_RANGE_8,
            YuvPacked444Format::CrYpCb,
            YuvSourceChannels::Rgba,
        )
        .unwrap();
        assert_eq!(descriptor.convert_pixel(16, 128, 128), [0, 0, 0]);
        assert_eq!(descriptor.convert_pixel(235, 128, 128), [255, 255, 255]);
        assert_eq!(descriptor.convert_pixel(0, 128, 128), [0, 0, 0]);
        assert_eq!(descriptor.convert_pixel(255, 128, 128), [255, 255, 255]);
    }

    #[test]
    fn test_saturated_red() {
        let descriptor = full_range_descriptor();
        // Full range JPEG encoding of pure red is Y' 76, Cb 84, Cr 255.
        assert_eq!(descriptor.convert_pixel(76, 84, 255), [255, 0, 0]);
    }

    #[test]
    fn test_permute_and_alpha() {
        let descriptor = full_range_descriptor();
        // Cr, Y', Cb for pure red and mid gray, stride padded by two bytes.
        let src = PixelBuffer::from_vec(vec![255u8, 76, 84, 128, 128, 128, 0, 0], 2, 1, 8, 3)
            .unwrap();

        let rgba = convert_ycbcr_to_rgba(&src, &descriptor, [1, 2, 3, 0], 255).unwrap();
        assert_eq!(rgba.as_slice(), &[255, 0, 0, 255, 128, 128, 128, 255]);

        let bgra = convert_ycbcr_to_rgba(&src, &descriptor, [3, 2, 1, 0], 17).unwrap();
        assert_eq!(bgra.as_slice(), &[0, 0, 255, 17, 128, 128, 128, 17]);

        let argb = convert_ycbcr_to_rgba(&src, &descriptor, [0, 1, 2, 3], 9).unwrap();
        assert_eq!(argb.as_slice(), &[9, 255, 0, 0, 9, 128, 128, 128]);
    }

    #[test]
    fn test_source_alpha_is_ignored() {
        let descriptor = build_descriptor(
            YuvStandardMatrix::Bt601,
            &YCbCrPixelRange::FULL_RANGE_8,
            YuvPacked444Format::CbYpCrA,
            YuvSourceChannels::Rgba,
        )
        .unwrap();
        let src = PixelBuffer::from_vec(vec![128u8, 200, 128, 3], 1, 1, 4, 4).unwrap();
        let dst = convert_ycbcr_to_rgba(&src, &descriptor, [0, 1, 2, 3], 250).unwrap();
        assert_eq!(dst.as_slice(), &[200, 200, 200, 250]);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let descriptor = full_range_descriptor();
        let src = PixelBuffer::<u8>::alloc(2, 2, 4).unwrap();
        assert!(matches!(
            convert_ycbcr_to_rgba(&src, &descriptor, [1, 2, 3, 0], 255),
            Err(YuvError::ChannelsMismatch(_))
        ));
        let src = PixelBuffer::<u8>::alloc(2, 2, 3).unwrap();
        assert_eq!(
            convert_ycbcr_to_rgba(&src, &descriptor, [1, 1, 3, 0], 255),
            Err(YuvError::InvalidChannelOrder)
        );
        let mut dst = PixelBuffer::<u8>::alloc(2, 3, 4).unwrap();
        assert!(matches!(
            convert_ycbcr_to_rgba_into(&src, &mut dst, &descriptor, [1, 2, 3, 0], 255),
            Err(YuvError::ShapeMismatch(_))
        ));
    }
}
