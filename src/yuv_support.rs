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
use crate::YuvError;

#[derive(Debug, Copy, Clone, PartialEq)]
/// Coefficients reconstructing RGB from a biased YCbCr triple:
///
/// R = y_coef * Y + cr_coef * Cr,
/// G = y_coef * Y - g_coeff_1 * Cr - g_coeff_2 * Cb,
/// B = y_coef * Y + cb_coef * Cb.
pub struct CbCrInverseTransform<T> {
    pub y_coef: T,
    pub cr_coef: T,
    pub cb_coef: T,
    pub g_coeff_1: T,
    pub g_coeff_2: T,
}

impl<T> CbCrInverseTransform<T> {
    pub fn new(
        y_coef: T,
        cr_coef: T,
        cb_coef: T,
        g_coeff_1: T,
        g_coeff_2: T,
    ) -> CbCrInverseTransform<T> {
        CbCrInverseTransform {
            y_coef,
            cr_coef,
            cb_coef,
            g_coeff_1,
            g_coeff_2,
        }
    }
}

impl CbCrInverseTransform<f32> {
    /// Integral transformation adds an error not less than 1%
    pub fn to_integers(&self, precision: u32) -> CbCrInverseTransform<i32> {
        let precision_scale = (1i32 << precision) as f32;
        CbCrInverseTransform::<i32> {
            y_coef: (self.y_coef * precision_scale).round() as i32,
            cr_coef: (self.cr_coef * precision_scale).round() as i32,
            cb_coef: (self.cb_coef * precision_scale).round() as i32,
            g_coeff_1: (self.g_coeff_1 * precision_scale).round() as i32,
            g_coeff_2: (self.g_coeff_2 * precision_scale).round() as i32,
        }
    }
}

/// Returns the green weight `1 - kr - kb`, all three weights must be finite and positive
fn check_kr_kb(kr: f32, kb: f32) -> Result<f32, YuvError> {
    let kg = 1.0f32 - kr - kb;
    if !kr.is_finite() || !kb.is_finite() || kr <= 0f32 || kb <= 0f32 || kg <= 0f32 {
        return Err(YuvError::UnsupportedFormat(
            "kr, kb and 1 - kr - kb must be finite and positive",
        ));
    }
    Ok(kg)
}

/// Transformation YUV to RGB with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
///
/// `range_rgba` is the RGB code range, `range_y` and `range_uv` are the widths of
/// the luma and chroma code ranges.
pub fn get_inverse_transform(
    range_rgba: u32,
    range_y: u32,
    range_uv: u32,
    kr: f32,
    kb: f32,
) -> Result<CbCrInverseTransform<f32>, YuvError> {
    let kg = check_kr_kb(kr, kb)?;
    if range_y == 0 || range_uv == 0 {
        return Err(YuvError::UnsupportedFormat(
            "luma and chroma code ranges must be non-zero",
        ));
    }
    let range_uv = range_rgba as f32 / range_uv as f32;
    let y_coef = range_rgba as f32 / range_y as f32;
    let cr_coeff = (2f32 * (1f32 - kr)) * range_uv;
    let cb_coeff = (2f32 * (1f32 - kb)) * range_uv;
    let g_coeff_1 = (2f32 * ((1f32 - kr) * kr / kg)) * range_uv;
    let g_coeff_2 = (2f32 * ((1f32 - kb) * kb / kg)) * range_uv;
    Ok(CbCrInverseTransform::new(
        y_coef, cr_coeff, cb_coeff, g_coeff_1, g_coeff_2,
    ))
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CbCrForwardTransform<T> {
    pub yr: T,
    pub yg: T,
    pub yb: T,
    pub cb_r: T,
    pub cb_g: T,
    pub cb_b: T,
    pub cr_r: T,
    pub cr_g: T,
    pub cr_b: T,
}

/// Transformation RGB to YUV with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
pub fn get_forward_transform(
    range_rgba: u32,
    range_y: u32,
    range_uv: u32,
    kr: f32,
    kb: f32,
) -> Result<CbCrForwardTransform<f32>, YuvError> {
    let kg = check_kr_kb(kr, kb)?;
    if range_rgba == 0 {
        return Err(YuvError::UnsupportedFormat("RGB code range must be non-zero"));
    }

    let yr = kr * range_y as f32 / range_rgba as f32;
    let yg = kg * range_y as f32 / range_rgba as f32;
    let yb = kb * range_y as f32 / range_rgba as f32;

    let cb_r = -0.5f32 * kr / (1f32 - kb) * range_uv as f32 / range_rgba as f32;
    let cb_g = -0.5f32 * kg / (1f32 - kb) * range_uv as f32 / range_rgba as f32;
    let cb_b = 0.5f32 * range_uv as f32 / range_rgba as f32;

    let cr_r = 0.5f32 * range_uv as f32 / range_rgba as f32;
    let cr_g = -0.5f32 * kg / (1f32 - kr) * range_uv as f32 / range_rgba as f32;
    let cr_b = -0.5f32 * kb / (1f32 - kr) * range_uv as f32 / range_rgba as f32;
    Ok(CbCrForwardTransform {
        yr,
        yg,
        yb,
        cb_r,
        cb_g,
        cb_b,
        cr_r,
        cr_g,
        cr_b,
    })
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
/// Declares YUV range Limited (TV) or Full
pub enum YuvRange {
    /// Limited range Y ∈ [16, 235], UV ∈ [16, 240] for 8 bit
    Limited,
    /// Full range Y ∈ [0, 255], UV ∈ [0, 255] for 8 bit
    Full,
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct YuvChromaRange {
    pub bias_y: u32,
    pub bias_uv: u32,
    pub range_y: u32,
    pub range_uv: u32,
    pub range: YuvRange,
}

pub const fn get_yuv_range(depth: u32, range: YuvRange) -> YuvChromaRange {
    match range {
        YuvRange::Limited => YuvChromaRange {
            bias_y: 16 << (depth - 8),
            bias_uv: 1 << (depth - 1),
            range_y: 219 << (depth - 8),
            range_uv: 224 << (depth - 8),
            range,
        },
        YuvRange::Full => YuvChromaRange {
            bias_y: 0,
            bias_uv: 1 << (depth - 1),
            range_uv: (1 << depth) - 1,
            range_y: (1 << depth) - 1,
            range,
        },
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
/// Declares standard prebuilt YUV conversion matrices, check [ITU-R](https://www.itu.int/rec/T-REC-H.273/en) information for more info
pub enum YuvStandardMatrix {
    Bt601,
    Bt709,
    Bt2020,
    Smpte240,
    Bt470_6,
    /// Custom parameters first goes for kr, second for kb.
    /// Conversions report [YuvError::UnsupportedFormat] unless kr, kb and 1.0f32 - kr - kb
    /// are finite and positive
    Custom(f32, f32),
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct YuvBias {
    pub kr: f32,
    pub kb: f32,
}

impl YuvStandardMatrix {
    pub const fn get_kr_kb(self) -> YuvBias {
        match self {
            YuvStandardMatrix::Bt601 => YuvBias {
                kr: 0.299f32,
                kb: 0.114f32,
            },
            YuvStandardMatrix::Bt709 => YuvBias {
                kr: 0.2126f32,
                kb: 0.0722f32,
            },
            YuvStandardMatrix::Bt2020 => YuvBias {
                kr: 0.2627f32,
                kb: 0.0593f32,
            },
            YuvStandardMatrix::Smpte240 => YuvBias {
                kr: 0.212f32,
                kb: 0.087f32,
            },
            YuvStandardMatrix::Bt470_6 => YuvBias {
                kr: 0.2220f32,
                kb: 0.0713f32,
            },
            YuvStandardMatrix::Custom(kr, kb) => YuvBias { kr, kb },
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// Interleaved 8-bit 4:4:4 YCbCr layouts accepted by the YCbCr to RGBA converter
pub enum YuvPacked444Format {
    /// 3 bytes per pixel: Cr, Y', Cb (`v308`)
    CrYpCb = 0,
    /// 4 bytes per pixel: Cb, Y', Cr, A (`v408`)
    CbYpCrA = 1,
    /// 4 bytes per pixel: A, Y', Cb, Cr (`y408`)
    AYpCbCr = 2,
}

impl From<u8> for YuvPacked444Format {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvPacked444Format::CrYpCb,
            1 => YuvPacked444Format::CbYpCrA,
            2 => YuvPacked444Format::AYpCbCr,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl YuvPacked444Format {
    #[inline(always)]
    pub const fn get_channels_count(&self) -> usize {
        match self {
            YuvPacked444Format::CrYpCb => 3,
            YuvPacked444Format::CbYpCrA | YuvPacked444Format::AYpCbCr => 4,
        }
    }

    #[inline(always)]
    pub const fn get_y_ps(&self) -> usize {
        1
    }

    #[inline(always)]
    pub const fn get_u_ps(&self) -> usize {
        match self {
            YuvPacked444Format::CrYpCb => 2,
            YuvPacked444Format::CbYpCrA => 0,
            YuvPacked444Format::AYpCbCr => 2,
        }
    }

    #[inline(always)]
    pub const fn get_v_ps(&self) -> usize {
        match self {
            YuvPacked444Format::CrYpCb => 0,
            YuvPacked444Format::CbYpCrA => 2,
            YuvPacked444Format::AYpCbCr => 3,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// Interleaved 8-bit RGB layouts
pub enum YuvSourceChannels {
    Rgb = 0,
    Rgba = 1,
    Bgra = 2,
    Argb = 3,
}

impl From<u8> for YuvSourceChannels {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvSourceChannels::Rgb,
            1 => YuvSourceChannels::Rgba,
            2 => YuvSourceChannels::Bgra,
            3 => YuvSourceChannels::Argb,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl YuvSourceChannels {
    #[inline(always)]
    pub const fn get_channels_count(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb => 3,
            YuvSourceChannels::Rgba | YuvSourceChannels::Bgra | YuvSourceChannels::Argb => 4,
        }
    }

    #[inline(always)]
    pub const fn has_alpha(&self) -> bool {
        match self {
            YuvSourceChannels::Rgb => false,
            YuvSourceChannels::Rgba | YuvSourceChannels::Bgra | YuvSourceChannels::Argb => true,
        }
    }

    #[inline(always)]
    pub const fn get_r_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb => 0,
            YuvSourceChannels::Rgba => 0,
            YuvSourceChannels::Bgra => 2,
            YuvSourceChannels::Argb => 1,
        }
    }

    #[inline(always)]
    pub const fn get_g_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb | YuvSourceChannels::Rgba | YuvSourceChannels::Bgra => 1,
            YuvSourceChannels::Argb => 2,
        }
    }

    #[inline(always)]
    pub const fn get_b_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb => 2,
            YuvSourceChannels::Rgba => 2,
            YuvSourceChannels::Bgra => 0,
            YuvSourceChannels::Argb => 3,
        }
    }

    #[inline(always)]
    pub const fn get_a_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb => 0,
            YuvSourceChannels::Rgba | YuvSourceChannels::Bgra => 3,
            YuvSourceChannels::Argb => 0,
        }
    }
}
