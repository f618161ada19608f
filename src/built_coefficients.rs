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
use crate::yuv_support::CbCrInverseTransform;
use crate::YuvStandardMatrix;

/// Full-range JPEG RGB to Y'CbCr matrix, three decimals as published in ITU-T T.871.
///
/// Column-major: entries `3 * i..3 * i + 3` hold the contribution of source channel `i`
/// to Y', Cb and Cr.
pub static JPEG_BT601_RGB_TO_YCBCR: [f32; 9] = [
    0.299, -0.169, 0.500, // R
    0.587, -0.331, -0.419, // G
    0.114, 0.500, -0.081, // B
];

pub static JPEG_BT601_PRE_BIAS: [f32; 3] = [0.0, 0.0, 0.0];

pub static JPEG_BT601_POST_BIAS: [f32; 3] = [0.0, 0.5, 0.5];

// Ranges below are (luma code width, chroma code width) of the 8-bit pixel range profiles:
// full profile is (255, 254), video profile is (219, 224).

static INVERSE_BT601_FULL_8_13PREC: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 8192,
    cr_coef: 11530,
    cb_coef: 14573,
    g_coeff_1: 5873,
    g_coeff_2: 2830,
};

static INVERSE_BT601_VIDEO_8_13PREC: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 9539,
    cr_coef: 13075,
    cb_coef: 16525,
    g_coeff_1: 6660,
    g_coeff_2: 3209,
};

static INVERSE_BT709_FULL_8_13PREC: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 8192,
    cr_coef: 12952,
    cb_coef: 15261,
    g_coeff_1: 3850,
    g_coeff_2: 1541,
};

static INVERSE_BT709_VIDEO_8_13PREC: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 9539,
    cr_coef: 14686,
    cb_coef: 17305,
    g_coeff_1: 4366,
    g_coeff_2: 1747,
};

static INVERSE_BT2020_FULL_8_13PREC: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 8192,
    cr_coef: 12127,
    cb_coef: 15473,
    g_coeff_1: 4699,
    g_coeff_2: 1353,
};

static INVERSE_BT2020_VIDEO_8_13PREC: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 9539,
    cr_coef: 13752,
    cb_coef: 17545,
    g_coeff_1: 5328,
    g_coeff_2: 1535,
};

/// Looks up a prebuilt 13-bit inverse table, `None` when the combination must be derived
pub(crate) fn get_built_inverse_transform(
    precision: u32,
    range_y: u32,
    range_uv: u32,
    matrix: YuvStandardMatrix,
) -> Option<CbCrInverseTransform<i32>> {
    if precision != 13 {
        return None;
    }
    let full = match (range_y, range_uv) {
        (255, 254) => true,
        (219, 224) => false,
        _ => return None,
    };
    match (matrix, full) {
        (YuvStandardMatrix::Bt601, true) => Some(INVERSE_BT601_FULL_8_13PREC),
        (YuvStandardMatrix::Bt601, false) => Some(INVERSE_BT601_VIDEO_8_13PREC),
        (YuvStandardMatrix::Bt709, true) => Some(INVERSE_BT709_FULL_8_13PREC),
        (YuvStandardMatrix::Bt709, false) => Some(INVERSE_BT709_VIDEO_8_13PREC),
        (YuvStandardMatrix::Bt2020, true) => Some(INVERSE_BT2020_FULL_8_13PREC),
        (YuvStandardMatrix::Bt2020, false) => Some(INVERSE_BT2020_VIDEO_8_13PREC),
        _ => None,
    }
}
