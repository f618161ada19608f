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

#![no_main]

use libfuzzer_sys::fuzz_target;
use yuvplanar::{
    build_descriptor, convert_ycbcr_to_rgba, PixelBuffer, YCbCrPixelRange, YuvPacked444Format,
    YuvSourceChannels, YuvStandardMatrix,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8, u8, [u8; 4], u8)| {
    let width = data.0 as u32;
    let height = data.1 as u32;
    if width == 0 || height == 0 {
        return;
    }
    let matrix = match data.2 % 3 {
        0 => YuvStandardMatrix::Bt601,
        1 => YuvStandardMatrix::Bt709,
        _ => YuvStandardMatrix::Bt2020,
    };
    let range = if data.3 % 2 == 0 {
        YCbCrPixelRange::FULL_RANGE_8
    } else {
        YCbCrPixelRange::VIDEO_RANGE_8
    };
    let src_format = YuvPacked444Format::from(data.4 % 3);
    let dst_format = match data.5 % 3 {
        0 => YuvSourceChannels::Rgba,
        1 => YuvSourceChannels::Bgra,
        _ => YuvSourceChannels::Argb,
    };
    let descriptor = build_descriptor(matrix, &range, src_format, dst_format).unwrap();

    let channels = src_format.get_channels_count();
    let values = (0..width as usize * height as usize * channels)
        .map(|i| (i as u8).wrapping_add(data.7))
        .collect::<Vec<u8>>();
    let src =
        PixelBuffer::from_vec(values, width, height, width as usize * channels, channels).unwrap();

    // maps that are not permutations are reported as errors
    let _ = convert_ycbcr_to_rgba(&src, &descriptor, data.6, data.7);
});
