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
use yuvplanar::{float_to_uint8, uint8_to_float, DitherMode, PixelBuffer};

fuzz_target!(|data: (u8, u8, u8, u8, f32, f32, Vec<f32>)| {
    let width = data.0 as u32;
    let height = data.1 as u32;
    let channels = (data.2 % 4) as usize + 1;
    if width == 0 || height == 0 {
        return;
    }
    let dither = match data.3 % 3 {
        0 => DitherMode::None,
        1 => DitherMode::Ordered,
        _ => DitherMode::ErrorDiffusion,
    };
    let mut values = data.6;
    values.resize(width as usize * height as usize * channels, 0.5);
    let src = PixelBuffer::from_vec(values, width, height, width as usize * channels, channels)
        .unwrap();

    let value_max = vec![data.4; channels];
    let value_min = vec![data.5; channels];
    // degenerate ranges are reported as errors
    if let Ok(bytes) = float_to_uint8(&src, &value_max, &value_min, dither) {
        uint8_to_float(&bytes, &value_max, &value_min).unwrap();
    }
});
