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
use yuvplanar::{merge_planar_to_interleaved, split_interleaved_to_planar, PixelBuffer, PlaneSet};

fuzz_target!(|data: (u8, u8, u8, u8, u8)| {
    let width = data.0 as u32;
    let height = data.1 as u32;
    let channels = (data.2 % 5) as usize + 1;
    let padding = (data.3 % 7) as usize;
    if width == 0 || height == 0 {
        return;
    }
    let stride = width as usize * channels + padding;
    let values = (0..stride * height as usize)
        .map(|i| (i as u8).wrapping_mul(data.4))
        .collect::<Vec<u8>>();
    let src = PixelBuffer::from_vec(values, width, height, stride, channels).unwrap();

    let mut planes = PlaneSet::<u8>::alloc(channels, width, height).unwrap();
    split_interleaved_to_planar(&src, &mut planes).unwrap();

    let order = (0..channels).collect::<Vec<usize>>();
    let mut dst = PixelBuffer::<u8>::alloc_with_stride(width, height, channels, stride).unwrap();
    merge_planar_to_interleaved(&planes, &mut dst, &order).unwrap();
    for (src_row, dst_row) in src.rows().zip(dst.rows()) {
        assert_eq!(src_row, dst_row);
    }

    let mut reversed = order.clone();
    reversed.reverse();
    merge_planar_to_interleaved(&planes, &mut dst, &reversed).unwrap();
});
