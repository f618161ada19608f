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
use approx::assert_abs_diff_eq;
use enough::Unstoppable;
use rand::Rng;
use yuvplanar::{
    apply_matrix, float_to_uint8, interleaved_from_planar, planar_from_interleaved,
    run_pipeline, uint8_to_float, ColorMatrix, DitherMode, ErrorKind, Pipeline, PipelineOptions,
    PixelBuffer, YuvRange, YuvStandardMatrix, CR_YP_CB_ORDER,
};

fn rgb_image(pixels: &[[f32; 3]], width: u32) -> PixelBuffer<f32> {
    let height = pixels.len() as u32 / width;
    let data = pixels.iter().flatten().copied().collect::<Vec<f32>>();
    PixelBuffer::from_vec(data, width, height, width as usize * 3, 3).unwrap()
}

fn assert_rgba_near(actual: &[u8], expected: [u8; 4], tolerance: i32) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(
            (*a as i32 - *e as i32).abs() <= tolerance,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }
}

#[test]
fn reference_primaries() {
    let src = rgb_image(
        &[
            [1., 0., 0.],
            [0., 1., 0.],
            [0., 0., 1.],
            [1., 1., 1.],
            [0., 0., 0.],
        ],
        5,
    );
    let output = run_pipeline(&src, &PipelineOptions::default()).unwrap();
    let rgba = output.rgba.as_slice();
    assert_eq!(output.rgba.channels(), 4);
    assert_eq!(&rgba[0..4], &[255, 0, 0, 255]);
    assert_rgba_near(&rgba[4..8], [0, 255, 0, 255], 1);
    assert_rgba_near(&rgba[8..12], [0, 0, 255, 255], 1);
    assert_rgba_near(&rgba[12..16], [255, 255, 255, 255], 2);
    // luma floor of the full range preset is 1
    assert_eq!(&rgba[16..20], &[1, 1, 1, 255]);
}

#[test]
fn stages_match_manual_chain() {
    let mut rng = rand::rng();
    let (width, height) = (17u32, 9u32);
    let pixels = (0..width * height)
        .map(|_| [rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>()])
        .collect::<Vec<_>>();
    let src = rgb_image(&pixels, width);

    let output = run_pipeline(&src, &PipelineOptions::default()).unwrap();

    let planes = planar_from_interleaved(&src).unwrap();
    let ycbcr = apply_matrix(&planes, &ColorMatrix::jpeg_bt601()).unwrap();
    assert_eq!(output.ycbcr_planes, ycbcr);
    let merged = interleaved_from_planar(&ycbcr, &CR_YP_CB_ORDER).unwrap();
    let quantized = float_to_uint8(&merged, &[1.; 3], &[0.; 3], DitherMode::None).unwrap();
    assert_eq!(output.ycbcr8, quantized);
    assert_eq!(output.rgba.width(), width);
    assert_eq!(output.rgba.height(), height);
}

#[test]
fn random_colors_round_trip_closely() {
    let mut rng = rand::rng();
    let (width, height) = (31u32, 7u32);
    let pixels = (0..width * height)
        .map(|_| [rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>()])
        .collect::<Vec<_>>();
    let src = rgb_image(&pixels, width);
    let options = PipelineOptions::for_standard(YuvStandardMatrix::Bt709, YuvRange::Full).unwrap();
    let output = run_pipeline(&src, &options).unwrap();

    for (px, rgba) in pixels.iter().zip(output.rgba.as_slice().chunks_exact(4)) {
        for c in 0..3 {
            let expected = px[c] * 255.;
            assert_abs_diff_eq!(rgba[c] as f32, expected, epsilon = 4.);
        }
        assert_eq!(rgba[3], 255);
    }
}

#[test]
fn dithering_stays_near_plain_rounding() {
    let mut rng = rand::rng();
    let (width, height) = (24u32, 24u32);
    let pixels = (0..width * height)
        .map(|_| [rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>()])
        .collect::<Vec<_>>();
    let src = rgb_image(&pixels, width);
    let plain = run_pipeline(&src, &PipelineOptions::default()).unwrap();
    for dither in [DitherMode::Ordered, DitherMode::ErrorDiffusion] {
        let options = PipelineOptions {
            dither,
            ..PipelineOptions::default()
        };
        let dithered = run_pipeline(&src, &options).unwrap();
        let plain_mean = plain.ycbcr8.as_slice().iter().map(|&v| v as f64).sum::<f64>();
        let dithered_mean = dithered.ycbcr8.as_slice().iter().map(|&v| v as f64).sum::<f64>();
        let n = plain.ycbcr8.as_slice().len() as f64;
        assert_abs_diff_eq!(plain_mean / n, dithered_mean / n, epsilon = 1.);
    }
}

#[test]
fn custom_alpha_and_permutation() {
    let src = rgb_image(&[[1., 0., 0.]], 1);
    let options = PipelineOptions {
        // ARGB kept as is
        permute_map: [0, 1, 2, 3],
        alpha: 7,
        ..PipelineOptions::default()
    };
    let output = run_pipeline(&src, &options).unwrap();
    assert_eq!(output.rgba.as_slice(), &[7, 255, 0, 0]);
}

#[test]
fn batch_and_uint8_source() {
    let bytes = PixelBuffer::from_vec(vec![255u8, 0, 0, 0, 0, 0], 2, 1, 6, 3).unwrap();
    let floats = uint8_to_float(&bytes, &[1.; 3], &[0.; 3]).unwrap();
    let pipeline = Pipeline::new(PipelineOptions::default()).unwrap();
    let results = pipeline
        .run_batch(&[floats.clone(), floats], &Unstoppable)
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_slice(), &[255, 0, 0, 255, 1, 1, 1, 255]);
    assert_eq!(results[0], results[1]);
}

#[test]
fn invalid_input_is_rejected() {
    let src = PixelBuffer::<f32>::alloc(4, 4, 1).unwrap();
    let err = run_pipeline(&src, &PipelineOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);

    let options = PipelineOptions {
        value_max: [0., 1., 1.],
        ..PipelineOptions::default()
    };
    let src = PixelBuffer::<f32>::alloc(4, 4, 3).unwrap();
    let err = run_pipeline(&src, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}
