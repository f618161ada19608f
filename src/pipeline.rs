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
use crate::color_matrix::{apply_matrix, ColorMatrix};
use crate::images::{PixelBuffer, PlaneSet};
use crate::layout::{interleaved_from_planar, planar_from_interleaved};
use crate::quantize::{float_to_uint8, DitherMode};
use crate::ycbcr_to_rgba::{
    build_descriptor, convert_ycbcr_to_rgba, YCbCrPixelRange, YCbCrToRgbaDescriptor,
};
use crate::yuv_error::check_channels;
use crate::yuv_support::{YuvPacked444Format, YuvSourceChannels};
use crate::{YuvError, YuvRange, YuvStandardMatrix};
use enough::Stop;
use tracing::{debug, trace};

/// Plane order of the interleaved YCbCr chunks: Cr, Y', Cb
pub const CR_YP_CB_ORDER: [usize; 3] = [2, 0, 1];

#[derive(Debug, Clone, PartialEq)]
/// Parameters of one RGB float to RGBA 8-bit run
pub struct PipelineOptions {
    /// RGB planes to Y', Cb, Cr planes
    pub forward_matrix: ColorMatrix,
    /// Clamp range upper bounds of the Cr, Y', Cb chunks
    pub value_max: [f32; 3],
    /// Clamp range lower bounds of the Cr, Y', Cb chunks
    pub value_min: [f32; 3],
    pub dither: DitherMode,
    /// Standard used to decode the 8-bit YCbCr back to RGB
    pub standard: YuvStandardMatrix,
    pub pixel_range: YCbCrPixelRange,
    /// Channel order the descriptor produces before permutation
    pub dst_format: YuvSourceChannels,
    /// Output slot `i` takes channel `permute_map[i]` of `dst_format`
    pub permute_map: [u8; 4],
    pub alpha: u8,
}

impl Default for PipelineOptions {
    /// Full range JPEG BT.601, no dithering, ARGB permuted to RGBA with opaque alpha
    fn default() -> Self {
        PipelineOptions {
            forward_matrix: ColorMatrix::jpeg_bt601(),
            value_max: [1.0, 1.0, 1.0],
            value_min: [0.0, 0.0, 0.0],
            dither: DitherMode::None,
            standard: YuvStandardMatrix::Bt601,
            pixel_range: YCbCrPixelRange::FULL_RANGE_8,
            dst_format: YuvSourceChannels::Argb,
            permute_map: [1, 2, 3, 0],
            alpha: 255,
        }
    }
}

impl PipelineOptions {
    /// Options encoding and decoding with the same `matrix` and `range`
    pub fn for_standard(matrix: YuvStandardMatrix, range: YuvRange) -> Result<Self, YuvError> {
        let pixel_range = match range {
            YuvRange::Full => YCbCrPixelRange::FULL_RANGE_8,
            YuvRange::Limited => YCbCrPixelRange::VIDEO_RANGE_8,
        };
        Ok(PipelineOptions {
            forward_matrix: ColorMatrix::rgb_to_ycbcr(matrix, range)?,
            standard: matrix,
            pixel_range,
            ..PipelineOptions::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Every intermediate of a run, for inspection
pub struct PipelineOutput {
    /// Y', Cb, Cr float planes
    pub ycbcr_planes: PlaneSet<f32>,
    /// Interleaved Cr, Y', Cb 8-bit chunks
    pub ycbcr8: PixelBuffer<u8>,
    /// Final four channel buffer in `permute_map` order
    pub rgba: PixelBuffer<u8>,
}

#[derive(Debug, Clone)]
/// Validated options with the YCbCr descriptor built once and reused for every image
pub struct Pipeline {
    options: PipelineOptions,
    descriptor: YCbCrToRgbaDescriptor,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Result<Pipeline, YuvError> {
        if options.forward_matrix.src_channels() != 3 || options.forward_matrix.dst_channels() != 3
        {
            return Err(YuvError::UnsupportedFormat(
                "forward matrix must map three channels to three channels",
            ));
        }
        let descriptor = build_descriptor(
            options.standard,
            &options.pixel_range,
            YuvPacked444Format::CrYpCb,
            options.dst_format,
        )?;
        debug!(
            standard = ?options.standard,
            dither = ?options.dither,
            dst_format = ?options.dst_format,
            "Built YCbCr descriptor"
        );
        Ok(Pipeline {
            options,
            descriptor,
        })
    }

    #[inline]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    #[inline]
    pub fn descriptor(&self) -> &YCbCrToRgbaDescriptor {
        &self.descriptor
    }

    /// Runs RGB float through split, matrix, merge, quantization and YCbCr to RGBA
    pub fn run(&self, rgb: &PixelBuffer<f32>) -> Result<PipelineOutput, YuvError> {
        check_channels(3, rgb.channels())?;
        rgb.check_constraints()?;
        let (width, height) = (rgb.width(), rgb.height());
        debug!(width, height, "Converting RGB float to RGBA");

        let rgb_planes = planar_from_interleaved(rgb)?;
        trace!(width, height, "pipeline::split");

        let ycbcr_planes = apply_matrix(&rgb_planes, &self.options.forward_matrix)?;
        drop(rgb_planes);
        trace!(width, height, "pipeline::matrix");

        let ycbcr_f = interleaved_from_planar(&ycbcr_planes, &CR_YP_CB_ORDER)?;
        trace!(width, height, "pipeline::merge");

        let ycbcr8 = float_to_uint8(
            &ycbcr_f,
            &self.options.value_max,
            &self.options.value_min,
            self.options.dither,
        )?;
        drop(ycbcr_f);
        trace!(width, height, "pipeline::quantize");

        let rgba = convert_ycbcr_to_rgba(
            &ycbcr8,
            &self.descriptor,
            self.options.permute_map,
            self.options.alpha,
        )?;
        trace!(width, height, "pipeline::ycbcr_to_rgba");

        Ok(PipelineOutput {
            ycbcr_planes,
            ycbcr8,
            rgba,
        })
    }

    /// Converts images one by one, `stop` is polled before each image and never inside one.
    ///
    /// Results of images finished before a stop are dropped with the error.
    pub fn run_batch(
        &self,
        images: &[PixelBuffer<f32>],
        stop: &dyn Stop,
    ) -> Result<Vec<PixelBuffer<u8>>, YuvError> {
        let mut results = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            stop.check().map_err(|reason| {
                debug!(index, ?reason, "Batch stopped");
                YuvError::Cancelled
            })?;
            results.push(self.run(image)?.rgba);
        }
        Ok(results)
    }
}

/// Builds a [Pipeline] for `options` and runs it once
pub fn run_pipeline(
    rgb: &PixelBuffer<f32>,
    options: &PipelineOptions,
) -> Result<PipelineOutput, YuvError> {
    Pipeline::new(options.clone())?.run(rgb)
}

/// Builds a [Pipeline] for `options` and converts `images` with [Pipeline::run_batch]
pub fn run_batch(
    images: &[PixelBuffer<f32>],
    options: &PipelineOptions,
    stop: &dyn Stop,
) -> Result<Vec<PixelBuffer<u8>>, YuvError> {
    Pipeline::new(options.clone())?.run_batch(images, stop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use enough::{StopReason, Unstoppable};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn rgb_pixel(r: f32, g: f32, b: f32) -> PixelBuffer<f32> {
        PixelBuffer::from_vec(vec![r, g, b], 1, 1, 3, 3).unwrap()
    }

    #[test]
    fn test_pure_red_end_to_end() {
        let output = run_pipeline(&rgb_pixel(1., 0., 0.), &PipelineOptions::default()).unwrap();
        assert_eq!(output.ycbcr_planes.plane(0).as_slice(), &[0.299f32]);
        assert_eq!(output.ycbcr_planes.plane(1).as_slice(), &[-0.169f32 + 0.5]);
        assert_eq!(output.ycbcr_planes.plane(2).as_slice(), &[1.0f32]);
        // Cr, Y', Cb
        assert_eq!(output.ycbcr8.as_slice(), &[255, 76, 84]);
        assert_eq!(output.rgba.as_slice(), &[255, 0, 0, 255]);
    }

    #[test]
    fn test_gray_survives_all_standards() {
        for matrix in [
            YuvStandardMatrix::Bt601,
            YuvStandardMatrix::Bt709,
            YuvStandardMatrix::Bt2020,
        ] {
            for range in [YuvRange::Full, YuvRange::Limited] {
                let options = PipelineOptions::for_standard(matrix, range).unwrap();
                let output = run_pipeline(&rgb_pixel(0.6, 0.6, 0.6), &options).unwrap();
                // neutral chroma sits on a rounding tie
                for &v in &output.rgba.as_slice()[..3] {
                    assert!((v as i32 - 153).abs() <= 2, "{:?} {:?} {}", matrix, range, v);
                }
                assert_eq!(output.rgba.as_slice()[3], 255);
            }
        }
    }

    #[test]
    fn test_rejects_non_rgb_input() {
        let src = PixelBuffer::<f32>::alloc(2, 2, 4).unwrap();
        let err = run_pipeline(&src, &PipelineOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn test_rejects_three_channel_destination() {
        let options = PipelineOptions {
            dst_format: YuvSourceChannels::Rgb,
            ..PipelineOptions::default()
        };
        assert_eq!(
            Pipeline::new(options).unwrap_err().kind(),
            ErrorKind::UnsupportedFormat
        );
    }

    struct StopAfter {
        remaining: AtomicUsize,
    }

    impl Stop for StopAfter {
        fn check(&self) -> Result<(), StopReason> {
            let left = self.remaining.load(Ordering::SeqCst);
            if left == 0 {
                return Err(StopReason::Cancelled);
            }
            self.remaining.store(left - 1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_batch_runs_every_image() {
        let pipeline = Pipeline::new(PipelineOptions::default()).unwrap();
        let images = vec![rgb_pixel(1., 0., 0.), rgb_pixel(0.5, 0.5, 0.5)];
        let results = pipeline.run_batch(&images, &Unstoppable).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_slice(), &[255, 0, 0, 255]);
    }

    #[test]
    fn test_batch_stops_between_images() {
        let pipeline = Pipeline::new(PipelineOptions::default()).unwrap();
        let images = vec![rgb_pixel(1., 0., 0.); 3];
        let stop = StopAfter {
            remaining: AtomicUsize::new(2),
        };
        let err = pipeline.run_batch(&images, &stop).unwrap_err();
        assert_eq!(err, YuvError::Cancelled);
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_batch_stopped_before_first_image() {
        let stop = StopAfter {
            remaining: AtomicUsize::new(0),
        };
        let images = vec![rgb_pixel(0., 0., 1.)];
        let err = run_batch(&images, &PipelineOptions::default(), &stop).unwrap_err();
        assert_eq!(err, YuvError::Cancelled);
        assert!(run_batch(&[], &PipelineOptions::default(), &stop)
            .unwrap()
            .is_empty());
    }
}
