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
#![deny(unsafe_code)]
mod built_coefficients;
mod color_matrix;
mod images;
mod layout;
mod numerics;
mod pipeline;
mod quantize;
mod ycbcr_to_rgba;
mod yuv_error;
mod yuv_support;

pub use yuv_error::ErrorKind;
pub use yuv_error::MismatchedShape;
pub use yuv_error::MismatchedSize;
pub use yuv_error::YuvError;

pub use images::ElementType;
pub use images::PixelBuffer;
pub use images::PixelSample;
pub use images::PlaneSet;

pub use yuv_support::get_forward_transform;
pub use yuv_support::get_inverse_transform;
pub use yuv_support::get_yuv_range;
pub use yuv_support::CbCrForwardTransform;
pub use yuv_support::CbCrInverseTransform;
pub use yuv_support::YuvBias;
pub use yuv_support::YuvChromaRange;
pub use yuv_support::YuvPacked444Format;
pub use yuv_support::YuvRange;
pub use yuv_support::YuvSourceChannels;
pub use yuv_support::YuvStandardMatrix;

pub use built_coefficients::JPEG_BT601_POST_BIAS;
pub use built_coefficients::JPEG_BT601_PRE_BIAS;
pub use built_coefficients::JPEG_BT601_RGB_TO_YCBCR;

pub use layout::interleaved_from_planar;
pub use layout::merge_planar_to_interleaved;
pub use layout::planar_from_interleaved;
pub use layout::split_interleaved_to_planar;

pub use color_matrix::apply_matrix;
pub use color_matrix::apply_matrix_into;
pub use color_matrix::ColorMatrix;

pub use quantize::float_to_uint8;
pub use quantize::float_to_uint8_into;
pub use quantize::uint8_to_float;
pub use quantize::DitherMode;

pub use ycbcr_to_rgba::build_descriptor;
pub use ycbcr_to_rgba::convert_ycbcr_to_rgba;
pub use ycbcr_to_rgba::convert_ycbcr_to_rgba_into;
pub use ycbcr_to_rgba::YCbCrPixelRange;
pub use ycbcr_to_rgba::YCbCrToRgbaDescriptor;

pub use pipeline::run_batch;
pub use pipeline::run_pipeline;
pub use pipeline::Pipeline;
pub use pipeline::PipelineOptions;
pub use pipeline::PipelineOutput;
pub use pipeline::CR_YP_CB_ORDER;
