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
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedShape {
    pub expected_width: u32,
    pub expected_height: u32,
    pub received_width: u32,
    pub received_height: u32,
}

/// Coarse classification of [YuvError], one per failure family a caller may branch on
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Bad dimensions or byte size overflow
    Allocation,
    /// Width, height or channel count disagree between cooperating buffers
    ShapeMismatch,
    /// Degenerate clamp or pixel range
    Range,
    /// No descriptor for the requested standard and format pair
    UnsupportedFormat,
    /// Batch was stopped between images
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum YuvError {
    ZeroBaseSize,
    PointerOverflow,
    BufferSizeMismatch(MismatchedSize),
    StrideTooSmall(MismatchedSize),
    InvalidAlignment(MismatchedSize),
    ShapeMismatch(MismatchedShape),
    ChannelsMismatch(MismatchedSize),
    PlaneCountMismatch(MismatchedSize),
    MatrixShapeMismatch(MismatchedSize),
    InvalidChannelOrder,
    InvalidRange { channel: usize, min: f32, max: f32 },
    InvalidPixelRange,
    UnsupportedFormat(&'static str),
    Cancelled,
}

impl YuvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            YuvError::ZeroBaseSize | YuvError::PointerOverflow | YuvError::InvalidAlignment(_) => {
                ErrorKind::Allocation
            }
            YuvError::BufferSizeMismatch(_)
            | YuvError::StrideTooSmall(_)
            | YuvError::ShapeMismatch(_)
            | YuvError::ChannelsMismatch(_)
            | YuvError::PlaneCountMismatch(_)
            | YuvError::MatrixShapeMismatch(_)
            | YuvError::InvalidChannelOrder => ErrorKind::ShapeMismatch,
            YuvError::InvalidRange { .. } | YuvError::InvalidPixelRange => ErrorKind::Range,
            YuvError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            YuvError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl Display for YuvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YuvError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            YuvError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            YuvError::BufferSizeMismatch(size) => f.write_fmt(format_args!(
                "Buffer must have size at least {} but it is {}",
                size.expected, size.received
            )),
            YuvError::StrideTooSmall(size) => f.write_fmt(format_args!(
                "Row stride must be at least {} elements, but it was {}",
                size.expected, size.received
            )),
            YuvError::InvalidAlignment(size) => f.write_fmt(format_args!(
                "Row alignment must be a non-zero multiple of {} bytes, but it was {}",
                size.expected, size.received
            )),
            YuvError::ShapeMismatch(shape) => f.write_fmt(format_args!(
                "Image shape mismatch: expected {}x{}, received {}x{}",
                shape.expected_width,
                shape.expected_height,
                shape.received_width,
                shape.received_height
            )),
            YuvError::ChannelsMismatch(size) => f.write_fmt(format_args!(
                "Channels count mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            YuvError::PlaneCountMismatch(size) => f.write_fmt(format_args!(
                "Planes count mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            YuvError::MatrixShapeMismatch(size) => f.write_fmt(format_args!(
                "Matrix table has invalid length, it must be {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::InvalidChannelOrder => {
                f.write_str("Channel order must be a permutation of the channel indices")
            }
            YuvError::InvalidRange { channel, min, max } => f.write_fmt(format_args!(
                "Channel {} has degenerate range: min={}, max={}",
                channel, min, max
            )),
            YuvError::InvalidPixelRange => {
                f.write_str("YCbCr pixel range has its maximum not above its bias")
            }
            YuvError::UnsupportedFormat(what) => {
                f.write_fmt(format_args!("Unsupported conversion: {}", what))
            }
            YuvError::Cancelled => f.write_str("Conversion was cancelled"),
        }
    }
}

impl Error for YuvError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<usize, YuvError> {
    v0.checked_mul(v1).ok_or(YuvError::PointerOverflow)
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<usize, YuvError> {
    let product0 = check_overflow_v2(v0, v1)?;
    check_overflow_v2(product0, v2)
}

/// Validates that `data` holds `height` rows of `stride` elements,
/// each carrying at least `width * channels` live samples.
#[inline]
pub(crate) fn check_buffer_layout<V>(
    data: &[V],
    stride: usize,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), YuvError> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    let row_len = check_overflow_v2(width as usize, channels)?;
    if stride < row_len {
        return Err(YuvError::StrideTooSmall(MismatchedSize {
            expected: row_len,
            received: stride,
        }));
    }
    let full = check_overflow_v2(stride, height as usize)?;
    if data.len() < full {
        return Err(YuvError::BufferSizeMismatch(MismatchedSize {
            expected: full,
            received: data.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_same_shape(
    expected_width: u32,
    expected_height: u32,
    received_width: u32,
    received_height: u32,
) -> Result<(), YuvError> {
    if expected_width != received_width || expected_height != received_height {
        return Err(YuvError::ShapeMismatch(MismatchedShape {
            expected_width,
            expected_height,
            received_width,
            received_height,
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_channels(expected: usize, received: usize) -> Result<(), YuvError> {
    if expected != received {
        return Err(YuvError::ChannelsMismatch(MismatchedSize { expected, received }));
    }
    Ok(())
}

/// Channel order must name every index in `0..channels` exactly once
#[inline]
pub(crate) fn check_channel_order(order: &[usize], channels: usize) -> Result<(), YuvError> {
    if order.len() != channels {
        return Err(YuvError::InvalidChannelOrder);
    }
    let mut seen = [false; 64];
    if channels > seen.len() {
        return Err(YuvError::InvalidChannelOrder);
    }
    for &idx in order {
        if idx >= channels || seen[idx] {
            return Err(YuvError::InvalidChannelOrder);
        }
        seen[idx] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_layout_requires_padded_last_row() {
        let data = vec![0u8; 10 * 2 + 6];
        assert_eq!(
            check_buffer_layout(&data, 10, 2, 3, 3),
            Err(YuvError::BufferSizeMismatch(MismatchedSize {
                expected: 30,
                received: 26
            }))
        );
        let data = vec![0u8; 30];
        assert!(check_buffer_layout(&data, 10, 2, 3, 3).is_ok());
    }

    #[test]
    fn test_buffer_layout_rejects_zero() {
        let data = vec![0u8; 16];
        assert_eq!(
            check_buffer_layout(&data, 4, 0, 4, 1),
            Err(YuvError::ZeroBaseSize)
        );
        assert_eq!(
            check_buffer_layout(&data, 4, 4, 0, 1).unwrap_err().kind(),
            ErrorKind::Allocation
        );
    }

    #[test]
    fn test_buffer_layout_rejects_narrow_stride() {
        let data = vec![0f32; 64];
        let err = check_buffer_layout(&data, 5, 2, 2, 3).unwrap_err();
        assert_eq!(
            err,
            YuvError::StrideTooSmall(MismatchedSize {
                expected: 6,
                received: 5
            })
        );
    }

    #[test]
    fn test_overflow_detected() {
        assert_eq!(
            check_overflow_v3(usize::MAX, 2, 1),
            Err(YuvError::PointerOverflow)
        );
        assert_eq!(check_overflow_v3(3, 4, 5), Ok(60));
    }

    #[test]
    fn test_channel_order() {
        assert!(check_channel_order(&[2, 0, 1], 3).is_ok());
        assert!(check_channel_order(&[0, 0, 1], 3).is_err());
        assert!(check_channel_order(&[0, 1, 3], 3).is_err());
        assert!(check_channel_order(&[0, 1], 3).is_err());
    }
}
