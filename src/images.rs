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
use crate::yuv_error::{
    check_buffer_layout, check_channels, check_overflow_v2, check_overflow_v3, check_same_shape,
    MismatchedSize,
};
use crate::YuvError;
use std::fmt::Debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// Storage type of a single sample
pub enum ElementType {
    Float32,
    UInt8,
}

impl ElementType {
    #[inline]
    pub const fn size_of(&self) -> usize {
        match self {
            ElementType::Float32 => 4,
            ElementType::UInt8 => 1,
        }
    }
}

/// Sample types a [PixelBuffer] may hold
pub trait PixelSample: Copy + Default + Debug + PartialEq + Send + Sync + 'static {
    const ELEMENT_TYPE: ElementType;
}

impl PixelSample for f32 {
    const ELEMENT_TYPE: ElementType = ElementType::Float32;
}

impl PixelSample for u8 {
    const ELEMENT_TYPE: ElementType = ElementType::UInt8;
}

#[derive(Debug, Clone, PartialEq)]
/// Owned image storage, interleaved when `channels > 1`.
///
/// Rows are `stride` elements apart; only the first `width * channels` elements
/// of each row carry samples, the rest is padding that is never read.
pub struct PixelBuffer<T: PixelSample> {
    data: Vec<T>,
    /// Stride here always means Elements per row.
    stride: usize,
    width: u32,
    height: u32,
    channels: usize,
}

impl<T: PixelSample> PixelBuffer<T> {
    /// Allocates zero-initialized buffer with tightly packed rows
    pub fn alloc(width: u32, height: u32, channels: usize) -> Result<Self, YuvError> {
        let stride = check_overflow_v2(width as usize, channels)?;
        Self::alloc_with_stride(width, height, channels, stride)
    }

    /// Allocates zero-initialized buffer with `stride` elements per row
    pub fn alloc_with_stride(
        width: u32,
        height: u32,
        channels: usize,
        stride: usize,
    ) -> Result<Self, YuvError> {
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
        let length = check_overflow_v2(stride, height as usize)?;
        check_overflow_v2(length, T::ELEMENT_TYPE.size_of())?;
        let data = vec![T::default(); length];
        Ok(PixelBuffer {
            data,
            stride,
            width,
            height,
            channels,
        })
    }

    /// Allocates zero-initialized buffer whose row size in bytes is rounded up
    /// to a multiple of `alignment` bytes.
    ///
    /// `alignment` must be a multiple of the element size.
    pub fn alloc_aligned(
        width: u32,
        height: u32,
        channels: usize,
        alignment: usize,
    ) -> Result<Self, YuvError> {
        let element_size = T::ELEMENT_TYPE.size_of();
        if alignment == 0 || alignment % element_size != 0 {
            return Err(YuvError::InvalidAlignment(MismatchedSize {
                expected: element_size,
                received: alignment,
            }));
        }
        let row_bytes = check_overflow_v3(width as usize, channels, element_size)?;
        let aligned_bytes = row_bytes
            .checked_next_multiple_of(alignment)
            .ok_or(YuvError::PointerOverflow)?;
        Self::alloc_with_stride(width, height, channels, aligned_bytes / element_size)
    }

    /// Wraps storage produced elsewhere, e.g. by an image decoder.
    ///
    /// Storage beyond `stride * height` elements is dropped.
    pub fn from_vec(
        mut data: Vec<T>,
        width: u32,
        height: u32,
        stride: usize,
        channels: usize,
    ) -> Result<Self, YuvError> {
        check_buffer_layout(&data, stride, width, height, channels)?;
        data.truncate(stride * height as usize);
        Ok(PixelBuffer {
            data,
            stride,
            width,
            height,
            channels,
        })
    }

    pub fn check_constraints(&self) -> Result<(), YuvError> {
        check_buffer_layout(
            &self.data,
            self.stride,
            self.width,
            self.height,
            self.channels,
        )
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Elements per row, padding included
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn row_stride_bytes(&self) -> usize {
        self.stride * T::ELEMENT_TYPE.size_of()
    }

    #[inline]
    pub fn element_type(&self) -> ElementType {
        T::ELEMENT_TYPE
    }

    #[inline]
    pub fn bits_per_pixel(&self) -> usize {
        self.channels * T::ELEMENT_TYPE.size_of() * 8
    }

    /// Number of live samples in one row
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Live samples of row `y`, padding excluded
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.row_len()]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        let row_len = self.row_len();
        &mut self.data[start..start + row_len]
    }

    /// Iterates over live samples of every row
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        let row_len = self.row_len();
        self.data
            .chunks_exact(self.stride)
            .take(self.height as usize)
            .map(move |row| &row[..row_len])
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> + '_ {
        let row_len = self.row_len();
        let height = self.height as usize;
        self.data
            .chunks_exact_mut(self.stride)
            .take(height)
            .map(move |row| &mut row[..row_len])
    }

    /// Sample at column `x`, row `y`, channel `c`
    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> T {
        self.data[y * self.stride + x * self.channels + c]
    }

    /// Copies live samples into a new buffer with tight rows
    pub fn to_packed(&self) -> PixelBuffer<T> {
        let mut data = Vec::with_capacity(self.row_len() * self.height as usize);
        for row in self.rows() {
            data.extend_from_slice(row);
        }
        PixelBuffer {
            data,
            stride: self.row_len(),
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Ordered set of single channel planes sharing width and height.
///
/// Each plane keeps its own stride.
pub struct PlaneSet<T: PixelSample> {
    planes: Vec<PixelBuffer<T>>,
}

impl<T: PixelSample> PlaneSet<T> {
    /// Allocates `count` tightly packed planes
    pub fn alloc(count: usize, width: u32, height: u32) -> Result<Self, YuvError> {
        if count == 0 {
            return Err(YuvError::ZeroBaseSize);
        }
        let planes = (0..count)
            .map(|_| PixelBuffer::alloc(width, height, 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PlaneSet { planes })
    }

    /// Allocates `strides.len()` planes, plane `i` rows being `strides[i]` elements apart
    pub fn alloc_with_strides(width: u32, height: u32, strides: &[usize]) -> Result<Self, YuvError> {
        if strides.is_empty() {
            return Err(YuvError::ZeroBaseSize);
        }
        let planes = strides
            .iter()
            .map(|&stride| PixelBuffer::alloc_with_stride(width, height, 1, stride))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PlaneSet { planes })
    }

    pub fn from_planes(planes: Vec<PixelBuffer<T>>) -> Result<Self, YuvError> {
        let first = planes.first().ok_or(YuvError::ZeroBaseSize)?;
        let (width, height) = (first.width(), first.height());
        for plane in planes.iter() {
            check_channels(1, plane.channels())?;
            check_same_shape(width, height, plane.width(), plane.height())?;
            plane.check_constraints()?;
        }
        Ok(PlaneSet { planes })
    }

    pub fn check_constraints(&self) -> Result<(), YuvError> {
        let first = self.planes.first().ok_or(YuvError::ZeroBaseSize)?;
        for plane in self.planes.iter() {
            check_channels(1, plane.channels())?;
            check_same_shape(first.width(), first.height(), plane.width(), plane.height())?;
            plane.check_constraints()?;
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.planes[0].width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.planes[0].height()
    }

    #[inline]
    pub fn planes(&self) -> &[PixelBuffer<T>] {
        &self.planes
    }

    #[inline]
    pub(crate) fn planes_mut(&mut self) -> &mut [PixelBuffer<T>] {
        &mut self.planes
    }

    #[inline]
    pub fn plane(&self, index: usize) -> &PixelBuffer<T> {
        &self.planes[index]
    }

    /// Mutable storage of plane `index`, rows `plane(index).stride()` elements apart.
    ///
    /// Only samples are exposed so every plane keeps its shape.
    #[inline]
    pub fn plane_mut(&mut self, index: usize) -> &mut [T] {
        self.planes[index].as_mut_slice()
    }

    /// Live samples of every row of plane `index`
    pub fn plane_rows_mut(&mut self, index: usize) -> impl Iterator<Item = &mut [T]> + '_ {
        self.planes[index].rows_mut()
    }

    pub fn into_planes(self) -> Vec<PixelBuffer<T>> {
        self.planes
    }
}
