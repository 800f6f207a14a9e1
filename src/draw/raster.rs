//! Background raster storage.
//!
//! Cairo surfaces are reference counted and tied to the thread that created
//! them, so imported backgrounds are kept as plain premultiplied ARGB32 bytes
//! and only wrapped in an [`ImageSurface`] for the duration of a render. This
//! keeps [`Raster`] cheap to clone into export snapshots.

use super::color::Color;
use cairo::{Context, Format, ImageSurface, Operator};
use std::io::Read;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while importing a background image.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Failed to read image: {0}")]
    Read(#[from] cairo::IoError),

    #[error("Surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),
}

/// An immutable, thread-safe bitmap in Cairo's native ARGB32 layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: i32,
    height: i32,
    stride: i32,
    data: Arc<[u8]>,
}

impl Raster {
    /// Copies the contents of any Cairo image surface, converting it to ARGB32.
    pub fn from_surface(surface: &ImageSurface) -> Result<Self, RasterError> {
        let width = surface.width();
        let height = surface.height();
        if width <= 0 || height <= 0 {
            return Err(RasterError::InvalidBuffer(format!(
                "surface has no area ({width}x{height})"
            )));
        }

        let mut converted = ImageSurface::create(Format::ARgb32, width, height)?;
        {
            let ctx = Context::new(&converted)?;
            ctx.set_operator(Operator::Source);
            ctx.set_source_surface(surface, 0.0, 0.0)?;
            ctx.paint()?;
        }
        converted.flush();

        let stride = converted.stride();
        let data = converted.data()?;
        Ok(Self {
            width,
            height,
            stride,
            data: Arc::from(&data[..]),
        })
    }

    /// Decodes a PNG stream into a raster.
    pub fn from_png<R: Read>(reader: &mut R) -> Result<Self, RasterError> {
        let surface = ImageSurface::create_from_png(reader)?;
        Self::from_surface(&surface)
    }

    /// Builds a raster from tightly packed, non-premultiplied RGBA8 pixels.
    ///
    /// This is the entry point for images decoded by an external picker.
    pub fn from_rgba8(width: u32, height: u32, pixels: &[u8]) -> Result<Self, RasterError> {
        let (w, h) = checked_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RasterError::InvalidBuffer(format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {}",
                pixels.len()
            )));
        }

        let stride = Format::ARgb32.stride_for_width(width)?;
        let mut data = vec![0u8; stride as usize * height as usize];
        for (row_index, row) in pixels.chunks_exact(width as usize * 4).enumerate() {
            let offset = row_index * stride as usize;
            for (col, px) in row.chunks_exact(4).enumerate() {
                let argb = premultiply(px[0], px[1], px[2], px[3]);
                let start = offset + col * 4;
                data[start..start + 4].copy_from_slice(&argb.to_ne_bytes());
            }
        }

        Ok(Self {
            width: w,
            height: h,
            stride,
            data: Arc::from(data),
        })
    }

    /// Creates a raster filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, RasterError> {
        checked_dimensions(width, height)?;
        let [a, r, g, b] = color.to_argb().to_be_bytes();
        let pixels: Vec<u8> = std::iter::repeat_n([r, g, b, a], width as usize * height as usize)
            .flatten()
            .collect();
        Self::from_rgba8(width, height, &pixels)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn stride(&self) -> i32 {
        self.stride
    }

    /// Raw premultiplied ARGB32 bytes, `stride * height` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reads the premultiplied `0xAARRGGBB` value of a single pixel.
    pub fn argb_at(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let start = y as usize * self.stride as usize + x as usize * 4;
        let bytes: [u8; 4] = self.data.get(start..start + 4)?.try_into().ok()?;
        Some(u32::from_ne_bytes(bytes))
    }

    /// Wraps a private copy of the pixels in a Cairo surface for painting.
    pub fn to_surface(&self) -> Result<ImageSurface, cairo::Error> {
        ImageSurface::create_for_data(
            self.data.to_vec(),
            Format::ARgb32,
            self.width,
            self.height,
            self.stride,
        )
    }
}

/// Largest side Cairo accepts for an image surface.
const MAX_SIDE: i32 = 32_767;

fn checked_dimensions(width: u32, height: u32) -> Result<(i32, i32), RasterError> {
    let valid = |side: u32| i32::try_from(side).ok().filter(|s| (1..=MAX_SIDE).contains(s));
    let w = valid(width);
    let h = valid(height);
    match (w, h) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(RasterError::InvalidBuffer(format!(
            "invalid dimensions {width}x{height}"
        ))),
    }
}

fn premultiply(r: u8, g: u8, b: u8, a: u8) -> u32 {
    let scale = |c: u8| ((c as u32 * a as u32 + 127) / 255) & 0xFF;
    ((a as u32) << 24) | (scale(r) << 16) | (scale(g) << 8) | scale(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    #[test]
    fn from_rgba8_premultiplies_alpha() {
        let raster = Raster::from_rgba8(2, 1, &[255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
        assert_eq!(raster.argb_at(0, 0), Some(0xFFFF0000));
        assert_eq!(raster.argb_at(1, 0), Some(0x80000080));
        assert_eq!(raster.argb_at(2, 0), None);
    }

    #[test]
    fn from_rgba8_rejects_short_buffers() {
        let err = Raster::from_rgba8(4, 4, &[0; 12]).unwrap_err();
        assert!(matches!(err, RasterError::InvalidBuffer(_)));
        assert!(Raster::from_rgba8(0, 4, &[]).is_err());
    }

    #[test]
    fn filled_rejects_oversized_dimensions_before_allocating() {
        for (width, height) in [(u32::MAX, 2), (40_000, 40_000), (0, 10)] {
            let err = Raster::filled(width, height, RED).unwrap_err();
            assert!(matches!(err, RasterError::InvalidBuffer(_)), "{width}x{height}");
        }
    }

    #[test]
    fn surface_round_trip_preserves_pixels() {
        let raster = Raster::filled(8, 6, BLUE).unwrap();
        let surface = raster.to_surface().unwrap();
        let copy = Raster::from_surface(&surface).unwrap();
        assert_eq!(copy, raster);
    }

    #[test]
    fn png_round_trip_preserves_opaque_pixels() {
        let raster = Raster::filled(5, 3, RED).unwrap();
        let surface = raster.to_surface().unwrap();
        let mut png = Vec::new();
        surface.write_to_png(&mut png).unwrap();

        let decoded = Raster::from_png(&mut png.as_slice()).unwrap();
        assert_eq!(decoded.width(), 5);
        assert_eq!(decoded.height(), 3);
        assert_eq!(decoded.argb_at(4, 2), Some(0xFFFF0000));
    }
}
