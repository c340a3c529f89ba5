use image::RgbImage;

use crate::{
    error::{ShotError, ShotResult},
    utils::image::bgr_to_rgb_image,
};

/// Bytes per pixel of a [`RawFrame`] (blue, green, red).
pub const BYTES_PER_PIXEL: usize = 3;

/// One captured image: tightly packed, top-down BGR rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RawFrame {
    /// Fails with `InvalidRegion` for a zero dimension and with `Capture` when
    /// `pixels` is not exactly `width * height * 3` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> ShotResult<RawFrame> {
        if width == 0 || height == 0 {
            return Err(ShotError::invalid_region(width, height));
        }

        let expected = packed_len(width, height);
        if pixels.len() != expected {
            return Err(ShotError::Capture(format!(
                "pixel buffer is {} bytes, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }

        Ok(RawFrame {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Length in bytes of one unpadded row.
    pub fn row_len(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// The `y`-th row counted from the top.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.row_len();

        Some(&self.pixels[start..start + self.row_len()])
    }

    /// Blue, green and red values of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        let start = x as usize * BYTES_PER_PIXEL;

        Some([row[start], row[start + 1], row[start + 2]])
    }

    /// Converts to an RGB image for callers working with the `image` crate.
    pub fn to_rgb_image(&self) -> ShotResult<RgbImage> {
        bgr_to_rgb_image(self.width, self.height, &self.pixels)
    }
}

pub(crate) fn packed_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}
