use image::RgbImage;

use crate::error::{ShotError, ShotResult};

pub fn vec_to_rgb_image(width: u32, height: u32, buf: Vec<u8>) -> ShotResult<RgbImage> {
    RgbImage::from_vec(width, height, buf).ok_or_else(|| ShotError::new("buffer not big enough"))
}

pub fn bgr_to_rgb_image(width: u32, height: u32, buf: &[u8]) -> ShotResult<RgbImage> {
    let mut rgb_buf = buf.to_vec();

    for pixel in rgb_buf.chunks_exact_mut(3) {
        pixel.swap(0, 2);
    }
    vec_to_rgb_image(width, height, rgb_buf)
}

/// Length of one 24-bit row padded to the 4-byte boundary DIBs require.
pub fn padded_row_len(width: usize) -> usize {
    (width * 3 + 3) & !3
}

/// GDI pads every 24-bit DIB row up to a multiple of 4 bytes.
#[cfg(any(target_os = "windows", test))]
pub fn remove_extra_data(
    width: usize,
    height: usize,
    bytes_per_row: usize,
    buf: Vec<u8>,
) -> Vec<u8> {
    let row_len = width * 3;
    if bytes_per_row == row_len {
        return buf;
    }

    let mut result = Vec::with_capacity(row_len * height);
    for row in buf.chunks_exact(bytes_per_row).take(height) {
        result.extend_from_slice(&row[..row_len]);
    }

    result
}
