use std::io::Write;

use crate::{
    error::{ShotError, ShotResult},
    frame::RawFrame,
    utils::image::padded_row_len,
};

pub const FILE_HEADER_LEN: u32 = 14;
pub const INFO_HEADER_LEN: u32 = 40;
/// Offset of the first pixel byte in the file.
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_LEN + INFO_HEADER_LEN;
pub const BITS_PER_PIXEL: u16 = 24;

/// `BITMAPFILEHEADER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BitmapFileHeader {
    file_size: u32,
    pixel_data_offset: u32,
}

impl BitmapFileHeader {
    fn to_bytes(self) -> [u8; FILE_HEADER_LEN as usize] {
        let mut bytes = [0u8; FILE_HEADER_LEN as usize];
        bytes[0..2].copy_from_slice(b"BM");
        bytes[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        // bytes 6..10 are the two reserved words
        bytes[10..14].copy_from_slice(&self.pixel_data_offset.to_le_bytes());
        bytes
    }
}

/// `BITMAPINFOHEADER` for uncompressed 24-bit data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BitmapInfoHeader {
    width: i32,
    height: i32,
}

impl BitmapInfoHeader {
    fn to_bytes(self) -> [u8; INFO_HEADER_LEN as usize] {
        let mut bytes = [0u8; INFO_HEADER_LEN as usize];
        bytes[0..4].copy_from_slice(&INFO_HEADER_LEN.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.width.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.height.to_le_bytes());
        bytes[12..14].copy_from_slice(&1u16.to_le_bytes());
        bytes[14..16].copy_from_slice(&BITS_PER_PIXEL.to_le_bytes());
        // compression, image size, resolution and palette counts stay zero
        bytes
    }
}

/// Serializes frames into top-down, uncompressed 24-bit BMP files.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapEncoder;

impl BitmapEncoder {
    pub fn new() -> BitmapEncoder {
        BitmapEncoder
    }

    /// Total file size for a `width` x `height` image, headers included.
    pub fn encoded_len(width: u32, height: u32) -> usize {
        PIXEL_DATA_OFFSET as usize + height as usize * padded_row_len(width as usize)
    }

    pub fn encode(&self, frame: &RawFrame) -> ShotResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(Self::encoded_len(frame.width(), frame.height()));
        self.write_to(frame, &mut buffer)?;

        Ok(buffer)
    }

    pub fn write_to<W: Write>(&self, frame: &RawFrame, writer: &mut W) -> ShotResult<()> {
        let (file_header, info_header) = headers(frame)?;

        writer.write_all(&file_header.to_bytes())?;
        writer.write_all(&info_header.to_bytes())?;

        let padding = [0u8; 3];
        let padding_len = padded_row_len(frame.width() as usize) - frame.row_len();
        for row in frame.pixels().chunks_exact(frame.row_len()) {
            writer.write_all(row)?;
            writer.write_all(&padding[..padding_len])?;
        }

        Ok(())
    }
}

fn headers(frame: &RawFrame) -> ShotResult<(BitmapFileHeader, BitmapInfoHeader)> {
    let too_large = || ShotError::invalid_region(frame.width(), frame.height());

    let file_size = u32::try_from(BitmapEncoder::encoded_len(frame.width(), frame.height()))
        .map_err(|_| too_large())?;
    let width = i32::try_from(frame.width()).map_err(|_| too_large())?;
    let height = i32::try_from(frame.height()).map_err(|_| too_large())?;

    Ok((
        BitmapFileHeader {
            file_size,
            pixel_data_offset: PIXEL_DATA_OFFSET,
        },
        // negative height marks the rows as top-down
        BitmapInfoHeader {
            width,
            height: -height,
        },
    ))
}
