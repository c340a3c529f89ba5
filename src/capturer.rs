use std::sync::Arc;

use crate::{
    error::{ShotError, ShotResult},
    frame::{RawFrame, packed_len},
    monitor::{MonitorDescriptor, Rect},
};

/// Copies a region of the virtual desktop into memory.
pub trait CaptureBackend {
    /// Returns `width * height` pixels starting at (`x`, `y`) as tightly packed,
    /// top-down BGR rows. `width` and `height` are always positive.
    fn blit(&self, x: i32, y: i32, width: i32, height: i32) -> ShotResult<Vec<u8>>;
}

impl<B: CaptureBackend + ?Sized> CaptureBackend for &B {
    fn blit(&self, x: i32, y: i32, width: i32, height: i32) -> ShotResult<Vec<u8>> {
        (**self).blit(x, y, width, height)
    }
}

impl<B: CaptureBackend + ?Sized> CaptureBackend for Box<B> {
    fn blit(&self, x: i32, y: i32, width: i32, height: i32) -> ShotResult<Vec<u8>> {
        (**self).blit(x, y, width, height)
    }
}

impl<B: CaptureBackend + ?Sized> CaptureBackend for Arc<B> {
    fn blit(&self, x: i32, y: i32, width: i32, height: i32) -> ShotResult<Vec<u8>> {
        (**self).blit(x, y, width, height)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaptureEngine<B> {
    backend: B,
}

impl<B> CaptureEngine<B> {
    pub fn new(backend: B) -> CaptureEngine<B> {
        CaptureEngine { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: CaptureBackend> CaptureEngine<B> {
    /// Captures `bounds` of the virtual desktop, one pixel to one pixel.
    pub fn capture(&self, bounds: Rect) -> ShotResult<RawFrame> {
        // positive and small enough for the backend's i32 arguments
        let dimensions = (
            i32::try_from(bounds.width()),
            i32::try_from(bounds.height()),
        );
        let (width, height) = match dimensions {
            (Ok(width), Ok(height)) if width > 0 && height > 0 => (width, height),
            _ => return Err(ShotError::invalid_region(bounds.width(), bounds.height())),
        };

        let pixels = self.backend.blit(bounds.left, bounds.top, width, height)?;

        let expected = packed_len(width as u32, height as u32);
        if pixels.len() != expected {
            return Err(ShotError::Capture(format!(
                "backend returned {} bytes for a {}x{} region, expected {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }

        RawFrame::new(width as u32, height as u32, pixels)
    }

    /// Capture image of the monitor
    pub fn capture_monitor(&self, descriptor: &MonitorDescriptor) -> ShotResult<RawFrame> {
        self.capture(descriptor.bounds())
    }
}
