//! Monitor enumeration and screen capture into uncompressed 24-bit BMP images.
//!
//! ```no_run
//! # #[cfg(target_os = "windows")]
//! # fn main() -> bmpshot::ShotResult<()> {
//! use bmpshot::{CaptureLoopOptions, Screens};
//!
//! let screens = Screens::gdi();
//! let monitor = screens.describe(0)?;
//! screens.capture_to_file(&monitor, "screen-0.bmp")?;
//!
//! let capture_loop = screens.start_continuous_capture(&monitor, CaptureLoopOptions::default())?;
//! let frame = capture_loop.get_latest()?;
//! println!("{}x{}", frame.width(), frame.height());
//! # Ok(())
//! # }
//! # #[cfg(not(target_os = "windows"))]
//! # fn main() {}
//! ```

mod bitmap;
mod capture_loop;
mod capturer;
mod error;
mod frame;
mod monitor;
mod options;
mod registry;
mod screen;
mod utils;

#[cfg(target_os = "windows")]
#[path = "windows/mod.rs"]
mod platform;

#[cfg(test)]
mod test_utils;

pub use bitmap::{
    BITS_PER_PIXEL, BitmapEncoder, FILE_HEADER_LEN, INFO_HEADER_LEN, PIXEL_DATA_OFFSET,
};
pub use capture_loop::CaptureLoop;
pub use capturer::{CaptureBackend, CaptureEngine};
pub use error::{ShotError, ShotResult};
pub use frame::{BYTES_PER_PIXEL, RawFrame};
pub use monitor::{
    DEVICE_PATH_PREFIX, MONITORINFOF_PRIMARY, MonitorDescriptor, MonitorHandle, MonitorInfo,
    MonitorProvider, Rect,
};
pub use options::CaptureLoopOptions;
pub use registry::MonitorRegistry;
pub use screen::Screens;

#[cfg(target_os = "windows")]
pub use platform::{capture::GdiCaptureBackend, impl_monitor::GdiMonitorProvider};
