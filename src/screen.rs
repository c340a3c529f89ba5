use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    bitmap::BitmapEncoder,
    capture_loop::CaptureLoop,
    capturer::{CaptureBackend, CaptureEngine},
    error::ShotResult,
    frame::RawFrame,
    monitor::{MonitorDescriptor, MonitorProvider},
    options::CaptureLoopOptions,
    registry::MonitorRegistry,
};

/// Monitor queries and captures over one provider and one capture backend.
///
/// Every query enumerates the monitors again. Hold on to a
/// [`MonitorRegistry`] from [`Screens::registry`] to cache explicitly.
#[derive(Debug, Clone, Default)]
pub struct Screens<P, B> {
    provider: P,
    engine: CaptureEngine<B>,
    encoder: BitmapEncoder,
}

impl<P, B> Screens<P, B> {
    pub fn new(provider: P, backend: B) -> Screens<P, B> {
        Screens {
            provider,
            engine: CaptureEngine::new(backend),
            encoder: BitmapEncoder::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn engine(&self) -> &CaptureEngine<B> {
        &self.engine
    }
}

#[cfg(target_os = "windows")]
impl Screens<crate::GdiMonitorProvider, crate::GdiCaptureBackend> {
    /// Screens backed by GDI monitor enumeration and `BitBlt`.
    pub fn gdi() -> Self {
        Screens::new(crate::GdiMonitorProvider, crate::GdiCaptureBackend)
    }
}

impl<P: MonitorProvider, B> Screens<P, B> {
    /// A freshly enumerated registry.
    pub fn registry(&self) -> ShotResult<MonitorRegistry> {
        MonitorRegistry::build(&self.provider)
    }

    pub fn list_available_indices(&self) -> ShotResult<Vec<usize>> {
        Ok(self.registry()?.available_indices())
    }

    pub fn describe(&self, index: usize) -> ShotResult<MonitorDescriptor> {
        Ok(self.registry()?.resolve(index)?.clone())
    }
}

impl<P, B: CaptureBackend> Screens<P, B> {
    pub fn capture(&self, descriptor: &MonitorDescriptor) -> ShotResult<RawFrame> {
        self.engine.capture_monitor(descriptor)
    }

    /// Captures the monitor and encodes it as a BMP file in memory.
    pub fn screenshot(&self, descriptor: &MonitorDescriptor) -> ShotResult<Vec<u8>> {
        let frame = self.capture(descriptor)?;

        self.encoder.encode(&frame)
    }

    /// Captures the monitor and writes it to `path` as a BMP file.
    pub fn capture_to_file<T: AsRef<Path>>(
        &self,
        descriptor: &MonitorDescriptor,
        path: T,
    ) -> ShotResult<()> {
        let frame = self.capture(descriptor)?;

        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.encoder.write_to(&frame, &mut writer)?;
        writer.flush()?;

        log::debug!(
            "wrote {}x{} capture of {} to {}",
            frame.width(),
            frame.height(),
            descriptor.device_name(),
            path.as_ref().display()
        );

        Ok(())
    }
}

impl<P, B: CaptureBackend + Clone + Send + 'static> Screens<P, B> {
    /// Starts a background loop bound to the monitor's current bounds.
    pub fn start_continuous_capture(
        &self,
        descriptor: &MonitorDescriptor,
        options: CaptureLoopOptions,
    ) -> ShotResult<CaptureLoop> {
        CaptureLoop::start(self.engine.clone(), descriptor.bounds(), options)
    }
}
