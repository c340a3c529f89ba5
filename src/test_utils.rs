use std::{
    collections::HashSet,
    sync::{
        Arc, Condvar, Mutex,
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    },
};

use crate::{
    capturer::CaptureBackend,
    error::{ShotError, ShotResult},
    frame::RawFrame,
    monitor::{MONITORINFOF_PRIMARY, MonitorHandle, MonitorInfo, MonitorProvider, Rect},
};

/// In-memory display topology.
#[derive(Debug, Default)]
pub struct FakeProvider {
    monitors: Mutex<Vec<(MonitorHandle, MonitorInfo)>>,
    stale: HashSet<MonitorHandle>,
}

impl FakeProvider {
    pub fn new(monitors: Vec<MonitorInfo>) -> FakeProvider {
        let monitors = monitors
            .into_iter()
            .enumerate()
            .map(|(i, info)| (MonitorHandle::from_raw(0x1000 + i as isize), info))
            .collect();

        FakeProvider {
            monitors: Mutex::new(monitors),
            stale: HashSet::new(),
        }
    }

    pub fn three_monitors() -> FakeProvider {
        FakeProvider::new(vec![
            monitor_info(r"\\.\DISPLAY1", Rect::new(0, 0, 1920, 1080), true),
            monitor_info(r"\\.\DISPLAY2", Rect::new(-1280, 0, 0, 1024), false),
            monitor_info(r"\\.\DISPLAY3", Rect::new(1920, 0, 4480, 1440), false),
        ])
    }

    /// Handle `position` is still enumerated but can no longer be queried.
    pub fn with_stale(mut self, position: usize) -> FakeProvider {
        let handle = self.monitors.get_mut().unwrap()[position].0;
        self.stale.insert(handle);
        self
    }

    pub fn disconnect(&self, position: usize) {
        self.monitors.lock().unwrap().remove(position);
    }
}

impl MonitorProvider for FakeProvider {
    fn enumerate(&self) -> ShotResult<Vec<MonitorHandle>> {
        Ok(self.monitors.lock()?.iter().map(|(handle, _)| *handle).collect())
    }

    fn query_info(&self, handle: MonitorHandle) -> ShotResult<MonitorInfo> {
        if self.stale.contains(&handle) {
            return Err(ShotError::PlatformQuery(format!("stale handle {:?}", handle)));
        }

        self.monitors
            .lock()?
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, info)| info.clone())
            .ok_or_else(|| ShotError::PlatformQuery(format!("unknown handle {:?}", handle)))
    }
}

pub fn monitor_info(device_name: &str, bounds: Rect, is_primary: bool) -> MonitorInfo {
    MonitorInfo {
        bounds,
        work_area: Rect::new(bounds.left, bounds.top, bounds.right, bounds.bottom - 40),
        flags: if is_primary { MONITORINFOF_PRIMARY } else { 0 },
        device_name: device_name.to_string(),
    }
}

/// BGR value `PatternBackend` produces at desktop coordinate (`x`, `y`).
pub fn pattern_pixel(x: i32, y: i32) -> [u8; 3] {
    [x as u8, y as u8, (x + y) as u8]
}

/// Paints every pixel from its desktop coordinates.
#[derive(Debug, Clone, Default)]
pub struct PatternBackend {
    calls: Arc<AtomicUsize>,
}

impl PatternBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CaptureBackend for PatternBackend {
    fn blit(&self, x: i32, y: i32, width: i32, height: i32) -> ShotResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for row in y..y + height {
            for column in x..x + width {
                pixels.extend_from_slice(&pattern_pixel(column, row));
            }
        }
        Ok(pixels)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FailingBackend;

impl CaptureBackend for FailingBackend {
    fn blit(&self, _: i32, _: i32, _: i32, _: i32) -> ShotResult<Vec<u8>> {
        Err(ShotError::Capture("BitBlt failed".to_string()))
    }
}

/// Stamps a capture counter into the first 8 bytes of every frame. Regions
/// need at least 3 pixels.
///
/// While closed, every blit blocks until the gate opens. While failing,
/// every blit returns a capture error.
#[derive(Debug, Clone)]
pub struct SequenceBackend {
    counter: Arc<AtomicU64>,
    gate: Arc<(Mutex<bool>, Condvar)>,
    failing: Arc<AtomicBool>,
}

impl Default for SequenceBackend {
    fn default() -> Self {
        SequenceBackend {
            counter: Arc::new(AtomicU64::new(0)),
            gate: Arc::new((Mutex::new(true), Condvar::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl SequenceBackend {
    pub fn closed() -> SequenceBackend {
        let backend = SequenceBackend::default();
        *backend.gate.0.lock().unwrap() = false;
        backend
    }

    pub fn open(&self) {
        let (open, condvar) = &*self.gate;
        *open.lock().unwrap() = true;
        condvar.notify_all();
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn captures(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

impl CaptureBackend for SequenceBackend {
    fn blit(&self, _: i32, _: i32, width: i32, height: i32) -> ShotResult<Vec<u8>> {
        {
            let (open, condvar) = &*self.gate;
            let mut open = open.lock()?;
            while !*open {
                open = condvar.wait(open)?;
            }
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(ShotError::Capture("simulated capture failure".to_string()));
        }

        let sequence = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let mut pixels = vec![0u8; (width * height * 3) as usize];
        pixels[..8].copy_from_slice(&sequence.to_le_bytes());
        Ok(pixels)
    }
}

pub fn frame_sequence(frame: &RawFrame) -> u64 {
    u64::from_le_bytes(frame.pixels()[..8].try_into().unwrap())
}
