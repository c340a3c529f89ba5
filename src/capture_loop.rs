use std::{
    sync::{
        Arc, Condvar, Mutex, PoisonError,
        mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use scopeguard::guard;

use crate::{
    bitmap::BitmapEncoder,
    capturer::{CaptureBackend, CaptureEngine},
    error::{ShotError, ShotResult},
    frame::RawFrame,
    monitor::Rect,
    options::CaptureLoopOptions,
};

#[derive(Debug, Default)]
struct LatestSlot {
    frame: Option<Arc<RawFrame>>,
    sequence: u64,
    last_error: Option<Arc<ShotError>>,
    stopped: bool,
}

/// The latest-frame slot shared by the producer thread and its consumers.
/// Readiness is `frame.is_some()`, signalled through the condvar.
#[derive(Debug, Default)]
struct FrameWaker {
    slot: Mutex<LatestSlot>,
    condvar: Condvar,
}

impl FrameWaker {
    fn publish(&self, frame: RawFrame) -> ShotResult<()> {
        let mut slot = self.slot.lock()?;
        slot.frame = Some(Arc::new(frame));
        slot.sequence += 1;
        slot.last_error = None;
        self.condvar.notify_all();

        Ok(())
    }

    fn record_error(&self, err: ShotError) -> ShotResult<()> {
        let mut slot = self.slot.lock()?;
        slot.last_error = Some(Arc::new(err));

        Ok(())
    }

    // Also runs while the producer unwinds, so a poisoned lock is still taken.
    fn finish(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.stopped = true;
        self.condvar.notify_all();
    }

    fn wait(&self, timeout: Option<Duration>) -> ShotResult<Arc<RawFrame>> {
        // a timeout past the end of `Instant` waits without a deadline
        let deadline = timeout.and_then(|timeout| {
            Instant::now()
                .checked_add(timeout)
                .map(|deadline| (timeout, deadline))
        });
        let mut slot = self.slot.lock()?;

        loop {
            if let Some(frame) = &slot.frame {
                return Ok(frame.clone());
            }
            if slot.stopped {
                return Err(match &slot.last_error {
                    Some(err) => ShotError::LoopFailed(err.clone()),
                    None => ShotError::LoopStopped,
                });
            }

            slot = match deadline {
                None => self.condvar.wait(slot)?,
                Some((timeout, deadline)) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return Err(ShotError::CaptureTimeout(timeout));
                    }
                    self.condvar.wait_timeout(slot, remaining)?.0
                }
            };
        }
    }
}

/// Captures one fixed region over and over on a background thread and keeps
/// the newest frame for any number of consumers.
///
/// Dropping the loop stops and joins the thread.
#[derive(Debug)]
pub struct CaptureLoop {
    bounds: Rect,
    waker: Arc<FrameWaker>,
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    encoder: BitmapEncoder,
}

impl CaptureLoop {
    /// Spawns the producer thread. `bounds` is never re-read afterwards.
    pub fn start<B>(
        engine: CaptureEngine<B>,
        bounds: Rect,
        options: CaptureLoopOptions,
    ) -> ShotResult<CaptureLoop>
    where
        B: CaptureBackend + Send + 'static,
    {
        if bounds.is_empty() {
            return Err(ShotError::invalid_region(bounds.width(), bounds.height()));
        }
        if options.thread_name.contains('\0') {
            return Err(ShotError::InvalidOptions(format!(
                "thread name {:?} contains a NUL byte",
                options.thread_name
            )));
        }

        let waker = Arc::new(FrameWaker::default());
        let (cancel, cancelled) = mpsc::channel();

        let producer_waker = waker.clone();
        let handle = thread::Builder::new()
            .name(options.thread_name.clone())
            .spawn(move || {
                let waker = guard(producer_waker, |waker| waker.finish());
                produce(&engine, bounds, &options, &waker, &cancelled);
            })?;

        log::debug!("capture loop started for {:?}", bounds);

        Ok(CaptureLoop {
            bounds,
            waker,
            cancel: Some(cancel),
            handle: Some(handle),
            encoder: BitmapEncoder::new(),
        })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Blocks until the first frame has been captured, then returns the newest.
    ///
    /// Fails instead of blocking forever when the loop stopped without ever
    /// producing a frame.
    pub fn get_latest(&self) -> ShotResult<Arc<RawFrame>> {
        self.waker.wait(None)
    }

    pub fn get_latest_timeout(&self, timeout: Duration) -> ShotResult<Arc<RawFrame>> {
        self.waker.wait(Some(timeout))
    }

    /// The newest frame encoded as a BMP file.
    pub fn get_latest_bitmap(&self) -> ShotResult<Vec<u8>> {
        let frame = self.get_latest()?;

        self.encoder.encode(&frame)
    }

    /// Number of frames published so far.
    pub fn frame_count(&self) -> ShotResult<u64> {
        Ok(self.waker.slot.lock()?.sequence)
    }

    /// The error of the most recent capture, cleared by the next successful one.
    pub fn last_error(&self) -> ShotResult<Option<Arc<ShotError>>> {
        Ok(self.waker.slot.lock()?.last_error.clone())
    }

    pub fn is_running(&self) -> bool {
        !self
            .waker
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stopped
    }

    /// Stops the producer and waits for it to exit. The last frame stays
    /// available.
    pub fn stop(&mut self) -> ShotResult<()> {
        if let Some(cancel) = self.cancel.take() {
            // the producer may already be gone
            let _ = cancel.send(());
        }

        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| ShotError::new("capture thread panicked"))?;
        }

        Ok(())
    }
}

impl Drop for CaptureLoop {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::error!("stopping capture loop for {:?} failed: {}", self.bounds, err);
        }
    }
}

fn produce<B: CaptureBackend>(
    engine: &CaptureEngine<B>,
    bounds: Rect,
    options: &CaptureLoopOptions,
    waker: &FrameWaker,
    cancelled: &Receiver<()>,
) {
    let mut consecutive_failures = 0u32;

    loop {
        if !matches!(cancelled.try_recv(), Err(TryRecvError::Empty)) {
            break;
        }

        let started = Instant::now();

        match engine.capture(bounds) {
            Ok(frame) => {
                consecutive_failures = 0;
                if let Err(err) = waker.publish(frame) {
                    log::error!("publishing frame failed: {}", err);
                    break;
                }
            }
            Err(err) => {
                consecutive_failures += 1;
                log::warn!(
                    "capture of {:?} failed ({} in a row): {}",
                    bounds,
                    consecutive_failures,
                    err
                );
                if let Err(err) = waker.record_error(err) {
                    log::error!("recording capture error failed: {}", err);
                    break;
                }
                if options
                    .max_consecutive_failures
                    .is_some_and(|max| consecutive_failures >= max)
                {
                    log::error!(
                        "capture loop for {:?} gave up after {} failures",
                        bounds,
                        consecutive_failures
                    );
                    break;
                }
            }
        }

        if let Some(min_interval) = options.min_interval {
            let remaining = min_interval.saturating_sub(started.elapsed());
            if !remaining.is_zero()
                && !matches!(
                    cancelled.recv_timeout(remaining),
                    Err(RecvTimeoutError::Timeout)
                )
            {
                break;
            }
        }
    }

    log::debug!("capture loop for {:?} stopped", bounds);
}
