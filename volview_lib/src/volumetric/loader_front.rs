use std::{sync::Arc, thread::JoinHandle};

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use parking_lot::Mutex;

use crate::error::VolumeError;

use super::{builder, ScanMetadata, SliceReference, Volume};

/// Progress of an in-flight volume build, in slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadProgress {
    pub done: usize,
    pub total: usize,
}

/// Front for the asynchronous volume build.
///
/// Construction runs on its own thread and reports back over a bounded
/// channel; the shared progress handle is updated per slice. Can be pending
/// or idle; at most one build is in flight.
pub struct LoaderFront {
    handle: Option<JoinHandle<()>>,
    receiver: Option<Receiver<Result<Volume, VolumeError>>>,
    progress: Arc<Mutex<LoadProgress>>,
}

impl LoaderFront {
    /// Create idle front
    pub fn new() -> Self {
        Self {
            handle: None,
            receiver: None,
            progress: Arc::new(Mutex::new(LoadProgress::default())),
        }
    }

    /// A build is in flight and has not been collected yet.
    pub fn is_pending(&self) -> bool {
        self.handle.is_some()
    }

    /// Snapshot of the in-flight build's progress.
    pub fn progress(&self) -> LoadProgress {
        *self.progress.lock()
    }

    /// Spawn the build thread.
    ///
    /// Caller must ensure no build is pending; a pending front ignores the
    /// request and logs.
    pub fn start_build(&mut self, slices: Vec<SliceReference>, metadata: ScanMetadata) {
        if self.is_pending() {
            log::warn!("volume build already in flight, ignoring start");
            return;
        }

        *self.progress.lock() = LoadProgress {
            done: 0,
            total: slices.len(),
        };

        let (sender, receiver) = bounded(1);
        let progress = self.progress.clone();

        let handle = std::thread::spawn(move || {
            let result = builder::build_with_progress(slices, metadata, |done, total| {
                *progress.lock() = LoadProgress { done, total };
            });

            // front may have been torn down meanwhile
            let _ = sender.send(result);
        });

        self.handle = Some(handle);
        self.receiver = Some(receiver);
    }

    /// Collect the finished build, non-blocking.
    ///
    /// Returns `None` while the build is still running or when nothing is in
    /// flight. Once a result is returned the front is idle again.
    pub fn try_finish(&mut self) -> Option<Result<Volume, VolumeError>> {
        let receiver = self.receiver.as_ref()?;

        match receiver.try_recv() {
            Ok(result) => {
                self.join_thread();
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // build thread died without sending; treat as engine-less failure
                self.join_thread();
                self.receiver = None;
                Some(Err(VolumeError::BuildAbandoned))
            }
        }
    }

    /// Discard any in-flight build, blocking until the thread is joined.
    ///
    /// There is no cancellation; the result is computed and dropped.
    pub fn abandon(&mut self) {
        self.receiver = None;
        self.join_thread();
    }

    fn join_thread(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("volume build thread panicked");
            }
        }
    }
}

impl Default for LoaderFront {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn stack(n: usize) -> Vec<SliceReference> {
        (0..n)
            .map(|i| SliceReference::new(format!("slice-{i}")).with_instance_number(i as i32))
            .collect()
    }

    fn finish_blocking(front: &mut LoaderFront) -> Result<Volume, VolumeError> {
        loop {
            if let Some(result) = front.try_finish() {
                return result;
            }
            std::thread::yield_now();
        }
    }

    #[test]
    fn build_completes_and_front_goes_idle() {
        let mut front = LoaderFront::new();
        front.start_build(stack(4), ScanMetadata::default());

        assert!(front.is_pending());

        let volume = finish_blocking(&mut front).unwrap();
        assert_eq!(volume.slice_count(), 4);
        assert!(!front.is_pending());

        let progress = front.progress();
        assert_eq!(progress.done, progress.total);
    }

    #[test]
    fn build_failure_is_delivered() {
        let mut front = LoaderFront::new();
        front.start_build(stack(1), ScanMetadata::default());

        let result = finish_blocking(&mut front);
        assert_eq!(result.unwrap_err(), VolumeError::TooFewSlices(1));
    }

    #[test]
    fn second_start_is_ignored_while_pending() {
        let mut front = LoaderFront::new();
        front.start_build(stack(3), ScanMetadata::default());
        front.start_build(stack(5), ScanMetadata::default());

        let volume = finish_blocking(&mut front).unwrap();
        assert_eq!(volume.slice_count(), 3);
    }

    #[test]
    fn abandon_discards_result() {
        let mut front = LoaderFront::new();
        front.start_build(stack(3), ScanMetadata::default());
        front.abandon();

        assert!(!front.is_pending());
        assert!(front.try_finish().is_none());
    }
}
