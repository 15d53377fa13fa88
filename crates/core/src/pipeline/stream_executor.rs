use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::pipeline::events::LandmarkerEvent;
use crate::preprocess::domain::frame_preparer::FramePreparer;
use crate::shared::frame::Frame;

/// Configuration for one live-stream run.
pub struct StreamConfig {
    /// Option summary announced in the initial `Created` event.
    pub options: String,
    pub cancelled: Arc<AtomicBool>,
}

/// Abstracts how the prepare → detect → publish loop is executed.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations. `execute` blocks until the frame channel
/// closes or the run is cancelled; events flow to the consumer while it
/// runs. Backpressure ("keep only the latest frame") is the producer's
/// concern via its choice of channel capacity.
pub trait StreamExecutor: Send {
    fn execute(
        &self,
        preparer: Box<dyn FramePreparer>,
        detector: Box<dyn LandmarkDetector>,
        frames: Receiver<Frame>,
        events: Sender<LandmarkerEvent>,
        config: StreamConfig,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
