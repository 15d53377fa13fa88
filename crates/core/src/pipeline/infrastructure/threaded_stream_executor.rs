use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::pipeline::events::{ErrorCode, LandmarkerEvent};
use crate::pipeline::stream_executor::{StreamConfig, StreamExecutor};
use crate::preprocess::domain::frame_preparer::FramePreparer;
use crate::shared::frame::Frame;
use crate::shared::landmarks::DetectionResult;

/// Executes the live stream on one dedicated worker thread.
///
/// Layout: `capture → [prepare → detect] worker → events`
///
/// The worker prepares and submits frames strictly one at a time, so at most
/// one inference request is in flight. Per-frame failures are published as
/// error events and the stream continues; the run ends when the frame
/// channel closes, the consumer goes away, or cancellation is requested.
pub struct ThreadedStreamExecutor;

impl ThreadedStreamExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThreadedStreamExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamExecutor for ThreadedStreamExecutor {
    fn execute(
        &self,
        preparer: Box<dyn FramePreparer>,
        detector: Box<dyn LandmarkDetector>,
        frames: Receiver<Frame>,
        events: Sender<LandmarkerEvent>,
        config: StreamConfig,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let StreamConfig { options, cancelled } = config;
        let worker = spawn_worker(preparer, detector, frames, events, options, cancelled);
        worker.join().map_err(|_| "Stream worker panicked")?;
        Ok(())
    }
}

fn spawn_worker(
    preparer: Box<dyn FramePreparer>,
    mut detector: Box<dyn LandmarkDetector>,
    frames: Receiver<Frame>,
    events: Sender<LandmarkerEvent>,
    options: String,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        if events.send(LandmarkerEvent::Created { options }).is_err() {
            return;
        }
        log::debug!("live stream worker started");

        for frame in frames {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }

            let prepared = match preparer.prepare(&frame) {
                Ok(prepared) => prepared,
                Err(e) => {
                    if send_error(&events, e.to_string()) {
                        continue;
                    }
                    break;
                }
            };

            let started = Instant::now();
            let event = match detector.detect(&prepared) {
                Ok(hands) => LandmarkerEvent::Results(DetectionResult::new(
                    hands,
                    started.elapsed().as_millis() as u64,
                    prepared.width(),
                    prepared.height(),
                )),
                Err(e) => LandmarkerEvent::Error {
                    message: e.to_string(),
                    code: ErrorCode::Other,
                },
            };
            if events.send(event).is_err() {
                break;
            }
        }

        log::debug!("live stream worker stopped");
    })
}

/// Publishes an error event; false means the consumer is gone.
fn send_error(events: &Sender<LandmarkerEvent>, message: String) -> bool {
    events
        .send(LandmarkerEvent::Error {
            message,
            code: ErrorCode::Other,
        })
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::domain::frame_preparer::PrepareError;
    use crate::preprocess::infrastructure::cpu_frame_preparer::CpuFramePreparer;
    use crate::shared::landmarks::{HandLandmarks, Landmark};
    use crate::shared::rotation::Rotation;
    use std::collections::VecDeque;

    // --- Stubs ---

    /// Hands frames through untouched.
    struct PassthroughPreparer;

    impl FramePreparer for PassthroughPreparer {
        fn prepare(&self, frame: &Frame) -> Result<Frame, PrepareError> {
            Ok(frame.clone())
        }
    }

    /// Serves scripted outcomes, one per detect call.
    struct ScriptedDetector {
        outcomes: VecDeque<Result<Vec<HandLandmarks>, String>>,
    }

    impl ScriptedDetector {
        fn new(outcomes: Vec<Result<Vec<HandLandmarks>, String>>) -> Self {
            Self {
                outcomes: outcomes.into(),
            }
        }
    }

    impl LandmarkDetector for ScriptedDetector {
        fn detect(
            &mut self,
            _frame: &Frame,
        ) -> Result<Vec<HandLandmarks>, Box<dyn std::error::Error>> {
            match self.outcomes.pop_front().expect("unexpected detect call") {
                Ok(hands) => Ok(hands),
                Err(message) => Err(message.into()),
            }
        }
    }

    // --- Helpers ---

    fn frame(width: u32, height: u32, rotation: Rotation) -> Frame {
        Frame::new(
            vec![0; (width * height * 4) as usize],
            width,
            height,
            rotation,
            false,
            0,
        )
    }

    fn one_hand() -> Vec<HandLandmarks> {
        vec![HandLandmarks::new(vec![Landmark { x: 0.5, y: 0.5 }; 21])]
    }

    fn run(
        preparer: Box<dyn FramePreparer>,
        detector: Box<dyn LandmarkDetector>,
        frames: Vec<Frame>,
        cancelled: bool,
    ) -> Vec<LandmarkerEvent> {
        let (frame_tx, frame_rx) = crossbeam_channel::unbounded();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        for f in frames {
            frame_tx.send(f).unwrap();
        }
        drop(frame_tx);

        let config = StreamConfig {
            options: "CPU 1H A=0.40".to_string(),
            cancelled: Arc::new(AtomicBool::new(cancelled)),
        };
        ThreadedStreamExecutor::new()
            .execute(preparer, detector, frame_rx, event_tx, config)
            .unwrap();

        event_rx.iter().collect()
    }

    // --- Tests ---

    #[test]
    fn test_created_event_comes_first() {
        let events = run(
            Box::new(PassthroughPreparer),
            Box::new(ScriptedDetector::new(vec![Ok(one_hand())])),
            vec![frame(2, 2, Rotation::Deg0)],
            false,
        );
        assert_eq!(events.len(), 2);
        match &events[0] {
            LandmarkerEvent::Created { options } => assert_eq!(options, "CPU 1H A=0.40"),
            other => panic!("expected Created, got {other:?}"),
        }
        assert!(matches!(events[1], LandmarkerEvent::Results(_)));
    }

    #[test]
    fn test_one_result_per_frame_in_order() {
        let events = run(
            Box::new(PassthroughPreparer),
            Box::new(ScriptedDetector::new(vec![
                Ok(one_hand()),
                Ok(Vec::new()),
                Ok(one_hand()),
            ])),
            vec![
                frame(2, 2, Rotation::Deg0),
                frame(2, 2, Rotation::Deg0),
                frame(2, 2, Rotation::Deg0),
            ],
            false,
        );
        let hand_counts: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                LandmarkerEvent::Results(r) => Some(r.hands().len()),
                _ => None,
            })
            .collect();
        assert_eq!(hand_counts, vec![1, 0, 1]);
    }

    #[test]
    fn test_detector_error_keeps_stream_alive() {
        let events = run(
            Box::new(PassthroughPreparer),
            Box::new(ScriptedDetector::new(vec![
                Ok(one_hand()),
                Err("delegate hiccup".to_string()),
                Ok(one_hand()),
            ])),
            vec![
                frame(2, 2, Rotation::Deg0),
                frame(2, 2, Rotation::Deg0),
                frame(2, 2, Rotation::Deg0),
            ],
            false,
        );
        assert_eq!(events.len(), 4);
        match &events[2] {
            LandmarkerEvent::Error { message, code } => {
                assert_eq!(message, "delegate hiccup");
                assert_eq!(*code, ErrorCode::Other);
            }
            other => panic!("expected Error, got {other:?}"),
        }
        assert!(matches!(events[3], LandmarkerEvent::Results(_)));
    }

    #[test]
    fn test_prepare_error_reported_and_frame_skipped() {
        let events = run(
            Box::new(CpuFramePreparer::default()),
            Box::new(ScriptedDetector::new(vec![Ok(one_hand())])),
            vec![frame(0, 2, Rotation::Deg0), frame(2, 2, Rotation::Deg0)],
            false,
        );
        assert_eq!(events.len(), 3);
        assert!(matches!(events[1], LandmarkerEvent::Error { .. }));
        assert!(matches!(events[2], LandmarkerEvent::Results(_)));
    }

    #[test]
    fn test_cancelled_run_emits_no_results() {
        let events = run(
            Box::new(PassthroughPreparer),
            Box::new(ScriptedDetector::new(Vec::new())),
            vec![frame(2, 2, Rotation::Deg0), frame(2, 2, Rotation::Deg0)],
            true,
        );
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], LandmarkerEvent::Created { .. }));
    }

    #[test]
    fn test_results_carry_prepared_dimensions() {
        // A 4x2 capture rotated 90 degrees arrives at the detector as 2x4.
        let events = run(
            Box::new(CpuFramePreparer::default()),
            Box::new(ScriptedDetector::new(vec![Ok(Vec::new())])),
            vec![frame(4, 2, Rotation::Deg90)],
            false,
        );
        match &events[1] {
            LandmarkerEvent::Results(result) => {
                assert_eq!(result.input_width(), 2);
                assert_eq!(result.input_height(), 4);
            }
            other => panic!("expected Results, got {other:?}"),
        }
    }

    #[test]
    fn test_dropped_consumer_ends_run_cleanly() {
        let (frame_tx, frame_rx) = crossbeam_channel::unbounded();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        frame_tx.send(frame(2, 2, Rotation::Deg0)).unwrap();
        drop(frame_tx);
        drop(event_rx);

        let config = StreamConfig {
            options: String::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        let outcome = ThreadedStreamExecutor::new().execute(
            Box::new(PassthroughPreparer),
            Box::new(ScriptedDetector::new(vec![Ok(Vec::new())])),
            frame_rx,
            event_tx,
            config,
        );
        assert!(outcome.is_ok());
    }
}
