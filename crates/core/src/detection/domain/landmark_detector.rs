use crate::shared::frame::Frame;
use crate::shared::landmarks::HandLandmarks;

/// Domain interface for the hand-landmark inference engine.
///
/// Model loading, tensor execution, delegate dispatch, and the
/// tracking-vs-detection switch all live behind this port. Implementations
/// may be stateful (tracking across frames), hence `&mut self`. The frame
/// passed in is already prepared (upright, un-mirrored).
pub trait LandmarkDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, Box<dyn std::error::Error>>;
}
