use crate::shared::landmarks::DetectionResult;

/// Classification carried on error events. `Gpu` marks delegate failures
/// (the model not supporting the accelerated backend) so consumers can fall
/// back to CPU; everything else is `Other`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorCode {
    #[default]
    Other,
    Gpu,
}

/// Messages published by the live-stream worker.
///
/// This replaces direct listener callbacks with a channel: one producer (the
/// worker thread) and one consumer draining events, so downstream code makes
/// no threading assumptions.
#[derive(Clone, Debug)]
pub enum LandmarkerEvent {
    /// Emitted once when the stream is set up, carrying the option summary.
    Created { options: String },
    /// One inference cycle completed.
    Results(DetectionResult),
    /// A frame failed to prepare or detect; the stream continues.
    Error { message: String, code: ErrorCode },
}
