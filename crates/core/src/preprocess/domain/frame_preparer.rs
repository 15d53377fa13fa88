use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug, PartialEq)]
pub enum PrepareError {
    #[error("frame dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Domain interface for turning a raw capture into an upright,
/// inference-ready frame.
///
/// Implementations bake the frame's rotation and mirror metadata into a new
/// pixel buffer; the input is borrowed from the capture layer and must not
/// be retained past the call.
pub trait FramePreparer: Send {
    fn prepare(&self, frame: &Frame) -> Result<Frame, PrepareError>;
}
