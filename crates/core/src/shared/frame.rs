use ndarray::ArrayView3;

use crate::shared::rotation::Rotation;

/// Channels per pixel. Captures arrive as RGBA_8888 to match the model input.
pub const FRAME_CHANNELS: usize = 4;

/// A single captured frame: contiguous RGBA bytes in row-major order, plus
/// the orientation metadata reported by the capture layer.
///
/// Frames are created per capture callback and consumed immediately; the
/// preprocessor never mutates one in place.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    rotation: Rotation,
    mirrored: bool,
    timestamp_ms: u64,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        rotation: Rotation,
        mirrored: bool,
        timestamp_ms: u64,
    ) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * FRAME_CHANNELS,
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            rotation,
            mirrored,
            timestamp_ms,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// True when the frame came from a front-facing capture and still needs
    /// the horizontal flip applied.
    pub fn mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, FRAME_CHANNELS)
    }
}
