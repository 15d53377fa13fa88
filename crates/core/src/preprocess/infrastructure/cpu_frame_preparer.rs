use crate::preprocess::domain::frame_preparer::{FramePreparer, PrepareError};
use crate::shared::config::DEFAULT_MIRROR_SCALE;
use crate::shared::frame::{Frame, FRAME_CHANNELS};
use crate::shared::rotation::Rotation;

/// CPU frame preparation: quarter-turn rotation followed by the
/// front-camera mirror flip.
///
/// The flip magnitude doubles as a downscale factor (a scale of 0.25 shrinks
/// a 640x480 capture toward 160x120 while flipping). Sampling is
/// nearest-neighbor; a scale of 1.0 degenerates to an exact flip.
pub struct CpuFramePreparer {
    mirror_scale: f32,
}

impl CpuFramePreparer {
    pub fn new(mirror_scale: f32) -> Self {
        Self { mirror_scale }
    }
}

impl Default for CpuFramePreparer {
    fn default() -> Self {
        Self::new(DEFAULT_MIRROR_SCALE)
    }
}

impl FramePreparer for CpuFramePreparer {
    fn prepare(&self, frame: &Frame) -> Result<Frame, PrepareError> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(PrepareError::InvalidDimensions {
                width: frame.width(),
                height: frame.height(),
            });
        }

        let (mut data, mut width, mut height) = rotate(frame);
        if frame.mirrored() {
            (data, width, height) = mirror_flip(&data, width, height, self.mirror_scale);
        }

        Ok(Frame::new(
            data,
            width,
            height,
            Rotation::Deg0,
            false,
            frame.timestamp_ms(),
        ))
    }
}

/// Quarter-turn pixel permutation. 90/270 swap the output dimensions.
fn rotate(frame: &Frame) -> (Vec<u8>, u32, u32) {
    let rotation = frame.rotation();
    if rotation == Rotation::Deg0 {
        return (frame.data().to_vec(), frame.width(), frame.height());
    }

    let src = frame.as_ndarray();
    let (w, h) = (frame.width() as usize, frame.height() as usize);
    let (out_w, out_h) = if rotation.swaps_dimensions() {
        (h, w)
    } else {
        (w, h)
    };
    let mut out = vec![0u8; out_w * out_h * FRAME_CHANNELS];

    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = match rotation {
                Rotation::Deg0 => (x, y),
                Rotation::Deg90 => (h - 1 - y, x),
                Rotation::Deg180 => (w - 1 - x, h - 1 - y),
                Rotation::Deg270 => (y, w - 1 - x),
            };
            let dst = (dy * out_w + dx) * FRAME_CHANNELS;
            for c in 0..FRAME_CHANNELS {
                out[dst + c] = src[[y, x, c]];
            }
        }
    }

    (out, out_w as u32, out_h as u32)
}

/// Horizontal flip combined with a uniform downscale by `scale`,
/// nearest-neighbor sampled.
fn mirror_flip(data: &[u8], width: u32, height: u32, scale: f32) -> (Vec<u8>, u32, u32) {
    let (w, h) = (width as usize, height as usize);
    let out_w = ((width as f32 * scale).round() as usize).max(1);
    let out_h = ((height as f32 * scale).round() as usize).max(1);
    let mut out = vec![0u8; out_w * out_h * FRAME_CHANNELS];

    for oy in 0..out_h {
        let sy = (((oy as f32 + 0.5) / scale) as usize).min(h - 1);
        for ox in 0..out_w {
            let sampled = (((ox as f32 + 0.5) / scale) as usize).min(w - 1);
            let sx = w - 1 - sampled;
            let src = (sy * w + sx) * FRAME_CHANNELS;
            let dst = (oy * out_w + ox) * FRAME_CHANNELS;
            out[dst..dst + FRAME_CHANNELS].copy_from_slice(&data[src..src + FRAME_CHANNELS]);
        }
    }

    (out, out_w as u32, out_h as u32)
}
