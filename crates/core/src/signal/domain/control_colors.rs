//! Reduces a detection result to a pair of display colors.
//!
//! The aggregate displacement between the index fingertip (landmark 8) and
//! the index-finger base (landmark 5) is mapped to one grayscale intensity
//! per axis. When several hands are detected their displacement vectors are
//! summed, not averaged; this mirrors the controller's original tuning and
//! makes a two-handed point roughly twice as strong.

use crate::shared::landmarks::{HandLandmarks, INDEX_FINGER_MCP, INDEX_FINGER_TIP};
use crate::signal::domain::color::Color;

/// The derived signal pair: `horizontal` comes from the x displacement,
/// `vertical` from the y displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlColors {
    pub horizontal: Color,
    pub vertical: Color,
}

/// Sums the tip-minus-base displacement over all hands and maps each axis
/// to a color.
///
/// Hands too short to carry landmark 8 are skipped with a warning rather
/// than failing the reduction. An empty input is well-defined and yields
/// the neutral mid-gray pair.
pub fn derive_control_colors(hands: &[HandLandmarks]) -> ControlColors {
    let mut dx = 0.0f32;
    let mut dy = 0.0f32;

    for hand in hands {
        let (Some(tip), Some(base)) = (hand.get(INDEX_FINGER_TIP), hand.get(INDEX_FINGER_MCP))
        else {
            log::warn!(
                "skipping hand with {} landmarks, need at least {}",
                hand.len(),
                INDEX_FINGER_TIP + 1
            );
            continue;
        };
        dx += tip.x - base.x;
        dy += tip.y - base.y;
    }

    ControlColors {
        horizontal: normalize_channel(dx),
        vertical: normalize_channel(dy),
    }
}

/// Maps a displacement scalar to a grayscale color.
///
/// `c = round((1 + 2v) * 128)`; below 0 saturates to pure black, above 255
/// to pure white, everything else becomes the gray `(c, c, c)`.
pub fn normalize_channel(v: f32) -> Color {
    let c = ((1.0 + v * 2.0) * 128.0).round() as i32;
    if c < 0 {
        Color::BLACK
    } else if c > 255 {
        Color::WHITE
    } else {
        Color::gray(c as u8)
    }
}
