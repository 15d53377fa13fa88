use std::fmt;

use thiserror::Error;

pub const DEFAULT_NUM_HANDS: usize = 1;
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.4;
pub const DEFAULT_MIRROR_SCALE: f32 = 0.25;

/// Compute backend requested from the inference engine. The engine owns
/// delegate dispatch; this is only forwarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delegate {
    #[default]
    Cpu,
    Gpu,
}

impl Delegate {
    pub fn label(self) -> &'static str {
        match self {
            Delegate::Cpu => "CPU",
            Delegate::Gpu => "GPU",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("num_hands must be at least 1, got {0}")]
    NumHands(usize),
    #[error("min_confidence must be within [0, 1], got {0}")]
    MinConfidence(f32),
    #[error("mirror_scale must be within (0, 1], got {0}")]
    MirrorScale(f32),
}

/// Immutable per-session settings, passed into each setup call.
///
/// `num_hands` and `min_confidence` are forwarded to the inference engine
/// (the single confidence value covers the detection, tracking, and presence
/// thresholds alike); `mirror_scale` drives the front-camera flip in the
/// frame preprocessor.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkerConfig {
    pub delegate: Delegate,
    pub num_hands: usize,
    pub min_confidence: f32,
    pub mirror_scale: f32,
}

impl Default for LandmarkerConfig {
    fn default() -> Self {
        Self {
            delegate: Delegate::default(),
            num_hands: DEFAULT_NUM_HANDS,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            mirror_scale: DEFAULT_MIRROR_SCALE,
        }
    }
}

impl LandmarkerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_hands < 1 {
            return Err(ConfigError::NumHands(self.num_hands));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::MinConfidence(self.min_confidence));
        }
        if !(self.mirror_scale > 0.0 && self.mirror_scale <= 1.0) {
            return Err(ConfigError::MirrorScale(self.mirror_scale));
        }
        Ok(())
    }

    /// Option summary announced once when a stream is set up,
    /// e.g. `CPU 1H A=0.40`.
    pub fn summary(&self) -> String {
        format!(
            "{} {}H A={:4.2}",
            self.delegate.label(),
            self.num_hands,
            self.min_confidence
        )
    }
}

impl fmt::Display for LandmarkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
