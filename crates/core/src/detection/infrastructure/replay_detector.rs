use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::shared::frame::Frame;
use crate::shared::landmarks::{HandLandmarks, Landmark};

#[derive(Deserialize)]
struct RecordedLandmark {
    x: f32,
    y: f32,
}

/// Replays pre-recorded detection results in file order.
///
/// The file is a JSON array of frames; each frame is an array of hands and
/// each hand an array of `{"x": .., "y": ..}` normalized landmarks. Once the
/// recording is exhausted every further call reports no hands, mirroring a
/// live stream in which the hand left the field of view.
///
/// Serves as a deterministic stand-in for the inference engine in tests and
/// in the CLI demo.
pub struct ReplayLandmarkDetector {
    frames: VecDeque<Vec<HandLandmarks>>,
}

impl ReplayLandmarkDetector {
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let recorded: Vec<Vec<Vec<RecordedLandmark>>> = serde_json::from_str(text)?;
        let frames = recorded
            .into_iter()
            .map(|hands| {
                hands
                    .into_iter()
                    .map(|points| {
                        HandLandmarks::new(
                            points
                                .into_iter()
                                .map(|p| Landmark { x: p.x, y: p.y })
                                .collect(),
                        )
                    })
                    .collect()
            })
            .collect();
        Ok(Self { frames })
    }

    /// Recorded frames not yet served.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkDetector for ReplayLandmarkDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<HandLandmarks>, Box<dyn std::error::Error>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}
