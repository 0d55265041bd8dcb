// Animation clips built from one grid row

use crate::sheet::Frame;
use serde::{Deserialize, Serialize};

/// A frame shown at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Seconds from the start of the clip
    pub time: f32,
    pub frame: Frame,
}

/// A single animation clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Full clip name, e.g. `body_walk_down_0`
    pub name: String,
    /// Frames per second
    pub frame_rate: f32,
    /// Whether the animation loops
    pub looping: bool,
    pub keyframes: Vec<Keyframe>,
}

impl AnimationClip {
    /// Create a looping clip with keyframe `i` at `i / frame_rate`
    pub fn looping(name: &str, frames: &[Frame], frame_rate: f32) -> Self {
        let keyframes = frames
            .iter()
            .enumerate()
            .map(|(i, frame)| Keyframe {
                time: i as f32 / frame_rate,
                frame: frame.clone(),
            })
            .collect();

        Self {
            name: name.to_string(),
            frame_rate,
            looping: true,
            keyframes,
        }
    }

    /// Number of frames in the clip
    pub fn frame_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Duration of each frame in seconds
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count() as f32 * self.frame_duration()
    }
}

/// Build a clip name from an export prefix, animation name and variant index
pub fn clip_name(prefix: &str, animation: &str, variant: usize) -> String {
    if prefix.is_empty() {
        format!("{}_{}", animation, variant)
    } else {
        format!("{}_{}_{}", prefix, animation, variant)
    }
}

/// Build a controller name from an export prefix and variant index
pub fn controller_name(prefix: &str, variant: usize) -> String {
    if prefix.is_empty() {
        format!("controller_{}", variant)
    } else {
        format!("{}_{}", prefix, variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::FrameRegion;
    use approx::assert_relative_eq;

    fn frames(names: &[&str]) -> Vec<Frame> {
        names
            .iter()
            .map(|n| Frame::new(*n, FrameRegion::whole(16, 16)))
            .collect()
    }

    #[test]
    fn test_clip_keyframe_times() {
        let row = frames(&["s_0", "s_1", "s_2", "s_3"]);
        let clip = AnimationClip::looping("body_walk_0", &row, 12.0);

        assert_eq!(clip.frame_count(), 4);
        assert!(clip.looping);
        assert_relative_eq!(clip.keyframes[0].time, 0.0);
        assert_relative_eq!(clip.keyframes[1].time, 1.0 / 12.0);
        assert_relative_eq!(clip.keyframes[3].time, 0.25);
        assert_eq!(clip.keyframes[2].frame.name, "s_2");
    }

    #[test]
    fn test_clip_duration() {
        let row = frames(&["a_0"; 6]);
        let clip = AnimationClip::looping("walk", &row, 10.0);

        assert_relative_eq!(clip.frame_duration(), 0.1);
        assert_relative_eq!(clip.total_duration(), 0.6);
    }

    #[test]
    fn test_clip_short_row() {
        let row = frames(&["s_8", "s_9"]);
        let clip = AnimationClip::looping("tail_0", &row, 8.0);

        assert_eq!(clip.frame_count(), 2);
        assert_relative_eq!(clip.keyframes[1].time, 0.125);
    }

    #[test]
    fn test_clip_name() {
        assert_eq!(clip_name("body", "walk_down", 3), "body_walk_down_3");
        assert_eq!(clip_name("", "idle", 0), "idle_0");
    }

    #[test]
    fn test_controller_name() {
        assert_eq!(controller_name("shirt", 2), "shirt_2");
        assert_eq!(controller_name("", 0), "controller_0");
    }
}
