//! Frame and time conversions at the fixed frame rate

use crate::domain::model::{FrameInterval, FRAME_RATE};

/// Seconds from the start of the video to the given frame
pub fn frame_to_seconds(frame: u64) -> f64 {
    frame as f64 / FRAME_RATE as f64
}

/// Report form of a timestamp, e.g. `"6.25 sec"`
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2} sec", seconds)
}

/// Seek argument for ffmpeg with millisecond precision
pub fn seek_argument(frame: u64) -> String {
    format!("{:.3}", frame_to_seconds(frame))
}

/// `HH:MM:SS:FF` timecode of a frame
pub fn frame_to_timecode(frame: u64) -> String {
    let frames_per_hour = 3600 * FRAME_RATE;
    let frames_per_minute = 60 * FRAME_RATE;

    let hours = frame / frames_per_hour;
    let minutes = (frame % frames_per_hour) / frames_per_minute;
    let seconds = (frame % frames_per_minute) / FRAME_RATE;
    let frames = frame % FRAME_RATE;

    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, frames)
}

/// Timecode span of an interval, `start-end`
pub fn interval_to_timecode(interval: &FrameInterval) -> String {
    format!(
        "{}-{}",
        frame_to_timecode(interval.start),
        frame_to_timecode(interval.end)
    )
}
