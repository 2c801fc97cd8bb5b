use std::{ffi::OsString, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    exec::{run_tool, FfmpegTool},
    FfmpegError, ProbeDataError,
};

const PROBE_TIMEOUT_SECS: u64 = 60;

/// Container-level metadata obtained from ffprobe.
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize, Default)]
pub struct VideoInfo {
    duration: Duration,
    file_size: u64,
    resolution: (u32, u32),
}

impl VideoInfo {
    /// Use ffprobe to get the duration, file size and resolution of a video.
    /// If the video contains multiple video streams then the resolution of
    /// the first one is returned.
    ///
    /// # Errors
    /// * The file cannot be read or is not recognized by ffprobe
    /// * The output from ffprobe could not be parsed as JSON
    /// * A numeric field of the ffprobe output could not be parsed
    pub fn new<P>(src_path: P) -> Result<Self, FfmpegError>
    where
        P: AsRef<Path>,
    {
        let args = [
            OsString::from("-v"),
            OsString::from("quiet"),
            OsString::from("-show_format"),
            OsString::from("-show_streams"),
            OsString::from("-print_format"),
            OsString::from("json"),
            OsString::from(src_path.as_ref()),
        ];

        let output = run_tool(
            FfmpegTool::Ffprobe,
            &args,
            Duration::from_secs(PROBE_TIMEOUT_SECS),
        )?;

        let stats_string =
            String::from_utf8(output.stdout).map_err(|_| FfmpegError::Utf8Conversion)?;

        let stats_parsed: Value =
            serde_json::from_str(&stats_string).map_err(ProbeDataError::from)?;

        let duration = if let Value::String(d) = &stats_parsed["format"]["duration"] {
            Duration::from_secs_f64(d.parse().map_err(ProbeDataError::from)?)
        } else {
            Duration::ZERO
        };

        let file_size = if let Value::String(s) = &stats_parsed["format"]["size"] {
            s.parse().map_err(ProbeDataError::from)?
        } else {
            0
        };

        // If the metadata declares a rotation, ffmpeg autorotates decoded
        // frames, but the raw width/height fields refer to the unrotated
        // frame. Swap the axes for quarter-turn rotations.
        let resolution = {
            let raw_width = Self::first_video_u32(&stats_parsed, "width").unwrap_or(0);
            let raw_height = Self::first_video_u32(&stats_parsed, "height").unwrap_or(0);

            if Self::rotation_swaps_axes(&stats_parsed) {
                (raw_height, raw_width)
            } else {
                (raw_width, raw_height)
            }
        };

        Ok(VideoInfo {
            duration,
            file_size,
            resolution,
        })
    }

    /// The duration of the video.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The size of the video file in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// The resolution of the video in pixels, corrected for the orientation
    /// in which the video is intended to be viewed.
    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn rotation_swaps_axes(stats_parsed: &Value) -> bool {
        let rotation = Self::first_video_stream(stats_parsed)
            .and_then(|stream| stream.get("side_data_list"))
            .and_then(|side_data| side_data.get(0))
            .and_then(|entry| entry.get("rotation"))
            .and_then(|rotation| match rotation {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            })
            .unwrap_or(0);

        matches!(rotation.rem_euclid(360), 90 | 270)
    }

    fn first_video_stream(stats_parsed: &Value) -> Option<&Value> {
        if let Value::Array(streams) = &stats_parsed["streams"] {
            streams.iter().find(|stream| match &stream["codec_type"] {
                Value::String(codec_type) => codec_type == "video",
                _ => false,
            })
        } else {
            None
        }
    }

    fn first_video_u32(stats_parsed: &Value, field_name: &str) -> Option<u32> {
        let stream = Self::first_video_stream(stats_parsed)?;
        if let Value::Number(v) = &stream[field_name] {
            Some(v.as_u64()? as u32)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rotated_streams_swap_axes() {
        let stats: Value = serde_json::from_str(
            r#"{"streams": [{"codec_type": "video", "width": 1920, "height": 1080,
                "side_data_list": [{"rotation": -90}]}]}"#,
        )
        .unwrap();

        assert!(VideoInfo::rotation_swaps_axes(&stats));
        assert_eq!(VideoInfo::first_video_u32(&stats, "width"), Some(1920));
    }

    #[test]
    fn test_audio_streams_are_skipped() {
        let stats: Value = serde_json::from_str(
            r#"{"streams": [{"codec_type": "audio"},
                {"codec_type": "video", "width": 640, "height": 480}]}"#,
        )
        .unwrap();

        assert!(!VideoInfo::rotation_swaps_axes(&stats));
        assert_eq!(VideoInfo::first_video_u32(&stats, "width"), Some(640));
        assert_eq!(VideoInfo::first_video_u32(&stats, "height"), Some(480));
    }
}
