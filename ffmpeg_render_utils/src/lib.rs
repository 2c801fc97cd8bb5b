//! Thin wrappers around the `ffmpeg` and `ffprobe` command line tools.
//!
//! Three operations are exposed:
//! * [`VideoInfo::new`] probes a media file for duration, size and resolution.
//! * [`render`] runs a single encode of a source file through a filter graph.
//! * [`extract_frame_gray`] decodes one frame at a given timestamp into a
//!   small grayscale buffer, suitable for perceptual hashing.
//!
//! Ffmpeg and Ffprobe must be installed and visible on the command line.
//! [`ffmpeg_and_ffprobe_are_callable`] checks for both.
//!
//! Unfortunately the command-line requirement exists for technical reasons
//! (no well documented and memory-leak-free bindings exist to ffmpeg) and
//! licensing reasons (statically linking to Ffmpeg may introduce additional
//! transitive licensing requirements on end users of this library).

pub(crate) mod exec;

mod error;
mod frames;
mod probe;
mod render;

pub use error::{FfmpegError, ProbeDataError};
pub use exec::ffmpeg_and_ffprobe_are_callable;
pub use frames::extract_frame_gray;
pub use probe::VideoInfo;
pub use render::render;
