use std::collections::BTreeMap;

use crate::definitions::*;

/// Encoder and output knobs accumulated across a pipeline run.
///
/// Every knob the core interprets has a named, typed field; last writer
/// wins. Anything the core does not interpret goes in [`extra`](Self::extra)
/// and is passed through verbatim to the encoder as `-<key> <value>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub video_codec: Option<String>,
    pub crf: Option<u32>,
    pub preset: Option<String>,

    /// Drop all container/stream metadata inherited from the source
    /// (`-map_metadata -1`).
    pub strip_source_metadata: bool,

    /// A synthetic global comment tag written to the output container.
    pub comment: Option<String>,

    /// Intensity of the noise-injection step. Read by the step, not an
    /// encoder argument.
    pub noise_intensity: u32,

    /// Uninterpreted encoder options, passed through verbatim in key order.
    pub extra: BTreeMap<String, String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            video_codec: Some("libx264".to_string()),
            crf: Some(23),
            preset: Some("fast".to_string()),
            strip_source_metadata: false,
            comment: None,
            noise_intensity: DEFAULT_NOISE_INTENSITY,
            extra: BTreeMap::new(),
        }
    }
}

impl RenderOptions {
    /// Flatten into the ffmpeg output-argument vector, in a stable order.
    pub fn to_output_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.strip_source_metadata {
            args.push("-map_metadata".to_string());
            args.push("-1".to_string());
        }

        if let Some(comment) = &self.comment {
            args.push("-metadata".to_string());
            args.push(format!("comment={comment}"));
        }

        if let Some(codec) = &self.video_codec {
            args.push("-c:v".to_string());
            args.push(codec.clone());
        }

        if let Some(crf) = self.crf {
            args.push("-crf".to_string());
            args.push(crf.to_string());
        }

        if let Some(preset) = &self.preset {
            args.push("-preset".to_string());
            args.push(preset.clone());
        }

        for (key, value) in &self.extra {
            args.push(format!("-{key}"));
            args.push(value.clone());
        }

        args
    }
}
