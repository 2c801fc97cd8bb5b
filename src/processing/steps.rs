use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    definitions::*,
    processing::{
        context::ProcessingContext,
        filter_graph::{FilterGraph, FilterNode},
        pipeline_error::PipelineError,
    },
};

/// A single, narrowly scoped mutation of the output: each variant may append
/// filter-graph nodes and/or adjust the context's render options, and must
/// never remove a node appended by an earlier step.
///
/// A profile is an ordered `Vec<TransformStep>`; the pipeline applies it
/// front to back. Steps draw all randomness from the context's RNG handle,
/// so a seeded context reproduces parameter choices exactly.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TransformStep {
    /// Strip all inherited container/stream metadata and write a single
    /// synthetic comment tag containing a random 4-digit integer. Touches
    /// only the render options, not the filter graph.
    MetadataMutation,

    /// Append a brightness/contrast/saturation/gamma jitter, each parameter
    /// drawn independently and uniformly from bounds chosen to stay
    /// imperceptible.
    ColorModulation,

    /// Append temporal luma+chroma noise. Intensity comes from the render
    /// options (default 5) and is not randomized.
    NoiseInjection,

    /// Crop a random even number of rows and columns (2 or 4 of each)
    /// symmetrically from the frame edges. The output keeps the cropped
    /// dimensions; it is not scaled back to the source resolution.
    GeometricTransform,
}

/// The standard profile: Metadata → Color → Noise → Geometric.
pub fn default_profile() -> Vec<TransformStep> {
    vec![
        TransformStep::MetadataMutation,
        TransformStep::ColorModulation,
        TransformStep::NoiseInjection,
        TransformStep::GeometricTransform,
    ]
}

impl TransformStep {
    pub fn apply(
        &self,
        ctx: &mut ProcessingContext,
        graph: &mut FilterGraph,
    ) -> Result<(), PipelineError> {
        match self {
            Self::MetadataMutation => Self::apply_metadata_mutation(ctx),
            Self::ColorModulation => Self::apply_color_modulation(ctx, graph),
            Self::NoiseInjection => Self::apply_noise_injection(ctx, graph),
            Self::GeometricTransform => Self::apply_geometric_transform(ctx, graph),
        }
    }

    fn apply_metadata_mutation(ctx: &mut ProcessingContext) -> Result<(), PipelineError> {
        let tag = ctx.rng().gen_range(COMMENT_TAG_MIN..=COMMENT_TAG_MAX);
        let comment = format!("Processed_{tag}");

        ctx.render_options.strip_source_metadata = true;
        ctx.render_options.comment = Some(comment.clone());
        ctx.note("metadata.comment", comment);
        Ok(())
    }

    fn apply_color_modulation(
        ctx: &mut ProcessingContext,
        graph: &mut FilterGraph,
    ) -> Result<(), PipelineError> {
        let rng = ctx.rng();
        let brightness = rng.gen_range(-BRIGHTNESS_JITTER..=BRIGHTNESS_JITTER);
        let contrast = rng.gen_range(LEVEL_JITTER_MIN..=LEVEL_JITTER_MAX);
        let saturation = rng.gen_range(LEVEL_JITTER_MIN..=LEVEL_JITTER_MAX);
        let gamma = rng.gen_range(LEVEL_JITTER_MIN..=LEVEL_JITTER_MAX);

        graph.push(
            FilterNode::new("eq")
                .arg("brightness", format!("{brightness:.4}"))
                .arg("contrast", format!("{contrast:.4}"))
                .arg("saturation", format!("{saturation:.4}"))
                .arg("gamma", format!("{gamma:.4}")),
        );

        ctx.note("color.brightness", format!("{brightness:.4}"));
        ctx.note("color.contrast", format!("{contrast:.4}"));
        ctx.note("color.saturation", format!("{saturation:.4}"));
        ctx.note("color.gamma", format!("{gamma:.4}"));
        Ok(())
    }

    fn apply_noise_injection(
        ctx: &mut ProcessingContext,
        graph: &mut FilterGraph,
    ) -> Result<(), PipelineError> {
        let intensity = ctx.render_options.noise_intensity;
        if intensity > MAX_NOISE_INTENSITY {
            return Err(PipelineError::Configuration(format!(
                "noise intensity {intensity} exceeds maximum {MAX_NOISE_INTENSITY}"
            )));
        }

        graph.push(FilterNode::new("noise").arg("alls", intensity).arg("allf", "t+u"));

        ctx.note("noise.intensity", intensity.to_string());
        Ok(())
    }

    fn apply_geometric_transform(
        ctx: &mut ProcessingContext,
        graph: &mut FilterGraph,
    ) -> Result<(), PipelineError> {
        let rng = ctx.rng();
        let crop_x = rng.gen_range(CROP_OFFSET_MIN..=CROP_OFFSET_MAX);
        let crop_y = rng.gen_range(CROP_OFFSET_MIN..=CROP_OFFSET_MAX);

        graph.push(
            FilterNode::new("crop")
                .arg("w", format!("iw-{}", 2 * crop_x))
                .arg("h", format!("ih-{}", 2 * crop_y))
                .arg("x", crop_x)
                .arg("y", crop_y),
        );

        ctx.note("crop.x", crop_x.to_string());
        ctx.note("crop.y", crop_y.to_string());
        Ok(())
    }
}
