use std::path::PathBuf;

use crate::{
    definitions::OUTPUT_NAME_PREFIX,
    processing::{
        context::ProcessingContext,
        filter_graph::FilterGraph,
        pipeline_error::PipelineError,
        steps::{default_profile, TransformStep},
    },
};

/// An ordered composition of transform steps plus the terminal render stage.
///
/// The pipeline owns which steps run and in what order, and issues the
/// single external render invocation that produces output bytes.
#[derive(Clone, Debug)]
pub struct Pipeline {
    profile: Vec<TransformStep>,
}

impl Pipeline {
    pub fn new(profile: Vec<TransformStep>) -> Self {
        Self { profile }
    }

    pub fn with_default_profile() -> Self {
        Self::new(default_profile())
    }

    pub fn profile(&self) -> &[TransformStep] {
        &self.profile
    }

    /// Run the pipeline over one context and return the path of the
    /// rendered output inside the context's scratch space.
    ///
    /// Exactly one file is written under the scratch dir, named
    /// `processed_<original_basename>` and overwritten if present; the
    /// source is never mutated. Any step failure aborts before the render
    /// stage. A render failure is propagated with ffmpeg's diagnostic
    /// attached; partial output is left for the scratch teardown to remove.
    pub fn run(&self, ctx: &mut ProcessingContext) -> Result<PathBuf, PipelineError> {
        if let Err(error) = std::fs::metadata(ctx.source_path()) {
            return Err(PipelineError::Io {
                src_path: ctx.source_path().to_path_buf(),
                error: error.to_string(),
            });
        }

        let mut graph = FilterGraph::new();
        for step in &self.profile {
            step.apply(ctx, &mut graph)?;
        }

        let output_path = Self::derive_output_path(ctx);
        let output_args = ctx.render_options.to_output_args();
        let filter_arg = graph.render_arg();

        log::debug!(
            "rendering {} -> {} (filters: {}, args: {})",
            ctx.source_path().display(),
            output_path.display(),
            filter_arg.as_deref().unwrap_or("<none>"),
            output_args.join(" "),
        );

        ffmpeg_render_utils::render(
            ctx.source_path(),
            filter_arg.as_deref(),
            &output_args,
            &output_path,
        )
        .map_err(|error| PipelineError::Render {
            src_path: ctx.source_path().to_path_buf(),
            error,
        })?;

        log::info!("rendered {}", output_path.display());
        Ok(output_path)
    }

    fn derive_output_path(ctx: &ProcessingContext) -> PathBuf {
        let basename = ctx
            .source_path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        ctx.scratch_path().join(format!("{OUTPUT_NAME_PREFIX}{basename}"))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::processing::context::ScratchDir;

    #[test]
    fn test_output_path_is_prefixed_basename_in_scratch() {
        let root = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(root.path().join("job")).unwrap();
        let ctx = ProcessingContext::with_seed("/videos/holiday.mp4", scratch, 0);

        let output = Pipeline::derive_output_path(&ctx);
        assert_eq!(
            output,
            root.path().join("job").join("processed_holiday.mp4")
        );
    }

    #[test]
    fn test_missing_source_is_an_io_error() {
        let root = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(root.path().join("job")).unwrap();
        let mut ctx = ProcessingContext::with_seed("/no/such/source.mp4", scratch, 0);

        let result = Pipeline::with_default_profile().run(&mut ctx);
        assert!(matches!(result, Err(PipelineError::Io { .. })));
    }

    #[test]
    fn test_bad_step_configuration_aborts_before_render() {
        let root = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(root.path().join("job")).unwrap();

        //source must exist so the failure can only come from the step
        let source = root.path().join("source.mp4");
        std::fs::write(&source, b"not really a video").unwrap();

        let mut ctx = ProcessingContext::with_seed(&source, scratch, 0);
        ctx.render_options.noise_intensity = 500;

        let result = Pipeline::with_default_profile().run(&mut ctx);
        assert!(matches!(result, Err(PipelineError::Configuration(_))));

        //no render was attempted, so the scratch dir holds no output
        let entries = std::fs::read_dir(ctx.scratch_path()).unwrap().count();
        assert_eq!(entries, 0);
    }
}
