//! Command-line driver.

use std::path::PathBuf;

use anyhow::{Context, bail};
use subrender_render::{BatchRenderer, BatchReport, PlaceholderRenderer};

use crate::manifest::SceneManifest;

pub const USAGE: &str = "\
usage: subrender <manifest.json> [options]

options:
  --active-camera     render only the manifest's active camera
  --output <path>     override the manifest's output path
  -h, --help          print this help";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Every camera of every selected subcollection.
    #[default]
    RenderSelected,
    /// The active camera only.
    RenderActiveCamera,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub manifest: PathBuf,
    pub command: Command,
    pub output_override: Option<String>,
}

impl CliArgs {
    /// Parses arguments (without the program name). `Ok(None)` means help was
    /// requested.
    pub fn parse<I>(args: I) -> anyhow::Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut manifest = None;
        let mut command = Command::default();
        let mut output_override = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--active-camera" => command = Command::RenderActiveCamera,
                "--output" => {
                    let value = args.next().context("--output needs a path")?;
                    output_override = Some(value);
                }
                flag if flag.starts_with('-') => bail!("unknown option '{flag}'"),
                _ if manifest.is_some() => bail!("more than one manifest given"),
                _ => manifest = Some(PathBuf::from(&arg)),
            }
        }

        let manifest = manifest.context("missing manifest path")?;
        Ok(Some(Self {
            manifest,
            command,
            output_override,
        }))
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub enum RunSummary {
    Batch(BatchReport),
    Single(PathBuf),
}

/// Loads the manifest and renders with the placeholder primitive.
pub fn run(args: &CliArgs) -> anyhow::Result<RunSummary> {
    let manifest = SceneManifest::load(&args.manifest)
        .with_context(|| format!("failed to load {}", args.manifest.display()))?;
    let (mut scene, mut ctx) = manifest.build()?;
    if let Some(output) = &args.output_override {
        ctx.settings.output_path.clone_from(output);
    }

    let mut renderer = BatchRenderer::new(PlaceholderRenderer::new());
    let summary = match args.command {
        Command::RenderSelected => {
            RunSummary::Batch(renderer.render_selected(&mut scene, &mut ctx)?)
        }
        Command::RenderActiveCamera => {
            RunSummary::Single(renderer.render_active_camera(&scene, &mut ctx)?)
        }
    };

    log::debug!(
        "{} image(s) written by the placeholder renderer",
        renderer.primitive().images_written()
    );
    Ok(summary)
}
