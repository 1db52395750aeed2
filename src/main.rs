use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use workbench_inspect::{inspect_sample, BuildOptions, OptionalPolicy, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = "Materialize a JSON sample into a label/value tree.",
    arg_required_else_help = true
)]
pub struct Args {
    /// Path to the JSON sample to inspect
    pub sample: String,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Pretty print JSON output
    #[clap(long)]
    pub pretty: bool,

    /// Only keep rows whose label or value matches this regular expression
    #[clap(long)]
    pub filter: Option<String>,

    /// Nested composite levels to expand before truncating
    #[clap(long)]
    pub max_depth: Option<usize>,

    /// Only pair optional fields through explicit annotations
    #[clap(long)]
    pub explicit_optional: bool,

    /// JSON file with build options
    #[clap(short, long)]
    pub config: Option<String>,

    /// Optional output file path. If omitted, writes to stdout.
    #[clap(short, long)]
    pub output: Option<String>,

    /// Trace the tree walk as an indented hierarchy
    #[clap(long)]
    pub debug_build: bool,

    /// Directory for log files
    #[clap(long)]
    pub log_dir: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    fn build_options(&self) -> Result<BuildOptions> {
        let mut options = match &self.config {
            Some(path) => BuildOptions::from_json_file(expand_path(path)?)?,
            None => BuildOptions::default(),
        };
        if let Some(max_depth) = self.max_depth {
            options.max_depth = max_depth;
        }
        if self.explicit_optional {
            options.optional_policy = OptionalPolicy::ExplicitOnly;
        }
        Ok(options)
    }

    fn output_format(&self) -> OutputFormat {
        match self.format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json {
                pretty: self.pretty,
            },
        }
    }
}

fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(raw).with_context(|| format!("Failed to expand path {}", raw))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

fn main() -> Result<()> {
    let args = Args::parse_args();

    // Keep the guard alive until the output is written
    let _guard = match &args.log_dir {
        Some(log_dir) => workbench_inspect::logging::init_logging_with_dir(
            args.debug_build,
            &expand_path(log_dir)?,
        )?,
        None => workbench_inspect::logging::init_logging(args.debug_build),
    };

    let options = args.build_options()?;
    let sample_path = expand_path(&args.sample)?;
    let sample = fs::read_to_string(&sample_path)
        .with_context(|| format!("Failed to read sample {}", sample_path.display()))?;

    let rendered = inspect_sample(
        &sample,
        &options,
        args.filter.as_deref(),
        args.output_format(),
    )?;

    match &args.output {
        Some(path) => {
            let path = expand_path(path)?;
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write output {}", path.display()))?;
            info!("Output written to: {:?}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
