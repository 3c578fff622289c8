//! CLI argument definitions using clap derive macros.

use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;

use sample_fetcher_core::{
    DEFAULT_MANIFEST_URL, DEFAULT_OUTPUT_DIR, DEFAULT_SAMPLE_TIMEOUT_SECS, FetchConfig,
};

/// Long flags that older scripts pass with a single dash (`-outputdir dir`).
const SINGLE_DASH_LONG_FLAGS: &[&str] = &["outputdir"];

/// Download every malware sample listed in the objective-see manifest.
///
/// Fetches the manifest, then downloads each sample into the output
/// directory, one at a time, naming each file after the sample.
#[derive(Parser, Debug)]
#[command(name = "sample-fetcher")]
#[command(author, version, about)]
pub struct Args {
    /// Output directory for the malware samples
    #[arg(
        short = 'o',
        long = "outputdir",
        visible_alias = "output-dir",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dir: String,

    /// Manifest location
    #[arg(long, default_value = DEFAULT_MANIFEST_URL)]
    pub manifest_url: String,

    /// Per-sample request timeout in seconds (1-3600)
    #[arg(short = 't', long, default_value_t = DEFAULT_SAMPLE_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: u64,

    /// Fetch the manifest and list file names without downloading
    #[arg(long)]
    pub dry_run: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors to stderr (stdout progress lines still print)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parses process arguments, accepting single-dash long flags.
    pub fn parse_from_env() -> Self {
        Self::parse_from(normalize_single_dash_flags(std::env::args_os()))
    }

    /// Builds the run configuration from the parsed flags.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::new()
            .with_output_dir(&self.output_dir)
            .with_manifest_url(self.manifest_url.clone())
            .with_sample_timeout(Duration::from_secs(self.timeout))
    }
}

/// Rewrites `-outputdir` and `-outputdir=dir` to their `--` form.
pub fn normalize_single_dash_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if SINGLE_DASH_LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}
