//! Pack command implementation.

use crate::cli::PackArgs;
use crate::cli::refuses_overwrite;
use crate::error::add_pack_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::bail;
use jarsmith_core::ArchiveConfig;
use jarsmith_core::ArchiveRequest;
use jarsmith_core::CreationReport;
use jarsmith_core::NoopProgress;
use jarsmith_core::ProgressCallback;
use jarsmith_core::archive::walker::normalize_path;
use jarsmith_core::create_jar_with_progress;
use std::path::Path;
use std::process::ExitCode;

pub fn execute(
    args: &PackArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<ExitCode> {
    let output = args.output_path();
    if refuses_overwrite(&output, args.force) {
        bail!(
            "Output file '{}' already exists\n\
             HINT: Use --force to overwrite.",
            output.display()
        );
    }

    let config = build_config(args);
    let exclude = args.exclude_path();

    // Use progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let report = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Packing");
        pack(args, &output, &exclude, &config, &mut progress)?
    } else {
        pack(args, &output, &exclude, &config, &mut NoopProgress)?
    };

    formatter.format_pack_result(&output, &report)?;

    Ok(ExitCode::SUCCESS)
}

fn build_config(args: &PackArgs) -> ArchiveConfig {
    let mut config = ArchiveConfig::default()
        .with_follow_symlinks(!args.no_follow_symlinks)
        .with_preserve_permissions(args.preserve_permissions);
    if let Some(level) = args.compression_level {
        config = config.with_compression_level(level);
    }
    config
}

fn pack(
    args: &PackArgs,
    output: &Path,
    exclude: &Path,
    config: &ArchiveConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    let result = if normalize_path(exclude) == normalize_path(output) {
        create_jar_with_progress(output, &args.root, config, progress)
    } else {
        ArchiveRequest::new(&args.root)
            .exclude(exclude)
            .write_jar_with_progress(output, config, progress)
    };
    add_pack_context(result, output)
}
