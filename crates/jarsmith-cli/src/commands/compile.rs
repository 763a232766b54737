//! Compile command implementation.

use crate::cli::CompileArgs;
use crate::error::add_pack_context;
use crate::error::convert_compile_error;
use crate::output::CompileOutcome;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use jarsmith_core::CompilerConfig;
use jarsmith_core::JavaCompiler;
use std::process::ExitCode;

pub fn execute(
    args: &CompileArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<ExitCode> {
    let mut compiler = build_compiler(args);
    let success = compiler.compile().map_err(convert_compile_error)?;

    let mut packed = None;
    if success && let Some(name) = args.jar.as_deref() {
        let path = args.output.join(name);
        let result = if show_progress && CliProgress::should_show() {
            let mut progress = CliProgress::new("Packing");
            compiler.generate_jar_named_with_progress(name, &mut progress)
        } else {
            compiler.generate_jar_named(name)
        };
        let report = add_pack_context(result, &path)?;
        packed = Some((path, report));
    }

    let outcome = CompileOutcome {
        success,
        output_dir: &args.output,
        diagnostics: compiler.diagnostics(),
        messages: compiler.diagnostic_messages(),
        jar: packed.as_ref().map(|(path, report)| (path.as_path(), report)),
    };
    formatter.format_compile_result(&outcome)?;

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn build_compiler(args: &CompileArgs) -> JavaCompiler {
    let mut config = CompilerConfig::default();
    if let Some(javac) = &args.javac {
        config = config.with_javac(javac);
    }
    if let Some(encoding) = &args.encoding {
        config = config.with_encoding(encoding.as_str());
    }

    let mut compiler = JavaCompiler::with_config(config);
    compiler
        .add_options(&args.options)
        .set_output_folder(&args.output);
    for entry in &args.platform_classpath {
        compiler.add_platform_classpath_entry(entry);
    }
    for entry in &args.classpath {
        compiler.add_classpath_entry(entry);
    }
    for source in &args.sources {
        compiler.add_source_file(source);
    }
    compiler
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::path::PathBuf;

    #[test]
    fn test_build_compiler() {
        let args = CompileArgs {
            sources: vec![PathBuf::from("A.java")],
            output: PathBuf::from("out"),
            classpath: vec![PathBuf::from("lib.jar")],
            platform_classpath: vec![PathBuf::from("rt.jar")],
            options: vec!["-g".to_string()],
            encoding: None,
            javac: Some(PathBuf::from("/opt/jdk/bin/javac")),
            jar: None,
        };

        let compiler = build_compiler(&args);
        assert_eq!(compiler.options(), ["-g"]);
        assert_eq!(compiler.output_folder(), Some(Path::new("out")));
        assert_eq!(compiler.classpath(), [PathBuf::from("lib.jar")]);
        assert_eq!(compiler.platform_classpath(), [PathBuf::from("rt.jar")]);
        assert_eq!(compiler.source_files(), [PathBuf::from("A.java")]);
    }
}
