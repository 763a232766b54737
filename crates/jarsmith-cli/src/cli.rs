//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use jarsmith_core::compiler::DEFAULT_JAR_NAME;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jarsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Package a directory tree into a jar
    Pack(PackArgs),
    /// Compile Java sources with javac
    Compile(CompileArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct PackArgs {
    /// Directory whose contents are archived
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Output jar path (default: ROOT/classes.jar)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Path to leave out of the archive, with everything below it
    /// (default: OUTPUT)
    #[arg(short = 'x', long, value_name = "PATH")]
    pub exclude: Option<PathBuf>,

    /// Compression level (0 stores entries, 1-9 deflates)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: Option<u8>,

    /// Skip symbolic links instead of archiving their targets
    #[arg(long)]
    pub no_follow_symlinks: bool,

    /// Store Unix permission bits in entries
    #[arg(long)]
    pub preserve_permissions: bool,

    /// Overwrite output file if exists
    #[arg(short = 'f', long)]
    pub force: bool,
}

impl PackArgs {
    /// Resolved output path.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_JAR_NAME))
    }

    /// Resolved exclusion; defaults to the output path.
    pub fn exclude_path(&self) -> PathBuf {
        self.exclude.clone().unwrap_or_else(|| self.output_path())
    }
}

#[derive(clap::Args)]
pub struct CompileArgs {
    /// Java source files to compile
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Class output directory
    #[arg(short = 'd', long = "output", value_name = "DIR")]
    pub output: PathBuf,

    /// Classpath entry (can be repeated)
    #[arg(long = "cp", value_name = "ENTRY")]
    pub classpath: Vec<PathBuf>,

    /// Platform classpath entry (can be repeated)
    #[arg(long = "platform-cp", value_name = "ENTRY")]
    pub platform_classpath: Vec<PathBuf>,

    /// Option passed verbatim to javac (can be repeated)
    #[arg(
        short = 'X',
        long = "javac-option",
        value_name = "OPTION",
        allow_hyphen_values = true
    )]
    pub options: Vec<String>,

    /// Source file encoding
    #[arg(long, value_name = "CHARSET")]
    pub encoding: Option<String>,

    /// javac executable (default: looked up on PATH)
    #[arg(long, value_name = "PATH")]
    pub javac: Option<PathBuf>,

    /// Package the output directory into a jar after a successful build
    #[arg(
        long,
        value_name = "NAME",
        num_args = 0..=1,
        default_missing_value = DEFAULT_JAR_NAME
    )]
    pub jar: Option<String>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Returns `true` if `path` is an existing file that should not be replaced.
pub fn refuses_overwrite(path: &Path, force: bool) -> bool {
    !force && path.exists()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pack_defaults() {
        let cli = parse(&["jarsmith", "pack", "build/classes"]);
        let Commands::Pack(args) = cli.command else {
            panic!("expected pack");
        };
        assert_eq!(args.output_path(), PathBuf::from("build/classes/classes.jar"));
        assert_eq!(args.exclude_path(), args.output_path());
        assert_eq!(args.compression_level, None);
        assert!(!args.force);
    }

    #[test]
    fn test_pack_explicit_exclude() {
        let cli = parse(&["jarsmith", "pack", "root", "-o", "out.jar", "-x", "root/tmp"]);
        let Commands::Pack(args) = cli.command else {
            panic!("expected pack");
        };
        assert_eq!(args.output_path(), PathBuf::from("out.jar"));
        assert_eq!(args.exclude_path(), PathBuf::from("root/tmp"));
    }

    #[test]
    fn test_pack_rejects_level_above_nine() {
        assert!(Cli::try_parse_from(["jarsmith", "pack", "root", "-l", "10"]).is_err());
    }

    #[test]
    fn test_compile_args() {
        let cli = parse(&[
            "jarsmith", "compile", "-d", "out", "--cp", "a.jar", "--cp", "b.jar", "-X", "-g",
            "-X", "-Xlint:all", "--jar", "--", "A.java", "B.java",
        ]);
        let Commands::Compile(args) = cli.command else {
            panic!("expected compile");
        };
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.classpath, vec![PathBuf::from("a.jar"), PathBuf::from("b.jar")]);
        assert_eq!(args.options, vec!["-g", "-Xlint:all"]);
        assert_eq!(args.jar.as_deref(), Some(DEFAULT_JAR_NAME));
        assert_eq!(args.sources.len(), 2);
    }

    #[test]
    fn test_compile_named_jar() {
        let cli = parse(&["jarsmith", "compile", "-d", "out", "--jar=app.jar", "A.java"]);
        let Commands::Compile(args) = cli.command else {
            panic!("expected compile");
        };
        assert_eq!(args.jar.as_deref(), Some("app.jar"));
    }

    #[test]
    fn test_verbose_count() {
        let cli = parse(&["jarsmith", "-vv", "pack", "root"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_refuses_overwrite() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        assert!(refuses_overwrite(temp.path(), false));
        assert!(!refuses_overwrite(temp.path(), true));
        assert!(!refuses_overwrite(Path::new("/definitely/not/here.jar"), false));
    }
}
