//! Driver for the external `javac` compiler.
//!
//! [`JavaCompiler`] collects sources, classpath entries and options, runs
//! `javac`, keeps the diagnostics it reports and can package the class
//! output folder into a jar.
//!
//! # Examples
//!
//! ```no_run
//! use jarsmith_core::JavaCompiler;
//!
//! let mut compiler = JavaCompiler::new();
//! compiler
//!     .add_options(&["-g", "-Xlint:all"])
//!     .set_output_folder("build/classes")
//!     .add_classpath_entry("lib/commons-lang3.jar")
//!     .add_source_file("src/com/example/Main.java");
//!
//! if compiler.compile()? {
//!     compiler.generate_jar()?;
//! } else {
//!     eprint!("{}", compiler.diagnostic_messages());
//! }
//! # Ok::<(), jarsmith_core::JarsmithError>(())
//! ```

pub mod config;
mod util;

pub use config::CompilerConfig;

use crate::JarsmithError;
use crate::ProgressCallback;
use crate::Result;
use crate::archive::ArchiveConfig;
use crate::archive::CreationReport;
use crate::archive::create_jar_with_progress;
use crate::diagnostics::Diagnostic;
use crate::diagnostics::format_messages;
use crate::diagnostics::parse_javac_output;
use crate::progress::NoopProgress;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use tracing::debug;
use tracing::info;

/// Jar name used by [`JavaCompiler::generate_jar`].
pub const DEFAULT_JAR_NAME: &str = "classes.jar";

/// Collects compiler inputs, runs `javac` and packages its output.
#[derive(Debug, Clone, Default)]
pub struct JavaCompiler {
    config: CompilerConfig,
    archive_config: ArchiveConfig,
    options: Vec<String>,
    output_folder: Option<PathBuf>,
    sources: Vec<PathBuf>,
    classpath: Vec<PathBuf>,
    platform_classpath: Vec<PathBuf>,
    diagnostics: Vec<Diagnostic>,
}

impl JavaCompiler {
    /// Creates a driver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver with the given compiler settings.
    #[must_use]
    pub fn with_config(config: CompilerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Sets the settings used when packaging the output folder.
    #[must_use]
    pub fn with_archive_config(mut self, archive_config: ArchiveConfig) -> Self {
        self.archive_config = archive_config;
        self
    }

    /// Appends compiler options verbatim.
    pub fn add_options<S: AsRef<str>>(&mut self, options: &[S]) -> &mut Self {
        self.options
            .extend(options.iter().map(|o| o.as_ref().to_string()));
        self
    }

    /// Sets the class output directory.
    pub fn set_output_folder<P: AsRef<Path>>(&mut self, path: P) -> &mut Self {
        self.output_folder = Some(path.as_ref().to_path_buf());
        self
    }

    /// Adds a source file to compile.
    pub fn add_source_file<P: AsRef<Path>>(&mut self, path: P) -> &mut Self {
        self.sources.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds a jar or directory to the classpath.
    pub fn add_classpath_entry<P: AsRef<Path>>(&mut self, path: P) -> &mut Self {
        self.classpath.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds a jar to the platform classpath.
    ///
    /// Entries are passed as `-bootclasspath`, which javac 9 and later only
    /// accept together with `-source 8` (or `--release 8`) or lower; newer
    /// targets fail with an error diagnostic.
    pub fn add_platform_classpath_entry<P: AsRef<Path>>(&mut self, path: P) -> &mut Self {
        self.platform_classpath.push(path.as_ref().to_path_buf());
        self
    }

    /// Returns the compiler options in insertion order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns the class output directory, if set.
    #[must_use]
    pub fn output_folder(&self) -> Option<&Path> {
        self.output_folder.as_deref()
    }

    /// Returns the source files in insertion order.
    #[must_use]
    pub fn source_files(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Returns the classpath entries in insertion order.
    #[must_use]
    pub fn classpath(&self) -> &[PathBuf] {
        &self.classpath
    }

    /// Returns the platform classpath entries in insertion order.
    #[must_use]
    pub fn platform_classpath(&self) -> &[PathBuf] {
        &self.platform_classpath
    }

    /// Builds the `javac` invocation without running it.
    ///
    /// The output folder is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when no output folder is set, no sources were
    /// added or a classpath entry contains the path separator,
    /// `CompilerNotFound` when `javac` is not on `PATH`, and `Io` when the
    /// output folder cannot be created.
    pub fn command(&self) -> Result<Command> {
        let output = self.require_output_folder()?;
        if self.sources.is_empty() {
            return Err(JarsmithError::InvalidConfig {
                reason: "no source files added".to_string(),
            });
        }

        fs::create_dir_all(output)?;

        let mut command = Command::new(util::javac_path(&self.config)?);
        if let Some(encoding) = &self.config.encoding {
            command.arg("-encoding").arg(encoding);
        }
        command.args(&self.options).arg("-d").arg(output);

        if !self.platform_classpath.is_empty() {
            command
                .arg("-bootclasspath")
                .arg(util::join_classpath(&self.platform_classpath)?);
        }
        if !self.classpath.is_empty() {
            command
                .arg("-classpath")
                .arg(util::join_classpath(&self.classpath)?);
        }

        command.args(&self.sources);
        Ok(command)
    }

    /// Runs `javac` and records its diagnostics.
    ///
    /// Returns `true` when compilation succeeded. Diagnostics accumulate
    /// across calls.
    ///
    /// # Errors
    ///
    /// See [`JavaCompiler::command`]; also returns `CompilerSpawn` when the
    /// process cannot be started.
    pub fn compile(&mut self) -> Result<bool> {
        let mut command = self.command()?;
        let program = PathBuf::from(command.get_program());
        debug!(program = %program.display(), sources = self.sources.len(), "running javac");

        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|source| JarsmithError::CompilerSpawn { program, source })?;

        let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stdout));
        let parsed = parse_javac_output(&text);
        let success = output.status.success();

        info!(
            success,
            diagnostics = parsed.len(),
            status = %output.status,
            "compilation finished"
        );

        self.diagnostics.extend(parsed);
        Ok(success)
    }

    /// Returns the diagnostics collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Renders every collected diagnostic on its own line.
    ///
    /// See [`Diagnostic`]'s `Display` implementation for the format.
    #[must_use]
    pub fn diagnostic_messages(&self) -> String {
        format_messages(&self.diagnostics)
    }

    /// Packages the output folder into `<output>/classes.jar`.
    ///
    /// # Errors
    ///
    /// See [`JavaCompiler::generate_jar_named`].
    pub fn generate_jar(&self) -> Result<CreationReport> {
        self.generate_jar_named(DEFAULT_JAR_NAME)
    }

    /// Packages the output folder into `<output>/<name>`.
    ///
    /// The jar itself is excluded from its own contents. A partially written
    /// jar is removed on failure.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when no output folder is set or `name` is
    /// empty, and any packaging error from [`crate::archive::create_jar`].
    pub fn generate_jar_named(&self, name: &str) -> Result<CreationReport> {
        self.generate_jar_named_with_progress(name, &mut NoopProgress)
    }

    /// Packages the output folder into `<output>/<name>` with progress
    /// reporting.
    ///
    /// # Errors
    ///
    /// See [`JavaCompiler::generate_jar_named`].
    pub fn generate_jar_named_with_progress(
        &self,
        name: &str,
        progress: &mut dyn ProgressCallback,
    ) -> Result<CreationReport> {
        let output = self.require_output_folder()?;
        if name.is_empty() {
            return Err(JarsmithError::InvalidConfig {
                reason: "jar name is empty".to_string(),
            });
        }

        let jar = output.join(name);
        debug!(jar = %jar.display(), "packaging class output");
        create_jar_with_progress(&jar, output, &self.archive_config, progress)
    }

    fn require_output_folder(&self) -> Result<&Path> {
        self.output_folder
            .as_deref()
            .ok_or_else(|| JarsmithError::InvalidConfig {
                reason: "no output folder set".to_string(),
            })
    }
}
