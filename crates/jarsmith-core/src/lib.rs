//! Java compilation and jar packaging.
//!
//! `jarsmith-core` packages a directory tree into a jar (zip) archive with
//! entry names relative to the root, and drives the external `javac`
//! compiler, collecting its diagnostics.
//!
//! # Examples
//!
//! ```no_run
//! use jarsmith_core::ArchiveConfig;
//! use jarsmith_core::create_jar;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = create_jar(
//!     Path::new("build/classes/classes.jar"),
//!     Path::new("build/classes"),
//!     &ArchiveConfig::default(),
//! )?;
//! println!("Packed {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod progress;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use archive::ArchiveConfig;
pub use archive::ArchiveRequest;
pub use archive::CreationReport;
pub use archive::archive_directory;
pub use archive::archive_directory_with_progress;
pub use archive::create_jar;
pub use archive::create_jar_with_progress;
pub use compiler::CompilerConfig;
pub use compiler::JavaCompiler;
pub use diagnostics::Diagnostic;
pub use diagnostics::DiagnosticKind;
pub use error::JarsmithError;
pub use error::Result;
pub use progress::NoopProgress;
pub use progress::ProgressCallback;
