//! The error type shared by the graph model and the render engine.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An edge endpoint that was never added to the graph or to any of its
    /// subgraphs.
    #[error("node \"{0}\" not found in the graph")]
    NodeNotFound(String),

    /// At least one output type must stay registered at all times.
    #[error("at least one output type must be defined")]
    NoOutputType,

    /// The destination path can only be set when a single output type is
    /// registered.
    #[error("more than one output type is defined")]
    AmbiguousOutputType,

    /// No variable named PATH (in any casing) in the process environment.
    #[error("PATH environment variable not found")]
    PathVariableMissing,

    /// No directory on the search path holds the layout program.
    #[error("\"{0}\" program not found")]
    ProgramNotFound(String),

    /// The layout program ran and exited with a non-zero status.
    #[error("\"{program}\" failed with {status}: {stderr}")]
    RenderFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The layout program did not finish within the configured deadline.
    #[error("\"{program}\" did not finish within {timeout:?}")]
    RenderTimeout { program: String, timeout: Duration },

    /// An I/O failure while writing the DOT file or running the program.
    #[error(transparent)]
    Io(#[from] io::Error),
}
