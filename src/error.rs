use std::{fmt, io, path::PathBuf};

/// Errors that stop a run before the full report can be produced.
#[derive(Debug)]
pub enum Error {
    /// The program was not given exactly one argument.
    Usage { program: String },
    /// The input file could not be opened.
    FileOpen { path: PathBuf, source: io::Error },
    /// The input file was opened but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The report could not be written out.
    Write(io::Error),
    /// Statistics were requested for a tree with no nodes.
    EmptyTree,
}

impl Error {
    /// Returns the process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Usage { .. } | Error::FileOpen { .. } | Error::Read { .. } | Error::Write(_) => 1,
            Error::EmptyTree => 2,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage { program } => write!(f, "Usage: {program} <filename>"),
            Error::FileOpen { path, source } => {
                write!(f, "Error opening file {}: {source}", path.display())
            }
            Error::Read { path, source } => {
                write!(f, "Error reading file {}: {source}", path.display())
            }
            Error::Write(source) => write!(f, "Error writing report: {source}"),
            Error::EmptyTree => write!(f, "Tree is empty: no min, max or average to report"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FileOpen { source, .. } | Error::Read { source, .. } | Error::Write(source) => {
                Some(source)
            }
            Error::Usage { .. } | Error::EmptyTree => None,
        }
    }
}
