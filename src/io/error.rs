//! # Error reporting for reading of problem files
//!
//! Failures while reading are either about the file (it can't be read), about the syntax (it
//! isn't a problem in the text format) or about the contents (the numbers don't form a valid
//! problem).
use std::fmt::{Debug, Display};
use std::io;

use thiserror::Error;

use crate::data::problem::ProblemError;

/// Created when a problem could not be imported.
///
/// It is the highest error in the io error hierarchy.
#[derive(Debug, Error)]
pub enum ImportError<T: Debug + Display + 'static> {
    /// The file to read isn't found, or the reading of file couldn't start or was interrupted.
    #[error("could not read problem file")]
    Io(#[from] io::Error),
    /// Contents of the file are not in the expected format.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The file is well formed, but describes an invalid problem.
    #[error(transparent)]
    Problem(#[from] ProblemError<T>),
}

/// A syntactically incorrect problem file.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// Something is wrong with a specific line.
    #[error("line {number}: {description}: \"{content}\"")]
    Line {
        /// Line number in the file as read from disk, starting at 1.
        number: u64,
        /// The line itself.
        content: String,
        /// What's wrong with it.
        description: String,
    },
    /// The file ended before the problem was complete.
    #[error("unexpected end of file, expected {expected}")]
    EndOfFile {
        /// The part of the problem that is missing.
        expected: String,
    },
}

impl ParseError {
    /// Create an error pointing at a line.
    ///
    /// # Arguments
    ///
    /// * `description`: What's wrong with the line.
    /// * `file_location`: Line number and line that caused the error.
    pub(crate) fn at(description: impl Into<String>, (number, content): FileLocation) -> Self {
        ParseError::Line {
            number,
            content: content.to_string(),
            description: description.into(),
        }
    }
}

/// A `FileLocation` references a line in the file by the line number of the file as originally
/// read from the disk. It contains a reference to the line itself.
pub(crate) type FileLocation<'a> = (u64, &'a str);
