// Diagnostic records and error construction helpers
//
// SPDX-License-Identifier: MIT
// Copyright (c) 2025 wbscript developers
//
// This file is part of the wbscript package.
// It is licensed under the MIT License.
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::command::SectionAddress;
use std::fmt;
use uucore::error::{UResult, USimpleError};

/// Severity of a recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A per-line parse failure recorded without aborting the batch parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub raw_line: String,
}

impl Diagnostic {
    pub fn error(message: impl ToString, raw_line: &str) -> Self {
        Self {
            severity: Severity::Error,
            message: message.to_string(),
            raw_line: raw_line.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.severity, self.message, self.raw_line)
    }
}

/// Outcome classification for one logical line.
///
/// `Empty` is not an error: blank and comment lines are silently
/// elided. `Invalid` is recoverable at the batch level and becomes a
/// `Diagnostic` plus an Error placeholder command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    Empty,
    Invalid(String),
}

/// Fail with msg as a recoverable per-line parse error.
pub fn invalid<T>(msg: impl ToString) -> Result<T, LineError> {
    Err(LineError::Invalid(msg.to_string()))
}

/// Fail with msg as a fatal section-level error at the given address.
/// The error's exit code is 1 (compilation phase).
pub fn section_error<T>(addr: &SectionAddress, raw_line: &str, msg: impl ToString) -> UResult<T> {
    Err(USimpleError::new(
        1,
        format!("{}: error: {} [{}]", addr, msg.to_string(), raw_line),
    ))
}
