// Extract the raw lines of a named script section
//
// SPDX-License-Identifier: MIT
// Copyright (c) 2025 wbscript developers
//
// This file is part of the wbscript package.
// It is licensed under the MIT License.
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use uucore::error::{UResult, USimpleError};

// A section header is a whole line of the form [Name].
fn header_name(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
        Some(&trimmed[1..trimmed.len() - 1])
    } else {
        None
    }
}

fn open(path: &Path) -> UResult<BufReader<File>> {
    let file = File::open(path)
        .map_err(|e| USimpleError::new(1, format!("cannot open {}: {}", path.display(), e)))?;
    Ok(BufReader::new(file))
}

/// Read the raw lines of `section` from the script at `path`.
///
/// Section names are matched case-insensitively. Lines are returned
/// untrimmed; the parsers do their own trimming. A script without the
/// requested section is an error.
pub fn read_section(path: &Path, section: &str) -> UResult<Vec<String>> {
    let reader = open(path)?;

    let mut lines: Vec<String> = Vec::new();
    let mut in_section = false;
    let mut found = false;

    for line in reader.lines() {
        let line = line.map_err(|e| {
            USimpleError::new(1, format!("cannot read {}: {}", path.display(), e))
        })?;
        if let Some(name) = header_name(&line) {
            in_section = name.eq_ignore_ascii_case(section);
            if in_section {
                found = true;
            }
            continue;
        }
        if in_section {
            lines.push(line);
        }
    }

    if !found {
        return Err(USimpleError::new(
            1,
            format!("{}: section [{}] not found", path.display(), section),
        ));
    }
    Ok(lines)
}

/// List the section names of the script at `path`, in order.
pub fn list_sections(path: &Path) -> UResult<Vec<String>> {
    let reader = open(path)?;

    let mut names: Vec<String> = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| {
            USimpleError::new(1, format!("cannot read {}: {}", path.display(), e))
        })?;
        if let Some(name) = header_name(&line) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
