// Quote-aware splitting of command lines into argument lists
//
// SPDX-License-Identifier: MIT
// Copyright (c) 2025 wbscript developers
//
// This file is part of the wbscript package.
// It is licensed under the MIT License.
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error_handling::{LineError, invalid};

// States of the quote-merge machine. A Merging run is open between a
// piece that starts with a doublequote and the piece that ends with
// the closing doublequote; the commas split away in between are
// re-inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Normal,
    Merging,
}

/// Return true if the raw, unsplit line contains an even number of
/// doublequotes. An odd count means an unescaped quote the merge
/// machine cannot see; such lines are rejected before splitting.
pub fn has_balanced_quotes(raw_line: &str) -> bool {
    raw_line.chars().filter(|c| *c == '"').count() % 2 == 0
}

/// Merge comma-split pieces into the logical argument list.
///
/// Pieces are trimmed, then walked with a two-state machine:
/// - a piece without a doublequote is one argument (or joins the
///   merge in progress, with the split comma re-inserted);
/// - a piece that both starts and ends with a doublequote is one
///   self-contained quoted argument, quotes stripped;
/// - a piece that only starts with one opens a merge, a piece that
///   only ends with one closes it;
/// - a doublequote strictly inside a piece is an error, as is a line
///   that ends while a merge is still open.
///
/// `start` gives the first piece to consider, letting callers skip
/// the opcode slice.
pub fn parse_arguments(slices: &[&str], start: usize) -> Result<Vec<String>, LineError> {
    let mut args: Vec<String> = Vec::new();
    let mut state = ParseState::Normal;
    let mut merged = String::new();

    for slice in slices.iter().skip(start) {
        let piece = slice.trim();

        match piece.find('"') {
            None => match state {
                ParseState::Normal => args.push(piece.to_string()),
                ParseState::Merging => {
                    merged.push(',');
                    merged.push_str(piece);
                }
            },
            Some(0) => {
                if state != ParseState::Normal {
                    return invalid("wrong doublequote usage");
                }
                if 2 <= piece.len() && piece.ends_with('"') {
                    // Ex) FileCopy,"1 2.dll",34.dll
                    args.push(piece[1..piece.len() - 1].to_string());
                } else {
                    state = ParseState::Merging;
                    merged.clear();
                    merged.push_str(&piece[1..]);
                }
            }
            Some(idx) if idx == piece.len() - 1 => {
                if state != ParseState::Merging {
                    return invalid("wrong doublequote usage");
                }
                state = ParseState::Normal;
                merged.push(',');
                merged.push_str(&piece[..piece.len() - 1]);
                args.push(std::mem::take(&mut merged));
            }
            Some(_) => {
                // Doublequote in the middle of a piece
                return invalid("wrong doublequote usage");
            }
        }
    }

    if state == ParseState::Merging {
        return invalid("doublequotes are not matched");
    }

    Ok(args)
}

/// Resolve trailing `\` continuation markers by splicing in the
/// split-and-merged arguments of following physical lines.
///
/// `idx` points at the current physical line within `raw_lines` and
/// is advanced past every consumed continuation line. A section that
/// ends while a continuation is still open is a fatal parse error for
/// the command.
pub fn splice_continuations(
    args: &mut Vec<String>,
    raw_lines: &[String],
    idx: &mut usize,
) -> Result<(), LineError> {
    while args.last().is_some_and(|a| a == "\\") {
        if raw_lines.len() <= *idx + 1 {
            return invalid("last command of a section cannot end with '\\'");
        }
        args.pop();
        *idx += 1;
        let line = raw_lines[*idx].trim();
        if !has_balanced_quotes(line) {
            return invalid("doublequote's number should be an even number");
        }
        let slices: Vec<&str> = line.split(',').collect();
        args.extend(parse_arguments(&slices, 0)?);
    }
    Ok(())
}
