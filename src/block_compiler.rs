// Fold flat If/Else/Begin/End command runs into owned branch trees
//
// SPDX-License-Identifier: MIT
// Copyright (c) 2025 wbscript developers
//
// This file is part of the wbscript package.
// It is licensed under the MIT License.
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::command::{CodeCommand, CodeInfo, CodeType};
use crate::error_handling::section_error;
use uucore::error::UResult;

/// Compile a run of sibling commands into its final shape.
///
/// If and Else commands absorb their bodies into `link` (a single
/// embedded command, or the commands between their Begin and the
/// matching End); everything else passes through unchanged. The input
/// is borrowed, the output tree is owned.
///
/// An Else is legal while the else-eligible flag is set: after an If,
/// or after an Else whose own embed was an If or a Begin block. The
/// flag survives ordinary commands in between, which existing scripts
/// depend on.
pub fn compile_branch_block(codes: &[CodeCommand]) -> UResult<Vec<CodeCommand>> {
    let mut compiled: Vec<CodeCommand> = Vec::new();
    let mut else_flag = false;

    let mut idx = 0;
    while idx < codes.len() {
        let cmd = &codes[idx];
        match cmd.code_type {
            CodeType::If => {
                let (folded, last_idx) = compile_nested_if(cmd, codes, idx)?;
                compiled.push(folded);
                else_flag = true;
                idx = last_idx + 1;
            }
            CodeType::Else => {
                if !else_flag {
                    return section_error(
                        &cmd.addr,
                        &cmd.raw_line,
                        "[Else] must be used after [If]",
                    );
                }
                let (folded, last_idx, new_flag) = compile_nested_else(cmd, codes, idx)?;
                compiled.push(folded);
                else_flag = new_flag;
                idx = last_idx + 1;
            }
            CodeType::Begin => {
                return section_error(
                    &cmd.addr,
                    &cmd.raw_line,
                    "[Begin] cannot be used without a matching [If] or [Else]",
                );
            }
            CodeType::End => {
                return section_error(
                    &cmd.addr,
                    &cmd.raw_line,
                    "[End] must be matched with [Begin]",
                );
            }
            _ => {
                compiled.push(cmd.clone());
                idx += 1;
            }
        }
    }

    Ok(compiled)
}

// Fold one If command. Returns the folded command and the index of
// the last sibling it consumed (idx itself when the body was inline).
fn compile_nested_if(
    cmd: &CodeCommand,
    codes: &[CodeCommand],
    idx: usize,
) -> UResult<(CodeCommand, usize)> {
    let CodeInfo::If {
        embed, link_parsed, ..
    } = &cmd.info
    else {
        return section_error(&cmd.addr, &cmd.raw_line, "internal compiler error: not an If");
    };
    if *link_parsed {
        return section_error(
            &cmd.addr,
            &cmd.raw_line,
            "internal compiler error: branch block is already compiled",
        );
    }

    match embed.code_type {
        CodeType::If => {
            // The embed chains into another If; fold it against the
            // same sibling run, since any Begin block it opens lives
            // there.
            let (child, last_idx) = compile_nested_if(embed, codes, idx)?;
            Ok((make_linked_if(cmd, vec![child]), last_idx))
        }
        CodeType::Begin => {
            let Some(end_idx) = match_begin_with_end(codes, idx) else {
                return section_error(
                    &cmd.addr,
                    &cmd.raw_line,
                    "[Begin] must be matched with [End]",
                );
            };
            let body = compile_branch_block(&codes[idx + 1..end_idx])?;
            Ok((make_linked_if(cmd, body), end_idx))
        }
        CodeType::Else | CodeType::End => section_error(
            &cmd.addr,
            &cmd.raw_line,
            format!(
                "[{}] cannot be embedded into [If]",
                embed.code_type
            ),
        ),
        _ => Ok((make_linked_if(cmd, vec![embed.as_ref().clone()]), idx)),
    }
}

// Fold one Else command. Also returns the new else-eligible flag:
// true when the embed was an If or a Begin block, false for a plain
// embedded command.
fn compile_nested_else(
    cmd: &CodeCommand,
    codes: &[CodeCommand],
    idx: usize,
) -> UResult<(CodeCommand, usize, bool)> {
    let CodeInfo::Else {
        embed, link_parsed, ..
    } = &cmd.info
    else {
        return section_error(&cmd.addr, &cmd.raw_line, "internal compiler error: not an Else");
    };
    if *link_parsed {
        return section_error(
            &cmd.addr,
            &cmd.raw_line,
            "internal compiler error: branch block is already compiled",
        );
    }

    match embed.code_type {
        CodeType::If => {
            let (child, last_idx) = compile_nested_if(embed, codes, idx)?;
            Ok((make_linked_else(cmd, vec![child]), last_idx, true))
        }
        CodeType::Begin => {
            let Some(end_idx) = match_begin_with_end(codes, idx) else {
                return section_error(
                    &cmd.addr,
                    &cmd.raw_line,
                    "[Begin] must be matched with [End]",
                );
            };
            let body = compile_branch_block(&codes[idx + 1..end_idx])?;
            Ok((make_linked_else(cmd, body), end_idx, true))
        }
        CodeType::Else | CodeType::End => section_error(
            &cmd.addr,
            &cmd.raw_line,
            format!(
                "[{}] cannot be embedded into [Else]",
                embed.code_type
            ),
        ),
        _ => Ok((make_linked_else(cmd, vec![embed.as_ref().clone()]), idx, false)),
    }
}

fn make_linked_if(cmd: &CodeCommand, link: Vec<CodeCommand>) -> CodeCommand {
    let mut folded = cmd.clone();
    let CodeInfo::If {
        link: folded_link,
        link_parsed,
        ..
    } = &mut folded.info
    else {
        unreachable!("checked by the caller");
    };
    *folded_link = link;
    *link_parsed = true;
    folded
}

fn make_linked_else(cmd: &CodeCommand, link: Vec<CodeCommand>) -> CodeCommand {
    let mut folded = cmd.clone();
    let CodeInfo::Else {
        link: folded_link,
        link_parsed,
        ..
    } = &mut folded.info
    else {
        unreachable!("checked by the caller");
    };
    *folded_link = link;
    *link_parsed = true;
    folded
}

// Find the End closing the Begin block opened by codes[start_idx]
// (an If or Else whose embed chain terminates in Begin). Only
// branches that themselves open a Begin block deepen the nesting.
fn match_begin_with_end(codes: &[CodeCommand], start_idx: usize) -> Option<usize> {
    let mut nest = 0usize;

    for (idx, cmd) in codes.iter().enumerate().skip(start_idx + 1) {
        match cmd.code_type {
            CodeType::If | CodeType::Else => {
                if chain_ends_in_begin(cmd) {
                    nest += 1;
                }
            }
            CodeType::End => {
                if nest == 0 {
                    return Some(idx);
                }
                nest -= 1;
            }
            _ => {}
        }
    }

    None
}

// Walk the embed chain of a branch command; true if its final,
// non-branch embed is Begin.
fn chain_ends_in_begin(cmd: &CodeCommand) -> bool {
    let mut cur = cmd;
    loop {
        match &cur.info {
            CodeInfo::If { embed, .. } | CodeInfo::Else { embed, .. } => cur = embed,
            _ => return cur.code_type == CodeType::Begin,
        }
    }
}
