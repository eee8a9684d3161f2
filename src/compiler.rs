// Compile raw script lines into validated commands
//
// SPDX-License-Identifier: MIT
// Copyright (c) 2025 wbscript developers
//
// This file is part of the wbscript package.
// It is licensed under the MIT License.
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::argument_splitter::{has_balanced_quotes, parse_arguments, splice_continuations};
use crate::block_compiler::compile_branch_block;
use crate::command::{
    BeepType, BranchCondition, BranchConditionType, CodeCommand, CodeInfo, CodeType, FileEncoding,
    MessageAction, SectionAddress, TxtAddMode,
};
use crate::error_handling::{Diagnostic, LineError, invalid, section_error};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use uucore::error::UResult;

// A global, immutable map of opcode spellings, initialized on first access.
// Lookup is case-sensitive: opcode names are written in their canonical
// spelling; any other token resolves to a macro invocation.
static OPCODE_MAP: Lazy<HashMap<&'static str, CodeType>> = Lazy::new(build_opcode_map);

// Opcode tokens may only contain letters and underscores.
static OPCODE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_]+$").unwrap());

// A #<digits> positional-parameter reference, e.g. #1.
static POSITIONAL_PARAM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\d+").unwrap());

fn build_opcode_map() -> HashMap<&'static str, CodeType> {
    use CodeType::*;
    let spellings = [
        ("CopyOrExpand", CopyOrExpand),
        ("DirCopy", DirCopy),
        ("DirDelete", DirDelete),
        ("DirMove", DirMove),
        ("DirMake", DirMake),
        ("Expand", Expand),
        ("FileCopy", FileCopy),
        ("FileDelete", FileDelete),
        ("FileRename", FileRename),
        ("FileMove", FileMove),
        ("FileCreateBlank", FileCreateBlank),
        ("FileByteExtract", FileByteExtract),
        ("RegHiveLoad", RegHiveLoad),
        ("RegHiveUnload", RegHiveUnload),
        ("RegImport", RegImport),
        ("RegWrite", RegWrite),
        ("RegRead", RegRead),
        ("RegDelete", RegDelete),
        ("RegWriteBin", RegWriteBin),
        ("RegReadBin", RegReadBin),
        ("TXTAddLine", TXTAddLine),
        ("TXTReplace", TXTReplace),
        ("TXTDelLine", TXTDelLine),
        ("TXTDelSpaces", TXTDelSpaces),
        ("TXTDelEmptyLines", TXTDelEmptyLines),
        ("INIWrite", INIWrite),
        ("INIRead", INIRead),
        ("INIDelete", INIDelete),
        ("INIAddSection", INIAddSection),
        ("INIDeleteSection", INIDeleteSection),
        ("INIWriteTextLine", INIWriteTextLine),
        ("INIMerge", INIMerge),
        ("WebGet", WebGet),
        ("WebGetIfNotExist", WebGetIfNotExist),
        ("ExtractFile", ExtractFile),
        ("ExtractAndRun", ExtractAndRun),
        ("ExtractAllFiles", ExtractAllFiles),
        ("ExtractAllFilesIfNotExist", ExtractAllFilesIfNotExist),
        ("Encode", Encode),
        ("Message", Message),
        ("Echo", Echo),
        ("Retrieve", Retrieve),
        ("Visible", Visible),
        ("StrFormat", StrFormat),
        ("System", System),
        ("ShellExecute", ShellExecute),
        ("ShellExecuteEx", ShellExecuteEx),
        ("ShellExecuteDelete", ShellExecuteDelete),
        ("Run", Run),
        ("Exec", Exec),
        ("Loop", Loop),
        ("If", If),
        ("Else", Else),
        ("Begin", Begin),
        ("End", End),
        ("Set", Set),
        ("GetParam", GetParam),
        ("PackParam", PackParam),
        ("AddVariables", AddVariables),
        ("Exit", Exit),
        ("Halt", Halt),
        ("Wait", Wait),
        ("Beep", Beep),
    ];

    spellings.into_iter().collect()
}

/// Resolve an opcode token.
///
/// The token must consist of letters and underscores only. A token
/// that names a built-in opcode yields it; anything else is a macro
/// invocation and the original token is returned as the macro name.
pub fn parse_code_type(token: &str) -> Result<(CodeType, Option<String>), LineError> {
    if !OPCODE_TOKEN_RE.is_match(token) {
        return invalid("only alphabet and underscore can be used as opcode");
    }

    match OPCODE_MAP.get(token) {
        Some(code_type) => Ok((*code_type, None)),
        None => Ok((CodeType::Macro, Some(token.to_string()))),
    }
}

/// Parse one standalone line into a command.
///
/// Returns `None` for blank lines; comment lines yield a `Comment`
/// sentinel command. Parse failures are reported as fatal errors at
/// the given address.
pub fn parse_one_raw_line(raw_code: &str, addr: &SectionAddress) -> UResult<Option<CodeCommand>> {
    let lines = vec![raw_code.to_string()];
    let mut idx = 0;

    match parse_command(&lines, addr, &mut idx) {
        Ok(cmd) => Ok(Some(cmd)),
        Err(LineError::Empty) => Ok(None),
        Err(LineError::Invalid(msg)) => section_error(addr, raw_code.trim(), msg),
    }
}

/// Parse and compile a whole section.
///
/// Blank and comment lines are silently elided. A line that fails to
/// parse is kept as an `Error` placeholder command (so positions and
/// counts hold) and recorded as a diagnostic; the rest of the section
/// still parses. Branch-block compilation errors are fatal for the
/// section, since broken nesting is unrecoverable.
pub fn parse_raw_lines(
    lines: &[String],
    addr: &SectionAddress,
) -> UResult<(Vec<CodeCommand>, Vec<Diagnostic>)> {
    let mut code_list: Vec<CodeCommand> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let mut idx = 0;
    while idx < lines.len() {
        let raw_line = lines[idx].trim().to_string();
        match parse_command(lines, addr, &mut idx) {
            Ok(cmd) => {
                if cmd.code_type != CodeType::Comment {
                    code_list.push(cmd);
                }
            }
            Err(LineError::Empty) => {}
            Err(LineError::Invalid(msg)) => {
                code_list.push(CodeCommand::error(&raw_line, addr));
                diagnostics.push(Diagnostic::error(msg, &raw_line));
            }
        }
        idx += 1;
    }

    let compiled = compile_branch_block(&code_list)?;
    Ok((compiled, diagnostics))
}

// Parse the logical command starting at lines[*idx], advancing *idx
// past any continuation lines it consumes.
fn parse_command(
    lines: &[String],
    addr: &SectionAddress,
    idx: &mut usize,
) -> Result<CodeCommand, LineError> {
    let raw_code = lines[*idx].trim();

    if raw_code.is_empty() {
        return Err(LineError::Empty);
    }

    // Comment format: starts with '//', '#' or ';'
    if raw_code.starts_with("//") || raw_code.starts_with('#') || raw_code.starts_with(';') {
        return Ok(CodeCommand::new(
            raw_code,
            addr,
            0,
            CodeType::Comment,
            CodeInfo::None,
        ));
    }

    // Doublequote occurrences must come in pairs; an odd count means
    // an unescaped quote the merge machine cannot detect.
    if !has_balanced_quotes(raw_code) {
        return invalid("doublequote's number should be an even number");
    }

    let slices: Vec<&str> = raw_code.split(',').collect();
    let (code_type, macro_type) = parse_code_type(slices[0].trim())?;

    let mut args = parse_arguments(&slices, 1)?;
    splice_continuations(&mut args, lines, idx)?;

    let info = parse_code_info(code_type, macro_type, &args, addr, 0)?;
    Ok(CodeCommand::new(raw_code, addr, 0, code_type, info))
}

// Build the embedded command of an If or Else from the already-split
// argument tail; args[0] is the embedded command's opcode.
fn parse_command_from_sliced_args(
    raw_code: &str,
    args: &[String],
    addr: &SectionAddress,
    depth: usize,
) -> Result<CodeCommand, LineError> {
    let Some(op_token) = args.first() else {
        return invalid("branch command must contain an embedded command");
    };

    let (code_type, macro_type) = parse_code_type(op_token)?;
    let info = parse_code_info(code_type, macro_type, &args[1..], addr, depth)?;
    Ok(CodeCommand::new(raw_code, addr, depth, code_type, info))
}

/// Forge the embedded command of an If or Else at depth + 1.
/// A Run embed keeps the branch's own depth, since it transfers
/// control to another section rather than nesting in place.
fn forge_embed_command(
    raw_code: &str,
    args: &[String],
    addr: &SectionAddress,
    depth: usize,
) -> Result<CodeCommand, LineError> {
    let mut embed = parse_command_from_sliced_args(raw_code, args, addr, depth + 1)?;
    if embed.code_type == CodeType::Run {
        embed.depth -= 1;
    }
    Ok(embed)
}

// Fail when the argument count falls outside [min, max]; max of None
// means unbounded (variadic opcode).
fn check_info_arg_count(
    code_type: CodeType,
    args: &[String],
    min: usize,
    max: Option<usize>,
) -> Result<(), LineError> {
    match max {
        Some(max) if args.len() < min || max < args.len() => invalid(format!(
            "command [{}] can have [{}] ~ [{}] arguments",
            code_type, min, max
        )),
        None if args.len() < min => invalid(format!(
            "command [{}] must have at least [{}] arguments",
            code_type, min
        )),
        _ => Ok(()),
    }
}

// Parse a numeric positional value, naming the operand on failure.
fn parse_numeric<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, LineError> {
    value
        .parse::<T>()
        .map_err(|_| LineError::Invalid(format!("{} [{}] is not a valid number", what, value)))
}

/// Validate an opcode's argument list and build its typed payload.
pub fn parse_code_info(
    code_type: CodeType,
    macro_type: Option<String>,
    args: &[String],
    addr: &SectionAddress,
    depth: usize,
) -> Result<CodeInfo, LineError> {
    use CodeType as Ct;

    match code_type {
        // Sentinels. Comment is handled before info construction; the
        // others only appear as placeholders built elsewhere.
        Ct::None | Ct::Comment | Ct::Error => Ok(CodeInfo::None),

        // File
        Ct::CopyOrExpand => {
            check_info_arg_count(code_type, args, 2, Some(3))?;
            let mut preserve = false;
            for arg in &args[2..] {
                if arg.eq_ignore_ascii_case("PRESERVE") {
                    preserve = true;
                } else {
                    return invalid(format!("invalid argument [{}]", arg));
                }
            }
            Ok(CodeInfo::CopyOrExpand {
                src_file: args[0].clone(),
                dest_path: args[1].clone(),
                preserve,
            })
        }
        Ct::DirCopy => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::DirCopy {
                src_dir: args[0].clone(),
                dest_dir: args[1].clone(),
            })
        }
        Ct::DirDelete => {
            check_info_arg_count(code_type, args, 1, Some(1))?;
            Ok(CodeInfo::DirDelete {
                dir_path: args[0].clone(),
            })
        }
        Ct::DirMove => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::DirMove {
                src_dir: args[0].clone(),
                dest_path: args[1].clone(),
            })
        }
        Ct::DirMake => {
            check_info_arg_count(code_type, args, 1, Some(1))?;
            Ok(CodeInfo::DirMake {
                dest_dir: args[0].clone(),
            })
        }
        Ct::Expand => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::Expand {
                src_cab: args[0].clone(),
                dest_dir: args[1].clone(),
            })
        }
        Ct::FileCopy => {
            // FileCopy,<SrcFile>,<DestPath>[,PRESERVE][,NOWARN][,NOREC][,SHOW]
            check_info_arg_count(code_type, args, 2, Some(6))?;
            let mut preserve = false;
            let mut no_warn = false;
            let mut no_rec = false;
            let mut show = false;
            for arg in &args[2..] {
                if arg.eq_ignore_ascii_case("PRESERVE") {
                    preserve = true;
                } else if arg.eq_ignore_ascii_case("NOWARN") {
                    no_warn = true;
                } else if arg.eq_ignore_ascii_case("SHOW") {
                    // for compatibility with WB082
                    show = true;
                } else if arg.eq_ignore_ascii_case("NOREC") {
                    // no recursive wildcard copy
                    no_rec = true;
                } else {
                    return invalid(format!("invalid argument [{}]", arg));
                }
            }
            Ok(CodeInfo::FileCopy {
                src_file: args[0].clone(),
                dest_path: args[1].clone(),
                preserve,
                no_warn,
                no_rec,
                show,
            })
        }
        Ct::FileDelete => {
            check_info_arg_count(code_type, args, 1, Some(3))?;
            let mut no_warn = false;
            let mut no_rec = false;
            for arg in &args[1..] {
                if arg.eq_ignore_ascii_case("NOWARN") {
                    no_warn = true;
                } else if arg.eq_ignore_ascii_case("NOREC") {
                    no_rec = true;
                } else {
                    return invalid(format!("invalid argument [{}]", arg));
                }
            }
            Ok(CodeInfo::FileDelete {
                file_path: args[0].clone(),
                no_warn,
                no_rec,
            })
        }
        Ct::FileRename => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::FileRename {
                src_path: args[0].clone(),
                dest_path: args[1].clone(),
            })
        }
        Ct::FileMove => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::FileMove {
                src_path: args[0].clone(),
                dest_path: args[1].clone(),
            })
        }
        Ct::FileCreateBlank => {
            // FileCreateBlank,<FilePath>[,PRESERVE][,NOWARN][,Encoding]
            check_info_arg_count(code_type, args, 1, Some(4))?;
            let mut preserve = false;
            let mut no_warn = false;
            let mut encoding: Option<FileEncoding> = None;
            for arg in &args[1..] {
                if arg.eq_ignore_ascii_case("PRESERVE") {
                    preserve = true;
                } else if arg.eq_ignore_ascii_case("NOWARN") {
                    no_warn = true;
                } else if let Some(enc) = FileEncoding::from_keyword(arg) {
                    if encoding.is_some() {
                        return invalid("encoding keyword cannot be specified twice");
                    }
                    encoding = Some(enc);
                } else {
                    return invalid(format!("invalid argument [{}]", arg));
                }
            }
            Ok(CodeInfo::FileCreateBlank {
                file_path: args[0].clone(),
                preserve,
                no_warn,
                encoding,
            })
        }
        Ct::FileByteExtract => {
            check_info_arg_count(code_type, args, 4, Some(4))?;
            Ok(CodeInfo::FileByteExtract {
                src_file: args[0].clone(),
                dest_file: args[1].clone(),
                signature: args[2].clone(),
                index: args[3].clone(),
            })
        }

        // Registry
        Ct::RegHiveLoad => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::RegHiveLoad {
                key_path: args[0].clone(),
                hive_file: args[1].clone(),
            })
        }
        Ct::RegHiveUnload => {
            check_info_arg_count(code_type, args, 1, Some(1))?;
            Ok(CodeInfo::RegHiveUnload {
                key_path: args[0].clone(),
            })
        }
        Ct::RegImport => {
            check_info_arg_count(code_type, args, 1, Some(1))?;
            Ok(CodeInfo::RegImport {
                reg_file: args[0].clone(),
            })
        }
        Ct::RegWrite => {
            check_info_arg_count(code_type, args, 4, None)?;
            Ok(CodeInfo::RegWrite {
                hive: args[0].clone(),
                value_type: args[1].clone(),
                key_path: args[2].clone(),
                value_name: args[3].clone(),
                value_data: args[4..].to_vec(),
            })
        }
        Ct::RegRead => {
            check_info_arg_count(code_type, args, 4, Some(4))?;
            Ok(CodeInfo::RegRead {
                hive: args[0].clone(),
                key_path: args[1].clone(),
                value_name: args[2].clone(),
                dest_var: args[3].clone(),
            })
        }
        Ct::RegDelete => {
            check_info_arg_count(code_type, args, 2, Some(3))?;
            Ok(CodeInfo::RegDelete {
                hive: args[0].clone(),
                key_path: args[1].clone(),
                value_name: args.get(2).cloned(),
            })
        }
        Ct::RegWriteBin => {
            check_info_arg_count(code_type, args, 4, None)?;
            Ok(CodeInfo::RegWriteBin {
                hive: args[0].clone(),
                key_path: args[1].clone(),
                value_name: args[2].clone(),
                value_data: args[3..].to_vec(),
            })
        }
        Ct::RegReadBin => {
            check_info_arg_count(code_type, args, 4, Some(4))?;
            Ok(CodeInfo::RegReadBin {
                hive: args[0].clone(),
                key_path: args[1].clone(),
                value_name: args[2].clone(),
                dest_var: args[3].clone(),
            })
        }

        // Text
        Ct::TXTAddLine => {
            // TXTAddLine,<FileName>,<Line>,<Append|Prepend>
            check_info_arg_count(code_type, args, 3, Some(3))?;
            let mode = if args[2].eq_ignore_ascii_case("Append") {
                TxtAddMode::Append
            } else if args[2].eq_ignore_ascii_case("Prepend") {
                TxtAddMode::Prepend
            } else {
                return invalid(format!("mode must be [Append] or [Prepend], not [{}]", args[2]));
            };
            Ok(CodeInfo::TxtAddLine {
                file_name: args[0].clone(),
                line: args[1].clone(),
                mode,
            })
        }
        Ct::TXTReplace => {
            check_info_arg_count(code_type, args, 3, Some(3))?;
            Ok(CodeInfo::TxtReplace {
                file_name: args[0].clone(),
                old_str: args[1].clone(),
                new_str: args[2].clone(),
            })
        }
        Ct::TXTDelLine => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::TxtDelLine {
                file_name: args[0].clone(),
                del_line: args[1].clone(),
            })
        }
        Ct::TXTDelSpaces => {
            check_info_arg_count(code_type, args, 1, Some(1))?;
            Ok(CodeInfo::TxtDelSpaces {
                file_name: args[0].clone(),
            })
        }
        Ct::TXTDelEmptyLines => {
            check_info_arg_count(code_type, args, 1, Some(1))?;
            Ok(CodeInfo::TxtDelEmptyLines {
                file_name: args[0].clone(),
            })
        }

        // INI
        Ct::INIWrite => {
            check_info_arg_count(code_type, args, 4, Some(4))?;
            Ok(CodeInfo::IniWrite {
                file_name: args[0].clone(),
                section: args[1].clone(),
                key: args[2].clone(),
                value: args[3].clone(),
            })
        }
        Ct::INIRead => {
            check_info_arg_count(code_type, args, 4, Some(4))?;
            Ok(CodeInfo::IniRead {
                file_name: args[0].clone(),
                section: args[1].clone(),
                key: args[2].clone(),
                dest_var: args[3].clone(),
            })
        }
        Ct::INIDelete => {
            check_info_arg_count(code_type, args, 3, Some(3))?;
            Ok(CodeInfo::IniDelete {
                file_name: args[0].clone(),
                section: args[1].clone(),
                key: args[2].clone(),
            })
        }
        Ct::INIAddSection => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::IniAddSection {
                file_name: args[0].clone(),
                section: args[1].clone(),
            })
        }
        Ct::INIDeleteSection => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::IniDeleteSection {
                file_name: args[0].clone(),
                section: args[1].clone(),
            })
        }
        Ct::INIWriteTextLine => {
            check_info_arg_count(code_type, args, 3, Some(4))?;
            let mut append = false;
            for arg in &args[3..] {
                if arg.eq_ignore_ascii_case("APPEND") {
                    append = true;
                } else {
                    return invalid(format!("invalid argument [{}]", arg));
                }
            }
            Ok(CodeInfo::IniWriteTextLine {
                file_name: args[0].clone(),
                section: args[1].clone(),
                line: args[2].clone(),
                append,
            })
        }
        Ct::INIMerge => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::IniMerge {
                src_file: args[0].clone(),
                dest_file: args[1].clone(),
            })
        }

        // Network
        Ct::WebGet | Ct::WebGetIfNotExist => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::WebGet {
                url: args[0].clone(),
                dest_path: args[1].clone(),
            })
        }

        // Attach
        Ct::ExtractFile => {
            check_info_arg_count(code_type, args, 4, Some(4))?;
            Ok(CodeInfo::ExtractFile {
                script_file: args[0].clone(),
                dir_name: args[1].clone(),
                file_name: args[2].clone(),
                dest_dir: args[3].clone(),
            })
        }
        Ct::ExtractAndRun => {
            check_info_arg_count(code_type, args, 3, None)?;
            Ok(CodeInfo::ExtractAndRun {
                script_file: args[0].clone(),
                dir_name: args[1].clone(),
                file_name: args[2].clone(),
                params: args[3..].to_vec(),
            })
        }
        Ct::ExtractAllFiles | Ct::ExtractAllFilesIfNotExist => {
            check_info_arg_count(code_type, args, 3, Some(3))?;
            Ok(CodeInfo::ExtractAllFiles {
                script_file: args[0].clone(),
                dir_name: args[1].clone(),
                dest_dir: args[2].clone(),
            })
        }
        Ct::Encode => {
            check_info_arg_count(code_type, args, 3, Some(3))?;
            Ok(CodeInfo::Encode {
                script_file: args[0].clone(),
                dir_name: args[1].clone(),
                file_path: args[2].clone(),
            })
        }

        // Interface
        Ct::Message => {
            // Message,<Message>[,<Action>][,<Timeout>]
            check_info_arg_count(code_type, args, 1, Some(3))?;
            let action = match args.get(1) {
                None => None,
                Some(arg) if arg.eq_ignore_ascii_case("Information") => {
                    Some(MessageAction::Information)
                }
                Some(arg) if arg.eq_ignore_ascii_case("Confirmation") => {
                    Some(MessageAction::Confirmation)
                }
                Some(arg) if arg.eq_ignore_ascii_case("Error") => Some(MessageAction::Error),
                Some(arg) if arg.eq_ignore_ascii_case("Warning") => Some(MessageAction::Warning),
                Some(arg) => {
                    return invalid(format!("wrong message action [{}]", arg));
                }
            };
            Ok(CodeInfo::Message {
                message: args[0].clone(),
                action,
                timeout: args.get(2).cloned(),
            })
        }
        Ct::Echo => {
            check_info_arg_count(code_type, args, 1, Some(2))?;
            let mut warn = false;
            for arg in &args[1..] {
                if arg.eq_ignore_ascii_case("WARN") {
                    warn = true;
                } else {
                    return invalid(format!("invalid argument [{}]", arg));
                }
            }
            Ok(CodeInfo::Echo {
                message: args[0].clone(),
                warn,
            })
        }
        Ct::Retrieve => {
            check_info_arg_count(code_type, args, 2, None)?;
            Ok(CodeInfo::Retrieve {
                action: args[0].clone(),
                args: args[1..].to_vec(),
            })
        }
        Ct::Visible => {
            check_info_arg_count(code_type, args, 2, Some(3))?;
            let mut permanent = false;
            for arg in &args[2..] {
                if arg.eq_ignore_ascii_case("PERMANENT") {
                    permanent = true;
                } else {
                    return invalid(format!("invalid argument [{}]", arg));
                }
            }
            Ok(CodeInfo::Visible {
                interface_key: args[0].clone(),
                visibility: args[1].clone(),
                permanent,
            })
        }

        // String format
        Ct::StrFormat => {
            check_info_arg_count(code_type, args, 2, None)?;
            Ok(CodeInfo::StrFormat {
                action: args[0].clone(),
                args: args[1..].to_vec(),
            })
        }

        // System
        Ct::System => {
            check_info_arg_count(code_type, args, 1, None)?;
            Ok(CodeInfo::System {
                action: args[0].clone(),
                args: args[1..].to_vec(),
            })
        }
        Ct::ShellExecute | Ct::ShellExecuteEx | Ct::ShellExecuteDelete => {
            // ShellExecute,<Action>,<FilePath>[,Params...]
            check_info_arg_count(code_type, args, 2, None)?;
            Ok(CodeInfo::ShellExecute {
                action: args[0].clone(),
                file_path: args[1].clone(),
                params: args[2..].to_vec(),
            })
        }

        // Branch
        Ct::Run | Ct::Exec => {
            check_info_arg_count(code_type, args, 2, None)?;
            Ok(CodeInfo::Run {
                script_file: args[0].clone(),
                section_name: args[1].clone(),
                parameters: args[2..].to_vec(),
            })
        }
        Ct::Loop => {
            // Loop,<ScriptFile>,<Section>,<StartIdx>,<EndIdx>[,Params...]
            check_info_arg_count(code_type, args, 4, None)?;
            Ok(CodeInfo::Loop {
                script_file: args[0].clone(),
                section_name: args[1].clone(),
                start_idx: args[2].clone(),
                end_idx: args[3].clone(),
                parameters: args[4..].to_vec(),
            })
        }
        Ct::If => parse_if_info(args, addr, depth),
        Ct::Else => parse_else_info(args, addr, depth),
        Ct::Begin | Ct::End => {
            check_info_arg_count(code_type, args, 0, Some(0))?;
            Ok(CodeInfo::None)
        }

        // Control
        Ct::Set => {
            check_info_arg_count(code_type, args, 2, Some(4))?;
            let mut global = false;
            let mut permanent = false;
            for arg in &args[2..] {
                if arg.eq_ignore_ascii_case("GLOBAL") {
                    global = true;
                } else if arg.eq_ignore_ascii_case("PERMANENT") {
                    permanent = true;
                } else {
                    return invalid(format!("invalid argument [{}]", arg));
                }
            }
            Ok(CodeInfo::Set {
                var_key: args[0].clone(),
                var_value: args[1].clone(),
                global,
                permanent,
            })
        }
        Ct::GetParam => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::GetParam {
                index: parse_numeric(&args[0], "parameter index")?,
                var_name: args[1].clone(),
            })
        }
        Ct::PackParam => {
            check_info_arg_count(code_type, args, 2, Some(2))?;
            Ok(CodeInfo::PackParam {
                start_index: parse_numeric(&args[0], "parameter index")?,
                var_name: args[1].clone(),
            })
        }
        Ct::AddVariables => {
            check_info_arg_count(code_type, args, 2, Some(3))?;
            let mut global = false;
            for arg in &args[2..] {
                if arg.eq_ignore_ascii_case("GLOBAL") {
                    global = true;
                } else {
                    return invalid(format!("invalid argument [{}]", arg));
                }
            }
            Ok(CodeInfo::AddVariables {
                script_file: args[0].clone(),
                section_name: args[1].clone(),
                global,
            })
        }
        Ct::Exit => {
            check_info_arg_count(code_type, args, 1, Some(2))?;
            let mut no_warn = false;
            for arg in &args[1..] {
                if arg.eq_ignore_ascii_case("NOWARN") {
                    no_warn = true;
                } else {
                    return invalid(format!("invalid argument [{}]", arg));
                }
            }
            Ok(CodeInfo::Exit {
                message: args[0].clone(),
                no_warn,
            })
        }
        Ct::Halt => {
            check_info_arg_count(code_type, args, 1, Some(1))?;
            Ok(CodeInfo::Halt {
                message: args[0].clone(),
            })
        }
        Ct::Wait => {
            check_info_arg_count(code_type, args, 1, Some(1))?;
            Ok(CodeInfo::Wait {
                second: parse_numeric(&args[0], "wait duration")?,
            })
        }
        Ct::Beep => {
            check_info_arg_count(code_type, args, 1, Some(1))?;
            let beep_type = if args[0].eq_ignore_ascii_case("OK") {
                BeepType::Ok
            } else if args[0].eq_ignore_ascii_case("Error") {
                BeepType::Error
            } else if args[0].eq_ignore_ascii_case("Asterisk") {
                BeepType::Asterisk
            } else if args[0].eq_ignore_ascii_case("Confirmation") {
                BeepType::Confirmation
            } else {
                return invalid(format!("wrong beep type [{}]", args[0]));
            };
            Ok(CodeInfo::Beep { beep_type })
        }

        // External macro
        Ct::Macro => {
            let Some(macro_type) = macro_type else {
                return invalid("internal parser error: macro invocation without a name");
            };
            Ok(CodeInfo::Macro {
                macro_type,
                args: args.to_vec(),
            })
        }
    }
}

// Comparison aliases recognized after the first comparand.
// NotEqual and != are sugar for a negated Equal.
fn parse_comparison_operator(
    cond_str: &str,
    not_flag: &mut bool,
) -> Result<BranchConditionType, LineError> {
    let cond_type = if cond_str.eq_ignore_ascii_case("Equal") || cond_str == "==" {
        BranchConditionType::Equal
    } else if cond_str.eq_ignore_ascii_case("EqualX") || cond_str == "===" {
        BranchConditionType::EqualX
    } else if cond_str.eq_ignore_ascii_case("Smaller") || cond_str == "<" {
        BranchConditionType::Smaller
    } else if cond_str.eq_ignore_ascii_case("Bigger") || cond_str == ">" {
        BranchConditionType::Bigger
    } else if cond_str.eq_ignore_ascii_case("SmallerEqual") || cond_str == "<=" {
        BranchConditionType::SmallerEqual
    } else if cond_str.eq_ignore_ascii_case("BiggerEqual") || cond_str == ">=" {
        BranchConditionType::BiggerEqual
    } else if cond_str.eq_ignore_ascii_case("NotEqual") || cond_str == "!=" {
        if *not_flag {
            return invalid("branch condition [Not] cannot be duplicated");
        }
        *not_flag = true;
        BranchConditionType::Equal
    } else {
        return invalid(format!("wrong branch condition [{}]", cond_str));
    };
    Ok(cond_type)
}

// Predicate keywords with their operand counts; the deprecated
// NotXxx spellings force negation and reject an explicit Not prefix.
fn parse_predicate_keyword(
    cond_str: &str,
    not_flag: &mut bool,
) -> Result<(BranchConditionType, usize), LineError> {
    let (cond_type, deprecated_not, operand_count) = match cond_str.to_ascii_uppercase().as_str() {
        "EXISTFILE" => (BranchConditionType::ExistFile, false, 1),
        "NOTEXISTFILE" => (BranchConditionType::ExistFile, true, 1),
        "EXISTDIR" => (BranchConditionType::ExistDir, false, 1),
        "NOTEXISTDIR" => (BranchConditionType::ExistDir, true, 1),
        "EXISTSECTION" => (BranchConditionType::ExistSection, false, 2),
        "NOTEXISTSECTION" => (BranchConditionType::ExistSection, true, 2),
        "EXISTREGSECTION" => (BranchConditionType::ExistRegSection, false, 2),
        "NOTEXISTREGSECTION" => (BranchConditionType::ExistRegSection, true, 2),
        "EXISTREGKEY" => (BranchConditionType::ExistRegKey, false, 3),
        "NOTEXISTREGKEY" => (BranchConditionType::ExistRegKey, true, 3),
        "EXISTVAR" => (BranchConditionType::ExistVar, false, 1),
        "NOTEXISTVAR" => (BranchConditionType::ExistVar, true, 1),
        "EXISTMACRO" => (BranchConditionType::ExistMacro, false, 1),
        "NOTEXISTMACRO" => (BranchConditionType::ExistMacro, true, 1),
        "PING" => (BranchConditionType::Ping, false, 1),
        "ONLINE" => (BranchConditionType::Online, false, 0),
        _ => {
            return invalid(format!("wrong branch condition [{}]", cond_str));
        }
    };

    if deprecated_not {
        if *not_flag {
            return invalid("branch condition [Not] cannot be duplicated");
        }
        *not_flag = true;
    }

    Ok((cond_type, operand_count))
}

// Parse an If command's condition and embedded command.
//
// Comparison-style vs predicate-style is decided by the shape of the
// first operand: an even, nonzero count of '%' (a fully delimited
// variable reference) or a #<digits> positional parameter means a
// comparison. The heuristic is part of the language; scripts rely on
// its exact behavior, quirks included.
fn parse_if_info(
    args: &[String],
    addr: &SectionAddress,
    depth: usize,
) -> Result<CodeInfo, LineError> {
    if args.len() < 2 {
        return invalid("[If] must have form of [If],<Condition>,<Command>");
    }

    let mut c_idx = 0;
    let mut not_flag = false;
    if args[0].eq_ignore_ascii_case("Not") {
        not_flag = true;
        c_idx += 1;
    }

    let first = args
        .get(c_idx)
        .ok_or_else(|| LineError::Invalid("[If] condition is missing".to_string()))?;

    let percent_count = first.chars().filter(|c| *c == '%').count();
    let is_comparison =
        (percent_count != 0 && percent_count % 2 == 0) || POSITIONAL_PARAM_RE.is_match(first);

    let (condition, embed_idx) = if is_comparison {
        let cond_str = args
            .get(c_idx + 1)
            .ok_or_else(|| LineError::Invalid("[If] comparison operator is missing".to_string()))?;
        let cond_type = parse_comparison_operator(cond_str, &mut not_flag)?;
        let comp_arg2 = args
            .get(c_idx + 2)
            .ok_or_else(|| LineError::Invalid("[If] comparison operand is missing".to_string()))?;

        let cond = BranchCondition::new(
            cond_type,
            not_flag,
            vec![first.clone(), comp_arg2.clone()],
        );
        (cond, c_idx + 3)
    } else {
        let (cond_type, operand_count) = parse_predicate_keyword(first, &mut not_flag)?;
        let operands_end = c_idx + 1 + operand_count;
        if args.len() < operands_end {
            return invalid(format!(
                "branch condition [{}] must have [{}] operands",
                first, operand_count
            ));
        }
        let operands = args[c_idx + 1..operands_end].to_vec();
        let cond = BranchCondition::new(cond_type, not_flag, operands);
        (cond, operands_end)
    };

    let raw_tail = args[embed_idx..].join(",");
    let embed = forge_embed_command(&raw_tail, &args[embed_idx..], addr, depth)?;

    Ok(CodeInfo::If {
        condition,
        embed: Box::new(embed),
        link: Vec::new(),
        link_parsed: false,
    })
}

// Else has no condition of its own: the whole argument tail is the
// embedded command.
fn parse_else_info(
    args: &[String],
    addr: &SectionAddress,
    depth: usize,
) -> Result<CodeInfo, LineError> {
    let raw_tail = args.join(",");
    let embed = forge_embed_command(&raw_tail, args, addr, depth)?;
    Ok(CodeInfo::Else {
        embed: Box::new(embed),
        link: Vec::new(),
        link_parsed: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SectionAddress {
        SectionAddress::new("test.script", "Process")
    }

    fn parse_line(raw: &str) -> Result<CodeCommand, LineError> {
        let lines = vec![raw.to_string()];
        let mut idx = 0;
        parse_command(&lines, &addr(), &mut idx)
    }

    // parse_code_type
    #[test]
    fn test_resolve_builtin_opcode() {
        let (code_type, macro_type) = parse_code_type("FileCopy").unwrap();
        assert_eq!(code_type, CodeType::FileCopy);
        assert!(macro_type.is_none());
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        // Canonical spelling only; anything else is a macro call.
        let (code_type, macro_type) = parse_code_type("filecopy").unwrap();
        assert_eq!(code_type, CodeType::Macro);
        assert_eq!(macro_type.as_deref(), Some("filecopy"));
    }

    #[test]
    fn test_resolve_macro_fallback() {
        let (code_type, macro_type) = parse_code_type("InstallDrivers").unwrap();
        assert_eq!(code_type, CodeType::Macro);
        assert_eq!(macro_type.as_deref(), Some("InstallDrivers"));
    }

    #[test]
    fn test_resolve_rejects_digits() {
        assert!(parse_code_type("Echo2").is_err());
        assert!(parse_code_type("2Echo").is_err());
        assert!(parse_code_type("Echo Me").is_err());
    }

    // parse_command
    #[test]
    fn test_empty_line_is_skipped() {
        assert_eq!(parse_line("   ").unwrap_err(), LineError::Empty);
    }

    #[test]
    fn test_comment_lines() {
        for raw in ["// note", "# note", "; note"] {
            let cmd = parse_line(raw).unwrap();
            assert_eq!(cmd.code_type, CodeType::Comment);
        }
    }

    #[test]
    fn test_odd_quote_count_rejected() {
        let err = parse_line(r#"Echo,"a b"#).unwrap_err();
        assert!(matches!(err, LineError::Invalid(_)));
    }

    #[test]
    fn test_file_copy_info() {
        let cmd = parse_line(r#"FileCopy,"1 2.dll",34.dll,NOWARN,show"#).unwrap();
        assert_eq!(cmd.code_type, CodeType::FileCopy);
        match cmd.info {
            CodeInfo::FileCopy {
                src_file,
                dest_path,
                preserve,
                no_warn,
                no_rec,
                show,
            } => {
                assert_eq!(src_file, "1 2.dll");
                assert_eq!(dest_path, "34.dll");
                assert!(!preserve);
                assert!(no_warn);
                assert!(!no_rec);
                assert!(show);
            }
            other => panic!("wrong info: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_flag_is_error() {
        assert!(parse_line("FileCopy,a,b,SHINY").is_err());
    }

    #[test]
    fn test_arg_count_too_few() {
        let err = parse_line("FileCopy,a").unwrap_err();
        let LineError::Invalid(msg) = err else {
            panic!("expected invalid");
        };
        assert!(msg.contains("[FileCopy]"));
        assert!(msg.contains("[2]") && msg.contains("[6]"));
    }

    #[test]
    fn test_arg_count_too_many() {
        assert!(parse_line("DirCopy,a,b,c").is_err());
    }

    #[test]
    fn test_file_create_blank_encoding() {
        let cmd = parse_line("FileCreateBlank,a.txt,UTF16").unwrap();
        match cmd.info {
            CodeInfo::FileCreateBlank { encoding, .. } => {
                assert_eq!(encoding, Some(FileEncoding::Utf16));
            }
            other => panic!("wrong info: {:?}", other),
        }
    }

    #[test]
    fn test_double_encoding_is_error() {
        assert!(parse_line("FileCreateBlank,a.txt,UTF8,ANSI").is_err());
    }

    #[test]
    fn test_txt_add_line_mode_keyword() {
        let cmd = parse_line("TXTAddLine,a.txt,hello,Append").unwrap();
        match cmd.info {
            CodeInfo::TxtAddLine { mode, .. } => assert_eq!(mode, TxtAddMode::Append),
            other => panic!("wrong info: {:?}", other),
        }
        assert!(parse_line("TXTAddLine,a.txt,hello,Sideways").is_err());
    }

    #[test]
    fn test_get_param_requires_numeric_index() {
        let cmd = parse_line("GetParam,3,%Dest%").unwrap();
        match cmd.info {
            CodeInfo::GetParam { index, var_name } => {
                assert_eq!(index, 3);
                assert_eq!(var_name, "%Dest%");
            }
            other => panic!("wrong info: {:?}", other),
        }
        assert!(parse_line("GetParam,three,%Dest%").is_err());
    }

    #[test]
    fn test_run_is_variadic() {
        let cmd = parse_line("Run,%ScriptFile%,DoWork,a,b,c").unwrap();
        match cmd.info {
            CodeInfo::Run { parameters, .. } => assert_eq!(parameters, vec!["a", "b", "c"]),
            other => panic!("wrong info: {:?}", other),
        }
    }

    #[test]
    fn test_macro_invocation_keeps_args() {
        let cmd = parse_line("InstallDrivers,%TargetDir%,x86").unwrap();
        assert_eq!(cmd.code_type, CodeType::Macro);
        match cmd.info {
            CodeInfo::Macro { macro_type, args } => {
                assert_eq!(macro_type, "InstallDrivers");
                assert_eq!(args, vec!["%TargetDir%", "x86"]);
            }
            other => panic!("wrong info: {:?}", other),
        }
    }

    #[test]
    fn test_continuation_feeds_info_builder() {
        let lines = vec![
            "Run,%ScriptFile%,Section,\\".to_string(),
            "p1,p2".to_string(),
        ];
        let mut idx = 0;
        let cmd = parse_command(&lines, &addr(), &mut idx).unwrap();
        assert_eq!(idx, 1);
        match cmd.info {
            CodeInfo::Run { parameters, .. } => assert_eq!(parameters, vec!["p1", "p2"]),
            other => panic!("wrong info: {:?}", other),
        }
    }

    // If / Else conditions
    fn if_parts(cmd: &CodeCommand) -> (&BranchCondition, &CodeCommand) {
        match &cmd.info {
            CodeInfo::If {
                condition, embed, ..
            } => (condition, embed),
            other => panic!("not an If: {:?}", other),
        }
    }

    #[test]
    fn test_if_comparison() {
        // If,%A%,Equal,B,Echo,Success
        let cmd = parse_line("If,%A%,Equal,B,Echo,Success").unwrap();
        let (cond, embed) = if_parts(&cmd);
        assert_eq!(cond.cond_type, BranchConditionType::Equal);
        assert!(!cond.negate);
        assert_eq!(cond.args, vec!["%A%", "B"]);
        assert_eq!(embed.code_type, CodeType::Echo);
        assert_eq!(embed.depth, 1);
        match &embed.info {
            CodeInfo::Echo { message, .. } => assert_eq!(message, "Success"),
            other => panic!("wrong embed info: {:?}", other),
        }
    }

    #[test]
    fn test_if_symbolic_operator() {
        let cmd = parse_line("If,%A%,<=,5,Echo,ok").unwrap();
        let (cond, _) = if_parts(&cmd);
        assert_eq!(cond.cond_type, BranchConditionType::SmallerEqual);
    }

    #[test]
    fn test_if_positional_param_is_comparison() {
        let cmd = parse_line("If,#1,Bigger,3,Echo,ok").unwrap();
        let (cond, _) = if_parts(&cmd);
        assert_eq!(cond.cond_type, BranchConditionType::Bigger);
        assert_eq!(cond.args, vec!["#1", "3"]);
    }

    #[test]
    fn test_if_not_predicate() {
        // If,Not,ExistFile,%A%,Echo,Hi
        let cmd = parse_line("If,Not,ExistFile,%A%,Echo,Hi").unwrap();
        let (cond, embed) = if_parts(&cmd);
        assert_eq!(cond.cond_type, BranchConditionType::ExistFile);
        assert!(cond.negate);
        assert_eq!(cond.args, vec!["%A%"]);
        assert_eq!(embed.code_type, CodeType::Echo);
    }

    #[test]
    fn test_deprecated_not_alias_is_equivalent() {
        let legacy = parse_line("If,NotExistFile,%A%,Echo,Hi").unwrap();
        let modern = parse_line("If,Not,ExistFile,%A%,Echo,Hi").unwrap();
        let (legacy_cond, legacy_embed) = if_parts(&legacy);
        let (modern_cond, modern_embed) = if_parts(&modern);
        assert_eq!(legacy_cond, modern_cond);
        assert_eq!(legacy_embed.info, modern_embed.info);
    }

    #[test]
    fn test_duplicate_negation_rejected() {
        assert!(parse_line("If,Not,NotExistFile,%A%,Echo,Hi").is_err());
        assert!(parse_line("If,Not,%A%,NotEqual,B,Echo,Hi").is_err());
    }

    #[test]
    fn test_not_equal_sugar() {
        let cmd = parse_line("If,%A%,!=,B,Echo,differs").unwrap();
        let (cond, _) = if_parts(&cmd);
        assert_eq!(cond.cond_type, BranchConditionType::Equal);
        assert!(cond.negate);
    }

    #[test]
    fn test_exist_reg_key_takes_three_operands() {
        let cmd = parse_line("If,ExistRegKey,HKLM,Software\\Acme,Version,Echo,found").unwrap();
        let (cond, embed) = if_parts(&cmd);
        assert_eq!(cond.cond_type, BranchConditionType::ExistRegKey);
        assert_eq!(cond.args, vec!["HKLM", "Software\\Acme", "Version"]);
        assert_eq!(embed.code_type, CodeType::Echo);
    }

    #[test]
    fn test_online_takes_no_operands() {
        let cmd = parse_line("If,Online,Echo,connected").unwrap();
        let (cond, embed) = if_parts(&cmd);
        assert_eq!(cond.cond_type, BranchConditionType::Online);
        assert!(cond.args.is_empty());
        assert_eq!(embed.code_type, CodeType::Echo);
    }

    #[test]
    fn test_odd_percent_count_is_predicate() {
        // A first operand with an odd % count is not a variable
        // reference, so it must name a predicate; "50%" names none.
        assert!(parse_line("If,50%,Equal,50,Echo,ok").is_err());
    }

    #[test]
    fn test_if_missing_embedded_command() {
        assert!(parse_line("If,%A%,Equal,B").is_err());
    }

    #[test]
    fn test_run_embed_depth_correction() {
        let cmd = parse_line("If,%A%,Equal,B,Run,%ScriptFile%,Sub").unwrap();
        let (_, embed) = if_parts(&cmd);
        assert_eq!(embed.code_type, CodeType::Run);
        assert_eq!(embed.depth, 0); // Run transfers control; not nested
    }

    #[test]
    fn test_nested_if_embed_depths() {
        let cmd = parse_line("If,%A%,Equal,B,If,%C%,Equal,D,Echo,deep").unwrap();
        let (_, embed) = if_parts(&cmd);
        assert_eq!(embed.code_type, CodeType::If);
        let (inner_cond, inner_embed) = if_parts(embed);
        assert_eq!(inner_cond.args, vec!["%C%", "D"]);
        assert_eq!(inner_embed.code_type, CodeType::Echo);
        assert_eq!(inner_embed.depth, 2);
    }

    #[test]
    fn test_else_forges_whole_tail() {
        let cmd = parse_line("Else,Echo,fallback").unwrap();
        match &cmd.info {
            CodeInfo::Else { embed, link, link_parsed } => {
                assert_eq!(embed.code_type, CodeType::Echo);
                assert!(link.is_empty());
                assert!(!link_parsed);
            }
            other => panic!("not an Else: {:?}", other),
        }
    }

    #[test]
    fn test_else_without_command_is_error() {
        assert!(parse_line("Else").is_err());
    }

    // parse_raw_lines
    fn to_lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_batch_parse_elides_comments_and_blanks() {
        let lines = to_lines(&["// header", "", "Echo,one", "  ", "; trailer", "Echo,two"]);
        let (cmds, diags) = parse_raw_lines(&lines, &addr()).unwrap();
        assert!(diags.is_empty());
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].raw_line, "Echo,one");
        assert_eq!(cmds[1].raw_line, "Echo,two");
    }

    #[test]
    fn test_batch_parse_keeps_positions_on_error() {
        let lines = to_lines(&["Echo,one", "FileCopy,only_one_arg", "Echo,three"]);
        let (cmds, diags) = parse_raw_lines(&lines, &addr()).unwrap();
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[1].code_type, CodeType::Error);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].raw_line, "FileCopy,only_one_arg");
    }

    #[test]
    fn test_batch_parse_multiple_errors_isolated() {
        let lines = to_lines(&[
            "Echo,ok",
            r#"Echo,"unbalanced"#,
            "GetParam,x,%V%",
            "Echo,still ok",
        ]);
        let (cmds, diags) = parse_raw_lines(&lines, &addr()).unwrap();
        assert_eq!(cmds.len(), 4);
        assert_eq!(cmds[1].code_type, CodeType::Error);
        assert_eq!(cmds[2].code_type, CodeType::Error);
        assert_eq!(cmds[3].code_type, CodeType::Echo);
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn test_parse_one_raw_line() {
        let cmd = parse_one_raw_line("Echo,hello", &addr()).unwrap().unwrap();
        assert_eq!(cmd.code_type, CodeType::Echo);

        assert!(parse_one_raw_line("", &addr()).unwrap().is_none());

        let comment = parse_one_raw_line("# note", &addr()).unwrap().unwrap();
        assert_eq!(comment.code_type, CodeType::Comment);

        assert!(parse_one_raw_line("DirCopy,a", &addr()).is_err());
    }
}
