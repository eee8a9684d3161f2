// Definitions for the parsed and compiled command data structures
//
// SPDX-License-Identifier: MIT
// Copyright (c) 2025 wbscript developers
//
// This file is part of the wbscript package.
// It is licensed under the MIT License.
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::fmt;

/// Identity of the script section a line came from.
/// Carried for error attribution only; the parser never interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionAddress {
    pub script: String,
    pub section: String,
}

impl SectionAddress {
    pub fn new(script: &str, section: &str) -> Self {
        Self {
            script: script.to_string(),
            section: section.to_string(),
        }
    }
}

impl fmt::Display for SectionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:[{}]", self.script, self.section)
    }
}

/// Opcodes of the scripting language.
///
/// The set is closed: a token that names none of these resolves to
/// `Macro`, whose name travels in `CodeInfo::Macro`. `None`, `Comment`
/// and `Error` are sentinels produced by the parser, never written in
/// scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeType {
    // Sentinels
    None,
    Comment,
    Error,
    // File
    CopyOrExpand,
    DirCopy,
    DirDelete,
    DirMove,
    DirMake,
    Expand,
    FileCopy,
    FileDelete,
    FileRename,
    FileMove,
    FileCreateBlank,
    FileByteExtract,
    // Registry
    RegHiveLoad,
    RegHiveUnload,
    RegImport,
    RegWrite,
    RegRead,
    RegDelete,
    RegWriteBin,
    RegReadBin,
    // Text
    TXTAddLine,
    TXTReplace,
    TXTDelLine,
    TXTDelSpaces,
    TXTDelEmptyLines,
    // INI
    INIWrite,
    INIRead,
    INIDelete,
    INIAddSection,
    INIDeleteSection,
    INIWriteTextLine,
    INIMerge,
    // Network
    WebGet,
    WebGetIfNotExist,
    // Attach
    ExtractFile,
    ExtractAndRun,
    ExtractAllFiles,
    ExtractAllFilesIfNotExist,
    Encode,
    // Interface
    Message,
    Echo,
    Retrieve,
    Visible,
    // String format
    StrFormat,
    // System
    System,
    ShellExecute,
    ShellExecuteEx,
    ShellExecuteDelete,
    // Branch
    Run,
    Exec,
    Loop,
    If,
    Else,
    Begin,
    End,
    // Control
    Set,
    GetParam,
    PackParam,
    AddVariables,
    Exit,
    Halt,
    Wait,
    Beep,
    // External macro
    Macro,
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Variant names are the canonical opcode spellings.
        write!(f, "{:?}", self)
    }
}

/// Text file encodings selectable through command keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEncoding {
    Ansi,
    Utf8,
    Utf16,
    Utf16Be,
}

impl FileEncoding {
    /// Map an encoding keyword to its encoding, or `None` if the
    /// keyword names no encoding.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "ANSI" => Some(FileEncoding::Ansi),
            "UTF8" => Some(FileEncoding::Utf8),
            "UTF16" => Some(FileEncoding::Utf16),
            "UTF16BE" => Some(FileEncoding::Utf16Be),
            _ => None,
        }
    }
}

/// Placement mode of TXTAddLine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxtAddMode {
    Append,
    Prepend,
}

/// Dialog flavor of the Message command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAction {
    Information,
    Confirmation,
    Error,
    Warning,
}

/// Sound flavor of the Beep command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeepType {
    Ok,
    Error,
    Asterisk,
    Confirmation,
}

/// Kinds of branch conditions accepted after If.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchConditionType {
    // Comparisons
    Equal,
    EqualX,
    Smaller,
    Bigger,
    SmallerEqual,
    BiggerEqual,
    // Predicates
    ExistFile,
    ExistDir,
    ExistSection,
    ExistRegSection,
    ExistRegKey,
    ExistVar,
    ExistMacro,
    Ping,
    Online,
}

impl BranchConditionType {
    /// Number of operands the condition consumes.
    pub fn arity(&self) -> usize {
        use BranchConditionType::*;
        match self {
            Equal | EqualX | Smaller | Bigger | SmallerEqual | BiggerEqual => 2,
            ExistFile | ExistDir | ExistVar | ExistMacro | Ping => 1,
            ExistSection | ExistRegSection => 2,
            ExistRegKey => 3,
            Online => 0,
        }
    }
}

/// A fully parsed branch condition: kind, negation and operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCondition {
    pub cond_type: BranchConditionType,
    pub negate: bool,
    pub args: Vec<String>,
}

impl BranchCondition {
    /// Build a condition, checking the operand count against the
    /// arity of `cond_type`.
    pub fn new(cond_type: BranchConditionType, negate: bool, args: Vec<String>) -> Self {
        debug_assert_eq!(args.len(), cond_type.arity());
        Self {
            cond_type,
            negate,
            args,
        }
    }
}

/// Typed, validated operand payload of a command.
///
/// One variant per opcode family, always matching the command's
/// `CodeType` by construction. Kindred opcodes with identical operand
/// shapes share a variant (Run/Exec, WebGet/WebGetIfNotExist, the
/// ShellExecute and ExtractAllFiles families); structural opcodes
/// (Begin, End) and sentinels share the empty `None` variant.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeInfo {
    None,
    // File
    CopyOrExpand {
        src_file: String,
        dest_path: String,
        preserve: bool,
    },
    DirCopy {
        src_dir: String,
        dest_dir: String,
    },
    DirDelete {
        dir_path: String,
    },
    DirMove {
        src_dir: String,
        dest_path: String,
    },
    DirMake {
        dest_dir: String,
    },
    Expand {
        src_cab: String,
        dest_dir: String,
    },
    FileCopy {
        src_file: String,
        dest_path: String,
        preserve: bool,
        no_warn: bool,
        no_rec: bool,
        show: bool,
    },
    FileDelete {
        file_path: String,
        no_warn: bool,
        no_rec: bool,
    },
    FileRename {
        src_path: String,
        dest_path: String,
    },
    FileMove {
        src_path: String,
        dest_path: String,
    },
    FileCreateBlank {
        file_path: String,
        preserve: bool,
        no_warn: bool,
        encoding: Option<FileEncoding>,
    },
    FileByteExtract {
        src_file: String,
        dest_file: String,
        signature: String,
        index: String,
    },
    // Registry
    RegHiveLoad {
        key_path: String,
        hive_file: String,
    },
    RegHiveUnload {
        key_path: String,
    },
    RegImport {
        reg_file: String,
    },
    RegWrite {
        hive: String,
        value_type: String,
        key_path: String,
        value_name: String,
        value_data: Vec<String>,
    },
    RegRead {
        hive: String,
        key_path: String,
        value_name: String,
        dest_var: String,
    },
    RegDelete {
        hive: String,
        key_path: String,
        value_name: Option<String>,
    },
    RegWriteBin {
        hive: String,
        key_path: String,
        value_name: String,
        value_data: Vec<String>,
    },
    RegReadBin {
        hive: String,
        key_path: String,
        value_name: String,
        dest_var: String,
    },
    // Text
    TxtAddLine {
        file_name: String,
        line: String,
        mode: TxtAddMode,
    },
    TxtReplace {
        file_name: String,
        old_str: String,
        new_str: String,
    },
    TxtDelLine {
        file_name: String,
        del_line: String,
    },
    TxtDelSpaces {
        file_name: String,
    },
    TxtDelEmptyLines {
        file_name: String,
    },
    // INI
    IniWrite {
        file_name: String,
        section: String,
        key: String,
        value: String,
    },
    IniRead {
        file_name: String,
        section: String,
        key: String,
        dest_var: String,
    },
    IniDelete {
        file_name: String,
        section: String,
        key: String,
    },
    IniAddSection {
        file_name: String,
        section: String,
    },
    IniDeleteSection {
        file_name: String,
        section: String,
    },
    IniWriteTextLine {
        file_name: String,
        section: String,
        line: String,
        append: bool,
    },
    IniMerge {
        src_file: String,
        dest_file: String,
    },
    // Network
    WebGet {
        url: String,
        dest_path: String,
    },
    // Attach
    ExtractFile {
        script_file: String,
        dir_name: String,
        file_name: String,
        dest_dir: String,
    },
    ExtractAndRun {
        script_file: String,
        dir_name: String,
        file_name: String,
        params: Vec<String>,
    },
    ExtractAllFiles {
        script_file: String,
        dir_name: String,
        dest_dir: String,
    },
    Encode {
        script_file: String,
        dir_name: String,
        file_path: String,
    },
    // Interface
    Message {
        message: String,
        action: Option<MessageAction>,
        timeout: Option<String>,
    },
    Echo {
        message: String,
        warn: bool,
    },
    Retrieve {
        action: String,
        args: Vec<String>,
    },
    Visible {
        interface_key: String,
        visibility: String,
        permanent: bool,
    },
    // String format
    StrFormat {
        action: String,
        args: Vec<String>,
    },
    // System
    System {
        action: String,
        args: Vec<String>,
    },
    ShellExecute {
        action: String,
        file_path: String,
        params: Vec<String>,
    },
    // Branch
    Run {
        script_file: String,
        section_name: String,
        parameters: Vec<String>,
    },
    Loop {
        script_file: String,
        section_name: String,
        start_idx: String,
        end_idx: String,
        parameters: Vec<String>,
    },
    If {
        condition: BranchCondition,
        embed: Box<CodeCommand>,
        link: Vec<CodeCommand>,
        link_parsed: bool,
    },
    Else {
        embed: Box<CodeCommand>,
        link: Vec<CodeCommand>,
        link_parsed: bool,
    },
    // Control
    Set {
        var_key: String,
        var_value: String,
        global: bool,
        permanent: bool,
    },
    GetParam {
        index: usize,
        var_name: String,
    },
    PackParam {
        start_index: usize,
        var_name: String,
    },
    AddVariables {
        script_file: String,
        section_name: String,
        global: bool,
    },
    Exit {
        message: String,
        no_warn: bool,
    },
    Halt {
        message: String,
    },
    Wait {
        second: u32,
    },
    Beep {
        beep_type: BeepType,
    },
    // External macro
    Macro {
        macro_type: String,
        args: Vec<String>,
    },
}

/// One parsed script command.
///
/// `depth` is the branch nesting depth the command was forged at
/// (0 for top-level section lines). After block compilation, `If` and
/// `Else` infos own their body in `link`; everything else is immutable
/// from construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeCommand {
    pub raw_line: String,
    pub addr: SectionAddress,
    pub depth: usize,
    pub code_type: CodeType,
    pub info: CodeInfo,
}

impl CodeCommand {
    pub fn new(
        raw_line: &str,
        addr: &SectionAddress,
        depth: usize,
        code_type: CodeType,
        info: CodeInfo,
    ) -> Self {
        Self {
            raw_line: raw_line.to_string(),
            addr: addr.clone(),
            depth,
            code_type,
            info,
        }
    }

    /// Build an Error placeholder command for a line that failed to
    /// parse, so downstream position invariants hold.
    pub fn error(raw_line: &str, addr: &SectionAddress) -> Self {
        Self::new(raw_line, addr, 0, CodeType::Error, CodeInfo::None)
    }
}

impl fmt::Display for CodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_line)
    }
}
