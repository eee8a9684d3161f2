// Program entry point and CLI processing
//
// SPDX-License-Identifier: MIT
// Copyright (c) 2025 wbscript developers
//
// This file is part of the wbscript package.
// It is licensed under the MIT License.
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

pub mod argument_splitter;
pub mod block_compiler;
pub mod command;
pub mod compiler;
pub mod error_handling;
pub mod escaper;
pub mod script_section;
pub mod ui_parser;

use crate::command::{CodeCommand, CodeInfo, SectionAddress};
use crate::compiler::parse_raw_lines;
use crate::error_handling::Diagnostic;
use crate::escaper::RawText;
use crate::script_section::{list_sections, read_section};
use crate::ui_parser::parse_ui_raw_lines;
use clap::{Arg, Command, arg};
use std::path::PathBuf;
use uucore::error::{UResult, UUsageError, set_exit_code};
use uucore::{format_usage, show_error};

const ABOUT: &str = "Parse and compile WinBuilder-compatible automation scripts";
const USAGE: &str = "wbscript [OPTION]... <FILE>";

#[uucore::main]
pub fn uumain(args: impl uucore::Args) -> UResult<()> {
    let matches = uu_app().try_get_matches_from(args)?;

    let Some(file) = matches.get_one::<PathBuf>("file") else {
        return Err(UUsageError::new(1, "missing script file"));
    };

    if matches.get_flag("list-sections") {
        for name in list_sections(file)? {
            println!("{name}");
        }
        return Ok(());
    }

    let section = matches
        .get_one::<String>("section")
        .map(String::as_str)
        .unwrap_or("Process");
    let quiet = matches.get_flag("quiet");

    let lines = read_section(file, section)?;
    let addr = SectionAddress::new(&file.display().to_string(), section);

    if matches.get_flag("interface") {
        let (controls, diagnostics) = parse_ui_raw_lines(&lines, &addr, &RawText);
        report_diagnostics(&addr, &diagnostics);
        if !quiet {
            for ctrl in &controls {
                println!("{} ({:?})", ctrl.key, ctrl.control_type);
            }
        }
    } else {
        let (commands, diagnostics) = parse_raw_lines(&lines, &addr)?;
        report_diagnostics(&addr, &diagnostics);
        if !quiet {
            dump_commands(&commands, 0);
        }
    }

    Ok(())
}

fn report_diagnostics(addr: &SectionAddress, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        show_error!("{}: {}", addr, diag);
    }
    if !diagnostics.is_empty() {
        set_exit_code(1);
    }
}

// Print the compiled tree, one command per line, bodies indented
// under their branch command.
fn dump_commands(commands: &[CodeCommand], indent: usize) {
    for cmd in commands {
        println!("{}{}", " ".repeat(indent), cmd);
        if let CodeInfo::If { link, .. } | CodeInfo::Else { link, .. } = &cmd.info {
            dump_commands(link, indent + 2);
        }
    }
}

pub fn uu_app() -> Command {
    Command::new(uucore::util_name())
        .about(ABOUT)
        .override_usage(format_usage(USAGE))
        .infer_long_args(true)
        .args([
            Arg::new("file")
                .help("Script file to compile")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
            arg!(-s --section <NAME> "Section to compile.").default_value("Process"),
            arg!(--interface "Parse the section as interface control declarations."),
            arg!(-q --quiet "Suppress the compiled tree dump; only report diagnostics."),
            arg!(--"list-sections" "List the script's sections and exit.")
                .conflicts_with_all(["section", "interface"]),
        ])
}
