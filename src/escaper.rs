// Collaborator contract for variable expansion and string unescaping
//
// SPDX-License-Identifier: MIT
// Copyright (c) 2025 wbscript developers
//
// This file is part of the wbscript package.
// It is licensed under the MIT License.
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

/// String services the parser consumes but does not implement.
///
/// Both methods are pure: same input, same output, no side effects
/// observable by the parser. They are only ever called on individual,
/// already-split argument values, never on raw unsplit lines.
///
/// - `expand_variables` resolves `%Var%` references against the
///   caller's variable table.
/// - `unescape` resolves the language's escape sequences
///   (`#$c` comma, `#$p` percent, `#$q` double quote, `#$s` space,
///   `#$t` tab, `#$x` newline).
pub trait StringServices {
    fn expand_variables(&self, s: &str) -> String;
    fn unescape(&self, s: &str) -> String;
}

/// Identity implementation: leaves text untouched.
///
/// Used by the CLI and by tests; engine integrations substitute their
/// own variable table and escaper.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawText;

impl StringServices for RawText {
    fn expand_variables(&self, s: &str) -> String {
        s.to_string()
    }

    fn unescape(&self, s: &str) -> String {
        s.to_string()
    }
}
