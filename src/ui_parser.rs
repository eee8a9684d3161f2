// Parse interface control declarations (Key=Text,Visible,Type,X,Y,W,H,...)
//
// SPDX-License-Identifier: MIT
// Copyright (c) 2025 wbscript developers
//
// This file is part of the wbscript package.
// It is licensed under the MIT License.
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::argument_splitter::{has_balanced_quotes, parse_arguments, splice_continuations};
use crate::command::SectionAddress;
use crate::error_handling::{Diagnostic, LineError, invalid};
use crate::escaper::StringServices;
use once_cell::sync::Lazy;
use regex::Regex;

// The control type operand must be purely numeric.
static CONTROL_TYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Kinds of interface controls, identified in scripts by a numeric
/// ordinal. The numbering has gaps (7 and 9 are retired ordinals);
/// declarations using an unassigned ordinal are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiControlType {
    TextBox,
    TextLabel,
    NumberBox,
    CheckBox,
    ComboBox,
    Image,
    TextFile,
    Button,
    WebLabel,
    RadioButton,
    Bevel,
    FileBox,
    RadioGroup,
}

impl UiControlType {
    /// Map a numeric ordinal to its control type, `None` for
    /// unassigned ordinals.
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        match ordinal {
            0 => Some(UiControlType::TextBox),
            1 => Some(UiControlType::TextLabel),
            2 => Some(UiControlType::NumberBox),
            3 => Some(UiControlType::CheckBox),
            4 => Some(UiControlType::ComboBox),
            5 => Some(UiControlType::Image),
            6 => Some(UiControlType::TextFile),
            8 => Some(UiControlType::Button),
            10 => Some(UiControlType::WebLabel),
            11 => Some(UiControlType::RadioButton),
            12 => Some(UiControlType::Bevel),
            13 => Some(UiControlType::FileBox),
            14 => Some(UiControlType::RadioGroup),
            _ => None,
        }
    }
}

/// Font style of a TextLabel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextLabelStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    Underline,
    Strike,
}

/// Placement of a control on the interface canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Control-specific payload of an interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiInfo {
    TextBox {
        value: String,
    },
    TextLabel {
        font_size: i32,
        style: TextLabelStyle,
    },
    NumberBox {
        value: i32,
        min: i32,
        max: i32,
        interval: i32,
    },
    CheckBox {
        checked: bool,
        section_name: Option<String>,
    },
    ComboBox {
        items: Vec<String>,
        index: usize,
    },
    Image {
        url: Option<String>,
    },
    TextFile,
    Button {
        section_name: String,
        picture: Option<String>,
        show_progress: bool,
    },
    WebLabel {
        url: String,
    },
    RadioButton {
        selected: bool,
        section_name: Option<String>,
    },
    Bevel,
    FileBox {
        is_file: bool,
    },
    RadioGroup {
        items: Vec<String>,
        index: i32,
    },
}

/// One parsed interface control declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct UiControl {
    pub raw_line: String,
    pub addr: SectionAddress,
    pub key: String,
    pub text: String,
    pub visible: bool,
    pub control_type: UiControlType,
    pub rect: Rect,
    pub info: UiInfo,
    pub tooltip: Option<String>,
}

/// Parse an interface section.
///
/// Grammar failures (missing `=`, bad quoting, short operand lists, a
/// non-numeric type operand) are recorded as diagnostics; controls
/// with an unassigned type ordinal or a structurally invalid payload
/// are dropped silently. Blank and comment lines are elided. Nothing
/// here is fatal, so the section always yields a (possibly shorter)
/// control list.
pub fn parse_ui_raw_lines(
    lines: &[String],
    addr: &SectionAddress,
    svc: &dyn StringServices,
) -> (Vec<UiControl>, Vec<Diagnostic>) {
    let mut controls: Vec<UiControl> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let mut idx = 0;
    while idx < lines.len() {
        let raw_line = lines[idx].trim().to_string();
        match parse_ui_control(lines, addr, &mut idx, svc) {
            Ok(Some(control)) => controls.push(control),
            Ok(None) => {} // invalid control payload, dropped
            Err(LineError::Empty) => {}
            Err(LineError::Invalid(msg)) => {
                diagnostics.push(Diagnostic::error(msg, &raw_line));
            }
        }
        idx += 1;
    }

    (controls, diagnostics)
}

// Parse the declaration starting at lines[*idx], advancing *idx past
// continuation lines.
fn parse_ui_control(
    lines: &[String],
    addr: &SectionAddress,
    idx: &mut usize,
    svc: &dyn StringServices,
) -> Result<Option<UiControl>, LineError> {
    let raw_line = lines[*idx].trim();

    if raw_line.is_empty() {
        return Err(LineError::Empty);
    }
    if raw_line.starts_with("//") || raw_line.starts_with('#') || raw_line.starts_with(';') {
        return Err(LineError::Empty);
    }

    let Some(equal_idx) = raw_line.find('=') else {
        return invalid(format!(
            "interface control [{}] does not have a name",
            raw_line
        ));
    };
    let key = &raw_line[..equal_idx];
    let value = &raw_line[equal_idx + 1..];

    if !has_balanced_quotes(value) {
        return invalid(format!(
            "interface control [{}]'s doublequotes mismatch",
            raw_line
        ));
    }

    let slices: Vec<&str> = value.split(',').collect();
    let mut args = parse_arguments(&slices, 0)?;
    splice_continuations(&mut args, lines, idx)?;

    // Text, Visibility, Type, X, Y, Width, Height, [Optional...]
    if args.len() < 7 {
        return invalid(format!(
            "interface control [{}] must have at least 7 arguments",
            raw_line
        ));
    }

    if !CONTROL_TYPE_RE.is_match(&args[2]) {
        return invalid("only a number can be used as interface control type");
    }
    let control_type = args[2]
        .parse::<u32>()
        .ok()
        .and_then(UiControlType::from_ordinal);
    let Some(control_type) = control_type else {
        return Ok(None); // unassigned ordinal
    };

    // Drop the type operand; the payload builders index past the six
    // remaining positional fields.
    args.remove(2);

    let text = svc.unescape(&args[0]);
    let visible = args[1] == "1";
    let rect = Rect {
        x: args[2].parse().unwrap_or(0),
        y: args[3].parse().unwrap_or(0),
        width: args[4].parse().unwrap_or(0),
        height: args[5].parse().unwrap_or(0),
    };

    let Some((info, tooltip)) = parse_ui_info(control_type, &args, svc) else {
        return Ok(None);
    };

    Ok(Some(UiControl {
        raw_line: raw_line.to_string(),
        addr: addr.clone(),
        key: key.to_string(),
        text,
        visible,
        control_type,
        rect,
        info,
        tooltip,
    }))
}

// True when the payload operand count falls outside [min, max].
fn ui_arg_count_invalid(args: &[String], min: usize, max: usize) -> bool {
    args.len() < min || max < args.len()
}

// The tooltip operand, when present, starts with "__" at a fixed
// position; the prefix is stripped.
fn get_tooltip(args: &[String], idx: usize) -> Option<String> {
    match args.get(idx) {
        Some(arg) if arg.starts_with("__") => Some(arg[2..].to_string()),
        _ => None,
    }
}

// Build the control-specific payload from the operands past the six
// positional fields, or None when the payload is structurally invalid.
//
// `arguments` is the whole operand list (type removed); several
// payloads reach back into it.
fn parse_ui_info(
    control_type: UiControlType,
    arguments: &[String],
    svc: &dyn StringServices,
) -> Option<(UiInfo, Option<String>)> {
    let args = &arguments[6..];

    match control_type {
        UiControlType::TextBox => {
            if ui_arg_count_invalid(args, 1, 2) {
                return None;
            }
            let info = UiInfo::TextBox {
                value: svc.unescape(&args[0]),
            };
            Some((info, get_tooltip(args, 1)))
        }
        UiControlType::TextLabel => {
            if ui_arg_count_invalid(args, 1, 3) {
                return None;
            }
            let font_size = args[0].parse().unwrap_or(0);
            let style = match args.get(1) {
                Some(arg) if arg.eq_ignore_ascii_case("Bold") => TextLabelStyle::Bold,
                Some(arg) if arg.eq_ignore_ascii_case("Italic") => TextLabelStyle::Italic,
                Some(arg) if arg.eq_ignore_ascii_case("Underline") => TextLabelStyle::Underline,
                Some(arg) if arg.eq_ignore_ascii_case("Strike") => TextLabelStyle::Strike,
                _ => TextLabelStyle::Normal,
            };
            let info = UiInfo::TextLabel { font_size, style };
            Some((info, get_tooltip(args, 2)))
        }
        UiControlType::NumberBox => {
            if ui_arg_count_invalid(args, 4, 5) {
                return None;
            }
            let info = UiInfo::NumberBox {
                value: args[0].parse().unwrap_or(0),
                min: args[1].parse().unwrap_or(0),
                max: args[2].parse().unwrap_or(0),
                interval: args[3].parse().unwrap_or(0),
            };
            Some((info, get_tooltip(args, 4)))
        }
        UiControlType::CheckBox => {
            if ui_arg_count_invalid(args, 1, 3) {
                return None;
            }
            let checked = if args[0].eq_ignore_ascii_case("True") {
                true
            } else if args[0].eq_ignore_ascii_case("False") {
                false
            } else {
                return None;
            };
            let info = UiInfo::CheckBox {
                checked,
                section_name: args.get(1).cloned(),
            };
            Some((info, get_tooltip(args, 2)))
        }
        UiControlType::ComboBox => {
            // Variable length; the selected entry is the control's
            // Text operand, matched verbatim against the item list.
            let last = args.last()?;
            let (tooltip, count) = if last.starts_with("__") {
                (Some(last.clone()), args.len() - 1)
            } else {
                (None, args.len())
            };
            let items: Vec<String> = args[..count].to_vec();
            let index = items.iter().position(|item| *item == arguments[0])?;
            Some((UiInfo::ComboBox { items, index }, tooltip))
        }
        UiControlType::Image => {
            if ui_arg_count_invalid(args, 0, 2) {
                return None;
            }
            let info = UiInfo::Image {
                url: args.first().cloned(),
            };
            Some((info, get_tooltip(args, 1)))
        }
        UiControlType::TextFile => {
            if ui_arg_count_invalid(args, 0, 1) {
                return None;
            }
            Some((UiInfo::TextFile, get_tooltip(args, 0)))
        }
        UiControlType::Button => {
            // <SectionName>[,Picture][,ShowProgress][,...][,Tooltip]
            if ui_arg_count_invalid(args, 1, 7) {
                return None;
            }
            let section_name = args[0].clone();
            let picture = match args.get(1) {
                Some(arg) if !arg.eq_ignore_ascii_case("0") => Some(arg.clone()),
                _ => None,
            };
            let show_progress = match args.get(2) {
                None => false,
                Some(arg) if arg.eq_ignore_ascii_case("True") => true,
                Some(arg) if arg.eq_ignore_ascii_case("False") => false,
                Some(_) => return None,
            };
            let info = UiInfo::Button {
                section_name,
                picture,
                show_progress,
            };
            Some((info, get_tooltip(args, args.len().wrapping_sub(1))))
        }
        UiControlType::WebLabel => {
            if ui_arg_count_invalid(args, 1, 2) {
                return None;
            }
            let info = UiInfo::WebLabel {
                url: svc.unescape(&args[0]),
            };
            Some((info, get_tooltip(args, 2)))
        }
        UiControlType::RadioButton => {
            if ui_arg_count_invalid(args, 1, 3) {
                return None;
            }
            let selected = if args[0].eq_ignore_ascii_case("True") {
                true
            } else if args[0].eq_ignore_ascii_case("False") {
                false
            } else {
                return None;
            };
            let info = UiInfo::RadioButton {
                selected,
                section_name: args.get(1).cloned(),
            };
            Some((info, get_tooltip(args, 2)))
        }
        UiControlType::Bevel => {
            if ui_arg_count_invalid(args, 0, 1) {
                return None;
            }
            Some((UiInfo::Bevel, get_tooltip(args, 1)))
        }
        UiControlType::FileBox => {
            if ui_arg_count_invalid(args, 0, 2) {
                return None;
            }
            let is_file = matches!(args.first(),
                Some(first) if !first.starts_with("__") && first.eq_ignore_ascii_case("FILE"));
            Some((UiInfo::FileBox { is_file }, get_tooltip(args, 2)))
        }
        UiControlType::RadioGroup => {
            // Variable length: <Item>...,<SelectedIndex>[,Tooltip]
            let last = args.last()?;
            let (tooltip, count) = if last.starts_with("__") {
                (Some(last.clone()), args.len().checked_sub(2)?)
            } else {
                (None, args.len().checked_sub(1)?)
            };
            let items: Vec<String> = args[..count].to_vec();
            let index: i32 = args[count].parse().ok()?;
            Some((UiInfo::RadioGroup { items, index }, tooltip))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escaper::RawText;

    fn addr() -> SectionAddress {
        SectionAddress::new("test.script", "Interface")
    }

    fn parse(lines: &[&str]) -> (Vec<UiControl>, Vec<Diagnostic>) {
        let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        parse_ui_raw_lines(&lines, &addr(), &RawText)
    }

    fn parse_one(line: &str) -> UiControl {
        let (controls, diags) = parse(&[line]);
        assert!(diags.is_empty(), "unexpected diagnostics: {:?}", diags);
        assert_eq!(controls.len(), 1);
        controls.into_iter().next().unwrap()
    }

    #[test]
    fn test_text_box() {
        let ctrl = parse_one("pTextBox1=Display,1,0,20,20,200,21,StringValue");
        assert_eq!(ctrl.key, "pTextBox1");
        assert_eq!(ctrl.text, "Display");
        assert!(ctrl.visible);
        assert_eq!(ctrl.control_type, UiControlType::TextBox);
        assert_eq!(
            ctrl.rect,
            Rect {
                x: 20,
                y: 20,
                width: 200,
                height: 21
            }
        );
        assert_eq!(
            ctrl.info,
            UiInfo::TextBox {
                value: "StringValue".to_string()
            }
        );
        assert!(ctrl.tooltip.is_none());
    }

    #[test]
    fn test_tooltip_extraction() {
        let ctrl = parse_one("pTextBox1=Display,1,0,20,20,200,21,Value,__Hover text");
        assert_eq!(ctrl.tooltip.as_deref(), Some("Hover text"));
    }

    #[test]
    fn test_invisible_control() {
        let ctrl = parse_one("pTextBox1=Display,0,0,20,20,200,21,Value");
        assert!(!ctrl.visible);
    }

    #[test]
    fn test_rect_defaults_to_zero_on_bad_numbers() {
        let ctrl = parse_one("pTextBox1=Display,1,0,twenty,20,200,21,Value");
        assert_eq!(ctrl.rect.x, 0);
        assert_eq!(ctrl.rect.y, 20);
    }

    #[test]
    fn test_missing_equal_is_diagnostic() {
        let (controls, diags) = parse(&["Display,1,0,20,20,200,21"]);
        assert!(controls.is_empty());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("does not have a name"));
    }

    #[test]
    fn test_unbalanced_quotes_is_diagnostic() {
        let (controls, diags) = parse(&[r#"pText1=Disp"lay,1,0,20,20,200,21"#]);
        assert!(controls.is_empty());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_short_declaration_is_diagnostic() {
        let (controls, diags) = parse(&["pText1=Display,1,0,20,20"]);
        assert!(controls.is_empty());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("at least 7 arguments"));
    }

    #[test]
    fn test_non_numeric_type_is_diagnostic() {
        let (controls, diags) = parse(&["pText1=Display,1,TextBox,20,20,200,21,Value"]);
        assert!(controls.is_empty());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_unassigned_ordinal_dropped_silently() {
        let (controls, diags) = parse(&["pCheckList=List,1,9,20,20,200,21,a,b"]);
        assert!(controls.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_invalid_payload_dropped_silently() {
        // TextLabel (ordinal 1) with no payload operands
        let (controls, diags) = parse(&["Key=Text,1,1,10,10,100,20"]);
        assert!(controls.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_comments_and_blanks_elided() {
        let (controls, diags) = parse(&[
            "// layout",
            "",
            "pTextBox1=Display,1,0,20,20,200,21,Value",
            "; end",
        ]);
        assert!(diags.is_empty());
        assert_eq!(controls.len(), 1);
    }

    #[test]
    fn test_text_label_styles() {
        let ctrl = parse_one("pLabel1=Caption,1,1,20,20,200,18,8,Bold");
        assert_eq!(
            ctrl.info,
            UiInfo::TextLabel {
                font_size: 8,
                style: TextLabelStyle::Bold
            }
        );
    }

    #[test]
    fn test_number_box() {
        let ctrl = parse_one("pNumberBox1=pNumberBox1,1,2,20,20,40,22,3,0,100,1");
        assert_eq!(
            ctrl.info,
            UiInfo::NumberBox {
                value: 3,
                min: 0,
                max: 100,
                interval: 1
            }
        );
    }

    #[test]
    fn test_check_box() {
        let ctrl = parse_one("pCheckBox1=Enable Feature,1,3,20,20,200,18,True");
        assert_eq!(
            ctrl.info,
            UiInfo::CheckBox {
                checked: true,
                section_name: None
            }
        );

        let ctrl = parse_one("pCheckBox2=Enable,1,3,20,20,200,18,False,RunSection");
        assert_eq!(
            ctrl.info,
            UiInfo::CheckBox {
                checked: false,
                section_name: Some("RunSection".to_string())
            }
        );
    }

    #[test]
    fn test_check_box_bad_state_dropped() {
        let (controls, diags) = parse(&["pCheckBox1=Enable,1,3,20,20,200,18,Maybe"]);
        assert!(controls.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_combo_box_selects_text_operand() {
        let ctrl = parse_one("pComboBox1=B,1,4,20,20,150,21,A,B,C");
        assert_eq!(
            ctrl.info,
            UiInfo::ComboBox {
                items: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                index: 1
            }
        );
    }

    #[test]
    fn test_combo_box_unlisted_selection_dropped() {
        let (controls, diags) = parse(&["pComboBox1=D,1,4,20,20,150,21,A,B,C"]);
        assert!(controls.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_combo_box_tooltip_kept_verbatim() {
        // The variable-length payloads keep the tooltip operand
        // unstripped.
        let ctrl = parse_one("pComboBox1=A,1,4,20,20,150,21,A,B,__pick one");
        assert_eq!(ctrl.tooltip.as_deref(), Some("__pick one"));
    }

    #[test]
    fn test_button() {
        let ctrl = parse_one("pButton1=Install,1,8,20,20,80,25,DoInstall,0,True");
        assert_eq!(
            ctrl.info,
            UiInfo::Button {
                section_name: "DoInstall".to_string(),
                picture: None,
                show_progress: true
            }
        );

        let ctrl = parse_one("pButton2=Install,1,8,20,20,80,25,DoInstall,icon.bmp");
        assert_eq!(
            ctrl.info,
            UiInfo::Button {
                section_name: "DoInstall".to_string(),
                picture: Some("icon.bmp".to_string()),
                show_progress: false
            }
        );
    }

    #[test]
    fn test_web_label() {
        let ctrl = parse_one("pWebLabel1=Homepage,1,10,20,20,100,18,https://example.com");
        assert_eq!(
            ctrl.info,
            UiInfo::WebLabel {
                url: "https://example.com".to_string()
            }
        );
    }

    #[test]
    fn test_file_box() {
        let ctrl = parse_one("pFileBox1=C:\\Temp,1,13,20,20,200,20,FILE");
        assert_eq!(ctrl.info, UiInfo::FileBox { is_file: true });

        let ctrl = parse_one("pFileBox2=C:\\Temp,1,13,20,20,200,20");
        assert_eq!(ctrl.info, UiInfo::FileBox { is_file: false });
    }

    #[test]
    fn test_radio_group() {
        let ctrl = parse_one("pRadioGroup1=Choose,1,14,20,20,150,60,One,Two,1");
        assert_eq!(
            ctrl.info,
            UiInfo::RadioGroup {
                items: vec!["One".to_string(), "Two".to_string()],
                index: 1
            }
        );
    }

    #[test]
    fn test_radio_group_with_tooltip() {
        let ctrl = parse_one("pRadioGroup1=Choose,1,14,20,20,150,60,One,Two,0,__pick");
        assert_eq!(
            ctrl.info,
            UiInfo::RadioGroup {
                items: vec!["One".to_string(), "Two".to_string()],
                index: 0
            }
        );
        assert_eq!(ctrl.tooltip.as_deref(), Some("__pick"));
    }

    #[test]
    fn test_radio_group_bad_index_dropped() {
        let (controls, diags) = parse(&["pRadioGroup1=Choose,1,14,20,20,150,60,One,Two,last"]);
        assert!(controls.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_quoted_text_with_comma() {
        // The merge machine trims each comma-split piece, so the
        // space after the quoted comma is dropped.
        let ctrl = parse_one(r#"pLabel1="Hello, World",1,1,20,20,200,18,8"#);
        assert_eq!(ctrl.text, "Hello,World");
    }

    #[test]
    fn test_continuation_line() {
        let lines: Vec<String> = vec![
            "pComboBox1=A,1,4,20,20,150,21,\\".to_string(),
            "A,B,C".to_string(),
        ];
        let (controls, diags) = parse_ui_raw_lines(&lines, &addr(), &RawText);
        assert!(diags.is_empty());
        assert_eq!(controls.len(), 1);
        assert_eq!(
            controls[0].info,
            UiInfo::ComboBox {
                items: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                index: 0
            }
        );
    }

    #[test]
    fn test_bad_lines_do_not_abort_batch() {
        let (controls, diags) = parse(&[
            "broken line without equal",
            "pTextBox1=Display,1,0,20,20,200,21,Value",
        ]);
        assert_eq!(controls.len(), 1);
        assert_eq!(diags.len(), 1);
    }
}
