// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::{Args, Parser};

use crate::sheets::{SheetSource, defaults};

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "eati")]
#[command(
    about = "🎡 Can't decide where to eat? Spin the wheel 🌮\n\x1b[38;5;206mEarly access preview \x1b[0m🐣"
)]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version} 💻\n\nLoads restaurant names from one column of a published Google Sheets document.\nUSAGE 📓:\n  eati [\x1b[34moptions\x1b[0m]\n\n[options]\n{options}"
)]
pub struct CLIArg {
    #[arg(
        long,
        help = "Google Sheets document id to load the restaurant list from",
        default_value = defaults::SPREADSHEET_ID
    )]
    pub spreadsheet_id: String,

    #[arg(
        long,
        help = "Sheet (tab) name inside the document",
        default_value = defaults::SHEET_NAME
    )]
    pub sheet: String,

    #[arg(
        long,
        help = "Column whose cells become wheel segments",
        value_parser = parse_column_letter,
        default_value_t = defaults::COLUMN
    )]
    pub column: char,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `log.txt` for debugging."
    )]
    pub enable_logging: bool,
}

impl CLIArg {
    #[must_use]
    pub fn sheet_source(&self) -> SheetSource {
        SheetSource {
            spreadsheet_id: self.spreadsheet_id.clone(),
            sheet_name: self.sheet.clone(),
            column: self.column,
        }
    }
}

/// Accepts a single A-Z letter, case insensitively.
fn parse_column_letter(arg: &str) -> Result<char, String> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => {
            Ok(letter.to_ascii_uppercase())
        }
        _ => Err(format!("'{arg}' is not a single column letter (A-Z)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn no_args_fall_back_to_the_demo_sheet() {
        let cli_arg = CLIArg::try_parse_from(["eati"]).unwrap();
        let source = cli_arg.sheet_source();
        assert_eq2!(source, SheetSource::default());
        assert!(!cli_arg.global_options.enable_logging);
    }

    #[test]
    fn column_letter_is_uppercased() {
        let cli_arg = CLIArg::try_parse_from(["eati", "--column", "b"]).unwrap();
        assert_eq2!(cli_arg.column, 'B');
    }

    #[test]
    fn multi_char_column_is_rejected() {
        assert!(CLIArg::try_parse_from(["eati", "--column", "AB"]).is_err());
        assert!(CLIArg::try_parse_from(["eati", "--column", "1"]).is_err());
    }

    #[test]
    fn logging_flag_parses_in_both_forms() {
        for args in [["eati", "-l"], ["eati", "--enable-logging"]] {
            let cli_arg = CLIArg::try_parse_from(args).unwrap();
            assert!(cli_arg.global_options.enable_logging);
        }
    }
}
