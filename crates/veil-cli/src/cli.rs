use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::str::FromStr;
use veil_core::CharClass;

#[derive(Parser)]
#[command(name = "veil")]
#[command(about = "Progressively mask parts of a text while keeping the original", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log reconciliation and masking details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mask a text and print the result
    Mask(MaskArgs),

    /// Interactive masking session reading commands from stdin
    Session {
        /// Text file to load (empty document when omitted)
        file: Option<PathBuf>,
    },

    /// Print the characters matched by the `symbol` rule
    Symbols,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct MaskArgs {
    /// Input file (stdin when omitted)
    pub file: Option<PathBuf>,

    /// Rule to apply: hiragana, digit, symbol or space (repeatable, applied in order)
    #[arg(short, long = "rule")]
    pub rules: Vec<CharClass>,

    /// Toggle a span by hand as LINE:START:END (LINE is 1-based, offsets are
    /// 0-based code points, END exclusive)
    #[arg(long = "range")]
    pub ranges: Vec<RangeArg>,

    /// Start every line hidden instead of revealed
    #[arg(long)]
    pub reverse: bool,

    /// Placeholder character for hidden text
    #[arg(long)]
    pub glyph: Option<char>,

    /// Print the per-line views and boundaries as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the original text instead of the masked one
    #[arg(long, conflicts_with = "json")]
    pub plain: bool,

    /// Copy the masked text to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A manual selection on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeArg {
    /// 0-based line index
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl FromStr for RangeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [line, start, end] = parts[..] else {
            return Err(format!("expected LINE:START:END, got '{}'", s));
        };
        let number = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid number '{}': {}", part, e))
        };
        let line = number(line)?;
        if line == 0 {
            return Err("line numbers start at 1".to_string());
        }
        Ok(Self {
            line: line - 1,
            start: number(start)?,
            end: number(end)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_range() {
        let range: RangeArg = "2:3:7".parse().unwrap();
        assert_eq!(
            range,
            RangeArg {
                line: 1,
                start: 3,
                end: 7
            }
        );
    }

    #[test]
    fn test_parse_range_errors() {
        assert!("0:1:2".parse::<RangeArg>().is_err());
        assert!("1:2".parse::<RangeArg>().is_err());
        assert!("1:a:2".parse::<RangeArg>().is_err());
    }

    #[test]
    fn test_parse_mask_command() {
        let cli = Cli::try_parse_from([
            "veil", "mask", "notes.txt", "-r", "digit", "--rule", "symbol", "--range", "1:0:2",
        ])
        .unwrap();
        let Commands::Mask(args) = cli.command else {
            panic!("expected mask command");
        };
        assert_eq!(args.rules, vec![CharClass::Digit, CharClass::Symbol]);
        assert_eq!(args.ranges.len(), 1);
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn test_output_flags() {
        assert!(Cli::try_parse_from(["veil", "mask", "--plain"]).is_ok());
        assert!(Cli::try_parse_from(["veil", "mask", "--json", "-o", "report.json"]).is_ok());
        assert!(Cli::try_parse_from(["veil", "mask", "--json", "--plain"]).is_err());
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        assert!(Cli::try_parse_from(["veil", "mask", "--rule", "emoji"]).is_err());
    }
}
