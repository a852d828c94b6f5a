use anyhow::{Context, Result};
use serde::Serialize;
use veil_config::Config;
use veil_core::{DisplayMode, Document, MaskedLine};

use super::{copy_to_clipboard, read_input};
use crate::cli::MaskArgs;

pub fn handle(args: MaskArgs, config: &Config) -> Result<()> {
    let text = read_input(args.file.as_deref())?;
    let doc = build(&text, &args, config)?;

    let output = render_output(&doc, &args)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
    }

    if args.copy || config.copy.enabled {
        copy_to_clipboard(&doc.export())?;
        eprintln!("✓ Copied masked text to clipboard");
    }

    Ok(())
}

/// Load `text` and apply the requested rules, then the manual ranges.
pub fn build(text: &str, args: &MaskArgs, config: &Config) -> Result<Document> {
    let mode = if args.reverse {
        DisplayMode::Reverse
    } else {
        config.display_mode
    };
    let mut doc = Document::with_style(mode, args.glyph.unwrap_or(config.mask_glyph));
    doc.apply_text(text);

    let rules = if args.rules.is_empty() {
        &config.rules
    } else {
        &args.rules
    };
    for rule in rules {
        doc.mask_by_class(*rule);
    }

    for range in &args.ranges {
        doc.toggle_range(range.line, range.start, range.end)
            .with_context(|| {
                format!(
                    "Invalid range {}:{}:{}",
                    range.line + 1,
                    range.start,
                    range.end
                )
            })?;
    }

    Ok(doc)
}

/// The text `handle` prints or writes, as selected by `--json` / `--plain`
pub fn render_output(doc: &Document, args: &MaskArgs) -> Result<String> {
    if args.json {
        Ok(serde_json::to_string_pretty(&DocumentReport::new(doc))?)
    } else if args.plain {
        Ok(doc.export_plain())
    } else {
        Ok(doc.export())
    }
}

#[derive(Debug, Serialize)]
struct DocumentReport<'a> {
    display_mode: DisplayMode,
    glyph: char,
    lines: Vec<LineReport<'a>>,
}

#[derive(Debug, Serialize)]
struct LineReport<'a> {
    line: usize,
    plain: &'a str,
    masked: &'a str,
    boundaries: &'a [usize],
    /// Hidden spans as [start, end) code point offsets
    hidden: Vec<[usize; 2]>,
}

impl<'a> DocumentReport<'a> {
    fn new(doc: &'a Document) -> Self {
        Self {
            display_mode: doc.display_mode(),
            glyph: doc.mask_glyph(),
            lines: doc
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| LineReport::new(index, line))
                .collect(),
        }
    }
}

impl<'a> LineReport<'a> {
    fn new(index: usize, line: &'a MaskedLine) -> Self {
        Self {
            line: index + 1,
            plain: &line.views().plain,
            masked: &line.views().masked,
            boundaries: line.boundaries().as_slice(),
            hidden: line
                .runs()
                .into_iter()
                .filter(|run| run.hidden)
                .map(|run| [run.start, run.end])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use veil_core::CharClass;

    fn mask_args(argv: &[&str]) -> MaskArgs {
        let cli = Cli::try_parse_from(["veil", "mask"].iter().chain(argv)).unwrap();
        match cli.command {
            Commands::Mask(args) => args,
            _ => panic!("expected mask command"),
        }
    }

    #[test]
    fn test_rules_from_arguments() {
        let args = mask_args(&["--rule", "digit"]);
        let doc = build("a1b22c\n3 apples", &args, &Config::default()).unwrap();
        assert_eq!(doc.export(), "a■b■■c\n■ apples");
    }

    #[test]
    fn test_plain_output_ignores_masks() {
        let args = mask_args(&["--plain", "--rule", "digit"]);
        let doc = build("a1b22c", &args, &Config::default()).unwrap();
        assert_eq!(render_output(&doc, &args).unwrap(), "a1b22c");

        let masked = mask_args(&["--rule", "digit"]);
        assert_eq!(render_output(&doc, &masked).unwrap(), "a■b■■c");
    }

    #[test]
    fn test_json_output_selected() {
        let args = mask_args(&["--json", "--rule", "digit"]);
        let doc = build("a1", &args, &Config::default()).unwrap();
        let output = render_output(&doc, &args).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["lines"][0]["masked"], "a■");
    }

    #[test]
    fn test_rules_fall_back_to_config() {
        let config = Config {
            rules: vec![CharClass::Space],
            ..Config::default()
        };
        let doc = build("a b", &mask_args(&[]), &config).unwrap();
        assert_eq!(doc.export(), "a■b");
    }

    #[test]
    fn test_ranges_are_one_based_lines() {
        let args = mask_args(&["--range", "2:0:3"]);
        let doc = build("first\nsecond", &args, &Config::default()).unwrap();
        assert_eq!(doc.export(), "first\n■■■ond");
    }

    #[test]
    fn test_range_outside_line_fails() {
        let args = mask_args(&["--range", "1:0:10"]);
        let err = build("short", &args, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid range 1:0:10"));
    }

    #[test]
    fn test_reverse_and_glyph() {
        let args = mask_args(&["--rule", "symbol", "--reverse", "--glyph", "x"]);
        let doc = build("（a）(b)。", &args, &Config::default()).unwrap();
        assert_eq!(doc.export(), "xxx(x)。");
    }

    #[test]
    fn test_json_report() {
        let args = mask_args(&["--rule", "digit"]);
        let doc = build("a1", &args, &Config::default()).unwrap();
        let json = serde_json::to_value(DocumentReport::new(&doc)).unwrap();

        assert_eq!(json["display_mode"], "normal");
        assert_eq!(json["lines"][0]["line"], 1);
        assert_eq!(json["lines"][0]["plain"], "a1");
        assert_eq!(json["lines"][0]["masked"], "a■");
        assert_eq!(json["lines"][0]["boundaries"], serde_json::json!([1]));
        assert_eq!(json["lines"][0]["hidden"], serde_json::json!([[1, 2]]));
    }
}
