//! Line-oriented interactive session
//!
//! Each input line is one command. Text edits (`load`, `reload`, `set`,
//! `insert`, `delete`) hand the full new text to the document, which keeps
//! the mask state of every line the edit did not touch.

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use veil_config::Config;
use veil_core::{CharClass, Document};

use super::{copy_to_clipboard, new_document, read_input};

const HELP: &str = "\
Commands (LINE is 1-based, START/END are 0-based code point offsets):
  rule <hiragana|digit|symbol|space>  toggle a rule on every line
  range <LINE> <START> <END>          toggle a span by hand
  reset                               clear all masks (asks first; reset! skips)
  reverse                             swap normal/reverse display
  load <PATH> | reload                read text from a file and reconcile
  set <LINE> <TEXT>                   replace one line
  insert <LINE> <TEXT>                insert a line before LINE
  delete <LINE>                       remove a line
  show                                masked view of every line, numbered
  export | plain                      print the masked or plain text
  copy                                copy the masked text to the clipboard
  help | quit";

/// A parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Rule(CharClass),
    Range { line: usize, start: usize, end: usize },
    Reset { force: bool },
    Reverse,
    Load(PathBuf),
    Reload,
    Set { line: usize, text: String },
    Insert { line: usize, text: String },
    Delete { line: usize },
    Show,
    Export,
    Plain,
    Copy,
    Help,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let input = input.trim_end_matches(['\r', '\n']);
        let (name, rest) = match input.trim_start().split_once(' ') {
            Some((name, rest)) => (name, rest),
            None => (input.trim(), ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name {
            "" => return Ok(None),
            "rule" | "mask" => Command::Rule(single(&args)?.parse()?),
            "range" => match args.as_slice() {
                [line, start, end] => Command::Range {
                    line: line_index(line)?,
                    start: start.parse().context("START must be a number")?,
                    end: end.parse().context("END must be a number")?,
                },
                _ => bail!("usage: range <LINE> <START> <END>"),
            },
            "reset" => Command::Reset { force: false },
            "reset!" => Command::Reset { force: true },
            "reverse" => Command::Reverse,
            "load" => Command::Load(PathBuf::from(rest.trim())),
            "reload" => Command::Reload,
            "set" | "insert" => {
                let (line, text) = rest.split_once(' ').unwrap_or((rest, ""));
                let line = line_index(line)?;
                let text = text.to_string();
                if name == "set" {
                    Command::Set { line, text }
                } else {
                    Command::Insert { line, text }
                }
            }
            "delete" => Command::Delete {
                line: line_index(single(&args)?)?,
            },
            "show" => Command::Show,
            "export" => Command::Export,
            "plain" => Command::Plain,
            "copy" => Command::Copy,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command '{}' (try 'help')", other),
        };
        Ok(Some(command))
    }
}

fn single<'a>(args: &[&'a str]) -> Result<&'a str> {
    match args {
        [arg] => Ok(*arg),
        _ => bail!("expected exactly one argument"),
    }
}

fn line_index(arg: &str) -> Result<usize> {
    let line: usize = arg
        .trim()
        .parse()
        .with_context(|| format!("invalid line number '{}'", arg))?;
    line.checked_sub(1)
        .context("line numbers start at 1")
}

pub struct Session {
    doc: Document,
    source: Option<PathBuf>,
}

impl Session {
    pub fn new(doc: Document) -> Self {
        Self { doc, source: None }
    }

    #[cfg(test)]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Read commands until `quit` or end of input.
    ///
    /// A failing command is reported and the session continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        let mut lines = input.lines();
        loop {
            write!(out, "veil> ")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line?;

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "error: {:#}", e)?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            if let Err(e) = self.execute(command, &mut lines, &mut out) {
                writeln!(out, "error: {:#}", e)?;
            }
        }
        Ok(())
    }

    pub fn execute<I, W>(&mut self, command: Command, input: &mut I, out: &mut W) -> Result<()>
    where
        I: Iterator<Item = std::io::Result<String>>,
        W: Write,
    {
        match command {
            Command::Rule(class) => {
                self.doc.mask_by_class(class);
                self.show(out)?;
            }
            Command::Range { line, start, end } => {
                if self.doc.toggle_range(line, start, end)? {
                    self.show(out)?;
                } else {
                    writeln!(out, "nothing selected")?;
                }
            }
            Command::Reset { force } => {
                if !force {
                    write!(out, "All masks will be lost. Continue? [y/N] ")?;
                    out.flush()?;
                    let answer = input.next().transpose()?.unwrap_or_default();
                    if !matches!(answer.trim(), "y" | "Y" | "yes") {
                        writeln!(out, "cancelled")?;
                        return Ok(());
                    }
                }
                self.doc.reset();
                writeln!(out, "✓ Masks cleared")?;
            }
            Command::Reverse => {
                let mode = self.doc.toggle_display_mode();
                writeln!(out, "display: {:?}", mode)?;
            }
            Command::Load(path) => {
                self.load(path)?;
                self.show(out)?;
            }
            Command::Reload => {
                let path = self
                    .source
                    .clone()
                    .context("nothing loaded yet; use 'load <PATH>'")?;
                self.load(path)?;
                self.show(out)?;
            }
            Command::Set { line, text } => {
                let mut lines = self.source_lines();
                let slot = lines
                    .get_mut(line)
                    .with_context(|| format!("line {} does not exist", line + 1))?;
                *slot = text;
                self.doc.apply_text(&lines.join("\n"));
                self.show(out)?;
            }
            Command::Insert { line, text } => {
                let mut lines = self.source_lines();
                if line > lines.len() {
                    bail!("line {} does not exist", line + 1);
                }
                lines.insert(line, text);
                self.doc.apply_text(&lines.join("\n"));
                self.show(out)?;
            }
            Command::Delete { line } => {
                let mut lines = self.source_lines();
                if line >= lines.len() {
                    bail!("line {} does not exist", line + 1);
                }
                lines.remove(line);
                self.doc.apply_text(&lines.join("\n"));
                self.show(out)?;
            }
            Command::Show => self.show(out)?,
            Command::Export => writeln!(out, "{}", self.doc.export())?,
            Command::Plain => writeln!(out, "{}", self.doc.export_plain())?,
            Command::Copy => {
                copy_to_clipboard(&self.doc.export())?;
                writeln!(out, "✓ Copied masked text to clipboard")?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn load(&mut self, path: PathBuf) -> Result<()> {
        let text = read_input(Some(&path))?;
        let splice = self.doc.apply_text(&text);
        tracing::info!(
            path = %path.display(),
            start = splice.start,
            removed = splice.removed,
            inserted = splice.inserted,
            "loaded text"
        );
        self.source = Some(path);
        Ok(())
    }

    fn source_lines(&self) -> Vec<String> {
        self.doc
            .lines()
            .iter()
            .map(|line| line.original().to_string())
            .collect()
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        let width = self.doc.line_count().to_string().len();
        for (index, line) in self.doc.lines().iter().enumerate() {
            writeln!(out, "{:>width$} | {}", index + 1, line.render(true), width = width)?;
        }
        Ok(())
    }
}

pub fn handle(file: Option<PathBuf>, config: &Config) -> Result<()> {
    let mut session = Session::new(new_document(config));
    if let Some(path) = file {
        session.load(path)?;
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session.run(stdin.lock(), stdout.lock())
}
