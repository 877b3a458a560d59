use crate::validation::{validate, FieldKind};
use anyhow::{anyhow, Context, Result};
use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::io::{BufRead, Write};

const BANNER_WIDTH: usize = 50;

/// Where the collector gets its answers from.
pub trait Prompter {
    /// Start a new group of questions.
    fn section(&mut self, title: &str) -> Result<()>;
    fn message(&mut self, message: &str) -> Result<()>;
    fn warn(&mut self, message: &str) -> Result<()>;
    /// Ask a single question, returning the raw answer.
    fn ask(&mut self, prompt: &str, kind: FieldKind) -> Result<String>;
}

/// Interactive prompts for a terminal.
///
/// Answers are checked as they are typed so the user is only ever asked once
/// per field.
pub struct TerminalPrompter {
    term: Term,
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> TerminalPrompter {
        TerminalPrompter {
            term: Term::stdout(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        TerminalPrompter::new()
    }
}

impl Prompter for TerminalPrompter {
    fn section(&mut self, title: &str) -> Result<()> {
        self.term
            .clear_screen()
            .with_context(|| "Failed to clear the screen")?;
        let rule = "=".repeat(BANNER_WIDTH);
        self.term.write_line(&rule)?;
        self.term
            .write_line(&format!("\n{}\n", style(title).bold().cyan()))?;
        self.term.write_line(&rule)?;
        self.term.write_line("")?;
        Ok(())
    }

    fn message(&mut self, message: &str) -> Result<()> {
        self.term.write_line(message)?;
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        self.term
            .write_line(&style(message).yellow().to_string())?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str, kind: FieldKind) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .validate_with(|input: &String| validate(input, kind).map(|_| ()))
            .interact_text_on(&self.term)
            .with_context(|| format!("Failed to read answer to \"{prompt}\""))
    }
}

/// Plain line-based prompts, for piped input.
///
/// Running out of input is an error since the collector cannot finish.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> LinePrompter<R, W> {
        LinePrompter { reader, writer }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn section(&mut self, title: &str) -> Result<()> {
        let rule = "=".repeat(BANNER_WIDTH);
        writeln!(self.writer, "\n{rule}\n\n{title}\n\n{rule}\n")?;
        Ok(())
    }

    fn message(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{message}")?;
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{message}")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str, _kind: FieldKind) -> Result<String> {
        write!(self.writer, "{prompt}: ")?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .with_context(|| format!("Failed to read answer to \"{prompt}\""))?;
        if read == 0 {
            return Err(anyhow!("input closed while waiting for \"{prompt}\""));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
