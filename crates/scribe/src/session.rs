//! The interactive terminal loop: read a topic, generate, show, repeat.
use std::{
    io::{self, Write},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use scribe_core::{
    generic::GenericMessage,
    provider::{ChatCompletionProvider, TextCompletionProvider},
};
use scribe_store::ArticleStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    pipeline::{ArticleGenerator, Selector},
    render::{TOPIC_HINT, render_article, render_history},
};

pub const SPINNER_MESSAGE: &str = "Generating your article...";

const PROMPT: &str = "topic> ";

const HELP: &str = "\
Commands:
  <topic>          generate an article on <topic>
  /history         list stored articles, newest first
  /show <n|key>    print a stored article
  /help            show this help
  /quit            leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Blank,
    Topic(String),
    History,
    Show(String),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Blank;
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Command::Topic(line.to_owned());
    };

    let (name, arg) = rest
        .split_once(char::is_whitespace)
        .map(|(name, arg)| (name, arg.trim()))
        .unwrap_or((rest, ""));

    match name.to_ascii_lowercase().as_str() {
        "history" | "h" => Command::History,
        "show" | "s" => Command::Show(arg.to_owned()),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_owned()),
    }
}

/// Spinner on stderr while a request is in flight; `None` when disabled.
pub fn spinner(enabled: bool, message: &'static str) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
        .template("{spinner} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));

    Some(pb)
}

pub struct Session<'g, B, S> {
    generator: &'g ArticleGenerator<B, S>,
    spinner: bool,
}

impl<'g, B, S> Session<'g, B, S>
where
    B: TextCompletionProvider + ChatCompletionProvider,
    GenericMessage: Into<B::Message>,
    S: ArticleStore,
{
    pub fn new(generator: &'g ArticleGenerator<B, S>) -> Self {
        Self {
            generator,
            spinner: false,
        }
    }

    pub fn with_spinner(mut self, spinner: bool) -> Self {
        self.spinner = spinner;
        self
    }

    /// Run until `/quit` or end of input.  Generation failures are reported
    /// to `out` and the loop carries on; only I/O errors end it early.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        self.print_history(out)?;
        writeln!(out, "{TOPIC_HINT}")?;

        let mut lines = input.lines();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            match parse_command(&line) {
                Command::Blank => writeln!(out, "{TOPIC_HINT}")?,
                Command::Topic(topic) => self.generate(&topic, out).await?,
                Command::History => self.print_history(out)?,
                Command::Show(arg) if arg.is_empty() => writeln!(out, "Usage: /show <n|key>")?,
                Command::Show(arg) => self.show(&arg, out)?,
                Command::Help => writeln!(out, "{HELP}")?,
                Command::Quit => break,
                Command::Unknown(cmd) => {
                    writeln!(out, "Unknown command `{cmd}`. Type /help for a list.")?
                }
            }
        }

        Ok(())
    }

    async fn generate<W: Write>(&self, topic: &str, out: &mut W) -> io::Result<()> {
        let progress = spinner(self.spinner, SPINNER_MESSAGE);
        let result = self.generator.generate(topic).await;
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        match result {
            Ok(record) => write!(out, "\n{}\n", render_article(&record)),
            Err(err) => {
                tracing::warn!(error = %err, "article generation failed");
                if let Some(record) = err.unsaved_record() {
                    write!(out, "\n{}\n", render_article(record))?;
                }
                writeln!(out, "{}", err.user_message())
            }
        }
    }

    fn show<W: Write>(&self, arg: &str, out: &mut W) -> io::Result<()> {
        let found = arg
            .parse::<Selector>()
            .and_then(|selector| self.generator.show(&selector));

        match found {
            Ok(record) => write!(out, "\n{}\n", render_article(&record)),
            Err(err) => writeln!(out, "{}", err.user_message()),
        }
    }

    fn print_history<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.generator.history() {
            Ok(records) => write!(out, "{}", render_history(&records, None)),
            Err(err) => writeln!(out, "{}", err.user_message()),
        }
    }
}
