//! Line-oriented interactive session.

use std::path::Path;

use anyhow::Result;
use client_core::{AnalysisDriver, Command, FileInput};
use shared::domain::InputMode;
use tokio::io::{AsyncBufRead, Lines};
use tracing::warn;

use crate::terminal::{print_notifications, print_view, TerminalChart};

const HELP: &str = "\
commands:
  mode file|text   switch the active input
  file PATH        load a file into the file input
  text TEXT        set the text input
  submit           analyze the active input
  export           download the report for the last result
  show             print the current view
  quit             leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Mode(InputMode),
    File(String),
    Text(String),
    Submit,
    Export,
    Show,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));
    let command = match word {
        "mode" => ShellCommand::Mode(rest.parse()?),
        "file" if rest.is_empty() => return Err("usage: file PATH".into()),
        "file" => ShellCommand::File(rest.to_string()),
        "text" => ShellCommand::Text(rest.to_string()),
        "submit" => ShellCommand::Submit,
        "export" => ShellCommand::Export,
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

pub async fn run<R>(
    driver: &mut AnalysisDriver,
    chart: &TerminalChart,
    mut lines: Lines<R>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("{HELP}");
    print_view(&driver.view_model(), driver.controller().session().meta(), chart);

    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        match command {
            ShellCommand::Mode(mode) => driver.dispatch(Command::SetMode(mode)).await,
            ShellCommand::File(path) => match FileInput::read(Path::new(&path)) {
                Ok(input) => driver.controller_mut().form_mut().set_file(input),
                Err(err) => {
                    warn!(error = %err, "file not loaded");
                    eprintln!("{err:#}");
                    continue;
                }
            },
            ShellCommand::Text(text) => driver.controller_mut().form_mut().set_text(text),
            ShellCommand::Submit => driver.dispatch(Command::Submit).await,
            ShellCommand::Export => driver.dispatch(Command::Export).await,
            ShellCommand::Show => {}
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Quit => break,
        }
        print_notifications(driver.take_notifications());
        print_view(&driver.view_model(), driver.controller().session().meta(), chart);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(
            parse_line("mode text"),
            Ok(Some(ShellCommand::Mode(InputMode::Text)))
        );
        assert_eq!(
            parse_line("  text Su cuenta ha sido bloqueada  "),
            Ok(Some(ShellCommand::Text("Su cuenta ha sido bloqueada".into())))
        );
        assert_eq!(
            parse_line("file ./aviso.eml"),
            Ok(Some(ShellCommand::File("./aviso.eml".into())))
        );
        assert_eq!(parse_line("submit"), Ok(Some(ShellCommand::Submit)));
        assert_eq!(parse_line(""), Ok(None));
    }

    #[test]
    fn rejects_unknown_or_incomplete_commands() {
        assert!(parse_line("mode url").is_err());
        assert!(parse_line("file").is_err());
        assert!(parse_line("delete").is_err());
    }
}
