use std::io::{self, BufRead, Write};
use std::time::Duration;

use thiserror::Error;
use tracker_core::{Msg, SearchId};

use super::app::App;
use super::effects::Notifier;
use crate::cli::OutputFormat;

const HELP: &str = "\
Commands:
  list              show saved searches, keywords and resources
  select <id>...    select exactly these searches (no ids clears the selection)
  toggle <id>       flip one search in the selection
  show              fetch resources for the selection
  clear             empty the resource table
  html              print the page as HTML
  help              print this help
  quit              leave the tracker
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Select(Vec<SearchId>),
    Toggle(SearchId),
    Show,
    Clear,
    Html,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("invalid search id `{0}`")]
    InvalidId(String),
    #[error("`{0}` expects exactly one search id")]
    ExpectsOneId(&'static str),
}

/// Parses one input line; blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "select" => Command::Select(parse_ids(&args)?),
        "toggle" => match parse_ids(&args)?.as_slice() {
            [id] => Command::Toggle(*id),
            _ => return Err(CommandError::ExpectsOneId("toggle")),
        },
        "show" => Command::Show,
        "clear" => Command::Clear,
        "html" => Command::Html,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_ids(args: &[&str]) -> Result<Vec<SearchId>, CommandError> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .map_err(|_| CommandError::InvalidId(part.to_string()))
        })
        .collect()
}

/// Reads commands until `quit` or end of input, writing views to `out`.
pub fn run_console<N, R, W>(
    app: &mut App<N>,
    input: R,
    mut out: W,
    format: OutputFormat,
    wait: Duration,
) -> io::Result<()>
where
    N: Notifier,
    R: BufRead,
    W: Write,
{
    out.write_all(app.render(format).as_bytes())?;
    out.flush()?;

    for line in input.lines() {
        let command = match parse_command(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        match command {
            Command::List => out.write_all(app.render(format).as_bytes())?,
            Command::Select(ids) => {
                app.dispatch(Msg::SelectionChanged(ids));
                writeln!(out, "{}", app.view().keyword_line)?;
            }
            Command::Toggle(id) => {
                app.dispatch(Msg::SearchToggled(id));
                writeln!(out, "{}", app.view().keyword_line)?;
            }
            Command::Show => {
                app.dispatch(Msg::ShowResourcesClicked);
                app.settle(wait);
                out.write_all(app.render(format).as_bytes())?;
            }
            Command::Clear => {
                app.dispatch(Msg::ClearClicked);
                out.write_all(app.render(format).as_bytes())?;
            }
            Command::Html => out.write_all(app.render(OutputFormat::Html).as_bytes())?,
            Command::Help => out.write_all(HELP.as_bytes())?,
            Command::Quit => break,
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::app::tests::{app_for, backend, WAIT};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn parses_commands_and_ids() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("LIST"), Ok(Some(Command::List)));
        assert_eq!(
            parse_command("select 1 2,3"),
            Ok(Some(Command::Select(vec![1, 2, 3])))
        );
        assert_eq!(parse_command("select"), Ok(Some(Command::Select(Vec::new()))));
        assert_eq!(parse_command("toggle 4"), Ok(Some(Command::Toggle(4))));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse_command("fetch"),
            Err(CommandError::Unknown("fetch".to_string()))
        );
        assert_eq!(
            parse_command("select 1 x"),
            Err(CommandError::InvalidId("x".to_string()))
        );
        assert_eq!(
            parse_command("toggle 1 2"),
            Err(CommandError::ExpectsOneId("toggle"))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn scripted_session_selects_fetches_and_clears() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(path("/api/resources_for_searches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "T1", "company": "C1", "location": "Remote",
                 "work_status": null, "url": "http://x"}
            ])))
            .mount(&server)
            .await;
        let mut app = app_for(&server);
        assert!(app.start(WAIT));

        let script = "select 1\nbogus\nshow\nclear\nquit\nshow\n";
        let mut out = Vec::new();
        run_console(&mut app, script.as_bytes(), &mut out, OutputFormat::Text, WAIT).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Keywords: foo, bar\n"));
        assert!(out.contains("error: unknown command `bogus`"));
        assert!(out.contains("T1 | C1 | Remote | N/A | http://x\n"));
        assert!(out.trim_end().ends_with("Resources: none"));
        assert!(app.view().table.is_empty());
    }
}
