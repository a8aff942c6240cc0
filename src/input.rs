use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::debug;
use crate::{
    error::ParseError,
    kitchen::DragSource,
    model::{Appliance, Food, PreparedId},
};


// A player action, the terminal stand-in for clicks and drag-and-drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Help,
    Quit,
    Drop { source: DragSource, appliance: Appliance },
}


// Parse one line, e.g. `drop patty on grill`, `p2 assembly`, `start`
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = words.first() else {
        return Err(ParseError::Empty);
    };

    match first.to_lowercase().as_str() {
        "start" | "s" => return Ok(Command::Start),
        "stop" => return Ok(Command::Stop),
        "help" | "h" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let is_drop = first.eq_ignore_ascii_case("drop");
    let args: Vec<&str> = words
        .iter()
        .copied()
        .skip(usize::from(is_drop))
        .filter(|w| !w.eq_ignore_ascii_case("on"))
        .collect();
    match args.as_slice() {
        [] => Err(ParseError::MissingArgument("food")),
        [source] => {
            parse_source(source)?;
            Err(ParseError::MissingArgument("appliance"))
        }
        [source, rest @ ..] => {
            let source = match parse_source(source) {
                Err(_) if rest.len() > 1 && !is_drop => {
                    return Err(ParseError::UnknownCommand(first.to_string()))
                }
                other => other?,
            };
            // Multi-word appliance names: `drink machine` reads as `drink-machine`
            Ok(Command::Drop {
                source,
                appliance: rest.join("-").parse()?,
            })
        }
    }
}

fn parse_source(word: &str) -> Result<DragSource, ParseError> {
    if let Ok(id) = word.parse::<PreparedId>() {
        return Ok(DragSource::Prepared(id));
    }
    word.parse::<Food>().map(DragSource::Ingredient)
}


// Forward stdin lines as commands until EOF or `quit`
pub async fn input_task(commands_tx: mpsc::UnboundedSender<Result<Command, ParseError>>) {
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                let _ = commands_tx.send(Ok(Command::Quit));
                break;
            }
            Err(err) => {
                debug!(%err, "stdin closed");
                let _ = commands_tx.send(Ok(Command::Quit));
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = parse_command(&line);
        debug!(line = line.trim(), ?command, "input");
        let quit = matches!(command, Ok(Command::Quit));
        if commands_tx.send(command).is_err() || quit {
            break;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_words() {
        assert_eq!(parse_command("start").unwrap(), Command::Start);
        assert_eq!(parse_command("  STOP ").unwrap(), Command::Stop);
        assert_eq!(parse_command("?").unwrap(), Command::Help);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
    }

    #[test]
    fn drop_forms() {
        let expected = Command::Drop {
            source: DragSource::Ingredient(Food::Patty),
            appliance: Appliance::Grill,
        };
        assert_eq!(parse_command("drop patty on grill").unwrap(), expected);
        assert_eq!(parse_command("drop patty grill").unwrap(), expected);
        assert_eq!(parse_command("patty grill").unwrap(), expected);
        assert_eq!(parse_command("patty on grill").unwrap(), expected);
    }

    #[test]
    fn prepared_items_by_id() {
        assert_eq!(
            parse_command("drop p3 on assembly").unwrap(),
            Command::Drop {
                source: DragSource::Prepared(PreparedId(3)),
                appliance: Appliance::AssemblyStation,
            }
        );
    }

    #[test]
    fn two_word_appliance_names() {
        assert_eq!(
            parse_command("drop cup on drink machine").unwrap(),
            Command::Drop {
                source: DragSource::Ingredient(Food::Cup),
                appliance: Appliance::DrinkMachine,
            }
        );
        assert_eq!(
            parse_command("p2 on Assembly Station").unwrap(),
            Command::Drop {
                source: DragSource::Prepared(PreparedId(2)),
                appliance: Appliance::AssemblyStation,
            }
        );
        assert_eq!(
            parse_command("drop patty on big oven"),
            Err(ParseError::UnknownAppliance("big-oven".into()))
        );
    }

    #[test]
    fn typos_are_reported() {
        assert_eq!(parse_command("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_command("drop pizza on grill"),
            Err(ParseError::UnknownFood("pizza".into()))
        );
        assert_eq!(
            parse_command("drop patty on oven"),
            Err(ParseError::UnknownAppliance("oven".into()))
        );
        assert_eq!(parse_command("drop patty"), Err(ParseError::MissingArgument("appliance")));
        assert_eq!(parse_command("drop"), Err(ParseError::MissingArgument("food")));
        assert_eq!(
            parse_command("make me a sandwich"),
            Err(ParseError::UnknownCommand("make".into()))
        );
    }
}
