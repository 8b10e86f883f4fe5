//! Line-oriented command parsing for the stdin control surface.
//!
//! One command per line, verb first, case-insensitive:
//!
//! | Line                    | Effect                                   |
//! |-------------------------|------------------------------------------|
//! | `select <crop>`         | choose the crop for plant and click      |
//! | `plant <plot>`          | plant the selected crop                  |
//! | `harvest <plot>`        | harvest a ready plot                     |
//! | `click <plot>`          | plant if empty, harvest otherwise        |
//! | `fulfill <order>`       | deliver an order (full id or prefix)     |
//! | `pause` / `resume`      | stop and restart the clock               |
//! | `speed <ms>`            | change the tick interval                 |
//! | `reset`                 | start a new game                         |
//! | `quit`                  | end the session                          |

use harvest_core::controller::{OrderSelector, PlayerCommand};
use harvest_types::{CropId, PlotId, UnknownCrop};
use uuid::Uuid;

/// A parsed control line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A player action for the controller.
    Player(PlayerCommand),
    /// Pause the clock.
    Pause,
    /// Resume the clock.
    Resume,
    /// Set the tick interval in milliseconds.
    Speed(u64),
    /// End the session.
    Quit,
}

/// Why a control line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    /// The verb is not recognised.
    #[error("unknown command: {verb}")]
    UnknownVerb {
        /// The first word of the line.
        verb: String,
    },

    /// The verb needs an argument that was not given.
    #[error("{verb} needs a {what}")]
    MissingArgument {
        /// The verb.
        verb: &'static str,
        /// What the argument is.
        what: &'static str,
    },

    /// A plot argument is not a non-negative integer.
    #[error("invalid plot number: {value}")]
    InvalidPlot {
        /// The raw argument.
        value: String,
    },

    /// A speed argument is not a non-negative integer.
    #[error("invalid tick interval: {value}")]
    InvalidSpeed {
        /// The raw argument.
        value: String,
    },

    /// A crop argument names no catalog crop.
    #[error(transparent)]
    InvalidCrop(#[from] UnknownCrop),
}

/// Parse one line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandParseError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match verb.to_ascii_lowercase().as_str() {
        "select" => {
            let crop = required(arg, "select", "crop")?.parse::<CropId>()?;
            Command::Player(PlayerCommand::SelectCrop(crop))
        }
        "plant" => Command::Player(PlayerCommand::Plant {
            plot: plot_arg(arg, "plant")?,
        }),
        "harvest" => Command::Player(PlayerCommand::Harvest {
            plot: plot_arg(arg, "harvest")?,
        }),
        "click" => Command::Player(PlayerCommand::Click {
            plot: plot_arg(arg, "click")?,
        }),
        "fulfill" | "fulfil" => {
            let raw = required(arg, "fulfill", "order id")?;
            let order = raw.parse::<Uuid>().map_or_else(
                |_err| OrderSelector::Prefix(raw.to_owned()),
                |id| OrderSelector::Id(id.into()),
            );
            Command::Player(PlayerCommand::Fulfill { order })
        }
        "reset" => Command::Player(PlayerCommand::Reset),
        "pause" => Command::Pause,
        "resume" => Command::Resume,
        "speed" => {
            let raw = required(arg, "speed", "tick interval in ms")?;
            let ms = raw.parse::<u64>().map_err(|_err| CommandParseError::InvalidSpeed {
                value: raw.to_owned(),
            })?;
            Command::Speed(ms)
        }
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(CommandParseError::UnknownVerb {
                verb: other.to_owned(),
            });
        }
    };
    Ok(Some(command))
}

fn required<'a>(
    arg: Option<&'a str>,
    verb: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandParseError> {
    arg.ok_or(CommandParseError::MissingArgument { verb, what })
}

fn plot_arg(arg: Option<&str>, verb: &'static str) -> Result<PlotId, CommandParseError> {
    let raw = required(arg, verb, "plot number")?;
    raw.parse::<usize>()
        .map(PlotId)
        .map_err(|_err| CommandParseError::InvalidPlot {
            value: raw.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use harvest_types::OrderId;

    use super::*;

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn plot_commands() {
        assert_eq!(
            parse_line("plant 3"),
            Ok(Some(Command::Player(PlayerCommand::Plant { plot: PlotId(3) })))
        );
        assert_eq!(
            parse_line("CLICK 15"),
            Ok(Some(Command::Player(PlayerCommand::Click { plot: PlotId(15) })))
        );
        assert_eq!(
            parse_line("harvest x"),
            Err(CommandParseError::InvalidPlot {
                value: "x".to_owned()
            })
        );
        assert!(matches!(
            parse_line("plant"),
            Err(CommandParseError::MissingArgument { verb: "plant", .. })
        ));
    }

    #[test]
    fn select_parses_crop() {
        assert_eq!(
            parse_line("select Corn"),
            Ok(Some(Command::Player(PlayerCommand::SelectCrop(CropId::Corn))))
        );
        assert!(matches!(
            parse_line("select rice"),
            Err(CommandParseError::InvalidCrop(_))
        ));
    }

    #[test]
    fn fulfill_accepts_full_id_or_prefix() {
        let id = OrderId::from_random_bytes([0x11; 16]);
        assert_eq!(
            parse_line(&format!("fulfill {id}")),
            Ok(Some(Command::Player(PlayerCommand::Fulfill {
                order: OrderSelector::Id(id)
            })))
        );
        assert_eq!(
            parse_line("fulfill ab12"),
            Ok(Some(Command::Player(PlayerCommand::Fulfill {
                order: OrderSelector::Prefix("ab12".to_owned())
            })))
        );
    }

    #[test]
    fn control_commands() {
        assert_eq!(parse_line("pause"), Ok(Some(Command::Pause)));
        assert_eq!(parse_line("resume"), Ok(Some(Command::Resume)));
        assert_eq!(parse_line("speed 250"), Ok(Some(Command::Speed(250))));
        assert_eq!(parse_line("quit"), Ok(Some(Command::Quit)));
        assert_eq!(
            parse_line("reset"),
            Ok(Some(Command::Player(PlayerCommand::Reset)))
        );
        assert!(matches!(
            parse_line("speed fast"),
            Err(CommandParseError::InvalidSpeed { .. })
        ));
    }

    #[test]
    fn unknown_verb_is_rejected() {
        assert_eq!(
            parse_line("water 3"),
            Err(CommandParseError::UnknownVerb {
                verb: "water".to_owned()
            })
        );
    }
}
