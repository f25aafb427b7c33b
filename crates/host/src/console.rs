//! Line-oriented console that plays the part of the game server.
//!
//! Each input line is one server-side happening: a permission change, an
//! entity spawn, a chat command or a hammer hit.

use anyhow::{Context, Result, bail};
use destroy_core::{ActionEvent, ActorId, Decision, TargetRef};
use destroy_runtime::{CommandOutcome, DestroyPlugin};

use crate::world::ServerWorld;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Grant { actor: ActorId, permission: String },
    Revoke { actor: ActorId, permission: String },
    Spawn { target: TargetRef },
    Chat { actor: ActorId, command: String },
    Hit { actor: ActorId, target: Option<TargetRef> },
    Entities,
    Reload,
    Save,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parses one console line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "grant" => Self::Grant {
                actor: actor_arg(words.next())?,
                permission: word_arg(words.next(), "permission")?,
            },
            "revoke" => Self::Revoke {
                actor: actor_arg(words.next())?,
                permission: word_arg(words.next(), "permission")?,
            },
            "spawn" => Self::Spawn {
                target: target_arg(words.next())?,
            },
            "chat" => Self::Chat {
                actor: actor_arg(words.next())?,
                command: word_arg(words.next(), "command")?,
            },
            "hit" => Self::Hit {
                actor: actor_arg(words.next())?,
                target: words.next().map(|w| target_arg(Some(w))).transpose()?,
            },
            "entities" => Self::Entities,
            "reload" => Self::Reload,
            "save" => Self::Save,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("unknown console command '{other}' (try 'help')"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument '{extra}'");
        }

        Ok(Some(command))
    }
}

pub const HELP: &str = "\
commands:
  grant <actor> <permission>
  revoke <actor> <permission>
  spawn <entity>
  chat <actor> <command>      e.g. chat 7 /destroy
  hit <actor> [entity]        hammer hit, entity omitted = nothing hit
  entities
  reload
  save
  quit";

/// Applies a console command and returns the lines to print.
pub fn execute(
    plugin: &DestroyPlugin,
    world: &ServerWorld,
    command: ConsoleCommand,
) -> Vec<String> {
    let mut out = Vec::new();

    match command {
        ConsoleCommand::Grant { actor, permission } => {
            world.grant(actor, &permission);
            out.push(format!("granted '{permission}' to {actor}"));
        }
        ConsoleCommand::Revoke { actor, permission } => {
            if world.revoke(actor, &permission) {
                out.push(format!("revoked '{permission}' from {actor}"));
            } else {
                out.push(format!("{actor} did not hold '{permission}'"));
            }
        }
        ConsoleCommand::Spawn { target } => {
            if world.spawn(target) {
                out.push(format!("spawned {target}"));
            } else {
                out.push(format!("{target} already exists"));
            }
        }
        ConsoleCommand::Chat { actor, command } => {
            if plugin.handle_command(Some(actor), &command) == CommandOutcome::Unknown {
                out.push(format!("unknown chat command '{command}'"));
            }
        }
        ConsoleCommand::Hit { actor, target } => {
            let decision = plugin.on_hammer_hit(&ActionEvent::new(Some(actor), target));
            out.push(describe(decision));
        }
        ConsoleCommand::Entities => {
            let entities = world.live_entities();
            if entities.is_empty() {
                out.push("no entities".to_owned());
            }
            out.extend(entities.iter().map(ToString::to_string));
        }
        ConsoleCommand::Reload => {
            let outcome = plugin.reload_config();
            match outcome.diagnostic {
                Some(diagnostic) => out.push(format!(
                    "reloaded with defaults ({diagnostic}), permission '{}'",
                    outcome.config.permission
                )),
                None => out.push(format!(
                    "reloaded, permission '{}'",
                    outcome.config.permission
                )),
            }
        }
        ConsoleCommand::Save => {
            plugin.save_config();
            out.push(format!("saved, permission '{}'", plugin.config().permission));
        }
        ConsoleCommand::Help => out.push(HELP.to_owned()),
        ConsoleCommand::Quit => {}
    }

    out.extend(
        world
            .drain_outbox()
            .into_iter()
            .map(|(actor, text)| format!("[chat → {actor}] {text}")),
    );

    out
}

fn describe(decision: Decision) -> String {
    if let Some(target) = decision.target() {
        format!("hit destroyed {target}")
    } else if let Some(key) = decision.notification() {
        format!("hit notified: {key}")
    } else {
        "hit ignored".to_owned()
    }
}

fn word_arg(word: Option<&str>, name: &str) -> Result<String> {
    word.map(str::to_owned)
        .with_context(|| format!("missing <{name}> argument"))
}

fn actor_arg(word: Option<&str>) -> Result<ActorId> {
    let word = word.context("missing <actor> argument")?;
    word.parse::<u64>()
        .map(ActorId::new)
        .with_context(|| format!("invalid actor id '{word}'"))
}

fn target_arg(word: Option<&str>) -> Result<TargetRef> {
    let word = word.context("missing <entity> argument")?;
    word.parse::<u64>()
        .map(TargetRef::new)
        .with_context(|| format!("invalid entity id '{word}'"))
}
