//! Chat command surface: `/wanderfuladditions` (alias `/wa`).
//!
//! Arguments are parsed with clap; every reply goes back to the sender as a
//! chat message.

mod permission;

pub use permission::Permission;

use std::str::FromStr;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use strum::IntoEnumIterator;
use tracing::{debug, error};
use wand_core::WandType;

use crate::host::{CommandSender, Server};
use crate::plugin::WandPlugin;

/// Labels the command is registered under.
pub const ALIASES: [&str; 2] = ["wanderfuladditions", "wa"];

pub const NO_PERMISSION: &str =
    "I'm sorry, but you do not have permission to perform this command.";

pub const NOT_ENABLED: &str = "WanderfulAdditions is disabled due to a configuration error.";

#[derive(Debug, Parser)]
#[command(
    name = "wa",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct WandCommand {
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Give yourself (or others) the magic wand
    Give {
        wand: String,
        player: Option<String>,
    },

    /// Reload plugin configuration
    Reload,

    /// Show this help
    Help,
}

struct HelpEntry {
    name: &'static str,
    usage: &'static str,
    description: &'static str,
    permission: Option<Permission>,
}

const HELP: [HelpEntry; 3] = [
    HelpEntry {
        name: "give",
        usage: "give <wand> [player]",
        description: "Give yourself (or others) the magic wand",
        permission: Some(Permission::GIVE),
    },
    HelpEntry {
        name: "reload",
        usage: "reload",
        description: "Reload plugin configuration",
        permission: Some(Permission::RELOAD),
    },
    HelpEntry {
        name: "help",
        usage: "help",
        description: "Show this help",
        permission: None,
    },
];

/// True if `label` names this command.
pub fn is_alias(label: &str) -> bool {
    ALIASES.iter().any(|alias| alias.eq_ignore_ascii_case(label))
}

fn permitted(entry: &HelpEntry, granted: Permission) -> bool {
    entry.permission.is_none_or(|p| granted.contains(p))
}

impl WandPlugin {
    /// Runs `/wa <args>` on behalf of `sender`.
    pub fn execute_command(
        &mut self,
        server: &mut dyn Server,
        sender: &mut dyn CommandSender,
        args: &[&str],
    ) {
        if !self.is_enabled() {
            sender.send_message(NOT_ENABLED);
            return;
        }

        let command = match WandCommand::try_parse_from(args) {
            Ok(command) => command,
            Err(e) => {
                sender.send_message(&parse_error_message(&e, args));
                sender.send_message("Type /wa help for a list of commands.");
                return;
            }
        };

        match command.action {
            Some(Action::Give { wand, player }) => self.give(server, sender, &wand, player.as_deref()),
            Some(Action::Reload) => self.reload_command(server, sender),
            Some(Action::Help) | None => send_help(sender),
        }
    }

    /// Suggestions for the argument being typed (the last one in `args`).
    pub fn complete_command(
        &self,
        server: &dyn Server,
        sender: &dyn CommandSender,
        args: &[&str],
    ) -> Vec<String> {
        let granted = Permission::granted_to(sender);
        let matching = |candidates: Vec<String>, prefix: &str| -> Vec<String> {
            let prefix = prefix.to_ascii_lowercase();
            candidates
                .into_iter()
                .filter(|c| c.to_ascii_lowercase().starts_with(&prefix))
                .collect()
        };

        match args {
            [] => matching(permitted_names(granted), ""),
            [prefix] => matching(permitted_names(granted), *prefix),
            [sub, prefix] if sub.eq_ignore_ascii_case("give") && granted.contains(Permission::GIVE) => {
                matching(self.enabled_wand_names(), *prefix)
            }
            [sub, _, prefix] if sub.eq_ignore_ascii_case("give") && granted.contains(Permission::GIVE) => {
                matching(server.online_players(), *prefix)
            }
            _ => Vec::new(),
        }
    }

    fn enabled_wand_names(&self) -> Vec<String> {
        WandType::iter()
            .filter(|wand| self.wand(*wand).is_some_and(|w| w.enabled))
            .map(|wand| wand.to_string())
            .collect()
    }

    fn give(
        &mut self,
        server: &mut dyn Server,
        sender: &mut dyn CommandSender,
        wand: &str,
        player: Option<&str>,
    ) {
        if !Permission::granted_to(sender).contains(Permission::GIVE) {
            sender.send_message(NO_PERMISSION);
            return;
        }

        let compiled = WandType::from_str(wand)
            .ok()
            .and_then(|wand| self.wand(wand))
            .filter(|w| w.enabled);
        let Some(compiled) = compiled else {
            sender.send_message(&format!(
                "Invalid wand name. Must be one of: {}",
                self.enabled_wand_names().join(", ")
            ));
            return;
        };
        let item = compiled.item.clone();
        let wand_type = compiled.wand;

        match player {
            Some(name) => match server.player_mut(name) {
                Some(target) => {
                    debug!(wand = %wand_type, player = name, "giving wand");
                    target.give_item(item);
                }
                None => sender.send_message(&format!("Player '{name}' is not online.")),
            },
            None => match sender.as_player_mut() {
                Some(target) => {
                    debug!(wand = %wand_type, player = target.name(), "giving wand");
                    target.give_item(item);
                }
                None => sender.send_message("Usage: /wa give <wand> <player>"),
            },
        }
    }

    fn reload_command(&mut self, server: &mut dyn Server, sender: &mut dyn CommandSender) {
        if !Permission::granted_to(sender).contains(Permission::RELOAD) {
            sender.send_message(NO_PERMISSION);
            return;
        }

        match self.reload(server, true) {
            Ok(()) => sender.send_message("Configuration successfully reloaded!"),
            Err(e) => {
                error!("ERROR: {e}");
                error!("Will not update configuration");
                sender.send_message("There was an error in configuration:");
                sender.send_message(&e.to_string());
                sender.send_message("Will not use new configuration");
            }
        }
    }
}

/// One chat line describing a parse failure.
///
/// A missing argument is answered with the subcommand's usage, since clap
/// names the missing argument only on a following line.
fn parse_error_message(e: &clap::Error, args: &[&str]) -> String {
    if e.kind() == ErrorKind::MissingRequiredArgument {
        let usage = args
            .first()
            .and_then(|sub| HELP.iter().find(|entry| entry.name.eq_ignore_ascii_case(sub)))
            .map(|entry| entry.usage);
        if let Some(usage) = usage {
            return format!("Usage: /wa {usage}");
        }
    }
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.trim_start_matches("error: ").to_string()
}

fn permitted_names(granted: Permission) -> Vec<String> {
    HELP.iter()
        .filter(|entry| permitted(entry, granted))
        .map(|entry| entry.name.to_string())
        .collect()
}

fn send_help(sender: &mut dyn CommandSender) {
    let granted = Permission::granted_to(sender);
    sender.send_message("WanderfulAdditions commands:");
    for entry in HELP.iter().filter(|entry| permitted(entry, granted)) {
        sender.send_message(&format!("/wa {} - {}", entry.usage, entry.description));
    }
}
