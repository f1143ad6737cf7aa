//! Line-oriented operator console driving the plugin against the in-memory host.
//!
//! Chat commands are typed with their label (`wa give item_frame Alex`), every
//! other line is a console verb that simulates something happening in the
//! world.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use tracing::{debug, info};
use wand_core::{ItemStack, MaterialCatalog, MerchantRecipe, NamespacedKey, StaticCatalog};
use wand_runtime::{
    ConsoleSender, CreatureSpawn, EntityDamage, EntityEvent, EntityMut, Hand, InMemoryExtension,
    InMemoryServer, ItemFrame, PlayerInteractEntity, PluginStateChange, Server, WandPlugin,
    WanderingTrader, WorldPlayer, is_alias,
};

use crate::config::ServerConfig;

const ARMOR_STAND_EDITOR: &str = "ArmorStandEditor";

const VERBS: [(&str, &str); 10] = [
    ("wa <args>", "Run a plugin command as the console"),
    ("as <player> wa <args>", "Run a plugin command as a player"),
    ("tab wa <args>", "Show completions for the last argument"),
    ("join <player> [permission...]", "Bring a player online"),
    ("frame put <material> | click <player> | hit", "Interact with the item frame"),
    ("spawn trader", "Spawn a wandering trader and list its offers"),
    ("plugin enable|disable <name>", "Load or unload another plugin"),
    ("status", "Print the plugin state as JSON"),
    ("help", "Show this help"),
    ("quit", "Disable the plugin and exit"),
];

pub enum Outcome {
    Continue(Vec<String>),
    Quit,
}

pub struct Console {
    plugin: WandPlugin,
    server: InMemoryServer,
    console: ConsoleSender,
    frame: ItemFrame,
    rng: StdRng,
}

impl Console {
    /// Boots the host and enables the plugin.
    pub fn start(config: &ServerConfig) -> Result<Self> {
        let mut server = InMemoryServer::new(StaticCatalog::vanilla());
        if config.armor_stand_editor {
            server.load_plugin(ARMOR_STAND_EDITOR, armor_stand_editor()?);
        }

        let mut plugin = WandPlugin::new(&config.namespace, config.settings_file())
            .context("invalid plugin namespace")?;
        plugin
            .enable(&mut server)
            .with_context(|| format!("failed to enable with {}", config.settings_file().display()))?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            plugin,
            server,
            console: ConsoleSender::default(),
            frame: ItemFrame::empty(),
            rng,
        })
    }

    pub fn plugin(&self) -> &WandPlugin {
        &self.plugin
    }

    pub fn server(&self) -> &InMemoryServer {
        &self.server
    }

    /// Reads stdin until EOF or `quit`.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        write!(stdout, "> ")?;
        stdout.flush()?;

        for line in stdin.lock().lines() {
            let line = line.context("failed to read from stdin")?;
            match self.handle(&line) {
                Ok(Outcome::Continue(output)) => {
                    for message in output {
                        writeln!(stdout, "{message}")?;
                    }
                }
                Ok(Outcome::Quit) => break,
                Err(e) => writeln!(stdout, "error: {e:#}")?,
            }
            write!(stdout, "> ")?;
            stdout.flush()?;
        }

        self.shutdown();
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.plugin.disable(&mut self.server);
    }

    /// Executes one console line.
    pub fn handle(&mut self, line: &str) -> Result<Outcome> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let output = match words.as_slice() {
            [] => Vec::new(),
            ["quit" | "exit" | "stop"] => return Ok(Outcome::Quit),
            ["help"] => VERBS
                .iter()
                .map(|(usage, description)| format!("{usage} - {description}"))
                .collect(),
            [label, args @ ..] if is_alias(label) => {
                self.plugin
                    .execute_command(&mut self.server, &mut self.console, args);
                self.console.drain()
            }
            ["as", name, label, args @ ..] if is_alias(label) => self.run_as(name, args)?,
            ["tab", label, args @ ..] if is_alias(label) => {
                let mut args = args.to_vec();
                if args.is_empty() || line.ends_with(char::is_whitespace) {
                    args.push("");
                }
                vec![
                    self.plugin
                        .complete_command(&self.server, &self.console, &args)
                        .join(" "),
                ]
            }
            ["join", name, permissions @ ..] => {
                let player = permissions
                    .iter()
                    .fold(WorldPlayer::new(*name), |player, node| player.with_permission(node));
                self.server.join(player);
                vec![format!("{name} joined the game")]
            }
            ["frame", "put", material] => {
                let material = self
                    .server
                    .catalog()
                    .match_material(material)
                    .with_context(|| format!("unknown material '{material}'"))?;
                self.frame = ItemFrame::holding(ItemStack::new(material, 1));
                vec![self.describe_frame()]
            }
            ["frame", "click", name] => self.click_frame(name)?,
            ["frame", "hit"] => {
                let mut event = EntityEvent::Damage(EntityDamage {
                    target: EntityMut::ItemFrame(&mut self.frame),
                    cancelled: false,
                });
                self.plugin.on_entity_event(&mut event, &mut self.rng);
                drop(event);
                vec![self.describe_frame()]
            }
            ["spawn", "trader"] => self.spawn_trader(),
            ["plugin", action @ ("enable" | "disable"), name] => {
                self.toggle_plugin(action == &"enable", name)?
            }
            ["status"] => vec![serde_json::to_string_pretty(&self.status())?],
            _ => bail!("unknown console command '{line}', type 'help'"),
        };
        Ok(Outcome::Continue(output))
    }

    fn run_as(&mut self, name: &str, args: &[&str]) -> Result<Vec<String>> {
        let mut player = self
            .server
            .leave(name)
            .with_context(|| format!("player '{name}' is not online"))?;
        self.plugin
            .execute_command(&mut self.server, &mut player, args);
        let output = std::mem::take(&mut player.messages)
            .into_iter()
            .map(|message| format!("[{name}] {message}"))
            .collect();
        // Rejoin after the command, which may have given the player an item.
        self.server.join(player);
        Ok(output)
    }

    fn click_frame(&mut self, name: &str) -> Result<Vec<String>> {
        let player = self
            .server
            .player(name)
            .with_context(|| format!("player '{name}' is not online"))?;
        let held = player.main_hand.clone().or_else(|| player.inventory.last().cloned());

        let mut event = EntityEvent::Interact(PlayerInteractEntity {
            player: name,
            hand: Hand::Main,
            main_hand: held.as_ref(),
            target: EntityMut::ItemFrame(&mut self.frame),
            cancelled: false,
        });
        self.plugin.on_entity_event(&mut event, &mut self.rng);
        let cancelled = event.is_cancelled();
        drop(event);

        debug!(player = name, cancelled, "item frame clicked");
        Ok(vec![self.describe_frame()])
    }

    fn spawn_trader(&mut self) -> Vec<String> {
        let mut trader = WanderingTrader::default();
        let mut event = EntityEvent::Spawn(CreatureSpawn {
            target: EntityMut::WanderingTrader(&mut trader),
            cancelled: false,
        });
        self.plugin.on_entity_event(&mut event, &mut self.rng);
        drop(event);

        if trader.recipes.is_empty() {
            return vec!["The wandering trader has no wand offers".to_string()];
        }
        trader.recipes.iter().map(describe_offer).collect()
    }

    fn toggle_plugin(&mut self, enabled: bool, name: &str) -> Result<Vec<String>> {
        if !name.eq_ignore_ascii_case(ARMOR_STAND_EDITOR) {
            bail!("only {ARMOR_STAND_EDITOR} can be simulated");
        }
        if enabled {
            self.server
                .load_plugin(ARMOR_STAND_EDITOR, armor_stand_editor()?);
        } else {
            self.server.unload_plugin(ARMOR_STAND_EDITOR);
        }
        info!(plugin = ARMOR_STAND_EDITOR, enabled, "plugin state changed");

        self.plugin.on_plugin_state_change(
            &mut self.server,
            &PluginStateChange {
                plugin: ARMOR_STAND_EDITOR.to_string(),
                enabled,
            },
        );
        let state = if enabled { "enabled" } else { "disabled" };
        Ok(vec![format!("{ARMOR_STAND_EDITOR} {state}")])
    }

    fn describe_frame(&self) -> String {
        let item = self
            .frame
            .item
            .as_ref()
            .map_or("nothing", |item| item.material.name());
        let visibility = if self.frame.visible { "visible" } else { "invisible" };
        format!("Item frame holding {item} is {visibility}")
    }

    pub fn status(&self) -> Value {
        let wands: Vec<Value> = self
            .plugin
            .wands()
            .values()
            .map(|wand| {
                json!({
                    "wand": wand.wand.to_string(),
                    "enabled": wand.enabled,
                    "item": wand.item.material.name(),
                    "name": wand.item.meta.display_name,
                    "recipe": wand.active_recipe().map(|r| r.key.to_string()),
                    "trade_chance": wand.active_trade().map(|t| t.chance()),
                })
            })
            .collect();

        json!({
            "enabled": self.plugin.is_enabled(),
            "settings_file": self.plugin.store().file().display().to_string(),
            "wands": wands,
            "recipes": self.server.recipes().map(|r| r.key.to_string()).collect::<Vec<_>>(),
            "players": self.server.online_players(),
            "plugins": self.server.extension(ARMOR_STAND_EDITOR).map(|_| ARMOR_STAND_EDITOR),
        })
    }
}

fn armor_stand_editor() -> Result<InMemoryExtension> {
    let key = NamespacedKey::new("armorstandeditor", "edit_tool")?;
    Ok(InMemoryExtension::armor_stand_editor(key))
}

fn describe_offer(offer: &MerchantRecipe) -> String {
    let price: Vec<String> = offer
        .ingredients
        .iter()
        .map(|stack| format!("{} x{}", stack.material.name(), stack.amount))
        .collect();
    format!(
        "Offer: {} for {} (max uses {})",
        offer.result.material.name(),
        price.join(" + "),
        offer.max_uses
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Console) {
        let temp_dir = TempDir::new().unwrap();
        let config = ServerConfig {
            data_dir: temp_dir.path().to_path_buf(),
            seed: Some(7),
            ..Default::default()
        };
        let console = Console::start(&config).unwrap();
        (temp_dir, console)
    }

    fn output(console: &mut Console, line: &str) -> Vec<String> {
        match console.handle(line).unwrap() {
            Outcome::Continue(output) => output,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_start_writes_settings() {
        let (temp, console) = setup();
        assert!(temp.path().join("config.yml").exists());
        assert!(console.plugin().is_enabled());
        assert_eq!(console.status()["recipes"][0], "wanderfuladditions:item_frame_crafting");
    }

    #[test]
    fn test_give_then_toggle_frame() {
        let (_temp, mut console) = setup();
        output(&mut console, "join Alex");
        assert!(output(&mut console, "wa give item_frame Alex").is_empty());
        output(&mut console, "frame put diamond");

        assert_eq!(
            output(&mut console, "frame click Alex"),
            vec!["Item frame holding DIAMOND is invisible"]
        );
        assert_eq!(
            output(&mut console, "frame hit"),
            vec!["Item frame holding DIAMOND is visible"]
        );
    }

    #[test]
    fn test_player_without_permission() {
        let (_temp, mut console) = setup();
        output(&mut console, "join Steve");
        let reply = output(&mut console, "as Steve wa give item_frame");
        assert_eq!(reply, vec![format!("[Steve] {}", wand_runtime::NO_PERMISSION)]);
        assert!(console.server().player("Steve").unwrap().inventory.is_empty());
    }

    #[test]
    fn test_plugin_toggle_adds_armor_stand_wand() {
        let (_temp, mut console) = setup();
        assert_eq!(output(&mut console, "tab wa give "), vec!["item_frame"]);
        output(&mut console, "plugin enable armorstandeditor");
        assert_eq!(output(&mut console, "tab wa give "), vec!["item_frame armor_stand"]);
        output(&mut console, "plugin disable ArmorStandEditor");
        assert_eq!(output(&mut console, "tab wa give "), vec!["item_frame"]);
    }

    #[test]
    fn test_unknown_line_is_an_error() {
        let (_temp, mut console) = setup();
        assert!(console.handle("dance").is_err());
        assert!(matches!(console.handle("quit").unwrap(), Outcome::Quit));
    }
}
