//! Assembles a runtime from loaded content and drives it.

use anyhow::{Context, Result};
use game_content::{ConfigLoader, ContentFactory, Dungeon};
use game_core::{EntityId, GameError};
use runtime::{ProviderKind, Runtime, RuntimeConfig, WaitActionProvider};
use tracing::{error, info};

use crate::config::ClientConfig;
use crate::script;

/// Name of the entity the script drives.
pub const PLAYER_NAME: &str = "hero";

pub struct Session {
    pub runtime: Runtime<Dungeon>,
    pub player: EntityId,
}

impl Session {
    /// Loads config and map, then wires the player script and NPC fallback.
    pub fn load(config: &ClientConfig) -> Result<Self> {
        let factory = ContentFactory::new(&config.data_dir);
        let engine = match &config.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => factory.load_config()?,
        };
        let dungeon = factory.load_dungeon(&config.map)?;

        let player = dungeon
            .find_by_name(PLAYER_NAME)
            .with_context(|| format!("map '{}' has no '{}'", config.map, PLAYER_NAME))?;
        let registry = game_content::build_registry()?;
        let steps = script::parse_script(&config.script, &registry, &dungeon)?;
        let actors: Vec<EntityId> = dungeon.actors().collect();

        let mut builder = Runtime::builder()
            .config(RuntimeConfig {
                engine,
                message_capacity: config.message_capacity,
            })
            .registry(registry)
            .provider(ProviderKind::Player, script::into_provider(player, steps))
            .provider(ProviderKind::Npc, WaitActionProvider)
            .bind_actor(player, ProviderKind::Player);
        for actor in actors {
            builder = builder.actor(actor);
        }
        let runtime = builder.world(dungeon).build()?;

        info!(
            target: "dungeon_client",
            map = %config.map,
            actors = runtime.actors().len(),
            "session loaded"
        );
        Ok(Self { runtime, player })
    }

    /// Runs `ticks` ticks and returns every message produced along the way.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<String>> {
        let mut transcript = Vec::new();
        for _ in 0..ticks {
            self.runtime.step().inspect_err(|error| {
                let severity = error.severity();
                error!(
                    target: "dungeon_client",
                    code = error.error_code(),
                    severity = severity.as_str(),
                    internal = severity.is_internal(),
                    %error,
                    "tick failed"
                );
            })?;
            transcript.extend(self.runtime.drain_messages());
        }
        Ok(transcript)
    }
}
