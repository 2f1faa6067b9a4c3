//! Player command scripts.
//!
//! A script is a comma-separated list of `key` or `key:argument` steps, e.g.
//! `move:east,get:dagger,wield:dagger`. An argument that names a direction
//! becomes the target direction; anything else is looked up by entity name
//! and becomes the command's object. Every key must name a registered
//! command.

use anyhow::{Context, Result, bail};
use game_content::Dungeon;
use game_core::{ActionArgs, ActionRegistry, Direction, EntityId};
use runtime::ScriptedProvider;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptStep {
    pub key: String,
    pub args: ActionArgs,
}

/// Resolves every step of `script` against `registry` and `dungeon`.
pub fn parse_script(
    script: &str,
    registry: &ActionRegistry,
    dungeon: &Dungeon,
) -> Result<Vec<ScriptStep>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(|step| parse_step(step, registry, dungeon))
        .collect()
}

fn parse_step(step: &str, registry: &ActionRegistry, dungeon: &Dungeon) -> Result<ScriptStep> {
    let (key, argument) = match step.split_once(':') {
        Some((key, argument)) => (key.trim(), Some(argument.trim())),
        None => (step, None),
    };
    if key.is_empty() {
        bail!("script step '{step}' has no command");
    }
    if !registry.exists(key) {
        bail!("script step '{step}': unknown command '{key}'");
    }

    let args = match argument {
        None => ActionArgs::new(),
        Some(argument) => match argument.parse::<Direction>() {
            Ok(direction) => ActionArgs::new().direction(direction),
            Err(_) => {
                let object = dungeon
                    .find_by_name(argument)
                    .with_context(|| format!("script step '{step}': no entity named '{argument}'"))?;
                ActionArgs::new().object(object)
            }
        },
    };

    Ok(ScriptStep {
        key: key.to_string(),
        args,
    })
}

/// Queues `steps` as `actor`'s scripted decisions.
pub fn into_provider(actor: EntityId, steps: Vec<ScriptStep>) -> ScriptedProvider {
    let mut provider = ScriptedProvider::new();
    for step in steps {
        provider.push(actor, step.key, step.args);
    }
    provider
}

#[cfg(test)]
mod tests {
    use game_content::{DungeonEntity, Location, build_registry};
    use game_core::Position;

    use super::*;

    fn parse(script: &str, dungeon: &Dungeon) -> Result<Vec<ScriptStep>> {
        parse_script(script, &build_registry().unwrap(), dungeon)
    }

    #[test]
    fn resolves_directions_and_entity_names() {
        let mut dungeon = Dungeon::new(4, 4);
        let hero = dungeon.spawn(DungeonEntity::actor("hero", Position::new(1, 1), 5));
        let sword = dungeon.spawn(DungeonEntity::item("sword", Location::Held(hero)));

        let steps = parse(" move:East , wield:sword,wait ,", &dungeon).unwrap();

        assert_eq!(
            steps,
            vec![
                ScriptStep {
                    key: "move".into(),
                    args: ActionArgs::new().direction(Direction::East),
                },
                ScriptStep {
                    key: "wield".into(),
                    args: ActionArgs::new().object(sword),
                },
                ScriptStep {
                    key: "wait".into(),
                    args: ActionArgs::new(),
                },
            ]
        );
        assert_eq!(into_provider(hero, steps).remaining(hero), 3);
    }

    #[test]
    fn unknown_names_are_reported() {
        let dungeon = Dungeon::new(2, 2);
        let error = parse("get:unicorn", &dungeon).unwrap_err();
        assert!(error.to_string().contains("no entity named 'unicorn'"));
    }

    #[test]
    fn empty_command_is_rejected() {
        let dungeon = Dungeon::new(2, 2);
        assert!(parse(":east", &dungeon).is_err());
    }

    #[test]
    fn unknown_commands_are_rejected() {
        let dungeon = Dungeon::new(2, 2);
        let error = parse("wait,dance", &dungeon).unwrap_err();
        assert!(error.to_string().contains("unknown command 'dance'"));
    }
}
