use game_core::{
    ActionArgs, ActionRegistry, ActionState, ActorRoster, Direction, EngineConfig, EntityId,
    HookKind, IdleProvider, MessageLog, Position, Scheduler, TickEnv, TickReport, World,
};

use super::*;
use crate::world::{Dungeon, DungeonEntity, Location};

struct Harness {
    dungeon: Dungeon,
    registry: ActionRegistry,
    roster: ActorRoster,
    scheduler: Scheduler,
    log: MessageLog,
}

impl Harness {
    fn new(dungeon: Dungeon) -> Self {
        let mut roster = ActorRoster::new();
        for actor in dungeon.actors() {
            roster.add(actor).unwrap();
        }
        Self {
            dungeon,
            registry: build_registry().unwrap(),
            roster,
            scheduler: Scheduler::new(EngineConfig::default()),
            log: MessageLog::new(),
        }
    }

    fn submit(&mut self, actor: EntityId, command: Command, args: ActionArgs) {
        let action = self.registry.create(command.key(), actor, args).unwrap();
        self.roster.get_mut(actor).unwrap().queue.push_back(action);
    }

    fn tick(&mut self) -> TickReport {
        let mut env = TickEnv::new(&mut self.dungeon, &mut self.log, &self.registry);
        self.scheduler
            .tick(&mut self.roster, &mut env, &mut IdleProvider)
            .unwrap()
    }

    fn run_until_idle(&mut self) -> Vec<TickReport> {
        let mut reports = Vec::new();
        for _ in 0..64 {
            let settled = self
                .roster
                .iter()
                .all(|slot| slot.sapience.queue.is_empty() && slot.sapience.busy == 0);
            if settled {
                break;
            }
            reports.push(self.tick());
        }
        reports
    }

    fn total_busy(&self, actor: EntityId) -> u64 {
        self.roster.get(actor).unwrap().total_busy
    }

    fn queued_keys(&self, actor: EntityId) -> Vec<&'static str> {
        self.roster
            .get(actor)
            .unwrap()
            .queue
            .iter()
            .map(|action| action.key())
            .collect()
    }
}

const HERO_AT: Position = Position { x: 1, y: 1 };

fn room() -> (Dungeon, EntityId) {
    let mut dungeon = Dungeon::new(10, 5);
    let hero = dungeon.spawn(DungeonEntity::actor("hero", HERO_AT, 10));
    (dungeon, hero)
}

#[test]
fn registry_holds_every_verb_in_declaration_order() {
    let registry = build_registry().unwrap();
    let keys: Vec<_> = registry.keys().collect();

    assert_eq!(registry.len(), 13);
    for command in Command::iter() {
        assert!(registry.exists(command.key()));
        assert_eq!(registry.traits_of(command.key()), Some(command.traits()));
    }
    assert!(keys.contains(&"take_off"));
    assert_eq!("take_off".parse::<Command>().unwrap(), Command::TakeOff);
}

#[test]
fn building_twice_into_one_registry_is_rejected() {
    let mut registry = build_registry().unwrap();
    assert_eq!(
        register_all(&mut registry).unwrap_err(),
        RegistryError::DuplicateKey("wait".into())
    );
}

#[test]
fn get_moves_the_item_into_inventory() {
    let (mut dungeon, hero) = room();
    let coin = dungeon.spawn(DungeonEntity::item("coin", Location::Tile(HERO_AT)));
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Get, ActionArgs::new().object(coin));
    let reports = harness.run_until_idle();

    assert!(harness.dungeon.is_in_inventory(coin, hero));
    assert_eq!(harness.total_busy(hero), u64::from(GET_REACTION + GET_TIME));
    let last = reports
        .iter()
        .flat_map(|report| report.steps.iter())
        .last()
        .unwrap();
    assert_eq!(last.outcome.to, ActionState::Processed);
    assert!(harness.log.contains("You pick up the coin."));
}

#[test]
fn items_carried_by_another_creature_cannot_be_taken() {
    let (mut dungeon, hero) = room();
    let goblin = dungeon.spawn(DungeonEntity::actor("goblin", Position::new(2, 1), 3));
    let axe = dungeon.spawn(DungeonEntity::item("axe", Location::Held(goblin)));
    let sack = dungeon.spawn(DungeonEntity::item("sack", Location::Held(goblin)));
    let coin = dungeon.spawn(DungeonEntity::item("coin", Location::Held(sack)));
    assert!(dungeon.set_wielded(axe, Some(goblin)));
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Get, ActionArgs::new().object(axe));
    harness.submit(hero, Command::Get, ActionArgs::new().object(coin));
    harness.run_until_idle();

    assert!(harness.log.contains("The axe belongs to the goblin."));
    assert!(harness.log.contains("The coin belongs to the goblin."));
    assert!(harness.dungeon.is_wielded(axe, goblin));
    assert_eq!(harness.dungeon.holder_of(coin), Some(sack));
    assert_eq!(harness.total_busy(hero), 0);
}

#[test]
fn items_in_own_containers_can_be_taken_out() {
    let (mut dungeon, hero) = room();
    let bag = dungeon.spawn(DungeonEntity::item("bag", Location::Held(hero)));
    let gem = dungeon.spawn(DungeonEntity::item("gem", Location::Held(bag)));
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Get, ActionArgs::new().object(gem));
    harness.run_until_idle();

    assert!(harness.dungeon.is_in_inventory(gem, hero));
    assert!(harness.log.contains("You pick up the gem."));
}

#[test]
fn dropping_a_wielded_item_is_refused_before_anything_moves() {
    let (mut dungeon, hero) = room();
    let sword = dungeon.spawn(DungeonEntity::item("sword", Location::Held(hero)));
    assert!(dungeon.set_wielded(sword, Some(hero)));
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Drop, ActionArgs::new().object(sword));
    let report = harness.tick();

    assert_eq!(report.steps.len(), 1);
    let step = &report.steps[0].outcome;
    assert_eq!(step.hook, HookKind::PreBegin);
    assert_eq!(step.to, ActionState::Processed);
    assert!(!step.success);
    assert!(
        harness
            .log
            .iter()
            .any(|line| line.contains("cannot drop a wielded item"))
    );
    assert!(harness.dungeon.is_in_inventory(sword, hero));
    assert!(harness.dungeon.is_wielded(sword, hero));
    assert_eq!(harness.total_busy(hero), 0);
}

#[test]
fn walking_into_a_hostile_turns_into_an_attack() {
    let (mut dungeon, hero) = room();
    let goblin = dungeon.spawn(DungeonEntity::actor("goblin", Position::new(2, 1), 3).hostile());
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Move, ActionArgs::new().direction(Direction::East));
    let report = harness.tick();

    let moves: Vec<_> = report
        .steps_for(hero)
        .filter(|step| step.key == "move")
        .map(|step| &step.outcome)
        .collect();
    let begin = moves.iter().find(|o| o.hook == HookKind::Begin).unwrap();
    assert!(begin.success);
    assert_eq!(moves.last().unwrap().to, ActionState::Processed);
    assert_eq!(harness.queued_keys(hero), vec!["attack"]);
    assert_eq!(harness.dungeon.position_of(hero), Some(HERO_AT));

    harness.run_until_idle();
    assert!(harness.log.contains("The hero hits the goblin."));
    assert_eq!(
        harness.dungeon.entity(goblin).map(|g| g.hp),
        Some(3 - UNARMED_DAMAGE)
    );
}

#[test]
fn walking_onto_open_floor_moves_the_actor() {
    let (dungeon, hero) = room();
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Move, ActionArgs::new().direction(Direction::North));
    harness.run_until_idle();

    assert_eq!(harness.dungeon.position_of(hero), Some(Position::new(1, 2)));
    assert_eq!(harness.total_busy(hero), u64::from(MOVE_TIME));
}

#[test]
fn walls_and_bystanders_block_movement() {
    let (mut dungeon, hero) = room();
    dungeon.add_wall(Position::new(0, 1));
    dungeon.spawn(DungeonEntity::actor("shopkeeper", Position::new(1, 0), 10));
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Move, ActionArgs::new().direction(Direction::West));
    harness.submit(hero, Command::Move, ActionArgs::new().direction(Direction::South));
    harness.run_until_idle();

    assert!(harness.log.contains("You can't go that way."));
    assert!(harness.log.contains("The shopkeeper is in the way."));
    assert_eq!(harness.dungeon.position_of(hero), Some(HERO_AT));
}

#[test]
fn unwield_resolves_the_item_in_hand() {
    let (mut dungeon, hero) = room();
    let sword = dungeon.spawn(DungeonEntity::item("sword", Location::Held(hero)));
    assert!(dungeon.set_wielded(sword, Some(hero)));
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Unwield, ActionArgs::new());
    harness.run_until_idle();

    assert!(!harness.dungeon.is_wielded(sword, hero));
    assert!(harness.log.contains("You put away the sword."));

    harness.submit(hero, Command::Unwield, ActionArgs::new());
    harness.run_until_idle();
    assert!(harness.log.contains("You are empty handed."));
}

#[test]
fn wielding_swaps_out_the_previous_weapon() {
    let (mut dungeon, hero) = room();
    let dagger = dungeon.spawn(DungeonEntity::item("dagger", Location::Held(hero)));
    let axe = dungeon.spawn(DungeonEntity::item("axe", Location::Held(hero)));
    assert!(dungeon.set_wielded(dagger, Some(hero)));
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Wield, ActionArgs::new().object(axe));
    harness.run_until_idle();

    assert_eq!(harness.dungeon.wielded_by(hero), Some(axe));
    assert_eq!(
        harness.total_busy(hero),
        u64::from(WIELD_REACTION + WIELD_TIME)
    );
}

#[test]
fn worn_items_cannot_be_dropped_until_taken_off() {
    let (mut dungeon, hero) = room();
    let cloak = dungeon.spawn(DungeonEntity::item("cloak", Location::Held(hero)));
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Wear, ActionArgs::new().object(cloak));
    harness.submit(hero, Command::Drop, ActionArgs::new().object(cloak));
    harness.run_until_idle();
    assert!(harness.dungeon.is_worn(cloak, hero));
    assert!(harness.log.contains("You cannot drop something you are wearing."));

    harness.submit(hero, Command::TakeOff, ActionArgs::new().object(cloak));
    harness.submit(hero, Command::Drop, ActionArgs::new().object(cloak));
    harness.run_until_idle();
    assert_eq!(harness.dungeon.position_of(cloak), Some(HERO_AT));
    assert!(!harness.dungeon.is_in_inventory(cloak, hero));
}

#[test]
fn creatures_cannot_be_picked_up() {
    let (mut dungeon, hero) = room();
    dungeon.spawn(DungeonEntity::actor("newt", Position::new(2, 1), 1));
    let newt = dungeon.find_by_name("newt").unwrap();
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Get, ActionArgs::new().object(newt));
    harness.run_until_idle();

    assert!(harness.log.contains("The newt won't let you."));
    assert_eq!(harness.total_busy(hero), 0);
}

#[test]
fn thrown_portion_splits_off_and_lands_down_range() {
    let (mut dungeon, hero) = room();
    let arrows = dungeon.spawn(DungeonEntity::item("arrow", Location::Held(hero)).stacked(10));
    let mut harness = Harness::new(dungeon);

    harness.submit(
        hero,
        Command::Throw,
        ActionArgs::new()
            .object(arrows)
            .direction(Direction::East)
            .quantity(3),
    );
    harness.run_until_idle();

    assert_eq!(harness.dungeon.stack_size(arrows), 7);
    let landed = harness.dungeon.items_at(Position::new(1 + THROW_RANGE as i32, 1));
    assert_eq!(landed.len(), 1);
    assert_eq!(harness.dungeon.stack_size(landed[0]), 3);
    assert_eq!(
        harness.total_busy(hero),
        u64::from(THROW_REACTION + THROW_TIME + THROW_RECOVERY)
    );
}

#[test]
fn put_stores_an_item_in_a_reachable_container() {
    let (mut dungeon, hero) = room();
    let gem = dungeon.spawn(DungeonEntity::item("gem", Location::Held(hero)));
    let chest = dungeon.spawn(DungeonEntity::item("chest", Location::Tile(Position::new(2, 2))));
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Put, ActionArgs::new().object(gem).target(chest));
    harness.run_until_idle();

    assert_eq!(harness.dungeon.holder_of(gem), Some(chest));
    assert!(harness.log.contains("You put the gem into the chest."));
}

#[test]
fn flasks_are_drunk_and_refilled() {
    let (mut dungeon, hero) = room();
    let flask = dungeon.spawn(
        DungeonEntity::item("flask", Location::Held(hero)).liquid_carrier(true),
    );
    let mut harness = Harness::new(dungeon);

    harness.submit(hero, Command::Fill, ActionArgs::new().object(flask));
    harness.submit(hero, Command::Quaff, ActionArgs::new().object(flask));
    harness.submit(hero, Command::Quaff, ActionArgs::new().object(flask));
    harness.submit(hero, Command::Fill, ActionArgs::new().object(flask));
    harness.run_until_idle();

    assert!(harness.log.contains("The flask isn't empty."));
    assert!(harness.log.contains("You drink from the flask."));
    assert!(harness.log.contains("The flask is empty."));
    assert!(harness.log.contains("You fill the flask."));
    assert!(!harness.dungeon.is_empty(flask));
}

fn sweep_room() -> (Dungeon, EntityId) {
    let (mut dungeon, hero) = room();
    dungeon.spawn(DungeonEntity::actor("goblin", Position::new(2, 1), 9).hostile());
    dungeon.spawn(DungeonEntity::item("coin", Location::Tile(HERO_AT)));
    dungeon.spawn(DungeonEntity::item("stone", Location::Held(hero)).stacked(3));
    dungeon.spawn(DungeonEntity::item("dagger", Location::Held(hero)));
    dungeon.spawn(DungeonEntity::item("cloak", Location::Held(hero)));
    dungeon.spawn(DungeonEntity::item("flask", Location::Held(hero)).liquid_carrier(true));
    dungeon.spawn(DungeonEntity::item("gem", Location::Held(hero)));
    dungeon.spawn(DungeonEntity::item("chest", Location::Tile(Position::new(1, 2))));
    (dungeon, hero)
}

fn sweep_args(command: Command, dungeon: &Dungeon) -> ActionArgs {
    let named = |name: &str| dungeon.find_by_name(name).unwrap();
    match command {
        Command::Wait | Command::Unwield => ActionArgs::new(),
        Command::Move => ActionArgs::new().direction(Direction::South),
        Command::Attack => ActionArgs::new().direction(Direction::East),
        Command::Get => ActionArgs::new().object(named("coin")),
        Command::Drop => ActionArgs::new().object(named("stone")),
        Command::Throw => ActionArgs::new()
            .object(named("stone"))
            .direction(Direction::South)
            .quantity(1),
        Command::Wield => ActionArgs::new().object(named("dagger")),
        Command::Wear | Command::TakeOff => ActionArgs::new().object(named("cloak")),
        Command::Quaff | Command::Fill => ActionArgs::new().object(named("flask")),
        Command::Put => ActionArgs::new()
            .object(named("gem"))
            .target(named("chest")),
    }
}

#[test]
fn every_verb_only_moves_forward_through_the_lifecycle() {
    for command in Command::iter() {
        for interrupt in [false, true] {
            let (dungeon, hero) = sweep_room();
            let args = sweep_args(command, &dungeon);
            let mut harness = Harness::new(dungeon);
            harness.submit(hero, command, args);

            let mut last: Option<ActionState> = None;
            let mut steps = 0;
            for _ in 0..32 {
                let in_progress = harness
                    .roster
                    .get(hero)
                    .and_then(|sapience| sapience.queue.front())
                    .is_some_and(|action| action.state() == ActionState::InProgress);
                if interrupt && in_progress {
                    Scheduler::interrupt(&mut harness.roster, hero).unwrap();
                }

                let report = harness.tick();
                for step in report.steps_for(hero) {
                    let outcome = &step.outcome;
                    assert!(
                        outcome.to.rank() > outcome.from.rank(),
                        "{command}: {} -> {}",
                        outcome.from,
                        outcome.to
                    );
                    if let Some(previous) = last.filter(|state| !state.is_terminal()) {
                        assert!(
                            outcome.from.rank() >= previous.rank(),
                            "{command}: {previous} then {}",
                            outcome.from
                        );
                    }
                    last = Some(outcome.to);
                    steps += 1;
                }
            }

            assert!(steps > 0, "{command} never advanced");
            assert_eq!(last, Some(ActionState::Processed), "{command}");
            assert!(harness.queued_keys(hero).is_empty(), "{command}");
        }
    }
}
