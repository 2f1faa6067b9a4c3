//! High-level runtime orchestrator.
//!
//! The runtime owns the world, the action registry, every actor's queue and
//! the message log, and exposes a builder-based API for clients to drive the
//! simulation one tick at a time.

use game_core::{
    ActionArgs, ActionQueue, ActionRegistry, ActorRoster, EngineConfig, EntityId, MessageLog,
    Scheduler, Tick, TickEnv, TickReport, World,
};
use tracing::{debug, info};

use crate::api::{ActionProvider, ProviderKind, ProviderRegistry, Result, RuntimeError};
use crate::repository::{QueueRepository, QueueSnapshot};

/// Runtime configuration shared across the orchestrator and the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    /// Lines retained by the message log before the oldest are evicted.
    pub message_capacity: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_MESSAGE_CAPACITY: usize = 256;
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            message_capacity: Self::DEFAULT_MESSAGE_CAPACITY,
        }
    }
}

/// Main runtime that drives the simulation over a world of type `W`.
pub struct Runtime<W: World> {
    world: W,
    registry: ActionRegistry,
    scheduler: Scheduler,
    roster: ActorRoster,
    messages: MessageLog,
    providers: ProviderRegistry,
}

impl<W: World> Runtime<W> {
    pub fn builder() -> RuntimeBuilder<W> {
        RuntimeBuilder::new()
    }

    /// Registers `actor` with the scheduler; it acts after every actor added
    /// before it.
    pub fn add_actor(&mut self, actor: EntityId) -> Result<()> {
        if !self.world.exists(actor) {
            return Err(RuntimeError::UnknownEntity(actor));
        }
        self.roster.add(actor)?;
        debug!(target: "runtime", %actor, "actor added");
        Ok(())
    }

    /// Drops `actor` and everything still queued for it.
    pub fn remove_actor(&mut self, actor: EntityId) -> bool {
        self.roster.remove(actor).is_some()
    }

    /// Creates a `key` command for `actor` and appends it to its queue.
    pub fn submit(&mut self, actor: EntityId, key: &str, args: ActionArgs) -> Result<()> {
        let sapience = self
            .roster
            .get_mut(actor)
            .ok_or(RuntimeError::UnknownActor(actor))?;
        let action = self.registry.create(key, actor, args)?;
        sapience.queue.push_back(action);
        debug!(target: "runtime", %actor, key, "command submitted");
        Ok(())
    }

    /// Requests the abort path for `actor`'s in-progress front action.
    pub fn interrupt(&mut self, actor: EntityId) -> Result<()> {
        Scheduler::interrupt(&mut self.roster, actor)?;
        debug!(target: "runtime", %actor, "interrupt requested");
        Ok(())
    }

    /// Runs a single tick, then drops every actor whose entity left the
    /// world during it.
    pub fn step(&mut self) -> Result<TickReport> {
        let mut env = TickEnv::new(&mut self.world, &mut self.messages, &self.registry);
        let report = self
            .scheduler
            .tick(&mut self.roster, &mut env, &mut self.providers)?;
        self.reap_departed();
        Ok(report)
    }

    fn reap_departed(&mut self) {
        let departed: Vec<EntityId> = self
            .roster
            .ids()
            .filter(|actor| !self.world.exists(*actor))
            .collect();
        for actor in departed {
            self.roster.remove(actor);
            info!(target: "runtime", %actor, "actor left the world");
        }
    }

    /// Runs `ticks` ticks and returns their reports in order.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<TickReport>> {
        let mut reports = Vec::new();
        for _ in 0..ticks {
            reports.push(self.step()?);
        }
        info!(
            target: "runtime",
            ticks,
            clock = %self.scheduler.clock(),
            "run complete"
        );
        Ok(reports)
    }

    /// Ticks until every queue is empty and no actor is busy, up to
    /// `max_ticks`. Returns the number of ticks run.
    pub fn run_until_idle(&mut self, max_ticks: u64) -> Result<u64> {
        let mut ticks = 0;
        while ticks < max_ticks && !self.is_idle() {
            self.step()?;
            ticks += 1;
        }
        Ok(ticks)
    }

    /// True when no actor has queued work or remaining busy time.
    pub fn is_idle(&self) -> bool {
        self.roster
            .iter()
            .all(|slot| slot.sapience.queue.is_empty() && !slot.sapience.is_busy())
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn drain_messages(&mut self) -> Vec<String> {
        self.messages.drain()
    }

    pub fn queue_of(&self, actor: EntityId) -> Option<&ActionQueue> {
        self.roster.get(actor).map(|sapience| &sapience.queue)
    }

    /// Keys of `actor`'s queued actions, front first.
    pub fn queued_keys(&self, actor: EntityId) -> Vec<&'static str> {
        self.queue_of(actor)
            .map(|queue| queue.iter().map(|action| action.key()).collect())
            .unwrap_or_default()
    }

    /// Ticks `actor` will still sit out.
    pub fn busy_ticks(&self, actor: EntityId) -> Option<u32> {
        self.roster.get(actor).map(|sapience| sapience.busy)
    }

    /// Sum of every elapsed time `actor` has reported.
    pub fn total_busy(&self, actor: EntityId) -> Option<u64> {
        self.roster.get(actor).map(|sapience| sapience.total_busy)
    }

    pub fn actors(&self) -> Vec<EntityId> {
        self.roster.ids().collect()
    }

    /// The tick the next call to [`Runtime::step`] will run.
    pub fn clock(&self) -> Tick {
        self.scheduler.clock()
    }

    pub fn config(&self) -> &EngineConfig {
        self.scheduler.config()
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn providers_mut(&mut self) -> &mut ProviderRegistry {
        &mut self.providers
    }

    /// Captures the clock and every actor's queue and busy counters.
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot::capture(self.scheduler.clock(), &self.roster)
    }

    /// Replaces every queue with the content of `snapshot`.
    ///
    /// The snapshot is checked and rebuilt in full before anything is
    /// replaced, so an inconsistent queue or an unknown key leaves the
    /// runtime untouched.
    pub fn restore_queues(&mut self, snapshot: &QueueSnapshot) -> Result<()> {
        snapshot.validate()?;
        let mut roster = ActorRoster::new();
        for record in &snapshot.actors {
            let sapience = roster.add(record.actor)?;
            sapience.busy = record.busy;
            sapience.total_busy = record.total_busy;
            for action in &record.actions {
                sapience.queue.push_back(self.registry.restore(action)?);
            }
        }

        self.roster = roster;
        self.scheduler = Scheduler::new(self.scheduler.config().clone()).with_clock(snapshot.clock);
        info!(
            target: "runtime",
            clock = %snapshot.clock,
            actors = snapshot.actors.len(),
            actions = snapshot.pending_actions(),
            "queues restored"
        );
        Ok(())
    }

    /// Saves the current queues to `repo` under `slot`.
    pub fn save_queues(&self, repo: &dyn QueueRepository, slot: &str) -> Result<()> {
        repo.save(slot, &self.snapshot())?;
        Ok(())
    }

    /// Restores queues from `slot`; returns false if the slot is empty.
    pub fn load_queues(&mut self, repo: &dyn QueueRepository, slot: &str) -> Result<bool> {
        match repo.load(slot)? {
            Some(snapshot) => {
                self.restore_queues(&snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder<W: World> {
    config: RuntimeConfig,
    world: Option<W>,
    registry: Option<ActionRegistry>,
    providers: ProviderRegistry,
    actors: Vec<EntityId>,
}

impl<W: World> RuntimeBuilder<W> {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            registry: None,
            providers: ProviderRegistry::new(),
            actors: Vec::new(),
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn engine_config(mut self, engine: EngineConfig) -> Self {
        self.config.engine = engine;
        self
    }

    pub fn world(mut self, world: W) -> Self {
        self.world = Some(world);
        self
    }

    /// Uses `registry` instead of the stock command catalog.
    pub fn registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn provider(mut self, kind: ProviderKind, provider: impl ActionProvider + 'static) -> Self {
        self.providers.register(kind, provider);
        self
    }

    pub fn bind_actor(mut self, actor: EntityId, kind: ProviderKind) -> Self {
        self.providers.bind_actor(actor, kind);
        self
    }

    pub fn default_provider(mut self, kind: ProviderKind) -> Self {
        self.providers.set_default(kind);
        self
    }

    /// Registers `actor` at build time, after any actor added earlier.
    pub fn actor(mut self, actor: EntityId) -> Self {
        self.actors.push(actor);
        self
    }

    pub fn build(self) -> Result<Runtime<W>> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;
        let registry = match self.registry {
            Some(registry) => registry,
            None => game_content::build_registry()?,
        };

        let mut runtime = Runtime {
            world,
            registry,
            scheduler: Scheduler::new(self.config.engine.clone()),
            roster: ActorRoster::new(),
            messages: MessageLog::with_capacity(self.config.message_capacity),
            providers: self.providers,
        };
        for actor in self.actors {
            runtime.add_actor(actor)?;
        }

        info!(
            target: "runtime",
            actions = runtime.registry.len(),
            actors = runtime.roster.len(),
            max_steps_per_tick = runtime.config().max_steps_per_tick,
            "runtime built"
        );
        Ok(runtime)
    }
}
