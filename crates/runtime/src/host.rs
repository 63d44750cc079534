//! Local battle host.
//!
//! [`BattleHost`] owns one battle: it drives a [`BattleSession`] with commands,
//! logs every accepted command for replay, fans events out on the
//! [`EventBus`], and hands the outcome to the [`OutcomeSink`] exactly once.

use std::sync::Arc;

use raid_core::{
    ActionReport, BattleConfig, BattleEnv, BattleOutcome, BattleSession, Catalog, GameState,
    PcgRng, PlayerId,
};
use tokio::sync::broadcast;

use crate::api::{OutcomeSink, Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::repository::{
    ActionLogEntry, ActionRepository, BattleSetup, Command, InMemoryActionLog,
};

/// Runs `command` against the session. Shared by live hosting and replay.
pub(crate) fn apply(
    session: &mut BattleSession<'_>,
    env: BattleEnv<'_>,
    command: &Command,
) -> Result<ActionReport> {
    let report = match command {
        Command::UseSkill {
            player,
            skill_index,
            target_index,
        } => session.use_skill(env, player, *skill_index, *target_index)?,
        Command::Join { player } => session.player_joined(env, player.clone())?,
        Command::Leave { player } => session.player_left(env, player)?,
    };
    Ok(report)
}

/// One hosted battle.
pub struct BattleHost {
    catalog: Arc<Catalog>,
    config: BattleConfig,
    setup: BattleSetup,
    state: GameState,
    nonce: u64,
    action_log: Box<dyn ActionRepository>,
    outcome_sink: Option<Box<dyn OutcomeSink>>,
    outcome: Option<BattleOutcome>,
    events: EventBus,
}

impl BattleHost {
    /// Create a new host builder.
    pub fn builder() -> BattleHostBuilder {
        BattleHostBuilder::default()
    }

    /// Executes one command.
    ///
    /// Accepted commands are appended to the action log and their events are
    /// published. Refused commands change nothing and are logged at `warn`.
    ///
    /// The command runs against a staged copy of the state, which only
    /// replaces the live state once the log entry is written. A failed append
    /// leaves the battle where it was.
    pub fn execute(&mut self, command: Command) -> Result<ActionReport> {
        let env = BattleEnv::new(self.catalog.as_ref(), &self.config, &PcgRng);
        let turn = self.state.turns;

        let mut staged = self.state.clone();
        let mut session = BattleSession::new(&mut staged);
        let report = match apply(&mut session, env, &command) {
            Ok(report) => report,
            Err(err) => {
                let severity = err.severity().as_str();
                if err.is_rejection() {
                    tracing::warn!(
                        nonce = self.nonce,
                        ?command,
                        severity,
                        error = %err,
                        "command rejected"
                    );
                } else {
                    tracing::error!(
                        nonce = self.nonce,
                        ?command,
                        severity,
                        error = %err,
                        "command aborted"
                    );
                }
                return Err(err);
            }
        };

        let nonce = self.nonce;
        if let Err(err) = self
            .action_log
            .append(&ActionLogEntry::new(nonce, turn, command))
        {
            tracing::error!(nonce, error = %err, "action log append failed");
            return Err(err.into());
        }
        self.state = staged;
        self.nonce += 1;

        for event in &report.events {
            tracing::trace!(nonce, kind = event.kind(), subject = ?event.subject(), "battle event");
            self.events.publish(Event::Battle {
                nonce,
                event: event.clone(),
            });
        }
        if let Some(outcome) = &report.outcome {
            self.deliver(outcome);
            if let Err(err) = self.action_log.flush() {
                tracing::error!(error = %err, "action log flush failed");
            }
        }

        Ok(report)
    }

    pub fn use_skill(
        &mut self,
        player: &PlayerId,
        skill_index: usize,
        target_index: usize,
    ) -> Result<ActionReport> {
        self.execute(Command::UseSkill {
            player: player.clone(),
            skill_index,
            target_index,
        })
    }

    pub fn join(&mut self, player: impl Into<PlayerId>) -> Result<ActionReport> {
        self.execute(Command::Join {
            player: player.into(),
        })
    }

    pub fn leave(&mut self, player: impl Into<PlayerId>) -> Result<ActionReport> {
        self.execute(Command::Leave {
            player: player.into(),
        })
    }

    fn deliver(&mut self, outcome: &BattleOutcome) {
        if self.outcome.is_some() {
            return;
        }
        tracing::info!(result = %outcome.result, players = outcome.players.len(), "delivering outcome");
        if let Some(sink) = self.outcome_sink.as_mut() {
            sink.deliver(outcome);
        }
        self.events.publish(Event::Outcome(outcome.clone()));
        self.outcome = Some(outcome.clone());
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn setup(&self) -> &BattleSetup {
        &self.setup
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Number of accepted commands so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// The delivered outcome, once the battle has ended.
    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    pub fn action_log(&self) -> &dyn ActionRepository {
        self.action_log.as_ref()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    /// Pretty-printed JSON snapshot of the battle state.
    pub fn snapshot_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.state).map_err(|e| RuntimeError::Snapshot(e.to_string()))
    }
}

/// Builder for [`BattleHost`].
#[derive(Default)]
pub struct BattleHostBuilder {
    catalog: Option<Arc<Catalog>>,
    config: BattleConfig,
    setup: Option<BattleSetup>,
    action_log: Option<Box<dyn ActionRepository>>,
    outcome_sink: Option<Box<dyn OutcomeSink>>,
    events: Option<EventBus>,
}

impl BattleHostBuilder {
    pub fn catalog(mut self, catalog: impl Into<Arc<Catalog>>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn setup(mut self, setup: BattleSetup) -> Self {
        self.setup = Some(setup);
        self
    }

    /// Use a custom action log. Defaults to [`InMemoryActionLog`].
    pub fn action_log(mut self, log: impl ActionRepository + 'static) -> Self {
        self.action_log = Some(Box::new(log));
        self
    }

    pub fn outcome_sink(mut self, sink: impl OutcomeSink + 'static) -> Self {
        self.outcome_sink = Some(Box::new(sink));
        self
    }

    /// Share an existing event bus, e.g. one already subscribed to.
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Sets up the battle and records the setup in the action log.
    pub fn build(self) -> Result<BattleHost> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let setup = self.setup.ok_or(RuntimeError::MissingSetup)?;

        let env = BattleEnv::new(catalog.as_ref(), &self.config, &PcgRng);
        let state = GameState::setup(env, &setup.players, setup.seed, setup.boss.as_deref())?;

        let mut action_log = self
            .action_log
            .unwrap_or_else(|| Box::new(InMemoryActionLog::new()));
        action_log.begin(&setup)?;

        tracing::info!(
            seed = setup.seed,
            players = setup.players.len(),
            boss = %state.enemy.base.class_id,
            "battle hosted"
        );

        Ok(BattleHost {
            catalog,
            config: self.config,
            setup,
            state,
            nonce: 0,
            action_log,
            outcome_sink: self.outcome_sink,
            outcome: None,
            events: self.events.unwrap_or_default(),
        })
    }
}
