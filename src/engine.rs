//! The game state machine.
//!
//! [`GameEngine`] is the single writer of phase, score, countdown and slot
//! state. Every transition is guarded; an event whose guard fails is dropped
//! without touching state. Rendering happens through a [`GameObserver`].

use log::{debug, info, trace};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::clock::{Clock, TimeLeft};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::scheduler::{Slot, TargetScheduler};
use crate::score::ScoreTracker;
use crate::tasks::{Task, TaskQueue};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    Paused,
    Ended,
}

/// Transient "+1" / "-1" shown over a hole. Presentation only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreIndicator {
    pub id: u64,
    pub slot: usize,
    pub delta: i64,
}

/// What the engine can be asked to do. Produced by the
/// [`InputRouter`](crate::input::InputRouter).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    End,
    Attempt(usize),
}

/// Render callbacks. Every method defaults to doing nothing.
pub trait GameObserver {
    fn on_phase_changed(&mut self, _phase: GamePhase) {}
    fn on_score_changed(&mut self, _score: i64) {}
    fn on_time_changed(&mut self, _remaining: TimeLeft) {}
    fn on_slot_activated(&mut self, _slot: usize) {}
    fn on_slot_deactivated(&mut self, _slot: usize) {}
    fn on_score_indicator(&mut self, _indicator: ScoreIndicator) {}
    fn on_indicator_cleared(&mut self, _indicator: ScoreIndicator) {}
}

impl GameObserver for () {}

/// Every observer callback as a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderEvent {
    Phase(GamePhase),
    Score(i64),
    Time(TimeLeft),
    SlotActivated(usize),
    SlotDeactivated(usize),
    Indicator(ScoreIndicator),
    IndicatorCleared(ScoreIndicator),
}

/// Observer that records what it is told. Handy for headless runs.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<RenderEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameObserver for EventLog {
    fn on_phase_changed(&mut self, phase: GamePhase) {
        self.events.push(RenderEvent::Phase(phase));
    }
    fn on_score_changed(&mut self, score: i64) {
        self.events.push(RenderEvent::Score(score));
    }
    fn on_time_changed(&mut self, remaining: TimeLeft) {
        self.events.push(RenderEvent::Time(remaining));
    }
    fn on_slot_activated(&mut self, slot: usize) {
        self.events.push(RenderEvent::SlotActivated(slot));
    }
    fn on_slot_deactivated(&mut self, slot: usize) {
        self.events.push(RenderEvent::SlotDeactivated(slot));
    }
    fn on_score_indicator(&mut self, indicator: ScoreIndicator) {
        self.events.push(RenderEvent::Indicator(indicator));
    }
    fn on_indicator_cleared(&mut self, indicator: ScoreIndicator) {
        self.events.push(RenderEvent::IndicatorCleared(indicator));
    }
}

pub struct GameEngine<O, R = SmallRng> {
    config: GameConfig,
    phase: GamePhase,
    clock: Clock,
    scheduler: TargetScheduler<R>,
    score: ScoreTracker,
    tasks: TaskQueue,
    /// Engine time base, advanced by every tick regardless of phase.
    now_ms: u64,
    final_score: Option<i64>,
    next_indicator_id: u64,
    observer: O,
}

impl<O: GameObserver> GameEngine<O, SmallRng> {
    /// Engine with an entropy-seeded scheduler.
    pub fn new(config: GameConfig, observer: O) -> Result<Self, ConfigError> {
        Self::with_rng(config, observer, SmallRng::from_entropy())
    }
}

impl<O: GameObserver, R: Rng> GameEngine<O, R> {
    pub fn with_rng(config: GameConfig, observer: O, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let clock = Clock::new(config.duration_ms(), u64::from(config.tick_interval_ms));
        let scheduler = TargetScheduler::new(config.slot_count, rng);
        Ok(Self {
            config,
            phase: GamePhase::Idle,
            clock,
            scheduler,
            score: ScoreTracker::new(),
            tasks: TaskQueue::new(),
            now_ms: 0,
            final_score: None,
            next_indicator_id: 0,
            observer,
        })
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::End => self.end(),
            Command::Attempt(slot) => self.attempt(slot),
        }
    }

    pub fn start(&mut self) {
        if !matches!(self.phase, GamePhase::Idle | GamePhase::Ended) {
            trace!("start ignored while {:?}", self.phase);
            return;
        }
        self.tasks.cancel_where(|t| matches!(t, Task::Reactivate));
        self.flush_indicators();
        self.final_score = None;

        let score = self.score.reset();
        self.observer.on_score_changed(score);
        self.clock.start(self.config.duration_ms());
        self.observer.on_time_changed(self.clock.remaining());
        if let Some(slot) = self.scheduler.clear_all() {
            self.observer.on_slot_deactivated(slot);
        }

        self.set_phase(GamePhase::Running);
        self.activate_next();
        info!(
            "game started: {}s on {} slots",
            self.clock.remaining(),
            self.scheduler.len()
        );
    }

    pub fn pause(&mut self) {
        if self.phase != GamePhase::Running {
            trace!("pause ignored while {:?}", self.phase);
            return;
        }
        self.clock.stop();
        let suppressed = self.tasks.cancel_where(|t| matches!(t, Task::Reactivate));
        if !suppressed.is_empty() {
            debug!("pending reactivation suppressed by pause");
        }
        self.set_phase(GamePhase::Paused);
    }

    pub fn resume(&mut self) {
        if self.phase != GamePhase::Paused {
            trace!("resume ignored while {:?}", self.phase);
            return;
        }
        self.clock.resume();
        self.set_phase(GamePhase::Running);
        if self.scheduler.active().is_none() {
            // The pause swallowed a reactivation; give the player a fresh delay.
            self.schedule_reactivation();
        }
    }

    pub fn end(&mut self) {
        if !matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            trace!("end ignored while {:?}", self.phase);
            return;
        }
        self.clock.stop();
        self.tasks.cancel_where(|t| matches!(t, Task::Reactivate));
        if let Some(slot) = self.scheduler.clear_all() {
            self.observer.on_slot_deactivated(slot);
        }
        self.flush_indicators();
        self.final_score = Some(self.score.value());
        self.set_phase(GamePhase::Ended);
        info!("game over, final score {}", self.score.value());
    }

    /// One beat of the tick source. Only counts down while running; due tasks
    /// run in every phase.
    pub fn tick(&mut self) {
        self.now_ms += u64::from(self.config.tick_interval_ms);

        if self.phase == GamePhase::Running {
            let remaining = self.clock.tick();
            self.observer.on_time_changed(remaining);
            if self.clock.is_expired() {
                debug!("countdown expired");
                self.end();
            }
        }

        for task in self.tasks.take_due(self.now_ms) {
            match task {
                Task::Reactivate => {
                    if self.phase == GamePhase::Running {
                        self.activate_next();
                    }
                }
                Task::ClearIndicator(indicator) => self.observer.on_indicator_cleared(indicator),
            }
        }
    }

    pub fn attempt(&mut self, slot: usize) {
        if self.phase != GamePhase::Running {
            trace!("attempt on slot {slot} ignored while {:?}", self.phase);
            return;
        }
        if self.reactivation_pending() {
            trace!("attempt on slot {slot} ignored while the next mole is pending");
            return;
        }
        match self.scheduler.has_target(slot) {
            None => trace!("attempt on unknown slot {slot}"),
            Some(true) => {
                self.scheduler.clear(slot);
                self.observer.on_slot_deactivated(slot);
                let score = self.score.increment();
                self.observer.on_score_changed(score);
                self.show_indicator(slot, 1);
                debug!("hit slot {slot}, score {score}");
                self.schedule_reactivation();
            }
            Some(false) => {
                let score = self.score.decrement();
                self.observer.on_score_changed(score);
                self.show_indicator(slot, -1);
                debug!("miss slot {slot}, score {score}");
            }
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> i64 {
        self.score.value()
    }

    /// Score snapshot taken when the game last ended.
    pub fn final_score(&self) -> Option<i64> {
        self.final_score
    }

    pub fn remaining(&self) -> TimeLeft {
        self.clock.remaining()
    }

    pub fn active_slot(&self) -> Option<usize> {
        self.scheduler.active()
    }

    pub fn slots(&self) -> &[Slot] {
        self.scheduler.slots()
    }

    pub fn reactivation_pending(&self) -> bool {
        self.tasks.contains(|t| matches!(t, Task::Reactivate))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn set_phase(&mut self, phase: GamePhase) {
        debug!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.observer.on_phase_changed(phase);
    }

    fn activate_next(&mut self) {
        let activation = self.scheduler.activate_random();
        if let Some(slot) = activation.deactivated {
            self.observer.on_slot_deactivated(slot);
        }
        self.observer.on_slot_activated(activation.activated);
    }

    fn schedule_reactivation(&mut self) {
        let delay = u64::from(self.config.reactivation_delay_ms);
        if delay == 0 {
            self.activate_next();
        } else {
            self.tasks.schedule(self.now_ms + delay, Task::Reactivate);
        }
    }

    fn show_indicator(&mut self, slot: usize, delta: i64) {
        self.next_indicator_id += 1;
        let indicator = ScoreIndicator {
            id: self.next_indicator_id,
            slot,
            delta,
        };
        self.observer.on_score_indicator(indicator);
        let due = self.now_ms + u64::from(self.config.indicator_duration_ms);
        self.tasks.schedule(due, Task::ClearIndicator(indicator));
    }

    fn flush_indicators(&mut self) {
        for task in self
            .tasks
            .cancel_where(|t| matches!(t, Task::ClearIndicator(_)))
        {
            if let Task::ClearIndicator(indicator) = task {
                self.observer.on_indicator_cleared(indicator);
            }
        }
    }
}
