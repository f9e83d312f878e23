//! Playback controller over one timeline program.
//!
//! States: `Idle → Scheduled → Playing ⇄ Paused → Completed`. Time only
//! advances through [`TimelineController::update`], driven by the host clock.
//! The pause before a loop restarts is an explicit [`PendingTimer`] owned by
//! the controller, so pause / restart / seek / rebuild can cancel it.

use serde::{Deserialize, Serialize};
use std::fmt;

use algoviz_algo_core::Op;
use algoviz_api_core::WriteBatch;

use crate::binding::ElementResolver;
use crate::config::Config;
use crate::error::{InterpretError, PlaybackError};
use crate::ids::{IdAllocator, TimerId};
use crate::inputs::{LoopMode, PlayerCommand};
use crate::interpreter;
use crate::outputs::{CoreEvent, Outputs};
use crate::sampling::sample;
use crate::timeline::Timeline;

/// Labels closer than this to the current time count as "here" when stepping.
const LABEL_EPSILON: f32 = 1e-4;

/// Negative or non-finite speeds stop the clock.
#[inline]
fn clamp_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.max(0.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No program.
    Idle,
    /// Program built, not started.
    Scheduled,
    Playing,
    Paused,
    /// Reached the end in `LoopMode::Once`.
    Completed,
}

impl PlaybackState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scheduled => "scheduled",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    #[inline]
    pub fn has_program(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Jump back to time 0 and keep playing.
    Restart,
}

/// A cancellable delayed action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingTimer {
    pub id: TimerId,
    /// Seconds of playing time left before it fires.
    pub remaining: f32,
    pub action: TimerAction,
}

#[derive(Debug)]
pub struct TimelineController {
    cfg: Config,
    timeline: Timeline,
    state: PlaybackState,
    time: f32,
    speed: f32,
    loop_mode: LoopMode,
    timers: Vec<PendingTimer>,
    ids: IdAllocator,
    /// Events raised by direct calls, flushed on the next update.
    pending_events: Vec<CoreEvent>,
    outputs: Outputs,
}

impl TimelineController {
    pub fn new(cfg: Config) -> Self {
        Self {
            timeline: Timeline::new(cfg.duration),
            state: PlaybackState::Idle,
            time: 0.0,
            speed: clamp_speed(cfg.playback.speed),
            loop_mode: cfg.playback.loop_mode,
            timers: Vec::new(),
            ids: IdAllocator::new(),
            pending_events: Vec::new(),
            outputs: Outputs::default(),
            cfg,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn duration(&self) -> f32 {
        self.timeline.duration()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn pending_timers(&self) -> &[PendingTimer] {
        &self.timers
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        if mode == LoopMode::Once {
            self.cancel_timers();
        }
        self.loop_mode = mode;
    }

    /// Negative or non-finite speeds stop the clock.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = clamp_speed(speed);
    }

    /// Replace the program with one interpreted from `ops`.
    ///
    /// Ends `Scheduled` on success. On failure the program is empty and the
    /// controller is `Idle`.
    pub fn rebuild(
        &mut self,
        ops: &[Op],
        resolver: &mut dyn ElementResolver,
    ) -> Result<(), InterpretError> {
        self.cancel_timers();
        self.timeline.clear();
        self.time = 0.0;
        match interpreter::apply(ops, resolver, &mut self.timeline, &self.cfg) {
            Ok(()) => {
                self.pending_events.push(CoreEvent::Built {
                    tweens: self.timeline.tweens().len(),
                    labels: self.timeline.label_count(),
                    duration: self.timeline.duration(),
                });
                self.transition(PlaybackState::Scheduled);
                Ok(())
            }
            Err(e) => {
                self.transition(PlaybackState::Idle);
                self.pending_events.push(CoreEvent::Error {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Drop the program.
    pub fn clear(&mut self) {
        self.cancel_timers();
        self.timeline.clear();
        self.time = 0.0;
        self.transition(PlaybackState::Idle);
    }

    pub fn play(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Idle => Err(self.invalid("play")),
            PlaybackState::Playing => Ok(()),
            PlaybackState::Completed => {
                self.time = 0.0;
                self.transition(PlaybackState::Playing);
                Ok(())
            }
            PlaybackState::Scheduled | PlaybackState::Paused => {
                self.transition(PlaybackState::Playing);
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Idle => Err(self.invalid("pause")),
            PlaybackState::Playing | PlaybackState::Scheduled => {
                self.cancel_timers();
                self.transition(PlaybackState::Paused);
                Ok(())
            }
            PlaybackState::Paused | PlaybackState::Completed => Ok(()),
        }
    }

    /// Back to time 0, keeping play/pause status. A completed program starts
    /// playing again; without a program this does nothing.
    pub fn restart(&mut self) {
        if self.state == PlaybackState::Idle {
            return;
        }
        self.cancel_timers();
        self.move_to(0.0);
        if self.state == PlaybackState::Completed {
            self.transition(PlaybackState::Playing);
        }
    }

    /// Jump to `time` (clamped to the program). Keeps playing if playing,
    /// otherwise pauses there.
    pub fn seek(&mut self, time: f32) -> Result<(), PlaybackError> {
        if !self.state.has_program() {
            return Err(self.invalid("seek"));
        }
        if !time.is_finite() || time < 0.0 {
            return Err(PlaybackError::InvalidTime { time });
        }
        self.cancel_timers();
        self.move_to(time.min(self.duration()));
        if self.state != PlaybackState::Playing {
            self.transition(PlaybackState::Paused);
        }
        Ok(())
    }

    pub fn seek_label(&mut self, label: &str) -> Result<(), PlaybackError> {
        if !self.state.has_program() {
            return Err(self.invalid("seek"));
        }
        let at = self
            .timeline
            .label_time(label)
            .ok_or_else(|| PlaybackError::UnknownLabel {
                label: label.to_string(),
            })?;
        log::debug!("seek to label {label} at {at:.3}s");
        self.seek(at)
    }

    /// Seek to the next label after the current time, or to the end.
    pub fn step_forward(&mut self) -> Result<(), PlaybackError> {
        let now = self.time;
        let next = self
            .timeline
            .labels()
            .map(|(_, t)| t)
            .filter(|t| *t > now + LABEL_EPSILON)
            .fold(None, |acc: Option<f32>, t| Some(acc.map_or(t, |a| a.min(t))));
        let end = self.duration();
        self.seek(next.unwrap_or(end))
    }

    /// Seek to the closest label before the current time, or to 0.
    pub fn step_backward(&mut self) -> Result<(), PlaybackError> {
        let now = self.time;
        let prev = self
            .timeline
            .labels()
            .map(|(_, t)| t)
            .filter(|t| *t < now - LABEL_EPSILON)
            .fold(None, |acc: Option<f32>, t| Some(acc.map_or(t, |a| a.max(t))));
        self.seek(prev.unwrap_or(0.0))
    }

    pub fn apply(&mut self, cmd: PlayerCommand) -> Result<(), PlaybackError> {
        match cmd {
            PlayerCommand::Play => self.play(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Restart => {
                self.restart();
                Ok(())
            }
            PlayerCommand::Seek { time } => self.seek(time),
            PlayerCommand::SeekLabel { label } => self.seek_label(&label),
            PlayerCommand::StepForward => self.step_forward(),
            PlayerCommand::StepBackward => self.step_backward(),
            PlayerCommand::SetSpeed { speed } => {
                self.set_speed(speed);
                Ok(())
            }
            PlayerCommand::SetLoopMode { mode } => {
                self.set_loop_mode(mode);
                Ok(())
            }
        }
    }

    /// Property values at the current time.
    pub fn sample(&self) -> WriteBatch {
        sample(&self.timeline, self.time)
    }

    /// Advance the clock by `dt` seconds if playing, fire due timers, and
    /// report the sampled writes plus every event since the last update.
    pub fn update(&mut self, dt: f32) -> &Outputs {
        self.outputs.clear();
        if self.state == PlaybackState::Playing && dt.is_finite() && dt > 0.0 {
            let mut delta = dt * self.speed;
            if !self.timers.is_empty() {
                delta = self.tick_timers(delta);
            }
            if self.timers.is_empty() && delta > 0.0 {
                self.advance(delta);
            }
        }
        if self.state.has_program() {
            self.outputs.changes = self.sample();
        }
        self.outputs.events.append(&mut self.pending_events);
        &self.outputs
    }

    fn advance(&mut self, delta: f32) {
        let end = self.duration();
        if end <= 0.0 && self.loop_mode == LoopMode::Loop {
            return;
        }
        let old = self.time;
        let new = old + delta;
        if new < end {
            self.emit_labels(old, new, false);
            self.time = new;
            return;
        }
        if old < end {
            self.emit_labels(old, end, true);
        }
        self.time = end;
        match self.loop_mode {
            LoopMode::Once => {
                self.transition(PlaybackState::Completed);
                self.pending_events.push(CoreEvent::Completed { time: end });
            }
            LoopMode::Loop => {
                let delay = self.cfg.playback.restart_delay;
                if delay > 0.0 {
                    let id = self.ids.alloc_timer();
                    log::debug!("loop restart scheduled in {delay:.2}s ({id:?})");
                    self.timers.push(PendingTimer {
                        id,
                        remaining: delay,
                        action: TimerAction::Restart,
                    });
                    self.pending_events.push(CoreEvent::LoopScheduled { delay });
                } else {
                    self.time = 0.0;
                    self.pending_events.push(CoreEvent::Looped);
                }
            }
        }
    }

    /// Count timers down by `delta` and fire the due ones. Returns the part
    /// of `delta` left over after a restart, to be played from time 0.
    fn tick_timers(&mut self, delta: f32) -> f32 {
        for timer in &mut self.timers {
            timer.remaining -= delta;
        }
        let (due, waiting): (Vec<PendingTimer>, Vec<PendingTimer>) =
            self.timers.drain(..).partition(|t| t.remaining <= 0.0);
        self.timers = waiting;
        let mut leftover: f32 = 0.0;
        for timer in due {
            match timer.action {
                TimerAction::Restart => {
                    self.time = 0.0;
                    self.pending_events.push(CoreEvent::Looped);
                    leftover = leftover.max(-timer.remaining);
                }
            }
        }
        leftover
    }

    /// Labels in `[from, to)`, or `[from, to]` when `inclusive`.
    fn emit_labels(&mut self, from: f32, to: f32, inclusive: bool) {
        for (label, t) in self.timeline.labels() {
            let hit = t >= from && (t < to || (inclusive && t <= to));
            if hit {
                self.pending_events.push(CoreEvent::LabelReached {
                    label: label.to_string(),
                    time: t,
                });
            }
        }
    }

    fn move_to(&mut self, time: f32) {
        let old = self.time;
        self.time = time;
        self.pending_events.push(CoreEvent::Seeked {
            old_time: old,
            new_time: time,
        });
    }

    fn cancel_timers(&mut self) {
        if !self.timers.is_empty() {
            log::debug!("cancelled {} pending timer(s)", self.timers.len());
            self.timers.clear();
        }
    }

    fn transition(&mut self, to: PlaybackState) {
        if self.state != to {
            log::debug!("playback {} -> {}", self.state, to);
            self.pending_events.push(CoreEvent::StateChanged {
                from: self.state,
                to,
            });
            self.state = to;
        }
    }

    fn invalid(&self, action: &'static str) -> PlaybackError {
        PlaybackError::InvalidTransition {
            from: self.state,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::MapResolver;
    use algoviz_algo_core::{Namespace, Outcome};
    use algoviz_api_core::Color;

    fn fixture() -> (Vec<Op>, MapResolver) {
        let ops = vec![
            Op::create("low", 0, Color::Black),
            Op::mv("low", 1),
            Op::Result {
                result: Outcome::Index(Some(1)),
            },
        ];
        let mut r = MapResolver::new();
        r.push_cell("1-0", "cell/0");
        r.push_cell("2-1", "cell/1");
        r.insert(Namespace::Pointer, "low", "pointer/low");
        (ops, r)
    }

    fn built(cfg: Config) -> TimelineController {
        let (ops, mut r) = fixture();
        let mut c = TimelineController::new(cfg);
        c.rebuild(&ops, &mut r).unwrap();
        c
    }

    fn once() -> Config {
        let mut cfg = Config::default();
        cfg.playback.loop_mode = LoopMode::Once;
        cfg
    }

    #[test]
    fn play_requires_a_program() {
        let mut c = TimelineController::new(Config::default());
        assert!(matches!(
            c.play(),
            Err(PlaybackError::InvalidTransition {
                from: PlaybackState::Idle,
                ..
            })
        ));
        c.restart();
        assert_eq!(c.state(), PlaybackState::Idle);
    }

    #[test]
    fn rebuild_twice_is_scheduled_without_timers() {
        let (ops, mut r) = fixture();
        let mut c = TimelineController::new(Config::default());
        c.rebuild(&ops, &mut r).unwrap();
        c.play().unwrap();
        c.update(100.0);
        assert_eq!(c.pending_timers().len(), 1);
        c.rebuild(&ops, &mut r).unwrap();
        c.rebuild(&ops, &mut r).unwrap();
        assert_eq!(c.state(), PlaybackState::Scheduled);
        assert!(c.pending_timers().is_empty());
        assert_eq!(c.time(), 0.0);
    }

    #[test]
    fn once_mode_completes_and_replays() {
        let mut c = built(once());
        c.play().unwrap();
        let end = c.duration();
        let out = c.update(end + 1.0).clone();
        assert_eq!(c.state(), PlaybackState::Completed);
        assert_eq!(c.time(), end);
        assert!(out.events.contains(&CoreEvent::Completed { time: end }));
        assert!(out
            .events
            .iter()
            .any(|e| matches!(e, CoreEvent::LabelReached { label, .. } if label == "result")));
        c.play().unwrap();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(c.time(), 0.0);
    }

    #[test]
    fn loop_waits_on_a_timer_then_restarts() {
        let mut c = built(Config::default());
        c.play().unwrap();
        let end = c.duration();
        c.update(end + 0.01);
        assert_eq!(c.time(), end);
        assert_eq!(c.pending_timers().len(), 1);
        c.update(0.5);
        assert_eq!(c.time(), end);
        let out = c.update(0.6).clone();
        assert!(out.events.contains(&CoreEvent::Looped));
        assert_eq!(c.time(), 0.0);
        assert!(c.pending_timers().is_empty());
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn pause_cancels_the_loop_timer() {
        let mut c = built(Config::default());
        c.play().unwrap();
        c.update(c.duration() + 0.01);
        assert_eq!(c.pending_timers().len(), 1);
        c.pause().unwrap();
        assert!(c.pending_timers().is_empty());
        assert_eq!(c.state(), PlaybackState::Paused);
        c.update(5.0);
        assert_eq!(c.time(), c.duration());
    }

    #[test]
    fn restart_keeps_status() {
        let mut c = built(Config::default());
        c.play().unwrap();
        c.update(0.5);
        c.restart();
        assert_eq!(c.time(), 0.0);
        assert_eq!(c.state(), PlaybackState::Playing);
        c.pause().unwrap();
        c.seek(0.3).unwrap();
        c.restart();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.time(), 0.0);
    }

    #[test]
    fn seeking_pauses_unless_playing() {
        let mut c = built(Config::default());
        c.seek_label("op-1").unwrap();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(Some(c.time()), c.timeline().label_time("op-1"));
        c.play().unwrap();
        c.seek(0.0).unwrap();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(
            c.seek_label("nope"),
            Err(PlaybackError::UnknownLabel {
                label: "nope".into()
            })
        );
        assert_eq!(c.seek(-1.0), Err(PlaybackError::InvalidTime { time: -1.0 }));
    }

    #[test]
    fn stepping_walks_labels() {
        let mut c = built(Config::default());
        let labels: Vec<f32> = c.timeline().labels().map(|(_, t)| t).collect();
        c.step_forward().unwrap();
        let first_after_zero = labels.iter().copied().filter(|t| *t > 0.0).fold(f32::MAX, f32::min);
        assert_eq!(c.time(), first_after_zero);
        c.step_backward().unwrap();
        assert_eq!(c.time(), 0.0);
        c.seek(c.duration()).unwrap();
        c.step_forward().unwrap();
        assert_eq!(c.time(), c.duration());
    }

    #[test]
    fn commands_route_to_methods() {
        let mut c = built(Config::default());
        c.apply(PlayerCommand::Play).unwrap();
        c.apply(PlayerCommand::SetSpeed { speed: 2.0 }).unwrap();
        c.update(0.1);
        assert!((c.time() - 0.2).abs() < 1e-6);
        c.apply(PlayerCommand::Pause).unwrap();
        assert_eq!(c.state(), PlaybackState::Paused);
        c.apply(PlayerCommand::SetLoopMode { mode: LoopMode::Once }).unwrap();
        assert_eq!(c.loop_mode(), LoopMode::Once);
    }

    fn label_events(out: &Outputs) -> Vec<String> {
        out.events
            .iter()
            .filter_map(|e| match e {
                CoreEvent::LabelReached { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn config_speed_is_clamped() {
        let cfg = Config::from_json(r#"{"playback":{"speed":-2.0}}"#).unwrap();
        let mut c = built(cfg);
        assert_eq!(c.speed(), 0.0);
        c.play().unwrap();
        c.update(1.0);
        assert_eq!(c.time(), 0.0);

        let mut cfg = Config::default();
        cfg.playback.speed = f32::NAN;
        let mut c = built(cfg);
        assert_eq!(c.speed(), 0.0);
        c.play().unwrap();
        c.update(1.0);
        assert_eq!(c.time(), 0.0);
        assert!(c.sample().iter().all(|w| w.value.as_float().map_or(true, f32::is_finite)));
    }

    #[test]
    fn loop_restart_carries_the_rest_of_the_frame() {
        let mut c = built(Config::default());
        c.play().unwrap();
        let end = c.duration();
        assert!(end > 0.5);
        c.update(end + 0.01);
        assert_eq!(c.pending_timers().len(), 1);
        let out = c.update(1.25).clone();
        assert!(out.events.contains(&CoreEvent::Looped));
        assert!(c.pending_timers().is_empty());
        assert!((c.time() - 0.25).abs() < 1e-4);
        assert!(label_events(&out).contains(&"intro".to_string()));
    }

    #[test]
    fn replaying_from_the_end_does_not_repeat_end_labels() {
        let mut c = built(Config::default());
        c.play().unwrap();
        let end = c.duration();
        let out = c.update(end + 0.01).clone();
        assert!(label_events(&out).contains(&"result".to_string()));
        c.pause().unwrap();
        c.play().unwrap();
        let out = c.update(0.01).clone();
        assert!(label_events(&out).is_empty());
        assert_eq!(c.pending_timers().len(), 1);
    }

    #[test]
    fn stepping_cancels_a_pending_restart() {
        let mut c = built(Config::default());
        c.play().unwrap();
        let end = c.duration();
        c.update(end + 0.01);
        assert_eq!(c.pending_timers().len(), 1);

        c.step_backward().unwrap();
        assert!(c.pending_timers().is_empty());
        assert_eq!(c.state(), PlaybackState::Playing);
        let at = c.time();
        assert!(at < end);
        c.update(0.01);
        assert!((c.time() - (at + 0.01)).abs() < 1e-5);

        c.update(end);
        assert_eq!(c.pending_timers().len(), 1);
        c.step_forward().unwrap();
        assert!(c.pending_timers().is_empty());
        assert_eq!(c.time(), end);
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn seeking_a_label_cancels_a_pending_restart() {
        let mut c = built(Config::default());
        c.play().unwrap();
        c.update(c.duration() + 0.01);
        assert_eq!(c.pending_timers().len(), 1);
        c.seek_label("op-1").unwrap();
        assert!(c.pending_timers().is_empty());
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(Some(c.time()), c.timeline().label_time("op-1"));
        let out = c.update(0.01).clone();
        assert!(!out.events.contains(&CoreEvent::Looped));
    }

    #[test]
    fn restart_from_paused_stays_paused() {
        let mut c = built(Config::default());
        c.play().unwrap();
        c.update(c.duration() + 0.01);
        c.pause().unwrap();
        c.restart();
        assert_eq!(c.time(), 0.0);
        assert_eq!(c.state(), PlaybackState::Paused);
        assert!(c.pending_timers().is_empty());
        c.update(1.0);
        assert_eq!(c.time(), 0.0);
    }

    #[test]
    fn failed_rebuild_leaves_idle() {
        let mut c = built(Config::default());
        let mut empty = MapResolver::new();
        let (ops, _) = fixture();
        assert!(c.rebuild(&ops, &mut empty).is_err());
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.timeline().is_empty());
        let out = c.update(0.1);
        assert!(out.changes.is_empty());
        assert!(out.events.iter().any(|e| matches!(e, CoreEvent::Error { .. })));
    }
}
