//! Timeline program: an ordered list of tweens plus named labels.
//!
//! Supports the subset of scheduling the interpreter needs: `set`, `to` and
//! `from_to` placed at the end of the program, at a label or at an absolute
//! time, with an optional stagger across targets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use algoviz_api_core::Props;

use crate::binding::TargetHandle;
use crate::ids::{IdAllocator, TweenId};
use crate::interp::Ease;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweenKind {
    /// Instant write at `start`.
    Set,
    /// From whatever the target holds when the tween starts.
    To,
    /// From explicit values, rendered before the tween starts when nothing
    /// earlier has touched the property.
    FromTo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub id: TweenId,
    pub kind: TweenKind,
    pub target: TargetHandle,
    pub start: f32,
    pub duration: f32,
    pub ease: Ease,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Props>,
    pub to: Props,
    /// Label the tween was placed at, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Tween {
    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }
}

/// Where a tween starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Position {
    /// After everything scheduled so far.
    #[default]
    End,
    /// At a label; a missing label is created at the end first.
    Label(String),
    At(f32),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TweenOpts {
    pub position: Position,
    /// Falls back to the timeline default.
    pub duration: Option<f32>,
    /// Falls back to the timeline default.
    pub ease: Option<Ease>,
    /// Start offset between consecutive targets.
    pub stagger: f32,
}

impl TweenOpts {
    pub fn at_label(label: impl Into<String>) -> Self {
        Self {
            position: Position::Label(label.into()),
            ..Self::default()
        }
    }

    pub fn at(time: f32) -> Self {
        Self {
            position: Position::At(time),
            ..Self::default()
        }
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn stagger(mut self, stagger: f32) -> Self {
        self.stagger = stagger;
        self
    }
}

/// Saved program extent; see [`Timeline::rollback`].
#[derive(Clone, Debug)]
pub struct Checkpoint {
    tweens: usize,
    labels: IndexMap<String, f32>,
    end: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Timeline {
    tweens: Vec<Tween>,
    labels: IndexMap<String, f32>,
    end: f32,
    default_duration: f32,
    default_ease: Ease,
    #[serde(skip)]
    ids: IdAllocator,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Timeline {
    pub fn new(default_duration: f32) -> Self {
        Self {
            tweens: Vec::new(),
            labels: IndexMap::new(),
            end: 0.0,
            default_duration,
            default_ease: Ease::default(),
            ids: IdAllocator::new(),
        }
    }

    pub fn set(&mut self, targets: &[TargetHandle], props: Props, opts: TweenOpts) -> f32 {
        self.push(TweenKind::Set, targets, None, props, opts)
    }

    pub fn to(&mut self, targets: &[TargetHandle], props: Props, opts: TweenOpts) -> f32 {
        self.push(TweenKind::To, targets, None, props, opts)
    }

    pub fn from_to(
        &mut self,
        targets: &[TargetHandle],
        from: Props,
        to: Props,
        opts: TweenOpts,
    ) -> f32 {
        self.push(TweenKind::FromTo, targets, Some(from), to, opts)
    }

    /// Add (or move) a label to the current end. Returns its time.
    pub fn add_label(&mut self, name: impl Into<String>) -> f32 {
        let at = self.end;
        self.labels.insert(name.into(), at);
        at
    }

    pub fn label_time(&self, name: &str) -> Option<f32> {
        self.labels.get(name).copied()
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = (&str, f32)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// End time of the last tween.
    pub fn duration(&self) -> f32 {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty() && self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
        self.labels.clear();
        self.end = 0.0;
        self.ids.reset();
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            tweens: self.tweens.len(),
            labels: self.labels.clone(),
            end: self.end,
        }
    }

    /// Drop everything added after `cp`.
    pub fn rollback(&mut self, cp: Checkpoint) {
        self.tweens.truncate(cp.tweens);
        self.labels = cp.labels;
        self.end = cp.end;
    }

    fn resolve(&mut self, position: &Position) -> (f32, Option<String>) {
        match position {
            Position::End => (self.end, None),
            Position::At(t) => (t.max(0.0), None),
            Position::Label(name) => {
                let at = match self.labels.get(name) {
                    Some(t) => *t,
                    None => self.add_label(name.clone()),
                };
                (at, Some(name.clone()))
            }
        }
    }

    fn push(
        &mut self,
        kind: TweenKind,
        targets: &[TargetHandle],
        from: Option<Props>,
        to: Props,
        opts: TweenOpts,
    ) -> f32 {
        let (start, label) = self.resolve(&opts.position);
        let duration = match kind {
            TweenKind::Set => 0.0,
            _ => opts.duration.unwrap_or(self.default_duration).max(0.0),
        };
        let ease = opts.ease.unwrap_or(self.default_ease);
        for (i, target) in targets.iter().enumerate() {
            let tween = Tween {
                id: self.ids.alloc_tween(),
                kind,
                target: target.clone(),
                start: start + opts.stagger * i as f32,
                duration,
                ease,
                from: from.clone(),
                to: to.clone(),
                label: label.clone(),
            };
            self.end = self.end.max(tween.end());
            self.tweens.push(tween);
        }
        start
    }
}
