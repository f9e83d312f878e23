//! Sampling a timeline program at a point in time.
//!
//! Tweens are replayed per (target, prop) in start order. A `To` starts from
//! the value the property holds when the tween begins; overlapping tweens on
//! the same property resolve in favour of the later one.

use indexmap::IndexMap;

use algoviz_api_core::blend::blend_values;
use algoviz_api_core::{Prop, Value, WriteBatch, WriteOp};

use crate::interp::Ease;
use crate::timeline::{Timeline, Tween, TweenKind};

/// One tween's contribution to a single property.
#[derive(Clone, Debug)]
struct Segment {
    kind: TweenKind,
    start: f32,
    duration: f32,
    ease: Ease,
    from: Option<Value>,
    to: Value,
}

impl Segment {
    #[inline]
    fn progress(&self, t: f32) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            ((t - self.start) / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Value of a property at `t` given its segments (start order) and the
/// resolved starting value of each `To` segment.
fn value_at(segments: &[Segment], starts: &[Value], t: f32, initial: &Value) -> Value {
    let mut current = initial.clone();
    let mut touched = false;
    for (seg, start_value) in segments.iter().zip(starts) {
        if t < seg.start {
            if seg.kind == TweenKind::FromTo && !touched {
                if let Some(from) = &seg.from {
                    current = from.clone();
                    touched = true;
                }
            }
            continue;
        }
        touched = true;
        current = match seg.kind {
            TweenKind::Set => seg.to.clone(),
            TweenKind::To => blend_values(start_value, &seg.to, seg.ease.apply(seg.progress(t))),
            TweenKind::FromTo => {
                let from = seg.from.as_ref().unwrap_or(start_value);
                blend_values(from, &seg.to, seg.ease.apply(seg.progress(t)))
            }
        };
    }
    current
}

fn sample_property(segments: &[Segment], t: f32, initial: &Value) -> Value {
    let mut starts: Vec<Value> = Vec::with_capacity(segments.len());
    for (i, seg) in segments.iter().enumerate() {
        let v = value_at(&segments[..i], &starts, seg.start, initial);
        starts.push(v);
    }
    value_at(segments, &starts, t, initial)
}

fn tweens_in_start_order(timeline: &Timeline) -> Vec<&Tween> {
    let mut tweens: Vec<&Tween> = timeline.tweens().iter().collect();
    tweens.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.id.cmp(&b.id)));
    tweens
}

/// Evaluate every (target, prop) the timeline touches at time `t`.
/// Writes come out in order of first touch.
pub fn sample(timeline: &Timeline, t: f32) -> WriteBatch {
    let mut tracks: IndexMap<(String, Prop), Vec<Segment>> = IndexMap::new();
    for tween in tweens_in_start_order(timeline) {
        for (prop, to) in tween.to.iter() {
            let from = tween.from.as_ref().and_then(|f| f.get(*prop)).cloned();
            tracks
                .entry((tween.target.clone(), *prop))
                .or_default()
                .push(Segment {
                    kind: tween.kind,
                    start: tween.start,
                    duration: tween.duration,
                    ease: tween.ease,
                    from,
                    to: to.clone(),
                });
        }
    }

    let mut batch = WriteBatch::new();
    for ((target, prop), segments) in &tracks {
        let value = sample_property(segments, t, &prop.initial());
        batch.push(WriteOp::new(target.clone(), *prop, value));
    }
    batch
}
