//! Operation log → timeline program.
//!
//! Each op gets a label `op-{i}` at the point the program had reached when
//! the op was read; its tweens follow sequentially unless they share that
//! label. Cells are addressed by grid position; swaps permute which mounted
//! cell sits at which position.

use std::slice;

use algoviz_algo_core::{check_log, Namespace, Op, Outcome};
use algoviz_api_core::{Color, Props};

use crate::binding::{BindingTable, ElementResolver, TargetHandle};
use crate::config::Config;
use crate::error::InterpretError;
use crate::interp::Ease;
use crate::timeline::{Timeline, TweenOpts};

pub const INTRO_LABEL: &str = "intro";
pub const RESULT_LABEL: &str = "result";

pub fn op_label(index: usize) -> String {
    format!("op-{index}")
}

/// Append the program for `ops` to `timeline`.
///
/// On error the timeline is left exactly as it was before the call.
pub fn apply(
    ops: &[Op],
    resolver: &mut dyn ElementResolver,
    timeline: &mut Timeline,
    cfg: &Config,
) -> Result<(), InterpretError> {
    check_log(ops)?;
    let cp = timeline.checkpoint();
    let cells = resolver.cells();
    let mut interp = Interpreter {
        slots: (0..cells.len()).collect(),
        cells,
        resolver,
        timeline: &mut *timeline,
        cfg,
        bindings: BindingTable::new(),
    };
    interp.intro();
    let built = ops
        .iter()
        .enumerate()
        .try_for_each(|(i, op)| interp.op(i, op));
    match built {
        Ok(()) => {
            log::debug!(
                "interpreted {} ops: {} tweens, {} bindings, duration {:.2}s",
                ops.len(),
                interp.timeline.tweens().len(),
                interp.bindings.len(),
                interp.timeline.duration()
            );
            Ok(())
        }
        Err(e) => {
            log::warn!("interpretation aborted ({}): {e}", e.category());
            timeline.rollback(cp);
            Err(e)
        }
    }
}

struct Interpreter<'a, 'r> {
    resolver: &'a mut (dyn ElementResolver + 'r),
    timeline: &'a mut Timeline,
    cfg: &'a Config,
    bindings: BindingTable,
    /// Mounted cells, in input order.
    cells: Vec<TargetHandle>,
    /// `slots[pos]` is the index into `cells` currently shown at `pos`.
    slots: Vec<usize>,
}

impl Interpreter<'_, '_> {
    fn handle(&mut self, ns: Namespace, id: &str, op_index: usize) -> Result<TargetHandle, InterpretError> {
        self.bindings
            .resolve(&mut *self.resolver, ns, id)
            .ok_or_else(|| InterpretError::UnresolvedElement {
                op_index,
                namespace: ns,
                id: id.to_string(),
            })
    }

    fn pointer(&mut self, id: &str, op_index: usize) -> Result<TargetHandle, InterpretError> {
        self.handle(Namespace::Pointer, id, op_index)
    }

    fn cell_at(&self, pos: usize, op_index: usize) -> Result<TargetHandle, InterpretError> {
        self.slots
            .get(pos)
            .map(|&c| self.cells[c].clone())
            .ok_or(InterpretError::IndexOutOfRange {
                op_index,
                index: pos,
                len: self.slots.len(),
            })
    }

    /// Place every cell on the grid and bring them in one after another.
    fn intro(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        let intro = &self.cfg.intro;
        self.timeline.add_label(INTRO_LABEL);
        for (i, cell) in self.cells.iter().enumerate() {
            self.timeline.set(
                slice::from_ref(cell),
                Props::new().translate_x(self.cfg.x_px(i)),
                TweenOpts::at_label(INTRO_LABEL),
            );
        }
        self.timeline.set(
            &self.cells,
            Props::new().visible(true),
            TweenOpts::at_label(INTRO_LABEL),
        );
        self.timeline.from_to(
            &self.cells,
            Props::new().opacity(0.0).translate_y(intro.slide),
            Props::new().opacity(1.0).translate_y(0.0),
            TweenOpts::at_label(INTRO_LABEL)
                .duration(intro.duration)
                .stagger(intro.stagger)
                .ease(Ease::elastic(intro.amplitude, intro.period)),
        );
    }

    fn fade_in_pointer(&mut self, h: &TargetHandle, x: usize, color: Color, opts: &TweenOpts) {
        self.timeline.set(
            slice::from_ref(h),
            Props::new().translate_x(self.cfg.x_px(x)),
            opts.clone(),
        );
        self.timeline.from_to(
            slice::from_ref(h),
            Props::new().color(color).visible(false).opacity(0.0).scale(0.0),
            Props::new().color(color).visible(true).opacity(1.0).scale(1.0),
            opts.clone(),
        );
    }

    /// Scale up then back to 1, optionally tinting on the way up.
    fn pulse(&mut self, targets: &[TargetHandle], scale: f32, tint: Option<Color>) {
        let mut up = Props::new().scale(scale);
        if let Some(c) = tint {
            up = up.color(c);
        }
        self.timeline.to(targets, up, TweenOpts::default());
        self.timeline.to(targets, Props::new().scale(1.0), TweenOpts::default());
    }

    /// Dim every cell outside `from..=to` and restore the ones inside.
    fn spotlight(&mut self, from: usize, to: usize, label: &str) {
        let (inside, outside): (Vec<(usize, &usize)>, Vec<(usize, &usize)>) = self
            .slots
            .iter()
            .enumerate()
            .partition(|(pos, _)| (from..=to).contains(pos));
        let inside: Vec<TargetHandle> = inside.into_iter().map(|(_, &c)| self.cells[c].clone()).collect();
        let outside: Vec<TargetHandle> = outside.into_iter().map(|(_, &c)| self.cells[c].clone()).collect();
        self.timeline.to(
            &outside,
            Props::new().opacity(self.cfg.dim_opacity),
            TweenOpts::at_label(label),
        );
        self.timeline
            .to(&inside, Props::new().opacity(1.0), TweenOpts::at_label(label));
    }

    fn op(&mut self, i: usize, op: &Op) -> Result<(), InterpretError> {
        log::trace!("op {i}: {}", op.kind());
        let label = op_label(i);
        self.timeline.add_label(label.clone());
        let cfg = self.cfg;

        match op {
            Op::Create { id, x, color } => {
                let h = self.pointer(id, i)?;
                self.fade_in_pointer(&h, *x, *color, &TweenOpts::default());
            }
            Op::CreateMany { items } => {
                let shared = TweenOpts::at_label(label.clone());
                for p in items {
                    let h = self.pointer(&p.id, i)?;
                    self.fade_in_pointer(&h, p.x, p.color, &shared);
                }
            }
            Op::Move { id, x } => {
                let h = self.pointer(id, i)?;
                self.timeline.to(
                    slice::from_ref(&h),
                    Props::new().translate_x(cfg.x_px(*x)),
                    TweenOpts::default(),
                );
            }
            Op::Swap { a, b } => {
                let ha = self.cell_at(*a, i)?;
                let hb = self.cell_at(*b, i)?;
                self.timeline.to(
                    slice::from_ref(&ha),
                    Props::new().translate_x(cfg.x_px(*b)),
                    TweenOpts::at_label(label.clone()),
                );
                self.timeline.to(
                    slice::from_ref(&hb),
                    Props::new().translate_x(cfg.x_px(*a)),
                    TweenOpts::at_label(label),
                );
                self.slots.swap(*a, *b);
            }
            Op::Focus { from, to } => {
                if *to >= self.slots.len() {
                    return Err(InterpretError::InvalidRange {
                        op_index: i,
                        from: *from,
                        to: *to,
                        len: self.slots.len(),
                    });
                }
                self.spotlight(*from, *to, &label);
            }
            Op::HighlightIndex { index } => {
                let h = self.cell_at(*index, i)?;
                self.spotlight(*index, *index, &label);
                self.pulse(slice::from_ref(&h), cfg.pulse_scale, None);
            }
            Op::HighlightPointer { id } => {
                let h = self.pointer(id, i)?;
                self.timeline.to(
                    slice::from_ref(&h),
                    Props::new().scale(cfg.pulse_scale).color(cfg.error_color),
                    TweenOpts::default(),
                );
            }
            Op::Match { left, right } | Op::NoneMatch { left, right } => {
                let pair = [self.pointer(left, i)?, self.pointer(right, i)?];
                let tint = matches!(op, Op::NoneMatch { .. }).then_some(cfg.error_color);
                self.pulse(&pair, cfg.pulse_scale, tint);
            }
            Op::AppendStack { id, .. } => {
                let h = self.handle(Namespace::Stack, id, i)?;
                self.timeline.set(
                    slice::from_ref(&h),
                    Props::new().color(cfg.slot_color).visible(true),
                    TweenOpts::default(),
                );
                self.timeline.from_to(
                    slice::from_ref(&h),
                    Props::new().opacity(0.0).scale(0.0),
                    Props::new().opacity(1.0).scale(1.0),
                    TweenOpts::default(),
                );
            }
            Op::PopStack { id } => {
                let h = self.handle(Namespace::Stack, id, i)?;
                self.timeline.to(
                    slice::from_ref(&h),
                    Props::new().scale(0.0).opacity(0.0).visible(false),
                    TweenOpts::default(),
                );
            }
            Op::StackMatch { input_id, stack_id } => {
                let pair = [
                    self.handle(Namespace::Cell, input_id, i)?,
                    self.handle(Namespace::Stack, stack_id, i)?,
                ];
                self.pulse(&pair, cfg.stack_pulse_scale, None);
            }
            Op::StackNoneMatch { input_id, stack_id } => {
                let mut targets = vec![self.handle(Namespace::Cell, input_id, i)?];
                if let Some(sid) = stack_id {
                    targets.push(self.handle(Namespace::Stack, sid, i)?);
                }
                self.pulse(&targets, cfg.stack_pulse_scale, Some(cfg.error_color));
            }
            Op::Remove { id } => {
                let h = self.pointer(id, i)?;
                self.timeline
                    .to(slice::from_ref(&h), Props::new().opacity(0.0), TweenOpts::default());
            }
            Op::RemoveMany { ids } => {
                let handles = ids
                    .iter()
                    .map(|id| self.pointer(id, i))
                    .collect::<Result<Vec<_>, _>>()?;
                self.timeline
                    .to(&handles, Props::new().opacity(0.0), TweenOpts::default());
            }
            Op::Result { result } => {
                self.timeline.add_label(RESULT_LABEL);
                log::trace!("result {}", describe(result));
                if let Some(h) = self.resolver.result_label() {
                    self.timeline.from_to(
                        slice::from_ref(&h),
                        Props::new().opacity(0.0).visible(false),
                        Props::new().opacity(1.0).visible(true),
                        TweenOpts::default(),
                    );
                }
            }
        }
        Ok(())
    }
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Balanced(b) => b.to_string(),
        Outcome::Index(Some(i)) => i.to_string(),
        Outcome::Index(None) => "not found".to_string(),
        Outcome::Sorted(items) => format!("{items:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::MapResolver;
    use algoviz_algo_core::PointerSpec;
    use algoviz_api_core::{Prop, Value};

    fn resolver(cells: usize, pointers: &[&str]) -> MapResolver {
        let mut r = MapResolver::new();
        for i in 0..cells {
            r.push_cell(format!("{i}-{i}"), format!("cell/{i}"));
        }
        for p in pointers {
            r.insert(Namespace::Pointer, *p, format!("pointer/{p}"));
        }
        r
    }

    fn result() -> Op {
        Op::Result {
            result: Outcome::Balanced(true),
        }
    }

    #[test]
    fn labels_every_op_and_the_result() {
        let ops = vec![
            Op::create("low", 0, Color::Black),
            Op::mv("low", 2),
            Op::remove("low"),
            result(),
        ];
        let mut tl = Timeline::new(0.45);
        apply(&ops, &mut resolver(3, &["low"]), &mut tl, &Config::default()).unwrap();
        for name in [INTRO_LABEL, "op-0", "op-1", "op-2", "op-3", RESULT_LABEL] {
            assert!(tl.label_time(name).is_some(), "missing {name}");
        }
        assert!(tl.label_time("op-1").unwrap() < tl.label_time("op-2").unwrap());
    }

    #[test]
    fn result_handle_is_hidden_until_the_result() {
        let mut r = resolver(2, &[]);
        r.set_result("result");
        let mut tl = Timeline::new(0.45);
        apply(&[result()], &mut r, &mut tl, &Config::default()).unwrap();
        let at = tl.label_time(RESULT_LABEL).unwrap();
        assert!(at > 0.0);
        let before = crate::sampling::sample(&tl, at - 0.01);
        assert_eq!(before.get("result", Prop::Visible), Some(&Value::Bool(false)));
        let after = crate::sampling::sample(&tl, tl.duration());
        assert_eq!(after.get("result", Prop::Opacity), Some(&Value::Float(1.0)));
    }

    #[test]
    fn create_many_fades_in_together() {
        let ops = vec![
            Op::CreateMany {
                items: vec![
                    PointerSpec::new("low", 0, Color::Black),
                    PointerSpec::new("high", 2, Color::Orange),
                ],
            },
            result(),
        ];
        let mut tl = Timeline::new(0.45);
        apply(&ops, &mut resolver(3, &["low", "high"]), &mut tl, &Config::default()).unwrap();
        let at = tl.label_time("op-0").unwrap();
        let starts: Vec<f32> = tl
            .tweens()
            .iter()
            .filter(|t| t.target.starts_with("pointer/"))
            .map(|t| t.start)
            .collect();
        assert_eq!(starts.len(), 4);
        assert!(starts.iter().all(|s| *s == at));
    }

    #[test]
    fn remove_many_fades_out_every_pointer() {
        let ops = vec![
            Op::CreateMany {
                items: vec![
                    PointerSpec::new("low", 0, Color::Black),
                    PointerSpec::new("high", 2, Color::Orange),
                ],
            },
            Op::RemoveMany {
                ids: vec!["low".into(), "high".into()],
            },
            result(),
        ];
        let mut tl = Timeline::new(0.45);
        apply(&ops, &mut resolver(3, &["low", "high"]), &mut tl, &Config::default()).unwrap();
        let removed_at = tl.label_time("op-1").unwrap();
        let shown = crate::sampling::sample(&tl, removed_at);
        let hidden = crate::sampling::sample(&tl, tl.duration());
        let opacity = |batch: &algoviz_api_core::WriteBatch, p: &str| {
            batch.get(p, Prop::Opacity).and_then(Value::as_float).unwrap_or(f32::NAN)
        };
        for p in ["pointer/low", "pointer/high"] {
            assert!((opacity(&shown, p) - 1.0).abs() < 1e-5, "{p}");
            assert!(opacity(&hidden, p).abs() < 1e-5, "{p}");
        }
    }

    #[test]
    fn remove_many_needs_every_pointer() {
        let ops = vec![
            Op::RemoveMany {
                ids: vec!["low".into(), "ghost".into()],
            },
            result(),
        ];
        let mut tl = Timeline::new(0.45);
        let err = apply(&ops, &mut resolver(2, &["low"]), &mut tl, &Config::default()).unwrap_err();
        assert_eq!(
            err,
            InterpretError::UnresolvedElement {
                op_index: 0,
                namespace: Namespace::Pointer,
                id: "ghost".into()
            }
        );
    }

    #[test]
    fn swap_tracks_cell_permutation() {
        let ops = vec![
            Op::Swap { a: 0, b: 2 },
            Op::Swap { a: 0, b: 1 },
            result(),
        ];
        let mut tl = Timeline::new(0.45);
        apply(&ops, &mut resolver(3, &[]), &mut tl, &Config::default()).unwrap();
        let second = tl.label_time("op-1").unwrap();
        let moved: Vec<&str> = tl
            .tweens()
            .iter()
            .filter(|t| t.start == second)
            .map(|t| t.target.as_str())
            .collect();
        // cell/2 sits at position 0 after the first swap.
        assert_eq!(moved, vec!["cell/2", "cell/1"]);
    }

    #[test]
    fn unresolved_pointer_rolls_back() {
        let ops = vec![Op::create("ghost", 0, Color::Black), result()];
        let mut tl = Timeline::new(0.45);
        tl.add_label("keep");
        let err = apply(&ops, &mut resolver(2, &[]), &mut tl, &Config::default()).unwrap_err();
        assert_eq!(
            err,
            InterpretError::UnresolvedElement {
                op_index: 0,
                namespace: Namespace::Pointer,
                id: "ghost".into()
            }
        );
        assert_eq!(tl.tweens().len(), 0);
        assert_eq!(tl.label_count(), 1);
    }

    #[test]
    fn out_of_range_cells_are_errors() {
        let mut tl = Timeline::new(0.45);
        let cfg = Config::default();
        let err = apply(&[Op::Swap { a: 0, b: 5 }, result()], &mut resolver(2, &[]), &mut tl, &cfg)
            .unwrap_err();
        assert!(matches!(err, InterpretError::IndexOutOfRange { index: 5, len: 2, .. }));
        let err = apply(&[Op::Focus { from: 0, to: 2 }, result()], &mut resolver(2, &[]), &mut tl, &cfg)
            .unwrap_err();
        assert!(matches!(err, InterpretError::InvalidRange { to: 2, len: 2, .. }));
        assert!(tl.is_empty());
    }

    #[test]
    fn malformed_logs_are_rejected_up_front() {
        let mut tl = Timeline::new(0.45);
        let err = apply(&[Op::mv("low", 1)], &mut resolver(2, &["low"]), &mut tl, &Config::default())
            .unwrap_err();
        assert_eq!(err.category(), "log");
        assert!(tl.is_empty());
    }
}
