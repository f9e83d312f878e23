use algoviz_algo_core::{BalancedRecursive, BalancedStack, BinarySearch, QuickSort, SearchStrategy};
use algoviz_animation_core::{
    CoreEvent, LoopMode, PlaybackState, PlayerCommand, Prop, Value, RESULT_LABEL,
};
use algoviz_orchestrator::{
    cell_handle, RenderTicket, Visualization, VisualizationConfig, VisualizationError,
    RESULT_HANDLE,
};
use algoviz_test_fixtures as fixtures;

fn once() -> VisualizationConfig {
    let mut cfg = VisualizationConfig::default();
    cfg.animation.playback.loop_mode = LoopMode::Once;
    cfg
}

/// Tick at 60 Hz until `Completed`, returning every event seen.
fn play_out<A: algoviz_algo_core::Algorithm>(viz: &mut Visualization<A>) -> Vec<CoreEvent> {
    let mut seen = Vec::new();
    for _ in 0..100_000 {
        let out = viz.update(1.0 / 60.0);
        let done = out
            .events
            .iter()
            .any(|e| matches!(e, CoreEvent::Completed { .. }));
        seen.extend(out.events.iter().cloned());
        if done {
            return seen;
        }
    }
    panic!("never completed");
}

#[test]
fn bracket_fixtures_play_to_completion() {
    for case in fixtures::brackets::cases("balanced-cases").expect("brackets") {
        let mut stack = Visualization::new(BalancedStack, once());
        let ticket = stack.set_text(&case.input);
        stack.attach_headless(ticket).expect("stack attaches");
        let events = play_out(&mut stack);
        assert!(events
            .iter()
            .any(|e| matches!(e, CoreEvent::LabelReached { label, .. } if label == RESULT_LABEL)));
        assert_eq!(stack.result(), Some(&case.balanced));

        let mut recursive = Visualization::new(BalancedRecursive, once());
        let ticket = recursive.set_text(&case.input);
        recursive.attach_headless(ticket).expect("recursive attaches");
        play_out(&mut recursive);
        assert_eq!(recursive.controller().state(), PlaybackState::Completed);
    }
}

#[test]
fn search_fixtures_show_the_result() {
    for case in fixtures::searches::cases("sorted-cases").expect("searches") {
        let raw = case
            .items
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        for strategy in [SearchStrategy::Inclusive, SearchStrategy::HalfOpen] {
            let mut viz = Visualization::new(BinarySearch::new(strategy), once());
            let ticket = viz.set_search(&raw, case.target).expect("sorted input");
            viz.attach_headless(ticket).expect("attaches");
            play_out(&mut viz);
            assert_eq!(viz.result(), Some(&case.index));
            assert_eq!(
                viz.controller().sample().get(RESULT_HANDLE, Prop::Opacity),
                Some(&Value::Float(1.0))
            );
        }
    }
}

#[test]
fn sorted_cells_end_in_order() {
    for case in fixtures::sorts::cases("unsorted-cases").expect("sorts") {
        let mut viz = Visualization::new(QuickSort, once());
        let ticket = viz.set_input(case.items.clone());
        viz.attach_headless(ticket).expect("attaches");
        play_out(&mut viz);

        let width = viz.config().animation.cell_width;
        let writes = viz.controller().sample();
        let sorted = viz.result().expect("ran").clone();
        for (i, value) in case.items.iter().enumerate() {
            let px = writes
                .get(&cell_handle(i), Prop::TranslateX)
                .and_then(Value::as_float)
                .expect("cell x");
            assert_eq!(sorted[(px / width).round() as usize], *value);
        }
    }
}

#[test]
fn new_input_while_playing_supersedes_the_old_render() {
    let mut viz = Visualization::new(QuickSort, VisualizationConfig::default());
    let first = viz.set_numbers("4,3,2,1").unwrap();
    viz.attach_headless(first).unwrap();
    viz.update(0.5);

    let second = viz.set_numbers("2,1").unwrap();
    assert_eq!(viz.controller().state(), PlaybackState::Idle);
    assert!(viz.controller().pending_timers().is_empty());
    assert!(matches!(
        viz.attach_headless(first),
        Err(VisualizationError::StaleRender { .. })
    ));
    viz.attach_headless(second).unwrap();
    assert_eq!(viz.scene().cells.len(), 2);
    assert_eq!(viz.controller().state(), PlaybackState::Playing);
}

#[test]
fn commands_reach_the_controller() {
    let mut viz = Visualization::new(BalancedStack, VisualizationConfig::default());
    let ticket = viz.set_text("{[]}");
    viz.attach_headless(ticket).unwrap();

    viz.command(PlayerCommand::Pause).unwrap();
    assert_eq!(viz.controller().state(), PlaybackState::Paused);
    viz.command(PlayerCommand::SeekLabel {
        label: RESULT_LABEL.into(),
    })
    .unwrap();
    let at = viz.controller().timeline().label_time(RESULT_LABEL).unwrap();
    assert!((viz.controller().time() - at).abs() < 1e-4);
    assert_eq!(viz.controller().state(), PlaybackState::Paused);

    let err = viz
        .command(PlayerCommand::SeekLabel {
            label: "missing".into(),
        })
        .unwrap_err();
    assert_eq!(err.category(), "seek");
}

#[test]
fn empty_text_still_builds() {
    let mut viz = Visualization::new(BalancedStack, once());
    let ticket: RenderTicket = viz.set_text("   ");
    assert!(viz.scene().is_empty());
    viz.attach_headless(ticket).unwrap();
    assert_eq!(viz.result(), Some(&true));
    play_out(&mut viz);
}
