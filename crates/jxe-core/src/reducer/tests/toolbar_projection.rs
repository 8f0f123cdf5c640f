use super::*;
use crate::toolbar::ToolbarAction;
use pretty_assertions::assert_eq;

fn enabled(state: &EditorState) -> Vec<ToolbarAction> {
    state.toolbar().enabled_actions()
}

#[test]
fn blank_editor_only_offers_structured_ops_and_compare() {
    let state = EditorState::new();
    assert_eq!(
        enabled(&state),
        vec![
            ToolbarAction::Format,
            ToolbarAction::Validate,
            ToolbarAction::CompareClipboard,
        ]
    );
}

#[test]
fn toolbar_follows_reducer_transitions() {
    let mut state = state_with("{}");
    edit(&mut state, "{\"a\":1}");
    assert!(!state.toolbar().undo);
    assert!(state.toolbar().redo);

    run_user(&mut state, UserAction::Undo);
    assert!(state.toolbar().undo);
    assert!(!state.toolbar().redo);

    let run_id = start(&mut state, TransformKind::Format);
    assert_eq!(
        enabled(&state),
        Vec::<ToolbarAction>::new(),
        "nothing is available while processing without output"
    );

    run_runtime(
        &mut state,
        RuntimeAction::TransformFinished {
            run_id,
            kind: TransformKind::Format,
            report: report(true, "JSON formatted.", Some("{}")),
        },
    );
    let expected: Vec<ToolbarAction> = ToolbarAction::ALL
        .into_iter()
        .filter(|action| *action != ToolbarAction::Undo)
        .collect();
    assert_eq!(enabled(&state), expected);
}

#[test]
fn output_actions_survive_processing() {
    let mut state = state_with("{}");
    state.output = "{}".to_string();
    start(&mut state, TransformKind::Validate);
    assert_eq!(
        enabled(&state),
        vec![ToolbarAction::OutputToEditor, ToolbarAction::CopyOutput]
    );
}
