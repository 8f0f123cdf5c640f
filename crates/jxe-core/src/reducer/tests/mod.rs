use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use crate::actions::EditorAction;
pub(super) use crate::actions::EditorEffect;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::preferences::Locale;
pub(super) use crate::preferences::ThemePreference;
pub(super) use crate::preferences::LOCALE_STORAGE_KEY;
pub(super) use crate::preferences::THEME_STORAGE_KEY;
pub(super) use crate::state::DiffTab;
pub(super) use crate::state::EditorState;
pub(super) use crate::state::EditorTab;
pub(super) use crate::state::Lang;
pub(super) use crate::state::LogBuffer;
pub(super) use crate::state::LogEntry;
pub(super) use crate::state::LogLevel;
pub(super) use crate::state::StatusLevel;
pub(super) use crate::state::Tab;
pub(super) use crate::state::TabId;
pub(super) use crate::state::TabKind;
pub(super) use crate::state::TransformKind;
pub(super) use crate::state::TransformReport;

mod log_buffer;
mod toolbar_projection;

/// State holding a single JSON editor `editor-a` with the given value.
fn state_with(value: &str) -> EditorState {
    let mut state = EditorState::new();
    state.tabs = vec![Tab::Editor(EditorTab::new(
        TabId::from("editor-a"),
        "a.json",
        Lang::Json,
        value,
    ))];
    state.active_id = TabId::from("editor-a");
    state
}

fn diff_tab(id: &str, source: &str) -> Tab {
    Tab::Diff(DiffTab {
        id: TabId::from(id),
        title: "Diff".to_string(),
        lang: Lang::Json,
        source_editor_id: TabId::from(source),
        original_value: "{}".to_string(),
        value: "{\"x\":1}".to_string(),
    })
}

fn run_user(state: &mut EditorState, action: UserAction) -> Vec<EditorEffect> {
    reduce(state, EditorAction::User(action))
}

fn run_runtime(state: &mut EditorState, action: RuntimeAction) {
    let effects = reduce(state, EditorAction::Runtime(action));
    assert!(effects.is_empty());
}

fn editor<'a>(state: &'a EditorState, id: &str) -> &'a EditorTab {
    state
        .tab(&TabId::from(id))
        .and_then(Tab::as_editor)
        .expect("editor tab present")
}

fn edit(state: &mut EditorState, value: &str) {
    let effects = run_user(state, UserAction::Edit(value.to_string()));
    assert_eq!(effects, vec![EditorEffect::RequestFrame]);
}

fn report(ok: bool, message: &str, output: Option<&str>) -> TransformReport {
    TransformReport {
        ok,
        message: message.to_string(),
        output: output.map(str::to_string),
        line: None,
        column: None,
    }
}

/// Starts a transform and returns its run id.
fn start(state: &mut EditorState, kind: TransformKind) -> u64 {
    let effects = run_user(state, UserAction::RunTransform(kind));
    match effects.first() {
        Some(EditorEffect::RunTransform { run_id, .. }) => *run_id,
        other => panic!("expected RunTransform effect, got {other:?}"),
    }
}
