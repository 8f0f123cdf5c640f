use super::actions::EditorAction;
use super::actions::EditorEffect;
use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::preferences::LOCALE_STORAGE_KEY;
use super::preferences::THEME_STORAGE_KEY;
use super::state::base_name;
use super::state::DiffTab;
use super::state::EditorState;
use super::state::EditorTab;
use super::state::Lang;
use super::state::LogEntry;
use super::state::LogLevel;
use super::state::StatusLevel;
use super::state::StatusLine;
use super::state::Tab;
use super::state::TabId;
use super::state::TransformKind;
use super::toolbar::ToolbarAction;

pub fn reduce(state: &mut EditorState, action: EditorAction) -> Vec<EditorEffect> {
    match action {
        EditorAction::User(user) => reduce_user(state, user),
        EditorAction::Runtime(runtime) => {
            reduce_runtime(state, runtime);
            Vec::new()
        }
    }
}

fn reduce_user(state: &mut EditorState, action: UserAction) -> Vec<EditorEffect> {
    match action {
        UserAction::NewTab => {
            let tab = EditorTab::blank();
            record(state, LogLevel::Debug, format!("new tab {}", tab.id));
            state.active_id = tab.id.clone();
            state.tabs.push(Tab::Editor(tab));
            vec![EditorEffect::RequestFrame]
        }
        UserAction::OpenFile { path, content } => {
            let display = path.to_string_lossy();
            let title = base_name(&display).to_string();
            let lang = Lang::from_filename(&title);
            let mut tab = EditorTab::new(TabId::generate(), title, lang, content);
            tab.path = Some(path.clone());
            record(
                state,
                LogLevel::Info,
                format!("opened {} as {}", path.display(), lang.label()),
            );
            state.active_id = tab.id.clone();
            state.tabs.push(Tab::Editor(tab));
            vec![EditorEffect::RequestFrame]
        }
        UserAction::SelectTab(id) => {
            if state.tab(&id).is_none() {
                record(state, LogLevel::Warn, format!("select: no tab {id}"));
                return Vec::new();
            }
            state.active_id = id;
            vec![EditorEffect::RequestFrame]
        }
        UserAction::CloseTab(id) => close_tab(state, &id),
        UserAction::Edit(value) => {
            if apply_fresh_edit(state, value) {
                vec![EditorEffect::RequestFrame]
            } else {
                Vec::new()
            }
        }
        UserAction::Undo => {
            if state.toolbar().undo {
                return refuse(state, ToolbarAction::Undo);
            }
            step_history(state, HistoryStep::Undo);
            vec![EditorEffect::RequestFrame]
        }
        UserAction::Redo => {
            if state.toolbar().redo {
                return refuse(state, ToolbarAction::Redo);
            }
            step_history(state, HistoryStep::Redo);
            vec![EditorEffect::RequestFrame]
        }
        UserAction::Clear => {
            if state.toolbar().clear {
                return refuse(state, ToolbarAction::Clear);
            }
            apply_fresh_edit(state, String::new());
            vec![EditorEffect::RequestFrame]
        }
        UserAction::RunTransform(kind) => start_transform(state, kind),
        UserAction::OutputToEditor => {
            if state.toolbar().output_to_editor {
                return refuse(state, ToolbarAction::OutputToEditor);
            }
            let output = state.output.clone();
            apply_fresh_edit(state, output);
            vec![EditorEffect::RequestFrame]
        }
        UserAction::CopyOutput => {
            if state.toolbar().copy_output {
                return refuse(state, ToolbarAction::CopyOutput);
            }
            vec![EditorEffect::CopyToClipboard(state.output.clone())]
        }
        UserAction::CompareClipboard { clipboard } => {
            if state.toolbar().compare_clipboard {
                return refuse(state, ToolbarAction::CompareClipboard);
            }
            let Some(source) = state.action_target() else {
                return Vec::new();
            };
            let diff = DiffTab {
                id: TabId::generate(),
                title: format!("{} ↔ clipboard", source.title),
                lang: source.lang,
                source_editor_id: source.id.clone(),
                original_value: source.value.clone(),
                value: clipboard,
            };
            record(
                state,
                LogLevel::Debug,
                format!("diff {} against {}", diff.id, diff.source_editor_id),
            );
            state.active_id = diff.id.clone();
            state.tabs.push(Tab::Diff(diff));
            vec![EditorEffect::RequestFrame]
        }
        UserAction::SetLocale(locale) => {
            state.preferences.locale = locale;
            vec![
                EditorEffect::PersistPreference {
                    key: LOCALE_STORAGE_KEY,
                    value: locale.code(),
                },
                EditorEffect::RequestFrame,
            ]
        }
        UserAction::SetThemePreference(theme) => {
            state.preferences.theme = theme;
            vec![
                EditorEffect::PersistPreference {
                    key: THEME_STORAGE_KEY,
                    value: theme.label(),
                },
                EditorEffect::RequestFrame,
            ]
        }
        UserAction::CycleTheme => {
            let theme = state.preferences.theme.next();
            reduce_user(state, UserAction::SetThemePreference(theme))
        }
    }
}

fn reduce_runtime(state: &mut EditorState, action: RuntimeAction) {
    match action {
        RuntimeAction::TransformFinished {
            run_id,
            kind,
            report,
        } => {
            if !state.processing.active || state.processing.run_id != run_id {
                record(
                    state,
                    LogLevel::Debug,
                    format!("ignoring stale {} result for run {run_id}", kind.label()),
                );
                return;
            }
            state.processing.finish();

            let level = if report.ok {
                StatusLevel::Success
            } else {
                StatusLevel::Error
            };
            record(
                state,
                if report.ok { LogLevel::Info } else { LogLevel::Error },
                format!("{} finished: {}", kind.label(), report.message),
            );
            state.status = StatusLine {
                level,
                message: report.message.into(),
                line: report.line,
                column: report.column,
            };
            if report.ok && kind != TransformKind::Validate {
                if let Some(output) = report.output {
                    state.output = output;
                }
            }
        }
        RuntimeAction::FileSaved { id, path } => {
            let display = path.to_string_lossy().into_owned();
            let Some(tab) = state.editor_mut(&id) else {
                record(state, LogLevel::Warn, format!("saved file for non-editor tab {id}"));
                return;
            };
            tab.title = base_name(&display).to_string();
            tab.lang = Lang::from_filename(&tab.title);
            tab.path = Some(path);
            tab.dirty = false;
            record(state, LogLevel::Info, format!("saved {display}"));
        }
        RuntimeAction::SetOutput(output) => {
            state.output = output;
        }
        RuntimeAction::AppendLog(entry) => {
            state.logs.append(entry);
        }
        RuntimeAction::ClearLogs => {
            state.logs.clear();
        }
    }
}

fn start_transform(state: &mut EditorState, kind: TransformKind) -> Vec<EditorEffect> {
    let toolbar = state.toolbar();
    let (disabled, action) = match kind {
        TransformKind::Format => (toolbar.format, ToolbarAction::Format),
        TransformKind::Validate => (toolbar.validate, ToolbarAction::Validate),
        TransformKind::Compress => (toolbar.compress, ToolbarAction::Compress),
    };
    if disabled {
        return refuse(state, action);
    }

    let target = state
        .action_target()
        .map(|tab| (tab.lang, tab.value.clone()));
    let (lang, content) = match (kind, target) {
        (TransformKind::Compress, Some((lang, _))) if lang.supports_structured_ops() => {
            (lang, state.output.clone())
        }
        (TransformKind::Compress, _) => (Lang::sniff(&state.output), state.output.clone()),
        (_, Some(target)) => target,
        // Format and validate are disabled without a target.
        (_, None) => return Vec::new(),
    };

    let run_id = state.processing.start(kind);
    state.status = StatusLine::info(format!("Running {}…", kind.label()));
    record(
        state,
        LogLevel::Debug,
        format!("run {run_id}: {} {}", kind.label(), lang.label()),
    );
    vec![
        EditorEffect::RunTransform {
            run_id,
            kind,
            lang,
            content,
        },
        EditorEffect::RequestFrame,
    ]
}

fn close_tab(state: &mut EditorState, id: &TabId) -> Vec<EditorEffect> {
    let Some(index) = state.tabs.iter().position(|tab| tab.id() == id) else {
        record(state, LogLevel::Warn, format!("close: no tab {id}"));
        return Vec::new();
    };
    state.tabs.remove(index);

    if state.tabs.is_empty() {
        let blank = EditorTab::blank();
        state.active_id = blank.id.clone();
        state.tabs.push(Tab::Editor(blank));
    } else if &state.active_id == id {
        let neighbour = index.min(state.tabs.len() - 1);
        state.active_id = state.tabs[neighbour].id().clone();
    }
    record(state, LogLevel::Debug, format!("closed tab {id}"));
    vec![EditorEffect::RequestFrame]
}

/// Replaces the target's value as a new history entry. Redo history is
/// dropped; undo and redo themselves go through `step_history`.
fn apply_fresh_edit(state: &mut EditorState, value: String) -> bool {
    let limit = state.undo_limit;
    let Some(target_id) = state.action_target().map(|tab| tab.id.clone()) else {
        record(state, LogLevel::Debug, "edit without an action target".to_string());
        return false;
    };
    let Some(tab) = state.editor_mut(&target_id) else {
        return false;
    };
    if tab.value == value {
        return false;
    }

    let previous = std::mem::replace(&mut tab.value, value);
    push_bounded(&mut tab.undo_history, previous, limit);
    tab.redo_history.clear();
    tab.dirty = true;
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryStep {
    Undo,
    Redo,
}

fn step_history(state: &mut EditorState, step: HistoryStep) -> bool {
    let limit = state.undo_limit;
    let Some(target_id) = state.action_target().map(|tab| tab.id.clone()) else {
        return false;
    };
    let Some(tab) = state.editor_mut(&target_id) else {
        return false;
    };

    let (from, to) = match step {
        HistoryStep::Undo => (&mut tab.undo_history, &mut tab.redo_history),
        HistoryStep::Redo => (&mut tab.redo_history, &mut tab.undo_history),
    };
    let Some(restored) = from.pop() else {
        return false;
    };
    let current = std::mem::replace(&mut tab.value, restored);
    push_bounded(to, current, limit);
    tab.dirty = true;
    true
}

fn push_bounded(history: &mut Vec<String>, value: String, limit: usize) {
    history.push(value);
    if history.len() > limit {
        let overflow = history.len() - limit;
        history.drain(..overflow);
    }
}

fn refuse(state: &mut EditorState, action: ToolbarAction) -> Vec<EditorEffect> {
    record(
        state,
        LogLevel::Warn,
        format!("{} is not available right now", action.label()),
    );
    Vec::new()
}

fn record(state: &mut EditorState, level: LogLevel, message: String) {
    match level {
        LogLevel::Debug => tracing::debug!(active = %state.active_id, "{message}"),
        LogLevel::Info => tracing::info!(active = %state.active_id, "{message}"),
        LogLevel::Warn => tracing::warn!(active = %state.active_id, "{message}"),
        LogLevel::Error => tracing::error!(active = %state.active_id, "{message}"),
    }
    let mut entry = LogEntry::new(level, message);
    entry.ts_ms = Some(chrono::Utc::now().timestamp_millis());
    state.logs.append(entry);
}

#[cfg(test)]
mod tests;
