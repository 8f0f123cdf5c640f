use std::path::PathBuf;

use super::preferences::Locale;
use super::preferences::ThemePreference;
use super::state::Lang;
use super::state::LogEntry;
use super::state::TabId;
use super::state::TransformKind;
use super::state::TransformReport;

#[derive(Debug, Clone)]
pub enum EditorAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone)]
pub enum UserAction {
    NewTab,
    OpenFile {
        path: PathBuf,
        content: String,
    },
    SelectTab(TabId),
    CloseTab(TabId),
    /// Replaces the action target's text.
    Edit(String),
    Undo,
    Redo,
    Clear,
    RunTransform(TransformKind),
    OutputToEditor,
    CopyOutput,
    CompareClipboard {
        clipboard: String,
    },
    SetLocale(Locale),
    SetThemePreference(ThemePreference),
    CycleTheme,
}

#[derive(Debug, Clone)]
pub enum RuntimeAction {
    TransformFinished {
        run_id: u64,
        kind: TransformKind,
        report: TransformReport,
    },
    FileSaved {
        id: TabId,
        path: PathBuf,
    },
    SetOutput(String),
    AppendLog(LogEntry),
    ClearLogs,
}

/// Work the host performs on behalf of the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEffect {
    RequestFrame,
    CopyToClipboard(String),
    RunTransform {
        run_id: u64,
        kind: TransformKind,
        lang: Lang,
        content: String,
    },
    PersistPreference {
        key: &'static str,
        value: &'static str,
    },
}
