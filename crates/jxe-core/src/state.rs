use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::preferences::Locale;
use super::preferences::ThemePreference;
use super::tabs::resolve_action_target;
use super::toolbar::derive_toolbar_disabled;
use super::toolbar::ToolbarDisabled;
use super::toolbar::ToolbarInput;

pub const DEFAULT_UNDO_LIMIT: usize = 100;
pub const DEFAULT_LOG_CAPACITY: usize = 2_000;
pub const UNTITLED_TITLE: &str = "untitled.json";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh identifier for a tab the host is about to create.
    pub fn generate() -> Self {
        Self(format!("tab-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Json,
    Xml,
    Plaintext,
}

impl Lang {
    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Plaintext => "plaintext",
        }
    }

    /// Format and validate only exist for structured documents.
    pub fn supports_structured_ops(self) -> bool {
        matches!(self, Self::Json | Self::Xml)
    }

    /// Maps a file-type tag (`"json"`, `"xml"`, anything else) to a language.
    pub fn from_type(file_type: &str) -> Self {
        match file_type {
            "json" => Self::Json,
            "xml" => Self::Xml,
            _ => Self::Plaintext,
        }
    }

    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".json") {
            Self::Json
        } else if lower.ends_with(".xml") {
            Self::Xml
        } else {
            Self::Plaintext
        }
    }

    /// Best guess for content that arrived without a file name.
    pub fn sniff(content: &str) -> Self {
        let trimmed = content.trim_start();
        if trimmed.starts_with('<') {
            Self::Xml
        } else if trimmed.starts_with('{') || trimmed.starts_with('[') {
            Self::Json
        } else {
            Self::Plaintext
        }
    }
}

/// Final path segment, accepting both `/` and `\` separators.
pub fn base_name(path: &str) -> &str {
    let last = path
        .rsplit(|ch| ch == '/' || ch == '\\')
        .next()
        .unwrap_or(path);
    if last.is_empty() {
        path
    } else {
        last
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    pub fn from_user_agent(source: &str) -> Self {
        let lower = source.to_lowercase();
        if lower.contains("mac") {
            Self::MacOs
        } else if lower.contains("win") {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorTab {
    pub id: TabId,
    pub title: String,
    pub lang: Lang,
    pub path: Option<PathBuf>,
    pub value: String,
    pub dirty: bool,
    /// Chronological; the last element is the most recent prior value.
    pub undo_history: Vec<String>,
    pub redo_history: Vec<String>,
}

impl EditorTab {
    pub fn new(id: TabId, title: impl Into<String>, lang: Lang, value: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            lang,
            path: None,
            value: value.into(),
            dirty: false,
            undo_history: Vec::new(),
            redo_history: Vec::new(),
        }
    }

    pub fn blank() -> Self {
        Self::new(TabId::generate(), UNTITLED_TITLE, Lang::Json, String::new())
    }

    pub fn has_undo(&self) -> bool {
        !self.undo_history.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.redo_history.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTab {
    pub id: TabId,
    pub title: String,
    pub lang: Lang,
    /// Lookup key only. The editor may have been closed since.
    pub source_editor_id: TabId,
    pub original_value: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    Editor,
    Diff,
}

impl TabKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Diff => "diff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tab {
    Editor(EditorTab),
    Diff(DiffTab),
}

impl Tab {
    pub fn id(&self) -> &TabId {
        match self {
            Self::Editor(tab) => &tab.id,
            Self::Diff(tab) => &tab.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Editor(tab) => &tab.title,
            Self::Diff(tab) => &tab.title,
        }
    }

    pub fn lang(&self) -> Lang {
        match self {
            Self::Editor(tab) => tab.lang,
            Self::Diff(tab) => tab.lang,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Editor(tab) => &tab.value,
            Self::Diff(tab) => &tab.value,
        }
    }

    pub fn kind(&self) -> TabKind {
        match self {
            Self::Editor(_) => TabKind::Editor,
            Self::Diff(_) => TabKind::Diff,
        }
    }

    pub fn as_editor(&self) -> Option<&EditorTab> {
        match self {
            Self::Editor(tab) => Some(tab),
            Self::Diff(_) => None,
        }
    }

    pub fn as_editor_mut(&mut self) -> Option<&mut EditorTab> {
        match self {
            Self::Editor(tab) => Some(tab),
            Self::Diff(_) => None,
        }
    }
}

impl From<EditorTab> for Tab {
    fn from(tab: EditorTab) -> Self {
        Self::Editor(tab)
    }
}

impl From<DiffTab> for Tab {
    fn from(tab: DiffTab) -> Self {
        Self::Diff(tab)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Format,
    Validate,
    Compress,
}

impl TransformKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Validate => "validate",
            Self::Compress => "compress",
        }
    }
}

/// What a transform run reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
    pub ok: bool,
    pub message: String,
    pub output: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingState {
    pub active: bool,
    pub run_id: u64,
    pub kind: Option<TransformKind>,
    pub next_run_id: u64,
}

impl ProcessingState {
    pub fn start(&mut self, kind: TransformKind) -> u64 {
        self.next_run_id = self.next_run_id.saturating_add(1);
        self.active = true;
        self.run_id = self.next_run_id;
        self.kind = Some(kind);
        self.run_id
    }

    pub fn finish(&mut self) {
        self.active = false;
        self.kind = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

impl StatusLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub level: StatusLevel,
    pub message: Arc<str>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl StatusLine {
    pub fn info(message: impl Into<Arc<str>>) -> Self {
        Self {
            level: StatusLevel::Info,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn ready() -> Self {
        Self::info("Ready.")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub locale: Locale,
    pub theme: ThemePreference,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            theme: ThemePreference::System,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub seq: u64,
    pub level: LogLevel,
    pub ts_ms: Option<i64>,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            seq: 0,
            level,
            ts_ms: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogBuffer {
    cap: usize,
    next_seq: u64,
    buf: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            next_seq: 1,
            buf: VecDeque::with_capacity(cap),
        }
    }

    pub fn append(&mut self, mut entry: LogEntry) {
        entry.seq = self.next_seq;
        self.next_seq += 1;

        if self.cap == 0 {
            return;
        }
        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.next_seq = 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.buf.iter()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Everything the host owns between renders.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub tabs: Vec<Tab>,
    pub active_id: TabId,
    pub processing: ProcessingState,
    pub output: String,
    pub status: StatusLine,
    pub preferences: Preferences,
    pub undo_limit: usize,
    pub logs: LogBuffer,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_UNDO_LIMIT, DEFAULT_LOG_CAPACITY)
    }

    pub fn with_limits(undo_limit: usize, log_capacity: usize) -> Self {
        let first = EditorTab::blank();
        Self {
            active_id: first.id.clone(),
            tabs: vec![Tab::Editor(first)],
            processing: ProcessingState::default(),
            output: String::new(),
            status: StatusLine::ready(),
            preferences: Preferences::default(),
            undo_limit,
            logs: LogBuffer::new(log_capacity),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing.active
    }

    pub fn tab(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id() == id)
    }

    pub fn editor_mut(&mut self, id: &TabId) -> Option<&mut EditorTab> {
        self.tabs
            .iter_mut()
            .find(|tab| tab.id() == id)
            .and_then(Tab::as_editor_mut)
    }

    pub fn action_target(&self) -> Option<&EditorTab> {
        resolve_action_target(&self.tabs, &self.active_id)
    }

    pub fn toolbar(&self) -> ToolbarDisabled {
        derive_toolbar_disabled(&ToolbarInput {
            tabs: &self.tabs,
            active_id: &self.active_id,
            processing: self.processing.active,
            output: &self.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn base_name_handles_both_separators() {
        assert_eq!(base_name("/a/b/c.json"), "c.json");
        assert_eq!(base_name("C:\\a\\b\\c.xml"), "c.xml");
        assert_eq!(base_name("plain.txt"), "plain.txt");
        assert_eq!(base_name("dir/"), "dir/");
    }

    #[test]
    fn lang_inference_from_type_and_filename() {
        assert_eq!(Lang::from_type("json"), Lang::Json);
        assert_eq!(Lang::from_type("xml"), Lang::Xml);
        assert_eq!(Lang::from_type("other"), Lang::Plaintext);

        assert_eq!(Lang::from_filename("file.json"), Lang::Json);
        assert_eq!(Lang::from_filename("file.XML"), Lang::Xml);
        assert_eq!(Lang::from_filename("file.txt"), Lang::Plaintext);
    }

    #[test]
    fn sniff_recognizes_markup_and_objects() {
        assert_eq!(Lang::sniff("  <a/>"), Lang::Xml);
        assert_eq!(Lang::sniff("\n[1, 2]"), Lang::Json);
        assert_eq!(Lang::sniff("hello"), Lang::Plaintext);
    }

    #[test]
    fn platform_from_user_agent() {
        assert_eq!(Platform::from_user_agent("MacIntel Test"), Platform::MacOs);
        assert_eq!(Platform::from_user_agent("Win32 Test"), Platform::Windows);
        assert_eq!(Platform::from_user_agent("X11 Linux"), Platform::Linux);
    }

    #[test]
    fn generated_tab_ids_are_unique_and_non_empty() {
        let a = TabId::generate();
        let b = TabId::generate();
        assert!(!a.as_str().is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn new_state_starts_with_one_blank_active_editor() {
        let state = EditorState::new();
        assert_eq!(state.tabs.len(), 1);
        assert_eq!(state.tabs[0].id(), &state.active_id);
        assert_eq!(state.tabs[0].title(), UNTITLED_TITLE);
        assert_eq!(state.tabs[0].kind(), TabKind::Editor);
        assert!(!state.is_processing());
    }

    #[test]
    fn log_buffer_evicts_oldest_first() {
        let mut logs = LogBuffer::new(2);
        for message in ["1", "2", "3"] {
            logs.append(LogEntry::new(LogLevel::Info, message));
        }
        let seqs: Vec<u64> = logs.iter().map(|entry| entry.seq).collect();
        assert_eq!(seqs, vec![2, 3]);
    }
}
