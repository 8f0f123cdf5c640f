use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use jxe_core::actions::EditorAction;
use jxe_core::actions::EditorEffect;
use jxe_core::actions::RuntimeAction;
use jxe_core::actions::UserAction;
use jxe_core::config::Config;
use jxe_core::config::UiConfig;
use jxe_core::preferences::detect_initial_locale;
use jxe_core::preferences::detect_initial_theme_preference;
use jxe_core::preferences::PreferenceStore;
use jxe_core::reducer::reduce;
use jxe_core::state::EditorState;
use jxe_core::state::TabId;
use jxe_exec::contracts::TransformRequest;
use jxe_exec::executor::Transformer;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to read {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Save { path: PathBuf, source: io::Error },

    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("no editor tab to act on")]
    NoTarget,
}

pub trait ClipboardAccess {
    fn read_text(&mut self) -> Result<String, SessionError>;
    fn write_text(&mut self, text: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardAccess for SystemClipboard {
    fn read_text(&mut self) -> Result<String, SessionError> {
        Ok(arboard::Clipboard::new()?.get_text()?)
    }

    fn write_text(&mut self, text: &str) -> Result<(), SessionError> {
        arboard::Clipboard::new()?.set_text(text.to_string())?;
        Ok(())
    }
}

/// Owns the editor state and performs the effects the reducer asks for.
pub struct Session<T, C> {
    pub state: EditorState,
    pub preferences: UiConfig,
    preferences_changed: bool,
    transformer: T,
    clipboard: C,
}

impl<T: Transformer, C: ClipboardAccess> Session<T, C> {
    pub fn new(config: &Config, transformer: T, clipboard: C) -> Self {
        let mut state =
            EditorState::with_limits(config.editor.undo_limit, config.editor.log_capacity);
        state.preferences.locale = detect_initial_locale(&config.ui);
        state.preferences.theme = detect_initial_theme_preference(&config.ui);
        Self {
            state,
            preferences: config.ui.clone(),
            preferences_changed: false,
            transformer,
            clipboard,
        }
    }

    pub fn dispatch(&mut self, action: UserAction) -> Result<(), SessionError> {
        self.apply(EditorAction::User(action))
    }

    fn apply(&mut self, action: EditorAction) -> Result<(), SessionError> {
        let mut pending: VecDeque<EditorEffect> = reduce(&mut self.state, action).into();
        while let Some(effect) = pending.pop_front() {
            match effect {
                EditorEffect::RequestFrame => {}
                EditorEffect::CopyToClipboard(text) => self.clipboard.write_text(&text)?,
                EditorEffect::RunTransform {
                    run_id,
                    kind,
                    lang,
                    content,
                } => {
                    let request = TransformRequest {
                        run_id,
                        kind,
                        lang,
                        content,
                    };
                    let report = self.transformer.run(&request).into();
                    pending.extend(reduce(
                        &mut self.state,
                        EditorAction::Runtime(RuntimeAction::TransformFinished {
                            run_id,
                            kind,
                            report,
                        }),
                    ));
                }
                EditorEffect::PersistPreference { key, value } => {
                    self.preferences.set(key, value);
                    self.preferences_changed = true;
                }
            }
        }
        Ok(())
    }

    pub fn open_file(&mut self, path: &Path) -> Result<TabId, SessionError> {
        let content = fs::read_to_string(path).map_err(|source| SessionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.dispatch(UserAction::OpenFile {
            path: path.to_path_buf(),
            content,
        })?;
        Ok(self.state.active_id.clone())
    }

    /// Writes the action target back to its path.
    pub fn save_target(&mut self) -> Result<PathBuf, SessionError> {
        let target = self.state.action_target().ok_or(SessionError::NoTarget)?;
        let Some(path) = target.path.clone() else {
            return Err(SessionError::NoTarget);
        };
        let id = target.id.clone();
        fs::write(&path, &target.value).map_err(|source| SessionError::Save {
            path: path.clone(),
            source,
        })?;
        self.apply(EditorAction::Runtime(RuntimeAction::FileSaved {
            id,
            path: path.clone(),
        }))?;
        Ok(path)
    }

    pub fn compare_clipboard(&mut self) -> Result<(), SessionError> {
        let clipboard = self.clipboard.read_text()?;
        self.dispatch(UserAction::CompareClipboard { clipboard })
    }

    /// `Some` with the updated `[ui]` table when a preference changed.
    pub fn changed_preferences(&self) -> Option<&UiConfig> {
        self.preferences_changed.then_some(&self.preferences)
    }
}
