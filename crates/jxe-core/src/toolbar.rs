//! Toolbar legality: one disabled flag per action, recomputed before every
//! render from the action target, the processing flag and the output buffer.
//!
//! `output_to_editor` and `copy_output` are not gated by processing, while
//! `clear` and `compress` are gated by it whether or not a target exists.

use serde::Serialize;

use super::state::Tab;
use super::state::TabId;
use super::tabs::resolve_action_target;

#[derive(Debug, Clone, Copy)]
pub struct ToolbarInput<'a> {
    pub tabs: &'a [Tab],
    pub active_id: &'a TabId,
    pub processing: bool,
    pub output: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarDisabled {
    pub format: bool,
    pub validate: bool,
    pub undo: bool,
    pub redo: bool,
    pub clear: bool,
    pub compress: bool,
    pub output_to_editor: bool,
    pub copy_output: bool,
    pub compare_clipboard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Format,
    Validate,
    Undo,
    Redo,
    Clear,
    Compress,
    OutputToEditor,
    CopyOutput,
    CompareClipboard,
}

impl ToolbarAction {
    pub const ALL: [ToolbarAction; 9] = [
        Self::Format,
        Self::Validate,
        Self::Undo,
        Self::Redo,
        Self::Clear,
        Self::Compress,
        Self::OutputToEditor,
        Self::CopyOutput,
        Self::CompareClipboard,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Validate => "validate",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Clear => "clear",
            Self::Compress => "compress",
            Self::OutputToEditor => "output-to-editor",
            Self::CopyOutput => "copy-output",
            Self::CompareClipboard => "compare-clipboard",
        }
    }
}

impl ToolbarDisabled {
    pub fn is_disabled(&self, action: ToolbarAction) -> bool {
        match action {
            ToolbarAction::Format => self.format,
            ToolbarAction::Validate => self.validate,
            ToolbarAction::Undo => self.undo,
            ToolbarAction::Redo => self.redo,
            ToolbarAction::Clear => self.clear,
            ToolbarAction::Compress => self.compress,
            ToolbarAction::OutputToEditor => self.output_to_editor,
            ToolbarAction::CopyOutput => self.copy_output,
            ToolbarAction::CompareClipboard => self.compare_clipboard,
        }
    }

    pub fn enabled_actions(&self) -> Vec<ToolbarAction> {
        ToolbarAction::ALL
            .into_iter()
            .filter(|action| !self.is_disabled(*action))
            .collect()
    }
}

pub fn derive_toolbar_disabled(input: &ToolbarInput<'_>) -> ToolbarDisabled {
    let target = resolve_action_target(input.tabs, input.active_id);
    let processing = input.processing;

    let has_target = target.is_some();
    let supports_structured_ops = target.is_some_and(|tab| tab.lang.supports_structured_ops());
    let has_undo = target.is_some_and(|tab| tab.has_undo());
    let has_redo = target.is_some_and(|tab| tab.has_redo());
    let has_editable_content = target.is_some_and(|tab| !tab.value.is_empty());
    let has_output = !input.output.is_empty();

    ToolbarDisabled {
        format: !supports_structured_ops || processing || !has_target,
        validate: !supports_structured_ops || processing || !has_target,
        undo: !has_undo || processing || !has_target,
        redo: !has_redo || processing || !has_target,
        clear: !has_editable_content || processing,
        compress: !has_output || processing,
        output_to_editor: !has_output || !has_target,
        copy_output: !has_output || !has_target,
        compare_clipboard: !has_target || processing,
    }
}
