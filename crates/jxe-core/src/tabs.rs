//! Read-only lookups over a tab collection.
//!
//! Diff tabs never receive editing actions themselves; every action is
//! redirected to the editor the diff was created from, re-resolved by id on
//! each call so a closed source simply resolves to nothing.

use super::state::EditorTab;
use super::state::Tab;
use super::state::TabId;

/// Tab whose id equals `active_id`, falling back to the first tab.
///
/// # Panics
///
/// Panics when `tabs` is empty. The host always keeps at least one tab open.
pub fn resolve_active_tab<'a>(tabs: &'a [Tab], active_id: &TabId) -> &'a Tab {
    assert!(
        !tabs.is_empty(),
        "resolve_active_tab requires a non-empty tab collection"
    );
    tabs.iter()
        .find(|tab| tab.id() == active_id)
        .unwrap_or(&tabs[0])
}

pub fn resolve_active_editor<'a>(tabs: &'a [Tab], active_id: &TabId) -> Option<&'a EditorTab> {
    resolve_active_tab(tabs, active_id).as_editor()
}

/// Live source editor of the active diff tab, if any.
pub fn resolve_diff_source<'a>(tabs: &'a [Tab], active_id: &TabId) -> Option<&'a EditorTab> {
    let Tab::Diff(diff) = resolve_active_tab(tabs, active_id) else {
        return None;
    };
    tabs.iter()
        .find(|candidate| candidate.id() == &diff.source_editor_id)
        .and_then(Tab::as_editor)
}

/// The editor that toolbar actions operate on.
pub fn resolve_action_target<'a>(tabs: &'a [Tab], active_id: &TabId) -> Option<&'a EditorTab> {
    resolve_active_editor(tabs, active_id).or_else(|| resolve_diff_source(tabs, active_id))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::state::DiffTab;
    use crate::state::Lang;

    fn editor(id: &str, lang: Lang, value: &str) -> Tab {
        Tab::Editor(EditorTab::new(TabId::from(id), id, lang, value))
    }

    fn diff(id: &str, source: &str) -> Tab {
        Tab::Diff(DiffTab {
            id: TabId::from(id),
            title: "Diff".to_string(),
            lang: Lang::Json,
            source_editor_id: TabId::from(source),
            original_value: "{}".to_string(),
            value: "{\"x\":1}".to_string(),
        })
    }

    fn ids(tab: Option<&EditorTab>) -> Option<&str> {
        tab.map(|tab| tab.id.as_str())
    }

    #[test]
    fn active_tab_falls_back_to_first_for_unknown_id() {
        let tabs = vec![
            editor("editor-a", Lang::Json, "{}"),
            editor("editor-b", Lang::Xml, "<a/>"),
        ];
        let tab = resolve_active_tab(&tabs, &TabId::from("unknown"));
        assert_eq!(tab.id().as_str(), "editor-a");
    }

    #[test]
    fn active_tab_matches_by_id() {
        let tabs = vec![
            editor("editor-a", Lang::Json, "{}"),
            editor("editor-b", Lang::Xml, "<a/>"),
        ];
        let tab = resolve_active_tab(&tabs, &TabId::from("editor-b"));
        assert_eq!(tab.id().as_str(), "editor-b");
    }

    #[test]
    #[should_panic(expected = "non-empty tab collection")]
    fn active_tab_on_empty_collection_is_a_caller_error() {
        resolve_active_tab(&[], &TabId::from("anything"));
    }

    #[test]
    fn active_editor_is_none_on_diff_tabs() {
        let tabs = vec![editor("editor-a", Lang::Json, "{}"), diff("diff-1", "editor-a")];
        assert_eq!(resolve_active_editor(&tabs, &TabId::from("diff-1")), None);
    }

    #[test]
    fn diff_source_resolves_linked_editor() {
        let tabs = vec![
            editor("editor-a", Lang::Json, "{}"),
            editor("editor-b", Lang::Xml, "<a/>"),
            diff("diff-1", "editor-b"),
        ];
        let source = resolve_diff_source(&tabs, &TabId::from("diff-1"));
        assert_eq!(ids(source), Some("editor-b"));
    }

    #[test]
    fn diff_source_is_none_for_editor_tabs() {
        let tabs = vec![editor("editor-a", Lang::Json, "{}")];
        assert_eq!(resolve_diff_source(&tabs, &TabId::from("editor-a")), None);
    }

    #[test]
    fn dangling_source_resolves_to_nothing() {
        let tabs = vec![editor("editor-a", Lang::Json, "{}"), diff("diff-1", "closed")];
        let active = TabId::from("diff-1");
        assert_eq!(resolve_diff_source(&tabs, &active), None);
        assert_eq!(resolve_action_target(&tabs, &active), None);
    }

    #[test]
    fn diff_pointing_at_diff_degrades_to_nothing() {
        let tabs = vec![
            editor("editor-a", Lang::Json, "{}"),
            diff("diff-1", "editor-a"),
            diff("diff-2", "diff-1"),
        ];
        assert_eq!(resolve_action_target(&tabs, &TabId::from("diff-2")), None);
    }

    #[test]
    fn action_target_redirects_diff_to_source() {
        let tabs = vec![
            editor("editor-a", Lang::Json, "{}"),
            editor("editor-b", Lang::Xml, "<a/>"),
            diff("diff-2", "editor-a"),
        ];
        let via_diff = resolve_action_target(&tabs, &TabId::from("diff-2"));
        let direct = resolve_action_target(&tabs, &TabId::from("editor-a"));
        assert_eq!(ids(via_diff), Some("editor-a"));
        assert_eq!(via_diff, direct);
    }

    #[test]
    fn redirection_is_transparent_for_every_source() {
        let mut tabs = vec![
            editor("editor-a", Lang::Json, "{}"),
            editor("editor-b", Lang::Xml, "<a/>"),
            editor("editor-c", Lang::Plaintext, "hi"),
        ];
        for source in ["editor-a", "editor-b", "editor-c"] {
            tabs.push(diff(&format!("diff-{source}"), source));
        }

        for source in ["editor-a", "editor-b", "editor-c"] {
            let via_diff = resolve_action_target(&tabs, &TabId::new(format!("diff-{source}")));
            let direct = resolve_action_target(&tabs, &TabId::from(source));
            assert_eq!(via_diff, direct);
        }
    }
}
