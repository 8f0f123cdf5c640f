use super::*;
use pretty_assertions::assert_eq;

fn append(state: &mut EditorState, message: &str) {
    run_runtime(
        state,
        RuntimeAction::AppendLog(LogEntry::new(LogLevel::Info, message)),
    );
}

fn messages(state: &EditorState) -> Vec<&str> {
    state.logs.iter().map(|entry| entry.message.as_str()).collect()
}

#[test]
fn host_entries_and_reducer_transitions_share_one_sequence() {
    let mut state = state_with("{}");
    state.logs = LogBuffer::new(10);

    append(&mut state, "host started");
    run_user(&mut state, UserAction::SelectTab(TabId::from("missing")));
    append(&mut state, "host idle");

    let seqs: Vec<u64> = state.logs.iter().map(|entry| entry.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3]);
    assert_eq!(
        messages(&state),
        vec!["host started", "select: no tab missing", "host idle"]
    );
}

#[test]
fn reducer_transitions_evict_oldest_host_entries() {
    let mut state = state_with("{}");
    state.logs = LogBuffer::new(2);
    append(&mut state, "host started");

    run_user(&mut state, UserAction::CopyOutput);
    run_user(&mut state, UserAction::Redo);

    assert_eq!(state.logs.len(), 2);
    assert!(!messages(&state).contains(&"host started"));
    assert!(state.logs.iter().all(|entry| entry.level == LogLevel::Warn));

    let seqs: Vec<u64> = state.logs.iter().map(|entry| entry.seq).collect();
    assert_eq!(seqs, vec![2, 3]);
}

#[test]
fn zero_capacity_buffer_keeps_nothing() {
    let mut state = state_with("{}");
    state.logs = LogBuffer::new(0);

    run_user(&mut state, UserAction::NewTab);
    append(&mut state, "dropped");

    assert!(state.logs.is_empty());
    assert_eq!(state.tabs.len(), 2, "reducer still applies the transition");
}

#[test]
fn clear_logs_restarts_numbering_for_reducer_entries() {
    let mut state = state_with("{}");
    append(&mut state, "1");
    append(&mut state, "2");
    run_runtime(&mut state, RuntimeAction::ClearLogs);
    run_user(&mut state, UserAction::NewTab);

    let seqs: Vec<u64> = state.logs.iter().map(|entry| entry.seq).collect();
    assert_eq!(seqs, vec![1]);
}

#[test]
fn reducer_transitions_are_recorded_with_timestamps() {
    let mut state = state_with("{}");
    state.logs = LogBuffer::new(10);
    run_user(&mut state, UserAction::NewTab);

    let entry = state.logs.iter().last().expect("entry recorded");
    assert_eq!(entry.level, LogLevel::Debug);
    assert!(entry.message.starts_with("new tab"));
    assert!(entry.ts_ms.is_some());
}
