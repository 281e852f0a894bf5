use std::sync::Once;

use tunedeck_core::{
    progress_view, update, AppState, Msg, Phase, ProgressStyle, QueueItem, Snapshot, TrackStatus,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn item(artist: &str, title: &str, status: TrackStatus) -> QueueItem {
    QueueItem {
        artist: artist.to_string(),
        title: title.to_string(),
        status,
    }
}

#[test]
fn snapshot_replaces_queue_wholesale() {
    init_logging();
    let first = Snapshot {
        items: vec![
            item("A", "T", TrackStatus::Downloading),
            item("B", "U", TrackStatus::Queued),
        ],
        percent_complete: 50,
        phase: Phase::Running,
    };
    let (state, effects) = update(AppState::new(), Msg::SnapshotReceived(first));
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.total, 2);
    assert_eq!(view.completed, 1);
    assert_eq!(view.progress.width_pct, 50);
    assert_eq!(view.progress.style, ProgressStyle::Active);

    // The next snapshot is smaller; nothing from the first one survives.
    let second = Snapshot {
        items: vec![item("C", "V", TrackStatus::Done)],
        percent_complete: 100,
        phase: Phase::Complete,
    };
    let (state, _) = update(state, Msg::SnapshotReceived(second));
    let view = state.view();
    assert_eq!(view.total, 1);
    assert_eq!(view.completed, 1);
    assert_eq!(view.rows[0].artist, "C");
    assert_eq!(view.progress.style, ProgressStyle::Settled);
}

#[test]
fn repeated_snapshot_renders_identically() {
    init_logging();
    let snapshot = Snapshot {
        items: vec![item("A", "T", TrackStatus::LinkFound)],
        percent_complete: 10,
        phase: Phase::Running,
    };
    let (state, _) = update(AppState::new(), Msg::SnapshotReceived(snapshot.clone()));
    let first_view = state.view();
    let (state, _) = update(state, Msg::SnapshotReceived(snapshot));
    assert_eq!(state.view(), first_view);
}

#[test]
fn completed_count_excludes_only_queued_and_link_found() {
    init_logging();
    let snapshot = Snapshot {
        items: vec![
            item("A", "T", TrackStatus::Queued),
            item("B", "U", TrackStatus::LinkFound),
            item("C", "V", TrackStatus::Downloading),
            item("D", "W", TrackStatus::Done),
            item("E", "X", TrackStatus::Error),
            item("F", "Y", TrackStatus::Other("Retrying".to_string())),
        ],
        percent_complete: 30,
        phase: Phase::Running,
    };
    let (state, _) = update(AppState::new(), Msg::SnapshotReceived(snapshot));
    let view = state.view();
    assert_eq!(view.total, 6);
    assert_eq!(view.completed, 4);
}

#[test]
fn initial_state_is_empty_idle() {
    init_logging();
    let view = AppState::new().view();
    assert_eq!(view.total, 0);
    assert_eq!(view.completed, 0);
    assert_eq!(view.progress.width_pct, 0);
    assert_eq!(view.progress.style, ProgressStyle::Info);
}

#[test]
fn progress_width_tracks_percent_exactly() {
    for percent in 0..=100u8 {
        assert_eq!(progress_view(percent, Phase::Running).width_pct, percent);
    }
    // Out-of-range input clamps.
    assert_eq!(progress_view(130, Phase::Running).width_pct, 100);
}

#[test]
fn each_phase_maps_to_exactly_one_style() {
    let mapping = [
        (Phase::Idle, ProgressStyle::Info),
        (Phase::Running, ProgressStyle::Active),
        (Phase::Stopped, ProgressStyle::Attention),
        (Phase::Complete, ProgressStyle::Settled),
    ];
    for (phase, style) in mapping {
        assert_eq!(progress_view(42, phase).style, style);
    }
}

#[test]
fn percent_reset_on_new_run_is_mirrored() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::SnapshotReceived(Snapshot {
            items: Vec::new(),
            percent_complete: 100,
            phase: Phase::Complete,
        }),
    );
    // A new run starts; the backend resets percent under Running.
    let (state, _) = update(
        state,
        Msg::SnapshotReceived(Snapshot {
            items: vec![item("A", "T", TrackStatus::Queued)],
            percent_complete: 0,
            phase: Phase::Running,
        }),
    );
    let view = state.view();
    assert_eq!(view.progress.width_pct, 0);
    assert_eq!(view.progress.style, ProgressStyle::Active);
}
