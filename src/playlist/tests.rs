use std::path::PathBuf;
use std::time::Duration;

use super::testing::{RecordingSink, SinkCall, SinkOp, track};
use super::*;

fn session_with(names: &[&str], sink: RecordingSink) -> PlaylistSession<RecordingSink> {
    let mut session = PlaylistSession::new(sink);
    for name in names {
        session.append(track(name));
    }
    session
}

fn load_of(name: &str) -> SinkCall {
    SinkCall::Load(PathBuf::from("/music").join(format!("{name}.mp3")))
}

#[test]
fn first_append_initialises_the_cursor_once() {
    let mut session = PlaylistSession::new(RecordingSink::default());
    assert_eq!(session.cursor(), None);
    assert_eq!(session.current_track_name(), None);

    session.append(track("a"));
    assert_eq!(session.cursor(), Some(0));

    session.append(track("b"));
    assert_eq!(session.cursor(), Some(0));
    assert_eq!(session.current_track_name(), Some("a"));
}

#[test]
fn appends_after_a_selection_do_not_move_the_cursor() {
    let mut session = session_with(&["a", "b"], RecordingSink::default());
    session.select_by_display_index(1).unwrap();
    session.append(track("c"));
    assert_eq!(session.cursor(), Some(1));
}

#[test]
fn toggle_cycles_through_play_pause_resume_then_stop() {
    let mut session = session_with(&["a"], RecordingSink::default());
    assert_eq!(session.state(), PlaybackState::Stopped);

    assert_eq!(session.toggle_play_pause().unwrap(), PlaybackState::Playing);
    assert!(session.is_playing());

    assert_eq!(session.toggle_play_pause().unwrap(), PlaybackState::Paused);
    assert!(session.is_paused());

    assert_eq!(session.toggle_play_pause().unwrap(), PlaybackState::Playing);

    session.stop().unwrap();
    assert_eq!(session.state(), PlaybackState::Stopped);

    assert_eq!(
        session.sink().calls,
        vec![
            load_of("a"),
            SinkCall::Play,
            SinkCall::Pause,
            SinkCall::Resume,
            SinkCall::Stop,
        ]
    );
}

#[test]
fn toggle_without_a_current_track_reports_and_stays_stopped() {
    let mut controller = PlaybackController::new(RecordingSink::default());
    let err = controller.toggle_play(None).unwrap_err();
    assert!(matches!(err, PlaylistError::NoTrackSelected));
    assert_eq!(controller.state(), PlaybackState::Stopped);
    assert!(controller.sink().calls.is_empty());
}

#[test]
fn stop_while_stopped_is_a_no_op() {
    let mut session = session_with(&["a"], RecordingSink::default());
    session.stop().unwrap();
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert!(session.sink().calls.is_empty());
}

#[test]
fn select_stops_playback_and_moves_the_cursor() {
    let mut session = session_with(&["a", "b", "c"], RecordingSink::default());
    session.toggle_play_pause().unwrap();

    let pos = session.select_by_display_index(2).unwrap();
    assert_eq!(pos, 2);
    assert_eq!(session.current_track_name(), Some("c"));
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(session.sink().calls.last(), Some(&SinkCall::Stop));
}

#[test]
fn select_wraps_indices_past_the_end() {
    let mut session = session_with(&["a", "b", "c"], RecordingSink::default());
    assert_eq!(session.select_by_display_index(4).unwrap(), 1);
    assert_eq!(session.current_track_name(), Some("b"));
}

#[test]
fn advance_forward_keeps_playing_on_the_next_track() {
    let mut session = session_with(&["a", "b", "c"], RecordingSink::default());
    session.select_by_display_index(1).unwrap();
    session.toggle_play_pause().unwrap();
    assert!(session.is_playing());

    let pos = session.advance(Direction::Forward).unwrap();
    assert_eq!(pos, 2);
    assert_eq!(session.current_track_name(), Some("c"));
    assert_eq!(session.state(), PlaybackState::Playing);

    let tail = &session.sink().calls[session.sink().calls.len() - 3..];
    assert_eq!(tail, &[SinkCall::Stop, load_of("c"), SinkCall::Play]);
}

#[test]
fn advance_wraps_in_both_directions() {
    let mut session = session_with(&["a", "b", "c"], RecordingSink::default());
    assert_eq!(session.advance(Direction::Backward).unwrap(), 2);
    assert_eq!(session.current_track_name(), Some("c"));
    assert_eq!(session.advance(Direction::Forward).unwrap(), 0);
    assert_eq!(session.current_track_name(), Some("a"));
}

#[test]
fn advance_from_paused_starts_playing() {
    let mut session = session_with(&["a", "b"], RecordingSink::default());
    session.toggle_play_pause().unwrap();
    session.toggle_play_pause().unwrap();
    assert!(session.is_paused());

    session.advance(Direction::Forward).unwrap();
    assert!(session.is_playing());
    assert_eq!(session.current_track_name(), Some("b"));
}

#[test]
fn single_track_advance_replays_itself() {
    let mut session = session_with(&["solo"], RecordingSink::default());
    assert_eq!(session.advance(Direction::Forward).unwrap(), 0);
    assert_eq!(session.advance(Direction::Backward).unwrap(), 0);
    assert!(session.is_playing());
}

#[test]
fn seek_back_clamps_to_the_start_of_the_track() {
    let mut session = session_with(&["a"], RecordingSink::at(Duration::from_secs(5)));
    session.toggle_play_pause().unwrap();

    let target = session.seek_relative(-1000.0).unwrap();
    assert_eq!(target, Some(Duration::ZERO));
    assert_eq!(
        session.sink().calls.last(),
        Some(&SinkCall::PlayFrom(Duration::ZERO))
    );
    assert!(session.is_playing());
}

#[test]
fn seek_forward_is_relative_to_the_sink_position() {
    let mut session = session_with(&["a"], RecordingSink::at(Duration::from_secs(42)));
    session.toggle_play_pause().unwrap();
    session.toggle_play_pause().unwrap();

    let target = session.seek_relative(10.0).unwrap();
    assert_eq!(target, Some(Duration::from_secs(52)));
    assert!(session.is_paused());
    assert_eq!(session.position(), Duration::from_secs(52));
}

#[test]
fn seek_while_stopped_does_nothing() {
    let mut session = session_with(&["a"], RecordingSink::at(Duration::from_secs(5)));
    assert_eq!(session.seek_relative(10.0).unwrap(), None);
    assert!(session.sink().calls.is_empty());
}

#[test]
fn empty_playlist_rejects_transport_without_touching_the_sink() {
    let mut session = PlaylistSession::new(RecordingSink::default());

    assert!(matches!(
        session.advance(Direction::Forward),
        Err(PlaylistError::EmptyCollection)
    ));
    assert!(matches!(
        session.advance(Direction::Backward),
        Err(PlaylistError::EmptyCollection)
    ));
    assert!(matches!(
        session.toggle_play_pause(),
        Err(PlaylistError::EmptyCollection)
    ));
    assert!(matches!(
        session.select_by_display_index(0),
        Err(PlaylistError::EmptyCollection)
    ));
    assert!(matches!(
        session.seek_relative(-10.0),
        Err(PlaylistError::EmptyCollection)
    ));
    session.stop().unwrap();

    assert!(session.sink().calls.is_empty());
    assert_eq!(session.state(), PlaybackState::Stopped);
}

#[test]
fn sink_failure_on_start_leaves_the_player_stopped() {
    let mut session = session_with(&["broken"], RecordingSink::failing(SinkOp::Load));

    let err = session.toggle_play_pause().unwrap_err();
    assert!(matches!(err, PlaylistError::Sink(SinkError::Decode { .. })));
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(session.sink().calls.last(), Some(&SinkCall::Stop));
}

#[test]
fn finished_track_advances_when_enabled() {
    let sink = RecordingSink {
        finished: true,
        ..RecordingSink::default()
    };
    let mut session = session_with(&["a", "b"], sink);

    assert_eq!(session.poll_end_of_track(true).unwrap(), None);

    session.toggle_play_pause().unwrap();
    assert_eq!(session.poll_end_of_track(true).unwrap(), Some(1));
    assert_eq!(session.current_track_name(), Some("b"));
    assert!(session.is_playing());
}

#[test]
fn finished_track_stops_when_auto_advance_is_off() {
    let sink = RecordingSink {
        finished: true,
        ..RecordingSink::default()
    };
    let mut session = session_with(&["a", "b"], sink);
    session.toggle_play_pause().unwrap();

    assert_eq!(session.poll_end_of_track(false).unwrap(), None);
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(session.current_track_name(), Some("a"));
}

#[test]
fn pause_failure_while_playing_drops_to_stopped() {
    let mut session = session_with(&["a"], RecordingSink::failing(SinkOp::Pause));
    session.toggle_play_pause().unwrap();
    assert!(session.is_playing());

    let err = session.toggle_play_pause().unwrap_err();
    assert!(matches!(err, PlaylistError::Sink(SinkError::Device(_))));
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(
        session.sink().calls[2..],
        [SinkCall::Pause, SinkCall::Stop]
    );
}

#[test]
fn resume_failure_while_paused_drops_to_stopped() {
    let mut session = session_with(&["a"], RecordingSink::failing(SinkOp::Resume));
    session.toggle_play_pause().unwrap();
    session.toggle_play_pause().unwrap();
    assert!(session.is_paused());

    assert!(matches!(
        session.toggle_play_pause(),
        Err(PlaylistError::Sink(_))
    ));
    assert_eq!(session.state(), PlaybackState::Stopped);
}

#[test]
fn seek_failure_while_playing_drops_to_stopped() {
    let mut session = session_with(&["a"], RecordingSink::failing(SinkOp::PlayFrom));
    session.toggle_play_pause().unwrap();

    let err = session.seek_relative(10.0).unwrap_err();
    assert!(matches!(err, PlaylistError::Sink(_)));
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(session.sink().calls.last(), Some(&SinkCall::Stop));

    // Stopped now, so a retry is a quiet no-op.
    assert_eq!(session.seek_relative(10.0).unwrap(), None);
}

#[test]
fn huge_forward_seek_keeps_moving_forward() {
    let mut session = session_with(&["a"], RecordingSink::at(Duration::from_secs(5)));
    session.toggle_play_pause().unwrap();

    let target = session.seek_relative(u64::MAX as f64).unwrap();
    assert_eq!(target, Some(Duration::MAX));
    assert_eq!(
        session.sink().calls.last(),
        Some(&SinkCall::PlayFrom(Duration::MAX))
    );
}

#[test]
fn failed_stop_on_select_still_moves_the_cursor() {
    let mut session = session_with(&["a", "b", "c"], RecordingSink::failing(SinkOp::Stop));
    session.toggle_play_pause().unwrap();

    let err = session.select_by_display_index(2).unwrap_err();
    assert!(matches!(err, PlaylistError::Sink(_)));
    assert_eq!(session.cursor(), Some(2));
    assert_eq!(session.current_track_name(), Some("c"));
    assert_eq!(session.state(), PlaybackState::Stopped);
}

#[test]
fn failed_stop_on_advance_moves_the_cursor_without_playing() {
    let mut session = session_with(&["a", "b"], RecordingSink::failing(SinkOp::Stop));
    session.toggle_play_pause().unwrap();

    assert!(session.advance(Direction::Forward).is_err());
    assert_eq!(session.cursor(), Some(1));
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(session.sink().calls.last(), Some(&SinkCall::Stop));
}
