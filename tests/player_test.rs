use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use termym::player::{PlayerCommand, Window, build_argv, window_state};
use termym::yandex::{ApiError, MAX_ERRORS, retry};

fn transient_error() -> ApiError {
    ApiError::Api {
        name: "boom".to_string(),
        message: "synthetic failure".to_string(),
    }
}

#[test]
fn test_command_parse_long_and_short_forms() {
    assert_eq!(PlayerCommand::parse("s"), PlayerCommand::Skip);
    assert_eq!(PlayerCommand::parse("skip"), PlayerCommand::Skip);
    assert_eq!(PlayerCommand::parse("i"), PlayerCommand::ShowId);
    assert_eq!(PlayerCommand::parse("id"), PlayerCommand::ShowId);
    assert_eq!(PlayerCommand::parse("p"), PlayerCommand::Pause);
    assert_eq!(PlayerCommand::parse("pause"), PlayerCommand::Pause);
    assert_eq!(PlayerCommand::parse("l"), PlayerCommand::Like);
    assert_eq!(PlayerCommand::parse("like"), PlayerCommand::Like);
    assert_eq!(PlayerCommand::parse("t"), PlayerCommand::Text);
    assert_eq!(PlayerCommand::parse("text"), PlayerCommand::Text);
    assert_eq!(PlayerCommand::parse("k"), PlayerCommand::Link);
    assert_eq!(PlayerCommand::parse("link"), PlayerCommand::Link);
    assert_eq!(PlayerCommand::parse("m"), PlayerCommand::Dump);
    assert_eq!(PlayerCommand::parse("dump"), PlayerCommand::Dump);
    assert_eq!(PlayerCommand::parse("x"), PlayerCommand::Exit);
    assert_eq!(PlayerCommand::parse("exit"), PlayerCommand::Exit);
    assert_eq!(PlayerCommand::parse("h"), PlayerCommand::Help);
    assert_eq!(PlayerCommand::parse("help"), PlayerCommand::Help);
}

#[test]
fn test_command_parse_is_case_insensitive() {
    assert_eq!(PlayerCommand::parse("SKIP"), PlayerCommand::Skip);
    assert_eq!(PlayerCommand::parse("Like"), PlayerCommand::Like);
    assert_eq!(PlayerCommand::parse("X"), PlayerCommand::Exit);
}

#[test]
fn test_command_parse_takes_first_token() {
    assert_eq!(PlayerCommand::parse("skip the rest"), PlayerCommand::Skip);
    assert_eq!(PlayerCommand::parse("  pause  now"), PlayerCommand::Pause);
}

#[test]
fn test_command_parse_empty_and_unknown() {
    assert_eq!(PlayerCommand::parse(""), PlayerCommand::Nop);
    assert_eq!(PlayerCommand::parse("   "), PlayerCommand::Nop);
    assert_eq!(
        PlayerCommand::parse("frobnicate"),
        PlayerCommand::Unknown("frobnicate".to_string())
    );
}

#[test]
fn test_window_state_skip_and_count() {
    // skip=2, count=2 over five tracks: exactly positions 3 and 4 play
    let states: Vec<Window> = (1..=5).map(|pos| window_state(pos, 2, 2)).collect();
    assert_eq!(
        states,
        vec![
            Window::Skipped,
            Window::Skipped,
            Window::Play,
            Window::Play,
            Window::Done,
        ]
    );
}

#[test]
fn test_window_state_zero_count_plays_everything() {
    for position in 1..=100 {
        assert_eq!(window_state(position, 0, 0), Window::Play);
    }
}

#[test]
fn test_window_state_skip_only() {
    assert_eq!(window_state(1, 3, 0), Window::Skipped);
    assert_eq!(window_state(3, 3, 0), Window::Skipped);
    assert_eq!(window_state(4, 3, 0), Window::Play);
}

#[tokio::test(start_paused = true)]
async fn test_retry_gives_up_after_max_errors() {
    let calls = AtomicUsize::new(0);

    let result: Result<(), ApiError> = retry(|| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(transient_error()) }
    })
    .await;

    // The failing operation runs exactly MAX_ERRORS times, never more
    assert_eq!(calls.load(Ordering::SeqCst), MAX_ERRORS);
    assert!(matches!(result, Err(ApiError::Api { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_retry_returns_first_success() {
    let calls = AtomicUsize::new(0);

    let result = retry(|| {
        let attempt = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt == 0 {
                Err(transient_error())
            } else {
                Ok(7)
            }
        }
    })
    .await;

    assert_eq!(result.ok(), Some(7));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_retry_does_not_retry_unauthorized() {
    let calls = AtomicUsize::new(0);

    let result: Result<(), ApiError> = retry(|| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(ApiError::Unauthorized("bad token".to_string())) }
    })
    .await;

    // Rejected credentials are terminal: one attempt only
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(result, Err(ApiError::Unauthorized(_))));
}

#[test]
fn test_build_argv_substitutes_slot() {
    let template = vec![
        "vlc".to_string(),
        "-I".to_string(),
        "dummy".to_string(),
        "{}".to_string(),
    ];
    let argv = build_argv(&template, Path::new("/cache/artist/album/track.mp3"), false)
        .expect("argv");

    assert_eq!(argv.program, "vlc");
    assert_eq!(
        argv.args,
        vec!["-I", "dummy", "/cache/artist/album/track.mp3"]
    );
    assert_eq!(argv.workdir, None);
}

#[test]
fn test_build_argv_appends_path_without_slot() {
    let template = vec!["mpv".to_string(), "--no-video".to_string()];
    let argv = build_argv(&template, Path::new("/tmp/track.mp3"), false).expect("argv");

    assert_eq!(argv.args, vec!["--no-video", "/tmp/track.mp3"]);
}

#[test]
fn test_build_argv_relative_shortens_path() {
    let template = vec!["vlc".to_string(), "{}".to_string()];
    let argv = build_argv(
        &template,
        Path::new("/cache/artist/album/track.mp3"),
        true,
    )
    .expect("argv");

    assert_eq!(argv.workdir, Some(PathBuf::from("/cache/artist/album")));
    assert_eq!(argv.args, vec!["track.mp3"]);
}

#[test]
fn test_build_argv_rejects_empty_template() {
    assert!(build_argv(&[], Path::new("/tmp/track.mp3"), false).is_err());
}
