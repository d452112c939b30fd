// Unit tests for domain models

use super::*;

#[test]
fn test_audio_options_builder() {
    let options = AudioOptions::new(10.0).with_fade(1.5).with_volume(0.4);
    assert_eq!(options.duration, 10.0);
    assert_eq!(options.fade_duration, Some(1.5));
    assert_eq!(options.volume, Some(0.4));
}

#[test]
fn test_ambient_options_resolution() {
    let options = AmbientOptions {
        duration: None,
        fade_duration: Some(1.0),
        volume: None,
    };
    let resolved = options.with_duration(42.5);
    assert_eq!(resolved.duration, 42.5);
    assert_eq!(resolved.fade_duration, Some(1.0));
    assert_eq!(resolved.volume, None);
}

#[test]
fn test_invocation_display_quotes_spaces() {
    let invocation = ProcessInvocation::new("ffmpeg")
        .args(["-i", "my clip.mp4"])
        .arg("-y");
    assert_eq!(invocation.display_command(), "ffmpeg -i \"my clip.mp4\" -y");
    assert!(!invocation.capture_stdout);
}

#[test]
fn test_run_result_success() {
    let ok = RunResult {
        exit_code: Some(0),
        ..Default::default()
    };
    assert!(ok.success());

    let failed = RunResult {
        exit_code: Some(1),
        ..Default::default()
    };
    assert!(!failed.success());

    let killed = RunResult::default();
    assert!(!killed.success());
}

#[tokio::test]
async fn test_cancel_signal_fires() {
    let (handle, mut signal) = cancel_pair();
    assert!(!signal.is_cancelled());

    handle.cancel();
    tokio::time::timeout(Duration::from_secs(1), signal.cancelled())
        .await
        .expect("signal should resolve after cancel");
    assert!(signal.is_cancelled());
}

#[tokio::test]
async fn test_never_signal_pends() {
    let mut signal = CancelSignal::never();
    let waited = tokio::time::timeout(Duration::from_millis(50), signal.cancelled()).await;
    assert!(waited.is_err());
}

#[test]
fn test_path_arg_never_looks_like_an_option() {
    let invocation = ProcessInvocation::new("ffmpeg")
        .path_arg(Path::new("-out.mp4"))
        .path_arg(Path::new("clips/-take2.mp4"))
        .path_arg(Path::new("/tmp/-abs.mp4"))
        .path_arg(Path::new("plain.mp4"));
    assert_eq!(
        invocation.args,
        ["./-out.mp4", "clips/-take2.mp4", "/tmp/-abs.mp4", "plain.mp4"]
    );
}
