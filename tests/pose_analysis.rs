use vb_capture::ReplaySource;
use vb_config::GameConfig;
use vb_gesture::GestureClassifier;
use volley_block::analyze;

#[test]
fn sample_recording_analysis() {
    let mut source = ReplaySource::open("assets/recordings/sample.jsonl").expect("sample");
    let mut clf = GestureClassifier::from_config(&GameConfig::default().gesture);
    let mut out = Vec::new();
    let summary = analyze(&mut source, &mut clf, &mut out).expect("analyze");
    let text = String::from_utf8(out).expect("utf8");

    assert_eq!(source.skipped(), 0);
    assert_eq!(summary.frames, 103);
    assert_eq!(summary.detected, 100);
    assert_eq!(summary.jumps, 1);
    assert!(text.contains("baseline"));
    assert!(text.contains("Knees bent: on"), "{text}");
    assert!(text.contains("block Middle"), "{text}");
    assert!(text.contains("block Split"), "{text}");
}
