use crashtop_engine::rank::SortOrder;
use crashtop_engine::{DecodeOptions, decode_response, sort_and_rank};
use serde_json::Value;
use std::fs;
use std::path::Path;

// Helper to load a captured RLE response from fixture JSON
fn load_fixture(fixture_name: &str) -> Value {
    let path = Path::new("tests/fixtures").join(fixture_name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|_| panic!("Failed to parse fixture: {}", path.display()))
}

fn fixture_opts() -> DecodeOptions<'static> {
    DecodeOptions {
        window_days: 7,
        max_frames: 8,
        min_count: 10,
        window_start_ts: 1_767_225_600,
        now_ts: 1_767_750_000,
        project: "browser",
        endpoint: "https://unit.test",
    }
}

#[test]
fn test_decode_captured_response() {
    let response = load_fixture("rle_response.json");
    let groups = decode_response(&response, &fixture_opts()).expect("decode failed");

    // The truncated entry is dropped; the other three survive.
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(|g| g.fingerprint != "c9d8e7f6a5b4"));

    let top = &groups[0];
    assert_eq!(top.fingerprint, "8a1f9c2d4e6b");
    assert_eq!(top.count, 1204);
    assert_eq!(top.crashes_per_day, 172.0);
    assert_eq!(top.classifier, "SIGSEGV");
    assert_eq!(top.callstack.len(), 8);
    assert_eq!(top.top_platform.as_deref(), Some("Windows"));
    assert_eq!(top.platform_pct, 74.8);
    assert_eq!(top.top_version.as_deref(), Some("1.62.100"));
    assert_eq!(top.version_pct, 66.4);
    assert!(top.is_new);
    assert_eq!(top.labels, vec!["crash", "windows", "regression"]);
    assert_eq!(
        top.triage_url,
        "https://unit.test/p/browser/triage?fingerprints=8a1f9c2d4e6b"
    );
}

#[test]
fn test_no_frame_contains_unredacted_paths() {
    let response = load_fixture("rle_response.json");
    let groups = decode_response(&response, &fixture_opts()).expect("decode failed");

    for group in &groups {
        for frame in &group.callstack {
            assert!(!frame.contains("/Users/"), "unredacted frame: {}", frame);
            assert!(!frame.contains("C:\\Users\\"), "unredacted frame: {}", frame);
            assert!(!frame.contains("/home/"), "unredacted frame: {}", frame);
        }
    }

    let windows_group = groups
        .iter()
        .find(|g| g.fingerprint == "b7e3d1a0f5c2")
        .unwrap();
    assert_eq!(windows_group.callstack[2], "<path>\\app\\mojo.dll");
}

#[test]
fn test_frame_caps_hold() {
    let response = load_fixture("rle_response.json");
    let opts = fixture_opts();
    let groups = decode_response(&response, &opts).expect("decode failed");

    for group in &groups {
        assert!(group.callstack.len() <= opts.max_frames);
        for frame in &group.callstack {
            assert!(frame.chars().count() <= crashtop_engine::MAX_FRAME_LENGTH + 3);
        }
    }
}

#[test]
fn test_dominant_version_tie_is_deterministic() {
    let response = load_fixture("rle_response.json");
    let groups = decode_response(&response, &fixture_opts()).expect("decode failed");

    let tied = groups
        .iter()
        .find(|g| g.fingerprint == "d2c4b6a8e0f1")
        .unwrap();
    assert_eq!(tied.top_version.as_deref(), Some("1.60.50"));
    assert_eq!(tied.version_pct, 50.0);
    // Single-value timestamp range fills both bounds; before window start.
    assert_eq!(tied.first_seen_ts, Some(1_766_966_400));
    assert_eq!(tied.last_seen_ts, Some(1_766_966_400));
    assert!(!tied.is_new);
}

#[test]
fn test_ranks_are_contiguous_after_sorting() {
    let response = load_fixture("rle_response.json");
    let groups = decode_response(&response, &fixture_opts()).expect("decode failed");
    let ranked = sort_and_rank(groups, SortOrder::Count, false);

    let ranks: Vec<usize> = ranked.iter().map(|g| g.rank.unwrap()).collect();
    assert_eq!(ranks, (1..=ranked.len()).collect::<Vec<_>>());
    assert_eq!(ranked[0].fingerprint, "8a1f9c2d4e6b");
}
