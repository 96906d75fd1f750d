use regex::Regex;
use std::sync::LazyLock;

/// Longest frame string emitted, before the ellipsis marker.
pub const MAX_FRAME_LENGTH: usize = 200;

/// OS-style absolute user/home path segments stripped from stack frames.
static PII_PATH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"/Users/[^\s/]+",
        r"/home/[^\s/]+",
        r"C:\\Users\\[^\s\\]+",
        r"/var/[^\s/]*/[^\s/]+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Replace user-identifying path segments with `<path>`.
pub fn redact_paths(text: &str) -> String {
    let mut redacted = text.to_string();
    for pattern in PII_PATH_PATTERNS.iter() {
        redacted = pattern.replace_all(&redacted, "<path>").into_owned();
    }
    redacted
}

/// Sanitize a single stack frame string.
///
/// User-identifying path segments are replaced with `<path>` and the frame
/// is truncated to [`MAX_FRAME_LENGTH`] characters with a trailing `...`.
pub fn sanitize_frame(frame: &str) -> String {
    let sanitized = redact_paths(frame);

    if sanitized.chars().count() > MAX_FRAME_LENGTH {
        let mut truncated: String = sanitized.chars().take(MAX_FRAME_LENGTH).collect();
        truncated.push_str("...");
        truncated
    } else {
        sanitized
    }
}
