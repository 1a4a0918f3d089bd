//! Video identifier derivation and filename-safe form.

/// Derives the video identifier from a source locator.
///
/// The identifier is the substring after the last `?v=` marker, or the
/// whole locator when the marker is absent. Identical identifiers across
/// dataset records mean the same underlying video.
pub fn video_id(locator: &str) -> &str {
    match locator.rfind("?v=") {
        Some(idx) => &locator[idx + "?v=".len()..],
        None => locator,
    }
}

/// Sanitizes a derived identifier for safe use as a Linux filename stem.
///
/// - Replaces NUL, `/`, `\`, whitespace, and control characters with `_`
/// - Trims leading/trailing spaces and dots
/// - Collapses consecutive underscores
/// - Limits length to 200 bytes, leaving headroom for the extension
///
/// Returns `None` when nothing usable remains, so callers can reject the
/// record instead of writing to a hidden or empty name.
pub fn filename_safe_id(id: &str) -> Option<String> {
    const STEM_MAX: usize = 200;

    let mut out = String::with_capacity(id.len());
    let mut prev_underscore = false;

    for c in id.chars() {
        let replacement = if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            '_'
        } else if c == ' ' || c == '\t' {
            '_'
        } else {
            c
        };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '\t' || c == '.' || c == '_');
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.len() > STEM_MAX {
        let mut take = STEM_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        Some(trimmed[..take].to_string())
    } else {
        Some(trimmed.to_string())
    }
}
