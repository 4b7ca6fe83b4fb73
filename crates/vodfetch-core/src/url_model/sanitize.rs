//! Safe on-disk names for manifest-supplied filenames.
//!
//! Segment and key filenames come straight out of a downloaded playlist and
//! are used as local filenames inside the job workspace, so path separators
//! and control characters must never survive.

/// Sanitizes a manifest-supplied filename for use inside the workspace.
///
/// - Replaces NUL, `/`, `\`, whitespace, and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots, spaces, and underscores
/// - Caps the result at 255 bytes (Linux NAME_MAX)
pub fn sanitize_segment_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;
    for c in name.chars() {
        let mapped = if c == '\0' || c == '/' || c == '\\' || c.is_control() || c == ' ' || c == '\t'
        {
            '_'
        } else {
            c
        };
        if mapped == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(mapped);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
