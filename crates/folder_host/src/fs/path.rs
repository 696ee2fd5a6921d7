//! Relative-path and tracked-extension helpers shared across host abstractions.

/// Extension tracked by default (matched case-insensitively).
pub const DEFAULT_TRACKED_EXTENSION: &str = ".pdf";

/// Splits a slash-joined relative path into its non-empty segments.
///
/// Backslashes are treated as separators and `.` segments are dropped, so `"A//B/"`,
/// `"A\\B"` and `"./A/B"` all yield `["A", "B"]`.
pub fn relative_path_segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// Joins directory names into a slash-separated relative path (`""` for no segments).
pub fn join_relative_path<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}

/// Returns `true` when `name` ends with `extension`, ignoring ASCII case.
pub fn has_tracked_extension(name: &str, extension: &str) -> bool {
    if extension.is_empty() {
        return true;
    }
    name.len() >= extension.len()
        && name
            .get(name.len() - extension.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(extension))
}

/// Appends `extension` to `name` unless it already carries it.
pub fn ensure_tracked_extension(name: &str, extension: &str) -> String {
    if has_tracked_extension(name, extension) {
        name.to_string()
    } else {
        format!("{name}{extension}")
    }
}

/// Removes a trailing `extension` (any case) from `name`.
pub fn strip_tracked_extension<'a>(name: &'a str, extension: &str) -> &'a str {
    if extension.is_empty() || !has_tracked_extension(name, extension) {
        return name;
    }
    &name[..name.len() - extension.len()]
}
