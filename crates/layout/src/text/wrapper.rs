use super::metrics::{text_width_mm, FontFace};

pub const ELLIPSIS: &str = "...";

/// Keeps the first `max_chars` characters, appending `...` when anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Returns `text` unchanged if it fits `max_width` mm, otherwise the longest
/// prefix that still fits with `...` appended.
pub fn fit_to_width(text: &str, face: FontFace, size_pt: f32, max_width: f32) -> String {
    if text_width_mm(text, face, size_pt) <= max_width {
        return text.to_string();
    }
    with_ellipsis(text, face, size_pt, max_width)
}

/// Forces a trailing `...`, dropping characters from the end of `text` until
/// the result fits. Yields an empty string if not even the ellipsis fits.
pub fn with_ellipsis(text: &str, face: FontFace, size_pt: f32, max_width: f32) -> String {
    let ellipsis_width = text_width_mm(ELLIPSIS, face, size_pt);
    if ellipsis_width > max_width {
        return String::new();
    }

    let mut kept = text.trim_end();
    while !kept.is_empty() && text_width_mm(kept, face, size_pt) + ellipsis_width > max_width {
        let last = kept.char_indices().next_back().map_or(0, |(i, _)| i);
        kept = kept[..last].trim_end();
    }
    format!("{}{}", kept, ELLIPSIS)
}

/// Greedy word wrap into at most `max_lines` lines of `max_width` mm.
///
/// Words longer than a line are clipped. When text remains after the last
/// permitted line, that line ends with `...`.
pub fn wrap_words(
    text: &str,
    face: FontFace,
    size_pt: f32,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width_mm(&candidate, face, size_pt) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current = fit_to_width(word, face, size_pt, max_width);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    clamp_lines(lines, face, size_pt, max_width, max_lines)
}

/// Drops lines past `max_lines` and marks the cut on the last kept line.
pub(crate) fn clamp_lines(
    mut lines: Vec<String>,
    face: FontFace,
    size_pt: f32,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        if !last.ends_with(ELLIPSIS) {
            *last = with_ellipsis(last, face, size_pt, max_width);
        }
    }
    lines
}
