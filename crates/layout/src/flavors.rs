//! Flavor tag grouping for the flavors column.

use crate::text::metrics::{text_width_mm, FontFace};
use crate::text::wrapper::{clamp_lines, fit_to_width};

/// Placeholder drawn when a record has no flavors.
pub const EMPTY_FLAVORS: &str = "-";

const GROUP_SIZE: usize = 2;
const SEPARATOR: &str = ", ";

/// Splits `flavors` into consecutive groups of at most two, in input order.
///
/// Lists of length two or less come back as a single group, so an empty
/// list yields one empty group.
pub fn chunk_flavors<T: Clone>(flavors: &[T]) -> Vec<Vec<T>> {
    if flavors.len() <= GROUP_SIZE {
        return vec![flavors.to_vec()];
    }
    flavors.chunks(GROUP_SIZE).map(<[T]>::to_vec).collect()
}

/// Lays the flavor groups out as cell lines.
///
/// Groups are joined with `", "` and a line only breaks between groups. A
/// group wider than the cell is clipped; lines past `max_lines` are dropped
/// and the last kept line ends with `...`.
pub fn layout_flavor_lines<S: AsRef<str>>(
    flavors: &[S],
    face: FontFace,
    size_pt: f32,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    if flavors.is_empty() {
        return vec![EMPTY_FLAVORS.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    let names: Vec<&str> = flavors.iter().map(AsRef::as_ref).collect();
    for group in chunk_flavors(&names) {
        let group_text = group.join(SEPARATOR);

        if !current.is_empty() {
            let candidate = format!("{}{}{}", current, SEPARATOR, group_text);
            if text_width_mm(&candidate, face, size_pt) <= max_width {
                current = candidate;
                continue;
            }
            lines.push(std::mem::take(&mut current));
        }
        current = fit_to_width(&group_text, face, size_pt, max_width);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    clamp_lines(lines, face, size_pt, max_width, max_lines)
}
