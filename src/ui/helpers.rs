//! Shared rendering utilities and helpers.
//!
//! All widths here are counted in characters, not bytes, so titles with accents
//! or non-Latin scripts are truncated on character boundaries.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` characters, ending in `…` when cut.
///
/// # Example
///
/// ```rust
/// use bookfinder::ui::helpers::truncate;
///
/// assert_eq!(truncate("Dune", 10), "Dune");
/// assert_eq!(truncate("The Lord of the Rings", 10), "The Lord …");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Prints `text` padded with spaces to exactly `width` characters, truncating if
/// longer.
pub fn print_padded(text: &str, width: usize) {
    let text = truncate(text, width);
    print!("{text}{}", " ".repeat(width.saturating_sub(char_len(&text))));
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. When the item is
/// selected, match highlighting is skipped so it does not fight the selection
/// background. `text` is expected to be already truncated; ranges past its end are
/// clipped.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    base_fg: &str,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(base_fg));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate("Les Misérables", 8), "Les Mis…");
        assert_eq!(char_len(&truncate("Les Misérables", 8)), 8);
        assert_eq!(truncate("Émile", 5), "Émile");
        assert_eq!(truncate("anything", 0), "");
    }
}
