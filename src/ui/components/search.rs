//! Query box and filter bar renderers.

use crate::ui::helpers::{char_len, position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterBarInfo, SearchBarInfo};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Cursor glyph drawn after the text of the focused field.
const CURSOR: &str = "▏";

/// Renders the 3-line query box and returns the row after it.
///
/// # Parameters
///
/// * `row` - Row of the top border (1-indexed)
/// * `search` - Query text and whether the box has focus
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The row after the bottom border (row + 3)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────┐ [margin]
/// [margin] │ Search by title: dune▏       │ [margin]
/// [margin] └──────────────────────────────┘ [margin]
/// ```
///
/// The border uses `focus_border` while the box has focus.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.is_focused {
        &theme.colors.focus_border
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.is_focused { CURSOR } else { "" };
    let search_text = format!(" Search by title: {}{cursor}", search.query);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print_padded(&search_text, inner_width);
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Renders the author/year filter line and returns the next row.
///
/// An empty, unfocused field shows a dimmed `any`. The focused field gets the
/// cursor glyph and `focus_border` brackets.
///
/// # Layout
///
/// ```text
///    Author: [austen▏]   Year: [any]   (Ctrl+x / c: clear)
/// ```
pub fn render_filter_bar(row: usize, filters: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN + 1));

    let mut used = SEARCH_BOX_MARGIN + 1;
    used += render_field("Author", &filters.author, filters.author_focused, theme);
    print!("   ");
    used += 3;
    used += render_field("Year", &filters.year, filters.year_focused, theme);

    let hint = "   (Ctrl+x / c: clear)";
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_padded(hint, cols.saturating_sub(used));
    print!("{}", Theme::reset());

    row + 1
}

/// Prints `Label: [value]` and returns its width.
fn render_field(label: &str, value: &str, focused: bool, theme: &Theme) -> usize {
    let bracket_color = if focused {
        &theme.colors.focus_border
    } else {
        &theme.colors.search_bar_border
    };
    let cursor = if focused { CURSOR } else { "" };
    let shown = if value.is_empty() && !focused { "any" } else { value };

    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{label}: ");
    print!("{}", Theme::fg(bracket_color));
    print!("[");
    if value.is_empty() && !focused {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{shown}{cursor}");
    print!("{}", Theme::fg(bracket_color));
    print!("]");
    print!("{}", Theme::reset());

    char_len(label) + 2 + 1 + char_len(shown) + char_len(cursor) + 1
}
