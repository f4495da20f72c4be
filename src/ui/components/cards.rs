//! Book card renderer.
//!
//! Each card takes [`CARD_HEIGHT`] lines:
//!
//! ```text
//! ▌ Dune                                                   ♥ Saved
//!     Author: Frank Herbert   Year: 1965
//!     Cover:  https://covers.openlibrary.org/b/id/11481354-M.jpg
//!     Open:   https://openlibrary.org/works/OL893415W
//! ```
//!
//! followed by a blank separator line.

use crate::ui::helpers::{self, char_len, position_cursor, print_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BookCard, CARD_HEIGHT};

const SAVED_MARKER: &str = " ♥ Saved ";
const DETAIL_INDENT: &str = "    ";

/// Renders every card starting at `row` and returns the row after the last one.
///
/// The caller passes only the cards that fit on screen; each one takes
/// [`CARD_HEIGHT`] rows.
///
/// # Parameters
///
/// * `row` - Row of the first card's title line (1-indexed)
/// * `cards` - Visible window of cards, top to bottom
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// `row + cards.len() * CARD_HEIGHT`
pub fn render_cards(row: usize, cards: &[BookCard], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        current_row = render_card(current_row, card, theme, cols);
    }
    current_row
}

fn render_card(row: usize, card: &BookCard, theme: &Theme, cols: usize) -> usize {
    render_title_line(row, card, theme, cols);

    let details = match &card.year {
        Some(year) => format!("Author: {}   Year: {year}", card.authors),
        None => format!("Author: {}", card.authors),
    };
    render_detail_line(row + 1, &details, &theme.colors.text_normal, cols);
    render_detail_line(row + 2, &format!("Cover:  {}", card.cover), &theme.colors.text_dim, cols);
    render_detail_line(row + 3, &format!("Open:   {}", card.link), &theme.colors.text_dim, cols);

    row + CARD_HEIGHT
}

/// Title line: selection bar, highlighted title, and the saved marker flush right.
fn render_title_line(row: usize, card: &BookCard, theme: &Theme, cols: usize) {
    let marker_len = if card.is_favorite { char_len(SAVED_MARKER) } else { 0 };
    let title_width = cols.saturating_sub(2 + marker_len);
    let title = truncate(&card.title, title_width);

    position_cursor(row, 1);
    let base_fg = if card.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("▌ ");
        &theme.colors.selection_fg
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  ");
        &theme.colors.text_normal
    };

    print!("{}", Theme::bold());
    helpers::render_highlighted_text(
        &title,
        &card.highlight_ranges,
        theme,
        card.is_selected,
        base_fg,
    );
    print!("{}", " ".repeat(title_width.saturating_sub(char_len(&title))));

    if card.is_favorite {
        print!("{}", Theme::fg(&theme.colors.favorite_fg));
        print!("{SAVED_MARKER}");
    }

    print!("{}", Theme::reset());
}

fn render_detail_line(row: usize, text: &str, color: &str, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{DETAIL_INDENT}");
    print_padded(text, cols.saturating_sub(DETAIL_INDENT.len()));
    print!("{}", Theme::reset());
}
