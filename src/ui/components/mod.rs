//! Composable UI component renderers.
//!
//! Each component renders one part of the interface at a given row and returns
//! the next free row, so the layout function reads top to bottom.
//!
//! # Components
//!
//! - [`header`]: Title and view tabs
//! - [`search`]: Query box and filter bar
//! - [`banner`]: Loading / error line
//! - [`cards`]: Book cards
//! - [`pagination`]: Prev / page / next controls
//! - [`empty`]: Empty state message
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Query box - 3 lines]
//! [Filter bar | favorites heading]
//! [Banner]
//! [Cards | empty state]
//! ...
//! [Pagination]
//! [Border]
//! [Footer]
//! ```

mod banner;
mod cards;
mod empty;
mod footer;
mod header;
mod pagination;
mod search;

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use banner::render_banner;
use cards::render_cards;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use search::{render_filter_bar, render_search_bar};

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen for `vm`.
///
/// Components above the card list are stacked from row 2 downward. The
/// pagination row, bottom border and footer are anchored to the last three
/// rows, so they stay put however many cards are shown.
///
/// # Parameters
///
/// * `vm` - Precomputed view model
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
/// * `rows` - Terminal height in rows
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    current_row = if let Some(filters) = &vm.filter_bar {
        render_filter_bar(current_row, filters, theme, cols)
    } else {
        render_section_title(current_row, "Your Favorites", theme, cols)
    };
    current_row = render_banner(current_row, vm.banner.as_ref(), theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        render_cards(current_row, &vm.cards, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);

    if let Some(pagination) = &vm.pagination {
        render_pagination(pagination_row, pagination, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

fn render_section_title(row: usize, title: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("   ");
    print_padded(title, cols.saturating_sub(3));
    print!("{}", Theme::reset());
    row + 1
}
