//! Page controls renderer.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders `⬅ Prev   Page X of Y   Next ➡` centered at `row`.
///
/// A control that cannot be used is dimmed.
///
/// # Parameters
///
/// * `row` - Row position of the controls (1-indexed)
/// * `pagination` - Current page, page count and which controls are enabled
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Example
///
/// ```rust,ignore
/// use crate::ui::components::pagination::render_pagination;
/// use crate::ui::viewmodel::PaginationInfo;
/// use crate::ui::Theme;
///
/// let info = PaginationInfo { page: 1, total_pages: 2, has_prev: false, has_next: true };
/// render_pagination(22, &info, &Theme::default(), 80);
/// // Output: "              ⬅ Prev   Page 1 of 2   Next ➡              " (Prev dimmed)
/// ```
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let prev = "⬅ Prev";
    let next = "Next ➡";
    let label = format!("Page {} of {}", pagination.page, pagination.total_pages);
    let total_len = char_len(prev) + char_len(&label) + char_len(next) + 6;
    let padding = cols.saturating_sub(total_len) / 2;

    let control_color = |enabled: bool| {
        if enabled {
            Theme::fg(&theme.colors.header_fg)
        } else {
            format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))
        }
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));

    print!("{}{prev}{}", control_color(pagination.has_prev), Theme::reset());
    print!("   ");
    print!("{}{}{label}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal), Theme::reset());
    print!("   ");
    print!("{}{next}{}", control_color(pagination.has_next), Theme::reset());

    print!("{}", " ".repeat(cols.saturating_sub(padding + total_len)));
    row + 1
}
