//! Header component renderer.
//!
//! Renders the title on the left and the view tabs on the right, with the active
//! tab drawn in the theme's tab colors.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header bar at the specified row.
///
/// Draws the bold title flush left and the view tabs flush right, padding the
/// gap so the line fills the terminal width. The active tab uses
/// `tab_active_fg`/`tab_active_bg`; inactive tabs are dimmed.
///
/// # Parameters
///
/// * `row` - Row position to render the header (1-indexed)
/// * `header` - Title text and tab labels
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
///  Book Finder                          Search  Favorites (3)
/// ```
///
/// # Example
///
/// ```rust,ignore
/// use crate::ui::components::header::render_header;
/// use crate::ui::viewmodel::{HeaderInfo, TabInfo};
/// use crate::ui::Theme;
///
/// let header = HeaderInfo {
///     title: "Book Finder".to_string(),
///     tabs: vec![
///         TabInfo { label: " Search ".to_string(), is_active: true },
///         TabInfo { label: " Favorites (0) ".to_string(), is_active: false },
///     ],
/// };
/// let next_row = render_header(2, &header, &Theme::default(), 80);
/// assert_eq!(next_row, 3);
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let tabs_len: usize = header.tabs.iter().map(|tab| char_len(&tab.label) + 1).sum();
    let title_len = char_len(&header.title);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(title_len + tabs_len)));

    for tab in &header.tabs {
        if tab.is_active {
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else {
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{}", tab.label);
        print!("{}", Theme::reset());
        print!(" ");
    }

    print!("{}", Theme::reset());
    row + 1
}
