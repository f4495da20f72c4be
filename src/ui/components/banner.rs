//! Loading/error banner renderer.

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Banner, BannerKind};

/// Renders the banner line at `row`, or clears it when there is nothing to show.
///
/// Loading messages use `loading_fg`. Errors and notices use `error_fg`, and
/// errors are also bold.
///
/// # Parameters
///
/// * `row` - Row position of the banner (1-indexed)
/// * `banner` - Message to show, if any
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1), whether or not a banner was shown
pub fn render_banner(row: usize, banner: Option<&Banner>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(banner) = banner else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = match banner.kind {
        BannerKind::Loading => &theme.colors.loading_fg,
        BannerKind::Error | BannerKind::Notice => &theme.colors.error_fg,
    };

    print!("{}", Theme::fg(color));
    if banner.kind == BannerKind::Error {
        print!("{}", Theme::bold());
    }
    print!("   ");
    print_padded(&banner.message, cols.saturating_sub(3));
    print!("{}", Theme::reset());

    row + 1
}
