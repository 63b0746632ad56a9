use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended when a string is cut.
const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns.
///
/// CJK characters and most emoji occupy two columns, combining marks zero.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncates a string to fit within `max_width` terminal columns.
///
/// Appends `...` when the text was cut. Width accounting is Unicode-aware,
/// so a post title full of CJK characters never overflows its pane.
///
/// Returns `Cow::Borrowed` when the string already fits.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    // Too narrow for text plus ellipsis: keep as many columns as fit, no marker.
    if max_width <= ELLIPSIS_WIDTH {
        let cut = width_prefix_end(s, max_width);
        return Cow::Owned(s[..cut].to_string());
    }

    let cut = width_prefix_end(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS))
}

/// Byte index of the longest prefix of `s` that fits within `max_width` columns.
fn width_prefix_end(s: &str, max_width: usize) -> usize {
    let mut width = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + char_width > max_width {
            break;
        }
        width += char_width;
        end = idx + c.len_utf8();
    }
    end
}
