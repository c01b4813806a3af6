use crate::grid::GridLayout;
use crate::images::Item;
use crate::kitty;
use anyhow::Result;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

const HELP_LINE: &str = "[h/l/j/k: move | Enter=focus | q=quit]";

/// Repaints the whole grid: visible thumbnails, the selection marker under
/// the selected item, and the status + help lines. The frame is composed in
/// one buffer and written with a single call so an interrupted render never
/// leaves a partial frame behind.
pub fn render_grid(
    out: &mut impl Write,
    items: &[Item],
    layout: &GridLayout,
    selected: usize,
    scroll_offset: usize,
) -> Result<()> {
    let scroll = layout.clamp_scroll(scroll_offset);
    let mut frame = String::new();
    frame.push_str(kitty::CLEAR_SCREEN);

    for row in layout.visible_row_range(scroll) {
        for col in 0..layout.cols() {
            let idx = row * layout.cols() + col;
            if idx >= items.len() {
                break;
            }
            let (screen_row, screen_col) = layout.screen_position(row, col, scroll);
            frame.push_str(&kitty::cursor_to(screen_row, screen_col));
            frame.push_str(&kitty::encode_display(
                items[idx].bitmap.as_deref(),
                crate::THUMB_CELL_COLS,
                crate::THUMB_CELL_ROWS,
            ));
            if idx == selected {
                // The spacing row under the thumbnail, centered.
                let marker_row = screen_row + crate::THUMB_CELL_ROWS;
                let marker_col = screen_col + crate::THUMB_CELL_COLS / 2;
                frame.push_str(&kitty::cursor_to(marker_row, marker_col));
                frame.push('*');
            }
        }
    }

    frame.push_str(&kitty::cursor_to(layout.status_row(), 1));
    if selected < items.len() {
        let _ = write!(frame, "Selected: {}", items[selected].original.display());
    }
    frame.push_str(&kitty::cursor_to(layout.status_row() + 1, 1));
    frame.push_str(HELP_LINE);

    out.write_all(frame.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Repaints the screen with one image sized to the full terminal.
pub fn render_focus(out: &mut impl Write, bitmap: Option<&Path>, term: (u16, u16)) -> Result<()> {
    let (cols, rows) = term;
    let mut frame = String::new();
    frame.push_str(kitty::CLEAR_SCREEN);
    frame.push_str(&kitty::encode_display(bitmap, cols, rows));
    out.write_all(frame.as_bytes())?;
    out.flush()?;
    Ok(())
}
