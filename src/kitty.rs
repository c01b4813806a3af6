use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Full-screen clear followed by cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Drawn in place of an item whose bitmap could not be rendered.
pub const PLACEHOLDER: &str = "[?]";

/// 1-based CSI cursor addressing.
pub fn cursor_to(row: u16, col: u16) -> String {
    format!("\x1b[{row};{col}H")
}

/// Encodes a display request for the kitty graphics protocol, file-reference
/// mode: the terminal reads the PNG itself from the base64-encoded path.
///
/// `a=T` transmits and displays, `f=100` declares PNG, `t=f` marks the
/// payload as a path, `c`/`r` give the cell box and `C=1` keeps the cursor
/// where it is. Items without a bitmap get a visible placeholder instead of
/// a malformed sequence.
pub fn encode_display(bitmap: Option<&Path>, cell_cols: u16, cell_rows: u16) -> String {
    let Some(path) = bitmap else {
        return PLACEHOLDER.to_string();
    };
    let b64 = STANDARD.encode(path.as_os_str().as_bytes());
    format!("\x1b_Ga=T,f=100,t=f,c={cell_cols},r={cell_rows},C=1;{b64}\x1b\\")
}

/// Asks the terminal to drop every image currently on screen.
pub fn encode_clear_all() -> &'static str {
    "\x1b_Ga=d\x1b\\"
}
