use anyhow::{bail, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

mod config;
mod grid;
mod images;
mod kitty;
mod render;
mod state;
mod term;
mod thumbs;

use config::Config;
use grid::GridLayout;
use images::Item;
use state::{merge_bindings, KeyBinding, Mode, Viewer};
use term::Key;
use thumbs::{BitmapRenderer, ImageRenderer};

/// Text cells occupied by each thumbnail.
pub const THUMB_CELL_COLS: u16 = 10;
pub const THUMB_CELL_ROWS: u16 = 5;
/// Blank cells left after each thumbnail.
pub const SPACING_COLS: u16 = 2;
pub const SPACING_ROWS: u16 = 1;

const DEFAULT_COLUMNS: usize = 4;
const USAGE: &str = "Usage: triv [-c columns] <directory | image files...>";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    columns: Option<usize>,
    paths: Vec<PathBuf>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args> {
    let mut columns = None;
    let mut paths = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--columns" => {
                let Some(value) = args.next() else {
                    bail!("{USAGE}");
                };
                // Non-positive or unparsable counts silently become the default.
                let n = value.parse::<i64>().unwrap_or(0);
                columns = Some(if n >= 1 { n as usize } else { DEFAULT_COLUMNS });
            }
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("{USAGE}"),
            _ => paths.push(PathBuf::from(arg)),
        }
    }
    if paths.is_empty() {
        bail!("{USAGE}");
    }
    Ok(Args { columns, paths })
}

fn main() {
    let args = std::env::args().skip(1);
    if let Err(err) = run(args) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

fn run<I: Iterator<Item = String>>(args: I) -> Result<()> {
    let args = parse_args(args)?;
    let config = Config::load();
    let columns = args.columns.or(config.columns).unwrap_or(DEFAULT_COLUMNS);
    let bindings = merge_bindings(&config.bindings);

    let mut items = images::collect_items(&args.paths)?;
    if items.is_empty() {
        bail!("no images found");
    }

    let renderer = ImageRenderer::new()?;
    thumbs::generate_thumbnails(&mut items, &renderer);

    // Raw mode comes last: every error above prints cleanly to stderr.
    // Declared after `items` so the guard (raw-mode restore + on-screen
    // image wipe) runs before the transient thumbnails are unlinked.
    let mut guard = term::RawGuard::enter()?;
    let result = event_loop(&items, columns, &bindings, &renderer);
    guard.cleanup();
    result
}

/// Grid mode alternates strictly between one repaint and one blocking
/// keystroke; focus mode hands the keyboard to `focus_view` until it exits.
fn event_loop(
    items: &[Item],
    columns: usize,
    bindings: &[KeyBinding],
    renderer: &dyn BitmapRenderer,
) -> Result<()> {
    let mut out = io::stdout();
    let mut viewer = Viewer::new();
    while viewer.running {
        match viewer.mode {
            Mode::Grid => {
                let layout = GridLayout::new(items.len(), columns, term::size());
                viewer.scroll_offset = layout.scroll_into_view(viewer.selected, viewer.scroll_offset);
                render::render_grid(&mut out, items, &layout, viewer.selected, viewer.scroll_offset)?;
                if let Some(command) = viewer.command_for_key(bindings, term::read_key()) {
                    viewer.apply(command, items.len(), columns);
                }
            }
            Mode::Focus => {
                focus_view(&mut out, &items[viewer.selected], renderer)?;
                viewer.mode = Mode::Grid;
            }
        }
    }
    Ok(())
}

/// Renders one image full-screen and blocks until ESC, `q` or end of input.
/// The focus bitmap only lives for the duration of the view.
fn focus_view(out: &mut impl io::Write, item: &Item, renderer: &dyn BitmapRenderer) -> Result<()> {
    let focus_path = match renderer.render(
        &item.original,
        thumbs::FOCUS_PIXEL_WIDTH,
        thumbs::FOCUS_PIXEL_HEIGHT,
    ) {
        Ok(path) => path,
        // Failed focus render just drops back to the grid.
        Err(_) => return Ok(()),
    };
    render::render_focus(out, Some(&focus_path), term::size())?;
    loop {
        match term::read_key() {
            Key::Esc | Key::Char('q') | Key::Eof => break,
            _ => {}
        }
    }
    let _ = fs::remove_file(&focus_path);
    Ok(())
}
