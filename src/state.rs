use crate::term::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Grid,
    Focus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Up,
    Down,
    Focus,
    Quit,
}

impl Command {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "up" => Some(Command::Up),
            "down" => Some(Command::Down),
            "focus" => Some(Command::Focus),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: char,
    pub command: Command,
}

pub fn default_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding { key: 'h', command: Command::Left },
        KeyBinding { key: 'l', command: Command::Right },
        KeyBinding { key: 'k', command: Command::Up },
        KeyBinding { key: 'j', command: Command::Down },
        KeyBinding { key: 'q', command: Command::Quit },
    ]
}

/// Parses one `"<key>" = "<command>"` pair from the config. Keys are single
/// characters; unknown command names are rejected.
pub fn parse_binding_spec(spec: &str, command: &str) -> Option<KeyBinding> {
    let mut chars = spec.chars();
    let key = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let command = Command::parse(command)?;
    Some(KeyBinding { key, command })
}

/// Layers custom bindings over the defaults; a rebound key loses its
/// default meaning.
pub fn merge_bindings(custom: &[KeyBinding]) -> Vec<KeyBinding> {
    let mut bindings = default_bindings();
    for binding in custom {
        bindings.retain(|b| b.key != binding.key);
        bindings.push(*binding);
    }
    bindings
}

fn command_for(bindings: &[KeyBinding], key: char) -> Option<Command> {
    bindings.iter().find(|b| b.key == key).map(|b| b.command)
}

/// The navigation state machine: current mode, selection and scroll offset.
#[derive(Debug)]
pub struct Viewer {
    pub mode: Mode,
    pub selected: usize,
    pub scroll_offset: usize,
    pub running: bool,
}

impl Viewer {
    pub fn new() -> Self {
        Self {
            mode: Mode::Grid,
            selected: 0,
            scroll_offset: 0,
            running: true,
        }
    }

    /// Maps a grid-mode keystroke to a command. Enter always focuses; other
    /// keys go through the binding table; everything else is ignored.
    pub fn command_for_key(&self, bindings: &[KeyBinding], key: Key) -> Option<Command> {
        match key {
            Key::Eof => Some(Command::Quit),
            Key::Enter => Some(Command::Focus),
            Key::Char(c) => command_for(bindings, c),
            Key::Esc | Key::Resize => None,
        }
    }

    /// Applies one grid-mode command. Horizontal moves stop at row edges
    /// rather than wrapping; vertical moves are no-ops when the target slot
    /// holds no item.
    pub fn apply(&mut self, command: Command, total: usize, cols: usize) {
        match command {
            Command::Quit => self.running = false,
            Command::Focus => self.mode = Mode::Focus,
            Command::Left => {
                if self.selected % cols > 0 {
                    self.selected -= 1;
                }
            }
            Command::Right => {
                if self.selected + 1 < total && self.selected % cols < cols - 1 {
                    self.selected += 1;
                }
            }
            Command::Up => {
                if self.selected >= cols {
                    self.selected -= cols;
                }
            }
            Command::Down => {
                if self.selected + cols < total {
                    self.selected += cols;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer_at(selected: usize) -> Viewer {
        let mut viewer = Viewer::new();
        viewer.selected = selected;
        viewer
    }

    #[test]
    fn left_and_up_are_noops_at_origin() {
        let mut viewer = viewer_at(0);
        viewer.apply(Command::Left, 10, 4);
        viewer.apply(Command::Up, 10, 4);
        assert_eq!(viewer.selected, 0);
    }

    #[test]
    fn right_and_down_are_noops_at_last_item() {
        let mut viewer = viewer_at(9);
        viewer.apply(Command::Right, 10, 4);
        viewer.apply(Command::Down, 10, 4);
        assert_eq!(viewer.selected, 9);
    }

    #[test]
    fn right_stops_at_row_edge() {
        // Index 3 sits in the last column of row 0; `l` must not wrap.
        let mut viewer = viewer_at(3);
        viewer.apply(Command::Right, 10, 4);
        assert_eq!(viewer.selected, 3);
    }

    #[test]
    fn left_stops_at_row_start() {
        let mut viewer = viewer_at(4);
        viewer.apply(Command::Left, 10, 4);
        assert_eq!(viewer.selected, 4);
    }

    #[test]
    fn horizontal_moves_never_change_row() {
        for start in 0..10usize {
            for cmd in [Command::Left, Command::Right] {
                let mut viewer = viewer_at(start);
                viewer.apply(cmd, 10, 4);
                assert_eq!(viewer.selected / 4, start / 4);
            }
        }
    }

    #[test]
    fn down_into_partial_last_row_requires_an_item() {
        // 10 items, 4 columns: row 2 holds indices 8 and 9 only.
        let mut viewer = viewer_at(6);
        viewer.apply(Command::Down, 10, 4);
        assert_eq!(viewer.selected, 6);
        let mut viewer = viewer_at(5);
        viewer.apply(Command::Down, 10, 4);
        assert_eq!(viewer.selected, 9);
    }

    #[test]
    fn vertical_moves_keep_column() {
        let mut viewer = viewer_at(9);
        viewer.apply(Command::Up, 10, 4);
        assert_eq!(viewer.selected, 5);
        viewer.apply(Command::Down, 10, 4);
        assert_eq!(viewer.selected, 9);
    }

    #[test]
    fn quit_stops_the_loop_and_focus_switches_mode() {
        let mut viewer = Viewer::new();
        viewer.apply(Command::Focus, 10, 4);
        assert_eq!(viewer.mode, Mode::Focus);
        assert!(viewer.running);
        viewer.apply(Command::Quit, 10, 4);
        assert!(!viewer.running);
    }

    #[test]
    fn keys_map_through_bindings() {
        let viewer = Viewer::new();
        let bindings = default_bindings();
        assert_eq!(
            viewer.command_for_key(&bindings, Key::Char('j')),
            Some(Command::Down)
        );
        assert_eq!(
            viewer.command_for_key(&bindings, Key::Enter),
            Some(Command::Focus)
        );
        assert_eq!(
            viewer.command_for_key(&bindings, Key::Eof),
            Some(Command::Quit)
        );
        assert_eq!(viewer.command_for_key(&bindings, Key::Char('x')), None);
        assert_eq!(viewer.command_for_key(&bindings, Key::Esc), None);
    }

    #[test]
    fn binding_spec_rejects_bad_input() {
        assert!(parse_binding_spec("hh", "left").is_none());
        assert!(parse_binding_spec("", "left").is_none());
        assert!(parse_binding_spec("h", "teleport").is_none());
        assert_eq!(
            parse_binding_spec("a", "down"),
            Some(KeyBinding { key: 'a', command: Command::Down })
        );
    }

    #[test]
    fn merged_bindings_drop_rebound_keys() {
        let custom = [KeyBinding { key: 'h', command: Command::Quit }];
        let merged = merge_bindings(&custom);
        assert_eq!(command_for(&merged, 'h'), Some(Command::Quit));
        assert_eq!(command_for(&merged, 'l'), Some(Command::Right));
    }
}
