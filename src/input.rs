use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::VirtualKeyCode;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn delta(self) -> Point {
        match self {
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
            Direction::Up => Point::new(0, -1),
            Direction::Down => Point::new(0, 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// The closed set of logical inputs the simulation core understands. Key
/// mapping is the shell's job; unknown keys never reach the core.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputSymbol {
    Step(Direction),
    MaxStep(Direction),
    Grab,
    UseStairs,
    Help,
    Quit,
}

pub fn symbol_for_key(key: VirtualKeyCode, shift: bool) -> Option<InputSymbol> {
    let step = |dir| {
        if shift {
            InputSymbol::MaxStep(dir)
        } else {
            InputSymbol::Step(dir)
        }
    };
    match key {
        VirtualKeyCode::Left | VirtualKeyCode::A | VirtualKeyCode::H => Some(step(Direction::Left)),
        VirtualKeyCode::Right | VirtualKeyCode::D | VirtualKeyCode::L => {
            Some(step(Direction::Right))
        }
        VirtualKeyCode::Up | VirtualKeyCode::W | VirtualKeyCode::K => Some(step(Direction::Up)),
        VirtualKeyCode::Down | VirtualKeyCode::S | VirtualKeyCode::J => Some(step(Direction::Down)),
        VirtualKeyCode::G => Some(InputSymbol::Grab),
        VirtualKeyCode::Period if shift => Some(InputSymbol::UseStairs),
        VirtualKeyCode::Slash if shift => Some(InputSymbol::Help),
        VirtualKeyCode::Q | VirtualKeyCode::Escape => Some(InputSymbol::Quit),
        _ => None,
    }
}

/// Replays a character script as logical inputs, for demo runs and
/// deterministic testing without a keyboard.
pub struct ScriptedInput {
    symbols: Vec<InputSymbol>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut symbols = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            for ch in trimmed.chars() {
                if let Some(symbol) = symbol_for_char(ch) {
                    symbols.push(symbol);
                } else {
                    eprintln!("Warning: unknown key in script: {ch}");
                }
            }
        }

        Ok(Self { symbols, cursor: 0 })
    }

    pub fn next_symbol(&mut self) -> Option<InputSymbol> {
        let symbol = self.symbols.get(self.cursor).copied();
        if symbol.is_some() {
            self.cursor += 1;
        }
        symbol
    }
}

fn symbol_for_char(ch: char) -> Option<InputSymbol> {
    let dir = match ch.to_ascii_lowercase() {
        'h' | 'a' => Some(Direction::Left),
        'l' | 'd' => Some(Direction::Right),
        'k' | 'w' => Some(Direction::Up),
        'j' | 's' => Some(Direction::Down),
        _ => None,
    };
    if let Some(dir) = dir {
        return Some(if ch.is_ascii_uppercase() {
            InputSymbol::MaxStep(dir)
        } else {
            InputSymbol::Step(dir)
        });
    }
    match ch {
        'g' => Some(InputSymbol::Grab),
        '>' => Some(InputSymbol::UseStairs),
        '?' => Some(InputSymbol::Help),
        'q' => Some(InputSymbol::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_letters_map_to_max_distance() {
        assert_eq!(
            symbol_for_char('H'),
            Some(InputSymbol::MaxStep(Direction::Left))
        );
        assert_eq!(symbol_for_char('j'), Some(InputSymbol::Step(Direction::Down)));
        assert_eq!(symbol_for_char('>'), Some(InputSymbol::UseStairs));
        assert_eq!(symbol_for_char('~'), None);
    }

    #[test]
    fn shift_turns_movement_keys_into_max_steps() {
        assert_eq!(
            symbol_for_key(VirtualKeyCode::L, true),
            Some(InputSymbol::MaxStep(Direction::Right))
        );
        assert_eq!(
            symbol_for_key(VirtualKeyCode::L, false),
            Some(InputSymbol::Step(Direction::Right))
        );
        assert_eq!(symbol_for_key(VirtualKeyCode::F1, false), None);
    }
}
