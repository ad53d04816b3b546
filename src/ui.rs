//! Plain-text board rendering and command parsing for the terminal front end.

use core::fmt::Write;

use crate::board::{Board, SpecialMove};
use crate::config::BOARD_SIZE;
use crate::game::Action;
use crate::geometry::Coordinate;

/// Draw `board` as a lettered grid.
///
/// `X` hit, `o` miss, `#` shield, `S` ship. Ships are drawn only where
/// they are revealed, or everywhere when `reveal_all` is set.
pub fn render_board(board: &Board, reveal_all: bool) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');

    let hits = board.hits();
    let fired = board.fired();
    let shielded = board.shielded();
    for y in 0..BOARD_SIZE as i32 {
        let _ = write!(out, "  {:2}", y + 1);
        for x in 0..BOARD_SIZE as i32 {
            let cell = Coordinate::new(x, y);
            let ch = if hits.contains(&cell) {
                'X'
            } else if shielded.contains(cell) {
                '#'
            } else if fired.contains(cell) {
                'o'
            } else if board
                .fleet()
                .iter()
                .any(|s| (reveal_all || s.is_revealed()) && s.contains(cell).is_some())
            {
                'S'
            } else {
                '.'
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Parse a cell like `A5` or `j10`.
pub fn parse_coordinate(input: &str) -> Result<Coordinate, String> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or_else(|| "Empty input".to_string())?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str = chars.as_str();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Coordinate::new(col as i32, row as i32 - 1))
}

/// Parse a turn: a cell optionally followed by an action word
/// (`fire`, `nuke`, `strafe`, `reveal`, `second`, `shield`).
pub fn parse_command(line: &str) -> Result<(Coordinate, Action), String> {
    let mut parts = line.split_whitespace();
    let coord = parse_coordinate(parts.next().unwrap_or(""))?;
    let action = match parts.next().map(str::to_ascii_lowercase).as_deref() {
        None | Some("fire") => Action::Fire,
        Some("nuke") => Action::Special(SpecialMove::Nuke),
        Some("strafe") | Some("strafing") => Action::Special(SpecialMove::StrafingRun),
        Some("reveal") => Action::Special(SpecialMove::Reveal),
        Some("second") => Action::SecondChance,
        Some("shield") => Action::Shield,
        Some(other) => return Err(format!("Unknown action '{}'", other)),
    };
    Ok((coord, action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cells() {
        assert_eq!(parse_coordinate("A1"), Ok(Coordinate::new(0, 0)));
        assert_eq!(parse_coordinate("j10"), Ok(Coordinate::new(9, 9)));
        assert!(parse_coordinate("K1").is_err());
        assert!(parse_coordinate("A0").is_err());
        assert!(parse_coordinate("A11").is_err());
        assert!(parse_coordinate("").is_err());
        assert!(parse_coordinate("5A").is_err());
    }

    #[test]
    fn parses_actions() {
        assert_eq!(
            parse_command("C5"),
            Ok((Coordinate::new(2, 4), Action::Fire))
        );
        assert_eq!(
            parse_command("c5 nuke"),
            Ok((Coordinate::new(2, 4), Action::Special(SpecialMove::Nuke)))
        );
        assert_eq!(
            parse_command("B2 shield"),
            Ok((Coordinate::new(1, 1), Action::Shield))
        );
        assert!(parse_command("B2 torpedo").is_err());
    }
}
