use crate::pieces::ActivePiece;
use crate::types::{EngineState, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a renderer or HUD reads once per tick.
///
/// `board` holds color indices (0 = empty), hidden rows included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: ActiveSnapshot,
    pub ghost_y: i8,
    pub hold: Option<PieceKind>,
    pub hold_used: bool,
    pub queue: [PieceKind; PREVIEW_LEN],
    pub state: EngineState,
    pub time_ms: u64,
    pub lines_cleared: u32,
    pub lines_remaining: u32,
    pub countdown_left: u32,
}

impl RunSnapshot {
    /// Only the rows a player sees.
    pub fn visible_rows(&self) -> &[[u8; BOARD_WIDTH as usize]] {
        &self.board[crate::types::HIDDEN_ROWS as usize..]
    }
}

impl Default for RunSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: ActiveSnapshot::from(ActivePiece::spawn(PieceKind::I)),
            ghost_y: 0,
            hold: None,
            hold_used: false,
            queue: [PieceKind::I; PREVIEW_LEN],
            state: EngineState::Countdown,
            time_ms: 0,
            lines_cleared: 0,
            lines_remaining: 0,
            countdown_left: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VISIBLE_ROWS;

    #[test]
    fn visible_rows_skip_headroom() {
        let mut snap = RunSnapshot::default();
        snap.board[2][0] = 3;
        let visible = snap.visible_rows();
        assert_eq!(visible.len(), VISIBLE_ROWS as usize);
        assert_eq!(visible[0][0], 3);
    }
}
