//! Pieces module - Tetromino shapes and SRS rotation system
//!
//! Shapes are block offsets inside a 4x4 bounding box (x right, y down).
//! Kick offsets are stored in the SRS convention where y grows upward; the
//! engine negates dy when applying a kick to the board.
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Kick candidate (dx, dy), dy positive meaning "up"
pub type KickOffset = (i8, i8);

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// The falling piece. Replaced wholesale on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Top-left of the 4x4 bounding box in board coordinates
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A new piece at the spawn position, rotation state 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Candidate translated by (dx, dy) in board coordinates
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Candidate in `rotation` with an SRS kick applied (kick dy is y-up).
    pub fn kicked(&self, rotation: Rotation, kick: KickOffset) -> Self {
        let (dx, dy) = kick;
        Self {
            rotation,
            x: self.x + dx,
            y: self.y - dy,
            ..*self
        }
    }
}

/// Which kick table a piece uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickClass {
    O,
    I,
    /// J, L, S, T, Z
    Jlstz,
}

impl KickClass {
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::O => KickClass::O,
            PieceKind::I => KickClass::I,
            _ => KickClass::Jlstz,
        }
    }
}

/// SRS wall kick data for the eight 90° transitions.
/// Order within a row: 0=in place, 1-4=wall kicks
pub type KickTable = [[KickOffset; 5]; 8];

const NO_KICK: [KickOffset; 1] = [(0, 0)];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// I piece kick table (different from JLSTZ)
const I_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

// Half-turn kicks are a practical short list rather than a canonical table.
const JLSTZ_KICKS_180: [KickOffset; 7] =
    [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1), (2, 0), (-2, 0)];
const I_KICKS_180: [KickOffset; 7] = [(0, 0), (1, 0), (-1, 0), (2, 0), (-2, 0), (0, 1), (0, -1)];

/// Row of the 90° tables for a transition, `None` for non-adjacent states.
fn kick_row(from: Rotation, to: Rotation) -> Option<usize> {
    use Rotation::*;
    match (from, to) {
        (North, East) => Some(0),
        (East, North) => Some(1),
        (East, South) => Some(2),
        (South, East) => Some(3),
        (South, West) => Some(4),
        (West, South) => Some(5),
        (West, North) => Some(6),
        (North, West) => Some(7),
        _ => None,
    }
}

/// Ordered kick candidates for rotating `kind` from `from` to `to`.
///
/// Covers 90° and 180° transitions; a same-state "transition" yields the
/// single in-place candidate.
pub fn kick_candidates(kind: PieceKind, from: Rotation, to: Rotation) -> &'static [KickOffset] {
    let class = KickClass::of(kind);
    if class == KickClass::O || from == to {
        return &NO_KICK;
    }

    match kick_row(from, to) {
        Some(row) => match class {
            KickClass::I => &I_KICKS[row],
            _ => &JLSTZ_KICKS[row],
        },
        None => match class {
            KickClass::I => &I_KICKS_180,
            _ => &JLSTZ_KICKS_180,
        },
    }
}

/// Try to rotate a piece with wall kicks
///
/// Returns the first candidate accepted by `can_place`, or `None` if every
/// kick fails.
pub fn try_rotate(
    piece: &ActivePiece,
    to: Rotation,
    can_place: impl Fn(&ActivePiece) -> bool,
) -> Option<ActivePiece> {
    kick_candidates(piece.kind, piece.rotation, to)
        .iter()
        .map(|&kick| piece.kicked(to, kick))
        .find(|candidate| can_place(candidate))
}
