use crate::error::ChessError;
use crate::types::*;
use crate::zobrist::ZOBRIST;

/// Halfmove clock at which a draw may be claimed (fifty-move rule).
pub const FIFTY_MOVE_PLIES: u32 = 100;
/// Halfmove clock at which the game ends on its own (seventy-five-move rule).
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn none() -> Self {
        Self {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }

    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    /// Drops any right tied to a king or rook home square being touched.
    fn touch(&mut self, sq: u8) {
        match sq {
            0 => self.wq = false,
            4 => {
                self.wk = false;
                self.wq = false;
            }
            7 => self.wk = false,
            56 => self.bq = false,
            60 => {
                self.bk = false;
                self.bq = false;
            }
            63 => self.bk = false,
            _ => {}
        }
    }
}

/// What a real move changed, beyond the restorable scalar state.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Played {
    mv: Move,
    moved: Piece,
    captured: Option<Piece>,
    captured_on: u8,
    rook_move: Option<(u8, u8)>,
}

/// One entry of the undo stack. `played` is `None` for a passed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Undo {
    key: u64,
    castling: CastlingRights,
    en_passant: Option<u8>,
    halfmove_clock: u32,
    fullmove_number: u32,
    played: Option<Played>,
}

/// Mailbox position with its own undo history.
///
/// Every `apply`/`pass_turn` pushes one record and `undo` pops one, so a
/// position returns to exactly its earlier state (history included) after
/// balanced calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    history: Vec<Undo>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights::all();

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    /// Parses Forsyth-Edwards Notation. The clock fields may be omitted.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(ChessError::fen(fen, "expected at least 4 fields"));
        }

        let mut pos = Position::empty();
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::fen(fen, "board needs 8 ranks"));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_char(ch)
                        .ok_or_else(|| ChessError::fen(fen, format!("bad piece `{ch}`")))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let s = sq(file, rank)
                        .ok_or_else(|| ChessError::fen(fen, "too many files in a rank"))?;
                    pos.board[s as usize] = Some(Piece::new(color, kind));
                    file += 1;
                }
                if file > 8 {
                    return Err(ChessError::fen(fen, "too many files in a rank"));
                }
            }
            if file != 8 {
                return Err(ChessError::fen(fen, "not enough files in a rank"));
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::fen(fen, format!("bad side to move `{other}`"))),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => pos.castling.wk = true,
                    'Q' => pos.castling.wq = true,
                    'k' => pos.castling.bk = true,
                    'q' => pos.castling.bq = true,
                    _ => return Err(ChessError::fen(fen, format!("bad castling flag `{c}`"))),
                }
            }
        }

        pos.en_passant = match parts[3] {
            "-" => None,
            coord => Some(
                coord_to_sq(coord)
                    .ok_or_else(|| ChessError::fen(fen, format!("bad en-passant `{coord}`")))?,
            ),
        };

        pos.halfmove_clock = parse_counter(fen, parts.get(4), 0)?;
        pos.fullmove_number = parse_counter(fen, parts.get(5), 1)?;
        Ok(pos)
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&s| self.piece_at(s) == Some(Piece::new(c, PieceKind::King)))
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(k) => self.is_square_attacked(k, c.other()),
            None => false,
        }
    }

    /// Repetition key of the current position.
    pub fn key(&self) -> u64 {
        ZOBRIST.position_key(self)
    }

    /// Number of moves and passes currently on the undo stack.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Plays `mv` after checking it fits the position.
    ///
    /// The check is shallow (mover owns the from-square, target is not an
    /// own piece); it exists so a stale move is refused instead of
    /// corrupting the board. Nothing is mutated on `Err`.
    pub fn apply(&mut self, mv: Move) -> Result<(), ChessError> {
        let fits = mv.from < 64
            && mv.to < 64
            && match self.piece_at(mv.from) {
                Some(pc) if pc.color == self.side_to_move => self
                    .piece_at(mv.to)
                    .map_or(true, |target| target.color != pc.color),
                _ => false,
            };
        if !fits {
            return Err(ChessError::IllegalMove {
                mv: crate::uci::move_to_uci(mv),
            });
        }
        let key = self.key();
        self.make_move(mv, key);
        Ok(())
    }

    /// Passes the turn without moving a piece (a null move).
    pub fn pass_turn(&mut self) {
        self.history.push(self.snapshot(self.key(), None));
        self.en_passant = None;
        self.halfmove_clock += 1;
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
    }

    /// Reverts the most recent `apply` or `pass_turn`. No-op on an empty stack.
    pub fn undo(&mut self) {
        if let Some(undo) = self.history.pop() {
            self.restore(undo);
        }
    }

    fn snapshot(&self, key: u64, played: Option<Played>) -> Undo {
        Undo {
            key,
            castling: self.castling.clone(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            played,
        }
    }

    /// Plays `mv` unchecked and records `key` as the key of the position
    /// being left. Probes that undo at once (legality tests, perft) pass 0;
    /// only recorded keys feed repetition counting.
    pub(crate) fn make_move(&mut self, mv: Move, key: u64) {
        let (from, to) = (mv.from, mv.to);
        let Some(moved) = self.piece_at(from) else {
            return;
        };
        let mut undo = self.snapshot(key, None);

        let mut captured_on = to;
        if mv.is_en_passant {
            // captured pawn sits beside the mover, on the from rank
            captured_on = (from / 8) * 8 + to % 8;
        }
        let captured = self.piece_at(captured_on);
        self.set_piece(captured_on, None);

        let placed = match (moved.kind, mv.promo) {
            (PieceKind::Pawn, promo) if rank_of(to) == 0 || rank_of(to) == 7 => {
                Piece::new(moved.color, promo.unwrap_or(PieceKind::Queen))
            }
            _ => moved,
        };
        self.set_piece(from, None);
        self.set_piece(to, Some(placed));

        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let squares = match (from, to) {
                (4, 6) => Some((7, 5)),
                (4, 2) => Some((0, 3)),
                (60, 62) => Some((63, 61)),
                (60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = squares {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                rook_move = Some((rf, rt));
            }
        }

        self.castling.touch(from);
        self.castling.touch(to);

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = Some((from + to) / 2);
        }

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        undo.played = Some(Played {
            mv,
            moved,
            captured,
            captured_on,
            rook_move,
        });
        self.history.push(undo);
    }

    fn restore(&mut self, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        let Some(played) = undo.played else {
            return;
        };
        if let Some((rf, rt)) = played.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }
        self.set_piece(played.mv.to, None);
        self.set_piece(played.mv.from, Some(played.moved));
        self.set_piece(played.captured_on, played.captured);
    }

    /// How often the current position appears in this game, itself included.
    pub fn repetition_count(&self) -> usize {
        let key = self.key();
        1 + self.history.iter().filter(|u| u.key == key).count()
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.in_check(self.side_to_move) && !self.has_legal_moves()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.in_check(self.side_to_move) && !self.has_legal_moves()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_PLIES
    }

    /// Fifty-move rule or threefold repetition: a draw the side to move may
    /// claim now, or by announcing a legal move that brings it about.
    pub fn is_claimable_draw(&mut self) -> bool {
        self.can_claim_fifty_moves() || self.can_claim_threefold_repetition()
    }

    pub fn can_claim_fifty_moves(&mut self) -> bool {
        if self.is_fifty_move_draw() && self.has_legal_moves() {
            return true;
        }
        if self.halfmove_clock + 1 < FIFTY_MOVE_PLIES {
            return false;
        }
        let key = self.key();
        self.legal_moves().into_iter().any(|mv| {
            self.make_move(mv, key);
            // a capture or pawn move zeroes the clock
            let claim = self.is_fifty_move_draw() && self.has_legal_moves();
            self.undo();
            claim
        })
    }

    pub fn can_claim_threefold_repetition(&mut self) -> bool {
        if self.repetition_count() >= 3 {
            return true;
        }
        // A move can only complete a threefold if some position since the
        // last capture or pawn move has already been seen twice.
        let mut recent: Vec<u64> = self
            .history
            .iter()
            .rev()
            .take(self.halfmove_clock as usize)
            .map(|u| u.key)
            .collect();
        recent.sort_unstable();
        if !recent.windows(2).any(|w| w[0] == w[1]) {
            return false;
        }

        let key = self.key();
        self.legal_moves().into_iter().any(|mv| {
            self.make_move(mv, key);
            let claim = self.repetition_count() >= 3;
            self.undo();
            claim
        })
    }

    /// Neither side can ever deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        self.has_insufficient_material(Color::White) && self.has_insufficient_material(Color::Black)
    }

    /// `color` alone can no longer mate, whatever the opponent does.
    pub fn has_insufficient_material(&self, color: Color) -> bool {
        let pieces = |c: Color| {
            (0..64u8).filter_map(move |s| self.piece_at(s).filter(|p| p.color == c).map(|p| (s, p)))
        };
        let count = |c: Color, kind: PieceKind| pieces(c).filter(|(_, p)| p.kind == kind).count();

        let heavy = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen];
        if heavy.iter().any(|&k| count(color, k) > 0) {
            return false;
        }

        if count(color, PieceKind::Knight) > 0 {
            // a lone knight, and the opponent has nothing to block with
            let own_total = pieces(color).count();
            let opponent_minor_or_pawn = pieces(color.other())
                .any(|(_, p)| p.kind != PieceKind::King && p.kind != PieceKind::Queen);
            return own_total <= 2 && !opponent_minor_or_pawn;
        }

        if count(color, PieceKind::Bishop) > 0 {
            let mut bishops = (0..64u8).filter(|&s| {
                self.piece_at(s).map(|p| p.kind) == Some(PieceKind::Bishop)
            });
            let all_dark = bishops.clone().all(is_dark_sq);
            let all_light = bishops.all(|s| !is_dark_sq(s));
            let no_pawns_or_knights = !(0..64u8).any(|s| {
                matches!(
                    self.piece_at(s).map(|p| p.kind),
                    Some(PieceKind::Pawn) | Some(PieceKind::Knight)
                )
            });
            return (all_dark || all_light) && no_pawns_or_knights;
        }

        true
    }

    /// The game has ended without any claim: mate, stalemate, dead
    /// position, seventy-five-move rule or fivefold repetition.
    pub fn is_game_over(&mut self) -> bool {
        self.is_insufficient_material()
            || self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES
            || self.repetition_count() >= 5
            || !self.has_legal_moves()
    }
}

fn parse_counter(fen: &str, field: Option<&&str>, default: u32) -> Result<u32, ChessError> {
    match field {
        None => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|_| ChessError::fen(fen, format!("bad counter `{text}`"))),
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
