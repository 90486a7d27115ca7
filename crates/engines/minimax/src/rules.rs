//! The contract between the search and whatever owns the board.

use std::error::Error as StdError;
use std::ops::{Deref, DerefMut};

use chess_core::{ChessError, Color, Move, Piece, Position};

/// Rules engine operations the evaluator and search rely on.
///
/// Implementations mutate one position in place. `undo` reverts the most
/// recent `apply` or `pass_turn`, restoring every piece of state. An `apply`
/// that returns `Err` must leave the position untouched.
pub trait Rules {
    type Error: StdError + Send + Sync + 'static;

    fn legal_moves(&mut self) -> Vec<Move>;
    fn apply(&mut self, mv: Move) -> Result<(), Self::Error>;
    fn pass_turn(&mut self);
    fn undo(&mut self);

    fn side_to_move(&self) -> Color;
    fn piece_at(&self, sq: u8) -> Option<Piece>;
    fn is_capture(&self, mv: Move) -> bool;

    fn is_checkmate(&mut self) -> bool;
    fn is_stalemate(&mut self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    fn is_claimable_draw(&mut self) -> bool;
    fn is_game_over(&mut self) -> bool;
}

impl Rules for Position {
    type Error = ChessError;

    fn legal_moves(&mut self) -> Vec<Move> {
        Position::legal_moves(self)
    }

    fn apply(&mut self, mv: Move) -> Result<(), ChessError> {
        Position::apply(self, mv)
    }

    fn pass_turn(&mut self) {
        Position::pass_turn(self)
    }

    fn undo(&mut self) {
        Position::undo(self)
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn piece_at(&self, sq: u8) -> Option<Piece> {
        Position::piece_at(self, sq)
    }

    fn is_capture(&self, mv: Move) -> bool {
        mv.is_en_passant || Position::piece_at(self, mv.to).is_some()
    }

    fn is_checkmate(&mut self) -> bool {
        Position::is_checkmate(self)
    }

    fn is_stalemate(&mut self) -> bool {
        Position::is_stalemate(self)
    }

    fn is_insufficient_material(&self) -> bool {
        Position::is_insufficient_material(self)
    }

    fn is_claimable_draw(&mut self) -> bool {
        Position::is_claimable_draw(self)
    }

    fn is_game_over(&mut self) -> bool {
        Position::is_game_over(self)
    }
}

/// One applied move (or passed turn) that is undone when dropped.
///
/// The guard holds the only mutable borrow of the rules engine while it
/// lives, so plies nest strictly last-in-first-out and every exit path,
/// `?` included, reverts exactly the ply it made.
pub struct Ply<'a, R: Rules + ?Sized> {
    rules: &'a mut R,
}

impl<'a, R: Rules + ?Sized> Ply<'a, R> {
    pub fn apply(rules: &'a mut R, mv: Move) -> Result<Self, R::Error> {
        rules.apply(mv)?;
        Ok(Ply { rules })
    }

    pub fn pass(rules: &'a mut R) -> Self {
        rules.pass_turn();
        Ply { rules }
    }
}

impl<R: Rules + ?Sized> Deref for Ply<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.rules
    }
}

impl<R: Rules + ?Sized> DerefMut for Ply<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.rules
    }
}

impl<R: Rules + ?Sized> Drop for Ply<'_, R> {
    fn drop(&mut self) {
        self.rules.undo();
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
