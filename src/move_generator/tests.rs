use super::*;
use crate::board::color::Color;
use crate::board::square::Square;
use crate::board::Board;
use crate::dama_move::{DamaMove, MoveKind};
use crate::dama_position;

fn paths(move_set: &MoveSet) -> Vec<Vec<Square>> {
    let mut paths: Vec<Vec<Square>> = move_set.iter().map(|m| m.path().to_vec()).collect();
    paths.sort();
    paths
}

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

#[test]
fn test_starting_position_has_eight_normal_moves() {
    let board = Board::starting_position();
    let moves = MoveGenerator::default().generate_moves(&board, Color::White);

    assert_eq!(MoveKind::Normal, moves.kind());
    assert_eq!(8, moves.len());
    assert!(moves.iter().all(|m| m.to_square().row() == 4));
    assert!(moves.mandatory_capture_squares().is_empty());
}

#[test]
fn test_single_capture_from_starting_position() {
    let mut board = Board::starting_position();
    board
        .put(sq(4, 0), crate::board::piece::Piece::Man, Color::Black)
        .unwrap();

    let moves = MoveGenerator::default().generate_moves(&board, Color::White);

    assert_eq!(MoveKind::Capture, moves.kind());
    assert_eq!(1, moves.len());
    let capture = &moves.moves()[0];
    assert_eq!(&[sq(5, 0), sq(3, 0)], capture.path());
    assert_eq!(&[sq(4, 0)], capture.captures());
    assert_eq!(vec![sq(5, 0)], moves.mandatory_capture_squares());
}

#[test]
fn test_only_longest_capture_is_legal() {
    let board = dama_position! {
        ........
        ........
        ........
        ........
        ..b...b.
        ......w.
        ..b.....
        ..w.....
    };

    let moves = MoveGenerator::default().generate_moves(&board, Color::White);

    assert_eq!(MoveKind::Capture, moves.kind());
    assert_eq!(vec![vec![sq(7, 2), sq(5, 2), sq(3, 2)]], paths(&moves));
    assert_eq!(&[sq(6, 2), sq(4, 2)], moves.moves()[0].captures());
}

#[test]
fn test_sideways_capture_chain() {
    let board = dama_position! {
        ........
        ........
        ........
        ........
        wb.b....
        ........
        ........
        ........
    };

    let moves = MoveGenerator::default().generate_moves(&board, Color::White);

    assert_eq!(vec![vec![sq(4, 0), sq(4, 2), sq(4, 4)]], paths(&moves));
    assert_eq!(2, moves.moves()[0].capture_count());
}

#[test]
fn test_man_never_captures_backward() {
    let board = dama_position! {
        ........
        ........
        ........
        ........
        ....w...
        ....b...
        ........
        ........
    };

    let moves = MoveGenerator::default().generate_moves(&board, Color::White);

    assert_eq!(MoveKind::Normal, moves.kind());
    assert_eq!(
        vec![
            vec![sq(4, 4), sq(3, 4)],
            vec![sq(4, 4), sq(4, 3)],
            vec![sq(4, 4), sq(4, 5)],
        ],
        paths(&moves)
    );
}

#[test]
fn test_black_man_moves_down_the_board() {
    let board = dama_position! {
        ........
        ........
        ...b....
        ........
        ........
        ........
        ........
        ........
    };

    let moves = MoveGenerator::default().generate_moves(&board, Color::Black);

    assert_eq!(
        vec![
            vec![sq(2, 3), sq(2, 2)],
            vec![sq(2, 3), sq(2, 4)],
            vec![sq(2, 3), sq(3, 3)],
        ],
        paths(&moves)
    );
}

#[test]
fn test_king_slides_any_distance() {
    let board = dama_position! {
        ........
        ........
        ........
        ...W....
        ........
        ........
        ........
        ........
    };

    let moves = MoveGenerator::default().generate_moves(&board, Color::White);

    assert_eq!(MoveKind::Normal, moves.kind());
    assert_eq!(14, moves.len());
}

#[test]
fn test_king_long_capture_lands_on_any_empty_square_beyond() {
    let board = dama_position! {
        ....b...
        ....b...
        ........
        ........
        ........
        ....b...
        ........
        ....W...
    };

    let moves = MoveGenerator::default().generate_moves(&board, Color::White);

    assert_eq!(MoveKind::Capture, moves.kind());
    assert_eq!(
        vec![
            vec![sq(7, 4), sq(2, 4)],
            vec![sq(7, 4), sq(3, 4)],
            vec![sq(7, 4), sq(4, 4)],
        ],
        paths(&moves)
    );
    assert!(moves.iter().all(|m| m.captures() == [sq(5, 4)]));
}

#[test]
fn test_king_cannot_jump_two_pieces_in_a_row() {
    let board = dama_position! {
        ........
        ........
        ........
        ....b...
        ....b...
        ........
        ........
        ....W...
    };

    let moves = MoveGenerator::default().generate_moves(&board, Color::White);

    assert_eq!(MoveKind::Normal, moves.kind());
}

#[test]
fn test_king_capture_chain_turns_corners() {
    let board = dama_position! {
        ........
        ........
        ........
        ........
        ......b.
        ........
        ........
        W..b....
    };

    let moves = MoveGenerator::default().generate_moves(&board, Color::White);

    // only the landing on g1 lines up with the second piece
    assert_eq!(
        vec![
            vec![sq(7, 0), sq(7, 6), sq(0, 6)],
            vec![sq(7, 0), sq(7, 6), sq(1, 6)],
            vec![sq(7, 0), sq(7, 6), sq(2, 6)],
            vec![sq(7, 0), sq(7, 6), sq(3, 6)],
        ],
        paths(&moves)
    );
}

#[test]
fn test_blocked_player_has_no_moves() {
    let board = dama_position! {
        ........
        ........
        ........
        ........
        ........
        ........
        bww.....
        w.......
    };

    let generator = MoveGenerator::default();
    assert!(generator.is_blocked(&board, Color::Black));
    assert!(!generator.is_blocked(&board, Color::White));
}

#[test]
fn test_history_filter_drops_third_occurrence() {
    let board = dama_position! {
        .......B
        ........
        ........
        ........
        ........
        ........
        ........
        W.......
    };
    let generator = MoveGenerator::default();
    let repeated_move = DamaMove::normal(sq(7, 0), sq(6, 0));
    let repeated = repeated_move.apply(&board).unwrap();

    let unfiltered = generator.generate_moves(&board, Color::White);
    let once = generator.generate_moves_with_history(&board, Color::White, &[repeated]);
    let twice =
        generator.generate_moves_with_history(&board, Color::White, &[repeated, board, repeated]);

    assert_eq!(unfiltered.len(), once.len());
    assert_eq!(unfiltered.len() - 1, twice.len());
    assert!(!twice.contains(&repeated_move));
}

#[test]
fn test_history_filter_keeps_moves_when_all_would_repeat() {
    let board = dama_position! {
        ........
        wbb.....
        ........
        ........
        ........
        ........
        ........
        ........
    };
    let generator = MoveGenerator::default();
    let only_move = generator.generate_moves(&board, Color::White);
    assert_eq!(1, only_move.len());

    let next = only_move.moves()[0].apply(&board).unwrap();
    let filtered = generator.generate_moves_with_history(&board, Color::White, &[next, next]);

    assert_eq!(only_move, filtered);
}

#[test]
fn test_count_positions() {
    let board = Board::starting_position();
    let generator = MoveGenerator::default();

    assert_eq!(8, generator.count_positions(0, &board, Color::White));
    assert_eq!(72, generator.count_positions(1, &board, Color::White));
}

#[test]
fn test_destinations_from() {
    let board = Board::starting_position();
    let moves = MoveGenerator::default().generate_moves(&board, Color::White);

    assert_eq!(vec![sq(4, 2)], moves.destinations_from(sq(5, 2)));
    assert!(moves.destinations_from(sq(6, 2)).is_empty());
}
