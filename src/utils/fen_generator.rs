use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::file_char;

pub fn generate_fen(board: &Board) -> String {
    let side_to_move = match board.player() {
        Color::Light => "w",
        Color::Dark => "b",
    };

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(board),
        side_to_move,
        generate_castling_field(board.castling_rights()),
        generate_en_passant_field(board),
        board.draw_move_rules_status(),
        fullmove_number(board)
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            if let Some(figure) = board.figure(file, rank) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(figure.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(castling_rights: CastlingRights) -> String {
    let mut out = String::new();

    if castling_rights & CASTLE_LIGHT_KINGSIDE != 0 {
        out.push('K');
    }
    if castling_rights & CASTLE_LIGHT_QUEENSIDE != 0 {
        out.push('Q');
    }
    if castling_rights & CASTLE_DARK_KINGSIDE != 0 {
        out.push('k');
    }
    if castling_rights & CASTLE_DARK_QUEENSIDE != 0 {
        out.push('q');
    }

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

fn generate_en_passant_field(board: &Board) -> String {
    match board.en_passant_file() {
        Some(file) => {
            let rank = match board.player() {
                Color::Light => '6',
                Color::Dark => '3',
            };
            format!("{}{}", file_char(file), rank)
        }
        None => "-".to_owned(),
    }
}

/// The fullmove number starts at the root's and grows after each dark ply.
fn fullmove_number(board: &Board) -> u32 {
    let plies = board.turn() - 1;
    let dark_started = u32::from(board.root_player() == Color::Dark);
    board.root_fullmove_number() + (plies + dark_started) / 2
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn generate_starting_fen() {
        assert_eq!(generate_fen(&Board::new()), STARTING_POSITION_FEN);
    }

    #[test]
    fn round_trip_fen_preserves_all_fields() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 12 34";
        let board = Board::from_fen(fen).expect("fixture FEN should parse");
        assert_eq!(generate_fen(&board), fen);
    }

    #[test]
    fn double_push_writes_the_target_and_counters_advance() {
        let mut board = Board::new();
        assert!(board.execute(4, 1, 4, 3));
        assert_eq!(
            generate_fen(&board),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert!(board.execute(6, 7, 5, 5));
        assert_eq!(
            generate_fen(&board),
            "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2"
        );
    }
}
