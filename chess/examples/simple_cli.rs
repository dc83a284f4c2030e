// Simple command-line application to play chess

use chessrules::{board::PrettyStyle, Color, Move, MoveChain};
use std::io::{self, BufRead, Write};

fn main() {
    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let mut chain = MoveChain::new_initial();

    loop {
        if let Some(outcome) = chain.outcome() {
            println!("{}", chain.last().board().pretty(PrettyStyle::Ascii));
            println!("Game finished: {}", outcome);
            println!("Moves: {}", chain.uci_list());
            break;
        }

        println!("{}", chain.last().board().pretty(PrettyStyle::Ascii));
        let side = match chain.last().side() {
            Color::White => "White",
            Color::Black => "Black",
        };
        if chain.last().is_check(chain.last().side()) {
            println!("{} is in check", side);
        }
        print!("{} move ({}): ", side, chain.len() / 2 + 1);
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();

        if s == "undo" {
            chain.pop();
            println!();
            continue;
        }

        // Note that we could just call `MoveChain::push_uci()` here directly. But we want
        // to show more features here, so separate parsing a move and making it.
        let mv = match s.parse::<Move>() {
            Ok(mv) => mv,
            Err(e) => {
                println!("Bad move: {}", e);
                println!();
                continue;
            }
        };

        if let Err(e) = chain.push(mv) {
            println!("Illegal move: {}", e);
            let legal = chain.last().valid_moves(mv.src());
            if !legal.is_empty() {
                let legal: Vec<_> = legal.iter().map(ToString::to_string).collect();
                println!("Legal moves from {}: {}", mv.src(), legal.join(" "));
            }
        }

        println!();
    }
}
