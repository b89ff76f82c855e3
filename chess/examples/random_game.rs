// Plays a game between two random players
//
// Usage: random_game [SEED] [MAX_PLIES]
//
// Set `RUST_LOG=debug` to see every move.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rookery::{board::PrettyStyle, Game};

use std::env;
use std::process;

fn parse_arg<T: std::str::FromStr>(arg: Option<String>, name: &str, default: T) -> T {
    match arg {
        Some(s) => match s.parse() {
            Ok(val) => val,
            Err(_) => {
                eprintln!("bad {}: {:?}", name, s);
                process::exit(1);
            }
        },
        None => default,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let seed: u64 = parse_arg(args.next(), "seed", 42);
    let max_plies: usize = parse_arg(args.next(), "ply cap", 300);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::initial();

    while !game.is_finished() && game.ply() < max_plies {
        let moves = game.legal_moves();
        let mv = match moves.choose(&mut rng) {
            Some(mv) => *mv,
            None => break,
        };
        if let Err(e) = game.apply_move(mv) {
            log::error!("{}", e);
            process::exit(1);
        }
    }

    println!("{}", game.position().pretty(PrettyStyle::Utf8));
    println!("FEN: {}", game.position().as_fen());
    if game.is_finished() {
        println!("{} after {} plies", game.outcome(), game.ply());
    } else {
        println!("Stopped after {} plies: {}", game.ply(), game.outcome());
    }
}
