use clap::Parser;
use raycheck::{GameState, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,
}

/// Counts leaf nodes, printing per-move counts when `divide` is set.
/// Depth 0 has no root moves to split, so it always counts the root itself.
fn count_nodes(game: &mut GameState, depth: u8, divide: bool) -> u64 {
    if !divide || depth == 0 {
        return game.perft(depth);
    }
    let mut total = 0;
    for (mv, count) in game.perft_divide(depth) {
        println!("{}: {}", mv, count);
        total += count;
    }
    total
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut game = match GameState::from_fen(&args.fen) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid FEN '{}': {}", args.fen, e);
            std::process::exit(1);
        }
    };

    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);
    print!("{}", game.board());

    let start = std::time::Instant::now();
    let nodes = count_nodes(&mut game, args.depth, args.divide);
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );
}
