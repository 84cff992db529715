use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use threadpool::ThreadPool;

use crate::agent::Agent;
use crate::config::TournamentConfig;
use crate::isolation::{Board, BoardConfig, Move, Player};
use crate::util::random_opening;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// the player on the move was stuck
    NoLegalMove,
    /// the agent on the move gave up while it still had a legal move
    Forfeit,
    /// the agent on the move answered after its time limit
    Timeout,
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub winner: Player,
    pub reason: GameEnd,
    /// moves made by the agents, openings excluded
    pub moves: Vec<Move>,
    pub final_board: Board,
}

fn single_ply(
    board: &Board,
    playing_agent: &mut dyn Agent,
    time_limit: Duration,
    print: bool,
) -> Result<Move, GameEnd> {
    let player = board.active_player();

    if print {
        println!("{}\n", board);
    }

    let start_time = Instant::now();

    let player_move = playing_agent.get_move(board, time_limit);

    let dur = start_time.elapsed();

    let player_move = player_move.ok_or(GameEnd::Forfeit)?;

    if print {
        println!("{} ({}) decided to make move {} after {:?}\n", player, playing_agent.name(), player_move, dur);
    }

    if dur > time_limit {
        warn!("{} answered after {:?}, limit was {:?}", player, dur, time_limit);
        return Err(GameEnd::Timeout);
    }

    if !board.is_legal_move(player_move) {
        panic!("Invalid move {} in position \n{}\n\n", player_move, board);
    }

    Ok(player_move)
}

/// Plays `board` out to the end, `agents[0]` moving for the first player and `agents[1]` for the second.
///
/// Every answer has to arrive within `time_limit`, a late or missing answer loses the game on the spot. An illegal
/// move is a bug in the agent and panics.
pub fn play_game(board: Board, mut agents: [&mut dyn Agent; 2], time_limit: Duration, print: bool) -> GameRecord {
    let mut board = board;
    let mut moves = Vec::new();

    let reason = loop {
        if board.is_terminal() {
            break GameEnd::NoLegalMove;
        }

        let player = board.active_player();

        match single_ply(&board, &mut *agents[player.index()], time_limit, print) {
            Ok(player_move) => {
                board = board.apply_move(player_move);
                moves.push(player_move);
            }
            Err(reason) => break reason,
        }
    };

    // whoever was on the move when the game ended lost it
    let winner = !board.active_player();

    if print {
        println!("Final board:\n\n{}\n", board);
        println!("{} won ({:?}).", winner, reason);
    }

    GameRecord {
        winner,
        reason,
        moves,
        final_board: board,
    }
}

/*====================================================================================================================*/

pub type AgentBuilder<'a> = &'a dyn Fn() -> Box<dyn Agent + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentResult {
    /// games won by the agent built by `builders[i]`, over both seats
    pub wins: [u64; 2],
    pub games: u64,
}

/// Plays `config.num_rounds` rounds between two agents on a thread pool.
///
/// Each round starts from a fresh random opening which is played twice, once with each agent moving first.
pub fn run_tournament(
    board_config: BoardConfig,
    config: &TournamentConfig,
    builders: [AgentBuilder; 2],
) -> TournamentResult {
    let num_workers = config.workers.unwrap_or_else(num_cpus::get).max(1);
    let time_limit = config.time_limit();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let wins = Arc::new([AtomicU64::new(0), AtomicU64::new(0)]);
    let games = Arc::new(AtomicU64::new(0));

    let pool = ThreadPool::new(num_workers);

    info!(
        "Running {} rounds on a {}x{} board with {} workers, {:?} per move",
        config.num_rounds, board_config.width, board_config.height, num_workers, time_limit
    );

    for round in 0..config.num_rounds {
        let opening = random_opening(Board::new(board_config), config.opening_plies, &mut rng);

        for swapped in [false, true] {
            // builder index seated at each player
            let seats = if swapped { [1, 0] } else { [0, 1] };

            let mut first_agent = builders[seats[0]]();
            let mut second_agent = builders[seats[1]]();

            let wins = Arc::clone(&wins);
            let games = Arc::clone(&games);

            pool.execute(move || {
                let record = play_game(opening, [&mut *first_agent, &mut *second_agent], time_limit, false);

                let winning_agent = seats[record.winner.index()];

                info!(
                    "Round {}{}: agent {} won as {} ({:?}) after {} moves",
                    round,
                    if swapped { " (swapped)" } else { "" },
                    winning_agent,
                    record.winner,
                    record.reason,
                    record.moves.len()
                );

                wins[winning_agent].fetch_add(1, Ordering::Release);
                games.fetch_add(1, Ordering::Release);
            });
        }
    }

    pool.join();

    let result = TournamentResult {
        wins: [wins[0].load(Ordering::Acquire), wins[1].load(Ordering::Acquire)],
        games: games.load(Ordering::Acquire),
    };

    info!("Agent 0 wins: {}", result.wins[0]);
    info!("Agent 1 wins: {}", result.wins[1]);

    result
}

/*====================================================================================================================*/
