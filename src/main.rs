use std::str::FromStr;
use std::time::Duration;

use log::info;

use isolation::agent::{Agent, AlphaBetaAgent, FirstMoveAgent, GreedyAgent, MinimaxAgent, RandomAgent};
use isolation::config::{Config, SearchConfig};
use isolation::error::Error;
use isolation::isolation::valuation::mobility_valuation;
use isolation::tournament::{play_game, run_tournament};
use isolation::Board;

const USAGE: &str = "isolation move <file> [ms] | play <agent> <agent> | tournament <agent> <agent>";

/// search depth of the fixed depth minimax agent when the config doesn't cap the depth
const DEFAULT_MINIMAX_DEPTH: u32 = 4;

#[derive(Debug, Clone, Copy)]
enum AgentKind {
    First,
    Random,
    Greedy,
    Minimax,
    AlphaBeta,
}

impl FromStr for AgentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(AgentKind::First),
            "random" => Ok(AgentKind::Random),
            "greedy" => Ok(AgentKind::Greedy),
            "minimax" => Ok(AgentKind::Minimax),
            "alphabeta" => Ok(AgentKind::AlphaBeta),
            _ => Err(Error::UnknownAgent(s.to_owned())),
        }
    }
}

impl AgentKind {
    fn build(self, search: &SearchConfig) -> Box<dyn Agent + Send> {
        match self {
            AgentKind::First => Box::new(FirstMoveAgent::new()),
            AgentKind::Random => Box::new(RandomAgent::new()),
            AgentKind::Greedy => Box::new(GreedyAgent::default()),
            AgentKind::Minimax => Box::new(MinimaxAgent::new(
                search.max_depth.unwrap_or(DEFAULT_MINIMAX_DEPTH).max(1),
                true,
                search.clone(),
                mobility_valuation,
            )),
            AgentKind::AlphaBeta => Box::new(AlphaBetaAgent::new(search.clone(), mobility_valuation)),
        }
    }
}

fn agent_pair(args: &[String]) -> Result<[AgentKind; 2], Error> {
    match args {
        [first, second] => Ok([first.parse()?, second.parse()?]),
        _ => Err(Error::Usage(USAGE)),
    }
}

fn find_move(config: &Config, path: &str, time_ms: Option<&String>) -> Result<(), Error> {
    let board: Board = std::fs::read_to_string(path)?.parse()?;

    let time_left = match time_ms {
        Some(ms) => Duration::from_millis(ms.parse().map_err(|_| Error::Usage(USAGE))?),
        None => config.tournament.time_limit(),
    };

    let mut agent = AlphaBetaAgent::new(config.search.clone(), mobility_valuation);

    match agent.get_move(&board, time_left) {
        Some(best_move) => {
            if let Some(result) = agent.last_result() {
                info!(
                    "Searched to depth {} ({} nodes), value {}",
                    result.depth, result.nodes_visited, result.value
                );
            }
            println!("{}", best_move);
        }
        None => println!("no legal move, {} has lost", board.active_player()),
    }

    Ok(())
}

fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.split_first() {
        Some((cmd, rest)) if cmd == "move" => match rest {
            [path] => find_move(&config, path, None),
            [path, ms] => find_move(&config, path, Some(ms)),
            _ => Err(Error::Usage(USAGE)),
        },
        Some((cmd, rest)) if cmd == "play" => {
            let [first, second] = agent_pair(rest)?;

            let mut first_agent = first.build(&config.search);
            let mut second_agent = second.build(&config.search);

            play_game(
                Board::new(config.board),
                [&mut *first_agent, &mut *second_agent],
                config.tournament.time_limit(),
                true,
            );

            Ok(())
        }
        Some((cmd, rest)) if cmd == "tournament" => {
            let [first, second] = agent_pair(rest)?;

            let first_builder = || first.build(&config.search);
            let second_builder = || second.build(&config.search);

            let result = run_tournament(config.board, &config.tournament, [&first_builder, &second_builder]);

            println!("{:?} wins: {}", first, result.wins[0]);
            println!("{:?} wins: {}", second, result.wins[1]);
            println!("Games:      {}", result.games);

            Ok(())
        }
        _ => Err(Error::Usage(USAGE)),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);

        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = std::error::Error::source(cause);
        }

        std::process::exit(1);
    }
}
