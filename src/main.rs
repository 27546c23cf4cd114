// Motor Negamax - linha de comandos
// `best` escolhe um lance para um FEN; `batch` procura um ficheiro de FENs em paralelo.

use anyhow::{bail, Context, Result};
use chess_negamax::agent::{presets, AgentSpec};
use chess_negamax::api::choose_move_from_fen;
use chess_negamax::search::{ParallelSearcher, PositionEvaluator};
use chess_negamax::{Position, STARTING_FEN};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "negamax", version, about = "Negamax alpha-beta chess search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Escolhe um lance e escreve a resposta em JSON
    Best {
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        /// easy, medium, hard, expert, master ou debug
        #[arg(long)]
        level: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        depth: Option<i32>,
        #[arg(long)]
        advanced: Option<bool>,
        #[arg(long)]
        no_ordering: bool,
        /// Descrição completa do agente em JSON (ignora as outras opções)
        #[arg(long)]
        agent: Option<String>,
    },
    /// Procura cada FEN do ficheiro (um por linha) e escreve uma linha JSON por posição
    Batch {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value_t = 3)]
        depth: u8,
        #[arg(long)]
        threads: Option<usize>,
        /// Sem guião de abertura
        #[arg(long)]
        basic: bool,
        #[arg(long)]
        no_ordering: bool,
    },
    /// Lista os agentes pré-definidos
    Presets,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Command::Best {
            fen,
            level,
            depth,
            advanced,
            no_ordering,
            agent,
        } => {
            let spec = match agent {
                Some(json) => AgentSpec::from_json(&json).context("parsing --agent")?,
                None => AgentSpec {
                    depth,
                    use_advanced_eval: advanced,
                    use_move_ordering: Some(!no_ordering),
                    ..AgentSpec::for_difficulty(level.as_deref().unwrap_or("medium"))
                },
            };
            let reply = choose_move_from_fen(&fen, &spec);
            println!("{}", serde_json::to_string(&reply)?);
            if !reply.is_ok() {
                std::process::exit(1);
            }
        }
        Command::Batch {
            file,
            depth,
            threads,
            basic,
            no_ordering,
        } => run_batch(&file, depth, threads, basic, !no_ordering)?,
        Command::Presets => println!("{}", serde_json::to_string_pretty(&presets())?),
    }

    Ok(())
}

fn run_batch(file: &Path, depth: u8, threads: Option<usize>, basic: bool, ordering: bool) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;

    let fens: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();
    if fens.is_empty() {
        bail!("no positions in {}", file.display());
    }

    let positions = fens
        .iter()
        .map(|fen| Position::from_fen(fen))
        .collect::<Result<Vec<_>, _>>()?;

    let mut searcher = ParallelSearcher::new(depth).with_move_ordering(ordering);
    if let Some(threads) = threads {
        searcher = searcher.with_threads(threads);
    }
    let evaluator = if basic {
        PositionEvaluator::basic()
    } else {
        PositionEvaluator::with_default_script()
    };

    info!(positions = positions.len(), threads = searcher.threads(), depth, "batch search");
    let results = searcher.search_all(&positions, &evaluator)?;

    for (fen, result) in fens.iter().zip(results) {
        let line = json!({
            "fen": fen,
            "best_move": result.best_move.map(|m| m.to_string()),
            "score": result.score,
            "depth": result.depth,
            "nodes": result.nodes_searched,
        });
        println!("{}", line);
    }
    Ok(())
}
