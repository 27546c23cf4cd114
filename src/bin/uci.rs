// Interface UCI (Universal Chess Interface) para o motor negamax.
// A busca corre numa thread à parte, alimentada por um canal; o ciclo do
// protocolo continua a responder a "isready" enquanto procura.

use chess_negamax::agent::{Agent, Level, MinimaxAgent, SearchSettings, MAX_DEPTH};
use chess_negamax::{Position, Score, MATE_SCORE};
use crossbeam::channel::{unbounded, Receiver, Sender};
use std::io::{self, BufRead, Write};
use std::thread;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

enum Job {
    Search {
        position: Position,
        settings: SearchSettings,
    },
    Quit,
}

struct UciEngine {
    position: Position,
    settings: SearchSettings,
    jobs: Sender<Job>,
    worker: Option<thread::JoinHandle<()>>,
}

impl UciEngine {
    fn new() -> Self {
        let (jobs, receiver) = unbounded();
        let worker = thread::spawn(move || search_worker(receiver));
        UciEngine {
            position: Position::new(),
            settings: SearchSettings::default(),
            jobs,
            worker: Some(worker),
        }
    }

    fn run(&mut self) {
        let stdin = io::stdin();

        for line in stdin.lock().lines() {
            let Ok(input) = line else {
                break;
            };
            let parts: Vec<&str> = input.split_whitespace().collect();

            if parts.is_empty() {
                continue;
            }

            match parts[0] {
                "uci" => self.handle_uci(),
                "isready" => send("readyok"),
                "ucinewgame" => self.position = Position::new(),
                "position" => self.handle_position(&parts),
                "go" => self.handle_go(&parts),
                "setoption" => self.handle_setoption(&parts),
                "quit" => break,
                _ => debug!(command = parts[0], "ignored"),
            }
        }

        self.shutdown();
    }

    fn handle_uci(&self) {
        send("id name Negamax");
        send("id author Pedro Contessoto");

        // Opções UCI
        send("option name Level type combo default medium var easy var medium var hard var expert var master");
        send(&format!(
            "option name Depth type spin default {} min 1 max {}",
            self.settings.depth, MAX_DEPTH
        ));
        send("option name Advanced type check default true");
        send("option name Ordering type check default true");

        send("uciok");
    }

    fn handle_position(&mut self, parts: &[&str]) {
        if parts.len() < 2 {
            return;
        }

        let mut idx = 1;

        let position = match parts[idx] {
            "startpos" => {
                idx += 1;
                Position::new()
            }
            "fen" => {
                idx += 1;
                let start = idx;

                // Coleta partes do FEN até "moves" ou fim
                while idx < parts.len() && parts[idx] != "moves" {
                    idx += 1;
                }

                match Position::from_fen(&parts[start..idx].join(" ")) {
                    Ok(position) => position,
                    Err(e) => {
                        send(&format!("info string {}", e));
                        return;
                    }
                }
            }
            _ => return,
        };
        self.position = position;

        // Processa movimentos se houver
        if idx < parts.len() && parts[idx] == "moves" {
            for text in &parts[idx + 1..] {
                if let Err(e) = self.position.play_uci(text) {
                    warn!(error = %e, "stopping move list");
                    send(&format!("info string {}", e));
                    break;
                }
            }
        }
    }

    fn handle_go(&mut self, parts: &[&str]) {
        let mut settings = self.settings;
        let mut idx = 1;

        // Só a profundidade conta: não há gestão de tempo
        while idx < parts.len() {
            if parts[idx] == "depth" {
                if let Some(depth) = parts.get(idx + 1).and_then(|d| d.parse::<u8>().ok()) {
                    settings.depth = depth.clamp(1, MAX_DEPTH);
                }
                idx += 2;
            } else {
                idx += 1;
            }
        }

        let job = Job::Search {
            position: self.position.clone(),
            settings,
        };
        if self.jobs.send(job).is_err() {
            send("bestmove 0000");
        }
    }

    fn handle_setoption(&mut self, parts: &[&str]) {
        let Some(name_idx) = parts.iter().position(|p| *p == "name") else {
            return;
        };
        let value_idx = parts.iter().position(|p| *p == "value").unwrap_or(parts.len());
        if value_idx <= name_idx {
            return;
        }
        let name = parts[name_idx + 1..value_idx].join(" ").to_ascii_lowercase();
        let value = parts.get(value_idx + 1..).map(|v| v.join(" ")).unwrap_or_default();

        match name.as_str() {
            "level" => match value.parse::<Level>() {
                Ok(level) => {
                    let ordering = self.settings.move_ordering;
                    self.settings = SearchSettings::for_level(level);
                    self.settings.move_ordering = ordering;
                }
                Err(e) => send(&format!("info string {}", e)),
            },
            "depth" => match value.parse::<u8>() {
                Ok(depth) if (1..=MAX_DEPTH).contains(&depth) => self.settings.depth = depth,
                _ => send(&format!("info string invalid depth '{}'", value)),
            },
            "advanced" => self.settings.advanced_eval = value.eq_ignore_ascii_case("true"),
            "ordering" => self.settings.move_ordering = value.eq_ignore_ascii_case("true"),
            _ => debug!(option = %name, "unknown option"),
        }
    }

    fn shutdown(&mut self) {
        let _ = self.jobs.send(Job::Quit);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn search_worker(jobs: Receiver<Job>) {
    for job in jobs.iter() {
        match job {
            Job::Search {
                mut position,
                settings,
            } => {
                let mut agent = MinimaxAgent::new(settings);
                match agent.choose_move(&mut position) {
                    Ok((mv, info)) => {
                        send(&format!(
                            "info depth {} score {} nodes {} time {}",
                            info.depth.unwrap_or(0),
                            score_field(info.score.unwrap_or(0)),
                            info.nodes.unwrap_or(0),
                            info.time_ms.unwrap_or(0)
                        ));
                        send(&format!("bestmove {}", mv));
                    }
                    Err(e) => {
                        send(&format!("info string {}", e));
                        send("bestmove 0000");
                    }
                }
            }
            Job::Quit => break,
        }
    }
}

/// Pontuações de mate saem como "mate", o resto em centipeões.
/// A busca não mede a distância ao mate, daí o ±1.
fn score_field(score: Score) -> String {
    if score >= MATE_SCORE {
        "mate 1".to_string()
    } else if score <= -MATE_SCORE {
        "mate -1".to_string()
    } else {
        format!("cp {}", score)
    }
}

fn send(line: &str) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}", line);
    let _ = out.flush();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut engine = UciEngine::new();
    engine.run();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mate_scores_are_reported_as_mate() {
        assert_eq!(score_field(MATE_SCORE), "mate 1");
        assert_eq!(score_field(-MATE_SCORE), "mate -1");
    }

    #[test]
    fn test_ordinary_scores_are_centipawns() {
        assert_eq!(score_field(0), "cp 0");
        assert_eq!(score_field(-35), "cp -35");
        assert_eq!(score_field(1_009_998), "cp 1009998");
    }
}
