//! Frogger's Revenge headless runner
//!
//! Plays one seeded session with a simple autopilot, records the result on
//! the scoreboard and prints the listing.
//!
//! Usage: `frogger-revenge [PLAYER] [SEED]`

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use frogger_revenge::consts::*;
    use frogger_revenge::sim::collision::{first_overlap, log_under};
    use frogger_revenge::sim::{Direction, GamePhase, GameState, Level, TickInput};

    /// Ticks between autopilot decisions
    const THINK_EVERY: u64 = 6;

    const FIRE_CYCLE: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Hops upward when the next row looks safe, shoots on combat levels
    #[derive(Default)]
    pub struct Autopilot {
        frame: u64,
        shots: usize,
    }

    impl Autopilot {
        pub fn next_input(&mut self, state: &GameState) -> TickInput {
            self.frame += 1;
            let mut input = TickInput::default();
            if state.phase != GamePhase::Playing || self.frame % THINK_EVERY != 0 {
                return input;
            }

            if state.level.has_combat() {
                input.fire = Some(FIRE_CYCLE[self.shots % FIRE_CYCLE.len()]);
                self.shots += 1;
            }
            if state.level.has_goal() && safe_to_hop(state) {
                input.step = Some(Direction::Up);
            }
            input
        }
    }

    fn safe_to_hop(state: &GameState) -> bool {
        let mut target = state.avatar.bounds();
        target.y -= TILE;
        let danger = target.expand_x(TILE);

        if first_overlap(&state.vehicles, &danger).is_some()
            || first_overlap(&state.critters, &danger).is_some()
        {
            return false;
        }
        match state.level.river_band() {
            Some((top, bottom)) if target.y >= top && target.y < bottom => {
                log_under(&state.logs, &target).is_some()
            }
            _ => true,
        }
    }

    pub fn describe(level: Level) -> &'static str {
        match level {
            Level::RoadCrossing => "road crossing",
            Level::CritterSurvival => "critter survival",
            Level::TrafficGauntlet => "traffic gauntlet",
            Level::RiverRun => "river run",
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "frogger-revenge")]
#[command(about = "Play one headless Frogger's Revenge run and record the score")]
struct Args {
    /// Name recorded on the scoreboard
    #[arg(default_value = "Player")]
    player: String,

    /// RNG seed for a reproducible run (defaults to the clock)
    seed: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use frogger_revenge::consts::TICK_RATE;
    use frogger_revenge::highscores::{DEFAULT_LISTING, ScoreBoard};
    use frogger_revenge::sim::{GameEvent, TickInput};
    use frogger_revenge::{GameSession, ScoreboardShell, Settings};

    /// Ten minutes of play
    const MAX_TICKS: u64 = TICK_RATE as u64 * 600;

    env_logger::init();
    log::info!("Frogger's Revenge (headless) starting...");

    let args = Args::parse();
    let player = args.player;
    let seed = args
        .seed
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis() as u64);

    let settings = Settings::load();
    let board = ScoreBoard::new(settings.scores_path.clone());
    let shell = ScoreboardShell::new(board.clone());
    let mut session = GameSession::new(seed, player, settings, shell);
    let mut pilot = autopilot::Autopilot::default();

    let mut level = session.state().level;
    let mut ticks = 0;
    while ticks < MAX_TICKS {
        let input = pilot.next_input(session.state());
        if !session.update(&input) {
            break;
        }
        ticks += 1;
        if session.state().level != level {
            level = session.state().level;
            log::info!(
                "Reached level {} ({}) at tick {}, score {}",
                level.number(),
                autopilot::describe(level),
                ticks,
                session.state().score
            );
        }
    }
    if !session.is_ended() {
        log::info!("Tick limit reached, leaving without a score");
        session.update(&TickInput {
            back_to_menu: true,
            ..Default::default()
        });
    }

    match session.shell().outcome() {
        Some(GameEvent::GameOver {
            final_score,
            player_name,
        }) => println!("Game over: {} scored {}", player_name, final_score),
        Some(GameEvent::BackToMenu) | None => println!("Run abandoned"),
    }

    println!("\nTop scores");
    for (rank, record) in board.top_or_empty(DEFAULT_LISTING).iter().enumerate() {
        println!("{:>3}. {:<16} {:>8}  {}", rank + 1, record.player, record.score, record.when);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `GameSession` directly
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["frogger-revenge"]).unwrap();
        assert_eq!(args.player, "Player");
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_args_player_and_seed() {
        let args = Args::try_parse_from(["frogger-revenge", "Bob", "12"]).unwrap();
        assert_eq!(args.player, "Bob");
        assert_eq!(args.seed, Some(12));
    }

    #[test]
    fn test_malformed_seed_is_rejected() {
        let err = Args::try_parse_from(["frogger-revenge", "Bob", "12x"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
