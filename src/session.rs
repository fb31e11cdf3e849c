//! Host-shell wiring around the simulation
//!
//! A `GameSession` owns one run and forwards its single terminal event to the
//! host shell. After that the session ignores further updates.

use crate::highscores::{ScoreRecord, ScoreStore};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};

/// Callbacks into whatever hosts the game (menu, window, headless runner)
pub trait HostShell {
    /// The run ended; `final_score` already includes any end bonus
    fn on_game_over(&mut self, final_score: u64, player_name: &str);
    /// The player asked to leave for the menu
    fn on_back_to_menu(&mut self);
}

/// One run plus its host shell
pub struct GameSession<H: HostShell> {
    state: GameState,
    shell: H,
    ended: bool,
}

impl<H: HostShell> GameSession<H> {
    pub fn new(seed: u64, player_name: impl Into<String>, settings: Settings, shell: H) -> Self {
        log::info!("Session started with seed {}", seed);
        Self {
            state: GameState::new(seed, player_name, settings),
            shell,
            ended: false,
        }
    }

    /// Advance one tick. Returns false once the session has ended.
    pub fn update(&mut self, input: &TickInput) -> bool {
        if self.ended {
            return false;
        }
        match tick(&mut self.state, input) {
            Some(GameEvent::GameOver {
                final_score,
                player_name,
            }) => {
                self.ended = true;
                self.shell.on_game_over(final_score, &player_name);
            }
            Some(GameEvent::BackToMenu) => {
                self.ended = true;
                self.shell.on_back_to_menu();
            }
            None => {}
        }
        !self.ended
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for debug tooling
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn shell(&self) -> &H {
        &self.shell
    }

    pub fn into_shell(self) -> H {
        self.shell
    }
}

/// Shell that records every finished run in a score store
#[derive(Debug)]
pub struct ScoreboardShell<S: ScoreStore> {
    store: S,
    outcome: Option<GameEvent>,
}

impl<S: ScoreStore> ScoreboardShell<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            outcome: None,
        }
    }

    /// How the session ended, if it has
    pub fn outcome(&self) -> Option<&GameEvent> {
        self.outcome.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: ScoreStore> HostShell for ScoreboardShell<S> {
    fn on_game_over(&mut self, final_score: u64, player_name: &str) {
        let record = ScoreRecord::now(player_name, final_score);
        // A failed write never blocks the return to the menu
        if let Err(e) = self.store.append(&record) {
            log::warn!("Score for {} not saved: {}", player_name, e);
        }
        self.outcome = Some(GameEvent::GameOver {
            final_score,
            player_name: player_name.to_string(),
        });
    }

    fn on_back_to_menu(&mut self) {
        self.outcome = Some(GameEvent::BackToMenu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::highscores::{MemoryScores, ScoreBoard};
    use crate::sim::Level;

    #[derive(Default)]
    struct CountingShell {
        game_overs: Vec<(u64, String)>,
        menu_returns: u32,
    }

    impl HostShell for CountingShell {
        fn on_game_over(&mut self, final_score: u64, player_name: &str) {
            self.game_overs.push((final_score, player_name.to_string()));
        }

        fn on_back_to_menu(&mut self) {
            self.menu_returns += 1;
        }
    }

    fn at_river_goal<H: HostShell>(session: &mut GameSession<H>) {
        let state = session.state_mut();
        state.level = Level::RiverRun;
        state.setup_level();
        state.score = 100;
        state.avatar.y = TILE;
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut session = GameSession::new(1, "Ribbit", Settings::default(), CountingShell::default());
        at_river_goal(&mut session);

        assert!(!session.update(&TickInput::default()));
        for _ in 0..5 {
            assert!(!session.update(&TickInput::default()));
        }
        let shell = session.into_shell();
        assert_eq!(shell.game_overs, vec![(100 + FINAL_BONUS, "Ribbit".to_string())]);
        assert_eq!(shell.menu_returns, 0);
    }

    #[test]
    fn test_back_to_menu_fires_once() {
        let mut session = GameSession::new(1, "Ribbit", Settings::default(), CountingShell::default());
        let esc = TickInput {
            back_to_menu: true,
            ..Default::default()
        };
        assert!(session.update(&TickInput::default()));
        assert!(!session.update(&esc));
        assert!(!session.update(&esc));
        assert!(session.is_ended());
        assert_eq!(session.shell().menu_returns, 1);
        assert!(session.shell().game_overs.is_empty());
    }

    #[test]
    fn test_scoreboard_shell_records_final_score() {
        let shell = ScoreboardShell::new(MemoryScores::default());
        let mut session = GameSession::new(3, "Ribbit", Settings::default(), shell);
        at_river_goal(&mut session);
        session.update(&TickInput::default());

        let shell = session.into_shell();
        assert!(matches!(
            shell.outcome(),
            Some(GameEvent::GameOver { final_score: 350, .. })
        ));
        let top = shell.store().top(10).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].player, "Ribbit");
        assert_eq!(top[0].score, 350);
    }

    #[test]
    fn test_unwritable_scoreboard_does_not_block() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let shell = ScoreboardShell::new(ScoreBoard::new(dir.path()));
        let mut session = GameSession::new(3, "Ribbit", Settings::default(), shell);
        at_river_goal(&mut session);
        assert!(!session.update(&TickInput::default()));
        assert!(session.shell().outcome().is_some());
    }
}
