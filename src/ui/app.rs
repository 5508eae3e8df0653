use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::Backend, Terminal};
use tracing::warn;

use crate::ai::RandomAgent;
use crate::config::AppConfig;
use crate::game::{GameState, MatchOutcome, MoveOutcome, Phase, Player, Position};
use crate::leaderboard::{format_time, Leaderboard, LeaderboardEntry};
use crate::schulte::{ClickResult, SchulteSession, SessionStatus};
use crate::timing::{Scheduler, TimerId};

const MAX_POLL: Duration = Duration::from_millis(100);
const MAX_NAME_LEN: usize = 20;

pub const MENU_ITEMS: [&str; 4] = ["Gomoku", "Schulte Grid", "Leaderboard", "Quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Gomoku,
    SchulteSetup,
    SchultePlaying,
    SchulteResult,
    Leaderboard,
}

/// Delayed work queued on the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppEvent {
    OpponentMove,
    NextRound,
    ClearFlash,
}

/// A finished Schulte run as shown on the result screen.
pub struct RunSummary {
    pub entry: LeaderboardEntry,
    pub rank: Option<usize>,
}

pub struct App {
    config: AppConfig,
    screen: Screen,
    menu_index: usize,
    should_quit: bool,
    message: Option<String>,
    scheduler: Scheduler<AppEvent>,
    rng: StdRng,

    game: GameState,
    cursor: Position,
    opponent: RandomAgent,

    player_name: String,
    size_index: usize,
    session: Option<SchulteSession>,
    grid_cursor: usize,
    flash_timer: Option<TimerId>,
    last_run: Option<RunSummary>,

    leaderboard: Leaderboard,
    /// 0 shows every size, `i` shows `schulte.sizes[i - 1]`
    filter_index: usize,
}

impl App {
    /// `seed` makes the computer opponent and grid shuffles reproducible.
    pub fn new(config: AppConfig, leaderboard: Leaderboard, seed: Option<u64>) -> Self {
        let (rng, opponent) = match seed {
            Some(seed) => (StdRng::seed_from_u64(seed), RandomAgent::with_seed(seed)),
            None => (StdRng::from_os_rng(), RandomAgent::new()),
        };
        let center = config.gomoku.board_size / 2;
        let size_index = config
            .schulte
            .sizes
            .iter()
            .position(|&s| s == config.schulte.default_size)
            .unwrap_or(0);

        App {
            game: GameState::new(config.gomoku.mode, config.gomoku.rules()),
            cursor: Position::new(center, center),
            opponent,
            screen: Screen::Menu,
            menu_index: 0,
            should_quit: false,
            message: None,
            scheduler: Scheduler::new(),
            rng,
            player_name: String::new(),
            size_index,
            session: None,
            grid_cursor: 0,
            flash_timer: None,
            last_run: None,
            leaderboard,
            filter_index: 0,
            config,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn session(&self) -> Option<&SchulteSession> {
        self.session.as_ref()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Jump straight to a screen (used by `--game`)
    pub fn open(&mut self, screen: Screen) {
        self.scheduler.clear();
        self.message = None;
        if screen == Screen::Gomoku {
            self.game.reset_match();
        }
        self.screen = screen;
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            for ev in self.scheduler.poll_due(Instant::now()) {
                self.handle_timer(ev, Instant::now());
            }
        }
        Ok(())
    }

    /// Wait for a key, but never past the next scheduled event
    fn handle_events(&mut self) -> io::Result<()> {
        let timeout = self
            .scheduler
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()).min(MAX_POLL))
            .unwrap_or(MAX_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match self.screen {
            Screen::Menu => self.menu_key(key),
            Screen::Gomoku => self.gomoku_key(key, now),
            Screen::SchulteSetup => self.setup_key(key, now),
            Screen::SchultePlaying => self.playing_key(key, now),
            Screen::SchulteResult => self.result_key(key, now),
            Screen::Leaderboard => self.leaderboard_key(key),
        }
    }

    fn handle_timer(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::OpponentMove => {
                if self.screen == Screen::Gomoku {
                    let outcome = self.game.play_opponent(&mut self.opponent);
                    self.after_move(outcome, now);
                }
            }
            AppEvent::NextRound => {
                let phase = self.game.advance_round();
                self.message = Some(match phase {
                    Phase::MatchOver(outcome) => self.match_over_text(outcome),
                    _ => format!("Round {} begins", self.game.round() + 1),
                });
            }
            AppEvent::ClearFlash => {
                self.flash_timer = None;
                if let Some(session) = self.session.as_mut() {
                    session.clear_flash();
                }
            }
        }
    }

    fn menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.menu_index = self.menu_index.saturating_sub(1),
            KeyCode::Down => self.menu_index = (self.menu_index + 1).min(MENU_ITEMS.len() - 1),
            KeyCode::Enter | KeyCode::Char(' ') => match self.menu_index {
                0 => self.open(Screen::Gomoku),
                1 => self.open(Screen::SchulteSetup),
                2 => self.open(Screen::Leaderboard),
                _ => self.should_quit = true,
            },
            KeyCode::Char('l') => self.open(Screen::Leaderboard),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn gomoku_key(&mut self, key: KeyEvent, now: Instant) {
        // Clear message on any key press
        self.message = None;
        let last = self.game.board().size() - 1;

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.open(Screen::Menu),
            KeyCode::Up => self.cursor.row = self.cursor.row.saturating_sub(1),
            KeyCode::Down => self.cursor.row = (self.cursor.row + 1).min(last),
            KeyCode::Left => self.cursor.col = self.cursor.col.saturating_sub(1),
            KeyCode::Right => self.cursor.col = (self.cursor.col + 1).min(last),
            KeyCode::Enter | KeyCode::Char(' ') => self.place_at_cursor(now),
            KeyCode::Char('r') => {
                self.scheduler.clear();
                self.game.reset_match();
                self.message = Some("New match started!".to_string());
            }
            KeyCode::Char('m') => {
                self.scheduler.clear();
                self.game.set_mode(self.game.mode().toggled());
                self.message = Some(format!("Mode: {}", self.game.mode()));
            }
            _ => {}
        }
    }

    fn place_at_cursor(&mut self, now: Instant) {
        if self.game.is_match_over() {
            self.message = Some("Match over! Press 'r' for a new match.".to_string());
            return;
        }
        if self.game.is_game_over() {
            self.message = Some("Next round is starting...".to_string());
            return;
        }
        if self.game.is_opponent_turn() {
            self.message = Some("Wait for the computer to move.".to_string());
            return;
        }

        let Position { row, col } = self.cursor;
        match self.game.place_piece(row, col) {
            MoveOutcome::Ignored => self.message = Some("That cell is taken!".to_string()),
            outcome => self.after_move(outcome, now),
        }
    }

    fn after_move(&mut self, outcome: MoveOutcome, now: Instant) {
        let transition = self.config.gomoku.round_transition();
        match outcome {
            MoveOutcome::Continue {
                opponent_to_move: true,
                ..
            } => {
                self.scheduler
                    .schedule(now, self.config.gomoku.opponent_delay(), AppEvent::OpponentMove);
            }
            MoveOutcome::RoundWon(player) => {
                let scores = self.game.scores();
                self.message = Some(format!(
                    "{} wins the round!  Black {} - {} White",
                    player.name(),
                    scores.get(Player::Black),
                    scores.get(Player::White)
                ));
                self.scheduler.schedule(now, transition, AppEvent::NextRound);
            }
            MoveOutcome::RoundDrawn => {
                self.message = Some("It's a draw!".to_string());
                self.scheduler.schedule(now, transition, AppEvent::NextRound);
            }
            MoveOutcome::Continue { .. } | MoveOutcome::Ignored => {}
        }
    }

    fn match_over_text(&self, outcome: MatchOutcome) -> String {
        match outcome {
            MatchOutcome::Winner(player) => {
                format!("Match over! {} wins the match. Press 'r' to play again.", player.name())
            }
            MatchOutcome::Tied => "Match over! It's a tie. Press 'r' to play again.".to_string(),
        }
    }

    fn setup_key(&mut self, key: KeyEvent, now: Instant) {
        let sizes = self.config.schulte.sizes.len();
        match key.code {
            KeyCode::Esc => self.open(Screen::Menu),
            KeyCode::Left => self.size_index = self.size_index.saturating_sub(1),
            KeyCode::Right => self.size_index = (self.size_index + 1).min(sizes - 1),
            KeyCode::Backspace => {
                self.player_name.pop();
            }
            KeyCode::Enter => self.start_schulte(now),
            KeyCode::Char(c) if !c.is_control() && self.player_name.chars().count() < MAX_NAME_LEN => {
                self.player_name.push(c);
            }
            _ => {}
        }
    }

    pub fn selected_size(&self) -> u32 {
        self.config.schulte.sizes[self.size_index]
    }

    fn start_schulte(&mut self, now: Instant) {
        self.scheduler.clear();
        match SchulteSession::start(&self.player_name, self.selected_size(), &mut self.rng, now) {
            Ok(session) => {
                self.session = Some(session);
                self.grid_cursor = 0;
                self.message = None;
                self.screen = Screen::SchultePlaying;
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn playing_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            self.screen = Screen::SchulteSetup;
            return;
        };
        let size = session.grid().size();

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                session.exit(now);
                self.scheduler.clear();
                self.screen = Screen::SchulteSetup;
            }
            KeyCode::Char('p') => {
                if session.status() == SessionStatus::Paused {
                    session.resume(now);
                } else if session.pause(now) {
                    self.scheduler.clear();
                }
            }
            _ if session.status() != SessionStatus::Playing => {}
            KeyCode::Up if self.grid_cursor >= size => self.grid_cursor -= size,
            KeyCode::Down if self.grid_cursor + size < size * size => self.grid_cursor += size,
            KeyCode::Left if self.grid_cursor % size > 0 => self.grid_cursor -= 1,
            KeyCode::Right if self.grid_cursor % size + 1 < size => self.grid_cursor += 1,
            KeyCode::Enter | KeyCode::Char(' ') => match session.click_cell(self.grid_cursor, now) {
                ClickResult::Wrong => {
                    // Restart the flash for the newest wrong click
                    if let Some(id) = self.flash_timer.take() {
                        self.scheduler.cancel(id);
                    }
                    self.flash_timer = Some(self.scheduler.schedule(
                        now,
                        self.config.schulte.flash(),
                        AppEvent::ClearFlash,
                    ));
                }
                ClickResult::Completed => self.finish_schulte(),
                ClickResult::Correct | ClickResult::Ignored => {}
            },
            _ => {}
        }
    }

    fn finish_schulte(&mut self) {
        self.scheduler.clear();
        let date = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let Some(entry) = self.session.as_ref().and_then(|s| s.finish_entry(date)) else {
            return;
        };

        let rank = match self.leaderboard.record(entry.clone()) {
            Ok(rank) => rank,
            Err(e) => {
                warn!(error = %e, "could not save score");
                self.message = Some(format!("Score not saved: {e}"));
                None
            }
        };
        self.message.get_or_insert_with(|| format!("Solved in {}", format_time(entry.time)));
        self.last_run = Some(RunSummary { entry, rank });
        self.screen = Screen::SchulteResult;
    }

    fn result_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter => self.start_schulte(now),
            KeyCode::Char('l') => self.open(Screen::Leaderboard),
            KeyCode::Esc => self.open(Screen::Menu),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Size filter of the leaderboard screen; `None` shows all sizes
    pub fn leaderboard_filter(&self) -> Option<u32> {
        match self.filter_index {
            0 => None,
            i => self.config.schulte.sizes.get(i - 1).copied(),
        }
    }

    fn leaderboard_key(&mut self, key: KeyEvent) {
        let tabs = self.config.schulte.sizes.len() + 1;
        match key.code {
            KeyCode::Tab | KeyCode::Right => self.filter_index = (self.filter_index + 1) % tabs,
            KeyCode::BackTab | KeyCode::Left => {
                self.filter_index = (self.filter_index + tabs - 1) % tabs
            }
            KeyCode::Esc => self.open(Screen::Menu),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let now = Instant::now();
        match self.screen {
            Screen::Menu => super::menu_view::render(frame, self.menu_index),
            Screen::Gomoku => super::game_view::render(frame, &self.game, self.cursor, &self.message),
            Screen::SchulteSetup => super::schulte_view::render_setup(
                frame,
                &self.player_name,
                &self.config.schulte.sizes,
                self.size_index,
                &self.message,
            ),
            Screen::SchultePlaying => {
                if let Some(session) = &self.session {
                    super::schulte_view::render_playing(frame, session, self.grid_cursor, now);
                }
            }
            Screen::SchulteResult => {
                super::schulte_view::render_result(
                    frame,
                    self.last_run.as_ref(),
                    self.last_run
                        .as_ref()
                        .and_then(|run| self.leaderboard.best(run.entry.difficulty)),
                    &self.message,
                )
            }
            Screen::Leaderboard => super::leaderboard_view::render(
                frame,
                &self.leaderboard,
                &self.config.schulte.sizes,
                self.filter_index,
                self.leaderboard_filter(),
                self.config.leaderboard.display_limit,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameMode;
    use crate::leaderboard::MemoryStore;

    fn app(mode: GameMode) -> App {
        let mut config = AppConfig::default();
        config.gomoku.mode = mode;
        let leaderboard = Leaderboard::open(Box::new(MemoryStore::new()), "test", 100);
        App::new(config, leaderboard, Some(9))
    }

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        app.handle_key(KeyEvent::from(code), now);
    }

    fn fire_due(app: &mut App, now: Instant) {
        for ev in app.scheduler.poll_due(now) {
            app.handle_timer(ev, now);
        }
    }

    #[test]
    fn test_menu_navigation() {
        let mut app = app(GameMode::PlayerVsPlayer);
        let now = Instant::now();
        press(&mut app, KeyCode::Down, now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.screen(), Screen::SchulteSetup);

        press(&mut app, KeyCode::Esc, now);
        assert_eq!(app.screen(), Screen::Menu);

        press(&mut app, KeyCode::Down, now);
        press(&mut app, KeyCode::Down, now);
        press(&mut app, KeyCode::Down, now);
        press(&mut app, KeyCode::Down, now);
        press(&mut app, KeyCode::Enter, now);
        assert!(app.should_quit);
    }

    #[test]
    fn test_computer_replies_after_delay() {
        let mut app = app(GameMode::PlayerVsComputer);
        let t0 = Instant::now();
        app.open(Screen::Gomoku);
        press(&mut app, KeyCode::Enter, t0);
        assert_eq!(app.game().board().stone_count(), 1);
        assert!(app.game().is_opponent_turn());

        // Human input is refused while the computer is to move
        press(&mut app, KeyCode::Right, t0);
        press(&mut app, KeyCode::Enter, t0);
        assert_eq!(app.game().board().stone_count(), 1);

        fire_due(&mut app, t0 + Duration::from_millis(499));
        assert_eq!(app.game().board().stone_count(), 1);
        fire_due(&mut app, t0 + Duration::from_millis(500));
        assert_eq!(app.game().board().stone_count(), 2);
        assert_eq!(app.game().active_player(), Player::Black);
    }

    #[test]
    fn test_leaving_gomoku_cancels_pending_moves() {
        let mut app = app(GameMode::PlayerVsComputer);
        let t0 = Instant::now();
        app.open(Screen::Gomoku);
        press(&mut app, KeyCode::Enter, t0);
        press(&mut app, KeyCode::Esc, t0);
        assert!(app.scheduler.is_empty());
    }

    #[test]
    fn test_round_win_schedules_next_round() {
        let mut app = app(GameMode::PlayerVsPlayer);
        let t0 = Instant::now();
        app.open(Screen::Gomoku);
        for col in 0..4 {
            app.cursor = Position::new(0, col);
            press(&mut app, KeyCode::Enter, t0);
            app.cursor = Position::new(1, col);
            press(&mut app, KeyCode::Enter, t0);
        }
        app.cursor = Position::new(0, 4);
        press(&mut app, KeyCode::Enter, t0);
        assert!(app.game().is_game_over());
        assert_eq!(app.game().scores().get(Player::Black), 1);

        fire_due(&mut app, t0 + Duration::from_millis(2000));
        assert_eq!(app.game().round(), 1);
        assert!(!app.game().is_game_over());
    }

    #[test]
    fn test_schulte_requires_name() {
        let mut app = app(GameMode::PlayerVsPlayer);
        let now = Instant::now();
        app.open(Screen::SchulteSetup);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.screen(), Screen::SchulteSetup);
        assert_eq!(app.message(), Some("player name must not be empty"));
    }

    #[test]
    fn test_schulte_full_run_is_recorded() {
        let mut app = app(GameMode::PlayerVsPlayer);
        let t0 = Instant::now();
        app.open(Screen::SchulteSetup);
        for c in "Alice".chars() {
            press(&mut app, KeyCode::Char(c), t0);
        }
        press(&mut app, KeyCode::Enter, t0);
        assert_eq!(app.screen(), Screen::SchultePlaying);

        let cells = app.session().unwrap().grid().cells().to_vec();
        for n in 1..=9u32 {
            app.grid_cursor = cells.iter().position(|&v| v == n).unwrap();
            press(&mut app, KeyCode::Enter, t0 + Duration::from_secs(n as u64));
        }

        assert_eq!(app.screen(), Screen::SchulteResult);
        let best = app.leaderboard().list(Some(3), None);
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].name, "Alice");
        assert!((best[0].time - 9.0).abs() < 1e-9);
        assert_eq!(app.last_run.as_ref().and_then(|r| r.rank), Some(1));
    }

    #[test]
    fn test_pause_blocks_clicks_and_clears_flash_timer() {
        let mut app = app(GameMode::PlayerVsPlayer);
        let t0 = Instant::now();
        app.open(Screen::SchulteSetup);
        press(&mut app, KeyCode::Char('B'), t0);
        press(&mut app, KeyCode::Enter, t0);

        let cells = app.session().unwrap().grid().cells().to_vec();
        app.grid_cursor = cells.iter().position(|&v| v == 2).unwrap();
        press(&mut app, KeyCode::Enter, t0);
        assert!(app.session().unwrap().flash().is_some());
        assert_eq!(app.scheduler.len(), 1);

        press(&mut app, KeyCode::Char('p'), t0);
        assert_eq!(app.session().unwrap().status(), SessionStatus::Paused);
        assert!(app.scheduler.is_empty());

        app.grid_cursor = cells.iter().position(|&v| v == 1).unwrap();
        press(&mut app, KeyCode::Enter, t0);
        assert_eq!(app.session().unwrap().grid().next_expected(), 1);

        press(&mut app, KeyCode::Char('p'), t0);
        press(&mut app, KeyCode::Enter, t0);
        assert_eq!(app.session().unwrap().grid().next_expected(), 2);
    }

    #[test]
    fn test_second_wrong_click_restarts_flash() {
        let mut app = app(GameMode::PlayerVsPlayer);
        let t0 = Instant::now();
        app.open(Screen::SchulteSetup);
        press(&mut app, KeyCode::Char('C'), t0);
        press(&mut app, KeyCode::Enter, t0);

        let cells = app.session().unwrap().grid().cells().to_vec();
        let three = cells.iter().position(|&v| v == 3).unwrap();
        let four = cells.iter().position(|&v| v == 4).unwrap();

        app.grid_cursor = three;
        press(&mut app, KeyCode::Enter, t0);
        app.grid_cursor = four;
        press(&mut app, KeyCode::Enter, t0 + Duration::from_millis(150));
        assert_eq!(app.scheduler.len(), 1);

        // The first flash's deadline passes without clearing the second
        fire_due(&mut app, t0 + Duration::from_millis(250));
        assert_eq!(app.session().unwrap().flash(), Some(four));
        fire_due(&mut app, t0 + Duration::from_millis(350));
        assert_eq!(app.session().unwrap().flash(), None);
    }

    #[test]
    fn test_leaderboard_filter_feeds_view() {
        let mut app = app(GameMode::PlayerVsPlayer);
        app.leaderboard
            .record(LeaderboardEntry::new("Dee", 4, Duration::from_secs(20), 1))
            .unwrap();
        app.leaderboard
            .record(LeaderboardEntry::new("Eve", 3, Duration::from_secs(10), 1))
            .unwrap();
        app.open(Screen::Leaderboard);
        press(&mut app, KeyCode::Tab, Instant::now());
        press(&mut app, KeyCode::Tab, Instant::now());
        let shown = app.leaderboard().list(app.leaderboard_filter(), None);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name, "Dee");
    }

    #[test]
    fn test_leaderboard_filter_cycles() {
        let mut app = app(GameMode::PlayerVsPlayer);
        app.open(Screen::Leaderboard);
        assert_eq!(app.leaderboard_filter(), None);
        press(&mut app, KeyCode::Tab, Instant::now());
        assert_eq!(app.leaderboard_filter(), Some(3));
        press(&mut app, KeyCode::BackTab, Instant::now());
        press(&mut app, KeyCode::BackTab, Instant::now());
        assert_eq!(app.leaderboard_filter(), Some(7));
    }
}
