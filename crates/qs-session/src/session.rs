//! Session lifecycle and the moderator turn loop.
//!
//! [`SessionBuilder`] covers setup and bomb configuration. [`Session`] owns
//! everything a running game mutates (roster scores, answered slots, bomb
//! budget, the RNG) and enforces the phase each action is legal in. Nothing
//! is committed until the moderator scores or records; abandoning a revealed
//! question leaves the tracker untouched.

use std::sync::Arc;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use qs_core::{Catalog, Difficulty, Roster, Slot};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::journal::{Journal, JournalEntry};
use crate::phase::Phase;
use crate::scoring::{self, BombOutcome, Multiplier, ScoreChange, ScorePolicy};
use crate::selector::{self, SelectedQuestion};
use crate::tracker::{AnsweredRecord, BombBudget, SessionTracker};

/// Setup and bomb configuration, before a session exists.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    catalog: Option<Arc<Catalog>>,
    roster: Option<Roster>,
    config: SessionConfig,
    phase: Phase,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    /// Start in `Setup` with nothing loaded.
    pub fn new() -> Self {
        Self {
            catalog: None,
            roster: None,
            config: SessionConfig::default(),
            phase: Phase::Setup,
        }
    }

    /// Set the session configuration.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Load (or replace) the quiz catalog.
    pub fn load_catalog(&mut self, catalog: impl Into<Arc<Catalog>>) {
        self.catalog = Some(catalog.into());
    }

    /// Load (or replace) the player roster.
    pub fn load_roster(&mut self, roster: Roster) {
        self.roster = Some(roster);
    }

    /// The loaded catalog, if any.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_deref()
    }

    /// The loaded roster, if any.
    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    /// The current phase: `Setup` or `BombConfiguring`.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Move from `Setup` to `BombConfiguring`. Requires a playable catalog
    /// and at least one player.
    pub fn configure_bombs(&mut self) -> SessionResult<()> {
        if self.phase != Phase::Setup {
            return Err(SessionError::InvalidPhase {
                action: "configure bombs",
                expected: Phase::Setup,
                actual: self.phase,
            });
        }
        match &self.catalog {
            Some(c) if !c.non_empty_slots().is_empty() => {}
            _ => return Err(SessionError::EmptyCatalog),
        }
        if self.roster.as_ref().is_none_or(Roster::is_empty) {
            return Err(SessionError::EmptyRoster);
        }
        self.phase = Phase::BombConfiguring;
        Ok(())
    }

    /// Leave bomb configuration without starting.
    pub fn back_to_setup(&mut self) {
        self.phase = Phase::Setup;
    }

    /// Finish bomb configuration and start a session in `Selecting`.
    pub fn start(&self, bombs_allowed: i64) -> SessionResult<Session> {
        if self.phase != Phase::BombConfiguring {
            return Err(SessionError::InvalidPhase {
                action: "start a session",
                expected: Phase::BombConfiguring,
                actual: self.phase,
            });
        }
        let catalog = self.catalog.clone().ok_or(SessionError::EmptyCatalog)?;
        let roster = self.roster.clone().ok_or(SessionError::EmptyRoster)?;
        Session::new(catalog, roster, bombs_allowed, self.config.clone())
    }
}

/// The question currently on screen.
#[derive(Debug, Clone)]
struct Current {
    selected: SelectedQuestion,
    requested: Slot,
    revealed: usize,
    multiplier: Multiplier,
}

/// A running quiz session.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    catalog: Arc<Catalog>,
    roster: Roster,
    tracker: SessionTracker,
    config: SessionConfig,
    rng: StdRng,
    phase: Phase,
    current: Option<Current>,
    journal: Journal,
}

impl Session {
    /// Create a session ready for the first selection.
    ///
    /// Fails with [`SessionError::InvalidBombBudget`] for a negative bomb
    /// count and [`SessionError::EmptyCatalog`] when no slot has a question.
    pub fn new(
        catalog: impl Into<Arc<Catalog>>,
        roster: Roster,
        bombs_allowed: i64,
        config: SessionConfig,
    ) -> SessionResult<Self> {
        let catalog = catalog.into();
        let budget = BombBudget::new(bombs_allowed)?;
        if catalog.non_empty_slots().is_empty() {
            return Err(SessionError::EmptyCatalog);
        }

        let id = Uuid::new_v4();
        let mut journal = Journal::new();
        journal.append(JournalEntry::SessionStarted {
            session_id: id,
            themes: catalog.themes().len(),
            players: roster.len(),
            bombs_allowed: budget.allowed(),
            timestamp: Utc::now(),
        });
        log::info!(
            "session {id} started: {} themes, {} players, {} bombs",
            catalog.themes().len(),
            roster.len(),
            budget.allowed()
        );

        Ok(Self {
            id,
            rng: StdRng::seed_from_u64(config.seed()),
            catalog,
            roster,
            tracker: SessionTracker::new(budget),
            config,
            phase: Phase::Selecting,
            current: None,
            journal,
        })
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The quiz catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The roster with live scores.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Answered slots and bomb budget.
    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    /// The configuration this session runs with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The audit journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a slot has been played.
    pub fn is_answered(&self, theme: &str, difficulty: Difficulty) -> bool {
        self.tracker.is_answered(theme, difficulty)
    }

    /// Bombs still available.
    pub fn remaining_bombs(&self) -> u32 {
        self.tracker.remaining_bombs()
    }

    /// The question on screen, if any.
    pub fn current(&self) -> Option<&SelectedQuestion> {
        self.current.as_ref().map(|c| &c.selected)
    }

    /// The slot the moderator asked for when the current question was drawn.
    pub fn requested_slot(&self) -> Option<&Slot> {
        self.current.as_ref().map(|c| &c.requested)
    }

    /// Whether the current question is a bomb and the moderator may know it.
    /// Bombs stay hidden until the answer is revealed.
    pub fn bomb_revealed(&self) -> bool {
        self.phase == Phase::Resolving && self.current().is_some_and(|s| s.is_bomb)
    }

    /// The multiplier for the current question (1x outside a question).
    pub fn multiplier(&self) -> Multiplier {
        self.current
            .as_ref()
            .map(|c| c.multiplier)
            .unwrap_or_default()
    }

    /// Answers revealed so far for the current question.
    pub fn revealed_answers(&self) -> Vec<&str> {
        self.current
            .as_ref()
            .map(|c| {
                let mut answers = c.selected.question.answers();
                answers.truncate(c.revealed);
                answers
            })
            .unwrap_or_default()
    }

    /// Draw a question for the requested slot and show it.
    pub fn select_slot(
        &mut self,
        theme: &str,
        difficulty: Difficulty,
    ) -> SessionResult<&SelectedQuestion> {
        self.expect_phase("select a question", Phase::Selecting)?;

        let selected = selector::select_slot(
            &self.catalog,
            &self.tracker,
            theme,
            difficulty,
            self.config.bomb_chance(),
            &mut self.rng,
        )
        .inspect_err(|e| log::warn!("selection rejected: {e}"))?;

        let requested = Slot::new(theme, difficulty);
        log::debug!(
            "drew question {} of {} for {requested}",
            selected.question_index,
            selected.slot()
        );
        self.journal.append(JournalEntry::QuestionDrawn {
            requested: requested.to_string(),
            drawn: selected.slot().to_string(),
            question_index: selected.question_index,
            points: selected.question.points,
            is_bomb: selected.is_bomb,
            timestamp: Utc::now(),
        });

        self.phase = Phase::Revealing;
        let current = self.current.insert(Current {
            selected,
            requested,
            revealed: 0,
            multiplier: Multiplier::default(),
        });
        Ok(&current.selected)
    }

    /// Reveal the primary answer and move to scoring.
    pub fn reveal(&mut self) -> SessionResult<&str> {
        self.expect_phase("reveal the answer", Phase::Revealing)?;
        let current = self.current.as_mut().ok_or(SessionError::InvalidPhase {
            action: "reveal the answer",
            expected: Phase::Revealing,
            actual: Phase::Selecting,
        })?;
        current.revealed = 1;
        self.phase = Phase::Resolving;
        Ok(&current.selected.question.answer)
    }

    /// Reveal the next additional answer. Bomb questions only show one.
    pub fn reveal_next_answer(&mut self) -> SessionResult<&str> {
        let current = self.resolving_mut("reveal another answer")?;
        if current.selected.is_bomb {
            return Err(SessionError::NothingToReveal);
        }
        let answers = current.selected.question.answers();
        if current.revealed >= answers.len() {
            return Err(SessionError::NothingToReveal);
        }
        current.revealed += 1;
        let answer = match current.revealed {
            2 => current.selected.question.answer2.as_deref(),
            3 => current.selected.question.answer3.as_deref(),
            _ => None,
        };
        answer.ok_or(SessionError::NothingToReveal)
    }

    /// Advance the multiplier 1x -> 2x -> 3x -> 1x.
    pub fn toggle_multiplier(&mut self) -> SessionResult<Multiplier> {
        let current = self.resolving_mut("change the multiplier")?;
        current.multiplier.toggle();
        Ok(current.multiplier)
    }

    /// Judge a player's answer to the current (non-bomb) question. May be
    /// called for several players before the question is recorded.
    pub fn apply_score(&mut self, player: &str, policy: ScorePolicy) -> SessionResult<ScoreChange> {
        self.expect_phase("score a player", Phase::Resolving)?;
        let name = self.resolve_player(player)?;
        let current = self.current.as_ref().ok_or(SessionError::InvalidPhase {
            action: "score a player",
            expected: Phase::Resolving,
            actual: Phase::Selecting,
        })?;
        if current.selected.is_bomb {
            return Err(SessionError::IsABomb);
        }

        let change = scoring::apply_score(
            &mut self.roster,
            &name,
            &current.selected.question,
            policy,
            current.multiplier,
        )?;
        log::info!(
            "{}: {policy} x{} {} -> {}",
            change.player,
            current.multiplier.value(),
            change.before,
            change.after
        );
        self.journal.append(JournalEntry::ScoreApplied {
            player: change.player.clone(),
            policy: policy.to_string(),
            multiplier: current.multiplier.value(),
            before: change.before,
            after: change.after,
            timestamp: Utc::now(),
        });
        Ok(change)
    }

    /// What the bomb would do to a player, without applying it.
    pub fn preview_bomb(&self, player: &str) -> SessionResult<(BombOutcome, i64)> {
        let current = self.current.as_ref().ok_or(SessionError::InvalidPhase {
            action: "preview a bomb",
            expected: Phase::Resolving,
            actual: self.phase,
        })?;
        let name = self.resolve_player(player)?;
        let score = self
            .roster
            .get(&name)
            .map(|p| p.score)
            .ok_or(SessionError::UnknownPlayer(name))?;
        Ok(scoring::preview_bomb(score, current.selected.question.points))
    }

    /// Set off the current bomb on one player and record the slot.
    pub fn apply_bomb_effect(&mut self, player: &str) -> SessionResult<ScoreChange> {
        self.expect_phase("set off a bomb", Phase::Resolving)?;
        let name = self.resolve_player(player)?;
        let current = self.current.as_ref().ok_or(SessionError::InvalidPhase {
            action: "set off a bomb",
            expected: Phase::Resolving,
            actual: Phase::Selecting,
        })?;
        if !current.selected.is_bomb {
            return Err(SessionError::NotABomb);
        }

        let sel = &current.selected;
        self.tracker
            .check_record(&sel.theme, sel.difficulty, sel.is_bomb)?;

        let (change, outcome) =
            scoring::apply_bomb_effect(&mut self.roster, &name, &sel.question)?;
        log::info!(
            "bomb on {}: {outcome} ({} -> {})",
            change.player,
            change.before,
            change.after
        );
        self.journal.append(JournalEntry::BombDetonated {
            player: change.player.clone(),
            outcome: outcome.to_string(),
            before: change.before,
            after: change.after,
            timestamp: Utc::now(),
        });
        self.commit()?;
        Ok(change)
    }

    /// Commit the current question as played and return to selection.
    /// Bomb questions are only committed by [`Session::apply_bomb_effect`].
    pub fn record_answer(&mut self) -> SessionResult<AnsweredRecord> {
        self.expect_phase("record the answer", Phase::Resolving)?;
        if self.current().is_some_and(|s| s.is_bomb) {
            return Err(SessionError::IsABomb);
        }
        self.commit()
    }

    /// Leave the current question without recording it. The slot stays
    /// playable; scores already applied by the moderator stand.
    pub fn abandon(&mut self) -> SessionResult<()> {
        if !matches!(self.phase, Phase::Revealing | Phase::Resolving) {
            return Err(SessionError::InvalidPhase {
                action: "go back",
                expected: Phase::Revealing,
                actual: self.phase,
            });
        }
        if let Some(current) = self.current.take() {
            log::debug!("abandoned {}", current.selected.slot());
            self.journal.append(JournalEntry::QuestionAbandoned {
                slot: current.selected.slot().to_string(),
                timestamp: Utc::now(),
            });
        }
        self.phase = Phase::Selecting;
        Ok(())
    }

    /// Discard the session and return to setup, keeping the loaded catalog
    /// and the roster with its current scores.
    pub fn reset(self) -> SessionBuilder {
        log::info!("session {} reset", self.id);
        SessionBuilder {
            catalog: Some(self.catalog),
            roster: Some(self.roster),
            config: self.config,
            phase: Phase::Setup,
        }
    }

    /// Discard the session and go back to bomb configuration.
    pub fn reconfigure(self) -> SessionBuilder {
        let mut builder = self.reset();
        builder.phase = Phase::BombConfiguring;
        builder
    }

    fn commit(&mut self) -> SessionResult<AnsweredRecord> {
        let current = self.current.as_ref().ok_or(SessionError::InvalidPhase {
            action: "record the answer",
            expected: Phase::Resolving,
            actual: Phase::Selecting,
        })?;
        let sel = &current.selected;
        let record = self
            .tracker
            .record_answer(&sel.theme, sel.difficulty, sel.question_index, sel.is_bomb)
            .inspect_err(|e| log::warn!("record rejected: {e}"))?
            .clone();

        log::info!(
            "recorded {}{}; {} bombs left",
            sel.slot(),
            if sel.is_bomb { " (bomb)" } else { "" },
            self.tracker.remaining_bombs()
        );
        self.journal.append(JournalEntry::AnswerRecorded {
            slot: sel.slot().to_string(),
            question_index: sel.question_index,
            was_bomb: sel.is_bomb,
            timestamp: Utc::now(),
        });
        self.current = None;
        self.phase = Phase::Selecting;
        Ok(record)
    }

    fn expect_phase(&self, action: &'static str, expected: Phase) -> SessionResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                action,
                expected,
                actual: self.phase,
            })
        }
    }

    fn resolving_mut(&mut self, action: &'static str) -> SessionResult<&mut Current> {
        self.expect_phase(action, Phase::Resolving)?;
        self.current.as_mut().ok_or(SessionError::InvalidPhase {
            action,
            expected: Phase::Resolving,
            actual: Phase::Selecting,
        })
    }

    fn resolve_player(&self, player: &str) -> SessionResult<String> {
        self.roster
            .resolve(player)
            .map(str::to_string)
            .ok_or_else(|| SessionError::UnknownPlayer(player.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use qs_core::{Player, Question, Theme};

    fn history_catalog() -> Catalog {
        Catalog::new(vec![
            Theme::new("History")
                .with_questions(Difficulty::Easy, vec![Question::new("q", "a", 10)]),
        ])
        .unwrap()
    }

    fn wide_catalog() -> Catalog {
        let themes = ["History", "Science", "Art"]
            .into_iter()
            .map(|name| {
                Difficulty::ALL.into_iter().fold(Theme::new(name), |t, d| {
                    let mut q = Question::new(format!("{name} {d}"), "answer", 10);
                    q.answer2 = Some("second".into());
                    t.with_questions(d, vec![q.clone(), q])
                })
            })
            .collect();
        Catalog::new(themes).unwrap()
    }

    fn players() -> Roster {
        Roster::new(vec![Player::new("A", 0), Player::new("B", 0)]).unwrap()
    }

    fn score(s: &Session, name: &str) -> i64 {
        s.roster().get(name).unwrap().score
    }

    fn no_bombs() -> SessionConfig {
        SessionConfig::default().with_bomb_chance(0.0)
    }

    fn always_bombs() -> SessionConfig {
        SessionConfig::default().with_bomb_chance(1.0)
    }

    #[test]
    fn end_to_end_single_slot() {
        let mut s = Session::new(history_catalog(), players(), 0, SessionConfig::default()).unwrap();

        let sel = s.select_slot("History", Difficulty::Easy).unwrap();
        assert!(!sel.is_bomb);
        assert_eq!(sel.question.points, 10);

        s.reveal().unwrap();
        s.apply_score("A", ScorePolicy::Correct).unwrap();
        assert_eq!(score(&s, "A"), 10);
        assert_eq!(score(&s, "B"), 0);

        s.record_answer().unwrap();
        assert!(s.is_answered("History", Difficulty::Easy));
        let err = s.select_slot("History", Difficulty::Easy).unwrap_err();
        assert!(matches!(err, SessionError::AlreadyAnswered { .. }));
    }

    #[test]
    fn negative_bomb_budget_rejected() {
        let err = Session::new(history_catalog(), players(), -1, no_bombs()).unwrap_err();
        assert!(matches!(err, SessionError::InvalidBombBudget(-1)));
    }

    #[test]
    fn empty_catalog_rejected() {
        let catalog = Catalog::new(vec![Theme::new("Nothing")]).unwrap();
        let err = Session::new(catalog, players(), 0, no_bombs()).unwrap_err();
        assert!(matches!(err, SessionError::EmptyCatalog));
    }

    #[test]
    fn phases_follow_turn_loop() {
        let mut s = Session::new(history_catalog(), players(), 0, no_bombs()).unwrap();
        assert_eq!(s.phase(), Phase::Selecting);
        s.select_slot("History", Difficulty::Easy).unwrap();
        assert_eq!(s.phase(), Phase::Revealing);
        assert_eq!(s.reveal().unwrap(), "a");
        assert_eq!(s.phase(), Phase::Resolving);
        s.record_answer().unwrap();
        assert_eq!(s.phase(), Phase::Selecting);
        assert!(s.current().is_none());
    }

    #[test]
    fn wrong_phase_rejected() {
        let mut s = Session::new(history_catalog(), players(), 0, no_bombs()).unwrap();
        assert!(matches!(
            s.apply_score("A", ScorePolicy::Correct),
            Err(SessionError::InvalidPhase { expected: Phase::Resolving, .. })
        ));
        assert!(matches!(s.record_answer(), Err(SessionError::InvalidPhase { .. })));
        assert!(matches!(s.reveal(), Err(SessionError::InvalidPhase { .. })));

        s.select_slot("History", Difficulty::Easy).unwrap();
        assert!(matches!(
            s.select_slot("History", Difficulty::Easy),
            Err(SessionError::InvalidPhase { expected: Phase::Selecting, .. })
        ));
        // scoring before the answer is shown is not allowed either
        assert!(s.apply_score("A", ScorePolicy::Correct).is_err());
        assert_eq!(score(&s, "A"), 0);
    }

    #[test]
    fn abandon_is_a_no_op_on_the_tracker() {
        let mut s = Session::new(history_catalog(), players(), 0, no_bombs()).unwrap();
        s.select_slot("History", Difficulty::Easy).unwrap();
        s.reveal().unwrap();
        s.abandon().unwrap();

        assert_eq!(s.phase(), Phase::Selecting);
        assert!(!s.is_answered("History", Difficulty::Easy));
        assert!(s.tracker().records().is_empty());
        // the slot is still playable
        assert!(s.select_slot("History", Difficulty::Easy).is_ok());
    }

    #[test]
    fn abandon_outside_a_question() {
        let mut s = Session::new(history_catalog(), players(), 0, no_bombs()).unwrap();
        assert!(matches!(s.abandon(), Err(SessionError::InvalidPhase { .. })));
    }

    #[test]
    fn empty_slot_leaves_session_untouched() {
        let mut s = Session::new(history_catalog(), players(), 3, always_bombs()).unwrap();
        let journal_len = s.journal().len();
        let err = s.select_slot("History", Difficulty::Medium).unwrap_err();
        assert!(matches!(err, SessionError::NoQuestionsAvailable { .. }));
        assert_eq!(s.phase(), Phase::Selecting);
        assert_eq!(s.journal().len(), journal_len);
        assert_eq!(s.remaining_bombs(), 3);
    }

    #[test]
    fn multiplier_applies_and_resets_per_question() {
        let mut s = Session::new(wide_catalog(), players(), 0, no_bombs()).unwrap();
        s.select_slot("Art", Difficulty::Hard).unwrap();
        s.reveal().unwrap();
        assert_eq!(s.toggle_multiplier().unwrap().value(), 2);
        assert_eq!(s.toggle_multiplier().unwrap().value(), 3);
        let change = s.apply_score("B", ScorePolicy::Incorrect).unwrap();
        assert_eq!(change.delta(), -30);
        s.record_answer().unwrap();

        s.select_slot("Art", Difficulty::Easy).unwrap();
        assert_eq!(s.multiplier(), Multiplier::ONE);
    }

    #[test]
    fn several_players_scored_on_one_question() {
        let mut s = Session::new(wide_catalog(), players(), 0, no_bombs()).unwrap();
        s.select_slot("Science", Difficulty::Medium).unwrap();
        s.reveal().unwrap();
        s.apply_score("A", ScorePolicy::Correct).unwrap();
        s.apply_score("b", ScorePolicy::Incorrect).unwrap();
        s.record_answer().unwrap();
        assert_eq!(score(&s, "A"), 10);
        assert_eq!(score(&s, "B"), -10);
    }

    #[test]
    fn unknown_player_rejected() {
        let mut s = Session::new(history_catalog(), players(), 0, no_bombs()).unwrap();
        s.select_slot("History", Difficulty::Easy).unwrap();
        s.reveal().unwrap();
        let err = s.apply_score("Zed", ScorePolicy::Correct).unwrap_err();
        assert!(matches!(err, SessionError::UnknownPlayer(_)));
        assert_eq!(s.phase(), Phase::Resolving);
    }

    #[test]
    fn extra_answers_revealed_in_order() {
        let mut s = Session::new(wide_catalog(), players(), 0, no_bombs()).unwrap();
        s.select_slot("History", Difficulty::Easy).unwrap();
        assert!(s.revealed_answers().is_empty());
        s.reveal().unwrap();
        assert_eq!(s.reveal_next_answer().unwrap(), "second");
        assert_eq!(s.revealed_answers(), vec!["answer", "second"]);
        assert!(matches!(
            s.reveal_next_answer(),
            Err(SessionError::NothingToReveal)
        ));
    }

    #[test]
    fn bomb_draw_and_effect() {
        let roster = Roster::new(vec![
            Player::new("A", 50),
            Player::new("B", -5),
            Player::new("C", 0),
        ])
        .unwrap();
        let mut s = Session::new(wide_catalog(), roster, 1, always_bombs()).unwrap();

        let sel = s.select_slot("History", Difficulty::Easy).unwrap().clone();
        assert!(sel.is_bomb);
        assert!(!s.bomb_revealed());
        s.reveal().unwrap();
        assert!(s.bomb_revealed());

        assert!(matches!(s.apply_score("A", ScorePolicy::Correct), Err(SessionError::IsABomb)));
        assert!(matches!(s.reveal_next_answer(), Err(SessionError::NothingToReveal)));
        assert_eq!(s.preview_bomb("B").unwrap(), (BombOutcome::Doubled, -10));

        let change = s.apply_bomb_effect("A").unwrap();
        assert_eq!(change.after, 0);
        assert_eq!(score(&s, "B"), -5);

        // the bomb commits the drawn slot, not the requested one
        assert_eq!(s.phase(), Phase::Selecting);
        assert!(s.is_answered(&sel.theme, sel.difficulty));
        assert!(s.tracker().was_bomb(&sel.theme, sel.difficulty));
        assert_eq!(s.remaining_bombs(), 0);
        assert_eq!(s.tracker().records().len(), 1);
    }

    #[test]
    fn bomb_cannot_be_recorded_without_its_effect() {
        let roster = Roster::new(vec![Player::new("A", 50), Player::new("B", 0)]).unwrap();
        let mut s = Session::new(wide_catalog(), roster, 1, always_bombs()).unwrap();
        s.select_slot("History", Difficulty::Easy).unwrap();
        s.reveal().unwrap();

        assert!(matches!(s.record_answer(), Err(SessionError::IsABomb)));
        assert_eq!(s.phase(), Phase::Resolving);
        assert_eq!(s.remaining_bombs(), 1);
        assert!(s.tracker().records().is_empty());
        assert_eq!(score(&s, "A"), 50);

        s.apply_bomb_effect("A").unwrap();
        assert_eq!(score(&s, "A"), 0);
        assert_eq!(s.remaining_bombs(), 0);
    }

    #[test]
    fn bomb_effect_on_normal_question_rejected() {
        let mut s = Session::new(history_catalog(), players(), 0, always_bombs()).unwrap();
        s.select_slot("History", Difficulty::Easy).unwrap();
        s.reveal().unwrap();
        assert!(matches!(s.apply_bomb_effect("A"), Err(SessionError::NotABomb)));
    }

    #[test]
    fn no_bombs_once_budget_is_spent() {
        let mut s = Session::new(wide_catalog(), players(), 1, always_bombs()).unwrap();
        s.select_slot("Art", Difficulty::Easy).unwrap();
        s.reveal().unwrap();
        s.apply_bomb_effect("A").unwrap();
        assert_eq!(s.remaining_bombs(), 0);

        let bombed = s.tracker().records()[0].theme.clone();
        let theme = if bombed == "Science" { "Art" } else { "Science" };
        for _ in 0..50 {
            let sel = s.select_slot(theme, Difficulty::Hard).unwrap();
            assert!(!sel.is_bomb);
            s.abandon().unwrap();
        }
    }

    #[test]
    fn journal_records_the_game() {
        let mut s = Session::new(history_catalog(), players(), 0, no_bombs()).unwrap();
        s.select_slot("History", Difficulty::Easy).unwrap();
        s.reveal().unwrap();
        s.apply_score("A", ScorePolicy::Correct).unwrap();
        s.record_answer().unwrap();

        let kinds: Vec<&str> = s
            .journal()
            .entries()
            .iter()
            .map(|e| match e {
                JournalEntry::SessionStarted { .. } => "start",
                JournalEntry::QuestionDrawn { .. } => "drawn",
                JournalEntry::ScoreApplied { .. } => "score",
                JournalEntry::BombDetonated { .. } => "bomb",
                JournalEntry::AnswerRecorded { .. } => "recorded",
                JournalEntry::QuestionAbandoned { .. } => "abandoned",
            })
            .collect();
        assert_eq!(kinds, vec!["start", "drawn", "score", "recorded"]);
    }

    #[test]
    fn same_seed_same_draws() {
        let draw = || {
            let mut s = Session::new(
                wide_catalog(),
                players(),
                2,
                SessionConfig::default().with_seed(99),
            )
            .unwrap();
            let mut out = Vec::new();
            for d in Difficulty::ALL {
                let sel = s.select_slot("History", d).unwrap().clone();
                out.push((sel.slot(), sel.question_index, sel.is_bomb));
                s.abandon().unwrap();
            }
            out
        };
        assert_eq!(draw(), draw());
    }

    #[test]
    fn builder_lifecycle() {
        let mut b = SessionBuilder::new().with_config(no_bombs());
        assert_eq!(b.phase(), Phase::Setup);
        assert!(matches!(b.configure_bombs(), Err(SessionError::EmptyCatalog)));

        b.load_catalog(history_catalog());
        assert!(matches!(b.configure_bombs(), Err(SessionError::EmptyRoster)));
        assert!(matches!(b.start(0), Err(SessionError::InvalidPhase { .. })));

        b.load_roster(players());
        b.configure_bombs().unwrap();
        assert_eq!(b.phase(), Phase::BombConfiguring);
        assert!(matches!(b.start(-2), Err(SessionError::InvalidBombBudget(-2))));

        let s = b.start(2).unwrap();
        assert_eq!(s.phase(), Phase::Selecting);
        assert_eq!(s.remaining_bombs(), 2);
    }

    #[test]
    fn reset_keeps_scores_and_drops_history() {
        let mut s = Session::new(history_catalog(), players(), 0, no_bombs()).unwrap();
        s.select_slot("History", Difficulty::Easy).unwrap();
        s.reveal().unwrap();
        s.apply_score("A", ScorePolicy::Correct).unwrap();
        s.record_answer().unwrap();

        let mut b = s.reset();
        assert_eq!(b.phase(), Phase::Setup);
        assert_eq!(b.roster().unwrap().get("A").unwrap().score, 10);

        b.configure_bombs().unwrap();
        let mut s = b.start(0).unwrap();
        assert!(!s.is_answered("History", Difficulty::Easy));
        assert!(s.select_slot("History", Difficulty::Easy).is_ok());
    }

    #[test]
    fn reconfigure_returns_to_bomb_config() {
        let s = Session::new(history_catalog(), players(), 0, no_bombs()).unwrap();
        let b = s.reconfigure();
        assert_eq!(b.phase(), Phase::BombConfiguring);
        assert_eq!(b.start(4).unwrap().remaining_bombs(), 4);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Select(usize, usize),
        Reveal,
        Score(bool),
        Bomb,
        Record,
        Abandon,
        Toggle,
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (0usize..3, 0usize..5).prop_map(|(t, d)| Action::Select(t, d)),
            Just(Action::Reveal),
            any::<bool>().prop_map(Action::Score),
            Just(Action::Bomb),
            Just(Action::Record),
            Just(Action::Abandon),
            Just(Action::Toggle),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_under_any_moderator(
            seed in any::<u64>(),
            bombs in 0i64..4,
            chance in 0.0f64..=1.0,
            actions in proptest::collection::vec(action(), 0..80),
        ) {
            let config = SessionConfig::default().with_seed(seed).with_bomb_chance(chance);
            let mut s = Session::new(wide_catalog(), players(), bombs, config).unwrap();
            let themes = ["History", "Science", "Art"];

            for a in actions {
                let before_records = s.tracker().records().len();
                let result = match a {
                    Action::Select(t, d) => {
                        s.select_slot(themes[t], Difficulty::ALL[d]).map(|_| ())
                    }
                    Action::Reveal => s.reveal().map(|_| ()),
                    Action::Score(ok) => {
                        let policy = if ok { ScorePolicy::Correct } else { ScorePolicy::Incorrect };
                        s.apply_score("A", policy).map(|_| ())
                    }
                    Action::Bomb => s.apply_bomb_effect("B").map(|_| ()),
                    Action::Record => s.record_answer().map(|_| ()),
                    Action::Abandon => s.abandon(),
                    Action::Toggle => s.toggle_multiplier().map(|_| ()),
                };
                if result.is_err() {
                    prop_assert_eq!(s.tracker().records().len(), before_records);
                }

                let budget = s.tracker().budget();
                prop_assert!(budget.used() <= budget.allowed());

                let mut slots: Vec<(String, Difficulty)> = s
                    .tracker()
                    .records()
                    .iter()
                    .map(|r| (r.theme.clone(), r.difficulty))
                    .collect();
                let total = slots.len();
                slots.sort();
                slots.dedup();
                prop_assert_eq!(slots.len(), total);
            }
        }
    }
}
