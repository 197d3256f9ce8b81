//! Line-oriented moderator console on top of a running [`Session`].

use qs_core::Difficulty;
use qs_session::journal::Journal;
use qs_session::{Phase, ScoreChange, ScorePolicy, Session, SessionError, TurnRotation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Usage(String),

    #[error("unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

pub struct Console {
    session: Session,
    turns: TurnRotation,
}

impl Console {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            turns: TurnRotation::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process one line of moderator input and return the response.
    pub fn process(&mut self, input: &str) -> ConsoleResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "pick" => self.do_pick(rest),
            "reveal" => self.do_reveal(),
            "more" => self.do_more(),
            "correct" => self.do_score(rest, ScorePolicy::Correct),
            "wrong" => self.do_score(rest, ScorePolicy::Incorrect),
            "x" => self.do_multiplier(),
            "bomb" => self.do_bomb(rest),
            "done" => self.do_done(),
            "back" => self.do_back(),
            "board" => Ok(self.do_board()),
            "scores" => Ok(self.do_scores()),
            "status" => Ok(self.do_status()),
            "turn" => self.do_turn(rest),
            "journal" => Ok(self.do_journal_show()),
            "export" => self.do_journal_export(rest),
            "help" => Ok(HELP.to_string()),
            "quit" | "q" => Ok("Final scores:\n".to_string() + &self.do_scores()),
            other => Err(ConsoleError::UnknownCommand(other.to_string())),
        }
    }

    fn do_pick(&mut self, rest: &str) -> ConsoleResult<String> {
        let (typed, difficulty) = parse_slot(rest)?;
        let theme = self
            .session
            .catalog()
            .find_theme(&typed)
            .map(|t| t.name.clone())
            .unwrap_or(typed);

        let selected = self.session.select_slot(&theme, difficulty)?;
        let q = &selected.question;
        let mut out = format!("{} - {} pts\n{}", selected.difficulty, q.points, q.prompt);
        if let Some(image) = &q.image {
            out.push_str(&format!("\n[image: {image}]"));
        }
        Ok(out)
    }

    fn do_reveal(&mut self) -> ConsoleResult<String> {
        let answer = self.session.reveal()?.to_string();
        let Some(selected) = self.session.current() else {
            return Ok(format!("Answer: {answer}"));
        };

        if selected.is_bomb {
            let mut out = format!(
                "BOMB! (from {})\nAnswer: {answer}\nOn 'bomb <player>':",
                selected.slot()
            );
            for player in self.session.roster().players() {
                let (outcome, after) = self.session.preview_bomb(&player.name)?;
                out.push_str(&format!(
                    "\n  {}: {} -> {after} ({outcome})",
                    player.name, player.score
                ));
            }
            return Ok(out);
        }

        let mut out = format!("Answer: {answer}");
        if let Some(image) = selected.question.answer_image(0) {
            out.push_str(&format!("\n[image: {image}]"));
        }
        let total = selected.question.answers().len();
        if total > 1 {
            out.push_str(&format!("\n({} more, type 'more')", total - 1));
        }
        Ok(out)
    }

    fn do_more(&mut self) -> ConsoleResult<String> {
        let answer = self.session.reveal_next_answer()?.to_string();
        let n = self.session.revealed_answers().len();
        let mut out = format!("Answer {n}: {answer}");
        if let Some(image) = self
            .session
            .current()
            .and_then(|s| s.question.answer_image(n - 1))
        {
            out.push_str(&format!("\n[image: {image}]"));
        }
        Ok(out)
    }

    fn do_score(&mut self, player: &str, policy: ScorePolicy) -> ConsoleResult<String> {
        if player.is_empty() {
            return Err(ConsoleError::Usage(format!(
                "usage: {} <player>",
                match policy {
                    ScorePolicy::Correct => "correct",
                    ScorePolicy::Incorrect => "wrong",
                }
            )));
        }
        let change = self.session.apply_score(player, policy)?;
        Ok(describe(&change))
    }

    fn do_multiplier(&mut self) -> ConsoleResult<String> {
        let m = self.session.toggle_multiplier()?;
        Ok(format!("Multiplier: {m}"))
    }

    fn do_bomb(&mut self, player: &str) -> ConsoleResult<String> {
        if player.is_empty() {
            return Err(ConsoleError::Usage("usage: bomb <player>".to_string()));
        }
        let change = self.session.apply_bomb_effect(player)?;
        Ok(format!(
            "{}\nBombs left: {}",
            describe(&change),
            self.session.remaining_bombs()
        ))
    }

    fn do_done(&mut self) -> ConsoleResult<String> {
        let record = self.session.record_answer()?;
        Ok(format!("{} / {} recorded.", record.theme, record.difficulty))
    }

    fn do_back(&mut self) -> ConsoleResult<String> {
        self.session.abandon()?;
        Ok("Back to the board.".to_string())
    }

    fn do_board(&self) -> String {
        let catalog = self.session.catalog();
        let mut out = String::new();
        for theme in catalog.themes() {
            let cells: Vec<String> = Difficulty::ALL
                .iter()
                .map(|&d| {
                    if self.session.is_answered(&theme.name, d) {
                        "done".to_string()
                    } else if theme.questions(d).is_empty() {
                        "-".to_string()
                    } else {
                        d.to_string()
                    }
                })
                .collect();
            out.push_str(&format!("{}: {}\n", theme.name, cells.join(" | ")));
        }
        out.trim_end().to_string()
    }

    fn do_scores(&self) -> String {
        self.session
            .roster()
            .standings()
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}. {} {}", i + 1, p.name, p.score))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn do_status(&self) -> String {
        let s = &self.session;
        let mut out = format!("Phase: {}\n", s.phase());
        if let Some(selected) = s.current() {
            let shown = match s.requested_slot() {
                Some(requested) if s.phase() == Phase::Revealing => requested.to_string(),
                _ => selected.slot().to_string(),
            };
            out.push_str(&format!("Question: {shown} ({} pts)\n", selected.question.points));
            out.push_str(&format!("Multiplier: {}\n", s.multiplier()));
        }
        out.push_str(&format!("Answered: {}\n", s.tracker().records().len()));
        let budget = s.tracker().budget();
        out.push_str(&format!(
            "Bombs: {} of {} used\n",
            budget.used(),
            budget.allowed()
        ));
        if let Some(player) = self.turns.current(s.roster()) {
            out.push_str(&format!("Turn: {}\n", player.name));
        }
        out.push_str(&format!("Journal: {} entries", s.journal().len()));
        out
    }

    fn do_turn(&mut self, rest: &str) -> ConsoleResult<String> {
        let roster = self.session.roster();
        let player = match rest.to_lowercase().as_str() {
            "" => self.turns.current(roster),
            "next" => self.turns.advance(roster),
            other => {
                return Err(ConsoleError::Usage(format!(
                    "unknown turn option '{other}', use: turn [next]"
                )));
            }
        };
        Ok(match player {
            Some(p) => format!("Turn: {}", p.name),
            None => "No players.".to_string(),
        })
    }

    fn do_journal_show(&self) -> String {
        let journal = self.session.journal();
        let entries = journal.entries();
        let start = entries.len().saturating_sub(10);
        let recent = &entries[start..];

        let mut out = format!(
            "Journal ({} entries, showing last {}):\n\n",
            entries.len(),
            recent.len()
        );
        let mut mini = Journal::new();
        for e in recent {
            mini.append(e.clone());
        }
        out.push_str(&mini.export_text());
        out.trim_end().to_string()
    }

    fn do_journal_export(&self, format: &str) -> ConsoleResult<String> {
        let journal = self.session.journal();
        match format.to_lowercase().as_str() {
            "markdown" | "md" | "" => Ok(journal.export_markdown()),
            "text" | "txt" => Ok(journal.export_text()),
            "json" => journal
                .export_json()
                .map_err(|e| ConsoleError::Usage(format!("json export failed: {e}"))),
            other => Err(ConsoleError::Usage(format!(
                "unknown format '{other}', use: markdown, text, json"
            ))),
        }
    }
}

const HELP: &str = "\
Quizshow Commands:
  pick <theme> / <difficulty>   Draw a question from a slot
  reveal                        Show the answer
  more                          Show the next answer, if any
  correct <player>              Add points (times the multiplier)
  wrong <player>                Subtract points (times the multiplier)
  x                             Cycle the multiplier 1x, 2x, 3x
  bomb <player>                 Apply the bomb to a player
  done                          Mark the question as answered
  back                          Leave the question unrecorded
  board                         Show which slots are left
  scores                        Show the scoreboard
  turn [next]                   Show or advance whose turn it is
  status                        Show session status
  journal                       Show recent entries
  export [markdown|text|json]   Export the full journal
  help                          Show this help
  quit                          Exit

Difficulties: easy, medium, hard, very hard, impossible";

/// Parse `theme / difficulty`, or `theme difficulty` with the difficulty
/// taking the last one or two words.
fn parse_slot(input: &str) -> ConsoleResult<(String, Difficulty)> {
    let usage = || ConsoleError::Usage("usage: pick <theme> / <difficulty>".to_string());

    if let Some((theme, difficulty)) = input.rsplit_once('/') {
        let theme = theme.trim();
        if theme.is_empty() {
            return Err(usage());
        }
        let difficulty = difficulty.trim();
        let d = Difficulty::parse(difficulty)
            .ok_or_else(|| ConsoleError::Usage(format!("unknown difficulty '{difficulty}'")))?;
        return Ok((theme.to_string(), d));
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    for take in [2, 1] {
        if words.len() <= take {
            continue;
        }
        let split = words.len() - take;
        if let Some(d) = Difficulty::parse(&words[split..].join(" ")) {
            return Ok((words[..split].join(" "), d));
        }
    }
    Err(usage())
}

fn describe(change: &ScoreChange) -> String {
    let delta = change.delta();
    let sign = if delta >= 0 { "+" } else { "" };
    format!(
        "{}: {} -> {} ({sign}{delta})",
        change.player, change.before, change.after
    )
}

#[cfg(test)]
mod tests {
    use qs_core::{Catalog, Player, Question, Roster, Theme};
    use qs_session::SessionConfig;

    use super::*;

    fn console(bombs: i64, bomb_chance: f64) -> Console {
        let catalog = Catalog::new(vec![
            Theme::new("History")
                .with_questions(
                    Difficulty::Easy,
                    vec![Question::new("Who discovered Brazil?", "Cabral", 10)],
                )
                .with_questions(
                    Difficulty::VeryHard,
                    vec![{
                        let mut q = Question::new("Name two Tudor queens", "Mary I", 40);
                        q.answer2 = Some("Elizabeth I".to_string());
                        q
                    }],
                ),
            Theme::new("Pop Music").with_questions(
                Difficulty::Easy,
                vec![Question::new("Who sang Thriller?", "Michael Jackson", 10)],
            ),
        ])
        .unwrap();
        let roster = Roster::new(vec![Player::new("Ana", 0), Player::new("Bruno", 5)]).unwrap();
        let config = SessionConfig::default()
            .with_seed(7)
            .with_bomb_chance(bomb_chance);
        Console::new(Session::new(catalog, roster, bombs, config).unwrap())
    }

    #[test]
    fn slot_with_slash() {
        let (theme, d) = parse_slot("Pop Music / very hard").unwrap();
        assert_eq!(theme, "Pop Music");
        assert_eq!(d, Difficulty::VeryHard);
    }

    #[test]
    fn slot_without_slash() {
        assert_eq!(
            parse_slot("Pop Music easy").unwrap(),
            ("Pop Music".to_string(), Difficulty::Easy)
        );
        assert_eq!(
            parse_slot("History  very hard").unwrap(),
            ("History".to_string(), Difficulty::VeryHard)
        );
    }

    #[test]
    fn slot_needs_a_difficulty() {
        assert!(parse_slot("History").is_err());
        assert!(parse_slot("History / legendary").is_err());
        assert!(parse_slot(" / easy").is_err());
    }

    #[test]
    fn full_question_round() {
        let mut c = console(0, 0.0);
        let out = c.process("pick history / easy").unwrap();
        assert!(out.contains("Who discovered Brazil?"));
        assert!(out.contains("10 pts"));

        let out = c.process("reveal").unwrap();
        assert!(out.contains("Cabral"));

        c.process("x").unwrap();
        let out = c.process("correct ana").unwrap();
        assert!(out.contains("Ana: 0 -> 20 (+20)"));

        let out = c.process("done").unwrap();
        assert!(out.contains("History / Easy recorded"));
        assert_eq!(c.session().phase(), Phase::Selecting);
    }

    #[test]
    fn answered_slot_is_rejected() {
        let mut c = console(0, 0.0);
        c.process("pick History / Easy").unwrap();
        c.process("reveal").unwrap();
        c.process("done").unwrap();
        let err = c.process("pick History / Easy").unwrap_err();
        assert!(err.to_string().contains("already been answered"));
    }

    #[test]
    fn more_answers() {
        let mut c = console(0, 0.0);
        c.process("pick History / very hard").unwrap();
        let out = c.process("reveal").unwrap();
        assert!(out.contains("1 more"));
        let out = c.process("more").unwrap();
        assert!(out.contains("Answer 2: Elizabeth I"));
        assert!(c.process("more").is_err());
    }

    #[test]
    fn wrong_answer_subtracts() {
        let mut c = console(0, 0.0);
        c.process("pick Pop Music easy").unwrap();
        c.process("reveal").unwrap();
        let out = c.process("wrong Bruno").unwrap();
        assert!(out.contains("Bruno: 5 -> -5 (-10)"));
    }

    #[test]
    fn bomb_round() {
        let mut c = console(1, 1.0);
        c.process("pick History / Easy").unwrap();
        let out = c.process("reveal").unwrap();
        assert!(out.starts_with("BOMB!"));
        assert!(out.contains("Bruno: 5 -> 0 (score reset to zero)"));

        assert!(c.process("correct Ana").is_err());
        assert!(c.process("done").is_err());
        let out = c.process("bomb Bruno").unwrap();
        assert!(out.contains("Bruno: 5 -> 0"));
        assert!(out.contains("Bombs left: 0"));
        assert_eq!(c.session().phase(), Phase::Selecting);
    }

    #[test]
    fn back_leaves_slot_open() {
        let mut c = console(0, 0.0);
        c.process("pick History / Easy").unwrap();
        c.process("back").unwrap();
        assert!(c.process("pick History / Easy").is_ok());
    }

    #[test]
    fn board_marks_done_slots() {
        let mut c = console(0, 0.0);
        c.process("pick History / Easy").unwrap();
        c.process("reveal").unwrap();
        c.process("done").unwrap();
        let out = c.process("board").unwrap();
        assert!(out.contains("History: done | - | - | Very Hard | -"));
        assert!(out.contains("Pop Music: Easy | - | - | - | -"));
    }

    #[test]
    fn scores_sorted() {
        let mut c = console(0, 0.0);
        let out = c.process("scores").unwrap();
        assert_eq!(out, "1. Bruno 5\n2. Ana 0");
    }

    #[test]
    fn turn_rotation() {
        let mut c = console(0, 0.0);
        assert_eq!(c.process("turn").unwrap(), "Turn: Ana");
        assert_eq!(c.process("turn next").unwrap(), "Turn: Bruno");
        assert_eq!(c.process("turn next").unwrap(), "Turn: Ana");
        assert!(c.process("turn back").is_err());
    }

    #[test]
    fn status_and_journal() {
        let mut c = console(2, 0.0);
        c.process("pick History / Easy").unwrap();
        let status = c.process("status").unwrap();
        assert!(status.contains("Question: History / Easy"));
        assert!(status.contains("Bombs: 0 of 2 used"));

        let journal = c.process("journal").unwrap();
        assert!(journal.contains("Journal ("));

        let md = c.process("export").unwrap();
        assert!(md.contains("# Quiz Session Journal"));
        assert!(c.process("export pdf").is_err());
    }

    #[test]
    fn usage_and_unknown_commands() {
        let mut c = console(0, 0.0);
        assert!(matches!(
            c.process("dance"),
            Err(ConsoleError::UnknownCommand(_))
        ));
        c.process("pick History / Easy").unwrap();
        c.process("reveal").unwrap();
        assert!(matches!(c.process("correct"), Err(ConsoleError::Usage(_))));
        assert!(matches!(
            c.process("correct Zed"),
            Err(ConsoleError::Session(SessionError::UnknownPlayer(_)))
        ));
        assert!(c.process("").unwrap().is_empty());
        assert!(c.process("help").unwrap().contains("pick <theme>"));
    }
}
