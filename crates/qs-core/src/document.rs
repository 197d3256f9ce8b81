//! JSON document shapes for the quiz bank and the player roster.
//!
//! Field names follow the documents moderators already author (`temas`,
//! `questoes`, `pergunta`, `jogadores`, ...). Conversion into [`Catalog`] and
//! [`Roster`] only checks what the session relies on: positive integral
//! question points and unique player names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Theme};
use crate::difficulty::Difficulty;
use crate::error::{CoreError, CoreResult};
use crate::question::Question;
use crate::roster::{Player, Roster};

const SAMPLE_QUIZ: &str = include_str!("../data/sample_quiz.json");

/// Top-level quiz document: `{ "temas": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizDocument {
    /// Themes in board order.
    pub temas: Vec<ThemeDocument>,
}

/// A theme entry: `{ "nome": ..., "questoes": {...} }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeDocument {
    /// Theme name.
    pub nome: String,
    /// Questions grouped by difficulty key.
    #[serde(default)]
    pub questoes: TiersDocument,
}

/// The five difficulty arrays of a theme. Missing arrays are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TiersDocument {
    /// Easy questions.
    #[serde(default)]
    pub facil: Vec<QuestionDocument>,
    /// Medium questions.
    #[serde(default)]
    pub medio: Vec<QuestionDocument>,
    /// Hard questions.
    #[serde(default)]
    pub dificil: Vec<QuestionDocument>,
    /// Very hard questions.
    #[serde(default)]
    pub muitodificil: Vec<QuestionDocument>,
    /// Impossible questions.
    #[serde(default)]
    pub impossivel: Vec<QuestionDocument>,
}

impl TiersDocument {
    fn tier(&self, difficulty: Difficulty) -> &[QuestionDocument] {
        match difficulty {
            Difficulty::Easy => &self.facil,
            Difficulty::Medium => &self.medio,
            Difficulty::Hard => &self.dificil,
            Difficulty::VeryHard => &self.muitodificil,
            Difficulty::Impossible => &self.impossivel,
        }
    }
}

/// A question entry as written in the quiz document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionDocument {
    /// Question text.
    pub pergunta: String,
    /// Primary answer.
    pub resposta: String,
    /// Second answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resposta2: Option<String>,
    /// Third answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resposta3: Option<String>,
    /// Point value. Must be a positive integer.
    pub pontos: f64,
    /// Prompt image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagem: Option<String>,
    /// Primary answer image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagemresposta: Option<String>,
    /// Second answer image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagemresposta2: Option<String>,
    /// Third answer image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagemresposta3: Option<String>,
}

/// Top-level players document: `{ "jogadores": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayersDocument {
    /// Players in turn order.
    pub jogadores: Vec<PlayerDocument>,
}

/// A player entry. A missing score starts at zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerDocument {
    /// Player name.
    pub nome: String,
    /// Starting score.
    #[serde(default)]
    pub pontos: Option<f64>,
}

impl QuizDocument {
    /// Parse a quiz document from JSON text.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into a catalog, checking question points and theme names.
    pub fn into_catalog(self) -> CoreResult<Catalog> {
        let mut themes = Vec::with_capacity(self.temas.len());
        for doc in self.temas {
            let mut theme = Theme::new(doc.nome.clone());
            for difficulty in Difficulty::ALL {
                let questions = doc
                    .questoes
                    .tier(difficulty)
                    .iter()
                    .enumerate()
                    .map(|(index, q)| convert_question(&doc.nome, difficulty, index, q))
                    .collect::<CoreResult<Vec<_>>>()?;
                theme.set_questions(difficulty, questions);
            }
            themes.push(theme);
        }
        Catalog::new(themes)
    }
}

impl PlayersDocument {
    /// Parse a players document from JSON text.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into a roster, checking for duplicate names.
    pub fn into_roster(self) -> CoreResult<Roster> {
        let players = self
            .jogadores
            .into_iter()
            .map(|p| {
                let score = p.pontos.filter(|s| s.is_finite()).unwrap_or(0.0);
                Player::new(p.nome, score.trunc() as i64)
            })
            .collect();
        Roster::new(players)
    }
}

fn convert_question(
    theme: &str,
    difficulty: Difficulty,
    index: usize,
    q: &QuestionDocument,
) -> CoreResult<Question> {
    let valid = q.pontos.is_finite()
        && q.pontos.fract() == 0.0
        && q.pontos >= 1.0
        && q.pontos <= f64::from(u32::MAX);
    if !valid {
        return Err(CoreError::InvalidPoints {
            theme: theme.to_string(),
            difficulty,
            index,
            points: q.pontos,
        });
    }

    Ok(Question {
        prompt: q.pergunta.clone(),
        answer: q.resposta.clone(),
        answer2: q.resposta2.clone(),
        answer3: q.resposta3.clone(),
        points: q.pontos as u32,
        image: q.imagem.clone(),
        image_answer: q.imagemresposta.clone(),
        image_answer2: q.imagemresposta2.clone(),
        image_answer3: q.imagemresposta3.clone(),
    })
}

/// Parse a quiz document and convert it to a catalog.
pub fn parse_catalog(json: &str) -> CoreResult<Catalog> {
    QuizDocument::from_json(json)?.into_catalog()
}

/// Parse a players document and convert it to a roster.
pub fn parse_roster(json: &str) -> CoreResult<Roster> {
    PlayersDocument::from_json(json)?.into_roster()
}

/// Load a catalog from a quiz document file.
pub fn load_catalog(path: &Path) -> CoreResult<Catalog> {
    let catalog = parse_catalog(&read(path)?)?;
    log::info!(
        "loaded {} themes ({} questions) from {}",
        catalog.themes().len(),
        catalog.question_count(),
        path.display()
    );
    Ok(catalog)
}

/// Load a roster from a players document file.
pub fn load_roster(path: &Path) -> CoreResult<Roster> {
    let roster = parse_roster(&read(path)?)?;
    log::info!("loaded {} players from {}", roster.len(), path.display());
    Ok(roster)
}

/// The bundled sample quiz.
pub fn sample_catalog() -> CoreResult<Catalog> {
    parse_catalog(SAMPLE_QUIZ)
}

fn read(path: &Path) -> CoreResult<String> {
    std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
