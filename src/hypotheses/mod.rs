pub mod types;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use types::{Hypothesis, HypothesisScore, Verdict};

const BUNDLED_CATALOG: &str = include_str!("../../data/hypotheses.json");

/// A point on a hypothesis' confirmation timeline.
#[derive(Debug, Clone)]
pub struct TimelinePoint {
    pub date: DateTime<Utc>,
    pub score: f64,
    pub title: String,
    pub journal: String,
    pub verdict: Verdict,
    pub reason: Option<String>,
    /// e.g. "May 12, 2021"
    pub date_str: String,
    pub paper_score: Option<f64>,
    pub argument_score: Option<f64>,
    pub fill: &'static str,
}

impl From<&HypothesisScore> for TimelinePoint {
    fn from(score: &HypothesisScore) -> Self {
        Self {
            date: score.published_date,
            score: score.combined_score(),
            title: score.paper_title.clone(),
            journal: score.journal.clone(),
            verdict: score.verdict,
            reason: score.reason.clone(),
            date_str: format_date(&score.published_date),
            paper_score: score.paper_credibility_score,
            argument_score: score.argument_credibility_score,
            fill: score.verdict.color(),
        }
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Verdict counts plus the summed confirmation strength.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VerdictTally {
    pub support: usize,
    pub reject: usize,
    pub neutral: usize,
    pub net_score: f64,
}

impl VerdictTally {
    pub fn of(points: &[TimelinePoint]) -> Self {
        points.iter().fold(Self::default(), |mut t, p| {
            match p.verdict {
                Verdict::Support => t.support += 1,
                Verdict::Reject => t.reject += 1,
                Verdict::Neutral => t.neutral += 1,
            }
            t.net_score += p.score;
            t
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct CatalogFile {
    hypotheses: Vec<Hypothesis>,
    scores: Vec<HypothesisScore>,
}

/// Static hypotheses and their per-paper verdicts.
pub struct HypothesisCatalog {
    hypotheses: Vec<Hypothesis>,
    scores: Vec<HypothesisScore>,
}

impl HypothesisCatalog {
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(text).context("Failed to parse hypothesis catalog")?;
        Ok(Self {
            hypotheses: file.hypotheses,
            scores: file.scores,
        })
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    pub fn get(&self, id: u32) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| h.id == id)
    }

    /// Verdicts for a hypothesis, newest publication first.
    pub fn scores_for(&self, hypothesis_id: u32) -> Vec<&HypothesisScore> {
        let mut scores: Vec<&HypothesisScore> = self
            .scores
            .iter()
            .filter(|s| s.hypothesis_id == hypothesis_id)
            .collect();
        scores.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        scores
    }

    /// Timeline points for a hypothesis, oldest publication first.
    pub fn timeline(&self, hypothesis_id: u32) -> Vec<TimelinePoint> {
        let mut points: Vec<TimelinePoint> = self
            .scores
            .iter()
            .filter(|s| s.hypothesis_id == hypothesis_id)
            .map(TimelinePoint::from)
            .collect();
        points.sort_by(|a, b| a.date.cmp(&b.date));
        points
    }
}
