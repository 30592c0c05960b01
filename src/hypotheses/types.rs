use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: u32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Support,
    Reject,
    Neutral,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::Reject => "reject",
            Self::Neutral => "neutral",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Support => "#10b981",
            Self::Reject => "#ef4444",
            Self::Neutral => "#6b7280",
        }
    }
}

/// One paper's verdict on a hypothesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypothesisScore {
    pub id: u32,
    pub hypothesis_id: u32,
    pub paper_doi: String,
    pub paper_title: String,
    pub model: String,
    pub journal: String,
    /// In [0,1].
    pub paper_credibility_score: Option<f64>,
    pub verdict: Verdict,
    pub reason: Option<String>,
    /// In [0,1].
    pub argument_credibility_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub published_date: DateTime<Utc>,
}

impl HypothesisScore {
    /// Signed confirmation strength: credibility product, negated for reject,
    /// zero for neutral or when either credibility is missing or zero.
    pub fn combined_score(&self) -> f64 {
        combined_score(
            self.verdict,
            self.paper_credibility_score,
            self.argument_credibility_score,
        )
    }
}

pub fn combined_score(verdict: Verdict, paper: Option<f64>, argument: Option<f64>) -> f64 {
    match (paper, argument) {
        (Some(p), Some(a)) if p != 0.0 && a != 0.0 => match verdict {
            Verdict::Support => p * a,
            Verdict::Reject => -(p * a),
            Verdict::Neutral => 0.0,
        },
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_example() {
        let s = combined_score(Verdict::Reject, Some(0.8), Some(0.5));
        assert!((s - -0.4).abs() < 1e-12);
    }

    #[test]
    fn test_sign_matches_verdict() {
        for (p, a) in [(0.1, 0.2), (0.85, 0.92), (1.0, 1.0)] {
            assert!(combined_score(Verdict::Support, Some(p), Some(a)) > 0.0);
            assert!(combined_score(Verdict::Reject, Some(p), Some(a)) < 0.0);
            assert_eq!(combined_score(Verdict::Neutral, Some(p), Some(a)), 0.0);
        }
    }

    #[test]
    fn test_missing_or_zero_credibility() {
        assert_eq!(combined_score(Verdict::Support, None, Some(0.9)), 0.0);
        assert_eq!(combined_score(Verdict::Reject, Some(0.9), None), 0.0);
        assert_eq!(combined_score(Verdict::Support, Some(0.0), Some(0.9)), 0.0);
    }

    #[test]
    fn test_verdict_serde_lowercase() {
        let v: Verdict = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(v, Verdict::Reject);
        assert_eq!(serde_json::to_string(&Verdict::Neutral).unwrap(), "\"neutral\"");
        assert_eq!(Verdict::Support.color(), "#10b981");
    }
}
