//! Exam scoring.
//!
//! Multiple-choice questions are all-or-nothing on the option letter. Free
//! text is graded by keyword overlap, or given fixed fallback credit when the
//! question carries no keywords to compare against.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, ExamModel, Question, QuestionKind};

/// Thresholds and fractions used when grading free-text answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Keyword ratio at or above which full points are awarded.
    pub full_credit_ratio: f64,
    /// Keyword ratio at or above which partial points are awarded.
    pub partial_credit_ratio: f64,
    /// Fraction of points awarded for partial keyword coverage (at least 1 point).
    pub partial_credit_fraction: f64,
    /// Fraction of points awarded to answered text questions without keywords.
    pub ungraded_credit_fraction: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            full_credit_ratio: 0.6,
            partial_credit_ratio: 0.3,
            partial_credit_fraction: 0.5,
            ungraded_credit_fraction: 0.5,
        }
    }
}

/// Aggregate score for an exam attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub earned: f64,
    pub total: f64,
    /// `round(earned / total * 100)`, or 0 for an empty exam.
    pub percent: u8,
}

/// How a single answer was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Partial,
    Incorrect,
    Unanswered,
    /// Free text with no keywords; fallback credit was given.
    Ungraded,
}

/// Per-question grading detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub id: u32,
    pub points: f64,
    pub earned: f64,
    pub verdict: Verdict,
    /// Keywords found in the answer (text questions only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_keywords: Vec<String>,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Verdict::Correct => "Correct",
            Verdict::Partial => "Partially correct",
            Verdict::Incorrect => "Incorrect",
            Verdict::Unanswered => "Not answered",
            Verdict::Ungraded => "Needs review",
        };
        f.write_str(label)
    }
}

impl QuestionOutcome {
    pub fn answered(&self) -> bool {
        self.verdict != Verdict::Unanswered
    }
}

/// Summary plus per-question outcomes, in question order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeReport {
    pub summary: ScoreSummary,
    pub outcomes: Vec<QuestionOutcome>,
}

impl GradeReport {
    pub fn answered_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.answered()).count()
    }
}

/// Score `answers` against `model` with the default policy.
///
/// An answer that is absent, empty, or whitespace-only counts as unanswered
/// and earns 0, including on text questions without keywords.
pub fn score(model: &ExamModel, answers: &AnswerMap) -> ScoreSummary {
    grade(model, answers).summary
}

/// Score `answers` against `model` with an explicit policy.
pub fn score_with(
    policy: &ScoringPolicy,
    model: &ExamModel,
    answers: &AnswerMap,
) -> ScoreSummary {
    grade_with(policy, model, answers).summary
}

/// Grade `answers` with the default policy, keeping per-question detail.
pub fn grade(model: &ExamModel, answers: &AnswerMap) -> GradeReport {
    grade_with(&ScoringPolicy::default(), model, answers)
}

/// Grade `answers` with an explicit policy, keeping per-question detail.
pub fn grade_with(
    policy: &ScoringPolicy,
    model: &ExamModel,
    answers: &AnswerMap,
) -> GradeReport {
    let outcomes: Vec<QuestionOutcome> = model
        .questions
        .iter()
        .map(|q| grade_question(policy, q, answers.get(&q.id).map(String::as_str)))
        .collect();

    let total: f64 = outcomes.iter().map(|o| o.points).sum();
    let earned: f64 = outcomes.iter().map(|o| o.earned).sum();
    let percent = if total > 0.0 {
        (earned / total * 100.0).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    tracing::debug!(earned, total, percent, "graded exam attempt");

    GradeReport {
        summary: ScoreSummary {
            earned,
            total,
            percent,
        },
        outcomes,
    }
}

fn grade_question(
    policy: &ScoringPolicy,
    question: &Question,
    answer: Option<&str>,
) -> QuestionOutcome {
    let points = question.effective_points();
    let outcome = |earned: f64, verdict: Verdict, matched_keywords: Vec<String>| {
        QuestionOutcome {
            id: question.id,
            points,
            earned,
            verdict,
            matched_keywords,
        }
    };

    let answer = match answer {
        Some(a) if !a.trim().is_empty() => a,
        _ => return outcome(0.0, Verdict::Unanswered, Vec::new()),
    };

    match &question.kind {
        QuestionKind::Mcq { correct_option, .. } => {
            let correct = correct_option.is_some_and(|key| key.as_str() == answer);
            if correct {
                outcome(points, Verdict::Correct, Vec::new())
            } else {
                outcome(0.0, Verdict::Incorrect, Vec::new())
            }
        }
        QuestionKind::Text { keywords } if keywords.is_empty() => {
            let earned = (points * policy.ungraded_credit_fraction).round().max(0.0);
            outcome(earned, Verdict::Ungraded, Vec::new())
        }
        QuestionKind::Text { keywords } => {
            let haystack = answer.to_lowercase();
            let matched: Vec<String> = keywords
                .iter()
                .filter(|kw| haystack.contains(&kw.to_lowercase()))
                .cloned()
                .collect();
            let ratio = matched.len() as f64 / keywords.len() as f64;

            if ratio >= policy.full_credit_ratio {
                outcome(points, Verdict::Correct, matched)
            } else if ratio >= policy.partial_credit_ratio {
                let earned = (points * policy.partial_credit_fraction).round().max(1.0);
                outcome(earned, Verdict::Partial, matched)
            } else {
                outcome(0.0, Verdict::Incorrect, matched)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChoiceOption, OptionKey};

    fn mcq(id: u32, correct: Option<OptionKey>) -> Question {
        let options = OptionKey::ALL
            .iter()
            .map(|&key| ChoiceOption {
                key,
                text: key.to_string(),
            })
            .collect();
        let mut q = Question::mcq(id, "Pick one", options);
        if let QuestionKind::Mcq { correct_option, .. } = &mut q.kind {
            *correct_option = correct;
        }
        q
    }

    fn text(id: u32, keywords: &[&str]) -> Question {
        let mut q = Question::text(id, "Explain");
        q.kind = QuestionKind::Text {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };
        q
    }

    fn answers(pairs: &[(u32, &str)]) -> AnswerMap {
        pairs.iter().map(|(id, a)| (*id, a.to_string())).collect()
    }

    #[test]
    fn full_marks_example() {
        let model = ExamModel::new(vec![
            mcq(1, Some(OptionKey::B)),
            text(2, &["mass", "attraction"]),
        ]);
        let summary = score(
            &model,
            &answers(&[(1, "B"), (2, "masses attract each other")]),
        );
        assert_eq!(
            summary,
            ScoreSummary {
                earned: 2.0,
                total: 2.0,
                percent: 100
            }
        );
    }

    #[test]
    fn unrelated_text_earns_nothing() {
        let model = ExamModel::new(vec![text(2, &["mass", "attraction"])]);
        let report = grade(&model, &answers(&[(2, "something unrelated")]));
        assert_eq!(report.summary.earned, 0.0);
        assert_eq!(report.outcomes[0].verdict, Verdict::Incorrect);
    }

    #[test]
    fn keywordless_text_gets_half_credit() {
        let mut q = text(1, &[]);
        q.points = 4.0;
        let model = ExamModel::new(vec![q, text(2, &[])]);
        let report = grade(&model, &answers(&[(1, "anything"), (2, "anything")]));
        assert_eq!(report.outcomes[0].earned, 2.0);
        // round(0.5) rounds up
        assert_eq!(report.outcomes[1].earned, 1.0);
        assert_eq!(report.outcomes[0].verdict, Verdict::Ungraded);
    }

    #[test]
    fn partial_keyword_coverage() {
        let mut q = text(1, &["alpha", "beta", "gamma"]);
        q.points = 4.0;
        let model = ExamModel::new(vec![q]);
        let report = grade(&model, &answers(&[(1, "only ALPHA here")]));
        assert_eq!(report.outcomes[0].verdict, Verdict::Partial);
        assert_eq!(report.outcomes[0].earned, 2.0);
        assert_eq!(report.outcomes[0].matched_keywords, vec!["alpha"]);
    }

    #[test]
    fn partial_credit_is_at_least_one_point() {
        let mut q = text(1, &["a1", "b2", "c3"]);
        q.points = 1.0;
        let model = ExamModel::new(vec![q]);
        let policy = ScoringPolicy {
            partial_credit_fraction: 0.1,
            ..Default::default()
        };
        let summary = score_with(&policy, &model, &answers(&[(1, "a1")]));
        assert_eq!(summary.earned, 1.0);
    }

    fn keyword_ratio_outcome(keywords: &[&str], answer: &str) -> QuestionOutcome {
        let mut q = text(1, keywords);
        q.points = 4.0;
        let model = ExamModel::new(vec![q]);
        grade(&model, &answers(&[(1, answer)])).outcomes.remove(0)
    }

    #[test]
    fn full_credit_threshold_is_inclusive() {
        let o = keyword_ratio_outcome(&["k1", "k2", "k3", "k4", "k5"], "k1 k2 k3");
        assert_eq!(o.verdict, Verdict::Correct);
        assert_eq!(o.earned, 4.0);

        let o = keyword_ratio_outcome(&["k1", "k2", "k3", "k4", "k5"], "k1 k2");
        assert_eq!(o.verdict, Verdict::Partial);
        assert_eq!(o.earned, 2.0);
    }

    #[test]
    fn partial_credit_threshold_is_inclusive() {
        let keywords = [
            "w01", "w02", "w03", "w04", "w05", "w06", "w07", "w08", "w09", "w10",
        ];
        let o = keyword_ratio_outcome(&keywords, "w01 w02 w03");
        assert_eq!(o.verdict, Verdict::Partial);
        assert_eq!(o.earned, 2.0);

        let o = keyword_ratio_outcome(&keywords, "w01 w02");
        assert_eq!(o.verdict, Verdict::Incorrect);
        assert_eq!(o.earned, 0.0);
    }

    #[test]
    fn verdict_labels() {
        assert_eq!(Verdict::Correct.to_string(), "Correct");
        assert_eq!(Verdict::Unanswered.to_string(), "Not answered");
        assert_eq!(Verdict::Ungraded.to_string(), "Needs review");
    }

    #[test]
    fn mcq_requires_exact_letter() {
        let model = ExamModel::new(vec![mcq(1, Some(OptionKey::B))]);
        assert_eq!(score(&model, &answers(&[(1, "b")])).earned, 0.0);
        assert_eq!(score(&model, &answers(&[(1, "C")])).earned, 0.0);
        assert_eq!(score(&model, &answers(&[(1, "B")])).earned, 1.0);
    }

    #[test]
    fn mcq_without_key_never_scores() {
        let model = ExamModel::new(vec![mcq(1, None)]);
        let report = grade(&model, &answers(&[(1, "A")]));
        assert_eq!(report.summary.earned, 0.0);
        assert_eq!(report.summary.total, 1.0);
        assert_eq!(report.summary.percent, 0);
    }

    #[test]
    fn empty_exam() {
        let summary = score(&ExamModel::default(), &AnswerMap::new());
        assert_eq!(
            summary,
            ScoreSummary {
                earned: 0.0,
                total: 0.0,
                percent: 0
            }
        );
    }

    #[test]
    fn unanswered_questions_score_zero() {
        let model = ExamModel::new(vec![mcq(1, Some(OptionKey::A)), text(2, &[])]);
        let report = grade(&model, &answers(&[(2, "   ")]));
        assert_eq!(report.summary.earned, 0.0);
        assert_eq!(report.summary.total, 2.0);
        assert_eq!(report.answered_count(), 0);
        assert!(report
            .outcomes
            .iter()
            .all(|o| o.verdict == Verdict::Unanswered));
    }

    #[test]
    fn points_below_one_count_as_one() {
        let mut q = mcq(1, Some(OptionKey::A));
        q.points = 0.0;
        let model = ExamModel::new(vec![q]);
        let summary = score(&model, &answers(&[(1, "A")]));
        assert_eq!(summary.total, 1.0);
        assert_eq!(summary.percent, 100);
    }

    #[test]
    fn percent_rounds() {
        let model = ExamModel::new(vec![
            mcq(1, Some(OptionKey::A)),
            mcq(2, Some(OptionKey::A)),
            mcq(3, Some(OptionKey::A)),
        ]);
        let summary = score(&model, &answers(&[(1, "A"), (2, "A"), (3, "B")]));
        assert_eq!(summary.percent, 67);
    }
}
