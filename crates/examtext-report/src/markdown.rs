//! Markdown rendering.
//!
//! Falls back to the raw questions section when the document had no
//! numbered questions.

use examtext_core::model::{ParsedExam, Question};
use examtext_core::scoring::GradeReport;

/// Render a parsed exam as Markdown, optionally with grading results.
pub fn generate_markdown(title: &str, parsed: &ParsedExam, grade: Option<&GradeReport>) -> String {
    let mut md = format!("# {title}\n\n");

    if let Some(grade) = grade {
        md.push_str(&format!(
            "**Score:** {} / {} ({}%)\n\n",
            grade.summary.earned, grade.summary.total, grade.summary.percent
        ));
    }

    match &parsed.model {
        Some(model) => {
            for (i, q) in model.questions.iter().enumerate() {
                md.push_str(&render_question(q));
                if let Some(outcome) = grade.and_then(|g| g.outcomes.get(i)) {
                    md.push_str(&format!(
                        "\n> {}: {} / {}\n",
                        outcome.verdict, outcome.earned, outcome.points
                    ));
                }
                md.push('\n');
            }

            if grade.is_some() {
                md.push_str("## Answer Key\n\n");
                md.push_str("| # | Answer |\n");
                md.push_str("|---|--------|\n");
                for q in &model.questions {
                    let answer = match q.correct_option() {
                        Some(key) => format!("{key} — {}", q.correct_answer),
                        None => q.correct_answer.clone(),
                    };
                    md.push_str(&format!("| {} | {} |\n", q.id, escape_cell(&answer)));
                }
                md.push('\n');
            }
        }
        None => {
            md.push_str(&parsed.sections.questions);
            md.push_str("\n\n");
        }
    }

    if !parsed.sections.references.is_empty() {
        md.push_str("## References\n\n");
        md.push_str(&parsed.sections.references);
        md.push('\n');
    }

    md
}

fn render_question(q: &Question) -> String {
    let mut out = format!("**{}.** {}\n", q.id, q.prompt);
    for option in q.options() {
        out.push_str(&format!("- {}) {}\n", option.key, option.text));
    }
    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use examtext_core::model::AnswerMap;
    use examtext_core::scoring::grade;

    #[test]
    fn structured_exam() {
        let parsed = ParsedExam::parse(
            "Questions\n1. Pick\nA) yes\nB) no\n\nReferences\n[1] Handbook, p. 3",
        );
        let md = generate_markdown("Quiz", &parsed, None);
        assert!(md.starts_with("# Quiz\n"));
        assert!(md.contains("**1.** Pick"));
        assert!(md.contains("- A) yes"));
        assert!(md.contains("## References"));
        assert!(md.contains("[1] Handbook, p. 3"));
        assert!(!md.contains("Answer Key"));
    }

    #[test]
    fn fallback_shows_raw_questions_text() {
        let parsed = ParsedExam::parse("Questions\nDiscuss the causes of the war.");
        let md = generate_markdown("Essay", &parsed, None);
        assert!(md.contains("Discuss the causes of the war."));
    }

    #[test]
    fn graded_exam_has_score_and_key() {
        let parsed = ParsedExam::parse("Questions\n1. Pick\nA) a|b\nB) c\n\nAnswers\n1) A — a|b");
        let model = parsed.model.clone().unwrap();
        let answers: AnswerMap = [(1, "A".to_string())].into_iter().collect();
        let report = grade(&model, &answers);
        let md = generate_markdown("Quiz", &parsed, Some(&report));
        assert!(md.contains("**Score:** 1 / 1 (100%)"));
        assert!(md.contains("> Correct: 1 / 1"));
        assert!(md.contains("| 1 | A — a\\|b |"));
    }

    #[test]
    fn repeated_ids_keep_their_own_verdicts() {
        let parsed = ParsedExam::parse(
            "Questions\n1. First\nA) x\nB) y\n\n1. Second\nA) x\nB) y\n\nAnswers\n1) A — x",
        );
        let model = parsed.model.clone().unwrap();
        let answers: AnswerMap = [(1, "A".to_string())].into_iter().collect();
        let report = grade(&model, &answers);
        let md = generate_markdown("Dupes", &parsed, Some(&report));
        assert!(md.contains("**Score:** 1 / 2 (50%)"));
        assert!(md.contains("> Correct: 1 / 1"));
        assert!(md.contains("> Incorrect: 0 / 1"));
    }
}
