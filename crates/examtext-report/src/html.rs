//! HTML exam sheet generator.
//!
//! Produces a self-contained HTML file with all CSS inlined. Without a grade
//! report the page is a blank exam sheet; with one it shows the learner's
//! results and the answer key.

use anyhow::Result;
use std::path::Path;

use examtext_core::model::{ExamModel, Question};
use examtext_core::scoring::{GradeReport, QuestionOutcome, Verdict};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page for an exam, optionally with grading results.
pub fn generate_html(title: &str, model: &ExamModel, grade: Option<&GradeReport>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | {} points | {}</p>\n",
        model.len(),
        format_points(model.total_points()),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    if let Some(grade) = grade {
        html.push_str("<section class=\"dashboard\">\n");
        html.push_str("<h2>Result</h2>\n");
        html.push_str(&format!(
            "<p class=\"score\">{} / {} points ({}%) | {} of {} answered</p>\n",
            format_points(grade.summary.earned),
            format_points(grade.summary.total),
            grade.summary.percent,
            grade.answered_count(),
            grade.outcomes.len()
        ));
        html.push_str(&generate_score_bar(grade.summary.percent));
        html.push_str("</section>\n");
    }

    html.push_str("<section class=\"questions\">\n");
    html.push_str("<h2>Questions</h2>\n");
    html.push_str("<ol class=\"question-list\">\n");
    // Outcomes are in question order; ids may repeat.
    for (i, q) in model.questions.iter().enumerate() {
        let outcome = grade.and_then(|g| g.outcomes.get(i));
        html.push_str(&render_question(q, outcome));
    }
    html.push_str("</ol>\n");
    html.push_str("</section>\n");

    if grade.is_some() {
        html.push_str("<section class=\"answer-key\">\n");
        html.push_str("<h2>Answer Key</h2>\n");
        html.push_str("<table>\n");
        html.push_str("<thead><tr><th>#</th><th>Answer</th><th>Explanation</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for q in &model.questions {
            let answer = match q.correct_option() {
                Some(key) => format!("{key}) {}", html_escape(&q.correct_answer)),
                None => html_escape(&q.correct_answer),
            };
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                q.id,
                answer,
                html_escape(q.explanation.as_deref().unwrap_or(""))
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str("</section>\n");
    }

    // Raw JSON carries the answer key, so it is only included on result pages
    if grade.is_some() {
        html.push_str("<section class=\"raw-data\">\n");
        html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
        html.push_str("<pre><code>");
        html.push_str(&html_escape(
            &serde_json::to_string_pretty(model).unwrap_or_default(),
        ));
        html.push_str("</code></pre>\n");
        html.push_str("</details>\n</section>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML exam page to a file.
pub fn write_html(
    title: &str,
    model: &ExamModel,
    grade: Option<&GradeReport>,
    path: &Path,
) -> Result<()> {
    let html = generate_html(title, model, grade);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn render_question(q: &Question, outcome: Option<&QuestionOutcome>) -> String {
    let class = match outcome.map(|o| o.verdict) {
        Some(Verdict::Correct) => " class=\"pass\"",
        Some(Verdict::Partial) | Some(Verdict::Ungraded) => " class=\"partial\"",
        Some(Verdict::Incorrect) | Some(Verdict::Unanswered) => " class=\"fail\"",
        None => "",
    };

    let mut out = format!("<li value=\"{}\"{}>\n", q.id, class);
    out.push_str(&format!(
        "<p class=\"prompt\">{} <span class=\"points\">({} pt)</span></p>\n",
        html_escape(&q.prompt),
        format_points(q.effective_points())
    ));

    if q.is_mcq() {
        out.push_str("<ul class=\"options\">\n");
        for option in q.options() {
            let marker = if outcome.is_some() && q.correct_option() == Some(option.key) {
                " class=\"correct\""
            } else {
                ""
            };
            out.push_str(&format!(
                "<li{}><strong>{})</strong> {}</li>\n",
                marker,
                option.key,
                html_escape(&option.text)
            ));
        }
        out.push_str("</ul>\n");
    } else if outcome.is_none() {
        out.push_str("<div class=\"answer-box\"></div>\n");
    }

    if let Some(o) = outcome {
        out.push_str(&format!(
            "<p class=\"verdict\">{} | {} / {} pt</p>\n",
            o.verdict,
            format_points(o.earned),
            format_points(o.points)
        ));
    }

    out.push_str("</li>\n");
    out
}

/// Integral points print without a fractional part.
fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        format!("{points:.1}")
    }
}

fn generate_score_bar(percent: u8) -> String {
    let bar_height = 24;
    let max_width = 400;
    let width = usize::from(percent) * max_width / 100;

    let color = if percent >= 80 {
        "#22c55e"
    } else if percent >= 50 {
        "#eab308"
    } else {
        "#ef4444"
    };

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        max_width + 60,
        bar_height
    );
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"0\" width=\"{max_width}\" height=\"{bar_height}\" fill=\"var(--border)\" rx=\"4\"/>\n"
    ));
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{bar_height}\" fill=\"{color}\" rx=\"4\"/>\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
        max_width + 8,
        bar_height / 2,
        percent
    ));
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --partial: #fef9c3; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --partial: #713f12; --fail: #7f1d1d; }
}
@media print { .raw-data, .dashboard svg { display: none; } }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta, .points { color: #6b7280; }
.question-list > li { margin: 1rem 0; padding: 0.5rem 1rem; border-radius: 8px; }
.options { list-style: none; padding-left: 1rem; }
.options .correct { font-weight: bold; text-decoration: underline; }
.answer-box { border: 1px dashed var(--border); min-height: 4rem; border-radius: 4px; }
.pass { background: var(--pass); }
.partial { background: var(--partial); }
.fail { background: var(--fail); }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;
