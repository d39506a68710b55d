//! The `examtext init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing("examtext.toml", SAMPLE_CONFIG)?;
    write_if_missing("sample-exam.txt", SAMPLE_EXAM)?;
    write_if_missing("sample-answers.json", SAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Run: examtext validate --input sample-exam.txt");
    println!("  2. Run: examtext grade --input sample-exam.txt --answers sample-answers.json");
    println!("  3. Run: examtext render --input sample-exam.txt --answers sample-answers.json");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if std::path::Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examtext configuration

default_format = "text"
output_dir = "./examtext-output"

[scoring]
full_credit_ratio = 0.6
partial_credit_ratio = 0.3
partial_credit_fraction = 0.5
ungraded_credit_fraction = 0.5
"#;

const SAMPLE_EXAM: &str = "Exam Questions
1. Which organelle produces most of a cell's ATP?
A) Nucleus
B) Mitochondrion
C) Ribosome
D) Golgi apparatus

2. What does DNA stand for?
A) Deoxyribonucleic acid
B) Dinitrogen acid
C) Dual nucleic acid
D) Deoxyribose nitrate

3. Describe the role of chlorophyll in photosynthesis.

Answer Key
1) B — mitochondria run oxidative phosphorylation
2) A — the sugar is deoxyribose
3) Chlorophyll absorbs light energy used to make glucose.

References
[1] Cell Biology, pp. 12-15
";

const SAMPLE_ANSWERS: &str = r#"{
  "1": "B",
  "2": "C",
  "3": "It absorbs light so the plant can make sugar"
}
"#;
