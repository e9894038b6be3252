//! Survey processing command
//!
//! Parses and scores the whole survey file first, then prints the report,
//! renders the charts and writes `export.json`.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Args;
use freerange_survey::{parser::SurveyParser, pipeline::Survey, scoring::QuestionSummary};
use tracing::{debug, info, warn};

use crate::{plot, util};

pub(crate) const DEFAULT_JITTER_SEED: u64 = 0x5eed;
pub(crate) const EXPORT_FILE: &str = "export.json";

#[derive(Debug, Clone, Args)]
pub(crate) struct ProcessArg {
    /// Path to the tab-separated survey export
    pub input: PathBuf,

    /// Directory receiving the charts and export.json
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Seed for the jitter of points in category charts
    #[arg(long, default_value_t = DEFAULT_JITTER_SEED)]
    pub jitter_seed: u64,

    /// Skip chart rendering and only write the export
    #[arg(long)]
    pub no_plots: bool,
}

pub(crate) fn run(arg: &ProcessArg) -> anyhow::Result<()> {
    let reader = util::open_input_file("survey", &arg.input)?;
    let survey = Survey::from_reader(&SurveyParser::default(), reader)
        .with_context(|| format!("Failed to parse survey file: {}", arg.input.display()))?;

    info!(
        rows = survey.records.len(),
        answered = survey.answered_count(),
        "parsed survey"
    );
    for summary in &survey.summaries {
        debug!(
            question = %summary.question,
            answered = summary.answered,
            absent = summary.absent,
            "question answers"
        );
        if summary.answered == 0 {
            warn!(question = %summary.question, "no respondent answered");
        }
    }

    write_report(&mut io::stdout().lock(), &survey).context("Failed to write report")?;

    util::ensure_output_dir(&arg.output_dir)?;
    if arg.no_plots {
        info!("skipping charts");
    } else {
        let charts = plot::render_all(&survey, &arg.output_dir, arg.jitter_seed)
            .context("Failed to render charts")?;
        info!(charts = charts.len(), dir = %arg.output_dir.display(), "wrote charts");
    }

    let export_path = arg.output_dir.join(EXPORT_FILE);
    util::save_json(&survey.export_records(), &export_path)?;
    info!(path = %export_path.display(), "wrote export");
    Ok(())
}

fn write_report<W>(out: &mut W, survey: &Survey) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "Respondents: {}", survey.records.len())?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<14} {:>5} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "question", "n", "absent", "mean", "median", "sd", "min", "max", "p10", "p90"
    )?;
    for summary in &survey.summaries {
        writeln!(out, "{}", summary_row(summary))?;
    }

    writeln!(out)?;
    writeln!(out, "Representativeness (mean |z - caution|, lower is better):")?;
    for (rank, ranked) in survey.ranking.iter().enumerate() {
        match ranked.mean_abs_diff {
            Some(diff) => writeln!(
                out,
                "{:>3}. {:<14} {diff:>6.3}  (n={})",
                rank + 1,
                ranked.question.slug(),
                ranked.respondents
            )?,
            None => writeln!(out, "{:>3}. {:<14} {:>6}", rank + 1, ranked.question.slug(), "-")?,
        }
    }

    let highlighted = survey.records.iter().filter(|r| r.highlight.is_some());
    writeln!(out)?;
    for record in highlighted {
        writeln!(
            out,
            "{}: caution {}, years above mean {}",
            record.display_label(),
            format_value(record.caution),
            format_value(record.years_above_mean)
        )?;
    }
    out.flush()
}

fn summary_row(summary: &QuestionSummary) -> String {
    let slug = summary.question.slug();
    let Some(stats) = &summary.stats else {
        return format!("{slug:<14} {:>5} {:>6}", summary.answered, summary.absent);
    };
    let percentile = |p| {
        summary
            .percentiles
            .as_ref()
            .and_then(|percentiles| percentiles.get(p))
    };
    format!(
        "{slug:<14} {:>5} {:>6} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>6} {:>6}",
        summary.answered,
        summary.absent,
        stats.mean,
        stats.median,
        stats.std_dev,
        stats.min,
        stats.max,
        format_value(percentile(10.0)),
        format_value(percentile(90.0)),
    )
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use freerange_survey::{parser, question::QuestionId};

    fn fixture() -> String {
        let prompts = QuestionId::ALL.map(QuestionId::prompt);
        let header = [
            parser::AGE_COLUMN,
            parser::OLDEST_CHILD_COLUMN,
            parser::CURRENT_AREA_COLUMN,
            parser::CHILDHOOD_AREA_COLUMN,
            parser::NUM_CHILDREN_COLUMN,
            parser::GENDER_COLUMN,
        ]
        .into_iter()
        .chain(prompts)
        .chain([parser::CLARIFY_MARKER])
        .chain(prompts)
        .collect::<Vec<_>>()
        .join("\t");
        let row = |age: &str, typical: &str| {
            let mut cells = vec![age, "", "Small town", "", "1", ""];
            cells.extend([typical; QuestionId::LEN]);
            cells.push("");
            cells.extend([""; QuestionId::LEN]);
            cells.join("\t")
        };
        format!("{header}\n{}\n{}\n", row("30", "8"), row("45", "about 12"))
    }

    #[test]
    fn test_report_lists_every_question() {
        let survey = Survey::from_reader(&SurveyParser::default(), fixture().as_bytes()).unwrap();
        let mut out = vec![];
        write_report(&mut out, &survey).unwrap();
        let report = String::from_utf8(out).unwrap();

        assert!(report.starts_with("Respondents: 2\n"));
        for question in QuestionId::ALL {
            assert!(report.contains(question.slug()), "missing {question}");
        }
        assert!(report.contains("#1 (least cautious)"));
        assert!(report.contains("#2 (most cautious)"));
    }

    fn run_into_temp_dir(no_plots: bool) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("survey.tsv");
        std::fs::write(&input, fixture()).unwrap();
        let output_dir = tmp.path().join("out");
        run(&ProcessArg {
            input,
            output_dir: output_dir.clone(),
            jitter_seed: DEFAULT_JITTER_SEED,
            no_plots,
        })
        .unwrap();
        (tmp, output_dir)
    }

    fn file_names(dir: &std::path::Path) -> Vec<String> {
        let mut names = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    #[test]
    fn test_run_writes_export_only_without_plots() {
        let (_tmp, output_dir) = run_into_temp_dir(true);
        assert_eq!(file_names(&output_dir), [EXPORT_FILE]);

        let json = std::fs::read_to_string(output_dir.join(EXPORT_FILE)).unwrap();
        let export: serde_json::Value = serde_json::from_str(&json).unwrap();
        let records = export.as_array().unwrap();
        assert_eq!(records.len(), 2);
        for record in records {
            let answers = record["answers"].as_object().unwrap();
            assert_eq!(answers.len(), QuestionId::LEN);
            for question in QuestionId::ALL {
                let answer = answers[question.slug()].as_object().unwrap();
                assert_eq!(answer.len(), 5);
                assert!(answer["typical"].is_number());
                assert!(answer["mature"].is_null());
                assert!(answer["immature"].is_null());
            }
        }
        let years = records
            .iter()
            .map(|r| r["years_above_mean"].as_f64().unwrap())
            .collect::<Vec<_>>();
        assert!(years[0] <= years[1]);
    }

    #[test]
    fn test_run_writes_every_chart() {
        let (_tmp, output_dir) = run_into_temp_dir(false);

        let mut expected = QuestionId::ALL
            .iter()
            .map(|q| format!("{}-big.png", q.slug()))
            .chain(
                [
                    "typical-big.png",
                    "mature-big.png",
                    "immature-big.png",
                    "caution-vs-age.png",
                    "caution-vs-oldest-child.png",
                    "caution-by-current-area.png",
                    "caution-by-childhood-area.png",
                    "caution-by-parent.png",
                    "question-representativeness.png",
                    "years-above-mean.png",
                    EXPORT_FILE,
                ]
                .map(str::to_owned),
            )
            .collect::<Vec<_>>();
        expected.sort();
        assert_eq!(file_names(&output_dir), expected);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(None), "-");
        assert_eq!(format_value(Some(1.0 / 3.0)), "0.33");
    }
}
