use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use topicplot::report::{self, Summary};
use topicplot::{Config, Figure, FigureRenderer, Pipeline, RunOutcome, TopicPlotError};

/// Writes the figure model as JSON at the target path instead of drawing it.
#[derive(Default)]
struct RecordingRenderer {
    calls: Vec<(String, PathBuf)>,
}

impl FigureRenderer for RecordingRenderer {
    fn render(&mut self, figure: &Figure, path: &Path) -> topicplot::Result<()> {
        let json = serde_json::to_string(figure)?;
        fs::write(path, json).map_err(|e| TopicPlotError::Render {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.calls.push((figure.dataset.clone(), path.to_path_buf()));
        Ok(())
    }
}

struct Workspace {
    _dir: TempDir,
    results: PathBuf,
    output: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results");
        let output = dir.path().join("plots");
        fs::create_dir_all(&results).unwrap();
        fs::create_dir_all(&output).unwrap();
        Self {
            _dir: dir,
            results,
            output,
        }
    }

    fn write<S: AsRef<str>>(&self, name: &str, lines: &[S]) {
        let text: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
        fs::write(self.results.join(name), text.join("\n") + "\n").unwrap();
    }

    fn config(&self, files: &[&str]) -> Config {
        Config::new()
            .with_results_dir(&self.results)
            .with_input_files(files.iter().copied())
            .with_output_dir(&self.output)
            .with_show(false)
    }

    fn outputs(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.output)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

/// One result line for model S3; `results` is the raw JSON object body.
fn run_line(dataset: &str, n_topics: u32, results: &str) -> String {
    format!(
        r#"{{"dataset":"{}","model":"S3","n_topics":{},"results":{{{}}}}}"#,
        dataset, n_topics, results
    )
}

fn seed_a() -> String {
    run_line("D1", 5, r#""diversity":0.5,"wec_ex":0.2,"wec_in":0.3"#)
}

fn seed_b() -> String {
    run_line("D1", 5, r#""diversity":0.7,"wec_ex":0.4,"wec_in":0.1"#)
}

// ==========================================================================
// END TO END
// ==========================================================================

#[test]
fn two_seeds_produce_one_figure_with_mean_and_band() {
    let ws = Workspace::new();
    ws.write("a.jsonl", &[seed_a(), seed_b()]);

    let mut renderer = RecordingRenderer::default();
    let outcome = Pipeline::new(ws.config(&["a.jsonl"])).run(&mut renderer).unwrap();

    assert_eq!(ws.outputs(), vec!["D1_results.png"]);
    assert_eq!(renderer.calls.len(), 1);

    let RunOutcome::Rendered { figures, saved, stats } = outcome else {
        panic!("expected figures");
    };
    assert_eq!(saved, vec![ws.output.join("D1_results.png")]);
    assert_eq!(stats.records, 2);

    let series = &figures[0].panel("diversity").unwrap().series;
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].model, "S3");
    let point = series[0].point_at(5.0).unwrap();
    assert!((point.mean - 0.6).abs() < 1e-9);
    assert!(point.ci_low < point.mean && point.mean < point.ci_high);
    assert!(point.ci_low >= 0.5 - 1e-9 && point.ci_high <= 0.7 + 1e-9);
}

#[test]
fn dataset_with_space_gets_underscored_file_name() {
    let ws = Workspace::new();
    ws.write(
        "a.jsonl",
        &[run_line("My Set", 10, r#""diversity":0.8,"wec_ex":0.1,"wec_in":0.2"#)],
    );

    let mut renderer = RecordingRenderer::default();
    Pipeline::new(ws.config(&["a.jsonl"])).run(&mut renderer).unwrap();

    assert_eq!(ws.outputs(), vec!["My_Set_results.png"]);
    assert_eq!(renderer.calls[0].0, "My Set");
}

#[test]
fn one_figure_per_dataset_across_files() {
    let ws = Workspace::new();
    ws.write(
        "intfloat__e5-large-v2.jsonl",
        &[
            run_line("20NG", 10, r#""diversity":0.9,"wec_ex":0.2,"wec_in":0.3"#),
            run_line("BBC", 10, r#""diversity":0.8,"wec_ex":0.2,"wec_in":0.3"#),
        ],
    );
    ws.write(
        "all-MiniLM-L6-v2.jsonl",
        &[run_line("20NG", 10, r#""diversity":0.85,"wec_ex":0.25,"wec_in":0.35"#)],
    );

    let mut renderer = RecordingRenderer::default();
    let config = ws.config(&["intfloat__e5-large-v2.jsonl", "all-MiniLM-L6-v2.jsonl"]);
    let outcome = Pipeline::new(config).run(&mut renderer).unwrap();

    let RunOutcome::Rendered { figures, .. } = outcome else {
        panic!("expected figures");
    };
    assert!(ws.outputs().contains(&"20NG_results.png".to_string()));
    assert!(ws.outputs().contains(&"BBC_results.png".to_string()));
    assert_eq!(figures[0].dataset, "20NG");

    let panel = figures[0].panel("diversity").unwrap();
    assert!(panel.series_for("S3", "e5-large-v2").is_some());
    assert!(panel.series_for("S3", "MiniLM-L6-v2").is_some());
}

// ==========================================================================
// RECOVERABLE CONDITIONS
// ==========================================================================

#[test]
fn no_data_writes_nothing() {
    let ws = Workspace::new();
    ws.write("a.jsonl", &["not json", "{broken"]);

    let mut renderer = RecordingRenderer::default();
    let outcome = Pipeline::new(ws.config(&["a.jsonl", "missing.jsonl"]))
        .run(&mut renderer)
        .unwrap();

    assert!(matches!(outcome, RunOutcome::NoData(_)));
    assert!(renderer.calls.is_empty());
    assert!(ws.outputs().is_empty());
    assert_eq!(outcome.stats().lines_skipped, 2);
    assert_eq!(outcome.stats().files_missing.len(), 1);
    assert!(outcome.saved().is_empty());
}

#[test]
fn all_files_missing_is_no_data() {
    let ws = Workspace::new();
    let mut renderer = RecordingRenderer::default();
    let outcome = Pipeline::new(ws.config(&["x.jsonl", "y.jsonl"]))
        .run(&mut renderer)
        .unwrap();
    assert!(matches!(outcome, RunOutcome::NoData(_)));
    assert!(renderer.calls.is_empty());
}

#[test]
fn malformed_lines_are_excluded() {
    let ws = Workspace::new();
    ws.write(
        "a.jsonl",
        &[seed_a(), "{\"dataset\": \"D1\", trailing".to_string(), seed_b()],
    );

    let mut renderer = RecordingRenderer::default();
    let outcome = Pipeline::new(ws.config(&["a.jsonl"])).run(&mut renderer).unwrap();

    assert_eq!(outcome.stats().records, 2);
    assert_eq!(outcome.stats().lines_skipped, 1);
    assert_eq!(outcome.saved().len(), 1);
}

#[test]
fn missing_metric_still_produces_one_image() {
    let ws = Workspace::new();
    ws.write(
        "a.jsonl",
        &[run_line("D2", 5, r#""diversity":0.5,"wec_in":0.3"#)],
    );

    let mut renderer = RecordingRenderer::default();
    let outcome = Pipeline::new(ws.config(&["a.jsonl"])).run(&mut renderer).unwrap();

    assert_eq!(ws.outputs(), vec!["D2_results.png"]);
    let RunOutcome::Rendered { figures, .. } = outcome else {
        panic!("expected figures");
    };
    assert!(figures[0].panels[0].is_some());
    assert!(figures[0].panels[1].is_none());
    assert!(figures[0].panels[2].is_some());
}

#[test]
fn nan_metric_leaves_only_that_panel_blank() {
    let ws = Workspace::new();
    ws.write(
        "a.jsonl",
        &[run_line("D1", 5, r#""diversity":0.5,"wec_ex":0.2,"wec_in":NaN"#)],
    );

    let mut renderer = RecordingRenderer::default();
    let outcome = Pipeline::new(ws.config(&["a.jsonl"])).run(&mut renderer).unwrap();

    assert_eq!(outcome.stats().records, 1);
    assert_eq!(outcome.stats().lines_skipped, 0);
    assert_eq!(ws.outputs(), vec!["D1_results.png"]);
    let RunOutcome::Rendered { figures, .. } = outcome else {
        panic!("expected figures");
    };
    assert!(figures[0].panels[0].is_some());
    assert!(figures[0].panels[1].is_some());
    assert!(figures[0].panels[2].is_none());
}

// ==========================================================================
// FATAL CONDITIONS
// ==========================================================================

#[test]
fn non_numeric_metric_aborts_run() {
    let ws = Workspace::new();
    ws.write(
        "a.jsonl",
        &[run_line("D1", 5, r#""diversity":"n/a""#)],
    );

    let mut renderer = RecordingRenderer::default();
    let err = Pipeline::new(ws.config(&["a.jsonl"])).run(&mut renderer).unwrap_err();
    assert!(matches!(err, TopicPlotError::NonNumeric { .. }));
    assert!(ws.outputs().is_empty());
}

// ==========================================================================
// SUMMARY EXPORT
// ==========================================================================

#[test]
fn summary_export_matches_figures() {
    let ws = Workspace::new();
    ws.write("a.jsonl", &[seed_a(), seed_b()]);

    let mut renderer = RecordingRenderer::default();
    let outcome = Pipeline::new(ws.config(&["a.jsonl"])).run(&mut renderer).unwrap();
    let RunOutcome::Rendered { figures, stats, .. } = outcome else {
        panic!("expected figures");
    };

    let summary = Summary::from_figures(&figures).with_load_stats(
        stats.files_read.clone(),
        stats.records,
        stats.lines_skipped,
    );
    let path = ws.output.join("summary.csv");
    report::generate(&path, &summary).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    // header + one point per metric
    assert_eq!(text.lines().count(), 4);
    assert!(text.contains("D1,diversity,S3,a.jsonl,5,2,0.600000"));
}
