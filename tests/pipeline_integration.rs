//! End-to-end runs of the pipeline over CSV fixtures

use std::fs;
use std::path::{Path, PathBuf};

use meetpages::toolchain::ToolKind;
use meetpages::{Error, NoopToolchain, PipelineConfig, SystemToolchain, ToolchainConfig};

const HEADER: &str = "Date,Members,Focus,Summary,Challenges/Problems,Next Steps\n";

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data")
}

fn config(data_dir: &Path, output_dir: &Path) -> PipelineConfig {
    PipelineConfig {
        data_dir: data_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    }
}

/// Text of one section: from its heading up to the next heading (or end of document)
fn section<'a>(src: &'a str, heading: &str) -> &'a str {
    let start = src
        .find(&format!("\\textbf{{{heading} }}"))
        .unwrap_or_else(|| panic!("no {heading} section"));
    let rest = &src[start + heading.len()..];
    let end = rest.find("{\\Large").or_else(|| rest.find("\\end{document}")).unwrap_or(rest.len());
    &rest[..end]
}

fn write_data(dir: &Path, files: &[(&str, &str)]) {
    for name in ["business.csv", "building.csv", "coding.csv", "wholeTeam.csv"] {
        let body = files
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, rows)| format!("{HEADER}{rows}"))
            .unwrap_or_else(|| HEADER.to_string());
        fs::write(dir.join(name), body).unwrap();
    }
}

#[test]
fn fixtures_produce_one_page_per_date_in_date_order() {
    let out = tempfile::tempdir().unwrap();
    let tools = NoopToolchain::new();
    let summary = meetpages::run_with(&config(&fixture_dir(), out.path()), &tools).unwrap();

    assert_eq!(summary.records, 7);
    let stems: Vec<&str> = summary.artifacts.iter().map(|a| a.stem.as_str()).collect();
    assert_eq!(stems, vec!["9_26_2020", "10_3_2020", "12_7_2020"]);
    for a in &summary.artifacts {
        assert!(a.source_path.exists(), "{} missing", a.source_path.display());
    }

    let calls = tools.invocations();
    assert_eq!(calls.len(), 6);
    for pair in calls.chunks(2) {
        assert_eq!(pair[0].kind, ToolKind::Typesetter);
        assert_eq!(pair[1].kind, ToolKind::Rasterizer);
        assert_eq!(pair[0].work_dir, out.path());
    }
    assert_eq!(calls[2].args, vec!["10_3_2020.tex"]);
    assert_eq!(calls[3].args, vec!["10_3_2020.pdf", "10_3_2020"]);
}

#[test]
fn page_lists_sessions_and_attendees() {
    let out = tempfile::tempdir().unwrap();
    meetpages::run_with(&config(&fixture_dir(), out.path()), &NoopToolchain::new()).unwrap();
    let src = fs::read_to_string(out.path().join("9_26_2020.tex")).unwrap();

    assert!(src.contains("{\\Huge September 26, 2020}"));
    assert!(src.contains("ATTENDEES: Ana Ruiz, Ben Cole, Cy Park, Eve Lin}"));

    let focus = section(&src, "FOCUS");
    let a = focus.find("Building (Morning Group 1): }}Drivetrain frame").unwrap();
    let b = focus.find("Building (Afternoon Group 1): }}Intake prototype").unwrap();
    let c = focus.find("Coding (Morning Group 1): }}Autonomous routine").unwrap();
    assert!(a < b && b < c);

    // the afternoon build session left challenges blank
    let challenges = section(&src, "CHALLENGES");
    assert_eq!(challenges.matches("\\begin{tcolorbox}").count(), 2);
    assert!(!challenges.contains("Afternoon Group 1"));
}

#[test]
fn blank_fields_and_special_characters() {
    let out = tempfile::tempdir().unwrap();
    meetpages::run_with(&config(&fixture_dir(), out.path()), &NoopToolchain::new()).unwrap();
    let src = fs::read_to_string(out.path().join("10_3_2020.tex")).unwrap();

    assert!(src.contains("Sent 12 emails to local R\\&D firms"));
    assert!(section(&src, "FOCUS").contains("Coding (Afternoon Group 1): }}Driver control"));
    assert!(!section(&src, "SUMMARY").contains("Coding"));
    assert!(!section(&src, "NEXT STEPS").contains("Coding"));

    let whole = fs::read_to_string(out.path().join("12_7_2020.tex")).unwrap();
    assert!(whole.contains("{\\Huge December 7, 2020}"));
    assert!(whole.contains("Entire Team (Morning Group 1): }}Season kickoff"));
}

#[test]
fn build_and_coding_on_same_day() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_data(
        data.path(),
        &[
            ("building.csv", "9/26/2020,Ana,Frame,,,\n"),
            ("coding.csv", "9/26/2020,Eve,Vision,,,\n"),
        ],
    );

    let cfg = config(data.path(), out.path());
    let summary = meetpages::run_with(&cfg, &NoopToolchain::new()).unwrap();
    assert_eq!(summary.artifacts.len(), 1);

    let src = fs::read_to_string(&summary.artifacts[0].source_path).unwrap();
    let focus = section(&src, "FOCUS");
    assert_eq!(focus.matches("\\begin{tcolorbox}").count(), 2);
    let build = focus.find("Building (Morning Group 1): }}Frame").unwrap();
    let coding = focus.find("Coding (Morning Group 1): }}Vision").unwrap();
    assert!(build < coding);

    for heading in ["SUMMARY", "CHALLENGES", "NEXT STEPS"] {
        assert_eq!(section(&src, heading).matches("\\begin{tcolorbox}").count(), 0);
    }
}

#[test]
fn rerun_overwrites_sources() {
    let out = tempfile::tempdir().unwrap();
    let cfg = config(&fixture_dir(), out.path());
    meetpages::run_with(&cfg, &NoopToolchain::new()).unwrap();
    let first = fs::read_to_string(out.path().join("9_26_2020.tex")).unwrap();
    meetpages::run_with(&cfg, &NoopToolchain::new()).unwrap();
    let second = fs::read_to_string(out.path().join("9_26_2020.tex")).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.matches("\\begin{document}").count(), 1);
}

#[test]
fn output_dir_is_created() {
    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("nested").join("pages");
    let cfg = PipelineConfig {
        skip_render: true,
        ..config(&fixture_dir(), &out)
    };
    let summary = meetpages::run(&cfg).unwrap();
    assert_eq!(summary.artifacts.len(), 3);
    assert!(out.join("12_7_2020.tex").exists());
}

#[test]
fn missing_source_aborts_before_writing() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_data(data.path(), &[("coding.csv", "9/26/2020,Eve,Vision,,,\n")]);
    fs::remove_file(data.path().join("business.csv")).unwrap();

    let cfg = config(data.path(), out.path());
    let err = meetpages::run_with(&cfg, &NoopToolchain::new()).unwrap_err();
    assert!(matches!(err, Error::MissingSource { .. }));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn malformed_date_is_fatal() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_data(data.path(), &[("building.csv", "Sept 26,Ana,Frame,,,\n")]);

    let cfg = config(data.path(), out.path());
    let err = meetpages::run_with(&cfg, &NoopToolchain::new()).unwrap_err();
    match err {
        Error::MalformedRow { file, row, .. } => {
            assert!(file.ends_with("building.csv"));
            assert_eq!(row, Some(1));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn custom_template_is_used() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_data(data.path(), &[("building.csv", "1/1/1999,Ana,Frame,,,\n")]);
    let template = data.path().join("plain.tex");
    fs::write(&template, "DATE={{date}}\nWHO={{attendees}}\n{{sections}}\n").unwrap();

    let cfg = PipelineConfig {
        template: Some(template),
        ..config(data.path(), out.path())
    };
    meetpages::run_with(&cfg, &NoopToolchain::new()).unwrap();
    let src = fs::read_to_string(out.path().join("1_1_1999.tex")).unwrap();
    assert!(src.starts_with("DATE=January 1, 1999\nWHO=Ana\n"));
    assert!(!src.contains("documentclass"));
}

#[test]
fn missing_typesetter_is_reported_after_source_is_written() {
    let out = tempfile::tempdir().unwrap();
    let tools = SystemToolchain::new(ToolchainConfig {
        typesetter: "meetpages-missing-pdflatex".into(),
        ..Default::default()
    })
    .unwrap();

    let err = meetpages::run_with(&config(&fixture_dir(), out.path()), &tools).unwrap_err();
    match err {
        Error::ExternalTool { tool, .. } => assert_eq!(tool, "meetpages-missing-pdflatex"),
        other => panic!("unexpected error: {other}"),
    }
    // no isolation between dates: the first page is written, later ones never are
    assert!(out.path().join("9_26_2020.tex").exists());
    assert!(!out.path().join("10_3_2020.tex").exists());
}
