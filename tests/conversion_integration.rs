//! Conversion Integration Test Suite
//!
//! End-to-end runs over coordinate tables on disk with a scripted mapping
//! service standing in for Ensembl, plus CLI behaviour that needs no network.

use asm_convert::core::{
    AsmConvertError, AssemblyPair, CoordRecord, Delimiter, InputError, MappingRequest,
    MappingService, ServiceError, ServiceResult,
};
use asm_convert::formats::{convert_file, ConversionStats, ConvertOptions, ReportMode};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;

/// Mapping service answering from a table of region -> candidates
///
/// Unknown regions answer with HTTP 500.
#[derive(Default)]
struct ScriptedService {
    responses: HashMap<String, Vec<CoordRecord>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedService {
    fn with(mut self, region: &str, candidates: Vec<CoordRecord>) -> Self {
        self.responses.insert(region.to_string(), candidates);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl MappingService for ScriptedService {
    fn fetch(&self, request: &MappingRequest) -> ServiceResult<Vec<CoordRecord>> {
        self.calls.borrow_mut().push(request.region.clone());
        self.responses
            .get(&request.region)
            .cloned()
            .ok_or_else(|| ServiceError::Status {
                url: request.path(),
                status: 500,
            })
    }
}

fn candidate(seq: &str, start: &str, end: &str) -> CoordRecord {
    CoordRecord {
        seq_region_name: seq.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        strand: "1".to_string(),
        coord_system: "chromosome".to_string(),
        assembly: "GRCh37".to_string(),
    }
}

fn write_table(content: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(content.as_bytes()).unwrap();
    temp.flush().unwrap();
    temp
}

fn convert(
    path: &Path,
    service: &ScriptedService,
    options: &ConvertOptions,
) -> (String, ConversionStats) {
    let mut out = Vec::new();
    let stats = convert_file(path, &mut out, service, options).unwrap();
    (String::from_utf8(out).unwrap(), stats)
}

fn terse() -> ConvertOptions {
    ConvertOptions::default()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_single_candidate_terse() {
    let table = write_table("17\t36169091\t36169091\n");
    let service = ScriptedService::default().with(
        "17:36169091..36169091:1",
        vec![candidate("17", "36082138", "36082138")],
    );

    let (out, stats) = convert(table.path(), &service, &terse());
    assert_eq!(out, "# GRCh37 seq_region_name\tstart\tend\n17\t36082138\t36082138\n");
    assert_eq!(stats.resolved, 1);
}

#[test]
fn test_duplicate_locus_requested_once() {
    let table = write_table("17\t36169091\t36169091\n17\t36169091\t36169091\n");
    let service = ScriptedService::default().with(
        "17:36169091..36169091:1",
        vec![candidate("17", "36082138", "36082138")],
    );

    let (out, stats) = convert(table.path(), &service, &terse());
    let rows: Vec<&str> = out.lines().skip(1).collect();
    assert_eq!(rows, vec!["17\t36082138\t36082138", "17\t36082138\t36082138"]);
    assert_eq!(service.calls().len(), 1);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.unique, 1);
    assert_eq!(stats.remote_calls, 1);
}

#[test]
fn test_empty_candidates_fail() {
    let table = write_table("X\t3084378\t3084378\n");
    let service = ScriptedService::default().with("X:3084378..3084378:1", vec![]);

    let (out, stats) = convert(table.path(), &service, &terse());
    assert_eq!(out.lines().nth(1), Some("failed\tfailed\tfailed"));
    assert_eq!(stats.failed, 1);
}

#[test]
fn test_two_candidates_multiple() {
    let table = write_table("1\t100\t200\n");
    let service = ScriptedService::default().with(
        "1:100..200:1",
        vec![candidate("1", "90", "190"), candidate("HG1_PATCH", "5", "105")],
    );

    let (out, stats) = convert(table.path(), &service, &terse());
    assert_eq!(out.lines().nth(1), Some("multiple\tmultiple\tmultiple"));
    assert_eq!(stats.ambiguous, 1);
}

#[test]
fn test_comment_only_file_header_only() {
    let table = write_table("# chromosome start end\n");
    let service = ScriptedService::default();

    let (out, stats) = convert(table.path(), &service, &terse());
    assert_eq!(out, "# GRCh37 seq_region_name\tstart\tend\n");
    assert_eq!(stats.total, 0);
    assert_eq!(stats.comments, 1);
    assert!(service.calls().is_empty());
}

// ============================================================================
// Mixed inputs
// ============================================================================

#[test]
fn test_remote_error_does_not_stop_run() {
    let table = write_table("1\t1\t1\n2\t2\t2\n3\t3\t3\n");
    let service = ScriptedService::default()
        .with("1:1..1:1", vec![candidate("1", "11", "11")])
        .with("3:3..3:1", vec![candidate("3", "33", "33")]);

    let (out, stats) = convert(table.path(), &service, &terse());
    let rows: Vec<&str> = out.lines().skip(1).collect();
    assert_eq!(rows, vec!["1\t11\t11", "failed\tfailed\tfailed", "3\t33\t33"]);
    assert_eq!(stats.resolved, 2);
    assert_eq!(stats.failed, 1);
}

#[test]
fn test_verbose_reverse_csv_with_malformed_row() {
    let table = write_table("#chr,start,end\n17,1,2\n17,5\n\nX,3,4\n17,1,2\n");
    let service = ScriptedService::default()
        .with("17:1..2:1", vec![candidate("17", "10", "20")])
        .with("X:3..4:1", vec![]);
    let options = ConvertOptions {
        assemblies: AssemblyPair::new("GRCh37", "GRCh38"),
        delimiter: Delimiter::Comma,
        mode: ReportMode::Verbose,
    };

    let (out, stats) = convert(table.path(), &service, &options);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "# GRCh37 input coordinates\tConverted to assembly\tseq_region_name\tstart\tend\tstrand",
            "17:1:2\tGRCh38\t17\t10\t20\t1",
            "X:3:4\tGRCh38\tfailed\tfailed\tfailed\tfailed",
            "17:1:2\tGRCh38\t17\t10\t20\t1",
        ]
    );
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.blank, 1);
    assert_eq!(service.calls(), vec!["17:1..2:1", "X:3..4:1"]);
}

#[test]
fn test_gzip_input() {
    let temp = tempfile::Builder::new().suffix(".tsv.gz").tempfile().unwrap();
    let mut encoder =
        flate2::write::GzEncoder::new(temp.reopen().unwrap(), flate2::Compression::default());
    encoder.write_all(b"#chromosome\tstart\tend\n7\t5\t6\n").unwrap();
    encoder.finish().unwrap();

    let service = ScriptedService::default().with("7:5..6:1", vec![candidate("7", "50", "60")]);
    let (out, _) = convert(temp.path(), &service, &terse());
    assert_eq!(out.lines().nth(1), Some("7\t50\t60"));
}

#[test]
fn test_bzip2_input() {
    let temp = tempfile::Builder::new().suffix(".tsv.bz2").tempfile().unwrap();
    let mut encoder =
        bzip2::write::BzEncoder::new(temp.reopen().unwrap(), bzip2::Compression::default());
    encoder.write_all(b"7\t5\t6\n").unwrap();
    encoder.finish().unwrap();

    let service = ScriptedService::default().with("7:5..6:1", vec![candidate("7", "50", "60")]);
    let (out, _) = convert(temp.path(), &service, &terse());
    assert_eq!(out.lines().nth(1), Some("7\t50\t60"));
}

#[test]
fn test_missing_file_no_output() {
    let service = ScriptedService::default();
    let mut out = Vec::new();
    let err = convert_file("/nonexistent/dir/loci.tsv", &mut out, &service, &terse()).unwrap_err();

    match err {
        AsmConvertError::Input(InputError::FileOpen { path, .. }) => {
            assert_eq!(path, Path::new("/nonexistent/dir/loci.tsv"));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(out.is_empty());
    assert!(service.calls().is_empty());
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn test_cli_missing_file_message() {
    let output = Command::new(env!("CARGO_BIN_EXE_asm-convert"))
        .args(["--quiet", "/nonexistent/dir/loci.tsv"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), "File cannot be opened: /nonexistent/dir/loci.tsv");
}

#[test]
fn test_cli_conflicting_flags_rejected() {
    let table = write_table("# nothing\n");
    let output = Command::new(env!("CARGO_BIN_EXE_asm-convert"))
        .arg("--tab")
        .arg("--csv")
        .arg(table.path())
        .output()
        .unwrap();
    assert!(!output.status.success());

    let output = Command::new(env!("CARGO_BIN_EXE_asm-convert"))
        .args(["--grch37", "--grch38"])
        .arg(table.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_comment_only_file() {
    let table = write_table("# chromosome start end\n");
    let output = Command::new(env!("CARGO_BIN_EXE_asm-convert"))
        .args(["--quiet", "--grch37"])
        .arg(table.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "# GRCh38 seq_region_name\tstart\tend\n"
    );
}

#[test]
fn test_cli_reports_malformed_row_on_stderr() {
    let table = write_table("#c\ts\te\n17\t36169091\n");

    for quiet in [false, true] {
        let mut command = Command::new(env!("CARGO_BIN_EXE_asm-convert"));
        command.env_remove("RUST_LOG");
        if quiet {
            command.arg("--quiet");
        }
        let output = command.arg(table.path()).output().unwrap();

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("line 2"), "stderr: {}", stderr);
        assert!(stderr.contains("17\t36169091"), "stderr: {}", stderr);
        assert_eq!(
            String::from_utf8_lossy(&output.stdout),
            "# GRCh37 seq_region_name\tstart\tend\n"
        );
    }
}
