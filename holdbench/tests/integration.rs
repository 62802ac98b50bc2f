//! Integration tests for HoldBench
//!
//! These tests verify the end-to-end behavior of the benchmark: holder
//! semantics, allocation accounting, the transfer-versus-copy gap, and the
//! reports produced by the driver.

use clap::Parser;
use holdbench::labels::*;
use holdbench::{
    Cli, ConsoleReporter, CopyHolder, Element, Holder, MoveHolder, Report, ReportCollector,
    SectionKind, Sizes, Timer, TimingError, TimingStack, TrackingAllocator, Transfer, produce,
    run_suite,
};
use std::hint::black_box;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

const ELEMENT_BYTES: u64 = std::mem::size_of::<Element>() as u64;

const SMALL: Sizes = Sizes {
    regular: 1 << 12,
    large: 1 << 13,
    demo: 1 << 14,
};

fn filled<H: Holder>(values: &[Element]) -> H {
    let mut holder = H::with_size(values.len()).unwrap();
    holder.as_mut_slice().copy_from_slice(values);
    holder
}

/// Duplication round-trips contents for both variants and leaves the source alone
#[test]
fn test_duplication_scenario_both_variants() {
    fn check<H: Holder>() {
        let source: H = filled(&[1, 2, 3, 4]);
        let copy = source.duplicate().unwrap();
        assert_eq!(copy.len(), 4);
        assert_eq!(copy.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(source.as_slice(), &[1, 2, 3, 4]);

        let mut target: H = filled(&[0; 9]);
        target.assign(&source).unwrap();
        assert_eq!(target.as_slice(), source.as_slice());
        assert_eq!(source.len(), 4);
    }

    check::<CopyHolder>();
    check::<MoveHolder>();
}

/// Transfer hands over the exact buffer and vacates the source
#[test]
fn test_transfer_scenario() {
    let mut source: MoveHolder = filled(&[1, 2, 3, 4]);
    let moved = MoveHolder::transfer(source.give_up());

    assert_eq!(moved.len(), 4);
    assert_eq!(moved.as_slice(), &[1, 2, 3, 4]);
    assert_eq!(source.len(), 0);
    assert!(source.is_vacant());
}

/// Transfers never allocate; duplication allocates the full buffer once
#[test]
fn test_allocation_accounting() {
    let size = 1 << 16;
    let mut source = MoveHolder::with_size(size).unwrap();

    let timer = Timer::start();
    let copy = black_box(source.duplicate().unwrap());
    let copied = timer.stop();

    let timer = Timer::start();
    let moved = black_box(MoveHolder::transfer(source.give_up()));
    let transferred = timer.stop();

    assert_eq!(copied.alloc_bytes, size as u64 * ELEMENT_BYTES);
    assert_eq!(copied.alloc_count, 1);
    assert_eq!(transferred.alloc_bytes, 0);
    assert_eq!(transferred.alloc_count, 0);
    assert_eq!(copy.len(), moved.len());
}

/// Transfer-construction must stay orders of magnitude below a full copy
#[test]
fn test_transfer_is_much_faster_than_copy() {
    let size = 1 << 24;
    let mut source = MoveHolder::with_size(size).unwrap();
    // Touch every page so the copy cannot ride on lazily zeroed memory
    source.as_mut_slice().fill(7);

    let timer = Timer::start();
    let copy = black_box(source.duplicate().unwrap());
    let copy_time = timer.stop().elapsed;

    let timer = Timer::start();
    let moved = black_box(MoveHolder::transfer(source.give_up()));
    let transfer_time = timer.stop().elapsed;

    assert!(
        transfer_time < copy_time / 10,
        "transfer took {transfer_time:?}, copy took {copy_time:?}"
    );
    assert_eq!(copy.as_slice(), moved.as_slice());
}

/// The factory hides which candidate is returned but always returns `size` elements
#[test]
fn test_factory_materializes_through_from_value() {
    let size = 1 << 10;
    let bytes = size as u64 * ELEMENT_BYTES;

    let timer = Timer::start();
    let moved: MoveHolder = black_box(produce(size).unwrap());
    let move_alloc = timer.stop();

    let timer = Timer::start();
    let copied: CopyHolder = black_box(produce(size).unwrap());
    let copy_alloc = timer.stop();

    assert_eq!(moved.len(), size);
    assert_eq!(copied.len(), size);
    assert_eq!(move_alloc.alloc_bytes, 2 * bytes);
    assert_eq!(copy_alloc.alloc_bytes, 3 * bytes);
}

#[test]
fn test_timing_stack_contract() {
    let mut stack = TimingStack::new();
    stack.start();
    let measurement = stack.stop().unwrap();
    assert!(measurement.seconds() >= 0.0);
    assert!(stack.is_empty());
    assert_eq!(stack.stop().unwrap_err(), TimingError::EmptyStackPop);
}

/// Per-step allocation totals reveal which path each variant took
#[test]
fn test_suite_allocation_profile() {
    let mut collector = ReportCollector::new();
    run_suite(&SMALL, &mut collector).unwrap();

    let sections = collector.sections();
    let regular = SMALL.regular as u64 * ELEMENT_BYTES;
    let large = SMALL.large as u64 * ELEMENT_BYTES;
    let demo = SMALL.demo as u64 * ELEMENT_BYTES;
    let bytes = |section: usize, label: &str| sections[section].entry(label).unwrap().alloc_bytes;

    // Copy-only: every consuming path copies
    assert_eq!(bytes(0, REGULAR_CONSTRUCTOR), regular);
    assert_eq!(bytes(0, COPY_CONSTRUCTOR), regular);
    assert_eq!(bytes(0, MOVE_CONSTRUCTOR), 3 * regular);
    assert_eq!(bytes(0, COPY_ASSIGNMENT), regular);
    assert_eq!(bytes(0, MOVE_ASSIGNMENT), 4 * large);

    // Copy+move: consuming paths only pay for the factory's two candidates
    assert_eq!(bytes(1, REGULAR_CONSTRUCTOR), regular);
    assert_eq!(bytes(1, COPY_CONSTRUCTOR), regular);
    assert_eq!(bytes(1, MOVE_CONSTRUCTOR), 2 * regular);
    assert_eq!(bytes(1, COPY_ASSIGNMENT), regular);
    assert_eq!(bytes(1, MOVE_ASSIGNMENT), 2 * large);

    assert_eq!(bytes(2, DEMO_COPY), 2 * demo);
    assert_eq!(bytes(2, DEMO_MOVE), demo);
}

/// Console output is banners plus one fixed-format line per measurement
#[test]
fn test_console_report_lines() {
    let mut reporter = ConsoleReporter::new(Vec::new());
    run_suite(&SMALL, &mut reporter).unwrap();
    let output = String::from_utf8(reporter.finish().unwrap()).unwrap();

    let measurement_lines: Vec<&str> = output
        .lines()
        .filter(|l| l.starts_with("current computation elapsed time : "))
        .collect();
    assert_eq!(measurement_lines.len(), 6 + 6 + 2);

    let expected_labels = [
        REGULAR_CONSTRUCTOR,
        COPY_CONSTRUCTOR,
        MOVE_CONSTRUCTOR,
        COPY_ASSIGNMENT,
        MOVE_ASSIGNMENT,
        TOTAL_COMPUTATION,
    ];
    for (line, label) in measurement_lines.iter().zip(
        expected_labels
            .iter()
            .chain(expected_labels.iter())
            .chain([DEMO_COPY, DEMO_MOVE].iter()),
    ) {
        let suffix = format!(" s for {label}");
        assert!(line.ends_with(&suffix), "unexpected line: {line}");

        let seconds = line
            .trim_start_matches("current computation elapsed time : ")
            .trim_end_matches(suffix.as_str());
        assert!(seconds.parse::<f64>().unwrap() >= 0.0);
    }

    assert!(output.contains(CopyHolder::NAME));
    assert!(output.contains(MoveHolder::NAME));
    assert!(output.contains(DEMO_TITLE));
}

/// Full CLI run writing a JSON report to a file
#[test]
fn test_cli_json_report() {
    let path = std::env::temp_dir().join(format!(
        "holdbench-integration-{}.json",
        std::process::id()
    ));
    let path_arg = path.to_string_lossy().into_owned();

    let cli = Cli::parse_from([
        "holdbench",
        "--format",
        "json",
        "--output",
        path_arg.as_str(),
        "--regular-size",
        "1024",
        "--large-size",
        "2Ki",
        "--demo-size",
        "2^12",
    ]);
    holdbench::run_with_cli(cli).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let report: Report = serde_json::from_str(&json).unwrap();

    assert_eq!(report.sections.len(), 3);
    assert_eq!(report.sections[0].kind, SectionKind::Variant);
    assert_eq!(report.sections[2].kind, SectionKind::Demonstration);
    assert_eq!(report.summary.measurements, 14);
    assert_eq!(report.comparisons.len(), 6);
    assert!(report.comparisons.iter().all(|c| c.speedup > 0.0));
    assert_eq!(report.meta.config.large_size, 2048);
    assert_eq!(report.meta.config.demo_size, 4096);
    assert!(report.meta.config.track_allocations);
}
