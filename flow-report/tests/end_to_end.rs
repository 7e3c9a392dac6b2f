//! Full pipeline over a throw-away flow tree.

use std::fs;
use std::path::Path;

use flow_report::{run, DesignKey, FlowLayout, FlowPaths, ReportOptions, Status, Verbosity};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) -> anyhow::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Three variants: one clean, one with DRC violations, one failing its metrics check.
fn flow_tree() -> anyhow::Result<TempDir> {
    let dir = TempDir::new()?;
    let root = dir.path();

    write(root, "logs/nangate45/gcd/base/1_synth.log", "[INFO] ok\n")?;
    write(root, "logs/nangate45/gcd/base/6_report.log", "[WARNING STA-1] tight\n")?;
    write(root, "reports/nangate45/gcd/base/gen-metrics-base-check.log", "ok\n")?;
    write(root, "reports/nangate45/gcd/base/metadata-base-check.log", "ok\n")?;
    write(root, "reports/nangate45/gcd/base/5_route_drc.rpt", "clean\n")?;

    write(root, "logs/sky130hd/aes/base/6_report.log", "ok\n")?;
    write(
        root,
        "reports/sky130hd/aes/base/5_route_drc.rpt",
        "violation type: SPACING\nviolation type: SPACING\nviolation type: WIDTH\n",
    )?;

    write(root, "logs/asap7/ibex/base/6_report.log", "ok\n")?;
    write(
        root,
        "reports/asap7/ibex/base/metadata-base-check.log",
        "[ERROR] worst slack -0.2 below limit\n",
    )?;

    write(root, "reports/report.log", "stale\n")?;
    write(root, "reports/report-summary.log", "stale\n")?;
    Ok(dir)
}

#[test]
fn per_design_mode_writes_every_report() -> anyhow::Result<()> {
    let dir = flow_tree()?;
    let paths = FlowPaths::new(dir.path());
    let layout = FlowLayout::default();
    let mut console = Vec::new();

    let designs = run(&paths, &layout, &ReportOptions::default(), &mut console)?;
    assert_eq!(designs.len(), 3);
    assert_eq!(designs.failure_count(), 1);
    let ibex = designs
        .get(&DesignKey::new("asap7", "ibex", "base"))
        .map(|r| r.status());
    assert_eq!(ibex, Some(Status::Failing));

    let combined = fs::read_to_string(paths.single_report(&layout))?;
    assert_eq!(
        combined,
        "asap7 ibex (base)\n      [ERROR] worst slack -0.2 below limit\n\
         sky130hd aes (base)\n  Design has the violations under the allowed limit: SPACING (2) WIDTH (1)\n"
    );
    assert!(!paths.summary_file(&layout).exists());
    assert_eq!(String::from_utf8(console)?, combined);

    let gcd = fs::read_to_string(dir.path().join("reports/nangate45/gcd/base/report.log"))?;
    assert_eq!(gcd, "");
    Ok(())
}

#[test]
fn summary_mode_groups_designs() -> anyhow::Result<()> {
    let dir = flow_tree()?;
    let paths = FlowPaths::new(dir.path());
    let layout = FlowLayout::default();
    let options = ReportOptions {
        verbosity: Verbosity(1),
        quiet: true,
        summary: true,
        json: true,
    };
    let mut console = Vec::new();

    run(&paths, &layout, &options, &mut console)?;
    assert!(console.is_empty());

    let summary = fs::read_to_string(paths.summary_file(&layout))?;
    assert!(summary.contains("Number of designs: 3"));
    let passing = summary.find("Passing designs").unwrap_or(usize::MAX);
    let failing = summary.find("Failing designs").unwrap_or(usize::MAX);
    let gcd = summary.find("nangate45 gcd (base)\n  Flow reached last stage.").unwrap_or(usize::MAX);
    let ibex = summary.find("asap7 ibex (base)").unwrap_or(usize::MAX);
    assert!(passing < gcd && gcd < failing && failing < ibex && ibex < summary.len());
    assert!(summary.contains("  Found 1 metrics failures.\n"));
    assert!(!summary.contains("stale"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(paths.json_file(&layout))?)?;
    assert_eq!(json.as_array().map(Vec::len), Some(3));
    Ok(())
}

#[test]
fn missing_logs_directory_yields_no_designs() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let paths = FlowPaths::new(dir.path());
    let mut console = Vec::new();
    let designs = run(&paths, &FlowLayout::default(), &ReportOptions::default(), &mut console)?;
    assert!(designs.is_empty());
    assert!(paths.reports().is_dir());
    Ok(())
}
