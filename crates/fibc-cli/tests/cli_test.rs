//! CLI integration tests for fibc-calc
//!
//! Every test runs the binary with XDG config/data dirs pointed into a temp
//! directory so user configuration and saved presets never leak in.

use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Get a command instance isolated in `home`
fn calc_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("fibc-calc"));
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut assert_cmd::Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// calc
// =============================================================================

#[test]
fn test_calc_standard_preset_table() {
    let home = TempDir::new().unwrap();
    calc_cmd(&home)
        .args(["calc", "--preset", "std-1t-2spout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("907.20 g"))
        .stdout(predicate::str::contains("162.45 g"))
        .stdout(predicate::str::contains("1680.61 g"));
}

#[test]
fn test_calc_json_breakdown() {
    let home = TempDir::new().unwrap();
    let value = json_output(calc_cmd(&home).args(["-f", "json", "calc", "-p", "std-1t-2spout"]));
    let breakdown = &value["breakdown"];
    assert!((breakdown["body_g"].as_f64().unwrap() - 907.2).abs() < 1e-6);
    assert!((breakdown["ties_g"].as_f64().unwrap() - 30.0).abs() < 1e-6);
    assert!((breakdown["total_kg"].as_f64().unwrap() - 1.68061).abs() < 1e-5);
}

#[test]
fn test_calc_flags_without_preset() {
    let home = TempDir::new().unwrap();
    let value = json_output(calc_cmd(&home).args([
        "--format",
        "json",
        "calc",
        "--height",
        "100",
        "--width",
        "125",
        "--main-density",
        "200",
    ]));
    assert_eq!(value["name"], "custom");
    assert!((value["breakdown"]["body_g"].as_f64().unwrap() - 1000.0).abs() < 1e-6);
    assert_eq!(value["breakdown"]["top_spout_g"].as_f64().unwrap(), 0.0);
}

#[test]
fn test_calc_empty_height_field_gives_nan() {
    let home = TempDir::new().unwrap();
    let value = json_output(calc_cmd(&home).args([
        "-f",
        "json",
        "calc",
        "-p",
        "std-1t-2spout",
        "-F",
        "height=",
    ]));
    // NaN serializes as null
    assert!(value["breakdown"]["body_g"].is_null());
    assert!(value["breakdown"]["total_grams"].is_null());
    assert!(value["breakdown"]["bottom_g"].is_f64());
}

#[test]
fn test_calc_strict_ratio_flag() {
    let home = TempDir::new().unwrap();
    calc_cmd(&home)
        .args(["calc", "--strap-ratio", "half"])
        .assert()
        .failure();
}

#[test]
fn test_calc_lenient_ratio_field() {
    let home = TempDir::new().unwrap();
    let value = json_output(calc_cmd(&home).args([
        "-f",
        "json",
        "calc",
        "-p",
        "std-1t-2spout",
        "-F",
        "strap_ratio=half",
    ]));
    assert_eq!(value["spec"]["strap"]["sewn_ratio"], "one_third");
}

#[test]
fn test_calc_unknown_preset_fails() {
    let home = TempDir::new().unwrap();
    calc_cmd(&home)
        .args(["calc", "--preset", "std-9t"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset: std-9t"));
}

#[test]
fn test_calc_unknown_field_fails() {
    let home = TempDir::new().unwrap();
    calc_cmd(&home)
        .args(["calc", "-F", "colour=white"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field 'colour'"));
}

#[test]
fn test_calc_export() {
    let home = TempDir::new().unwrap();
    let sheet = home.path().join("bag.xlsx");
    calc_cmd(&home)
        .args(["calc", "-p", "std-1t-discharge", "--export"])
        .arg(&sheet)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported to:"));
    assert!(sheet.is_file());
}

// =============================================================================
// batch
// =============================================================================

#[test]
fn test_batch_csv() {
    let home = TempDir::new().unwrap();
    let csv = home.path().join("bags.csv");
    fs::write(
        &csv,
        "name,height,width,bottom_size,main_density,aux_density,bottom_spout_diameter,bottom_spout_height,tie_weight,tie_length,strap_loop,strap_ratio,strap_weight,thread_weight\n\
         discharge-1t,140,90,95,180,95,40,48,10,150,25,two_thirds,35,0.077\n\
         open-500,100,90,92,160,0,,,0,0,25,one_third,30,0.077\n",
    )
    .unwrap();
    let sheet = home.path().join("bags.xlsx");

    calc_cmd(&home)
        .arg("batch")
        .arg(&csv)
        .arg("-o")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("discharge-1t"))
        .stdout(predicate::str::contains("open-500"))
        .stdout(predicate::str::contains("2 bag(s)"));
    assert!(sheet.is_file());
}

#[test]
fn test_batch_missing_file() {
    let home = TempDir::new().unwrap();
    calc_cmd(&home)
        .args(["batch", "/nonexistent/bags.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV file not found"));
}

// =============================================================================
// check
// =============================================================================

#[test]
fn test_check_samples_report() {
    let home = TempDir::new().unwrap();
    let csv = home.path().join("samples.csv");
    fs::write(
        &csv,
        "sample_id,preset,measured_grams,lot\n\
         S1,std-1t-2spout,1690,L1\n\
         S2,std-1t-2spout,1790,L1\n\
         S3,unknown-bag,1500,L2\n",
    )
    .unwrap();

    calc_cmd(&home)
        .args(["check", "--samples"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit Weight Check Report"))
        .stdout(predicate::str::contains("Out of tolerance:     1"))
        .stdout(predicate::str::contains("Unknown preset:       1"))
        .stderr(predicate::str::contains("1 sample(s) outside"));
}

#[test]
fn test_check_wider_tolerance_json() {
    let home = TempDir::new().unwrap();
    let csv = home.path().join("samples.csv");
    fs::write(&csv, "sample_id,preset,measured_grams\nS2,std-1t-2spout,1790\n").unwrap();

    let value = json_output(
        calc_cmd(&home)
            .args(["-f", "json", "check", "-t", "10", "--samples"])
            .arg(&csv),
    );
    assert_eq!(value[0]["out_of_tolerance"], false);
    assert!(value[0]["deviation_percent"].as_f64().unwrap() > 6.0);
}

// =============================================================================
// preset
// =============================================================================

#[test]
fn test_preset_save_show_remove() {
    let home = TempDir::new().unwrap();

    calc_cmd(&home)
        .args([
            "preset",
            "save",
            "narrow-1t",
            "-d",
            "narrow body",
            "--preset",
            "std-1t-2spout",
            "--width",
            "80",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved preset 'narrow-1t'"));

    calc_cmd(&home)
        .args(["preset", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved"))
        .stdout(predicate::str::contains("narrow-1t"))
        .stdout(predicate::str::contains("std-500kg-open"));

    let value = json_output(calc_cmd(&home).args(["-f", "json", "calc", "-p", "narrow-1t"]));
    // 80 x 140 x 4 x 0.018
    assert!((value["breakdown"]["body_g"].as_f64().unwrap() - 806.4).abs() < 1e-6);

    calc_cmd(&home)
        .args(["preset", "remove", "narrow-1t"])
        .assert()
        .success();

    calc_cmd(&home)
        .args(["preset", "show", "narrow-1t"])
        .assert()
        .failure();
}

#[test]
fn test_preset_save_rejects_builtin_name() {
    let home = TempDir::new().unwrap();
    calc_cmd(&home)
        .args(["preset", "save", "std-1t-2spout", "--height", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Built-in preset"));
}

#[test]
fn test_preset_save_rejects_nan() {
    let home = TempDir::new().unwrap();
    calc_cmd(&home)
        .args(["preset", "save", "broken", "-F", "height=abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a finite number"));
}

#[test]
fn test_corrupt_store_not_overwritten() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("data").join("fibc-calc");
    fs::create_dir_all(&store).unwrap();
    let store_file = store.join("presets.json");
    fs::write(&store_file, r#"{"keep-me": {"name": "keep-me", "#).unwrap();

    calc_cmd(&home)
        .args(["preset", "save", "new", "--height", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("preset store"));
    assert_eq!(
        fs::read_to_string(&store_file).unwrap(),
        r#"{"keep-me": {"name": "keep-me", "#
    );
}

#[test]
fn test_presets_file_from_config() {
    let home = TempDir::new().unwrap();
    let presets = home.path().join("presets.toml");
    fs::write(
        &presets,
        r#"
[[presets]]
name = "plant-a-2t"
description = "Plant A 2 t"

[presets.spec]
height_cm = 180.0
width_cm = 110.0
bottom_size_cm = 110.0
main_density_gm2 = 220.0
aux_density_gm2 = 100.0
thread_weight_per_cm_g = 0.08
"#,
    )
    .unwrap();

    calc_cmd(&home)
        .args(["config", "--set-presets-file"])
        .arg(&presets)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration updated"));

    calc_cmd(&home)
        .args(["preset", "show", "plant-a-2t"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plant A 2 t"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn test_config_output_format_persists() {
    let home = TempDir::new().unwrap();
    calc_cmd(&home)
        .args(["config", "--set-output", "json"])
        .assert()
        .success();

    let value = json_output(calc_cmd(&home).args(["calc", "-p", "std-500kg-open"]));
    assert_eq!(value["name"], "std-500kg-open");

    calc_cmd(&home)
        .args(["config", "--reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration reset to defaults"));
}

#[test]
fn test_config_rejects_negative_tolerance() {
    let home = TempDir::new().unwrap();
    calc_cmd(&home)
        .args(["config", "--set-tolerance=-1"])
        .assert()
        .failure();
}

// =============================================================================
// demo data
// =============================================================================

fn demos_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
}

#[test]
fn test_demo_files() {
    let home = TempDir::new().unwrap();
    let demos = demos_dir();

    calc_cmd(&home)
        .arg("batch")
        .arg(demos.join("bags.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 bag(s)"));

    calc_cmd(&home)
        .args(["check", "--samples"])
        .arg(demos.join("samples.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Total samples:        4"))
        .stdout(predicate::str::contains("QC-0003"))
        .stdout(predicate::str::contains("L2410-02"));

    calc_cmd(&home)
        .args(["config", "--set-presets-file"])
        .arg(demos.join("presets.toml"))
        .assert()
        .success();
    calc_cmd(&home)
        .args(["preset", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plant-a-1.5t"));
}
