//! CLI integration tests
//!
//! Run the built binary against a throwaway game installation and check exit
//! codes and written images.

mod common;

use common::*;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn kagrender(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kagrender"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute kagrender")
}

fn install() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_game_install(dir.path());
    blueprint(&[&[DIRT, DIRT, VOID]]).save(dir.path().join("map.png")).unwrap();
    dir
}

fn decode(path: &Path) -> image::DynamicImage {
    image::load_from_memory(&fs::read(path).expect("output written")).expect("output decodes")
}

#[test]
fn test_render_writes_default_output() {
    let dir = install();
    let output = kagrender(dir.path(), &["render", "map.png", "-b", "--seed", "1", "--config", "kagrender.toml"]);

    assert!(output.status.success(), "render failed: {}", String::from_utf8_lossy(&output.stderr));
    let image = decode(&dir.path().join("map.png.out"));
    assert_eq!((image.width(), image.height()), (24, 8));
}

#[test]
fn test_render_with_background_and_explicit_output() {
    let dir = install();
    let output = kagrender(dir.path(), &["render", "map.png", "-o", "out/map.bmp", "-f", "bmp", "--bdelta", "-20"]);

    assert!(output.status.success(), "render failed: {}", String::from_utf8_lossy(&output.stderr));
    let image = decode(&dir.path().join("out").join("map.bmp"));
    assert_eq!((image.width(), image.height()), (24, 8));
}

#[test]
fn test_check_reports_unknown_colors() {
    let dir = install();
    blueprint(&[&[DIRT, kagrender::color::Color::new(9, 9, 9)]]).save(dir.path().join("bad.png")).unwrap();

    let output = kagrender(dir.path(), &["check", "bad.png"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("unresolved #090909 x1"), "stdout: {}", stdout);
}

#[test]
fn test_check_clean_blueprint() {
    let dir = install();
    let output = kagrender(dir.path(), &["check", "map.png"]);

    assert!(output.status.success(), "check failed: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("2 solid"));
}

#[test]
fn test_invalid_format_is_usage_error() {
    let dir = install();
    let output = kagrender(dir.path(), &["render", "map.png", "-f", "tga"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_game_installation() {
    let dir = install();
    let output = kagrender(dir.path(), &["render", "map.png", "--path", "no/such/game"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid path to game installation"));
    assert!(!dir.path().join("map.png.out").exists());
}

#[test]
fn test_check_missing_game_installation() {
    let dir = install();
    let output = kagrender(dir.path(), &["check", "map.png", "--path", "no/such/game"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid path to game installation"));
}

#[test]
fn test_relative_game_path_follows_working_dir() {
    let dir = install();
    let work = dir.path().join("maps");
    fs::create_dir_all(&work).unwrap();
    blueprint(&[&[DIRT, DIRT, VOID]]).save(work.join("map.png")).unwrap();

    // The config one level up is discovered; --path is taken from maps/, not from the config's directory
    let output = kagrender(&work, &["render", "map.png", "-b", "--path", "../game"]);
    assert!(output.status.success(), "render failed: {}", String::from_utf8_lossy(&output.stderr));

    let output = kagrender(&work, &["render", "map.png", "-b", "--path", "game"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_strict_render_fails_on_unknown_colors() {
    let dir = install();
    blueprint(&[&[kagrender::color::Color::new(9, 9, 9)]]).save(dir.path().join("bad.png")).unwrap();

    let output = kagrender(dir.path(), &["render", "bad.png", "-b", "--strict"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("bad.png.out").exists());
}
