//! CLI integration tests for the `zxtex` binary.
//!
//! Runs the built binary against temporary files and checks stdout, stderr,
//! written files and exit codes for image -> text, text -> image and
//! literal-string conversions.

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Get the path to the zxtex binary.
fn zxtex_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_zxtex"))
}

/// Run zxtex in `dir` and return (stdout, stderr, exit code).
fn run_in(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(zxtex_binary())
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.join(".no-xdg"))
        .args(args)
        .output()
        .expect("Failed to execute zxtex");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

/// Write a small test sprite: magenta, yellow / transparent, bright white.
fn write_sprite_png(path: &Path) {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, Rgba([255, 0, 255, 255]));
    img.put_pixel(1, 0, Rgba([250, 250, 5, 255]));
    img.put_pixel(0, 1, Rgba([90, 90, 90, 0]));
    img.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
    img.save(path).expect("should save sprite png");
}

// ============================================================================
// Image -> text
// ============================================================================

#[test]
fn test_png_to_stdout_row_mode() {
    let temp = TempDir::new().expect("should create temp dir");
    write_sprite_png(&temp.path().join("sprite.png"));

    let (stdout, _, code) = run_in(temp.path(), &["sprite.png"]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "# file: sprite.png\n# width: 2\n# height: 2\n# generator: zxtex\nBE\n.F\n"
    );
}

#[test]
fn test_png_to_stdout_raw_mode() {
    let temp = TempDir::new().expect("should create temp dir");
    write_sprite_png(&temp.path().join("sprite.png"));

    let (stdout, _, code) = run_in(temp.path(), &["sprite.png", "--raw"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "BE.F\n");
}

#[test]
fn test_png_with_transparent_color() {
    let temp = TempDir::new().expect("should create temp dir");
    write_sprite_png(&temp.path().join("sprite.png"));

    let (stdout, _, code) =
        run_in(temp.path(), &["sprite.png", "--raw", "--transparent-color", "#FF00FF"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, ".E.F\n");
}

#[test]
fn test_png_with_transparent_index() {
    let temp = TempDir::new().expect("should create temp dir");
    write_sprite_png(&temp.path().join("sprite.png"));

    let (stdout, _, code) =
        run_in(temp.path(), &["sprite.png", "--raw", "--transparent-index", "14"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "B..F\n");
}

#[test]
fn test_malformed_transparent_color_is_ignored() {
    let temp = TempDir::new().expect("should create temp dir");
    write_sprite_png(&temp.path().join("sprite.png"));

    let (stdout, _, code) =
        run_in(temp.path(), &["sprite.png", "--raw", "--transparent-color", "#XYZ123"]);
    assert_eq!(code, 0, "bad colour must not abort the conversion");
    assert_eq!(stdout, "BE.F\n");
}

#[test]
fn test_png_to_text_file() {
    let temp = TempDir::new().expect("should create temp dir");
    write_sprite_png(&temp.path().join("sprite.png"));

    let (stdout, _, code) = run_in(temp.path(), &["sprite.png", "-o", "sprite.txt"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Text written to sprite.txt"));
    let written = fs::read_to_string(temp.path().join("sprite.txt")).unwrap();
    assert!(written.ends_with("BE\n.F\n"));
}

#[test]
fn test_png_to_text_file_in_new_directory() {
    let temp = TempDir::new().expect("should create temp dir");
    write_sprite_png(&temp.path().join("sprite.png"));

    let (_, _, code) = run_in(temp.path(), &["sprite.png", "--raw", "-o", "out/text/sprite.txt"]);
    assert_eq!(code, 0);
    let written = fs::read_to_string(temp.path().join("out/text/sprite.txt")).unwrap();
    assert_eq!(written, "BE.F\n");
}

#[test]
fn test_malformed_png_fails_with_decode_error() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("broken.png"), b"this is not a png").unwrap();

    let (stdout, stderr, code) = run_in(temp.path(), &["broken.png"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty(), "no partial output expected");
    assert!(stderr.contains("failed to decode"), "stderr was: {}", stderr);
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("notes.md"), b"0123").unwrap();

    let (_, stderr, code) = run_in(temp.path(), &["notes.md"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unsupported file type: .md"));
}

// ============================================================================
// Text -> image
// ============================================================================

#[test]
fn test_text_file_roundtrip_uses_header_name() {
    let temp = TempDir::new().expect("should create temp dir");
    write_sprite_png(&temp.path().join("sprite.png"));
    let (_, _, code) = run_in(temp.path(), &["sprite.png", "-o", "sprite.txt"]);
    assert_eq!(code, 0);
    fs::remove_file(temp.path().join("sprite.png")).unwrap();

    let (stdout, _, code) = run_in(temp.path(), &["sprite.txt"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Image saved as sprite.png (2x2)"), "stdout was: {}", stdout);

    let img = image::open(temp.path().join("sprite.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(*img.get_pixel(0, 0), Rgba([255, 0, 255, 255]));
    assert_eq!(*img.get_pixel(1, 0), Rgba([255, 255, 0, 255]));
    assert_eq!(*img.get_pixel(0, 1), Rgba([0, 0, 0, 0]));
}

#[test]
fn test_text_file_without_header_uses_default_name() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("grid.txt"), "012\n345\n678\n").unwrap();

    let (stdout, _, code) = run_in(temp.path(), &["grid.txt"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("out.png (3x3)"));
    assert!(temp.path().join("out.png").exists());
}

#[test]
fn test_text_file_with_scale_and_output() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("grid.txt"), "12\n34\n").unwrap();

    let (_, _, code) =
        run_in(temp.path(), &["grid.txt", "--scale", "4", "-o", "previews/big.png"]);
    assert_eq!(code, 0);
    let img = image::open(temp.path().join("previews/big.png")).unwrap();
    assert_eq!((img.width(), img.height()), (8, 8));
}

#[test]
fn test_header_only_text_is_empty_input() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("empty.txt"), "# file: x.png\n# width: 2\n# height: 2\n").unwrap();

    let (_, stderr, code) = run_in(temp.path(), &["empty.txt"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no pixel data"));
    assert!(!temp.path().join("x.png").exists());
}

// ============================================================================
// Literal strings
// ============================================================================

#[test]
fn test_literal_without_width_is_configuration_error() {
    let temp = TempDir::new().expect("should create temp dir");
    let (_, stderr, code) = run_in(temp.path(), &["0x0123"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("width is required"));
    assert!(!temp.path().join("out.png").exists());
}

#[test]
fn test_literal_with_oversized_width_is_rejected() {
    let temp = TempDir::new().expect("should create temp dir");
    let (_, stderr, code) = run_in(temp.path(), &["FF", "--width", "18446744073709551615"]);
    assert_eq!(code, 2);
    assert!(!stderr.contains("panicked"), "stderr was: {}", stderr);
    assert!(!temp.path().join("out.png").exists());
}

#[test]
fn test_literal_with_width() {
    let temp = TempDir::new().expect("should create temp dir");
    let (stdout, _, code) = run_in(temp.path(), &["0x0F.A", "--width", "2", "-o", "lit.png"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("lit.png (2x2)"));

    let img = image::open(temp.path().join("lit.png")).unwrap().to_rgba8();
    assert_eq!(*img.get_pixel(1, 0), Rgba([255, 255, 255, 255]));
    assert_eq!(*img.get_pixel(0, 1), Rgba([0, 0, 0, 0]));
    assert_eq!(*img.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
}

// ============================================================================
// Config file and misc
// ============================================================================

#[test]
fn test_config_file_defaults_apply() {
    let temp = TempDir::new().expect("should create temp dir");
    write_sprite_png(&temp.path().join("sprite.png"));
    fs::write(
        temp.path().join("zxtex.toml"),
        "[defaults]\nraw = true\n\n[transparency]\ncolor = \"255,0,255\"\n",
    )
    .unwrap();

    let (stdout, _, code) = run_in(temp.path(), &["sprite.png"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, ".E.F\n");
}

#[test]
fn test_invalid_config_file() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("zxtex.toml"), "[defaults]\nscale = 0\n").unwrap();

    let (_, stderr, code) = run_in(temp.path(), &["00", "--width", "1"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("defaults.scale"));
}

#[test]
fn test_config_scale_above_limit_is_rejected() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("zxtex.toml"), "[defaults]\nscale = 4294967295\n").unwrap();

    let (_, stderr, code) = run_in(temp.path(), &["FF", "--width", "2"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("defaults.scale"), "stderr was: {}", stderr);
    assert!(!temp.path().join("out.png").exists());
}

#[test]
fn test_config_width_above_limit_is_rejected() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("zxtex.toml"), "[defaults]\nwidth = 100000\n").unwrap();

    let (_, stderr, code) = run_in(temp.path(), &["FF"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("defaults.width"), "stderr was: {}", stderr);
}

#[test]
fn test_palette_command() {
    let temp = TempDir::new().expect("should create temp dir");
    let (stdout, _, code) = run_in(temp.path(), &["palette"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("B => #FF00FF  Bright Magenta"));
    assert!(stdout.contains(". => transparent"));
}

#[test]
fn test_missing_input_is_usage_error() {
    let temp = TempDir::new().expect("should create temp dir");
    let (_, stderr, code) = run_in(temp.path(), &[]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Usage"));
}
