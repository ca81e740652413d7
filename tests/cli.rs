extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.len() > PNG_MAGIC.len());
    assert_eq!(&bytes[..8], &PNG_MAGIC[..]);
}

fn assert_gif(path: &Path) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.len() > 6);
    assert_eq!(&bytes[..6], b"GIF89a");
}

#[test]
fn mandel_renders_a_png_still() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.png");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "32x24", "-i", "64"])
        .assert()
        .success();
    assert_png(&out);
}

#[test]
fn mandel_renders_a_binary_graymap() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.pnm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "16x16", "-i", "32", "-p", "gray"])
        .assert()
        .success();
    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[..2], b"P5");
}

#[test]
fn mandel_rejects_inverted_corners() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.png");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-l",
            "1.0,1.0",
            "-r",
            "-1.0,-1.0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
    assert!(!out.exists());
}

#[test]
fn mandel_rejects_malformed_size() {
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", "out.png", "-s", "axb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn mandel_zoom_caps_its_frame_count() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("zoom.gif");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "16x16",
            "-i",
            "16",
            "--animate",
            "zoom",
            "--frames",
            "200",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zoom window closes"));
}

#[test]
fn mandel_deepen_animation_writes_a_gif() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("deepen.gif");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "16x12",
            "--animate",
            "deepen",
            "--frames",
            "4",
        ])
        .assert()
        .success();
    assert_gif(&out);
}

#[test]
fn julia_sweep_writes_gif_and_frame_dumps() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("julia.gif");
    let framedir = dir.path().join("frames");
    Command::cargo_bin("julia")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "16x16",
            "-i",
            "20",
            "--animate",
            "--frames",
            "3",
            "--framedir",
            framedir.to_str().unwrap(),
        ])
        .assert()
        .success();
    assert_gif(&out);
    for frame in 0..3 {
        assert_png(&framedir.join(format!("frame_{:03}.png", frame)));
    }
}

#[test]
fn julia_still_uses_the_constant() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("julia.png");
    Command::cargo_bin("julia")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "24x24",
            "-c",
            "-0.8,0.0",
            "-i",
            "50",
            "--radius",
            "4.0",
        ])
        .assert()
        .success();
    assert_png(&out);
}

#[test]
fn koch_renders_stills_plain_and_colored() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("koch.png");
    Command::cargo_bin("koch")
        .unwrap()
        .args(&["-o", plain.to_str().unwrap(), "-s", "48x48", "-d", "2"])
        .assert()
        .success();
    assert_png(&plain);

    let colored = dir.path().join("koch_colored.png");
    Command::cargo_bin("koch")
        .unwrap()
        .args(&[
            "-o",
            colored.to_str().unwrap(),
            "-s",
            "48x48",
            "-d",
            "2",
            "--random-colors",
        ])
        .assert()
        .success();
    assert_png(&colored);
}

#[test]
fn sierpinski_animates_one_level_per_frame() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("gasket.gif");
    Command::cargo_bin("sierpinski")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "32x32",
            "-d",
            "3",
            "--animate",
        ])
        .assert()
        .success();
    assert_gif(&out);
}

#[test]
fn takagi_renders_a_still() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("takagi.png");
    Command::cargo_bin("takagi")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "64x48", "--samples", "200"])
        .assert()
        .success();
    assert_png(&out);
}

#[test]
fn weierstrass_renders_curve_and_surface() {
    let dir = tempfile::tempdir().unwrap();
    let curve = dir.path().join("curve.png");
    Command::cargo_bin("weierstrass")
        .unwrap()
        .args(&[
            "-o",
            curve.to_str().unwrap(),
            "-s",
            "64x48",
            "-n",
            "30",
            "--samples",
            "200",
        ])
        .assert()
        .success();
    assert_png(&curve);

    let surface = dir.path().join("surface.png");
    Command::cargo_bin("weierstrass")
        .unwrap()
        .args(&[
            "-o",
            surface.to_str().unwrap(),
            "-s",
            "24x24",
            "-m",
            "surface",
            "-b",
            "3.0",
            "-n",
            "6",
        ])
        .assert()
        .success();
    assert_png(&surface);
}

#[test]
fn blossom_renders_still_and_growth_gif() {
    let dir = tempfile::tempdir().unwrap();
    let still = dir.path().join("blossom.png");
    Command::cargo_bin("blossom")
        .unwrap()
        .args(&["-o", still.to_str().unwrap(), "-s", "32x32", "--samples", "300"])
        .assert()
        .success();
    assert_png(&still);

    let gif = dir.path().join("blossom.gif");
    Command::cargo_bin("blossom")
        .unwrap()
        .args(&[
            "-o",
            gif.to_str().unwrap(),
            "-s",
            "16x16",
            "--samples",
            "100",
            "--animate",
            "--frames",
            "3",
        ])
        .assert()
        .success();
    assert_gif(&gif);
}
