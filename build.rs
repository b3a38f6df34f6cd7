//! Build script for tflm-rs.
//!
//! When the `runtime` feature is enabled, this script compiles the C++
//! micro-runtime bridge and links it together with the tflite-micro
//! static library. A tflite-micro checkout with its library built is
//! required.
//!
//! # Environment Variables
//!
//! - `TFLM_DIR`: Path to a tflite-micro checkout (required unless a
//!   common install location exists)
//! - `TFLM_LIB_DIR`: Directory containing libtensorflow-microlite.a
//!   (optional, defaults to the checkout's linux x86_64 gen tree)
//! - `TFLM_BRIDGE_SKIP_BUILD`: Set to "1" to skip building (for
//!   development)

use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    // The bridge only exists for the FFI engine.
    if env::var_os("CARGO_FEATURE_RUNTIME").is_none() {
        return;
    }
    build_micro_bridge();
}

/// Locate a tflite-micro checkout from TFLM_DIR or common install paths.
fn detect_tflm_dir() -> PathBuf {
    if let Ok(dir) = env::var("TFLM_DIR") {
        let path = PathBuf::from(&dir);
        if !path.exists() {
            panic!(
                "TFLM_DIR points to a non-existent path: {}",
                path.display()
            );
        }
        return path;
    }

    for candidate in ["/opt/tflite-micro", "/usr/local/tflite-micro"] {
        let path = PathBuf::from(candidate);
        if path.exists() {
            return path;
        }
    }

    panic!(
        "Could not find a tflite-micro checkout.\n\
         Checked: TFLM_DIR, /opt/tflite-micro, /usr/local/tflite-micro\n\
         \n\
         To fix, either:\n\
         1. Clone and build tflite-micro, then set TFLM_DIR to the checkout\n\
         2. Or build without the runtime feature: cargo build"
    );
}

/// Record the checkout's git revision so `tflm-rs info` can report it.
fn emit_runtime_version(tflm_dir: &PathBuf) {
    let output = Command::new("git")
        .arg("-C")
        .arg(tflm_dir)
        .args(["rev-parse", "--short", "HEAD"])
        .output();

    if let Ok(output) = output {
        if output.status.success() {
            if let Ok(stdout) = String::from_utf8(output.stdout) {
                let rev = stdout.trim().to_string();
                if !rev.is_empty() {
                    println!("cargo:rustc-env=TFLM_RUNTIME_VERSION={}", rev);
                }
            }
        }
    }
}

fn build_micro_bridge() {
    // Check if we should skip the build
    if env::var("TFLM_BRIDGE_SKIP_BUILD")
        .map(|v| v == "1")
        .unwrap_or(false)
    {
        println!("cargo:warning=Skipping micro-bridge build (TFLM_BRIDGE_SKIP_BUILD=1)");
        return;
    }

    // Rerun if bridge sources change
    println!("cargo:rerun-if-changed=micro_bridge/src/micro_bridge.cc");
    println!("cargo:rerun-if-changed=micro_bridge/include/micro_bridge.h");
    println!("cargo:rerun-if-env-changed=TFLM_DIR");
    println!("cargo:rerun-if-env-changed=TFLM_LIB_DIR");
    println!("cargo:rerun-if-env-changed=TFLM_BRIDGE_SKIP_BUILD");

    let tflm_dir = detect_tflm_dir();
    emit_runtime_version(&tflm_dir);

    // The checkout's third-party headers live under downloads/ after
    // `make -f tensorflow/lite/micro/tools/make/Makefile third_party_downloads`
    let downloads = tflm_dir.join("tensorflow/lite/micro/tools/make/downloads");

    cc::Build::new()
        .cpp(true)
        .std("c++17")
        .file("micro_bridge/src/micro_bridge.cc")
        .include("micro_bridge/include")
        .include(&tflm_dir)
        .include(downloads.join("flatbuffers/include"))
        .include(downloads.join("gemmlowp"))
        .define("TF_LITE_STATIC_MEMORY", None)
        .compile("micro_bridge");

    // Link the runtime's static library
    let lib_dir = env::var("TFLM_LIB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| tflm_dir.join("gen/linux_x86_64_default/lib"));
    if !lib_dir.exists() {
        panic!(
            "tflite-micro library directory does not exist: {}\n\
             Build the runtime first (make -f tensorflow/lite/micro/tools/make/Makefile microlite)\n\
             or set TFLM_LIB_DIR.",
            lib_dir.display()
        );
    }
    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib=static=tensorflow-microlite");
    println!("cargo:rustc-link-lib=stdc++");
}
