//! Build script installing the configuration templates.
//!
//! Copies `.env.example` and `config.example.json` from the crate root into
//! `~/.mergify/` so users find ready-to-edit templates next to the files the
//! binary reads at runtime. A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

const TEMPLATES: [&str; 2] = [".env.example", "config.example.json"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for template in TEMPLATES {
        println!("cargo:rerun-if-changed={}", template);
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    let mut out_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push(".mergify");
    fs::create_dir_all(&out_dir)?;

    for template in TEMPLATES {
        let source = manifest_dir.join(template);
        if source.is_file() {
            fs::copy(&source, out_dir.join(template))?;
        } else {
            println!("cargo:warning={} not found at {}", template, source.display());
        }
    }

    Ok(())
}
