use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use jsmin::minify_bytes;

#[derive(Parser, Debug)]
#[command(name = "fixtures")]
#[command(about = "Create or validate minifier fixture files", long_about = None)]
struct Args {
    /// Write fixtures instead of validating them
    #[arg(long, short)]
    write: bool,

    /// Path to the fixtures directory (defaults to "./fixtures")
    #[arg(long, default_value = "fixtures")]
    dir: PathBuf,
}

/// Expected-output path for a fixture input: `name.js` -> `name.out.js`.
fn output_path(
    dir: &Path,
    input: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    let stem = input
        .file_stem()
        .and_then(|n| n.to_str())
        .ok_or("invalid filename")?;
    Ok(dir.join(format!("{stem}.out.js")))
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let mut input_files = Vec::new();
    for entry in fs::read_dir(&args.dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or("invalid filename")?;

        // Skip expected outputs and anything that isn't a script
        if filename.contains(".out.") || !filename.ends_with(".js") {
            continue;
        }

        input_files.push(path);
    }

    input_files.sort();

    if args.write {
        println!("Creating fixtures...");
        for input_path in &input_files {
            let out = minify_bytes(&fs::read(input_path)?)?;
            let out_path = output_path(&args.dir, input_path)?;
            fs::write(&out_path, out)?;
            println!("  Created {}", out_path.display());
        }
        println!("Done creating {} fixtures.", input_files.len());
        return Ok(());
    }

    println!("Validating fixtures...");
    let mut mismatches = Vec::new();

    for input_path in &input_files {
        let filename = input_path.display().to_string();
        let out_path = output_path(&args.dir, input_path)?;

        let out = match minify_bytes(&fs::read(input_path)?) {
            Ok(out) => out,
            Err(e) => {
                mismatches.push(format!("{filename}: {e}"));
                continue;
            }
        };

        if !out_path.exists() {
            mismatches.push(format!(
                "{filename}: missing output file {}",
                out_path.display()
            ));
            continue;
        }

        if fs::read(&out_path)? != out {
            mismatches.push(format!("{filename}: output mismatch"));
        } else if minify_bytes(&out)? != out {
            mismatches.push(format!("{filename}: not idempotent"));
        } else {
            println!("  ✓ {filename}");
        }
    }

    if !mismatches.is_empty() {
        eprintln!("\nValidation failed:");
        for mismatch in &mismatches {
            eprintln!("  ✗ {mismatch}");
        }
        return Err(format!("{} validation error(s)", mismatches.len()).into());
    }

    println!(
        "\nAll {} fixtures validated successfully!",
        input_files.len()
    );

    Ok(())
}
