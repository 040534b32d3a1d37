use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use boxedit::codec;
use boxedit::ocr::LstmBoxGenerator;
use boxedit::session::find_sibling_image;
use boxedit::Displacements;

#[derive(Parser, Debug)]
#[command(name = "boxedit")]
#[command(version, about = "Tesseract LSTM box-file inspection and correction toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show information about a box file
    Info {
        /// Input box file path
        input: PathBuf,

        /// Dump the parsed word boxes as JSON instead of a summary
        #[arg(short, long)]
        json: bool,
    },

    /// Parse a box file and rewrite it in canonical form
    Normalize {
        /// Input box file path
        input: PathBuf,

        /// Output path (default: rewrite in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run Tesseract on an image to generate its box file
    Generate {
        /// Input image path (tif or similar)
        input: PathBuf,

        /// OCR language passed to tesseract
        #[arg(short, long, default_value = "eng")]
        lang: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input, json } => show_info(input, json),
        Commands::Normalize { input, output } => normalize(input, output),
        Commands::Generate { input, lang } => generate(input, lang),
    }
}

fn validate_input(input: &PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if !input.is_file() {
        anyhow::bail!("Input is not a file: {}", input.display());
    }
    Ok(())
}

fn show_info(input: PathBuf, json: bool) -> Result<()> {
    validate_input(&input)?;

    let outcome = codec::load(&input)
        .with_context(|| format!("Failed to load box file: {}", input.display()))?;

    if json {
        #[derive(serde::Serialize)]
        struct Dump<'a> {
            words: &'a [boxedit::WordBoxCore],
            warnings: &'a [codec::ParseWarning],
        }
        let dump = Dump {
            words: &outcome.cores,
            warnings: &outcome.warnings,
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    println!("Box File Information");
    println!("====================");
    println!("File: {}", input.display());
    println!("Words: {}", outcome.cores.len());

    let extent = outcome
        .cores
        .iter()
        .map(|core| core.displacements)
        .reduce(|acc, d| acc.union(&d));
    if let Some(extent) = extent {
        println!(
            "Extent: left={} bottom={} right={} top={}",
            extent.left, extent.bottom, extent.right, extent.top
        );
    }

    match find_sibling_image(&input) {
        Ok(image_path) => {
            let (width, height) = image::image_dimensions(&image_path)
                .with_context(|| format!("Failed to read image: {}", image_path.display()))?;
            println!("Image: {} ({}x{})", image_path.display(), width, height);
            report_out_of_bounds(&outcome.cores, width, height);
        }
        Err(_) => println!("Image: none found"),
    }

    for warning in &outcome.warnings {
        eprintln!("  [!] {warning}");
    }

    Ok(())
}

fn report_out_of_bounds(cores: &[boxedit::WordBoxCore], width: u32, height: u32) {
    let image = Displacements::new(0, height as i32, width as i32, 0);
    for core in cores {
        let d = core.displacements;
        if image.union(&d) != image {
            eprintln!(
                "  [!] box {:?} exceeds image bounds ({}x{})",
                core.text, width, height
            );
        }
    }
}

fn normalize(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    validate_input(&input)?;

    let outcome = codec::load(&input)
        .with_context(|| format!("Failed to load box file: {}", input.display()))?;

    for warning in &outcome.warnings {
        eprintln!("  [!] {warning}");
    }

    let target = output.unwrap_or_else(|| input.clone());
    codec::save(&target, &outcome.cores)
        .with_context(|| format!("Failed to write: {}", target.display()))?;

    println!(
        "[✓] Wrote {} word(s) to {}",
        outcome.cores.len(),
        target.display()
    );
    Ok(())
}

fn generate(input: PathBuf, lang: String) -> Result<()> {
    validate_input(&input)?;

    println!("[*] Running tesseract on: {}", input.display());

    let generator = LstmBoxGenerator::new().with_lang(lang);
    let box_path = generator
        .run(&input)
        .with_context(|| format!("OCR failed for: {}", input.display()))?;

    let outcome = codec::load(&box_path)?;
    for warning in &outcome.warnings {
        eprintln!("  [!] {warning}");
    }

    println!(
        "[✓] Generated {} with {} word(s)",
        box_path.display(),
        outcome.cores.len()
    );
    Ok(())
}
