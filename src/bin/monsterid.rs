use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use monsterid::{DirPartStore, GenerateOptions, MonsterDescriptor, PreparedPartStore, Rgba8};

#[derive(Parser, Debug)]
#[command(name = "monsterid", version)]
struct Cli {
    /// Log debug details (selected descriptor, skipped parts) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the monster for an input as a PNG.
    Generate(GenerateArgs),
    /// Print the parts and color selected for an input as JSON.
    Describe(DescribeArgs),
    /// Verify a parts directory holds every catalog entry.
    CheckParts(CheckPartsArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Input as UTF-8 text.
    #[arg(long)]
    input: Option<String>,

    /// Input read verbatim from a file.
    #[arg(long = "input-file")]
    input_file: Option<PathBuf>,

    /// Input given as hex-encoded bytes (e.g. an identity hash).
    #[arg(long)]
    hex: Option<String>,
}

impl InputArgs {
    fn bytes(&self) -> anyhow::Result<Vec<u8>> {
        if let Some(text) = &self.input {
            return Ok(text.as_bytes().to_vec());
        }
        if let Some(path) = &self.input_file {
            return std::fs::read(path)
                .with_context(|| format!("read input file '{}'", path.display()));
        }
        if let Some(hex) = &self.hex {
            return decode_hex(hex);
        }
        anyhow::bail!("one of --input, --input-file or --hex is required")
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Directory holding `{category}_{index}.png` parts.
    #[arg(long)]
    parts: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Options JSON file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw parts without any recoloring.
    #[arg(long, default_value_t = false)]
    no_artistic: bool,

    /// Render in grey.
    #[arg(long, default_value_t = false)]
    greyscale: bool,

    /// Background as #RRGGBB, #RRGGBBAA or `transparent`.
    #[arg(long)]
    background: Option<Rgba8>,

    /// Recolor rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Print per-layer decisions as JSON on stdout.
    #[arg(long, default_value_t = false)]
    report: bool,
}

#[derive(Args, Debug)]
struct DescribeArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Args, Debug)]
struct CheckPartsArgs {
    /// Directory holding `{category}_{index}.png` parts.
    #[arg(long)]
    parts: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Describe(args) => cmd_describe(args),
        Command::CheckParts(args) => cmd_check_parts(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let input = args.input.bytes()?;

    let mut opts = match &args.config {
        Some(path) => GenerateOptions::from_path(path)?,
        None => GenerateOptions::default(),
    };
    if args.no_artistic {
        opts.artistic = false;
    }
    if args.greyscale {
        opts.greyscale = true;
    }
    if let Some(bg) = args.background {
        opts.background = bg;
    }
    if args.parallel {
        opts.parallel = true;
    }

    let store = DirPartStore::new(&args.parts);
    let monster = monsterid::generate_monster(&input, &store, &opts);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    monster
        .image
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    if args.report {
        let report = serde_json::json!({
            "descriptor": monster.descriptor,
            "layers": monster.layers,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_describe(args: DescribeArgs) -> anyhow::Result<()> {
    let input = args.input.bytes()?;
    let descriptor = MonsterDescriptor::select(&input);
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

fn cmd_check_parts(args: CheckPartsArgs) -> anyhow::Result<()> {
    let store = PreparedPartStore::load_dir(&args.parts);
    for (key, reason) in store.missing() {
        println!("missing {}: {reason}", key.file_name());
    }
    if !store.missing().is_empty() {
        anyhow::bail!(
            "{} of {} parts unavailable in '{}'",
            store.missing().len(),
            store.len() + store.missing().len(),
            args.parts.display()
        );
    }
    eprintln!("all {} parts present", store.len());
    Ok(())
}

fn decode_hex(s: &str) -> anyhow::Result<Vec<u8>> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    if !s.is_ascii() || !s.len().is_multiple_of(2) {
        anyhow::bail!("hex input must have an even number of hex digits");
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .with_context(|| format!("invalid hex byte \"{}\"", &s[i..i + 2]))
        })
        .collect()
}
