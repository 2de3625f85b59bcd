use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Composite two images into one mirage tank.
#[derive(Parser, Debug)]
#[command(name = "mirage-tank", version)]
struct Cli {
    /// Inner image, revealed on a black background.
    inner_path: PathBuf,

    /// Outer image, revealed on a white background.
    outer_path: PathBuf,

    /// Brightness of the outer image's luma plane, between 0 and 1.
    #[arg(long, default_value_t = 1.0)]
    inner_light: f32,

    /// Brightness of the inner image's luma plane, between 0 and 1.
    #[arg(long, default_value_t = 0.3)]
    outer_light: f32,

    /// Output path; the extension must be .png, .webp or .bmp.
    #[arg(short, long, default_value = "./output.png")]
    output: PathBuf,

    /// Filter used when enlarging. Shrinking always averages areas.
    #[arg(long, value_enum, default_value_t = InterpChoice::Cubic)]
    interp: InterpChoice,

    /// Keep the outer image's resolution instead of the inner one's.
    #[arg(long, default_value_t = false)]
    use_outer: bool,

    /// Worker threads for the pixel loops; 0 runs single-threaded.
    #[arg(short = 'c', long)]
    cpu_num: Option<usize>,

    /// Also write `<stem>.black.png` and `<stem>.white.png` previews next to the output.
    #[arg(long, default_value_t = false)]
    preview: bool,

    /// Enable debug logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InterpChoice {
    Lanczos4,
    Cubic,
    Linear,
    Nearest,
}

impl From<InterpChoice> for mirage::Interpolation {
    fn from(choice: InterpChoice) -> Self {
        match choice {
            InterpChoice::Lanczos4 => Self::Lanczos4,
            InterpChoice::Cubic => Self::Cubic,
            InterpChoice::Linear => Self::Linear,
            InterpChoice::Nearest => Self::Nearest,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let opts = mirage::MirageOpts {
        lights: mirage::LightCoefficients::new(cli.inner_light, cli.outer_light),
        interpolation: cli.interp.into(),
        resolution: mirage::ResolutionSource::from_use_outer(cli.use_outer),
        threads: cli.cpu_num,
    };

    let img = mirage::compose_files(&cli.inner_path, &cli.outer_path, &cli.output, &opts)
        .with_context(|| format!("build mirage '{}'", cli.output.display()))?;

    if cli.preview {
        write_previews(&cli.output, &img)?;
    }

    eprintln!("wrote {}", cli.output.display());
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "mirage=debug,mirage_tank=debug"
    } else {
        "mirage=info,mirage_tank=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn write_previews(output: &Path, img: &image::RgbaImage) -> anyhow::Result<()> {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    for (backdrop, suffix) in [
        (mirage::Backdrop::Black, "black"),
        (mirage::Backdrop::White, "white"),
    ] {
        let path = output.with_file_name(format!("{stem}.{suffix}.png"));
        mirage::flatten(img, backdrop)
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write preview '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "preview written");
    }
    Ok(())
}
