use clap::{Parser, Subcommand};
use packsource::packer::PackOptions;
use packsource::{Config, Packer};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "packsource")]
#[command(about = "Scans a codebase, classifies feature-relevant files and bundles them into report artifacts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project directory and write the report artifacts
    Pack {
        /// Target directory to scan
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Label used for the report filename and summary sections
        #[arg(short, long, default_value = "project")]
        label: String,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for report artifacts
        #[arg(short, long, default_value = "./pack-output")]
        output: PathBuf,

        /// Also package the artifacts as a plugin scaffold
        #[arg(long)]
        plugin: bool,

        /// Also write a machine-readable summary.json
        #[arg(long)]
        json: bool,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the config file (defaults to ~/.packsource.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            path,
            label,
            config,
            output,
            plugin,
            json,
        } => {
            pack_project(path, label, config, output, PackOptions { plugin, json })?;
        }
        Commands::Config { output } => {
            generate_config(output)?;
        }
    }

    Ok(())
}

fn pack_project(
    target_path: PathBuf,
    label: String,
    config_path: Option<PathBuf>,
    output_path: PathBuf,
    options: PackOptions,
) -> anyhow::Result<()> {
    println!("🚀 Starting Packsource");
    println!("======================");

    let start_time = Instant::now();

    let mut config = if let Some(config_path) = config_path {
        Config::from_file(&config_path)?
    } else {
        Config::load()?
    };

    config.target_directory = target_path.clone();
    config.output_directory = output_path.clone();
    config.root_label = label;

    println!("🎯 Target directory: {}", target_path.display());
    println!("📤 Output directory: {}", output_path.display());
    println!();

    let packer = Packer::new(config)?;
    let outcome = packer.run(options)?;

    let duration = start_time.elapsed();

    println!("\n✅ Processing complete in {:.2}s", duration.as_secs_f64());
    println!(
        "📦 {} included, {} excluded across {} root(s)",
        outcome.total_included(),
        outcome.total_excluded(),
        outcome.results.len()
    );
    println!("📁 Artifacts:");
    for artifact in &outcome.artifacts {
        println!("   - {}", artifact.display());
    }

    Ok(())
}

fn generate_config(output_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = output_path.unwrap_or_else(|| {
        Config::default_config_path().unwrap_or_else(|_| PathBuf::from("packsource.toml"))
    });

    println!("📝 Generating configuration file: {}", config_path.display());

    let documented_config = Config::create_documented_config();
    std::fs::write(&config_path, documented_config)?;

    println!("✅ Configuration file created successfully!");
    println!("💡 Edit the file to customize the classification rules.");

    Ok(())
}
