use clap::{Parser, Subcommand, ValueEnum};
use sitewire::config::{self, SiteConfig};
use std::path::PathBuf;

fn version_string() -> &'static str {
    // Called once per process.
    Box::leak(sitewire::version().into_boxed_str())
}

#[derive(Parser)]
#[command(name = "sitewire")]
#[command(about = "Check and generate configuration for sitewire page behaviors")]
#[command(long_about = "\
Check and generate configuration for sitewire page behaviors

The browser module reads its configuration from an inline block:

  <script type=\"application/toml\" id=\"sitewire-config\">
  [slideshow]
  interval_ms = 7000
  </script>

Keep that block in a sitewire.toml next to your pages and run
'sitewire check' before publishing. Run 'sitewire gen-config' for a
documented file with every option.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding sitewire.toml
    #[arg(long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Log mount and validation details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate sitewire.toml without printing it
    Check,
    /// Print a stock sitewire.toml with all options documented
    GenConfig,
    /// Print the resolved configuration, defaults filled in
    Show {
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toml,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    sitewire::logging::init(&config::LoggingConfig {
        level: level.to_string(),
    });

    match cli.command {
        Command::Check => {
            let site_config = config::load_config(&cli.dir)?;
            let source = cli.dir.join(config::CONFIG_FILE);
            if source.exists() {
                println!("{}: ok", source.display());
            } else {
                println!("{}: not found, stock defaults apply", source.display());
            }
            tracing::debug!(?site_config, "resolved");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Show { format } => {
            let site_config: SiteConfig = config::load_config(&cli.dir)?;
            match format {
                Format::Toml => print!("{}", toml::to_string_pretty(&site_config)?),
                Format::Json => println!("{}", serde_json::to_string_pretty(&site_config)?),
            }
        }
    }

    Ok(())
}
