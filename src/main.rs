//! Football form feature CLI
//!
//! Builds leakage-safe team form features from historical match logs.

use clap::{Parser, Subcommand};
use football::{Config, Result};

#[derive(Parser)]
#[command(name = "football")]
#[command(about = "Team form features for football match prediction", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the per-match feature table
    Build {
        /// Match log CSV files (defaults to the configured raw path)
        #[arg(short, long)]
        input: Vec<String>,
        /// Output CSV path (defaults to the configured processed path)
        #[arg(short, long)]
        output: Option<String>,
        /// Override the form window size
        #[arg(long)]
        window: Option<usize>,
        /// Leave out matches where either side has fewer prior matches
        #[arg(long)]
        min_history: Option<usize>,
    },
    /// Show each team's form going into its next match
    Form {
        /// Match log CSV files (defaults to the configured raw path)
        #[arg(short, long)]
        input: Vec<String>,
        /// Override the form window size
        #[arg(long)]
        window: Option<usize>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Summarize a match log
    Status {
        /// Match log CSV files (defaults to the configured raw path)
        #[arg(short, long)]
        input: Vec<String>,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Build {
            input,
            output,
            window,
            min_history,
        } => commands::build(&config, input, output, window, min_history),
        Commands::Form {
            input,
            window,
            format,
        } => commands::form(&config, input, window, format),
        Commands::Status { input } => commands::status(&config, input),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use football::data::{load_seasons, write_features, DatasetSummary};
    use football::features::chronology::normalize;
    use football::features::{build_features, FeatureTable};
    use football::{FeatureConfig, RawMatch};

    fn inputs_or_default(config: &Config, input: Vec<String>) -> Vec<String> {
        if input.is_empty() {
            vec![config.data.raw_path.clone()]
        } else {
            input
        }
    }

    fn load(config: &Config, input: Vec<String>) -> Result<Vec<RawMatch>> {
        let paths = inputs_or_default(config, input);
        load_seasons(&paths)
    }

    fn feature_config(
        config: &Config,
        window: Option<usize>,
        min_history: Option<usize>,
    ) -> FeatureConfig {
        let mut features = config.features.clone();
        if let Some(w) = window {
            features.window = w;
        }
        if let Some(m) = min_history {
            features.min_history = m;
        }
        features
    }

    fn build_table(config: &Config, input: Vec<String>, features: &FeatureConfig) -> Result<FeatureTable> {
        let raw = load(config, input)?;
        build_features(raw, features)
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("data/raw")?;
        std::fs::create_dir_all("data/processed")?;
        println!("Created data/raw and data/processed directories");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Place season CSVs under data/raw (e.g. data/raw/2324/E0.csv)");
        println!("  3. Run 'football build --input data/raw/2324/E0.csv' to build features");
        println!("  4. Run 'football form' to see current team form");

        Ok(())
    }

    pub fn build(
        config: &Config,
        input: Vec<String>,
        output: Option<String>,
        window: Option<usize>,
        min_history: Option<usize>,
    ) -> Result<()> {
        let features = feature_config(config, window, min_history);
        let table = build_table(config, input, &features)?;

        let rows = if features.min_history > 0 {
            table.rows_with_history(features.min_history)
        } else {
            table.rows().to_vec()
        };

        let output = output.unwrap_or_else(|| config.data.processed_path.clone());
        write_features(&output, &rows)?;

        println!("Features built");
        println!("───────────────────────────────");
        println!("  Matches:  {}", table.len());
        println!("  Exported: {}", rows.len());
        println!("  Teams:    {}", table.current_form().len());
        println!("  Output:   {}", output);

        Ok(())
    }

    pub fn form(
        config: &Config,
        input: Vec<String>,
        window: Option<usize>,
        format: OutputFormat,
    ) -> Result<()> {
        let table = build_table(config, input, &feature_config(config, window, None))?;
        let standings = table.current_form();

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            }
            OutputFormat::Table => {
                println!(
                    "{:<24} {:>7} {:>7} {:>7} {:>5}",
                    "Team", "Pts", "GF", "GA", "N"
                );
                println!("{}", "─".repeat(54));
                for t in &standings {
                    println!(
                        "{:<24} {:>7.2} {:>7.2} {:>7.2} {:>5}",
                        t.team, t.form.points, t.form.goals_scored, t.form.goals_conceded, t.history
                    );
                }
            }
        }

        Ok(())
    }

    pub fn status(config: &Config, input: Vec<String>) -> Result<()> {
        let raw = load(config, input)?;
        let matches = normalize(raw, &config.features.date_formats)?;
        let stats = DatasetSummary::from_matches(&matches);

        println!("Match Log Status");
        println!("───────────────────────────────");
        println!("  Teams:    {}", stats.team_count);
        println!("  Matches:  {}", stats.match_count);
        if let (Some(earliest), Some(latest)) = (stats.earliest_match, stats.latest_match) {
            println!("  Range:    {} to {}", earliest, latest);
        }
        println!(
            "  Results:  H {:.1}%  D {:.1}%  A {:.1}%",
            100.0 * stats.home_win_rate(),
            100.0 * stats.draw_rate(),
            100.0 * stats.away_win_rate()
        );

        Ok(())
    }
}
