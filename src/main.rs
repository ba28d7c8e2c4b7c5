use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use doctorate_discover::config::{self, Config};
use doctorate_discover::diagnostics::Warning;
use doctorate_discover::output;
use doctorate_discover::scoring::{compute_top_programs, validate_scoring, ScoringConfig, TopProgramsRequest};
use doctorate_discover::summary::{summarize_by_group, GroupKey, ValueColumn};
use doctorate_discover::table::{self, Criterion, ProgramTable, COST_VIEW_LIMIT};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned columns for reading
    Table,
    /// Tab-separated values without headers
    Tsv,
    /// Pretty-printed JSON including warnings
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank a field's programs by weighted rank, tuition and stipend
    Top {
        /// Field of study to rank
        #[arg(long)]
        field: String,
        /// Weight of the USA rank (overrides config)
        #[arg(long)]
        rank_weight: Option<f64>,
        /// Weight of the tuition (overrides config)
        #[arg(long)]
        tuition_weight: Option<f64>,
        /// Weight of the stipend (overrides config)
        #[arg(long)]
        stipend_weight: Option<f64>,
        /// Only show programs in this state (repeatable)
        #[arg(long)]
        region: Vec<String>,
        /// Number of programs to show
        #[arg(short)]
        k: Option<usize>,
    },
    /// List a field's programs sorted by one criterion
    Browse {
        #[arg(long)]
        field: String,
        #[arg(long, value_enum, default_value = "usa-rank")]
        criterion: Criterion,
        #[arg(long)]
        limit: Option<usize>,
        /// Show annual cost of living instead
        #[arg(long)]
        costs: bool,
    },
    /// Outlier-trimmed mean of a column per group
    Summary {
        #[arg(long, value_enum)]
        group: GroupKey,
        #[arg(long, value_enum)]
        value: ValueColumn,
    },
    /// List fields of study with their job outlook
    Fields,
    /// List the states programs are located in
    Regions,
    /// Show the world university ranking
    World {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "doctorate-discover")]
#[command(about = "Explore and rank doctoral programs", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/doctorate-discover/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Program table CSV (overrides config)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "doctorate_discover=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_warnings(warnings: &[Warning]) {
    let use_colors = std::io::IsTerminal::is_terminal(&std::io::stderr());
    for warning in warnings {
        eprintln!("{}", output::format_warning(warning, use_colors));
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match output::render_json(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to render JSON: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn load_programs(cli_path: Option<PathBuf>, config: &Config) -> ProgramTable {
    let path = cli_path.unwrap_or_else(|| config.data.programs.clone());
    match table::load_programs(&path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Data error: {}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();
    let format = cli.format;

    if let Commands::Init = cli.command {
        if let Err(e) = config::run_init_wizard(cli.config) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Top {
            field,
            rank_weight,
            tuition_weight,
            stipend_weight,
            region,
            k,
        } => {
            let base = config.scoring();
            let scoring = ScoringConfig {
                rank: rank_weight.or(base.rank),
                tuition: tuition_weight.or(base.tuition),
                stipend: stipend_weight.or(base.stipend),
            };
            if let Err(errors) = validate_scoring(&scoring) {
                eprintln!("Scoring errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }

            let programs = load_programs(cli.data, &config);
            let regions = if region.is_empty() {
                config.regions.clone()
            } else {
                region
            };
            let request = TopProgramsRequest::new(field, scoring.weights(), k.unwrap_or(config.top_k))
                .with_regions(regions);
            debug!(field = %request.field, k = request.k, regions = request.allowed_regions.len(), "ranking programs");

            let ranked = compute_top_programs(&programs, &request);
            print_warnings(&ranked.warnings);

            match format {
                OutputFormat::Json => print_json(&ranked),
                OutputFormat::Tsv => println!("{}", output::format_ranked_tsv(&ranked.programs)),
                OutputFormat::Table if cli.verbose && !ranked.programs.is_empty() => {
                    for scored in &ranked.programs {
                        println!("{}", output::format_ranked_detail(scored, use_colors));
                        println!();
                    }
                }
                OutputFormat::Table => {
                    println!("{}", output::format_ranked_table(&ranked.programs, use_colors))
                }
            }
            debug!(candidates = ranked.candidates, shown = ranked.programs.len(), "ranking done");
        }
        Commands::Browse {
            field,
            criterion,
            limit,
            costs,
        } => {
            let programs = load_programs(cli.data, &config);
            let default_limit = if costs { COST_VIEW_LIMIT } else { config.browse_limit };
            let limit = limit.unwrap_or(default_limit);
            let browsed = if costs {
                table::browse_costs(&programs, &field, criterion, limit)
            } else {
                table::browse_by_criterion(&programs, &field, criterion, limit)
            };
            print_warnings(&browsed.warnings);
            let rows = &browsed.rows;

            match format {
                OutputFormat::Json => print_json(&browsed),
                OutputFormat::Tsv if costs => println!("{}", output::format_cost_tsv(rows)),
                OutputFormat::Tsv => println!("{}", output::format_browse_tsv(rows, criterion)),
                OutputFormat::Table => {
                    if let Some(outlook) = table::field_outlook(&programs, &field) {
                        println!("{}", output::format_field_outlook(&outlook));
                        println!();
                    }
                    if costs {
                        println!("{}", output::format_cost_table(rows, use_colors));
                    } else {
                        println!("{}", output::format_browse_table(rows, criterion, use_colors));
                    }
                }
            }
        }
        Commands::Summary { group, value } => {
            let programs = load_programs(cli.data, &config);
            let summary = summarize_by_group(&programs, group, value);
            print_warnings(&summary.warnings);
            debug!(kept = summary.cleaned.len(), outliers = summary.outliers, "summary done");

            match format {
                OutputFormat::Json => print_json(&summary),
                OutputFormat::Tsv => println!("{}", output::format_summary_tsv(&summary)),
                OutputFormat::Table => println!("{}", output::format_summary_table(&summary, use_colors)),
            }
        }
        Commands::Fields => {
            let programs = load_programs(cli.data, &config);
            let outlooks: Vec<_> = table::fields(&programs)
                .into_iter()
                .filter_map(|f| table::field_outlook(&programs, f))
                .collect();

            match format {
                OutputFormat::Json => print_json(&outlooks),
                OutputFormat::Tsv => {
                    for o in &outlooks {
                        println!(
                            "{}\t{}\t{}",
                            o.field,
                            o.post_phd_salary.map(|v| v.to_string()).unwrap_or_default(),
                            o.post_phd_employment.map(|v| v.to_string()).unwrap_or_default()
                        );
                    }
                }
                OutputFormat::Table => println!("{}", output::format_fields(&outlooks, use_colors)),
            }
        }
        Commands::Regions => {
            let programs = load_programs(cli.data, &config);
            let regions = table::regions(&programs);
            match format {
                OutputFormat::Json => print_json(&regions),
                OutputFormat::Tsv | OutputFormat::Table => {
                    for region in regions {
                        println!("{}", region);
                    }
                }
            }
        }
        Commands::World { limit } => {
            let path = &config.data.world_rankings;
            let entries = match table::load_world_rankings(path) {
                Ok(e) => e,
                Err(e) => {
                    eprintln!("Data error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };
            let rows = table::world_ranking(&entries, limit.unwrap_or(config.browse_limit));

            match format {
                OutputFormat::Json => print_json(&rows),
                OutputFormat::Tsv => {
                    for e in &rows {
                        println!(
                            "{}\t{}\t{}\t{}",
                            e.rank.map(|v| v.to_string()).unwrap_or_default(),
                            e.name,
                            e.latitude.map(|v| v.to_string()).unwrap_or_default(),
                            e.longitude.map(|v| v.to_string()).unwrap_or_default()
                        );
                    }
                }
                OutputFormat::Table => println!("{}", output::format_world_table(&rows, use_colors)),
            }
        }
        // Handled before the config is loaded
        Commands::Init => {}
    }

    debug!(elapsed = ?start_time.elapsed(), "finished");
    std::process::exit(EXIT_SUCCESS);
}
