use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config, DataConfig, DEFAULT_TOP_K};
use crate::scoring::{validate_scoring, weight_sum_warning, ScoringConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a weight typed at the prompt.
fn parse_weight(input: &str) -> Result<f64, String> {
    let w: f64 = input
        .parse()
        .map_err(|_| format!("'{}' is not a number", input))?;
    if !(0.0..=1.0).contains(&w) {
        return Err("must be between 0 and 1".to_string());
    }
    Ok(w)
}

fn prompt_weight(message: &str, default: f64) -> Result<f64> {
    loop {
        let input = prompt_with_default(message, &default.to_string())?;
        match parse_weight(&input) {
            Ok(w) => return Ok(w),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    }
}

/// Write the config as YAML, replacing any existing file atomically.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Doctorate Discover Configuration");
    println!("================================");
    println!();

    // 1. Data files
    let data_defaults = DataConfig::default();
    let programs = prompt_with_default(
        "Program table CSV",
        &data_defaults.programs.display().to_string(),
    )?;
    let world_rankings = prompt_with_default(
        "World ranking CSV",
        &data_defaults.world_rankings.display().to_string(),
    )?;

    // 2. Scoring weights
    println!();
    println!("Programs are scored on USA rank, tuition and stipend. The weights should add up to 1.");
    let defaults = ScoringConfig::default().weights();
    let configure_scoring = prompt_yes_no("Configure weights? (n accepts 0.5 / 0.3 / 0.2)", false)?;

    let scoring = if configure_scoring {
        loop {
            let scoring = ScoringConfig {
                rank: Some(prompt_weight("Rank weight", defaults.rank)?),
                tuition: Some(prompt_weight("Tuition weight", defaults.tuition)?),
                stipend: Some(prompt_weight("Stipend weight", defaults.stipend)?),
            };
            if let Err(errors) = validate_scoring(&scoring) {
                for e in errors {
                    println!("  Invalid: {}", e);
                }
                continue;
            }
            match weight_sum_warning(&scoring.weights()) {
                Some(warning) => {
                    println!("  {}", warning);
                    if prompt_yes_no("Keep these weights anyway?", false)? {
                        break Some(scoring);
                    }
                }
                None => break Some(scoring),
            }
        }
    } else {
        None
    };

    // 3. Result size
    println!();
    let top_k = loop {
        let input = prompt_with_default("How many programs should `top` show?", &DEFAULT_TOP_K.to_string())?;
        match input.parse::<usize>() {
            Ok(k) if k > 0 => break k,
            _ => println!("  Invalid: must be a positive whole number. Try again."),
        }
    };

    // 4. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        data: DataConfig {
            programs: PathBuf::from(programs),
            world_rankings: PathBuf::from(world_rankings),
        },
        scoring,
        top_k,
        ..Default::default()
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `doctorate-discover fields` to get started.");

    Ok(())
}
