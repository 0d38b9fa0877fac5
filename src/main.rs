use anyhow::{Context, Result};
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use datamine_downloader::{DataMineClient, DataMineConfig, DownloadRequest};

const CONFIG_ENV: &str = "DATAMINE_CONFIG";

enum Mode {
    List,
    Batch,
    Specific,
    Month,
}

fn data_local_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.data_local_dir().join("datamine"))
        .ok_or_else(|| anyhow::anyhow!("Failed to get base directories"))
}

/// Logs go to `<data_dir>/logs/datamine_<timestamp>.log`; returns that path.
fn setup_logging(data_dir: &Path) -> Result<PathBuf> {
    let log_dir = data_dir.join("logs");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("datamine_{}.log", stamp));
    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    WriteLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new()
            .set_time_format_rfc3339()
            .set_location_level(LevelFilter::Debug)
            .build(),
        log_file,
    )?;

    Ok(log_path)
}

fn load_config() -> Result<DataMineConfig> {
    let path = match std::env::var_os(CONFIG_ENV) {
        Some(path) => PathBuf::from(path),
        None => DataMineConfig::default_path()
            .ok_or_else(|| anyhow::anyhow!("Failed to locate config directory"))?,
    };

    DataMineConfig::from_file(&path)
        .with_context(|| format!("Failed to load config from {:?}", path))
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_required(label: &str) -> Result<String> {
    let value = prompt(label)?;
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", label);
    }
    Ok(value)
}

fn show_menu() -> Result<Mode> {
    println!("datamine downloader");
    println!("1) file listing");
    println!("2) batch download (full day)");
    println!("3) specific file");
    println!("4) specific file for every day of a month");

    match prompt("choice")?.as_str() {
        "1" => Ok(Mode::List),
        "2" => Ok(Mode::Batch),
        "3" => Ok(Mode::Specific),
        "4" => Ok(Mode::Month),
        _ => {
            println!("invalid choice");
            show_menu()
        }
    }
}

fn get_output_directory(data_dir: &Path) -> Result<PathBuf> {
    let default = data_dir.join("data");
    let input = prompt(&format!("output dir [{}]", default.display()))?;

    let dir = if input.is_empty() {
        default
    } else {
        PathBuf::from(input)
    };

    fs::create_dir_all(&dir).context("Failed to create output directory")?;
    Ok(dir)
}

fn run(client: &DataMineClient, mode: Mode, data_dir: &Path) -> Result<()> {
    let request = match mode {
        Mode::List => {
            let date = prompt_required("date (YYYYMMDD)")?;
            let dataset = prompt_required("dataset")?;
            let exchange_code = prompt_required("exchange code")?;
            let indicator = prompt("foi indicator (fut/opt/idx, blank for all)")?;
            let indicator = (!indicator.is_empty()).then_some(indicator.as_str());
            DownloadRequest::list(date, dataset, exchange_code, indicator)
        }
        Mode::Batch => {
            let date = prompt_required("date (YYYYMMDD)")?;
            let dataset = prompt_required("dataset")?;
            let period = prompt_required("period")?;
            DownloadRequest::batch(date, dataset, period)
        }
        Mode::Specific => DownloadRequest::specific(prompt_required("fid")?),
        Mode::Month => {
            let year: i32 = prompt_required("year")?.parse().context("Invalid year")?;
            let month: u32 = prompt_required("month")?.parse().context("Invalid month")?;
            let suffix = prompt_required("fid suffix (e.g. -EOD_xcme_zl_opt_0-eth_p)")?;
            let output_dir = get_output_directory(data_dir)?;

            let report = client.download_month(year, month, &suffix, &output_dir);
            println!("{} files written to {}", report.written.len(), output_dir.display());
            for (fid, e) in &report.failed {
                println!("failed {}: {}", fid, e);
            }
            if report.written.is_empty() {
                anyhow::bail!("No files downloaded for {}-{:02}", year, month);
            }
            return Ok(());
        }
    };

    let output_dir = get_output_directory(data_dir)?;
    let path = client.download(&request, &output_dir)?;
    println!("written {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let data_dir = data_local_dir()?;
    let log_path = setup_logging(&data_dir)?;
    info!("datamine downloader starting");

    let config = load_config()?;
    info!("Base URL: {}", config.base_url);

    let client = DataMineClient::new(config)?;
    let mode = show_menu()?;

    if let Err(e) = run(&client, mode, &data_dir) {
        error!("Download failed: {:#}", e);
        println!("\ndownload failed: {:#}", e);
        println!("log: {}", log_path.display());
        std::process::exit(1);
    }

    info!("Download completed successfully");
    Ok(())
}
