use reqwest::blocking::Client;
use std::path::{Path, PathBuf};

use crate::config::DataMineConfig;
use crate::error::{DataMineError, Result};
use crate::output::write_bytes;
use crate::request::{daily_fids, DownloadRequest};

/// Blocking client bound to one set of credentials.
pub struct DataMineClient {
    http: Client,
    config: DataMineConfig,
}

/// Outcome of [`DataMineClient::download_month`].
#[derive(Debug, Default)]
pub struct MonthReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, DataMineError)>,
}

impl DataMineClient {
    pub fn new(config: DataMineConfig) -> Result<Self> {
        config.validate()?;
        // No total timeout: a whole-day archive may stream for minutes.
        let http = Client::builder().timeout(None).build()?;
        Ok(Self { http, config })
    }

    /// Issues the authenticated GET and returns the body. A non-2xx status
    /// is an error and the body is discarded.
    pub fn fetch(&self, request: &DownloadRequest) -> Result<Vec<u8>> {
        let url = request.url(&self.config.base_url)?;
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .basic_auth(&self.config.login, Some(&self.config.key))
            .send()?;

        if !response.status().is_success() {
            return Err(DataMineError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes()?;
        log::info!("Request completed: {} bytes from {}", bytes.len(), request.endpoint());
        Ok(bytes.to_vec())
    }

    pub fn download(&self, request: &DownloadRequest, output_dir: &Path) -> Result<PathBuf> {
        log::info!("Making request for {}", request.file_name());
        let content = self.fetch(request)?;
        write_bytes(output_dir, &request.file_name(), &content)
    }

    /// Downloads `{YYYYMMDD}{suffix}` for every day of the month, one after
    /// another. Days that fail are collected rather than aborting the run.
    pub fn download_month(
        &self,
        year: i32,
        month: u32,
        suffix: &str,
        output_dir: &Path,
    ) -> MonthReport {
        let mut report = MonthReport::default();

        for fid in daily_fids(year, month, suffix) {
            match self.download(&DownloadRequest::specific(fid.as_str()), output_dir) {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    log::warn!("Skipping {}: {}", fid, e);
                    report.failed.push((fid, e));
                }
            }
        }

        log::info!(
            "Month {}-{:02} finished: {} written, {} failed",
            year,
            month,
            report.written.len(),
            report.failed.len()
        );
        report
    }
}

/// Downloads the JSON listing of files available for `date`.
pub fn list_download(
    config: &DataMineConfig,
    date: &str,
    dataset: &str,
    exchange_code: &str,
    output_dir: &Path,
    foi_indicator: Option<&str>,
) -> Result<PathBuf> {
    let request = DownloadRequest::list(date, dataset, exchange_code, foi_indicator);
    DataMineClient::new(config.clone())?.download(&request, output_dir)
}

/// Downloads a whole day of `dataset` for `period` as one archive.
pub fn batch_download(
    config: &DataMineConfig,
    date: &str,
    dataset: &str,
    period: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let request = DownloadRequest::batch(date, dataset, period);
    DataMineClient::new(config.clone())?.download(&request, output_dir)
}

/// Downloads one file by its vendor file id.
pub fn specific_download(config: &DataMineConfig, fid: &str, output_dir: &Path) -> Result<PathBuf> {
    let request = DownloadRequest::specific(fid);
    DataMineClient::new(config.clone())?.download(&request, output_dir)
}
