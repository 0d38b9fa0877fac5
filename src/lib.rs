//! Client for the CME DataMine download API.
//!
//! Builds the query URL for a listing, batch or single-file request, fetches
//! it with basic auth and writes the raw response body to disk.

pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod request;

pub use client::{batch_download, list_download, specific_download, DataMineClient, MonthReport};
pub use config::DataMineConfig;
pub use error::{DataMineError, Result};
pub use output::write_bytes;
pub use request::{daily_fids, DownloadRequest};
