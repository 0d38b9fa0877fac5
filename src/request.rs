//! Request builders for the three DataMine endpoints.
//!
//! Every request maps to a fixed endpoint path, an ordered query string and
//! a deterministic output file name. Parameters are passed through verbatim;
//! the API itself is the only validator of dates, dataset names, exchange
//! codes and periods.

use chrono::{Datelike, NaiveDate};
use reqwest::Url;

use crate::error::{DataMineError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadRequest {
    /// JSON listing of the files available for a date.
    List {
        date: String,
        dataset: String,
        exchange_code: String,
        foi_indicator: Option<String>,
    },
    /// A whole day of a dataset as one archive.
    Batch {
        date: String,
        dataset: String,
        period: String,
    },
    /// A single file by its vendor file id.
    Specific { fid: String },
}

impl DownloadRequest {
    pub fn list(
        date: impl Into<String>,
        dataset: impl Into<String>,
        exchange_code: impl Into<String>,
        foi_indicator: Option<&str>,
    ) -> Self {
        Self::List {
            date: date.into(),
            dataset: dataset.into(),
            exchange_code: exchange_code.into(),
            foi_indicator: foi_indicator.map(str::to_string),
        }
    }

    pub fn batch(
        date: impl Into<String>,
        dataset: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self::Batch {
            date: date.into(),
            dataset: dataset.into(),
            period: period.into(),
        }
    }

    pub fn specific(fid: impl Into<String>) -> Self {
        Self::Specific { fid: fid.into() }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::List { .. } => "/list",
            Self::Batch { .. } => "/batchdownload",
            Self::Specific { .. } => "/download",
        }
    }

    pub fn query(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::List {
                date,
                dataset,
                exchange_code,
                foi_indicator,
            } => {
                let mut params = vec![
                    ("dataset", dataset.as_str()),
                    ("yyyymmdd", date.as_str()),
                    ("exchangecode", exchange_code.as_str()),
                ];
                if let Some(indicator) = foi_indicator {
                    params.push(("foiindicator", indicator.as_str()));
                }
                params
            }
            Self::Batch {
                date,
                dataset,
                period,
            } => vec![
                ("dataset", dataset.as_str()),
                ("yyyymmdd", date.as_str()),
                ("period", period.as_str()),
            ],
            Self::Specific { fid } => vec![("fid", fid.as_str())],
        }
    }

    pub fn url(&self, base_url: &str) -> Result<Url> {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), self.endpoint());
        Url::parse_with_params(&endpoint, self.query()).map_err(|e| DataMineError::InvalidUrl {
            url: endpoint,
            reason: e.to_string(),
        })
    }

    pub fn file_name(&self) -> String {
        match self {
            Self::List {
                date,
                dataset,
                exchange_code,
                foi_indicator: Some(indicator),
            } => format!("{}_{}_{}_{}.csv", date, dataset, exchange_code, indicator),
            Self::List {
                date,
                dataset,
                exchange_code,
                foi_indicator: None,
            } => format!("{}_{}_{}.csv", date, dataset, exchange_code),
            Self::Batch {
                date,
                dataset,
                period,
            } => format!("{}_full_{}_{}.csv.gz", date, dataset, period),
            Self::Specific { fid } => format!("{}.csv.gz", fid),
        }
    }
}

/// File ids for every calendar day of `year`-`month`, built as
/// `YYYYMMDD` followed by `suffix`. An invalid month yields nothing.
pub fn daily_fids(year: i32, month: u32, suffix: &str) -> Vec<String> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|day| format!("{}{}", day.format("%Y%m%d"), suffix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    #[test]
    fn list_with_indicator() {
        let request = DownloadRequest::list("20161004", "eod", "xnym", Some("opt"));
        assert_eq!(
            request.url(DEFAULT_BASE_URL).unwrap().as_str(),
            "https://datamine.cmegroup.com/cme/api/v1/list?dataset=eod&yyyymmdd=20161004&exchangecode=xnym&foiindicator=opt"
        );
        assert_eq!(request.file_name(), "20161004_eod_xnym_opt.csv");
    }

    #[test]
    fn list_without_indicator_drops_param_and_suffix() {
        let request = DownloadRequest::list("20161004", "eod", "xnym", None);
        assert_eq!(
            request.url(DEFAULT_BASE_URL).unwrap().as_str(),
            "https://datamine.cmegroup.com/cme/api/v1/list?dataset=eod&yyyymmdd=20161004&exchangecode=xnym"
        );
        assert_eq!(request.file_name(), "20161004_eod_xnym.csv");
    }

    #[test]
    fn batch_url_and_name() {
        let request = DownloadRequest::batch("20161004", "eod", "p");
        assert_eq!(
            request.url(DEFAULT_BASE_URL).unwrap().as_str(),
            "https://datamine.cmegroup.com/cme/api/v1/batchdownload?dataset=eod&yyyymmdd=20161004&period=p"
        );
        assert_eq!(request.file_name(), "20161004_full_eod_p.csv.gz");
    }

    #[test]
    fn specific_url_and_name() {
        let request = DownloadRequest::specific("20151003-EOD_xcme_zl_opt_0-eth_p");
        assert_eq!(
            request.url(DEFAULT_BASE_URL).unwrap().as_str(),
            "https://datamine.cmegroup.com/cme/api/v1/download?fid=20151003-EOD_xcme_zl_opt_0-eth_p"
        );
        assert_eq!(request.file_name(), "20151003-EOD_xcme_zl_opt_0-eth_p.csv.gz");
    }

    #[test]
    fn trailing_slash_on_base_url() {
        let request = DownloadRequest::specific("abc");
        assert_eq!(
            request.url("http://localhost:9000/api/").unwrap().as_str(),
            "http://localhost:9000/api/download?fid=abc"
        );
    }

    #[test]
    fn unparsable_base_url() {
        let err = DownloadRequest::specific("abc").url("datamine").unwrap_err();
        assert!(matches!(err, DataMineError::InvalidUrl { .. }));
    }

    #[test]
    fn daily_fids_covers_month() {
        let fids = daily_fids(2016, 10, "-EOD_xcme_zl_opt_0-eth_p");
        assert_eq!(fids.len(), 31);
        assert_eq!(fids[0], "20161001-EOD_xcme_zl_opt_0-eth_p");
        assert_eq!(fids[30], "20161031-EOD_xcme_zl_opt_0-eth_p");

        assert_eq!(daily_fids(2016, 2, "").len(), 29);
        assert_eq!(daily_fids(2015, 2, "").len(), 28);
        assert!(daily_fids(2016, 13, "").is_empty());
    }
}
