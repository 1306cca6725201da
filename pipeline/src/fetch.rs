use serde::Deserialize;

use crate::PipelineError;

/// One record as served by the grid API. Either reading may be absent;
/// unknown fields are ignored.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawRecord {
    pub demand: Option<f32>,
    pub solar: Option<f32>,
}

/// A record with both readings present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanRecord {
    pub demand: f32,
    pub solar: f32,
}

impl RawRecord {
    /// Keeps the record only when both readings are present.
    pub fn clean(self) -> Option<CleanRecord> {
        match (self.demand, self.solar) {
            (Some(demand), Some(solar)) => Some(CleanRecord { demand, solar }),
            _ => None,
        }
    }
}

/// Fetches pages of home flow rates over HTTP. Every call re-fetches; there
/// is no caching and no retry.
pub struct HomeRatesClient {
    base_url: String,
    http: reqwest::Client,
}

impl HomeRatesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetches the records in the logical slice
    /// `[page * limit, (page + 1) * limit)` and drops the incomplete ones.
    ///
    /// # Errors
    /// Network and decode failures propagate as `PipelineError::Http`.
    pub async fn fetch_page(&self, page: usize, limit: usize) -> Result<Vec<CleanRecord>, PipelineError> {
        let raw: Vec<RawRecord> = self
            .http
            .get(self.page_url(page, limit))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(raw.into_iter().filter_map(RawRecord::clean).collect())
    }

    fn page_url(&self, page: usize, limit: usize) -> String {
        format!("{}/homerates?page={page}&limit={limit}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_drops_records_with_a_missing_reading() {
        let records = [
            RawRecord { demand: Some(1.0), solar: Some(2.0) },
            RawRecord { demand: None, solar: Some(2.0) },
            RawRecord { demand: Some(1.0), solar: None },
            RawRecord { demand: None, solar: None },
        ];

        let cleaned: Vec<CleanRecord> = records.into_iter().filter_map(RawRecord::clean).collect();

        assert_eq!(cleaned, vec![CleanRecord { demand: 1.0, solar: 2.0 }]);
    }

    #[test]
    fn deserializes_nulls_and_ignores_extra_fields() {
        let raw: Vec<RawRecord> = serde_json::from_str(
            r#"[
                {"id": 7, "demand": 0.5, "solar": null, "date": "2019-01-01"},
                {"demand": 0.25, "solar": 0.75}
            ]"#,
        )
        .unwrap();

        assert_eq!(raw[0].solar, None);
        assert_eq!(raw[0].demand, Some(0.5));
        assert_eq!(raw[1].clean(), Some(CleanRecord { demand: 0.25, solar: 0.75 }));
    }

    #[test]
    fn page_url_carries_page_and_limit() {
        let client = HomeRatesClient::new("http://localhost:3000");
        assert_eq!(
            client.page_url(2, 100),
            "http://localhost:3000/homerates?page=2&limit=100"
        );
    }
}
