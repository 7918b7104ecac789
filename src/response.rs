//! Typed view of the `/api/v1/query` JSON envelope.
//!
//! ```json
//! {"status":"success","data":{"resultType":"vector","result":[
//!   {"metric":{"__name__":"up","job":"node"},"value":[1700000000.123,"1"]}
//! ]}}
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::CheckError;

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<QueryData>,
    #[serde(rename = "errorType", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryData {
    #[serde(rename = "resultType", default)]
    pub result_type: String,
    pub result: Vec<Sample>,
}

/// One labeled series with its current value.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    pub metric: Labels,
    pub value: SampleValue,
}

/// `[unix timestamp, stringified number]`
#[derive(Debug, Clone, Deserialize)]
pub struct SampleValue(pub f64, pub String);

/// The label set of a series, kept sorted by label name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

impl Labels {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Labels {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Labels(iter.into_iter().collect())
    }
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={:?}", name, value)?;
        }
        f.write_str("}")
    }
}

impl QueryResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, CheckError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Unwraps the result rows, rejecting error envelopes and empty results.
    pub fn into_samples(self) -> Result<Vec<Sample>, CheckError> {
        for warning in &self.warnings {
            tracing::warn!(%warning, "prometheus reported a warning");
        }

        if self.status != "success" {
            let message = match (self.error_type, self.error) {
                (Some(kind), Some(error)) => format!("{}: {}", kind, error),
                (None, Some(error)) => error,
                (Some(kind), None) => kind,
                (None, None) => "no error given".to_owned(),
            };
            return Err(CheckError::QueryFailed {
                status: self.status,
                message,
            });
        }

        let data = self.data.ok_or(CheckError::EmptyResult)?;
        tracing::debug!(
            result_type = %data.result_type,
            rows = data.result.len(),
            "decoded query response"
        );

        if data.result.is_empty() {
            return Err(CheckError::EmptyResult);
        }
        Ok(data.result)
    }
}

impl Sample {
    /// Parses the stringified value. Prometheus' `NaN`, `+Inf` and `-Inf` are accepted.
    pub fn parse_value(&self) -> Result<f64, CheckError> {
        self.value
            .1
            .trim()
            .parse::<f64>()
            .map_err(|_| CheckError::InvalidValue {
                labels: self.metric.to_string(),
                value: self.value.1.clone(),
            })
    }
}
