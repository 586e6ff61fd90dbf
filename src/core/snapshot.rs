/// Metrics snapshot decoding
///
/// Defaults are substituted while decoding, so nothing downstream has to deal
/// with a missing heap reading. Only the thread count keeps its absence, which
/// is rendered as the unknown marker.

use serde::Deserialize;

/// Wire shape of `GET /api/metrics`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    heap_used: Option<u64>,
    heap_max: Option<u64>,
    thread_count: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSnapshot")]
pub struct MetricsSnapshot {
    /// Bytes currently used, 0 when not reported
    pub heap_used: u64,
    /// Bytes available, never 0
    pub heap_max: u64,
    pub thread_count: Option<u64>,
}

impl From<RawSnapshot> for MetricsSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        Self {
            heap_used: raw.heap_used.unwrap_or(0),
            heap_max: raw.heap_max.filter(|max| *max > 0).unwrap_or(1),
            thread_count: raw.thread_count,
        }
    }
}

impl MetricsSnapshot {
    /// Decode a response body
    ///
    /// Only a JSON object is a snapshot. Arrays would otherwise fill the
    /// fields by position.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("metrics payload is not a JSON object"));
        }
        serde_json::from_value(value)
    }
}
