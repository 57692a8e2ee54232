//! Parsing of the cluster status report
//!
//! The service reports one OSD per line as `osdId|STATUS|host:port`.
//! The facade hands back the raw text; this module is an opt-in reader for it.

use serde::{Deserialize, Serialize};

/// Health of a storage node as seen by the directory service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OsdStatus {
    Up,
    Suspected,
    Down,
    Unknown,
}

impl std::fmt::Display for OsdStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsdStatus::Up => write!(f, "UP"),
            OsdStatus::Suspected => write!(f, "SUSPECTED"),
            OsdStatus::Down => write!(f, "DOWN"),
            OsdStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl std::str::FromStr for OsdStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UP" => Ok(OsdStatus::Up),
            "SUSPECTED" => Ok(OsdStatus::Suspected),
            "DOWN" => Ok(OsdStatus::Down),
            "UNKNOWN" => Ok(OsdStatus::Unknown),
            _ => Err(format!("Invalid OSD status: {s}")),
        }
    }
}

/// One storage node line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsdEntry {
    pub id: String,
    pub status: OsdStatus,
    /// `host:port` the node listens on
    pub address: String,
}

/// Structured view of a cluster status report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterReport {
    pub osds: Vec<OsdEntry>,
    /// Non-empty lines that did not match the OSD line format
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unparsed: Vec<String>,
}

impl ClusterReport {
    pub fn parse(text: &str) -> Self {
        let mut report = ClusterReport::default();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match parse_line(line) {
                Some(entry) => report.osds.push(entry),
                None => report.unparsed.push(line.to_string()),
            }
        }

        report
    }

    pub fn count(&self, status: OsdStatus) -> usize {
        self.osds.iter().filter(|o| o.status == status).count()
    }

    /// True when at least one OSD is known and every OSD is up
    pub fn is_healthy(&self) -> bool {
        !self.osds.is_empty() && self.osds.iter().all(|o| o.status == OsdStatus::Up)
    }
}

fn parse_line(line: &str) -> Option<OsdEntry> {
    let mut fields = line.splitn(3, '|');
    let id = fields.next()?.trim();
    let status = fields.next()?.parse().ok()?;
    let address = fields.next()?.trim();

    if id.is_empty() {
        return None;
    }

    Some(OsdEntry {
        id: id.to_string(),
        status,
        address: address.to_string(),
    })
}
