use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl AnalysisStatus {
    /// Statuses from which a new analysis attempt may be started.
    pub const STARTABLE: [AnalysisStatus; 3] = [
        AnalysisStatus::Pending,
        AnalysisStatus::Failed,
        AnalysisStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Processing => "processing",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
        }
    }

    pub fn can_start_analysis(&self) -> bool {
        Self::STARTABLE.contains(self)
    }

    pub fn can_transition_to(&self, next: AnalysisStatus) -> bool {
        match (self, next) {
            (_, AnalysisStatus::Processing) => self.can_start_analysis(),
            (AnalysisStatus::Processing, AnalysisStatus::Completed) => true,
            (AnalysisStatus::Processing, AnalysisStatus::Failed) => true,
            _ => false,
        }
    }
}

impl FromStr for AnalysisStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AnalysisStatus::Pending),
            "processing" => Ok(AnalysisStatus::Processing),
            "completed" => Ok(AnalysisStatus::Completed),
            "failed" => Ok(AnalysisStatus::Failed),
            _ => Err(format!("Invalid analysis status: {}", s)),
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
