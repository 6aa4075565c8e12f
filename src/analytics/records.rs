//! Fund-analysis rows backing the analytics table.
//!
//! Read-only sample data; the rows are never mutated, only filtered and
//! paginated for display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Processing state of a fund analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStatus {
    Completed,
    Processing,
    Pending,
    Failed,
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Completed => "COMPLETED",
            Self::Processing => "PROCESSING",
            Self::Pending => "PENDING",
            Self::Failed => "FAILED",
        };
        f.write_str(label)
    }
}

/// Strategy and performance details attached to an analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub strategy: String,
    pub fees: String,
    pub performance: String,
    pub risk_metrics: String,
}

/// One row of the fund-analyses table, tagged with its owning team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundAnalysis {
    pub id: String,
    pub team_id: String,
    pub isin: String,
    pub fund_name: String,
    pub analysis_date: NaiveDate,
    pub status: AnalysisStatus,
    pub created_by: String,
    pub metadata: AnalysisMetadata,
}

#[allow(clippy::too_many_arguments)]
fn row(
    id: &str,
    team_id: &str,
    isin: &str,
    fund_name: &str,
    date: (i32, u32, u32),
    status: AnalysisStatus,
    created_by: &str,
    strategy: &str,
    fees: &str,
    performance: &str,
    risk_metrics: &str,
) -> FundAnalysis {
    FundAnalysis {
        id: id.to_string(),
        team_id: team_id.to_string(),
        isin: isin.to_string(),
        fund_name: fund_name.to_string(),
        analysis_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .expect("sample dates are valid"),
        status,
        created_by: created_by.to_string(),
        metadata: AnalysisMetadata {
            strategy: strategy.to_string(),
            fees: fees.to_string(),
            performance: performance.to_string(),
            risk_metrics: risk_metrics.to_string(),
        },
    }
}

/// The sample fund analyses shipped with the dashboard, spread across the
/// default team roster.
pub fn sample_analyses() -> Vec<FundAnalysis> {
    vec![
        row(
            "1",
            "1",
            "IE00B4L5Y983",
            "iShares Core MSCI World UCITS ETF",
            (2024, 1, 15),
            AnalysisStatus::Completed,
            "John Doe",
            "Global Equity",
            "0.20%",
            "12.5%",
            "Medium",
        ),
        row(
            "2",
            "1",
            "IE00B3RBWM25",
            "Vanguard FTSE All-World UCITS ETF",
            (2024, 1, 14),
            AnalysisStatus::Processing,
            "Jane Smith",
            "Global Equity",
            "0.22%",
            "11.8%",
            "Medium",
        ),
        row(
            "3",
            "2",
            "IE00B1XNHC34",
            "iShares Core S&P 500 UCITS ETF",
            (2024, 1, 13),
            AnalysisStatus::Completed,
            "Mike Johnson",
            "US Large Cap",
            "0.07%",
            "15.2%",
            "Medium-High",
        ),
        row(
            "4",
            "3",
            "IE00B52VJ196",
            "iShares Core FTSE 100 UCITS ETF",
            (2024, 1, 12),
            AnalysisStatus::Failed,
            "Sarah Wilson",
            "UK Large Cap",
            "0.07%",
            "8.9%",
            "Medium",
        ),
        row(
            "5",
            "2",
            "IE00B6R52259",
            "iShares MSCI Emerging Markets UCITS ETF",
            (2024, 1, 11),
            AnalysisStatus::Pending,
            "David Brown",
            "Emerging Markets",
            "0.18%",
            "9.3%",
            "High",
        ),
    ]
}
