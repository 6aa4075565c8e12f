pub mod filter;
pub mod pagination;
pub mod records;

pub use filter::{filter_by_team, TeamScoped};
pub use pagination::{clamp_page, paginate, total_pages};
pub use records::{sample_analyses, AnalysisMetadata, AnalysisStatus, FundAnalysis};
