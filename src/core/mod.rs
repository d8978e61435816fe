/// Inventory valuation, low-stock classification and CSV export
pub mod inventory;

/// EMI computation and loan portfolio figures
pub mod loan;

/// Prediction request payload and response schema
pub mod predictions;

/// Print job cost model
pub mod printing;

/// Per-section report figures and currency formatting
pub mod report;

/// Dashboard summary aggregation
pub mod summary;

pub use summary::{DashboardSummary, aggregate};
