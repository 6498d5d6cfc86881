pub mod backup;
pub mod binder;
pub mod optimizer;
pub mod profile;
pub mod settings;
pub mod time;

pub use backup::Backup;
pub use binder::{BinderSettings, Category};
pub use optimizer::{HistoryEntry, MetricsDisplay, PerformanceSnapshot, Recommendation, RecommendationSet};
pub use profile::Profile;
pub use settings::{RuntimeSettings, Settings};
