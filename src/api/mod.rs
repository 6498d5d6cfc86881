pub mod category_client;
pub mod client;
pub mod envelope;
pub mod error;
pub mod optimizer_client;
pub mod settings_client;
pub mod traits;

pub use category_client::CategoryClient;
pub use client::ApiResult;
pub use error::ApiError;
pub use optimizer_client::OptimizerClient;
pub use settings_client::SettingsClient;
pub use traits::{CategoryApi, OptimizerApi, SettingsApi};
