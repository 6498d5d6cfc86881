pub mod app_state;
pub mod async_ops;
pub mod optimizer;
pub mod selection;

pub use app_state::{AppState, NotificationLevel, PendingConfirm};
pub use async_ops::{AsyncOperation, AsyncOperationResult, OperationType, Surface};
pub use optimizer::OptimizerPanel;
