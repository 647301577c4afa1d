pub mod context;
pub mod error;
pub mod shell;
pub mod widget;

pub use context::{BlockMetrics, RenderContext, StatusData, TokenMetrics, UsageStatus};
pub use error::{Result, StatlineError};
pub use shell::{NoShell, ScriptedShell, ShellQuery, ShellRequest};
pub use widget::{DisplayStyle, WidgetCategory};
