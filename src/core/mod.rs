pub mod snapshot;
pub mod page;
pub mod targets;
pub mod source;
pub mod poller;

pub use snapshot::MetricsSnapshot;
pub use page::{ElementHandle, Page};
pub use targets::{BindError, DisplayTargets, TargetName, UnknownTarget};
pub use source::{HttpMetricsSource, MetricsSource, Unavailable};
pub use poller::{MetricsPoller, PollOutcome};
