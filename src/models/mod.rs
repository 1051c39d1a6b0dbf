pub mod record;
pub mod session;
pub mod snapshot;

pub use record::{LogRecord, Role, UsageEvent};
pub use session::SessionStat;
pub use snapshot::{DayAggregate, ModelAggregate, OriginSplit, Snapshot};
