mod driver;
mod reconcile;
mod record;

pub use driver::{DEFAULT_UTC_OFFSET_HOURS, SyncDriver, SyncResult};
pub use reconcile::{diff, known_links};
pub use record::VeilleRecord;
