mod client;
mod types;

pub use client::GristClient;
pub use types::{AddedRecords, LINK_COLUMN, TableRow, TableStore};
