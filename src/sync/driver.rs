use super::reconcile::{diff, known_links};
use super::record::VeilleRecord;
use crate::error::SyncError;
use crate::extract::ConversationLoader;
use crate::grist::{AddedRecords, TableStore};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub table_id: String,
    pub added: AddedRecords,
}

impl fmt::Display for SyncResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.added.first(), self.added.last()) {
            (Some(first), Some(last)) => write!(
                f,
                "{} records have been added to the {} table, from row {} to {}",
                self.added.count(),
                self.table_id,
                first,
                last
            ),
            _ => write!(f, "No record has been added to the {} table", self.table_id),
        }
    }
}

pub struct SyncDriver {
    store: Arc<dyn TableStore>,
    loader: ConversationLoader,
    utc_offset_hours: i32,
}

impl SyncDriver {
    pub fn new(
        store: Arc<dyn TableStore>,
        loader: ConversationLoader,
        utc_offset_hours: i32,
    ) -> Self {
        Self {
            store,
            loader,
            utc_offset_hours,
        }
    }

    /// Everything up to the append: the new records for `table_id`, sorted by date.
    pub async fn plan(
        &self,
        source: &[u8],
        table_id: &str,
    ) -> Result<Vec<VeilleRecord>, SyncError> {
        let candidates = self.loader.load(source)?;
        info!("Export cleaned, {} candidate links", candidates.len());

        let rows = self.store.fetch_table(table_id).await?;
        let known = known_links(&rows);
        info!(
            "Table {} downloaded, {} rows, {} known links",
            table_id,
            rows.len(),
            known.len()
        );

        let mut records: Vec<VeilleRecord> = diff(candidates, &known)
            .into_iter()
            .map(|c| VeilleRecord::from_candidate(c, self.utc_offset_hours))
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date));
        info!("{} new records for table {}", records.len(), table_id);

        Ok(records)
    }

    pub async fn sync(&self, source: &[u8], table_id: &str) -> Result<SyncResult, SyncError> {
        let records = self.plan(source, table_id).await?;

        let added = if records.is_empty() {
            AddedRecords::default()
        } else {
            info!("Exporting {} records to {}", records.len(), table_id);
            self.store.add_records(table_id, &records).await?
        };

        let result = SyncResult {
            table_id: table_id.to_string(),
            added,
        };
        info!("{}", result);
        Ok(result)
    }

    pub async fn sync_file(&self, path: &Path, table_id: &str) -> Result<SyncResult, SyncError> {
        let source = tokio::fs::read(path).await?;
        self.sync(&source, table_id).await
    }
}
