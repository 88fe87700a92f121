use crate::error::SyncError;
use crate::sync::VeilleRecord;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

pub const LINK_COLUMN: &str = "Lien_article";

#[derive(Debug, Clone, Deserialize)]
pub struct TableRow {
    pub id: u64,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl TableRow {
    pub fn link(&self) -> Option<&str> {
        self.fields.get(LINK_COLUMN).and_then(Value::as_str)
    }
}

/// Row ids assigned by the table to a batch of appended records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddedRecords {
    pub ids: Vec<u64>,
}

impl AddedRecords {
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn first(&self) -> Option<u64> {
        self.ids.first().copied()
    }

    pub fn last(&self) -> Option<u64> {
        self.ids.last().copied()
    }
}

#[async_trait]
pub trait TableStore: Send + Sync {
    async fn fetch_table(&self, table_id: &str) -> Result<Vec<TableRow>, SyncError>;
    async fn add_records(
        &self,
        table_id: &str,
        records: &[VeilleRecord],
    ) -> Result<AddedRecords, SyncError>;
}
