//! Record endpoints: fetch, paginate, create, update, delete

use super::{
    decode, read_result, take_field, write_result, KintoneClient, RECORDS_PATH, RECORD_PATH,
};
use crate::error::Result;
use crate::http::RequestConfig;
use crate::pagination::{
    offset_query, CursorPaginator, NextPage, OffsetPaginator, PaginationState, Paginator,
    RecordLimit,
};
use crate::types::{
    AppId, CreatedRecords, JsonValue, Record, RecordPage, RecordRevision, RecordSet, RecordUpdate,
    UpdateTarget, RECORD_ID_FIELD,
};
use serde_json::{json, Map};
use tracing::debug;

/// Parameters of a paginated record fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    /// Query condition (Kintone query syntax, without limit/offset)
    pub condition: String,
    /// Field codes to return; empty returns every field
    pub fields: Vec<String>,
    /// How many records to fetch (offset strategy only)
    pub limit: RecordLimit,
    /// Whether the result should carry the server-reported total
    pub total_count: bool,
}

impl RecordQuery {
    /// Create a query for every record matching `condition`
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            ..Default::default()
        }
    }

    /// Restrict returned fields
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set how many records to fetch
    #[must_use]
    pub fn limit(mut self, limit: RecordLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Include the total count in the result
    #[must_use]
    pub fn total_count(mut self, include: bool) -> Self {
        self.total_count = include;
        self
    }
}

impl KintoneClient {
    /// Fetch one record by id
    pub async fn get_record(&self, id: u64) -> Result<Record> {
        let app = self.app_id()?;
        let config = RequestConfig::new()
            .query("app", app.to_string())
            .query("id", id.to_string());
        let response = self.http.get_with_config(RECORD_PATH, config).await?;
        decode(take_field(read_result(response).await?, "record")?)
    }

    /// Fetch a single page with a full query string (limit/offset included)
    pub async fn get_page(&self, query: &str, fields: &[String], total_count: bool) -> Result<RecordPage> {
        let app = self.app_id()?;
        self.fetch_page(app, query, fields, total_count).await
    }

    /// Fetch records with offset pagination
    ///
    /// Pages of up to 500 records are requested until `query.limit` records
    /// or the reported total have been collected.
    pub async fn get_records(&self, query: &RecordQuery) -> Result<RecordSet> {
        let app = self.app_id()?;
        if query.limit.is_zero() {
            // `limit 0` still reports the total, so only ask when it is wanted
            let total_count = if query.total_count {
                let count_query = offset_query(&query.condition, 0, 0);
                self.fetch_page(app, &count_query, &query.fields, true)
                    .await?
                    .total_count
            } else {
                None
            };
            return Ok(RecordSet {
                records: Vec::new(),
                total_count,
            });
        }

        let paginator = OffsetPaginator::new(query.condition.clone(), query.limit);
        let (records, total) = self.paginate(app, &paginator, &query.fields).await?;
        Ok(RecordSet {
            records,
            total_count: if query.total_count { total } else { None },
        })
    }

    /// Fetch every matching record with cursor pagination over `$id`
    ///
    /// `query.condition` must not contain `order by` or `limit`; `query.limit`
    /// is ignored. `$id` is added to the field list when one is given.
    pub async fn get_all_records_by_id(&self, query: &RecordQuery) -> Result<RecordSet> {
        let app = self.app_id()?;
        let mut fields = query.fields.clone();
        if !fields.is_empty() && !fields.iter().any(|f| f == RECORD_ID_FIELD) {
            fields.push(RECORD_ID_FIELD.to_string());
        }

        let paginator = CursorPaginator::new(query.condition.clone());
        let (records, total) = self.paginate(app, &paginator, &fields).await?;
        Ok(RecordSet {
            records,
            total_count: if query.total_count { total } else { None },
        })
    }

    /// Drive a paginator to completion, returning records and the first total
    pub async fn paginate<P: Paginator>(
        &self,
        app: AppId,
        paginator: &P,
        fields: &[String],
    ) -> Result<(Vec<Record>, Option<u64>)> {
        let mut state = PaginationState::new();
        let mut query = paginator.initial_query(&state);
        let mut records = Vec::new();

        loop {
            let page = self.fetch_page(app, &query, fields, true).await?;
            let next = paginator.process_page(&page, &mut state);
            records.extend(page.records);

            match next {
                NextPage::Continue { query: next_query } => query = next_query,
                NextPage::Done => break,
            }
        }

        debug!(
            "Fetched {} records in {} pages (total {:?})",
            records.len(),
            state.page,
            state.total_count
        );
        Ok((records, state.total_count))
    }

    async fn fetch_page(
        &self,
        app: AppId,
        query: &str,
        fields: &[String],
        total_count: bool,
    ) -> Result<RecordPage> {
        let mut config = RequestConfig::new()
            .query("app", app.to_string())
            .query("query", query);
        for (i, field) in fields.iter().enumerate() {
            config = config.query(format!("fields[{i}]"), field.as_str());
        }
        if total_count {
            config = config.query("totalCount", "true");
        }

        debug!("Fetching records: {}", query);
        let response = self.http.get_with_config(RECORDS_PATH, config).await?;
        decode(read_result(response).await?)
    }

    /// Create one record
    pub async fn add_record(&self, record: &Record) -> Result<RecordRevision> {
        let app = self.app_id()?;
        let body = json!({ "app": app, "record": record });
        let response = self.http.post(RECORD_PATH, body).await?;
        decode(write_result(response).await?)
    }

    /// Create several records in one request
    pub async fn add_records(&self, records: &[Record]) -> Result<CreatedRecords> {
        let app = self.app_id()?;
        let body = json!({ "app": app, "records": records });
        let response = self.http.post(RECORDS_PATH, body).await?;
        decode(write_result(response).await?)
    }

    /// Replace fields of one record, returning its new revision
    pub async fn update_record(
        &self,
        target: &UpdateTarget,
        record: &Record,
        revision: Option<u64>,
    ) -> Result<String> {
        let app = self.app_id()?;
        let mut body = update_entry(target, record, revision);
        body.insert("app".to_string(), json!(app));

        let response = self.http.put(RECORD_PATH, JsonValue::Object(body)).await?;
        decode(take_field(write_result(response).await?, "revision")?)
    }

    /// Replace fields of several records in one request
    pub async fn update_records(&self, updates: &[RecordUpdate]) -> Result<Vec<RecordRevision>> {
        let app = self.app_id()?;
        let entries: Vec<JsonValue> = updates
            .iter()
            .map(|u| JsonValue::Object(update_entry(&u.target, &u.record, u.revision)))
            .collect();
        let body = json!({ "app": app, "records": entries });

        let response = self.http.put(RECORDS_PATH, body).await?;
        decode(take_field(write_result(response).await?, "records")?)
    }

    /// Delete records by id, optionally checking each one's revision
    pub async fn delete_records(&self, ids: &[u64], revisions: Option<&[u64]>) -> Result<()> {
        let app = self.app_id()?;
        let mut body = json!({ "app": app, "ids": ids });
        if let Some(revisions) = revisions {
            body["revisions"] = json!(revisions);
        }

        let response = self.http.delete(RECORDS_PATH, body).await?;
        write_result(response).await?;
        Ok(())
    }
}

/// `{id|updateKey, record, revision?}` object shared by single and bulk updates
fn update_entry(target: &UpdateTarget, record: &Record, revision: Option<u64>) -> Map<String, JsonValue> {
    let mut entry = Map::new();
    match target {
        UpdateTarget::Id(id) => {
            entry.insert("id".to_string(), json!(id));
        }
        UpdateTarget::Key(key) => {
            entry.insert("updateKey".to_string(), json!(key));
        }
    }
    entry.insert("record".to_string(), json!(record));
    if let Some(revision) = revision {
        entry.insert("revision".to_string(), json!(revision));
    }
    entry
}
