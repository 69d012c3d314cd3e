//! Form layout and field definition endpoints

use super::{decode, read_result, take_field, KintoneClient, FIELDS_PATH, FORM_PATH};
use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::{FieldProperty, JsonValue};
use std::collections::BTreeMap;

impl KintoneClient {
    /// Fetch the form layout (`form.json`) as a list of field properties
    pub async fn form_layout(&self) -> Result<Vec<FieldProperty>> {
        decode(self.properties(FORM_PATH).await?)
    }

    /// Fetch field definitions keyed by field code
    pub async fn form_fields(&self) -> Result<BTreeMap<String, FieldProperty>> {
        decode(self.properties(FIELDS_PATH).await?)
    }

    /// Raw `properties` object of a metadata endpoint
    pub async fn properties(&self, path: &str) -> Result<JsonValue> {
        let app = self.app_id()?;
        let response = self
            .http
            .get_with_config(path, RequestConfig::new().query("app", app.to_string()))
            .await?;
        take_field(read_result(response).await?, "properties")
    }
}
