use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use scholaris_core::filter::{SortOrder, parse_filters};
use scholaris_core::page::{ListQuery, MAX_PAGE_SIZE};
use scholaris_core::serde::{
    deserialize_optional_i64, deserialize_optional_string, deserialize_sort_order,
};
use scholaris_core::AppError;

/// Query parameters accepted by the list endpoint.
///
/// Everything is optional; empty values count as absent. `filters` carries a
/// JSON array of filter criteria as a string.
#[derive(Debug, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    /// JSON array of filter criteria, e.g.
    /// `[{"PropertyName":"Status","Operator":"Equal","Value":"Active"}]`
    #[serde(deserialize_with = "deserialize_optional_string")]
    pub filters: Option<String>,
    /// Case-insensitive substring match across the whole record
    #[serde(deserialize_with = "deserialize_optional_string")]
    pub search_term: Option<String>,
    /// 1-indexed page to return (default 1)
    #[serde(deserialize_with = "deserialize_optional_i64")]
    pub page_number: Option<i64>,
    /// Records per page (default 10, capped at 100)
    #[serde(deserialize_with = "deserialize_optional_i64")]
    pub page_size: Option<i64>,
    /// Top-level property to sort by; without it records come back
    /// newest-first
    #[serde(deserialize_with = "deserialize_optional_string")]
    pub sort_field: Option<String>,
    /// `asc` or `desc` (default `asc`)
    #[serde(deserialize_with = "deserialize_sort_order")]
    pub sort_order: SortOrder,
}

impl ListParams {
    /// Validates the raw parameters and produces the store query.
    ///
    /// Validation order is fixed: page size, then page number, then filter
    /// JSON. The page size cap applies after validation, silently.
    pub fn into_query(self) -> Result<ListQuery, AppError> {
        let page_size = self.page_size.unwrap_or(10);
        if page_size < 1 {
            return Err(AppError::bad_request(anyhow!("Page size invalid.")));
        }

        let page_number = self.page_number.unwrap_or(1);
        if page_number < 1 {
            return Err(AppError::bad_request(anyhow!("Page number invalid.")));
        }

        let criteria = match self.filters.as_deref() {
            Some(raw) => parse_filters(raw)?,
            None => Vec::new(),
        };

        Ok(ListQuery {
            criteria,
            search_term: self.search_term,
            page_number,
            page_size: page_size.min(MAX_PAGE_SIZE),
            sort_field: self.sort_field,
            sort_order: self.sort_order,
        })
    }
}

/// Response returned by the create endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: Uuid,
}

/// Uniform acknowledgement returned by replace, patch, and delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: bool,
}

/// One entry in the discovery endpoint's catalog listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct EntityDescriptor {
    /// Display name, e.g. `AcademicYear`
    pub name: String,
    /// Route segment, e.g. `academicyear`
    pub segment: String,
}
