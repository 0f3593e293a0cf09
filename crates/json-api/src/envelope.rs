//! Response Envelopes
//!
//! Every successful response is wrapped as `{"status": "success", "data": ...}`.
//! Listings also carry the page size and pagination metadata. Failures are
//! rendered as `{"status": "error", "message": ...}` by [`error_envelope`].

use salvo::{http::ResBody, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use storefront::listing::{ListingQuery, Pagination};
use storefront_app::listing::Page;

use crate::extensions::*;

const SUCCESS: &str = "success";
const ERROR: &str = "error";

/// Success Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Envelope<T: ToSchema + 'static> {
    /// Always `success`
    pub status: String,

    /// Response payload
    pub data: T,
}

impl<T: ToSchema + 'static> Envelope<T> {
    pub(crate) fn success(data: T) -> Json<Self> {
        Json(Self {
            status: SUCCESS.to_string(),
            data,
        })
    }
}

/// Pagination Metadata
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct PaginationResponse {
    /// The requested page
    pub current_page: u64,

    /// Page size
    pub limit: u64,

    /// Total number of pages, at least 1
    pub number_of_pages: u64,

    /// The next page, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,

    /// The previous page, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<u64>,
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        Self {
            current_page: pagination.current_page,
            limit: pagination.limit,
            number_of_pages: pagination.number_of_pages,
            next: pagination.next,
            prev: pagination.prev,
        }
    }
}

/// Listing Envelope
///
/// Documents in `data` are projected according to the `fields` parameter.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ListingEnvelope {
    /// Always `success`
    pub status: String,

    /// Number of documents on this page
    pub results: usize,

    /// Pagination metadata
    pub pagination: PaginationResponse,

    /// Projected documents
    pub data: Vec<serde_json::Value>,
}

impl ListingEnvelope {
    /// Render a page of responses, applying the listing's projection.
    pub(crate) fn from_page<T: Serialize>(
        page: Page<T>,
        listing: &ListingQuery,
    ) -> Result<Json<Self>, StatusError> {
        let pagination = listing.page.paginate(page.total).into();

        let data = page
            .items
            .iter()
            .map(|item| serde_json::to_value(item).map(|value| listing.projection.apply(value)))
            .collect::<Result<Vec<_>, _>>()
            .or_500("failed to serialize listing")?;

        Ok(Json(Self {
            status: SUCCESS.to_string(),
            results: data.len(),
            pagination,
            data,
        }))
    }
}

/// Error Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorEnvelope {
    /// Always `error`
    pub status: String,

    /// Human-readable reason
    pub message: String,
}

/// Catcher hoop rewriting error responses into an [`ErrorEnvelope`].
#[handler]
pub(crate) async fn error_envelope(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(code) = res.status_code else {
        return;
    };

    if !code.is_client_error() && !code.is_server_error() {
        return;
    }

    let message = match &res.body {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief.clone(),
        _ => code.canonical_reason().unwrap_or(ERROR).to_string(),
    };

    res.render(Json(ErrorEnvelope {
        status: ERROR.to_string(),
        message,
    }));

    ctrl.skip_rest();
}
