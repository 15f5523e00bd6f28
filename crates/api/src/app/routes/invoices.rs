use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_invoice).get(query_invoices))
        .route("/:public_id", get(get_invoice))
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateInvoiceBody>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text());
        }
    };
    let request = match body.into_request() {
        Ok(r) => r,
        Err(e) => return errors::service_error_to_response(e.into()),
    };

    match services.create(request).await {
        Ok(invoice) => (StatusCode::CREATED, Json(dto::invoice_to_json(&invoice))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(public_id): Path<String>,
) -> axum::response::Response {
    match services.get_by_public_id(&public_id).await {
        Ok(invoice) => (StatusCode::OK, Json(dto::invoice_to_json(&invoice))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `invoiceId` selects one invoice by reference id, `customerName` a page of
/// that customer's invoices; otherwise the filtered listing is returned.
pub async fn query_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::InvoiceQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_query", rejection.body_text());
        }
    };
    let filters = query.filters();

    if let Some(reference_id) = query.reference_id() {
        if let Err(e) = filters.validate() {
            return errors::service_error_to_response(e.into());
        }
        return match services.get_by_reference_id(reference_id).await {
            Ok(invoice) => (StatusCode::OK, Json(dto::invoice_to_json(&invoice))).into_response(),
            Err(e) => errors::service_error_to_response(e),
        };
    }

    let page = match query.customer_name() {
        Some(name) => {
            services
                .get_by_customer_name(name, &filters, query.pagination())
                .await
        }
        None => services.get_with_filters(&filters, query.pagination()).await,
    };

    match page {
        Ok(page) => (StatusCode::OK, Json(dto::invoice_page_to_json(&page))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
