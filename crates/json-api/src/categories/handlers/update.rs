//! Rename Category Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    categories::{
        errors::into_status_error,
        models::{CategoryRequest, CategoryResponse},
    },
    extensions::*,
    state::State,
};

/// Rename Category Handler
#[endpoint(
    tags("categories"),
    summary = "Rename Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category renamed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or duplicate name"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "categories.update",
    skip(name, json, depot),
    fields(category_name = tracing::field::Empty, new_name = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let name = name.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("category_name", tracing::field::display(&name));
    span.record("new_name", tracing::field::display(&request.name));

    let category = state
        .catalog
        .rename_category(&name, &request.name)
        .await
        .map_err(into_status_error)?;

    tracing::info!(category_uuid = %category.uuid, "renamed category");

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::catalog::{CatalogServiceError, MockCatalogService};

    use crate::test_helpers::{catalog_service, make_category};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(catalog, Router::with_path("categories/{name}").put(handler))
    }

    #[tokio::test]
    async fn test_rename_category() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_rename_category()
            .once()
            .withf(|name, new_name| name == "Tools" && new_name == "Hardware")
            .return_once(|_, new_name| Ok(make_category(new_name)));

        let mut res = TestClient::put("http://example.com/categories/Tools")
            .json(&json!({ "name": "Hardware" }))
            .send(&make_service(catalog))
            .await;

        let body: CategoryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.name, "Hardware");

        Ok(())
    }

    #[tokio::test]
    async fn test_rename_missing_category_returns_404() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_rename_category()
            .once()
            .return_once(|_, _| Err(CatalogServiceError::NotFound));

        let res = TestClient::put("http://example.com/categories/Nope")
            .json(&json!({ "name": "Hardware" }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
