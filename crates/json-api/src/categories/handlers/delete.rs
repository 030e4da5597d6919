//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Delete Category Handler
///
/// Products filed under the category keep their reference.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "categories.delete",
    skip(name, depot),
    fields(category_name = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let name = name.into_inner();

    tracing::Span::current().record("category_name", tracing::field::display(&name));

    state
        .catalog
        .delete_category(&name)
        .await
        .map_err(into_status_error)?;

    tracing::info!(category_name = %name, "deleted category");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::catalog::{CatalogServiceError, MockCatalogService};

    use crate::test_helpers::catalog_service;

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(catalog, Router::with_path("categories/{name}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_category_returns_200() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_delete_category()
            .once()
            .withf(|name| name == "Tools")
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/categories/Tools")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_category_returns_404() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_delete_category()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let res = TestClient::delete("http://example.com/categories/Nope")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
