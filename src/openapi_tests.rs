#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{schema::Schema, PathItemType, RefOr};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components are generated");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{name} should be an object schema"),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        let components = openapi.components.as_ref().unwrap();
        for name in ["ErrorResponse", "HealthResponse", "Flash", "ProductForm", "EmptyPage", "DashboardView"] {
            assert!(components.schemas.contains_key(name), "missing schema {name}");
        }

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");

        for field in ["error", "code", "success"] {
            assert!(properties.iter().any(|p| p == field), "missing {field}");
        }
    }

    #[test]
    fn test_page_view_schema_structure() {
        let properties = object_properties("DashboardView");

        for field in ["page", "user", "flashes", "data"] {
            assert!(properties.iter().any(|p| p == field), "missing {field}");
        }
    }

    #[test]
    fn test_form_schemas_list_submitted_fields() {
        let product = object_properties("ProductForm");
        for field in ["name", "category", "price", "quantity", "description", "image_url"] {
            assert!(product.iter().any(|p| p == field), "missing {field}");
        }

        let bank = object_properties("BankDetailForm");
        assert_eq!(bank.len(), 3);
    }

    #[test]
    fn test_openapi_paths_cover_every_route() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        let expected = [
            ("/health", vec![PathItemType::Get]),
            ("/", vec![PathItemType::Get]),
            ("/register", vec![PathItemType::Get, PathItemType::Post]),
            ("/login", vec![PathItemType::Get, PathItemType::Post]),
            ("/logout", vec![PathItemType::Get]),
            ("/dashboard", vec![PathItemType::Get]),
            ("/product", vec![PathItemType::Get, PathItemType::Post]),
            ("/bank", vec![PathItemType::Get, PathItemType::Post]),
        ];
        for (path, methods) in expected {
            let item = paths.get(path).unwrap_or_else(|| panic!("missing path {path}"));
            for method in methods {
                assert!(item.operations.contains_key(&method), "{path} lacks an operation");
            }
        }
    }

    #[test]
    fn test_health_endpoint_documents_failure() {
        let openapi = ApiDoc::openapi();

        let health = openapi.paths.paths.get("/health").unwrap();
        let get = health.operations.get(&PathItemType::Get).unwrap();
        assert!(get.responses.responses.contains_key("200"));
        assert!(get.responses.responses.contains_key("500"));
    }
}
