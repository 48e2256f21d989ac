use super::*;
use crate::pattern::Pattern;

mod new {
    use super::*;

    #[test]
    fn when_constructed_should_leave_every_field_unset() {
        // Act
        let options = CorsOptions::new();

        // Assert
        assert_eq!(options, CorsOptions::default());
        assert!(options.origins.is_none());
        assert!(options.methods.is_none());
        assert!(options.allow_headers.is_none());
        assert!(options.expose_headers.is_none());
        assert!(options.supports_credentials.is_none());
        assert!(options.max_age.is_none());
        assert!(options.send_wildcard.is_none());
        assert!(options.always_send.is_none());
        assert!(options.vary_header.is_none());
        assert!(options.automatic_options.is_none());
        assert!(options.intercept_exceptions.is_none());
        assert!(options.allow_private_network.is_none());
        assert!(options.invalid_status_code.is_none());
    }
}

mod setters {
    use super::*;
    use std::time::Duration;

    #[test]
    fn when_origins_given_strings_should_store_compiled_patterns() {
        // Act
        let options = CorsOptions::new().origins(["https://example.com", "*"]);

        // Assert
        let origins = options.origins.unwrap();

        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], Pattern::literal("https://example.com"));
        assert_eq!(origins[1], Pattern::Wildcard);
    }

    #[test]
    fn when_origins_given_patterns_should_store_them_unchanged() {
        // Arrange
        let pattern = Pattern::regex(r"https://.*\.example\.com").unwrap();

        // Act
        let options = CorsOptions::new().origins([pattern.clone()]);

        // Assert
        assert_eq!(options.origins, Some(vec![pattern]));
    }

    #[test]
    fn when_methods_given_should_store_them_verbatim() {
        // Act
        let options = CorsOptions::new().methods(["get", "Post"]);

        // Assert
        assert_eq!(
            options.methods,
            Some(vec!["get".to_string(), "Post".to_string()])
        );
    }

    #[test]
    fn when_max_age_given_duration_should_store_whole_seconds() {
        // Act
        let options = CorsOptions::new().max_age(Duration::from_millis(90_500));

        // Assert
        assert_eq!(options.max_age, Some(90));
    }

    #[test]
    fn when_max_age_secs_given_should_store_value() {
        // Act
        let options = CorsOptions::new().max_age_secs(600);

        // Assert
        assert_eq!(options.max_age, Some(600));
    }

    #[test]
    fn when_flags_given_should_store_booleans() {
        // Act
        let options = CorsOptions::new()
            .supports_credentials(true)
            .send_wildcard(true)
            .always_send(false)
            .vary_header(false)
            .automatic_options(false)
            .intercept_exceptions(false)
            .allow_private_network(true);

        // Assert
        assert_eq!(options.supports_credentials, Some(true));
        assert_eq!(options.send_wildcard, Some(true));
        assert_eq!(options.always_send, Some(false));
        assert_eq!(options.vary_header, Some(false));
        assert_eq!(options.automatic_options, Some(false));
        assert_eq!(options.intercept_exceptions, Some(false));
        assert_eq!(options.allow_private_network, Some(true));
    }

    #[test]
    fn when_invalid_status_code_given_should_store_value() {
        // Act
        let options = CorsOptions::new().invalid_status_code(404);

        // Assert
        assert_eq!(options.invalid_status_code, Some(404));
    }
}

mod overlay {
    use super::*;

    #[test]
    fn when_upper_layer_sets_field_should_override_lower_layer() {
        // Arrange
        let base = CorsOptions::new()
            .origins(["https://base.example"])
            .max_age_secs(100);
        let over = CorsOptions::new().origins(["https://over.example"]);

        // Act
        let merged = base.overlay(&over);

        // Assert
        assert_eq!(
            merged.origins,
            Some(vec![Pattern::literal("https://over.example")])
        );
        assert_eq!(merged.max_age, Some(100));
    }

    #[test]
    fn when_upper_layer_leaves_field_unset_should_keep_lower_layer_value() {
        // Arrange
        let base = CorsOptions::new()
            .supports_credentials(true)
            .methods(["GET"]);
        let over = CorsOptions::new().supports_credentials(false);

        // Act
        let merged = base.overlay(&over);

        // Assert
        assert_eq!(merged.supports_credentials, Some(false));
        assert_eq!(merged.methods, Some(vec!["GET".to_string()]));
    }

    #[test]
    fn when_neither_layer_sets_field_should_remain_unset() {
        // Act
        let merged = CorsOptions::new().overlay(&CorsOptions::new());

        // Assert
        assert_eq!(merged, CorsOptions::new());
    }

    #[test]
    fn when_upper_layer_sets_empty_list_should_override_with_empty_list() {
        // Arrange
        let base = CorsOptions::new().expose_headers(["X-My-Header"]);
        let over = CorsOptions::new().expose_headers(Vec::<String>::new());

        // Act
        let merged = base.overlay(&over);

        // Assert
        assert_eq!(merged.expose_headers, Some(Vec::new()));
    }
}
