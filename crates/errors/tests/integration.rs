//! Integration tests for error types

#[cfg(test)]
mod tests {
    use kiln_errors::*;

    #[test]
    fn test_error_conversion() {
        let resolve_err = ResolveError::PackageNotFound {
            name: "jsonlib".into(),
            version: "99.99.99".into(),
        };
        let err: Error = resolve_err.into();
        assert!(matches!(err, Error::Resolve(_)));
    }

    #[test]
    fn test_error_display() {
        let err = BuildError::NotConfigured {
            phase: "Declared".into(),
        };
        assert_eq!(
            err.to_string(),
            "build hook invoked in phase Declared, dependency resolution has not completed"
        );
    }

    #[test]
    fn test_error_clone() {
        let err = RecipeError::UnknownGenerator {
            name: "ninja_deps".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_user_facing_hint() {
        let err: Error = ResolveError::PackageNotFound {
            name: "jsonlib".into(),
            version: "99.99.99".into(),
        }
        .into();
        assert!(err.user_hint().is_some());
    }
}
