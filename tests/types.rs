// ABOUTME: Integration tests for validated domain types.
// ABOUTME: Tests image reference parsing and workload/namespace name rules.

use kubeship::types::*;
use proptest::prelude::*;

mod image_ref_tests {
    use super::*;

    #[test]
    fn parse_registry_name_tag() {
        let img = ImageRef::parse("registry.example.com/team/web:abc123").unwrap();
        assert_eq!(img.registry(), "registry.example.com");
        assert_eq!(img.name(), "team/web");
        assert_eq!(img.tag(), Some("abc123"));
        assert!(img.digest().is_none());
        assert_eq!(img.repository(), "registry.example.com/team/web");
    }

    #[test]
    fn parse_with_digest() {
        let img = ImageRef::parse("ghcr.io/org/app@sha256:abc123def456").unwrap();
        assert_eq!(img.tag(), None);
        assert_eq!(img.digest(), Some("sha256:abc123def456"));
    }

    #[test]
    fn parse_with_tag_and_digest() {
        let img = ImageRef::parse("ghcr.io/org/app:v1@sha256:abc123").unwrap();
        assert_eq!(img.tag(), Some("v1"));
        assert_eq!(img.digest(), Some("sha256:abc123"));
    }

    #[test]
    fn localhost_counts_as_registry() {
        let img = ImageRef::parse("localhost/app:dev").unwrap();
        assert_eq!(img.registry(), "localhost");
    }

    #[test]
    fn display_round_trips() {
        for input in [
            "registry.example.com/team/web:abc123",
            "localhost:5000/app:v1",
            "ghcr.io/org/app:v1@sha256:abc123",
        ] {
            assert_eq!(ImageRef::parse(input).unwrap().to_string(), input);
        }
    }

    #[test]
    fn bare_name_rejected() {
        assert!(matches!(
            ImageRef::parse("nginx:latest"),
            Err(ParseImageRefError::MissingRegistry(_))
        ));
    }

    #[test]
    fn docker_hub_shorthand_rejected() {
        assert!(matches!(
            ImageRef::parse("org/app:latest"),
            Err(ParseImageRefError::MissingRegistry(_))
        ));
    }

    #[test]
    fn missing_tag_rejected() {
        assert!(matches!(
            ImageRef::parse("ghcr.io/org/app"),
            Err(ParseImageRefError::MissingTag(_))
        ));
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(ImageRef::parse("  "), Err(ParseImageRefError::Empty));
    }

    #[test]
    fn whitespace_inside_rejected() {
        assert_eq!(
            ImageRef::parse("ghcr.io/org/my app:v1"),
            Err(ParseImageRefError::InvalidChar(' '))
        );
    }
}

mod name_tests {
    use super::*;

    #[test]
    fn valid_workload_names() {
        for name in ["web", "api-v2", "a", "0-worker"] {
            assert!(WorkloadName::new(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn workload_name_rules() {
        assert_eq!(WorkloadName::new(""), Err(LabelError::Empty));
        assert_eq!(WorkloadName::new("Web"), Err(LabelError::NotLowercase));
        assert_eq!(WorkloadName::new("-web"), Err(LabelError::StartsWithHyphen));
        assert_eq!(WorkloadName::new("web-"), Err(LabelError::EndsWithHyphen));
        assert_eq!(WorkloadName::new("web_app"), Err(LabelError::InvalidChar('_')));
        assert_eq!(WorkloadName::new("web.app"), Err(LabelError::InvalidChar('.')));
    }

    #[test]
    fn length_limit() {
        let max = "a".repeat(MAX_LABEL_LEN);
        assert!(WorkloadName::new(&max).is_ok());
        assert_eq!(
            Namespace::new(&format!("{max}a")),
            Err(LabelError::TooLong)
        );
    }

    #[test]
    fn namespace_defaults_to_default() {
        assert_eq!(Namespace::default().as_str(), "default");
    }
}

proptest! {
    #[test]
    fn valid_labels_accepted(name in "[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?") {
        prop_assert!(WorkloadName::new(&name).is_ok());
        prop_assert!(Namespace::new(&name).is_ok());
    }

    #[test]
    fn accepted_names_round_trip(name in "\\PC{0,80}") {
        if let Ok(workload) = WorkloadName::new(&name) {
            prop_assert_eq!(workload.as_str(), name.as_str());
            prop_assert!(workload.as_str().len() <= MAX_LABEL_LEN);
            prop_assert!(!workload.as_str().starts_with('-'));
        }
    }

    #[test]
    fn tagged_images_parse(
        registry in "[a-z]{1,10}\\.[a-z]{2,4}",
        name in "[a-z][a-z0-9-]{0,20}",
        tag in "[A-Za-z0-9_][A-Za-z0-9_.-]{0,20}",
    ) {
        let input = format!("{registry}/{name}:{tag}");
        let img = ImageRef::parse(&input).unwrap();
        prop_assert_eq!(img.registry(), registry.as_str());
        prop_assert_eq!(img.tag(), Some(tag.as_str()));
    }
}
