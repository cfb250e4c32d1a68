//! Integration tests for types

#[cfg(test)]
mod tests {
    use modlink_types::*;
    use proptest::prelude::*;

    #[test]
    fn test_platform_serialization() {
        let json = serde_json::to_string(&TargetPlatform::Win64).unwrap();
        assert_eq!(json, r#""win64""#);

        let other: TargetPlatform = serde_json::from_str(r#""Mac""#).unwrap();
        assert_eq!(other, TargetPlatform::Other("mac".to_string()));

        assert!(serde_json::from_str::<TargetPlatform>(r#""""#).is_err());
    }

    #[test]
    fn test_pch_usage_default() {
        assert_eq!(PchUsage::default(), PchUsage::UseExplicitOrSharedPchs);
        let json = serde_json::to_string(&PchUsage::NoPchs).unwrap();
        assert_eq!(json, r#""no_pchs""#);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Tty);
    }

    proptest! {
        #[test]
        fn prop_non_win64_names_stay_other(name in "[a-z][a-z0-9]{0,12}") {
            prop_assume!(name != "win64");
            let platform: TargetPlatform = name.parse().unwrap();
            prop_assert!(!platform.is_win64());
            prop_assert_eq!(platform.as_str(), name.as_str());
        }

        #[test]
        fn prop_snapshot_lookup_matches_input(key in "[A-Z_]{1,16}", value in ".{0,24}") {
            let env: EnvironmentSnapshot = [(key.clone(), value.clone())].into_iter().collect();
            let expected = if value.is_empty() { None } else { Some(value.as_str()) };
            prop_assert_eq!(env.get(&key), expected);
        }
    }
}
