//! Integration tests for path probing

#[cfg(test)]
mod tests {
    use modlink_platform::*;
    use proptest::prelude::*;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_host_and_memory_agree() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("ThirdParty/NDI/Includes")).unwrap();

        let host = HostFileSystem::new();
        let memory = MemoryFileSystem::new().with_dir(root.join("ThirdParty/NDI/Includes"));

        for segments in [
            &["ThirdParty", "NDI", "Includes"][..],
            &["ThirdParty", "NDI", "Libraries", "Win64"][..],
            &["Public"][..],
        ] {
            let a = PathProber::new(&host).probe_dir(root, segments);
            let b = PathProber::new(&memory).probe_dir(root, segments);
            assert_eq!(a, b, "disagreement for {segments:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_nothing_exists_in_empty_tree(segments in prop::collection::vec("[A-Za-z]{1,8}", 1..5)) {
            let fs = MemoryFileSystem::new();
            let prober = PathProber::new(&fs);
            let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
            prop_assert!(!prober.exists(Path::new("/root"), &refs));
        }

        #[test]
        fn prop_registered_dir_and_ancestors_exist(segments in prop::collection::vec("[A-Za-z]{1,8}", 1..5)) {
            let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
            let target = PathProber::join(Path::new("/root"), &refs);
            let fs = MemoryFileSystem::new().with_dir(&target);
            let prober = PathProber::new(&fs);
            for n in 0..=refs.len() {
                prop_assert!(prober.probe_dir(Path::new("/root"), &refs[..n]).exists);
            }
        }
    }
}
