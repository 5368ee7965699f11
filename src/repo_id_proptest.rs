//! Property-based tests for local name derivation.
//!
//! These tests use proptest to generate random identifiers and verify that
//! the derived directory name is always safe to join onto the sync root.

#[cfg(test)]
mod proptest_tests {
    use crate::repo_id::{derive_local_name, RepoId};
    use proptest::prelude::*;

    proptest! {
        /// Property: a derived name never escapes the root directory
        #[test]
        fn local_name_is_a_single_component(input in ".*") {
            if let Some(name) = derive_local_name(&input) {
                prop_assert!(!name.is_empty());
                prop_assert!(!name.contains('/'));
                prop_assert!(!name.contains('\\'));
                prop_assert!(!name.contains(':'));
                prop_assert_ne!(name, ".");
                prop_assert_ne!(name, "..");
            }
        }

        /// Property: host and owner never influence the name
        #[test]
        fn local_name_comes_from_last_segment(
            host in "[a-z]{1,12}\\.[a-z]{2,3}",
            owner in "[a-zA-Z0-9_-]{1,12}",
            repo in "[a-zA-Z0-9_-]{1,16}",
        ) {
            let https = format!("https://{}/{}/{}.git", host, owner, repo);
            let scp = format!("git@{}:{}/{}.git", host, owner, repo);
            prop_assert_eq!(derive_local_name(&https), Some(repo.as_str()));
            prop_assert_eq!(derive_local_name(&scp), Some(repo.as_str()));
        }

        /// Property: the .git suffix and trailing slashes do not change the name
        #[test]
        fn suffix_and_trailing_slash_are_ignored(repo in "[a-zA-Z0-9_-]{1,16}") {
            let plain = format!("https://example.com/org/{}", repo);
            let with_suffix = format!("{}.git", plain);
            let with_slash = format!("{}/", with_suffix);
            prop_assert_eq!(derive_local_name(&plain), derive_local_name(&with_suffix));
            prop_assert_eq!(derive_local_name(&plain), derive_local_name(&with_slash));
        }

        /// Property: parsing agrees with derivation
        #[test]
        fn parse_matches_derivation(input in "\\PC*") {
            match RepoId::parse(&input) {
                Ok(id) => prop_assert_eq!(Some(id.local_name()), derive_local_name(&input)),
                Err(_) => prop_assert_eq!(derive_local_name(&input), None),
            }
        }
    }
}
