use crate::model::NodeId;

/// The external-id ↔ internal-id mapping contract (spec.md §6), consumed
/// by the outer request layer and never implemented by this crate: id
/// translation, like binary-artifact decoding, lives in an external
/// collaborator. Internal ids are assumed dense over `[0, size())`.
pub trait ExternalIdMap {
    fn to_internal(&self, external: &str) -> Option<NodeId>;
    fn to_external(&self, internal: NodeId) -> Option<String>;
    fn contains_external(&self, external: &str) -> bool;
    fn contains_internal(&self, internal: NodeId) -> bool;
    fn size(&self) -> usize;
}

#[cfg(test)]
pub mod test_double {
    use super::*;
    use std::collections::HashMap;

    /// A trivial in-memory implementation of [`ExternalIdMap`], used only
    /// to exercise the request layer in tests.
    #[derive(Debug, Default)]
    pub struct InMemoryIdMap {
        to_internal: HashMap<String, NodeId>,
        to_external: HashMap<u32, String>,
    }

    impl InMemoryIdMap {
        pub fn from_pairs(pairs: impl IntoIterator<Item = (String, u32)>) -> Self {
            let mut map = InMemoryIdMap::default();
            for (external, internal) in pairs {
                map.to_external.insert(internal, external.clone());
                map.to_internal.insert(external, NodeId(internal));
            }
            map
        }
    }

    impl ExternalIdMap for InMemoryIdMap {
        fn to_internal(&self, external: &str) -> Option<NodeId> {
            self.to_internal.get(external).copied()
        }

        fn to_external(&self, internal: NodeId) -> Option<String> {
            self.to_external.get(&internal.0).cloned()
        }

        fn contains_external(&self, external: &str) -> bool {
            self.to_internal.contains_key(external)
        }

        fn contains_internal(&self, internal: NodeId) -> bool {
            self.to_external.contains_key(&internal.0)
        }

        fn size(&self) -> usize {
            self.to_internal.len()
        }
    }

    #[test]
    fn round_trips_known_ids() {
        let map = InMemoryIdMap::from_pairs([
            ("a".to_string(), 0),
            ("b".to_string(), 1),
        ]);
        assert_eq!(map.to_internal("a"), Some(NodeId(0)));
        assert_eq!(map.to_external(NodeId(1)), Some("b".to_string()));
        assert!(map.contains_external("a"));
        assert!(!map.contains_external("z"));
        assert_eq!(map.size(), 2);
    }
}
