use crate::data::wire::{StoreInfo, UploadNode};

/// First-available node selection.
///
/// The apply response may offer several upload nodes; this policy takes the
/// first one that actually carries store material. It is deliberately the
/// only selection policy — callers wanting load-balancing swap this function,
/// not scattered index arithmetic.
pub fn first_available_node(nodes: &[UploadNode]) -> Option<(&UploadNode, &StoreInfo)> {
    nodes
        .iter()
        .find_map(|node| node.store_infos.first().map(|info| (node, info)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(host: &str, stores: Vec<StoreInfo>) -> UploadNode {
        UploadNode {
            upload_host: host.to_string(),
            session_key: format!("sk-{host}"),
            store_infos: stores,
        }
    }

    fn store(uri: &str) -> StoreInfo {
        StoreInfo {
            store_uri: uri.to_string(),
            auth:      "Bearer t".to_string(),
        }
    }

    #[test]
    fn test_picks_first_node_with_store() {
        let nodes = vec![node("a", vec![store("s/a")]), node("b", vec![store("s/b")])];
        let (selected, info) = first_available_node(&nodes).unwrap();
        assert_eq!(selected.upload_host, "a");
        assert_eq!(info.store_uri, "s/a");
    }

    #[test]
    fn test_skips_node_without_stores() {
        let nodes = vec![node("empty", vec![]), node("b", vec![store("s/b")])];
        let (selected, _) = first_available_node(&nodes).unwrap();
        assert_eq!(selected.upload_host, "b");
    }

    #[test]
    fn test_no_viable_node() {
        assert!(first_available_node(&[]).is_none());
        assert!(first_available_node(&[node("empty", vec![])]).is_none());
    }
}
