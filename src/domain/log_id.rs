use std::sync::OnceLock;
use uuid::Uuid;

static NODE_ID: OnceLock<[u8; 6]> = OnceLock::new();

/// Random per-process node id with the multicast bit set, as RFC 4122
/// requires when no hardware address is used.
fn node_id() -> &'static [u8; 6] {
    NODE_ID.get_or_init(|| {
        let mut node: [u8; 6] = rand::random();
        node[0] |= 0x01;
        node
    })
}

/// Generates a time-based (version 1) identifier for a log record.
pub fn generate_id() -> String {
    Uuid::now_v1(node_id()).to_string()
}
