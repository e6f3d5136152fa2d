use crate::domain::{ErrorValue, Payload};
use serde_json::{Map, Value};

/// Converts a payload graph into a JSON tree.
///
/// Walks depth-first with a stack of the container nodes on the current
/// path. A node that is already on the stack is a back-reference and is
/// replaced by `[Circular ~]` (the walk root) or `[Circular ~.a.b]` (the
/// path of the ancestor it points at). Nodes that are shared without
/// forming a cycle are written out in full wherever they appear.
pub fn payload_to_value(payload: &Payload) -> Value {
    GraphWalker::default().walk(payload)
}

/// Same as [`payload_to_value`], with the walk rooted under `base` so that
/// sentinel paths are relative to an enclosing document.
pub(crate) fn payload_to_value_at(payload: &Payload, base: &str) -> Value {
    let mut walker = GraphWalker {
        path: vec![base.to_string()],
        ..GraphWalker::default()
    };
    walker.walk(payload)
}

#[derive(Default)]
struct GraphWalker {
    // (node id, path depth at which the node was entered)
    ancestors: Vec<(usize, usize)>,
    path: Vec<String>,
}

impl GraphWalker {
    fn walk(&mut self, node: &Payload) -> Value {
        if let Some(id) = node.node_id()
            && let Some(&(_, depth)) = self.ancestors.iter().find(|(seen, _)| *seen == id)
        {
            return Value::String(self.sentinel(depth));
        }

        match node {
            Payload::Null => Value::Null,
            Payload::Bool(b) => Value::Bool(*b),
            Payload::Number(n) => Value::Number(n.clone()),
            Payload::String(s) => Value::String(s.clone()),
            Payload::Error(err) => error_to_value(err),
            Payload::Array(items) => {
                // Snapshot the handles so no lock is held while descending.
                let items = items.read().clone();
                self.enter(node);
                let values = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| self.walk_child(index.to_string(), item))
                    .collect();
                self.ancestors.pop();
                Value::Array(values)
            }
            Payload::Object(map) => {
                let entries = map.read().clone();
                self.enter(node);
                let mut object = Map::with_capacity(entries.len());
                for (key, value) in &entries {
                    let converted = self.walk_child(key.clone(), value);
                    object.insert(key.clone(), converted);
                }
                self.ancestors.pop();
                Value::Object(object)
            }
        }
    }

    fn enter(&mut self, node: &Payload) {
        if let Some(id) = node.node_id() {
            self.ancestors.push((id, self.path.len()));
        }
    }

    fn walk_child(&mut self, key: String, child: &Payload) -> Value {
        self.path.push(key);
        let value = self.walk(child);
        self.path.pop();
        value
    }

    fn sentinel(&self, depth: usize) -> String {
        if depth == 0 {
            "[Circular ~]".to_string()
        } else {
            format!("[Circular ~.{}]", self.path[..depth].join("."))
        }
    }
}

/// Errors become plain objects: `name`, `message`, `stack`, then `code` and
/// `cause` when present.
pub fn error_to_value(err: &ErrorValue) -> Value {
    let mut object = Map::new();
    object.insert("name".to_string(), Value::String(err.name.clone()));
    object.insert("message".to_string(), Value::String(err.message.clone()));
    object.insert("stack".to_string(), Value::String(err.stack.clone()));
    if let Some(code) = &err.code {
        object.insert("code".to_string(), Value::String(code.clone()));
    }
    if let Some(cause) = &err.cause {
        object.insert("cause".to_string(), error_to_value(cause));
    }
    Value::Object(object)
}
