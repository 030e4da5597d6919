//! Route names for spans and metric labels.

use uuid::Uuid;

/// Collections whose second path segment is a user-chosen name.
const NAMED_COLLECTIONS: [&str; 2] = ["categories", "products"];

/// Second segments under `/orders` that are fixed routes rather than ids.
const ORDER_ACTIONS: [&str; 2] = ["my", "status"];

/// Replace identifiers in a request path with placeholders so that every
/// product or order maps onto one label.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let labelled: Vec<&str> = match segments.as_slice() {
        ["products", "id", _] => vec!["products", "id", "{uuid}"],
        [collection, _, rest @ ..] if NAMED_COLLECTIONS.contains(collection) => {
            [&[*collection, "{name}"][..], rest].concat()
        }
        ["orders", action] if ORDER_ACTIONS.contains(action) => vec!["orders", *action],
        ["orders", _, rest @ ..] => [&["orders", "{order}"][..], rest].concat(),
        other => other
            .iter()
            .map(|segment| {
                if Uuid::parse_str(segment).is_ok() {
                    "{uuid}"
                } else {
                    *segment
                }
            })
            .collect(),
    };

    format!("/{}", labelled.join("/"))
}
