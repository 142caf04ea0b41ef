//! HTTP span helpers.

use uuid::Uuid;

/// Request path with identifiers collapsed, so spans for one route group together.
pub(super) fn request_route(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path
        .trim_start_matches('/')
        .trim_end_matches('/')
        .split('/')
        .enumerate()
    {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}
