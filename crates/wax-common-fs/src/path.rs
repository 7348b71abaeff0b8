//! Path helpers.

use std::path::{Component, Path};

/// Whether `name` is usable as a single directory name: non-empty, one
/// normal path component, no separators of either platform.
pub fn is_plain_name(name: &str) -> bool {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains('\0') {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Whether any component of `path` starts with a dot.
pub fn is_hidden(path: impl AsRef<Path>) -> bool {
    path.as_ref().components().any(|c| match c {
        Component::Normal(part) => part.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_unix_string(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
