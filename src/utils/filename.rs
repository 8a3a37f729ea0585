use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[<>:"/\\|?*\x00-\x1F\x7F]"#).expect("file name pattern is valid")
});

const FALLBACK_COMPONENT: &str = "unknown";

/// Makes a display name safe to embed in a file name on common filesystems.
///
/// Reserved characters and control characters become `_`, trailing dots and
/// spaces are dropped, and a name that ends up empty becomes `unknown`.
pub fn sanitize_file_component(name: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(name, "_");
    let trimmed = replaced.trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        FALLBACK_COMPONENT.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn library_file_name(persona_name: &str) -> String {
    format!("steam_library_{}.csv", sanitize_file_component(persona_name))
}
