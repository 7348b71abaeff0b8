//! Source stubs written into new projects.

/// Hello-world program placed in `src/main.<ext>` for applications.
pub const MAIN_SOURCE: &str = r#"fn main = function(out Void) {
	print("Hello, world!");
}
"#;

/// Contents of `src/compile.<ext>` for libraries.
pub const COMPILE_SOURCE: &str = "";

/// File name of a source file with the configured extension.
pub fn source_file(stem: &str, extension: &str) -> String {
    format!("{stem}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_name() {
        assert_eq!(source_file("main", "qi"), "main.qi");
    }

    #[test]
    fn test_main_source_prints_greeting() {
        assert!(MAIN_SOURCE.contains("Hello, world!"));
        assert!(COMPILE_SOURCE.is_empty());
    }
}
