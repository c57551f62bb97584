//! Output filename derivation for exported components.

use crate::config::ImageFormat;

/// Derives the output filename for a component: the name with illegal path
/// characters stripped, lower-cased, suffixed with the format extension.
///
/// Deterministic: the same name and format always yield the same filename.
/// Distinct names can still collide after sanitization; that is handled
/// (last writer wins) at the download stage, not here.
#[must_use]
pub fn component_filename(name: &str, format: ImageFormat) -> String {
    let mut cleaned = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            // Path separators and characters reserved on common filesystems.
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => {}
            c if c.is_control() => {}
            c => cleaned.push(c),
        }
    }
    // Trailing dots and spaces are rejected by Windows filesystems.
    let cleaned = cleaned.trim().trim_end_matches(['.', ' ']);
    format!("{}.{}", cleaned.to_lowercase(), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_appends_extension() {
        assert_eq!(component_filename("Card", ImageFormat::Jpg), "card.jpg");
        assert_eq!(component_filename("Card", ImageFormat::Svg), "card.svg");
    }

    #[test]
    fn test_preserves_inner_spaces() {
        assert_eq!(
            component_filename("Primary Button", ImageFormat::Png),
            "primary button.png"
        );
    }

    #[test]
    fn test_strips_path_separators_and_reserved_characters() {
        let name = "Icons / Arrow: <Left>?*\"|\\";
        let filename = component_filename(name, ImageFormat::Jpg);
        for forbidden in ['/', '\\', ':', '*', '?', '"', '<', '>', '|'] {
            assert!(!filename.contains(forbidden), "found {forbidden:?} in {filename}");
        }
        assert_eq!(filename, "icons  arrow left.jpg");
    }

    #[test]
    fn test_strips_control_characters() {
        assert_eq!(
            component_filename("Bad\nName\t", ImageFormat::Jpg),
            "badname.jpg"
        );
    }

    #[test]
    fn test_strips_trailing_dots() {
        assert_eq!(component_filename("Ellipsis...", ImageFormat::Png), "ellipsis.png");
    }

    #[test]
    fn test_deterministic() {
        let a = component_filename("Nav / Header", ImageFormat::Jpg);
        let b = component_filename("Nav / Header", ImageFormat::Jpg);
        assert_eq!(a, b);
    }

    #[test]
    fn test_identical_sanitized_names_collide() {
        // Duplicate component names are a documented non-invariant.
        assert_eq!(
            component_filename("Card", ImageFormat::Jpg),
            component_filename("card", ImageFormat::Jpg)
        );
    }
}
