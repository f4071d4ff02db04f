// src/utils.rs
use crate::geometry::{PagePoint, ScrollOffset};
use wasm_bindgen::JsValue;
use web_sys::{window, MouseEvent};

/// Get the base URL for the demo page
/// This handles both local development and GitHub Pages deployment
pub fn get_base_url() -> String {
    if let Some(window) = window() {
        if let Ok(location) = window.location().pathname() {
            if location.starts_with("/msc-zoom/") {
                return "/msc-zoom".to_string();
            }
        }
    }
    String::new()
}

/// Build a resource URL with the correct base path
pub fn resource_url(path: &str) -> String {
    join_base(&get_base_url(), path)
}

fn join_base(base: &str, path: &str) -> String {
    let clean_path = path.trim_start_matches('/');

    if base.is_empty() {
        format!("/{}", clean_path)
    } else {
        format!("{}/{}", base, clean_path)
    }
}

/// `MscZoom` -> `msc-zoom`
pub fn class_to_tag_name(class_name: &str) -> String {
    let mut tag = String::with_capacity(class_name.len() + 4);
    let mut prev_lower = false;
    for ch in class_name.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            tag.push('-');
        }
        prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        tag.push(ch.to_ascii_lowercase());
    }
    tag
}

/// Page coordinates of a click.
pub fn pointer(event: &MouseEvent) -> PagePoint {
    PagePoint::new(event.page_x() as f64, event.page_y() as f64)
}

pub fn scroll_offset() -> ScrollOffset {
    window()
        .map(|w| ScrollOffset::new(w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
        .unwrap_or_default()
}

pub fn js_error(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_base() {
        assert_eq!(join_base("", "/public/images/a.jpg"), "/public/images/a.jpg");
        assert_eq!(join_base("", "public/images/a.jpg"), "/public/images/a.jpg");
        assert_eq!(
            join_base("/msc-zoom", "public/images/a.jpg"),
            "/msc-zoom/public/images/a.jpg"
        );
    }

    #[test]
    fn test_class_to_tag_name() {
        assert_eq!(class_to_tag_name("MscZoom"), "msc-zoom");
        assert_eq!(class_to_tag_name("MscImageZoom2x"), "msc-image-zoom2x");
        assert_eq!(class_to_tag_name("msc"), "msc");
    }
}
