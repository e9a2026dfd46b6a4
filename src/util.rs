use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

pub fn format_hours(hours: f32) -> String {
    if hours.fract().abs() < f32::EPSILON {
        format!("{hours:.0}h")
    } else {
        format!("{hours:.1}h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_collapse_punctuation() {
        assert_eq!(slugify("Backend API"), "backend-api");
        assert_eq!(slugify("  React / Next.js  "), "react-next-js");
        assert_eq!(slugify("Mobile App!"), "mobile-app");
    }

    #[test]
    fn stable_pair_is_stable_and_bounded() {
        let first = stable_pair("design");
        assert_eq!(first, stable_pair("design"));
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }

    #[test]
    fn hours_drop_trailing_zero() {
        assert_eq!(format_hours(12.0), "12h");
        assert_eq!(format_hours(7.5), "7.5h");
    }
}
