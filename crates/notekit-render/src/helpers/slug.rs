use deunicode::deunicode;

use super::HelperInvocation;

/// Turns text into a slug: ASCII, lower-case, words joined by single hyphens.
///
/// ```rust
/// use notekit_render::slugify;
///
/// assert_eq!(slugify("This will be slugified!"), "this-will-be-slugified");
/// assert_eq!(slugify("Olá  Mundo"), "ola-mundo");
/// ```
pub fn slugify(text: &str) -> String {
    let transliterated = deunicode(text).to_lowercase();
    let mut slug = String::with_capacity(transliterated.len());
    let mut pending_dash = false;

    for c in transliterated.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// `{{slug "text"}}` or `{{#slug}}text{{/slug}}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlugHelper;

impl SlugHelper {
    pub const NAME: &'static str = "slug";

    /// Slugifies the block content, or the arguments joined by spaces.
    pub fn call(&self, invocation: &HelperInvocation) -> String {
        match &invocation.block {
            Some(block) => slugify(block),
            None => slugify(&invocation.args.join(" ")),
        }
    }
}
