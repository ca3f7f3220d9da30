//! HTML escaping for injected content.
//!
//! Markup itself is built with [maud](https://maud.lambda.xyz/), which escapes
//! every interpolated value on its own. The one place that needs an explicit
//! escaping step is content injection: values supplied at render time are
//! escaped once, up front, and then spliced into labels that are rendered
//! pre-escaped (labels are trusted configuration and may carry markup).
//!
//! maud's escaper leaves apostrophes alone, which is fine inside its own
//! double-quoted attributes but not for values that end up in arbitrary
//! label markup, so injection goes through [`escape_xml`] instead.

/// Escape `&`, `<`, `>`, `"` and `'` for safe inclusion in HTML text or
/// attribute values.
///
/// ```
/// use kin_nav::html::escape_xml;
///
/// assert_eq!(escape_xml("Tom & Jerry's"), "Tom &amp; Jerry&#39;s");
/// ```
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
