//! Block identifier forms.
//!
//! Notion accepts block ids in two shapes: the compact form used in page
//! URLs (`5b1a3c2e9f0d4e7a8b6c1d2e3f4a5b6c`) and the dashed form used by
//! the API (`5b1a3c2e-9f0d-4e7a-8b6c-1d2e3f4a5b6c`). Both conversions are
//! total: input that does not look like the source form is returned as is,
//! and lengths are not validated.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static DASHED_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{8}-([a-zA-Z0-9]{4}-){3}[a-zA-Z0-9]+$").unwrap());

/// Convert a compact id into the dashed `8-4-4-4-rest` form.
///
/// Only non-empty, purely alphanumeric input is regrouped. The last group
/// takes every character past the twentieth, so inputs shorter than 20
/// characters come out malformed (`"abc"` becomes `"abc----"`) rather than
/// being rejected.
pub fn to_canonical(id: &str) -> Cow<'_, str> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Cow::Borrowed(id);
    }

    // ASCII only, so byte offsets are char offsets.
    let len = id.len();
    let group = |start: usize, width: usize| &id[start.min(len)..(start + width).min(len)];
    Cow::Owned(format!(
        "{}-{}-{}-{}-{}",
        group(0, 8),
        group(8, 4),
        group(12, 4),
        group(16, 4),
        &id[20.min(len)..]
    ))
}

/// Convert a dashed id into the compact form by dropping the hyphens.
///
/// Input not shaped like `8-4-4-4-rest` alphanumeric groups is returned unchanged.
pub fn to_compact(id: &str) -> Cow<'_, str> {
    if DASHED_ID_RE.is_match(id) {
        Cow::Owned(id.replace('-', ""))
    } else {
        Cow::Borrowed(id)
    }
}
