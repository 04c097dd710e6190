//! Launch options for browser builds, where there is no command line and
//! the page URL picks the panel (`?floating=1`).

/// Whether the page was opened with a non-empty `floating` query parameter.
#[cfg(target_arch = "wasm32")]
pub fn floating_requested() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(search) = window.location().search() else {
        return false;
    };
    let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
        return false;
    };
    is_set(params.get("floating").as_deref())
}

/// A query flag counts as set when present with any non-empty value.
pub fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
