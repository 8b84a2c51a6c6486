//! Cache key schema.
//!
//! Formats are fixed so other processes sharing the Redis instance can read
//! and invalidate the same entries:
//!
//! - search results: `trips:<ORIGIN>:<DESTINATION>`
//! - saved list pages: `trips:saved:<limit>:<offset>`
//!
//! Builders do not normalize their input; callers pass already-uppercased
//! airport codes.

use crate::domain::Page;

pub const SEARCH_PREFIX: &str = "trips";

pub const SAVED_PREFIX: &str = "trips:saved";

/// Matches every saved list page, whatever its window.
pub const SAVED_PAGES_PATTERN: &str = "trips:saved*";

#[must_use]
pub fn search_key(origin: &str, destination: &str) -> String {
    format!("{SEARCH_PREFIX}:{origin}:{destination}")
}

#[must_use]
pub fn saved_page_key(page: Page) -> String {
    format!("{SAVED_PREFIX}:{}:{}", page.limit, page.offset)
}

/// Redis-style glob match supporting `*` (any run) and `?` (one char).
#[must_use]
pub fn glob_match(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();

    let (mut p, mut k) = (0, 0);
    let mut star: Option<usize> = None;
    let mut star_k = 0;

    while k < key.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == key[k]) {
            p += 1;
            k += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            star_k = k;
            p += 1;
        } else if let Some(s) = star {
            p = s + 1;
            star_k += 1;
            k = star_k;
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
