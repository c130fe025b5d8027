//! Plain-text tables for categories, docs and commit reports.

use docslug_core::{Category, Doc};

const SLUG_WIDTH: usize = 36;
const TITLE_WIDTH: usize = 48;

/// Truncate a string to `max_len` characters, appending `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

fn print_slug_title_header() {
    println!("{:<SLUG_WIDTH$} {:<TITLE_WIDTH$}", "SLUG", "TITLE");
    println!("{}", "-".repeat(SLUG_WIDTH + TITLE_WIDTH + 1));
}

fn print_slug_title_row(slug: &str, title: &str) {
    // Slugs are never truncated; they are what the user types back.
    println!(
        "{:<SLUG_WIDTH$} {:<TITLE_WIDTH$}",
        slug,
        truncate(title, TITLE_WIDTH)
    );
}

pub fn print_category_table(categories: &[Category]) {
    print_slug_title_header();
    for category in categories {
        print_slug_title_row(&category.slug, &category.title);
    }
}

pub fn print_doc_table<'a>(docs: impl IntoIterator<Item = &'a Doc>) {
    print_slug_title_header();
    for doc in docs {
        print_slug_title_row(&doc.slug, &doc.title);
    }
}
