//! Homepage and error page inspection.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::form::TOKEN_FIELD;

static TOKEN_INPUT: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(&format!("input[name={TOKEN_FIELD}]")).expect("valid CSS selector")
});
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid CSS selector"));
static ERROR_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#errorTitle").expect("valid CSS selector"));

const MAINTENANCE_TITLE: &str = "メンテナンス";
const MAINTENANCE_MESSAGE: &str = "只今メンテナンスを行っております";

/// Value of the hidden transaction token input, if present and non-empty.
pub fn transaction_token(document: &Html) -> Option<String> {
    document
        .select(&TOKEN_INPUT)
        .filter_map(|input| input.value().attr("value"))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Whether the page announces scheduled maintenance.
pub fn is_maintenance_page(document: &Html) -> bool {
    let in_title = document
        .select(&TITLE)
        .any(|title| title.text().any(|t| t.contains(MAINTENANCE_TITLE)));

    in_title
        || document
            .select(&ERROR_TITLE)
            .any(|el| el.text().collect::<String>().contains(MAINTENANCE_MESSAGE))
}

/// Text of the page's `#errorTitle` element, if any.
pub fn error_message(document: &Html) -> Option<String> {
    document
        .select(&ERROR_TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|message| !message.is_empty())
}
