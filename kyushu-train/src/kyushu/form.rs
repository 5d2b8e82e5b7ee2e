//! Route search form fields.

use chrono::{Datelike, Timelike};

use crate::domain::SearchQuery;

/// Name of the hidden anti-replay field on the site's forms.
pub const TOKEN_FIELD: &str = "_TRANSACTION_TOKEN";

/// Value sent for a ticked checkbox.
const CHECKED: &str = "on";

/// Build the multipart fields for a route search.
///
/// Checkbox fields are only present when ticked. The site's "no transfer"
/// box is the inverse of [`SearchQuery::allow_transfer`].
pub fn search_form(query: &SearchQuery, token: &str) -> Vec<(&'static str, String)> {
    let at = query.search_datetime();

    let mut fields = vec![
        ("btSearch", "0".to_string()),
        ("dsName", query.departure_station().name().to_string()),
        ("dsCode", query.departure_station().code().as_str().to_string()),
        ("asName", query.arrival_station().name().to_string()),
        ("asCode", query.arrival_station().code().as_str().to_string()),
        ("trYearMonth", at.format("%Y%m").to_string()),
        ("trDay", at.day().to_string()),
        ("trHour", at.hour().to_string()),
        ("trMinute", at.minute().to_string()),
        ("daType", query.time_condition().ordinal().to_string()),
        ("adult", query.adult_count().to_string()),
        ("child", query.child_count().to_string()),
        (TOKEN_FIELD, token.to_string()),
    ];

    let checkboxes = [
        ("useExpress", query.include_express()),
        ("nonChange", !query.allow_transfer()),
        ("useShinkansen", query.include_shinkansen()),
        ("serviceKind", query.include_outer_kyushu()),
    ];
    fields.extend(
        checkboxes
            .into_iter()
            .filter(|(_, ticked)| *ticked)
            .map(|(name, _)| (name, CHECKED.to_string())),
    );

    fields
}
