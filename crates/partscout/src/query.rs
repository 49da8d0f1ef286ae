use reqwest::Url;

use crate::types::Vehicle;

/// Part-position suffixes appended to every search, in request order.
pub const QUERY_SUFFIXES: [&str; 8] = [
    "used", "upper", "front", "left", "center", "right", "rear", "lower",
];

pub fn build_queries(vehicle: &Vehicle) -> Vec<String> {
    let base = format!("{} {} {} OEM", vehicle.year, vehicle.make, vehicle.model);
    QUERY_SUFFIXES
        .iter()
        .map(|suffix| format!("{base} {suffix}"))
        .collect()
}

/// Sold, used-condition listings matched on title and description in the
/// preferred location.
pub fn search_url(base_url: &str, query: &str) -> Result<Url, String> {
    Url::parse_with_params(
        &format!("{}/sch/i.html", base_url.trim_end_matches('/')),
        &[
            ("_fsrp", "1"),
            ("_from", "R40"),
            ("_nkw", query),
            ("_sacat", "0"),
            ("LH_ItemCondition", "4"),
            ("LH_Sold", "1"),
            ("LH_TitleDesc", "1"),
            ("LH_PrefLoc", "1"),
            ("rt", "nc"),
        ],
    )
    .map_err(|e| format!("{base_url}: {e}"))
}
