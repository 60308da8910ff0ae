use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One row of a CRM lead export, as loosely as the exports actually arrive:
/// every cell is optional text and numbers may carry currency noise.
#[derive(Debug, Deserialize)]
pub(crate) struct CsvLeadRow {
    #[serde(rename = "Lead ID", default, deserialize_with = "empty_string_as_none")]
    pub(crate) lead_id: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    pub(crate) name: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    pub(crate) email: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    pub(crate) phone: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "empty_string_as_none")]
    pub(crate) country: Option<String>,
    #[serde(rename = "Region", default, deserialize_with = "empty_string_as_none")]
    pub(crate) region: Option<String>,
    #[serde(rename = "Budget Min", default, deserialize_with = "empty_string_as_none")]
    pub(crate) budget_min: Option<String>,
    #[serde(rename = "Budget Max", default, deserialize_with = "empty_string_as_none")]
    pub(crate) budget_max: Option<String>,
    #[serde(rename = "Bedrooms", default, deserialize_with = "empty_string_as_none")]
    pub(crate) bedrooms: Option<String>,
    #[serde(
        rename = "Preferred Location",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) preferred_location: Option<String>,
    #[serde(rename = "Purpose", default, deserialize_with = "empty_string_as_none")]
    pub(crate) purpose: Option<String>,
    #[serde(
        rename = "Payment Method",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) payment_method: Option<String>,
    #[serde(
        rename = "Connect To Broker",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) connect_to_broker: Option<String>,
    #[serde(
        rename = "Buying Within 28 Days",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) buying_within_28_days: Option<String>,
    #[serde(rename = "Timeline", default, deserialize_with = "empty_string_as_none")]
    pub(crate) timeline: Option<String>,
    #[serde(
        rename = "Development",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) development: Option<String>,
    #[serde(rename = "Channel", default, deserialize_with = "empty_string_as_none")]
    pub(crate) channel: Option<String>,
    #[serde(rename = "Campaign", default, deserialize_with = "empty_string_as_none")]
    pub(crate) campaign: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CsvLeadRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<CsvLeadRow>().collect()
}

/// Parse an amount cell, tolerating currency symbols and thousands
/// separators. Unparseable text is treated as absent.
pub(crate) fn parse_amount(raw: Option<&str>) -> Option<u64> {
    let cleaned: String = raw?
        .chars()
        .filter(|ch| ch.is_ascii_digit())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

pub(crate) fn parse_count(raw: Option<&str>) -> Option<u8> {
    raw?.trim().parse().ok()
}

/// Lenient boolean cell: yes/no, true/false, 1/0, y/n. Anything else is
/// treated as unanswered.
pub(crate) fn parse_bool(raw: Option<&str>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" | "y" => Some(true),
        "no" | "false" | "0" | "n" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
