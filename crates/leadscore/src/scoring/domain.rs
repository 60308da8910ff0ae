use serde::{Deserialize, Serialize};

/// Source tag applied when a caller does not name one.
pub const DEFAULT_EXTERNAL_SOURCE: &str = "api";

fn default_external_source() -> String {
    DEFAULT_EXTERNAL_SOURCE.to_string()
}

/// One normalized lead as submitted by an upstream channel.
///
/// `external_id` is the caller-supplied idempotency key. It is deliberately
/// lenient at the wire (`default`) so a batch containing one bad element
/// still deserializes; the service rejects blank ids per element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub external_id: String,
    #[serde(default = "default_external_source")]
    pub external_source: String,
    #[serde(default)]
    pub buyer: BuyerContact,
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default)]
    pub financial: Financial,
    #[serde(default)]
    pub context: LeadContext,
}

impl LeadSubmission {
    pub fn key(&self) -> LeadKey {
        LeadKey {
            external_id: self.external_id.clone(),
            external_source: if self.external_source.is_empty() {
                DEFAULT_EXTERNAL_SOURCE.to_string()
            } else {
                self.external_source.clone()
            },
        }
    }
}

/// Upsert key for scored leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadKey {
    pub external_id: String,
    pub external_source: String,
}

impl LeadKey {
    pub fn new(external_id: impl Into<String>, external_source: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            external_source: external_source.into(),
        }
    }
}

/// Contact details; informational only, never scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerContact {
    pub country: Option<String>,
    pub region: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// What the buyer is looking for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub budget_min: Option<u64>,
    pub budget_max: Option<u64>,
    pub bedrooms: Option<u8>,
    pub preferred_location: Option<String>,
    pub purchase_purpose: Option<String>,
    pub timeline: Option<String>,
}

impl Requirements {
    /// Effective budget: max wins, min is the fallback, zero when neither is set.
    pub fn budget(&self) -> u64 {
        self.budget_max.or(self.budget_min).unwrap_or(0)
    }

    pub fn has_budget(&self) -> bool {
        self.budget_min.is_some() || self.budget_max.is_some()
    }

    pub fn purpose(&self) -> PurchasePurpose {
        PurchasePurpose::from_raw(self.purchase_purpose.as_deref())
    }
}

/// How the purchase is financed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financial {
    pub payment_method: Option<String>,
    pub connect_to_broker: Option<bool>,
    pub buying_within_28_days: Option<bool>,
    pub proof_of_funds: Option<bool>,
    pub mortgage_status: Option<String>,
}

impl Financial {
    pub fn method(&self) -> PaymentMethod {
        PaymentMethod::from_raw(self.payment_method.as_deref())
    }
}

/// Where the lead came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadContext {
    pub development_id: Option<String>,
    pub development_name: Option<String>,
    pub channel: Option<String>,
    pub source_campaign: Option<String>,
}

impl LeadContext {
    pub fn channel(&self) -> Channel {
        Channel::from_raw(self.channel.as_deref())
    }

    /// The completeness check looks at these three fields only.
    pub fn has_any_detail(&self) -> bool {
        self.development_name.is_some() || self.channel.is_some() || self.source_campaign.is_some()
    }
}

/// Payment method after case-insensitive normalization. Upstream forms send
/// free text, so anything unrecognized lands in `Other` rather than failing
/// the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Mortgage,
    Other,
    Unspecified,
}

impl PaymentMethod {
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Unspecified;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "cash" => Self::Cash,
            "mortgage" => Self::Mortgage,
            "" => Self::Unspecified,
            _ => Self::Other,
        }
    }
}

/// Purchase purpose after case-insensitive normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchasePurpose {
    PrimaryResidence,
    DependentStudying,
    Investment,
    HolidayHome,
    Other,
    Unspecified,
}

impl PurchasePurpose {
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Unspecified;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "primary_residence" => Self::PrimaryResidence,
            "dependent_studying" => Self::DependentStudying,
            "investment" => Self::Investment,
            "holiday_home" => Self::HolidayHome,
            "" => Self::Unspecified,
            _ => Self::Other,
        }
    }
}

/// Acquisition channel after case-insensitive normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Form,
    Website,
    Whatsapp,
    Other,
    Unspecified,
}

impl Channel {
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Unspecified;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "form" => Self::Form,
            "website" => Self::Website,
            "whatsapp" => Self::Whatsapp,
            "" => Self::Unspecified,
            _ => Self::Other,
        }
    }
}

/// Terminal outcome recorded against a previously scored lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Converted,
    Lost,
    Disqualified,
    Stale,
}

impl OutcomeStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OutcomeStatus::Converted => "converted",
            OutcomeStatus::Lost => "lost",
            OutcomeStatus::Disqualified => "disqualified",
            OutcomeStatus::Stale => "stale",
        }
    }
}
