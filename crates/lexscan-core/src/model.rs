use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder rendered for fields the model left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Plain text extracted from a PDF, trimmed, pages concatenated in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocumentText(String);

impl RawDocumentText {
    pub fn new(text: impl Into<String>) -> Self {
        RawDocumentText(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes).
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RawDocumentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a single compliance rule check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    Pass,
    Fail,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStatus::Pass => "pass",
            RuleStatus::Fail => "fail",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<RuleStatus> {
        match s.trim().to_lowercase().as_str() {
            "pass" | "passed" => Some(RuleStatus::Pass),
            "fail" | "failed" => Some(RuleStatus::Fail),
            _ => None,
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleStatus::Pass => write!(f, "PASS"),
            RuleStatus::Fail => write!(f, "FAIL"),
        }
    }
}

impl Serialize for RuleStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RuleStatus::from_str_loose(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid rule status '{raw}' (expected 'pass' or 'fail')"
            ))
        })
    }
}

/// One compliance assertion made by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCheck {
    #[serde(default)]
    pub rule: Option<String>,
    #[serde(default)]
    pub status: Option<RuleStatus>,
    #[serde(default)]
    pub evidence: Option<String>,
    /// Self-reported confidence percentage. Not bounded.
    #[serde(default, deserialize_with = "deserialize_confidence")]
    pub confidence: Option<i64>,
}

impl RuleCheck {
    pub fn passed(&self) -> bool {
        self.status == Some(RuleStatus::Pass)
    }

    pub fn rule_text(&self) -> &str {
        self.rule.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn evidence_text(&self) -> &str {
        self.evidence.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Upper-case status, or "-" when the model gave none.
    pub fn status_label(&self) -> String {
        self.status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn confidence_pct(&self) -> i64 {
        self.confidence.unwrap_or(0)
    }
}

/// Accepts `85`, `85.4`, `"85"` and `"85%"`.
fn deserialize_confidence<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else {
                n.as_f64()
                    .map(|f| Some(f.round() as i64))
                    .ok_or_else(|| serde::de::Error::custom("confidence out of range"))
            }
        }
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim().trim_end_matches('%').trim();
            trimmed
                .parse::<f64>()
                .map(|f| Some(f.round() as i64))
                .map_err(|_| serde::de::Error::custom(format!("invalid confidence '{s}'")))
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid confidence {other}"
        ))),
    }
}

/// The closed set of section categories the model is asked to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Definitions,
    Obligations,
    Responsibilities,
    Eligibility,
    Payments,
    Penalties,
    RecordKeeping,
}

/// Which column a section is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

impl SectionKey {
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Definitions,
        SectionKey::Obligations,
        SectionKey::Responsibilities,
        SectionKey::Eligibility,
        SectionKey::Payments,
        SectionKey::Penalties,
        SectionKey::RecordKeeping,
    ];

    /// JSON key used in the prompt schema and the reply.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Definitions => "definitions",
            SectionKey::Obligations => "obligations",
            SectionKey::Responsibilities => "responsibilities",
            SectionKey::Eligibility => "eligibility",
            SectionKey::Payments => "payments",
            SectionKey::Penalties => "penalties",
            SectionKey::RecordKeeping => "record_keeping",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionKey::Definitions => "Definitions",
            SectionKey::Obligations => "Obligations",
            SectionKey::Responsibilities => "Responsibilities",
            SectionKey::Eligibility => "Eligibility",
            SectionKey::Payments => "Payments/Entitlements",
            SectionKey::Penalties => "Penalties",
            SectionKey::RecordKeeping => "Record-Keeping",
        }
    }

    pub fn column(&self) -> Column {
        match self {
            SectionKey::Definitions
            | SectionKey::Obligations
            | SectionKey::Eligibility
            | SectionKey::Penalties => Column::Left,
            SectionKey::Responsibilities | SectionKey::Payments | SectionKey::RecordKeeping => {
                Column::Right
            }
        }
    }

    /// Sections belonging to `column`, in display order.
    pub fn in_column(column: Column) -> impl Iterator<Item = SectionKey> {
        SectionKey::ALL
            .into_iter()
            .filter(move |k| k.column() == column)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Section texts keyed by [`SectionKey`]. Keys missing from the reply stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obligations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalties: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_keeping: Option<String>,
}

impl Sections {
    pub fn get(&self, key: SectionKey) -> Option<&str> {
        let text = match key {
            SectionKey::Definitions => &self.definitions,
            SectionKey::Obligations => &self.obligations,
            SectionKey::Responsibilities => &self.responsibilities,
            SectionKey::Eligibility => &self.eligibility,
            SectionKey::Payments => &self.payments,
            SectionKey::Penalties => &self.penalties,
            SectionKey::RecordKeeping => &self.record_keeping,
        };
        text.as_deref()
    }

    pub fn text_or_na(&self, key: SectionKey) -> &str {
        self.get(key).unwrap_or(NOT_AVAILABLE)
    }

    /// Number of sections the reply actually filled.
    pub fn present_count(&self) -> usize {
        SectionKey::ALL
            .iter()
            .filter(|k| self.get(**k).is_some())
            .count()
    }
}

/// Structured result of analyzing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Sections,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rule_checks: Vec<RuleCheck>,
}

/// An explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnalysisRecord {
    pub fn passed_count(&self) -> usize {
        self.rule_checks.iter().filter(|r| r.passed()).count()
    }

    pub fn total_rules(&self) -> usize {
        self.rule_checks.len()
    }

    /// Aggregate line, e.g. "5/6 Rules Passed".
    pub fn rules_passed_line(&self) -> String {
        format!("{}/{} Rules Passed", self.passed_count(), self.total_rules())
    }
}
