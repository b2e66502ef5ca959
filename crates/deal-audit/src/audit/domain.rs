use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Generates a closed label enumeration with a catch-all `Other` variant.
///
/// Known labels match byte for byte; anything else, padded variants included,
/// is preserved so audit output can echo what the caller supplied.
macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Parses a label, treating the empty string as absent.
            pub fn parse(raw: &str) -> Option<Self> {
                if raw.is_empty() {
                    return None;
                }

                let value = match raw {
                    $($label => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                };
                Some(value)
            }

            pub fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(label) => label,
                }
            }

            pub(crate) fn deserialize_optional<'de, D>(
                deserializer: D,
            ) -> Result<Option<Self>, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = Option::<String>::deserialize(deserializer)?;
                Ok(raw.as_deref().and_then(Self::parse))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).ok_or_else(|| {
                    de::Error::custom(concat!(stringify!($name), " label must not be empty"))
                })
            }
        }
    };
}

label_enum! {
    /// Lifecycle state of a deal in the trading platform.
    DealStatus {
        Active => "Active",
        Inactive => "Inactive",
        Archived => "Archived",
    }
}

label_enum! {
    /// Forecast strength of the inventory backing the deal.
    InventoryStrength {
        Strong => "Strong",
        Moderate => "Moderate",
        Weak => "Weak",
    }
}

label_enum! {
    /// Delivery track record of comparable deals.
    HistoricalPerformance {
        Good => "Good",
        Mixed => "Mixed",
        Poor => "Poor",
    }
}

/// Audience targeting attached to a deal. Empty lists mean "unconstrained".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targeting {
    #[serde(default, deserialize_with = "null_as_default")]
    pub geo: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub devices: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub segments: Vec<String>,
}

/// Deal snapshot submitted for audit.
///
/// Deserialization is lenient about shape: any absent or `null` field falls
/// back to its empty default, so a partially filled form still produces a
/// complete record and every gap surfaces as a failing check rather than a
/// parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub deal_id: String,
    #[serde(default, deserialize_with = "DealStatus::deserialize_optional")]
    pub status: Option<DealStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buyer_seat_id: String,
    #[serde(default, deserialize_with = "deserialize_kvp_flags")]
    pub kvps: BTreeMap<String, bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub targeting: Targeting,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deal_list_id: String,
    #[serde(default, deserialize_with = "deserialize_floor_price")]
    pub floor_price: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creative_approved: bool,
    #[serde(default, deserialize_with = "InventoryStrength::deserialize_optional")]
    pub inventory_strength: Option<InventoryStrength>,
    #[serde(
        default,
        deserialize_with = "HistoricalPerformance::deserialize_optional"
    )]
    pub historical_performance: Option<HistoricalPerformance>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_kvp_flags<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, is_truthy(&value)))
        .collect())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn deserialize_floor_price<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "floorPrice must be a number or numeric string, got {other}"
        ))),
    }
}
