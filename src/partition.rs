//! Storage partition classification.

use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Logical storage region an installed package lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    System,
    Vendor,
    Product,
    Odm,
    User,
    Unknown,
}

/// Prefix rules, evaluated in order. The first match wins.
const PREFIX_RULES: &[(&str, Partition)] = &[
    ("/system/", Partition::System),
    ("/vendor/", Partition::Vendor),
    ("/product/", Partition::Product),
    ("/odm/", Partition::Odm),
    ("/data/", Partition::User),
];

impl Partition {
    pub const ALL: [Partition; 6] = [
        Partition::System,
        Partition::Vendor,
        Partition::Product,
        Partition::Odm,
        Partition::User,
        Partition::Unknown,
    ];

    /// Classify an APK path by its prefix. Never fails.
    pub fn classify(apk_path: &str) -> Self {
        PREFIX_RULES
            .iter()
            .find(|(prefix, _)| apk_path.starts_with(prefix))
            .map_or(Partition::Unknown, |&(_, partition)| partition)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Partition::System => "system",
            Partition::Vendor => "vendor",
            Partition::Product => "product",
            Partition::Odm => "odm",
            Partition::User => "user",
            Partition::Unknown => "unknown",
        }
    }

    /// Section title form: `system` becomes `System`.
    pub fn title(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Partitions order alphabetically by name, the order reports list them in.
impl Ord for Partition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Partition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
