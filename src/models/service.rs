use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Medical,
    Wellness,
    Professional,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Medical => "medical",
            ServiceCategory::Wellness => "wellness",
            ServiceCategory::Professional => "professional",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub duration_minutes: u32,
    /// Whole currency units.
    pub price: u32,
    pub category: ServiceCategory,
}

impl Service {
    pub fn new(name: &str, duration_minutes: u32, price: u32, category: ServiceCategory) -> Self {
        Self {
            name: name.to_string(),
            duration_minutes,
            price,
            category,
        }
    }

    /// Display form of the name, e.g. "dentist" -> "Dentist".
    pub fn title(&self) -> String {
        self.name
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().to_string() + chars.as_str(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
