// Filter selections and dropdown options
use crate::domain::consultation::{Category, ConsultationLabel, Cost};
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Physician dropdown value meaning "no physician filter".
pub const ALL_PHYSICIANS: &str = "Todos";

#[derive(Debug, Error, PartialEq)]
#[error("invalid value '{value}' for filter '{input}'")]
pub struct InvalidChoice {
    pub input: &'static str,
    pub value: String,
}

/// Bucket applied to the per-name attention count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionRange {
    UpTo4000,
    From4001To8000,
    Above8000,
}

impl AttentionRange {
    pub const ALL: [AttentionRange; 3] = [
        AttentionRange::UpTo4000,
        AttentionRange::From4001To8000,
        AttentionRange::Above8000,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            AttentionRange::UpTo4000 => "0-4000",
            AttentionRange::From4001To8000 => "4001-8000",
            AttentionRange::Above8000 => "8001+",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttentionRange::UpTo4000 => "Entre 0 a 4000",
            AttentionRange::From4001To8000 => "Entre 4001 a 8000",
            AttentionRange::Above8000 => "Entre 8001 en adelante",
        }
    }

    pub fn contains(&self, count: u64) -> bool {
        match self {
            AttentionRange::UpTo4000 => count <= 4000,
            AttentionRange::From4001To8000 => count > 4000 && count <= 8000,
            AttentionRange::Above8000 => count > 8000,
        }
    }
}

impl FromStr for AttentionRange {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.value() == s)
            .ok_or_else(|| InvalidChoice {
                input: FilterInput::Range.key(),
                value: s.to_string(),
            })
    }
}

/// UI-level consultation category choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryChoice {
    Consulta,
    Control,
    Otros,
    Todas,
}

impl CategoryChoice {
    pub const ALL: [CategoryChoice; 4] = [
        CategoryChoice::Todas,
        CategoryChoice::Consulta,
        CategoryChoice::Control,
        CategoryChoice::Otros,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            CategoryChoice::Consulta => "Consulta",
            CategoryChoice::Control => "Control",
            CategoryChoice::Otros => "Otros",
            CategoryChoice::Todas => "Todas",
        }
    }

    /// Derived labels this choice lets through; `None` means no restriction.
    pub fn allowed_labels(&self) -> Option<[String; 2]> {
        let category = match self {
            CategoryChoice::Consulta => Category::Consulta,
            CategoryChoice::Control => Category::Control,
            CategoryChoice::Otros => Category::Otros,
            CategoryChoice::Todas => return None,
        };
        Some([
            ConsultationLabel::new(category, Cost::WithCost).to_string(),
            ConsultationLabel::new(category, Cost::WithoutCost).to_string(),
        ])
    }
}

impl FromStr for CategoryChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.value() == s)
            .ok_or_else(|| InvalidChoice {
                input: FilterInput::Category.key(),
                value: s.to_string(),
            })
    }
}

/// Columns the option enumerator can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    GivenBy,
    Physician,
    Month,
    ConsultationType,
    Status,
}

/// Filter identifiers a chart can declare as inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterInput {
    GivenBy,
    Range,
    Month,
    Physician,
    Category,
}

impl FilterInput {
    pub fn key(&self) -> &'static str {
        match self {
            FilterInput::GivenBy => "given_by",
            FilterInput::Range => "range",
            FilterInput::Month => "month",
            FilterInput::Physician => "physician",
            FilterInput::Category => "category",
        }
    }
}

/// Raw dropdown values keyed by filter input. Blank values count as unset.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    values: HashMap<String, String>,
}

impl Selection {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn with(mut self, input: FilterInput, value: &str) -> Self {
        self.values.insert(input.key().to_string(), value.to_string());
        self
    }

    pub fn get(&self, input: FilterInput) -> Option<&str> {
        self.values
            .get(input.key())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn parse<T: FromStr<Err = InvalidChoice>>(
        &self,
        input: FilterInput,
    ) -> Result<Option<T>, InvalidChoice> {
        self.get(input).map(str::parse::<T>).transpose()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    fn same(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: value.to_string(),
        }
    }
}

/// Dropdown contents, always derived from the unfiltered dataset.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub given_by: Vec<String>,
    pub physicians: Vec<String>,
    pub months: Vec<String>,
    pub consultation_types: Vec<String>,
    pub ranges: Vec<ChoiceOption>,
    pub categories: Vec<ChoiceOption>,
}

impl FilterOptions {
    pub fn new(
        given_by: Vec<String>,
        physicians: Vec<String>,
        months: Vec<String>,
        consultation_types: Vec<String>,
    ) -> Self {
        let mut physician_choices = Vec::with_capacity(physicians.len() + 1);
        physician_choices.push(ALL_PHYSICIANS.to_string());
        physician_choices.extend(physicians);

        Self {
            given_by,
            physicians: physician_choices,
            months,
            consultation_types,
            ranges: AttentionRange::ALL
                .iter()
                .map(|r| ChoiceOption {
                    value: r.value().to_string(),
                    label: r.label().to_string(),
                })
                .collect(),
            categories: CategoryChoice::ALL
                .iter()
                .map(|c| ChoiceOption::same(c.value()))
                .collect(),
        }
    }
}
