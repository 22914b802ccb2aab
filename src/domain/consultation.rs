// Consultation type taxonomy
use std::fmt;

/// Series marker for labels that carry a cost.
pub const WITH_COST_MARKER: &str = "con Costo";

/// Series marker for labels without cost.
pub const WITHOUT_COST_MARKER: &str = "sin costo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Consulta,
    Control,
    Otros,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Consulta => "Consulta",
            Category::Control => "Control",
            Category::Otros => "Otros",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cost {
    WithCost,
    WithoutCost,
}

/// Category rules, first match wins. Unmatched types fall into `Otros`.
const CATEGORY_RULES: &[(&str, Category)] = &[
    ("consulta", Category::Consulta),
    ("control", Category::Control),
];

/// Cost rules, first match wins. Unmatched types count as with cost.
const COST_RULES: &[(&str, Cost)] = &[
    ("sin costo", Cost::WithoutCost),
    ("con costo", Cost::WithCost),
];

/// A derived chart label such as "Consulta con Costo".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsultationLabel {
    pub category: Category,
    pub cost: Cost,
}

impl ConsultationLabel {
    pub fn new(category: Category, cost: Cost) -> Self {
        Self { category, cost }
    }

    /// Classify a raw `tipoconsulta` value. Matching is case-insensitive.
    pub fn classify(consultation_type: &str) -> Self {
        let lowered = consultation_type.to_lowercase();
        let category = CATEGORY_RULES
            .iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Otros);
        let cost = COST_RULES
            .iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map(|(_, cost)| *cost)
            .unwrap_or(Cost::WithCost);
        Self { category, cost }
    }
}

impl fmt::Display for ConsultationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.cost {
            Cost::WithCost => WITH_COST_MARKER,
            Cost::WithoutCost => WITHOUT_COST_MARKER,
        };
        write!(f, "{} {}", self.category.as_str(), marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(raw: &str) -> String {
        ConsultationLabel::classify(raw).to_string()
    }

    #[test]
    fn test_classify_with_cost() {
        assert_eq!(label("Consulta con Costo extra"), "Consulta con Costo");
        assert_eq!(label("CONTROL CON COSTO"), "Control con Costo");
    }

    #[test]
    fn test_classify_without_cost() {
        assert_eq!(label("consulta sin costo"), "Consulta sin costo");
        assert_eq!(label("Control Sin Costo (GES)"), "Control sin costo");
        assert_eq!(label("Procedimiento sin costo"), "Otros sin costo");
    }

    #[test]
    fn test_category_priority() {
        // "consulta" is checked before "control"
        assert_eq!(label("Consulta de control sin costo"), "Consulta sin costo");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(label("Telemedicina"), "Otros con Costo");
        assert_eq!(label(""), "Otros con Costo");
    }
}
