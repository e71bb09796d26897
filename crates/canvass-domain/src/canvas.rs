//! Lean canvas areas and assumption types

use crate::DomainError;
use std::fmt;

/// The eleven fixed areas of the business model canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanvasArea {
    /// Top problems the customer has
    Problem,
    /// How the problems are solved today
    ExistingAlternatives,
    /// Target customers and users
    CustomerSegments,
    /// Characteristics of the ideal first customers
    EarlyAdopters,
    /// Top features addressing the problems
    Solution,
    /// Single clear compelling message
    UniqueValueProposition,
    /// Path to customers
    Channels,
    /// How the business makes money
    RevenueStreams,
    /// Fixed and variable costs
    CostStructure,
    /// Numbers that tell how the business is doing
    KeyMetrics,
    /// What cannot be easily copied or bought
    UnfairAdvantage,
}

impl CanvasArea {
    /// Every canvas area, in canvas order
    pub const ALL: [CanvasArea; 11] = [
        CanvasArea::Problem,
        CanvasArea::ExistingAlternatives,
        CanvasArea::CustomerSegments,
        CanvasArea::EarlyAdopters,
        CanvasArea::Solution,
        CanvasArea::UniqueValueProposition,
        CanvasArea::Channels,
        CanvasArea::RevenueStreams,
        CanvasArea::CostStructure,
        CanvasArea::KeyMetrics,
        CanvasArea::UnfairAdvantage,
    ];

    /// Canonical (camelCase) name
    pub fn as_str(&self) -> &'static str {
        match self {
            CanvasArea::Problem => "problem",
            CanvasArea::ExistingAlternatives => "existingAlternatives",
            CanvasArea::CustomerSegments => "customerSegments",
            CanvasArea::EarlyAdopters => "earlyAdopters",
            CanvasArea::Solution => "solution",
            CanvasArea::UniqueValueProposition => "uniqueValueProposition",
            CanvasArea::Channels => "channels",
            CanvasArea::RevenueStreams => "revenueStreams",
            CanvasArea::CostStructure => "costStructure",
            CanvasArea::KeyMetrics => "keyMetrics",
            CanvasArea::UnfairAdvantage => "unfairAdvantage",
        }
    }

    /// Title-case label for display
    pub fn label(&self) -> &'static str {
        match self {
            CanvasArea::Problem => "Problem",
            CanvasArea::ExistingAlternatives => "Existing Alternatives",
            CanvasArea::CustomerSegments => "Customer Segments",
            CanvasArea::EarlyAdopters => "Early Adopters",
            CanvasArea::Solution => "Solution",
            CanvasArea::UniqueValueProposition => "Unique Value Proposition",
            CanvasArea::Channels => "Channels",
            CanvasArea::RevenueStreams => "Revenue Streams",
            CanvasArea::CostStructure => "Cost Structure",
            CanvasArea::KeyMetrics => "Key Metrics",
            CanvasArea::UnfairAdvantage => "Unfair Advantage",
        }
    }

    /// Parse an area name
    ///
    /// Matching ignores case and `_`, `-` and space separators, so
    /// `customerSegments`, `customer_segments` and `Customer Segments` all
    /// resolve to the same area.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|area| area.as_str().to_lowercase() == key)
    }
}

impl fmt::Display for CanvasArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CanvasArea {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownValue {
            kind: "canvas area",
            value: s.to_string(),
        })
    }
}

/// What an assumption is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssumptionType {
    /// Who the customer is
    Customer,
    /// What problem they have
    Problem,
    /// Whether the solution fits
    Solution,
}

impl AssumptionType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AssumptionType::Customer => "customer",
            AssumptionType::Problem => "problem",
            AssumptionType::Solution => "solution",
        }
    }

    /// Parse a type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Some(AssumptionType::Customer),
            "problem" => Some(AssumptionType::Problem),
            "solution" => Some(AssumptionType::Solution),
            _ => None,
        }
    }
}

impl fmt::Display for AssumptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssumptionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownValue {
            kind: "assumption type",
            value: s.to_string(),
        })
    }
}
