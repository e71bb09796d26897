//! Interview records and the tags linking them to assumptions

use crate::{AssumptionId, ConfidenceChange, DomainError, InterviewId, Rating};
use std::fmt;

/// How an interview bears on an assumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationEffect {
    /// The interview backs the assumption
    Supports,
    /// The interview argues against it
    Contradicts,
    /// Mentioned, but no signal either way
    Neutral,
}

impl ValidationEffect {
    /// Get the effect name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationEffect::Supports => "supports",
            ValidationEffect::Contradicts => "contradicts",
            ValidationEffect::Neutral => "neutral",
        }
    }

    /// Parse an effect from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "supports" => Some(ValidationEffect::Supports),
            "contradicts" => Some(ValidationEffect::Contradicts),
            "neutral" => Some(ValidationEffect::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ValidationEffect {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownValue {
            kind: "validation effect",
            value: s.to_string(),
        })
    }
}

/// Who was interviewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntervieweeType {
    /// A prospective customer
    #[default]
    Customer,
    /// A potential partner
    Partner,
    /// A regulator
    Regulator,
    /// A domain expert
    Expert,
    /// Anyone else
    Other,
}

impl IntervieweeType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervieweeType::Customer => "customer",
            IntervieweeType::Partner => "partner",
            IntervieweeType::Regulator => "regulator",
            IntervieweeType::Expert => "expert",
            IntervieweeType::Other => "other",
        }
    }

    /// Parse a type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Some(IntervieweeType::Customer),
            "partner" => Some(IntervieweeType::Partner),
            "regulator" => Some(IntervieweeType::Regulator),
            "expert" => Some(IntervieweeType::Expert),
            "other" => Some(IntervieweeType::Other),
            _ => None,
        }
    }
}

impl fmt::Display for IntervieweeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IntervieweeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownValue {
            kind: "interviewee type",
            value: s.to_string(),
        })
    }
}

/// Draft or completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterviewStatus {
    /// Still being written up
    Draft,
    /// Write-up finished
    #[default]
    Completed,
}

impl InterviewStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Draft => "draft",
            InterviewStatus::Completed => "completed",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(InterviewStatus::Draft),
            "completed" => Some(InterviewStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InterviewStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownValue {
            kind: "interview status",
            value: s.to_string(),
        })
    }
}

/// Link from an interview to one assumption it speaks to
#[derive(Debug, Clone, PartialEq)]
pub struct AssumptionTag {
    /// Tagged assumption
    pub assumption_id: AssumptionId,
    /// Direction of the evidence
    pub validation_effect: ValidationEffect,
    /// How much to move the assumption's confidence
    pub confidence_change: ConfidenceChange,
    /// Supporting quote, if captured
    pub quote: Option<String>,
}

impl AssumptionTag {
    /// Create a tag with no confidence change and no quote
    pub fn new(assumption_id: AssumptionId, validation_effect: ValidationEffect) -> Self {
        Self {
            assumption_id,
            validation_effect,
            confidence_change: ConfidenceChange::NONE,
            quote: None,
        }
    }

    /// Set the confidence change
    pub fn with_confidence_change(mut self, change: ConfidenceChange) -> Self {
        self.confidence_change = change;
        self
    }

    /// Attach a quote
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(quote.into());
        self
    }
}

/// A structured customer interview
#[derive(Debug, Clone, PartialEq)]
pub struct Interview {
    /// Unique identifier
    pub id: InterviewId,
    /// Who was interviewed
    pub interviewee_type: IntervieweeType,
    /// Segment the interviewee belongs to
    pub segment_name: String,
    /// When the interview happened (ISO date as entered)
    pub date: String,
    /// Setting of the conversation
    pub context: String,
    /// Draft or completed
    pub status: InterviewStatus,
    /// Pain points raised
    pub main_pain_points: String,
    /// What they use today
    pub current_alternatives: String,
    /// How important the problem is to them
    pub problem_importance: Rating,
    /// Verbatim quotes
    pub memorable_quotes: Vec<String>,
    /// Anything unexpected
    pub surprising_feedback: String,
    /// The interviewer's own reflection
    pub student_reflection: String,
    /// Assumptions this interview speaks to
    pub assumption_tags: Vec<AssumptionTag>,
    /// Cached beachhead match; None means compare segment names on demand
    pub matches_beachhead: Option<bool>,
}

impl Interview {
    /// Create a completed customer interview with empty notes
    pub fn new(segment_name: impl Into<String>) -> Self {
        Self {
            id: InterviewId::new(),
            interviewee_type: IntervieweeType::Customer,
            segment_name: segment_name.into(),
            date: String::new(),
            context: String::new(),
            status: InterviewStatus::Completed,
            main_pain_points: String::new(),
            current_alternatives: String::new(),
            problem_importance: Rating::MEDIUM,
            memorable_quotes: Vec::new(),
            surprising_feedback: String::new(),
            student_reflection: String::new(),
            assumption_tags: Vec::new(),
            matches_beachhead: None,
        }
    }

    /// Add a tag, builder style
    pub fn with_tag(mut self, tag: AssumptionTag) -> Self {
        self.assumption_tags.push(tag);
        self
    }

    /// The tag for an assumption, if this interview has one
    pub fn tag_for(&self, assumption_id: AssumptionId) -> Option<&AssumptionTag> {
        self.assumption_tags
            .iter()
            .find(|tag| tag.assumption_id == assumption_id)
    }

    /// Whether any tag points at the assumption
    pub fn tags_assumption(&self, assumption_id: AssumptionId) -> bool {
        self.tag_for(assumption_id).is_some()
    }

    /// Whether this interview is from the beachhead segment
    ///
    /// Uses the cached `matches_beachhead` flag when present, otherwise
    /// compares segment names.
    pub fn is_beachhead(&self, beachhead_segment: Option<&str>) -> bool {
        match self.matches_beachhead {
            Some(flag) => flag,
            None => beachhead_segment
                .map(|name| segment_matches(&self.segment_name, name))
                .unwrap_or(false),
        }
    }
}

/// Input for recording an interview through [`crate::Project::add_interview`]
#[derive(Debug, Clone)]
pub struct NewInterview {
    /// Who was interviewed
    pub interviewee_type: IntervieweeType,
    /// Segment name
    pub segment_name: String,
    /// Interview date
    pub date: String,
    /// Setting
    pub context: String,
    /// Draft or completed
    pub status: InterviewStatus,
    /// Problem importance (None = medium)
    pub problem_importance: Option<Rating>,
    /// Pain points raised
    pub main_pain_points: String,
    /// Current alternatives
    pub current_alternatives: String,
    /// Quotes
    pub memorable_quotes: Vec<String>,
}

impl NewInterview {
    /// Minimal input for a completed customer interview
    pub fn new(segment_name: impl Into<String>) -> Self {
        Self {
            interviewee_type: IntervieweeType::Customer,
            segment_name: segment_name.into(),
            date: String::new(),
            context: String::new(),
            status: InterviewStatus::Completed,
            problem_importance: None,
            main_pain_points: String::new(),
            current_alternatives: String::new(),
            memorable_quotes: Vec::new(),
        }
    }
}

/// Case- and whitespace-insensitive segment name comparison
///
/// Leading and trailing whitespace is ignored and inner runs of whitespace
/// compare equal to a single space.
pub fn segment_matches(a: &str, b: &str) -> bool {
    normalize_segment(a) == normalize_segment(b)
}

fn normalize_segment(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
