//! On-disk project format.
//!
//! Plain serde records mirroring the domain types with strings and integers.
//! Converting a [`ProjectFile`] into a [`Project`] validates every rating,
//! enum name and id, so a malformed file is rejected as a whole.

use canvass_domain::{
    Assumption, AssumptionId, AssumptionStatus, AssumptionTag, AssumptionType, CanvasArea,
    ConfidenceChange, DomainError, Interview, InterviewId, InterviewStatus, IntervieweeType,
    Project, Rating, ValidationEffect, ValidationStage,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current file format version
pub const FORMAT_VERSION: u32 = 1;

/// A whole project as stored in JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Project name
    pub name: String,
    /// Chosen beachhead segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beachhead_segment: Option<String>,
    /// Assumptions
    #[serde(default)]
    pub assumptions: Vec<AssumptionRecord>,
    /// Interviews
    #[serde(default)]
    pub interviews: Vec<InterviewRecord>,
}

/// Stored assumption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssumptionRecord {
    /// UUID
    pub id: String,
    /// customer, problem or solution
    #[serde(rename = "type")]
    pub assumption_type: String,
    /// Statement
    pub description: String,
    /// Canvas area name
    pub canvas_area: String,
    /// Explicit stage number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_stage: Option<i64>,
    /// Status name
    #[serde(default = "default_status")]
    pub status: String,
    /// 1-5
    pub confidence: i64,
    /// 1-5
    pub importance: i64,
    /// Evidence notes
    #[serde(default)]
    pub evidence: Vec<String>,
    /// Cached tagging interview count
    #[serde(default)]
    pub interview_count: usize,
}

/// Stored interview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    /// UUID
    pub id: String,
    /// Interviewee type name
    #[serde(default = "default_interviewee")]
    pub interviewee_type: String,
    /// Segment
    pub segment_name: String,
    /// Date as entered
    #[serde(default)]
    pub date: String,
    /// Setting
    #[serde(default)]
    pub context: String,
    /// draft or completed
    #[serde(default = "default_interview_status")]
    pub status: String,
    /// Pain points
    #[serde(default)]
    pub main_pain_points: String,
    /// Alternatives
    #[serde(default)]
    pub current_alternatives: String,
    /// 1-5
    #[serde(default = "default_rating")]
    pub problem_importance: i64,
    /// Quotes
    #[serde(default)]
    pub memorable_quotes: Vec<String>,
    /// Surprises
    #[serde(default)]
    pub surprising_feedback: String,
    /// Reflection
    #[serde(default)]
    pub student_reflection: String,
    /// Tags
    #[serde(default)]
    pub assumption_tags: Vec<TagRecord>,
    /// Cached beachhead match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches_beachhead: Option<bool>,
}

/// Stored assumption tag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    /// Tagged assumption
    pub assumption_id: String,
    /// supports, contradicts or neutral
    pub validation_effect: String,
    /// -2..=2
    #[serde(default)]
    pub confidence_change: i64,
    /// Supporting quote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

fn default_status() -> String {
    AssumptionStatus::Untested.as_str().to_string()
}

fn default_interviewee() -> String {
    IntervieweeType::Customer.as_str().to_string()
}

fn default_interview_status() -> String {
    InterviewStatus::Completed.as_str().to_string()
}

fn default_rating() -> i64 {
    i64::from(Rating::MEDIUM.value())
}

impl From<&Assumption> for AssumptionRecord {
    fn from(a: &Assumption) -> Self {
        Self {
            id: a.id.to_string(),
            assumption_type: a.assumption_type.as_str().to_string(),
            description: a.description.clone(),
            canvas_area: a.canvas_area.as_str().to_string(),
            validation_stage: a.validation_stage.map(|s| i64::from(s.number())),
            status: a.status.as_str().to_string(),
            confidence: i64::from(a.confidence.value()),
            importance: i64::from(a.importance.value()),
            evidence: a.evidence.clone(),
            interview_count: a.interview_count,
        }
    }
}

impl From<&AssumptionTag> for TagRecord {
    fn from(t: &AssumptionTag) -> Self {
        Self {
            assumption_id: t.assumption_id.to_string(),
            validation_effect: t.validation_effect.as_str().to_string(),
            confidence_change: i64::from(t.confidence_change.value()),
            quote: t.quote.clone(),
        }
    }
}

impl From<&Interview> for InterviewRecord {
    fn from(i: &Interview) -> Self {
        Self {
            id: i.id.to_string(),
            interviewee_type: i.interviewee_type.as_str().to_string(),
            segment_name: i.segment_name.clone(),
            date: i.date.clone(),
            context: i.context.clone(),
            status: i.status.as_str().to_string(),
            main_pain_points: i.main_pain_points.clone(),
            current_alternatives: i.current_alternatives.clone(),
            problem_importance: i64::from(i.problem_importance.value()),
            memorable_quotes: i.memorable_quotes.clone(),
            surprising_feedback: i.surprising_feedback.clone(),
            student_reflection: i.student_reflection.clone(),
            assumption_tags: i.assumption_tags.iter().map(TagRecord::from).collect(),
            matches_beachhead: i.matches_beachhead,
        }
    }
}

impl From<&Project> for ProjectFile {
    fn from(p: &Project) -> Self {
        Self {
            version: FORMAT_VERSION,
            name: p.name.clone(),
            beachhead_segment: p.beachhead_segment.clone(),
            assumptions: p.assumptions.iter().map(AssumptionRecord::from).collect(),
            interviews: p.interviews.iter().map(InterviewRecord::from).collect(),
        }
    }
}

impl TryFrom<AssumptionRecord> for Assumption {
    type Error = DomainError;

    fn try_from(r: AssumptionRecord) -> Result<Self, Self::Error> {
        let mut assumption = Assumption::new(
            r.assumption_type.parse::<AssumptionType>()?,
            r.description,
            r.canvas_area.parse::<CanvasArea>()?,
        );
        assumption.id = AssumptionId::from_string(&r.id)?;
        assumption.validation_stage = r
            .validation_stage
            .map(ValidationStage::from_number)
            .transpose()?;
        assumption.status = r.status.parse::<AssumptionStatus>()?;
        assumption.confidence = Rating::checked("confidence", r.confidence)?;
        assumption.importance = Rating::checked("importance", r.importance)?;
        assumption.evidence = r.evidence;
        assumption.interview_count = r.interview_count;
        Ok(assumption)
    }
}

impl TryFrom<TagRecord> for AssumptionTag {
    type Error = DomainError;

    fn try_from(r: TagRecord) -> Result<Self, Self::Error> {
        let mut tag = AssumptionTag::new(
            AssumptionId::from_string(&r.assumption_id)?,
            r.validation_effect.parse::<ValidationEffect>()?,
        )
        .with_confidence_change(ConfidenceChange::new(r.confidence_change)?);
        tag.quote = r.quote;
        Ok(tag)
    }
}

impl TryFrom<InterviewRecord> for Interview {
    type Error = DomainError;

    fn try_from(r: InterviewRecord) -> Result<Self, Self::Error> {
        let mut interview = Interview::new(r.segment_name);
        interview.id = InterviewId::from_string(&r.id)?;
        interview.interviewee_type = r.interviewee_type.parse::<IntervieweeType>()?;
        interview.date = r.date;
        interview.context = r.context;
        interview.status = r.status.parse::<InterviewStatus>()?;
        interview.main_pain_points = r.main_pain_points;
        interview.current_alternatives = r.current_alternatives;
        interview.problem_importance = Rating::checked("problem importance", r.problem_importance)?;
        interview.memorable_quotes = r.memorable_quotes;
        interview.surprising_feedback = r.surprising_feedback;
        interview.student_reflection = r.student_reflection;
        interview.assumption_tags = r
            .assumption_tags
            .into_iter()
            .map(AssumptionTag::try_from)
            .collect::<Result<_, _>>()?;
        interview.matches_beachhead = r.matches_beachhead;
        Ok(interview)
    }
}

impl TryFrom<ProjectFile> for Project {
    type Error = DomainError;

    /// Also rejects other format versions and tags that point at
    /// assumptions missing from the file.
    fn try_from(file: ProjectFile) -> Result<Self, Self::Error> {
        if file.version != FORMAT_VERSION {
            return Err(DomainError::UnknownValue {
                kind: "project format version",
                value: file.version.to_string(),
            });
        }

        let assumptions: Vec<Assumption> = file
            .assumptions
            .into_iter()
            .map(Assumption::try_from)
            .collect::<Result<_, _>>()?;
        let interviews: Vec<Interview> = file
            .interviews
            .into_iter()
            .map(Interview::try_from)
            .collect::<Result<_, _>>()?;

        let known: HashSet<AssumptionId> = assumptions.iter().map(|a| a.id).collect();
        for interview in &interviews {
            if let Some(orphan) = interview
                .assumption_tags
                .iter()
                .find(|t| !known.contains(&t.assumption_id))
            {
                return Err(DomainError::NotFound {
                    kind: "assumption",
                    id: orphan.assumption_id.to_string(),
                });
            }
        }

        Ok(Project {
            name: file.name,
            beachhead_segment: file.beachhead_segment,
            assumptions,
            interviews,
        })
    }
}
