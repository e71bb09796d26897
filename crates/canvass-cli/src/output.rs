//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::snapshot::{AssumptionRecord, InterviewRecord};
use canvass_domain::{
    Assumption, AssumptionId, AssumptionStatus, BeachheadReadiness, Interview, Priority,
    ValidationStage,
};
use canvass_engine::{EligibilityResult, InterviewRequirements, OverallProgress, StageStatus};
use colored::{Color, Colorize};
use serde_json::json;
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a list of assumptions.
    pub fn assumptions(&self, assumptions: &[&Assumption]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let records: Vec<AssumptionRecord> =
                    assumptions.iter().map(|a| AssumptionRecord::from(*a)).collect();
                Ok(serde_json::to_string_pretty(&records)?)
            }
            OutputFormat::Quiet => Ok(join_ids(assumptions.iter().map(|a| a.id.to_string()))),
            OutputFormat::Table => {
                if assumptions.is_empty() {
                    return Ok(self.colorize("No assumptions found.", Color::Yellow));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "ID", "Stage", "Area", "Type", "Status", "Conf", "Imp", "Risk", "Priority",
                    "Interviews", "Description",
                ]);
                for a in assumptions {
                    builder.push_record([
                        short_id(&a.id.to_string()),
                        a.stage().number().to_string(),
                        a.canvas_area.label().to_string(),
                        a.assumption_type.to_string(),
                        self.status(a.status),
                        a.confidence.to_string(),
                        a.importance.to_string(),
                        a.risk_score().to_string(),
                        self.priority(a.priority()),
                        a.interview_count.to_string(),
                        truncate(&a.description, 48),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format one assumption with its evidence.
    pub fn assumption_detail(&self, a: &Assumption) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&AssumptionRecord::from(a))?),
            OutputFormat::Quiet => Ok(a.id.to_string()),
            OutputFormat::Table => {
                let stage = match a.stage_conflict() {
                    Some(other) => format!("{} (also {} by area)", a.stage(), other),
                    None => a.stage().to_string(),
                };
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["ID".to_string(), a.id.to_string()]);
                builder.push_record(["Description".to_string(), a.description.clone()]);
                builder.push_record(["Type".to_string(), a.assumption_type.to_string()]);
                builder.push_record(["Area".to_string(), a.canvas_area.label().to_string()]);
                builder.push_record(["Stage".to_string(), stage]);
                builder.push_record(["Status".to_string(), self.status(a.status)]);
                builder.push_record([
                    "Confidence".to_string(),
                    format!("{} ({})", a.confidence, a.confidence.label()),
                ]);
                builder.push_record([
                    "Importance".to_string(),
                    format!("{} ({})", a.importance, a.importance.label()),
                ]);
                builder.push_record([
                    "Risk".to_string(),
                    format!("{} {}", a.risk_score(), self.priority(a.priority())),
                ]);
                builder.push_record(["Interviews".to_string(), a.interview_count.to_string()]);

                let mut out = render(builder);
                if !a.evidence.is_empty() {
                    out.push_str("\n\nEvidence:");
                    for note in &a.evidence {
                        out.push_str(&format!("\n  - {}", note));
                    }
                }
                Ok(out)
            }
        }
    }

    /// Format a list of interviews.
    pub fn interviews(&self, interviews: &[Interview], beachhead: Option<&str>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let records: Vec<InterviewRecord> =
                    interviews.iter().map(InterviewRecord::from).collect();
                Ok(serde_json::to_string_pretty(&records)?)
            }
            OutputFormat::Quiet => Ok(join_ids(interviews.iter().map(|i| i.id.to_string()))),
            OutputFormat::Table => {
                if interviews.is_empty() {
                    return Ok(self.colorize("No interviews found.", Color::Yellow));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "ID", "Date", "Segment", "Type", "Status", "Beachhead", "Tags", "Pain points",
                ]);
                for i in interviews {
                    let on_beachhead = if i.is_beachhead(beachhead) { "yes" } else { "" };
                    builder.push_record([
                        short_id(&i.id.to_string()),
                        i.date.clone(),
                        i.segment_name.clone(),
                        i.interviewee_type.to_string(),
                        i.status.to_string(),
                        on_beachhead.to_string(),
                        i.assumption_tags.len().to_string(),
                        truncate(&i.main_pain_points, 40),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format the three stage statuses.
    pub fn stages(&self, statuses: &BTreeMap<ValidationStage, StageStatus>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let stages: Vec<serde_json::Value> = statuses
                    .values()
                    .map(|s| {
                        json!({
                            "stage": s.stage.number(),
                            "name": s.stage.definition().name,
                            "interviewCount": s.interview_count,
                            "interviewsNeeded": s.interviews_needed,
                            "avgConfidence": s.avg_confidence,
                            "validatedCount": s.validated_count,
                            "invalidatedCount": s.invalidated_count,
                            "untestedCount": s.untested_count,
                            "testingCount": s.testing_count,
                            "totalAssumptions": s.total_assumptions,
                            "canGraduate": s.can_graduate,
                            "isUnlocked": s.is_unlocked,
                            "shortfalls": s.shortfalls.iter().map(ToString::to_string).collect::<Vec<_>>(),
                            "recommendation": s.recommendation,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&stages)?)
            }
            OutputFormat::Quiet => Ok(statuses
                .values()
                .map(|s| format!("{} {}", s.stage.number(), s.can_graduate))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record([
                    "Stage", "Name", "Unlocked", "Assumptions", "V/I/T/U", "Interviews",
                    "Avg conf", "Graduate",
                ]);
                for s in statuses.values() {
                    let interviews = if s.interviews_needed > 0 {
                        format!("{} (need {} more)", s.interview_count, s.interviews_needed)
                    } else {
                        s.interview_count.to_string()
                    };
                    builder.push_record([
                        s.stage.number().to_string(),
                        s.stage.definition().name.to_string(),
                        self.flag(s.is_unlocked),
                        s.total_assumptions.to_string(),
                        format!(
                            "{}/{}/{}/{}",
                            s.validated_count, s.invalidated_count, s.testing_count, s.untested_count
                        ),
                        interviews,
                        format!("{:.1}", s.avg_confidence),
                        self.flag(s.can_graduate),
                    ]);
                }

                let mut out = render(builder);
                for s in statuses.values() {
                    out.push_str(&format!("\n{}: {}", s.stage, s.recommendation));
                }
                Ok(out)
            }
        }
    }

    /// Format eligibility results.
    pub fn eligibility(&self, results: &[(&Assumption, &EligibilityResult)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(a, r)| {
                        json!({
                            "assumptionId": a.id.to_string(),
                            "description": a.description,
                            "currentStatus": a.status.as_str(),
                            "canValidate": r.can_validate,
                            "suggestedStatus": r.suggested_status.as_str(),
                            "reason": r.reason,
                            "supportRatio": r.support_ratio,
                            "suggestPivot": r.suggest_pivot,
                            "supports": r.tally.supports,
                            "contradicts": r.tally.contradicts,
                            "neutral": r.tally.neutral,
                            "beachheadInterviews": r.tally.beachhead_interviews,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&items)?)
            }
            OutputFormat::Quiet => Ok(results
                .iter()
                .filter(|(_, r)| r.can_validate)
                .map(|(a, r)| format!("{} {}", a.id, r.suggested_status))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if results.is_empty() {
                    return Ok(self.colorize("No assumptions to check.", Color::Yellow));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Status", "Suggested", "S/C/N", "Support", "Reason"]);
                for (a, r) in results {
                    let support = r
                        .support_ratio
                        .map(|ratio| format!("{:.0}%", ratio * 100.0))
                        .unwrap_or_else(|| "-".to_string());
                    let mut suggested = self.status(r.suggested_status);
                    if r.suggest_pivot {
                        suggested.push_str(" (pivot?)");
                    }
                    builder.push_record([
                        short_id(&a.id.to_string()),
                        self.status(a.status),
                        suggested,
                        format!("{}/{}/{}", r.tally.supports, r.tally.contradicts, r.tally.neutral),
                        support,
                        r.reason.clone(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format interview requirements.
    pub fn requirements(&self, req: &InterviewRequirements) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "stage1Interviews": req.stage1_interviews,
                "stage1Required": req.stage1_required,
                "beachheadInterviews": req.beachhead_interviews,
                "beachheadRequired": req.beachhead_required,
                "overallProgress": req.overall_progress,
            }))?),
            OutputFormat::Quiet => Ok(format!("{:.0}", req.overall_progress)),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Requirement", "Have", "Need"]);
                builder.push_record([
                    "Stage 1 interviews".to_string(),
                    req.stage1_interviews.to_string(),
                    req.stage1_required.to_string(),
                ]);
                builder.push_record([
                    "Beachhead interviews".to_string(),
                    req.beachhead_interviews.to_string(),
                    req.beachhead_required.to_string(),
                ]);
                let summary = format!("Interview progress: {:.0}%", req.overall_progress);
                let summary = if req.is_met() {
                    self.success(&summary)
                } else {
                    self.info(&summary)
                };
                Ok(format!("{}\n{}", render(builder), summary))
            }
        }
    }

    /// Format stage-weighted progress.
    pub fn progress(&self, progress: &OverallProgress) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let stages: Vec<serde_json::Value> = progress
                    .per_stage
                    .iter()
                    .map(|s| {
                        json!({
                            "stage": s.stage.number(),
                            "weight": s.weight,
                            "completion": s.completion,
                            "contribution": s.contribution(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "percentage": progress.percentage,
                    "stages": stages,
                }))?)
            }
            OutputFormat::Quiet => Ok(format!("{:.0}", progress.percentage)),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Stage", "Weight", "Completion", "Points"]);
                for s in &progress.per_stage {
                    builder.push_record([
                        s.stage.to_string(),
                        format!("{:.0}%", s.weight * 100.0),
                        format!("{:.0}%", s.completion * 100.0),
                        format!("{:.1}", s.contribution()),
                    ]);
                }
                Ok(format!(
                    "{}\n{}",
                    render(builder),
                    self.info(&format!("Overall progress: {:.0}%", progress.percentage))
                ))
            }
        }
    }

    /// Format a beachhead readiness score.
    pub fn beachhead(&self, readiness: &BeachheadReadiness) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "score": readiness.score,
                "maxScore": BeachheadReadiness::MAX_SCORE,
                "isReady": readiness.is_ready,
            }))?),
            OutputFormat::Quiet => Ok(readiness.score.to_string()),
            OutputFormat::Table => {
                let line = format!(
                    "Readiness score {}/{}",
                    readiness.score,
                    BeachheadReadiness::MAX_SCORE
                );
                Ok(if readiness.is_ready {
                    self.success(&format!("{}: ready", line))
                } else {
                    self.warning(&format!(
                        "{}: not ready (pain and access must both be at least {})",
                        line,
                        BeachheadReadiness::READY_THRESHOLD
                    ))
                })
            }
        }
    }

    /// Format the result of creating an assumption or interview.
    pub fn created(&self, kind: &str, id: &str) -> String {
        match self.format {
            OutputFormat::Quiet => id.to_string(),
            OutputFormat::Json => json!({ "kind": kind, "id": id }).to_string(),
            OutputFormat::Table => self.success(&format!("Created {} {}", kind, id)),
        }
    }

    /// Format an accepted suggestion.
    pub fn accepted(&self, id: AssumptionId, status: AssumptionStatus) -> String {
        self.success(&format!("Marked {} as {}", short_id(&id.to_string()), status))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Color::Green)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), Color::Blue)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), Color::Yellow)
    }

    fn status(&self, status: AssumptionStatus) -> String {
        let color = match status {
            AssumptionStatus::Validated => Color::Green,
            AssumptionStatus::Invalidated => Color::Red,
            AssumptionStatus::Testing => Color::Yellow,
            AssumptionStatus::Untested => Color::White,
        };
        self.colorize(status.as_str(), color)
    }

    fn priority(&self, priority: Priority) -> String {
        let color = match priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        };
        self.colorize(priority.as_str(), color)
    }

    fn flag(&self, value: bool) -> String {
        if value {
            self.colorize("yes", Color::Green)
        } else {
            self.colorize("no", Color::Red)
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: Color) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        text.color(color).to_string()
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn join_ids(ids: impl Iterator<Item = String>) -> String {
    ids.collect::<Vec<_>>().join("\n")
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvass_domain::{AssumptionType, CanvasArea};
    use canvass_engine::{evaluate_all_stages, EngineConfig};

    fn assumption() -> Assumption {
        Assumption::new(
            AssumptionType::Problem,
            "Grad students lose track of their reading notes",
            CanvasArea::Problem,
        )
    }

    #[test]
    fn test_assumption_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let a = assumption();
        let output = formatter.assumptions(&[&a]).unwrap();
        assert!(output.contains("Priority"));
        assert!(output.contains("untested"));
        assert!(output.contains(&a.id.to_string()[..8]));
    }

    #[test]
    fn test_assumption_json_uses_file_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.assumptions(&[&assumption()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["canvasArea"], "problem");
        assert_eq!(value[0]["confidence"], 3);
    }

    #[test]
    fn test_quiet_lists_ids() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let a = assumption();
        assert_eq!(formatter.assumptions(&[&a]).unwrap(), a.id.to_string());
    }

    #[test]
    fn test_empty_lists() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(formatter.assumptions(&[]).unwrap().contains("No assumptions"));
        assert!(formatter.interviews(&[], None).unwrap().contains("No interviews"));
    }

    #[test]
    fn test_stage_table_includes_recommendations() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let statuses = evaluate_all_stages(&[assumption()], &[], &EngineConfig::default());
        let output = formatter.stages(&statuses).unwrap();
        assert!(output.contains("Customer-Problem Fit"));
        assert!(output.contains("Stage 2: Locked"));
    }

    #[test]
    fn test_stage_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let statuses = evaluate_all_stages(&[], &[], &EngineConfig::default());
        let value: serde_json::Value =
            serde_json::from_str(&formatter.stages(&statuses).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[0]["isUnlocked"], true);
        assert_eq!(value[1]["isUnlocked"], false);
    }

    #[test]
    fn test_beachhead_messages() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let ready = BeachheadReadiness::assess(
            canvass_domain::Rating::MAX,
            canvass_domain::Rating::MAX,
            canvass_domain::Rating::MIN,
        );
        assert_eq!(
            formatter.beachhead(&ready).unwrap(),
            "✓ Readiness score 16/20: ready"
        );
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
