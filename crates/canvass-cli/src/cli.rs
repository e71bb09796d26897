//! CLI command definitions and argument parsing.

use canvass_domain::{AssumptionStatus, AssumptionType, CanvasArea, IntervieweeType, ValidationEffect};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Canvass - track customer-discovery assumptions and the interviews that test them.
#[derive(Debug, Parser)]
#[command(name = "canvass")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project file
    #[arg(
        short,
        long,
        env = "CANVASS_PROJECT",
        default_value = "canvass.json",
        global = true
    )]
    pub project: PathBuf,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs and bare values)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new project file
    Init(InitArgs),

    /// Manage assumptions
    #[command(subcommand)]
    Assumption(AssumptionAction),

    /// Record and tag interviews
    #[command(subcommand)]
    Interview(InterviewAction),

    /// Show the three validation stages
    Stages,

    /// Check whether assumptions can be validated or invalidated
    Check(CheckArgs),

    /// Show stage 1 and beachhead interview coverage
    Requirements,

    /// Show stage-weighted overall progress
    Progress,

    /// Score a beachhead segment candidate
    Beachhead(BeachheadArgs),

    /// Recompute cached interview counts
    Recount,
}

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name
    pub name: String,

    /// Beachhead segment
    #[arg(short, long)]
    pub beachhead: Option<String>,

    /// Replace an existing project file
    #[arg(long)]
    pub force: bool,
}

/// Assumption management actions.
#[derive(Debug, Subcommand)]
pub enum AssumptionAction {
    /// Add an assumption
    Add {
        /// The belief to test
        description: String,
        /// Assumption type
        #[arg(short = 't', long = "type", value_enum, default_value = "problem")]
        kind: TypeArg,
        /// Canvas area (e.g. problem, customerSegments, "unique value proposition")
        #[arg(short, long, value_parser = parse_area)]
        area: CanvasArea,
        /// Validation stage, when it should differ from the area's stage
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=3))]
        stage: Option<u8>,
        /// Confidence 1-5
        #[arg(long)]
        confidence: Option<i64>,
        /// Importance 1-5
        #[arg(long)]
        importance: Option<i64>,
    },

    /// List assumptions
    List {
        /// Only assumptions counting toward this stage
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=3))]
        stage: Option<u8>,
        /// Only assumptions with this status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Sort by risk score, riskiest first
        #[arg(long)]
        by_risk: bool,
    },

    /// Show one assumption with its evidence
    Show {
        /// Assumption id or unique prefix
        id: String,
    },

    /// Change an assumption's status
    Status {
        /// Assumption id or unique prefix
        id: String,
        /// New status
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Change confidence and/or importance
    Rate {
        /// Assumption id or unique prefix
        id: String,
        /// Confidence 1-5
        #[arg(long)]
        confidence: Option<i64>,
        /// Importance 1-5
        #[arg(long)]
        importance: Option<i64>,
    },

    /// Append an evidence note
    Evidence {
        /// Assumption id or unique prefix
        id: String,
        /// Note text
        note: String,
    },

    /// Delete an assumption and its interview tags
    Delete {
        /// Assumption id or unique prefix
        id: String,
    },
}

/// Interview actions.
#[derive(Debug, Subcommand)]
pub enum InterviewAction {
    /// Record an interview
    Add {
        /// Segment the interviewee belongs to
        segment: String,
        /// Interviewee type
        #[arg(short = 't', long = "type", value_enum, default_value = "customer")]
        kind: IntervieweeArg,
        /// Date, as free text
        #[arg(short, long, default_value = "")]
        date: String,
        /// Where and how it happened
        #[arg(long, default_value = "")]
        context: String,
        /// Pain points raised
        #[arg(long, default_value = "")]
        pain_points: String,
        /// Alternatives they use today
        #[arg(long, default_value = "")]
        alternatives: String,
        /// Problem importance 1-5
        #[arg(long)]
        importance: Option<i64>,
        /// Memorable quote (repeatable)
        #[arg(short, long = "quote")]
        quotes: Vec<String>,
        /// Save as a draft
        #[arg(long)]
        draft: bool,
    },

    /// List interviews
    List,

    /// Tag an interview with an assumption
    Tag {
        /// Interview id or unique prefix
        interview: String,
        /// Assumption id or unique prefix
        assumption: String,
        /// How the interview bears on the assumption
        #[arg(value_enum)]
        effect: EffectArg,
        /// Confidence nudge, -2 to 2
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        change: i64,
        /// Supporting quote, added to the assumption's evidence
        #[arg(short, long)]
        quote: Option<String>,
    },

    /// Delete an interview
    Delete {
        /// Interview id or unique prefix
        id: String,
    },
}

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Assumption id or unique prefix; every assumption when omitted
    pub assumption: Option<String>,

    /// Apply the suggested status when the evidence allows it
    #[arg(long)]
    pub accept: bool,
}

/// Arguments for the beachhead command.
#[derive(Debug, Args)]
pub struct BeachheadArgs {
    /// How painful the problem is for the segment, 1-5
    #[arg(long)]
    pub pain: i64,

    /// How easy the segment is to reach, 1-5
    #[arg(long)]
    pub access: i64,

    /// How willing the segment is to pay, 1-5
    #[arg(long)]
    pub willingness: i64,

    /// Record this segment as the project's beachhead
    #[arg(long)]
    pub set: Option<String>,
}

/// Assumption type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TypeArg {
    /// Who the customer is
    Customer,
    /// What problem they have
    Problem,
    /// Whether the solution fits
    Solution,
}

/// Assumption status argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StatusArg {
    /// Not yet tested
    Untested,
    /// Being tested
    Testing,
    /// Supported by evidence
    Validated,
    /// Contradicted by evidence
    Invalidated,
}

/// Interviewee type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum IntervieweeArg {
    /// Prospective customer
    Customer,
    /// Potential partner
    Partner,
    /// Regulator
    Regulator,
    /// Domain expert
    Expert,
    /// Anyone else
    Other,
}

/// Validation effect argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum EffectArg {
    /// Backs the assumption
    Supports,
    /// Argues against it
    Contradicts,
    /// No signal
    Neutral,
}

fn parse_area(s: &str) -> Result<CanvasArea, String> {
    s.parse::<CanvasArea>().map_err(|e| e.to_string())
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<TypeArg> for AssumptionType {
    fn from(kind: TypeArg) -> Self {
        match kind {
            TypeArg::Customer => AssumptionType::Customer,
            TypeArg::Problem => AssumptionType::Problem,
            TypeArg::Solution => AssumptionType::Solution,
        }
    }
}

impl From<StatusArg> for AssumptionStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Untested => AssumptionStatus::Untested,
            StatusArg::Testing => AssumptionStatus::Testing,
            StatusArg::Validated => AssumptionStatus::Validated,
            StatusArg::Invalidated => AssumptionStatus::Invalidated,
        }
    }
}

impl From<IntervieweeArg> for IntervieweeType {
    fn from(kind: IntervieweeArg) -> Self {
        match kind {
            IntervieweeArg::Customer => IntervieweeType::Customer,
            IntervieweeArg::Partner => IntervieweeType::Partner,
            IntervieweeArg::Regulator => IntervieweeType::Regulator,
            IntervieweeArg::Expert => IntervieweeType::Expert,
            IntervieweeArg::Other => IntervieweeType::Other,
        }
    }
}

impl From<EffectArg> for ValidationEffect {
    fn from(effect: EffectArg) -> Self {
        match effect {
            EffectArg::Supports => ValidationEffect::Supports,
            EffectArg::Contradicts => ValidationEffect::Contradicts,
            EffectArg::Neutral => ValidationEffect::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_defaults_to_local_file() {
        let cli = Cli::parse_from(["canvass", "stages"]);
        assert!(matches!(cli.command, Command::Stages));
        assert_eq!(cli.verbose, 0);
        if std::env::var_os("CANVASS_PROJECT").is_none() {
            assert_eq!(cli.project, PathBuf::from("canvass.json"));
        }
    }

    #[test]
    fn test_assumption_add() {
        let cli = Cli::parse_from([
            "canvass",
            "assumption",
            "add",
            "Students lose notes",
            "--area",
            "customer segments",
            "--type",
            "customer",
            "--confidence",
            "2",
        ]);
        match cli.command {
            Command::Assumption(AssumptionAction::Add {
                area,
                kind,
                confidence,
                stage,
                ..
            }) => {
                assert_eq!(area, CanvasArea::CustomerSegments);
                assert!(matches!(kind, TypeArg::Customer));
                assert_eq!(confidence, Some(2));
                assert_eq!(stage, None);
            }
            other => panic!("Expected assumption add, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_area_rejected() {
        let result = Cli::try_parse_from(["canvass", "assumption", "add", "x", "--area", "vibes"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stage_out_of_range_rejected() {
        let result = Cli::try_parse_from([
            "canvass", "assumption", "add", "x", "--area", "problem", "--stage", "4",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_tag_with_negative_change() {
        let cli = Cli::parse_from([
            "canvass",
            "interview",
            "tag",
            "0190",
            "0191",
            "contradicts",
            "--change",
            "-2",
        ]);
        match cli.command {
            Command::Interview(InterviewAction::Tag { change, effect, .. }) => {
                assert_eq!(change, -2);
                assert!(matches!(effect, EffectArg::Contradicts));
            }
            other => panic!("Expected interview tag, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["canvass", "progress", "--format", "json", "-vv", "--no-color"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn test_conversions() {
        let status: AssumptionStatus = StatusArg::Invalidated.into();
        assert_eq!(status, AssumptionStatus::Invalidated);
        let effect: ValidationEffect = EffectArg::Neutral.into();
        assert_eq!(effect, ValidationEffect::Neutral);
    }
}
