//! Tag index - the assumption/interview relation, inverted
//!
//! Interviews carry their assumption tags inline, so finding every tag for
//! one assumption means scanning every interview. The index does that scan
//! once per evaluation pass and answers lookups from a map afterwards.

use canvass_domain::{AssumptionId, AssumptionTag, Interview, InterviewId};
use std::collections::{HashMap, HashSet};

/// One tag together with the interview that carries it
#[derive(Debug, Clone, Copy)]
pub struct TaggedInterview<'a> {
    /// The interview
    pub interview: &'a Interview,
    /// The tag on that interview
    pub tag: &'a AssumptionTag,
}

/// Assumption id -> tags (with their interviews), built from a snapshot
#[derive(Debug, Default)]
pub struct TagIndex<'a> {
    by_assumption: HashMap<AssumptionId, Vec<TaggedInterview<'a>>>,
}

impl<'a> TagIndex<'a> {
    /// Index every tag of every interview
    pub fn build(interviews: &'a [Interview]) -> Self {
        let mut by_assumption: HashMap<AssumptionId, Vec<TaggedInterview<'a>>> = HashMap::new();
        for interview in interviews {
            for tag in &interview.assumption_tags {
                by_assumption
                    .entry(tag.assumption_id)
                    .or_default()
                    .push(TaggedInterview { interview, tag });
            }
        }
        Self { by_assumption }
    }

    /// Every tag pointing at an assumption, in interview order
    pub fn tags_for(&self, assumption_id: AssumptionId) -> &[TaggedInterview<'a>] {
        self.by_assumption
            .get(&assumption_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct interviews tagging at least one of the given assumptions
    pub fn interviews_tagging_any<I>(&self, assumption_ids: I) -> HashSet<InterviewId>
    where
        I: IntoIterator<Item = AssumptionId>,
    {
        assumption_ids
            .into_iter()
            .flat_map(|id| self.tags_for(id).iter().map(|t| t.interview.id))
            .collect()
    }
}
