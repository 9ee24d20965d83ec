//! Deterministic text predicates for the decision policy
//!
//! All predicates are case-insensitive pattern matches over the
//! reconstructed sentence; none require the embedding. They are held in one
//! ordered table of named `(pattern, role, effect)` entries so that
//! precedence, additions, and unit tests live in one place instead of
//! scattered conditionals. Score adjustments are applied in table order,
//! which matters because they are additive and some patterns overlap.

use crate::api::output::ScoreVector;
use regex::Regex;

/// Separator density above which a sentence reads as a laundry list
/// (commas and conjunctions per token)
const LIST_DENSITY_THRESHOLD: f32 = 0.06;

/// Minimum separator count for the laundry-list predicate
const LIST_MIN_SEPARATORS: usize = 2;

/// How a rule participates in the decision chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleRole {
    /// Candidate for early Irrelevant classification
    IrrelevantGate,
    /// Suppresses the Irrelevant gate for sentences it matches
    GateOverride,
    /// Forces a Speculative outcome (subject to the no-action-verb guard
    /// applied by the policy)
    ForceSpeculative,
    /// Forces an Actionable outcome
    ForceActionable,
    /// Nudges similarity scores after the centroid pass
    ScoreAdjust,
}

/// Extra condition a rule's match is subject to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    None,
    /// Only fires when no strong action verb is present
    NoActionVerb,
    /// Only fires when no modal/intent verb is present
    NoModal,
}

/// Additive score deltas; negative components clamp the score at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreAdjustment {
    pub actionable: f32,
    pub speculative: f32,
    pub irrelevant: f32,
}

impl ScoreAdjustment {
    const NONE: ScoreAdjustment = ScoreAdjustment {
        actionable: 0.0,
        speculative: 0.0,
        irrelevant: 0.0,
    };

    fn apply(&self, scores: &mut ScoreVector) {
        scores.actionable = apply_delta(scores.actionable, self.actionable);
        scores.speculative = apply_delta(scores.speculative, self.speculative);
        scores.irrelevant = apply_delta(scores.irrelevant, self.irrelevant);
    }
}

fn apply_delta(score: f32, delta: f32) -> f32 {
    if delta < 0.0 {
        (score + delta).max(0.0)
    } else {
        score + delta
    }
}

#[derive(Debug)]
struct Rule {
    name: &'static str,
    pattern: Regex,
    role: RuleRole,
    guard: Guard,
    adjust: ScoreAdjustment,
}

// Pattern sources shared by rules that serve more than one role.
const FOCUS_ON_AI: &str = r"(?i)\bfocus(?:ed|es|ing)?\s+on\s+.*\b(?:ai|artificial intelligence)\b";
const INTEND_FOCUS: &str = r"(?i)\bintend(?:s|ed)?\s+to\s+focus\s+on\b";
const FUTURE_FEATURES: &str = r"(?i)\b(?:future|next\s+year|plan to|planning to|intend(?:s|ed)? to)\b.*\b(?:feature|service|module|product|capability|capabilities)\b";
const GLOBAL_SUBJECT_LAWS: &str = r"(?i)^global operations are subject to (?:complex(?:\s*(?:and|,)?\s*changing)?|changing) laws and regulations";
const LAWS_LIST_INTRO: &str = r"(?i)^(?:these|our) laws and regulations (?:involve|include)";
const UNPROVEN_INVEST: &str = r"(?i)continue\s+to\s+invest\s+in\s+new\s+and\s+unproven\s+technologies,?\s+including\s+(?:ai|artificial intelligence)";
const FUTURE_BASED_ON_AI: &str = r"(?i)\bfuture\b.*?(?:features|services).*?\bbased\s+on\b.*?(?:ai|artificial intelligence)\b";
const APPLY_LEARNINGS: &str = r"(?i)applying\s+.*\s+learnings\b";
const OPS_RISK: &str = r"(?i)\b(?:prevent\s+us\s+from\s+delivering|prevent\s+us\s+from\s+providing|user experience is diminished|affect the user experience)\b";

/// Library of deterministic text predicates.
///
/// Compiled once at construction; evaluation is allocation-free.
#[derive(Debug)]
pub struct RuleEngine {
    table: Vec<Rule>,
    action_verbs: Regex,
    modals: Regex,
    list_intro: Regex,
    category_words: Regex,
    glossary: Regex,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Build the engine with the standard rule table.
    pub fn new() -> Self {
        let rule = |name: &'static str,
                    pattern: &str,
                    role: RuleRole,
                    guard: Guard,
                    adjust: ScoreAdjustment| Rule {
            name,
            pattern: Regex::new(pattern).expect("static rule pattern"),
            role,
            guard,
            adjust,
        };
        let nudge = |a: f32, s: f32, i: f32| ScoreAdjustment {
            actionable: a,
            speculative: s,
            irrelevant: i,
        };

        let table = vec![
            // Gate overrides: never classified Irrelevant by the early gate.
            rule("focus_on_ai", FOCUS_ON_AI, RuleRole::GateOverride, Guard::None, ScoreAdjustment::NONE),
            rule("intend_focus", INTEND_FOCUS, RuleRole::GateOverride, Guard::None, ScoreAdjustment::NONE),
            rule("future_features", FUTURE_FEATURES, RuleRole::GateOverride, Guard::None, ScoreAdjustment::NONE),
            rule("global_subject_laws", GLOBAL_SUBJECT_LAWS, RuleRole::GateOverride, Guard::None, ScoreAdjustment::NONE),
            rule("unproven_invest", UNPROVEN_INVEST, RuleRole::GateOverride, Guard::None, ScoreAdjustment::NONE),
            // Irrelevant gate: generic enumerations and boilerplate.
            rule(
                "ai_infrastructure",
                r"(?i)\b(?:ai|artificial intelligence)\s+infrastructure\b",
                RuleRole::IrrelevantGate,
                Guard::None,
                ScoreAdjustment::NONE,
            ),
            rule(
                "data_leakage",
                r"(?i)data\s+leakage|unauthorized\s+exposure\s+of\s+data",
                RuleRole::IrrelevantGate,
                Guard::None,
                ScoreAdjustment::NONE,
            ),
            rule(
                "datacenter_strategy",
                r"(?i)reevaluated our data center investment strategy",
                RuleRole::IrrelevantGate,
                Guard::None,
                ScoreAdjustment::NONE,
            ),
            rule(
                "litigation_exposure",
                r"(?i)subject (?:to|of) multiple lawsuits",
                RuleRole::IrrelevantGate,
                Guard::None,
                ScoreAdjustment::NONE,
            ),
            rule(
                "decreased_engagement",
                r"(?i)\bdecreased\s+engagement\b.*\b(?:internet\s+shutdowns|taxes\s+imposed\s+on\s+the\s+use\s+of\s+social\s+media)\b",
                RuleRole::IrrelevantGate,
                Guard::None,
                ScoreAdjustment::NONE,
            ),
            rule("laws_list_intro_gate", LAWS_LIST_INTRO, RuleRole::IrrelevantGate, Guard::None, ScoreAdjustment::NONE),
            rule("future_based_on_ai_gate", FUTURE_BASED_ON_AI, RuleRole::IrrelevantGate, Guard::None, ScoreAdjustment::NONE),
            rule("apply_learnings_gate", APPLY_LEARNINGS, RuleRole::IrrelevantGate, Guard::None, ScoreAdjustment::NONE),
            rule(
                "innovating_to_build",
                r"(?i)\binnovating\s+in\s+(?:ai|artificial intelligence)(?:\s+technologies)?\b.*?\bto\s+build\b",
                RuleRole::IrrelevantGate,
                Guard::NoActionVerb,
                ScoreAdjustment::NONE,
            ),
            // Forced outcomes.
            rule("focus_on_ai_spec", FOCUS_ON_AI, RuleRole::ForceSpeculative, Guard::None, ScoreAdjustment::NONE),
            rule("intend_focus_spec", INTEND_FOCUS, RuleRole::ForceSpeculative, Guard::None, ScoreAdjustment::NONE),
            rule("future_features_spec", FUTURE_FEATURES, RuleRole::ForceSpeculative, Guard::None, ScoreAdjustment::NONE),
            rule("global_subject_laws_spec", GLOBAL_SUBJECT_LAWS, RuleRole::ForceSpeculative, Guard::None, ScoreAdjustment::NONE),
            rule("ops_risk_actionable", OPS_RISK, RuleRole::ForceActionable, Guard::NoModal, ScoreAdjustment::NONE),
            // Score adjustments, in application order.
            rule("laws_list_boost", LAWS_LIST_INTRO, RuleRole::ScoreAdjust, Guard::None, nudge(0.0, -0.08, 0.15)),
            rule(
                "offers_ml_boost",
                r"(?i)\boffers? (?:a )?broad set of .* including .* (?:machine learning|ml)\b|\b(?:provides|offer(?:s|ing)?)\b.*\b(?:machine learning|ml)\b",
                RuleRole::ScoreAdjust,
                Guard::None,
                nudge(0.12, 0.0, 0.0),
            ),
            rule(
                "estimation_boost",
                r"(?i)\brely upon? .* (?:techniques|algorithms|models).*(?:seek|seeks|aim) to estimate\b",
                RuleRole::ScoreAdjust,
                Guard::None,
                nudge(0.0, 0.12, 0.0),
            ),
            rule("future_features_boost", FUTURE_FEATURES, RuleRole::ScoreAdjust, Guard::None, nudge(-0.06, 0.0, 0.0)),
            rule("apply_learnings_boost", APPLY_LEARNINGS, RuleRole::ScoreAdjust, Guard::None, nudge(-0.08, 0.05, 0.1)),
            rule("ops_risk_boost", OPS_RISK, RuleRole::ScoreAdjust, Guard::None, nudge(0.06, 0.0, 0.0)),
            rule("unproven_invest_boost", UNPROVEN_INVEST, RuleRole::ScoreAdjust, Guard::None, nudge(0.0, 0.12, -0.06)),
            rule("future_based_on_ai_boost", FUTURE_BASED_ON_AI, RuleRole::ScoreAdjust, Guard::None, nudge(-0.06, 0.0, 0.12)),
            rule(
                "develop_deploy_boost",
                r"(?i)develop(?:ing)?\s+and\s+deploy(?:ing)?\s+ai",
                RuleRole::ScoreAdjust,
                Guard::None,
                nudge(0.1, 0.0, 0.0),
            ),
            rule("global_laws_boost", GLOBAL_SUBJECT_LAWS, RuleRole::ScoreAdjust, Guard::None, nudge(0.0, 0.12, -0.08)),
        ];

        Self {
            table,
            action_verbs: Regex::new(
                r"(?i)\b(?:launch(?:ed|es|ing)?|deploy(?:ed|s|ing)?|operat(?:e|es|ing)|run(?:ning|s)?|buil(?:d|ds|t|ding)|appl(?:y|ies|ied)|recommend(?:s|ing)?|develop(?:ed|s|ing)?|deliver(?:ed|s|ing)?|improv(?:e|es|ing)|optimiz(?:e|es|ing)|implement(?:ed|s|ing)?|us(?:e|es|ing)|serv(?:e|es|ing)|support(?:s|ing)?)\b",
            )
            .expect("static action verb pattern"),
            modals: Regex::new(
                r"(?i)\b(?:may|might|could|would|should|plan to|planning to|intend(?:s|ed)? to|aim to|expect to|will|explor(?:e|es|ing)|evaluat(?:e|es|ing))\b",
            )
            .expect("static modal pattern"),
            list_intro: Regex::new(r"(?i)\b(?:including|such as|among other)\b")
                .expect("static list intro pattern"),
            category_words: Regex::new(
                r"(?i)\b(?:technolog(?:y|ies)|regulations?|laws?|products?|services?|solutions?|platforms?|applications?|systems?|capabilities|tools)\b",
            )
            .expect("static category word pattern"),
            glossary: Regex::new(
                r"(?i)\b(?:is defined as|ha(?:s|ve) the meanings?|for purposes of this)\b",
            )
            .expect("static glossary pattern"),
        }
    }

    /// Whether the sentence contains a strong action verb
    pub fn has_action_verb(&self, text: &str) -> bool {
        self.action_verbs.is_match(text)
    }

    /// Whether the sentence contains a modal/intent verb
    pub fn has_modal(&self, text: &str) -> bool {
        self.modals.is_match(text)
    }

    /// Forced-Speculative cue: modal/intent language without a strong action
    /// verb, or one of the explicit focus/future patterns. The decision
    /// policy applies an additional no-action-verb guard before committing.
    pub fn forces_speculative(&self, text: &str) -> bool {
        (self.has_modal(text) && !self.has_action_verb(text))
            || self.matches_role(text, RuleRole::ForceSpeculative)
    }

    /// Forced-Actionable cue: an ops-risk phrase without modal language
    pub fn forces_actionable(&self, text: &str) -> bool {
        self.matches_role(text, RuleRole::ForceActionable)
    }

    /// Whether an override pattern suppresses the Irrelevant gate
    pub fn suppresses_gate(&self, text: &str) -> bool {
        self.matches_role(text, RuleRole::GateOverride)
    }

    /// Early Irrelevant gate.
    ///
    /// Returns false whenever a gate-override pattern matches, regardless of
    /// which gate predicate would otherwise fire.
    pub fn gates_irrelevant(&self, text: &str) -> bool {
        if self.suppresses_gate(text) {
            return false;
        }
        self.matches_role(text, RuleRole::IrrelevantGate)
            || self.is_structurally_irrelevant(text)
            || self.is_laundry_list(text)
    }

    /// Apply every matching score-adjustment rule exactly once, in table
    /// order.
    pub fn adjust_scores(&self, text: &str, mut scores: ScoreVector) -> ScoreVector {
        for rule in self
            .table
            .iter()
            .filter(|r| r.role == RuleRole::ScoreAdjust)
        {
            if self.rule_fires(rule, text) {
                rule.adjust.apply(&mut scores);
            }
        }
        scores
    }

    /// Names of the rules that fire for a sentence, in table order.
    /// Diagnostic aid; not used by the decision chain itself.
    pub fn matching_rules(&self, text: &str) -> Vec<&'static str> {
        self.table
            .iter()
            .filter(|r| self.rule_fires(r, text))
            .map(|r| r.name)
            .collect()
    }

    fn matches_role(&self, text: &str, role: RuleRole) -> bool {
        self.table
            .iter()
            .filter(|r| r.role == role)
            .any(|r| self.rule_fires(r, text))
    }

    fn rule_fires(&self, rule: &Rule, text: &str) -> bool {
        if !rule.pattern.is_match(text) {
            return false;
        }
        match rule.guard {
            Guard::None => true,
            Guard::NoActionVerb => !self.has_action_verb(text),
            Guard::NoModal => !self.has_modal(text),
        }
    }

    /// All-uppercase headings, colon-terminated lead-ins, and
    /// glossary/definition language
    fn is_structurally_irrelevant(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.ends_with(':') {
            return true;
        }
        let has_alpha = trimmed.chars().any(|c| c.is_alphabetic());
        let all_upper = has_alpha && !trimmed.chars().any(|c| c.is_lowercase());
        all_upper || self.glossary.is_match(trimmed)
    }

    /// Laundry list: a list-introducing phrase plus a category noun plus
    /// high comma/conjunction density, with no strong action verb to anchor
    /// the sentence.
    fn is_laundry_list(&self, text: &str) -> bool {
        if self.has_action_verb(text) {
            return false;
        }
        if !self.list_intro.is_match(text) || !self.category_words.is_match(text) {
            return false;
        }
        let tokens = text.split_whitespace().count();
        if tokens == 0 {
            return false;
        }
        let lower = text.to_lowercase();
        let separators = text.matches(',').count()
            + lower.matches(" and ").count()
            + lower.matches(" or ").count();
        separators >= LIST_MIN_SEPARATORS
            && separators as f32 / tokens as f32 >= LIST_DENSITY_THRESHOLD
    }
}
