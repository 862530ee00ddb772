//! Prompt builder: one builder for every mode, driven by the schema descriptor.

use crate::domain::swot::AnalysisSubject;

use super::{category_outline, AnalysisRequest, SchemaDescriptor, STRATEGY_MARKER};

/// Persona framing used when no market is configured.
pub const DEFAULT_MARKET: &str = "the Vietnamese food & beverage (F&B) market";

/// Opening of the schema instruction. The narrative cleaner keys on it.
pub const IMPORTANT_PREFIX: &str = "IMPORTANT:";

/// Closing instruction line asking for the trailing block.
pub const CLOSING_INSTRUCTION: &str =
    "Finally, output the JSON block exactly as requested, fenced as ```json, as the last part of your reply.";

/// Market framing for the analyst persona.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptProfile {
    pub market: String,
}

impl Default for PromptProfile {
    fn default() -> Self {
        Self {
            market: DEFAULT_MARKET.to_string(),
        }
    }
}

/// Builds the complete prompt for a request.
///
/// Pure: it never calls the model. Every prompt has the same layout:
/// persona, subjects, optional context, the structured block contract, the
/// narrative section outline, and the closing instruction.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    profile: PromptProfile,
}

impl PromptBuilder {
    pub fn new(profile: PromptProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &PromptProfile {
        &self.profile
    }

    /// Builds the prompt. Blank context is treated as absent.
    pub fn build(&self, request: &AnalysisRequest, context: Option<&str>) -> String {
        let context = context.map(str::trim).filter(|c| !c.is_empty());
        let schema = SchemaDescriptor::for_request(request, context.is_some());

        let mut prompt = String::new();
        prompt.push_str(&format!(
            "You are a business analysis expert and a data analyst working in {}.\n",
            self.profile.market
        ));
        prompt.push('\n');

        write_subjects(&mut prompt, request);

        if let Some(context) = context {
            prompt.push('\n');
            prompt.push_str(context);
            prompt.push('\n');
        }

        prompt.push('\n');
        write_tasks(&mut prompt, request, context.is_some());

        prompt.push('\n');
        prompt.push_str(&format!(
            "{} Return a JSON block at the end of your reply with exactly this format. \
             Use these key names and this nesting verbatim. Every score is an integer from 1 to 10.\n",
            IMPORTANT_PREFIX
        ));
        prompt.push_str("```json\n");
        prompt.push_str(&schema.render());
        prompt.push_str("\n```\n\n");

        write_narrative_outline(&mut prompt, request);

        prompt.push('\n');
        prompt.push_str(CLOSING_INSTRUCTION);
        prompt.push('\n');
        prompt
    }
}

fn names(subjects: &[AnalysisSubject]) -> String {
    subjects
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_subjects(prompt: &mut String, request: &AnalysisRequest) {
    match request {
        AnalysisRequest::Single { shop } => {
            prompt.push_str(&format!("SHOP TO ANALYZE: {}\n", shop.name()));
        }
        AnalysisRequest::Branch { branch } => {
            let location = branch.location_qualifier().unwrap_or_default();
            prompt.push_str("BRANCH-LEVEL ANALYSIS\n");
            prompt.push_str(&format!("- BRAND: {}\n", branch.name()));
            prompt.push_str(&format!("- BRANCH: {}\n", location));
            prompt.push('\n');
            prompt.push_str("NOTE: This analysis covers ONE SPECIFIC BRANCH, NOT the whole chain.\n");
            prompt.push_str(&format!(
                "- Analyze only the branch at \"{}\", not the {} brand as a whole.\n",
                location,
                branch.name()
            ));
            prompt.push_str(
                "- Base the analysis on the location itself: the area and its residents, traffic, \
                 nearby competitors and the customers this branch serves.\n",
            );
        }
        AnalysisRequest::Pairwise { my_shop, competitor } => {
            prompt.push_str("COMPETITOR COMPARISON\n");
            prompt.push_str(&format!("- YOUR SHOP: {}\n", my_shop.name()));
            prompt.push_str(&format!("- COMPETITOR: {}\n", competitor.name()));
        }
        AnalysisRequest::AutoDetect => {
            prompt.push_str("COMPETITOR COMPARISON FROM DATA\n");
            prompt.push_str(
                "The shop names are not given. Read the data below, identify the two shops it \
                 describes and list their names in \"detected_shops\" before scoring them.\n",
            );
            prompt.push_str(
                "Treat the first detected shop as \"my_shop\" and the second as \"competitor\".\n",
            );
        }
        AnalysisRequest::Multi {
            my_shop,
            competitors,
        } => {
            prompt.push_str("MULTI-COMPETITOR COMPARISON\n");
            prompt.push_str(&format!("- YOUR SHOP: {}\n", my_shop.name()));
            if competitors.is_empty() {
                prompt.push_str(
                    "- COMPETITORS: identify every competitor that appears in the data below.\n",
                );
            } else {
                prompt.push_str(&format!("- COMPETITORS: {}\n", names(competitors)));
            }
        }
    }
}

fn write_tasks(prompt: &mut String, request: &AnalysisRequest, has_context: bool) {
    let tasks: Vec<&str> = match request {
        AnalysisRequest::Single { .. } => vec![
            "Write a detailed SWOT analysis",
            "Score each SWOT factor from 1 to 10 based on how strong it is",
        ],
        AnalysisRequest::Branch { .. } => vec![
            "Write a detailed SWOT analysis FOR THIS BRANCH ONLY",
            "Score each SWOT factor from 1 to 10",
            "Propose strategies that fit this specific location",
        ],
        AnalysisRequest::Pairwise { .. } | AnalysisRequest::AutoDetect => vec![
            "Write a SWOT analysis for BOTH shops",
            "Compare and contrast their strengths and weaknesses",
            "Propose competitive strategies",
        ],
        AnalysisRequest::Multi { .. } => vec![
            "Write a SWOT analysis for your shop and every competitor",
            "Rank all shops by the sum of their four scores, best first",
            "Propose strategies to improve your shop's position",
        ],
    };

    prompt.push_str("TASKS:\n");
    let mut n = 0;
    for task in tasks {
        n += 1;
        prompt.push_str(&format!("{}. {}\n", n, task));
    }
    if has_context && request.mode().is_comparison() {
        n += 1;
        prompt.push_str(&format!(
            "{}. Use the data to fill the price and discount comparisons where it allows\n",
            n
        ));
    }
}

fn write_narrative_outline(prompt: &mut String, request: &AnalysisRequest) {
    prompt.push_str("Now write the detailed analysis, before the JSON block, using these sections:\n\n");

    match request {
        AnalysisRequest::Single { shop } => {
            prompt.push_str(&format!("## ANALYSIS OF {}:\n", shop.name()));
            prompt.push_str(&category_outline());
        }
        AnalysisRequest::Branch { branch } => {
            prompt.push_str(&format!("## ANALYSIS OF BRANCH \"{}\":\n", branch));
            prompt.push_str("LOCATION: area characteristics, target customers, traffic, nearby competitors\n");
            prompt.push_str(&category_outline());
        }
        AnalysisRequest::Pairwise { my_shop, competitor } => {
            for subject in [my_shop, competitor] {
                prompt.push_str(&format!("## ANALYSIS OF {}:\n", subject.name()));
                prompt.push_str(&category_outline());
                prompt.push('\n');
            }
        }
        AnalysisRequest::AutoDetect => {
            for label in ["FIRST DETECTED SHOP", "SECOND DETECTED SHOP"] {
                prompt.push_str(&format!("## ANALYSIS OF {}:\n", label));
                prompt.push_str(&category_outline());
                prompt.push('\n');
            }
        }
        AnalysisRequest::Multi {
            my_shop,
            competitors,
        } => {
            prompt.push_str(&format!("## ANALYSIS OF {}:\n", my_shop.name()));
            prompt.push_str(&category_outline());
            prompt.push('\n');
            if competitors.is_empty() {
                prompt.push_str("## ANALYSIS OF EACH COMPETITOR (one section per competitor):\n");
                prompt.push_str(&category_outline());
                prompt.push('\n');
            } else {
                for competitor in competitors {
                    prompt.push_str(&format!("## ANALYSIS OF {}:\n", competitor.name()));
                    prompt.push_str(&category_outline());
                    prompt.push('\n');
                }
            }
            prompt.push_str("## RANKING: order every shop by total score and explain it\n");
        }
    }

    if matches!(request, AnalysisRequest::Single { .. }) {
        prompt.push_str(&format!("{}: concrete recommendations\n", STRATEGY_MARKER));
    } else {
        prompt.push_str(&format!(
            "{}: competitive advantages, areas to improve and recommended strategies\n",
            STRATEGY_MARKER
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompt::category_marker;
    use crate::domain::swot::SwotCategory;

    fn builder() -> PromptBuilder {
        PromptBuilder::default()
    }

    mod layout {
        use super::*;

        #[test]
        fn persona_is_stated_once() {
            let prompt = builder().build(&AnalysisRequest::single("Cafe X").unwrap(), None);
            assert_eq!(prompt.matches("You are a business analysis expert").count(), 1);
            assert!(prompt.contains(DEFAULT_MARKET));
        }

        #[test]
        fn markers_precede_closing_instruction_and_follow_schema() {
            let prompt = builder().build(&AnalysisRequest::single("Cafe X").unwrap(), None);
            let schema_at = prompt.find("```json").unwrap();
            let strengths_at = prompt.rfind(category_marker(SwotCategory::Strengths)).unwrap();
            let strategy_at = prompt.find(STRATEGY_MARKER).unwrap();
            let closing_at = prompt.find(CLOSING_INSTRUCTION).unwrap();
            assert!(schema_at < strengths_at);
            assert!(strengths_at < strategy_at);
            assert!(strategy_at < closing_at);
            assert!(prompt.trim_end().ends_with(CLOSING_INSTRUCTION));
        }

        #[test]
        fn every_category_marker_is_requested() {
            let prompt = builder().build(&AnalysisRequest::single("Cafe X").unwrap(), None);
            for category in SwotCategory::all() {
                assert!(prompt.contains(category_marker(*category)));
            }
        }

        #[test]
        fn schema_keys_appear_verbatim() {
            let request = AnalysisRequest::multi("Mine", ["C1", "C2"]).unwrap();
            let prompt = builder().build(&request, None);
            let schema = SchemaDescriptor::for_request(&request, false);
            for field in schema.fields() {
                assert!(prompt.contains(&format!("\"{}\":", field.key)), "missing {}", field.key);
            }
            assert!(prompt.contains("integer from 1 to 10"));
        }

        #[test]
        fn custom_market_replaces_default() {
            let builder = PromptBuilder::new(PromptProfile {
                market: "the Thai street food market".to_string(),
            });
            let prompt = builder.build(&AnalysisRequest::single("Cafe X").unwrap(), None);
            assert!(prompt.contains("the Thai street food market"));
            assert!(!prompt.contains(DEFAULT_MARKET));
        }
    }

    mod context {
        use super::*;

        #[test]
        fn context_is_embedded_before_schema() {
            let prompt = builder().build(
                &AnalysisRequest::single("Cafe X").unwrap(),
                Some("DATA FROM CSV:\nRows: 3"),
            );
            let context_at = prompt.find("DATA FROM CSV:").unwrap();
            assert!(context_at < prompt.find(IMPORTANT_PREFIX).unwrap());
        }

        #[test]
        fn blank_context_is_ignored() {
            let with_blank = builder().build(&AnalysisRequest::single("Cafe X").unwrap(), Some("  \n"));
            let without = builder().build(&AnalysisRequest::single("Cafe X").unwrap(), None);
            assert_eq!(with_blank, without);
        }

        #[test]
        fn pairwise_requests_tables_only_with_context() {
            let request = AnalysisRequest::pairwise("A", "B").unwrap();
            assert!(!builder().build(&request, None).contains("price_comparison"));
            let prompt = builder().build(&request, Some("menu prices"));
            assert!(prompt.contains("\"price_comparison\""));
            assert!(prompt.contains("price and discount comparisons"));
        }
    }

    mod modes {
        use super::*;

        #[test]
        fn branch_prompt_restricts_scope_to_location() {
            let prompt =
                builder().build(&AnalysisRequest::branch("Highlands", "District 1").unwrap(), None);
            assert!(prompt.contains("ONE SPECIFIC BRANCH, NOT the whole chain"));
            assert!(prompt.contains("Analyze only the branch at \"District 1\""));
            assert!(prompt.contains("\"location_analysis\""));
        }

        #[test]
        fn pairwise_prompt_names_both_shops() {
            let prompt = builder().build(&AnalysisRequest::pairwise("Mine", "Theirs").unwrap(), None);
            assert!(prompt.contains("- YOUR SHOP: Mine"));
            assert!(prompt.contains("- COMPETITOR: Theirs"));
            assert!(prompt.contains("## ANALYSIS OF Theirs:"));
            assert!(prompt.contains("\"competitive_advantages\""));
        }

        #[test]
        fn auto_detect_prompt_asks_for_detected_shops() {
            let prompt = builder().build(&AnalysisRequest::auto_detect(), Some("shop,price\nA,1"));
            assert!(prompt.contains("identify the two shops"));
            assert!(prompt.contains("\"detected_shops\""));
        }

        #[test]
        fn multi_prompt_without_competitors_infers_them() {
            let empty: [&str; 0] = [];
            let prompt = builder().build(&AnalysisRequest::multi("Mine", empty).unwrap(), None);
            assert!(prompt.contains("identify every competitor"));
            assert!(prompt.contains("\"ranking\""));
        }

        #[test]
        fn multi_prompt_lists_named_competitors() {
            let prompt = builder().build(&AnalysisRequest::multi("Mine", ["C1", "C2"]).unwrap(), None);
            assert!(prompt.contains("- COMPETITORS: C1, C2"));
            assert!(prompt.contains("## ANALYSIS OF C2:"));
        }

        #[test]
        fn build_is_deterministic() {
            let request = AnalysisRequest::pairwise("A", "B").unwrap();
            assert_eq!(builder().build(&request, Some("ctx")), builder().build(&request, Some("ctx")));
        }
    }
}
