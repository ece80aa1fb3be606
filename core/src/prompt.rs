// The JSON key names in the output contract are parsed downstream; keep them stable.

use crate::timeframe::Timeframe;

/// Already-formatted sections that get slotted into the template.
#[derive(Debug, Clone)]
pub struct PromptSections {
    pub personal_info: String,
    pub current_skill: String,
    pub goals: String,
    pub resources: String,
}

pub fn build_prompt(timeframe: Timeframe, sections: &PromptSections) -> String {
    let tf = timeframe.as_str();
    let horizon = timeframe.describe();

    format!(
        "You are an encouraging learning coach who uses the WOOP method \
(Wish, Outcome, Obstacle, Plan) to help people turn learning goals into action.\n\
\n\
Create a personalized WOOP report for the learner described below.\n\
\n\
Personal information:\n\
{personal}\n\
\n\
Current skill level:\n\
{skill}\n\
\n\
Learning goals:\n\
{goals}\n\
\n\
Timeframe: {tf} ({horizon})\n\
\n\
Matched learning resources:\n\
{resources}\n\
\n\
Instructions:\n\
- Wish: state in 3-6 words what the learner wants to achieve within the \"{tf}\" timeframe.\n\
- Outcome: state in 3-6 words the best outcome the learner will experience once the wish is fulfilled.\n\
- Obstacle: state in 3-6 words the main inner obstacle (a habit, emotion or belief) that could hold the learner back.\n\
- Plan: write one If-Then plan in the form \"If [obstacle], then I will [action].\" The action must reference at least one of the matched learning resources by title when resources are available.\n\
\n\
Output format:\n\
Respond with a single compact JSON object with exactly these keys: \
\"wish\", \"bestOutcome\", \"innerObstacle\", \"plan\". \
All values must be strings. Do not wrap the JSON in markdown and do not add any extra commentary.",
        personal = sections.personal_info,
        skill = sections.current_skill,
        goals = sections.goals,
        tf = tf,
        horizon = horizon,
        resources = sections.resources,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> PromptSections {
        PromptSections {
            personal_info: "Jane, 28".into(),
            current_skill: "intermediate".into(),
            goals: "1. Learn Go".into(),
            resources: "1. Tour of Go".into(),
        }
    }

    #[test]
    fn embeds_every_section_and_the_timeframe() {
        let prompt = build_prompt(Timeframe::FourWeeks, &sections());
        assert!(prompt.contains("Personal information:\nJane, 28\n"));
        assert!(prompt.contains("Current skill level:\nintermediate\n"));
        assert!(prompt.contains("Learning goals:\n1. Learn Go\n"));
        assert!(prompt.contains("Matched learning resources:\n1. Tour of Go\n"));
        assert!(prompt.contains("Timeframe: 4w (the next 4 weeks)"));
        assert!(prompt.contains("within the \"4w\" timeframe"));
    }

    #[test]
    fn states_the_json_output_contract() {
        let prompt = build_prompt(Timeframe::None, &sections());
        assert!(prompt.contains("\"wish\", \"bestOutcome\", \"innerObstacle\", \"plan\""));
        assert!(prompt.contains("3-6 words"));
        assert!(prompt.contains("If-Then plan"));
        assert!(prompt.ends_with("do not add any extra commentary."));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(
            build_prompt(Timeframe::Months, &sections()),
            build_prompt(Timeframe::Months, &sections())
        );
    }
}
