//! Prompt templates for the debate flow

/// Instruction framing round 1 when the caller supplies none.
pub const DEFAULT_INITIAL_INSTRUCTION: &str = "Give your initial, independent opinion on the topic below. \
Take a clear position and support it with concrete reasoning and examples.";

/// Returned by synthesis when every model failed.
pub const SYNTHESIS_FALLBACK: &str = "Synthesis failed: none of the participating models could \
produce a final summary. Please review the round-by-round transcript above for the individual positions.";

/// Templates for generating prompts at each stage
pub struct DebatePromptTemplate;

impl DebatePromptTemplate {
    /// System prompt for every debate round
    pub fn participant_system() -> &'static str {
        r#"You are an expert taking part in a structured, multi-round debate with other AI models.
State your position clearly and back it with reasoning.
When earlier rounds are shown, engage with the specific arguments other participants made:
agree where they are right, push back where they are wrong, and say why.
Be concise and concrete."#
    }

    /// User prompt for round 1
    pub fn initial_prompt(topic: &str, instruction: Option<&str>) -> String {
        let instruction = instruction
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_INITIAL_INSTRUCTION);

        format!(
            r#"{}

Topic:
{}"#,
            instruction, topic
        )
    }

    /// User prompt for rounds 2 and later
    pub fn round_prompt(topic: &str, history: &str, round: u32, total_rounds: u32) -> String {
        format!(
            r#"Topic:
{}

Here is the debate so far:

{}
This is round {} of {}.
Critique, build upon, or refute specific points made above. Name the participant whose point you are addressing.
Then state your refined position on the topic."#,
            topic, history, round, total_rounds
        )
    }

    /// System prompt for the synthesis step
    pub fn synthesis_system() -> &'static str {
        r#"You are a neutral moderator summarizing a multi-round debate between AI models.
Weigh arguments on their merits, not on how often they were repeated.
Be balanced, specific and actionable."#
    }

    /// User prompt for synthesis
    pub fn synthesis_prompt(topic: &str, history: &str) -> String {
        format!(
            r#"Topic:
{}

Full debate transcript:

{}
Based on the debate above, provide:

1. **Consensus**: Points the participants agreed on

2. **Disagreements**: Where they disagreed, and which position is better supported and why

3. **Conclusion**: A clear, actionable conclusion on the topic

Format your response with markdown headers."#,
            topic, history
        )
    }
}
