//! Prompt assembly for generative tasks.
//!
//! Every generative request carries the same tutor preamble followed by a
//! task-specific instruction block. The templates pin down output shape
//! (word ceilings, item counts, option labels) so downstream consumers can
//! rely on stable response characteristics across model upgrades.

use strix_core::task::TaskKind;

/// Shared instructional preamble sent ahead of every task template.
pub const PREAMBLE: &str = "You are an AI tutor that helps students learn effectively. Below are examples of how you should respond:

- If the user provides study material, generate a **concise summary**.
- If the user asks for flashcards, extract **key terms and definitions**.
- If the user asks for a quiz, create **multiple-choice questions** from the provided content.

Now process the following request:";

fn summarization_body(input: &str) -> String {
    format!(
        "Summarize the following text while maintaining a neutral, general explanation.\n\
         Keep the summary under **40 words** for clarity.\n\
         \n\
         Text: \"{input}\""
    )
}

fn flashcards_body(input: &str) -> String {
    format!(
        "Generate exactly **five** concise flashcards based on the topic.\n\
         Each flashcard should include:\n\
         - A **term** (bolded).\n\
         - A **brief definition** (15 words max).\n\
         \n\
         Topic: \"{input}\""
    )
}

fn quiz_body(input: &str) -> String {
    format!(
        "Create a **3-question multiple-choice quiz** based on the given topic.\n\
         Each question should have **exactly four answer choices (A, B, C, D)**.\n\
         Mark the correct answer clearly **in parentheses** at the end.\n\
         \n\
         Topic: \"{input}\""
    )
}

/// Build the full prompt for a task: preamble, blank line, task template.
pub fn build_prompt(kind: TaskKind, input: &str) -> String {
    let body = match kind {
        TaskKind::Summarization => summarization_body(input),
        TaskKind::Flashcards => flashcards_body(input),
        TaskKind::Quiz => quiz_body(input),
    };
    format!("{PREAMBLE}\n\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prompt_starts_with_the_preamble() {
        for kind in TaskKind::ALL {
            let prompt = build_prompt(kind, "osmosis");
            assert!(prompt.starts_with(PREAMBLE), "{kind} prompt lost the preamble");
            assert!(prompt.contains("\"osmosis\""), "{kind} prompt lost the payload");
        }
    }

    #[test]
    fn summarization_states_the_word_ceiling() {
        let prompt = build_prompt(TaskKind::Summarization, "the krebs cycle");
        assert!(prompt.contains("under **40 words**"));
        assert!(prompt.contains("Text: \"the krebs cycle\""));
    }

    #[test]
    fn flashcards_pin_the_cardinality_and_shape() {
        let prompt = build_prompt(TaskKind::Flashcards, "ohm's law");
        assert!(prompt.contains("exactly **five**"));
        assert!(prompt.contains("**term** (bolded)"));
        assert!(prompt.contains("15 words max"));
    }

    #[test]
    fn quiz_pins_question_and_option_counts() {
        let prompt = build_prompt(TaskKind::Quiz, "world war i");
        assert!(prompt.contains("**3-question multiple-choice quiz**"));
        assert!(prompt.contains("(A, B, C, D)"));
        assert!(prompt.contains("**in parentheses**"));
    }
}
