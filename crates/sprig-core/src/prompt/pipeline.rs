//! Validation/parse pipeline
//!
//! Pure over its inputs: callers own redisplaying prompts on failure.

use crate::error::PromptError;
use crate::question::{AnswerMap, Question, Value};

/// Run the question's parser and validators against a candidate value.
///
/// The parser is skipped for multiselect questions, whose menu and fallback
/// paths yield values directly. Validators run in order against the raw
/// input plus a trial answer map that already contains the candidate under
/// the question's key; the first failure short-circuits the rest.
pub(crate) fn resolve(
    question: &Question,
    raw: &str,
    candidate: Value,
    answers: &AnswerMap,
) -> Result<Value, PromptError> {
    let candidate = match &question.parser {
        Some(parser) if !question.multiselect => {
            parser(raw, answers).map_err(PromptError::Validation)?
        }
        _ => candidate,
    };

    if !question.validators.is_empty() {
        let mut trial = answers.clone();
        trial.insert(question.key.clone(), candidate.clone());

        for validator in &question.validators {
            let (valid, message) = validator.check(raw, &trial);
            if !valid {
                return Err(PromptError::Validation(
                    message.unwrap_or_else(|| "invalid value.".to_string()),
                ));
            }
        }
    }

    Ok(candidate)
}
