//! Question model and answer map
//!
//! A `Question` is an immutable description of one prompt: key, display text,
//! optional default (literal or derived from earlier answers), optional choice
//! list, multiselect flag, optional parser, and an ordered validator list.
//! Questions are constructed once per run by the caller and never mutated.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// An accepted answer value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    List(Vec<String>),
    Bool(bool),
    Int(i64),
}

impl Value {
    /// String slice view, for single-valued answers.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// List view, for multiselect answers.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value counts as a usable default.
    ///
    /// Empty strings and empty lists are treated the same as an absent
    /// default: empty input against them is rejected, not accepted.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Bool(_) | Value::Int(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::List(items) => f.write_str(&items.join(", ")),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

/// Ordered, append-only mapping from question key to accepted value.
///
/// Insertion order is preserved so later questions observe earlier answers
/// in collection order. Owned exclusively by the orchestrator during one
/// `collect` call; validators and default functions receive shared views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerMap {
    entries: Vec<(String, Value)>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert an answer, replacing any existing entry for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AnswerMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One selectable option: a stable value plus an optional display label.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: String,
    pub label: Option<String>,
}

impl Choice {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    /// Display text: the label, falling back to the value.
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// A question default: either a literal value or a function of the answers
/// collected so far.
pub enum DefaultValue {
    Literal(Value),
    Derived(Box<dyn Fn(&AnswerMap) -> Value>),
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            DefaultValue::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Outcome of one validator: pass/fail plus an optional message.
pub type Verdict = (bool, Option<String>);

/// A predicate-with-message gating acceptance of a candidate value.
///
/// `WithAnswers` validators see the raw input plus a trial answer map that
/// already contains the candidate under the question's key; `Simple`
/// validators see only the raw input. Both conventions are supported so
/// context-free validators stay trivially reusable across questions.
pub enum Validator {
    Simple(Box<dyn Fn(&str) -> Verdict>),
    WithAnswers(Box<dyn Fn(&str, &AnswerMap) -> Verdict>),
}

impl Validator {
    pub fn simple(f: impl Fn(&str) -> Verdict + 'static) -> Self {
        Validator::Simple(Box::new(f))
    }

    pub fn with_answers(f: impl Fn(&str, &AnswerMap) -> Verdict + 'static) -> Self {
        Validator::WithAnswers(Box::new(f))
    }

    pub(crate) fn check(&self, raw: &str, trial: &AnswerMap) -> Verdict {
        match self {
            Validator::Simple(f) => f(raw),
            Validator::WithAnswers(f) => f(raw, trial),
        }
    }
}

/// Parser converting raw textual input into a typed candidate value.
/// Failures are recoverable: the prompt is redisplayed.
pub type Parser = Box<dyn Fn(&str, &AnswerMap) -> Result<Value, String>>;

/// Immutable description of one question.
pub struct Question {
    pub key: String,
    pub prompt: String,
    pub help: Option<String>,
    pub default: Option<DefaultValue>,
    pub choices: Vec<Choice>,
    pub multiselect: bool,
    pub parser: Option<Parser>,
    pub validators: Vec<Validator>,
}

impl Question {
    pub fn new(key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prompt: prompt.into(),
            help: None,
            default: None,
            choices: Vec::new(),
            multiselect: false,
            parser: None,
            validators: Vec::new(),
        }
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    pub fn default_with(mut self, f: impl Fn(&AnswerMap) -> Value + 'static) -> Self {
        self.default = Some(DefaultValue::Derived(Box::new(f)));
        self
    }

    pub fn choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.choices = choices.into_iter().collect();
        self
    }

    pub fn multiselect(mut self, yes: bool) -> Self {
        self.multiselect = yes;
        self
    }

    pub fn parser(
        mut self,
        f: impl Fn(&str, &AnswerMap) -> Result<Value, String> + 'static,
    ) -> Self {
        self.parser = Some(Box::new(f));
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Resolve the default against the answers collected so far.
    pub fn resolve_default(&self, answers: &AnswerMap) -> Option<Value> {
        match &self.default {
            Some(DefaultValue::Literal(value)) => Some(value.clone()),
            Some(DefaultValue::Derived(f)) => Some(f(answers)),
            None => None,
        }
    }

    /// Whether this question qualifies for the compact inline picker.
    pub(crate) fn inline_eligible(&self) -> bool {
        self.choices.len() == 2 && !self.multiselect
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("key", &self.key)
            .field("prompt", &self.prompt)
            .field("choices", &self.choices.len())
            .field("multiselect", &self.multiselect)
            .finish_non_exhaustive()
    }
}
