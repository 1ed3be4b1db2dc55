//! Parsed command input contract.
//!
//! These types are produced by the external parser and consumed here. A noun
//! phrase carries the head word, any modifiers, the raw text, and the
//! all/list/exclusion markers for multi-object commands.

use serde::{Deserialize, Serialize};

/// A pronoun the parser recognized in place of a noun phrase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pronoun {
    /// "it" - neuter singular.
    It,
    /// "him" - masculine singular.
    Him,
    /// "her" - feminine singular.
    Her,
    /// "them" - plural.
    Them,
}

/// A parsed object reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NounPhrase {
    /// The raw text of the phrase (e.g., "the brass lamp").
    pub text: String,
    /// The head noun (e.g., "lamp").
    pub head: String,
    /// Modifier words used for disambiguation (e.g., "brass").
    pub modifiers: Vec<String>,
    /// "take all".
    pub is_all: bool,
    /// "take lamp and key".
    pub is_list: bool,
    /// Item words of a list command.
    pub list_items: Vec<String>,
    /// Exclusions of an "all but X" command.
    pub exclusions: Vec<String>,
    /// Set when the phrase was a bare pronoun.
    pub pronoun: Option<Pronoun>,
}

impl NounPhrase {
    /// Creates a noun phrase with just a head word.
    #[must_use]
    pub fn new(head: impl Into<String>) -> Self {
        let head = head.into();
        Self {
            text: head.clone(),
            head,
            ..Self::default()
        }
    }

    /// Creates a bare pronoun phrase.
    #[must_use]
    pub fn pronoun(pronoun: Pronoun) -> Self {
        let word = match pronoun {
            Pronoun::It => "it",
            Pronoun::Him => "him",
            Pronoun::Her => "her",
            Pronoun::Them => "them",
        };
        Self {
            text: word.to_string(),
            head: word.to_string(),
            pronoun: Some(pronoun),
            ..Self::default()
        }
    }

    /// Creates an "all" phrase, optionally with exclusions.
    #[must_use]
    pub fn all(exclusions: Vec<String>) -> Self {
        Self {
            text: "all".to_string(),
            head: "all".to_string(),
            is_all: true,
            exclusions,
            ..Self::default()
        }
    }

    /// Creates a list phrase ("X and Y").
    #[must_use]
    pub fn list(items: Vec<String>) -> Self {
        Self {
            text: items.join(" and "),
            head: String::new(),
            is_list: true,
            list_items: items,
            ..Self::default()
        }
    }

    /// Adds a modifier word.
    #[must_use]
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        let modifier = modifier.into();
        self.text = format!("{modifier} {}", self.text);
        self.modifiers.push(modifier);
        self
    }

    /// Whether this phrase expands to multiple objects.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.is_all || self.is_list
    }
}

/// A syntactically parsed player command, as handed over by the parser.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// The raw player input.
    pub raw_input: String,
    /// The action id the parser resolved the verb to.
    pub action: String,
    /// Direct object phrase, if present.
    pub direct_object: Option<NounPhrase>,
    /// Indirect object phrase, if present.
    pub indirect_object: Option<NounPhrase>,
    /// Preposition between the objects, if present.
    pub preposition: Option<String>,
}

impl ParsedCommand {
    /// Creates a command with just an action id.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        let action = action.into();
        Self {
            raw_input: action.clone(),
            action,
            ..Self::default()
        }
    }

    /// Sets the raw input text.
    #[must_use]
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.raw_input = input.into();
        self
    }

    /// Sets the direct object phrase.
    #[must_use]
    pub fn with_direct(mut self, phrase: NounPhrase) -> Self {
        self.direct_object = Some(phrase);
        self
    }

    /// Sets the indirect object phrase.
    #[must_use]
    pub fn with_indirect(mut self, phrase: NounPhrase) -> Self {
        self.indirect_object = Some(phrase);
        self
    }

    /// Sets the preposition.
    #[must_use]
    pub fn with_preposition(mut self, preposition: impl Into<String>) -> Self {
        self.preposition = Some(preposition.into());
        self
    }
}
