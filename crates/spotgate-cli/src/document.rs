//! Input document and selection output formats

use anyhow::bail;
use serde::{Deserialize, Serialize};
use spotgate_core::{Context, SurfaceFormOccurrence, TaggedText, TaggedToken, Text};
use spotgate_selector::Decision;

/// A document with its spotted occurrences
///
/// Without `tokens` the document is treated as untagged text.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentInput {
    pub text: String,

    #[serde(default)]
    pub tokens: Option<Vec<TaggedToken>>,

    pub occurrences: Vec<OccurrenceInput>,
}

/// A spotted surface form at a character offset
#[derive(Debug, Clone, Deserialize)]
pub struct OccurrenceInput {
    pub surface_form: String,
    pub offset: usize,
}

impl DocumentInput {
    /// Build occurrences sharing one context, in input order
    pub fn into_occurrences(self) -> anyhow::Result<Vec<SurfaceFormOccurrence>> {
        let length = self.text.chars().count();

        for occurrence in &self.occurrences {
            let end = occurrence
                .offset
                .checked_add(occurrence.surface_form.chars().count());
            if end.map_or(true, |end| end > length) {
                bail!(
                    "Occurrence '{}' at {} extends past the end of the text ({} characters)",
                    occurrence.surface_form,
                    occurrence.offset,
                    length
                );
            }
        }

        let context: Context = match self.tokens {
            Some(tokens) => TaggedText::new(self.text, tokens).into(),
            None => Text::new(self.text).into(),
        };

        Ok(self
            .occurrences
            .into_iter()
            .map(|o| SurfaceFormOccurrence::new(o.surface_form, o.offset, context.clone()))
            .collect())
    }
}

/// One occurrence in the selection output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedOccurrence {
    pub surface_form: String,
    pub offset: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<DecisionOutput>,
}

/// Why an occurrence was kept or dropped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionOutput {
    pub outcome: &'static str,
    pub reason: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl SelectedOccurrence {
    /// Output entry carrying the decision
    pub fn explained(occurrence: &SurfaceFormOccurrence, decision: &Decision) -> Self {
        Self {
            decision: Some(DecisionOutput {
                outcome: decision.outcome(),
                reason: decision.reason(),
                confidence: decision.confidence(),
            }),
            ..Self::from(occurrence)
        }
    }
}

impl From<&SurfaceFormOccurrence> for SelectedOccurrence {
    fn from(occurrence: &SurfaceFormOccurrence) -> Self {
        Self {
            surface_form: occurrence.surface_form().to_string(),
            offset: occurrence.offset(),
            decision: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotgate_core::Termsize;
    use spotgate_selector::{DropReason, RetainReason};

    const TAGGED: &str = r#"{
        "text": "The Canadian moved to Berlin",
        "tokens": [
            {"token": "The", "offset": 0, "pos": "DT"},
            {"token": "Canadian", "offset": 4, "pos": "JJ"},
            {"token": "moved", "offset": 13, "pos": "VBD"},
            {"token": "to", "offset": 19, "pos": "TO"},
            {"token": "Berlin", "offset": 22, "pos": "NNP"}
        ],
        "occurrences": [
            {"surface_form": "Canadian", "offset": 4},
            {"surface_form": "Berlin", "offset": 22}
        ]
    }"#;

    #[test]
    fn test_tagged_document() {
        let document: DocumentInput = serde_json::from_str(TAGGED).unwrap();
        let occurrences = document.into_occurrences().unwrap();

        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].surface_form(), "Canadian");
        assert_eq!(occurrences[1].offset(), 22);

        let tagged = occurrences[0].context().as_tagged().unwrap();
        let tokens = tagged.tagged_tokens(&occurrences[0]);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].pos_tag(), Some("JJ"));
    }

    #[test]
    fn test_untagged_document() {
        let document: DocumentInput = serde_json::from_str(
            r#"{"text": "Berlin", "occurrences": [{"surface_form": "Berlin", "offset": 0}]}"#,
        )
        .unwrap();
        let occurrences = document.into_occurrences().unwrap();

        assert!(occurrences[0].context().as_tagged().is_none());
    }

    #[test]
    fn test_occurrence_past_end_rejected() {
        let document: DocumentInput = serde_json::from_str(
            r#"{"text": "Berlin", "occurrences": [{"surface_form": "Berlin", "offset": 3}]}"#,
        )
        .unwrap();

        assert!(document.into_occurrences().is_err());
    }

    #[test]
    fn test_overflowing_offset_rejected() {
        let document: DocumentInput = serde_json::from_str(
            r#"{"text": "Berlin", "occurrences": [{"surface_form": "Berlin", "offset": 18446744073709551615}]}"#,
        )
        .unwrap();

        assert!(document.into_occurrences().is_err());
    }

    #[test]
    fn test_output_format() {
        let document: DocumentInput = serde_json::from_str(TAGGED).unwrap();
        let occurrences = document.into_occurrences().unwrap();

        let plain = serde_json::to_value(SelectedOccurrence::from(&occurrences[1])).unwrap();
        assert_eq!(plain, serde_json::json!({"surface_form": "Berlin", "offset": 22}));

        let retained = Decision::Retained(RetainReason::Classified {
            termsize: Termsize::Unigram,
            confidence: 0.5,
        });
        let explained =
            serde_json::to_value(SelectedOccurrence::explained(&occurrences[1], &retained)).unwrap();
        assert_eq!(explained["decision"]["outcome"], "retained");
        assert_eq!(explained["decision"]["reason"], "unigram_classifier");
        assert_eq!(explained["decision"]["confidence"], 0.5);

        let dropped = Decision::Dropped(DropReason::PosFilter);
        let explained =
            serde_json::to_value(SelectedOccurrence::explained(&occurrences[0], &dropped)).unwrap();
        assert_eq!(explained["decision"]["reason"], "pos_filter");
        assert!(explained["decision"].get("confidence").is_none());
    }
}
