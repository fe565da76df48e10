use serde::Serialize;

use crate::state::AppState;

/// What the importer knows about one stored entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordReport {
    pub term: String,
    pub reading: String,
    pub part_of_speech: String,
    pub definition: String,
    pub is_html: bool,
    pub frequency: Option<i64>,
    pub pitch_accents: Vec<String>,
}

/// Find entries matching `word` and resolve their frequency and pitch data
pub async fn lookup_word(state: &AppState, word: &str) -> Vec<WordReport> {
    let candidates = state.store.find_terms(word).await;
    let frequencies = state
        .frequency
        .lookup_batch(candidates.iter().map(|(id, entry)| (*id, entry)))
        .await;

    let mut reports = Vec::with_capacity(candidates.len());
    for (id, entry) in &candidates {
        let pitch_accents = state
            .store
            .pitch_accents(&entry.term)
            .await
            .into_iter()
            .filter(|pitch| pitch.reading == entry.reading || pitch.reading == entry.term)
            .map(|pitch| pitch.pitch_accent)
            .collect();

        reports.push(WordReport {
            term: entry.term.clone(),
            reading: entry.reading.clone(),
            part_of_speech: entry.part_of_speech.clone(),
            definition: entry.definition.clone(),
            is_html: entry.is_html_content,
            frequency: frequencies.get(id).map(|f| f.frequency),
            pitch_accents,
        });
    }

    reports
}
