//! Verified sample sources, one per grammar

/// Embedded sample files from `samples/`
pub struct QuizSamples;

const SAMPLES: &[(&str, &str)] = &[
    ("hash-marker.txt", include_str!("../../../samples/hash-marker.txt")),
    ("question-marker.txt", include_str!("../../../samples/question-marker.txt")),
    ("numbered.txt", include_str!("../../../samples/numbered.txt")),
    ("tables.txt", include_str!("../../../samples/tables.txt")),
];

impl QuizSamples {
    /// Contents of a sample by file name
    pub fn get(name: &str) -> Option<&'static str> {
        SAMPLES
            .iter()
            .find(|(sample, _)| *sample == name)
            .map(|(_, content)| *content)
    }

    pub fn list() -> impl Iterator<Item = &'static str> {
        SAMPLES.iter().map(|(name, _)| *name)
    }
}
