//! TF-IDF vectorization of book content text.
//!
//! ## Weighting
//! - Tokens: lowercase runs of two or more word characters, English stop
//!   words removed
//! - Term frequency: raw count within the document
//! - IDF: `ln((1 + N) / (1 + df)) + 1` (smoothed)
//! - Each document vector is L2-normalized, so a dot product is a cosine
//!
//! Vectors are sparse and sorted by term index so dot products are a
//! linear merge.

use catalog::{CatalogError, Result};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

/// Tunables for building the similarity matrix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimilarityConfig {
    /// Keep only the N most frequent terms across the corpus. `None` keeps all.
    pub max_features: Option<usize>,
}

impl SimilarityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the vocabulary size (default: unlimited)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_features == Some(0) {
            return Err(CatalogError::Configuration(
                "max_features must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sparse document vector: (term index, weight), sorted by term index
pub type SparseVector = Vec<(usize, f64)>;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt",
        "cry", "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
        "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
        "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
        "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly",
        "forty", "found", "four", "from", "front", "full", "further", "get", "give", "go", "had",
        "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
        "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i",
        "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
        "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me",
        "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly", "move",
        "much", "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless",
        "next", "nine", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now",
        "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other",
        "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part", "per",
        "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed", "seeming",
        "seems", "serious", "several", "she", "should", "show", "side", "since", "sincere", "six",
        "sixty", "so", "some", "somehow", "someone", "something", "sometime", "sometimes",
        "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the", "their",
        "them", "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
        "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
        "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
        "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until",
        "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever",
        "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
        "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
        "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Split text into lowercase tokens of two or more word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|token| !is_stop_word(token))
        .collect()
}

/// Fitted vocabulary plus per-term IDF weights.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfModel {
    /// Fit a model on `documents` and return it with each document's vector.
    pub fn fit_transform(
        documents: &[String],
        config: &SimilarityConfig,
    ) -> Result<(Self, Vec<SparseVector>)> {
        config.validate()?;

        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| tokenize(doc)).collect();

        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen = HashSet::new();
            for token in tokens {
                *corpus_counts.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *document_frequency.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        // Most frequent terms first, alphabetical among equals
        let mut terms: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if let Some(max) = config.max_features {
            terms.truncate(max);
        }

        let mut kept: Vec<&str> = terms.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();

        let n_docs = documents.len() as f64;
        let vocabulary: BTreeMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();
        let idf: Vec<f64> = kept
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let model = Self { vocabulary, idf };
        let vectors = tokenized.iter().map(|tokens| model.vectorize(tokens)).collect();
        Ok((model, vectors))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Weighted, L2-normalized vector for an already tokenized document.
    /// Out-of-vocabulary tokens are dropped.
    pub fn vectorize(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Dot product of two sparse vectors sorted by index.
pub fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Hands-On Machine Learning with Scikit-Learn, and C++ a");
        assert_eq!(
            tokens,
            vec!["hands", "machine", "learning", "scikit", "learn"]
        );
    }

    #[test]
    fn test_tokenize_keeps_digits_and_underscores() {
        assert_eq!(tokenize("NLP_2 in 2020"), vec!["nlp_2", "2020"]);
    }

    #[test]
    fn test_english_stop_words() {
        assert_eq!(STOP_WORDS.len(), 318);
        for word in ["system", "first", "hundred", "amoungst", "the"] {
            assert!(is_stop_word(word), "{word} should be a stop word");
        }
        assert!(!is_stop_word("just"));
        assert_eq!(tokenize("The Hundred-Page Book"), vec!["page", "book"]);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let (_, vectors) = TfIdfModel::fit_transform(
            &docs(&["deep learning python", "python crash course", "deep learning"]),
            &SimilarityConfig::default(),
        )
        .unwrap();
        for vector in &vectors {
            let norm: f64 = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_idf_smoothing() {
        let (model, vectors) = TfIdfModel::fit_transform(
            &docs(&["python rust", "python"]),
            &SimilarityConfig::default(),
        )
        .unwrap();
        // "python": df=2 -> idf 1.0, "rust": df=1 -> idf ln(1.5)+1
        let python = model.term_index("python").unwrap();
        let rust = model.term_index("rust").unwrap();
        let first = &vectors[0];
        let w_python = first.iter().find(|(i, _)| *i == python).unwrap().1;
        let w_rust = first.iter().find(|(i, _)| *i == rust).unwrap().1;
        let expected_ratio = (1.5f64).ln() + 1.0;
        assert!((w_rust / w_python - expected_ratio).abs() < 1e-9);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let config = SimilarityConfig::new().with_max_features(1);
        let (model, vectors) = TfIdfModel::fit_transform(
            &docs(&["python data", "python web", "golang"]),
            &config,
        )
        .unwrap();
        assert_eq!(model.vocabulary_size(), 1);
        assert!(model.term_index("python").is_some());
        // Third document has no kept terms, so it stays a zero vector
        assert!(vectors[2].is_empty());
    }

    #[test]
    fn test_zero_max_features_is_rejected() {
        let config = SimilarityConfig::new().with_max_features(0);
        let err = TfIdfModel::fit_transform(&docs(&["python"]), &config).unwrap_err();
        assert!(matches!(err, CatalogError::Configuration(_)));
    }

    #[test]
    fn test_sparse_dot() {
        let a = vec![(0, 1.0), (2, 2.0), (5, 1.0)];
        let b = vec![(2, 3.0), (4, 1.0), (5, 2.0)];
        assert_eq!(sparse_dot(&a, &b), 8.0);
        assert_eq!(sparse_dot(&a, &[]), 0.0);
    }
}
