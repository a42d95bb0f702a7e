//! Title sentiment scoring.
//!
//! Track titles are scored for polarity (negative to positive, [-1, 1]) and
//! subjectivity (factual to opinionated, [0, 1]) and then bucketed into the
//! categorical labels used by the feature assembler.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Raw sentiment scores of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sentiment {
    /// In [-1, 1]
    pub polarity: f64,
    /// In [0, 1]
    pub subjectivity: f64,
}

impl Sentiment {
    pub fn opinion(&self) -> Opinion {
        Opinion::from_subjectivity(self.subjectivity)
    }

    pub fn polarization(&self) -> Polarization {
        Polarization::from_polarity(self.polarity)
    }
}

/// Subjectivity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opinion {
    Low,
    Medium,
    High,
}

impl Opinion {
    pub fn from_subjectivity(score: f64) -> Self {
        let third = 1.0 / 3.0;
        if score < third {
            Opinion::Low
        } else if score > third {
            Opinion::High
        } else {
            Opinion::Medium
        }
    }
}

impl Display for Opinion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Opinion::Low => write!(f, "low"),
            Opinion::Medium => write!(f, "medium"),
            Opinion::High => write!(f, "high"),
        }
    }
}

/// Polarity sign bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Polarization {
    Negative,
    Neutral,
    Positive,
}

impl Polarization {
    pub fn from_polarity(score: f64) -> Self {
        if score < 0.0 {
            Polarization::Negative
        } else if score > 0.0 {
            Polarization::Positive
        } else {
            Polarization::Neutral
        }
    }
}

impl Display for Polarization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarization::Negative => write!(f, "Negative"),
            Polarization::Neutral => write!(f, "Neutral"),
            Polarization::Positive => write!(f, "Positive"),
        }
    }
}

/// Scores text sentiment.
///
/// Implementations must be total: any input, including empty or
/// non-alphabetic text, yields a score.
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Sentiment;
}

/// Polarity multiplier applied to a word that follows a negator
const NEGATION_FACTOR: f64 = -0.5;

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "nowhere", "don't", "dont", "doesn't",
    "didn't", "can't", "cant", "won't", "wont", "isn't", "ain't", "aren't", "wasn't",
];

/// (word, multiplier) for words that strengthen or soften the next word
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("so", 1.3),
    ("really", 1.2),
    ("too", 1.2),
    ("extremely", 1.5),
    ("totally", 1.4),
    ("super", 1.4),
    ("truly", 1.2),
    ("forever", 1.2),
    ("little", 0.7),
    ("kinda", 0.8),
    ("somewhat", 0.8),
    ("slightly", 0.6),
];

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    ("alone", -0.1, 0.6),
    ("amazing", 0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.667),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("bitter", -0.1, 0.4),
    ("blue", 0.0, 0.1),
    ("bright", 0.7, 0.9),
    ("broken", -0.4, 0.4),
    ("calm", 0.3, 0.75),
    ("cold", -0.6, 1.0),
    ("cool", 0.35, 0.65),
    ("crazy", -0.6, 0.9),
    ("cruel", -1.0, 1.0),
    ("cry", -0.3, 0.6),
    ("dangerous", -0.6, 0.9),
    ("dark", -0.15, 0.4),
    ("dead", -0.2, 0.4),
    ("dear", 0.2, 0.4),
    ("dirty", -0.6, 0.8),
    ("easy", 0.43, 0.83),
    ("empty", -0.1, 0.5),
    ("evil", -1.0, 1.0),
    ("fake", -0.5, 1.0),
    ("fine", 0.42, 0.5),
    ("free", 0.4, 0.8),
    ("fresh", 0.3, 0.5),
    ("fun", 0.3, 0.2),
    ("funny", 0.25, 1.0),
    ("gentle", 0.3, 0.6),
    ("glad", 0.5, 1.0),
    ("golden", 0.4, 0.6),
    ("good", 0.7, 0.6),
    ("gorgeous", 0.7, 1.0),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("hard", -0.29, 0.54),
    ("hate", -0.8, 0.9),
    ("heavy", -0.2, 0.5),
    ("hell", -0.4, 0.6),
    ("holy", 0.3, 0.5),
    ("hot", 0.25, 0.85),
    ("hurt", -0.5, 0.7),
    ("kind", 0.6, 0.9),
    ("lonely", -0.1, 0.6),
    ("lost", 0.0, 0.0),
    ("love", 0.5, 0.6),
    ("lovely", 0.5, 0.75),
    ("lucky", 0.33, 1.0),
    ("mad", -0.63, 1.0),
    ("magic", 0.4, 0.7),
    ("mean", -0.31, 0.69),
    ("miserable", -1.0, 1.0),
    ("nice", 0.6, 1.0),
    ("old", 0.1, 0.2),
    ("pain", -0.4, 0.6),
    ("peaceful", 0.25, 0.5),
    ("perfect", 1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("pretty", 0.25, 1.0),
    ("real", 0.2, 0.3),
    ("rich", 0.375, 0.625),
    ("right", 0.29, 0.54),
    ("sad", -0.5, 1.0),
    ("safe", 0.5, 0.5),
    ("scary", -0.5, 1.0),
    ("sexy", 0.5, 1.0),
    ("shine", 0.3, 0.6),
    ("sick", -0.71, 0.86),
    ("silly", -0.5, 0.9),
    ("sorry", -0.5, 1.0),
    ("strange", 0.0, 0.15),
    ("strong", 0.43, 0.73),
    ("stupid", -0.8, 1.0),
    ("sunny", 0.5, 0.9),
    ("sweet", 0.35, 0.65),
    ("tears", -0.3, 0.5),
    ("terrible", -1.0, 1.0),
    ("true", 0.35, 0.65),
    ("ugly", -0.7, 1.0),
    ("warm", 0.6, 0.6),
    ("weird", -0.5, 1.0),
    ("wild", 0.1, 0.4),
    ("wonderful", 1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.9),
    ("young", 0.1, 0.4),
];

fn lexicon() -> &'static HashMap<&'static str, (f64, f64)> {
    static LEXICON_INDEX: OnceLock<HashMap<&'static str, (f64, f64)>> = OnceLock::new();
    LEXICON_INDEX.get_or_init(|| {
        LEXICON
            .iter()
            .map(|&(word, polarity, subjectivity)| (word, (polarity, subjectivity)))
            .collect()
    })
}

fn intensity(word: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, multiplier)| multiplier)
}

/// Lexicon-based analyzer.
///
/// Each known word yields one assessment; an intensifier directly before it
/// scales both scores, a negator flips and damps its polarity. The result is
/// the mean over all assessments, or neutral when no word is known.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Sentiment {
        let lexicon = lexicon();
        let mut assessments: Vec<(f64, f64)> = Vec::new();
        let mut multiplier: Option<f64> = None;
        let mut negated = false;

        for word in text.unicode_words() {
            let word = word.to_lowercase().replace('\u{2019}', "'");

            if NEGATORS.contains(&word.as_str()) {
                negated = true;
                continue;
            }
            if let Some(m) = intensity(&word) {
                multiplier = Some(multiplier.unwrap_or(1.0) * m);
                continue;
            }

            if let Some(&(polarity, subjectivity)) = lexicon.get(word.as_str()) {
                let m = multiplier.unwrap_or(1.0);
                let mut polarity = polarity * m;
                let subjectivity = subjectivity * m;
                if negated {
                    polarity *= NEGATION_FACTOR;
                }
                assessments.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
            }

            multiplier = None;
            negated = false;
        }

        if assessments.is_empty() {
            return Sentiment::default();
        }

        let n = assessments.len() as f64;
        let (polarity, subjectivity) = assessments
            .iter()
            .fold((0.0_f64, 0.0_f64), |(p, s), &(ap, as_)| (p + ap, s + as_));

        Sentiment {
            polarity: (polarity / n).clamp(-1.0, 1.0),
            subjectivity: (subjectivity / n).clamp(0.0, 1.0),
        }
    }
}
