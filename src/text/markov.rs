//! Bigram Markov chain text generator
//!
//! Learns word-pair continuations from a corpus and produces short pieces
//! of prose in its style. Randomness comes from the caller's rng so the
//! same seed reproduces the same text.

use ahash::AHashMap;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Returned by `generate` when the model has seen no usable corpus
pub const UNTRAINED_FALLBACK: &str = "Model not sufficiently trained.";

#[derive(Debug, Default)]
pub struct MarkovChain {
    /// "w1 w2" key to frequency-weighted continuations (duplicates weight)
    chain: AHashMap<String, Vec<String>>,
    /// Two-word phrases a generated sentence may open with
    starters: Vec<String>,
}

fn ends_sentence(word: &str) -> bool {
    word.ends_with('.') || word.ends_with('?') || word.ends_with('!')
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl MarkovChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every word-triple of `text` as a bigram continuation.
    ///
    /// Texts shorter than three words carry no bigram structure and are
    /// ignored. The opening pair and every pair following a sentence-ending
    /// word become starters.
    pub fn train(&mut self, text: &str) {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() < 3 {
            return;
        }
        self.starters.push(format!("{} {}", words[0], words[1]));
        for i in 0..words.len() - 2 {
            let key = format!("{} {}", words[i], words[i + 1]);
            self.chain.entry(key).or_default().push(words[i + 2].to_string());
            if ends_sentence(words[i + 1]) {
                if let Some(after) = words.get(i + 3) {
                    self.starters.push(format!("{} {}", words[i + 2], after));
                }
            }
        }
    }

    pub fn is_trained(&self) -> bool {
        !self.starters.is_empty()
    }

    /// Generate up to `max_words` words of new text.
    ///
    /// Walks the chain from a random starter, restarting from another
    /// starter on a dead end, and stops early when a sentence naturally
    /// ends. Output is capitalized and always terminally punctuated.
    pub fn generate(&self, max_words: usize, rng: &mut ChaCha8Rng) -> String {
        let Some(starter) = self.starters.choose(rng) else {
            return UNTRAINED_FALLBACK.to_string();
        };
        let (mut w1, mut w2) = split_pair(starter);
        let mut result = vec![w1.clone(), w2.clone()];

        for _ in 2..max_words.max(1) {
            if ends_sentence(&w2) {
                break;
            }
            let key = format!("{w1} {w2}");
            match self.chain.get(&key).and_then(|next| next.choose(rng)) {
                Some(next) => {
                    result.push(next.clone());
                    w1 = w2;
                    w2 = next.clone();
                }
                // Dead end; pick up from a fresh starter.
                None => {
                    let starter = self.starters.choose(rng).unwrap_or(starter);
                    let pair = split_pair(starter);
                    w1 = pair.0;
                    w2 = pair.1;
                }
            }
        }

        // The starter pair seeds two words even when fewer were asked for.
        result.truncate(max_words.max(1));
        let mut sentence = capitalize(&result.join(" "));
        if !ends_sentence(&sentence) {
            sentence.push('.');
        }
        for mark in [".", ",", "?", "!"] {
            sentence = sentence.replace(&format!(" {mark}"), mark);
        }
        sentence
    }
}

fn split_pair(starter: &str) -> (String, String) {
    match starter.split_once(' ') {
        Some((a, b)) => (a.to_string(), b.to_string()),
        None => (starter.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_untrained_model_falls_back() {
        let chain = MarkovChain::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(chain.generate(20, &mut rng), UNTRAINED_FALLBACK);
    }

    #[test]
    fn test_too_short_corpus_is_ignored() {
        let mut chain = MarkovChain::new();
        chain.train("two words");
        assert!(!chain.is_trained());
    }

    #[test]
    fn test_generated_text_uses_corpus_words() {
        let mut chain = MarkovChain::new();
        let corpus = "the river runs past the old mill. the mill wheel turns slowly.";
        chain.train(corpus);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let text = chain.generate(12, &mut rng);
        let corpus_words: Vec<&str> = corpus.split_whitespace().collect();
        for word in text.trim_end_matches('.').split_whitespace() {
            let lowered = word.to_lowercase();
            assert!(
                corpus_words.iter().any(|w| w.trim_end_matches('.') == lowered.trim_end_matches('.')),
                "unexpected word {word}"
            );
        }
    }

    #[test]
    fn test_output_is_capitalized_and_terminated() {
        let mut chain = MarkovChain::new();
        chain.train("dust settles over the broken road every evening");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let text = chain.generate(8, &mut rng);
        let first = text.chars().next().unwrap();
        assert!(first.is_uppercase());
        assert!(text.ends_with('.') || text.ends_with('?') || text.ends_with('!'));
    }

    #[test]
    fn test_same_seed_same_text() {
        let mut chain = MarkovChain::new();
        chain.train("one two three four five six seven eight nine ten.");
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(chain.generate(10, &mut a), chain.generate(10, &mut b));
    }

    #[test]
    fn test_respects_word_limit() {
        let mut chain = MarkovChain::new();
        chain.train("alpha beta gamma delta epsilon zeta eta theta iota kappa");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let text = chain.generate(4, &mut rng);
        assert!(text.split_whitespace().count() <= 4);
    }

    #[test]
    fn test_single_word_request_yields_single_word() {
        let mut chain = MarkovChain::new();
        chain.train("alpha beta gamma delta epsilon zeta eta theta iota kappa");
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let text = chain.generate(1, &mut rng);
        assert_eq!(text.split_whitespace().count(), 1);
    }
}
