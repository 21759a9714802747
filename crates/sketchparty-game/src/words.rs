//! Static vocabulary source.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::VocabularyError;

/// Vocabulary used when the embedding server supplies none of its own.
/// Concrete, drawable nouns — the kind a round of charades survives.
const DEFAULT_WORDS: &[&str] = &[
    "airplane", "anchor", "apple", "backpack", "balloon", "banana",
    "barn", "basket", "bathtub", "beach", "bell", "bicycle", "binoculars",
    "blanket", "boat", "bone", "book", "boot", "bottle", "bridge",
    "broom", "bucket", "butterfly", "cactus", "camera", "campfire",
    "candle", "canoe", "carrot", "castle", "caterpillar", "chair",
    "cheese", "cherry", "chimney", "church", "clock", "cloud", "clown",
    "compass", "cookie", "crab", "crayon", "crown", "cupcake", "curtain",
    "dolphin", "door", "dragon", "drum", "eagle", "elephant", "envelope",
    "feather", "fence", "firetruck", "flashlight", "flower", "fountain",
    "giraffe", "glasses", "glove", "guitar", "hammer", "hammock",
    "harp", "hat", "helicopter", "horseshoe", "hourglass", "igloo",
    "island", "kangaroo", "kettle", "key", "kite", "ladder", "lantern",
    "leaf", "lighthouse", "lobster", "magnet", "mailbox", "mermaid",
    "microscope", "mitten", "moon", "mountain", "mushroom", "nest",
    "octopus", "owl", "paintbrush", "pancake", "parachute", "peacock",
    "pencil", "penguin", "piano", "pillow", "pineapple", "pirate",
    "pizza", "pretzel", "pumpkin", "rainbow", "robot", "rocket",
    "sailboat", "sandcastle", "saxophone", "scarecrow", "scissors",
    "seahorse", "shovel", "skateboard", "snowman", "spider", "starfish",
    "submarine", "suitcase", "swing", "telescope", "tent", "toaster",
    "tractor", "treehouse", "trophy", "trumpet", "turtle", "umbrella",
    "unicorn", "violin", "volcano", "waffle", "walrus", "whale",
    "wheelbarrow", "windmill", "zebra",
];

/// A fixed vocabulary that hands out random unique samples.
///
/// Shared read-only across every session, so one bank serves the whole
/// process.
#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    /// A bank over a custom vocabulary.
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// Number of words in the vocabulary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Draws `n` distinct words uniformly, without replacement.
    pub fn sample(
        &self,
        n: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<String>, VocabularyError> {
        if self.words.len() < n {
            return Err(VocabularyError::Insufficient {
                requested: n,
                available: self.words.len(),
            });
        }
        Ok(self.words.choose_multiple(rng, n).cloned().collect())
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS.iter().map(|w| (*w).to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_returns_distinct_words() {
        let bank = WordBank::default();
        let mut rng = rand::rng();

        for _ in 0..50 {
            let sample = bank.sample(3, &mut rng).unwrap();
            assert_eq!(sample.len(), 3);
            assert_ne!(sample[0], sample[1]);
            assert_ne!(sample[0], sample[2]);
            assert_ne!(sample[1], sample[2]);
        }
    }

    #[test]
    fn test_sample_draws_from_vocabulary() {
        let bank = WordBank::new(vec!["left".into(), "right".into()]);
        let sample = bank.sample(2, &mut rand::rng()).unwrap();
        assert!(sample.contains(&"left".to_string()));
        assert!(sample.contains(&"right".to_string()));
    }

    #[test]
    fn test_sample_fails_when_vocabulary_too_small() {
        let bank = WordBank::new(vec!["only".into()]);
        let result = bank.sample(3, &mut rand::rng());
        assert!(matches!(
            result,
            Err(VocabularyError::Insufficient {
                requested: 3,
                available: 1
            })
        ));
    }

    #[test]
    fn test_default_vocabulary_vastly_exceeds_a_round() {
        assert!(WordBank::default().len() > 100);
    }
}
