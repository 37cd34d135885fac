//! Polarity lexicon, intensifiers, and negators.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Prior polarity of opinion words, in [-1, 1].
pub static POLARITY: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Positive
    map.extend([
        ("amazing", 0.6),
        ("awesome", 1.0),
        ("beautiful", 0.85),
        ("best", 1.0),
        ("better", 0.5),
        ("brilliant", 0.9),
        ("calm", 0.3),
        ("charming", 0.5),
        ("clean", 0.37),
        ("clear", 0.1),
        ("comfortable", 0.4),
        ("cool", 0.35),
        ("delicious", 1.0),
        ("delightful", 1.0),
        ("easy", 0.43),
        ("effective", 0.6),
        ("elegant", 0.5),
        ("enjoy", 0.4),
        ("enjoyed", 0.4),
        ("excellent", 1.0),
        ("excited", 0.375),
        ("exciting", 0.3),
        ("fantastic", 0.4),
        ("fast", 0.2),
        ("favorite", 0.5),
        ("fine", 0.42),
        ("fun", 0.3),
        ("glad", 0.5),
        ("good", 0.7),
        ("gorgeous", 0.7),
        ("great", 0.8),
        ("happy", 0.8),
        ("helpful", 0.5),
        ("impressive", 1.0),
        ("interesting", 0.5),
        ("kind", 0.6),
        ("like", 0.2),
        ("liked", 0.2),
        ("love", 0.5),
        ("loved", 0.7),
        ("lovely", 0.5),
        ("lucky", 0.33),
        ("nice", 0.6),
        ("perfect", 1.0),
        ("pleasant", 0.73),
        ("pleased", 0.5),
        ("positive", 0.23),
        ("pretty", 0.25),
        ("proud", 0.8),
        ("recommend", 0.3),
        ("reliable", 0.4),
        ("right", 0.29),
        ("smart", 0.21),
        ("smooth", 0.4),
        ("strong", 0.43),
        ("success", 0.3),
        ("successful", 0.75),
        ("superb", 1.0),
        ("thank", 0.2),
        ("thanks", 0.2),
        ("useful", 0.3),
        ("valuable", 0.5),
        ("welcome", 0.8),
        ("well", 0.1),
        ("win", 0.8),
        ("wonderful", 1.0),
        ("wow", 0.1),
    ]);

    // Negative
    map.extend([
        ("angry", -0.5),
        ("annoying", -0.8),
        ("awful", -1.0),
        ("bad", -0.7),
        ("boring", -1.0),
        ("broken", -0.4),
        ("confusing", -0.3),
        ("crap", -0.8),
        ("dead", -0.2),
        ("difficult", -0.5),
        ("dirty", -0.6),
        ("disappointed", -0.75),
        ("disappointing", -0.6),
        ("disgusting", -1.0),
        ("dull", -0.31),
        ("fail", -0.5),
        ("failed", -0.5),
        ("failure", -0.3),
        ("fake", -0.5),
        ("hard", -0.29),
        ("hate", -0.8),
        ("hated", -0.9),
        ("horrible", -1.0),
        ("hurt", -0.5),
        ("lazy", -0.25),
        ("mediocre", -0.4),
        ("mess", -0.4),
        ("mistake", -0.5),
        ("nasty", -1.0),
        ("negative", -0.3),
        ("painful", -0.7),
        ("pathetic", -1.0),
        ("poor", -0.4),
        ("problem", -0.2),
        ("ridiculous", -0.33),
        ("rude", -0.3),
        ("sad", -0.5),
        ("scary", -0.5),
        ("sick", -0.71),
        ("slow", -0.3),
        ("stupid", -0.8),
        ("terrible", -1.0),
        ("tired", -0.4),
        ("ugly", -0.7),
        ("unfortunately", -0.5),
        ("unhappy", -0.6),
        ("upset", -0.4),
        ("useless", -0.5),
        ("weak", -0.38),
        ("worse", -0.4),
        ("worst", -1.0),
        ("wrong", -0.5),
    ]);

    map
});

/// Words that scale the polarity of the word that follows them.
pub static INTENSIFIERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        ("absolutely", 1.5),
        ("completely", 1.4),
        ("especially", 1.3),
        ("extremely", 1.5),
        ("highly", 1.4),
        ("incredibly", 1.5),
        ("quite", 1.1),
        ("rather", 0.9),
        ("really", 1.3),
        ("slightly", 0.5),
        ("so", 1.3),
        ("somewhat", 0.7),
        ("too", 1.2),
        ("totally", 1.4),
        ("very", 1.3),
    ]
    .into_iter()
    .collect()
});

/// Words that invert the polarity of an opinion word shortly after them.
pub static NEGATORS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "not", "no", "never", "neither", "nor", "nobody", "nothing", "without", "hardly",
        "barely", "cannot", "can't", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't",
        "weren't", "won't", "wouldn't", "shouldn't", "couldn't", "haven't", "hasn't", "hadn't",
    ]
    .into_iter()
    .collect()
});
