//! Abbreviations that do not end a sentence when followed by a period.
//!
//! Entries that are also everyday English words ("in", "no", "sat", "mass")
//! are left out so that sentences ending in those words still split.

use std::collections::HashSet;
use std::sync::LazyLock;

static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Titles and honorifics
    set.extend([
        "mr", "mrs", "ms", "dr", "prof", "rev", "fr", "sr", "jr", "messrs", "mmes", "msgr", "hon",
        "esq", "phd", "capt", "col", "gen", "lt", "maj", "sgt", "cpl", "pvt", "adm", "cmdr", "sen",
        "rep", "gov", "pres",
    ]);

    // Latin and reference shorthand
    set.extend([
        "etc", "vs", "e.g", "i.e", "cf", "viz", "ibid", "n.b", "p.s", "r.s.v.p", "ph.d", "m.d",
        "b.a", "b.s", "m.a", "m.s", "m.b.a",
    ]);

    // Dates and times
    set.extend([
        "a.m", "p.m", "b.c", "a.d", "jan", "feb", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
        "nov", "dec", "tue", "tues", "wed", "thu", "thur", "thurs",
    ]);

    // Places and organizations
    set.extend([
        "ave", "blvd", "rd", "apt", "ste", "bldg", "dept", "u.s", "u.k", "u.s.a", "e.u", "inc",
        "corp", "ltd", "llc", "bros", "assn", "intl",
    ]);

    // Units and document references
    set.extend([
        "oz", "lb", "lbs", "kg", "mg", "ml", "cm", "mm", "km", "ft", "yd", "mph", "kph", "rpm",
        "vol", "nos", "pp", "fig", "eq", "approx", "avg", "misc", "ref", "refs", "eds", "encl",
    ]);

    set
});

/// Check if a word (without its trailing period) is a known abbreviation.
pub fn is_abbreviation(word: &str) -> bool {
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(lower.trim_matches('.'))
}
