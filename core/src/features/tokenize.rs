use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Words of two or more word characters.
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern"));

/// NFKD-decompose and drop combining marks: "café" -> "cafe".
pub fn strip_accents(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

pub fn preprocess(text: &str, strip: bool, lowercase: bool) -> String {
    let text = if strip {
        strip_accents(text)
    } else {
        text.to_string()
    };
    if lowercase {
        text.to_lowercase()
    } else {
        text
    }
}

pub fn tokens(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// All n-grams for n in `lo..=hi`, space-joined, unigrams first.
pub fn ngrams(tokens: &[&str], (lo, hi): (usize, usize)) -> Vec<String> {
    let mut out = Vec::new();
    for n in lo..=hi {
        if n == 0 || n > tokens.len() {
            continue;
        }
        out.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    out
}
