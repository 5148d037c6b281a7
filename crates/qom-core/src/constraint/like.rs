//! Wildcard matching for the `Like` operator.
//!
//! Grammar: `%` matches any run of characters (including none), `_` matches
//! exactly one character, `\` escapes `%`, `_`, and itself. A trailing bare
//! `\` matches a literal backslash.

/// Pattern token after escape resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Tok {
    Any,
    One,
    Lit(char),
}

fn tokenize(pattern: &str) -> Vec<Tok> {
    let mut out = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '%' => {
                // collapse runs of % to keep backtracking linear-ish
                if out.last() != Some(&Tok::Any) {
                    out.push(Tok::Any);
                }
            }
            '_' => out.push(Tok::One),
            '\\' => out.push(Tok::Lit(chars.next().unwrap_or('\\'))),
            other => out.push(Tok::Lit(other)),
        }
    }

    out
}

/// Match `text` against a wildcard `pattern`.
#[must_use]
pub(crate) fn like_match(text: &str, pattern: &str) -> bool {
    let toks = tokenize(pattern);
    let chars: Vec<char> = text.chars().collect();

    // iterative matcher with single-level backtracking to the last `%`
    let mut t = 0usize; // text index
    let mut p = 0usize; // token index
    let mut star: Option<(usize, usize)> = None; // (token after %, text index)

    while t < chars.len() {
        match toks.get(p) {
            Some(Tok::Any) => {
                star = Some((p + 1, t));
                p += 1;
            }
            Some(Tok::One) => {
                t += 1;
                p += 1;
            }
            Some(Tok::Lit(c)) if *c == chars[t] => {
                t += 1;
                p += 1;
            }
            _ => match star {
                // widen the last % by one character and retry
                Some((next_p, star_t)) => {
                    p = next_p;
                    t = star_t + 1;
                    star = Some((next_p, star_t + 1));
                }
                None => return false,
            },
        }
    }

    // remaining tokens must all be %
    toks[p..].iter().all(|tok| *tok == Tok::Any)
}

///
/// TESTS
///
