use serde::Serialize;
use std::fmt;

/// A reviewer's recorded judgment on a checklist item.
///
/// Closed enumeration mapped to fixed report indicators via [`indicator`](Self::indicator);
/// there is no string-keyed dispatch anywhere in the rendering path.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ok,
    Fail,
    Note,
    NotApplicable,
    NotEvaluated,
}

impl Verdict {
    /// The fixed indicator rendered in front of the item text in the report.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Ok => "[x]",
            Self::Fail => "[!]",
            Self::Note => "[*]",
            Self::NotApplicable => "[-]",
            Self::NotEvaluated => "[ ]",
        }
    }

    /// Parse an interactive response token. Empty input defaults to
    /// [`Verdict::NotEvaluated`]; unknown tokens yield `None` (the prompt
    /// loop re-asks, this is never fatal).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "ok" => Some(Self::Ok),
            "fail" => Some(Self::Fail),
            "note" => Some(Self::Note),
            "na" => Some(Self::NotApplicable),
            "ne" | "" => Some(Self::NotEvaluated),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Ok => "ok",
            Self::Fail => "fail",
            Self::Note => "note",
            Self::NotApplicable => "na",
            Self::NotEvaluated => "ne",
        };
        f.write_str(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_is_total_and_distinct() {
        let all = [
            Verdict::Ok,
            Verdict::Fail,
            Verdict::Note,
            Verdict::NotApplicable,
            Verdict::NotEvaluated,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.indicator(), b.indicator());
            }
        }
    }

    #[test]
    fn empty_input_defaults_to_not_evaluated() {
        assert_eq!(Verdict::parse(""), Some(Verdict::NotEvaluated));
        assert_eq!(Verdict::parse("   "), Some(Verdict::NotEvaluated));
    }

    #[test]
    fn tokens_are_case_insensitive() {
        assert_eq!(Verdict::parse("OK"), Some(Verdict::Ok));
        assert_eq!(Verdict::parse("Fail"), Some(Verdict::Fail));
        assert_eq!(Verdict::parse("NA"), Some(Verdict::NotApplicable));
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(Verdict::parse("yes"), None);
        assert_eq!(Verdict::parse("back"), None);
        assert_eq!(Verdict::parse("o k"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for v in [
            Verdict::Ok,
            Verdict::Fail,
            Verdict::Note,
            Verdict::NotApplicable,
            Verdict::NotEvaluated,
        ] {
            assert_eq!(Verdict::parse(&v.to_string()), Some(v));
        }
    }
}
