//! Keyword classification of post text.

/// Phrases meaning service is back to normal. Checked before [`DELAY_KEYWORDS`].
pub const RESUME_KEYWORDS: [&str; 5] = [
    "resuming",
    "resumed",
    "resolved",
    "cleared",
    "normal service",
];

pub const DELAY_KEYWORDS: [&str; 5] = [
    "delayed",
    "suspended",
    "service change",
    "advisory",
    "heads up",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Resuming,
    Delay,
    NoInformation,
}

impl Verdict {
    pub fn is_delay(self) -> bool {
        matches!(self, Verdict::Delay)
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::Resuming => "Service appears to be resuming or has returned to normal.",
            Verdict::Delay => "Potential delay or service change detected.",
            Verdict::NoInformation => {
                "No specific delay or service change information found in the latest update."
            }
        }
    }
}

/// Classifies `text` by case-insensitive substring match.
///
/// A resume keyword wins over a delay keyword wherever they appear.
pub fn classify(text: &str) -> Verdict {
    let lower = text.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if contains_any(&RESUME_KEYWORDS) {
        Verdict::Resuming
    } else if contains_any(&DELAY_KEYWORDS) {
        Verdict::Delay
    } else {
        Verdict::NoInformation
    }
}
