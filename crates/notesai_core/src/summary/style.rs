//! Summary style selector.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SummaryStyle {
    #[default]
    Concise,
    Bullet,
    Simplified,
    Detailed,
    QuestionAnswer,
    Flashcards,
    Outline,
    Keywords,
    Actionable,
}

impl SummaryStyle {
    pub const ALL: [SummaryStyle; 9] = [
        Self::Concise,
        Self::Bullet,
        Self::Simplified,
        Self::Detailed,
        Self::QuestionAnswer,
        Self::Flashcards,
        Self::Outline,
        Self::Keywords,
        Self::Actionable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concise => "concise",
            Self::Bullet => "bullet",
            Self::Simplified => "simplified",
            Self::Detailed => "detailed",
            Self::QuestionAnswer => "qa",
            Self::Flashcards => "flashcards",
            Self::Outline => "outline",
            Self::Keywords => "keywords",
            Self::Actionable => "actionable",
        }
    }
}

impl Display for SummaryStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSummaryStyleError(String);

impl Display for ParseSummaryStyleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported summary style `{}`; expected one of: {}",
            self.0,
            SummaryStyle::ALL.map(SummaryStyle::as_str).join("|")
        )
    }
}

impl Error for ParseSummaryStyleError {}

impl FromStr for SummaryStyle {
    type Err = ParseSummaryStyleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "concise" => Ok(Self::Concise),
            "bullet" | "bullets" => Ok(Self::Bullet),
            "simplified" | "simple" => Ok(Self::Simplified),
            "detailed" => Ok(Self::Detailed),
            "qa" | "q&a" | "q-and-a" => Ok(Self::QuestionAnswer),
            "flashcards" | "flashcard" => Ok(Self::Flashcards),
            "outline" => Ok(Self::Outline),
            "keywords" => Ok(Self::Keywords),
            "actionable" | "actions" => Ok(Self::Actionable),
            _ => Err(ParseSummaryStyleError(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SummaryStyle;

    #[test]
    fn every_style_parses_from_its_name() {
        for style in SummaryStyle::ALL {
            assert_eq!(style.as_str().parse::<SummaryStyle>(), Ok(style));
        }
    }

    #[test]
    fn aliases_and_case_are_accepted() {
        assert_eq!("Q&A".parse::<SummaryStyle>(), Ok(SummaryStyle::QuestionAnswer));
        assert_eq!(" Bullets ".parse::<SummaryStyle>(), Ok(SummaryStyle::Bullet));
    }

    #[test]
    fn unknown_style_is_rejected() {
        let err = "poem".parse::<SummaryStyle>().unwrap_err();
        assert!(err.to_string().contains("poem"));
    }
}
