use std::fmt;
use std::str::FromStr;

/// Supported conversation languages. The set is fixed and shared by request
/// validation and the API documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Spanish,
    Chinese,
    Arabic,
    Hindi,
    Bengali,
    Portuguese,
    Russian,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Spanish,
        Language::Chinese,
        Language::Arabic,
        Language::Hindi,
        Language::Bengali,
        Language::Portuguese,
        Language::Russian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::Chinese => "zh",
            Language::Arabic => "ar",
            Language::Hindi => "hi",
            Language::Bengali => "bn",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::English),
            "es" => Ok(Language::Spanish),
            "zh" => Ok(Language::Chinese),
            "ar" => Ok(Language::Arabic),
            "hi" => Ok(Language::Hindi),
            "bn" => Ok(Language::Bengali),
            "pt" => Ok(Language::Portuguese),
            "ru" => Ok(Language::Russian),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
