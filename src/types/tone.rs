// src/types/tone.rs
/// Visual weight of a status badge. Status enums map onto this exhaustively,
/// so adding a status without choosing a tone does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Positive,
    Caution,
    Negative,
    Informative,
    Highlight,
    Celebrate,
    Neutral,
}

impl StatusTone {
    /// Tailwind classes used by the web front end for badges.
    pub fn badge_classes(&self) -> &'static str {
        match self {
            Self::Positive => "bg-green-100 text-green-700",
            Self::Caution => "bg-yellow-100 text-yellow-700",
            Self::Negative => "bg-red-100 text-red-700",
            Self::Informative => "bg-blue-100 text-blue-700",
            Self::Highlight => "bg-purple-100 text-purple-700",
            Self::Celebrate => "bg-emerald-100 text-emerald-700",
            Self::Neutral => "bg-gray-100 text-gray-700",
        }
    }

    /// Color token for non-badge surfaces (score rings, progress bars).
    pub fn color_token(&self) -> &'static str {
        match self {
            Self::Positive => "green",
            Self::Caution => "yellow",
            Self::Negative => "red",
            Self::Informative => "blue",
            Self::Highlight => "purple",
            Self::Celebrate => "emerald",
            Self::Neutral => "gray",
        }
    }
}
