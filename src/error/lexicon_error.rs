use crate::lexicon::Role;

#[derive(Debug)]
/// Represents all errors that can occur while building a lexicon.
pub enum LexiconError {
    /// A role has no surface token.
    MissingRole {
        /// The role left unmapped.
        role: Role,
    },
    /// A surface token is not identifier-shaped.
    InvalidSurface {
        /// The role it was assigned to.
        role:    Role,
        /// The rejected token.
        surface: String,
    },
    /// Two roles share the same surface token.
    DuplicateSurface {
        /// The shared token.
        surface: String,
        /// The first role using it.
        first:   Role,
        /// The second role using it.
        second:  Role,
    },
    /// A keyword list has fewer usable words than there are roles.
    NotEnoughKeywords {
        /// The number of roles to fill.
        needed: usize,
        /// The number of usable words supplied.
        found:  usize,
    },
    /// A lexicon file is not a valid role-to-token JSON object.
    Json {
        /// Details from the JSON parser.
        details: String,
    },
    /// A lexicon or keyword file could not be read.
    Io {
        /// The path that was read.
        path:    String,
        /// The underlying failure.
        details: String,
    },
}

impl std::fmt::Display for LexiconError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRole { role } => write!(f, "No surface token for role {role}."),
            Self::InvalidSurface { role, surface } => {
                write!(f, "Surface token '{surface}' for role {role} is not an identifier.")
            },
            Self::DuplicateSurface { surface,
                                     first,
                                     second, } => {
                write!(f, "Surface token '{surface}' is used by both {first} and {second}.")
            },
            Self::NotEnoughKeywords { needed, found } => write!(f,
                                                                "Keyword list is too short: expected at least {needed} keywords, got {found}."),
            Self::Json { details } => write!(f, "Invalid lexicon: {details}"),
            Self::Io { path, details } => write!(f, "Failed to read '{path}': {details}"),
        }
    }
}

impl std::error::Error for LexiconError {}
