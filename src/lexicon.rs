use std::{collections::BTreeMap, path::Path};

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::error::LexiconError;

/// A canonical grammar role that a surface keyword can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Introduces a function declaration.
    Function,
    /// Returns from the current call.
    Return,
    /// Starts a conditional.
    If,
    /// Starts the alternative branch of a conditional.
    Else,
    /// Starts a for loop.
    For,
    /// Separates the loop variable from what it iterates.
    In,
    /// Starts a while loop.
    While,
    /// Leaves the innermost loop.
    Exit,
    /// Writes values to the output.
    Print,
    /// Logical conjunction.
    And,
    /// Logical disjunction.
    Or,
    /// Logical negation.
    Not,
    /// The boolean literal `true`.
    True,
    /// The boolean literal `false`.
    False,
}

impl Role {
    /// Every role, in canonical order.
    pub const ALL: [Self; 14] = [Self::Function,
                                 Self::Return,
                                 Self::If,
                                 Self::Else,
                                 Self::For,
                                 Self::In,
                                 Self::While,
                                 Self::Exit,
                                 Self::Print,
                                 Self::And,
                                 Self::Or,
                                 Self::Not,
                                 Self::True,
                                 Self::False];

    /// The canonical role name, e.g. `"FUNCTION"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Function => "FUNCTION",
            Self::Return => "RETURN",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::For => "FOR",
            Self::In => "IN",
            Self::While => "WHILE",
            Self::Exit => "EXIT",
            Self::Print => "PRINT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::True => "TRUE",
            Self::False => "FALSE",
        }
    }

    /// The spelling used by the default lexicon.
    const fn default_surface(self) -> &'static str {
        match self {
            Self::Function => "fn",
            Self::Return => "ret",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::In => "in",
            Self::While => "while",
            Self::Exit => "exit",
            Self::Print => "say",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::True => "true",
            Self::False => "false",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An immutable mapping from every [`Role`] to the surface token that spells
/// it in one disguised language.
///
/// A lexicon is a plain value handed to the tokenizer, so several languages
/// can be interpreted side by side.
///
/// ## Example
/// ```
/// use lexiscript::lexicon::{Lexicon, Role};
///
/// let lexicon = Lexicon::default();
/// assert_eq!(lexicon.surface(Role::Print), "say");
/// assert_eq!(lexicon.role("ret"), Some(Role::Return));
/// assert_eq!(lexicon.role("print"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    surfaces: BTreeMap<Role, String>,
    roles:    BTreeMap<String, Role>,
}

impl Default for Lexicon {
    fn default() -> Self {
        let surfaces = Role::ALL.iter()
                                .map(|role| (*role, role.default_surface().to_string()))
                                .collect::<BTreeMap<_, _>>();
        let roles = surfaces.iter()
                            .map(|(role, surface)| (surface.clone(), *role))
                            .collect();
        Self { surfaces, roles }
    }
}

impl Lexicon {
    /// Builds a lexicon from an explicit role-to-token map.
    ///
    /// # Errors
    /// Returns a `LexiconError` if:
    /// - a role has no token,
    /// - a token is not identifier-shaped,
    /// - two roles share a token.
    ///
    /// # Example
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// use lexiscript::lexicon::{Lexicon, Role};
    ///
    /// let mut map = BTreeMap::new();
    /// for (i, role) in Role::ALL.iter().enumerate() {
    ///     map.insert(*role, format!("kw{i}"));
    /// }
    /// assert!(Lexicon::new(map.clone()).is_ok());
    ///
    /// map.insert(Role::Else, "kw0".to_string());
    /// assert!(Lexicon::new(map).is_err());
    /// ```
    pub fn new(surfaces: BTreeMap<Role, String>) -> Result<Self, LexiconError> {
        let mut roles = BTreeMap::new();

        for role in Role::ALL {
            let surface = surfaces.get(&role)
                                  .ok_or(LexiconError::MissingRole { role })?;
            if !is_identifier(surface) {
                return Err(LexiconError::InvalidSurface { role,
                                                          surface: surface.clone() });
            }
            if let Some(first) = roles.insert(surface.clone(), role) {
                return Err(LexiconError::DuplicateSurface { surface: surface.clone(),
                                                            first,
                                                            second: role });
            }
        }

        Ok(Self { surfaces, roles })
    }

    /// Parses a lexicon from a JSON object keyed by role name, e.g.
    /// `{"FUNCTION": "fn", "RETURN": "ret", ...}`.
    ///
    /// # Errors
    /// Returns `LexiconError::Json` for malformed JSON or unknown role names,
    /// and any validation error from [`Lexicon::new`].
    pub fn from_json(text: &str) -> Result<Self, LexiconError> {
        let surfaces: BTreeMap<Role, String> =
            serde_json::from_str(text).map_err(|e| LexiconError::Json { details: e.to_string() })?;
        Self::new(surfaces)
    }

    /// Reads a JSON lexicon file.
    ///
    /// # Errors
    /// Returns `LexiconError::Io` if the file cannot be read, otherwise as
    /// [`Lexicon::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LexiconError::Io { path:    path.display()
                                                                                            .to_string(),
                                                                                details: e.to_string(), })?;
        Self::from_json(&text)
    }

    /// Derives a lexicon from a keyword list by shuffling it with a seeded
    /// generator and assigning the first words to the roles in canonical
    /// order.
    ///
    /// Blank entries are ignored and surrounding whitespace is trimmed, so a
    /// keyword file can be passed in line by line. The same words and seed
    /// always produce the same lexicon.
    ///
    /// # Errors
    /// Returns `LexiconError::NotEnoughKeywords` if fewer words than roles
    /// remain, and any validation error from [`Lexicon::new`].
    ///
    /// # Example
    /// ```
    /// use lexiscript::lexicon::Lexicon;
    ///
    /// let words = (0..20).map(|i| format!("w{i}")).collect::<Vec<_>>();
    ///
    /// let a = Lexicon::from_keywords(&words, 7).unwrap();
    /// let b = Lexicon::from_keywords(&words, 7).unwrap();
    /// assert_eq!(a, b);
    ///
    /// assert!(Lexicon::from_keywords(&words[..5], 7).is_err());
    /// ```
    pub fn from_keywords<S>(words: &[S], seed: u64) -> Result<Self, LexiconError>
        where S: AsRef<str>
    {
        let mut words = words.iter()
                             .map(|w| w.as_ref().trim())
                             .filter(|w| !w.is_empty())
                             .collect::<Vec<_>>();

        if words.len() < Role::ALL.len() {
            return Err(LexiconError::NotEnoughKeywords { needed: Role::ALL.len(),
                                                         found:  words.len(), });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        words.shuffle(&mut rng);

        let surfaces = Role::ALL.iter()
                                .zip(words)
                                .map(|(role, word)| (*role, word.to_string()))
                                .collect();
        Self::new(surfaces)
    }

    /// The surface token spelling `role`.
    #[must_use]
    pub fn surface(&self, role: Role) -> &str {
        self.surfaces.get(&role).map_or("", String::as_str)
    }

    /// The role a word plays, or `None` for an ordinary identifier.
    #[must_use]
    pub fn role(&self, word: &str) -> Option<Role> {
        self.roles.get(word).copied()
    }

    /// Iterates over `(role, surface)` pairs in canonical role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.surfaces
            .iter()
            .map(|(role, surface)| (*role, surface.as_str()))
    }

    /// Renders the mapping as a pretty-printed JSON object, the same shape
    /// [`Lexicon::from_json`] accepts.
    ///
    /// # Errors
    /// Returns `LexiconError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, LexiconError> {
        serde_json::to_string_pretty(&self.surfaces).map_err(|e| LexiconError::Json { details:
                                                                                         e.to_string() })
    }
}

/// Tests whether `word` matches `[A-Za-z_][A-Za-z0-9_]*`.
///
/// ## Example
/// ```
/// use lexiscript::lexicon::is_identifier;
///
/// assert!(is_identifier("_tmp1"));
/// assert!(!is_identifier("1st"));
/// assert!(!is_identifier("a-b"));
/// ```
#[must_use]
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next()
         .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
