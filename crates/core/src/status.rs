//! Cable status vocabularies for the two tracking sources.
//!
//! Both domains use single-letter codes (e.g. `B`) and are ranked on a
//! shared scale, so each is declared as its own nominal type through
//! [`define_status_vocabulary!`]. Nothing converts between them implicitly;
//! the only bridge is [`MasterStatus::from_work_status`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Behaviour shared by every status domain.
pub trait StatusVocabulary: Copy + Eq + Sized + 'static {
    /// Member returned for empty or unrecognized input.
    const DEFAULT: Self;
    /// Every member, highest rank first.
    const ALL: &'static [Self];

    /// Single-letter code used by upstream spreadsheets.
    fn code(self) -> char;

    /// Position in the total order used for regression detection.
    fn rank(self) -> i32;

    /// Canonical member name, used for display and storage.
    fn as_str(self) -> &'static str;

    /// Parse free text permissively.
    ///
    /// The first character of the trimmed input selects the member by its
    /// letter code, case-insensitively, so both `"p"` and `"Posato"` resolve
    /// to the same member. Anything else resolves to [`Self::DEFAULT`].
    fn parse_lenient(raw: &str) -> Self {
        raw.trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .and_then(|c| Self::ALL.iter().copied().find(|s| s.code() == c))
            .unwrap_or(Self::DEFAULT)
    }
}

macro_rules! define_status_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident (default = $default:ident) {
            $( $(#[$vmeta:meta])* $variant:ident = ($code:literal, $rank:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl StatusVocabulary for $name {
            const DEFAULT: Self = Self::$default;
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn code(self) -> char {
                match self {
                    $( Self::$variant => $code ),+
                }
            }

            fn rank(self) -> i32 {
                match self {
                    $( Self::$variant => $rank ),+
                }
            }

            fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant) ),+
                }
            }
        }

        impl $name {
            /// Parse free text, falling back to the domain default. Never fails.
            pub fn parse(raw: &str) -> Self {
                <Self as StatusVocabulary>::parse_lenient(raw)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.rank().cmp(&other.rank())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_status_vocabulary! {
    /// Lifecycle status reported by the primary (work) tracking source.
    WorkStatus (default = Libero) {
        /// Laid and complete.
        Posato = ('P', 50),
        Tagliato = ('T', 40),
        Richiesta = ('R', 30),
        /// Not yet requested.
        Libero = ('L', 20),
        Bloccato = ('B', 10),
        Eliminato = ('E', 0),
    }
}

define_status_vocabulary! {
    /// Status held by the secondary (master-record) tracking source.
    MasterStatus (default = NonPosato) {
        /// Fully installed. Terminal.
        Posato = ('P', 50),
        Tagliato = ('T', 40),
        Richiesto = ('R', 30),
        Bloccato = ('B', 20),
        Eliminato = ('E', 10),
        NonPosato = ('N', 0),
    }
}

impl MasterStatus {
    /// The terminal "fully complete" member.
    pub const TERMINAL: MasterStatus = MasterStatus::Posato;

    /// Project a work status onto the master-record vocabulary.
    pub fn from_work_status(status: WorkStatus) -> Self {
        match status {
            WorkStatus::Posato => Self::Posato,
            WorkStatus::Tagliato => Self::Tagliato,
            WorkStatus::Richiesta => Self::Richiesto,
            WorkStatus::Libero => Self::NonPosato,
            WorkStatus::Bloccato => Self::Bloccato,
            WorkStatus::Eliminato => Self::Eliminato,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::TERMINAL
    }
}
