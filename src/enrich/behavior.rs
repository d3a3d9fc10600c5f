//! Behavior classification for tracked interactions.
//!
//! A behavior is a small integer code describing the semantic intent of an
//! interaction. Codes are grouped in blocks (navigation, search, commerce,
//! account, social) and the blocks have gaps, so a numeric candidate is not
//! valid just because it parses.

use serde::{Deserialize, Serialize};

/// Semantic intent of a tracked interaction.
///
/// Serialized as its integer code on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Behavior {
    #[default]
    Undefined = 0,
    NavigationBack = 1,
    Navigation = 2,
    NavigationForward = 3,
    Apply = 4,
    Remove = 5,
    Sort = 6,
    Expand = 7,
    Reduce = 8,
    ContextMenu = 9,
    Tab = 10,
    Copy = 11,
    Print = 13,
    Show = 14,
    Hide = 15,
    Maximize = 16,
    Minimize = 17,
    Download = 41,
    SearchAutoComplete = 60,
    Search = 61,
    SearchInitiate = 62,
    Purchase = 80,
    AddToCart = 81,
    ViewCart = 82,
    Checkout = 85,
    SignIn = 100,
    SignOut = 101,
    SocialShare = 120,
    SocialLike = 121,
}

impl From<Behavior> for i64 {
    fn from(behavior: Behavior) -> i64 {
        behavior.code()
    }
}

impl TryFrom<i64> for Behavior {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Behavior::from_code(code).ok_or_else(|| format!("invalid behavior code: {code}"))
    }
}

impl Behavior {
    /// Integer code for this member.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Look up a member by its integer code.
    pub fn from_code(code: i64) -> Option<Behavior> {
        use Behavior::*;
        match code {
            0 => Some(Undefined),
            1 => Some(NavigationBack),
            2 => Some(Navigation),
            3 => Some(NavigationForward),
            4 => Some(Apply),
            5 => Some(Remove),
            6 => Some(Sort),
            7 => Some(Expand),
            8 => Some(Reduce),
            9 => Some(ContextMenu),
            10 => Some(Tab),
            11 => Some(Copy),
            13 => Some(Print),
            14 => Some(Show),
            15 => Some(Hide),
            16 => Some(Maximize),
            17 => Some(Minimize),
            41 => Some(Download),
            60 => Some(SearchAutoComplete),
            61 => Some(Search),
            62 => Some(SearchInitiate),
            80 => Some(Purchase),
            81 => Some(AddToCart),
            82 => Some(ViewCart),
            85 => Some(Checkout),
            100 => Some(SignIn),
            101 => Some(SignOut),
            120 => Some(SocialShare),
            121 => Some(SocialLike),
            _ => None,
        }
    }

    /// Look up a member by its declared name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Behavior> {
        use Behavior::*;
        match name {
            "Undefined" => Some(Undefined),
            "NavigationBack" => Some(NavigationBack),
            "Navigation" => Some(Navigation),
            "NavigationForward" => Some(NavigationForward),
            "Apply" => Some(Apply),
            "Remove" => Some(Remove),
            "Sort" => Some(Sort),
            "Expand" => Some(Expand),
            "Reduce" => Some(Reduce),
            "ContextMenu" => Some(ContextMenu),
            "Tab" => Some(Tab),
            "Copy" => Some(Copy),
            "Print" => Some(Print),
            "Show" => Some(Show),
            "Hide" => Some(Hide),
            "Maximize" => Some(Maximize),
            "Minimize" => Some(Minimize),
            "Download" => Some(Download),
            "SearchAutoComplete" => Some(SearchAutoComplete),
            "Search" => Some(Search),
            "SearchInitiate" => Some(SearchInitiate),
            "Purchase" => Some(Purchase),
            "AddToCart" => Some(AddToCart),
            "ViewCart" => Some(ViewCart),
            "Checkout" => Some(Checkout),
            "SignIn" => Some(SignIn),
            "SignOut" => Some(SignOut),
            "SocialShare" => Some(SocialShare),
            "SocialLike" => Some(SocialLike),
            _ => None,
        }
    }
}

/// Resolve a behavior candidate into a validated member.
///
/// The candidate is first parsed as a base-10 integer; failing that it is
/// treated as a member name. The resulting code is then validated against
/// the declared members either way, so an out-of-range numeric candidate
/// falls back to [`Behavior::Undefined`] just like an unknown name.
pub fn resolve_behavior(candidate: Option<&str>) -> Behavior {
    let Some(candidate) = candidate else {
        return Behavior::Undefined;
    };

    let code = match candidate.trim().parse::<i64>() {
        Ok(numeric) => Some(numeric),
        Err(_) => Behavior::from_name(candidate).map(Behavior::code),
    };

    code.and_then(Behavior::from_code).unwrap_or_default()
}
