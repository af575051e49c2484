//! User-facing indexes.
//!
//! Listings number entries 1, 2, 3... by their position in the full
//! collection, even when a filter hides some of them, so the number a user
//! reads in a filtered view is the same one every command accepts. Indexes
//! are translated to record ids at the moment a command runs; stores never
//! see them.

use crate::filter::PositionedPlaylist;
use crate::model::{Photocard, PlaylistLink};
use std::fmt;
use std::str::FromStr;

/// A 1-based position as shown in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(usize);

impl DisplayIndex {
    pub fn from_position(position: usize) -> Self {
        DisplayIndex(position + 1)
    }

    /// Zero-based position in the collection.
    pub fn position(&self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        match digits.parse::<usize>() {
            Ok(n) if n > 0 => Ok(DisplayIndex(n)),
            // Too large for any listing, so it simply matches nothing.
            Err(_) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(DisplayIndex(usize::MAX))
            }
            _ => Err(format!(
                "Invalid index: {} (expected a number from the listing, starting at 1)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCard {
    pub index: DisplayIndex,
    pub card: Photocard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPlaylist {
    pub index: DisplayIndex,
    pub link: PlaylistLink,
}

impl From<PositionedPlaylist> for DisplayPlaylist {
    fn from(p: PositionedPlaylist) -> Self {
        Self {
            index: DisplayIndex::from_position(p.position),
            link: p.link,
        }
    }
}

/// Number `visible` by where each card sits in `snapshot`.
pub fn index_cards(snapshot: &[Photocard], visible: Vec<Photocard>) -> Vec<DisplayCard> {
    visible
        .into_iter()
        .filter_map(|card| {
            let position = snapshot.iter().position(|c| c.id == card.id)?;
            Some(DisplayCard {
                index: DisplayIndex::from_position(position),
                card,
            })
        })
        .collect()
}
