use std::fmt;

use chrono::NaiveDateTime;

use crate::category::Category;
use crate::{MiruError, Result};

/// Longest accepted series name, in UTF-16 code units (the `name` column is `VARCHAR(64)`).
pub const MAX_NAME_LEN: usize = 64;

/// Store-assigned row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(pub i64);

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stored status of a series. `None` in an `Option<Status>` means active.
///
/// Completed is not a status: it is derived from `seen == episodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Hold,
    Dropped,
    Planned,
}

impl Status {
    /// The text value persisted in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::Dropped => "dropped",
            Self::Planned => "planned",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hold" => Some(Self::Hold),
            "dropped" => Some(Self::Dropped),
            "planned" => Some(Self::Planned),
            _ => None,
        }
    }

    /// Status letter used while marking: `a` clears, `h`/`d`/`p` set.
    ///
    /// Returns `None` for letters that are not status keys, `Some(None)` for
    /// active and `Some(Some(_))` otherwise.
    pub fn from_marking_key(c: char) -> Option<Option<Self>> {
        match c {
            'a' => Some(None),
            'h' => Some(Some(Self::Hold)),
            'd' => Some(Some(Self::Dropped)),
            'p' => Some(Some(Self::Planned)),
            _ => None,
        }
    }
}

/// A tracked series as stored in the `series` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub id: SeriesId,
    pub name: String,
    pub episodes: u32,
    pub seen: u32,
    pub added: Option<NaiveDateTime>,
    pub completed: Option<NaiveDateTime>,
    pub status: Option<Status>,
}

impl Series {
    /// Watch one more episode.
    ///
    /// No-op at the ceiling. Every successful advance clears a non-null
    /// status, so a held, dropped or planned series moves back to watching
    /// (or completed) as soon as progress is made on it.
    pub fn advance(&mut self) -> bool {
        if self.seen >= self.episodes {
            return false;
        }
        self.seen += 1;
        if self.status.is_some() {
            self.status = None;
        }
        true
    }

    /// Un-watch one episode. No-op at zero; never touches the status.
    pub fn retreat(&mut self) -> bool {
        if self.seen == 0 {
            return false;
        }
        self.seen -= 1;
        true
    }

    /// Set the seen count directly, clamped to the episode count.
    pub fn set_seen(&mut self, seen: u64) {
        self.seen = seen.min(u64::from(self.episodes)) as u32;
    }

    pub fn is_complete(&self) -> bool {
        self.seen == self.episodes
    }

    /// The single category this series is listed under.
    pub fn category(&self) -> Category {
        Category::ALL
            .into_iter()
            .find(|c| c.matches(self))
            // Unreachable while seen <= episodes; treat overflowed rows as done.
            .unwrap_or(Category::Completed)
    }
}

/// Insert payload for a new series. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeries {
    pub name: String,
    pub episodes: u32,
    pub seen: u32,
    pub status: Option<Status>,
}

impl NewSeries {
    /// Build the record a user adds while looking at `category`.
    ///
    /// Series added to Completed start fully watched; series added to one of
    /// the status lists carry that status; everything else starts active at 0.
    pub fn for_category(category: Category, name: &str, episodes: u32) -> Result<Self> {
        let name = validate_name(name)?;
        let seen = if category == Category::Completed {
            episodes
        } else {
            0
        };
        Ok(Self {
            name,
            episodes,
            seen,
            status: category.status(),
        })
    }
}

/// Length of a name as the `name` column measures it: UTF-16 code units.
pub fn name_len(name: &str) -> usize {
    name.encode_utf16().count()
}

/// Trim a user-supplied name and check it fits the `name` column.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MiruError::InvalidName("name must not be empty".to_string()));
    }
    let len = name_len(trimmed);
    if len > MAX_NAME_LEN {
        return Err(MiruError::InvalidName(format!(
            "name is {len} units long, at most {MAX_NAME_LEN} allowed"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
pub(crate) fn sample(seen: u32, episodes: u32, status: Option<Status>) -> Series {
    Series {
        id: SeriesId(1),
        name: "Sample".to_string(),
        episodes,
        seen,
        added: None,
        completed: None,
        status,
    }
}
