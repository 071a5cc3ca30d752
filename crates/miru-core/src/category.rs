use crate::series::{Series, Status};

/// One of the five status-filtered lists.
///
/// The predicates partition the series table: a fully watched series is
/// always Completed, whatever its stored status says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Watching,
    Completed,
    Hold,
    Dropped,
    Planned,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Watching,
        Category::Completed,
        Category::Hold,
        Category::Dropped,
        Category::Planned,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Watching => "Currently Watching",
            Self::Completed => "Completed",
            Self::Hold => "On Hold",
            Self::Dropped => "Dropped",
            Self::Planned => "Plan to Watch",
        }
    }

    /// Status given to series added from this category.
    pub fn status(self) -> Option<Status> {
        match self {
            Self::Watching | Self::Completed => None,
            Self::Hold => Some(Status::Hold),
            Self::Dropped => Some(Status::Dropped),
            Self::Planned => Some(Status::Planned),
        }
    }

    /// `WHERE` clause selecting this category's rows.
    pub fn sql_predicate(self) -> &'static str {
        match self {
            Self::Watching => "status IS NULL AND seen < episodes",
            Self::Completed => "seen = episodes",
            Self::Hold => "status = 'hold' AND seen < episodes",
            Self::Dropped => "status = 'dropped' AND seen < episodes",
            Self::Planned => "status = 'planned' AND seen < episodes",
        }
    }

    /// Same predicate as [`sql_predicate`](Self::sql_predicate), evaluated in memory.
    pub fn matches(self, series: &Series) -> bool {
        let unfinished = series.seen < series.episodes;
        match self {
            Self::Watching => series.status.is_none() && unfinished,
            Self::Completed => series.seen == series.episodes,
            Self::Hold | Self::Dropped | Self::Planned => {
                series.status == self.status() && unfinished
            }
        }
    }
}

/// Column a list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderField {
    #[default]
    Name,
    Seen,
    Episodes,
}

impl OrderField {
    /// Letter selecting this field in the order-by prompt.
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Name),
            's' => Some(Self::Seen),
            'e' => Some(Self::Episodes),
            _ => None,
        }
    }

    /// Parse a config or CLI value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "seen" => Some(Self::Seen),
            "episodes" => Some(Self::Episodes),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Seen => "seen",
            Self::Episodes => "episodes",
        }
    }

    /// `ORDER BY` clause; ties fall back to insertion order.
    pub fn sql_order(self) -> &'static str {
        match self {
            Self::Name => "name, id",
            Self::Seen => "seen, id",
            Self::Episodes => "episodes, id",
        }
    }
}
