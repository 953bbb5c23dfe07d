//! Input form state: the single/creator mode switch and the creator-mode
//! source rows.

use crate::intake::{CreatorAnalyzeRequest, ManualSourceEntry, MANUAL_ENTRY_TITLE};
use crate::types::{ManualPlatform, Platform, SessionKind};
use crate::ValidationError;

/// Which input section is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Single,
    Creator,
}

impl InputMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            InputMode::Single => InputMode::Creator,
            InputMode::Creator => InputMode::Single,
        }
    }

    /// Section visibility and button emphasis for this mode.
    #[must_use]
    pub fn view(self) -> ModeView {
        ModeView {
            single_section_visible: self == InputMode::Single,
            creator_section_visible: self == InputMode::Creator,
            primary_button: self,
        }
    }

    /// Kind of session a submission from this mode creates.
    #[must_use]
    pub fn session_kind(self) -> SessionKind {
        match self {
            InputMode::Single => SessionKind::Single,
            InputMode::Creator => SessionKind::Creator,
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputMode::Single => write!(f, "single"),
            InputMode::Creator => write!(f, "creator"),
        }
    }
}

/// What the input page shows for a given [`InputMode`]. Exactly one section
/// is visible and its button carries the primary emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeView {
    pub single_section_visible: bool,
    pub creator_section_visible: bool,
    pub primary_button: InputMode,
}

/// Stable handle for a creator-form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u32);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Url {
        id: RowId,
        value: String,
    },
    Manual {
        id: RowId,
        platform: ManualPlatform,
        text: String,
    },
}

impl Row {
    fn id(&self) -> RowId {
        match self {
            Row::Url { id, .. } | Row::Manual { id, .. } => *id,
        }
    }
}

/// Creator-mode form: a creator name plus a growing list of URL and
/// manual-entry rows. Rows keep insertion order and can be removed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatorForm {
    name: String,
    rows: Vec<Row>,
    next_id: u32,
}

impl CreatorForm {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn add_url_row(&mut self, url: &str) -> RowId {
        let id = self.next_row_id();
        self.rows.push(Row::Url {
            id,
            value: url.to_string(),
        });
        id
    }

    pub fn add_manual_row(&mut self, platform: ManualPlatform, text: &str) -> RowId {
        let id = self.next_row_id();
        self.rows.push(Row::Manual {
            id,
            platform,
            text: text.to_string(),
        });
        id
    }

    /// Remove a row. Returns `false` if no row has that id.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id() != id);
        self.rows.len() != before
    }

    /// Non-blank URL rows, trimmed, in row order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                Row::Url { value, .. } => Some(value.trim()),
                Row::Manual { .. } => None,
            })
            .filter(|url| !url.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Manual rows whose text is not blank. Text is sent untrimmed.
    #[must_use]
    pub fn manual_entries(&self) -> Vec<ManualSourceEntry> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                Row::Manual { platform, text, .. } if !text.trim().is_empty() => {
                    Some(ManualSourceEntry {
                        platform: *platform,
                        text: text.clone(),
                        title: MANUAL_ENTRY_TITLE.to_string(),
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// Validate the form and build the creator request.
    ///
    /// The name is checked first, so a blank name fails no matter how many
    /// rows are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingCreatorName`] for a blank name and
    /// [`ValidationError::NoCreatorSources`] when neither a URL nor a manual
    /// entry with text is present.
    pub fn submission(&self) -> Result<CreatorAnalyzeRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingCreatorName);
        }

        let urls = self.urls();
        let manual_data = self.manual_entries();
        if urls.is_empty() && manual_data.is_empty() {
            return Err(ValidationError::NoCreatorSources);
        }

        Ok(CreatorAnalyzeRequest {
            name: name.to_string(),
            urls,
            manual_data,
        })
    }

    fn next_row_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Guess the platform a URL belongs to from its host.
#[must_use]
pub fn identify_platform(url: &str) -> Platform {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        Platform::Youtube
    } else if url.contains("reddit.com") {
        Platform::Reddit
    } else {
        Platform::Other
    }
}
