//! Photo collage state: entries, the pending "add" flow, z-order and the
//! held photo. Owned by the collage view and mutated only through these
//! methods; nothing here touches the DOM.

use glam::DVec2;

pub type EntryIndex = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryPhase {
    /// No image chosen yet.
    Empty,
    /// Image loaded and shown, waiting for the add button.
    Previewing,
    /// Committed by an add.
    Placed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhotoEntry {
    index: EntryIndex,
    image: Option<String>,
    caption: String,
    position: DVec2,
    z_index: u32,
    phase: EntryPhase,
    generation: u32,
}

impl PhotoEntry {
    fn new(index: EntryIndex) -> Self {
        Self {
            index,
            image: None,
            caption: String::new(),
            position: DVec2::ZERO,
            z_index: 0,
            phase: EntryPhase::Empty,
            generation: 0,
        }
    }

    pub fn index(&self) -> EntryIndex {
        self.index
    }

    /// Data URL of the chosen image.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    pub fn phase(&self) -> EntryPhase {
        self.phase
    }
}

/// Identifies one file choice on one entry. A newer choice on the same entry
/// makes older tickets stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadTicket {
    pub entry: EntryIndex,
    generation: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickOutcome {
    pub z_index: u32,
    /// Whether the clicked entry is now held.
    pub held: bool,
    /// A different entry that this click let go of.
    pub released: Option<EntryIndex>,
}

#[derive(Clone, Debug, Default)]
pub struct CollageState {
    entries: Vec<PhotoEntry>,
    pending: bool,
    z_counter: u32,
    held: Option<EntryIndex>,
    commits: usize,
}

impl CollageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a page whose markup already holds `count` entries.
    pub fn with_entries(count: usize) -> Self {
        let mut state = Self::new();
        for _ in 0..count {
            state.register_entry();
        }
        state
    }

    pub fn register_entry(&mut self) -> EntryIndex {
        let index = self.entries.len();
        self.entries.push(PhotoEntry::new(index));
        index
    }

    pub fn entries(&self) -> &[PhotoEntry] {
        &self.entries
    }

    pub fn entry(&self, index: EntryIndex) -> Option<&PhotoEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of successful add commits.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    pub fn held(&self) -> Option<EntryIndex> {
        self.held
    }

    pub fn cursor(&self) -> Cursor {
        if self.held.is_some() {
            Cursor::Grabbing
        } else {
            Cursor::Grab
        }
    }

    /// A file was chosen for `index`. Any earlier read on that entry is
    /// superseded.
    pub fn begin_read(&mut self, index: EntryIndex) -> Option<ReadTicket> {
        let entry = self.entries.get_mut(index)?;
        entry.generation = entry.generation.wrapping_add(1);
        Some(ReadTicket {
            entry: index,
            generation: entry.generation,
        })
    }

    pub fn is_current(&self, ticket: ReadTicket) -> bool {
        self.entries
            .get(ticket.entry)
            .is_some_and(|entry| entry.generation == ticket.generation)
    }

    /// Store a finished read. Stale tickets are dropped and return false.
    pub fn finish_read(&mut self, ticket: ReadTicket, data_url: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let entry = &mut self.entries[ticket.entry];
        entry.image = Some(data_url);
        if entry.phase == EntryPhase::Empty {
            entry.phase = EntryPhase::Previewing;
        }
        self.pending = true;
        true
    }

    /// Commit the pending image and open a fresh entry. Without a pending
    /// image nothing changes.
    pub fn commit_add(&mut self) -> Option<EntryIndex> {
        if !self.pending {
            return None;
        }
        self.commits += 1;
        self.pending = false;
        for entry in self.entries.iter_mut() {
            if entry.phase == EntryPhase::Previewing {
                entry.phase = EntryPhase::Placed;
            }
        }
        Some(self.register_entry())
    }

    /// Bring `index` to the front and toggle whether it is held. Clicking a
    /// different entry while one is held releases the held one instead.
    pub fn click(&mut self, index: EntryIndex) -> Option<ClickOutcome> {
        let entry = self.entries.get_mut(index)?;
        self.z_counter += 1;
        entry.z_index = self.z_counter;

        let mut released = None;
        self.held = match self.held {
            Some(current) if current == index => None,
            Some(other) => {
                released = Some(other);
                None
            }
            None => Some(index),
        };
        Some(ClickOutcome {
            z_index: self.z_counter,
            held: self.held == Some(index),
            released,
        })
    }

    /// Move a held entry to `offset`. Returns the new offset, or `None` when
    /// the entry is not the held one.
    pub fn drag_to(&mut self, index: EntryIndex, offset: DVec2) -> Option<DVec2> {
        if self.held != Some(index) {
            return None;
        }
        let entry = self.entries.get_mut(index)?;
        entry.position = offset;
        Some(offset)
    }

    pub fn set_caption(&mut self, index: EntryIndex, text: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.caption = text.into();
                true
            }
            None => false,
        }
    }
}
