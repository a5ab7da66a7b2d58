//! Type-safe wrappers for node identities and levels.
//!
//! A diagram never stores pointers: nodes are named by a dense integer [`Uid`]
//! and placed on a level by their [`Label`]. Both are plain `Copy` values, so
//! a child slot can carry them around without borrowing anything.
use std::fmt;

/// A variable label, i.e. the level of a node (0-indexed).
///
/// # Invariants
///
/// - Label 0 is the topmost level (closest to the root)
/// - Labels strictly increase along every path towards the sinks
/// - [`Label::SINK`] is reserved for the two sinks and is larger than every
///   internal label
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Label(u32);

impl Label {
    /// The label shared by both sinks.
    pub const SINK: Label = Label(u32::MAX);

    /// Largest label an internal node may carry.
    pub const MAX: Label = Label(u32::MAX - 1);

    /// Creates a new label with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` collides with the reserved sink label.
    pub const fn new(index: u32) -> Self {
        assert!(index != u32::MAX, "Label u32::MAX is reserved for sinks");
        Label(index)
    }

    /// Returns the raw level index.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns the raw level index as a `usize`, for indexing assignments.
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub const fn is_sink(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sink() {
            write!(f, "L⊥")
        } else {
            write!(f, "L{}", self.0)
        }
    }
}

impl From<u32> for Label {
    fn from(index: u32) -> Self {
        Label::new(index)
    }
}

impl From<Label> for u32 {
    fn from(label: Label) -> Self {
        label.0
    }
}

/// A node identity.
///
/// Uids are only ever used as sort/join keys and array positions, never
/// dereferenced. The two largest values are reserved for the sinks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Uid(u64);

impl Uid {
    /// Identity of the `false` sink.
    pub const FALSE: Uid = Uid(u64::MAX - 1);
    /// Identity of the `true` sink.
    pub const TRUE: Uid = Uid(u64::MAX);

    /// Largest uid an internal node may carry.
    pub const MAX: Uid = Uid(u64::MAX - 2);

    /// Creates a new uid.
    ///
    /// # Panics
    ///
    /// Panics if `id` collides with one of the reserved sink identities.
    pub const fn new(id: u64) -> Self {
        assert!(id <= u64::MAX - 2, "Uids u64::MAX-1 and u64::MAX are reserved for sinks");
        Uid(id)
    }

    /// Returns the sink identity for the given boolean value.
    pub const fn sink(value: bool) -> Self {
        if value {
            Uid::TRUE
        } else {
            Uid::FALSE
        }
    }

    pub const fn id(self) -> u64 {
        self.0
    }

    pub const fn is_sink(self) -> bool {
        self.0 >= u64::MAX - 1
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Uid::FALSE => write!(f, "⊥"),
            Uid::TRUE => write!(f, "⊤"),
            Uid(id) => write!(f, "#{}", id),
        }
    }
}

impl From<u64> for Uid {
    fn from(id: u64) -> Self {
        Uid::new(id)
    }
}

impl From<Uid> for u64 {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}
