//=========================================================================
// Gestures
//=========================================================================
//
// Gesture vocabulary and registration state.
//
// Architecture:
//   Backend recognizer → GestureEvent → InputEventRouter
//                                         ├─ registered? → Game::gesture_event
//                                         └─ otherwise   → dropped
//
// `GestureSet` is a small bitset used both for the backend's capability
// descriptor (which kinds can be recognized at all) and for the
// registry (which kinds the application currently wants).
//
//=========================================================================

//=== GestureKind =========================================================

/// Kind of compound touch pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Swipe,
    Pinch,
    Tap,
    LongTap,
    Drag,
    Drop,
}

impl GestureKind {
    /// Every gesture kind, in declaration order.
    pub const ALL: [GestureKind; 6] = [
        GestureKind::Swipe,
        GestureKind::Pinch,
        GestureKind::Tap,
        GestureKind::LongTap,
        GestureKind::Drag,
        GestureKind::Drop,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

//=== SwipeDirection ======================================================

/// Direction of a swipe gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Decodes a native direction flag (1 = up, 2 = down, 4 = left, 8 = right).
    ///
    /// Returns `None` for zero or combined flags.
    pub fn from_native(flag: i32) -> Option<Self> {
        match flag {
            1 => Some(Self::Up),
            2 => Some(Self::Down),
            4 => Some(Self::Left),
            8 => Some(Self::Right),
            _ => None,
        }
    }
}

//=== GestureEvent ========================================================

/// Recognized gesture with its screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Swipe { x: i32, y: i32, direction: SwipeDirection },
    Pinch { x: i32, y: i32, scale: f32 },
    Tap { x: i32, y: i32 },
    /// `duration` is in milliseconds.
    LongTap { x: i32, y: i32, duration: f32 },
    Drag { x: i32, y: i32 },
    Drop { x: i32, y: i32 },
}

impl GestureEvent {
    /// Returns the kind used for registration checks.
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Swipe { .. } => GestureKind::Swipe,
            Self::Pinch { .. } => GestureKind::Pinch,
            Self::Tap { .. } => GestureKind::Tap,
            Self::LongTap { .. } => GestureKind::LongTap,
            Self::Drag { .. } => GestureKind::Drag,
            Self::Drop { .. } => GestureKind::Drop,
        }
    }

    /// Returns the screen position the gesture was recognized at.
    pub fn position(&self) -> (i32, i32) {
        match *self {
            Self::Swipe { x, y, .. }
            | Self::Pinch { x, y, .. }
            | Self::Tap { x, y }
            | Self::LongTap { x, y, .. }
            | Self::Drag { x, y }
            | Self::Drop { x, y } => (x, y),
        }
    }
}

//=== GestureSet ==========================================================

/// Set of gesture kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GestureSet(u8);

impl GestureSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b0011_1111);

    /// Builds a set from a list of kinds.
    pub fn of(kinds: &[GestureKind]) -> Self {
        kinds.iter().fold(Self::EMPTY, |set, kind| set.with(*kind))
    }

    /// Returns a copy of the set with `kind` added.
    pub fn with(self, kind: GestureKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub fn contains(&self, kind: GestureKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Adds `kind`; returns `true` if it was absent.
    pub fn insert(&mut self, kind: GestureKind) -> bool {
        let absent = !self.contains(kind);
        self.0 |= kind.bit();
        absent
    }

    /// Removes `kind`; returns `true` if it was present.
    pub fn remove(&mut self, kind: GestureKind) -> bool {
        let present = self.contains(kind);
        self.0 &= !kind.bit();
        present
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the contained kinds in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = GestureKind> + '_ {
        GestureKind::ALL.into_iter().filter(|kind| self.contains(*kind))
    }
}

//=== GestureRegistry =====================================================

/// Tracks which gesture kinds are supported and which are registered.
///
/// Support comes from the backend's capability descriptor and never
/// changes. Registration is independent of support: an application may
/// register a kind the backend will never produce.
#[derive(Debug, Clone)]
pub struct GestureRegistry {
    supported: GestureSet,
    registered: GestureSet,
}

impl GestureRegistry {
    pub fn new(supported: GestureSet) -> Self {
        Self {
            supported,
            registered: GestureSet::EMPTY,
        }
    }

    pub fn is_supported(&self, kind: GestureKind) -> bool {
        self.supported.contains(kind)
    }

    /// Registers `kind`; returns `true` if registration changed.
    pub fn register(&mut self, kind: GestureKind) -> bool {
        self.registered.insert(kind)
    }

    /// Unregisters `kind`; returns `true` if registration changed.
    pub fn unregister(&mut self, kind: GestureKind) -> bool {
        self.registered.remove(kind)
    }

    pub fn is_registered(&self, kind: GestureKind) -> bool {
        self.registered.contains(kind)
    }

    pub fn registered(&self) -> GestureSet {
        self.registered
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
