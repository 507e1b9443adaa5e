//! Spectrum keys and the tables that name them.
//!
//! Three mappings end up on a [`SpectrumKey`]:
//! 1. Joypad-mapping option values (`"a"`, `"Enter"`, `"<none>"`, ...).
//! 2. Host keyboard keys ([`RetroKey`]).
//! 3. Cells of the on-screen keyboard overlay ([`OVERLAY_KEYS`]).

use serde::Serialize;

/// Logical key on the 40-key Spectrum keyboard.
///
/// Each key maps to a (row, bit) pair in the 8×5 keyboard matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpectrumKey {
    // Half-row $FE
    CapsShift,
    Z,
    X,
    C,
    V,
    // Half-row $FD
    A,
    S,
    D,
    F,
    G,
    // Half-row $FB
    Q,
    W,
    E,
    R,
    T,
    // Half-row $F7
    N1,
    N2,
    N3,
    N4,
    N5,
    // Half-row $EF
    N0,
    N9,
    N8,
    N7,
    N6,
    // Half-row $DF
    P,
    O,
    I,
    U,
    Y,
    // Half-row $BF
    Enter,
    L,
    K,
    J,
    H,
    // Half-row $7F
    Space,
    SymShift,
    M,
    N,
    B,
}

impl SpectrumKey {
    /// (row, bit) of this key in the keyboard matrix.
    #[must_use]
    pub const fn matrix(self) -> (usize, u8) {
        let index = self as u8;
        ((index / 5) as usize, index % 5)
    }

    /// Caps Shift and Symbol Shift, which the overlay latches.
    #[must_use]
    pub const fn is_shift(self) -> bool {
        matches!(self, Self::CapsShift | Self::SymShift)
    }
}

/// Choices of the joypad-mapping options, in option order.
///
/// Index 0 means "no key"; every other entry resolves through
/// [`key_for_symbol`].
pub const KEY_SYMBOLS: [&str; 41] = [
    "<none>", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", //
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", //
    "n", "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z", //
    "Enter", "Caps", "Symbol", "Space",
];

/// Keys for [`KEY_SYMBOLS`], index for index.
const SYMBOL_KEYS: [Option<SpectrumKey>; 41] = {
    use SpectrumKey::*;
    [
        None,
        Some(N0),
        Some(N1),
        Some(N2),
        Some(N3),
        Some(N4),
        Some(N5),
        Some(N6),
        Some(N7),
        Some(N8),
        Some(N9),
        Some(A),
        Some(B),
        Some(C),
        Some(D),
        Some(E),
        Some(F),
        Some(G),
        Some(H),
        Some(I),
        Some(J),
        Some(K),
        Some(L),
        Some(M),
        Some(N),
        Some(O),
        Some(P),
        Some(Q),
        Some(R),
        Some(S),
        Some(T),
        Some(U),
        Some(V),
        Some(W),
        Some(X),
        Some(Y),
        Some(Z),
        Some(Enter),
        Some(CapsShift),
        Some(SymShift),
        Some(Space),
    ]
};

/// Key for a joypad-mapping choice index. Out-of-range means no key.
#[must_use]
pub fn key_for_symbol_index(index: usize) -> Option<SpectrumKey> {
    SYMBOL_KEYS.get(index).copied().flatten()
}

/// Key for a joypad-mapping choice value.
#[must_use]
pub fn key_for_symbol(symbol: &str) -> Option<SpectrumKey> {
    KEY_SYMBOLS
        .iter()
        .position(|&s| s == symbol)
        .and_then(key_for_symbol_index)
}

/// Keys of the on-screen keyboard, row by row as drawn.
pub const OVERLAY_KEYS: [[SpectrumKey; 10]; 4] = {
    use SpectrumKey::*;
    [
        [N1, N2, N3, N4, N5, N6, N7, N8, N9, N0],
        [Q, W, E, R, T, Y, U, I, O, P],
        [A, S, D, F, G, H, J, K, L, Enter],
        [CapsShift, Z, X, C, V, B, N, M, SymShift, Space],
    ]
};

/// Host keyboard keys the frontend understands.
///
/// Hosts translate their own key codes into these; anything else is
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetroKey {
    Return,
    Space,
    Backspace,
    Digit(u8),
    /// A letter, lower-case ASCII.
    Letter(char),
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftMeta,
    RightMeta,
    LeftSuper,
    RightSuper,
    Up,
    Down,
    Left,
    Right,
}

impl RetroKey {
    /// Every key a keyboard device is polled for.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut keys = vec![Self::Return, Self::Space, Self::Backspace];
        keys.extend((0..=9).map(Self::Digit));
        keys.extend(('a'..='z').map(Self::Letter));
        keys.extend([
            Self::LeftShift,
            Self::RightShift,
            Self::LeftCtrl,
            Self::RightCtrl,
            Self::LeftAlt,
            Self::RightAlt,
            Self::LeftMeta,
            Self::RightMeta,
            Self::LeftSuper,
            Self::RightSuper,
            Self::Up,
            Self::Down,
            Self::Left,
            Self::Right,
        ]);
        keys
    }
}

/// Spectrum keys pressed while a host key is held.
///
/// Empty for unmapped keys. Cursor keys and Backspace are Caps Shift
/// combinations, as on the 128K's extra keys.
#[must_use]
pub fn map_retro_key(key: RetroKey) -> &'static [SpectrumKey] {
    use SpectrumKey as K;
    match key {
        RetroKey::Return => &[K::Enter],
        RetroKey::Space => &[K::Space],
        RetroKey::Backspace => &[K::CapsShift, K::N0],
        RetroKey::Digit(d) => match d {
            0 => &[K::N0],
            1 => &[K::N1],
            2 => &[K::N2],
            3 => &[K::N3],
            4 => &[K::N4],
            5 => &[K::N5],
            6 => &[K::N6],
            7 => &[K::N7],
            8 => &[K::N8],
            9 => &[K::N9],
            _ => &[],
        },
        RetroKey::Letter(c) => letter_key(c),
        RetroKey::LeftShift | RetroKey::RightShift => &[K::CapsShift],
        RetroKey::LeftCtrl
        | RetroKey::RightCtrl
        | RetroKey::LeftAlt
        | RetroKey::RightAlt
        | RetroKey::LeftMeta
        | RetroKey::RightMeta
        | RetroKey::LeftSuper
        | RetroKey::RightSuper => &[K::SymShift],
        RetroKey::Up => &[K::CapsShift, K::N7],
        RetroKey::Down => &[K::CapsShift, K::N6],
        RetroKey::Left => &[K::CapsShift, K::N5],
        RetroKey::Right => &[K::CapsShift, K::N8],
    }
}

fn letter_key(c: char) -> &'static [SpectrumKey] {
    use SpectrumKey as K;
    match c.to_ascii_lowercase() {
        'a' => &[K::A],
        'b' => &[K::B],
        'c' => &[K::C],
        'd' => &[K::D],
        'e' => &[K::E],
        'f' => &[K::F],
        'g' => &[K::G],
        'h' => &[K::H],
        'i' => &[K::I],
        'j' => &[K::J],
        'k' => &[K::K],
        'l' => &[K::L],
        'm' => &[K::M],
        'n' => &[K::N],
        'o' => &[K::O],
        'p' => &[K::P],
        'q' => &[K::Q],
        'r' => &[K::R],
        's' => &[K::S],
        't' => &[K::T],
        'u' => &[K::U],
        'v' => &[K::V],
        'w' => &[K::W],
        'x' => &[K::X],
        'y' => &[K::Y],
        'z' => &[K::Z],
        _ => &[],
    }
}
