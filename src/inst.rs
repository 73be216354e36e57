/// The Brainfuck instruction set.
///
/// Eight single-character instructions operate on a byte tape through a
/// data cursor. Every other character is a comment. Comments are kept in
/// the instruction stream rather than filtered out, so instruction
/// positions line up 1:1 with source character offsets (bracket errors
/// report source positions through this correspondence).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inst {
    /// Any character that is not one of the eight instruction symbols.
    Comment,
    /// `>`: move the data cursor one cell right.
    Right,
    /// `<`: move the data cursor one cell left.
    Left,
    /// `+`: increment the current cell, wrapping modulo 256.
    Inc,
    /// `-`: decrement the current cell, wrapping modulo 256.
    Dec,
    /// `.`: write the current cell to the output channel.
    Print,
    /// `,`: read one byte from the input channel into the current cell.
    Read,
    /// `[`: jump past the matching `]` when the current cell is zero.
    LoopOpen,
    /// `]`: jump back to the matching `[`, which re-tests the cell.
    LoopClose,
}

impl Inst {
    /// Map one source character to its instruction.
    pub fn from_char(c: char) -> Self {
        match c {
            '>' => Inst::Right,
            '<' => Inst::Left,
            '+' => Inst::Inc,
            '-' => Inst::Dec,
            '.' => Inst::Print,
            ',' => Inst::Read,
            '[' => Inst::LoopOpen,
            ']' => Inst::LoopClose,
            _ => Inst::Comment,
        }
    }

    /// Uppercase mnemonic for debug output. Comments have none.
    pub fn mnemonic(self) -> Option<&'static str> {
        match self {
            Inst::Comment => None,
            Inst::Right => Some("RIGHT"),
            Inst::Left => Some("LEFT"),
            Inst::Inc => Some("INC"),
            Inst::Dec => Some("DEC"),
            Inst::Print => Some("PRINT"),
            Inst::Read => Some("READ"),
            Inst::LoopOpen => Some("LOOPL"),
            Inst::LoopClose => Some("LOOPR"),
        }
    }
}

/// Tokenize source text into one instruction per character.
///
/// Total function: unrecognized characters become [`Inst::Comment`] rather
/// than being dropped, so the output length always equals the input's
/// character count.
pub fn tokenize(source: &str) -> Vec<Inst> {
    source.chars().map(Inst::from_char).collect()
}

/// Collect the mnemonics of the meaningful instructions, skipping comments.
pub fn mnemonics(insts: &[Inst]) -> Vec<&'static str> {
    insts.iter().filter_map(|i| i.mnemonic()).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tokenize_is_length_preserving(source in any::<String>()) {
            let insts = tokenize(&source);
            prop_assert_eq!(insts.len(), source.chars().count());
        }

        #[test]
        fn tokenize_is_deterministic(source in any::<String>()) {
            prop_assert_eq!(tokenize(&source), tokenize(&source));
        }
    }
}
