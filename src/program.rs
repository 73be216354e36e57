use log::debug;

use crate::channel::Channel;
use crate::error::Error;
use crate::inst::{Inst, tokenize};

/// Number of byte cells on the tape. The tape never grows.
pub const TAPE_LEN: usize = 64_000;

/// A tokenized program together with everything needed to run it: the
/// memory tape, the data cursor, and the instruction cursor.
///
/// Construction tokenizes eagerly and validates loop brackets, so a step
/// never scans for a match: each bracket's partner comes from a table
/// built once. A program is created from one source unit, driven to
/// completion with [`Program::step`] (or [`Program::run`]), and
/// discarded; there is no reset.
#[derive(Debug)]
pub struct Program {
    insts: Vec<Inst>,
    jumps: Vec<usize>,
    tape: Box<[u8]>,
    cursor: isize,
    pc: usize,
    finished: bool,
}

impl Program {
    /// Tokenize `source` and set up a zeroed tape with both cursors at 0.
    ///
    /// Fails with [`Error::UnbalancedLoop`] if any bracket lacks a match.
    pub fn new(source: &str) -> Result<Self, Error> {
        let insts = tokenize(source);
        let jumps = match_loops(&insts)?;
        debug!("tokenized {} instructions", insts.len());

        let finished = insts.is_empty();
        Ok(Self {
            insts,
            jumps,
            tape: vec![0u8; TAPE_LEN].into_boxed_slice(),
            cursor: 0,
            pc: 0,
            finished,
        })
    }

    /// Execute one instruction, advance the instruction cursor, and
    /// recompute [`Program::finished`].
    ///
    /// A step on a finished program does nothing. A step that fails
    /// leaves the cursors where they were.
    pub fn step<C: Channel>(&mut self, io: &mut C) -> Result<(), Error> {
        if self.finished {
            return Ok(());
        }

        let next = match self.insts[self.pc] {
            Inst::Comment => self.pc + 1,
            Inst::Right => {
                self.cursor += 1;
                self.pc + 1
            }
            Inst::Left => {
                self.cursor -= 1;
                self.pc + 1
            }
            Inst::Inc => {
                let cell = self.cell_mut()?;
                *cell = cell.wrapping_add(1);
                self.pc + 1
            }
            Inst::Dec => {
                let cell = self.cell_mut()?;
                *cell = cell.wrapping_sub(1);
                self.pc + 1
            }
            Inst::Print => {
                io.write_byte(self.cell()?)?;
                self.pc + 1
            }
            Inst::Read => {
                // End of input leaves the cell untouched.
                let cell = self.cell_mut()?;
                if let Some(byte) = io.read_byte()? {
                    *cell = byte;
                }
                self.pc + 1
            }
            Inst::LoopOpen => {
                if self.cell()? == 0 {
                    // Land past the matching close, skipping the body.
                    self.jumps[self.pc] + 1
                } else {
                    self.pc + 1
                }
            }
            // The close never reads the cell: it lands back on the
            // matching open, which re-tests on the next step.
            Inst::LoopClose => self.jumps[self.pc],
        };

        self.pc = next;
        self.finished = self.pc >= self.insts.len();
        Ok(())
    }

    /// Drive the program to completion.
    pub fn run<C: Channel>(&mut self, io: &mut C) -> Result<(), Error> {
        while !self.finished {
            self.step(io)?;
        }
        Ok(())
    }

    /// True once the instruction cursor has passed the last instruction.
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn instructions(&self) -> &[Inst] {
        &self.insts
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    /// Index into the tape. May be out of bounds; only a cell access
    /// there fails.
    pub fn data_cursor(&self) -> isize {
        self.cursor
    }

    /// Index of the next instruction to execute.
    pub fn instruction_cursor(&self) -> usize {
        self.pc
    }

    fn cell(&self) -> Result<u8, Error> {
        Ok(self.tape[self.cell_index()?])
    }

    fn cell_mut(&mut self) -> Result<&mut u8, Error> {
        let idx = self.cell_index()?;
        Ok(&mut self.tape[idx])
    }

    /// Bounds check for the cell under the data cursor.
    fn cell_index(&self) -> Result<usize, Error> {
        if self.cursor < 0 {
            return Err(Error::TapeUnderflow {
                cursor: self.cursor,
            });
        }
        let idx = self.cursor as usize;
        if idx >= self.tape.len() {
            return Err(Error::TapeOverflow {
                cursor: self.cursor,
                len: self.tape.len(),
            });
        }
        Ok(idx)
    }
}

/// Build the bracket-match table with a single stack pass.
///
/// `jumps[i]` is the partner position for every bracket at `i`, and
/// unused at every other position. Rejecting unmatched brackets here
/// means the engine never runs a jump off the end of the instruction
/// sequence.
fn match_loops(insts: &[Inst]) -> Result<Vec<usize>, Error> {
    let mut jumps = vec![0usize; insts.len()];
    let mut stack = Vec::new();

    for (i, inst) in insts.iter().enumerate() {
        match inst {
            Inst::LoopOpen => stack.push(i),
            Inst::LoopClose => {
                let Some(open) = stack.pop() else {
                    return Err(Error::UnbalancedLoop {
                        symbol: ']',
                        offset: i,
                    });
                };
                jumps[open] = i;
                jumps[i] = open;
            }
            _ => {}
        }
    }

    // Report the earliest open bracket still waiting for its close.
    if let Some(&open) = stack.first() {
        return Err(Error::UnbalancedLoop {
            symbol: '[',
            offset: open,
        });
    }

    Ok(jumps)
}
