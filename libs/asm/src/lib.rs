//! x86-64 assembly output (Intel syntax, `noprefix` operand order).
//!
//! Each [`Instruction`] variant renders one fixed instruction template, or a
//! small fixed group where the machine demands it (conditional jumps,
//! division, frame entry). The working set is two registers: `eax` carries
//! every expression result, `edx` parks the left operand of a binary
//! operation while the right one is evaluated, and [`Instruction::Swap`] is
//! the only way values move between the two.

use std::fmt;
use std::io::{BufWriter, Write};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Load an immediate into register A: `mov eax, v`
    LoadImmediate(i32),
    /// Load frame slot `k` into register A. Slots are 1-based and 4 bytes
    /// wide, addressed below the frame pointer.
    LoadSlot(i32),
    /// Store register A into frame slot `k`
    StoreSlot(i32),
    /// Exchange the two working registers: `xchg eax, edx`
    Swap,
    /// A ← A + B
    Add,
    /// A ← A - B
    Subtract,
    /// A ← A * B
    Multiply,
    /// A ← A / B, truncating. `idiv` takes its dividend in `edx:eax`, so the
    /// divisor is moved aside to `ecx` before the sign extension.
    Divide,
    /// Branch to `label` when register A is zero
    JumpIfZero(String),
    Jump(String),
    Label(String),
    /// `.intel_syntax noprefix`, emitted once at the top of the file
    Preamble,
    /// `.globl name` plus the entry label
    FunctionPrologue(String),
    /// Save and re-establish the frame pointer, then reserve `n` 4-byte
    /// slots. The reservation line is omitted when `n` is zero.
    EnterFrame(usize),
    /// Restore the caller's stack and frame pointers: `leave`
    LeaveFrame,
    /// `ret`
    Return,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::LoadImmediate(value) => write!(f, "  mov eax, {}", value),
            Instruction::LoadSlot(slot) => {
                write!(f, "  mov eax, DWORD PTR [rbp-{}]", slot * 4)
            }
            Instruction::StoreSlot(slot) => {
                write!(f, "  mov DWORD PTR [rbp-{}], eax", slot * 4)
            }
            Instruction::Swap => write!(f, "  xchg eax, edx"),
            Instruction::Add => write!(f, "  add eax, edx"),
            Instruction::Subtract => write!(f, "  sub eax, edx"),
            Instruction::Multiply => write!(f, "  imul eax, edx"),
            Instruction::Divide => write!(f, "  mov ecx, edx\n  cdq\n  idiv ecx"),
            Instruction::JumpIfZero(label) => write!(f, "  cmp eax, 0\n  jz {}", label),
            Instruction::Jump(label) => write!(f, "  jmp {}", label),
            Instruction::Label(label) => write!(f, "{}:", label),
            Instruction::Preamble => write!(f, "  .intel_syntax noprefix"),
            Instruction::FunctionPrologue(name) => {
                write!(f, "\n  .globl {}\n{}:", name, name)
            }
            Instruction::EnterFrame(slots) => {
                write!(f, "  push rbp\n  mov rbp, rsp")?;
                if *slots > 0 {
                    write!(f, "\n  sub rsp, {}", slots * 4)?;
                }
                Ok(())
            }
            Instruction::LeaveFrame => write!(f, "  leave"),
            Instruction::Return => write!(f, "  ret"),
        }
    }
}

/// Append-only instruction buffer. Instructions are only ever pushed;
/// rendering preserves emission order exactly.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Assembly(Vec<Instruction>);

impl Deref for Assembly {
    type Target = Vec<Instruction>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Assembly {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Assembly {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self(instructions)
    }

    pub fn into_inner(self) -> Vec<Instruction> {
        self.0
    }

    pub fn write<W: Write>(&self, writer: &mut BufWriter<W>) -> Result<(), std::io::Error> {
        for instruction in &self.0 {
            writer.write_all(instruction.to_string().as_bytes())?;
            writer.write_all(b"\n")?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.0 {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_operands_scale_to_byte_offsets() {
        assert_eq!(
            Instruction::LoadSlot(1).to_string(),
            "  mov eax, DWORD PTR [rbp-4]"
        );
        assert_eq!(
            Instruction::StoreSlot(3).to_string(),
            "  mov DWORD PTR [rbp-12], eax"
        );
    }

    #[test]
    fn division_group_uses_a_scratch_divisor() {
        assert_eq!(
            Instruction::Divide.to_string(),
            "  mov ecx, edx\n  cdq\n  idiv ecx"
        );
    }

    #[test]
    fn conditional_jump_tests_register_a() {
        assert_eq!(
            Instruction::JumpIfZero(String::from("false0")).to_string(),
            "  cmp eax, 0\n  jz false0"
        );
    }

    #[test]
    fn empty_frame_reserves_no_stack() {
        assert_eq!(
            Instruction::EnterFrame(0).to_string(),
            "  push rbp\n  mov rbp, rsp"
        );
        assert_eq!(
            Instruction::EnterFrame(2).to_string(),
            "  push rbp\n  mov rbp, rsp\n  sub rsp, 8"
        );
    }

    #[test]
    fn rendering_preserves_emission_order() {
        let mut assembly = Assembly::default();
        assembly.push(Instruction::LoadImmediate(1));
        assembly.push(Instruction::Swap);
        assembly.push(Instruction::LoadImmediate(2));

        assert_eq!(
            assembly.to_string(),
            "  mov eax, 1\n  xchg eax, edx\n  mov eax, 2\n"
        );
    }
}
