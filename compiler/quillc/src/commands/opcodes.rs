//! `quill opcodes`: dump the opcode tables.

use std::io::Write;

use quill_bytecode::{ExtOpcode, Opcode, OpcodeFlags};

use super::CommandError;

pub fn list_opcodes(out: &mut dyn Write) -> Result<(), CommandError> {
    tracing::debug!(
        basic = Opcode::COUNT,
        extended = ExtOpcode::COUNT,
        "listing opcodes"
    );
    writeln!(out, "Basic opcodes ({}):", Opcode::COUNT)?;
    for &op in Opcode::ALL {
        write_row(out, op as u8, op.name(), op.stack_effect(), op.flags())?;
    }

    writeln!(out)?;
    writeln!(out, "Extended opcodes ({}):", ExtOpcode::COUNT)?;
    for &op in ExtOpcode::ALL {
        write_row(out, op as u8, op.name(), op.stack_effect(), op.flags())?;
    }
    Ok(())
}

fn write_row(
    out: &mut dyn Write,
    byte: u8,
    name: &str,
    stack_effect: i8,
    flags: OpcodeFlags,
) -> Result<(), CommandError> {
    write!(out, "  {byte:3} {name:<44} {stack_effect:+}")?;
    if !flags.is_empty() {
        write!(out, "  {flags:?}")?;
    }
    writeln!(out)?;
    Ok(())
}
