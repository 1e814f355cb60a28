//! Forward-reference bookkeeping
//!
//! An identifier with no binding yet gets a placeholder Symbol vertex and a
//! pending reference in the frame of the innermost block. When a block ends,
//! references to names that block declared are resolved by retargeting the
//! placeholder to the name's binding; the rest move to the enclosing frame.
//! Whatever reaches the root frame is a free identifier.

use super::symbol_table::SymbolTable;
use crate::errors::{ExtractError, Result};
use crate::features::ir_graph::{IrSession, VertexId};
use crate::shared::models::Span;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReference {
    pub name: String,
    pub placeholder: VertexId,
    pub span: Option<Span>,
}

#[derive(Debug, Default)]
struct Frame {
    pending: Vec<PendingReference>,
    declared: FxHashSet<String>,
}

#[derive(Debug)]
pub struct BackpatchTable {
    /// Root frame first
    frames: Vec<Frame>,
}

impl Default for BackpatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BackpatchTable {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Frame::default());
    }

    pub fn record(&mut self, reference: PendingReference) {
        if let Some(frame) = self.frames.last_mut() {
            frame.pending.push(reference);
        }
    }

    /// Note that the innermost block declares `name`
    pub fn declare(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.declared.insert(name.to_string());
        }
    }

    /// Close the innermost frame against the block's final table. Returns
    /// the number of references resolved.
    pub fn pop_frame(&mut self, session: &mut IrSession, table: &SymbolTable) -> Result<usize> {
        if self.frames.len() < 2 {
            return Err(ExtractError::invariant("backpatch frame underflow"));
        }
        let frame = self.frames.pop().unwrap_or_default();
        let mut resolved = 0;
        let mut unresolved = Vec::new();

        for reference in frame.pending {
            let target = if frame.declared.contains(&reference.name) {
                table.get(&reference.name).map(|v| session.canonical(v))
            } else {
                None
            };
            match target {
                Some(value) if value != reference.placeholder && !session.is_placeholder(value) => {
                    let edges = session.retarget(reference.placeholder, value)?;
                    tracing::trace!(
                        name = %reference.name,
                        placeholder = %reference.placeholder,
                        value = %value,
                        edges,
                        "backpatched forward reference"
                    );
                    resolved += 1;
                }
                _ => unresolved.push(reference),
            }
        }

        if let Some(parent) = self.frames.last_mut() {
            parent.pending.extend(unresolved);
        }
        Ok(resolved)
    }

    /// References that reached the root frame
    pub fn unresolved(&self) -> &[PendingReference] {
        self.frames
            .first()
            .map(|f| f.pending.as_slice())
            .unwrap_or(&[])
    }
}
