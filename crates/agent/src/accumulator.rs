//! Reassembly of fragmented tool-call deltas.
//!
//! Streaming providers deliver each tool call in pieces: the id and name
//! usually arrive on the first fragment, the arguments as a sequence of
//! partial strings. Fragments are keyed by a turn-local index so parallel
//! calls interleave safely.

use scout_core::message::ToolCallDescriptor;
use scout_core::provider::ToolCallFragment;

/// One tool call being assembled from fragments.
///
/// All fields start empty; a record whose `name` is still empty by the end
/// of the turn was never completed and must not be executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// Accumulates tool-call fragments for a single model turn.
#[derive(Debug, Default)]
pub struct DeltaAccumulator {
    records: Vec<PendingToolCall>,
}

impl DeltaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one fragment.
    ///
    /// The record vector grows to cover the fragment's index, filling any
    /// gap with empty records. `id` and `name` overwrite on every arrival;
    /// `arguments` concatenates in arrival order.
    pub fn apply(&mut self, fragment: &ToolCallFragment) {
        let index = fragment.index as usize;
        while self.records.len() <= index {
            self.records.push(PendingToolCall::default());
        }

        let record = &mut self.records[index];
        if let Some(id) = &fragment.id {
            record.id = id.clone();
        }
        if let Some(name) = &fragment.name {
            record.name = name.clone();
        }
        if let Some(arguments) = &fragment.arguments {
            record.arguments.push_str(arguments);
        }
    }

    /// All records in index order, including unnamed placeholders.
    pub fn records(&self) -> &[PendingToolCall] {
        &self.records
    }

    /// Whether any record carries a function name.
    pub fn has_named_call(&self) -> bool {
        self.records.iter().any(|r| !r.name.is_empty())
    }

    /// Descriptors for the named records, in index order.
    ///
    /// Unnamed records are dropped here and never reach the transcript.
    pub fn to_descriptors(&self) -> Vec<ToolCallDescriptor> {
        self.records
            .iter()
            .filter(|r| !r.name.is_empty())
            .map(|r| ToolCallDescriptor {
                id: r.id.clone(),
                name: r.name.clone(),
                arguments: r.arguments.clone(),
            })
            .collect()
    }
}
