//! Model session: load a model into an arena, write inputs, invoke,
//! read outputs.
//!
//! A [`ModelSession`] is a caller-owned value rather than process-global
//! state: it only exists after a fully successful load, so there is no
//! half-initialized state to misuse, and dropping it frees the
//! interpreter and releases the arena borrow.

use std::mem;

use tracing::warn;

use crate::error::{Result, TflmError};
use crate::inference::{Engine, Interpreter};

/// A loaded model bound to a caller-owned tensor arena.
///
/// Borrows the model bytes and the arena for its entire lifetime; the
/// borrow checker enforces that both outlive the session and that the
/// arena is not shared with a second live session.
pub struct ModelSession<'a> {
    interpreter: Box<dyn Interpreter + 'a>,
    input_len: usize,
    output_len: usize,
}

impl std::fmt::Debug for ModelSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSession")
            .field("input_len", &self.input_len)
            .field("output_len", &self.output_len)
            .finish_non_exhaustive()
    }
}

impl<'a> ModelSession<'a> {
    /// Load a model and allocate its tensors inside `arena`.
    ///
    /// Checks the model's embedded schema version against the engine's
    /// compiled expectation before constructing anything; on mismatch no
    /// interpreter is built and the arena is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TflmError::SchemaMismatch`] on a version mismatch, or
    /// [`TflmError::ModelLoad`] if the buffer is unparseable or tensor
    /// allocation fails (typically an arena too small for the model).
    pub fn load<E: Engine>(engine: &E, model: &'a [u8], arena: &'a mut [u8]) -> Result<Self> {
        let expected = engine.expected_schema_version();
        let found = engine.model_schema_version(model)?;
        if found != expected {
            warn!(found, expected, "model schema version mismatch");
            return Err(TflmError::SchemaMismatch { found, expected });
        }

        let interpreter = engine.build(model, arena)?;
        let input_len = interpreter.input_bytes() / mem::size_of::<f32>();
        let output_len = interpreter.output_bytes() / mem::size_of::<f32>();

        Ok(Self {
            interpreter,
            input_len,
            output_len,
        })
    }

    /// Number of `f32` elements input tensor 0 holds.
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// Number of `f32` elements output tensor 0 holds.
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Arena bytes actually consumed by the runtime's planner.
    pub fn arena_used_bytes(&self) -> usize {
        self.interpreter.arena_used_bytes()
    }

    /// Write `value` into input tensor 0 at flat element offset `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TflmError::IndexOutOfRange`] without writing anything if
    /// `index` is not below [`input_len`](Self::input_len).
    pub fn set_input(&mut self, value: f32, index: usize) -> Result<()> {
        if index >= self.input_len {
            warn!(index, len = self.input_len, "input tensor index out of range");
            return Err(TflmError::IndexOutOfRange {
                tensor: "input",
                index,
                len: self.input_len,
            });
        }
        self.interpreter.write_input(index, value);
        Ok(())
    }

    /// Write `values` into input tensor 0 starting at element 0.
    ///
    /// # Errors
    ///
    /// Returns [`TflmError::IndexOutOfRange`] if `values` holds more
    /// elements than the input tensor; elements before the offending
    /// index have already been written.
    pub fn set_inputs(&mut self, values: &[f32]) -> Result<()> {
        for (index, &value) in values.iter().enumerate() {
            self.set_input(value, index)?;
        }
        Ok(())
    }

    /// Execute the loaded graph against the current input tensor
    /// contents.
    ///
    /// # Errors
    ///
    /// Returns [`TflmError::Inference`] carrying the engine's failure
    /// text if the engine reports a non-success status.
    pub fn invoke(&mut self) -> Result<()> {
        self.interpreter.invoke()
    }

    /// Read output tensor 0 at flat element offset `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TflmError::IndexOutOfRange`] if `index` is not below
    /// [`output_len`](Self::output_len).
    pub fn output(&self, index: usize) -> Result<f32> {
        if index >= self.output_len {
            warn!(index, len = self.output_len, "output tensor index out of range");
            return Err(TflmError::IndexOutOfRange {
                tensor: "output",
                index,
                len: self.output_len,
            });
        }
        Ok(self.interpreter.read_output(index))
    }

    /// Read all elements of output tensor 0 in order.
    pub fn outputs(&self) -> Vec<f32> {
        (0..self.output_len)
            .map(|index| self.interpreter.read_output(index))
            .collect()
    }
}
