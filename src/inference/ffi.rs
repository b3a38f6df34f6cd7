//! FFI declarations for the C++ micro-runtime bridge.
//!
//! This module contains the raw FFI bindings. Use the safe wrappers
//! in the `micro` module instead of calling these directly.

use std::ffi::c_void;
use std::os::raw::c_char;

/// Opaque handle to a parsed model.
pub type ModelHandle = *const c_void;

/// Opaque handle to a constructed interpreter.
pub type InterpreterHandle = *mut c_void;

/// Opaque handle to a tensor owned by an interpreter.
pub type TensorHandle = *mut c_void;

extern "C" {
    // Model parsing
    pub fn tflm_model_from_buffer(data: *const u8, len: usize) -> ModelHandle;
    pub fn tflm_model_version(model: ModelHandle) -> u32;
    pub fn tflm_schema_version() -> u32;
    pub fn tflm_last_error() -> *const c_char;

    // Interpreter lifecycle
    pub fn tflm_interpreter_create(
        model: ModelHandle,
        arena: *mut u8,
        arena_size: usize,
    ) -> InterpreterHandle;
    pub fn tflm_interpreter_free(interpreter: InterpreterHandle);
    pub fn tflm_allocate_tensors(interpreter: InterpreterHandle) -> i32;
    pub fn tflm_arena_used_bytes(interpreter: InterpreterHandle) -> usize;

    // Tensor access
    pub fn tflm_input_tensor(interpreter: InterpreterHandle, index: usize) -> TensorHandle;
    pub fn tflm_output_tensor(interpreter: InterpreterHandle, index: usize) -> TensorHandle;
    pub fn tflm_tensor_bytes(tensor: TensorHandle) -> usize;
    pub fn tflm_tensor_data_f32(tensor: TensorHandle) -> *mut f32;

    // Execution
    pub fn tflm_invoke(interpreter: InterpreterHandle) -> i32;
}
