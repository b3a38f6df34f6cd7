//! Safe wrappers for the micro-runtime bridge.
//!
//! This module provides the production [`Engine`] implementation over the
//! C++ bridge compiled by the build script. Handles returned by the
//! bridge are owned here and freed on drop.

use std::ffi::CStr;
use std::marker::PhantomData;
use std::mem;

use super::engine::{Engine, Interpreter};
use super::ffi;
use crate::error::{Result, TflmError};

/// Get the last error message from the C++ bridge.
fn get_last_error() -> String {
    unsafe {
        let err_ptr = ffi::tflm_last_error();
        if err_ptr.is_null() {
            "Unknown error".to_string()
        } else {
            CStr::from_ptr(err_ptr).to_string_lossy().into_owned()
        }
    }
}

/// The micro inference runtime, bound over the C bridge.
///
/// # Example
///
/// ```ignore
/// use tflm_rs::inference::MicroEngine;
/// use tflm_rs::ModelSession;
///
/// let model_bytes = std::fs::read("model.tflite")?;
/// let mut arena = vec![0u8; 8 * 1024];
///
/// let engine = MicroEngine::new();
/// let mut session = ModelSession::load(&engine, &model_bytes, &mut arena)?;
///
/// session.set_input(3.0, 0)?;
/// session.invoke()?;
/// println!("output: {}", session.output(0)?);
/// ```
#[derive(Debug, Default)]
pub struct MicroEngine;

impl MicroEngine {
    /// Create a handle to the runtime.
    pub fn new() -> Self {
        Self
    }
}

impl Engine for MicroEngine {
    fn expected_schema_version(&self) -> u32 {
        unsafe { ffi::tflm_schema_version() }
    }

    fn model_schema_version(&self, model: &[u8]) -> Result<u32> {
        let handle = unsafe { ffi::tflm_model_from_buffer(model.as_ptr(), model.len()) };
        if handle.is_null() {
            return Err(TflmError::model_load(format!(
                "Failed to parse model buffer: {}",
                get_last_error()
            )));
        }
        Ok(unsafe { ffi::tflm_model_version(handle) })
    }

    fn build<'a>(
        &self,
        model: &'a [u8],
        arena: &'a mut [u8],
    ) -> Result<Box<dyn Interpreter + 'a>> {
        let model_handle = unsafe { ffi::tflm_model_from_buffer(model.as_ptr(), model.len()) };
        if model_handle.is_null() {
            return Err(TflmError::model_load(format!(
                "Failed to parse model buffer: {}",
                get_last_error()
            )));
        }

        let handle = unsafe {
            ffi::tflm_interpreter_create(model_handle, arena.as_mut_ptr(), arena.len())
        };
        if handle.is_null() {
            return Err(TflmError::model_load(format!(
                "Failed to create interpreter: {}",
                get_last_error()
            )));
        }

        let status = unsafe { ffi::tflm_allocate_tensors(handle) };
        if status != 0 {
            unsafe { ffi::tflm_interpreter_free(handle) };
            return Err(TflmError::model_load(format!(
                "Tensor allocation failed: {}",
                get_last_error()
            )));
        }

        let input = unsafe { ffi::tflm_input_tensor(handle, 0) };
        let output = unsafe { ffi::tflm_output_tensor(handle, 0) };
        if input.is_null() || output.is_null() {
            unsafe { ffi::tflm_interpreter_free(handle) };
            return Err(TflmError::model_load(
                "Model has no input or output tensor at index 0",
            ));
        }

        Ok(Box::new(MicroInterpreter {
            handle,
            input,
            output,
            _buffers: PhantomData,
        }))
    }
}

/// An interpreter constructed by [`MicroEngine`].
///
/// Holds the bridge's interpreter handle plus the resolved input and
/// output tensor 0 handles. The lifetime parameter ties it to the model
/// bytes and arena it was built over. Not `Send`: the underlying
/// interpreter is single-threaded state.
pub struct MicroInterpreter<'a> {
    handle: ffi::InterpreterHandle,
    input: ffi::TensorHandle,
    output: ffi::TensorHandle,
    _buffers: PhantomData<&'a mut [u8]>,
}

impl Interpreter for MicroInterpreter<'_> {
    fn input_bytes(&self) -> usize {
        unsafe { ffi::tflm_tensor_bytes(self.input) }
    }

    fn output_bytes(&self) -> usize {
        unsafe { ffi::tflm_tensor_bytes(self.output) }
    }

    fn write_input(&mut self, index: usize, value: f32) {
        debug_assert!(index < self.input_bytes() / mem::size_of::<f32>());
        unsafe {
            *ffi::tflm_tensor_data_f32(self.input).add(index) = value;
        }
    }

    fn read_output(&self, index: usize) -> f32 {
        debug_assert!(index < self.output_bytes() / mem::size_of::<f32>());
        unsafe { *ffi::tflm_tensor_data_f32(self.output).add(index) }
    }

    fn invoke(&mut self) -> Result<()> {
        let status = unsafe { ffi::tflm_invoke(self.handle) };
        if status != 0 {
            return Err(TflmError::inference(get_last_error()));
        }
        Ok(())
    }

    fn arena_used_bytes(&self) -> usize {
        unsafe { ffi::tflm_arena_used_bytes(self.handle) }
    }
}

impl Drop for MicroInterpreter<'_> {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe {
                ffi::tflm_interpreter_free(self.handle);
            }
        }
    }
}
