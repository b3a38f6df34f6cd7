//! Session contract tests against a fake engine.
//!
//! The fake stands in for the real runtime behind the `Engine` trait:
//! its "model format" is three bytes (schema version, input element
//! count, output element count) and its "graph" doubles every input
//! element into the output tensor.

use anyhow::Result;
use approx::assert_abs_diff_eq;
use tflm_rs::{Engine, Interpreter, ModelSession, TflmError};

const FAKE_SCHEMA_VERSION: u32 = 3;

/// Build a fake model buffer: [version, input_elems, output_elems].
fn fake_model(version: u8, input_elems: u8, output_elems: u8) -> Vec<u8> {
    vec![version, input_elems, output_elems]
}

struct FakeEngine {
    fail_invoke: bool,
}

impl FakeEngine {
    fn new() -> Self {
        Self { fail_invoke: false }
    }

    /// An engine whose interpreters always fail to execute.
    fn failing() -> Self {
        Self { fail_invoke: true }
    }
}

impl Engine for FakeEngine {
    fn expected_schema_version(&self) -> u32 {
        FAKE_SCHEMA_VERSION
    }

    fn model_schema_version(&self, model: &[u8]) -> tflm_rs::Result<u32> {
        model
            .first()
            .map(|&v| u32::from(v))
            .ok_or_else(|| TflmError::model_load("empty model buffer"))
    }

    fn build<'a>(
        &self,
        model: &'a [u8],
        arena: &'a mut [u8],
    ) -> tflm_rs::Result<Box<dyn Interpreter + 'a>> {
        if model.len() < 3 {
            return Err(TflmError::model_load("truncated model buffer"));
        }
        let input_elems = model[1] as usize;
        let output_elems = model[2] as usize;

        let needed = (input_elems + output_elems) * std::mem::size_of::<f32>();
        if arena.len() < needed {
            return Err(TflmError::model_load(format!(
                "arena too small: need {} bytes, have {}",
                needed,
                arena.len()
            )));
        }

        Ok(Box::new(FakeInterpreter {
            input: vec![0.0; input_elems],
            output: vec![0.0; output_elems],
            arena_used: needed,
            fail_invoke: self.fail_invoke,
        }))
    }
}

struct FakeInterpreter {
    input: Vec<f32>,
    output: Vec<f32>,
    arena_used: usize,
    fail_invoke: bool,
}

impl Interpreter for FakeInterpreter {
    fn input_bytes(&self) -> usize {
        self.input.len() * std::mem::size_of::<f32>()
    }

    fn output_bytes(&self) -> usize {
        self.output.len() * std::mem::size_of::<f32>()
    }

    fn write_input(&mut self, index: usize, value: f32) {
        self.input[index] = value;
    }

    fn read_output(&self, index: usize) -> f32 {
        self.output[index]
    }

    fn invoke(&mut self) -> tflm_rs::Result<()> {
        if self.fail_invoke {
            return Err(TflmError::inference("op dispatch failed"));
        }
        for (index, slot) in self.output.iter_mut().enumerate() {
            *slot = self.input[index % self.input.len().max(1)] * 2.0;
        }
        Ok(())
    }

    fn arena_used_bytes(&self) -> usize {
        self.arena_used
    }
}

#[test]
fn load_succeeds_with_matching_schema() {
    let model = fake_model(3, 4, 2);
    let mut arena = [0u8; 2048];

    let session = ModelSession::load(&FakeEngine::new(), &model, &mut arena).unwrap();
    assert_eq!(session.input_len(), 4);
    assert_eq!(session.output_len(), 2);
    assert_eq!(session.arena_used_bytes(), 24);
}

#[test]
fn load_rejects_schema_mismatch() {
    let model = fake_model(7, 1, 1);
    let mut arena = [0u8; 2048];

    let err = ModelSession::load(&FakeEngine::new(), &model, &mut arena).unwrap_err();
    assert!(matches!(
        err,
        TflmError::SchemaMismatch {
            found: 7,
            expected: FAKE_SCHEMA_VERSION,
        }
    ));
}

#[test]
fn failed_load_leaves_arena_reusable() {
    let engine = FakeEngine::new();
    let mut arena = [0u8; 64];

    let bad = fake_model(7, 1, 1);
    assert!(ModelSession::load(&engine, &bad, &mut arena).is_err());

    // A failed load yields no session; the arena is free for the next try.
    let good = fake_model(3, 1, 1);
    let session = ModelSession::load(&engine, &good, &mut arena).unwrap();
    assert_eq!(session.input_len(), 1);
}

#[test]
fn load_rejects_unparseable_buffer() {
    let mut arena = [0u8; 64];

    let err = ModelSession::load(&FakeEngine::new(), &[], &mut arena).unwrap_err();
    assert!(matches!(err, TflmError::ModelLoad(_)));
}

#[test]
fn load_rejects_arena_too_small() {
    let model = fake_model(3, 4, 2);
    let mut arena = [0u8; 8];

    let err = ModelSession::load(&FakeEngine::new(), &model, &mut arena).unwrap_err();
    match err {
        TflmError::ModelLoad(msg) => assert!(msg.contains("arena too small"), "{}", msg),
        other => panic!("expected ModelLoad, got {:?}", other),
    }
}

#[test]
fn set_input_bounds_checked() {
    let model = fake_model(3, 3, 1);
    let mut arena = [0u8; 64];
    let mut session = ModelSession::load(&FakeEngine::new(), &model, &mut arena).unwrap();

    for index in 0..3 {
        session.set_input(1.5, index).unwrap();
    }
    let err = session.set_input(1.5, 3).unwrap_err();
    assert!(matches!(
        err,
        TflmError::IndexOutOfRange {
            tensor: "input",
            index: 3,
            len: 3,
        }
    ));
}

#[test]
fn out_of_range_set_input_writes_nothing() {
    let model = fake_model(3, 1, 1);
    let mut arena = [0u8; 64];
    let mut session = ModelSession::load(&FakeEngine::new(), &model, &mut arena).unwrap();

    session.set_input(5.0, 0).unwrap();
    let err = session.set_input(1.0, 9999).unwrap_err();
    assert!(matches!(
        err,
        TflmError::IndexOutOfRange {
            tensor: "input",
            index: 9999,
            len: 1,
        }
    ));

    // The rejected write must not have clobbered element 0.
    session.invoke().unwrap();
    assert_abs_diff_eq!(session.output(0).unwrap(), 10.0);
}

#[test]
fn output_bounds_checked() {
    let model = fake_model(3, 1, 2);
    let mut arena = [0u8; 64];
    let mut session = ModelSession::load(&FakeEngine::new(), &model, &mut arena).unwrap();

    session.set_input(1.0, 0).unwrap();
    session.invoke().unwrap();

    assert!(session.output(0).is_ok());
    assert!(session.output(1).is_ok());
    let err = session.output(2).unwrap_err();
    assert!(matches!(
        err,
        TflmError::IndexOutOfRange {
            tensor: "output",
            index: 2,
            len: 2,
        }
    ));
}

#[test]
fn negative_output_is_not_an_error() {
    let model = fake_model(3, 1, 1);
    let mut arena = [0u8; 64];
    let mut session = ModelSession::load(&FakeEngine::new(), &model, &mut arena).unwrap();

    // A graph can legitimately produce -1.0; only Err signals failure.
    session.set_input(-0.5, 0).unwrap();
    session.invoke().unwrap();
    assert_abs_diff_eq!(session.output(0).unwrap(), -1.0);
}

#[test]
fn invoke_failure_carries_engine_text() {
    let model = fake_model(3, 1, 1);
    let mut arena = [0u8; 64];
    let mut session = ModelSession::load(&FakeEngine::failing(), &model, &mut arena).unwrap();

    let err = session.invoke().unwrap_err();
    match err {
        TflmError::Inference(msg) => assert_eq!(msg, "op dispatch failed"),
        other => panic!("expected Inference, got {:?}", other),
    }
}

#[test]
fn outputs_reflect_engine_computation() {
    let model = fake_model(3, 2, 2);
    let mut arena = [0u8; 64];
    let mut session = ModelSession::load(&FakeEngine::new(), &model, &mut arena).unwrap();

    session.set_inputs(&[1.0, 2.5]).unwrap();
    session.invoke().unwrap();

    // The engine transforms the data; no write-read round trip.
    let outputs = session.outputs();
    assert_eq!(outputs.len(), 2);
    assert_abs_diff_eq!(outputs[0], 2.0);
    assert_abs_diff_eq!(outputs[1], 5.0);
}

#[test]
fn set_inputs_rejects_excess_values() {
    let model = fake_model(3, 2, 1);
    let mut arena = [0u8; 64];
    let mut session = ModelSession::load(&FakeEngine::new(), &model, &mut arena).unwrap();

    let err = session.set_inputs(&[1.0, 2.0, 3.0]).unwrap_err();
    assert!(matches!(
        err,
        TflmError::IndexOutOfRange {
            tensor: "input",
            index: 2,
            len: 2,
        }
    ));
}

#[test]
fn full_inference_scenario() -> Result<()> {
    let model = fake_model(3, 1, 1);
    let mut arena = [0u8; 2048];

    let mut session = ModelSession::load(&FakeEngine::new(), &model, &mut arena)?;
    session.set_input(3.0, 0)?;
    session.invoke()?;

    let value = session.output(0)?;
    assert_abs_diff_eq!(value, 6.0);
    Ok(())
}
