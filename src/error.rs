use thiserror::Error;

use crate::backend::ShaderStage;

/// Reasons the initializer can fail to produce a [`RenderContext`](crate::RenderContext).
///
/// None of these are retried: the animation simply never starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("graphics context is not available on this surface")]
    ContextUnavailable,
    #[error("backend could not create a {0} shader object")]
    ShaderCreation(ShaderStage),
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("backend could not create a program object")]
    ProgramCreation,
    #[error("program failed to link: {log}")]
    Link { log: String },
    #[error("attribute `{0}` is not active in the linked program")]
    MissingAttribute(&'static str),
    #[error("uniform `{0}` is not active in the linked program")]
    MissingUniform(&'static str),
    #[error("backend could not create the vertex buffer")]
    BufferCreation,
}

impl From<InitError> for wasm_bindgen::JsValue {
    fn from(err: InitError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
