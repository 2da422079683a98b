//! Messages exchanged with the UI layer over the bridge channel.
//!
//! Arguments and results are JSON values. A response is encoded as
//! `{"success": <value>}`, `{"error": {"code": "...", "message": "..."}}` or
//! the string `"not_implemented"`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Argument: brightness in 0.0-1.0. Result: true
pub const SET_SYSTEM_BRIGHTNESS: &str = "setSystemBrightness";
/// No argument. Result: brightness in 0.0-1.0
pub const GET_BRIGHTNESS: &str = "getBrightness";
/// No argument. Result: true
pub const RESET_SYSTEM_BRIGHTNESS: &str = "resetSystemBrightness";
/// No argument. Result: whether settings may be written
pub const HAS_BRIGHTNESS_PERMISSION: &str = "hasBrightnessPermission";
/// No argument. Result: whether settings may be written already
pub const REQUEST_BRIGHTNESS_PERMISSION: &str = "requestBrightnessPermission";
/// Argument: whether to keep the screen on. Result: null
pub const KEEP_SCREEN_ON: &str = "keepScreenOn";

/// A call of a bridge method with its single argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Name of the bridge method
    pub method: String,
    /// The single argument, null for methods without one
    #[serde(default)]
    pub argument: Value,
}

impl MethodCall {
    /// A call of `method` with `argument`
    pub fn new(method: &str, argument: Value) -> MethodCall {
        MethodCall {
            method: method.to_owned(),
            argument,
        }
    }

    /// A call of a method taking no argument
    #[cfg(test)]
    pub fn bare(method: &str) -> MethodCall {
        MethodCall::new(method, Value::Null)
    }
}

/// Fixed codes of the failures reported to the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The system refused a display operation, the message says why
    BrightnessError,
    /// The write-settings permission has to be granted first
    PermissionNeeded,
}

/// Outcome of a [MethodCall]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodResponse {
    /// The method's result
    Success(Value),
    /// The method failed
    Error {
        /// What kind of failure it was
        code: ErrorCode,
        /// Human readable details, often the system's own error text
        message: String,
    },
    /// No method of that name
    NotImplemented,
}

impl MethodResponse {
    /// Whether the call went through
    pub fn is_success(&self) -> bool {
        matches!(self, MethodResponse::Success(_))
    }
}
