//! Variadic argument formatting
//!
//! A log call takes an ordered list of [`LogArg`]s. [`format_args`] turns that
//! list into [`Emission`]s using interleaved grouping: primitive arguments are
//! space-joined into a text line, and every structured argument is emitted on
//! its own right after the text that preceded it.
//!
//! ```
//! use multisink_logger::core::args::{format_args, Emission, LogArg};
//! use serde_json::json;
//!
//! let emissions = format_args([
//!     LogArg::from("a"),
//!     LogArg::from(json!({"x": 1})),
//!     LogArg::from("b"),
//!     LogArg::from("c"),
//! ]);
//! assert_eq!(
//!     emissions,
//!     vec![
//!         Emission::Text("a".to_string()),
//!         Emission::Structured(json!({"x": 1})),
//!         Emission::Text("b c".to_string()),
//!     ]
//! );
//! ```

use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// One argument of a log call.
#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    /// A missing value (`None`, JSON `null`, NaN)
    Absent,
    Bool(bool),
    Number(Number),
    Text(String),
    /// An object or array
    Structured(Value),
}

impl LogArg {
    /// Use the value's own `Display` conversion.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        LogArg::Text(value.to_string())
    }

    /// Serialize an arbitrary value through serde.
    ///
    /// Values that fail to serialize become a text placeholder instead of
    /// aborting the log call.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => LogArg::from(value),
            Err(e) => LogArg::Text(format!("[unserializable: {}]", e)),
        }
    }

    /// Falsy primitives contribute nothing to the output.
    pub fn is_falsy(&self) -> bool {
        match self {
            LogArg::Absent => true,
            LogArg::Bool(b) => !b,
            LogArg::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
            LogArg::Text(s) => s.is_empty(),
            LogArg::Structured(_) => false,
        }
    }

    /// Textual form of a primitive argument, `None` when it contributes nothing.
    fn primitive_text(&self) -> Option<String> {
        if self.is_falsy() {
            return None;
        }
        match self {
            LogArg::Bool(b) => Some(b.to_string()),
            LogArg::Number(n) => Some(n.to_string()),
            LogArg::Text(s) => Some(s.clone()),
            LogArg::Absent | LogArg::Structured(_) => None,
        }
    }
}

/// A discrete unit handed to the sinks.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    Text(String),
    Structured(Value),
}

impl Emission {
    /// Render as a single string. Structured payloads use canonical JSON.
    pub fn render(&self) -> String {
        match self {
            Emission::Text(text) => text.clone(),
            Emission::Structured(value) => canonical_json(value),
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Emission::Text(_) => None,
            Emission::Structured(value) => Some(value),
        }
    }
}

/// Compact JSON with object keys in sorted order.
///
/// `serde_json::Map` is backed by a `BTreeMap`, so keys are already sorted at
/// every nesting level.
pub fn canonical_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("[unserializable: {}]", e))
}

#[derive(Default)]
struct Group {
    text: String,
    object: Option<Value>,
}

/// Group arguments into emissions.
///
/// Runs of primitives are joined with single spaces. A structured argument
/// closes the current group: its preceding text (if any) is emitted first,
/// then the object. Trailing primitives form a final text emission.
pub fn format_args<I>(args: I) -> Vec<Emission>
where
    I: IntoIterator<Item = LogArg>,
{
    let mut groups = vec![Group::default()];

    for arg in args {
        if let LogArg::Structured(value) = arg {
            if let Some(current) = groups.last_mut() {
                current.object = Some(value);
            }
            groups.push(Group::default());
        } else if let Some(text) = arg.primitive_text() {
            if let Some(current) = groups.last_mut() {
                if !current.text.is_empty() {
                    current.text.push(' ');
                }
                current.text.push_str(&text);
            }
        }
    }

    let mut emissions = Vec::with_capacity(groups.len() * 2);
    for group in groups {
        if !group.text.is_empty() {
            emissions.push(Emission::Text(group.text));
        }
        if let Some(object) = group.object {
            emissions.push(Emission::Structured(object));
        }
    }
    emissions
}

impl From<Value> for LogArg {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => LogArg::Absent,
            Value::Bool(b) => LogArg::Bool(b),
            Value::Number(n) => LogArg::Number(n),
            Value::String(s) => LogArg::Text(s),
            Value::Array(_) | Value::Object(_) => LogArg::Structured(value),
        }
    }
}

impl From<&Value> for LogArg {
    fn from(value: &Value) -> Self {
        LogArg::from(value.clone())
    }
}

impl From<&str> for LogArg {
    fn from(s: &str) -> Self {
        LogArg::Text(s.to_string())
    }
}

impl From<String> for LogArg {
    fn from(s: String) -> Self {
        LogArg::Text(s)
    }
}

impl From<&String> for LogArg {
    fn from(s: &String) -> Self {
        LogArg::Text(s.clone())
    }
}

impl From<char> for LogArg {
    fn from(c: char) -> Self {
        LogArg::Text(c.to_string())
    }
}

impl From<bool> for LogArg {
    fn from(b: bool) -> Self {
        LogArg::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogArg {
                fn from(n: $ty) -> Self {
                    LogArg::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for LogArg {
    fn from(f: f64) -> Self {
        if f.is_nan() {
            LogArg::Absent
        } else if f.is_infinite() {
            LogArg::Text(if f > 0.0 { "inf" } else { "-inf" }.to_string())
        } else {
            Number::from_f64(f).map_or(LogArg::Absent, LogArg::Number)
        }
    }
}

impl From<f32> for LogArg {
    /// Widens through the shortest decimal form, so `0.1f32` stays `0.1`.
    fn from(f: f32) -> Self {
        LogArg::from(f.to_string().parse::<f64>().unwrap_or(f as f64))
    }
}

impl<T: Into<LogArg>> From<Option<T>> for LogArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(LogArg::Absent, Into::into)
    }
}
