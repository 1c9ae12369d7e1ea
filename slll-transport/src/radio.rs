//! The capability boundary the core drives: raw bytes in, raw bytes out.
//!
//! A concrete radio (hardware SPI driver, loopback test double, IPC-mediated
//! network simulator) plugs in at [`crate::Transceiver::new`] construction
//! time. The core never knows which one it has.

use crate::error::ParameterError;

/// Opaque byte transport. `send`/`receive` are the only operations that may
/// block; everything else in this crate is non-blocking.
#[allow(async_fn_in_trait)]
pub trait Radio: Send + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Transmit a fully-serialized wire frame.
    async fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Poll for a received frame. Returns `None` when nothing is waiting;
    /// implementations are expected to return promptly rather than block
    /// indefinitely (the RX task supplies its own backoff between polls).
    async fn receive(&mut self) -> Result<Option<Vec<u8>>, Self::Error>;
}

/// The type of a tunable radio parameter, with its constraint encoded in
/// the matching variant of [`ParameterValue`]'s range counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    Int,
    Float,
    Enum,
    Bool,
}

/// A concrete value for a radio parameter, exchanged through `get`/`set`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Int(i64),
    Float(f64),
    Enum(String),
    Bool(bool),
}

/// The set of legal values a parameter may take, used to validate `set`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterConstraint {
    IntRange(i64, i64),
    FloatRange(f64, f64),
    EnumValues(Vec<String>),
    Bool,
}

impl ParameterConstraint {
    fn accepts(&self, value: &ParameterValue) -> bool {
        match (self, value) {
            (ParameterConstraint::IntRange(min, max), ParameterValue::Int(v)) => {
                v >= min && v <= max
            }
            (ParameterConstraint::FloatRange(min, max), ParameterValue::Float(v)) => {
                v >= min && v <= max
            }
            (ParameterConstraint::EnumValues(values), ParameterValue::Enum(v)) => {
                values.contains(v)
            }
            (ParameterConstraint::Bool, ParameterValue::Bool(_)) => true,
            _ => false,
        }
    }
}

/// Describes one tunable knob on a radio: name, type, legal values, unit,
/// human description, step size, and whether it may be written at all.
///
/// Rather than reflecting over decorated properties at runtime, a radio
/// simply returns a `Vec` of these from [`ParameterTable::parameters`].
#[derive(Debug, Clone, PartialEq)]
pub struct RadioParameter {
    pub name: String,
    pub param_type: ParameterType,
    pub constraint: ParameterConstraint,
    pub unit: Option<String>,
    pub description: String,
    pub step: Option<f64>,
    pub readonly: bool,
}

/// Optional capability: a radio that can enumerate and validate its own
/// tunable parameters for UI generation. Hardware radios implement this;
/// [`crate::loopback::LoopbackRadio`] does not, since it has no RF
/// parameters to tune.
pub trait ParameterTable {
    /// All parameters this radio exposes, in declaration order.
    fn parameters(&self) -> Vec<RadioParameter>;

    /// Current value of every declared parameter.
    fn get(&self, name: &str) -> Result<ParameterValue, ParameterError>;

    /// Set `name` to `value`, subject to the declared constraint and
    /// read-only flag.
    fn set(&mut self, name: &str, value: ParameterValue) -> Result<(), ParameterError>;
}

/// Validates `value` against `param`'s declared type and constraint,
/// without touching the radio. Shared by every [`ParameterTable`]
/// implementation so the validation rules live in one place.
pub fn validate(param: &RadioParameter, value: &ParameterValue) -> Result<(), ParameterError> {
    if param.readonly {
        return Err(ParameterError::ReadOnly(param.name.clone()));
    }
    let type_matches = matches!(
        (param.param_type, value),
        (ParameterType::Int, ParameterValue::Int(_))
            | (ParameterType::Float, ParameterValue::Float(_))
            | (ParameterType::Enum, ParameterValue::Enum(_))
            | (ParameterType::Bool, ParameterValue::Bool(_))
    );
    if !type_matches {
        return Err(ParameterError::WrongType { name: param.name.clone() });
    }
    if !param.constraint.accepts(value) {
        return Err(ParameterError::OutOfRange { name: param.name.clone() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq_param() -> RadioParameter {
        RadioParameter {
            name: "frequency_mhz".into(),
            param_type: ParameterType::Int,
            constraint: ParameterConstraint::IntRange(400, 960),
            unit: Some("MHz".into()),
            description: "Carrier frequency".into(),
            step: None,
            readonly: false,
        }
    }

    #[test]
    fn in_range_value_validates() {
        assert!(validate(&freq_param(), &ParameterValue::Int(915)).is_ok());
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        assert_eq!(
            validate(&freq_param(), &ParameterValue::Int(30)).unwrap_err(),
            ParameterError::OutOfRange { name: "frequency_mhz".into() }
        );
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert_eq!(
            validate(&freq_param(), &ParameterValue::Bool(true)).unwrap_err(),
            ParameterError::WrongType { name: "frequency_mhz".into() }
        );
    }

    #[test]
    fn readonly_parameter_rejects_any_write() {
        let mut p = freq_param();
        p.readonly = true;
        assert_eq!(
            validate(&p, &ParameterValue::Int(915)).unwrap_err(),
            ParameterError::ReadOnly("frequency_mhz".into())
        );
    }

    #[test]
    fn enum_constraint_checks_membership() {
        let p = RadioParameter {
            name: "spreading_factor".into(),
            param_type: ParameterType::Enum,
            constraint: ParameterConstraint::EnumValues(
                ["SF7", "SF8", "SF9", "SF10", "SF11", "SF12"].iter().map(|s| s.to_string()).collect(),
            ),
            unit: None,
            description: "LoRa spreading factor".into(),
            step: None,
            readonly: false,
        };
        assert!(validate(&p, &ParameterValue::Enum("SF9".into())).is_ok());
        assert_eq!(
            validate(&p, &ParameterValue::Enum("SF13".into())).unwrap_err(),
            ParameterError::OutOfRange { name: "spreading_factor".into() }
        );
    }
}
