use std::fmt;

/// OCPP-J 1.6 CallError codes. Codes outside this set decode as `GenericError`.
#[derive(serde::Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    NotImplemented,
    NotSupported,
    InternalError,
    ProtocolError,
    SecurityError,
    FormationViolation,
    PropertyConstraintViolation,
    OccurenceConstraintViolation,
    TypeConstraintViolation,
    GenericError,
}

impl ProtocolError {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolError::NotImplemented => "NotImplemented",
            ProtocolError::NotSupported => "NotSupported",
            ProtocolError::InternalError => "InternalError",
            ProtocolError::ProtocolError => "ProtocolError",
            ProtocolError::SecurityError => "SecurityError",
            ProtocolError::FormationViolation => "FormationViolation",
            ProtocolError::PropertyConstraintViolation => "PropertyConstraintViolation",
            ProtocolError::OccurenceConstraintViolation => "OccurenceConstraintViolation",
            ProtocolError::TypeConstraintViolation => "TypeConstraintViolation",
            ProtocolError::GenericError => "GenericError",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "NotImplemented" => ProtocolError::NotImplemented,
            "NotSupported" => ProtocolError::NotSupported,
            "InternalError" => ProtocolError::InternalError,
            "ProtocolError" => ProtocolError::ProtocolError,
            "SecurityError" => ProtocolError::SecurityError,
            "FormationViolation" => ProtocolError::FormationViolation,
            "PropertyConstraintViolation" => ProtocolError::PropertyConstraintViolation,
            // both spellings are seen on the wire
            "OccurenceConstraintViolation" | "OccurrenceConstraintViolation" => {
                ProtocolError::OccurenceConstraintViolation
            }
            "TypeConstraintViolation" => ProtocolError::TypeConstraintViolation,
            _ => ProtocolError::GenericError,
        }
    }
}

impl<'de> serde::Deserialize<'de> for ProtocolError {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(ProtocolError::from_code(&code))
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
