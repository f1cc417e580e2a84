
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MultilevelError {
    #[error("Clabject '{clabject}' is declared as an instance and cannot be instantiated further")]
    ClabjectDeclaredAsInstance { clabject: String },
    #[error("Invalid definition of property '{property}': {reason}")]
    InvalidPropertyDefinition { property: String, reason: String },
    #[error("Unknown property '{property}' on clabject '{clabject}'")]
    UnknownProperty { property: String, clabject: String },
    #[error("Constraint '{constraint}' violated by value {value} assigned to property '{property}'")]
    ConstraintViolation {
        property: String,
        value: String,
        constraint: String,
    },
    #[error("Property '{property}' on clabject '{clabject}' reached its target depth without a value")]
    UnsetProperty { property: String, clabject: String },
    #[error("Invalid clabject name: {0}")]
    InvalidName(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MultilevelError>;
