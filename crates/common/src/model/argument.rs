use serde::{Deserialize, Serialize};

use crate::model::bundle::{Bundle, NavValue};

/// The type of a destination argument. Deep-link placeholders are parsed
/// through the declared type before they land in an argument bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavType {
    Bool,
    Int,
    Float,
    Str,
}

impl NavType {
    pub fn name(self) -> &'static str {
        match self {
            NavType::Bool => "boolean",
            NavType::Int => "integer",
            NavType::Float => "float",
            NavType::Str => "string",
        }
    }

    /// Parse a raw string (extracted from a deep-link placeholder) into a
    /// typed value. `None` means the string does not convert, which rejects
    /// the whole deep-link match.
    pub fn parse(self, raw: &str) -> Option<NavValue> {
        match self {
            NavType::Bool => raw.parse().ok().map(NavValue::Bool),
            NavType::Int => raw.parse().ok().map(NavValue::Int),
            NavType::Float => raw.parse().ok().map(NavValue::Float),
            NavType::Str => Some(NavValue::Str(raw.to_string())),
        }
    }

    fn matches(self, value: &NavValue) -> bool {
        matches!(
            (self, value),
            (NavType::Bool, NavValue::Bool(_))
                | (NavType::Int, NavValue::Int(_))
                | (NavType::Float, NavValue::Float(_))
                | (NavType::Str, NavValue::Str(_))
        )
    }
}

/// A named argument declared on a destination: its type, whether an absent
/// value is acceptable, and an optional default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavArgument {
    ty: NavType,
    nullable: bool,
    default: Option<NavValue>,
}

impl NavArgument {
    pub fn new(ty: NavType) -> Self {
        NavArgument { ty, nullable: false, default: None }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_default(mut self, default: NavValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn ty(&self) -> NavType {
        self.ty
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default(&self) -> Option<&NavValue> {
        self.default.as_ref()
    }

    /// Write this argument's default into `bundle` if it has one.
    pub fn put_default_value(&self, name: &str, bundle: &mut Bundle) {
        if let Some(default) = &self.default {
            bundle.insert(name, default.clone());
        }
    }

    /// Check that the value stored under `name` (if any) has this argument's
    /// declared type.
    pub fn verify(&self, name: &str, bundle: &Bundle) -> bool {
        match bundle.get(name) {
            Some(value) => self.ty.matches(value),
            None => true,
        }
    }
}
