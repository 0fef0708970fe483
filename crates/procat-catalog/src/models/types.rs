//! Closed enumerations of the catalog model
//!
//! Each enum is stored as its upper-snake-case name in a TEXT column and
//! serialized under the same name.

use procat_common::ParseEnumError;
use serde::{Deserialize, Serialize};

/// Generates `ALL`, `as_str`, `Display` and a case-insensitive `FromStr`
/// over the stored names.
macro_rules! stored_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $stored:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $stored),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_uppercase().as_str() {
                    $($stored => Ok($name::$variant),)+
                    _ => Err(ParseEnumError::new($label, s)),
                }
            }
        }
    };
}

stored_enum! {
    /// Discriminator of the processor family
    DataProcessorType, "data processor type" {
        Algorithm => "ALGORITHM",
        Operation => "OPERATION",
        Visualisation => "VISUALISATION",
    }
}

impl DataProcessorType {
    /// Algorithms terminate a processing chain; operations and
    /// visualisations can feed other processors.
    pub fn is_chainable(self) -> bool {
        match self {
            DataProcessorType::Algorithm => false,
            DataProcessorType::Operation | DataProcessorType::Visualisation => true,
        }
    }
}

stored_enum! {
    MetricType, "metric type" {
        Recall => "RECALL",
        Precision => "PRECISION",
        F1Score => "F1_SCORE",
        Undefined => "UNDEFINED",
    }
}

impl Default for MetricType {
    fn default() -> Self {
        MetricType::Undefined
    }
}

stored_enum! {
    /// Semantic shape of the data a processor consumes or produces
    DataType, "data type" {
        Any => "ANY",
        None => "NONE",
        Hierarchical => "HIERARCHICAL",
        Image => "IMAGE",
        Tabular => "TABULAR",
        TimeSeries => "TIME_SERIES",
        Video => "VIDEO",
        Voice => "VOICE",
        Model => "MODEL",
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Any
    }
}

stored_enum! {
    /// Value kind of a processor parameter
    ParameterType, "parameter type" {
        Boolean => "BOOLEAN",
        Complex => "COMPLEX",
        Dictionary => "DICTIONARY",
        Float => "FLOAT",
        Integer => "INTEGER",
        List => "LIST",
        String => "STRING",
        Tuple => "TUPLE",
        Undefined => "UNDEFINED",
    }
}
