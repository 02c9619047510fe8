pub mod bsm;
pub mod stats;

/// Call or put. Serialized lowercase; `code()` feeds the option id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Call => "C",
            Self::Put => "P",
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// First-order sensitivities of an option price. Stack-allocated, Copy.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

/// One pricing pass: fair value plus Greeks and the d1/d2 intermediates.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Quote {
    pub price: f64,
    pub greeks: Greeks,
    pub d1: f64,
    pub d2: f64,
}
