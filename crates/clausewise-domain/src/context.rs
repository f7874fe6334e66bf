//! Analysis context - contract type and reviewing perspective

/// The `(contract_type, perspective)` pair a contract is reviewed under
///
/// Both values are free-form and compared case-insensitively; they are stored
/// lowercased. Typical contract types are `nda`, `services`, `employment`;
/// typical perspectives are `employee`/`employer`, `discloser`/`receiver`,
/// `vendor`/`client`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AnalysisContext {
    /// Active contract type, if known
    pub contract_type: Option<String>,

    /// Reviewing party's role, if known
    pub perspective: Option<String>,
}

impl AnalysisContext {
    /// Create a context; blank values are treated as absent
    ///
    /// # Examples
    ///
    /// ```
    /// use clausewise_domain::AnalysisContext;
    ///
    /// let ctx = AnalysisContext::new(Some("NDA"), Some(" Receiver "));
    /// assert_eq!(ctx.contract_type.as_deref(), Some("nda"));
    /// assert_eq!(ctx.perspective.as_deref(), Some("receiver"));
    ///
    /// let empty = AnalysisContext::new(Some(""), None::<&str>);
    /// assert!(empty.contract_type.is_none());
    /// ```
    pub fn new<C: AsRef<str>, P: AsRef<str>>(contract_type: Option<C>, perspective: Option<P>) -> Self {
        Self {
            contract_type: contract_type.and_then(|c| normalize(c.as_ref())),
            perspective: perspective.and_then(|p| normalize(p.as_ref())),
        }
    }

    /// Context with neither contract type nor perspective
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the contract type
    pub fn with_contract_type(mut self, contract_type: &str) -> Self {
        self.contract_type = normalize(contract_type);
        self
    }

    /// Set the perspective
    pub fn with_perspective(mut self, perspective: &str) -> Self {
        self.perspective = normalize(perspective);
        self
    }
}

fn normalize(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_lowercase())
    }
}
