/// A wrap-time description of a callable's declared parameters.
///
/// Rust offers no runtime argument reflection, so the caller states the
/// signature explicitly when wrapping: the callable's name and the ordered
/// names of its declared, positionally addressable parameters. Arguments
/// supplied positionally beyond the declared list form the variadic tail.
///
/// The wrapper keeps the signature accessible unchanged, so tooling that
/// inspects a wrapped callable sees the original name, parameters, and doc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    name: String,
    params: Vec<String>,
    doc: Option<String>,
}

impl Signature {
    /// Creates a signature from a callable name and its declared
    /// parameter names, in declaration order.
    pub fn new<N, I>(name: N, params: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
            doc: None,
        }
    }

    /// Attaches a doc string to carry through wrapping.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// The callable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter names, in declaration order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The attached doc string, if any.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// The positional slot of a declared parameter. A name that matches
    /// no declared parameter is not an error; it simply has no slot.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|param| param == name)
    }

    /// Whether `name` is a declared parameter.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}
