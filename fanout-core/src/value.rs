use std::fmt;

use crate::error::AssembleError;

/// The container kinds recognized by vectorization.
///
/// This is the closed set of runtime shapes a call argument can take to
/// qualify as a vector, and the set of shapes results can be assembled
/// into. Scalars are not part of it; a scalar argument is never expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// An ordered sequence ([`Value::List`]).
    List,
    /// A fixed, ordered grouping ([`Value::Tuple`]).
    Tuple,
    /// Unique elements in insertion order ([`Value::Set`]).
    Set,
    /// Unique keys mapped to values, in insertion order ([`Value::Map`]).
    Map,
}

impl Kind {
    /// Assembles per-element results into a container of this kind.
    ///
    /// Lists and tuples accept any elements. Sets deduplicate equal
    /// elements and require every element to be hashable. Maps require
    /// every element to be a two-item tuple whose key is hashable; the
    /// last occurrence of a duplicate key wins.
    ///
    /// # Errors
    ///
    /// Returns an [`AssembleError`] if the chosen kind cannot hold the
    /// produced elements.
    pub fn assemble(self, items: Vec<Value>) -> Result<Value, AssembleError> {
        match self {
            Kind::List => Ok(Value::List(items)),
            Kind::Tuple => Ok(Value::Tuple(items)),
            Kind::Set => Value::set(items),
            Kind::Map => {
                let mut pairs = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Tuple(mut fields) if fields.len() == 2 => {
                            let value = fields.pop().unwrap_or(Value::None);
                            let key = fields.pop().unwrap_or(Value::None);
                            pairs.push((key, value));
                        }
                        other => {
                            return Err(AssembleError::NotAPair {
                                found: other.type_name(),
                            });
                        }
                    }
                }
                Value::map(pairs)
            }
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::List => "list",
            Kind::Tuple => "tuple",
            Kind::Set => "set",
            Kind::Map => "map",
        };
        write!(f, "{name}")
    }
}

/// A set of [`Kind`]s, used to configure which containers count as vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSet {
    bits: u8,
}

impl KindSet {
    /// No kinds; nothing qualifies as a vector.
    pub const EMPTY: Self = Self { bits: 0 };

    /// All four kinds. This is the default eligibility set.
    pub const ALL: Self = Self { bits: 0b1111 };

    /// Builds a set from the given kinds.
    pub fn of(kinds: &[Kind]) -> Self {
        kinds.iter().fold(Self::EMPTY, |set, &kind| set.with(kind))
    }

    /// Returns this set with `kind` added.
    #[must_use]
    pub const fn with(self, kind: Kind) -> Self {
        Self {
            bits: self.bits | bit(kind),
        }
    }

    /// Whether `kind` is a member of this set.
    pub const fn contains(self, kind: Kind) -> bool {
        self.bits & bit(kind) != 0
    }
}

impl Default for KindSet {
    fn default() -> Self {
        Self::ALL
    }
}

const fn bit(kind: Kind) -> u8 {
    match kind {
        Kind::List => 0b0001,
        Kind::Tuple => 0b0010,
        Kind::Set => 0b0100,
        Kind::Map => 0b1000,
    }
}

/// A dynamically typed call argument or result.
///
/// `Value` stands in for runtime argument reflection: callables take and
/// return `Value`s, and the wrapper inspects their runtime shape to decide
/// what to expand. Scalars pass through untouched; the four container
/// variants are candidates for vectorization (see [`Kind`]).
///
/// Hashability follows the usual dynamic-language model: scalars are
/// hashable, a tuple is hashable iff all its items are, and lists, sets,
/// and maps never are. Sets and map keys may only hold hashable values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Builds a list from anything convertible to values.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a tuple from anything convertible to values.
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a set, deduplicating equal items and keeping insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::Unhashable`] if an item is not hashable.
    pub fn set<I>(items: I) -> Result<Self, AssembleError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if let Some(kind) = item.kind() {
                if !item.is_hashable() {
                    return Err(AssembleError::Unhashable {
                        container: Kind::Set,
                        element: kind,
                    });
                }
            }
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Ok(Value::Set(unique))
    }

    /// Builds a map from key-value pairs, keeping first-insertion order.
    /// The last value for a duplicate key wins.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::Unhashable`] if a key is not hashable.
    pub fn map<I>(pairs: I) -> Result<Self, AssembleError>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut entries: Vec<(Value, Value)> = Vec::new();
        for (key, value) in pairs {
            if let Some(kind) = key.kind() {
                if !key.is_hashable() {
                    return Err(AssembleError::Unhashable {
                        container: Kind::Map,
                        element: kind,
                    });
                }
            }
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
        Ok(Value::Map(entries))
    }

    /// The container kind of this value, or `None` for scalars.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::List(_) => Some(Kind::List),
            Value::Tuple(_) => Some(Kind::Tuple),
            Value::Set(_) => Some(Kind::Set),
            Value::Map(_) => Some(Kind::Map),
            _ => None,
        }
    }

    /// A short name for this value's runtime type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    /// Whether this value may be a set element or map key.
    pub fn is_hashable(&self) -> bool {
        match self {
            Value::List(_) | Value::Set(_) | Value::Map(_) => false,
            Value::Tuple(items) => items.iter().all(Value::is_hashable),
            _ => true,
        }
    }

    /// The elements iterated when this value drives an expansion:
    /// list, tuple, and set items in order, map keys in order.
    /// Scalars have no elements.
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items.clone()),
            Value::Map(entries) => Some(entries.iter().map(|(key, _)| key.clone()).collect()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}
