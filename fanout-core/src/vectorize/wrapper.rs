use log::trace;

use crate::{
    args::CallArgs,
    callable::Callable,
    error::ExpandError,
    signature::Signature,
    value::{Kind, Value},
    vectorize::{Returns, Vectorize},
};

/// The argument slot a vector was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Positional(usize),
    Keyword(String),
}

/// One eligible vector: where it sits, its runtime kind, and the
/// elements it will be expanded over.
#[derive(Debug)]
struct Eligible {
    slot: Slot,
    kind: Kind,
    elements: Vec<Value>,
}

/// A callable wrapped for vectorization.
///
/// Created by [`Vectorize::wrap`]. `Vectorized` has the same calling
/// convention as its target and is itself a [`Callable`], so wrapped
/// callables compose. Each invocation classifies the supplied arguments
/// afresh; no state survives between calls.
///
/// In tensor mode (the default), the first eligible vector drives one
/// expansion level: each of its elements is substituted and the wrapper
/// recurses, so several vector arguments nest into a cross product. The
/// first vector is found in a fixed precedence: declared positional slots
/// in declaration order, then variadic positional arguments, then keyword
/// arguments in key order.
///
/// In zipped mode, all eligible vectors are consumed in a single pass:
/// they are iterated in parallel, truncated to the shortest, and the
/// target is invoked once per step with every slot substituted at once.
///
/// When no eligible vector is present, the call passes through to the
/// target unchanged.
pub struct Vectorized<C> {
    config: Vectorize,
    signature: Signature,
    target: C,
}

impl<C> Vectorized<C> {
    pub(crate) fn new(config: Vectorize, signature: Signature, target: C) -> Self {
        Self {
            config,
            signature,
            target,
        }
    }

    /// The wrapped callable's declared signature, unchanged by wrapping.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The wrapped callable.
    pub fn target(&self) -> &C {
        &self.target
    }
}

impl<C: Callable> Vectorized<C> {
    /// Scans the supplied arguments for eligible vectors, in precedence
    /// order: declared positional slots named in `keys` (lowest index
    /// first), then the variadic positional tail, then keyword arguments
    /// in `keys` order. Runs fresh on every call.
    fn classify(&self, args: &CallArgs) -> Vec<Eligible> {
        let declared_count = self.signature.params().len();
        let positional = args.positional();
        let mut found = Vec::new();

        let mut declared: Vec<usize> = self
            .config
            .keys
            .iter()
            .filter_map(|key| self.signature.index_of(key))
            .filter(|&index| index < positional.len())
            .collect();
        declared.sort_unstable();
        declared.dedup();
        for index in declared {
            if let Some(eligible) = self.eligible(Slot::Positional(index), &positional[index]) {
                found.push(eligible);
            }
        }

        if self.config.varargs {
            for index in declared_count..positional.len() {
                if let Some(eligible) = self.eligible(Slot::Positional(index), &positional[index])
                {
                    found.push(eligible);
                }
            }
        }

        for key in &self.config.keys {
            if !self.config.varkw && !self.signature.contains(key) {
                continue;
            }
            if let Some(value) = args.keyword(key) {
                if let Some(eligible) = self.eligible(Slot::Keyword(key.clone()), value) {
                    found.push(eligible);
                }
            }
        }

        found
    }

    fn eligible(&self, slot: Slot, value: &Value) -> Option<Eligible> {
        let kind = value.kind()?;
        if !self.config.types.contains(kind) {
            return None;
        }
        let elements = value.elements()?;
        Some(Eligible {
            slot,
            kind,
            elements,
        })
    }

    /// Expands one vector: substitutes each element at its slot and
    /// recurses, so remaining vectors expand at deeper levels.
    fn expand_tensor(
        &self,
        args: &CallArgs,
        vector: Eligible,
    ) -> Result<Value, ExpandError<C::Error>> {
        trace!(
            "{}: tensor expansion over {:?} ({} elements)",
            self.signature.name(),
            vector.slot,
            vector.elements.len()
        );

        let mut results = Vec::with_capacity(vector.elements.len());
        for element in vector.elements {
            let substituted = substitute(args, &vector.slot, element);
            results.push(self.call(substituted)?);
        }

        match self.config.returns {
            Returns::Suppress => Ok(Value::None),
            Returns::Container(kind) => kind.assemble(results).map_err(ExpandError::from),
            Returns::Infer => vector.kind.assemble(results).map_err(ExpandError::from),
        }
    }

    /// Consumes all eligible vectors in one pass: iterates them in
    /// parallel, truncated to the shortest, and invokes the target (never
    /// the wrapper) once per step with every slot substituted.
    fn expand_zipped(
        &self,
        args: &CallArgs,
        vectors: Vec<Eligible>,
    ) -> Result<Value, ExpandError<C::Error>> {
        let steps = vectors
            .iter()
            .map(|vector| vector.elements.len())
            .min()
            .unwrap_or(0);
        trace!(
            "{}: zipped expansion across {} vectors ({steps} steps)",
            self.signature.name(),
            vectors.len()
        );

        let mut results = Vec::with_capacity(steps);
        for step in 0..steps {
            let mut substituted = args.clone();
            for vector in &vectors {
                substituted =
                    substitute(&substituted, &vector.slot, vector.elements[step].clone());
            }
            results.push(
                self.target
                    .call(substituted)
                    .map_err(ExpandError::Target)?,
            );
        }

        match self.config.returns {
            Returns::Suppress => Ok(Value::None),
            Returns::Container(kind) => kind.assemble(results).map_err(ExpandError::from),
            Returns::Infer => Kind::List.assemble(results).map_err(ExpandError::from),
        }
    }
}

fn substitute(args: &CallArgs, slot: &Slot, element: Value) -> CallArgs {
    match slot {
        Slot::Positional(index) => args.with_positional(*index, element),
        Slot::Keyword(name) => args.with_keyword(name, element),
    }
}

impl<C: Callable> Callable for Vectorized<C> {
    type Error = ExpandError<C::Error>;

    fn call(&self, args: CallArgs) -> Result<Value, Self::Error> {
        let mut found = self.classify(&args);

        if self.config.zipped {
            if found.is_empty() {
                return self.target.call(args).map_err(ExpandError::Target);
            }
            return self.expand_zipped(&args, found);
        }

        if found.is_empty() {
            return self.target.call(args).map_err(ExpandError::Target);
        }
        self.expand_tensor(&args, found.remove(0))
    }
}
