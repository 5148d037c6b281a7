use crate::{
    node::{Node, NodeTuple},
    operand::{Bindings, DynamicOperand, Operand, StaticOperand},
    value::{Float64, Value},
};

impl StaticOperand {
    /// Evaluate against the supplied bindings. An unbound variable has no
    /// value; it is not an error.
    #[must_use]
    pub fn eval(&self, bindings: &Bindings) -> Option<Value> {
        match self {
            Self::Literal(value) => Some(value.clone()),
            Self::BindVariable(name) => bindings.get(name).cloned(),
        }
    }
}

impl DynamicOperand {
    /// Evaluate to all values of this operand for a tuple.
    ///
    /// `None` means the operand has no value here: the selector's entry is
    /// empty (outer-join miss), the named property is absent, or a case
    /// fold was applied to a non-string value. None of these are errors.
    /// A `Some` result always carries at least one value.
    #[must_use]
    pub fn eval_values<N: Node>(&self, tuple: &NodeTuple<'_, N>) -> Option<Vec<Value>> {
        match self {
            Self::PropertyValue { selector, property } => {
                let values = tuple.node(selector.as_str())?.property(property.as_str())?;

                (!values.is_empty()).then(|| values.to_vec())
            }

            Self::PropertyLength { selector, property } => {
                let values = tuple.node(selector.as_str())?.property(property.as_str())?;

                (!values.is_empty()).then(|| {
                    values
                        .iter()
                        .map(|value| Value::Long(value.length() as i64))
                        .collect()
                })
            }

            Self::NodeName { selector } => {
                let node = tuple.node(selector.as_str())?;

                Some(vec![Value::Name(node.path().name().to_string())])
            }

            Self::NodeLocalName { selector } => {
                let node = tuple.node(selector.as_str())?;

                Some(vec![Value::Name(node.path().local_name().to_string())])
            }

            Self::NodeDepth { selector } => {
                let node = tuple.node(selector.as_str())?;

                Some(vec![Value::Long(i64::from(node.path().depth()))])
            }

            Self::NodePath { selector } => {
                let node = tuple.node(selector.as_str())?;

                Some(vec![Value::Path(node.path().as_str().to_string())])
            }

            Self::FullTextSearchScore { selector } => {
                let node = tuple.node(selector.as_str())?;
                let score = Float64::try_new(node.full_text_score()?)?;

                Some(vec![Value::Double(score)])
            }

            Self::LowerCase(inner) => case_fold(inner.eval_values(tuple)?, str::to_lowercase),
            Self::UpperCase(inner) => case_fold(inner.eval_values(tuple)?, str::to_uppercase),
        }
    }

    /// Evaluate to the single value of this operand for a tuple.
    ///
    /// Defined iff `eval_values` yields exactly one value; a multi-valued
    /// result has no single value, so comparisons over it come out unknown.
    #[must_use]
    pub fn eval<N: Node>(&self, tuple: &NodeTuple<'_, N>) -> Option<Value> {
        let mut values = self.eval_values(tuple)?;

        if values.len() == 1 { values.pop() } else { None }
    }
}

impl Operand {
    #[must_use]
    pub fn eval<N: Node>(&self, tuple: &NodeTuple<'_, N>, bindings: &Bindings) -> Option<Value> {
        match self {
            Self::Static(op) => op.eval(bindings),
            Self::Dynamic(op) => op.eval(tuple),
        }
    }
}

/// Case-fold every value; all values must be string-like or the whole
/// operand is undefined.
fn case_fold(values: Vec<Value>, fold: impl Fn(&str) -> String) -> Option<Vec<Value>> {
    values
        .iter()
        .map(|value| value.as_text().map(|s| Value::String(fold(s))))
        .collect()
}
